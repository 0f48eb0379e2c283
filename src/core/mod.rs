pub mod form;
pub mod loader;
pub mod numbers;
pub mod store;
pub mod sync;
