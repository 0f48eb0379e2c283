pub mod config;
pub mod core;
pub mod reports;
pub mod workspace;

pub use crate::core::store::{
    Department, DepartmentStore, Employee, EmployeeStore, Record, Rejection, Store,
};
pub use crate::core::sync::{EditState, Notice, SyncBridge, TableRow, TableView};
pub use config::Settings;
pub use reports::{ReportError, ReportKind};
pub use workspace::Workspace;

#[cfg(feature = "gui")]
pub mod gui;
