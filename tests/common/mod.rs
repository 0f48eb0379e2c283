mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from gestor_empleados for tests
pub use gestor_empleados::{
    Department, DepartmentStore, EditState, Employee, EmployeeStore, Notice, Rejection,
    SyncBridge, TableRow,
    core::loader::{ImportSummary, LoadError},
};
