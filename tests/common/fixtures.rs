use std::path::PathBuf;

use gestor_empleados::{Department, DepartmentStore, Employee, config::Settings};
use tempfile::TempDir;

pub const DEPARTMENTS_HEADER: &str =
    "id,nombre,empleados_necesarios,presupuesto,horas_disponibles";
pub const EMPLOYEES_HEADER: &str = "id,nombre,apellidos,edad,departamento";

/// The department used by most scenarios: IT, id 1000.
pub fn it_department() -> Department {
    Department::new(1000, "IT", 5, 10_000.0, 160.0)
}

pub fn sales_department(id: i64) -> Department {
    Department::new(id, "Ventas", 3, 5_000.0, 80.0)
}

/// A store already holding the given departments, all named "Desarrollo".
pub fn store_with(ids: &[i64]) -> DepartmentStore {
    let mut store = DepartmentStore::new();
    for id in ids {
        store
            .add(Department::new(*id, "Desarrollo", 2, 1_000.0, 40.0))
            .expect("fixture department should be valid");
    }
    store
}

pub fn employee(id: i64, age: u32, department: &str) -> Employee {
    Employee::new(id, "Ana", "García", age, department)
}

/// Writes `contents` to `name` inside a fresh temp directory.
/// Returns the file path and the directory, which must be kept alive.
pub fn write_temp_csv(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp csv");
    (path, dir)
}

/// Settings rooted in a fresh temp directory.
pub fn temp_settings() -> (Settings, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let settings = Settings {
        data_dir: dir.path().join("data"),
        reports_dir: dir.path().join("informes"),
        ..Settings::default()
    };
    (settings, dir)
}
