use std::path::PathBuf;

use tracing::warn;

use crate::{
    config::Settings,
    core::{
        loader::{self, ImportSummary, LoadError},
        store::{DepartmentStore, EmployeeStore},
    },
};

/// Both record stores plus the settings that say where they live on disk.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub settings: Settings,
    pub departments: DepartmentStore,
    pub employees: EmployeeStore,
    /// Set while the departments file exists but could not be read. Saving
    /// would replace rows that never made it into the store.
    unreadable_departments: Option<LoadError>,
}

/// What happened while loading one CSV file at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ImportSummary),
    Failed(LoadError),
}

#[derive(Debug)]
pub struct OpenReport {
    pub departments: LoadOutcome,
    pub employees: LoadOutcome,
}

impl OpenReport {
    /// Load failures, for showing to the user. Startup continues regardless.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &LoadError)> {
        [("departments", &self.departments), ("employees", &self.employees)]
            .into_iter()
            .filter_map(|(what, outcome)| match outcome {
                LoadOutcome::Failed(err) => Some((what, err)),
                LoadOutcome::Loaded(_) => None,
            })
    }
}

fn outcome(result: Result<Option<ImportSummary>, LoadError>) -> LoadOutcome {
    match result {
        Ok(summary) => LoadOutcome::Loaded(summary.unwrap_or_default()),
        Err(err) => LoadOutcome::Failed(err),
    }
}

impl Workspace {
    pub fn empty(settings: Settings) -> Self {
        Self {
            settings,
            departments: DepartmentStore::new(),
            employees: EmployeeStore::new(),
            unreadable_departments: None,
        }
    }

    /// Loads both CSV files. A missing or broken file leaves its store empty
    /// and is reported, it does not abort.
    pub fn open(settings: Settings) -> (Self, OpenReport) {
        let mut workspace = Self::empty(settings);
        let report = workspace.reload_if_empty();
        (workspace, report)
    }

    pub fn reload_if_empty(&mut self) -> OpenReport {
        let departments = loader::populate_if_empty(
            &mut self.departments,
            &self.settings.departments_path(),
        );
        // A missing file is fine to create; a broken one holds rows we never saw.
        match &departments {
            Ok(Some(_)) => self.unreadable_departments = None,
            Ok(None) | Err(LoadError::ResourceNotFound(_)) => {}
            Err(err) => self.unreadable_departments = Some(err.clone()),
        }
        let departments = outcome(departments);
        let employees = outcome(loader::populate_if_empty(
            &mut self.employees,
            &self.settings.employees_path(),
        ));
        let report = OpenReport {
            departments,
            employees,
        };
        for (what, err) in report.failures() {
            warn!(what, %err, "could not load records");
        }
        report
    }

    /// The departments file, when it failed to load and must not be
    /// overwritten.
    pub fn locked_departments_file(&self) -> Option<(PathBuf, &LoadError)> {
        self.unreadable_departments
            .as_ref()
            .map(|err| (self.settings.departments_path(), err))
    }

    pub fn save_departments(&self) -> anyhow::Result<()> {
        if let Some((path, err)) = self.locked_departments_file() {
            anyhow::bail!(
                "Refusing to overwrite {:?}: it could not be loaded ({err}). Fix or move the file first",
                path
            );
        }
        loader::save(&self.settings.departments_path(), self.departments.find_all())
    }

    /// Saves departments when autosave is on. Returns whether it wrote.
    pub fn autosave_departments(&self) -> anyhow::Result<bool> {
        if !self.settings.autosave {
            return Ok(false);
        }
        self.save_departments()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::store::Department;

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn missing_files_are_reported_not_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let (workspace, report) = Workspace::open(settings_in(dir.path()));

        assert!(workspace.departments.is_empty());
        let failures: Vec<_> = report.failures().map(|(what, _)| what).collect();
        assert_eq!(failures, vec!["departments", "employees"]);
    }

    #[test]
    fn autosave_writes_departments() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut workspace = Workspace::empty(settings_in(dir.path()));
        workspace
            .departments
            .add(Department::new(1000, "IT", 5, 10_000.0, 160.0))
            .unwrap();

        assert!(workspace.autosave_departments().unwrap());

        let written = fs::read_to_string(dir.path().join("departamentos.csv")).unwrap();
        assert_eq!(
            written,
            "id,nombre,empleados_necesarios,presupuesto,horas_disponibles\n1000,IT,5,10000,160\n"
        );
    }

    #[test]
    fn unreadable_departments_file_is_never_overwritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("departamentos.csv");
        let original = "id,nombre,empleados_necesarios,presupuesto,horas_disponibles\n\
                        1,IT,5,100,160\n\
                        3,Marketing,tres,100,160\n";
        fs::write(&path, original).unwrap();

        let (mut workspace, _) = Workspace::open(settings_in(dir.path()));
        assert!(workspace.locked_departments_file().is_some());
        workspace
            .departments
            .add(Department::new(5000, "Ventas", 3, 5000.0, 80.0))
            .unwrap();

        let err = workspace.autosave_departments().unwrap_err();
        assert!(err.to_string().contains("departamentos.csv"), "{err}");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn missing_departments_file_can_be_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let (mut workspace, _) = Workspace::open(settings_in(dir.path()));
        assert!(workspace.locked_departments_file().is_none());
        workspace
            .departments
            .add(Department::new(1000, "IT", 5, 10_000.0, 160.0))
            .unwrap();

        assert!(workspace.autosave_departments().unwrap());
        assert!(dir.path().join("departamentos.csv").exists());
    }

    #[test]
    fn autosave_off_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            autosave: false,
            ..settings_in(dir.path())
        };
        let workspace = Workspace::empty(settings);
        assert!(!workspace.autosave_departments().unwrap());
        assert!(!dir.path().join("departamentos.csv").exists());
    }
}
