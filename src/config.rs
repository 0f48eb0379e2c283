use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "gestor.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub departments_file: String,
    pub employees_file: String,
    pub reports_dir: PathBuf,
    /// Write the CSV files back after every successful change.
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            departments_file: "departamentos.csv".into(),
            employees_file: "empleados.csv".into(),
            reports_dir: PathBuf::from("./informes"),
            autosave: true,
        }
    }
}

impl Settings {
    pub fn departments_path(&self) -> PathBuf {
        self.data_dir.join(&self.departments_file)
    }

    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }
}

/// Defaults, then `gestor.toml` in the working directory if present, then
/// `GESTOR__*` environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = load_settings_from(Path::new(CONFIG_FILE_NAME))?;
    Ok(apply_env(settings, |key| std::env::var(key).ok()))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    if !path.is_file() {
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config file {:?}", path))
}

fn apply_env(mut settings: Settings, var: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(v) = var("GESTOR__DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = var("GESTOR__DEPARTMENTS_FILE") {
        settings.departments_file = v;
    }
    if let Some(v) = var("GESTOR__EMPLOYEES_FILE") {
        settings.employees_file = v;
    }
    if let Some(v) = var("GESTOR__REPORTS_DIR") {
        settings.reports_dir = PathBuf::from(v);
    }
    if let Some(v) = var("GESTOR__AUTOSAVE") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.autosave = true,
            "0" | "false" | "no" | "off" => settings.autosave = false,
            other => tracing::warn!(value = other, "ignoring unrecognized GESTOR__AUTOSAVE"),
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = load_settings_from(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.departments_path(),
            PathBuf::from("./data/departamentos.csv")
        );
    }

    #[test]
    fn file_overrides_only_given_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "data_dir = \"/srv/gestor\"\nautosave = false\n").unwrap();

        let settings = load_settings_from(&path).unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("/srv/gestor"));
        assert!(!settings.autosave);
        assert_eq!(settings.employees_file, "empleados.csv");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "autosave = \"quizas\"\n").unwrap();
        assert!(load_settings_from(&path).is_err());
    }

    #[test]
    fn env_wins_over_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GESTOR__REPORTS_DIR", "/tmp/informes"),
            ("GESTOR__AUTOSAVE", "off"),
            ("GESTOR__DEPARTMENTS_FILE", "deps.csv"),
        ]);
        let settings = apply_env(Settings::default(), |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.reports_dir, PathBuf::from("/tmp/informes"));
        assert!(!settings.autosave);
        assert_eq!(settings.departments_file, "deps.csv");
        assert_eq!(settings.data_dir, PathBuf::from("./data"));
    }
}
