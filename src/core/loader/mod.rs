//! Bulk import of records from CSV files, and saving them back.

mod csv;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::{
    numbers::{parse_decimal, parse_int},
    store::{Department, Employee, Record, Store},
};

pub use csv::{CsvLine, escape_field, join_row, split_records};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("resource not found: {0}")]
    ResourceNotFound(PathBuf),
    #[error("malformed resource at line {line}: {reason}")]
    MalformedResource { line: usize, reason: String },
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A record kind with a fixed set of required CSV columns.
pub trait CsvRecord: Record + Sized {
    /// Required columns, lowercase, in the order [`CsvRecord::to_row`] writes them.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> Result<Self, String>;
    fn to_row(&self) -> Vec<String>;
}

/// The required cells of one data row, in [`CsvRecord::COLUMNS`] order.
#[derive(Debug)]
pub struct Row<'a> {
    columns: &'static [&'static str],
    values: Vec<&'a str>,
}

impl<'a> Row<'a> {
    pub fn text(&self, index: usize) -> &'a str {
        self.values[index].trim()
    }

    pub fn int(&self, index: usize) -> Result<i64, String> {
        parse_int(self.values[index])
            .ok_or_else(|| self.bad_value(index, "an integer"))
    }

    pub fn decimal(&self, index: usize) -> Result<f64, String> {
        parse_decimal(self.values[index])
            .ok_or_else(|| self.bad_value(index, "a number"))
    }

    fn bad_value(&self, index: usize, expected: &str) -> String {
        format!(
            "column '{}' expected {expected}, got '{}'",
            self.columns[index],
            self.values[index].trim()
        )
    }
}

impl CsvRecord for Department {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "nombre",
        "empleados_necesarios",
        "presupuesto",
        "horas_disponibles",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Department {
            id: row.int(0)?,
            name: row.text(1).to_string(),
            required_staff: row.int(2)?,
            budget: row.decimal(3)?,
            available_hours: row.decimal(4)?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.required_staff.to_string(),
            self.budget.to_string(),
            self.available_hours.to_string(),
        ]
    }
}

impl CsvRecord for Employee {
    const COLUMNS: &'static [&'static str] =
        &["id", "nombre", "apellidos", "edad", "departamento"];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        // Ages that are not plain positive numbers count as unknown.
        let age = row
            .int(3)
            .ok()
            .and_then(|age| u32::try_from(age).ok())
            .unwrap_or(0);
        Ok(Employee {
            id: row.int(0)?,
            name: row.text(1).to_string(),
            surname: row.text(2).to_string(),
            age,
            department: row.text(4).to_string(),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.surname.clone(),
            self.age.to_string(),
            self.department.clone(),
        ]
    }
}

/// Parses CSV text into records. Nothing is returned unless every row parses.
pub fn parse<R: CsvRecord>(input: &str) -> Result<Vec<R>, LoadError> {
    let mut lines = split_records(input)
        .map_err(|(line, reason)| LoadError::MalformedResource { line, reason })?
        .into_iter();

    let Some(header) = lines.next() else {
        return Err(LoadError::MalformedResource {
            line: 1,
            reason: "missing header row".to_string(),
        });
    };
    let positions: HashMap<String, usize> = header
        .fields
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_lowercase(), index))
        .collect();

    let missing: Vec<String> = R::COLUMNS
        .iter()
        .filter(|column| !positions.contains_key(**column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }
    let indices: Vec<usize> = R::COLUMNS.iter().map(|column| positions[*column]).collect();

    lines
        .map(|record| {
            if record.fields.len() != header.fields.len() {
                return Err(LoadError::MalformedResource {
                    line: record.line,
                    reason: format!(
                        "expected {} fields, found {}",
                        header.fields.len(),
                        record.fields.len()
                    ),
                });
            }
            let row = Row {
                columns: R::COLUMNS,
                values: indices.iter().map(|index| record.fields[*index].as_str()).collect(),
            };
            R::from_row(&row).map_err(|reason| LoadError::MalformedResource {
                line: record.line,
                reason,
            })
        })
        .collect()
}

pub fn load<R: CsvRecord>(path: &Path) -> Result<Vec<R>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::ResourceNotFound(path.to_path_buf()));
    }
    let input = fs::read_to_string(path).map_err(|err| LoadError::MalformedResource {
        line: 0,
        reason: err.to_string(),
    })?;
    parse(&input)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Adds every record through [`Store::add`], skipping the ones it rejects.
pub fn import_into<R: Record>(store: &mut Store<R>, records: Vec<R>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for record in records {
        let id = record.id();
        match store.add(record) {
            Ok(()) => summary.imported += 1,
            Err(rejection) => {
                warn!(kind = R::KIND, id, %rejection, "skipping imported row");
                summary.skipped += 1;
            }
        }
    }
    summary
}

/// Startup load: fills `store` from `path` only when the store is empty.
/// Returns `Ok(None)` when the store already had records.
pub fn populate_if_empty<R: CsvRecord>(
    store: &mut Store<R>,
    path: &Path,
) -> Result<Option<ImportSummary>, LoadError> {
    if !store.is_empty() {
        return Ok(None);
    }
    let records = load::<R>(path)?;
    let summary = import_into(store, records);
    info!(
        kind = R::KIND,
        path = %path.display(),
        imported = summary.imported,
        skipped = summary.skipped,
        "loaded records"
    );
    Ok(Some(summary))
}

pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let mut out = join_row(R::COLUMNS);
    out.push('\n');
    for record in records {
        out.push_str(&join_row(record.to_row().as_slice()));
        out.push('\n');
    }
    out
}

pub fn save<R: CsvRecord>(path: &Path, records: &[R]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, to_csv(records))
        .with_context(|| format!("Failed to write {:?}", path))?;
    info!(kind = R::KIND, path = %path.display(), rows = records.len(), "saved records");
    Ok(())
}
