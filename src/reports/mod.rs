//! Chart reports over department and employee snapshots.
//!
//! Datasets are built by pure functions so they can be checked without
//! drawing anything; [`render`] turns them into SVG files.

pub mod render;

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::core::store::{Department, Employee};

pub const DEFAULT_AGE_BINS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    EmployeesByDepartment,
    AgeHistogram,
    RequiredVsActual,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::EmployeesByDepartment,
        ReportKind::AgeHistogram,
        ReportKind::RequiredVsActual,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::EmployeesByDepartment => "empleados-por-departamento",
            ReportKind::AgeHistogram => "histograma-edades",
            ReportKind::RequiredVsActual => "necesarios-vs-reales",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::EmployeesByDepartment => "Distribución de empleados por departamento",
            ReportKind::AgeHistogram => "Distribución de edades",
            ReportKind::RequiredVsActual => {
                "Empleados necesarios vs empleados reales (por departamento)"
            }
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportKind::EmployeesByDepartment => "Empleados por departamento (gráfico circular)",
            ReportKind::AgeHistogram => "Distribución de edades (histograma)",
            ReportKind::RequiredVsActual => "Necesarios vs reales por departamento (comparativo)",
        };
        f.write_str(label)
    }
}

/// Reasons a report has nothing to show. Surfaced as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no {0} loaded")]
    NoData(&'static str),
    #[error("no valid ages to plot")]
    NoValidAges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentShare {
    pub department: String,
    pub employees: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffComparison {
    pub department: String,
    pub required: i64,
    pub actual: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Shares(Vec<DepartmentShare>),
    Ages(Vec<AgeBin>),
    Staffing(Vec<StaffComparison>),
}

fn count_by_department(employees: &[Employee]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for employee in employees {
        *counts.entry(employee.department.trim()).or_insert(0) += 1;
    }
    counts
}

/// Employee count per department, largest first, ties by name.
pub fn employees_by_department(
    employees: &[Employee],
) -> Result<Vec<DepartmentShare>, ReportError> {
    if employees.is_empty() {
        return Err(ReportError::NoData("employees"));
    }
    let mut shares: Vec<DepartmentShare> = count_by_department(employees)
        .into_iter()
        .map(|(department, employees)| DepartmentShare {
            department: department.to_string(),
            employees,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.employees
            .cmp(&a.employees)
            .then_with(|| a.department.cmp(&b.department))
    });
    Ok(shares)
}

/// Equal-width bins over the known (non-zero) ages. The last bin includes
/// its upper edge.
pub fn age_histogram(employees: &[Employee], bins: usize) -> Result<Vec<AgeBin>, ReportError> {
    if employees.is_empty() {
        return Err(ReportError::NoData("employees"));
    }
    let ages: Vec<f64> = employees
        .iter()
        .filter(|employee| employee.age > 0)
        .map(|employee| f64::from(employee.age))
        .collect();
    let (Some(min), Some(max)) = (
        ages.iter().copied().reduce(f64::min),
        ages.iter().copied().reduce(f64::max),
    ) else {
        return Err(ReportError::NoValidAges);
    };

    let bins = bins.max(1);
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;
    let mut histogram: Vec<AgeBin> = (0..bins)
        .map(|index| AgeBin {
            start: low + width * index as f64,
            end: low + width * (index + 1) as f64,
            count: 0,
        })
        .collect();
    for age in ages {
        let index = (((age - low) / width).floor() as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    Ok(histogram)
}

/// Required staff against actual headcount, in department store order.
pub fn required_vs_actual(
    departments: &[Department],
    employees: &[Employee],
) -> Result<Vec<StaffComparison>, ReportError> {
    if departments.is_empty() {
        return Err(ReportError::NoData("departments"));
    }
    if employees.is_empty() {
        return Err(ReportError::NoData("employees"));
    }
    let counts = count_by_department(employees);
    Ok(departments
        .iter()
        .map(|department| StaffComparison {
            department: department.name.clone(),
            required: department.required_staff,
            actual: counts.get(department.name.trim()).copied().unwrap_or(0),
        })
        .collect())
}

pub fn build(
    kind: ReportKind,
    departments: &[Department],
    employees: &[Employee],
) -> Result<ReportData, ReportError> {
    match kind {
        ReportKind::EmployeesByDepartment => {
            employees_by_department(employees).map(ReportData::Shares)
        }
        ReportKind::AgeHistogram => age_histogram(employees, DEFAULT_AGE_BINS).map(ReportData::Ages),
        ReportKind::RequiredVsActual => {
            required_vs_actual(departments, employees).map(ReportData::Staffing)
        }
    }
}

pub fn report_file_name(kind: ReportKind, at: OffsetDateTime) -> String {
    format!(
        "{}-{:04}{:02}{:02}-{:02}{:02}{:02}.svg",
        kind.slug(),
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Builds and draws one report into `reports_dir`, returning the file path.
///
/// A [`ReportError`] inside the returned error means there was nothing to
/// draw; callers downcast to tell that apart from I/O failures.
pub fn generate(
    kind: ReportKind,
    departments: &[Department],
    employees: &[Employee],
    reports_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let data = build(kind, departments, employees)?;
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("Failed to create reports directory {:?}", reports_dir))?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let path = reports_dir.join(report_file_name(kind, now));
    render::render(kind, &data, &path)
        .with_context(|| format!("Failed to render report {:?}", path))?;
    info!(report = kind.slug(), path = %path.display(), "report written");
    Ok(path)
}
