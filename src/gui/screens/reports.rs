use std::path::PathBuf;

use iced::{
    Element, Task,
    widget::{button, column, pick_list, text},
};
use rfd::MessageLevel;
use tracing::{error, warn};

use crate::{
    gui::{
        AppState,
        screens::Screen,
        widgets::{labeled, notice},
    },
    reports::{self, ReportError, ReportKind},
    workspace::Workspace,
};

/// Why a report produced no file. Kept as text so the message stays `Clone`.
#[derive(Debug, Clone)]
pub enum ReportFailure {
    /// Nothing to draw, e.g. no employees loaded.
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub enum ReportsMessage {
    KindSelected(ReportKind),
    Generate,
    Generated(Result<PathBuf, ReportFailure>),
    NoticeClosed,
}

#[derive(Debug)]
pub struct ReportsScreen {
    kind: ReportKind,
    generating: bool,
    last_written: Option<PathBuf>,
}

impl Default for ReportsScreen {
    fn default() -> Self {
        Self {
            kind: ReportKind::EmployeesByDepartment,
            generating: false,
            last_written: None,
        }
    }
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Draws off the UI thread from a copy of the stores, so edits made while
/// rendering do not leak into the report.
async fn generate(snapshot: Workspace, kind: ReportKind) -> Result<PathBuf, ReportFailure> {
    let joined = tokio::task::spawn_blocking(move || {
        reports::generate(
            kind,
            snapshot.departments.find_all(),
            snapshot.employees.find_all(),
            &snapshot.settings.reports_dir,
        )
    })
    .await;

    match joined {
        Ok(Ok(path)) => Ok(path),
        Ok(Err(err)) => match err.downcast_ref::<ReportError>() {
            Some(no_data) => Err(ReportFailure::Warning(no_data.to_string())),
            None => Err(ReportFailure::Error(format!("{err:#}"))),
        },
        Err(join_err) => Err(ReportFailure::Error(join_err.to_string())),
    }
}

impl Screen for ReportsScreen {
    type Message = ReportsMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Self::Message> {
        let generate = button(if self.generating {
            "Generando..."
        } else {
            "Generar informe"
        })
        .on_press_maybe((!self.generating).then_some(ReportsMessage::Generate));

        let status = match &self.last_written {
            Some(path) => format!("Último informe: {}", path.display()),
            None => format!(
                "Los informes se guardan en {}",
                state.workspace.settings.reports_dir.display()
            ),
        };

        column![
            labeled(
                "Tipo de informe:",
                pick_list(ReportKind::ALL, Some(self.kind), ReportsMessage::KindSelected),
            ),
            text(format!(
                "{} departamento(s), {} empleado(s) cargados",
                state.workspace.departments.len(),
                state.workspace.employees.len()
            )),
            generate,
            text(status),
        ]
        .spacing(15)
        .into()
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<Self::Message> {
        match message {
            ReportsMessage::KindSelected(kind) => {
                self.kind = kind;
                Task::none()
            }
            ReportsMessage::Generate => {
                self.generating = true;
                Task::perform(
                    generate(state.workspace.clone(), self.kind),
                    ReportsMessage::Generated,
                )
            }
            ReportsMessage::Generated(result) => {
                self.generating = false;
                match result {
                    Ok(path) => {
                        self.last_written = Some(path.clone());
                        notice(
                            MessageLevel::Info,
                            "Informe generado",
                            &format!("Guardado en {}", path.display()),
                            ReportsMessage::NoticeClosed,
                        )
                    }
                    Err(ReportFailure::Warning(reason)) => {
                        warn!(%reason, "report skipped");
                        notice(
                            MessageLevel::Warning,
                            "Sin datos",
                            &reason,
                            ReportsMessage::NoticeClosed,
                        )
                    }
                    Err(ReportFailure::Error(reason)) => {
                        error!(%reason, "report failed");
                        notice(
                            MessageLevel::Error,
                            "Error generando informe",
                            &reason,
                            ReportsMessage::NoticeClosed,
                        )
                    }
                }
            }
            ReportsMessage::NoticeClosed => Task::none(),
        }
    }
}
