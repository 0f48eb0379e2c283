use std::path::PathBuf;

use iced::{
    Element, Length, Task,
    widget::{button, column, pick_list, row, text, text_input},
};
use rfd::{AsyncFileDialog, MessageLevel};
use tracing::error;

use crate::{
    core::{
        form::DepartmentForm,
        loader::{self, LoadError},
        store::{DEPARTMENT_NAMES, Department, Rejection, generate_unique_id},
        sync::{Notice, SyncBridge, TableRow},
    },
    gui::{
        AppState,
        screens::Screen,
        widgets::{labeled, notice, table},
    },
};

const ID_ATTEMPTS: usize = 64;

#[derive(Debug)]
pub struct DepartmentsScreen {
    form: DepartmentForm,
    bridge: SyncBridge<Vec<TableRow>>,
    /// Row currently highlighted in the table, the target of "delete".
    picked_row: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum DepartmentsMessage {
    IdChanged(String),
    GenerateId,
    NameSelected(&'static str),
    StaffChanged(String),
    BudgetChanged(String),
    HoursChanged(String),
    RowPicked(i64),
    Save,
    Update,
    Delete,
    ImportCsv,
    CsvPicked(Option<PathBuf>),
    NoticeClosed,
}

fn describe(rejected: &Notice) -> (&'static str, String) {
    match rejected {
        Notice::Rejected(Rejection::InvalidFields) => (
            "Datos inválidos",
            "Por favor, complete todos los campos correctamente.".into(),
        ),
        Notice::Rejected(Rejection::DuplicateId(id)) => (
            "ID duplicado",
            format!("El ID {id} ya existe. Genera otro o usa uno distinto."),
        ),
        Notice::Rejected(Rejection::NotFound(id)) => (
            "Sin registro",
            format!("El departamento {id} ya no existe."),
        ),
        Notice::EmptySelection => ("Selecciona", "Selecciona una fila primero.".into()),
    }
}

fn warn(rejected: Notice) -> Task<DepartmentsMessage> {
    let (title, description) = describe(&rejected);
    notice(
        MessageLevel::Warning,
        title,
        &description,
        DepartmentsMessage::NoticeClosed,
    )
}

fn load_error(err: &LoadError) -> Task<DepartmentsMessage> {
    let (title, description) = match err {
        LoadError::ResourceNotFound(path) => (
            "CSV no encontrado",
            format!("No se encontró el archivo {}", path.display()),
        ),
        LoadError::MalformedResource { .. } => {
            ("Error leyendo CSV", format!("No se pudo leer el CSV:\n{err}"))
        }
        LoadError::MissingColumns(_) => (
            "CSV inválido",
            format!(
                "El CSV no tiene las columnas necesarias ({err}).\n\
                 Debe tener: id,nombre,empleados_necesarios,presupuesto,horas_disponibles"
            ),
        ),
    };
    notice(
        MessageLevel::Error,
        title,
        &description,
        DepartmentsMessage::NoticeClosed,
    )
}

impl DepartmentsScreen {
    pub fn new(state: &AppState) -> Self {
        let mut bridge = SyncBridge::new(Vec::new());
        bridge.refresh(&state.workspace.departments);
        Self {
            form: DepartmentForm::default(),
            bridge,
            picked_row: None,
        }
    }

    /// Persists after a successful change; a failed write is reported but
    /// the in-memory change stands.
    fn after_change(state: &AppState) -> Task<DepartmentsMessage> {
        match state.workspace.autosave_departments() {
            Ok(_) => Task::none(),
            Err(err) => {
                error!(%err, "autosave failed");
                notice(
                    MessageLevel::Error,
                    "Error guardando CSV",
                    &format!("{err:#}"),
                    DepartmentsMessage::NoticeClosed,
                )
            }
        }
    }

    fn fill_form(&mut self, department: &Department) {
        // Names outside the pick list are kept; the list then shows no choice.
        self.form = DepartmentForm::from_department(department);
    }
}

impl Screen for DepartmentsScreen {
    type Message = DepartmentsMessage;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, Self::Message> {
        let selected_name = DEPARTMENT_NAMES
            .iter()
            .copied()
            .find(|name| *name == self.form.name);

        let form = column![
            labeled(
                "ID:",
                row![
                    text_input("1234", &self.form.id).on_input(DepartmentsMessage::IdChanged),
                    button("Generar ID").on_press(DepartmentsMessage::GenerateId),
                ]
                .spacing(10),
            ),
            labeled(
                "Departamento:",
                pick_list(DEPARTMENT_NAMES, selected_name, DepartmentsMessage::NameSelected),
            ),
            labeled(
                "Empleados necesarios:",
                text_input("0", &self.form.required_staff)
                    .on_input(DepartmentsMessage::StaffChanged),
            ),
            labeled(
                "Presupuesto (€):",
                text_input("0,00", &self.form.budget).on_input(DepartmentsMessage::BudgetChanged),
            ),
            labeled(
                "Horas disponibles:",
                text_input("0", &self.form.available_hours)
                    .on_input(DepartmentsMessage::HoursChanged),
            ),
            row![
                button("Guardar Departamento").on_press(DepartmentsMessage::Save),
                button("Actualizar Departamento").on_press(DepartmentsMessage::Update),
                button("Eliminar Departamento").on_press(DepartmentsMessage::Delete),
            ]
            .spacing(10),
            button("Importar CSV").on_press(DepartmentsMessage::ImportCsv),
        ]
        .spacing(15)
        .width(Length::FillPortion(2));

        row![
            form,
            column![
                text(match self.bridge.selected_id() {
                    Some(id) => format!("Editando departamento {id}"),
                    None => "Ningún departamento seleccionado".to_string(),
                }),
                table(self.bridge.view(), self.picked_row, DepartmentsMessage::RowPicked),
            ]
            .spacing(10)
            .width(Length::FillPortion(3)),
        ]
        .spacing(20)
        .into()
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<Self::Message> {
        let departments = &mut state.workspace.departments;
        match message {
            DepartmentsMessage::IdChanged(value) => {
                self.form.id = value;
                Task::none()
            }
            DepartmentsMessage::GenerateId => {
                let id = departments
                    .generate_free_id(ID_ATTEMPTS)
                    .unwrap_or_else(generate_unique_id);
                self.form.id = id.to_string();
                Task::none()
            }
            DepartmentsMessage::NameSelected(name) => {
                self.form.name = name.to_string();
                Task::none()
            }
            DepartmentsMessage::StaffChanged(value) => {
                self.form.required_staff = value;
                Task::none()
            }
            DepartmentsMessage::BudgetChanged(value) => {
                self.form.budget = value;
                Task::none()
            }
            DepartmentsMessage::HoursChanged(value) => {
                self.form.available_hours = value;
                Task::none()
            }
            DepartmentsMessage::RowPicked(id) => {
                self.picked_row = Some(id);
                if let Some(department) = self.bridge.select(departments, id).cloned() {
                    self.fill_form(&department);
                }
                Task::none()
            }
            DepartmentsMessage::Save => {
                let result = self
                    .form
                    .to_candidate()
                    .map_err(Notice::from)
                    .and_then(|candidate| self.bridge.create(departments, candidate));
                match result {
                    Ok(()) => Self::after_change(state),
                    Err(rejected) => warn(rejected),
                }
            }
            DepartmentsMessage::Update => {
                if self.bridge.selected_id().is_none() {
                    return warn(Notice::EmptySelection);
                }
                let result = self
                    .form
                    .to_candidate()
                    .map_err(Notice::from)
                    .and_then(|candidate| self.bridge.update(departments, candidate));
                match result {
                    Ok(new_id) => {
                        self.form.id = new_id.to_string();
                        self.picked_row = Some(new_id);
                        Self::after_change(state)
                    }
                    Err(rejected) => warn(rejected),
                }
            }
            DepartmentsMessage::Delete => {
                match self.bridge.delete(departments, self.picked_row) {
                    Ok(()) => {
                        self.picked_row = None;
                        Self::after_change(state)
                    }
                    Err(rejected) => warn(rejected),
                }
            }
            DepartmentsMessage::ImportCsv => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Importar departamentos")
                    .add_filter("CSV", &["csv"])
                    .pick_file(),
                |handle| DepartmentsMessage::CsvPicked(handle.map(|h| h.path().to_path_buf())),
            ),
            DepartmentsMessage::CsvPicked(None) => Task::none(),
            DepartmentsMessage::CsvPicked(Some(path)) => {
                match loader::load::<Department>(&path) {
                    Ok(records) => {
                        let summary = loader::import_into(departments, records);
                        self.bridge.refresh(departments);
                        let saved = Self::after_change(state);
                        saved.chain(notice(
                            MessageLevel::Info,
                            "Importación completada",
                            &format!(
                                "Importados: {}\nDescartados (inválidos o duplicados): {}",
                                summary.imported, summary.skipped
                            ),
                            DepartmentsMessage::NoticeClosed,
                        ))
                    }
                    Err(err) => load_error(&err),
                }
            }
            DepartmentsMessage::NoticeClosed => Task::none(),
        }
    }
}
