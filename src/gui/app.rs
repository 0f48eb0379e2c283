use iced::{Element, Task};
use rfd::MessageLevel;

use super::{
    AppState, Message,
    screens::{Screen, departments::DepartmentsScreen, reports::ReportsScreen},
    widgets::{self, Tab},
};
use crate::{config::Settings, workspace::Workspace};

pub struct GestorApp {
    state: AppState,
    tab: Tab,
    departments: DepartmentsScreen,
    reports: ReportsScreen,
}

impl GestorApp {
    /// Loads both CSV files and queues one dialog per file that failed.
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let (workspace, open_report) = Workspace::open(settings);
        let state = AppState::new(workspace);

        let notices: Vec<_> = open_report
            .failures()
            .map(|(what, err)| {
                let title = match what {
                    "departments" => "Error cargando departamentos",
                    _ => "Error cargando empleados",
                };
                widgets::notice(
                    MessageLevel::Warning,
                    title,
                    &err.to_string(),
                    Message::StartupNoticeClosed,
                )
            })
            .collect();

        let app = Self {
            departments: DepartmentsScreen::new(&state),
            reports: ReportsScreen::new(),
            tab: Tab::Departments,
            state,
        };
        (app, Task::batch(notices))
    }

    pub fn title(&self) -> String {
        "Gestión de Departamentos".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.tab = tab;
                Task::none()
            }
            Message::Departments(message) => self
                .departments
                .update(message, &mut self.state)
                .map(Message::Departments),
            Message::Reports(message) => self
                .reports
                .update(message, &mut self.state)
                .map(Message::Reports),
            Message::StartupNoticeClosed => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.tab {
            Tab::Departments => self
                .departments
                .view(&self.state)
                .map(Message::Departments),
            Tab::Reports => self.reports.view(&self.state).map(Message::Reports),
        };
        widgets::layout(self.tab, Message::TabSelected, content)
    }
}
