use crate::gui::{
    screens::{departments::DepartmentsMessage, reports::ReportsMessage},
    widgets::Tab,
};

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    Departments(DepartmentsMessage),
    Reports(ReportsMessage),
    StartupNoticeClosed,
}
