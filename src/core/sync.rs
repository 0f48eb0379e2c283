//! Keeps a table view and the edit selection in step with a department store.

use thiserror::Error;
use tracing::debug;

use crate::core::store::{Department, DepartmentStore, Rejection};

pub const TABLE_HEADERS: [&str; 5] = [
    "ID",
    "Nombre",
    "Empleados necesarios",
    "Presupuesto",
    "Horas disponibles",
];

/// One rendered table row. Cells follow [`TABLE_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i64,
    pub cells: [String; 5],
}

impl From<&Department> for TableRow {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            cells: [
                department.id.to_string(),
                department.name.clone(),
                department.required_staff.to_string(),
                format!("{:.2}", department.budget),
                department.available_hours.to_string(),
            ],
        }
    }
}

/// A read-only grid the bridge rebuilds after every change.
pub trait TableView {
    fn clear(&mut self);
    fn push_row(&mut self, row: TableRow);
}

impl TableView for Vec<TableRow> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_row(&mut self, row: TableRow) {
        self.push(row);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Selected(i64),
}

/// Something the user has to be told about. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Notice {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("no row selected")]
    EmptySelection,
}

#[derive(Debug)]
pub struct SyncBridge<V: TableView> {
    view: V,
    selected_id: Option<i64>,
}

impl<V: TableView> SyncBridge<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            selected_id: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    pub fn state(&self) -> EditState {
        match self.selected_id {
            Some(id) => EditState::Selected(id),
            None => EditState::Idle,
        }
    }

    /// Clears the view and renders every record of `store` in order.
    pub fn refresh(&mut self, store: &DepartmentStore) {
        self.view.clear();
        for department in store.find_all() {
            self.view.push_row(TableRow::from(department));
        }
        debug!(rows = store.len(), "table refreshed");
    }

    /// Marks `id` as the record being edited and returns it for the form.
    /// Unknown ids leave the selection as it was.
    pub fn select<'s>(&mut self, store: &'s DepartmentStore, id: i64) -> Option<&'s Department> {
        let department = store.find(id)?;
        self.selected_id = Some(id);
        Some(department)
    }

    pub fn create(
        &mut self,
        store: &mut DepartmentStore,
        candidate: Department,
    ) -> Result<(), Notice> {
        store.add(candidate)?;
        self.refresh(store);
        Ok(())
    }

    /// Overwrites the selected record. On success the selection follows the
    /// record to its new id.
    pub fn update(
        &mut self,
        store: &mut DepartmentStore,
        candidate: Department,
    ) -> Result<i64, Notice> {
        let old_id = self.selected_id.ok_or(Notice::EmptySelection)?;
        match store.update(old_id, candidate) {
            Ok(new_id) => {
                self.selected_id = Some(new_id);
                self.refresh(store);
                Ok(new_id)
            }
            Err(Rejection::NotFound(id)) => {
                // The selected record is gone; nothing left to edit.
                self.selected_id = None;
                self.refresh(store);
                Err(Rejection::NotFound(id).into())
            }
            Err(rejection) => Err(rejection.into()),
        }
    }

    /// Deletes the row currently picked in the view, which may differ from
    /// the edit selection.
    pub fn delete(&mut self, store: &mut DepartmentStore, row_id: Option<i64>) -> Result<(), Notice> {
        let id = row_id.ok_or(Notice::EmptySelection)?;
        store.remove(id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        self.refresh(store);
        Ok(())
    }
}
