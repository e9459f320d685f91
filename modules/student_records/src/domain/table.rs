use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::contract::client::StudentStoreApi;
use crate::contract::error::{StoreError, StoreOperation};
use crate::contract::model::{NewStudent, Student, StudentId};
use crate::domain::edit::{Draft, EditState, Field};
use crate::domain::error::TableError;
use crate::domain::page::{PageSize, PageWindow};

/// Record table controller: the loaded collection, the page window and the
/// single edit slot, reconciled with the record store.
///
/// Local state only changes after the corresponding store call succeeds.
/// The collection is swapped wholesale on every commit, so a snapshot taken
/// through [`RecordTable::rows`] never changes underneath a reader.
pub struct RecordTable {
    store: Arc<dyn StudentStoreApi>,
    rows: Arc<Vec<Student>>,
    window: PageWindow,
    edit: EditState,
    failures: Vec<TableError>,
}

impl RecordTable {
    pub fn new(store: Arc<dyn StudentStoreApi>, page_size: PageSize) -> Self {
        Self {
            store,
            rows: Arc::new(Vec::new()),
            window: PageWindow::new(page_size),
            edit: EditState::Viewing,
            failures: Vec::new(),
        }
    }

    /// Snapshot of the committed collection.
    pub fn rows(&self) -> Arc<Vec<Student>> {
        Arc::clone(&self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// The rows the current page shows.
    pub fn visible_rows(&self) -> &[Student] {
        &self.rows[self.window.range(self.rows.len())]
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Every failure recorded since the table was created, oldest first.
    pub fn failures(&self) -> &[TableError] {
        &self.failures
    }

    pub fn last_failure(&self) -> Option<&TableError> {
        self.failures.last()
    }

    /// Fetch the full collection and show its first page.
    #[instrument(name = "student_records.table.load", skip(self))]
    pub async fn load(&mut self) -> Result<(), TableError> {
        let students = match self.store.list_students().await {
            Ok(students) => students,
            Err(e) => return Err(self.record_failure(e.into())),
        };

        info!(count = students.len(), "loaded students");
        self.rows = Arc::new(students);
        self.window.set_page(0, self.rows.len());
        self.edit = EditState::Viewing;
        Ok(())
    }

    /// Create a blank record, append it, open it for editing and jump to
    /// the page that shows it.
    #[instrument(name = "student_records.table.add", skip(self))]
    pub async fn add(&mut self) -> Result<StudentId, TableError> {
        let created = match self.store.create_student(NewStudent::default()).await {
            Ok(created) => created,
            Err(e) => return Err(self.record_failure(e.into())),
        };
        let Some(id) = created.id else {
            // HttpStudentStore already rejects this; fakes might not.
            let err = StoreError::remote(
                StoreOperation::Create,
                "created record carries no identity",
            );
            return Err(self.record_failure(err.into()));
        };

        let draft = Draft::capture(&created);
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.extend(self.rows.iter().cloned());
        rows.push(created);
        self.rows = Arc::new(rows);

        self.edit = EditState::Editing { id, draft };
        self.window.go_to_last(self.rows.len());
        info!(student_id = %id, page = self.window.page(), "added student");
        Ok(id)
    }

    /// Double-activation of a visible row: open it for editing, or close it
    /// (discarding the draft) if it is already open. Returns whether the row
    /// is in edit mode afterwards.
    pub fn toggle_edit(&mut self, id: StudentId) -> bool {
        if self.edit.is_editing(id) {
            debug!(student_id = %id, "leaving edit mode without saving");
            self.edit = EditState::Viewing;
            return false;
        }

        let Some(row) = self.visible_rows().iter().find(|r| r.id == Some(id)) else {
            debug!(student_id = %id, "toggle ignored: row not on the current page");
            return false;
        };

        let draft = Draft::capture(row);
        if let Some(previous) = self.edit.editing_id() {
            debug!(previous = %previous, "discarding unsaved draft");
        }
        self.edit = EditState::Editing { id, draft };
        true
    }

    /// Change one field of the draft. Ignored (returns `false`) while no row
    /// is in edit mode.
    pub fn change_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match &mut self.edit {
            EditState::Editing { draft, .. } => {
                draft.set(field, value.into());
                true
            }
            EditState::Viewing => false,
        }
    }

    /// Push the draft to the store and commit it. Without a row in edit mode
    /// this is a silent no-op.
    #[instrument(name = "student_records.table.save", skip(self))]
    pub async fn save(&mut self) -> Result<(), TableError> {
        let (id, draft) = match &self.edit {
            EditState::Editing { id, draft } => (*id, draft),
            EditState::Viewing => {
                debug!("save ignored: no row in edit mode");
                return Ok(());
            }
        };

        let updated = match draft.to_student(id) {
            Ok(student) => student,
            Err(e) => return Err(self.record_failure(e.into())),
        };

        if let Err(e) = self.store.update_student(id, updated.clone()).await {
            return Err(self.record_failure(e.into()));
        }

        self.rows = Arc::new(
            self.rows
                .iter()
                .map(|r| {
                    if r.id == Some(id) {
                        updated.clone()
                    } else {
                        r.clone()
                    }
                })
                .collect(),
        );
        self.edit = EditState::Viewing;
        info!(student_id = %id, "saved student");
        Ok(())
    }

    /// Delete a record and pull the page index back if the page emptied.
    #[instrument(name = "student_records.table.delete", skip(self), fields(student_id = %id))]
    pub async fn delete(&mut self, id: StudentId) -> Result<(), TableError> {
        if let Err(e) = self.store.delete_student(id).await {
            return Err(self.record_failure(e.into()));
        }

        self.rows = Arc::new(
            self.rows
                .iter()
                .filter(|r| r.id != Some(id))
                .cloned()
                .collect(),
        );
        if self.edit.is_editing(id) {
            self.edit = EditState::Viewing;
        }
        if self.window.clamp(self.rows.len()) {
            debug!(page = self.window.page(), "page index clamped after delete");
        }
        info!("deleted student");
        Ok(())
    }

    /// Show another page. Any open draft is discarded; nothing is refetched.
    pub fn change_page(&mut self, page: usize) {
        self.edit = EditState::Viewing;
        self.window.set_page(page, self.rows.len());
    }

    /// Change rows per page and return to the first page.
    pub fn change_page_size(&mut self, size: PageSize) {
        self.window.set_size(size);
    }

    fn record_failure(&mut self, err: TableError) -> TableError {
        error!(error = %err, "record store action failed");
        self.failures.push(err.clone());
        err
    }
}
