//! Edit modal: a local draft of an existing record, saved as a whole.

use crate::domain::record::{Record, RecordKind};
use crate::forms::draft::FormDraft;
use crate::forms::fields::{ChoiceLists, FieldView};
use crate::forms::{FieldErrors, FormError};

#[derive(Clone, Debug)]
pub struct EditModal {
    original: Record,
    draft: FormDraft,
    errors: FieldErrors,
}

impl EditModal {
    /// Opens the modal on a copy of `record`; the caller's value is never touched.
    pub fn open(record: &Record) -> Self {
        Self {
            original: record.clone(),
            draft: FormDraft::from_record(record),
            errors: FieldErrors::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.original.kind()
    }

    pub fn title(&self) -> &'static str {
        self.kind().edit_title()
    }

    pub fn original(&self) -> &Record {
        &self.original
    }

    pub fn record_id(&self) -> Option<i32> {
        self.original.id()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let name = self.draft.set(name, raw)?;
        self.errors.remove(name);
        Ok(())
    }

    /// Validates the draft and passes the full updated record to `on_save`.
    ///
    /// Returns `None` without calling `on_save` when a field is invalid.
    pub fn save<F, T>(&mut self, on_save: F) -> Option<T>
    where
        F: FnOnce(Record) -> T,
    {
        match self.draft.to_record(Some(&self.original)) {
            Ok(record) => {
                self.errors.clear();
                Some(on_save(record))
            }
            Err(FormError::Validation(errors)) => {
                self.errors = errors;
                None
            }
            Err(_) => None,
        }
    }

    /// Closes the modal, discarding the draft.
    pub fn cancel(self) {}

    pub fn view(&self, choices: &ChoiceLists) -> Vec<FieldView> {
        self.draft.view(&self.errors, choices)
    }
}
