//! State machine of a registration form (customer, establishment or purchase).

use std::time::Duration;

use serde::Serialize;

use crate::domain::record::{Record, RecordKind};
use crate::forms::draft::FormDraft;
use crate::forms::fields::{ChoiceLists, FieldView};
use crate::forms::{FieldErrors, FormError};

/// How long the confirmation stays visible before the form comes back empty.
pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Succeeded,
}

/// Draft, field errors and API banner of one registration form.
#[derive(Clone, Debug)]
pub struct RegistrationForm {
    draft: FormDraft,
    errors: FieldErrors,
    api_error: Option<String>,
    status: SubmitStatus,
}

impl RegistrationForm {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            draft: FormDraft::empty(kind),
            errors: FieldErrors::new(),
            api_error: None,
            status: SubmitStatus::Editing,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.draft.kind()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Updates one field. An error previously reported for it is cleared.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let name = self.draft.set(name, raw)?;
        self.errors.remove(name);
        Ok(())
    }

    /// Starts a submit attempt.
    ///
    /// Clears the previous API banner and validates the draft. Returns the
    /// record to create, or `None` when a field is invalid (no request must be
    /// issued then).
    pub fn begin_submit(&mut self) -> Option<Record> {
        self.api_error = None;
        match self.draft.to_record(None) {
            Ok(record) => {
                self.errors.clear();
                self.status = SubmitStatus::Submitting;
                Some(record)
            }
            Err(FormError::Validation(errors)) => {
                self.errors = errors;
                None
            }
            Err(err) => {
                self.api_error = Some(err.to_string());
                None
            }
        }
    }

    /// Records the result of the create request.
    ///
    /// Success resets the draft to empty defaults, enters the confirmation
    /// state (shown for [`SUCCESS_DISPLAY`]) and notifies the parent through
    /// `on_success`. Failure keeps the draft and shows `message` in the banner.
    pub fn finish_submit<F: FnOnce()>(&mut self, outcome: Result<(), String>, on_success: F) {
        match outcome {
            Ok(()) => {
                self.draft = FormDraft::empty(self.kind());
                self.errors.clear();
                self.status = SubmitStatus::Succeeded;
                on_success();
            }
            Err(message) => {
                self.api_error = Some(message);
                self.status = SubmitStatus::Editing;
            }
        }
    }

    pub fn success_title(&self) -> String {
        format!("{} Registered!", self.kind().title())
    }

    pub fn success_text(&self) -> String {
        format!(
            "The {} has been successfully added to the system.",
            self.kind().as_str()
        )
    }

    pub fn view(&self, choices: &ChoiceLists) -> Vec<FieldView> {
        self.draft.view(&self.errors, choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Customer;

    fn filled_customer_form() -> RegistrationForm {
        let mut form = RegistrationForm::new(RecordKind::Customer);
        form.set_field("name", "Ana Souza").unwrap();
        form.set_field("email", "ana@example.com").unwrap();
        form.set_field("phone", "(11) 98888-7777").unwrap();
        form.set_field("cpf", "123.456.789-00").unwrap();
        form
    }

    #[test]
    fn valid_draft_yields_the_record_to_create() {
        let mut form = filled_customer_form();

        let record = form.begin_submit();

        assert_eq!(
            record,
            Some(Record::Customer(Customer {
                id: None,
                name: "Ana Souza".into(),
                email: "ana@example.com".into(),
                phone: "(11) 98888-7777".into(),
                cpf: "123.456.789-00".into(),
            }))
        );
        assert_eq!(form.status(), SubmitStatus::Submitting);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn malformed_email_blocks_submission() {
        let mut form = filled_customer_form();
        form.set_field("email", "ana-at-example.com").unwrap();
        form.set_field("phone", "").unwrap();

        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.status(), SubmitStatus::Editing);
        assert_eq!(form.errors().get("email"), Some(&"Invalid email format"));
        assert_eq!(form.errors().get("phone"), Some(&"Phone is required"));

        form.set_field("email", "ana@example.com").unwrap();
        assert_eq!(form.errors().get("email"), None);
        assert_eq!(form.errors().get("phone"), Some(&"Phone is required"));
    }

    #[test]
    fn editing_a_valid_field_leaves_other_errors() {
        let mut form = RegistrationForm::new(RecordKind::Purchase);
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.errors().len(), 3);

        form.set_field("amount", "abc").unwrap();

        assert_eq!(form.errors().len(), 2);
        assert!(!form.errors().contains_key("amount"));
    }

    #[test]
    fn success_resets_the_draft_and_notifies() {
        let mut form = filled_customer_form();
        form.begin_submit().unwrap();

        let mut calls = 0;
        form.finish_submit(Ok(()), || calls += 1);

        assert_eq!(calls, 1);
        assert_eq!(form.status(), SubmitStatus::Succeeded);
        assert_eq!(form.draft(), &FormDraft::empty(RecordKind::Customer));
        assert_eq!(form.success_title(), "Customer Registered!");
        assert_eq!(
            form.success_text(),
            "The customer has been successfully added to the system."
        );
    }

    #[test]
    fn failure_keeps_the_draft_and_next_attempt_clears_banner() {
        let mut form = filled_customer_form();
        let before = form.draft().clone();
        form.begin_submit().unwrap();

        let mut notified = false;
        form.finish_submit(Err("CPF already registered".into()), || notified = true);

        assert!(!notified);

        assert_eq!(form.api_error(), Some("CPF already registered"));
        assert_eq!(form.draft(), &before);
        assert_eq!(form.status(), SubmitStatus::Editing);

        assert!(form.begin_submit().is_some());
        assert_eq!(form.api_error(), None);
    }
}
