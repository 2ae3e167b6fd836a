//! Services backing the registration area.

use crate::domain::record::RecordKind;
use crate::dto::registration::{RegistrationPageData, RegistrationSuccessData};
use crate::forms::fields::ChoiceLists;
use crate::forms::registration::{RegistrationForm, SUCCESS_DISPLAY, SubmitStatus};
use crate::repository::{CustomerReader, EstablishmentReader, RecordWriter};
use crate::services::ServiceResult;
use crate::services::records::{choices_for, create_record};
use crate::shell::Shell;

/// Result of a registration attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The API accepted the record.
    Created(RegistrationSuccessData),
    /// Validation or the API rejected the draft; the form is shown again.
    Rejected(RegistrationPageData),
}

fn page_data(form: &RegistrationForm, choices: &ChoiceLists) -> RegistrationPageData {
    RegistrationPageData {
        kind: form.kind(),
        fields: form.view(choices),
        api_error: form.api_error().map(str::to_string),
    }
}

/// Loads data necessary to render an empty registration form.
pub async fn show_registration<R>(repo: &R, kind: RecordKind) -> RegistrationPageData
where
    R: CustomerReader + EstablishmentReader + ?Sized,
{
    let form = RegistrationForm::new(kind);
    let choices = choices_for(repo, kind).await;
    page_data(&form, &choices)
}

/// Applies the submitted fields, validates them and creates the record.
///
/// No request is issued when a field is invalid. A created record bumps the
/// shell's refresh counter so the visualization view reloads.
pub async fn submit_registration<R>(
    repo: &R,
    shell: &Shell,
    kind: RecordKind,
    fields: &[(String, String)],
) -> ServiceResult<SubmitOutcome>
where
    R: RecordWriter + CustomerReader + EstablishmentReader + ?Sized,
{
    let mut form = RegistrationForm::new(kind);
    for (name, value) in fields {
        form.set_field(name, value)?;
    }

    if let Some(record) = form.begin_submit() {
        let result = create_record(repo, &record).await.map_err(|err| {
            log::error!("Failed to register {kind}: {err}");
            err.user_message(kind)
        });
        form.finish_submit(result, || {
            let key = shell.notify_success();
            log::info!("Registered new {kind}, refresh key is now {key}");
        });
    }

    if form.status() == SubmitStatus::Succeeded {
        return Ok(SubmitOutcome::Created(RegistrationSuccessData {
            kind,
            title: form.success_title(),
            text: form.success_text(),
            display_ms: u64::try_from(SUCCESS_DISPLAY.as_millis()).unwrap_or(u64::MAX),
        }));
    }

    let choices = choices_for(repo, kind).await;
    Ok(SubmitOutcome::Rejected(page_data(&form, &choices)))
}
