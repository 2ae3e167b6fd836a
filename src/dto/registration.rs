//! DTOs used by the registration area.

use serde::Serialize;

use crate::domain::record::RecordKind;
use crate::forms::fields::FieldView;

/// Data required to render one registration form.
#[derive(Debug, Serialize)]
pub struct RegistrationPageData {
    pub kind: RecordKind,
    pub fields: Vec<FieldView>,
    /// Banner describing why the last create request failed.
    pub api_error: Option<String>,
}

/// Confirmation shown after a record was created.
#[derive(Debug, Serialize)]
pub struct RegistrationSuccessData {
    pub kind: RecordKind,
    pub title: String,
    pub text: String,
    /// Delay before the page returns to an empty form.
    pub display_ms: u64,
}

/// One tab of the registration area.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct KindTab {
    pub kind: RecordKind,
    pub title: &'static str,
    pub active: bool,
}

/// Tabs of the registration area with `active` highlighted.
pub fn kind_tabs(active: RecordKind) -> Vec<KindTab> {
    RecordKind::ALL
        .into_iter()
        .map(|kind| KindTab {
            kind,
            title: match kind {
                RecordKind::Customer => "Client Registration",
                RecordKind::Establishment => "Establishment Registration",
                RecordKind::Purchase => "Purchase Registration",
            },
            active: kind == active,
        })
        .collect()
}
