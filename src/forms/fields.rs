//! Declarative field table shared by the registration forms and the edit modal.
//!
//! Each record kind lists its inputs once: name, label, input kind and the rule
//! enforced at submit time. Validation, coercion and rendering are all driven
//! from these tables.
//!
//! Rules are checked here instead of through `validator` derives: required
//! text is judged after trimming and emails use the forms' own loose pattern.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::record::RecordKind;
use crate::domain::types::is_valid_email;
use crate::forms::draft::FieldValue;

/// HTML control used for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Number,
    CustomerSelect,
    EstablishmentSelect,
}

impl InputKind {
    /// `type` attribute for `<input>` based controls.
    pub const fn html_type(self) -> &'static str {
        match self {
            InputKind::Text | InputKind::CustomerSelect | InputKind::EstablishmentSelect => {
                "text"
            }
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Number => "number",
        }
    }
}

/// Constraint checked when the form is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Text must contain a non-whitespace character.
    Required(&'static str),
    /// Text must be present and look like an email address.
    Email,
    /// Number must be strictly greater than zero.
    Positive(&'static str),
    /// A selection (id > 0) must have been made.
    Selected(&'static str),
}

impl Rule {
    /// Returns the error message for `value`, if it breaks the rule.
    pub fn check(self, value: &FieldValue) -> Option<&'static str> {
        match self {
            Rule::Required(message) => value.as_str().trim().is_empty().then_some(message),
            Rule::Email => {
                let email = value.as_str();
                if email.trim().is_empty() {
                    Some("Email is required")
                } else if !is_valid_email(email) {
                    Some("Invalid email format")
                } else {
                    None
                }
            }
            Rule::Positive(message) => {
                let number = value.as_number();
                (number.is_nan() || number <= 0.0).then_some(message)
            }
            Rule::Selected(message) => (value.as_id() <= 0).then_some(message),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field, identical to the JSON key.
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub placeholder: &'static str,
    pub rule: Rule,
}

const fn field(
    name: &'static str,
    label: &'static str,
    input: InputKind,
    placeholder: &'static str,
    rule: Rule,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        placeholder,
        rule,
    }
}

pub const CUSTOMER_FIELDS: [FieldSpec; 4] = [
    field(
        "name",
        "Full Name",
        InputKind::Text,
        "Enter customer name",
        Rule::Required("Name is required"),
    ),
    field(
        "email",
        "Email Address",
        InputKind::Email,
        "customer@example.com",
        Rule::Email,
    ),
    field(
        "phone",
        "Phone Number",
        InputKind::Tel,
        "(11) 99999-9999",
        Rule::Required("Phone is required"),
    ),
    field(
        "cpf",
        "CPF",
        InputKind::Text,
        "000.000.000-00",
        Rule::Required("CPF is required"),
    ),
];

pub const ESTABLISHMENT_FIELDS: [FieldSpec; 5] = [
    field(
        "name",
        "Establishment Name",
        InputKind::Text,
        "Enter establishment name",
        Rule::Required("Name is required"),
    ),
    field(
        "email",
        "Email Address",
        InputKind::Email,
        "business@example.com",
        Rule::Email,
    ),
    field(
        "phone",
        "Phone Number",
        InputKind::Tel,
        "(11) 99999-9999",
        Rule::Required("Phone is required"),
    ),
    field(
        "cnpj",
        "CNPJ",
        InputKind::Text,
        "00.000.000/0000-00",
        Rule::Required("CNPJ is required"),
    ),
    field(
        "valuePerPoint",
        "Value Per Point (R$)",
        InputKind::Number,
        "10.00",
        Rule::Positive("Value per point must be greater than 0"),
    ),
];

pub const PURCHASE_FIELDS: [FieldSpec; 3] = [
    field(
        "clientId",
        "Customer",
        InputKind::CustomerSelect,
        "Select a customer",
        Rule::Selected("Please select a customer"),
    ),
    field(
        "establishmentId",
        "Establishment",
        InputKind::EstablishmentSelect,
        "Select an establishment",
        Rule::Selected("Please select an establishment"),
    ),
    field(
        "amount",
        "Purchase Amount (R$)",
        InputKind::Number,
        "0.00",
        Rule::Positive("Purchase amount must be greater than 0"),
    ),
];

/// Field table for the given record kind.
pub fn field_specs(kind: RecordKind) -> &'static [FieldSpec] {
    match kind {
        RecordKind::Customer => &CUSTOMER_FIELDS,
        RecordKind::Establishment => &ESTABLISHMENT_FIELDS,
        RecordKind::Purchase => &PURCHASE_FIELDS,
    }
}

/// Looks up a field of `kind` by its wire name.
pub fn find_spec(kind: RecordKind, name: &str) -> Option<&'static FieldSpec> {
    field_specs(kind).iter().find(|spec| spec.name == name)
}

/// One `<option>` of a selection input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: i32,
    pub label: String,
}

/// Options offered by the purchase selection inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceLists {
    pub customers: Vec<Choice>,
    pub establishments: Vec<Choice>,
}

impl ChoiceLists {
    /// Builds options from loaded records, skipping ones without an id.
    pub fn from_collections(customers: &[Customer], establishments: &[Establishment]) -> Self {
        Self {
            customers: customers
                .iter()
                .filter_map(|c| {
                    c.id.map(|id| Choice {
                        value: id.get(),
                        label: c.option_label(),
                    })
                })
                .collect(),
            establishments: establishments
                .iter()
                .filter_map(|e| {
                    e.id.map(|id| Choice {
                        value: id.get(),
                        label: e.option_label(),
                    })
                })
                .collect(),
        }
    }
}

/// Render-ready description of one field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub html_type: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub error: Option<&'static str>,
    pub options: Vec<ChoiceView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

impl FieldView {
    pub(crate) fn build(
        spec: &FieldSpec,
        value: &FieldValue,
        error: Option<&'static str>,
        choices: &ChoiceLists,
    ) -> Self {
        let source: &[Choice] = match spec.input {
            InputKind::CustomerSelect => &choices.customers,
            InputKind::EstablishmentSelect => &choices.establishments,
            _ => &[],
        };
        let selected = value.as_id();
        let options = source
            .iter()
            .map(|choice| ChoiceView {
                value: choice.value,
                label: choice.label.clone(),
                selected: choice.value == selected,
            })
            .collect();

        Self {
            name: spec.name,
            label: spec.label,
            input: spec.input,
            html_type: spec.input.html_type(),
            placeholder: spec.placeholder,
            value: value.to_input_text(),
            error,
            options,
        }
    }
}
