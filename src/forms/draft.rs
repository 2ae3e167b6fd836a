//! Typed draft of a single record being edited in a form.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;
use crate::domain::record::{Record, RecordKind};
use crate::domain::types::{CustomerId, EstablishmentId};
use crate::forms::fields::{ChoiceLists, FieldSpec, FieldView, InputKind, field_specs, find_spec};
use crate::forms::{FieldErrors, FormError};

/// Current value of one input after coercion.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Id(i32),
}

impl FieldValue {
    /// Default value of an untouched input.
    pub fn empty(input: InputKind) -> Self {
        match input {
            InputKind::Number => FieldValue::Number(0.0),
            InputKind::CustomerSelect | InputKind::EstablishmentSelect => FieldValue::Id(0),
            InputKind::Text | InputKind::Email | InputKind::Tel => FieldValue::Text(String::new()),
        }
    }

    /// Converts raw input text; numeric inputs fall back to 0 when unparsable.
    pub fn coerce(input: InputKind, raw: &str) -> Self {
        match input {
            InputKind::Number => FieldValue::Number(
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .unwrap_or(0.0),
            ),
            InputKind::CustomerSelect | InputKind::EstablishmentSelect => {
                FieldValue::Id(raw.trim().parse::<i32>().unwrap_or(0))
            }
            InputKind::Text | InputKind::Email | InputKind::Tel => {
                FieldValue::Text(raw.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Id(id) => f64::from(*id),
            FieldValue::Text(_) => 0.0,
        }
    }

    pub fn as_id(&self) -> i32 {
        match self {
            FieldValue::Id(id) => *id,
            _ => 0,
        }
    }

    /// Text placed back into the `value` attribute; zero numbers render empty.
    pub fn to_input_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) if *n == 0.0 => String::new(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Id(id) => id.to_string(),
        }
    }
}

/// Field values of one record kind, ordered as in the kind's field table.
#[derive(Clone, Debug, PartialEq)]
pub struct FormDraft {
    kind: RecordKind,
    values: Vec<(&'static FieldSpec, FieldValue)>,
}

impl FormDraft {
    /// Draft with every field at its empty default.
    pub fn empty(kind: RecordKind) -> Self {
        let values = field_specs(kind)
            .iter()
            .map(|spec| (spec, FieldValue::empty(spec.input)))
            .collect();
        Self { kind, values }
    }

    /// Draft pre-populated from an existing record.
    pub fn from_record(record: &Record) -> Self {
        let mut draft = Self::empty(record.kind());
        match record {
            Record::Customer(c) => {
                draft.put("name", FieldValue::Text(c.name.clone()));
                draft.put("email", FieldValue::Text(c.email.clone()));
                draft.put("phone", FieldValue::Text(c.phone.clone()));
                draft.put("cpf", FieldValue::Text(c.cpf.clone()));
            }
            Record::Establishment(e) => {
                draft.put("name", FieldValue::Text(e.name.clone()));
                draft.put("email", FieldValue::Text(e.email.clone()));
                draft.put("phone", FieldValue::Text(e.phone.clone()));
                draft.put("cnpj", FieldValue::Text(e.cnpj.clone()));
                draft.put("valuePerPoint", FieldValue::Number(e.value_per_point));
            }
            Record::Purchase(p) => {
                draft.put("clientId", FieldValue::Id(p.client_id.get()));
                draft.put("establishmentId", FieldValue::Id(p.establishment_id.get()));
                draft.put("amount", FieldValue::Number(p.amount));
            }
        }
        draft
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, value)| value)
    }

    fn put(&mut self, name: &str, value: FieldValue) {
        if let Some(slot) = self.values.iter_mut().find(|(spec, _)| spec.name == name) {
            slot.1 = value;
        }
    }

    /// Applies raw input text to a field, returning the field's canonical name.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<&'static str, FormError> {
        let spec = find_spec(self.kind, name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.put(spec.name, FieldValue::coerce(spec.input, raw));
        Ok(spec.name)
    }

    /// Checks every field against its rule.
    pub fn validate(&self) -> FieldErrors {
        self.values
            .iter()
            .filter_map(|(spec, value)| spec.rule.check(value).map(|msg| (spec.name, msg)))
            .collect()
    }

    fn text(&self, name: &str) -> String {
        self.get(name)
            .map(|v| v.as_str().to_string())
            .unwrap_or_default()
    }

    fn number(&self, name: &str) -> f64 {
        self.get(name).map_or(0.0, FieldValue::as_number)
    }

    fn id(&self, name: &str) -> i32 {
        self.get(name).map_or(0, FieldValue::as_id)
    }

    /// Validates the draft and builds the record it describes.
    ///
    /// Attributes outside the field table (`id`, `purchaseDate`, `points`)
    /// are taken from `base` when it is a record of the same kind.
    pub fn to_record(&self, base: Option<&Record>) -> Result<Record, FormError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }

        let record = match self.kind {
            RecordKind::Customer => {
                let id = match base {
                    Some(Record::Customer(c)) => c.id,
                    _ => None,
                };
                Record::Customer(Customer {
                    id,
                    name: self.text("name"),
                    email: self.text("email"),
                    phone: self.text("phone"),
                    cpf: self.text("cpf"),
                })
            }
            RecordKind::Establishment => {
                let id = match base {
                    Some(Record::Establishment(e)) => e.id,
                    _ => None,
                };
                Record::Establishment(Establishment {
                    id,
                    name: self.text("name"),
                    email: self.text("email"),
                    phone: self.text("phone"),
                    cnpj: self.text("cnpj"),
                    value_per_point: self.number("valuePerPoint"),
                })
            }
            RecordKind::Purchase => {
                let (id, purchase_date, points) = match base {
                    Some(Record::Purchase(p)) => (p.id, p.purchase_date.clone(), p.points),
                    _ => (None, None, None),
                };
                Record::Purchase(Purchase {
                    id,
                    client_id: CustomerId::new(self.id("clientId"))?,
                    establishment_id: EstablishmentId::new(self.id("establishmentId"))?,
                    amount: self.number("amount"),
                    purchase_date,
                    points,
                })
            }
        };

        Ok(record)
    }

    /// Render-ready fields with their current values and errors.
    pub fn view(&self, errors: &FieldErrors, choices: &ChoiceLists) -> Vec<FieldView> {
        self.values
            .iter()
            .map(|(spec, value)| {
                let error = errors.get(spec.name).copied();
                FieldView::build(spec, value, error, choices)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PurchaseId;

    #[test]
    fn numeric_inputs_fall_back_to_zero() {
        assert_eq!(
            FieldValue::coerce(InputKind::Number, "12.5"),
            FieldValue::Number(12.5)
        );
        assert_eq!(
            FieldValue::coerce(InputKind::Number, "abc"),
            FieldValue::Number(0.0)
        );
        assert_eq!(
            FieldValue::coerce(InputKind::Number, "inf"),
            FieldValue::Number(0.0)
        );
        assert_eq!(
            FieldValue::coerce(InputKind::CustomerSelect, "7"),
            FieldValue::Id(7)
        );
        assert_eq!(
            FieldValue::coerce(InputKind::EstablishmentSelect, ""),
            FieldValue::Id(0)
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut draft = FormDraft::empty(RecordKind::Customer);
        assert_eq!(
            draft.set("cnpj", "123"),
            Err(FormError::UnknownField("cnpj".to_string()))
        );
    }

    #[test]
    fn empty_draft_reports_every_rule() {
        let errors = FormDraft::empty(RecordKind::Establishment).validate();
        assert_eq!(errors.get("name"), Some(&"Name is required"));
        assert_eq!(errors.get("email"), Some(&"Email is required"));
        assert_eq!(errors.get("phone"), Some(&"Phone is required"));
        assert_eq!(errors.get("cnpj"), Some(&"CNPJ is required"));
        assert_eq!(
            errors.get("valuePerPoint"),
            Some(&"Value per point must be greater than 0")
        );
    }

    #[test]
    fn record_round_trips_through_draft() {
        let purchase = Record::Purchase(Purchase {
            id: PurchaseId::new(5).ok(),
            client_id: CustomerId::new(2).unwrap(),
            establishment_id: EstablishmentId::new(3).unwrap(),
            amount: 45.9,
            purchase_date: Some("2024-01-02T10:00:00Z".into()),
            points: Some(4.59),
        });

        let draft = FormDraft::from_record(&purchase);

        assert_eq!(draft.to_record(Some(&purchase)), Ok(purchase));
    }

    #[test]
    fn new_purchase_has_no_server_assigned_fields() {
        let mut draft = FormDraft::empty(RecordKind::Purchase);
        draft.set("clientId", "1").unwrap();
        draft.set("establishmentId", "2").unwrap();
        draft.set("amount", "100").unwrap();

        let Record::Purchase(p) = draft.to_record(None).unwrap() else {
            panic!("expected a purchase");
        };
        assert_eq!(p.id, None);
        assert_eq!(p.purchase_date, None);
        assert_eq!(p.amount, 100.0);
    }

    #[test]
    fn view_marks_selected_choice_and_errors() {
        let mut draft = FormDraft::empty(RecordKind::Purchase);
        draft.set("clientId", "2").unwrap();
        let choices = ChoiceLists {
            customers: vec![
                crate::forms::fields::Choice {
                    value: 1,
                    label: "Ana - ana@example.com".into(),
                },
                crate::forms::fields::Choice {
                    value: 2,
                    label: "Bruno - bruno@example.com".into(),
                },
            ],
            establishments: Vec::new(),
        };
        let errors = draft.validate();

        let view = draft.view(&errors, &choices);

        assert_eq!(view[0].name, "clientId");
        assert_eq!(view[0].error, None);
        assert!(!view[0].options[0].selected);
        assert!(view[0].options[1].selected);
        assert_eq!(view[1].error, Some("Please select an establishment"));
        assert_eq!(view[2].value, "");
    }
}
