use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, EstablishmentId, PurchaseId};

/// Transaction linking one customer and one establishment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PurchaseId>,
    pub client_id: CustomerId,
    pub establishment_id: EstablishmentId,
    /// Monetary amount; older API builds call it `purchaseValue`.
    #[serde(alias = "purchaseValue")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Points precomputed by the API, when it provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
}

impl Purchase {
    /// Calendar date of the purchase if the timestamp is in a known format.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.purchase_date.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(ts.date());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(ts.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Date formatted for display (`dd/mm/yyyy`), falling back to the raw value.
    pub fn display_date(&self) -> Option<String> {
        match self.date() {
            Some(date) => Some(date.format("%d/%m/%Y").to_string()),
            None => self.purchase_date.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}
