//! DTOs used by the data visualization view.

use serde::{Deserialize, Serialize};

use crate::domain::record::RecordKind;
use crate::forms::fields::FieldView;

/// Collection shown by the visualization view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Customers,
    Establishments,
    Purchases,
}

impl Tab {
    pub const fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Customer => Tab::Customers,
            RecordKind::Establishment => Tab::Establishments,
            RecordKind::Purchase => Tab::Purchases,
        }
    }

    /// Message shown when the active tab has no rows.
    pub const fn empty_message(self, searching: bool) -> &'static str {
        match (self, searching) {
            (Tab::Customers, true) => "No customers found matching your search.",
            (Tab::Customers, false) => "No customers registered yet.",
            (Tab::Establishments, true) => "No establishments found matching your search.",
            (Tab::Establishments, false) => "No establishments registered yet.",
            (Tab::Purchases, true) => "No purchases found matching your search.",
            (Tab::Purchases, false) => "No purchases registered yet.",
        }
    }
}

/// Query parameters accepted by the visualization page.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<Tab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CustomerRow {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    /// Accumulated points rounded to an integer.
    pub points: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EstablishmentRow {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cnpj: String,
    /// `R$ <value>/point`.
    pub rate: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PurchaseRow {
    pub id: Option<i32>,
    pub customer_name: String,
    pub establishment_name: String,
    /// `R$ <amount>` with two decimals.
    pub amount: String,
    pub points: Option<String>,
    /// `dd/mm/yyyy` when the API supplied a purchase date.
    pub date: Option<String>,
}

/// Number of loaded records per tab, ignoring the search term.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct TabCounts {
    pub customers: usize,
    pub establishments: usize,
    pub purchases: usize,
}

/// Data required to render the visualization page.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub tab: Tab,
    pub search: String,
    pub counts: TabCounts,
    pub customers: Vec<CustomerRow>,
    pub establishments: Vec<EstablishmentRow>,
    pub purchases: Vec<PurchaseRow>,
    /// Set when the active tab has nothing to show.
    pub empty_message: Option<&'static str>,
}

/// Data displayed inside the edit modal.
#[derive(Debug, Serialize)]
pub struct EditModalData {
    pub kind: RecordKind,
    pub id: i32,
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    /// Banner shown when the update request failed.
    pub api_error: Option<String>,
}
