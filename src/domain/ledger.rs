//! In-memory collections behind the data visualization view.
//!
//! The three collections are loaded independently from the API and joined
//! here by linear scans: customer and establishment names for purchase rows,
//! and the loyalty point totals per customer.

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;
use crate::domain::record::{Record, RecordKind};
use crate::domain::types::{CustomerId, EstablishmentId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub customers: Vec<Customer>,
    pub establishments: Vec<Establishment>,
    pub purchases: Vec<Purchase>,
}

/// Lower-cases a search term, treating blank input as "no filter".
fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

fn matches_any(term: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

impl Ledger {
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == Some(id))
    }

    pub fn establishment(&self, id: EstablishmentId) -> Option<&Establishment> {
        self.establishments.iter().find(|e| e.id == Some(id))
    }

    /// Customer name or the `Customer #<id>` placeholder.
    pub fn customer_name(&self, id: CustomerId) -> String {
        self.customer(id)
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("Customer #{id}"), str::to_string)
    }

    /// Establishment name or the `Establishment #<id>` placeholder.
    pub fn establishment_name(&self, id: EstablishmentId) -> String {
        self.establishment(id)
            .map(|e| e.name.as_str())
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("Establishment #{id}"), str::to_string)
    }

    /// Points earned by a single purchase: amount ÷ establishment rate.
    ///
    /// `None` when the establishment is not loaded or its rate is unusable.
    pub fn purchase_points(&self, purchase: &Purchase) -> Option<f64> {
        let rate = self.establishment(purchase.establishment_id)?.point_rate()?;
        Some(purchase.amount / rate)
    }

    /// Points shown on a purchase row, preferring the value sent by the API.
    pub fn displayed_points(&self, purchase: &Purchase) -> Option<f64> {
        purchase.points.or_else(|| self.purchase_points(purchase))
    }

    /// Total points of a customer across all of their purchases.
    pub fn customer_points(&self, id: CustomerId) -> f64 {
        self.purchases
            .iter()
            .filter(|p| p.client_id == id)
            .filter_map(|p| self.purchase_points(p))
            .sum()
    }

    pub fn search_customers(&self, term: &str) -> Vec<&Customer> {
        let Some(term) = normalize_term(term) else {
            return self.customers.iter().collect();
        };
        self.customers
            .iter()
            .filter(|c| {
                let fields = [
                    c.name.as_str(),
                    c.email.as_str(),
                    c.phone.as_str(),
                    c.cpf.as_str(),
                ];
                matches_any(&term, &fields)
            })
            .collect()
    }

    pub fn search_establishments(&self, term: &str) -> Vec<&Establishment> {
        let Some(term) = normalize_term(term) else {
            return self.establishments.iter().collect();
        };
        self.establishments
            .iter()
            .filter(|e| {
                let fields = [
                    e.name.as_str(),
                    e.email.as_str(),
                    e.phone.as_str(),
                    e.cnpj.as_str(),
                ];
                matches_any(&term, &fields)
            })
            .collect()
    }

    /// Purchases are matched against the resolved customer and establishment names.
    pub fn search_purchases(&self, term: &str) -> Vec<&Purchase> {
        let Some(term) = normalize_term(term) else {
            return self.purchases.iter().collect();
        };
        self.purchases
            .iter()
            .filter(|p| {
                let customer = self.customer_name(p.client_id);
                let establishment = self.establishment_name(p.establishment_id);
                matches_any(&term, &[customer.as_str(), establishment.as_str()])
            })
            .collect()
    }

    /// Owned copy of the record with the given kind and id.
    pub fn find(&self, kind: RecordKind, id: i32) -> Option<Record> {
        match kind {
            RecordKind::Customer => self
                .customers
                .iter()
                .find(|c| c.id.map(i32::from) == Some(id))
                .cloned()
                .map(Record::Customer),
            RecordKind::Establishment => self
                .establishments
                .iter()
                .find(|e| e.id.map(i32::from) == Some(id))
                .cloned()
                .map(Record::Establishment),
            RecordKind::Purchase => self
                .purchases
                .iter()
                .find(|p| p.id.map(i32::from) == Some(id))
                .cloned()
                .map(Record::Purchase),
        }
    }
}
