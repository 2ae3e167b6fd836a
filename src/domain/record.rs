//! Tagged union over the three record kinds handled by the front end.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;

/// Discriminant of [`Record`], also used as the `{kind}` route segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Customer,
    Establishment,
    Purchase,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Customer,
        RecordKind::Establishment,
        RecordKind::Purchase,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RecordKind::Customer => "customer",
            RecordKind::Establishment => "establishment",
            RecordKind::Purchase => "purchase",
        }
    }

    /// Capitalized name used in headings and buttons.
    pub const fn title(self) -> &'static str {
        match self {
            RecordKind::Customer => "Customer",
            RecordKind::Establishment => "Establishment",
            RecordKind::Purchase => "Purchase",
        }
    }

    /// Heading of the edit modal.
    pub const fn edit_title(self) -> &'static str {
        match self {
            RecordKind::Customer => "Edit Customer",
            RecordKind::Establishment => "Edit Establishment",
            RecordKind::Purchase => "Edit Purchase",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown record kind: {s}"))
    }
}

/// One customer, establishment or purchase.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Customer(Customer),
    Establishment(Establishment),
    Purchase(Purchase),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Customer(_) => RecordKind::Customer,
            Record::Establishment(_) => RecordKind::Establishment,
            Record::Purchase(_) => RecordKind::Purchase,
        }
    }

    /// Raw API identifier, if the record has been saved.
    pub fn id(&self) -> Option<i32> {
        match self {
            Record::Customer(c) => c.id.map(i32::from),
            Record::Establishment(e) => e.id.map(i32::from),
            Record::Purchase(p) => p.id.map(i32::from),
        }
    }
}

impl From<Customer> for Record {
    fn from(value: Customer) -> Self {
        Record::Customer(value)
    }
}

impl From<Establishment> for Record {
    fn from(value: Establishment) -> Self {
        Record::Establishment(value)
    }
}

impl From<Purchase> for Record {
    fn from(value: Purchase) -> Self {
        Record::Purchase(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_its_route_segment() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.as_str().parse::<RecordKind>(), Ok(kind));
        }
        assert!("client".parse::<RecordKind>().is_err());
    }

    #[test]
    fn record_reports_kind_and_id() {
        let record = Record::from(Customer {
            id: crate::domain::types::CustomerId::new(4).ok(),
            ..Customer::default()
        });
        assert_eq!(record.kind(), RecordKind::Customer);
        assert_eq!(record.id(), Some(4));
        assert_eq!(Record::from(Establishment::default()).id(), None);
    }
}
