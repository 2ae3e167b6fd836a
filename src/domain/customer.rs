use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, null_as_default};

/// Loyalty program member as exchanged with the `/clients` endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    /// Assigned by the API; absent on records that were never saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    /// Tax id (CPF), kept as an opaque string.
    #[serde(deserialize_with = "null_as_default")]
    pub cpf: String,
}

impl Customer {
    /// Label used by selection inputs: `<name> - <email>`.
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.name, self.email)
    }
}
