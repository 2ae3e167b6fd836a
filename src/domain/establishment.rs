use serde::{Deserialize, Serialize};

use crate::domain::types::{EstablishmentId, null_as_default};

/// Merchant participating in the program.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Establishment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EstablishmentId>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    /// Business tax id (CNPJ), kept as an opaque string.
    #[serde(deserialize_with = "null_as_default")]
    pub cnpj: String,
    /// Currency units required to earn one loyalty point.
    #[serde(deserialize_with = "null_as_default")]
    pub value_per_point: f64,
}

impl Establishment {
    /// Label used by selection inputs: `<name> - R$ <valuePerPoint>/point`.
    pub fn option_label(&self) -> String {
        format!("{} - R$ {}/point", self.name, self.value_per_point)
    }

    /// Exchange rate usable for point computation.
    ///
    /// Zero, negative and non-finite rates are treated as unconfigured.
    pub fn point_rate(&self) -> Option<f64> {
        (self.value_per_point.is_finite() && self.value_per_point > 0.0)
            .then_some(self.value_per_point)
    }
}
