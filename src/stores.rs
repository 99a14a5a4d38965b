//! Retail Stores
//!
//! Static reference data: the physical locations that prices are reported
//! from. Not mutated at runtime.

use serde::{Deserialize, Serialize};

/// A retail location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store id.
    pub id: String,

    /// Store name, e.g. `Walmart`.
    pub name: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Optional storefront image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}
