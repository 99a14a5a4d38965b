//! Products

use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// The id is assigned by the caller (a time-based token is acceptable) and
/// the record is immutable once created except by full replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Caller-assigned product id.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Product category, e.g. `Dairy`.
    pub category: String,

    /// Optional product image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}
