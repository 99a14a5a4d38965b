//! Feed Filtering
//!
//! The feed view over the canonical submission collection: category, store,
//! and price-range filters, free-text search, and sorting. All filters are
//! case-insensitive; sorts are stable, so equal keys keep input order.

use serde::{Deserialize, Serialize};

use crate::{prices::Price, submissions::PriceSubmission};

/// The category sentinel that means "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Sort order for the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Most recent observations first.
    #[default]
    Newest,

    /// Oldest observations first.
    Oldest,

    /// Most expensive first.
    PriceHighToLow,

    /// Cheapest first.
    PriceLowToHigh,
}

/// View-state controlling the feed. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Category filter; `Some("All")` and `None` both mean unfiltered.
    pub category: Option<String>,

    /// Store filter, matched against store id or name.
    pub store: Option<String>,

    /// Inclusive price bounds.
    pub price_range: Option<(Price, Price)>,

    /// Active sort order.
    pub sort_by: SortOrder,
}

/// A shallow-merge update for [`FilterOptions`]; `None` fields are kept.
///
/// Category filters are cleared by selecting the [`ALL_CATEGORIES`]
/// sentinel rather than by unsetting the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    /// New category filter.
    pub category: Option<String>,

    /// New store filter.
    pub store: Option<String>,

    /// New price bounds.
    pub price_range: Option<(Price, Price)>,

    /// New sort order.
    pub sort_by: Option<SortOrder>,
}

impl FilterOptions {
    /// Shallow-merges a patch into these options.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(store) = patch.store {
            self.store = Some(store);
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = Some(price_range);
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
    }
}

/// Applies filters, search, and sorting to a submission collection.
///
/// An empty result is a valid outcome, distinct from "no filter applied".
#[must_use]
pub fn filter_submissions<'a>(
    submissions: &'a [PriceSubmission],
    options: &FilterOptions,
    query: &str,
) -> Vec<&'a PriceSubmission> {
    let category = options
        .category
        .as_deref()
        .filter(|c| *c != ALL_CATEGORIES)
        .map(str::to_lowercase);
    let query = query.trim().to_lowercase();

    let mut result: Vec<&PriceSubmission> = submissions
        .iter()
        .filter(|sub| {
            category
                .as_deref()
                .is_none_or(|c| sub.product_name.to_lowercase().contains(c))
        })
        .filter(|sub| {
            options.store.as_deref().is_none_or(|store| {
                sub.store_id.eq_ignore_ascii_case(store)
                    || sub.store_name.eq_ignore_ascii_case(store)
            })
        })
        .filter(|sub| {
            options
                .price_range
                .is_none_or(|(low, high)| sub.price >= low && sub.price <= high)
        })
        .filter(|sub| {
            query.is_empty()
                || sub.product_name.to_lowercase().contains(&query)
                || sub.store_name.to_lowercase().contains(&query)
        })
        .collect();

    match options.sort_by {
        SortOrder::Newest => result.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => result.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::PriceHighToLow => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::PriceLowToHigh => result.sort_by(|a, b| a.price.cmp(&b.price)),
    }

    result
}
