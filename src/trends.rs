//! Price Trends
//!
//! A pure, order-independent aggregation of the submission collection into
//! one summary per product: price extremes, percent change between the
//! earliest and latest observation, and the cheapest current store.
//!
//! All sorts are stable, so submissions with equal dates keep input order;
//! among stores whose current prices tie, the first-seen store wins.

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{prices::Price, submissions::PriceSubmission};

/// Direction of a product's price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// The latest price is above the earliest.
    Up,

    /// The latest price is below the earliest.
    Down,

    /// No movement between the earliest and latest observation.
    Stable,
}

/// A store's most recent reported price for a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePrice {
    /// Store id.
    pub store_id: String,

    /// Store name.
    pub store_name: String,

    /// The store's current (latest-dated) price.
    pub price: Price,

    /// Date of that latest observation.
    pub date: jiff::Timestamp,
}

/// Aggregated price movement for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTrend {
    /// Product id.
    pub product_id: String,

    /// First-seen product name for the group.
    pub product_name: String,

    /// First-seen product image for the group.
    pub product_image: Option<String>,

    /// Number of submissions in the group.
    pub submission_count: usize,

    /// Price of the earliest observation.
    pub oldest_price: Price,

    /// Price of the latest observation.
    pub newest_price: Price,

    /// Signed difference between newest and oldest, in minor units.
    pub price_difference: i64,

    /// Percent change from oldest to newest, rounded to one decimal place;
    /// zero when the oldest price is zero.
    pub percent_change: Decimal,

    /// Lowest price across the group.
    pub lowest_price: Price,

    /// Highest price across the group.
    pub highest_price: Price,

    /// The store with the lowest current price, if any submissions exist.
    pub cheapest_store: Option<StorePrice>,

    /// Direction of the movement.
    pub direction: TrendDirection,
}

impl ProductTrend {
    /// The percent change rendered to one decimal place, e.g. `50.0`.
    #[must_use]
    pub fn percent_change_label(&self) -> String {
        format!("{:.1}", self.percent_change)
    }
}

/// Aggregates submissions into per-product trend summaries.
///
/// Deterministic and side-effect free: the same submission set yields the
/// same output regardless of input order, modulo the documented stable
/// tie-breaks. The result is sorted by percent change, descending.
#[must_use]
pub fn product_trends(submissions: &[PriceSubmission]) -> Vec<ProductTrend> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: FxHashMap<&str, Vec<&PriceSubmission>> = FxHashMap::default();

    for submission in submissions {
        let key = submission.product_id.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(submission);
    }

    let mut trends: Vec<ProductTrend> = order
        .iter()
        .filter_map(|product_id| groups.get(product_id))
        .filter_map(|group| trend_for_group(group))
        .collect();

    trends.sort_by(|a, b| b.percent_change.cmp(&a.percent_change));

    trends
}

fn trend_for_group(group: &[&PriceSubmission]) -> Option<ProductTrend> {
    let mut by_date: Vec<&PriceSubmission> = group.to_vec();
    by_date.sort_by_key(|sub| sub.date);

    let earliest = by_date.first()?;
    let latest = by_date.last()?;

    let oldest_price = earliest.price;
    let newest_price = latest.price;
    let price_difference = minor_units(newest_price) - minor_units(oldest_price);

    let percent_change = if oldest_price.is_positive() {
        (Decimal::from(price_difference) / Decimal::from(*oldest_price)
            * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let lowest_price = by_date.iter().map(|sub| sub.price).min()?;
    let highest_price = by_date.iter().map(|sub| sub.price).max()?;

    let direction = match price_difference {
        d if d > 0 => TrendDirection::Up,
        d if d < 0 => TrendDirection::Down,
        _ => TrendDirection::Stable,
    };

    let first = group.first()?;

    Some(ProductTrend {
        product_id: first.product_id.clone(),
        product_name: first.product_name.clone(),
        product_image: first.product_image.clone(),
        submission_count: group.len(),
        oldest_price,
        newest_price,
        price_difference,
        percent_change,
        lowest_price,
        highest_price,
        cheapest_store: cheapest_store(&by_date),
        direction,
    })
}

/// Current price per store (latest observation wins), then the minimum.
fn cheapest_store(by_date: &[&PriceSubmission]) -> Option<StorePrice> {
    let mut order: Vec<&str> = Vec::new();
    let mut current: FxHashMap<&str, &PriceSubmission> = FxHashMap::default();

    for &submission in by_date {
        let key = submission.store_id.as_str();
        // `by_date` is ascending, so a strictly later date supersedes;
        // equal dates keep the first seen.
        match current.get(key).map(|best| best.date) {
            None => {
                order.push(key);
                current.insert(key, submission);
            }
            Some(date) if submission.date > date => {
                current.insert(key, submission);
            }
            Some(_) => {}
        }
    }

    let mut cheapest: Option<&PriceSubmission> = None;
    for store_id in &order {
        let Some(candidate) = current.get(store_id).copied() else {
            continue;
        };
        match cheapest {
            Some(best) if candidate.price >= best.price => {}
            _ => cheapest = Some(candidate),
        }
    }

    cheapest.map(|sub| StorePrice {
        store_id: sub.store_id.clone(),
        store_name: sub.store_name.clone(),
        price: sub.price,
        date: sub.date,
    })
}

fn minor_units(price: Price) -> i64 {
    i64::try_from(*price).unwrap_or(i64::MAX)
}
