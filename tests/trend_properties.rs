//! Integration tests for the trend aggregator.
//!
//! The aggregation is pure and order-independent: the same submission set,
//! in any order, yields the same summary list. Documented tie-breaks are
//! the only nondeterminism, and these fixtures avoid ties across products.

use jiff::Timestamp;
use smallvec::smallvec;
use testresult::TestResult;

use pricebook::{
    media::MediaKind,
    prices::Price,
    submissions::PriceSubmission,
    trends::{TrendDirection, product_trends},
};

fn submission(product_id: &str, store_id: &str, price: u64, date: &str) -> PriceSubmission {
    PriceSubmission {
        id: format!("{product_id}-{store_id}-{date}"),
        product_id: product_id.to_string(),
        product_name: format!("Product {product_id}"),
        product_image: None,
        store_id: store_id.to_string(),
        store_name: format!("Store {store_id}"),
        price: Price::new(price),
        currency: "USD".to_string(),
        date: date.parse::<Timestamp>().unwrap_or(Timestamp::UNIX_EPOCH),
        user_id: "u-sam".to_string(),
        user_name: "Sam Ortiz".to_string(),
        user_avatar: None,
        media_urls: smallvec!["file:///tag.jpg".to_string()],
        media_kinds: smallvec![MediaKind::Image],
        upvotes: 0,
        downvotes: 0,
        user_voted: None,
        verifications: Vec::new(),
        user_verified: false,
    }
}

fn mixed_fixture() -> Vec<PriceSubmission> {
    vec![
        submission("p1", "st1", 200, "2024-01-01T00:00:00Z"),
        submission("p1", "st2", 260, "2024-01-15T00:00:00Z"),
        submission("p1", "st1", 300, "2024-02-01T00:00:00Z"),
        submission("p2", "st1", 500, "2024-01-10T00:00:00Z"),
        submission("p2", "st3", 450, "2024-03-02T00:00:00Z"),
        submission("p3", "st2", 120, "2024-02-20T00:00:00Z"),
    ]
}

#[test]
fn worked_example_from_two_observations() -> TestResult {
    let submissions = [
        submission("p1", "st1", 200, "2024-01-01T00:00:00Z"),
        submission("p1", "st1", 300, "2024-02-01T00:00:00Z"),
    ];

    let trends = product_trends(&submissions);
    let trend = trends.first().ok_or("expected one trend")?;

    assert_eq!(trend.oldest_price, Price::new(200));
    assert_eq!(trend.newest_price, Price::new(300));
    assert_eq!(trend.price_difference, 100);
    assert_eq!(trend.percent_change_label(), "50.0");
    assert_eq!(trend.direction, TrendDirection::Up);

    Ok(())
}

#[test]
fn zero_price_sole_entry_guards_division_by_zero() -> TestResult {
    let submissions = [submission("p1", "st1", 0, "2024-01-01T00:00:00Z")];

    let trends = product_trends(&submissions);
    let trend = trends.first().ok_or("expected one trend")?;

    assert_eq!(trend.percent_change_label(), "0.0");
    assert_eq!(trend.direction, TrendDirection::Stable);

    Ok(())
}

#[test]
fn output_is_invariant_under_input_permutation() {
    let fixture = mixed_fixture();
    let baseline = product_trends(&fixture);

    let mut reversed = fixture.clone();
    reversed.reverse();

    let mut rotated = fixture;
    rotated.rotate_left(2);

    assert_eq!(baseline, product_trends(&reversed), "reversed input");
    assert_eq!(baseline, product_trends(&rotated), "rotated input");
}

#[test]
fn summaries_sort_by_percent_change_descending() {
    let ids: Vec<String> = product_trends(&mixed_fixture())
        .into_iter()
        .map(|t| t.product_id)
        .collect();

    // p1: +50%, p3: single observation 0%, p2: -10%.
    assert_eq!(ids, vec!["p1", "p3", "p2"]);
}

#[test]
fn cheapest_store_compares_latest_price_per_store() -> TestResult {
    let trends = product_trends(&mixed_fixture());
    let p1 = trends
        .iter()
        .find(|t| t.product_id == "p1")
        .ok_or("expected p1 trend")?;
    let cheapest = p1.cheapest_store.as_ref().ok_or("expected a store")?;

    // st1's latest price is 300, st2's only (and latest) price is 260.
    assert_eq!(cheapest.store_id, "st2");
    assert_eq!(cheapest.price, Price::new(260));

    Ok(())
}

#[test]
fn group_extremes_span_all_observations() -> TestResult {
    let trends = product_trends(&mixed_fixture());
    let p1 = trends
        .iter()
        .find(|t| t.product_id == "p1")
        .ok_or("expected p1 trend")?;

    assert_eq!(p1.lowest_price, Price::new(200));
    assert_eq!(p1.highest_price, Price::new(300));
    assert_eq!(p1.submission_count, 3);

    Ok(())
}

#[test]
fn falling_prices_report_a_negative_change() -> TestResult {
    let trends = product_trends(&mixed_fixture());
    let p2 = trends
        .iter()
        .find(|t| t.product_id == "p2")
        .ok_or("expected p2 trend")?;

    assert_eq!(p2.direction, TrendDirection::Down);
    assert_eq!(p2.percent_change_label(), "-10.0");

    Ok(())
}
