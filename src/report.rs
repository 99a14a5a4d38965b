//! Reports
//!
//! Presentation-ready text tables for the feed and the trend summary.

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    prices::{Price, PriceError},
    submissions::PriceSubmission,
    trends::{ProductTrend, TrendDirection},
};

/// Errors that can occur while rendering a report.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    /// Price formatting failed.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Renders the trend summary as a table, prices in the given currency.
///
/// # Errors
///
/// Returns a [`ReportError`] for unknown currency codes or unformattable
/// amounts.
pub fn trend_table(trends: &[ProductTrend], currency_code: &str) -> Result<String, ReportError> {
    let currency = Price::currency(currency_code)?;
    let mut builder = Builder::default();

    builder.push_record(["Product", "Trend", "Newest", "Lowest", "Highest", "Best deal"]);

    for trend in trends {
        let best_deal = match &trend.cheapest_store {
            Some(store) => format!("{} at {}", store.price.formatted(currency)?, store.store_name),
            None => "—".to_string(),
        };

        builder.push_record([
            trend.product_name.clone(),
            trend_label(trend),
            trend.newest_price.formatted(currency)?,
            trend.lowest_price.formatted(currency)?,
            trend.highest_price.formatted(currency)?,
            best_deal,
        ]);
    }

    Ok(style(builder, 2..5))
}

/// Renders a feed page as a table, prices in the given currency.
///
/// # Errors
///
/// Returns a [`ReportError`] for unknown currency codes or unformattable
/// amounts.
pub fn feed_table(
    submissions: &[&PriceSubmission],
    currency_code: &str,
) -> Result<String, ReportError> {
    let currency = Price::currency(currency_code)?;
    let mut builder = Builder::default();

    builder.push_record(["Product", "Store", "Price", "Date", "Votes", "Verified"]);

    for sub in submissions {
        builder.push_record([
            sub.product_name.clone(),
            sub.store_name.clone(),
            sub.price.formatted(currency)?,
            sub.date.strftime("%Y-%m-%d").to_string(),
            format!("+{} / -{}", sub.upvotes, sub.downvotes),
            sub.verifications.len().to_string(),
        ]);
    }

    Ok(style(builder, 2..3))
}

fn trend_label(trend: &ProductTrend) -> String {
    let percent = trend.percent_change_label();

    match trend.direction {
        TrendDirection::Up => format!("▲ +{percent}%"),
        TrendDirection::Down => format!("▼ {percent}%"),
        TrendDirection::Stable => format!("· {percent}%"),
    }
}

fn style(builder: Builder, money_columns: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(money_columns), Alignment::right());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{seed::SeedData, trends::product_trends};

    use super::*;

    #[test]
    fn trend_table_includes_product_and_price() -> TestResult {
        let seed = SeedData::bundled()?;
        let trends = product_trends(&seed.submissions);

        let table = trend_table(&trends, &seed.currency)?;

        for trend in &trends {
            assert!(
                table.contains(&trend.product_name),
                "table lists {}",
                trend.product_name
            );
        }

        Ok(())
    }

    #[test]
    fn feed_table_renders_for_empty_feed() -> TestResult {
        let table = feed_table(&[], "USD")?;

        assert!(table.contains("Product"), "header row renders");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let err = trend_table(&[], "XQZ").err();

        assert!(matches!(err, Some(ReportError::Price(_))));
    }
}
