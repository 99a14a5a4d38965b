//! Trends demo: print the per-product price trend summary for a seed
//! dataset.
//!
//! ```sh
//! cargo run --example trends
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pricebook::{report::trend_table, trends::product_trends, utils::DemoArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();
    let seed = args.load_seed()?;

    let trends = product_trends(&seed.submissions);

    println!(
        "Based on {} price submissions across {} products",
        seed.submissions.len(),
        trends.len()
    );
    println!("{}", trend_table(&trends, &seed.currency)?);

    Ok(())
}
