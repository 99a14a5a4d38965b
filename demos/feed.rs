//! Feed demo: load a seed dataset, apply filters from the command line, and
//! print the resulting feed.
//!
//! ```sh
//! cargo run --example feed -- --category Dairy --sort price-low
//! ```

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pricebook::{
    feed::FilterPatch,
    persist::MemoryPersist,
    report::feed_table,
    tracker::Tracker,
    utils::{DemoArgs, sort_order},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();
    let seed = args.load_seed()?;
    let currency = seed.currency.clone();

    let Some(order) = sort_order(&args.sort) else {
        bail!("unknown sort order: {}", args.sort);
    };

    let mut tracker = Tracker::new(seed, Box::new(MemoryPersist::new()));

    tracker.set_filter_options(FilterPatch {
        category: args.category.clone(),
        sort_by: Some(order),
        ..FilterPatch::default()
    });

    if let Some(query) = &args.query {
        tracker.set_search_query(query.clone());
    }

    let feed = tracker.feed();

    println!(
        "{} of {} submissions match",
        feed.len(),
        tracker.submissions().len()
    );
    println!("{}", feed_table(&feed, &currency)?);

    Ok(())
}
