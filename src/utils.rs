//! Utils

use clap::Parser;

use crate::{
    feed::SortOrder,
    seed::{SeedData, SeedError},
};

/// Arguments for the feed and trends demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Path to a YAML seed file; defaults to the bundled dataset
    #[clap(short, long)]
    pub seed: Option<String>,

    /// Category filter for the feed
    #[clap(short, long)]
    pub category: Option<String>,

    /// Search query for the feed
    #[clap(short, long)]
    pub query: Option<String>,

    /// Sort order: newest, oldest, price-high, price-low
    #[clap(long, default_value = "newest")]
    pub sort: String,
}

impl DemoArgs {
    /// Loads the seed dataset the arguments point at.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] if the dataset cannot be read or parsed.
    pub fn load_seed(&self) -> Result<SeedData, SeedError> {
        match &self.seed {
            Some(path) => SeedData::from_path(path),
            None => SeedData::bundled(),
        }
    }
}

/// Maps a demo sort name to a [`SortOrder`].
#[must_use]
pub fn sort_order(name: &str) -> Option<SortOrder> {
    match name {
        "newest" => Some(SortOrder::Newest),
        "oldest" => Some(SortOrder::Oldest),
        "price-high" => Some(SortOrder::PriceHighToLow),
        "price-low" => Some(SortOrder::PriceLowToHigh),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_names_map_to_orders() {
        assert_eq!(sort_order("price-high"), Some(SortOrder::PriceHighToLow));
        assert_eq!(sort_order("sideways"), None);
    }
}
