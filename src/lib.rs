//! Pricebook
//!
//! Pricebook is the community core of a crowd-sourced grocery price tracker:
//! a submission store with vote and verification bookkeeping, feed
//! filtering, price trend aggregation, and snapshot persistence.

pub mod draft;
pub mod feed;
pub mod media;
pub mod persist;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod report;
pub mod seed;
pub mod stores;
pub mod submissions;
pub mod tracker;
pub mod trends;
pub mod users;
pub mod utils;
