//! Pricebook prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    draft::{DraftError, SubmissionDraft},
    feed::{ALL_CATEGORIES, FilterOptions, FilterPatch, SortOrder, filter_submissions},
    media::{MediaEvidence, MediaKind},
    persist::{FilePersist, MemoryPersist, Persist, PersistError, STORAGE_KEY, Snapshot},
    prices::{Price, PriceError},
    products::Product,
    report::{ReportError, feed_table, trend_table},
    seed::{SeedData, SeedError},
    stores::Store,
    submissions::{PriceSubmission, PriceVerification, SubmissionPatch, Vote},
    tracker::{ContributionStats, Tracker},
    trends::{ProductTrend, StorePrice, TrendDirection, product_trends},
    users::{Identity, User},
};
