//! Submission Tracker
//!
//! The single source of truth for submissions, catalogs, and feed
//! view-state. An explicit container: construct one per app (or per test)
//! with a seed dataset and an injected persistence backend.
//!
//! Every operation is total: "not found" and "duplicate" conditions resolve
//! to silent no-ops, never errors. After each mutation the durable subset
//! (the user's own submissions) is written to the snapshot slot,
//! fire-and-forget; the canonical collection is re-seeded on cold start.

use tracing::{debug, warn};

use crate::{
    feed::{FilterOptions, FilterPatch, filter_submissions},
    persist::{Persist, STORAGE_KEY, Snapshot},
    products::Product,
    seed::SeedData,
    stores::Store,
    submissions::{PriceSubmission, PriceVerification, SubmissionPatch, Vote},
    trends::{ProductTrend, product_trends},
    users::Identity,
};

/// A user's contribution totals, derived from the canonical collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionStats {
    /// Number of submissions by the user.
    pub submissions: usize,

    /// Upvotes received across those submissions.
    pub upvotes_received: u64,
}

/// The submission store.
#[derive(Debug)]
pub struct Tracker {
    submissions: Vec<PriceSubmission>,
    user_submissions: Vec<PriceSubmission>,
    products: Vec<Product>,
    stores: Vec<Store>,
    filter_options: FilterOptions,
    search_query: String,
    persist: Box<dyn Persist>,
}

impl Tracker {
    /// Builds a tracker from a seed dataset and a persistence backend.
    ///
    /// The canonical submission collection comes from the seed; the user's
    /// own submissions are restored from the snapshot slot. A missing,
    /// unreadable, or corrupt snapshot degrades to an empty subset.
    #[must_use]
    pub fn new(seed: SeedData, persist: Box<dyn Persist>) -> Self {
        let user_submissions = match persist.load(STORAGE_KEY) {
            Ok(Some(payload)) => match Snapshot::from_json(&payload) {
                Ok(snapshot) => snapshot.user_submissions,
                Err(err) => {
                    warn!(error = %err, "discarding unreadable snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "snapshot read failed");
                Vec::new()
            }
        };

        Self {
            submissions: seed.submissions,
            user_submissions,
            products: seed.products,
            stores: seed.stores,
            filter_options: FilterOptions::default(),
            search_query: String::new(),
            persist,
        }
    }

    /// The canonical submission collection, newest contributions first.
    #[must_use]
    pub fn submissions(&self) -> &[PriceSubmission] {
        &self.submissions
    }

    /// The user's own submissions (the durable subset).
    #[must_use]
    pub fn user_submissions(&self) -> &[PriceSubmission] {
        &self.user_submissions
    }

    /// The product catalog.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The retail store catalog.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// The active filter options.
    #[must_use]
    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    /// The active search query.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The feed: canonical submissions filtered, searched, and sorted by
    /// the current view-state.
    #[must_use]
    pub fn feed(&self) -> Vec<&PriceSubmission> {
        filter_submissions(&self.submissions, &self.filter_options, &self.search_query)
    }

    /// All canonical submissions contributed by the given user.
    #[must_use]
    pub fn submissions_by(&self, user_id: &str) -> Vec<&PriceSubmission> {
        self.submissions
            .iter()
            .filter(|sub| sub.user_id == user_id)
            .collect()
    }

    /// Contribution totals for the given user.
    #[must_use]
    pub fn contribution_stats(&self, user_id: &str) -> ContributionStats {
        self.submissions_by(user_id)
            .into_iter()
            .fold(ContributionStats::default(), |stats, sub| {
                ContributionStats {
                    submissions: stats.submissions + 1,
                    upvotes_received: stats.upvotes_received + u64::from(sub.upvotes),
                }
            })
    }

    /// Per-product trend summaries over the canonical collection.
    #[must_use]
    pub fn trends(&self) -> Vec<ProductTrend> {
        product_trends(&self.submissions)
    }

    /// Prepends a submission to the canonical collection and the user's
    /// own subset. Validation belongs to the draft boundary; this always
    /// succeeds.
    pub fn add_submission(&mut self, submission: PriceSubmission) {
        debug!(id = %submission.id, product = %submission.product_name, "submission added");

        self.submissions.insert(0, submission.clone());
        self.user_submissions.insert(0, submission);
        self.write_snapshot();
    }

    /// Merges a patch into the matching submission wherever it appears.
    /// No-op if the id is unknown.
    pub fn update_submission(&mut self, id: &str, patch: &SubmissionPatch) {
        let mut touched = false;

        for sub in self
            .submissions
            .iter_mut()
            .chain(self.user_submissions.iter_mut())
            .filter(|sub| sub.id == id)
        {
            sub.apply(patch);
            touched = true;
        }

        if touched {
            debug!(id, "submission updated");
            self.write_snapshot();
        }
    }

    /// Removes the matching submission from both collections. No-op if the
    /// id is unknown.
    pub fn delete_submission(&mut self, id: &str) {
        let before = self.submissions.len() + self.user_submissions.len();

        self.submissions.retain(|sub| sub.id != id);
        self.user_submissions.retain(|sub| sub.id != id);

        if self.submissions.len() + self.user_submissions.len() != before {
            debug!(id, "submission deleted");
            self.write_snapshot();
        }
    }

    /// Replaces the voter's active vote on a submission, reverting the
    /// previous tally first; `None` un-votes. The toggle decision is made
    /// by the caller. No-op if the id is unknown.
    pub fn vote_submission(&mut self, id: &str, vote: Option<Vote>, voter: &Identity) {
        let Some(current) = self.submissions.iter().find(|sub| sub.id == id) else {
            return;
        };

        let mut updated = current.clone();
        updated.record_vote(vote);

        debug!(id, voter = %voter.id, ?vote, "vote recorded");
        self.replace(updated);
        self.write_snapshot();
    }

    /// Appends a verification unless the same user already verified the
    /// submission; duplicates and unknown ids are silent no-ops.
    /// `user_verified` tracks whether the verifying user is the viewer.
    pub fn verify_submission(
        &mut self,
        id: &str,
        verification: PriceVerification,
        viewer: &Identity,
    ) {
        let Some(current) = self.submissions.iter().find(|sub| sub.id == id) else {
            return;
        };

        let mut updated = current.clone();
        let verifier = verification.user_id.clone();

        if !updated.record_verification(verification, &viewer.id) {
            return;
        }

        debug!(id, verifier = %verifier, "verification recorded");
        self.replace(updated);
        self.write_snapshot();
    }

    /// Appends a product to the catalog. Duplicate names are permitted;
    /// [`Tracker::has_product_named`] backs the UI warning.
    pub fn add_product(&mut self, product: Product) {
        debug!(id = %product.id, name = %product.name, "product added");

        self.products.push(product);
        self.write_snapshot();
    }

    /// Whether a product with this name (case-insensitive) already exists.
    #[must_use]
    pub fn has_product_named(&self, name: &str) -> bool {
        self.products
            .iter()
            .any(|product| product.name.eq_ignore_ascii_case(name))
    }

    /// Shallow-merges filter view-state.
    pub fn set_filter_options(&mut self, patch: FilterPatch) {
        self.filter_options.merge(patch);
        self.write_snapshot();
    }

    /// Replaces the search query.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.write_snapshot();
    }

    /// Swaps the updated submission into both collections by id.
    fn replace(&mut self, updated: PriceSubmission) {
        for sub in self
            .submissions
            .iter_mut()
            .chain(self.user_submissions.iter_mut())
            .filter(|sub| sub.id == updated.id)
        {
            *sub = updated.clone();
        }
    }

    /// Serializes the durable subset and writes it, fire-and-forget.
    fn write_snapshot(&self) {
        let snapshot = Snapshot {
            user_submissions: self.user_submissions.clone(),
        };

        match snapshot.to_json() {
            Ok(payload) => {
                if let Err(err) = self.persist.save(STORAGE_KEY, &payload) {
                    warn!(error = %err, "snapshot write failed");
                }
            }
            Err(err) => warn!(error = %err, "snapshot serialization failed"),
        }
    }
}
