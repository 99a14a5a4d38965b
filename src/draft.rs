//! Submission Drafts
//!
//! Boundary validation for the add-price flow. A draft collects the pieces
//! the form gathers and either reports what is missing or builds a
//! well-formed [`PriceSubmission`]. Validation happens here, before any
//! store mutation; store operations themselves never validate.

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    media::MediaEvidence, prices::Price, products::Product, stores::Store,
    submissions::PriceSubmission, users::Identity,
};

/// Validation failures reported to the user before submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// No product was selected.
    #[error("no product selected")]
    MissingProduct,

    /// No store was selected.
    #[error("no store selected")]
    MissingStore,

    /// No price was entered.
    #[error("no price entered")]
    MissingPrice,

    /// The entered price is zero.
    #[error("price must be greater than zero")]
    NonPositivePrice,

    /// No photo, video, or receipt was attached.
    #[error("at least one photo, video, or receipt is required")]
    MissingMedia,
}

/// An in-progress price submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    product: Option<Product>,
    store: Option<Store>,
    price: Option<Price>,
    currency: Option<String>,
    media: SmallVec<[MediaEvidence; 4]>,
}

impl SubmissionDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selected product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the selected store.
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the entered price.
    #[must_use]
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the currency code; defaults to `USD` when never set.
    #[must_use]
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    /// Attaches a piece of media evidence.
    #[must_use]
    pub fn with_media(mut self, evidence: MediaEvidence) -> Self {
        self.media.push(evidence);
        self
    }

    /// Validates the draft and builds the submission.
    ///
    /// The id is a time-based token derived from `now`; vote tallies start
    /// at zero and the verification list empty. Media evidence is split into
    /// the parallel url/kind arrays in picker order.
    ///
    /// # Errors
    ///
    /// - [`DraftError::MissingProduct`] / [`DraftError::MissingStore`] /
    ///   [`DraftError::MissingPrice`] / [`DraftError::MissingMedia`]: a
    ///   required piece was never provided.
    /// - [`DraftError::NonPositivePrice`]: the price is zero.
    pub fn build(
        self,
        submitter: &Identity,
        now: Timestamp,
    ) -> Result<PriceSubmission, DraftError> {
        let product = self.product.ok_or(DraftError::MissingProduct)?;
        let store = self.store.ok_or(DraftError::MissingStore)?;
        let price = self.price.ok_or(DraftError::MissingPrice)?;

        if !price.is_positive() {
            return Err(DraftError::NonPositivePrice);
        }

        if self.media.is_empty() {
            return Err(DraftError::MissingMedia);
        }

        let media_urls = self.media.iter().map(|m| m.url.clone()).collect();
        let media_kinds = self.media.iter().map(|m| m.kind).collect();

        Ok(PriceSubmission {
            id: now.as_millisecond().to_string(),
            product_id: product.id,
            product_name: product.name,
            product_image: product.image_url,
            store_id: store.id,
            store_name: store.name,
            price,
            currency: self.currency.unwrap_or_else(|| "USD".to_string()),
            date: now,
            user_id: submitter.id.clone(),
            user_name: submitter.name.clone(),
            user_avatar: submitter.avatar.clone(),
            media_urls,
            media_kinds,
            upvotes: 0,
            downvotes: 0,
            user_voted: None,
            verifications: Vec::new(),
            user_verified: false,
        })
    }
}
