//! Price Submissions
//!
//! A submission is a user-reported price observation for a product at a
//! store, with attached media evidence, community votes, and photographic
//! verifications from other users.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{media::MediaKind, prices::Price};

/// A vote on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    /// The price looks right.
    Up,

    /// The price looks wrong or stale.
    Down,
}

/// A second user's photographic confirmation of a submission's price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceVerification {
    /// Verification id.
    pub id: String,

    /// Verifying user's id.
    pub user_id: String,

    /// Verifying user's display name.
    pub user_name: String,

    /// Verifying user's avatar, if any.
    #[serde(default)]
    pub user_avatar: Option<String>,

    /// Photo evidence reference.
    pub image_url: String,

    /// When the verification was made.
    pub date: Timestamp,
}

/// A user-reported price observation.
///
/// `media_urls` and `media_kinds` are parallel arrays: equal length, same
/// order, at least one entry. The draft boundary guarantees this; mutation
/// through [`SubmissionPatch`] replaces both together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSubmission {
    /// Caller-assigned submission id (time-based token).
    pub id: String,

    /// Id of the observed product.
    pub product_id: String,

    /// Denormalized product name at submission time.
    pub product_name: String,

    /// Denormalized product image, if any.
    #[serde(default)]
    pub product_image: Option<String>,

    /// Id of the store the price was observed at.
    pub store_id: String,

    /// Denormalized store name at submission time.
    pub store_name: String,

    /// Observed price in minor units.
    pub price: Price,

    /// ISO currency alpha code, e.g. `USD`.
    pub currency: String,

    /// When the price was observed.
    pub date: Timestamp,

    /// Submitting user's id.
    pub user_id: String,

    /// Submitting user's display name.
    pub user_name: String,

    /// Submitting user's avatar, if any.
    #[serde(default)]
    pub user_avatar: Option<String>,

    /// Media evidence references, parallel to `media_kinds`.
    pub media_urls: SmallVec<[String; 4]>,

    /// Media type tags, parallel to `media_urls`.
    #[serde(rename = "mediaTypes")]
    pub media_kinds: SmallVec<[MediaKind; 4]>,

    /// Community upvote tally.
    #[serde(default)]
    pub upvotes: u32,

    /// Community downvote tally.
    #[serde(default)]
    pub downvotes: u32,

    /// The viewing user's active vote, if any.
    #[serde(default)]
    pub user_voted: Option<Vote>,

    /// Photographic confirmations, at most one per user.
    #[serde(default)]
    pub verifications: Vec<PriceVerification>,

    /// Whether the viewing user has verified this submission.
    #[serde(default)]
    pub user_verified: bool,
}

impl PriceSubmission {
    /// Whether the given user has already verified this submission.
    #[must_use]
    pub fn has_verification_from(&self, user_id: &str) -> bool {
        self.verifications.iter().any(|v| v.user_id == user_id)
    }

    /// Replaces the viewer's vote, reverting the previous tally first.
    ///
    /// Tallies saturate at zero, so an inconsistent flag can never drive a
    /// count negative. The toggle-to-`None` decision is made by the caller.
    pub fn record_vote(&mut self, vote: Option<Vote>) {
        match self.user_voted {
            Some(Vote::Up) => self.upvotes = self.upvotes.saturating_sub(1),
            Some(Vote::Down) => self.downvotes = self.downvotes.saturating_sub(1),
            None => {}
        }

        match vote {
            Some(Vote::Up) => self.upvotes += 1,
            Some(Vote::Down) => self.downvotes += 1,
            None => {}
        }

        self.user_voted = vote;
    }

    /// Appends a verification unless the same user already verified.
    ///
    /// On success, `user_verified` is recomputed to whether the verifying
    /// user is the viewer. Returns whether the verification was recorded.
    pub fn record_verification(
        &mut self,
        verification: PriceVerification,
        viewer_id: &str,
    ) -> bool {
        if self.has_verification_from(&verification.user_id) {
            return false;
        }

        self.user_verified = verification.user_id == viewer_id;
        self.verifications.push(verification);

        true
    }

    /// Merges a patch into this submission.
    pub fn apply(&mut self, patch: &SubmissionPatch) {
        if let Some(product_name) = &patch.product_name {
            self.product_name = product_name.clone();
        }
        if let Some(product_image) = &patch.product_image {
            self.product_image = Some(product_image.clone());
        }
        if let Some(store_id) = &patch.store_id {
            self.store_id = store_id.clone();
        }
        if let Some(store_name) = &patch.store_name {
            self.store_name = store_name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency) = &patch.currency {
            self.currency = currency.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(media_urls) = &patch.media_urls {
            self.media_urls = media_urls.clone();
        }
        if let Some(media_kinds) = &patch.media_kinds {
            self.media_kinds = media_kinds.clone();
        }
    }
}

/// A partial update for a submission; `None` fields are left untouched.
///
/// Media arrays should be patched together to preserve the parallel-array
/// invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPatch {
    /// New product name.
    pub product_name: Option<String>,

    /// New product image.
    pub product_image: Option<String>,

    /// New store id.
    pub store_id: Option<String>,

    /// New store name.
    pub store_name: Option<String>,

    /// New price.
    pub price: Option<Price>,

    /// New currency code.
    pub currency: Option<String>,

    /// New observation date.
    pub date: Option<Timestamp>,

    /// Replacement media references.
    pub media_urls: Option<SmallVec<[String; 4]>>,

    /// Replacement media type tags.
    pub media_kinds: Option<SmallVec<[MediaKind; 4]>>,
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn submission() -> PriceSubmission {
        PriceSubmission {
            id: "s1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Whole Milk".to_string(),
            product_image: None,
            store_id: "st1".to_string(),
            store_name: "Greenfield Market".to_string(),
            price: Price::new(349),
            currency: "USD".to_string(),
            date: Timestamp::UNIX_EPOCH,
            user_id: "u1".to_string(),
            user_name: "Sam".to_string(),
            user_avatar: None,
            media_urls: smallvec!["file:///milk.jpg".to_string()],
            media_kinds: smallvec![MediaKind::Image],
            upvotes: 2,
            downvotes: 1,
            user_voted: None,
            verifications: Vec::new(),
            user_verified: false,
        }
    }

    fn verification(user_id: &str) -> PriceVerification {
        PriceVerification {
            id: format!("v-{user_id}"),
            user_id: user_id.to_string(),
            user_name: "Alex".to_string(),
            user_avatar: None,
            image_url: "file:///proof.jpg".to_string(),
            date: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn record_vote_reverts_previous_vote_before_applying() {
        let mut sub = submission();

        sub.record_vote(Some(Vote::Up));
        assert_eq!((sub.upvotes, sub.downvotes), (3, 1));

        sub.record_vote(Some(Vote::Down));
        assert_eq!((sub.upvotes, sub.downvotes), (2, 2));
        assert_eq!(sub.user_voted, Some(Vote::Down));
    }

    #[test]
    fn record_vote_none_unvotes() {
        let mut sub = submission();

        sub.record_vote(Some(Vote::Up));
        sub.record_vote(None);

        assert_eq!((sub.upvotes, sub.downvotes), (2, 1));
        assert_eq!(sub.user_voted, None);
    }

    #[test]
    fn record_vote_saturates_at_zero() {
        let mut sub = submission();
        sub.upvotes = 0;
        sub.user_voted = Some(Vote::Up);

        sub.record_vote(None);

        assert_eq!(sub.upvotes, 0);
    }

    #[test]
    fn record_verification_deduplicates_by_user() {
        let mut sub = submission();

        assert!(sub.record_verification(verification("u2"), "u1"));
        assert!(!sub.record_verification(verification("u2"), "u1"));

        assert_eq!(sub.verifications.len(), 1);
    }

    #[test]
    fn record_verification_tracks_viewer_flag() {
        let mut sub = submission();

        assert!(sub.record_verification(verification("u1"), "u1"));
        assert!(sub.user_verified, "viewer's own verification sets the flag");

        assert!(sub.record_verification(verification("u3"), "u1"));
        assert!(!sub.user_verified, "a later non-viewer verification resets it");
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut sub = submission();

        sub.apply(&SubmissionPatch {
            price: Some(Price::new(299)),
            store_name: Some("Hilltop Grocers".to_string()),
            ..SubmissionPatch::default()
        });

        assert_eq!(sub.price, Price::new(299));
        assert_eq!(sub.store_name, "Hilltop Grocers");
        assert_eq!(sub.product_name, "Whole Milk");
        assert_eq!(sub.currency, "USD");
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_media_types() -> TestResult {
        let json = serde_json::to_string(&submission())?;

        assert!(json.contains("\"productId\""), "expected camelCase keys");
        assert!(json.contains("\"mediaTypes\""), "media kinds keep the wire name");
        assert!(json.contains("\"userVoted\":null"), "absent vote serializes as null");

        Ok(())
    }
}
