//! Seed Fixtures
//!
//! The bundled dataset that populates the canonical submission list and the
//! product/store catalogs on every cold start. Fixtures are YAML: catalogs
//! plus submissions that reference them by id, with decimal price strings
//! parsed against the dataset currency.

use std::{fs, path::Path};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    media::MediaKind,
    prices::{Price, PriceError},
    products::Product,
    stores::Store,
    submissions::{PriceSubmission, PriceVerification},
    users::User,
};

const BUNDLED_SEED: &str = include_str!("../fixtures/seed.yaml");

/// Seed parsing errors.
#[derive(Debug, Error)]
pub enum SeedError {
    /// IO error reading a seed file.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Price or currency error.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid timestamp.
    #[error("invalid date: {text}")]
    InvalidDate {
        /// The offending date text.
        text: String,
        /// The underlying parse error.
        #[source]
        source: jiff::Error,
    },

    /// A submission references an unknown product.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// A submission references an unknown store.
    #[error("store not found: {0}")]
    StoreNotFound(String),

    /// A submission or verification references an unknown user.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A submission carries no media evidence.
    #[error("submission {0} has no media evidence")]
    NoMedia(String),
}

/// A media entry as written in seed files.
#[derive(Debug, Deserialize)]
struct RawMedia {
    url: String,
    kind: MediaKind,
}

/// A verification as written in seed files, referencing a user by id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerification {
    id: String,
    user: String,
    image_url: String,
    date: String,
}

/// A submission as written in seed files, referencing catalogs by id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmission {
    id: String,
    product: String,
    store: String,
    user: String,
    price: String,
    date: String,
    #[serde(default)]
    media: Vec<RawMedia>,
    #[serde(default)]
    upvotes: u32,
    #[serde(default)]
    downvotes: u32,
    #[serde(default)]
    verifications: Vec<RawVerification>,
}

/// Top-level seed file shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedFile {
    currency: String,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stores: Vec<Store>,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    submissions: Vec<RawSubmission>,
}

/// The resolved seed dataset.
#[derive(Debug, Clone)]
pub struct SeedData {
    /// ISO currency alpha code shared by the dataset.
    pub currency: String,

    /// Product catalog.
    pub products: Vec<Product>,

    /// Retail store catalog.
    pub stores: Vec<Store>,

    /// Contributor profiles.
    pub users: Vec<User>,

    /// Example submissions, denormalized against the catalogs.
    pub submissions: Vec<PriceSubmission>,
}

impl SeedData {
    /// Loads the dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] if the bundled fixture is malformed.
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_yaml(BUNDLED_SEED)
    }

    /// Loads a dataset from a YAML file on disk.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] on IO or parse failure.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Parses a dataset from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] if the YAML is malformed, a price or date
    /// does not parse, a catalog reference is dangling, or a submission
    /// carries no media.
    pub fn from_yaml(text: &str) -> Result<Self, SeedError> {
        let file: SeedFile = serde_norway::from_str(text)?;
        let currency = Price::currency(&file.currency)?;

        let products: FxHashMap<&str, &Product> =
            file.products.iter().map(|p| (p.id.as_str(), p)).collect();
        let stores: FxHashMap<&str, &Store> =
            file.stores.iter().map(|s| (s.id.as_str(), s)).collect();
        let users: FxHashMap<&str, &User> =
            file.users.iter().map(|u| (u.id.as_str(), u)).collect();

        let submissions = file
            .submissions
            .iter()
            .map(|raw| {
                let product = products
                    .get(raw.product.as_str())
                    .ok_or_else(|| SeedError::ProductNotFound(raw.product.clone()))?;
                let store = stores
                    .get(raw.store.as_str())
                    .ok_or_else(|| SeedError::StoreNotFound(raw.store.clone()))?;
                let user = users
                    .get(raw.user.as_str())
                    .ok_or_else(|| SeedError::UserNotFound(raw.user.clone()))?;

                if raw.media.is_empty() {
                    return Err(SeedError::NoMedia(raw.id.clone()));
                }

                let verifications = raw
                    .verifications
                    .iter()
                    .map(|v| {
                        let verifier = users
                            .get(v.user.as_str())
                            .ok_or_else(|| SeedError::UserNotFound(v.user.clone()))?;

                        Ok(PriceVerification {
                            id: v.id.clone(),
                            user_id: verifier.id.clone(),
                            user_name: verifier.name.clone(),
                            user_avatar: verifier.avatar.clone(),
                            image_url: v.image_url.clone(),
                            date: parse_date(&v.date)?,
                        })
                    })
                    .collect::<Result<Vec<_>, SeedError>>()?;

                Ok(PriceSubmission {
                    id: raw.id.clone(),
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    product_image: product.image_url.clone(),
                    store_id: store.id.clone(),
                    store_name: store.name.clone(),
                    price: Price::parse(&raw.price, currency)?,
                    currency: file.currency.clone(),
                    date: parse_date(&raw.date)?,
                    user_id: user.id.clone(),
                    user_name: user.name.clone(),
                    user_avatar: user.avatar.clone(),
                    media_urls: raw.media.iter().map(|m| m.url.clone()).collect(),
                    media_kinds: raw.media.iter().map(|m| m.kind).collect(),
                    upvotes: raw.upvotes,
                    downvotes: raw.downvotes,
                    user_voted: None,
                    verifications,
                    user_verified: false,
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        Ok(SeedData {
            currency: file.currency,
            products: file.products,
            stores: file.stores,
            users: file.users,
            submissions,
        })
    }
}

fn parse_date(text: &str) -> Result<Timestamp, SeedError> {
    text.parse::<Timestamp>()
        .map_err(|source| SeedError::InvalidDate {
            text: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_dataset_parses() -> TestResult {
        let seed = SeedData::bundled()?;

        assert!(!seed.products.is_empty(), "bundled catalog must not be empty");
        assert!(!seed.stores.is_empty(), "bundled stores must not be empty");
        assert!(!seed.submissions.is_empty(), "bundled feed must not be empty");

        Ok(())
    }

    #[test]
    fn bundled_submissions_are_denormalized() -> TestResult {
        let seed = SeedData::bundled()?;

        for submission in &seed.submissions {
            assert!(
                seed.products.iter().any(|p| p.id == submission.product_id),
                "submission {} references a cataloged product",
                submission.id
            );
            assert_eq!(
                submission.media_urls.len(),
                submission.media_kinds.len(),
                "parallel media arrays"
            );
            assert!(!submission.media_urls.is_empty(), "media required");
        }

        Ok(())
    }

    #[test]
    fn dangling_product_reference_errors() {
        let yaml = r"
currency: USD
products: []
stores:
  - {id: st1, name: Corner Shop, address: 1 High St, city: Leeds, state: LS}
users:
  - {id: u1, name: Sam}
submissions:
  - id: s1
    product: missing
    store: st1
    user: u1
    price: '1.00'
    date: 2024-01-01T00:00:00Z
    media:
      - {url: 'file:///a.jpg', kind: image}
";

        let err = SeedData::from_yaml(yaml).err();

        assert!(matches!(err, Some(SeedError::ProductNotFound(id)) if id == "missing"));
    }

    #[test]
    fn submission_without_media_errors() {
        let yaml = r"
currency: USD
products:
  - {id: p1, name: Whole Milk, category: Dairy}
stores:
  - {id: st1, name: Corner Shop, address: 1 High St, city: Leeds, state: LS}
users:
  - {id: u1, name: Sam}
submissions:
  - id: s1
    product: p1
    store: st1
    user: u1
    price: '1.00'
    date: 2024-01-01T00:00:00Z
";

        let err = SeedData::from_yaml(yaml).err();

        assert!(matches!(err, Some(SeedError::NoMedia(id)) if id == "s1"));
    }

    #[test]
    fn unknown_dataset_currency_errors() {
        let err = SeedData::from_yaml("currency: XQZ\n").err();

        assert!(matches!(
            err,
            Some(SeedError::Price(PriceError::UnknownCurrency(_)))
        ));
    }
}
