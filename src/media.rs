//! Media Evidence
//!
//! Local file references handed over by the platform media picker. The core
//! treats URLs as opaque strings and performs no validation beyond presence.

use serde::{Deserialize, Serialize};

/// The kind of media attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A photo of the shelf tag or product.
    Image,

    /// A short video clip.
    Video,

    /// A photographed till receipt.
    Receipt,
}

impl MediaKind {
    /// Lowercase token for the kind, as used in serialized records.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Receipt => "receipt",
        }
    }
}

/// A single piece of media evidence: a local file reference plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEvidence {
    /// Opaque local file reference.
    pub url: String,

    /// Type tag supplied by the picker.
    pub kind: MediaKind,
}

impl MediaEvidence {
    /// Creates a new piece of media evidence.
    #[must_use]
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}
