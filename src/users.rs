//! Users

use serde::{Deserialize, Serialize};

/// A contributor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional avatar image reference.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Number of submissions this user has contributed.
    #[serde(default)]
    pub submission_count: u32,

    /// Total upvotes received across this user's submissions.
    #[serde(default)]
    pub upvotes_received: u32,
}

/// The authenticated identity acting on the store.
///
/// Mutators that stamp or compare user identity take this explicitly; real
/// multi-user semantics live with an external identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional avatar image reference.
    pub avatar: Option<String>,
}

impl Identity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}
