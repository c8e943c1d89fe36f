//! Records returned by the branding service.
//!
//! Deserialization structs matching the service's JSON responses. Records are
//! never mutated client-side: the client requests transitions and refetches.

use serde::{Deserialize, Deserializer, Serialize};

/// Authenticated GitHub user as reported by `GET /session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub banned: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(id: i64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            avatar_url: None,
            is_admin: None,
            is_staff: None,
            verified: None,
            banned: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// A record without a login handle is not a usable identity.
    pub fn is_valid(&self) -> bool {
        !self.login.trim().is_empty()
    }

    pub const fn is_admin(&self) -> bool {
        matches!(self.is_admin, Some(true))
    }

    pub const fn is_staff(&self) -> bool {
        matches!(self.is_staff, Some(true))
    }

    pub const fn is_verified(&self) -> bool {
        matches!(self.verified, Some(true))
    }

    pub const fn is_banned(&self) -> bool {
        matches!(self.banned, Some(true))
    }
}

/// A submitted branding image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandImage {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pending: Option<bool>,
}

impl BrandImage {
    /// Anything not explicitly pending counts as approved.
    pub const fn is_pending(&self) -> bool {
        matches!(self.pending, Some(true))
    }

    pub const fn status_label(&self) -> &'static str {
        match self.pending {
            Some(true) => "pending",
            _ => "approved",
        }
    }
}

/// A pending image together with its submitter's login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingImage {
    #[serde(flatten)]
    pub image: BrandImage,
    #[serde(default)]
    pub login: Option<String>,
}

impl PendingImage {
    pub fn submitter(&self) -> &str {
        self.login.as_deref().unwrap_or("unknown")
    }
}

/// Accept ids encoded either as JSON numbers or strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(u64),
        Signed(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
