//! Pet records as reported by the inventory service.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a pet by the inventory service.
pub type PetId = i64;

/// The single status value that makes a pet purchasable.
pub const AVAILABLE: &str = "available";

/// A pet in the inventory.
///
/// Only [`Pet::id`] and [`Pet::status`] drive purchasing; the remaining
/// fields are carried through so callers can inspect what they bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Open-ended status string; absent means "unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Pet {
    /// Creates a pet with the given id and status and no other attributes.
    pub fn new(id: PetId, status: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            category: None,
            photo_urls: Vec::new(),
            tags: Vec::new(),
            status: Some(status.into()),
        }
    }

    /// True iff the status is exactly `"available"` (case-sensitive, untrimmed).
    pub fn is_available(&self) -> bool {
        self.status.as_deref() == Some(AVAILABLE)
    }
}
