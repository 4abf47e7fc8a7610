//! Documents read from the content store.
//!
//! Field names follow the projections built in `data::content_query`, so the
//! JSON returned by the store deserializes straight into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DomainError;

pub(crate) const MAX_PROJECT_IMAGES: usize = 10;

/// One node of a rich-text body (paragraph, heading, image, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Block {
    #[serde(rename = "_type")]
    pub(crate) kind: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub(crate) key: Option<String>,
    #[serde(flatten)]
    pub(crate) fields: Map<String, Value>,
}

pub(crate) type BlockContent = Vec<Block>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ImageRef {
    #[serde(rename = "assetRef", default, skip_serializing_if = "Option::is_none")]
    pub(crate) asset_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Category {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) slug: String,
    #[serde(default)]
    pub(crate) order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Post {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) slug: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) body: Option<BlockContent>,
    #[serde(rename = "mainImage", default)]
    pub(crate) main_image: Option<ImageRef>,
    #[serde(default)]
    pub(crate) author: Option<Author>,
    #[serde(default, deserialize_with = "present_items")]
    pub(crate) categories: Vec<Category>,
    #[serde(rename = "publishedAt")]
    pub(crate) published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Project {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) slug: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) body: Option<BlockContent>,
    #[serde(default, deserialize_with = "present_items")]
    pub(crate) images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "present_items")]
    pub(crate) categories: Vec<Category>,
    #[serde(rename = "publishedAt")]
    pub(crate) published_at: DateTime<Utc>,
    #[serde(rename = "_createdAt")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl Project {
    /// Gallery must hold between one and ten images.
    pub(crate) fn check_gallery(self) -> Result<Self, DomainError> {
        if self.images.is_empty() || self.images.len() > MAX_PROJECT_IMAGES {
            return Err(DomainError::Validation {
                field: "images",
                message: "must contain 1..10 images",
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WorkplacePolicy {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(rename = "mainImage", default)]
    pub(crate) main_image: Option<ImageRef>,
    #[serde(default)]
    pub(crate) body: Option<BlockContent>,
}

/// A missing array reads as empty; dangling references (`null` entries) are dropped.
fn present_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}
