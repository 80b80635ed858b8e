use serde::{Deserialize, Serialize};

use crate::ids::{ArtworkId, ArtworkSource};

/// List-view projection of an artwork.
///
/// Carries only the fields requested by the default search projection
/// (`id`, `title`, `date`, `artist`, `image_id`) so list payloads stay small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkSummary {
    pub id: ArtworkId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Opaque reference resolved by the upstream image service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

/// Full artwork record returned by `artworks/{source}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    pub source: ArtworkSource,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credit_line: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl Artwork {
    pub fn summary(&self) -> ArtworkSummary {
        ArtworkSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            artist: self.artist.clone(),
            image_id: self.image_id.clone(),
        }
    }
}
