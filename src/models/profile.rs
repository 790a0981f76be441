use serde::{Deserialize, Serialize};

use super::review::Review;
use super::{deserialize_nullable_string, deserialize_nullable_vec};

/// The signed-in user's own profile (`GET /perfil/me`).
///
/// Replaced wholesale on every fetch. The only in-place edits are the
/// explicit ones in the app layer (dropping a deleted review).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "nombreUsuario", default, deserialize_with = "deserialize_nullable_string")]
    pub username: String,
    /// Not every backend version includes it.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "fotoPerfilUrl", default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "seguidosCount", default)]
    pub following_count: u32,
    #[serde(rename = "seguidoresCount", default)]
    pub followers_count: u32,
    #[serde(rename = "solicitudesPendientesCount", default)]
    pub pending_requests_count: u32,
    #[serde(rename = "valoraciones", default, deserialize_with = "deserialize_nullable_vec")]
    pub reviews: Vec<Review>,
}

impl Profile {
    /// Drop the user's review of the restaurant with `restaurant_id`.
    pub fn remove_review(&mut self, restaurant_id: i64) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.restaurant_id() != Some(restaurant_id));
        self.reviews.len() != before
    }
}

/// Follow relationship between the current user and a viewed profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RelationshipStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "ACEPTADO")]
    Accepted,
}

/// Another user's profile (`GET /usuarios/{username}/perfil`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(rename = "nombreUsuario", default, deserialize_with = "deserialize_nullable_string")]
    pub username: String,
    #[serde(rename = "fotoPerfilUrl", default)]
    pub avatar_url: Option<String>,
    #[serde(default, alias = "private")]
    pub is_private: bool,
    /// `None` when there is no relation at all.
    #[serde(default)]
    pub relationship_status: Option<RelationshipStatus>,
    #[serde(rename = "seguidosCount", default)]
    pub following_count: Option<u32>,
    #[serde(rename = "seguidoresCount", default)]
    pub followers_count: Option<u32>,
    #[serde(rename = "valoraciones", default, deserialize_with = "deserialize_nullable_vec")]
    pub reviews: Vec<Review>,
}

impl PublicProfile {
    /// A private profile whose owner has not accepted us hides its content.
    pub fn is_content_visible(&self) -> bool {
        !self.is_private || self.relationship_status == Some(RelationshipStatus::Accepted)
    }
}

/// Minimal user reference used by search results and relation lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    #[serde(rename = "nombreUsuario", default, deserialize_with = "deserialize_nullable_string")]
    pub username: String,
    #[serde(rename = "fotoPerfilUrl", default)]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar_url: None,
        }
    }
}
