use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::restaurant::LocalRestaurant;
use super::{deserialize_nullable_string, deserialize_nullable_vec};

/// A user's review of a persisted restaurant (`ValoracionDTO`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(rename = "restaurante", default)]
    pub restaurant: Option<LocalRestaurant>,
    #[serde(rename = "puntuacion", default)]
    pub rating: u8,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
    #[serde(rename = "nombreUsuario", default, deserialize_with = "deserialize_nullable_string")]
    pub author: String,
    #[serde(rename = "fotos", default, deserialize_with = "deserialize_nullable_vec")]
    pub photos: Vec<String>,
}

impl Review {
    /// Local id of the reviewed restaurant; reviews are addressed by it.
    pub fn restaurant_id(&self) -> Option<i64> {
        self.restaurant.as_ref().map(|r| r.id)
    }

    pub fn restaurant_name(&self) -> &str {
        self.restaurant
            .as_ref()
            .map(|r| r.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(super::DEFAULT_RESTAURANT_NAME)
    }
}

/// JSON carried in the `valoracion` multipart part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewDraft {
    #[serde(rename = "nombreRestaurante")]
    pub restaurant_name: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "puntuacion")]
    pub rating: u8,
    #[serde(rename = "comentario")]
    pub comment: String,
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
