//! Review submission, deletion and the social feed.

use super::{query, segment, NetworkGateway};
use crate::error::GastroResult;
use crate::models::{Page, PhotoUpload, Review, ReviewDraft};
use crate::state::PagedList;
use crate::traits::{Method, MultipartForm};

impl NetworkGateway {
    /// `POST /valoraciones/usuario/{username}` as multipart: the draft as
    /// JSON in `valoracion`, then one `files` part per photo.
    pub async fn submit_review(
        &self,
        username: &str,
        draft: &ReviewDraft,
        photos: &[PhotoUpload],
    ) -> GastroResult<()> {
        let url = self.url(&format!("/valoraciones/usuario/{}", segment(username)));
        let headers = self.auth_headers().await?;

        let mut form = MultipartForm::new().text("valoracion", serde_json::to_string(draft)?);
        for photo in photos {
            form = form.file(
                "files",
                photo.file_name.clone(),
                photo.content_type.clone(),
                photo.bytes.clone(),
            );
        }

        Self::check(
            self.http
                .send_multipart(Method::Post, &url, form, &headers)
                .await,
            &url,
        )?;
        Ok(())
    }

    /// `DELETE /valoraciones/{restaurantLocalId}`.
    pub async fn delete_review(&self, restaurant_id: i64) -> GastroResult<()> {
        self.delete(&format!("/valoraciones/{}", restaurant_id)).await?;
        Ok(())
    }

    /// `GET /valoraciones/feed?page&size`.
    pub async fn feed(&self, page: u32) -> GastroResult<Page<Review>> {
        let path = format!(
            "/valoraciones/feed?{}",
            query(&[
                ("page", page.to_string()),
                ("size", PagedList::Feed.page_size().to_string())
            ])
        );
        self.get_json(&path).await
    }
}
