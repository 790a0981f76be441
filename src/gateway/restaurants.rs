//! External restaurant search, import and favorites.

use super::{query, NetworkGateway};
use crate::error::GastroResult;
use crate::models::{ExternalRestaurant, LocalRestaurant, Page, RestaurantFilter, RestaurantImport};
use crate::state::PagedList;
use crate::traits::Headers;

impl NetworkGateway {
    /// `GET /restaurantes/externos/buscar`. Public; empty filters are omitted.
    pub async fn search_restaurants(
        &self,
        filter: &RestaurantFilter,
        page: u32,
    ) -> GastroResult<Page<ExternalRestaurant>> {
        let mut pairs: Vec<(&str, String)> = filter
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        pairs.push(("page", page.to_string()));
        pairs.push(("size", PagedList::RestaurantSearch.page_size().to_string()));

        let url = self.url(&format!("/restaurantes/externos/buscar?{}", query(&pairs)));
        let response = Self::check(self.http.get(&url, &Headers::new()).await, &url)?;
        Self::decode(&response)
    }

    /// `POST /restaurantes/importar`. Creates or fetches the local record.
    pub async fn import_restaurant(&self, snapshot: &RestaurantImport) -> GastroResult<LocalRestaurant> {
        let body = serde_json::to_value(snapshot)?;
        let response = self.post_json("/restaurantes/importar", &body).await?;
        Self::decode(&response)
    }

    /// `GET /favoritos?page&size`.
    pub async fn favorites(&self, page: u32) -> GastroResult<Page<LocalRestaurant>> {
        let path = format!(
            "/favoritos?{}",
            query(&[
                ("page", page.to_string()),
                ("size", PagedList::Favorites.page_size().to_string())
            ])
        );
        self.get_json(&path).await
    }

    /// `POST /favoritos/{localId}`.
    pub async fn add_favorite(&self, local_id: i64) -> GastroResult<()> {
        self.post_empty(&format!("/favoritos/{}", local_id)).await?;
        Ok(())
    }

    /// `DELETE /favoritos/{localId}`.
    pub async fn remove_favorite(&self, local_id: i64) -> GastroResult<()> {
        self.delete(&format!("/favoritos/{}", local_id)).await?;
        Ok(())
    }
}
