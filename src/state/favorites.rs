//! Favorite state across the two restaurant identities.
//!
//! A restaurant found through the map provider is known by its external id;
//! once imported the backend gives it a local id, and favorite relations are
//! addressed by that local id. [`FavoriteIndex`] maps one to the other and
//! is the only answer to "is this favorited". [`FavoriteReconciler`] drives
//! the favorite/unfavorite protocol and is the only writer of the index.

use std::collections::HashMap;

use crate::error::{ErrorContext, GastroError, GastroResult, ResultExt};
use crate::gateway::NetworkGateway;
use crate::models::{ExternalRestaurant, LocalRestaurant, RestaurantImport};

/// External-id key → local id.
///
/// A key is present exactly when the user favorites that restaurant.
/// Built lazily from favorites-list pages and updated only after the
/// backend confirms a toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteIndex {
    entries: HashMap<String, i64>,
}

impl FavoriteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn local_id(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Learn the mapping of every entry on a favorites page.
    ///
    /// Entries without an external id cannot be keyed and are skipped.
    pub fn absorb_page(&mut self, favorites: &[LocalRestaurant]) {
        for restaurant in favorites {
            if let Some(key) = restaurant.favorite_key() {
                self.entries.insert(key, restaurant.id);
            }
        }
    }

    /// Record a confirmed toggle.
    pub fn apply(&mut self, outcome: &FavoriteOutcome) {
        match outcome {
            FavoriteOutcome::Favorited { key, local_id } => {
                self.entries.insert(key.clone(), *local_id);
            }
            FavoriteOutcome::Unfavorited { key, .. } => {
                self.entries.remove(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A restaurant of either identity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantRef {
    External(ExternalRestaurant),
    Local(LocalRestaurant),
}

impl RestaurantRef {
    /// Favorites-index key; local records recover it from their external id.
    pub fn favorite_key(&self) -> Option<String> {
        match self {
            RestaurantRef::External(r) => Some(r.favorite_key()),
            RestaurantRef::Local(r) => r.favorite_key(),
        }
    }
}

/// Network work needed to flip a restaurant's favorite state.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritePlan {
    /// Already favorited: delete the relation by local id.
    Unfavorite { key: String, local_id: i64 },
    /// Not favorited: import the snapshot, then favorite the returned id.
    Favorite {
        key: String,
        import: RestaurantImport,
    },
}

impl FavoritePlan {
    pub fn key(&self) -> &str {
        match self {
            FavoritePlan::Unfavorite { key, .. } | FavoritePlan::Favorite { key, .. } => key,
        }
    }
}

/// Confirmed result of an executed plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Favorited { key: String, local_id: i64 },
    Unfavorited { key: String, local_id: i64 },
}

pub struct FavoriteReconciler;

impl FavoriteReconciler {
    /// Decide what a toggle must do. No I/O.
    ///
    /// Favoriting needs an external-kind restaurant to import; a local
    /// record that is not already in the index is rejected here, before
    /// any request.
    pub fn plan(
        index: &FavoriteIndex,
        restaurant: &RestaurantRef,
        city_fallback: &str,
    ) -> GastroResult<FavoritePlan> {
        let key = restaurant.favorite_key().ok_or_else(|| {
            GastroError::client("restaurant has no external id; it cannot be favorited")
        })?;

        if let Some(local_id) = index.local_id(&key) {
            return Ok(FavoritePlan::Unfavorite { key, local_id });
        }

        match restaurant {
            RestaurantRef::External(ext) => Ok(FavoritePlan::Favorite {
                key,
                import: RestaurantImport::from_external(ext, city_fallback),
            }),
            RestaurantRef::Local(_) => Err(GastroError::client(
                "only restaurants from a search can be added to favorites",
            )),
        }
    }

    /// Run a plan against the backend. Steps run strictly in order and the
    /// first failure aborts the rest.
    pub async fn execute(gateway: &NetworkGateway, plan: FavoritePlan) -> GastroResult<FavoriteOutcome> {
        match plan {
            FavoritePlan::Unfavorite { key, local_id } => {
                gateway
                    .remove_favorite(local_id)
                    .await
                    .with_context(|| {
                        ErrorContext::new("unfavorite")
                            .with_component("reconciler")
                            .with_endpoint(format!("/favoritos/{}", local_id))
                    })?;
                tracing::info!("Unfavorited restaurant {} (local id {})", key, local_id);
                Ok(FavoriteOutcome::Unfavorited { key, local_id })
            }
            FavoritePlan::Favorite { key, import } => {
                let local = gateway
                    .import_restaurant(&import)
                    .await
                    .with_context(|| {
                        ErrorContext::new("import_restaurant")
                            .with_component("reconciler")
                            .with_endpoint("/restaurantes/importar")
                    })?;
                gateway
                    .add_favorite(local.id)
                    .await
                    .with_context(|| {
                        ErrorContext::new("favorite")
                            .with_component("reconciler")
                            .with_endpoint(format!("/favoritos/{}", local.id))
                    })?;
                tracing::info!(
                    "Favorited '{}' ({} -> local id {})",
                    import.name,
                    key,
                    local.id
                );
                Ok(FavoriteOutcome::Favorited {
                    key,
                    local_id: local.id,
                })
            }
        }
    }

    /// Plan, execute and record in one go. The index is only touched on
    /// success.
    pub async fn toggle(
        index: &mut FavoriteIndex,
        gateway: &NetworkGateway,
        restaurant: &RestaurantRef,
        city_fallback: &str,
    ) -> GastroResult<FavoriteOutcome> {
        let plan = Self::plan(index, restaurant, city_fallback)?;
        let outcome = Self::execute(gateway, plan).await?;
        index.apply(&outcome);
        Ok(outcome)
    }
}
