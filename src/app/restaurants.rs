//! Restaurant search, the detail view and favorites.

use std::sync::Arc;

use tracing::{debug, info};

use super::{App, AppMessage, View};
use crate::error::{GastroError, GastroResult};
use crate::models::{ExternalRestaurant, LocalRestaurant, Page, RestaurantFilter};
use crate::state::{
    FavoriteOutcome, FavoriteReconciler, PagedList, RequestScope, RestaurantRef,
};

impl App {
    /// New search: always starts at the first page.
    pub(super) fn search_restaurants(&mut self, filter: RestaurantFilter) {
        self.restaurant_filter = filter;
        self.pagination.forget(PagedList::RestaurantSearch);
        self.load_restaurants(0);
    }

    pub(super) fn load_restaurants(&mut self, page: u32) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        let filter = self.restaurant_filter.clone();
        self.spawn(async move {
            AppMessage::RestaurantsLoaded {
                ticket,
                result: gateway.search_restaurants(&filter, page).await,
            }
        });
    }

    pub(super) fn apply_restaurants_loaded(&mut self, result: GastroResult<Page<ExternalRestaurant>>) {
        match result {
            Ok(page) => {
                info!(
                    "Restaurant search page {} of {} ({} results)",
                    page.number + 1,
                    page.total_pages.max(1),
                    page.content.len()
                );
                self.pagination.record(PagedList::RestaurantSearch, &page);
                self.restaurant_results = Some(page);
                self.enter(View::RestaurantResults);
            }
            Err(err) => self.fail("search_restaurants", &err),
        }
    }

    /// Open the detail view. Favorites are projected to their external
    /// form first so the view, favoriting and reviewing work the same way.
    pub(super) fn open_restaurant(&mut self, restaurant: RestaurantRef) {
        let external = match restaurant {
            RestaurantRef::External(ext) => ext,
            RestaurantRef::Local(local) => match local.to_external() {
                Some(ext) => ext,
                None => {
                    self.fail(
                        "open_restaurant",
                        &GastroError::client("This restaurant has no map reference."),
                    );
                    return;
                }
            },
        };
        self.selected_restaurant = Some(external);
        self.enter_detail(View::RestaurantDetail);
    }

    /// Flip the favorite state of `restaurant`. The index changes only once
    /// the backend confirms.
    pub(super) fn toggle_favorite(&mut self, restaurant: RestaurantRef) {
        let plan = match FavoriteReconciler::plan(
            &self.favorite_index,
            &restaurant,
            &self.restaurant_filter.city,
        ) {
            Ok(plan) => plan,
            Err(err) => {
                self.fail("toggle_favorite", &err);
                return;
            }
        };

        let key = plan.key().to_string();
        if !self.favorites_in_flight.insert(key.clone()) {
            debug!("Favorite toggle for {} already in flight", key);
            return;
        }

        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::FavoriteToggled {
                ticket,
                key,
                result: FavoriteReconciler::execute(&gateway, plan).await,
            }
        });
    }

    pub(super) fn apply_favorite_toggled(&mut self, key: String, result: GastroResult<FavoriteOutcome>) {
        self.favorites_in_flight.remove(&key);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.fail("toggle_favorite", &err);
                return;
            }
        };
        self.favorite_index.apply(&outcome);

        match outcome {
            FavoriteOutcome::Favorited { .. } => {
                self.notice = Some("Added to favorites.".to_string());
            }
            FavoriteOutcome::Unfavorited { key, local_id } => {
                if let Some(favorites) = self.favorites.as_mut() {
                    favorites.remove_where(|r| {
                        r.id == local_id || r.favorite_key().as_deref() == Some(key.as_str())
                    });
                }
                self.notice = Some("Removed from favorites.".to_string());
            }
        }
    }

    pub(super) fn load_favorites(&mut self, page: u32) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::FavoritesLoaded {
                ticket,
                result: gateway.favorites(page).await,
            }
        });
    }

    /// Every loaded page teaches the favorite index its mappings.
    pub(super) fn apply_favorites_loaded(&mut self, result: GastroResult<Page<LocalRestaurant>>) {
        match result {
            Ok(page) => {
                self.favorite_index.absorb_page(&page.content);
                self.pagination.record(PagedList::Favorites, &page);
                self.favorites = Some(page);
                self.enter(View::FavoritesList);
            }
            Err(err) => {
                self.fail("favorites", &err);
                if self.signed_in {
                    self.go_home();
                }
            }
        }
    }
}
