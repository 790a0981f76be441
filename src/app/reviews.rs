//! Writing, reading and deleting reviews, and the social feed.

use std::sync::Arc;

use tracing::{info, warn};

use super::{App, AppMessage, View};
use crate::error::{GastroError, GastroResult, ValidationError};
use crate::models::{Page, Review};
use crate::state::{PagedList, RequestScope, ReviewForm};

impl App {
    pub(super) fn start_review(&mut self) {
        if self.selected_restaurant.is_none() {
            self.fail("start_review", &ValidationError::NoRestaurantSelected.into());
            return;
        }
        self.review_form = ReviewForm::default();
        self.navigate(View::CreateReview);
    }

    /// Upload the review for the selected restaurant. The rating is checked
    /// locally; nothing is sent without one.
    pub(super) fn submit_review(&mut self) {
        let Some(restaurant) = &self.selected_restaurant else {
            self.fail("submit_review", &ValidationError::NoRestaurantSelected.into());
            return;
        };
        let draft = match self.review_form.draft(restaurant, &self.restaurant_filter.city) {
            Ok(draft) => draft,
            Err(err) => {
                self.fail("submit_review", &err.into());
                return;
            }
        };
        let Some(username) = self.profile.as_ref().map(|p| p.username.clone()) else {
            self.fail(
                "submit_review",
                &GastroError::client("Your profile is still loading. Try again in a moment."),
            );
            return;
        };

        info!(
            "Submitting {}-star review of '{}' with {} photo(s)",
            draft.rating,
            draft.restaurant_name,
            self.review_form.photos.len()
        );
        let photos = self.review_form.photos.clone();
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::ReviewSubmitted {
                ticket,
                result: gateway.submit_review(&username, &draft, &photos).await,
            }
        });
    }

    /// Success leaves the detail view for wherever it was entered from.
    /// Server rejections carry a readable reason; it is shown as-is.
    pub(super) fn apply_review_submitted(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => {
                self.review_form = ReviewForm::default();
                self.notice = Some("Review published.".to_string());
                self.navigate(self.previous_view);
            }
            Err(err) => {
                let reason = err.server_message().map(str::to_string);
                self.fail("submit_review", &err);
                if let Some(reason) = reason {
                    self.error = Some(reason);
                }
            }
        }
    }

    pub(super) fn open_review(&mut self, review: Review) {
        self.selected_review = Some(review);
        self.enter_detail(View::ReviewDetail);
    }

    pub(super) fn delete_review(&mut self) {
        let Some(restaurant_id) = self.selected_review.as_ref().and_then(Review::restaurant_id)
        else {
            self.fail(
                "delete_review",
                &GastroError::client("This review cannot be deleted."),
            );
            return;
        };
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::ReviewDeleted {
                ticket,
                restaurant_id,
                result: gateway.delete_review(restaurant_id).await,
            }
        });
    }

    /// The review is dropped from every loaded list without refetching.
    pub(super) fn apply_review_deleted(&mut self, restaurant_id: i64, result: GastroResult<()>) {
        if let Err(err) = result {
            self.fail("delete_review", &err);
            return;
        }
        if let Some(profile) = self.profile.as_mut() {
            if !profile.remove_review(restaurant_id) {
                warn!("Deleted review {} was not on the profile", restaurant_id);
            }
        }
        if let Some(feed) = self.feed.as_mut() {
            feed.remove_where(|r| r.restaurant_id() == Some(restaurant_id));
        }
        self.selected_review = None;
        self.notice = Some("Review deleted.".to_string());
        self.navigate(self.previous_view);
    }

    pub(super) fn load_feed(&mut self, page: u32) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::FeedLoaded {
                ticket,
                result: gateway.feed(page).await,
            }
        });
    }

    pub(super) fn apply_feed_loaded(&mut self, result: GastroResult<Page<Review>>) {
        match result {
            Ok(page) => {
                self.pagination.record(PagedList::Feed, &page);
                self.feed = Some(page);
                self.enter(View::Feed);
            }
            Err(err) => self.fail("feed", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Action;
    use super::*;
    use crate::adapters::MockResponse;
    use crate::gateway::test_support::url;
    use crate::models::{ExternalRestaurant, LocalRestaurant, PhotoUpload};
    use crate::state::PageDirection;
    use serde_json::json;

    fn review_of(id: i64, name: &str) -> Review {
        Review {
            restaurant: Some(LocalRestaurant {
                id,
                name: name.to_string(),
                ..Default::default()
            }),
            rating: 4,
            author: "ana".to_string(),
            ..Default::default()
        }
    }

    async fn detail_app() -> (App, crate::adapters::MockHttpClient) {
        let (mut app, http) = home_app().await;
        app.view = View::RestaurantResults;
        app.dispatch(Action::OpenRestaurant(crate::state::RestaurantRef::External(
            ExternalRestaurant::new(42)
                .with_tag("name", "Casa Pepe")
                .with_tag("addr:city", "Madrid"),
        )));
        app.dispatch(Action::StartReview);
        (app, http)
    }

    #[tokio::test]
    async fn test_rating_zero_is_rejected_locally() {
        let (mut app, http) = detail_app().await;
        app.dispatch(Action::SetReviewComment("Rico".to_string()));

        app.dispatch(Action::SubmitReview);
        app.settle().await;

        assert_eq!(app.view, View::CreateReview);
        assert_eq!(
            app.error.as_deref(),
            Some(
                ValidationError::RatingOutOfRange { rating: 0 }
                    .user_message()
                    .as_str()
            )
        );
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_sends_draft_and_photos() {
        let (mut app, http) = detail_app().await;
        http.set_response(
            "POST",
            &url("/valoraciones/usuario/ana"),
            MockResponse::status(201),
        );
        app.dispatch(Action::SetRating(5));
        app.dispatch(Action::SetReviewComment("Rico".to_string()));
        app.dispatch(Action::AddReviewPhotos(vec![PhotoUpload::new(
            "a.jpg",
            vec![1u8, 2, 3],
        )]));
        app.dispatch(Action::AddReviewPhotos(vec![PhotoUpload::new(
            "b.jpg",
            vec![4u8],
        )]));

        app.dispatch(Action::SubmitReview);
        app.settle().await;

        assert_eq!(app.view, View::RestaurantResults);
        assert_eq!(app.review_form, ReviewForm::default());
        let requests = http.requests_to("POST", "/valoraciones/usuario/ana");
        assert_eq!(requests.len(), 1);
        let form = requests[0].form.clone().unwrap_or_default();
        assert_eq!(form.parts_named("files").count(), 2);
        assert_eq!(form.parts_named("valoracion").count(), 1);
    }

    #[tokio::test]
    async fn test_server_rejection_reason_is_shown() {
        let (mut app, http) = detail_app().await;
        http.set_response(
            "POST",
            &url("/valoraciones/usuario/ana"),
            MockResponse::text(400, r#"{"message": "Ya has valorado este restaurante"}"#),
        );
        app.dispatch(Action::SetRating(3));

        app.dispatch(Action::SubmitReview);
        app.settle().await;

        assert_eq!(app.view, View::CreateReview);
        assert_eq!(
            app.error.as_deref(),
            Some("Ya has valorado este restaurante")
        );
    }

    #[tokio::test]
    async fn test_delete_review_patches_loaded_lists() {
        let (mut app, http) = home_app().await;
        http.set_response("DELETE", &url("/valoraciones/7"), MockResponse::status(204));
        if let Some(profile) = app.profile.as_mut() {
            profile.reviews = vec![review_of(7, "Casa Pepe"), review_of(8, "Bar Sur")];
        }
        app.feed = Some(Page {
            content: vec![review_of(7, "Casa Pepe")],
            total_elements: 1,
            ..Page::empty()
        });

        app.dispatch(Action::OpenReview(review_of(7, "Casa Pepe")));
        assert_eq!(app.view, View::ReviewDetail);
        app.dispatch(Action::DeleteReview);
        app.settle().await;

        assert_eq!(app.view, View::Home);
        assert!(app.selected_review.is_none());
        let remaining: Vec<Option<i64>> = app
            .profile
            .as_ref()
            .map(|p| p.reviews.iter().map(Review::restaurant_id).collect())
            .unwrap_or_default();
        assert_eq!(remaining, vec![Some(8)]);
        assert_eq!(app.feed.as_ref().map(|f| f.total_elements), Some(0));
        assert!(http.requests_to("GET", "/perfil/me").is_empty());
    }

    #[tokio::test]
    async fn test_feed_paging_follows_server_flags() {
        let (mut app, http) = home_app().await;
        http.queue_response(
            "GET",
            &url("/valoraciones/feed"),
            MockResponse::json(json!({
                "content": [{"puntuacion": 5, "nombreUsuario": "luis"}],
                "number": 0, "size": 10, "totalPages": 2, "totalElements": 11,
                "first": true, "last": false
            })),
        );
        http.queue_response(
            "GET",
            &url("/valoraciones/feed"),
            MockResponse::json(json!({
                "content": [{"puntuacion": 2, "nombreUsuario": "eva"}],
                "number": 1, "size": 10, "totalPages": 2, "totalElements": 11,
                "first": false, "last": true
            })),
        );

        app.dispatch(Action::ShowFeed);
        app.settle().await;
        assert_eq!(app.view, View::Feed);

        app.dispatch(Action::FeedPage(PageDirection::Next));
        app.settle().await;
        assert_eq!(app.feed.as_ref().map(|f| f.number), Some(1));

        app.dispatch(Action::FeedPage(PageDirection::Next));
        app.settle().await;
        assert!(app.error.is_some());
        let feed_requests = http.requests_to("GET", "/valoraciones/feed");
        assert_eq!(feed_requests.len(), 2);
        assert!(feed_requests[1].url.contains("page=1"));
    }

    #[tokio::test]
    async fn test_jump_to_a_feed_page() {
        let (mut app, http) = home_app().await;
        http.queue_response(
            "GET",
            &url("/valoraciones/feed"),
            MockResponse::json(json!({
                "content": [], "number": 0, "size": 10, "totalPages": 3,
                "totalElements": 25, "first": true, "last": false
            })),
        );
        http.queue_response(
            "GET",
            &url("/valoraciones/feed"),
            MockResponse::json(json!({
                "content": [], "number": 2, "size": 10, "totalPages": 3,
                "totalElements": 25, "first": false, "last": true
            })),
        );

        app.dispatch(Action::ShowFeed);
        app.settle().await;
        app.dispatch(Action::GoToPage {
            list: PagedList::Feed,
            index: 2,
        });
        app.settle().await;
        assert_eq!(app.feed.as_ref().map(|f| f.number), Some(2));

        app.dispatch(Action::GoToPage {
            list: PagedList::Feed,
            index: 3,
        });
        app.settle().await;
        assert!(app.error.is_some());

        let feed_requests = http.requests_to("GET", "/valoraciones/feed");
        assert_eq!(feed_requests.len(), 2);
        assert!(feed_requests[1].url.contains("page=2"));
        assert!(feed_requests[1].url.contains("size=10"));
    }
}
