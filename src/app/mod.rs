//! Application state and the view state machine.
//!
//! [`App`] is the single owner of every piece of client state: the active
//! [`View`], the loaded data, the forms, and the state-layer helpers. It is
//! driven in two directions:
//!
//! - [`App::dispatch`] applies an [`Action`] synchronously. Pure navigation
//!   happens immediately; anything that needs the backend is spawned as a
//!   task holding a clone of the gateway.
//! - [`App::handle_message`] applies the [`AppMessage`] each task sends
//!   back when it settles. Completions whose ticket went stale are dropped.
//!
//! Handlers are grouped by area: `account`, `profile`, `social`,
//! `restaurants`, `reviews`, plus `navigation` and `handlers` (message
//! routing).

mod account;
mod actions;
mod handlers;
mod messages;
mod navigation;
mod profile;
mod restaurants;
mod reviews;
mod social;
mod types;

pub use actions::Action;
pub use messages::AppMessage;
pub use types::{BackTarget, Overlay, UserList, View};

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{AuthError, GastroError};
use crate::gateway::NetworkGateway;
use crate::models::{
    ExternalRestaurant, LocalRestaurant, Page, Profile, PublicProfile, RestaurantFilter, Review,
    UserSummary,
};
use crate::startup::{AppConfig, StartupParams};
use crate::state::{
    FavoriteIndex, PagedList, PaginationController, ProfileEditForm, RequestTracker, ReviewForm,
    SearchDebouncer,
};

/// Application context.
pub struct App {
    /// Active view
    pub view: View,
    /// View recorded when a detail view was entered
    pub previous_view: View,
    /// Image-zoom overlay
    pub overlay: Overlay,
    /// Inline error for the active view
    pub error: Option<String>,
    /// Inline confirmation for the active view
    pub notice: Option<String>,

    /// Signed-in user's profile, replaced on every fetch
    pub profile: Option<Profile>,
    /// Another user's profile
    pub viewed_profile: Option<PublicProfile>,
    pub user_list: Option<UserList>,
    pub pending_requests: Vec<UserSummary>,
    /// Results of the debounced user lookup
    pub search_results: Vec<UserSummary>,

    pub restaurant_filter: RestaurantFilter,
    pub restaurant_results: Option<Page<ExternalRestaurant>>,
    pub favorites: Option<Page<LocalRestaurant>>,
    pub feed: Option<Page<Review>>,
    /// Restaurant shown in the detail view, always in external form
    pub selected_restaurant: Option<ExternalRestaurant>,
    pub selected_review: Option<Review>,

    pub review_form: ReviewForm,
    pub profile_form: ProfileEditForm,

    reset_token: Option<String>,
    signed_in: bool,
    favorite_index: FavoriteIndex,
    /// Keys with a toggle on the wire
    favorites_in_flight: HashSet<String>,
    debouncer: SearchDebouncer,
    pagination: PaginationController,
    tracker: RequestTracker,

    gateway: Arc<NetworkGateway>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    /// Spawned tasks whose message has not been handled yet
    in_flight: usize,
}

impl App {
    /// Create an app on the welcome view.
    pub fn new(gateway: Arc<NetworkGateway>, config: &AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            view: View::Welcome,
            previous_view: View::Welcome,
            overlay: Overlay::default(),
            error: None,
            notice: None,
            profile: None,
            viewed_profile: None,
            user_list: None,
            pending_requests: Vec::new(),
            search_results: Vec::new(),
            restaurant_filter: RestaurantFilter::default(),
            restaurant_results: None,
            favorites: None,
            feed: None,
            selected_restaurant: None,
            selected_review: None,
            review_form: ReviewForm::default(),
            profile_form: ProfileEditForm::default(),
            reset_token: None,
            signed_in: false,
            favorite_index: FavoriteIndex::new(),
            favorites_in_flight: HashSet::new(),
            debouncer: SearchDebouncer::new(config.search_debounce),
            pagination: PaginationController::new(),
            tracker: RequestTracker::new(),
            gateway,
            message_tx,
            message_rx,
            in_flight: 0,
        }
    }

    /// Apply the startup parameters. A reset link opens the reset view.
    pub fn with_startup(mut self, params: StartupParams) -> Self {
        if let Some(token) = params.reset_token {
            tracing::info!("Started from a password-reset link");
            self.reset_token = Some(token);
            self.view = View::ResetPassword;
        }
        self
    }

    pub fn gateway(&self) -> &Arc<NetworkGateway> {
        &self.gateway
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    pub fn has_reset_token(&self) -> bool {
        self.reset_token.is_some()
    }

    pub fn favorite_index(&self) -> &FavoriteIndex {
        &self.favorite_index
    }

    /// Whether `restaurant` is among the user's favorites.
    pub fn is_favorite(&self, restaurant: &ExternalRestaurant) -> bool {
        self.favorite_index.contains(&restaurant.favorite_key())
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    /// Current text of the user-search box.
    pub fn search_query(&self) -> &str {
        self.debouncer.query()
    }

    /// Number of spawned tasks not yet handled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply a user action.
    pub fn dispatch(&mut self, action: Action) {
        if action.clears_feedback() {
            self.error = None;
            self.notice = None;
        }
        if action.requires_session() && !self.signed_in {
            warn!("Ignoring action on {}: not signed in", self.view);
            self.error = Some(AuthError::NotAuthenticated.user_message());
            return;
        }

        match action {
            Action::Continue => self.navigate(View::Options),
            Action::ResumeSession => self.resume_session(),
            Action::ShowLogin => self.navigate(View::Login),
            Action::ShowRegister => self.navigate(View::Register),
            Action::ShowForgotPassword => self.navigate(View::ForgotPassword),
            Action::Login(form) => self.login(form),
            Action::Register(form) => self.register(form),
            Action::ForgotPassword { email } => self.forgot_password(email),
            Action::ResetPassword(form) => self.reset_password(form),
            Action::Logout => self.logout(),
            Action::DeleteAccount => self.delete_account(),

            Action::Back => self.back(),
            Action::GoHome => self.go_home(),
            Action::ShowMenu => self.navigate(View::Menu),
            Action::ShowImage(url) => self.show_image(&url),
            Action::HideImage => self.overlay.hide(),

            Action::ShowEditProfile => self.show_edit_profile(),
            Action::SaveProfile(form) => self.save_profile(form),

            Action::ShowUserSearch => self.show_user_search(),
            Action::SearchInput(text) => self.search_input(&text),
            Action::OpenUserProfile(username) => self.open_user_profile(username),
            Action::Follow => self.change_follow(true),
            Action::Unfollow => self.change_follow(false),
            Action::ShowRequests => self.show_requests(),
            Action::AcceptRequest(username) => self.answer_request(username, true),
            Action::RejectRequest(username) => self.answer_request(username, false),
            Action::ShowRelations { list, owner } => self.show_relations(list, owner),
            Action::RemoveFollower(username) => self.remove_follower(username),

            Action::ShowRestaurantFilter => self.navigate(View::RestaurantFilter),
            Action::SearchRestaurants(filter) => self.search_restaurants(filter),
            Action::RestaurantPage(direction) => {
                self.step_page(PagedList::RestaurantSearch, direction)
            }
            Action::OpenRestaurant(restaurant) => self.open_restaurant(restaurant),
            Action::ToggleFavorite(restaurant) => self.toggle_favorite(restaurant),
            Action::ShowFavorites => self.load_favorites(0),
            Action::FavoritesPage(direction) => self.step_page(PagedList::Favorites, direction),

            Action::StartReview => self.start_review(),
            Action::SetRating(rating) => self.review_form.rating = rating,
            Action::SetReviewComment(comment) => self.review_form.comment = comment,
            Action::AddReviewPhotos(photos) => self.review_form.add_photos(photos),
            Action::SubmitReview => self.submit_review(),
            Action::OpenReview(review) => self.open_review(review),
            Action::DeleteReview => self.delete_review(),
            Action::ShowFeed => self.load_feed(0),
            Action::FeedPage(direction) => self.step_page(PagedList::Feed, direction),
            Action::GoToPage { list, index } => self.go_to_page(list, index),
        }
    }

    /// Handle completions until no spawned task is outstanding.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.message_rx.recv().await {
                Some(msg) => self.handle_message(msg),
                None => break,
            }
        }
    }

    /// Handle every completion that has already arrived, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.message_rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }

    /// Run `task` in the background; its message comes back through the
    /// app's channel.
    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = task.await;
            let _ = tx.send(msg);
        });
    }

    /// Surface a failed operation inline and log its detail.
    fn fail(&mut self, operation: &str, err: &GastroError) {
        warn!("{} failed [{}]: {}", operation, err.error_code(), err);
        if let Some(ctx) = err.context() {
            debug!("Failure context: {}", ctx.to_log_string());
        }
        self.error = Some(err.user_message());
        if err.requires_reauth() && self.signed_in {
            warn!("Session rejected by the server; signing out");
            self.end_session();
        }
    }

    /// Drop everything that belongs to the signed-in user.
    fn reset_session_state(&mut self) {
        self.tracker.end_session();
        self.signed_in = false;
        self.profile = None;
        self.viewed_profile = None;
        self.user_list = None;
        self.pending_requests.clear();
        self.search_results.clear();
        self.restaurant_filter = RestaurantFilter::default();
        self.restaurant_results = None;
        self.favorites = None;
        self.feed = None;
        self.selected_restaurant = None;
        self.selected_review = None;
        self.review_form = ReviewForm::default();
        self.profile_form = ProfileEditForm::default();
        self.favorite_index.clear();
        self.favorites_in_flight.clear();
        self.debouncer.reset();
        self.pagination.clear();
        self.overlay.hide();
        self.previous_view = View::Welcome;
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("view", &self.view)
            .field("previous_view", &self.previous_view)
            .field("signed_in", &self.signed_in)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
