//! Message routing for completions sent back by spawned tasks.

use tracing::debug;

use super::{App, AppMessage};

impl App {
    /// Apply one completion.
    ///
    /// Completions whose ticket is no longer current are dropped here, so
    /// the `apply_*` methods only ever see results the user still wants.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if let Some(ticket) = msg.ticket() {
            if !self.tracker.is_current(ticket) {
                debug!("Dropping stale {} completion", msg.name());
                return;
            }
        }

        match msg {
            AppMessage::LoggedIn { result, .. } => self.apply_logged_in(result),
            AppMessage::SessionResumed { result, .. } => self.apply_session_resumed(result),
            AppMessage::Registered { result, .. } => self.apply_registered(result),
            AppMessage::ResetLinkRequested { result, .. } => {
                self.apply_reset_link_requested(result)
            }
            AppMessage::PasswordReset { result, .. } => self.apply_password_reset(result),
            AppMessage::LoggedOut { result, .. } => self.apply_logged_out(result),
            AppMessage::AccountDeleted { result, .. } => self.apply_account_deleted(result),

            AppMessage::ProfileLoaded { result, .. } => self.apply_profile_loaded(result),
            AppMessage::ProfileSaved { report, .. } => self.apply_profile_saved(report),

            AppMessage::SearchDebounceElapsed { generation } => {
                self.apply_search_debounce(generation)
            }
            AppMessage::UsersFound { result, .. } => self.apply_users_found(result),
            AppMessage::PublicProfileLoaded { result, .. } => self.apply_public_profile(result),
            AppMessage::FollowChanged {
                username,
                following,
                result,
                ..
            } => self.apply_follow_changed(username, following, result),
            AppMessage::RequestsLoaded { result, .. } => self.apply_requests_loaded(result),
            AppMessage::RequestAnswered {
                username,
                accepted,
                result,
                ..
            } => self.apply_request_answered(username, accepted, result),
            AppMessage::RelationsLoaded {
                list,
                owner,
                result,
                ..
            } => self.apply_relations_loaded(list, owner, result),
            AppMessage::FollowerRemoved {
                username, result, ..
            } => self.apply_follower_removed(username, result),

            AppMessage::RestaurantsLoaded { result, .. } => self.apply_restaurants_loaded(result),
            AppMessage::FavoritesLoaded { result, .. } => self.apply_favorites_loaded(result),
            AppMessage::FavoriteToggled { key, result, .. } => {
                self.apply_favorite_toggled(key, result)
            }

            AppMessage::ReviewSubmitted { result, .. } => self.apply_review_submitted(result),
            AppMessage::ReviewDeleted {
                restaurant_id,
                result,
                ..
            } => self.apply_review_deleted(restaurant_id, result),
            AppMessage::FeedLoaded { result, .. } => self.apply_feed_loaded(result),
        }
    }
}
