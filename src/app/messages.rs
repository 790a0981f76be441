//! Completions sent back to [`App`](super::App) by spawned tasks.

use crate::error::GastroResult;
use crate::gateway::RelationList;
use crate::models::{ExternalRestaurant, LocalRestaurant, Page, Profile, PublicProfile, Review, UserSummary};
use crate::state::{FavoriteOutcome, RequestTicket, SaveReport};

/// Messages received from async operations.
///
/// Every request completion carries the ticket it was issued with; the
/// app drops completions whose ticket is no longer current.
#[derive(Debug)]
pub enum AppMessage {
    /// Credentials accepted and the token saved
    LoggedIn {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    /// Saved token restored and verified; `None` when nothing was saved
    SessionResumed {
        ticket: RequestTicket,
        result: GastroResult<Option<Profile>>,
    },
    Registered {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    /// Forgot-password request answered; the outcome is never shown
    ResetLinkRequested {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    PasswordReset {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    /// Token removed from the store
    LoggedOut {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    AccountDeleted {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    ProfileLoaded {
        ticket: RequestTicket,
        result: GastroResult<Profile>,
    },
    /// Profile update chain finished
    ProfileSaved {
        ticket: RequestTicket,
        report: SaveReport,
    },
    /// Quiet period after a keystroke elapsed
    SearchDebounceElapsed { generation: u64 },
    UsersFound {
        ticket: RequestTicket,
        result: GastroResult<Vec<UserSummary>>,
    },
    PublicProfileLoaded {
        ticket: RequestTicket,
        result: GastroResult<PublicProfile>,
    },
    /// Follow request sent (`following`) or relation removed
    FollowChanged {
        ticket: RequestTicket,
        username: String,
        following: bool,
        result: GastroResult<()>,
    },
    RequestsLoaded {
        ticket: RequestTicket,
        result: GastroResult<Vec<UserSummary>>,
    },
    RequestAnswered {
        ticket: RequestTicket,
        username: String,
        accepted: bool,
        result: GastroResult<()>,
    },
    RelationsLoaded {
        ticket: RequestTicket,
        list: RelationList,
        owner: Option<String>,
        result: GastroResult<Vec<UserSummary>>,
    },
    FollowerRemoved {
        ticket: RequestTicket,
        username: String,
        result: GastroResult<()>,
    },
    RestaurantsLoaded {
        ticket: RequestTicket,
        result: GastroResult<Page<ExternalRestaurant>>,
    },
    FavoritesLoaded {
        ticket: RequestTicket,
        result: GastroResult<Page<LocalRestaurant>>,
    },
    FavoriteToggled {
        ticket: RequestTicket,
        /// Index key the toggle was planned for
        key: String,
        result: GastroResult<FavoriteOutcome>,
    },
    ReviewSubmitted {
        ticket: RequestTicket,
        result: GastroResult<()>,
    },
    ReviewDeleted {
        ticket: RequestTicket,
        restaurant_id: i64,
        result: GastroResult<()>,
    },
    FeedLoaded {
        ticket: RequestTicket,
        result: GastroResult<Page<Review>>,
    },
}

impl AppMessage {
    /// Ticket of a request completion; timers carry none.
    pub fn ticket(&self) -> Option<&RequestTicket> {
        match self {
            AppMessage::SearchDebounceElapsed { .. } => None,
            AppMessage::LoggedIn { ticket, .. }
            | AppMessage::SessionResumed { ticket, .. }
            | AppMessage::Registered { ticket, .. }
            | AppMessage::ResetLinkRequested { ticket, .. }
            | AppMessage::PasswordReset { ticket, .. }
            | AppMessage::LoggedOut { ticket, .. }
            | AppMessage::AccountDeleted { ticket, .. }
            | AppMessage::ProfileLoaded { ticket, .. }
            | AppMessage::ProfileSaved { ticket, .. }
            | AppMessage::UsersFound { ticket, .. }
            | AppMessage::PublicProfileLoaded { ticket, .. }
            | AppMessage::FollowChanged { ticket, .. }
            | AppMessage::RequestsLoaded { ticket, .. }
            | AppMessage::RequestAnswered { ticket, .. }
            | AppMessage::RelationsLoaded { ticket, .. }
            | AppMessage::FollowerRemoved { ticket, .. }
            | AppMessage::RestaurantsLoaded { ticket, .. }
            | AppMessage::FavoritesLoaded { ticket, .. }
            | AppMessage::FavoriteToggled { ticket, .. }
            | AppMessage::ReviewSubmitted { ticket, .. }
            | AppMessage::ReviewDeleted { ticket, .. }
            | AppMessage::FeedLoaded { ticket, .. } => Some(ticket),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            AppMessage::LoggedIn { .. } => "login",
            AppMessage::SessionResumed { .. } => "resume_session",
            AppMessage::Registered { .. } => "register",
            AppMessage::ResetLinkRequested { .. } => "forgot_password",
            AppMessage::PasswordReset { .. } => "reset_password",
            AppMessage::LoggedOut { .. } => "logout",
            AppMessage::AccountDeleted { .. } => "delete_account",
            AppMessage::ProfileLoaded { .. } => "fetch_profile",
            AppMessage::ProfileSaved { .. } => "save_profile",
            AppMessage::SearchDebounceElapsed { .. } => "search_debounce",
            AppMessage::UsersFound { .. } => "search_users",
            AppMessage::PublicProfileLoaded { .. } => "public_profile",
            AppMessage::FollowChanged { .. } => "follow",
            AppMessage::RequestsLoaded { .. } => "pending_requests",
            AppMessage::RequestAnswered { .. } => "answer_request",
            AppMessage::RelationsLoaded { .. } => "relations",
            AppMessage::FollowerRemoved { .. } => "remove_follower",
            AppMessage::RestaurantsLoaded { .. } => "search_restaurants",
            AppMessage::FavoritesLoaded { .. } => "favorites",
            AppMessage::FavoriteToggled { .. } => "toggle_favorite",
            AppMessage::ReviewSubmitted { .. } => "submit_review",
            AppMessage::ReviewDeleted { .. } => "delete_review",
            AppMessage::FeedLoaded { .. } => "feed",
        }
    }
}
