//! User intents dispatched to [`App`](super::App).

use crate::gateway::RelationList;
use crate::models::{PhotoUpload, RestaurantFilter, Review};
use crate::state::{
    LoginForm, PageDirection, PagedList, ProfileEditForm, RegisterForm, ResetPasswordForm, RestaurantRef,
};

/// Everything the user can ask the client to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Entry and authentication
    /// Leave the welcome screen.
    Continue,
    /// Sign in with the token saved by an earlier run.
    ResumeSession,
    ShowLogin,
    ShowRegister,
    ShowForgotPassword,
    Login(LoginForm),
    Register(RegisterForm),
    ForgotPassword { email: String },
    ResetPassword(ResetPasswordForm),
    Logout,
    DeleteAccount,

    // Navigation
    /// Return along the current view's back edge.
    Back,
    /// Go to the profile view and refresh the profile.
    GoHome,
    ShowMenu,
    ShowImage(String),
    HideImage,

    // Own profile
    ShowEditProfile,
    SaveProfile(ProfileEditForm),

    // People
    ShowUserSearch,
    SearchInput(String),
    OpenUserProfile(String),
    /// Send a follow request to the viewed user.
    Follow,
    /// Unfollow the viewed user, or withdraw the pending request.
    Unfollow,
    ShowRequests,
    AcceptRequest(String),
    RejectRequest(String),
    ShowRelations {
        list: RelationList,
        /// `None` for the signed-in user.
        owner: Option<String>,
    },
    RemoveFollower(String),

    // Restaurants
    ShowRestaurantFilter,
    SearchRestaurants(RestaurantFilter),
    RestaurantPage(PageDirection),
    OpenRestaurant(RestaurantRef),
    ToggleFavorite(RestaurantRef),
    ShowFavorites,
    FavoritesPage(PageDirection),

    // Reviews
    StartReview,
    SetRating(u8),
    SetReviewComment(String),
    AddReviewPhotos(Vec<PhotoUpload>),
    SubmitReview,
    OpenReview(Review),
    DeleteReview,
    ShowFeed,
    FeedPage(PageDirection),
    /// Jump to a zero-based page of a loaded list.
    GoToPage { list: PagedList, index: u32 },
}

impl Action {
    /// Whether the action needs a signed-in session.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Action::Continue
                | Action::ResumeSession
                | Action::ShowLogin
                | Action::ShowRegister
                | Action::ShowForgotPassword
                | Action::Login(_)
                | Action::Register(_)
                | Action::ForgotPassword { .. }
                | Action::ResetPassword(_)
                | Action::Back
                | Action::ShowImage(_)
                | Action::HideImage
        )
    }

    /// Whether dispatching the action clears the inline error and notice.
    pub(super) fn clears_feedback(&self) -> bool {
        !matches!(
            self,
            Action::ShowImage(_)
                | Action::HideImage
                | Action::SearchInput(_)
                | Action::SetRating(_)
                | Action::SetReviewComment(_)
                | Action::AddReviewPhotos(_)
        )
    }
}
