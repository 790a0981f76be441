//! Type definitions for the application state.
//!
//! - [`View`] - which screen is active
//! - [`Overlay`] - the image-zoom overlay, tracked apart from the view
//! - [`UserList`] - a loaded followers/following list

use std::fmt;

use crate::gateway::RelationList;
use crate::models::UserSummary;

/// Represents which view is currently active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Welcome,
    Options,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Home,
    Menu,
    EditProfile,
    UserSearch,
    UserProfile,
    Requests,
    UserList,
    RestaurantFilter,
    RestaurantResults,
    FavoritesList,
    RestaurantDetail,
    CreateReview,
    ReviewDetail,
    Feed,
}

/// Where "back" leads from a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// Nowhere; the view is a root.
    Stay,
    /// A fixed view.
    To(View),
    /// Home, refetching the profile on the way.
    Home,
    /// The view recorded on entry.
    Previous,
}

impl View {
    pub const ALL: [View; 20] = [
        View::Welcome,
        View::Options,
        View::Login,
        View::Register,
        View::ForgotPassword,
        View::ResetPassword,
        View::Home,
        View::Menu,
        View::EditProfile,
        View::UserSearch,
        View::UserProfile,
        View::Requests,
        View::UserList,
        View::RestaurantFilter,
        View::RestaurantResults,
        View::FavoritesList,
        View::RestaurantDetail,
        View::CreateReview,
        View::ReviewDetail,
        View::Feed,
    ];

    /// Whether the view is only reachable with a session.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            View::Welcome
                | View::Options
                | View::Login
                | View::Register
                | View::ForgotPassword
                | View::ResetPassword
        )
    }

    /// Whether the view shows the shared navigation bar.
    pub fn has_nav_bar(&self) -> bool {
        self.requires_session()
    }

    pub fn back_target(&self) -> BackTarget {
        match self {
            View::Welcome | View::Home => BackTarget::Stay,
            View::Options => BackTarget::To(View::Welcome),
            View::Login | View::Register => BackTarget::To(View::Options),
            View::ForgotPassword | View::ResetPassword => BackTarget::To(View::Login),
            View::Menu
            | View::EditProfile
            | View::UserSearch
            | View::Requests
            | View::UserList
            | View::RestaurantFilter
            | View::FavoritesList
            | View::Feed => BackTarget::Home,
            View::UserProfile => BackTarget::To(View::UserSearch),
            View::RestaurantResults => BackTarget::To(View::RestaurantFilter),
            View::CreateReview => BackTarget::To(View::RestaurantDetail),
            View::RestaurantDetail | View::ReviewDetail => BackTarget::Previous,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Welcome => "Welcome",
            View::Options => "Get started",
            View::Login => "Sign in",
            View::Register => "Create account",
            View::ForgotPassword => "Forgot password",
            View::ResetPassword => "Reset password",
            View::Home => "Profile",
            View::Menu => "Menu",
            View::EditProfile => "Edit profile",
            View::UserSearch => "Find people",
            View::UserProfile => "User profile",
            View::Requests => "Follow requests",
            View::UserList => "People",
            View::RestaurantFilter => "Find restaurants",
            View::RestaurantResults => "Restaurants",
            View::FavoritesList => "Favorites",
            View::RestaurantDetail => "Restaurant",
            View::CreateReview => "Write a review",
            View::ReviewDetail => "Review",
            View::Feed => "Feed",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Image-zoom overlay. Shown over any view without a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub visible: bool,
    pub url: String,
}

impl Overlay {
    /// Show `url`. An empty URL leaves the overlay as it was.
    pub fn show(&mut self, url: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }
        self.visible = true;
        self.url = url.to_string();
        true
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.url.clear();
    }
}

/// A loaded followers/following list.
#[derive(Debug, Clone, PartialEq)]
pub struct UserList {
    pub list: RelationList,
    /// `None` for the signed-in user's own lists.
    pub owner: Option<String>,
    pub users: Vec<UserSummary>,
}

impl UserList {
    pub fn title(&self) -> String {
        match (&self.owner, self.list) {
            (None, list) => list.title().to_string(),
            (Some(owner), RelationList::Followers) => format!("Followers of {}", owner),
            (Some(owner), RelationList::Following) => format!("Followed by {}", owner),
        }
    }

    /// Followers can only be removed from one's own list.
    pub fn allows_removal(&self) -> bool {
        self.owner.is_none() && self.list == RelationList::Followers
    }
}
