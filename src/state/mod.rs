//! Client-side state owned by the application context.
//!
//! - [`SearchDebouncer`]: quiet-period gating of user lookups
//! - [`PaginationController`]: per-list page flags
//! - [`FavoriteIndex`] / [`FavoriteReconciler`]: external ↔ local identity and the favorite protocol
//! - [`ProfileEditDiffer`]: ordered partial profile updates
//! - [`RequestTracker`]: staleness tickets for async completions
//! - form structs for the remaining views

pub mod debounce;
pub mod favorites;
pub mod forms;
pub mod pagination;
pub mod profile_edit;
pub mod tracker;

pub use debounce::{DebounceDecision, SearchDebouncer, MIN_QUERY_CHARS, SEARCH_DEBOUNCE};
pub use favorites::{
    FavoriteIndex, FavoriteOutcome, FavoritePlan, FavoriteReconciler, RestaurantRef,
};
pub use forms::{LoginForm, RegisterForm, ResetPasswordForm, ReviewForm};
pub use pagination::{PageCursor, PageDirection, PagedList, PaginationController};
pub use profile_edit::{
    ProfileEditDiffer, ProfileEditForm, ProfileField, ProfileUpdate, SaveReport,
};
pub use tracker::{RequestScope, RequestTicket, RequestTracker};
