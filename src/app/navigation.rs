//! Navigation methods for the App.

use tracing::{debug, info};

use super::{App, BackTarget, View};
use crate::state::{PageDirection, PagedList, RequestScope};

impl App {
    /// User-initiated transition. Supersedes any navigation load still on
    /// the wire, so a late completion cannot pull the user elsewhere.
    pub(super) fn navigate(&mut self, to: View) {
        self.tracker.supersede(RequestScope::Navigation);
        self.enter(to);
    }

    /// Make `to` the active view.
    pub(super) fn enter(&mut self, to: View) {
        let from = self.view;
        if from == to {
            return;
        }
        if from == View::UserSearch {
            // Pending lookups belong to the search view only.
            self.debouncer.cancel();
            self.tracker.supersede(RequestScope::UserSearch);
        }
        info!("View: {} -> {}", from, to);
        self.view = to;
    }

    /// Move one page through `list`, if the server's flags allow it.
    pub(super) fn step_page(&mut self, list: PagedList, direction: PageDirection) {
        match self.pagination.step(list, direction) {
            Ok(index) => self.load_page(list, index),
            Err(err) => self.fail("paginate", &err.into()),
        }
    }

    /// Jump to page `index` (zero-based) of `list`.
    pub(super) fn go_to_page(&mut self, list: PagedList, index: u32) {
        match self.pagination.go_to(list, index) {
            Ok(index) => self.load_page(list, index),
            Err(err) => self.fail("paginate", &err.into()),
        }
    }

    fn load_page(&mut self, list: PagedList, index: u32) {
        debug!("Loading {:?} page {}", list, index);
        match list {
            PagedList::RestaurantSearch => self.load_restaurants(index),
            PagedList::Favorites => self.load_favorites(index),
            PagedList::Feed => self.load_feed(index),
        }
    }

    /// Enter a detail view, remembering where it was entered from.
    pub(super) fn enter_detail(&mut self, to: View) {
        self.previous_view = self.view;
        self.navigate(to);
    }

    pub(super) fn back(&mut self) {
        match self.view.back_target() {
            BackTarget::Stay => debug!("No back edge from {}", self.view),
            BackTarget::To(view) => {
                if view.requires_session() && !self.signed_in {
                    self.navigate(View::Welcome);
                } else {
                    self.navigate(view);
                }
            }
            BackTarget::Home => self.go_home(),
            BackTarget::Previous => self.navigate(self.previous_view),
        }
    }

    /// Home view with a fresh profile.
    pub(super) fn go_home(&mut self) {
        self.navigate(View::Home);
        self.refresh_profile();
    }

    pub(super) fn show_image(&mut self, url: &str) {
        if !self.overlay.show(url) {
            debug!("Ignoring image overlay without a URL");
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
    use crate::models::ExternalRestaurant;
    use crate::state::RestaurantRef;
    use serde_json::json;

    #[tokio::test]
    async fn test_entry_flow() {
        let (mut app, _) = welcome_app();
        app.dispatch(Action::Continue);
        assert_eq!(app.view, View::Options);
        app.dispatch(Action::ShowRegister);
        assert_eq!(app.view, View::Register);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::Options);
        app.dispatch(Action::ShowLogin);
        app.dispatch(Action::ShowForgotPassword);
        assert_eq!(app.view, View::ForgotPassword);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::Login);
        app.dispatch(Action::Back);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::Welcome);
    }

    #[tokio::test]
    async fn test_back_to_home_refetches_profile() {
        let (mut app, http) = home_app().await;
        http.set_response(
            "GET",
            &url("/perfil/me"),
            MockResponse::json(json!({"nombreUsuario": "ana", "seguidoresCount": 3})),
        );

        app.dispatch(Action::ShowMenu);
        assert_eq!(app.view, View::Menu);
        app.dispatch(Action::Back);
        app.settle().await;

        assert_eq!(app.view, View::Home);
        assert_eq!(app.profile.as_ref().map(|p| p.followers_count), Some(3));
        assert_eq!(http.requests_to("GET", "/perfil/me").len(), 1);
    }

    #[tokio::test]
    async fn test_detail_back_returns_to_recorded_view() {
        let (mut app, _) = home_app().await;
        app.view = View::RestaurantResults;
        app.dispatch(Action::OpenRestaurant(RestaurantRef::External(
            ExternalRestaurant::new(42).with_tag("name", "Casa Pepe"),
        )));
        assert_eq!(app.view, View::RestaurantDetail);
        assert_eq!(app.previous_view, View::RestaurantResults);

        app.dispatch(Action::StartReview);
        assert_eq!(app.view, View::CreateReview);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::RestaurantDetail);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::RestaurantResults);
        app.dispatch(Action::Back);
        assert_eq!(app.view, View::RestaurantFilter);
    }

    #[tokio::test]
    async fn test_nav_bar_targets() {
        let (mut app, _) = home_app().await;
        app.dispatch(Action::ShowRestaurantFilter);
        assert_eq!(app.view, View::RestaurantFilter);
        app.dispatch(Action::ShowUserSearch);
        assert_eq!(app.view, View::UserSearch);
    }
}
