//! People: user search, public profiles, follow requests and relation lists.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::{App, AppMessage, UserList, View};
use crate::error::{GastroError, GastroResult};
use crate::gateway::RelationList;
use crate::models::{PublicProfile, RelationshipStatus, UserSummary};
use crate::state::{DebounceDecision, RequestScope};

impl App {
    pub(super) fn show_user_search(&mut self) {
        self.debouncer.reset();
        self.search_results.clear();
        self.navigate(View::UserSearch);
    }

    /// A keystroke in the search box. Lookups wait for a quiet period;
    /// short queries clear the results without a request.
    pub(super) fn search_input(&mut self, text: &str) {
        if self.view != View::UserSearch {
            debug!("Ignoring search input outside the search view");
            return;
        }
        match self.debouncer.on_input(text) {
            DebounceDecision::Clear => {
                self.tracker.supersede(RequestScope::UserSearch);
                self.search_results.clear();
            }
            DebounceDecision::Schedule { generation, delay } => {
                self.schedule_search(generation, delay);
            }
        }
    }

    fn schedule_search(&mut self, generation: u64, delay: Duration) {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            AppMessage::SearchDebounceElapsed { generation }
        });
    }

    pub(super) fn apply_search_debounce(&mut self, generation: u64) {
        if self.view != View::UserSearch {
            return;
        }
        let Some(query) = self.debouncer.fire(generation) else {
            return;
        };
        debug!("Looking up users matching {:?}", query);
        let ticket = self.tracker.issue(RequestScope::UserSearch);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::UsersFound {
                ticket,
                result: gateway.search_users(&query).await,
            }
        });
    }

    pub(super) fn apply_users_found(&mut self, result: GastroResult<Vec<UserSummary>>) {
        match result {
            Ok(users) => self.search_results = users,
            Err(err) => self.fail("search_users", &err),
        }
    }

    pub(super) fn open_user_profile(&mut self, username: String) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::PublicProfileLoaded {
                ticket,
                result: gateway.public_profile(&username).await,
            }
        });
    }

    /// A profile that cannot be shown sends the user back to the search.
    pub(super) fn apply_public_profile(&mut self, result: GastroResult<PublicProfile>) {
        match result {
            Ok(profile) => {
                self.viewed_profile = Some(profile);
                self.enter(View::UserProfile);
            }
            Err(err) => {
                self.fail("public_profile", &err);
                if self.signed_in {
                    self.enter(View::UserSearch);
                }
            }
        }
    }

    /// Follow or unfollow the viewed user.
    pub(super) fn change_follow(&mut self, follow: bool) {
        let Some(username) = self.viewed_profile.as_ref().map(|p| p.username.clone()) else {
            self.fail("follow", &GastroError::client("No profile is open."));
            return;
        };
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            let result = if follow {
                gateway.follow(&username).await
            } else {
                gateway.unfollow(&username).await
            };
            AppMessage::FollowChanged {
                ticket,
                username,
                following: follow,
                result,
            }
        });
    }

    /// Following leaves the request pending until the other user answers.
    pub(super) fn apply_follow_changed(
        &mut self,
        username: String,
        following: bool,
        result: GastroResult<()>,
    ) {
        if let Err(err) = result {
            self.fail("follow", &err);
            return;
        }
        if let Some(profile) = self
            .viewed_profile
            .as_mut()
            .filter(|p| p.username == username)
        {
            profile.relationship_status = following.then_some(RelationshipStatus::Pending);
        }
        self.notice = Some(if following {
            format!("Follow request sent to {}.", username)
        } else {
            format!("You no longer follow {}.", username)
        });
        info!("Follow state for {} changed (following: {})", username, following);
    }

    pub(super) fn show_requests(&mut self) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::RequestsLoaded {
                ticket,
                result: gateway.pending_requests().await,
            }
        });
    }

    pub(super) fn apply_requests_loaded(&mut self, result: GastroResult<Vec<UserSummary>>) {
        match result {
            Ok(requests) => {
                self.pending_requests = requests;
                self.enter(View::Requests);
            }
            Err(err) => self.fail("pending_requests", &err),
        }
    }

    pub(super) fn answer_request(&mut self, username: String, accept: bool) {
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            let result = if accept {
                gateway.accept_request(&username).await
            } else {
                gateway.reject_request(&username).await
            };
            AppMessage::RequestAnswered {
                ticket,
                username,
                accepted: accept,
                result,
            }
        });
    }

    /// Both answers drop the request locally; accepting also changes the
    /// follower count, so the profile is refetched.
    pub(super) fn apply_request_answered(
        &mut self,
        username: String,
        accepted: bool,
        result: GastroResult<()>,
    ) {
        if let Err(err) = result {
            self.fail("answer_request", &err);
            return;
        }
        self.pending_requests.retain(|u| u.username != username);
        if accepted {
            self.notice = Some(format!("{} now follows you.", username));
            self.refresh_profile();
        } else {
            self.notice = Some(format!("Request from {} rejected.", username));
        }
    }

    pub(super) fn show_relations(&mut self, list: RelationList, owner: Option<String>) {
        let ticket = self.tracker.issue(RequestScope::Navigation);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            let result = gateway.relations(list, owner.as_deref()).await;
            AppMessage::RelationsLoaded {
                ticket,
                list,
                owner,
                result,
            }
        });
    }

    /// Another user's lists fall back to their profile; the own lists to home.
    pub(super) fn apply_relations_loaded(
        &mut self,
        list: RelationList,
        owner: Option<String>,
        result: GastroResult<Vec<UserSummary>>,
    ) {
        match result {
            Ok(users) => {
                self.user_list = Some(UserList { list, owner, users });
                self.enter(View::UserList);
            }
            Err(err) => {
                self.fail("relations", &err);
                if !self.signed_in {
                    return;
                }
                match owner {
                    Some(_) => self.enter(View::UserProfile),
                    None => self.enter(View::Home),
                }
            }
        }
    }

    pub(super) fn remove_follower(&mut self, username: String) {
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            let result = gateway.remove_follower(&username).await;
            AppMessage::FollowerRemoved {
                ticket,
                username,
                result,
            }
        });
    }

    pub(super) fn apply_follower_removed(&mut self, username: String, result: GastroResult<()>) {
        if let Err(err) = result {
            self.fail("remove_follower", &err);
            return;
        }
        if let Some(list) = self.user_list.as_mut() {
            list.users.retain(|u| u.username != username);
        }
        self.notice = Some(format!("{} was removed from your followers.", username));
        self.refresh_profile();
    }
}
