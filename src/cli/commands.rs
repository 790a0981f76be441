//! The line-oriented command language.
//!
//! Each input line is parsed against the current [`App`] state, because
//! positional arguments (`open 2`, `accept 1`) refer to whatever list the
//! active view shows.

use std::path::PathBuf;

use thiserror::Error;

use crate::app::{Action, App, View};
use crate::gateway::RelationList;
use crate::models::{RestaurantFilter, UserSummary};
use crate::state::{
    LoginForm, PageDirection, PagedList, ProfileEditForm, RegisterForm, ResetPasswordForm, RestaurantRef,
};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Act(Action),
    /// Read these images from disk and add them to the review being written
    AttachPhotos(Vec<PathBuf>),
    /// Read the avatar from disk, then save the profile form
    SaveProfileWithAvatar {
        form: ProfileEditForm,
        avatar: PathBuf,
    },
    Help,
    Cuisines,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("there is no entry {0} on this screen")]
    NoSuchEntry(String),

    #[error("`{0}` is not available on this screen")]
    WrongView(&'static str),

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// Command summary shown by `help`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("continue", "leave the welcome screen"),
    ("resume", "sign in with the saved session"),
    ("login [email password]", "open the sign-in form, or sign in"),
    ("register [user email pwd confirm]", "open the sign-up form, or sign up"),
    ("forgot [email]", "open the recovery form, or request a reset link"),
    ("reset <pwd> <confirm>", "set a new password from a reset link"),
    ("logout", "sign out"),
    ("delete-account", "delete the account and sign out"),
    ("back | home | menu", "navigate"),
    ("image <url> | close", "show or hide the image overlay"),
    ("edit-profile", "open the profile form"),
    ("save-profile [field=value ...]", "username, email, old, new, confirm, avatar"),
    ("people", "open the user search"),
    ("type [text]", "type into the user search box"),
    ("profile <user|n>", "open a user's profile"),
    ("follow | unfollow", "change the relation with the open profile"),
    ("requests", "list pending follow requests"),
    ("accept <user|n> | reject <user|n>", "answer a follow request"),
    ("followers [user] | following [user]", "list a relation"),
    ("remove <user|n>", "remove one of your followers"),
    ("restaurants", "open the restaurant filter"),
    ("search [field=value ...]", "name, city, cuisine, address"),
    ("cuisines", "list the cuisine filter values"),
    ("next | prev", "page through the current list"),
    ("page <n>", "jump to page n of the current list"),
    ("open <n>", "open entry n of the current list"),
    ("fav [n]", "toggle the favorite state"),
    ("favorites | feed", "open your favorites or the feed"),
    ("review", "review the open restaurant"),
    ("rate <1-5> | comment <text> | photo <path ...>", "fill in the review"),
    ("submit", "publish the review"),
    ("delete-review", "delete the open review"),
    ("help | quit", ""),
];

/// Split a line into words; double quotes group words with spaces.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str, app: &App) -> Result<Option<Input>, CommandError> {
    let words = tokenize(line);
    let Some((command, args)) = words.split_first() else {
        return Ok(None);
    };
    let act = |action: Action| Ok(Some(Input::Act(action)));

    match command.as_str() {
        "help" | "?" => Ok(Some(Input::Help)),
        "quit" | "exit" => Ok(Some(Input::Quit)),
        "cuisines" => Ok(Some(Input::Cuisines)),

        "continue" => act(Action::Continue),
        "resume" => act(Action::ResumeSession),
        "login" => match args {
            [] => act(Action::ShowLogin),
            [email, password] => act(Action::Login(LoginForm {
                email: email.clone(),
                password: password.clone(),
            })),
            _ => Err(CommandError::Usage("login [email password]")),
        },
        "register" => match args {
            [] => act(Action::ShowRegister),
            [username, email, password, confirm] => act(Action::Register(RegisterForm {
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
                confirm_password: confirm.clone(),
            })),
            _ => Err(CommandError::Usage("register [user email pwd confirm]")),
        },
        "forgot" => match args {
            [] => act(Action::ShowForgotPassword),
            [email] => act(Action::ForgotPassword {
                email: email.clone(),
            }),
            _ => Err(CommandError::Usage("forgot [email]")),
        },
        "reset" => match args {
            [password, confirm] => act(Action::ResetPassword(ResetPasswordForm {
                password: password.clone(),
                confirm_password: confirm.clone(),
            })),
            _ => Err(CommandError::Usage("reset <pwd> <confirm>")),
        },
        "logout" => act(Action::Logout),
        "delete-account" => act(Action::DeleteAccount),

        "back" => act(Action::Back),
        "home" => act(Action::GoHome),
        "menu" => act(Action::ShowMenu),
        "image" => match args {
            [url] => act(Action::ShowImage(url.clone())),
            _ => Err(CommandError::Usage("image <url>")),
        },
        "close" => act(Action::HideImage),

        "edit-profile" => act(Action::ShowEditProfile),
        "save-profile" => parse_profile_form(args, app),

        "people" => act(Action::ShowUserSearch),
        "type" => act(Action::SearchInput(args.join(" "))),
        "profile" => match args {
            [user] => act(Action::OpenUserProfile(pick_user(app, user)?)),
            _ => Err(CommandError::Usage("profile <user|n>")),
        },
        "follow" => act(Action::Follow),
        "unfollow" => act(Action::Unfollow),
        "requests" => act(Action::ShowRequests),
        "accept" | "reject" | "remove" => {
            let [user] = args else {
                return Err(CommandError::Usage("accept|reject|remove <user|n>"));
            };
            let username = pick_user(app, user)?;
            act(match command.as_str() {
                "accept" => Action::AcceptRequest(username),
                "reject" => Action::RejectRequest(username),
                _ => Action::RemoveFollower(username),
            })
        }
        "followers" | "following" => {
            let list = if command == "followers" {
                RelationList::Followers
            } else {
                RelationList::Following
            };
            match args {
                [] => act(Action::ShowRelations { list, owner: None }),
                [owner] => act(Action::ShowRelations {
                    list,
                    owner: Some(owner.clone()),
                }),
                _ => Err(CommandError::Usage("followers|following [user]")),
            }
        }

        "restaurants" => act(Action::ShowRestaurantFilter),
        "search" => act(Action::SearchRestaurants(parse_filter(args)?)),
        "next" | "prev" => {
            let direction = if command == "next" {
                PageDirection::Next
            } else {
                PageDirection::Previous
            };
            match paged_list(app.view).ok_or(CommandError::WrongView("next/prev"))? {
                PagedList::RestaurantSearch => act(Action::RestaurantPage(direction)),
                PagedList::Favorites => act(Action::FavoritesPage(direction)),
                PagedList::Feed => act(Action::FeedPage(direction)),
            }
        }
        "page" => {
            let list = paged_list(app.view).ok_or(CommandError::WrongView("page"))?;
            let index = match args {
                [n] => n
                    .parse::<u32>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .ok_or(CommandError::Usage("page <n>"))?,
                _ => return Err(CommandError::Usage("page <n>")),
            };
            act(Action::GoToPage { list, index })
        }
        "open" => match args {
            [index] => act(open_entry(app, index)?),
            _ => Err(CommandError::Usage("open <n>")),
        },
        "fav" => act(Action::ToggleFavorite(pick_restaurant(app, args.first())?)),
        "favorites" => act(Action::ShowFavorites),
        "feed" => act(Action::ShowFeed),

        "review" => act(Action::StartReview),
        "rate" => match args {
            [rating] => rating
                .parse::<u8>()
                .map_err(|_| CommandError::Usage("rate <1-5>"))
                .and_then(|r| act(Action::SetRating(r))),
            _ => Err(CommandError::Usage("rate <1-5>")),
        },
        "comment" => act(Action::SetReviewComment(args.join(" "))),
        "photo" => {
            if args.is_empty() {
                return Err(CommandError::Usage("photo <path ...>"));
            }
            Ok(Some(Input::AttachPhotos(
                args.iter().map(PathBuf::from).collect(),
            )))
        }
        "submit" => act(Action::SubmitReview),
        "delete-review" => act(Action::DeleteReview),

        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn split_field(arg: &str) -> Result<(&str, &str), CommandError> {
    arg.split_once('=')
        .ok_or_else(|| CommandError::UnknownField(arg.to_string()))
}

fn paged_list(view: View) -> Option<PagedList> {
    match view {
        View::RestaurantResults => Some(PagedList::RestaurantSearch),
        View::FavoritesList => Some(PagedList::Favorites),
        View::Feed => Some(PagedList::Feed),
        _ => None,
    }
}

fn parse_filter(args: &[String]) -> Result<RestaurantFilter, CommandError> {
    let mut filter = RestaurantFilter::default();
    for arg in args {
        let (field, value) = split_field(arg)?;
        let slot = match field {
            "name" | "nombre" => &mut filter.name,
            "city" | "ciudad" => &mut filter.city,
            "cuisine" | "tipoCocina" => &mut filter.cuisine,
            "address" | "direccion" => &mut filter.address,
            other => return Err(CommandError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
    }
    Ok(filter)
}

/// Fields not mentioned keep what the edit form was opened with.
fn parse_profile_form(args: &[String], app: &App) -> Result<Option<Input>, CommandError> {
    let mut form = app.profile_form.clone();
    let mut avatar = None;
    for arg in args {
        let (field, value) = split_field(arg)?;
        let value = value.to_string();
        match field {
            "username" => form.username = value,
            "email" => form.email = value,
            "old" => form.old_password = value,
            "new" => form.new_password = value,
            "confirm" => form.confirm_password = value,
            "avatar" => avatar = Some(PathBuf::from(value)),
            other => return Err(CommandError::UnknownField(other.to_string())),
        }
    }
    Ok(Some(match avatar {
        Some(avatar) => Input::SaveProfileWithAvatar { form, avatar },
        None => Input::Act(Action::SaveProfile(form)),
    }))
}

/// Resolve a 1-based position in `items`.
fn nth<'a, T>(items: &'a [T], arg: &str) -> Result<&'a T, CommandError> {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| items.get(i))
        .ok_or_else(|| CommandError::NoSuchEntry(arg.to_string()))
}

/// A username, or the position of one in the list on screen.
fn pick_user(app: &App, arg: &str) -> Result<String, CommandError> {
    if arg.parse::<usize>().is_err() {
        return Ok(arg.to_string());
    }
    let users: &[UserSummary] = match app.view {
        View::UserSearch => app.search_results.as_slice(),
        View::Requests => app.pending_requests.as_slice(),
        View::UserList => app
            .user_list
            .as_ref()
            .map(|l| l.users.as_slice())
            .unwrap_or_default(),
        _ => &[],
    };
    nth(users, arg).map(|u| u.username.clone())
}

fn open_entry(app: &App, arg: &str) -> Result<Action, CommandError> {
    match app.view {
        View::RestaurantResults => {
            let results = app
                .restaurant_results
                .as_ref()
                .map(|p| p.content.as_slice())
                .unwrap_or_default();
            Ok(Action::OpenRestaurant(RestaurantRef::External(
                nth(results, arg)?.clone(),
            )))
        }
        View::FavoritesList => {
            let favorites = app
                .favorites
                .as_ref()
                .map(|p| p.content.as_slice())
                .unwrap_or_default();
            Ok(Action::OpenRestaurant(RestaurantRef::Local(
                nth(favorites, arg)?.clone(),
            )))
        }
        View::Feed => {
            let feed = app
                .feed
                .as_ref()
                .map(|p| p.content.as_slice())
                .unwrap_or_default();
            Ok(Action::OpenReview(nth(feed, arg)?.clone()))
        }
        View::Home => {
            let reviews = app
                .profile
                .as_ref()
                .map(|p| p.reviews.as_slice())
                .unwrap_or_default();
            Ok(Action::OpenReview(nth(reviews, arg)?.clone()))
        }
        View::UserProfile => {
            let reviews = app
                .viewed_profile
                .as_ref()
                .filter(|p| p.is_content_visible())
                .map(|p| p.reviews.as_slice())
                .unwrap_or_default();
            Ok(Action::OpenReview(nth(reviews, arg)?.clone()))
        }
        View::UserSearch | View::Requests | View::UserList => {
            Ok(Action::OpenUserProfile(pick_user(app, arg)?))
        }
        _ => Err(CommandError::WrongView("open")),
    }
}

/// The open restaurant, or entry `n` of the list on screen.
fn pick_restaurant(app: &App, arg: Option<&String>) -> Result<RestaurantRef, CommandError> {
    match (app.view, arg) {
        (View::RestaurantDetail, None) => app
            .selected_restaurant
            .clone()
            .map(RestaurantRef::External)
            .ok_or(CommandError::WrongView("fav")),
        (View::RestaurantResults, Some(arg)) => {
            let results = app
                .restaurant_results
                .as_ref()
                .map(|p| p.content.as_slice())
                .unwrap_or_default();
            Ok(RestaurantRef::External(nth(results, arg)?.clone()))
        }
        (View::FavoritesList, Some(arg)) => {
            let favorites = app
                .favorites
                .as_ref()
                .map(|p| p.content.as_slice())
                .unwrap_or_default();
            Ok(RestaurantRef::Local(nth(favorites, arg)?.clone()))
        }
        (View::RestaurantResults | View::FavoritesList, None) => {
            Err(CommandError::Usage("fav <n>"))
        }
        _ => Err(CommandError::WrongView("fav")),
    }
}
