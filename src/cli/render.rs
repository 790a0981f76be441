//! Plain-text rendering of the active view.

use std::fmt::Write;

use crate::app::{App, View};
use crate::models::{cuisine_label, ExternalRestaurant, LocalRestaurant, Page, Review, CUISINES};
use crate::state::PagedList;

use super::commands::COMMANDS;

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const FAVORITE: &str = "★";
}

/// Render the active view, its feedback line and the overlay.
pub fn render(app: &App) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", app.view.title().to_uppercase());
    let _ = writeln!(out, "{}", "═".repeat(LINE_WIDTH));

    if let Some(error) = &app.error {
        let _ = writeln!(out, "  {} {}", icons::FAILURE, error);
    }
    if let Some(notice) = &app.notice {
        let _ = writeln!(out, "  {} {}", icons::SUCCESS, notice);
    }

    body(app, &mut out);

    if app.overlay.visible {
        let _ = writeln!(out, "{}", "─".repeat(LINE_WIDTH));
        let _ = writeln!(out, "  [image] {}  (close to dismiss)", app.overlay.url);
    }
    if app.view.has_nav_bar() {
        let _ = writeln!(out, "{}", "─".repeat(LINE_WIDTH));
        let _ = writeln!(out, "  restaurants · feed · people · home");
    }
    out
}

fn body(app: &App, out: &mut String) {
    match app.view {
        View::Welcome => {
            let _ = writeln!(out, "  Discover, rate and share restaurants.");
            let _ = writeln!(out, "  continue · resume");
        }
        View::Options => {
            let _ = writeln!(out, "  login · register");
        }
        View::ResetPassword if !app.has_reset_token() => {
            let _ = writeln!(out, "  This reset link is not valid.");
        }
        View::Home => {
            if let Some(profile) = &app.profile {
                let _ = writeln!(out, "  {}", profile.username);
                let _ = writeln!(
                    out,
                    "  {} followers · {} following · {} pending requests",
                    profile.followers_count,
                    profile.following_count,
                    profile.pending_requests_count
                );
                reviews(out, &profile.reviews, true);
            } else {
                let _ = writeln!(out, "  Loading profile...");
            }
        }
        View::EditProfile => {
            let form = &app.profile_form;
            let _ = writeln!(out, "  username: {}", form.username);
            let _ = writeln!(out, "  email:    {}", form.email);
        }
        View::UserSearch => {
            let _ = writeln!(out, "  search: {}", app.search_query());
            users(out, app.search_results.iter().map(|u| u.username.as_str()));
        }
        View::UserProfile => {
            if let Some(profile) = &app.viewed_profile {
                let _ = writeln!(out, "  {}", profile.username);
                let status = match profile.relationship_status {
                    None => "not following",
                    Some(crate::models::RelationshipStatus::Pending) => "request pending",
                    Some(crate::models::RelationshipStatus::Accepted) => "following",
                };
                let _ = writeln!(out, "  {}", status);
                if profile.is_content_visible() {
                    reviews(out, &profile.reviews, true);
                } else {
                    let _ = writeln!(out, "  This account is private.");
                }
            }
        }
        View::Requests => {
            if app.pending_requests.is_empty() {
                let _ = writeln!(out, "  No pending requests.");
            }
            users(out, app.pending_requests.iter().map(|u| u.username.as_str()));
        }
        View::UserList => {
            if let Some(list) = &app.user_list {
                let _ = writeln!(out, "  {}", list.title());
                users(out, list.users.iter().map(|u| u.username.as_str()));
            }
        }
        View::RestaurantFilter => {
            let filter = &app.restaurant_filter;
            let _ = writeln!(
                out,
                "  name={} city={} cuisine={} address={}",
                filter.name, filter.city, filter.cuisine, filter.address
            );
        }
        View::RestaurantResults => {
            if let Some(page) = &app.restaurant_results {
                for (i, r) in page.content.iter().enumerate() {
                    let _ = writeln!(out, "  {:>2}. {}", i + 1, external_line(app, r));
                }
                pager(out, page, app, PagedList::RestaurantSearch);
            }
        }
        View::FavoritesList => {
            if let Some(page) = &app.favorites {
                for (i, r) in page.content.iter().enumerate() {
                    let _ = writeln!(out, "  {:>2}. {}", i + 1, local_line(r));
                }
                pager(out, page, app, PagedList::Favorites);
            }
        }
        View::RestaurantDetail => {
            if let Some(r) = &app.selected_restaurant {
                let _ = writeln!(out, "  {}", external_line(app, r));
                if let Some(street) = r.street() {
                    let _ = writeln!(out, "  {}", street);
                }
                let _ = writeln!(out, "  ({:.5}, {:.5})", r.lat, r.lon);
            }
        }
        View::CreateReview => {
            let form = &app.review_form;
            if let Some(r) = &app.selected_restaurant {
                let _ = writeln!(out, "  {}", r.display_name());
            }
            let _ = writeln!(out, "  rating:  {}", stars(form.rating));
            let _ = writeln!(out, "  comment: {}", form.comment);
            let _ = writeln!(out, "  photos:  {}", form.photos.len());
        }
        View::ReviewDetail => {
            if let Some(review) = &app.selected_review {
                let _ = writeln!(out, "  {} by {}", review.restaurant_name(), review.author);
                let _ = writeln!(out, "  {}", stars(review.rating));
                if let Some(comment) = &review.comment {
                    let _ = writeln!(out, "  {}", comment);
                }
                for url in &review.photos {
                    let _ = writeln!(out, "  photo: {}", url);
                }
            }
        }
        View::Feed => {
            if let Some(page) = &app.feed {
                reviews(out, &page.content, false);
                pager(out, page, app, PagedList::Feed);
            }
        }
        _ => {}
    }
}

fn users<'a>(out: &mut String, names: impl Iterator<Item = &'a str>) {
    for (i, name) in names.enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, name);
    }
}

fn reviews(out: &mut String, reviews: &[Review], own: bool) {
    if reviews.is_empty() {
        let _ = writeln!(out, "  No reviews yet.");
    }
    for (i, review) in reviews.iter().enumerate() {
        if own {
            let _ = writeln!(out, "  {:>2}. {} {}", i + 1, stars(review.rating), review.restaurant_name());
        } else {
            let _ = writeln!(
                out,
                "  {:>2}. {} {} by {}",
                i + 1,
                stars(review.rating),
                review.restaurant_name(),
                review.author
            );
        }
    }
}

fn external_line(app: &App, r: &ExternalRestaurant) -> String {
    let mut line = r.display_name().to_string();
    if let Some(city) = r.city() {
        let _ = write!(line, ", {}", city);
    }
    if let Some(cuisine) = r.cuisine() {
        let _ = write!(line, " · {}", cuisine_label(cuisine).unwrap_or(cuisine));
    }
    if app.is_favorite(r) {
        let _ = write!(line, " {}", icons::FAVORITE);
    }
    line
}

fn local_line(r: &LocalRestaurant) -> String {
    match &r.city {
        Some(city) if !city.is_empty() => format!("{}, {}", r.name, city),
        _ => r.name.clone(),
    }
}

fn pager<T>(out: &mut String, page: &Page<T>, app: &App, list: PagedList) {
    let total = app
        .pagination()
        .cursor(list)
        .map(|c| c.total_pages)
        .unwrap_or(page.total_pages)
        .max(1);
    let _ = write!(out, "  page {} of {}", page.number + 1, total);
    if page.has_previous() {
        let _ = write!(out, " · prev");
    }
    if page.has_next() {
        let _ = write!(out, " · next");
    }
    let _ = writeln!(out);
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn help() -> String {
    let mut out = String::new();
    for (command, summary) in COMMANDS {
        let _ = writeln!(out, "  {:<44} {}", command, summary);
    }
    out
}

pub fn cuisines() -> String {
    let mut out = String::new();
    for cuisine in CUISINES {
        let _ = writeln!(out, "  {:<16} {}", cuisine.value, cuisine.label);
    }
    out
}
