//! Integration tests for restaurants, favorites and reviews.

mod common;

use common::{page_json, url, Harness};
use gastrolog::adapters::MockResponse;
use gastrolog::app::{Action, View};
use gastrolog::error::ValidationError;
use gastrolog::models::RestaurantFilter;
use gastrolog::state::{PageDirection, PagedList, RestaurantRef};
use serde_json::json;

fn madrid() -> RestaurantFilter {
    RestaurantFilter {
        city: "Madrid".to_string(),
        ..Default::default()
    }
}

fn casa_pepe_page() -> serde_json::Value {
    page_json(
        json!([{
            "id": 42,
            "lat": 40.41,
            "lon": -3.70,
            "tags": {"name": "Casa Pepe", "cuisine": "tapas"}
        }]),
        0,
        1,
    )
}

#[tokio::test]
async fn test_search_detail_favorite_and_unfavorite() {
    let mut h = Harness::signed_in("ana").await;
    h.http.set_response(
        "GET",
        &url("/restaurantes/externos/buscar"),
        MockResponse::json(casa_pepe_page()),
    );
    h.http.set_response(
        "POST",
        &url("/restaurantes/importar"),
        MockResponse::json(json!({"id": 7, "nombre": "Casa Pepe", "ciudad": "Madrid", "osmId": 42})),
    );
    h.http
        .set_response("POST", &url("/favoritos/7"), MockResponse::status(201));
    h.http
        .set_response("DELETE", &url("/favoritos/7"), MockResponse::status(204));

    h.app.dispatch(Action::ShowRestaurantFilter);
    h.app.dispatch(Action::SearchRestaurants(madrid()));
    h.app.settle().await;
    assert_eq!(h.app.view, View::RestaurantResults);

    let casa_pepe = h
        .app
        .restaurant_results
        .as_ref()
        .map(|p| p.content[0].clone())
        .unwrap_or_default();
    h.app
        .dispatch(Action::OpenRestaurant(RestaurantRef::External(casa_pepe.clone())));
    assert_eq!(h.app.view, View::RestaurantDetail);
    assert!(!h.app.is_favorite(&casa_pepe));

    h.app
        .dispatch(Action::ToggleFavorite(RestaurantRef::External(casa_pepe.clone())));
    h.app.settle().await;
    assert_eq!(h.app.favorite_index().local_id("42"), Some(7));

    // The import carries the city filter because the tags have none.
    let import = h.http.requests_to("POST", "/restaurantes/importar")[0]
        .json_body()
        .unwrap_or_default();
    assert_eq!(import["osmId"], 42);
    assert_eq!(import["ciudad"], "Madrid");
    assert_eq!(import["tipoCocina"], "tapas");

    h.app
        .dispatch(Action::ToggleFavorite(RestaurantRef::External(casa_pepe.clone())));
    h.app.settle().await;
    assert!(!h.app.is_favorite(&casa_pepe));
    assert_eq!(h.http.requests_to("DELETE", "/favoritos/7").len(), 1);
    // Unfavoriting never imports.
    assert_eq!(h.http.requests_to("POST", "/restaurantes/importar").len(), 1);

    h.app.dispatch(Action::Back);
    assert_eq!(h.app.view, View::RestaurantResults);
}

#[tokio::test]
async fn test_favorites_list_teaches_the_index() {
    let mut h = Harness::signed_in("ana").await;
    h.http.set_response(
        "GET",
        &url("/favoritos"),
        MockResponse::json(page_json(
            json!([
                {"id": 7, "nombre": "Casa Pepe", "osmId": 42},
                {"id": 9, "nombre": "Sin mapa"}
            ]),
            0,
            1,
        )),
    );
    h.http.set_response(
        "GET",
        &url("/restaurantes/externos/buscar"),
        MockResponse::json(casa_pepe_page()),
    );

    h.app.dispatch(Action::ShowFavorites);
    h.app.settle().await;
    assert_eq!(h.app.view, View::FavoritesList);
    assert_eq!(h.app.favorite_index().len(), 1);

    h.app.dispatch(Action::SearchRestaurants(madrid()));
    h.app.settle().await;
    let results = h.app.restaurant_results.clone().expect("search results");
    assert!(h.app.is_favorite(&results.content[0]));
}

#[tokio::test]
async fn test_next_page_on_the_last_page_is_refused() {
    let mut h = Harness::signed_in("ana").await;
    h.http.set_response(
        "GET",
        &url("/favoritos"),
        MockResponse::json(page_json(json!([{"id": 7, "osmId": 42}]), 0, 1)),
    );

    h.app.dispatch(Action::ShowFavorites);
    h.app.settle().await;
    assert!(!h
        .app
        .pagination()
        .can_go(PagedList::Favorites, PageDirection::Next));

    h.app.dispatch(Action::FavoritesPage(PageDirection::Next));
    h.app.settle().await;

    assert_eq!(h.http.requests_to("GET", "/favoritos").len(), 1);
    assert_eq!(
        h.app.error.as_deref(),
        Some(
            ValidationError::PageUnavailable { direction: "next" }
                .user_message()
                .as_str()
        )
    );
    assert_eq!(h.app.view, View::FavoritesList);
}

#[tokio::test]
async fn test_review_from_favorites_returns_there() {
    let mut h = Harness::signed_in("ana").await;
    h.http.set_response(
        "GET",
        &url("/favoritos"),
        MockResponse::json(page_json(
            json!([{"id": 7, "nombre": "Casa Pepe", "ciudad": "Madrid", "osmId": 42}]),
            0,
            1,
        )),
    );
    h.http.set_response(
        "POST",
        &url("/valoraciones/usuario/ana"),
        MockResponse::status(201),
    );

    h.app.dispatch(Action::ShowFavorites);
    h.app.settle().await;
    let favorite = h
        .app
        .favorites
        .as_ref()
        .map(|p| p.content[0].clone())
        .unwrap_or_default();
    h.app
        .dispatch(Action::OpenRestaurant(RestaurantRef::Local(favorite)));
    assert_eq!(h.app.previous_view, View::FavoritesList);

    h.app.dispatch(Action::StartReview);
    h.app.dispatch(Action::SubmitReview);
    h.app.settle().await;
    assert_eq!(h.app.view, View::CreateReview);
    assert!(h
        .http
        .requests_to("POST", "/valoraciones/usuario/ana")
        .is_empty());

    h.app.dispatch(Action::SetRating(4));
    h.app.dispatch(Action::SetReviewComment("Rico".to_string()));
    h.app.dispatch(Action::SubmitReview);
    h.app.settle().await;

    assert_eq!(h.app.view, View::FavoritesList);
    let request = &h.http.requests_to("POST", "/valoraciones/usuario/ana")[0];
    let form = request.form.clone().unwrap_or_default();
    let draft = form
        .parts_named("valoracion")
        .next()
        .and_then(|part| match part {
            gastrolog::traits::FormPart::Text { value, .. } => {
                serde_json::from_str::<serde_json::Value>(value).ok()
            }
            _ => None,
        })
        .unwrap_or_default();
    assert_eq!(
        draft,
        json!({
            "nombreRestaurante": "Casa Pepe",
            "ciudad": "Madrid",
            "puntuacion": 4,
            "comentario": "Rico"
        })
    );
}
