use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::deserialize_nullable_string;

/// Name used when the map provider has none.
pub const DEFAULT_RESTAURANT_NAME: &str = "Nombre no disponible";

/// Cuisine used on import when the map provider has none.
pub const DEFAULT_CUISINE: &str = "No especificada";

/// Restaurant as returned by the map-data provider.
///
/// Only lives inside a search page or the detail view; the client never
/// persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalRestaurant {
    /// External (map provider) id.
    pub id: i64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl ExternalRestaurant {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Builder-style tag setter, mostly for tests and projections.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Non-empty tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.tag("name")
    }

    pub fn city(&self) -> Option<&str> {
        self.tag("addr:city")
    }

    pub fn street(&self) -> Option<&str> {
        self.tag("addr:street")
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.tag("cuisine")
    }

    /// Name shown to the user, with the standard fallback.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(DEFAULT_RESTAURANT_NAME)
    }

    /// Key under which this restaurant is tracked in the favorites index.
    pub fn favorite_key(&self) -> String {
        self.id.to_string()
    }
}

/// Restaurant persisted by the backend (`RestauranteDTO`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalRestaurant {
    /// Local (backend) id.
    pub id: i64,
    #[serde(rename = "nombre", default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "tipoCocina", default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// External id this record was imported from.
    #[serde(rename = "osmId", default)]
    pub osm_id: Option<i64>,
}

impl LocalRestaurant {
    /// Favorites-index key, recovered from the originating external id.
    pub fn favorite_key(&self) -> Option<String> {
        self.osm_id.map(|id| id.to_string())
    }

    /// Project into an external-kind snapshot so the detail view can treat
    /// both kinds the same way.
    ///
    /// Returns `None` when the record carries no external id.
    pub fn to_external(&self) -> Option<ExternalRestaurant> {
        let osm_id = self.osm_id?;
        let mut tags = HashMap::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                tags.insert(key.to_string(), v.to_string());
            }
        };
        put("name", Some(self.name.as_str()));
        put("addr:city", self.city.as_deref());
        put("addr:street", self.address.as_deref());
        put("cuisine", self.cuisine.as_deref());

        Some(ExternalRestaurant {
            id: osm_id,
            lat: self.lat.unwrap_or_default(),
            lon: self.lon.unwrap_or_default(),
            tags,
        })
    }
}

/// Body of `POST /restaurantes/importar`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantImport {
    #[serde(rename = "osmId")]
    pub osm_id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipoCocina")]
    pub cuisine: String,
    pub lat: f64,
    pub lon: f64,
}

impl RestaurantImport {
    /// Build the import snapshot, filling gaps with the standard defaults.
    ///
    /// `city_fallback` is the city the user searched by.
    pub fn from_external(restaurant: &ExternalRestaurant, city_fallback: &str) -> Self {
        Self {
            osm_id: restaurant.id,
            name: restaurant.display_name().to_string(),
            city: restaurant.city().unwrap_or(city_fallback).to_string(),
            address: restaurant.street().unwrap_or_default().to_string(),
            cuisine: restaurant.cuisine().unwrap_or(DEFAULT_CUISINE).to_string(),
            lat: restaurant.lat,
            lon: restaurant.lon,
        }
    }
}

/// Search filters for `GET /restaurantes/externos/buscar`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub name: String,
    pub city: String,
    pub cuisine: String,
    pub address: String,
}

impl RestaurantFilter {
    /// Query pairs for the non-empty filters, in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("nombre", self.name.as_str()),
            ("ciudad", self.city.as_str()),
            ("tipoCocina", self.cuisine.as_str()),
            ("direccion", self.address.as_str()),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.trim()))
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }
}
