//! Wire types exchanged with the GastroLog backend.
//!
//! Field names on the wire are Spanish camelCase; Rust-side names are
//! English and mapped with `serde(rename)`.

mod cuisine;
mod page;
mod profile;
mod restaurant;
mod review;

pub use cuisine::{cuisine_label, Cuisine, CUISINES};
pub use page::Page;
pub use profile::{Profile, PublicProfile, RelationshipStatus, UserSummary};
pub use restaurant::{
    ExternalRestaurant, LocalRestaurant, RestaurantFilter, RestaurantImport, DEFAULT_CUISINE,
    DEFAULT_RESTAURANT_NAME,
};
pub use review::{PhotoUpload, Review, ReviewDraft};

use serde::{Deserialize, Deserializer};

/// Deserialize a string that the backend may send as `null`.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a list that the backend may send as `null`.
pub(crate) fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_nullable_string")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_nullable_vec")]
        items: Vec<i32>,
    }

    #[test]
    fn test_nulls_become_defaults() {
        let h: Holder = serde_json::from_str(r#"{"name": null, "items": null}"#).unwrap();
        assert_eq!(h.name, "");
        assert!(h.items.is_empty());

        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(h.name, "");

        let h: Holder = serde_json::from_str(r#"{"name": "ana", "items": [1, 2]}"#).unwrap();
        assert_eq!(h.name, "ana");
        assert_eq!(h.items, vec![1, 2]);
    }
}
