/// A cuisine value accepted by the restaurant search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuisine {
    /// Value sent as `tipoCocina`.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Fixed catalogue offered by the filter form.
pub const CUISINES: &[Cuisine] = &[
    Cuisine { value: "spanish", label: "Española" },
    Cuisine { value: "tapas", label: "Tapas" },
    Cuisine { value: "basque", label: "Vasca" },
    Cuisine { value: "galician", label: "Gallega" },
    Cuisine { value: "mediterranean", label: "Mediterránea" },
    Cuisine { value: "italian", label: "Italiana" },
    Cuisine { value: "pizza", label: "Pizza" },
    Cuisine { value: "japanese", label: "Japonesa" },
    Cuisine { value: "sushi", label: "Sushi" },
    Cuisine { value: "chinese", label: "China" },
    Cuisine { value: "mexican", label: "Mexicana" },
    Cuisine { value: "indian", label: "India" },
    Cuisine { value: "burger", label: "Hamburguesa" },
    Cuisine { value: "fast_food", label: "Comida rápida" },
    Cuisine { value: "seafood", label: "Marisco" },
    Cuisine { value: "vegan", label: "Vegana" },
    Cuisine { value: "vegetarian", label: "Vegetariana" },
];

/// Label for a catalogue value, `None` for values outside the catalogue.
pub fn cuisine_label(value: &str) -> Option<&'static str> {
    CUISINES.iter().find(|c| c.value == value).map(|c| c.label)
}
