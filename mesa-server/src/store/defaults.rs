//! Built-in Menu Dataset
//!
//! Immutable last tier of the read fallback chain: when both the
//! database and the structured file are unavailable the public page
//! still renders this menu instead of an empty one.

use shared::models::{MenuItem, RESERVED_CATEGORY};

pub fn default_categories() -> Vec<String> {
    vec![
        RESERVED_CATEGORY.to_string(),
        "Starters".to_string(),
        "Mains".to_string(),
        "Desserts".to_string(),
    ]
}

pub fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: "1".to_string(),
            name: "Pão com azeite".to_string(),
            description: "Fresh bread with olive oil and flor de sal".to_string(),
            price: "3,50 €".to_string(),
            category: "Starters".to_string(),
            image: None,
            images: None,
            preparation: None,
            image_position: None,
            images_positions: None,
            translations: None,
            hidden: false,
            sort_order: 1,
        },
        MenuItem {
            id: "2".to_string(),
            name: "Bacalhau à Brás".to_string(),
            description: "Shredded cod with onions, straw potatoes and egg".to_string(),
            price: "14,50 €".to_string(),
            category: "Mains".to_string(),
            image: None,
            images: None,
            preparation: None,
            image_position: None,
            images_positions: None,
            translations: None,
            hidden: false,
            sort_order: 2,
        },
        MenuItem {
            id: "3".to_string(),
            name: "Pastel de nata".to_string(),
            description: "Warm custard tart with cinnamon".to_string(),
            price: "2,00 €".to_string(),
            category: "Desserts".to_string(),
            image: None,
            images: None,
            preparation: None,
            image_position: None,
            images_positions: None,
            translations: None,
            hidden: false,
            sort_order: 3,
        },
    ]
}
