//! Literal pets used as scenario input
//!
//! The ids are fixed, so runs against a shared service see whatever earlier
//! runs left behind under the same ids.

use petstore_common::{Category, Pet};

/// Id the delete-twice scenario removes
pub const DELETE_TWICE_ID: i64 = 1;

/// Name the update scenarios rename a fixture to
pub const RENAMED_TO: &str = "BigSunny";

/// A labelled pet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub label: &'static str,
    pub pet: Pet,
}

/// The three fixtures in catalog order, built fresh on every call
pub fn fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            label: "sunny-large-id",
            pet: Pet::new(9222968140498484534)
                .with_name("Sunny")
                .with_category(Category::new("Dog"))
                .with_status("available"),
        },
        Fixture {
            label: "sunny-negative-id",
            pet: Pet::new(-2)
                .with_name("Sunny")
                .with_category(Category::new("Dog"))
                .with_status("available"),
        },
        Fixture {
            label: "unnamed-small-id",
            pet: Pet::new(2)
                .with_category(Category::new("Dog"))
                .with_status("available"),
        },
    ]
}

/// Look up a fixture by label
pub fn by_label(label: &str) -> Option<Fixture> {
    fixtures().into_iter().find(|f| f.label == label)
}
