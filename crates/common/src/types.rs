//! Core types for the pet resource

use serde::{Deserialize, Serialize};

/// Category a pet belongs to.
///
/// `id` is always written and defaults to 0, which is what the service
/// assigns to a category sent without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// The pet resource as exchanged with the service.
///
/// `name` is nullable and is always written, so an unnamed pet goes out as
/// `"name": null`. Extra response fields such as `photoUrls` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Pet {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            category: None,
            status: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Change the display name in place
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_full_pet() {
        let pet = Pet::new(9222968140498484534)
            .with_name("Sunny")
            .with_category(Category::new("Dog"))
            .with_status("available");

        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 9222968140498484534_i64,
                "name": "Sunny",
                "category": { "id": 0, "name": "Dog" },
                "status": "available"
            })
        );
    }

    #[test]
    fn test_null_name_is_written() {
        let pet = Pet::new(2).with_category(Category::new("Dog"));
        let value = serde_json::to_value(&pet).unwrap();
        assert!(value.get("name").unwrap().is_null());
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"{
            "id": -2,
            "category": { "id": 0, "name": "Dog" },
            "name": "Sunny",
            "photoUrls": [],
            "tags": [],
            "status": "available"
        }"#;
        let pet: Pet = serde_json::from_str(body).unwrap();
        assert_eq!(pet.id, -2);
        assert_eq!(pet.name.as_deref(), Some("Sunny"));
        assert_eq!(pet.category.unwrap(), Category::new("Dog"));
    }

    #[test]
    fn test_category_without_id_decodes_as_zero() {
        let category: Category = serde_json::from_str(r#"{"name":"Dog"}"#).unwrap();
        assert_eq!(category, Category::new("Dog"));
    }

    #[test]
    fn test_rename_breaks_equality() {
        let original = Pet::new(2).with_name("Sunny");
        let mut renamed = original.clone();
        renamed.rename("BigSunny");
        assert_ne!(original, renamed);
        assert_eq!(renamed.name.as_deref(), Some("BigSunny"));
    }
}
