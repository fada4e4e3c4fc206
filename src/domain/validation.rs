//! Input payloads for the admin forms and the rules they must satisfy.
//!
//! The same rules run in the HTTP handlers and in the dashboard form
//! controller, so a form never sends a request the API would reject on shape.

use serde::{Deserialize, Serialize};

use super::{DomainError, FieldError};

const HEXCODE_MESSAGE: &str = "String must be a valid hexcode";

pub trait Validate {
    /// Every rule violation, in field order. Empty means valid.
    fn violations(&self) -> Vec<FieldError>;

    fn validate(&self) -> Result<(), DomainError> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

fn min_chars(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("String must contain at least {} character(s)", min),
        ));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInput {
    pub name: String,
}

impl Validate for StoreInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "name", &self.name, 1);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

impl Validate for BillboardInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "label", &self.label, 1);
        min_chars(&mut errors, "imageUrl", &self.image_url, 1);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub billboard_id: String,
}

impl Validate for CategoryInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "name", &self.name, 1);
        min_chars(&mut errors, "billboardId", &self.billboard_id, 1);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

impl Validate for SizeInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "name", &self.name, 1);
        min_chars(&mut errors, "value", &self.value, 1);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInput {
    pub name: String,
    pub value: String,
}

impl Validate for ColorInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "name", &self.name, 1);
        min_chars(&mut errors, "value", &self.value, 4);
        if !self.value.starts_with('#') {
            errors.push(FieldError::new("value", HEXCODE_MESSAGE));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub images: Vec<ImageInput>,
    pub price: f64,
    pub category_id: String,
    pub color_id: String,
    pub size_id: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl Validate for ProductInput {
    fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        min_chars(&mut errors, "name", &self.name, 1);
        if self.images.is_empty() {
            errors.push(FieldError::new("images", "At least one image is required"));
        }
        if self.images.iter().any(|i| i.url.is_empty()) {
            errors.push(FieldError::new("images", "Image url must not be empty"));
        }
        if !(self.price >= 1.0) {
            errors.push(FieldError::new(
                "price",
                "Number must be greater than or equal to 1",
            ));
        }
        min_chars(&mut errors, "categoryId", &self.category_id, 1);
        min_chars(&mut errors, "colorId", &self.color_id, 1);
        min_chars(&mut errors, "sizeId", &self.size_id, 1);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(name: &str, value: &str) -> ColorInput {
        ColorInput {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn color_accepts_hexcode() {
        assert!(color("Red", "#ff0000").validate().is_ok());
        assert!(color("Red", "#f00").validate().is_ok());
    }

    #[test]
    fn color_rejects_value_without_hash() {
        let errors = color("Red", "ff0000").violations();
        assert_eq!(errors, vec![FieldError::new("value", HEXCODE_MESSAGE)]);
    }

    #[test]
    fn color_rejects_short_value() {
        let errors = color("Red", "#f0").violations();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "value");
        assert!(errors[0].message.contains("at least 4"));
    }

    #[test]
    fn color_reports_every_failure() {
        let errors = color("", "").violations();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "value", "value"]);
    }

    #[test]
    fn product_rules() {
        let mut input = ProductInput {
            name: "Tee".into(),
            images: vec![ImageInput {
                url: "https://img/1.png".into(),
            }],
            price: 20.0,
            category_id: "c".into(),
            color_id: "k".into(),
            size_id: "s".into(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.images.clear();
        input.price = 0.5;
        let fields: Vec<String> = input.violations().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["images", "price"]);

        input.price = f64::NAN;
        assert!(input.violations().iter().any(|e| e.field == "price"));
    }

    #[test]
    fn payloads_use_camel_case() {
        let input: BillboardInput =
            serde_json::from_str(r#"{"label":"Summer","imageUrl":"https://img/b.png"}"#).unwrap();
        assert_eq!(input.image_url, "https://img/b.png");
    }
}
