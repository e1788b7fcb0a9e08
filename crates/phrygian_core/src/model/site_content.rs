//! Site content document model.
//!
//! # Responsibility
//! - Define the JSON document holding hero, intro and gallery content.
//! - Provide explicit merge rules for sections and gallery images.
//!
//! # Invariants
//! - Unknown top-level keys survive a read/write round trip.
//! - Merges are shallow: nested values are replaced, never merged.
//! - A gallery image `id` is always an integer. Integral floats such as
//!   `3.0` are read as integers; any other id makes the document invalid.
//! - Gallery ids never wrap: an image at `i64::MAX` blocks further creates.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a gallery image, unique within one document.
pub type GalleryImageId = i64;

/// JSON object with preserved key order.
pub type Fields = Map<String, Value>;

/// Editable object sections of the site document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    Intro,
}

impl Section {
    /// Returns the document key this section is stored under.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Intro => "intro",
        }
    }
}

/// Whole site content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub hero: Fields,
    #[serde(default)]
    pub intro: Fields,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    /// Top-level keys this service does not manage.
    #[serde(flatten)]
    pub extra: Fields,
}

impl SiteContent {
    /// Returns the mutable object stored under `section`.
    pub fn section_mut(&mut self, section: Section) -> &mut Fields {
        match section {
            Section::Hero => &mut self.hero,
            Section::Intro => &mut self.intro,
        }
    }

    /// Returns the id the next appended gallery image receives.
    ///
    /// `1` for an empty gallery, otherwise the largest existing id plus one.
    ///
    /// # Errors
    /// - `GalleryValidationError::IdsExhausted` when the largest id is
    ///   `i64::MAX`.
    pub fn next_gallery_id(&self) -> Result<GalleryImageId, GalleryValidationError> {
        match self.gallery.iter().map(|image| image.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or(GalleryValidationError::IdsExhausted),
        }
    }
}

/// One image entry of the gallery array.
///
/// Besides `id`, entries carry arbitrary caller-defined fields (url, alt,
/// caption, ...), kept in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: GalleryImageId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl GalleryImage {
    /// Builds an image from client fields, forcing `id`.
    ///
    /// Any `id` present in `fields` is discarded.
    pub fn with_id(id: GalleryImageId, mut fields: Fields) -> Self {
        fields.shift_remove("id");
        Self { id, fields }
    }

    /// Shallow-merges `partial` over this image.
    ///
    /// A `partial.id` replaces the current id. Nothing is modified when
    /// validation fails.
    ///
    /// # Errors
    /// - `GalleryValidationError::NonIntegerId` when `partial.id` is not an
    ///   integer.
    pub fn merge(&mut self, mut partial: Fields) -> Result<(), GalleryValidationError> {
        let new_id = match partial.shift_remove("id") {
            Some(value) => {
                Some(integral_id(&value).ok_or(GalleryValidationError::NonIntegerId(value))?)
            }
            None => None,
        };

        if let Some(id) = new_id {
            self.id = id;
        }
        shallow_merge(&mut self.fields, partial);
        Ok(())
    }
}

/// Validation error for gallery payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryValidationError {
    NonIntegerId(Value),
    IdsExhausted,
}

impl Display for GalleryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerId(value) => write!(f, "gallery image id must be an integer, got {value}"),
            Self::IdsExhausted => write!(f, "gallery image ids are exhausted"),
        }
    }
}

impl Error for GalleryValidationError {}

/// Reads an id from an integer or an integral float within `i64` range.
fn integral_id(value: &Value) -> Option<GalleryImageId> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GalleryImageId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    integral_id(&value)
        .ok_or_else(|| D::Error::custom(format!("gallery image id must be an integer, got {value}")))
}

/// Copies every top-level entry of `partial` into `target`.
///
/// Existing keys keep their position; new keys are appended.
pub fn shallow_merge(target: &mut Fields, partial: Fields) {
    for (key, value) in partial {
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::{shallow_merge, Fields, GalleryImage, GalleryValidationError, SiteContent};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn next_gallery_id_starts_at_one() {
        assert_eq!(SiteContent::default().next_gallery_id(), Ok(1));
    }

    #[test]
    fn next_gallery_id_follows_max_not_len() {
        let content: SiteContent = serde_json::from_value(json!({
            "gallery": [{"id": 2}, {"id": 7}, {"id": 5}]
        }))
        .unwrap();
        assert_eq!(content.next_gallery_id(), Ok(8));
    }

    #[test]
    fn next_gallery_id_refuses_to_wrap() {
        let content: SiteContent = serde_json::from_value(json!({
            "gallery": [{"id": i64::MAX}]
        }))
        .unwrap();
        assert_eq!(
            content.next_gallery_id(),
            Err(GalleryValidationError::IdsExhausted)
        );
    }

    #[test]
    fn integral_float_ids_are_read_as_integers() {
        let content: SiteContent = serde_json::from_value(json!({
            "gallery": [{"id": 3.0, "url": "a"}]
        }))
        .unwrap();
        assert_eq!(content.gallery[0].id, 3);
        assert_eq!(
            serde_json::to_value(&content.gallery[0]).unwrap(),
            json!({"id": 3, "url": "a"})
        );
    }

    #[test]
    fn fractional_or_textual_ids_make_the_document_invalid() {
        for id in [json!(2.5), json!("4"), json!(null)] {
            let parsed = serde_json::from_value::<SiteContent>(json!({"gallery": [{"id": id}]}));
            assert!(parsed.is_err());
        }
    }

    #[test]
    fn with_id_keeps_client_field_order() {
        let image =
            GalleryImage::with_id(1, fields(json!({"id": 9, "url": "a", "alt": "b", "caption": "c"})));
        let keys: Vec<&str> = image.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["url", "alt", "caption"]);
    }

    #[test]
    fn shallow_merge_replaces_nested_values_wholesale() {
        let mut target = fields(json!({"title": "X", "cta": {"label": "Go", "href": "/a"}}));
        shallow_merge(&mut target, fields(json!({"cta": {"label": "Walk"}})));
        assert_eq!(
            serde_json::Value::Object(target),
            json!({"title": "X", "cta": {"label": "Walk"}})
        );
    }

    #[test]
    fn merge_allows_partial_id_override() {
        let mut image = GalleryImage::with_id(3, fields(json!({"url": "a"})));
        image.merge(fields(json!({"id": 9, "alt": "b"}))).unwrap();
        assert_eq!(image.id, 9);
        assert_eq!(image.fields.get("url"), Some(&json!("a")));
        assert_eq!(image.fields.get("alt"), Some(&json!("b")));
        assert!(!image.fields.contains_key("id"));
    }

    #[test]
    fn merge_rejects_non_integer_id_without_modifying() {
        let mut image = GalleryImage::with_id(3, fields(json!({"url": "a"})));
        let err = image
            .merge(fields(json!({"id": "nine", "url": "b"})))
            .unwrap_err();
        assert!(matches!(err, GalleryValidationError::NonIntegerId(_)));
        assert_eq!(image.id, 3);
        assert_eq!(image.fields.get("url"), Some(&json!("a")));
    }

    #[test]
    fn unknown_top_level_keys_are_kept() {
        let raw = json!({"hero": {}, "intro": {}, "gallery": [], "footer": {"year": 2024}});
        let content: SiteContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(content.extra.get("footer"), Some(&json!({"year": 2024})));
        assert_eq!(serde_json::to_value(&content).unwrap(), raw);
    }
}
