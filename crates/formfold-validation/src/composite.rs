// File: src/composite.rs
// Purpose: Cross-field completeness validators for the structurally complex field types

use crate::rules::Violation;
use formfold_types::{Entity, ExtraParam, Value};
use std::collections::HashMap;

const ARTICLE_FIELDS: [&str; 5] = ["title", "content", "image_url", "subtitle", "button_link"];
const ARTICLE_MANDATORY: [&str; 3] = ["title", "content", "image_url"];

/// Article completeness: a partially filled article is rejected unless the
/// title/content/image triad is complete. An article with neither title nor
/// content is reset to empty and treated as not provided.
pub fn validate_article(entity: &mut Entity, attribute: &str) -> Result<(), Violation> {
    let (has_anchor, filled, mandatory) = match entity.get(attribute) {
        Some(Value::Object(fields)) => {
            let present =
                |key: &str| fields.get(key).map(Value::is_present).unwrap_or(false);
            (
                present("title") || present("content"),
                ARTICLE_FIELDS.into_iter().filter(|&k| present(k)).count(),
                ARTICLE_MANDATORY
                    .into_iter()
                    .filter(|&k| present(k))
                    .count(),
            )
        }
        _ => return Ok(()),
    };

    if !has_anchor {
        entity.set(attribute, Value::Object(HashMap::new()));
        return Ok(());
    }

    if filled > 0 && mandatory < ARTICLE_MANDATORY.len() {
        Err(Violation::IncompleteArticle)
    } else {
        Ok(())
    }
}

/// Showcase completeness: photo count against the configured ceiling, and a
/// required set of two entries (five for Instagram showcases).
pub fn validate_showcase(
    entity: &Entity,
    attribute: &str,
    extra: &ExtraParam,
) -> Result<(), Violation> {
    let fields = match entity.get(attribute) {
        Some(Value::Object(fields)) => Some(fields),
        _ => None,
    };
    let present = |key: &str| {
        fields
            .and_then(|f| f.get(key))
            .map(Value::is_present)
            .unwrap_or(false)
    };

    let num_photos = fields
        .and_then(|f| f.get("images"))
        .and_then(Value::as_array)
        .map(|images| images.iter().filter(|img| !is_deleted(img)).count())
        .unwrap_or(0);

    if extra.max_photos > 0 && num_photos > extra.max_photos {
        return Err(Violation::TooManyPhotos {
            max: extra.max_photos,
        });
    }

    let required = if extra.is_instagram_showcase { 5 } else { 2 };
    let mut filled = [present("title"), num_photos > 0]
        .into_iter()
        .filter(|filled| *filled)
        .count();
    if extra.is_instagram_showcase {
        filled += ["handle", "url", "profile_photo_url"]
            .into_iter()
            .filter(|&k| present(k))
            .count();
    }

    if filled > 0 && filled < required {
        Err(Violation::IncompleteShowcase)
    } else {
        Ok(())
    }
}

fn is_deleted(image: &Value) -> bool {
    match image {
        Value::Object(fields) => fields.get("state").and_then(Value::as_str) == Some("deleted"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entity(json: serde_json::Value) -> Entity {
        Entity::from_json(json)
    }

    #[test]
    fn test_article_triad_passes_without_optionals() {
        let mut e = entity(serde_json::json!({
            "article": {
                "title": "T",
                "content": ["line one"],
                "image_url": "/img.png"
            }
        }));
        assert!(validate_article(&mut e, "article").is_ok());
    }

    #[test]
    fn test_article_title_only_fails() {
        let mut e = entity(serde_json::json!({
            "article": { "title": "T" }
        }));
        assert_eq!(
            validate_article(&mut e, "article"),
            Err(Violation::IncompleteArticle)
        );
    }

    #[test]
    fn test_article_optional_fields_do_not_relax_mandatory() {
        let mut e = entity(serde_json::json!({
            "article": { "title": "T", "content": "C", "subtitle": "S" }
        }));
        assert_eq!(
            validate_article(&mut e, "article"),
            Err(Violation::IncompleteArticle)
        );
    }

    #[test]
    fn test_article_without_title_or_content_is_reset() {
        let mut e = entity(serde_json::json!({
            "article": { "image_url": "/img.png", "button_link": "/x" }
        }));
        assert!(validate_article(&mut e, "article").is_ok());
        assert_eq!(
            e.get("article"),
            Some(&Value::Object(HashMap::new())),
            "partial article without an anchor is treated as not provided"
        );
    }

    #[test]
    fn test_article_absent_passes_untouched() {
        let mut e = Entity::new();
        assert!(validate_article(&mut e, "article").is_ok());
        assert!(e.get("article").is_none());
    }

    #[test]
    fn test_showcase_title_only_fails() {
        let e = entity(serde_json::json!({
            "showcase": { "title": "My shop" }
        }));
        assert_eq!(
            validate_showcase(&e, "showcase", &ExtraParam::default()),
            Err(Violation::IncompleteShowcase)
        );
    }

    #[test]
    fn test_showcase_title_and_photo_passes() {
        let e = entity(serde_json::json!({
            "showcase": {
                "title": "My shop",
                "images": [{ "state": "ready", "file_path": "/a.jpg" }]
            }
        }));
        assert!(validate_showcase(&e, "showcase", &ExtraParam::default()).is_ok());
    }

    #[test]
    fn test_showcase_deleted_photos_do_not_count() {
        let e = entity(serde_json::json!({
            "showcase": {
                "title": "My shop",
                "images": [{ "state": "deleted" }]
            }
        }));
        assert_eq!(
            validate_showcase(&e, "showcase", &ExtraParam::default()),
            Err(Violation::IncompleteShowcase)
        );
    }

    #[test]
    fn test_showcase_photo_ceiling() {
        let e = entity(serde_json::json!({
            "showcase": {
                "title": "My shop",
                "images": [
                    { "state": "ready" },
                    { "state": "ready" },
                    { "state": "deleted" }
                ]
            }
        }));
        let capped = ExtraParam {
            is_instagram_showcase: false,
            max_photos: 1,
        };
        assert_eq!(
            validate_showcase(&e, "showcase", &capped),
            Err(Violation::TooManyPhotos { max: 1 })
        );

        // Deleted entries are excluded, so a ceiling of 2 fits
        let roomier = ExtraParam {
            is_instagram_showcase: false,
            max_photos: 2,
        };
        assert!(validate_showcase(&e, "showcase", &roomier).is_ok());
    }

    #[test]
    fn test_instagram_showcase_requires_full_set() {
        let instagram = ExtraParam {
            is_instagram_showcase: true,
            max_photos: 0,
        };

        let partial = entity(serde_json::json!({
            "showcase": {
                "title": "My feed",
                "images": [{ "state": "ready" }],
                "handle": "@me"
            }
        }));
        assert_eq!(
            validate_showcase(&partial, "showcase", &instagram),
            Err(Violation::IncompleteShowcase)
        );

        let complete = entity(serde_json::json!({
            "showcase": {
                "title": "My feed",
                "images": [{ "state": "ready" }],
                "handle": "@me",
                "url": "https://instagram.com/me",
                "profile_photo_url": "/p.jpg"
            }
        }));
        assert!(validate_showcase(&complete, "showcase", &instagram).is_ok());
    }

    #[test]
    fn test_showcase_untouched_passes() {
        let e = Entity::new();
        assert!(validate_showcase(&e, "showcase", &ExtraParam::default()).is_ok());
    }
}
