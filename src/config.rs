//! Config loading and validation.
//!
//! The gallery is described by a single YAML file: a list of collections and
//! a flat list of shots, each naming its collection by slug. All validation
//! happens here, before any output file is written.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::GalleryError;
use crate::types::{Collection, HostUrl, Shot};

/// Fully validated gallery description.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub collections: Vec<Collection>,
    pub shots: Vec<Shot>,
}

impl Config {
    pub fn collection(&self, slug: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.slug == slug)
    }

    /// Shots belonging to a collection, in declaration order.
    pub fn shots_in<'a>(&'a self, slug: &str) -> Vec<&'a Shot> {
        self.shots.iter().filter(|s| s.collection == slug).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    collections: Vec<RawCollection>,
    #[serde(default)]
    shots: Vec<RawShot>,
}

fn default_title() -> String {
    "Cosmetics Archive".to_string()
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    slug: String,
    name_single: String,
    name_plural: String,
    base_dir: String,
}

#[derive(Debug, Deserialize)]
struct RawShot {
    name: String,
    collection: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Read and validate a gallery config file.
pub fn load(path: &Path) -> Result<Config, GalleryError> {
    let content = fs::read_to_string(path).map_err(|e| {
        GalleryError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse(&content)
}

/// Parse and validate config text. Split from `load` so tests can feed
/// YAML strings directly.
pub fn parse(content: &str) -> Result<Config, GalleryError> {
    let raw: RawConfig = serde_yaml::from_str(content)
        .map_err(|e| GalleryError::Config(format!("malformed config: {}", e)))?;

    if raw.collections.is_empty() {
        return Err(GalleryError::Config("no collections declared".to_string()));
    }

    let mut slugs = HashSet::new();
    let mut collections = Vec::with_capacity(raw.collections.len());
    for c in raw.collections {
        if c.slug.is_empty() {
            return Err(GalleryError::Config(format!(
                "collection '{}' has an empty slug",
                c.name_plural
            )));
        }
        if !slugs.insert(c.slug.clone()) {
            return Err(GalleryError::Config(format!(
                "duplicate collection slug '{}'",
                c.slug
            )));
        }
        collections.push(Collection {
            slug: c.slug,
            name_single: c.name_single,
            name_plural: c.name_plural,
            base_dir: c.base_dir,
        });
    }

    let mut shots = Vec::with_capacity(raw.shots.len());
    for s in raw.shots {
        if s.name.is_empty() {
            return Err(GalleryError::Config("shot with an empty name".to_string()));
        }
        if !slugs.contains(&s.collection) {
            return Err(GalleryError::Config(format!(
                "shot '{}' references unknown collection '{}'",
                s.name, s.collection
            )));
        }
        // A URL is only ever an override; the local file is mandatory.
        let filename = match s.filename {
            Some(f) if !f.is_empty() => f,
            _ => {
                return Err(GalleryError::Config(format!(
                    "shot '{}' has no local image filename",
                    s.name
                )))
            }
        };
        let url = match s.url {
            Some(u) if !u.is_empty() => Some(HostUrl::classify(&u)),
            _ => None,
        };
        shots.push(Shot {
            name: s.name,
            collection: s.collection,
            filename,
            label: s.label,
            url,
        });
    }

    Ok(Config {
        title: raw.title,
        collections,
        shots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
title: Test Archive
collections:
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads
  - slug: skins
    name_single: Skin
    name_plural: Skins
    base_dir: char_skins/all
shots:
  - name: Alpha
    collection: heads
    filename: alpha.png
  - name: Beta
    collection: heads
    filename: beta.png
    url: https://example.com/beta.png
  - name: Gamma
    collection: skins
    filename: gamma.jpg
    label: (default skin)
"#;

    #[test]
    fn parses_valid_config() {
        let config = parse(VALID).unwrap();
        assert_eq!(config.title, "Test Archive");
        assert_eq!(config.collections.len(), 2);
        assert_eq!(config.shots.len(), 3);

        let heads = config.shots_in("heads");
        assert_eq!(heads.len(), 2);
        // Declaration order is preserved, never sorted
        assert_eq!(heads[0].name, "Alpha");
        assert_eq!(heads[1].name, "Beta");
        assert!(heads[0].url.is_none());
        assert_eq!(
            heads[1].url.as_ref().unwrap().sized(800, 450),
            "https://example.com/beta.png"
        );

        let gamma = &config.shots_in("skins")[0];
        assert_eq!(gamma.label.as_deref(), Some("(default skin)"));
    }

    #[test]
    fn title_defaults_when_omitted() {
        let config = parse(
            "collections:\n  - slug: a\n    name_single: A\n    name_plural: As\n    base_dir: a\n",
        )
        .unwrap();
        assert_eq!(config.title, "Cosmetics Archive");
    }

    #[test]
    fn unknown_collection_is_config_error() {
        let yaml = r#"
collections:
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads
shots:
  - name: Alpha
    collection: torsos
    filename: alpha.png
"#;
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown collection 'torsos'"));
    }

    #[test]
    fn shot_without_filename_is_config_error() {
        let yaml = r#"
collections:
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads
shots:
  - name: Alpha
    collection: heads
"#;
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("no local image filename"));
    }

    #[test]
    fn url_only_shot_is_still_config_error() {
        // The URL is an override, not a replacement for the local file
        let yaml = r#"
collections:
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads
shots:
  - name: Alpha
    collection: heads
    url: https://example.com/alpha.png
"#;
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn duplicate_slug_is_config_error() {
        let yaml = r#"
collections:
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads
  - slug: heads
    name_single: Head
    name_plural: Heads
    base_dir: heads2
"#;
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate collection slug"));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let err = parse("collections: [").unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }
}
