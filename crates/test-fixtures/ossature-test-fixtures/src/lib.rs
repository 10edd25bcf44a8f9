//! Named JSON fixtures shared by the workspace tests.
//!
//! `fixtures/manifest.json` maps fixture names to paths relative to the
//! `fixtures/` directory, grouped by kind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    animations: BTreeMap<String, String>,
    #[serde(default)]
    skeletons: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Animation,
    Skeleton,
}

impl Kind {
    fn entries(self) -> &'static BTreeMap<String, String> {
        match self {
            Kind::Animation => &MANIFEST.animations,
            Kind::Skeleton => &MANIFEST.skeletons,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Kind::Animation => "animation",
            Kind::Skeleton => "skeleton",
        }
    }

    fn path(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label()))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn read(self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read {} fixture at {}", self.label(), path.display()))
    }

    fn parse<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.read(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {} fixture '{name}'", self.label()))
    }

    fn keys(self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }
}

/// Animation clips in the canonical animation JSON format.
pub mod animations {
    use super::*;

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        Kind::Animation.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        Kind::Animation.read(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Kind::Animation.path(name)
    }
}

/// Bone trees.
pub mod skeletons {
    use super::*;

    pub fn keys() -> Vec<String> {
        Kind::Skeleton.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        Kind::Skeleton.read(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        Kind::Skeleton.parse(name)
    }
}
