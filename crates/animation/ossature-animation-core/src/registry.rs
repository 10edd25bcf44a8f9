#![allow(dead_code)]
//! Named animation storage shared by controllers.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::data::Animation;
use crate::error::{AnimationError, Result};
use crate::stored_animation::parse_animation_json;

/// Animations by name. Entries are immutable and handed out as `Arc`s so any
/// number of controllers can play them.
#[derive(Clone, Debug, Default)]
pub struct AnimationRegistry {
    items: HashMap<String, Arc<Animation>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `animation` under its own name, returning any previous entry.
    pub fn insert(&mut self, animation: Animation) -> Option<Arc<Animation>> {
        let name = animation.name().to_string();
        let previous = self.items.insert(name.clone(), Arc::new(animation));
        if previous.is_some() {
            log::debug!("registry replaced animation '{name}'");
        }
        previous
    }

    /// Parse canonical JSON and store the result. Returns the stored handle.
    pub fn load_json(&mut self, json: &str) -> Result<Arc<Animation>> {
        let animation = parse_animation_json(json)?;
        let name = animation.name().to_string();
        self.insert(animation);
        self.get(&name).ok_or(AnimationError::AnimationNotFound { name })
    }

    pub fn get(&self, name: &str) -> Option<Arc<Animation>> {
        self.items.get(name).cloned()
    }

    /// Like [`AnimationRegistry::get`] but reports a missing name as an error.
    pub fn require(&self, name: &str) -> Result<Arc<Animation>> {
        self.get(name).ok_or_else(|| AnimationError::AnimationNotFound {
            name: name.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<Animation>> {
        self.items.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
