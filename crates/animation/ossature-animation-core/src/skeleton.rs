#![allow(dead_code)]
//! Bone tree of a model. Bone names are unique within a skeleton.

use glam::Vec3;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// A bone with its rest pose relative to the parent. Rotation is Euler
/// degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    #[serde(default)]
    pub offset: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    /// Item/texture identifier the adapter renders this bone with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_data: Option<u32>,
    #[serde(default)]
    pub children: Vec<Bone>,
}

impl Bone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            model_data: None,
            children: Vec::new(),
        }
    }

    pub fn with_model_data(mut self, model_data: u32) -> Self {
        self.model_data = Some(model_data);
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_child(mut self, child: Bone) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSkeleton")]
pub struct Skeleton {
    pub roots: Vec<Bone>,
}

#[derive(Deserialize)]
struct StoredSkeleton {
    roots: Vec<Bone>,
}

impl TryFrom<StoredSkeleton> for Skeleton {
    type Error = AnimationError;

    fn try_from(stored: StoredSkeleton) -> Result<Self> {
        Self::try_new(stored.roots)
    }
}

impl Skeleton {
    /// Unchecked constructor; a repeated bone name is only logged. Use
    /// [`try_new`](Self::try_new) to reject it.
    pub fn new(roots: Vec<Bone>) -> Self {
        let skeleton = Self { roots };
        if let Err(err) = skeleton.validate() {
            log::warn!("{err}; bones sharing a name share one animated frame");
        }
        skeleton
    }

    pub fn try_new(roots: Vec<Bone>) -> Result<Self> {
        let skeleton = Self { roots };
        skeleton.validate()?;
        Ok(skeleton)
    }

    /// Parse a skeleton, rejecting repeated bone names.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for bone in self.iter() {
            if !seen.insert(bone.name.as_str()) {
                return Err(AnimationError::DuplicateBone {
                    name: bone.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Every bone, parents before children, depth first.
    pub fn iter(&self) -> SkeletonIter<'_> {
        SkeletonIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Bone> {
        self.iter().find(|b| b.name == name)
    }

    pub fn bone_count(&self) -> usize {
        self.iter().count()
    }
}

pub struct SkeletonIter<'a> {
    stack: Vec<&'a Bone>,
}

impl<'a> Iterator for SkeletonIter<'a> {
    type Item = &'a Bone;

    fn next(&mut self) -> Option<Self::Item> {
        let bone = self.stack.pop()?;
        self.stack.extend(bone.children.iter().rev());
        Some(bone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_visits_parents_before_children() {
        let skeleton = Skeleton::new(vec![
            Bone::new("body")
                .with_child(Bone::new("head"))
                .with_child(Bone::new("arm").with_child(Bone::new("hand"))),
            Bone::new("tail"),
        ]);
        let names: Vec<&str> = skeleton.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["body", "head", "arm", "hand", "tail"]);
        assert_eq!(skeleton.bone_count(), 5);
        assert!(skeleton.find("hand").is_some());
    }

    #[test]
    fn deserializes_with_defaults() {
        let skeleton =
            Skeleton::from_json(r#"{"roots":[{"name":"root","offset":[0,1,0],"children":[{"name":"leaf"}]}]}"#)
                .unwrap();
        assert_eq!(skeleton.roots[0].offset, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(skeleton.roots[0].children[0].rotation, Vec3::ZERO);
        assert_eq!(skeleton.roots[0].model_data, None);
    }

    #[test]
    fn repeated_bone_names_are_rejected() {
        let json = r#"{"roots":[{"name":"arm","children":[{"name":"hand"}]},{"name":"hand"}]}"#;
        let err = Skeleton::from_json(json).unwrap_err();
        assert!(matches!(err, AnimationError::Serialization { ref reason } if reason.contains("hand")));

        let err = Skeleton::try_new(vec![Bone::new("a").with_child(Bone::new("a"))]).unwrap_err();
        assert_eq!(err, AnimationError::DuplicateBone { name: "a".to_string() });
    }

    #[test]
    fn reads_model_data() {
        let skeleton = Skeleton::from_json(r#"{"roots":[{"name":"head","model_data":12}]}"#).unwrap();
        assert_eq!(skeleton.roots[0].model_data, Some(12));
        assert_eq!(Bone::new("x").with_model_data(3).model_data, Some(3));
    }
}
