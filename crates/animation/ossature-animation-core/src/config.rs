#![allow(dead_code)]
//! Controller configuration.

use serde::{Deserialize, Serialize};

/// What `clear_queue` does with the remembered per-bone frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Keep them, so the next queued animation blends from the pose at clear time.
    #[default]
    KeepPose,
    /// Drop them; bones snap back to rest.
    ResetPose,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub clear_policy: ClearPolicy,
    /// Name reported for synthesized transition clips.
    pub transition_name: String,
    /// Also blend bones that have a remembered frame but are not animated by
    /// the incoming animation back to rest during a transition.
    pub blend_untracked_bones: bool,
    /// Pending events kept before the oldest are dropped.
    pub max_pending_events: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            clear_policy: ClearPolicy::default(),
            transition_name: "<generated-transition>".to_string(),
            blend_untracked_bones: false,
            max_pending_events: 1024,
        }
    }
}
