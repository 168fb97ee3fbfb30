//! Timing configuration for a typing run.

use serde::{Deserialize, Serialize};

/// Timing knobs, all delays in milliseconds.
///
/// Field aliases accept the camelCase names used by web embeddings of the
/// typewriter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingOptions {
    /// Delay after each typed character (default 55).
    #[serde(alias = "typingSpeed")]
    pub typing_speed: u64,

    /// Delay after each erased character (default 28).
    #[serde(alias = "deletingSpeed")]
    pub deleting_speed: u64,

    /// Symmetric jitter ratio applied to both delays (default 0.3).
    #[serde(alias = "randomJitter")]
    pub random_jitter: f64,

    /// Hold between a delete region's typed phase and its erasure (default 160).
    #[serde(alias = "afterDeletePause")]
    pub after_delete_pause: u64,

    /// Seed for the jitter generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl TypingOptions {
    pub const DEFAULT_TYPING_SPEED: u64 = 55;
    pub const DEFAULT_DELETING_SPEED: u64 = 28;
    pub const DEFAULT_RANDOM_JITTER: f64 = 0.3;
    pub const DEFAULT_AFTER_DELETE_PAUSE: u64 = 160;

    /// Options without jitter, handy when exact delays matter.
    pub fn steady() -> Self {
        Self {
            random_jitter: 0.0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            typing_speed: Self::DEFAULT_TYPING_SPEED,
            deleting_speed: Self::DEFAULT_DELETING_SPEED,
            random_jitter: Self::DEFAULT_RANDOM_JITTER,
            after_delete_pause: Self::DEFAULT_AFTER_DELETE_PAUSE,
            seed: None,
        }
    }
}
