// ============================================================================
// spark-broadcast - Configuration
// Plain-data options for one enhancer instance
// ============================================================================
//
// Capabilities that are not data (runtime, animation-frame hook) are injected
// through EnhancerBuilder instead of living here.
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_IMMEDIATE_PREFIX, DEFAULT_PASSIVE_PREFIX};
use super::error::{BroadcastError, BroadcastResult};

// =============================================================================
// PRIORITY
// =============================================================================

/// How an event kind is treated by the classifier, ignoring current flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// State may change, but no notification is owed
    Passive,
    /// Notify right away, bypassing throttling
    Immediate,
    /// Subject to the batching/throttling policy
    Normal,
}

// =============================================================================
// PREFIXES
// =============================================================================

/// Event-kind markers for passive and immediate events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Prefixes {
    pub passive: String,
    pub immediate: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            passive: DEFAULT_PASSIVE_PREFIX.to_string(),
            immediate: DEFAULT_IMMEDIATE_PREFIX.to_string(),
        }
    }
}

impl Prefixes {
    /// Tag `name` as passive.
    ///
    /// # Example
    ///
    /// ```
    /// use spark_broadcast::Prefixes;
    ///
    /// let prefixes = Prefixes::default();
    /// assert_eq!(prefixes.passive("SCROLL"), "@@PASSIVE/SCROLL");
    /// ```
    pub fn passive(&self, name: &str) -> String {
        format!("{}{}", self.passive, name)
    }

    /// Tag `name` as immediate.
    pub fn immediate(&self, name: &str) -> String {
        format!("{}{}", self.immediate, name)
    }

    pub fn is_immediate(&self, kind: &str) -> bool {
        kind.starts_with(&self.immediate)
    }

    pub fn is_passive(&self, kind: &str) -> bool {
        kind.starts_with(&self.passive)
    }

    /// Classify an event kind. The immediate marker wins over the passive one.
    pub fn priority(&self, kind: &str) -> Priority {
        if self.is_immediate(kind) {
            Priority::Immediate
        } else if self.is_passive(kind) {
            Priority::Passive
        } else {
            Priority::Normal
        }
    }
}

// =============================================================================
// BROADCAST CONFIG
// =============================================================================

/// Options recognized by [`NotificationEnhancer`](crate::NotificationEnhancer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BroadcastConfig {
    /// Coalesce normal changes into tick-delayed rounds.
    pub throttle: bool,

    /// Request an animation frame after every throttled round.
    #[cfg_attr(feature = "serde", serde(alias = "triggerAnimationFrame"))]
    pub request_animation: bool,

    pub prefixes: Prefixes,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            throttle: false,
            request_animation: true,
            prefixes: Prefixes::default(),
        }
    }
}

impl BroadcastConfig {
    /// Config with throttling enabled and everything else at defaults.
    pub fn throttled() -> Self {
        Self {
            throttle: true,
            ..Self::default()
        }
    }

    /// Reject prefixes that would make classification meaningless.
    ///
    /// An empty passive prefix would mark every event passive, and an empty or
    /// shared immediate prefix would shadow every other event.
    pub fn validate(&self) -> BroadcastResult<()> {
        if self.prefixes.passive.is_empty() {
            return Err(BroadcastError::invalid_config("passive prefix is empty"));
        }
        if self.prefixes.immediate.is_empty() {
            return Err(BroadcastError::invalid_config("immediate prefix is empty"));
        }
        if self.prefixes.passive == self.prefixes.immediate {
            return Err(BroadcastError::invalid_config(format!(
                "passive and immediate prefixes are both {:?}",
                self.prefixes.passive
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
