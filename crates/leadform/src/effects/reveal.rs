//! At-most-once scroll reveal bookkeeping.

use std::collections::HashSet;
use std::hash::Hash;

/// Seconds between consecutive words of a revealed heading.
pub const WORD_STAGGER_SECS: f64 = 0.1;

/// Remembers which elements have already animated.
///
/// `K` identifies an element; the binding layer uses a per-element index.
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    threshold: f64,
    animated: HashSet<K>,
}

impl<K: Eq + Hash> RevealTracker<K> {
    /// Creates a tracker firing at `threshold` intersection ratio.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            animated: HashSet::new(),
        }
    }

    /// Reports an intersection change.
    ///
    /// Returns true exactly once per element: the first time its ratio
    /// reaches the threshold.
    pub fn observe(&mut self, key: K, ratio: f64) -> bool {
        if ratio < self.threshold {
            return false;
        }
        self.animated.insert(key)
    }

    /// Returns true if the element has animated.
    pub fn has_animated(&self, key: &K) -> bool {
        self.animated.contains(key)
    }

    /// Number of elements that have animated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animated.len()
    }

    /// Returns true if nothing has animated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animated.is_empty()
    }
}

/// CSS `animation-delay` for the word at `index` of a heading.
///
/// ```
/// assert_eq!(leadform::effects::stagger_delay(3), "0.3s");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stagger_delay(index: usize) -> String {
    let secs = index as f64 * WORD_STAGGER_SECS;
    format!("{}s", (secs * 1000.0).round() / 1000.0)
}
