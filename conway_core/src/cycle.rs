// cycle.rs - Detects a board that keeps repeating itself

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::buffer::BitBuffer;

const HISTORY: usize = 10;

/// Remembers hashes of the last few generations
#[derive(Clone, Debug, Default)]
pub struct CycleDetector {
    history: [Option<u64>; HISTORY],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `cells` and reports whether it matched one of the
    /// recently recorded generations
    pub fn observe(&mut self, cells: &BitBuffer) -> bool {
        let mut hasher = DefaultHasher::new();
        cells.hash(&mut hasher);
        let hash = hasher.finish();

        if self.history.contains(&Some(hash)) {
            return true;
        }
        self.history[self.count % HISTORY] = Some(hash);
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
