//! Linear edit history for the single-image editor.
//!
//! The history is a list of snapshots and a cursor. Committing after an undo
//! discards everything past the cursor, so there is never a redo branch.

use crate::raster::RasterBuffer;

/// Snapshot stack with a current position.
///
/// Once non-empty, `index < snapshots.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditHistory {
    snapshots: Vec<RasterBuffer>,
    index: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a single snapshot.
    pub fn load(&mut self, image: RasterBuffer) {
        self.snapshots.clear();
        self.snapshots.push(image);
        self.index = 0;
    }

    /// Record a new state after the current one.
    ///
    /// Snapshots after the cursor are dropped. On an empty history this is
    /// the same as [`load`](Self::load).
    pub fn commit(&mut self, image: RasterBuffer) {
        if self.snapshots.is_empty() {
            self.load(image);
            return;
        }
        let discarded = self.snapshots.len() - (self.index + 1);
        if discarded > 0 {
            tracing::debug!(discarded, "commit after undo drops newer snapshots");
        }
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(image);
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns `false` when already at the first.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&RasterBuffer> {
        self.snapshots.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[RasterBuffer] {
        &self.snapshots
    }
}
