use serde::Serialize;

/// In-memory snapshot of engine progress and mutual-exclusion flags.
///
/// Mutated only by engine code on the single-threaded-equivalent owner of
/// the lock (see `MirroringEngine`); the struct itself carries no
/// synchronization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MirroringStatus {
    pub index_files: Vec<String>,
    pub total_items: usize,
    pub batch_total: usize,
    pub batch_completed: usize,
    pub items_processed: usize,
    pub is_mirroring_galleryinfo: bool,
    pub is_converting_to_info: bool,
    pub is_checking_integrity: bool,
    pub last_checked_at: String,
    pub last_mirrored_at: String,
}

impl MirroringStatus {
    pub fn default_with_index_files(index_files: Vec<String>) -> Self {
        Self {
            index_files,
            ..Default::default()
        }
    }

    /// Zeroes the per-run progress counters. Does not touch the flags or
    /// timestamps.
    pub fn reset(&mut self) {
        self.total_items = 0;
        self.batch_total = 0;
        self.batch_completed = 0;
        self.items_processed = 0;
    }
}
