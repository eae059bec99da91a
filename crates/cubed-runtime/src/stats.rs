/// What a single `update` call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub inserted: usize,
    pub evicted: usize,
    pub scheduled: usize,
    /// Set when scheduling stopped early because a tier had no free slot.
    pub exhausted: bool,
    pub applied: usize,
    pub discarded: usize,
}

impl TickReport {
    /// Finished jobs taken out of the pool this tick.
    #[inline]
    pub fn drained(&self) -> usize {
        self.applied + self.discarded
    }
}

/// Snapshot of the streaming state for periodic logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    pub loaded: usize,
    pub filled: usize,
    pub renderable: usize,
    pub queued_normal: usize,
    pub queued_low: usize,
    pub applied_total: u64,
    pub discarded_total: u64,
    pub ticks: u64,
}
