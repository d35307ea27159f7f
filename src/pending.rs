use crate::state::Bankroll;

impl Bankroll {
    pub fn enqueue(&mut self, round_id: u64) {
        self.pending.push(round_id);
    }

    /// Remove up to `max_count` round ids, most recently enqueued first.
    pub fn take_pending(&mut self, max_count: u32) -> Vec<u64> {
        let count = (max_count as usize).min(self.pending.len());
        let split_at = self.pending.len() - count;
        let mut batch = self.pending.split_off(split_at);
        batch.reverse();
        batch
    }
}
