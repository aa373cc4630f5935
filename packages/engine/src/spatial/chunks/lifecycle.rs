use super::*;

impl Chunk {
    // === Dormancy ===

    #[inline]
    pub fn idle_ticks(&self) -> u8 {
        self.idle_ticks
    }

    /// Dormant chunks are skipped by evaluate until a message wakes them.
    #[inline]
    pub fn is_dormant(&self, threshold: u8) -> bool {
        self.idle_ticks >= threshold
    }

    /// Called when a message (or an edit) targets one of this chunk's cells.
    /// Returns true if the chunk was dormant.
    #[inline]
    pub fn wake(&mut self, threshold: u8) -> bool {
        let was_dormant = self.is_dormant(threshold);
        self.idle_ticks = 0;
        was_dormant
    }

    /// Called after this chunk was evaluated: one more tick without inbound
    /// messages. Only `wake` (an inbound message or an edit) resets it, so a
    /// chunk that only sends still goes dormant.
    #[inline]
    pub(crate) fn end_evaluate(&mut self) {
        self.idle_ticks = self.idle_ticks.saturating_add(1);
    }

    /// Force the chunk back into the evaluated set.
    #[inline]
    pub fn mark_active(&mut self) {
        self.idle_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_chunk_goes_dormant_after_threshold_evaluations() {
        let mut chunk = Chunk::new();
        for _ in 0..4 {
            chunk.end_evaluate();
            assert!(!chunk.is_dormant(5));
        }
        chunk.end_evaluate();
        assert!(chunk.is_dormant(5));
        assert!(chunk.wake(5));
        assert_eq!(chunk.idle_ticks(), 0);
        assert!(!chunk.wake(5));
    }

    #[test]
    fn outgoing_messages_do_not_keep_chunk_awake() {
        let mut chunk = Chunk::new();
        for _ in 0..5 {
            chunk.outbox.push(Message::power(40, 0));
            chunk.end_evaluate();
        }
        assert!(chunk.is_dormant(5));

        chunk.wake(5);
        chunk.end_evaluate();
        assert_eq!(chunk.idle_ticks(), 1);
    }
}
