//! # Sampler
//!
//! Converts an unbounded stream of scan messages into a bounded, ordered
//! history of single readings. The angle of each reading is inferred from
//! call order; messages carry no per-reading angle.

use log::{debug, info, trace, warn};

use crate::{
    ANGULAR_STEPS, DEFAULT_CAPACITY, RangeScan, RotationCursor, Sample, SampleHistory,
};

/// Collecting → Terminal, fired once when the history reaches capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Collecting,
    Terminal,
}

#[derive(Debug, Clone)]
pub struct Sampler {
    cursor: RotationCursor,
    history: SampleHistory,
    state: SamplerState,
}

impl Sampler {
    /// Sampler collecting `DEFAULT_CAPACITY` samples (three rotations).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of 0 yields a sampler that is terminal from the start.
    pub fn with_capacity(capacity: usize) -> Self {
        let history = SampleHistory::with_capacity(capacity);
        let state = if history.is_full() {
            SamplerState::Terminal
        } else {
            SamplerState::Collecting
        };
        Self {
            cursor: RotationCursor::new(),
            history,
            state,
        }
    }

    /// Sampler collecting `rotations` full passes of the cursor.
    ///
    /// Returns `None` when `ANGULAR_STEPS * rotations` does not fit in `usize`.
    pub fn with_rotations(rotations: usize) -> Option<Self> {
        ANGULAR_STEPS.checked_mul(rotations).map(Self::with_capacity)
    }

    /// Take one reading from `scan` at the cursor position.
    ///
    /// If the cursor lies past the end of the message's readings it is reset
    /// to 0 before reading. Calls made after the sampler is terminal, and
    /// messages with no readings at all, leave the state untouched.
    ///
    /// # Returns
    /// The state after the call. `Terminal` tells the driver to stop delivering.
    pub fn ingest<S: RangeScan + ?Sized>(&mut self, scan: &S) -> SamplerState {
        if self.state == SamplerState::Terminal {
            trace!("ingest after terminal ignored");
            return self.state;
        }

        let ranges = scan.ranges();
        if ranges.is_empty() {
            warn!("scan message without readings ignored");
            return self.state;
        }

        let expected = self.cursor.position();
        if self.cursor.realign(ranges.len()) {
            warn!(
                "scan has {} readings, cursor at {}; realigned to 0",
                ranges.len(),
                expected
            );
        }

        let angle_index = self.cursor.position();
        let distance = ranges[angle_index];
        debug!(
            "received scan data: angle {}°, distance {} m",
            angle_index, distance
        );

        self.history.push(Sample::new(angle_index, distance));
        self.cursor.advance();

        if self.history.is_full() {
            self.state = SamplerState::Terminal;
            info!(
                "collected {} samples ({} rotations), sampler terminal",
                self.history.len(),
                self.history.rotations()
            );
        }
        self.state
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == SamplerState::Terminal
    }

    /// Angle index the next accepted reading will be taken from.
    pub fn cursor(&self) -> usize {
        self.cursor.position()
    }

    /// Number of times the cursor has wrapped around.
    pub fn rotations(&self) -> usize {
        self.cursor.rotations()
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn into_history(self) -> SampleHistory {
        self.history
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanMessage;

    fn full_scan(value: f32) -> ScanMessage {
        ScanMessage::uniform(ANGULAR_STEPS, value)
    }

    /// Readings equal to their own index, so the recorded distance identifies the slot read.
    fn indexed_scan(len: usize) -> ScanMessage {
        ScanMessage::new((0..len).map(|i| i as f32).collect())
    }

    #[test]
    fn new_sampler_is_collecting_with_default_capacity() {
        let sampler = Sampler::new();
        assert_eq!(sampler.state(), SamplerState::Collecting);
        assert_eq!(sampler.capacity(), DEFAULT_CAPACITY);
        assert_eq!(sampler.cursor(), 0);
        assert!(sampler.is_empty());
    }

    #[test]
    fn history_never_exceeds_capacity() {
        let mut sampler = Sampler::with_capacity(10);
        let scan = full_scan(1.0);
        for i in 1..=25 {
            let state = sampler.ingest(&scan);
            assert!(sampler.len() <= 10);
            assert_eq!(state == SamplerState::Terminal, sampler.len() == 10, "ingest {i}");
        }
        assert_eq!(sampler.len(), 10);
    }

    #[test]
    fn cursor_sequence_wraps_every_rotation() {
        let mut sampler = Sampler::with_rotations(2).unwrap();
        let scan = indexed_scan(ANGULAR_STEPS);
        while sampler.ingest(&scan) == SamplerState::Collecting {}

        let angles: Vec<usize> = sampler.history().iter().map(|s| s.angle_index).collect();
        let expected: Vec<usize> = (0..2 * ANGULAR_STEPS).map(|i| i % ANGULAR_STEPS).collect();
        assert_eq!(angles, expected);
        assert_eq!(sampler.rotations(), 2);
        assert_eq!(sampler.cursor(), 0);
    }

    #[test]
    fn cursor_ignores_message_content_for_long_messages() {
        let mut sampler = Sampler::new();
        sampler.ingest(&indexed_scan(720));
        sampler.ingest(&full_scan(7.0));
        sampler.ingest(&indexed_scan(400));

        let recorded: Vec<Sample> = sampler.history().iter().copied().collect();
        assert_eq!(
            recorded,
            vec![Sample::new(0, 0.0), Sample::new(1, 7.0), Sample::new(2, 2.0)]
        );
    }

    #[test]
    fn short_message_resets_cursor_to_zero() {
        let mut sampler = Sampler::new();
        let scan = indexed_scan(ANGULAR_STEPS);
        for _ in 0..5 {
            sampler.ingest(&scan);
        }
        assert_eq!(sampler.cursor(), 5);

        // only 3 readings: index 5 is out of range, read slot 0 instead
        sampler.ingest(&ScanMessage::new(vec![10.0, 11.0, 12.0]));
        assert_eq!(sampler.history().as_slice()[5], Sample::new(0, 10.0));
        assert_eq!(sampler.cursor(), 1);

        sampler.ingest(&scan);
        assert_eq!(sampler.history().as_slice()[6], Sample::new(1, 1.0));
    }

    #[test]
    fn message_exactly_cursor_length_resets() {
        let mut sampler = Sampler::new();
        let scan = indexed_scan(ANGULAR_STEPS);
        sampler.ingest(&scan);
        sampler.ingest(&scan);

        sampler.ingest(&ScanMessage::new(vec![4.0, 5.0]));
        assert_eq!(sampler.history().as_slice()[2], Sample::new(0, 4.0));
    }

    #[test]
    fn single_reading_messages_always_read_slot_zero() {
        let mut sampler = Sampler::with_capacity(4);
        for value in [1.0_f32, 2.0, 3.0, 4.0] {
            sampler.ingest(&vec![value]);
        }
        let angles: Vec<usize> = sampler.history().iter().map(|s| s.angle_index).collect();
        assert_eq!(angles, vec![0, 0, 0, 0]);
        assert!(sampler.is_terminal());
    }

    #[test]
    fn empty_message_is_ignored() {
        let mut sampler = Sampler::new();
        sampler.ingest(&full_scan(1.0));
        let state = sampler.ingest(&ScanMessage::default());

        assert_eq!(state, SamplerState::Collecting);
        assert_eq!(sampler.len(), 1);
        assert_eq!(sampler.cursor(), 1);
    }

    #[test]
    fn ingest_after_terminal_is_noop() {
        let mut sampler = Sampler::with_capacity(3);
        let scan = full_scan(1.0);
        for _ in 0..3 {
            sampler.ingest(&scan);
        }
        assert!(sampler.is_terminal());
        let before = sampler.history().clone();
        let cursor = sampler.cursor();

        assert_eq!(sampler.ingest(&full_scan(9.0)), SamplerState::Terminal);
        assert_eq!(sampler.ingest(&ScanMessage::new(vec![9.0])), SamplerState::Terminal);
        assert_eq!(sampler.history(), &before);
        assert_eq!(sampler.cursor(), cursor);
    }

    #[test]
    fn overflowing_rotation_count_is_rejected() {
        assert!(Sampler::with_rotations(usize::MAX / 100).is_none());
        assert!(Sampler::with_rotations(usize::MAX).is_none());
    }

    #[test]
    fn huge_rotation_count_does_not_reserve_history() {
        let mut sampler = Sampler::with_rotations(usize::MAX / ANGULAR_STEPS).unwrap();
        assert_eq!(sampler.capacity(), ANGULAR_STEPS * (usize::MAX / ANGULAR_STEPS));
        assert_eq!(sampler.ingest(&full_scan(1.0)), SamplerState::Collecting);
        assert_eq!(sampler.len(), 1);
    }

    #[test]
    fn zero_capacity_starts_terminal() {
        let mut sampler = Sampler::with_capacity(0);
        assert!(sampler.is_terminal());
        assert_eq!(sampler.ingest(&full_scan(1.0)), SamplerState::Terminal);
        assert!(sampler.is_empty());
    }

    #[test]
    fn terminal_fires_at_exactly_the_1080th_ingest() {
        let mut sampler = Sampler::new();
        let scan = full_scan(2.0);
        for i in 1..DEFAULT_CAPACITY {
            assert_eq!(sampler.ingest(&scan), SamplerState::Collecting, "ingest {i}");
        }
        assert_eq!(sampler.ingest(&scan), SamplerState::Terminal);

        let history = sampler.into_history();
        assert_eq!(history.len(), 1080);
        assert_eq!(history.rotations(), 3);
        assert!(history.iter().all(|s| s.distance == 2.0));
    }
}
