//! One-bit edge latch
//!
//! Turns a level signal sampled once per tick into at most one notification
//! per transition. Both the "target reached" and the "movement" notifications
//! go through this type.

/// Remembers the last observed level and reports changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    previous: bool,
}

impl EdgeLatch {
    pub fn new(initial: bool) -> Self {
        Self { previous: initial }
    }

    /// Record `level` and return it if it differs from the previous sample
    pub fn observe(&mut self, level: bool) -> Option<bool> {
        match (self.previous, level) {
            (false, true) | (true, false) => {
                self.previous = level;
                Some(level)
            }
            (false, false) | (true, true) => None,
        }
    }

    /// Forget the last level so the next `true` sample fires again
    pub fn rearm(&mut self) {
        self.previous = false;
    }

    pub fn level(&self) -> bool {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_transition() {
        let mut latch = EdgeLatch::default();
        let samples = [false, true, true, true, false, false, true];
        let edges: Vec<_> = samples.iter().filter_map(|&s| latch.observe(s)).collect();
        assert_eq!(edges, vec![true, false, true]);
    }

    #[test]
    fn rearm_allows_a_repeated_rising_edge() {
        let mut latch = EdgeLatch::new(true);
        assert_eq!(latch.observe(true), None);
        latch.rearm();
        assert_eq!(latch.observe(true), Some(true));
        assert!(latch.level());
    }
}
