//! Trailing-window frame-rate statistics.
//!
//! The FPS summary line shows four numbers: the instantaneous rate, the
//! lowest and highest rates seen since the window was created (monotone for
//! the whole run, never reset by eviction), and the average over the trailing
//! 60 seconds.
//!
//! The window holds `(timestamp, fps)` pairs and evicts strictly by age on
//! each insertion, not by count: after every insert all retained entries are
//! within `FPS_WINDOW_MS` of the newest timestamp. Timestamps come from the
//! caller, so the window never touches the wall clock itself.
//!
//! Negative or non-finite samples contribute nothing to the minimum, maximum,
//! or average.

use std::collections::VecDeque;

// =============================================================================
// Window Configuration
// =============================================================================

/// Age bound of the averaging window, in milliseconds.
pub const FPS_WINDOW_MS: u64 = 60_000;

// =============================================================================
// FPS Statistics
// =============================================================================

/// Snapshot of the frame-rate statistics after an insertion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsStats {
    /// The sample just inserted (0 if it was rejected).
    pub current: f32,
    /// Lowest accepted sample since creation.
    pub min: f32,
    /// Highest accepted sample since creation.
    pub max: f32,
    /// Mean of the samples currently inside the window.
    pub average: f32,
}

/// Trailing-60-second FPS window with lifetime extrema.
pub struct FpsWindow {
    samples: VecDeque<(u64, f32)>,
    /// Running sum of the windowed samples, kept in step with `samples`.
    sum: f32,
    /// Lifetime minimum. `f32::MAX` until the first accepted sample.
    min_seen: f32,
    /// Lifetime maximum. Frame rates are non-negative, so 0 is a safe floor.
    max_seen: f32,
}

impl FpsWindow {
    /// Create an empty window.
    pub const fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            sum: 0.0,
            min_seen: f32::MAX,
            max_seen: 0.0,
        }
    }

    /// Insert one sample and return the updated statistics.
    ///
    /// `now_ms` must be non-decreasing across calls. A negative or non-finite
    /// `fps` is rejected: it is not stored, does not move the extrema, and
    /// leaves the window contents untouched.
    pub fn insert(&mut self, now_ms: u64, fps: f32) -> FpsStats {
        let accepted = fps.is_finite() && fps >= 0.0;

        if accepted {
            self.min_seen = self.min_seen.min(fps);
            self.max_seen = self.max_seen.max(fps);
            self.samples.push_back((now_ms, fps));
            self.sum += fps;

            while let Some(&(ts, old)) = self.samples.front() {
                if now_ms - ts > FPS_WINDOW_MS {
                    self.samples.pop_front();
                    self.sum -= old;
                } else {
                    break;
                }
            }
        }

        FpsStats {
            current: if accepted { fps } else { 0.0 },
            min: if self.min_seen == f32::MAX { 0.0 } else { self.min_seen },
            max: self.max_seen,
            average: self.average(),
        }
    }

    /// Mean of the samples currently inside the window, 0 when empty.
    fn average(&self) -> f32 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f32
        }
    }

    /// Number of samples currently inside the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    #[inline]
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples and forget the lifetime extrema.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
        self.min_seen = f32::MAX;
        self.max_seen = 0.0;
    }

    #[cfg(test)]
    fn oldest_timestamp(&self) -> Option<u64> {
        self.samples.front().map(|&(ts, _)| ts)
    }
}

impl Default for FpsWindow {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_stats() {
        let mut window = FpsWindow::new();
        let stats = window.insert(0, -1.0); // rejected
        assert_eq!(stats.current, 0.0);
        assert_eq!(stats.min, 0.0, "Min reads 0 before any accepted sample");
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.average, 0.0);
        assert!(window.is_empty());
    }

    #[test]
    fn test_single_sample() {
        let mut window = FpsWindow::new();
        let stats = window.insert(1000, 50.0);
        assert_eq!(stats.current, 50.0);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 50.0);
        assert_eq!(stats.average, 50.0);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_window_evicts_stale_entries() {
        let mut window = FpsWindow::new();
        window.insert(0, 40.0);
        window.insert(30_000, 50.0);
        // 61 seconds after the first sample: it must be gone.
        let stats = window.insert(61_000, 60.0);
        assert_eq!(window.len(), 2, "Entry older than the window must be evicted");
        assert_eq!(window.oldest_timestamp(), Some(30_000));
        // Average over the remaining two samples only.
        assert!((stats.average - 55.0).abs() < 1e-4, "Evicted entries must not affect the average");
    }

    #[test]
    fn test_entry_exactly_at_window_edge_is_kept() {
        let mut window = FpsWindow::new();
        window.insert(0, 40.0);
        window.insert(FPS_WINDOW_MS, 60.0);
        assert_eq!(window.len(), 2, "An entry exactly 60s old is still inside the window");
        let stats = window.insert(FPS_WINDOW_MS + 1, 50.0);
        assert_eq!(window.len(), 2, "One millisecond past the bound evicts");
        assert!((stats.average - 55.0).abs() < 1e-4);
    }

    #[test]
    fn test_window_invariant_over_random_walk() {
        // After every insertion, each retained entry is within the age bound
        // of the newest timestamp.
        let mut window = FpsWindow::new();
        let mut now = 0u64;
        for i in 0..300u64 {
            now += 997 * (i % 7 + 1); // uneven but increasing timestamps
            window.insert(now, (i % 80) as f32);
            if let Some(oldest) = window.oldest_timestamp() {
                assert!(
                    now - oldest <= FPS_WINDOW_MS,
                    "Entry aged {} ms survived eviction",
                    now - oldest
                );
            }
        }
    }

    #[test]
    fn test_extrema_are_monotone_and_bracket_samples() {
        let mut window = FpsWindow::new();
        let samples = [47.0, 52.0, 12.0, 61.0, 49.5, 33.0];
        let mut prev_min = f32::MAX;
        let mut prev_max = 0.0f32;
        for (i, &fps) in samples.iter().enumerate() {
            let stats = window.insert(i as u64 * 1000, fps);
            assert!(stats.min <= prev_min, "Running min must never increase");
            assert!(stats.max >= prev_max, "Running max must never decrease");
            assert!(stats.min <= fps && stats.max >= fps, "Extrema must bracket every sample");
            prev_min = stats.min;
            prev_max = stats.max;
        }
        assert_eq!(prev_min, 12.0);
        assert_eq!(prev_max, 61.0);
    }

    #[test]
    fn test_extrema_survive_eviction() {
        let mut window = FpsWindow::new();
        window.insert(0, 10.0);
        let stats = window.insert(FPS_WINDOW_MS + 5000, 50.0);
        assert_eq!(window.len(), 1, "Old sample evicted from the window");
        assert_eq!(stats.min, 10.0, "Lifetime min is not reset by eviction");
    }

    #[test]
    fn test_invalid_samples_contribute_nothing() {
        let mut window = FpsWindow::new();
        window.insert(0, 50.0);
        let stats = window.insert(1000, -5.0);
        assert_eq!(stats.current, 0.0, "Rejected sample reads as 0");
        assert_eq!(stats.min, 50.0, "Negative sample must not move the min");
        assert_eq!(window.len(), 1, "Rejected sample is not stored");

        let stats = window.insert(2000, f32::NAN);
        assert_eq!(stats.average, 50.0, "NaN must not poison the average");
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut window = FpsWindow::new();
        window.insert(0, 20.0);
        window.insert(1000, 80.0);
        window.reset();
        assert!(window.is_empty());
        let stats = window.insert(2000, 50.0);
        assert_eq!(stats.min, 50.0, "Extrema start over after reset");
        assert_eq!(stats.max, 50.0);
    }
}
