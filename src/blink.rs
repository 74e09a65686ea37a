//! Turn-signal flash countdowns.
//!
//! Each side of the frame flashes while its turn signal is on. The flash is
//! driven by a per-side countdown of remaining "on" frames:
//!
//! - every 20th frame the countdown re-arms to 10 (on for 10 frames, off for
//!   the next 10, a steady ~2.5 Hz blink at 50 FPS)
//! - when a blind-spot conflict is active (signal on toward an occupied
//!   lane), every 10th frame re-arms to 5 instead, doubling the blink rate
//! - otherwise an armed countdown ticks down by one each frame
//!
//! The three rules apply in exactly that priority order when a 10-frame and a
//! 20-frame boundary coincide: the conflict check wins, then the re-arm, then
//! the decrement. Counters never leave `[0, 10]`; the decrement saturates.
//!
//! Counters are only touched on re-arm boundaries or while a conflict or an
//! armed countdown holds, so a signal left on with an expired countdown costs
//! nothing until the next boundary.

// =============================================================================
// Blink Timing Constants
// =============================================================================

/// Frame interval at which countdowns re-arm during a normal blink.
pub const SIGNAL_REARM_INTERVAL: u32 = 20;

/// Frame interval at which the blind-spot conflict check re-arms countdowns.
pub const SIGNAL_CONFLICT_INTERVAL: u32 = 10;

/// Countdown loaded on a normal re-arm boundary.
pub const SIGNAL_FULL_COUNTDOWN: u32 = 10;

/// Countdown loaded when a blind-spot conflict is detected.
pub const SIGNAL_CONFLICT_COUNTDOWN: u32 = 5;

// =============================================================================
// Signal Blink State
// =============================================================================

/// Flash result for the current frame, after counters have been updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalActivity {
    /// Left side should paint the flash color this frame.
    pub left_flashing: bool,
    /// Right side should paint the flash color this frame.
    pub right_flashing: bool,
}

/// Per-side flash countdowns for the turn-signal frame coloring.
pub struct SignalBlink {
    left_frames: u32,
    right_frames: u32,
}

impl SignalBlink {
    /// Create with both countdowns expired.
    pub const fn new() -> Self {
        Self {
            left_frames: 0,
            right_frames: 0,
        }
    }

    /// Advance the countdowns for one frame and report which sides flash.
    ///
    /// `frame` is the aggregator's frame counter. A side flashes while its
    /// signal flag is set and its countdown is still positive.
    pub fn update(
        &mut self,
        frame: u32,
        left_signal: bool,
        right_signal: bool,
        left_blind_spot: bool,
        right_blind_spot: bool,
    ) -> SignalActivity {
        let conflict = (left_blind_spot && left_signal) || (right_blind_spot && right_signal);
        let counting = (left_signal && self.left_frames > 0) || (right_signal && self.right_frames > 0);

        if frame % SIGNAL_REARM_INTERVAL == 0 || conflict || counting {
            if left_signal {
                self.left_frames = Self::next_countdown(self.left_frames, frame, conflict);
            }
            if right_signal {
                self.right_frames = Self::next_countdown(self.right_frames, frame, conflict);
            }
        }

        SignalActivity {
            left_flashing: left_signal && self.left_frames > 0,
            right_flashing: right_signal && self.right_frames > 0,
        }
    }

    /// Priority order: conflict re-arm, normal re-arm, saturating decrement.
    #[inline]
    const fn next_countdown(current: u32, frame: u32, conflict: bool) -> u32 {
        if frame % SIGNAL_CONFLICT_INTERVAL == 0 && conflict {
            SIGNAL_CONFLICT_COUNTDOWN
        } else if frame % SIGNAL_REARM_INTERVAL == 0 {
            SIGNAL_FULL_COUNTDOWN
        } else {
            current.saturating_sub(1)
        }
    }

    /// Current countdowns `(left, right)`. Shown on the debug page.
    #[inline]
    pub const fn frames(&self) -> (u32, u32) {
        (self.left_frames, self.right_frames)
    }

    /// Expire both countdowns.
    pub const fn reset(&mut self) {
        self.left_frames = 0;
        self.right_frames = 0;
    }
}

impl Default for SignalBlink {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
