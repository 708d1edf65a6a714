//! Game clock - per-tick time bookkeeping
//!
//! The host passes a monotonic timestamp (milliseconds) to every tick. The
//! clock turns it into a delta, accumulates gravity, and gates repeatable
//! held inputs against wall-clock time so the repeat rate does not depend on
//! the frame rate.
//!
//! The first tick, and the first tick after [`GameClock::suspend`], have zero
//! elapsed time; a pause is never credited as play time.

use crate::types::HeldInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HeldState {
    left: bool,
    right: bool,
    soft_drop: bool,
}

/// Wall-clock gate for one repeatable input.
///
/// The first step after a press fires as soon as the previous step is more
/// than `interval_ms` old. The second waits out `delay_ms` as well, so a
/// short tap yields a single step; after that steps come every `interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RepeatGate {
    last_ms: Option<u64>,
    steps: u8,
    interval_ms: u32,
    delay_ms: u32,
}

impl RepeatGate {
    fn new(interval_ms: u32, delay_ms: u32) -> Self {
        Self {
            last_ms: None,
            steps: 0,
            interval_ms,
            delay_ms,
        }
    }

    fn arm(&mut self) {
        self.steps = 0;
    }

    fn fire(&mut self, now_ms: u64) -> bool {
        let wait = if self.steps == 1 {
            self.delay_ms.max(self.interval_ms)
        } else {
            self.interval_ms
        };
        let due = self
            .last_ms
            .map_or(true, |t| now_ms.saturating_sub(t) > u64::from(wait));
        if due {
            self.last_ms = Some(now_ms);
            self.steps = self.steps.saturating_add(1);
        }
        due
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    last_tick_ms: Option<u64>,
    elapsed_ms: u64,
    gravity_ms: u32,
    held: HeldState,
    horizontal: RepeatGate,
    soft_drop: RepeatGate,
}

impl GameClock {
    pub fn new(move_repeat_ms: u32, soft_drop_repeat_ms: u32, repeat_delay_ms: u32) -> Self {
        Self {
            last_tick_ms: None,
            elapsed_ms: 0,
            gravity_ms: 0,
            held: HeldState::default(),
            horizontal: RepeatGate::new(move_repeat_ms, repeat_delay_ms),
            soft_drop: RepeatGate::new(soft_drop_repeat_ms, repeat_delay_ms),
        }
    }

    /// Start a tick at `now_ms` and return the elapsed time since the last one.
    pub fn begin_tick(&mut self, now_ms: u64) -> u32 {
        let delta = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_tick_ms = Some(now_ms);
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta);
        u32::try_from(delta).unwrap_or(u32::MAX)
    }

    /// Forget the previous tick timestamp (pause/resume).
    pub fn suspend(&mut self) {
        self.last_tick_ms = None;
    }

    /// Total play time, excluding pauses.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    /// Add `delta_ms` to the gravity counter. Returns true (and resets the
    /// counter) once it reaches `interval_ms`.
    pub fn accumulate_gravity(&mut self, delta_ms: u32, interval_ms: u32) -> bool {
        self.gravity_ms = self.gravity_ms.saturating_add(delta_ms);
        if self.gravity_ms >= interval_ms {
            self.gravity_ms = 0;
            true
        } else {
            false
        }
    }

    /// Mark `input` as held. A fresh press restarts the repeat delay.
    pub fn press(&mut self, input: HeldInput) {
        let held = self.held_mut(input);
        if *held {
            return;
        }
        *held = true;
        match input {
            HeldInput::Left | HeldInput::Right => self.horizontal.arm(),
            HeldInput::SoftDrop => self.soft_drop.arm(),
        }
    }

    pub fn release(&mut self, input: HeldInput) {
        *self.held_mut(input) = false;
    }

    pub fn release_all(&mut self) {
        self.held = HeldState::default();
    }

    pub fn is_held(&self, input: HeldInput) -> bool {
        match input {
            HeldInput::Left => self.held.left,
            HeldInput::Right => self.held.right,
            HeldInput::SoftDrop => self.held.soft_drop,
        }
    }

    fn held_mut(&mut self, input: HeldInput) -> &mut bool {
        match input {
            HeldInput::Left => &mut self.held.left,
            HeldInput::Right => &mut self.held.right,
            HeldInput::SoftDrop => &mut self.held.soft_drop,
        }
    }

    /// Whether a held horizontal move may fire at `now_ms`. Firing stamps the
    /// gate.
    pub fn horizontal_due(&mut self, now_ms: u64) -> bool {
        if !(self.held.left || self.held.right) {
            return false;
        }
        self.horizontal.fire(now_ms)
    }

    /// Whether a held soft-drop step may fire at `now_ms`.
    pub fn soft_drop_due(&mut self, now_ms: u64) -> bool {
        if !self.held.soft_drop {
            return false;
        }
        self.soft_drop.fire(now_ms)
    }
}
