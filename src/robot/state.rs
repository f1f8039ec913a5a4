use crate::config::MAX_SCALE;

/// Distance multiplier for the rectangle walks, always in `1..=MAX_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleCounter(u8);

impl ScaleCounter {
    pub const fn new() -> Self {
        Self(1)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Move one notch in the direction of `step`, saturating at the bounds.
    pub fn apply(&mut self, step: i8) {
        if step > 0 && self.0 < MAX_SCALE {
            self.0 += 1;
        } else if step < 0 && self.0 > 1 {
            self.0 -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }
}

impl Default for ScaleCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable session record, owned by the sequencer.
///
/// `epoch` is bumped on every stop or reset so that a routine which
/// finishes after being interrupted cannot clear a newer busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub busy: bool,
    pub scale: ScaleCounter,
    pub epoch: u32,
}

impl SessionState {
    pub const fn new() -> Self {
        Self {
            busy: false,
            scale: ScaleCounter::new(),
            epoch: 0,
        }
    }

    /// Back to defaults and invalidate whatever is running.
    pub fn reset(&mut self) {
        self.busy = false;
        self.scale.reset();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
