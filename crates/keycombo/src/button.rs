//! Per-frame button state shared by keys and combos

/// Frame-level state of a key or combo.
///
/// `pressed` and `released` are single-frame pulses; `held` stays set for
/// as long as the button is down, including the frame it was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

impl ButtonState {
    /// State of a button that went down this frame.
    pub const PRESSED: Self = Self {
        pressed: true,
        held: true,
        released: false,
    };

    /// State of a button that has been down since an earlier frame.
    pub const HELD: Self = Self {
        pressed: false,
        held: true,
        released: false,
    };

    /// State of a button that came up this frame.
    pub const RELEASED: Self = Self {
        pressed: false,
        held: false,
        released: true,
    };

    /// Advance one frame given the raw down signal for this frame and the
    /// previous one.
    ///
    /// Pulses are cleared first. On a rising edge `pressed` is only raised if
    /// the button was not already held.
    pub fn step(&mut self, down_now: bool, down_before: bool) {
        self.pressed = false;
        self.released = false;

        if down_now != down_before {
            if down_now {
                self.pressed = !self.held;
                self.held = true;
            } else {
                self.released = true;
                self.held = false;
            }
        }
    }
}
