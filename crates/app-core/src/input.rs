//! Button events and the input-source boundary.
//!
//! The loop does not care how many controllers are connected or what kind
//! they are: anything that can produce an [`InputSnapshot`] plugs into the
//! [`InputHub`], and button presses are OR'd across every source that
//! answered the poll.

use std::ops::{BitOr, BitOrAssign};

use crate::tracking::{TrackerReading, ViewState};

/// Edge-triggered button events recognized by the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Exit,
    ToggleDebug,
    Left,
    Right,
    Up,
    Down,
    Minus,
    Plus,
}

impl Button {
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Button::Exit => 1 << 0,
            Button::ToggleDebug => 1 << 1,
            Button::Left => 1 << 2,
            Button::Right => 1 << 3,
            Button::Up => 1 << 4,
            Button::Down => 1 << 5,
            Button::Minus => 1 << 6,
            Button::Plus => 1 << 7,
        }
    }
}

/// Set of buttons that went down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    #[inline]
    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<Button> for ButtonSet {
    fn from(button: Button) -> Self {
        Self(button.bit())
    }
}

impl BitOr for ButtonSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Everything one source reports for one frame.
#[derive(Clone, Copy, Debug)]
pub struct InputSnapshot {
    pub reading: TrackerReading,
    pub pressed: ButtonSet,
}

/// One connected input device (or emulation of one).
pub trait InputSource {
    /// Sample the device. `None` means the probe failed this frame; the
    /// loop absorbs that silently.
    fn poll(&mut self) -> Option<InputSnapshot>;
}

/// All connected input sources, polled together once per frame.
#[derive(Default)]
pub struct InputHub {
    sources: Vec<Box<dyn InputSource>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, source: Box<dyn InputSource>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Poll every source. Presses are OR'd across all sources that
    /// answered; the beacon reading is the first valid one offered, falling
    /// back to the first reading at all. `None` only when no source
    /// answered.
    pub fn poll(&mut self) -> Option<InputSnapshot> {
        let mut pressed = ButtonSet::EMPTY;
        let mut reading: Option<TrackerReading> = None;
        for source in &mut self.sources {
            match source.poll() {
                Some(snapshot) => {
                    pressed |= snapshot.pressed;
                    match reading {
                        Some(r) if r.valid => {}
                        Some(_) if snapshot.reading.valid => reading = Some(snapshot.reading),
                        None => reading = Some(snapshot.reading),
                        _ => {}
                    }
                }
                None => log::debug!("input probe failed; keeping previous placement"),
            }
        }
        reading.map(|reading| InputSnapshot { reading, pressed })
    }
}

/// What the outer driver should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Apply one frame's button presses to the loop state.
///
/// Exit wins over everything else and leaves the state untouched, matching
/// immediate-termination semantics.
pub fn handle_presses(state: &mut ViewState, pressed: ButtonSet) -> LoopControl {
    if pressed.contains(Button::Exit) {
        return LoopControl::Exit;
    }
    if pressed.contains(Button::ToggleDebug) {
        state.debug_overlay = !state.debug_overlay;
    }

    if pressed.contains(Button::Left) {
        state.settings.lower_min_distance();
    }
    if pressed.contains(Button::Right) {
        state.settings.raise_min_distance();
    }

    if pressed.contains(Button::Down) {
        state.settings.lower_max_distance();
    }
    if pressed.contains(Button::Up) {
        state.settings.raise_max_distance();
    }

    if pressed.contains(Button::Minus) {
        state.settings.lower_max_zoom();
    }
    if pressed.contains(Button::Plus) {
        state.settings.raise_max_zoom();
    }

    LoopControl::Continue
}
