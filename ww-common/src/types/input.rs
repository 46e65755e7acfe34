/// A debounced joystick direction.
///
/// The controller keeps the last one pressed until another direction is
/// pressed; releasing the stick does not reset it to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
    Enter,
}

impl InputEvent {
    pub const fn is_reject(self) -> bool {
        matches!(self, InputEvent::Left | InputEvent::Right)
    }

    pub const fn is_confirm(self) -> bool {
        matches!(self, InputEvent::Up | InputEvent::Down)
    }
}

/// Raw key levels read from the joystick during one fast tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSample {
    pub enter: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ButtonSample {
    pub const RELEASED: Self = Self {
        enter: false,
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// A sample with exactly one key held.
    pub const fn only(event: InputEvent) -> Self {
        let mut sample = Self::RELEASED;
        match event {
            InputEvent::None => {}
            InputEvent::Left => sample.left = true,
            InputEvent::Right => sample.right = true,
            InputEvent::Up => sample.up = true,
            InputEvent::Down => sample.down = true,
            InputEvent::Enter => sample.enter = true,
        }
        sample
    }

    pub const fn any(&self) -> bool {
        self.enter || self.left || self.right || self.up || self.down
    }

    /// Resolve held keys to one direction. Enter, Left, Right, Up, Down are
    /// checked in that order and the last held one wins.
    pub const fn direction(&self) -> InputEvent {
        let mut event = InputEvent::None;
        if self.enter {
            event = InputEvent::Enter;
        }
        if self.left {
            event = InputEvent::Left;
        }
        if self.right {
            event = InputEvent::Right;
        }
        if self.up {
            event = InputEvent::Up;
        }
        if self.down {
            event = InputEvent::Down;
        }
        event
    }
}

/// Answer to one confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Choice {
    #[default]
    Pending,
    Confirmed,
    Rejected,
}

impl Choice {
    pub const fn is_made(self) -> bool {
        !matches!(self, Choice::Pending)
    }
}
