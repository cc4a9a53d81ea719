#![forbid(unsafe_code)]

//! Keyboard input for the rating control.
//!
//! Raw keys are first normalized into [`Key`] (DOM key codes are accepted via
//! [`Key::from_key_code`]), then resolved against the layout direction into a
//! [`KeyIntent`]. Only horizontal arrows depend on direction.

/// Layout direction of the host. Supplied as configuration, never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// A key press delivered to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Enter,
    Tab,
    Escape,
    Space,
    PageUp,
    PageDown,
    Backspace,
    /// Main-row digit `0..=9`.
    Digit(u8),
    /// Numeric keypad digit `0..=9`.
    Numpad(u8),
    /// Any other key code.
    Other(u32),
}

impl Key {
    /// Map a DOM `keyCode` to a key.
    #[must_use]
    pub fn from_key_code(code: u32) -> Self {
        match code {
            8 => Self::Backspace,
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            48..=57 => Self::Digit((code - 48) as u8),
            96..=105 => Self::Numpad((code - 96) as u8),
            other => Self::Other(other),
        }
    }

    /// Digit value, treating main-row and keypad digits alike.
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        match self {
            Self::Digit(d) | Self::Numpad(d) if d <= 9 => Some(d),
            _ => None,
        }
    }

    /// Resolve what this key asks the control to do.
    #[must_use]
    pub fn intent(self, direction: LayoutDirection) -> KeyIntent {
        if let Some(d) = self.digit() {
            return KeyIntent::Set(d);
        }
        let rtl = direction.is_rtl();
        match self {
            Self::Up => KeyIntent::Increment,
            Self::Down => KeyIntent::Decrement,
            Self::Right if rtl => KeyIntent::Decrement,
            Self::Right => KeyIntent::Increment,
            Self::Left if rtl => KeyIntent::Increment,
            Self::Left => KeyIntent::Decrement,
            Self::Home => KeyIntent::First,
            Self::End => KeyIntent::Last,
            Self::Enter => KeyIntent::Commit,
            Self::Tab => KeyIntent::CommitAndLeave,
            Self::Escape => KeyIntent::Cancel,
            _ => KeyIntent::Ignore,
        }
    }
}

/// Direction-resolved meaning of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Increment,
    Decrement,
    /// Lowest reachable rating.
    First,
    /// `max_rating`.
    Last,
    /// Jump to a digit, clamped into range.
    Set(u8),
    Commit,
    /// Commit, after which focus is expected to move away.
    CommitAndLeave,
    Cancel,
    Ignore,
}

impl KeyIntent {
    /// True for intents that move the preview.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Increment | Self::Decrement | Self::First | Self::Last | Self::Set(_)
        )
    }
}
