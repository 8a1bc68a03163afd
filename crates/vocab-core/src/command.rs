//! The command surface a front end maps keys and menu items onto.

use crate::preferences::{Geometry, WindowStyle};
use crate::snapshot::Snapshot;

/// User-initiated actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Shuffle the entries and restart from the first one.
    Shuffle,
    ToggleAutoNext,
    /// Reveal the answer for the reveal window, then advance.
    Next,
    /// Advance immediately, bypassing the reveal window and the time gate.
    NextNow,
    Prev,
    /// Jump to a one-based position.
    Goto(i64),
    Restart,
    ToggleMeaning,
    ToggleWord,
    ToggleAlwaysOnTop,
    ToggleBorder,
    ToggleTransparency,
    /// Set the text color; an empty string resets to the renderer default.
    ChangeColor(String),
    CopyWord,
    CopyPhonetic,
    /// The window was moved or resized.
    SetGeometry(Geometry),
    SetChangeInterval(f64),
    SetRevealDelay(f64),
    Exit,
}

impl Command {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shuffle => "shuffle",
            Self::ToggleAutoNext => "toggle-auto-next",
            Self::Next => "next",
            Self::NextNow => "next-now",
            Self::Prev => "prev",
            Self::Goto(_) => "goto",
            Self::Restart => "restart",
            Self::ToggleMeaning => "toggle-meaning",
            Self::ToggleWord => "toggle-word",
            Self::ToggleAlwaysOnTop => "toggle-always-on-top",
            Self::ToggleBorder => "toggle-border",
            Self::ToggleTransparency => "toggle-transparency",
            Self::ChangeColor(_) => "change-color",
            Self::CopyWord => "copy-word",
            Self::CopyPhonetic => "copy-phonetic",
            Self::SetGeometry(_) => "set-geometry",
            Self::SetChangeInterval(_) => "set-change-interval",
            Self::SetRevealDelay(_) => "set-reveal-delay",
            Self::Exit => "exit",
        }
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Card content or visibility changed.
    Render(Snapshot),
    /// Text to place on the clipboard.
    Clipboard(String),
    /// Window chrome changed.
    Window {
        style: WindowStyle,
        always_on_top: bool,
        /// Write the preferences back to the config store.
        persist: bool,
    },
    /// Timing or geometry preferences changed.
    Preferences { persist: bool },
    Exit,
}

impl Outcome {
    /// Whether the preferences should be written back.
    pub fn should_persist(&self) -> bool {
        matches!(
            self,
            Self::Window { persist: true, .. } | Self::Preferences { persist: true }
        )
    }
}
