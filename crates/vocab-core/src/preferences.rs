//! Runtime preferences read by the navigation and reveal timers.
//!
//! Loading and saving live in `vocab-persistence`; this module only defines
//! the values, their defaults, and the conversions the engine needs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Data file used when the config does not name one.
pub const DEFAULT_DATA_FILE: &str = "tuvungn3.txt";
pub const DEFAULT_CHANGE_INTERVAL_MINUTES: f64 = 1.0;
pub const DEFAULT_REVEAL_DELAY_SECONDS: f64 = 0.5;

/// Delay before the auto-advance loop first fires after start.
pub const AUTO_ADVANCE_FIRST_DELAY_MS: u64 = 100;

/// Floor for the auto-advance loop period, so a zero interval cannot spin.
pub const MIN_AUTO_ADVANCE_PERIOD_MS: u64 = 100;

/// Window size and position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: 300,
            height: 200,
            x: 800,
            y: 10,
        }
    }
}

impl Geometry {
    /// X11-style geometry string, e.g. `300x200+800+10`.
    pub fn geometry_string(&self) -> String {
        format!("{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// Presentation flags that only the renderer acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStyle {
    pub border_visible: bool,
    pub transparent: bool,
    pub text_color: Option<String>,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            border_visible: false,
            transparent: true,
            text_color: None,
        }
    }
}

/// All user preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Shuffle entries when a session starts.
    pub shuffle: bool,
    /// Let the auto-advance loop move to the next entry.
    pub auto_next: bool,
    /// Minimum minutes between automatic changes.
    pub change_interval_minutes: f64,
    /// Seconds the answer stays forced visible after "next".
    pub reveal_delay_seconds: f64,
    pub data_file: PathBuf,
    pub always_on_top: bool,
    pub geometry: Geometry,
    pub window: WindowStyle,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            shuffle: false,
            auto_next: true,
            change_interval_minutes: DEFAULT_CHANGE_INTERVAL_MINUTES,
            reveal_delay_seconds: DEFAULT_REVEAL_DELAY_SECONDS,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            always_on_top: false,
            geometry: Geometry::default(),
            window: WindowStyle::default(),
        }
    }
}

impl Preferences {
    /// Time gate in milliseconds.
    pub fn change_interval_ms(&self) -> u64 {
        to_millis(self.change_interval_minutes * 60.0)
    }

    /// Reveal window in milliseconds.
    pub fn reveal_delay_ms(&self) -> u64 {
        to_millis(self.reveal_delay_seconds)
    }

    /// Period of the auto-advance loop.
    pub fn auto_advance_period_ms(&self) -> u64 {
        self.change_interval_ms().max(MIN_AUTO_ADVANCE_PERIOD_MS)
    }

    pub fn set_change_interval_minutes(&mut self, minutes: f64) -> Result<()> {
        self.change_interval_minutes = validate_duration("change_interval", minutes)?;
        Ok(())
    }

    pub fn set_reveal_delay_seconds(&mut self, seconds: f64) -> Result<()> {
        self.reveal_delay_seconds = validate_duration("delay_in_s", seconds)?;
        Ok(())
    }
}

/// Accept finite, non-negative durations.
pub fn validate_duration(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SessionError::InvalidPreference { name, value })
    }
}

fn to_millis(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        // Saturates at u64::MAX for absurdly large values.
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}
