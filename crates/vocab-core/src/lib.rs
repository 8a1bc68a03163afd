//! Flashcard rotation and timed-reveal engine.
//!
//! This crate owns every piece of state behind the vocabulary overlay and
//! none of the presentation. A front end loads an [`EntryStore`], starts a
//! [`Session`], feeds it [`Command`]s and clock ticks, and renders the
//! [`Snapshot`] it reports back.
//!
//! # Components
//!
//! - **Entries**: `word|phonetic|meaning` parsing and the ordered store
//! - **Scheduler**: timer queue with cancellation handles, driven by a [`Clock`]
//! - **Navigation**: current index and the auto-advance time gate
//! - **Reveal**: visibility flags and the timed reveal protocol
//! - **Preferences**: timing and window preferences the engine reads
//!
//! # Example
//!
//! ```ignore
//! use vocab_core::{Command, EntryStore, Preferences, Session};
//!
//! let store = EntryStore::load(["猫|neko|cat", "犬|inu|dog"])?;
//! let mut session = Session::start_with_entropy(store, Preferences::default(), 0);
//!
//! session.handle(Command::Next, 1_000)?;
//! session.tick(1_600);
//! println!("{}", session.snapshot().word);
//! ```

mod clock;
mod command;
mod entry;
mod error;
mod navigation;
mod preferences;
mod reveal;
mod scheduler;
mod session;
mod snapshot;

// === Error Types ===
pub use error::{EntryError, NavigationError, Result, SessionError};

// === Entries ===
pub use entry::{EntryStore, FIELD_SEPARATOR, VocabEntry, parse_entry};

// === Time ===
pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{MIN_INTERVAL_MS, Scheduler, TimerId};

// === Engine ===
pub use command::{Command, Outcome};
pub use navigation::NavigationEngine;
pub use reveal::{ADVANCE_OFFSET_MS, RevealController, RevealPhase, RevealToggles, Visibility};
pub use session::{Session, TickResult, TimerEvent};
pub use snapshot::{Snapshot, position_label};

// === Preferences ===
pub use preferences::{
    AUTO_ADVANCE_FIRST_DELAY_MS, DEFAULT_CHANGE_INTERVAL_MINUTES, DEFAULT_DATA_FILE,
    DEFAULT_REVEAL_DELAY_SECONDS, Geometry, MIN_AUTO_ADVANCE_PERIOD_MS, Preferences, WindowStyle,
    validate_duration,
};
