//! Terminal front end for the vocabulary overlay.

pub mod input;
pub mod interactive;
pub mod logging;
pub mod render;
