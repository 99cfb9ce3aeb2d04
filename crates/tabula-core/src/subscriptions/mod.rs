//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- key presses, mouse, resize
//!   and paste events from the terminal.
//! - **Interval timer** ([`Every`]) -- drives spinner animation while a
//!   widget is loading.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
