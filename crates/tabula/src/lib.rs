//! **tabula**: labeled input fields and sortable, selectable data tables for
//! [`ratatui`], hosted on a small Elm-architecture runtime.
//!
//! ```toml
//! [dependencies]
//! tabula = "0.1"
//! ```
//!
//! * Everything from [`tabula_core`] is available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`], ...).
//! * [`widgets`] re-exports [`tabula_widgets`].
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`tracing`] are re-exported so
//!   applications need only this crate.
//!
//! ```ignore
//! use tabula::widgets::data_table::{Column, DataTable};
//! use tabula::widgets::record::record;
//!
//! let table = DataTable::new(
//!     vec![record([("id", 1.into()), ("name", "Ada".into())])],
//!     vec![Column::new("name", "Name").sortable(true)],
//! );
//! ```

pub use tabula_core::*;
pub mod widgets {
    pub use tabula_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
pub use tracing;
