//! Widgets for **tabula** programs.
//!
//! Every widget implements [`tabula_core::Component`], so it embeds in any
//! [`tabula_core::Model`] and renders into whatever [`ratatui`] area its
//! parent picks. Outbound notifications (a new selection, an edited value)
//! come back from `update` as messages.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`data_table`] | Sortable, selectable table over generic records |
//! | [`input_field`] | Labeled text input with clear, reveal, loading and validation |
//! | [`spinner`] | Busy indicator used by the loading states |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | [`Record`](record::Record) trait and [`Value`](record::Value) |
//! | [`identity`] | Row identities that survive re-sorting |
//! | [`sort`] | Three-state sort cycle and row ordering |
//! | [`selection`] | Identity-based single and multi selection |
//! | [`key`] | Configurable key bindings and help lines |
//! | [`chrome`] | Field borders and status panels |

pub mod chrome;
pub mod data_table;
pub mod identity;
pub mod input_field;
pub mod key;
pub mod record;
pub mod selection;
pub mod sort;
pub mod spinner;
