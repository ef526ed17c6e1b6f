//! # `memedit`
//!
//! `memedit` is an interactive byte-grid memory inspector and editor for `egui`.
//!
//! The crate provides:
//! - A scrollable, virtualized hex grid over any addressable byte store (via [`MemoryEditor`]).
//! - In-place byte editing with mouse and keyboard, including arrow-key navigation.
//! - A type-aware data preview (ten numeric types, three bases, both endiannesses).
//! - Pluggable read / write / highlight behavior (via [`MemorySource`] or [`MemoryHooks`]).
//!
//! ## Example
//!
//! ```no_run
//! use memedit::MemoryEditor;
//!
//! let mut editor = MemoryEditor::default();
//! let mut ram = vec![0u8; 0x10000];
//!
//! # let ctx = egui::Context::default();
//! # let _ = ctx.run(egui::RawInput::default(), |ctx| {
//! egui::CentralPanel::default().show(ctx, |ui| {
//!     editor.draw_contents(ui, &mut ram, 0xC000);
//! });
//! # });
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]

mod editor;
mod error;
mod events;
mod field;
pub mod geometry;
pub mod highlight;
pub mod preview;
mod settings;
pub mod state;
mod store;
mod ui_grid;
mod ui_options;
mod ui_preview;
pub mod viewport;

// Public APIs
pub use editor::{DrawOutput, MemoryEditor};
pub use error::{EditorError, parse_goto_address, parse_hex_byte};
pub use events::NavKey;
pub use field::HexField;
pub use geometry::{FontMetrics, Geometry, StyleMetrics};
pub use preview::{DataFormat, DataType, Endianness};
pub use settings::EditorSettings;
pub use state::{Cursor, EditorState, ScrollRequest};
pub use store::{HookedSlice, MemoryHooks, MemorySource};
