//! Text store, reversible commands and line window for lineview.
//!
//! Provides a rope-backed [`TextStore`], the [`Command`] values that edit it,
//! the [`CommandEngine`] that keeps undo/redo history, and the [`Viewport`]
//! that decides which prefix of a large document gets rendered.

mod command;
mod history;
mod store;
mod viewport;

pub use command::Command;
pub use history::{CommandEngine, StoreContractViolation, DEFAULT_HISTORY_LIMIT};
pub use store::{RopeStore, TextStore};
pub use viewport::{Viewport, EXPAND_THRESHOLD, INITIAL_WINDOW, SCROLL_INCREMENT};
