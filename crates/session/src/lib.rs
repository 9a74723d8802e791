//! Document sessions and edit dispatch for lineview.
//!
//! A [`DocumentSession`] bundles everything that belongs to one open
//! document. The [`EditDispatcher`] validates raw [`EditIntent`]s, turns them
//! into commands and re-renders the session's line window. [`SessionHost`]
//! owns the current session and handles create/open/save at the boundary.
//!
//! ```text
//! EditIntent → EditDispatcher → CommandEngine → Viewport::resync → Rendered
//! ```

mod dispatcher;
mod event;
pub mod file_io;
mod gate;
mod host;
mod notify;
mod session;

pub use dispatcher::EditDispatcher;
pub use event::{BoundaryEvent, BoundaryInput, EditIntent, Rendered};
pub use file_io::LineEnding;
pub use gate::{FlightTicket, SingleFlight};
pub use host::SessionHost;
pub use notify::{LogNotifier, Notifier};
pub use session::{DocumentSession, SessionOptions};
