//! Backend worker wiring.
//!
//! This module exposes the command/event protocol plus the worker spawn helper
//! used by the app state on the UI thread.

mod protocol;
mod worker;

pub use protocol::{ClipAction, ClipScope, CoreCmd, CoreErrorSource, CoreEvent};
pub use worker::{spawn_backend, BackendHandle};
