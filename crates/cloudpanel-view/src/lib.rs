//! # cloudpanel-view
//!
//! Rendering side of CloudPanel. View-models are turned into [`Element`]
//! trees by the pure functions in [`render`], pushed into a [`View`] region,
//! and scanned by [`ActionBindings`] for the actions the user can trigger.
//! Modal interaction goes through [`Dialogs`].

pub mod bindings;
pub mod element;
pub mod memory;
pub mod render;
pub mod surface;
pub mod terminal;

pub use bindings::{Action, ActionBindings, Binding};
pub use element::{Element, Node};
pub use memory::{MemoryView, ScriptedDialogs};
pub use surface::{Alert, AlertLevel, Dialogs, Region, TextPrompt, View};
pub use terminal::{TerminalDialogs, TerminalView};
