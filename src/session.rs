//! Chat session state machine
//!
//! Pure transitions in the Elm style: `transition` maps a status and an
//! event to a new status plus effects, and the runtime executes the effects.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Message, Sender, SessionContext, SessionStatus};
pub use transition::{transition, TransitionError};
