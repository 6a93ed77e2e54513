// engine/src/input/mod.rs
#![forbid(unsafe_code)]

mod autopilot;
mod base;
mod random;
mod scripted;

/**
 * Curated input public API.
 *
 * Internal implementation modules remain private; only stable input sources are re-exported.
 */
pub use autopilot::AutopilotInput;
pub use base::{Control, InputKind, InputSource};
pub use random::RandomInput;
pub use scripted::{ScriptFrame, ScriptedInput};
