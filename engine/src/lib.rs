// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod input;
pub mod render;
pub mod report;
pub mod session;

// Re-export the bits drivers and tests need:
pub use engine::{
    Board, Cell, ConfigError, Direction, EndReason, Game, GameConfig, GridConfig, Item,
    ItemPlacer, Phase, ReportConfig, SessionReport, StepResult, TrashKind, DEFAULT_H, DEFAULT_W,
    PLACEMENT_ATTEMPTS,
};
pub use input::{AutopilotInput, Control, InputKind, InputSource, RandomInput, ScriptedInput};
pub use render::{AsciiRenderer, NoopRenderer, Renderer};
pub use report::{
    coins_for_score, HttpReporter, LocalLedger, NoopReporter, ReportError, RewardOutcome,
    ScorePayload, ScoreReporter, ScoreResponse,
};
pub use session::{FrameOutcome, Session};
