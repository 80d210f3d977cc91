pub mod narration_flow;
pub mod session_ctx;

pub use narration_flow::{BroadcastOutcome, BroadcastStats, NarrationFlow};
pub use session_ctx::SessionCtx;
