pub mod tracker;

pub use tracker::{HoldConfig, HoldOutcome, HoldProgress, HoldState, HoldTracker, HOLD_DURATION_MS};
