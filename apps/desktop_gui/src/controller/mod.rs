//! Controller layer: UI events, filter control state, and event queueing.

pub mod events;
pub mod filters;
pub mod orchestration;
