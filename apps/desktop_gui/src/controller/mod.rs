//! Controller layer: UI events, load tracking, toasts, and command orchestration.

pub mod events;
pub mod loads;
pub mod orchestration;
pub mod toasts;
