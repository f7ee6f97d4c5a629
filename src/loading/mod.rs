//! Busy-state tracking for asynchronous operations.
//!
//! Independent of the hero store: any component can share one [`LoadingTracker`]
//! to gate UI while operations are in flight.

pub mod tracker;

pub use tracker::{LoadingGuard, LoadingState, LoadingTracker};
