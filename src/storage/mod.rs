//! Storage layer: the authoritative hero collection and its query surface.
//!
//! All data lives in memory and is recreated on load; there is no persistence.
//!
//! # Modules
//!
//! - `backend`: [`HeroRepository`] trait, the seam the controller talks to
//! - `memory`: [`HeroStore`], the in-memory entity store with a snapshot feed
//! - `search`: Case-insensitive substring matching over hero text fields
//! - `seed`: The initial 13-hero roster
//! - `feed`: Synchronous publish/subscribe primitive shared with other components

pub mod backend;
pub mod feed;
pub mod memory;
pub mod search;
pub mod seed;

pub use backend::HeroRepository;
pub use feed::{Feed, SubscriptionId};
pub use memory::HeroStore;
pub use search::{matches_term, normalize_term};
pub use seed::seed_heroes;
