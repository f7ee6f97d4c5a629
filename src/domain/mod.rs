//! Domain layer for the hero roster.
//!
//! Core types independent of storage, timing, or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`hero`]: Hero entity model
//!
//! # Examples
//!
//! ```
//! use hero_roster::domain::{Hero, Result};
//!
//! fn draft() -> Result<Hero> {
//!     Ok(Hero::new("Superman", "Flight", "Metropolis"))
//! }
//! # draft().unwrap();
//! ```

pub mod error;
pub mod hero;

pub use error::{Result, RosterError};
pub use hero::Hero;
