//! Presentation-facing snapshot of the hero list.
//!
//! ```text
//! ListViewController → compute_viewmodel → ListViewModel → host rendering
//! ```
//!
//! Rendering itself belongs to the host (DOM, terminal, ...); this layer only
//! prepares display-ready data.
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and their computation

pub mod viewmodel;

pub use viewmodel::{
    compute_viewmodel, DeletePrompt, EmptyState, FieldView, FormView, HeaderInfo, HeroRow,
    ListViewModel,
};
