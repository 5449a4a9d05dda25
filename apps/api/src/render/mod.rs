// Display-side derivation of analysis results. Nothing here performs I/O.

pub mod rating;
pub mod sections;

pub use rating::RatingTier;
pub use sections::{render_sections, Section};
