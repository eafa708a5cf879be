//! Types and helpers shared by the describer and the server generator.

pub mod python;
pub mod types;

pub use types::{GeneratedCode, GeneratedFile};
