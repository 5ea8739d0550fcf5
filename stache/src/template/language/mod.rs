//! Implementation of the template language.
//!
//! Includes the parser and runtime.
pub mod path;
pub mod program;
pub mod statement;

pub use path::Path;
pub use program::Program;
pub use statement::Statement;
