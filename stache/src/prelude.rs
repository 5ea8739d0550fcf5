//! Includes all necessary types and traits to render templates.
pub use crate::config::Config;
pub use crate::logging::Logger;
pub use crate::template::{render, Context, Error, Fields, Renderer, ToValue, Value};
