//! Stache is a small template renderer meant to be embedded in applications that need
//! to produce bits of text, like HTML fragments or notification messages, from data.
//!
//! Templates mix literal text with tags in double curly braces. There are three kinds of tags:
//!
//! - `{{ path }}` prints a value, e.g. `{{ user.name }}`
//! - `{{#if path}} ... {{/if}}` renders its content only if the value is truthy
//! - `{{#each path}} ... {{/each}}` renders its content once for every item of a list,
//!   with the item as the context
//!
//! # Getting started
//!
//! ```
//! use stache::prelude::*;
//!
//! let mut context = Context::new();
//! context.set("name", "Alice").unwrap();
//! context.set("items", vec!["apples", "oranges"]).unwrap();
//!
//! let text = render("Hi {{name}}!{{#if items}} You bought:{{#each items}} ...{{/each}}{{/if}}", &context);
//!
//! assert_eq!(text, "Hi Alice! You bought: ... ...");
//! ```
//!
//! Contexts can be built from JSON too:
//!
//! ```
//! use stache::prelude::*;
//! use serde_json::json;
//!
//! let context = Context::from(json!({
//!     "users": [{"name": "A"}, {"name": "B"}],
//! }));
//!
//! assert_eq!(render("{{#each users}}{{name}}-{{/each}}", &context), "A-B-");
//! ```
//!
//! # Errors
//!
//! Rendering doesn't fail. Variables that don't exist print nothing, `{{` without a matching `}}`
//! is printed as-is, and blocks without a closing tag print nothing.
//!
//! Deeply nested blocks are rendered recursively. [`Renderer`] can enforce a nesting limit,
//! configured in `stache.toml` (see [`config`]):
//!
//! ```
//! use stache::prelude::*;
//!
//! let renderer = Renderer::unlimited().max_depth(Some(1));
//! let result = renderer.try_render("{{#if a}}{{#if b}}{{/if}}{{/if}}", &Context::new());
//!
//! assert!(result.is_err());
//! ```
pub mod config;
pub mod logging;
pub mod prelude;
pub mod template;

pub use config::Config;
pub use logging::Logger;
pub use template::{render, Context, Error, Fields, Renderer, ToValue, Value};
