pub mod context;
pub mod error;
pub mod language;
pub mod lexer;
pub mod value;

pub use context::Context;
pub use error::Error;
pub use lexer::{Lexer, Token, TokenWithContext, Tokenize};
pub use value::{Fields, ToValue, Value};

use crate::config::{get_config, Config};
use language::Program;

/// Render a template with the given context.
///
/// Never fails: missing variables render as nothing, malformed tags degrade
/// to text or nothing. Nesting isn't limited, so very deeply nested
/// blocks use a lot of stack. Use [`Renderer::try_render`] to enforce a limit.
pub fn render(template: &str, context: &Context) -> String {
    Renderer::unlimited()
        .try_render(template, context)
        // Only the nesting limit can reject a template.
        .unwrap_or_default()
}

/// Template renderer with a limit on block nesting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    max_depth: Option<usize>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(get_config())
    }
}

impl Renderer {
    /// Renderer configured from the global config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer without a nesting limit.
    pub fn unlimited() -> Self {
        Self { max_depth: None }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth(),
        }
    }

    /// Renderer configured from a config file and the environment.
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        Ok(Self::from_config(&Config::load_from(path)?))
    }

    /// Set the maximum number of nested blocks. `None` removes the limit.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.max_depth
    }

    /// Render a template with the given context.
    ///
    /// Produces the same output as [`render`], unless the template nests
    /// blocks deeper than the limit, in which case it's rejected.
    pub fn try_render(&self, template: &str, context: &Context) -> Result<String, Error> {
        let program = Program::from_str(template, self.max_depth)?;
        Ok(program.evaluate(context))
    }
}
