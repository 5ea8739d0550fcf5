//! Template statement, a single node of a parsed template.
//!
//! Statements are produced by scanning the template once. Blocks hold
//! the statements found between their opening and closing tags.
use super::super::lexer::{find_block_end, Block, Lexer, Token, TokenWithContext};
use super::super::{Error, Value};
use super::{Path, Program};

use tracing::{debug, trace, warn};

/// Template statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Literal text, copied to the output unchanged.
    Text(String),

    // `{{ path }}`
    Print(Path),

    // `{{#if condition}} ... {{/if}}`
    If { condition: Path, body: Program },

    // `{{#each collection}} ... {{/each}}`
    Each { collection: Path, body: Program },
}

impl Statement {
    /// Build a statement from a token, consuming more tokens from the lexer
    /// if the token opens a block.
    ///
    /// Closing tags that don't close anything produce no statement.
    /// `depth` is the number of blocks the token is inside of.
    pub fn parse(
        token: TokenWithContext<'_>,
        lexer: &mut Lexer<'_>,
        depth: usize,
        max_depth: Option<usize>,
    ) -> Result<Option<Self>, Error> {
        Ok(match token.token() {
            Token::Text(text) => Some(Statement::Text(text.to_string())),
            Token::Variable(path) => Some(Statement::Print(Path::new(path))),
            Token::If(condition) => Some(Self::block(
                Block::If,
                condition,
                token,
                lexer,
                depth,
                max_depth,
            )?),
            Token::Each(collection) => Some(Self::block(
                Block::Each,
                collection,
                token,
                lexer,
                depth,
                max_depth,
            )?),
            Token::Close(tag) => {
                trace!("ignoring closing tag \"{}\" at offset {}", tag, token.start());
                None
            }
        })
    }

    fn block(
        block: Block,
        path: &str,
        token: TokenWithContext<'_>,
        lexer: &mut Lexer<'_>,
        depth: usize,
        max_depth: Option<usize>,
    ) -> Result<Self, Error> {
        let source = lexer.source();

        let close = match find_block_end(source, token.end(), block) {
            Some(close) => close,
            None => {
                // Without a closing tag, the directive is read as a variable,
                // which won't resolve to anything.
                debug!(
                    "#{} block at offset {} is never closed",
                    block.name(),
                    token.start()
                );
                let directive = format!("{}{}", block.prefix(), path);
                return Ok(Statement::Print(Path::new(&directive)));
            }
        };

        if let Some(limit) = max_depth {
            if depth >= limit {
                warn!("template nesting exceeds the limit of {} blocks", limit);
                return Err(Error::nesting_too_deep(source, token.start(), limit));
            }
        }

        let body = Program::parse(
            Lexer::window(source, token.end(), close),
            depth + 1,
            max_depth,
        )?;
        lexer.seek(close + block.close_marker().len());

        let path = Path::new(path);

        Ok(match block {
            Block::If => Statement::If {
                condition: path,
                body,
            },
            Block::Each => Statement::Each {
                collection: path,
                body,
            },
        })
    }

    /// Evaluate the statement given the context, appending the result to `output`.
    pub fn evaluate(&self, context: &Value, output: &mut String) {
        match self {
            Statement::Text(text) => output.push_str(text),

            Statement::Print(path) => match path.resolve(context) {
                Some(value) => output.push_str(&value.to_string()),
                None => trace!("\"{}\" is not defined", path),
            },

            Statement::If { condition, body } => {
                let truthy = match condition.resolve(context) {
                    Some(value) => value.truthy(),
                    None => {
                        trace!("\"{}\" is not defined, skipping #if", condition);
                        false
                    }
                };

                if truthy {
                    body.evaluate_into(context, output);
                }
            }

            Statement::Each { collection, body } => match collection.resolve(context).as_deref() {
                // Each item replaces the context entirely.
                Some(Value::List(items)) => {
                    for item in items {
                        body.evaluate_into(item, output);
                    }
                }
                Some(value) => debug!(
                    "#each over \"{}\", which is a {}, not a list",
                    collection,
                    value.kind()
                ),
                None => trace!("\"{}\" is not defined, skipping #each", collection),
            },
        }
    }
}
