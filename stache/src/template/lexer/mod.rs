//! Template scanner.
//!
//! Splits the template into literal text and `{{ ... }}` tags, left to right.
//! A `{{` without a closing `}}` anywhere after it isn't a tag: it's emitted,
//! together with the rest of the template, as text.
pub mod matcher;
pub mod token;

pub use matcher::{find_block_end, Block};
pub use token::{Token, TokenWithContext};

use tracing::debug;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Template scanner, producing tokens.
///
/// The scanner works on a window of the template: offsets it reports are
/// offsets into the whole template, but it never looks past the end of the window.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Scan the entire template.
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Scan the template between `start` and `end` only.
    pub fn window(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            source: &source[..end],
            pos: start,
        }
    }

    /// The template, up to the end of the window.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Continue scanning from `pos`.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Get all remaining tokens.
    pub fn tokens(self) -> Vec<TokenWithContext<'a>> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let len = self.source.len();

        if start >= len {
            return None;
        }

        let rest = &self.source[start..];

        let open = match rest.find(OPEN) {
            Some(0) => start,
            Some(offset) => {
                self.pos = start + offset;
                return Some(TokenWithContext::new(
                    Token::Text(&rest[..offset]),
                    start,
                    self.pos,
                ));
            }
            None => {
                self.pos = len;
                return Some(TokenWithContext::new(Token::Text(rest), start, len));
            }
        };

        let inner = open + OPEN.len();

        match self.source[inner..].find(CLOSE) {
            Some(offset) => {
                let end = inner + offset + CLOSE.len();
                self.pos = end;
                let tag = self.source[inner..inner + offset].trim();

                Some(TokenWithContext::new(Token::classify(tag), open, end))
            }

            None => {
                debug!("unterminated tag at offset {}, emitting it as text", open);
                self.pos = len;
                Some(TokenWithContext::new(
                    Token::Text(&self.source[open..]),
                    open,
                    len,
                ))
            }
        }
    }
}

/// Tokenize a string.
pub trait Tokenize {
    fn tokenize(&self) -> Vec<TokenWithContext<'_>>;
}

impl Tokenize for str {
    fn tokenize(&self) -> Vec<TokenWithContext<'_>> {
        Lexer::new(self).tokens()
    }
}
