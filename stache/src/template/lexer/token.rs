/// A template token: literal text or a single `{{ ... }}` tag.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    // e.g. `<p>Hello, </p>`, or an unterminated `{{ name`
    Text(&'a str),
    // e.g. `{{ user.name }}`
    Variable(&'a str),
    // `{{#if logged_in}}`
    If(&'a str),
    // `{{#each items}}`
    Each(&'a str),
    // `{{/if}}`, `{{/each}}` or any other tag starting with a slash
    Close(&'a str),
}

impl<'a> Token<'a> {
    /// Classify the trimmed contents of a tag.
    pub fn classify(tag: &'a str) -> Self {
        if let Some(condition) = tag.strip_prefix("#if ") {
            Token::If(condition)
        } else if let Some(collection) = tag.strip_prefix("#each ") {
            Token::Each(collection)
        } else if tag.starts_with('/') {
            Token::Close(tag)
        } else {
            Token::Variable(tag)
        }
    }
}

/// Token and its byte span in the template source.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TokenWithContext<'a> {
    token: Token<'a>,
    start: usize,
    end: usize,
}

impl<'a> TokenWithContext<'a> {
    pub fn new(token: Token<'a>, start: usize, end: usize) -> Self {
        Self { token, start, end }
    }

    pub fn token(&self) -> Token<'a> {
        self.token
    }

    /// Offset of the first byte of the token.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the token, e.g. right after the closing `}}`.
    pub fn end(&self) -> usize {
        self.end
    }
}
