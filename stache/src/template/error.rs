use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("block at line {line}, column {column} is nested deeper than the limit of {limit}")]
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("value can't be represented in JSON: {0}")]
    NotJson(&'static str),

    #[error("failed to format a timestamp correctly, error: \"{0}\"")]
    TimeFormatError(#[from] time::error::Format),

    #[error("{0}")]
    Config(#[from] crate::config::Error),
}

impl Error {
    /// Block opened at `offset` in `source` goes over the nesting limit.
    pub fn nesting_too_deep(source: &str, offset: usize, limit: usize) -> Self {
        let (line, column) = location(source, offset);
        Error::NestingTooDeep {
            limit,
            line,
            column,
        }
    }
}

/// Line and column, both starting at 1, of a byte offset.
fn location(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|n| n + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;

    (line, column)
}
