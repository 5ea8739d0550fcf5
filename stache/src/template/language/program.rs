//! Parsed template.
//!
//! A program is a list of statements. It's built for one render call and
//! thrown away afterwards.
use super::super::{Error, Lexer, Value};
use super::Statement;

/// Executable template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Evaluate the program given the context.
    pub fn evaluate(&self, context: &Value) -> String {
        let mut result = String::new();
        self.evaluate_into(context, &mut result);
        result
    }

    /// Evaluate the program, appending the result to `output`.
    pub fn evaluate_into(&self, context: &Value, output: &mut String) {
        for statement in &self.statements {
            statement.evaluate(context, output);
        }
    }

    /// Parse all tokens the lexer produces.
    pub fn parse(
        mut lexer: Lexer<'_>,
        depth: usize,
        max_depth: Option<usize>,
    ) -> Result<Self, Error> {
        let mut statements = vec![];

        while let Some(token) = lexer.next() {
            if let Some(statement) = Statement::parse(token, &mut lexer, depth, max_depth)? {
                statements.push(statement);
            }
        }

        Ok(Program { statements })
    }

    /// Parse the program from source.
    ///
    /// With `max_depth` set, templates with more nested blocks
    /// than that are rejected.
    pub fn from_str(source: &str, max_depth: Option<usize>) -> Result<Self, Error> {
        Program::parse(Lexer::new(source), 0, max_depth)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
