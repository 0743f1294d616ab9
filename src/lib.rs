pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod render;
pub mod value;

use environment::{Environment, EnvironmentBuilder};
use error::ConfigError;
use parser::{declaration::Program, Parser, ParserError};

pub fn parse_program(source: &str) -> Result<Program, ParserError> {
    Parser::new(source).parse()
}

pub fn evaluate_program(program: &Program) -> Result<Environment, ConfigError> {
    EnvironmentBuilder::new(program).build()
}

/// Parses, evaluates and renders `source` as a JSON document.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn run(source: &str) -> Result<String, ConfigError> {
    let program = parse_program(source)?;
    let environment = evaluate_program(&program)?;
    Ok(render::to_json(&environment)?)
}
