use crate::{
    error::ConfigError,
    evaluator::evaluate_expression,
    parser::declaration::Program,
    value::Value,
};
use compact_str::CompactString;
use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

/// Ordered name to value bindings.
///
/// A name keeps the position of its first declaration; binding it again only replaces the
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    bindings: IndexMap<CompactString, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns the previous value when `name` was already bound.
    pub fn bind(&mut self, name: &str, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Serialize for Environment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Ready,
    /// The next declaration to evaluate.
    Binding(usize),
    Done,
    Failed,
}

/// Evaluates declarations one at a time, in source order.
#[derive(Debug)]
pub struct EnvironmentBuilder<'p> {
    program: &'p Program,
    environment: Environment,
    state: BuilderState,
}

impl<'p> EnvironmentBuilder<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            environment: Environment::new(),
            state: BuilderState::Ready,
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Advances by at most one declaration and returns the new state.
    pub fn step(&mut self) -> Result<BuilderState, ConfigError> {
        let index = match self.state {
            BuilderState::Ready => 0,
            BuilderState::Binding(index) => index,
            BuilderState::Done | BuilderState::Failed => return Ok(self.state),
        };

        let Some(declaration) = self.program.get_declaration(index) else {
            self.state = BuilderState::Done;
            return Ok(self.state);
        };

        match evaluate_expression(&declaration.expression, &self.environment) {
            Ok(value) => {
                tracing::debug!(name = %declaration.name, %value, "bound");
                if self.environment.bind(&declaration.name, value).is_some() {
                    tracing::debug!(name = %declaration.name, "redeclared");
                }
                self.state = BuilderState::Binding(index + 1);
                Ok(self.state)
            }
            Err(error) => {
                tracing::debug!(name = %declaration.name, %error, "evaluation failed");
                self.state = BuilderState::Failed;
                Err(error)
            }
        }
    }

    /// Runs to completion. The environment is only handed out when every declaration succeeded.
    #[tracing::instrument(level = "debug", skip_all, fields(count = self.program.len()))]
    pub fn build(mut self) -> Result<Environment, ConfigError> {
        while self.step()? != BuilderState::Done {}
        Ok(self.environment)
    }
}
