use crate::{
    environment::Environment,
    error::{UnclassifiedError, UnclassifiedErrorKind},
};

/// Renders the bindings as a JSON object indented by two spaces, with a trailing newline.
pub fn to_json(environment: &Environment) -> Result<String, UnclassifiedError> {
    let mut document = serde_json::to_string_pretty(environment)
        .map_err(|e| UnclassifiedErrorKind::Render(e.to_string()))?;
    document.push('\n');
    Ok(document)
}
