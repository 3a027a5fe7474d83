use serde_json::Value;
use thiserror::Error;

/// Narrow interface to the external AMD-clean transformation. The plugin
/// hands it a fully resolved option tree (at minimum `code`, `wrap`,
/// `escodegen` and `esprima`, plus `sourceMap` when a map is wanted) and
/// gets back one of two output shapes.
pub trait AmdClean {
  fn clean(&self, options: &Value) -> Result<CleanOutput, CleanError>;
}

/// Output of a clean call. Which variant is legal is decided by whether the
/// caller requested a source map, never by probing the value.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanOutput {
  /// Transformed source text only.
  Code(String),
  /// Transformed source text plus the serialized source map.
  CodeWithMap { code: String, map: String },
}

/// Failure raised by the external transformation, typically a parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct CleanError {
  pub message: String,
}

impl CleanError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}
