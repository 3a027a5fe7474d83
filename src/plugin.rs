use serde_json::Value;
use thiserror::Error;

use crate::cleaner::CleanError;
use crate::file::File;

#[derive(Debug, Error)]
pub enum PluginError {
  #[error("[{plugin}] streams are not supported: {path}")]
  StreamsNotSupported { plugin: &'static str, path: String },
  #[error("[{plugin}] transformation failed: {error}")]
  TransformationFailed {
    plugin: &'static str,
    #[source]
    error: CleanError,
    // parse sub-options in effect when the transform failed
    esprima: Value,
  },
  #[error("[{plugin}] generated source map is not valid JSON")]
  InvalidSourceMap {
    plugin: &'static str,
    #[source]
    error: serde_json::Error,
  },
  #[error("[{plugin}] transform returned the wrong output shape (map expected: {expected_map})")]
  UnexpectedOutput {
    plugin: &'static str,
    expected_map: bool,
  },
}

/// A per-file pipeline step. For each input it emits the (possibly mutated)
/// file, or fails the whole pipeline.
pub trait Plugin {
  fn name(&self) -> &'static str;

  fn process(&self, file: File) -> Result<File, PluginError>;
}

/// Minimal sequential driver. Files go through every plugin strictly in
/// order, one at a time; a file is taken up only after the previous one has
/// completed, and the first error aborts the run.
pub struct PluginDriver {
  pub plugins: Vec<Box<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Box<dyn Plugin>>) -> Self {
    Self { plugins }
  }

  pub fn run(&self, files: Vec<File>) -> Result<Vec<File>, PluginError> {
    let mut processed = Vec::with_capacity(files.len());
    for mut file in files {
      for plugin in &self.plugins {
        file = plugin.process(file)?;
      }
      processed.push(file);
    }
    Ok(processed)
  }
}
