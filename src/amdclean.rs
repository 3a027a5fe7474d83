use log::{error, info, warn};
use serde_json::{json, Value};

use crate::cleaner::{AmdClean, CleanOutput};
use crate::file::{File, FileContents};
use crate::options::{deep_merge, is_truthy, OptionsProvider, DEFAULT_OPTIONS};
use crate::plugin::{Plugin, PluginError};
use crate::source_map::{apply_source_map, SourceMapData};

pub const PLUGIN_NAME: &str = "amdclean-plugin";

/// The AMD-clean pipeline step. Holds the cleaner and the construction-time
/// configuration surface; everything else is rebuilt fresh for every file.
pub struct AmdCleanPlugin {
  cleaner: Box<dyn AmdClean>,
  provider: OptionsProvider,
}

impl AmdCleanPlugin {
  pub fn new(cleaner: Box<dyn AmdClean>, provider: OptionsProvider) -> Self {
    Self { cleaner, provider }
  }

  /// Plugin with a fixed option tree.
  pub fn with_options(cleaner: Box<dyn AmdClean>, options: Value) -> Self {
    Self::new(cleaner, OptionsProvider::Static(options))
  }

  /// Plugin with options generated per file.
  pub fn with_generator<F>(cleaner: Box<dyn AmdClean>, generator: F) -> Self
  where
    F: Fn(&File) -> Value + 'static,
  {
    Self::new(cleaner, OptionsProvider::Generator(Box::new(generator)))
  }
}

impl Plugin for AmdCleanPlugin {
  fn name(&self) -> &'static str {
    PLUGIN_NAME
  }

  fn process(&self, mut file: File) -> Result<File, PluginError> {
    // Nothing to be done for an absent file.
    if file.is_null() {
      return Ok(file);
    }

    // The cleaner consumes the whole content of a file at once; a live
    // stream can't provide that.
    if file.is_stream() {
      return Err(PluginError::StreamsNotSupported {
        plugin: PLUGIN_NAME,
        path: file.path.clone(),
      });
    }

    info!("{} {}", PLUGIN_NAME, file.path);

    // Mix the static defaults with the per-file overrides. Both sides are
    // copied so no file leaves residue on the next one.
    let mut options = deep_merge(&DEFAULT_OPTIONS, &self.provider.provide(&file));

    // The cleaner accepts either a file path or inline content; the content
    // is already in hand, so pass it inline.
    let code = file.contents_utf8().unwrap_or_default();
    options["code"] = Value::String(code);

    if let Some(existing) = &file.source_map {
      if is_truthy(options.get("wrap").unwrap_or(&Value::Null)) {
        warn!(
          "{} option \"wrap\" is ignored when generating source maps",
          PLUGIN_NAME
        );
      }

      // Hand the upstream map to the cleaner, and disable wrapping; the
      // code generator cannot map wrapped output back to its input.
      options["sourceMap"] = serde_json::to_value(existing).unwrap_or_default();
      options["wrap"] = Value::Bool(false);
      // The code generator only emits a map when these are set, and the map
      // must come back as a separate artifact rather than inlined.
      let escodegen = deep_merge(
        options.get("escodegen").unwrap_or(&Value::Null),
        &json!({ "sourceMap": true, "sourceMapWithCode": true }),
      );
      options["escodegen"] = escodegen;
    }

    // A map can be requested by the upstream file map or directly through
    // the user options; the output shape follows the resolved request.
    let map_requested = is_truthy(options.get("sourceMap").unwrap_or(&Value::Null));

    let output = self.cleaner.clean(&options).map_err(|err| {
      let esprima = options.get("esprima").cloned().unwrap_or(Value::Null);
      // Continuing with wrong output isn't a good idea.
      error!("{} {} (esprima: {})", PLUGIN_NAME, err, esprima);
      PluginError::TransformationFailed {
        plugin: PLUGIN_NAME,
        error: err,
        esprima,
      }
    })?;

    match (map_requested, output) {
      (true, CleanOutput::CodeWithMap { code, map }) => {
        file.contents = FileContents::Buffer(code.into_bytes());
        let mut map: SourceMapData = serde_json::from_str(&map).map_err(|err| {
          error!("{} generated source map is not valid JSON: {}", PLUGIN_NAME, err);
          PluginError::InvalidSourceMap {
            plugin: PLUGIN_NAME,
            error: err,
          }
        })?;
        map.file = Some(file.path.clone());
        apply_source_map(&mut file, map);
      }
      (false, CleanOutput::Code(code)) => {
        file.contents = FileContents::Buffer(code.into_bytes());
      }
      (expected_map, _) => {
        return Err(PluginError::UnexpectedOutput {
          plugin: PLUGIN_NAME,
          expected_map,
        });
      }
    }

    Ok(file)
  }
}
