use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::file::File;

/// Options every invocation starts from. Cloned per file so merging can
/// never bleed back into the defaults.
pub static DEFAULT_OPTIONS: Lazy<Value> = Lazy::new(|| {
  json!({
    "escodegen": {},
    "esprima": {},
  })
});

/// Construction-time configuration surface: either a fixed option tree, or
/// a function producing one per file. The static case is simply a provider
/// that ignores the file.
pub enum OptionsProvider {
  Static(Value),
  Generator(Box<dyn Fn(&File) -> Value>),
}

impl OptionsProvider {
  /// Produce the per-file overrides. The generated tree should be an
  /// object; anything else is treated as no overrides at all.
  pub fn provide(&self, file: &File) -> Value {
    let options = match self {
      Self::Static(options) => options.clone(),
      Self::Generator(generator) => generator(file),
    };
    if options.is_object() {
      options
    } else {
      Value::Object(Map::new())
    }
  }
}

impl From<Value> for OptionsProvider {
  fn from(options: Value) -> Self {
    Self::Static(options)
  }
}

/// Recursive merge of two option trees. Later (override) values win,
/// objects merge key by key, arrays and scalars are replaced wholesale.
/// Neither input is mutated; a null override keeps the base.
pub fn deep_merge(base: &Value, overrides: &Value) -> Value {
  match (base, overrides) {
    (Value::Object(base), Value::Object(overrides)) => {
      let mut merged = base.clone();
      for (key, value) in overrides {
        let entry = match merged.get(key) {
          Some(prev) => deep_merge(prev, value),
          None => value.clone(),
        };
        merged.insert(key.clone(), entry);
      }
      Value::Object(merged)
    }
    (base, Value::Null) => base.clone(),
    _ => overrides.clone(),
  }
}

/// JavaScript-style truthiness over an option value.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
