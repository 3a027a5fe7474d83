use crate::source_map::SourceMapData;

/// One unit of content moving through the pipeline. A file is owned
/// exclusively by the pipeline for the duration of a processing step;
/// plugins mutate it in place and hand the same object downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
  // path identifying the file, also used as the `file` field of maps
  pub path: String,
  pub contents: FileContents,
  pub source_map: Option<SourceMapData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileContents {
  /// Content absent. Plugins pass these through untouched.
  Null,
  /// Fully materialized bytes.
  Buffer(Vec<u8>),
  /// A live stream. Whole-content plugins must reject these.
  Stream,
}

impl File {
  pub fn new(path: impl Into<String>, contents: FileContents) -> Self {
    Self {
      path: path.into(),
      contents,
      source_map: None,
    }
  }

  pub fn from_source(path: impl Into<String>, source: impl Into<String>) -> Self {
    Self::new(path, FileContents::Buffer(source.into().into_bytes()))
  }

  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(self.contents, FileContents::Null)
  }

  #[inline]
  pub fn is_stream(&self) -> bool {
    matches!(self.contents, FileContents::Stream)
  }

  /// Lossy text view of buffered contents. `None` for null or stream files.
  pub fn contents_utf8(&self) -> Option<String> {
    match &self.contents {
      FileContents::Buffer(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
      _ => None,
    }
  }
}
