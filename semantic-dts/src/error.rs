use parse_dts::error::SyntaxError;
use std::error::Error;
use std::fmt;

/// A unit-level failure: the unit could not be ingested at all. Declaration- and member-level
/// failures never surface here; they are logged and the offending declaration is dropped.
#[derive(Debug)]
pub struct AnalyzeError {
  pub unit: String,
  pub error: SyntaxError,
}

impl fmt::Display for AnalyzeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "failed to analyze {}: {}", self.unit, self.error)
  }
}

impl Error for AnalyzeError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&self.error)
  }
}

/// A declaration- or member-level structural failure. Caught by the walker, logged with the unit
/// identifier, and the offending declaration or member is dropped.
#[derive(Debug)]
pub(crate) enum ExtractError {
  UnsupportedPropertyKey { rendered: String },
}

impl fmt::Display for ExtractError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExtractError::UnsupportedPropertyKey { rendered } => {
        write!(f, "unsupported property key {}", rendered)
      }
    }
  }
}

impl Error for ExtractError {}

pub(crate) type ExtractResult<T> = Result<T, ExtractError>;
