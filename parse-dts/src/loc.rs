use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  /// Extends this location to cover `other` as well.
  pub fn extend(&mut self, other: Loc) {
    self.0 = self.0.min(other.0);
    self.1 = self.1.max(other.1);
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}
