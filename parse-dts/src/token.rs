use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling
  // Option everywhere.
  EOF,
  // Special token used to represent invalid source code. Easier than having to propagate
  // SyntaxError from the lexer level.
  Invalid,
  // These are only used by the lexer.
  CommentMultiline,
  CommentSingle,
  LineTerminator,
  Whitespace,

  Ampersand,
  Asterisk,
  Bar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  ChevronLeft,
  ChevronRight,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  Identifier,
  KeywordAny,
  KeywordBooleanType,
  KeywordConst,
  KeywordDeclare,
  KeywordExport,
  KeywordExtends,
  KeywordFrom,
  KeywordFunction,
  KeywordImport,
  KeywordInterface,
  KeywordLet,
  KeywordNever,
  KeywordNew,
  KeywordNumberType,
  KeywordObjectType,
  KeywordReadonly,
  KeywordStringType,
  KeywordType,
  KeywordUndefinedType,
  KeywordUnknown,
  KeywordVar,
  KeywordVoid,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralString,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Question,
  Semicolon,
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
