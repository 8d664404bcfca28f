use crate::ast::node::Node;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::Lexer;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod decl;
pub mod type_expr;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

// Tokens are buffered as they are lexed so the parser can cheaply peek ahead and rewind to a
// checkpoint; the lexer itself only ever moves forward.
pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<Token>,
  next_tok_i: usize,
}

impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, keep: K) -> (bool, Token) {
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer);
      self.buf.push(token);
    };
    let t = self.buf[self.next_tok_i].clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume(&mut self) -> Token {
    self.forward(|_| true).1
  }

  /// Consumes the next token regardless of type, and returns its raw source code as a string.
  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn peek(&mut self) -> Token {
    self.forward(|_| false).1
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(|_| true);
    let b = self.forward(|_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(|_| true);
    let b = self.forward(|_| true);
    let c = self.forward(|_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1, c.1)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.forward(|t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.consume();
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  /// Requires an identifier token and returns its text.
  pub fn require_identifier(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    if t.typ != TT::Identifier {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    Ok(self.string(t.loc))
  }

  /// Requires an identifier, but also accepts keywords, since contextual keywords like `type` or
  /// `from` are valid property and parameter names.
  pub fn require_name(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    if t.typ != TT::Identifier && !KEYWORDS_MAPPING.contains_key(&t.typ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("name")));
    };
    Ok(self.string(t.loc))
  }

  pub fn is_name(&mut self, t: &Token) -> bool {
    t.typ == TT::Identifier || KEYWORDS_MAPPING.contains_key(&t.typ)
  }

  fn prev_end(&self) -> usize {
    if self.next_tok_i == 0 {
      0
    } else {
      self.buf[self.next_tok_i - 1].loc.1
    }
  }

  pub fn with_loc<S, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.peek().loc.0;
    let stx = f(self)?;
    let end = self.prev_end().max(start);
    Ok(Node::new(Loc(start, end), stx))
  }

  /// Parse a list of items separated by a delimiter until `close`, which will also be consumed.
  /// Allows for a trailing delimiter.
  pub fn list_with_loc<S, F>(&mut self, delim: TT, close: TT, f: F) -> SyntaxResult<Vec<Node<S>>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut nodes = Vec::new();
    while !self.consume_if(close).is_match() {
      nodes.push(self.with_loc(&f)?);
      if !self.consume_if(delim).is_match() {
        self.require(close)?;
        break;
      };
    }
    Ok(nodes)
  }

  /// Consumes a string literal token and returns its decoded value.
  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    Ok(unescape_string_literal(self.str(t.loc)))
  }
}

fn unescape_string_literal(raw: &str) -> String {
  // The lexer guarantees enclosing quotes.
  let inner = &raw[1..raw.len() - 1];
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    };
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('r') => out.push('\r'),
      Some('t') => out.push('\t'),
      Some('0') => out.push('\0'),
      Some('u') => {
        let mut hex = String::new();
        if chars.peek() == Some(&'{') {
          chars.next();
          while let Some(&c) = chars.peek() {
            if c == '}' {
              chars.next();
              break;
            };
            hex.push(c);
            chars.next();
          }
        } else {
          for _ in 0..4 {
            if let Some(&c) = chars.peek() {
              if c.is_ascii_hexdigit() {
                hex.push(c);
                chars.next();
              };
            };
          }
        };
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          Some(c) => out.push(c),
          // Malformed escape: keep the raw text rather than fail.
          None => {
            out.push_str("\\u");
            out.push_str(&hex);
          }
        };
      }
      Some(other) => out.push(other),
      None => {}
    };
  }
  out
}
