//! Parser for the declaration subset of TypeScript used by typed interface definition corpora:
//! interfaces, type aliases, ambient variable/function declarations, and the type-expression
//! grammar they use. Imports are parsed and retained verbatim but never resolved.
//!
//! This is not a general-purpose TypeScript parser; statements and expressions outside the
//! declaration subset are rejected with a [`error::SyntaxError`].

use ast::decl::TopLevel;
use ast::node::Node;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.parse_top_level()
}
