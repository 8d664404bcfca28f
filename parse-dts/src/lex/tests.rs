use super::lex_next;
use super::Lexer;
use crate::token::TT;

fn lex_all(source: &str) -> Vec<(TT, String)> {
  let mut lexer = Lexer::new(source);
  let mut tokens = Vec::new();
  loop {
    let token = lex_next(&mut lexer);
    if token.typ == TT::EOF {
      break;
    };
    let text = source[token.loc.0..token.loc.1].to_string();
    tokens.push((token.typ, text));
  }
  tokens
}

fn types(source: &str) -> Vec<TT> {
  lex_all(source).into_iter().map(|(tt, _)| tt).collect()
}

#[test]
fn lexes_keywords_and_identifiers() {
  assert_eq!(types("interface Foo extends Bar"), vec![
    TT::KeywordInterface,
    TT::Identifier,
    TT::KeywordExtends,
    TT::Identifier,
  ]);
}

#[test]
fn identifier_starting_with_keyword_is_not_a_keyword() {
  let tokens = lex_all("interfaceX types lets");
  assert_eq!(tokens, vec![
    (TT::Identifier, "interfaceX".to_string()),
    (TT::Identifier, "types".to_string()),
    (TT::Identifier, "lets".to_string()),
  ]);
}

#[test]
fn nested_generics_close_with_two_separate_chevrons() {
  assert_eq!(types("A<B<C>>"), vec![
    TT::Identifier,
    TT::ChevronLeft,
    TT::Identifier,
    TT::ChevronLeft,
    TT::Identifier,
    TT::ChevronRight,
    TT::ChevronRight,
  ]);
}

#[test]
fn comments_and_whitespace_are_insignificant() {
  let tokens = types(
    "// leading\ninterface /* inline */ Foo {\n  /** doc */\n  x: string;\n}",
  );
  assert_eq!(tokens, vec![
    TT::KeywordInterface,
    TT::Identifier,
    TT::BraceOpen,
    TT::Identifier,
    TT::Colon,
    TT::KeywordStringType,
    TT::Semicolon,
    TT::BraceClose,
  ]);
}

#[test]
fn unterminated_multiline_comment_consumes_rest_of_source() {
  assert_eq!(types("foo /* never closed"), vec![TT::Identifier]);
}

#[test]
fn lexes_string_literals_with_escapes() {
  let tokens = lex_all(r#"'simple' "with \" quote""#);
  assert_eq!(tokens[0].0, TT::LiteralString);
  assert_eq!(tokens[1].0, TT::LiteralString);
  assert_eq!(tokens[1].1, r#""with \" quote""#);
}

#[test]
fn string_with_bare_line_terminator_is_invalid() {
  assert_eq!(types("'oops\n'"), vec![TT::Invalid, TT::Invalid]);
}

#[test]
fn lexes_numbers() {
  let tokens = lex_all("0 42 3.14 .5 1e10 1.5e-3");
  assert!(tokens.iter().all(|(tt, _)| *tt == TT::LiteralNumber));
  assert_eq!(tokens.len(), 6);
}

#[test]
fn lexes_punctuation() {
  assert_eq!(types("(a: b) => c[] | d;"), vec![
    TT::ParenthesisOpen,
    TT::Identifier,
    TT::Colon,
    TT::Identifier,
    TT::ParenthesisClose,
    TT::EqualsChevronRight,
    TT::Identifier,
    TT::BracketOpen,
    TT::BracketClose,
    TT::Bar,
    TT::Identifier,
    TT::Semicolon,
  ]);
}

#[test]
fn dot_dot_dot_is_one_token() {
  assert_eq!(types("...args"), vec![TT::DotDotDot, TT::Identifier]);
}

#[test]
fn eof_loc_is_at_end_of_source() {
  let source = "let x";
  let mut lexer = Lexer::new(source);
  loop {
    let token = lex_next(&mut lexer);
    if token.typ == TT::EOF {
      assert_eq!(token.loc.0, source.len());
      break;
    };
  }
}
