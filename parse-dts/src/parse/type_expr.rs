use super::Parser;
use crate::ast::node::Node;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Main entry point for parsing type expressions.
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.type_union_or_intersection()
  }

  /// Parse union or intersection types (lowest precedence). Mixing `|` and `&` at the same level
  /// without parentheses is not allowed.
  fn type_union_or_intersection(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    // Tolerate a leading `|`, as in `type T = | A | B`.
    let leading_bar = self.consume_if(TT::Bar).is_match();
    let first = self.type_array_or_postfix()?;

    let t = self.peek().typ;
    let op = if t == TT::Bar || t == TT::Ampersand {
      t
    } else if leading_bar {
      TT::Bar
    } else {
      return Ok(first);
    };

    let mut types = vec![first];
    while self.consume_if(op).is_match() {
      types.push(self.type_array_or_postfix()?);
    }

    if types.len() == 1 {
      return Ok(types.into_iter().next().unwrap());
    };

    let loc = Loc(types[0].loc.0, types.last().unwrap().loc.1);
    Ok(Node::new(loc, if op == TT::Bar {
      TypeExpr::Union(TypeUnion { types })
    } else {
      TypeExpr::Intersection(TypeIntersection { types })
    }))
  }

  /// Parse array types: T[], T[][], ...
  fn type_array_or_postfix(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let mut base = self.type_primary()?;
    while self.consume_if(TT::BracketOpen).is_match() {
      self.require(TT::BracketClose)?;
      let loc = Loc(base.loc.0, self.prev_end());
      base = Node::new(loc, TypeExpr::Array(TypeArray {
        element_type: Box::new(base),
      }));
    }
    Ok(base)
  }

  /// Parse primary type expressions.
  fn type_primary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    match t.typ {
      TT::KeywordAny => self.keyword_type(TypeExpr::Any),
      TT::KeywordUnknown => self.keyword_type(TypeExpr::Unknown),
      TT::KeywordNever => self.keyword_type(TypeExpr::Never),
      TT::KeywordVoid => self.keyword_type(TypeExpr::Void),
      TT::KeywordStringType => self.keyword_type(TypeExpr::String),
      TT::KeywordNumberType => self.keyword_type(TypeExpr::Number),
      TT::KeywordBooleanType => self.keyword_type(TypeExpr::Boolean),
      TT::KeywordObjectType => self.keyword_type(TypeExpr::Object),
      TT::KeywordUndefinedType => self.keyword_type(TypeExpr::Undefined),
      TT::LiteralNull => self.keyword_type(TypeExpr::Null),

      TT::Identifier => self.type_reference(),

      TT::LiteralString => self.with_loc(|p| {
        let val = p.lit_str_val()?;
        Ok(TypeExpr::Literal(TypeLiteral::String(val)))
      }),
      TT::LiteralNumber => self.with_loc(|p| {
        let val = p.consume_as_string();
        Ok(TypeExpr::Literal(TypeLiteral::Number(val)))
      }),
      TT::LiteralTrue => self.keyword_type(TypeExpr::Literal(TypeLiteral::Boolean(true))),
      TT::LiteralFalse => self.keyword_type(TypeExpr::Literal(TypeLiteral::Boolean(false))),

      TT::BraceOpen => self.object_type(),
      TT::BracketOpen => self.tuple_type(),
      TT::ParenthesisOpen => self.paren_or_function_type(),

      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("type expression"))),
    }
  }

  fn keyword_type(&mut self, stx: TypeExpr) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      p.consume();
      Ok(stx)
    })
  }

  /// Parse type reference with optional generic arguments: Foo, A.B.C, Foo<T, U>
  fn type_reference(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      let first = p.require_identifier()?;
      let name = if p.peek().typ == TT::Dot {
        let mut segments = vec![first];
        while p.consume_if(TT::Dot).is_match() {
          segments.push(p.require_identifier()?);
        }
        TypeEntityName::Qualified(segments)
      } else {
        TypeEntityName::Identifier(first)
      };

      // In type position `<` is unambiguous, and `>` is never lexed as part of a compound token,
      // so nested type arguments close naturally.
      let type_arguments = if p.consume_if(TT::ChevronLeft).is_match() {
        let mut args = vec![p.type_expr()?];
        while p.consume_if(TT::Comma).is_match() {
          args.push(p.type_expr()?);
        }
        p.require(TT::ChevronRight)?;
        Some(args)
      } else {
        None
      };

      Ok(TypeExpr::Reference(TypeReference {
        name,
        type_arguments,
      }))
    })
  }

  /// Parse object type literal: { x: T; y(): U; }
  fn object_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.type_members()?;
      p.require(TT::BraceClose)?;
      Ok(TypeExpr::ObjectLiteral(TypeObjectLiteral { members }))
    })
  }

  /// Parse tuple type: [T, U]
  fn tuple_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      while p.peek().typ != TT::BracketClose {
        elements.push(p.type_expr()?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(TypeExpr::Tuple(TypeTuple { elements }))
    })
  }

  /// Parse `(T)` or `(x: T) => U`. A parenthesized type is attempted first; if the closing
  /// parenthesis is followed by `=>`, rewind and reparse as a function type.
  fn paren_or_function_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let (_, t2) = self.peek_2();
    if t2.typ != TT::ParenthesisClose && t2.typ != TT::DotDotDot {
      let cp = self.checkpoint();
      let as_paren = self.with_loc(|p| {
        p.require(TT::ParenthesisOpen)?;
        let type_expr = p.type_expr()?;
        p.require(TT::ParenthesisClose)?;
        Ok(TypeExpr::Parenthesized(TypeParenthesized {
          type_expr: Box::new(type_expr),
        }))
      });
      match as_paren {
        Ok(node) if self.peek().typ != TT::EqualsChevronRight => return Ok(node),
        _ => self.restore_checkpoint(cp),
      };
    };
    self.function_type()
  }

  /// Parse function type: (x: T, y?: U, ...rest: V[]) => R
  fn function_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      p.require(TT::ParenthesisOpen)?;
      let parameters = p.function_params()?;
      p.require(TT::EqualsChevronRight)?;
      let return_type = p.type_expr()?;
      Ok(TypeExpr::Function(TypeFunction {
        parameters,
        return_type: Box::new(return_type),
      }))
    })
  }

  /// Parse a parameter list up to and including the closing parenthesis.
  pub fn function_params(&mut self) -> SyntaxResult<Vec<Node<FunctionParam>>> {
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let name = p.require_name()?;
      let optional = p.consume_if(TT::Question).is_match();
      let type_annotation = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      Ok(FunctionParam {
        name,
        optional,
        rest,
        type_annotation,
      })
    })
  }

  /// Parse interface or object-literal members up to (but excluding) the closing brace.
  pub fn type_members(&mut self) -> SyntaxResult<Vec<Node<TypeMember>>> {
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      members.push(self.type_member()?);
      // Members may be separated by `;`, `,`, or nothing.
      loop {
        if !self.consume_if(TT::Semicolon).is_match() && !self.consume_if(TT::Comma).is_match() {
          break;
        };
      }
    }
    Ok(members)
  }

  fn type_member(&mut self) -> SyntaxResult<Node<TypeMember>> {
    self.with_loc(|p| {
      let (t1, t2) = p.peek_2();

      // `new (...)` is a construct signature; `new: T` and `new(): T` are members named `new`.
      if t1.typ == TT::KeywordNew && t2.typ == TT::ParenthesisOpen {
        p.consume();
        p.require(TT::ParenthesisOpen)?;
        let parameters = p.function_params()?;
        let return_type = p.member_return_type()?;
        return Ok(TypeMember::Construct(TypeConstructSignature {
          parameters,
          return_type,
        }));
      };

      if t1.typ == TT::ParenthesisOpen {
        p.require(TT::ParenthesisOpen)?;
        let parameters = p.function_params()?;
        let return_type = p.member_return_type()?;
        return Ok(TypeMember::CallSignature(TypeCallSignature {
          parameters,
          return_type,
        }));
      };

      // `readonly` is also a valid member name; it is only a modifier when it does not appear in
      // name position.
      let readonly = t1.typ == TT::KeywordReadonly
        && !matches!(
          t2.typ,
          TT::Colon | TT::Question | TT::ParenthesisOpen | TT::Comma | TT::Semicolon | TT::BraceClose
        );
      if readonly {
        p.consume();
      };

      // `[key: string]: T` is an index signature; `[A.B]: T` is a computed property key.
      if p.peek().typ == TT::BracketOpen {
        let (_, t2, t3) = p.peek_3();
        if p.is_name(&t2) && t3.typ == TT::Colon {
          p.require(TT::BracketOpen)?;
          let parameter_name = p.require_name()?;
          p.require(TT::Colon)?;
          let parameter_type = p.type_expr()?;
          p.require(TT::BracketClose)?;
          p.require(TT::Colon)?;
          let type_annotation = p.type_expr()?;
          return Ok(TypeMember::IndexSignature(TypeIndexSignature {
            readonly,
            parameter_name,
            parameter_type,
            type_annotation,
          }));
        };
      };

      let key = p.property_key()?;
      let optional = p.consume_if(TT::Question).is_match();

      if p.consume_if(TT::ParenthesisOpen).is_match() {
        let parameters = p.function_params()?;
        let return_type = p.member_return_type()?;
        return Ok(TypeMember::Method(TypeMethodSignature {
          optional,
          key,
          parameters,
          return_type,
        }));
      };

      let type_annotation = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      Ok(TypeMember::Property(TypePropertySignature {
        readonly,
        optional,
        key,
        type_annotation,
      }))
    })
  }

  fn member_return_type(&mut self) -> SyntaxResult<Option<Node<TypeExpr>>> {
    Ok(if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    })
  }

  fn property_key(&mut self) -> SyntaxResult<TypePropertyKey> {
    match self.peek().typ {
      TT::LiteralString => Ok(TypePropertyKey::String(self.lit_str_val()?)),
      TT::LiteralNumber => Ok(TypePropertyKey::Number(self.consume_as_string())),
      TT::BracketOpen => {
        self.require(TT::BracketOpen)?;
        let mut path = vec![self.require_name()?];
        while self.consume_if(TT::Dot).is_match() {
          path.push(self.require_name()?);
        }
        self.require(TT::BracketClose)?;
        Ok(TypePropertyKey::Computed(path))
      }
      _ => Ok(TypePropertyKey::Identifier(self.require_name()?)),
    }
  }
}
