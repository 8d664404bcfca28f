use super::Parser;
use crate::ast::decl::*;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek().typ != TT::EOF {
      body.push(self.stmt()?);
    }
    self.require(TT::EOF)?;
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }

  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self.with_loc(|p| {
      if p.peek().typ == TT::KeywordImport {
        return Ok(Stmt::ImportDecl(p.import_decl()?));
      };

      let export = p.consume_if(TT::KeywordExport).is_match();
      let declare = p.consume_if(TT::KeywordDeclare).is_match();

      let t = p.peek();
      match t.typ {
        TT::KeywordInterface => Ok(Stmt::InterfaceDecl(p.interface_decl(export, declare)?)),
        TT::KeywordType => Ok(Stmt::TypeAliasDecl(p.type_alias_decl(export, declare)?)),
        TT::KeywordLet | TT::KeywordVar | TT::KeywordConst => {
          Ok(Stmt::VarDecl(p.var_decl(export, declare)?))
        }
        TT::KeywordFunction => Ok(Stmt::FunctionDecl(p.function_decl(export, declare)?)),
        _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("declaration"))),
      }
    })
  }

  /// Parse interface declaration: interface Foo extends Bar, Baz { }
  fn interface_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<InterfaceDecl> {
    self.require(TT::KeywordInterface)?;
    let name = self.require_identifier()?;

    let mut extends = Vec::new();
    if self.consume_if(TT::KeywordExtends).is_match() {
      loop {
        extends.push(self.type_expr()?);
        if !self.consume_if(TT::Comma).is_match() {
          break;
        };
      }
    };

    self.require(TT::BraceOpen)?;
    let members = self.type_members()?;
    self.require(TT::BraceClose)?;

    Ok(InterfaceDecl {
      export,
      declare,
      name,
      extends,
      members,
    })
  }

  /// Parse type alias: type Foo = Bar
  fn type_alias_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<TypeAliasDecl> {
    self.require(TT::KeywordType)?;
    let name = self.require_identifier()?;
    self.require(TT::Equals)?;
    let type_expr = self.type_expr()?;
    self.consume_if(TT::Semicolon).is_match();
    Ok(TypeAliasDecl {
      export,
      declare,
      name,
      type_expr,
    })
  }

  /// Parse ambient variable declaration: declare let foo: Type
  fn var_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<VarDecl> {
    let kind = match self.consume().typ {
      TT::KeywordConst => VarDeclKind::Const,
      TT::KeywordLet => VarDeclKind::Let,
      _ => VarDeclKind::Var,
    };
    let name = self.require_identifier()?;
    let type_annotation = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    self.consume_if(TT::Semicolon).is_match();
    Ok(VarDecl {
      export,
      declare,
      kind,
      name,
      type_annotation,
    })
  }

  /// Parse ambient function declaration: declare function foo(x: T): void
  fn function_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<FunctionDecl> {
    self.require(TT::KeywordFunction)?;
    let name = self.require_identifier()?;
    self.require(TT::ParenthesisOpen)?;
    let parameters = self.function_params()?;
    let return_type = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    self.consume_if(TT::Semicolon).is_match();
    Ok(FunctionDecl {
      export,
      declare,
      name,
      parameters,
      return_type,
    })
  }

  /// Parse an import declaration. Only the bound names and module specifier are retained.
  fn import_decl(&mut self) -> SyntaxResult<ImportDecl> {
    self.require(TT::KeywordImport)?;
    let mut names = Vec::new();

    if self.peek().typ == TT::LiteralString {
      // Side-effect import: import "module";
      let module = self.lit_str_val()?;
      self.consume_if(TT::Semicolon).is_match();
      return Ok(ImportDecl { names, module });
    };

    match self.peek().typ {
      TT::BraceOpen => self.named_imports(&mut names)?,
      TT::Asterisk => self.namespace_import(&mut names)?,
      _ => {
        // Default import, optionally followed by named or namespace imports.
        names.push(self.require_identifier()?);
        if self.consume_if(TT::Comma).is_match() {
          match self.peek().typ {
            TT::BraceOpen => self.named_imports(&mut names)?,
            _ => self.namespace_import(&mut names)?,
          };
        };
      }
    };

    self.require(TT::KeywordFrom)?;
    let module = self.lit_str_val()?;
    self.consume_if(TT::Semicolon).is_match();
    Ok(ImportDecl { names, module })
  }

  fn named_imports(&mut self, names: &mut Vec<String>) -> SyntaxResult<()> {
    self.require(TT::BraceOpen)?;
    while !self.consume_if(TT::BraceClose).is_match() {
      let imported = self.require_name()?;
      // `import { a as b }` binds `b`.
      let t = self.peek();
      if t.typ == TT::Identifier && self.str(t.loc) == "as" {
        self.consume();
        names.push(self.require_name()?);
      } else {
        names.push(imported);
      };
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        break;
      };
    }
    Ok(())
  }

  fn namespace_import(&mut self, names: &mut Vec<String>) -> SyntaxResult<()> {
    self.require(TT::Asterisk)?;
    let as_token = self.consume();
    if as_token.typ != TT::Identifier || self.str(as_token.loc) != "as" {
      return Err(as_token.error(SyntaxErrorType::ExpectedSyntax("`as`")));
    };
    names.push(self.require_identifier()?);
    Ok(())
  }
}
