use super::node::Node;
use super::type_expr::FunctionParam;
use super::type_expr::TypeExpr;
use super::type_expr::TypeMember;
use serde::Serialize;

/// A whole declaration unit.
#[derive(Debug, Serialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  InterfaceDecl(InterfaceDecl),
  TypeAliasDecl(TypeAliasDecl),
  VarDecl(VarDecl),
  FunctionDecl(FunctionDecl),
  ImportDecl(ImportDecl),
}

/// Interface declaration: interface Foo extends Bar, Baz { }
#[derive(Debug, Serialize)]
pub struct InterfaceDecl {
  pub export: bool,
  pub declare: bool,
  pub name: String,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Type alias declaration: type Foo = Bar
#[derive(Debug, Serialize)]
pub struct TypeAliasDecl {
  pub export: bool,
  pub declare: bool,
  pub name: String,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum VarDeclKind {
  Const,
  Let,
  Var,
}

/// Ambient variable declaration: declare let foo: Type
#[derive(Debug, Serialize)]
pub struct VarDecl {
  pub export: bool,
  pub declare: bool,
  pub kind: VarDeclKind,
  pub name: String,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Ambient function declaration: declare function foo(x: T): void
#[derive(Debug, Serialize)]
pub struct FunctionDecl {
  pub export: bool,
  pub declare: bool,
  pub name: String,
  pub parameters: Vec<Node<FunctionParam>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Import declaration. Declaration units only import types, so the bound names are retained
/// verbatim and nothing is resolved.
#[derive(Debug, Serialize)]
pub struct ImportDecl {
  pub names: Vec<String>,
  pub module: String,
}
