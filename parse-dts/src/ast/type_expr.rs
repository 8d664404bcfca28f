use super::node::Node;
use serde::Serialize;

/// Type expression enum covering the declaration-file subset of TypeScript type constructs.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  // Primitive types
  Any,
  Unknown,
  Never,
  Void,
  String,
  Number,
  Boolean,
  Object,
  Null,
  Undefined,

  // Reference and complex types
  Reference(TypeReference),
  Literal(TypeLiteral),
  Array(TypeArray),
  Tuple(TypeTuple),
  Union(TypeUnion),
  Intersection(TypeIntersection),
  Function(TypeFunction),
  ObjectLiteral(TypeObjectLiteral),
  Parenthesized(TypeParenthesized),
}

/// Type reference: Foo, Foo<T>, A.B.C
#[derive(Debug, Serialize)]
pub struct TypeReference {
  pub name: TypeEntityName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

/// Entity name in a type reference.
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypeEntityName {
  Identifier(String),
  // A.B.C, stored as its segments in source order.
  Qualified(Vec<String>),
}

/// Literal type: "foo", 42, true
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypeLiteral {
  String(String),
  Number(String),
  Boolean(bool),
}

/// Array type: T[]
#[derive(Debug, Serialize)]
pub struct TypeArray {
  pub element_type: Box<Node<TypeExpr>>,
}

/// Tuple type: [T, U]
#[derive(Debug, Serialize)]
pub struct TypeTuple {
  pub elements: Vec<Node<TypeExpr>>,
}

/// Union type: T | U | V
#[derive(Debug, Serialize)]
pub struct TypeUnion {
  pub types: Vec<Node<TypeExpr>>,
}

/// Intersection type: T & U & V
#[derive(Debug, Serialize)]
pub struct TypeIntersection {
  pub types: Vec<Node<TypeExpr>>,
}

/// Function type: (x: T, y: U) => R
#[derive(Debug, Serialize)]
pub struct TypeFunction {
  pub parameters: Vec<Node<FunctionParam>>,
  pub return_type: Box<Node<TypeExpr>>,
}

/// Function type parameter.
#[derive(Debug, Serialize)]
pub struct FunctionParam {
  pub name: String,
  pub optional: bool,
  pub rest: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Object type literal: { x: T; y: U; }
#[derive(Debug, Serialize)]
pub struct TypeObjectLiteral {
  pub members: Vec<Node<TypeMember>>,
}

/// Parenthesized type: (T)
#[derive(Debug, Serialize)]
pub struct TypeParenthesized {
  pub type_expr: Box<Node<TypeExpr>>,
}

/// Type member in an object type or interface body.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeMember {
  Property(TypePropertySignature),
  Method(TypeMethodSignature),
  Construct(TypeConstructSignature),
  CallSignature(TypeCallSignature),
  IndexSignature(TypeIndexSignature),
}

/// Property signature: readonly x?: T
#[derive(Debug, Serialize)]
pub struct TypePropertySignature {
  pub readonly: bool,
  pub optional: bool,
  pub key: TypePropertyKey,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Method signature: foo(x: T): U
#[derive(Debug, Serialize)]
pub struct TypeMethodSignature {
  pub optional: bool,
  pub key: TypePropertyKey,
  pub parameters: Vec<Node<FunctionParam>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Construct signature: new (x: T): U
#[derive(Debug, Serialize)]
pub struct TypeConstructSignature {
  pub parameters: Vec<Node<FunctionParam>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Call signature: (x: T): U
#[derive(Debug, Serialize)]
pub struct TypeCallSignature {
  pub parameters: Vec<Node<FunctionParam>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Index signature: [key: string]: T
#[derive(Debug, Serialize)]
pub struct TypeIndexSignature {
  pub readonly: bool,
  pub parameter_name: String,
  pub parameter_type: Node<TypeExpr>,
  pub type_annotation: Node<TypeExpr>,
}

/// Property key in type members.
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypePropertyKey {
  Identifier(String),
  String(String),
  Number(String),
  // [A.B], stored as the dotted path's segments.
  Computed(Vec<String>),
}
