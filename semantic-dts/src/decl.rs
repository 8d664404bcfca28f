use serde::Serialize;

/// Fixed primitive leaf kinds of the type algebra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
  DomString,
  Double,
  Int,
  Boolean,
  Any,
  Object,
  Void,
  Null,
  Undefined,
  Function,
  Promise,
}

/// A resolved type shape.
///
/// Leaves are either a fixed [`Primitive`] kind or an arbitrary name: an opaque reference to a
/// type declared elsewhere (resolved, if at all, by the downstream emitter), a verbatim
/// string-literal value, or a synthesized `CustomEvent<…>` composite.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum IdlType {
  Primitive(Primitive),
  Named(String),
  Array(Box<IdlType>),
  Union(Vec<IdlType>),
}

impl IdlType {
  pub fn named(name: impl Into<String>) -> IdlType {
    IdlType::Named(name.into())
  }

  pub fn array(element: IdlType) -> IdlType {
    IdlType::Array(Box::new(element))
  }

  pub fn is_union(&self) -> bool {
    matches!(self, IdlType::Union(_))
  }
}

/// Flags produced by one type-resolution pass. Directive wrappers set these; they describe
/// codegen intent, not runtime structure.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
pub struct TypeMode {
  pub new_object: bool,
  pub dart_impl: bool,
  pub layout_dependent: bool,
  pub static_member: bool,
  pub static_method: bool,
  pub support_async: bool,
  pub support_async_manual: bool,
  pub support_async_array_value: bool,
}

impl TypeMode {
  /// Snapshot of these flags with async support cleared, for async twin synthesis. The original
  /// member and its twin never both declare async support.
  pub(crate) fn cleared_async(mut self) -> TypeMode {
    self.support_async = false;
    self.support_async_manual = false;
    self
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyBinding {
  pub name: String,
  pub typ: IdlType,
  pub mode: TypeMode,
  pub optional: bool,
  pub readonly: bool,
  // Set for computed `[A.B]` keys, which bind under the name `A_B`.
  pub is_symbol: bool,
  pub documentation: Option<String>,
  /// Present only on a synthesized async twin.
  pub async_type: Option<IdlType>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArgumentBinding {
  pub name: String,
  pub typ: IdlType,
  pub mode: TypeMode,
  pub required: bool,
  pub variadic: bool,
}

/// A method, constructor, or free-function record.
#[derive(Clone, Debug, Serialize)]
pub struct MethodBinding {
  pub name: String,
  pub args: Vec<ArgumentBinding>,
  pub return_type: Option<IdlType>,
  pub return_mode: TypeMode,
  pub documentation: Option<String>,
  /// Present only on a synthesized async twin.
  pub async_return_type: Option<IdlType>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKeyKind {
  Numeric,
  Textual,
}

/// Indexed property declaration: `[key: string]: T`.
#[derive(Clone, Debug, Serialize)]
pub struct IndexedProperty {
  pub key_kind: IndexKeyKind,
  pub typ: IdlType,
  pub mode: TypeMode,
  pub readonly: bool,
}

/// Kind tag for extracted classes. Only `Interface` classes are registered in the corpus-wide
/// class registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
  Interface,
  Dictionary,
  Mixin,
}

/// A class extracted from one interface declaration.
#[derive(Clone, Debug, Serialize)]
pub struct ClassBinding {
  pub name: String,
  pub kind: ClassKind,
  pub parent: Option<String>,
  pub mixins: Vec<String>,
  pub documentation: Option<String>,
  pub props: Vec<PropertyBinding>,
  pub methods: Vec<MethodBinding>,
  /// Subset of `methods` whose return mode carries the static-method directive. Not a partition:
  /// every static method also stays in `methods`.
  pub static_methods: Vec<MethodBinding>,
  pub construct: Option<MethodBinding>,
  pub indexed_prop: Option<IndexedProperty>,
}

impl ClassBinding {
  pub fn new(name: impl Into<String>) -> ClassBinding {
    ClassBinding {
      name: name.into(),
      kind: ClassKind::Interface,
      parent: None,
      mixins: Vec::new(),
      documentation: None,
      props: Vec::new(),
      methods: Vec::new(),
      static_methods: Vec::new(),
      construct: None,
      indexed_prop: None,
    }
  }
}

/// A free function extracted from a function-typed variable declaration.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionBinding {
  pub decl: MethodBinding,
}

/// A type alias. The right-hand type is kept as an opaque textual rendering and is never
/// decomposed into the type algebra.
#[derive(Clone, Debug, Serialize)]
pub struct TypeAliasBinding {
  pub name: String,
  pub typ: String,
}

/// One top-level entity of a unit's result list.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Entity {
  Class(ClassBinding),
  Function(FunctionBinding),
  TypeAlias(TypeAliasBinding),
}
