use crate::corpus::TypeMemoKey;
use crate::decl::IdlType;
use crate::decl::Primitive;
use crate::decl::TypeMode;
use ahash::HashMap;
use ahash::HashSet;
use parse_dts::ast::node::Node;
use parse_dts::ast::type_expr::TypeEntityName;
use parse_dts::ast::type_expr::TypeExpr;
use parse_dts::ast::type_expr::TypeLiteral;
use parse_dts::ast::type_expr::TypeReference;
use std::mem::discriminant;
use tracing::warn;

/// Converts type expressions of one unit into [`IdlType`] shapes. Never fails: unsupported or
/// malformed shapes degrade to the Any leaf with a logged warning.
///
/// Borrows the corpus-wide memo and union collector for the duration of one resolution batch.
pub(crate) struct TypeResolver<'c> {
  pub unit_id: u32,
  pub memo: &'c mut HashMap<TypeMemoKey, IdlType>,
  pub unions: &'c mut HashSet<Vec<IdlType>>,
}

fn first_type_argument(reference: &TypeReference) -> Option<&Node<TypeExpr>> {
  reference.type_arguments.as_ref()?.first()
}

impl<'c> TypeResolver<'c> {
  /// Resolves one type expression. The memo is consulted only when no mode accumulator is
  /// supplied: a mode accumulator carries write side-effects that a cache hit would silently
  /// skip, so callers requiring flags always pay the uncached cost.
  pub fn resolve(&mut self, node: &Node<TypeExpr>, mut mode: Option<&mut TypeMode>) -> IdlType {
    let key: TypeMemoKey = (self.unit_id, discriminant(&*node.stx), node.loc);
    if mode.is_none() {
      if let Some(hit) = self.memo.get(&key) {
        return hit.clone();
      };
    };

    let result = match &*node.stx {
      TypeExpr::Parenthesized(p) => self.resolve(&p.type_expr, mode.as_deref_mut()),
      TypeExpr::Array(a) => IdlType::array(self.resolve(&a.element_type, mode.as_deref_mut())),
      TypeExpr::Union(u) => self.resolve_union(&u.types, mode.as_deref_mut()),
      TypeExpr::Reference(r) => self.resolve_reference(node, r, mode.as_deref_mut()),
      _ => self.resolve_base(node, mode.as_deref_mut()),
    };

    if mode.is_none() {
      self.memo.insert(key, result.clone());
    };
    result
  }

  /// Resolves the members of a union with a single shared mode accumulator, so any branch may set
  /// flags, and registers the exact ordered member list in the union collector.
  fn resolve_union(
    &mut self,
    types: &[Node<TypeExpr>],
    mut mode: Option<&mut TypeMode>,
  ) -> IdlType {
    let members = types
      .iter()
      .map(|t| self.resolve(t, mode.as_deref_mut()))
      .collect::<Vec<_>>();
    self.unions.insert(members.clone());
    IdlType::Union(members)
  }

  fn resolve_reference(
    &mut self,
    node: &Node<TypeExpr>,
    reference: &TypeReference,
    mut mode: Option<&mut TypeMode>,
  ) -> IdlType {
    let TypeEntityName::Identifier(ident) = &reference.name else {
      warn!("non-identifier type references are not supported");
      return IdlType::Primitive(Primitive::Any);
    };

    // An async wrapper around a union resolves as a full union, not a leaf.
    if ident.contains("SupportAsync") {
      if let Some(arg) = first_type_argument(reference) {
        if let TypeExpr::Union(u) = &*arg.stx {
          if let Some(m) = mode.as_deref_mut() {
            m.support_async = true;
            if ident == "SupportAsyncManual" {
              m.support_async_manual = true;
            };
          };
          return self.resolve_union(&u.types, mode);
        };
      };
    };

    self.resolve_base(node, mode)
  }

  /// Resolves a type expression down to a single leaf. Arrays and unions are not representable
  /// here; directive wrappers recurse through this layer so only the innermost real type is
  /// ultimately resolved.
  fn resolve_base(&mut self, node: &Node<TypeExpr>, mode: Option<&mut TypeMode>) -> IdlType {
    match &*node.stx {
      TypeExpr::String => IdlType::Primitive(Primitive::DomString),
      TypeExpr::Number => IdlType::Primitive(Primitive::Double),
      TypeExpr::Boolean => IdlType::Primitive(Primitive::Boolean),
      TypeExpr::Any => IdlType::Primitive(Primitive::Any),
      TypeExpr::Object => IdlType::Primitive(Primitive::Object),
      TypeExpr::Void => IdlType::Primitive(Primitive::Void),
      TypeExpr::Null => IdlType::Primitive(Primitive::Null),
      TypeExpr::Undefined => IdlType::Primitive(Primitive::Undefined),
      TypeExpr::Unknown | TypeExpr::Never => IdlType::Primitive(Primitive::Any),

      TypeExpr::Reference(r) => self.reference_base(r, mode),

      // A function type resolves to the bare function leaf; its signature is only recovered when
      // a property is reclassified as a method.
      TypeExpr::Function(_) => IdlType::Primitive(Primitive::Function),

      // The string literal value itself becomes the leaf, for string-valued "mode" properties.
      TypeExpr::Literal(TypeLiteral::String(text)) => IdlType::Named(text.clone()),
      TypeExpr::Literal(_) => IdlType::Primitive(Primitive::Any),

      _ => {
        warn!("unsupported type expression shape, degrading to any");
        IdlType::Primitive(Primitive::Any)
      }
    }
  }

  fn reference_base(&mut self, reference: &TypeReference, mut mode: Option<&mut TypeMode>) -> IdlType {
    let TypeEntityName::Identifier(ident) = &reference.name else {
      warn!("non-identifier type references are not supported");
      return IdlType::Primitive(Primitive::Any);
    };

    match ident.as_str() {
      // Primitive wrapper names.
      "Function" => IdlType::Primitive(Primitive::Function),
      "Promise" => IdlType::Primitive(Primitive::Promise),
      "int" => IdlType::Primitive(Primitive::Int),
      "double" => IdlType::Primitive(Primitive::Double),

      // `NewObject<T>` marks the member as producing a new instance of the named type, for
      // lifetime annotation purposes. The named argument is not evaluated further.
      "NewObject" => {
        if let Some(m) = mode.as_deref_mut() {
          m.new_object = true;
        };
        if let Some(arg) = first_type_argument(reference) {
          if let TypeExpr::Reference(inner) = &*arg.stx {
            if let TypeEntityName::Identifier(name) = &inner.name {
              return IdlType::Named(name.clone());
            };
          };
        };
        IdlType::Primitive(Primitive::Any)
      }

      "DartImpl" => {
        if let Some(m) = mode.as_deref_mut() {
          m.dart_impl = true;
        };
        self.dart_impl_base(reference, mode)
      }

      "DependentsOnLayout" => {
        if let Some(m) = mode.as_deref_mut() {
          m.layout_dependent = true;
        };
        self.wrapped_base(reference, mode)
      }

      "StaticMember" => {
        if let Some(m) = mode.as_deref_mut() {
          m.static_member = true;
        };
        self.wrapped_base(reference, mode)
      }

      "StaticMethod" => {
        if let Some(m) = mode.as_deref_mut() {
          m.static_method = true;
        };
        self.wrapped_base(reference, mode)
      }

      "CustomEvent" => self.custom_event_base(reference),

      _ if ident.contains("SupportAsync") => self.support_async_base(ident, reference, mode),

      // An unrecognized name is an opaque forward reference resolved, if at all, by the emitter.
      _ => IdlType::Named(ident.clone()),
    }
  }

  fn wrapped_base(&mut self, reference: &TypeReference, mode: Option<&mut TypeMode>) -> IdlType {
    match first_type_argument(reference) {
      Some(arg) => self.resolve_base(arg, mode),
      None => IdlType::Primitive(Primitive::Any),
    }
  }

  /// `DartImpl<T>` permits a directly nested `DependentsOnLayout<…>`, whose flag is also set and
  /// which is also unwrapped.
  fn dart_impl_base(
    &mut self,
    reference: &TypeReference,
    mut mode: Option<&mut TypeMode>,
  ) -> IdlType {
    let Some(mut arg) = first_type_argument(reference) else {
      return IdlType::Primitive(Primitive::Any);
    };

    if let TypeExpr::Reference(inner) = &*arg.stx {
      if matches!(&inner.name, TypeEntityName::Identifier(n) if n == "DependentsOnLayout") {
        if let Some(m) = mode.as_deref_mut() {
          m.layout_dependent = true;
        };
        if let Some(inner_arg) = first_type_argument(inner) {
          arg = inner_arg;
        };
      };
    };

    self.resolve_base(arg, mode)
  }

  /// `SupportAsync<T>` / `SupportAsyncManual<T>` permit a directly nested `DartImpl<…>`, and an
  /// array argument marks the member as producing an array of async results.
  fn support_async_base(
    &mut self,
    ident: &str,
    reference: &TypeReference,
    mut mode: Option<&mut TypeMode>,
  ) -> IdlType {
    if let Some(m) = mode.as_deref_mut() {
      m.support_async = true;
      if ident == "SupportAsyncManual" {
        m.support_async_manual = true;
      };
    };

    let Some(mut arg) = first_type_argument(reference) else {
      return IdlType::Primitive(Primitive::Any);
    };

    if let TypeExpr::Reference(inner) = &*arg.stx {
      if matches!(&inner.name, TypeEntityName::Identifier(n) if n == "DartImpl") {
        if let Some(m) = mode.as_deref_mut() {
          m.dart_impl = true;
        };
        if let Some(inner_arg) = first_type_argument(inner) {
          arg = inner_arg;
        };
      };
    } else if let TypeExpr::Array(array) = &*arg.stx {
      if let Some(m) = mode.as_deref_mut() {
        m.support_async_array_value = true;
      };
      return self.resolve_base(&array.element_type, mode);
    };

    self.resolve_base(arg, mode)
  }

  /// `CustomEvent<T>` produces a synthetic composite reference combining the wrapper name with
  /// the resolved spelling of its argument.
  fn custom_event_base(&mut self, reference: &TypeReference) -> IdlType {
    let Some(arg) = first_type_argument(reference) else {
      return IdlType::named("CustomEvent");
    };

    let generic: String = match &*arg.stx {
      TypeExpr::Reference(inner) => match &inner.name {
        TypeEntityName::Identifier(name) => match name.as_str() {
          "int" | "double" => "number".to_string(),
          "Function" => "Function".to_string(),
          "Promise" => "Promise<any>".to_string(),
          _ => name.clone(),
        },
        TypeEntityName::Qualified(_) => {
          warn!("complex generic type in CustomEvent, using any");
          "any".to_string()
        }
      },
      TypeExpr::Literal(TypeLiteral::String(text)) => text.clone(),
      TypeExpr::Boolean => "boolean".to_string(),
      TypeExpr::String => "string".to_string(),
      TypeExpr::Number => "number".to_string(),
      TypeExpr::Any => "any".to_string(),
      TypeExpr::Void => "void".to_string(),
      TypeExpr::Null => "null".to_string(),
      TypeExpr::Undefined => "undefined".to_string(),
      _ => {
        warn!("complex generic type in CustomEvent, using any");
        "any".to_string()
      }
    };

    IdlType::Named(format!("CustomEvent<{}>", generic))
  }
}
