use crate::corpus::CachedSource;
use crate::corpus::Corpus;
use crate::decl::ArgumentBinding;
use crate::decl::ClassBinding;
use crate::decl::Entity;
use crate::decl::FunctionBinding;
use crate::decl::IdlType;
use crate::decl::IndexKeyKind;
use crate::decl::IndexedProperty;
use crate::decl::MethodBinding;
use crate::decl::Primitive;
use crate::decl::PropertyBinding;
use crate::decl::TypeAliasBinding;
use crate::decl::TypeMode;
use crate::docs;
use crate::error::AnalyzeError;
use crate::error::ExtractError;
use crate::error::ExtractResult;
use crate::resolve::TypeResolver;
use parse_dts::ast::decl::InterfaceDecl;
use parse_dts::ast::decl::Stmt;
use parse_dts::ast::decl::VarDecl;
use parse_dts::ast::node::Node;
use parse_dts::ast::type_expr::FunctionParam;
use parse_dts::ast::type_expr::TypeConstructSignature;
use parse_dts::ast::type_expr::TypeEntityName;
use parse_dts::ast::type_expr::TypeExpr;
use parse_dts::ast::type_expr::TypeIndexSignature;
use parse_dts::ast::type_expr::TypeMember;
use parse_dts::ast::type_expr::TypeMethodSignature;
use parse_dts::ast::type_expr::TypePropertyKey;
use parse_dts::ast::type_expr::TypePropertySignature;
use parse_dts::loc::Loc;
use tracing::error;
use tracing::warn;

/// Analyzes one unit: parses it (or reuses the cached tree for `path`), walks every top-level
/// declaration, and returns the unit's ordered entity list. Classes are additionally inserted
/// into the corpus-wide registry.
///
/// A failure inside one declaration drops only that declaration; a failure to ingest the unit at
/// all is returned as [`AnalyzeError`] and the caller decides whether to continue with remaining
/// units.
pub fn analyze(corpus: &mut Corpus, path: &str, raw: &str) -> Result<Vec<Entity>, AnalyzeError> {
  let src = corpus.ingest(path, raw)?;

  // The file-level documentation fallback applies only to the first interface of the unit.
  let first_interface_loc = src.top.stx.body.iter().find_map(|stmt| match &*stmt.stx {
    Stmt::InterfaceDecl(_) => Some(stmt.loc),
    _ => None,
  });

  let mut entities = Vec::new();
  for stmt in &src.top.stx.body {
    match walk_statement(corpus, &src, path, stmt, first_interface_loc) {
      Ok(Some(entity)) => entities.push(entity),
      Ok(None) => {}
      Err(err) => error!(unit = path, error = %err, "dropping declaration"),
    };
  }
  Ok(entities)
}

fn walk_statement(
  corpus: &mut Corpus,
  src: &CachedSource,
  path: &str,
  stmt: &Node<Stmt>,
  first_interface_loc: Option<Loc>,
) -> ExtractResult<Option<Entity>> {
  match &*stmt.stx {
    Stmt::InterfaceDecl(decl) => {
      let is_first = first_interface_loc == Some(stmt.loc);
      let class = extract_interface(corpus, src, path, stmt.loc, decl, is_first)?;
      corpus.register_class(class.clone());
      Ok(Some(Entity::Class(class)))
    }
    Stmt::TypeAliasDecl(decl) => Ok(Some(Entity::TypeAlias(TypeAliasBinding {
      name: decl.name.clone(),
      typ: decl.type_expr.stx.to_source(),
    }))),
    Stmt::VarDecl(decl) => Ok(extract_function_var(corpus, src, decl)),
    Stmt::FunctionDecl(_) | Stmt::ImportDecl(_) => Ok(None),
  }
}

fn resolver<'c>(corpus: &'c mut Corpus, src: &CachedSource) -> TypeResolver<'c> {
  TypeResolver {
    unit_id: src.unit_id,
    memo: &mut corpus.type_memo,
    unions: &mut corpus.union_shapes,
  }
}

fn heritage_name(node: &Node<TypeExpr>) -> Option<String> {
  match &*node.stx {
    TypeExpr::Reference(r) => match &r.name {
      TypeEntityName::Identifier(name) => Some(name.clone()),
      _ => None,
    },
    _ => None,
  }
}

fn extract_interface(
  corpus: &mut Corpus,
  src: &CachedSource,
  path: &str,
  loc: Loc,
  decl: &InterfaceDecl,
  is_first: bool,
) -> ExtractResult<ClassBinding> {
  let mut class = ClassBinding::new(&decl.name);

  class.documentation = docs::doc_for_node(&src.text, loc).or_else(|| {
    if is_first {
      docs::file_level_doc(&src.text, loc.0)
    } else {
      None
    }
  });

  // First heritage entry is the parent, remaining entries are mixins. Only plain identifier
  // heritage expressions participate.
  if let Some(first) = decl.extends.first() {
    class.parent = heritage_name(first);
  };
  class.mixins = decl.extends.iter().skip(1).filter_map(heritage_name).collect();

  for member in &decl.members {
    if let Err(err) = extract_member(corpus, src, &mut class, member) {
      error!(unit = path, error = %err, "dropping member");
    };
  }

  Ok(class)
}

fn extract_member(
  corpus: &mut Corpus,
  src: &CachedSource,
  class: &mut ClassBinding,
  member: &Node<TypeMember>,
) -> ExtractResult<()> {
  match &*member.stx {
    TypeMember::Property(p) => extract_property(corpus, src, class, member.loc, p),
    TypeMember::Method(m) => extract_method(corpus, src, class, member.loc, m),
    TypeMember::IndexSignature(i) => extract_index(corpus, src, class, i),
    TypeMember::Construct(c) => extract_construct(corpus, src, class, c),
    TypeMember::CallSignature(_) => Ok(()),
  }
}

/// Resolves a member name. Computed `[A.B]` keys bind under the name `A_B` and flag the member
/// as symbol-keyed; any other computed key is unsupported.
fn prop_name(key: &TypePropertyKey) -> ExtractResult<(String, bool)> {
  match key {
    TypePropertyKey::Identifier(name) => Ok((name.clone(), false)),
    TypePropertyKey::String(text) => Ok((text.clone(), false)),
    TypePropertyKey::Number(text) => Ok((text.clone(), false)),
    TypePropertyKey::Computed(path) => {
      if path.len() == 2 {
        Ok((format!("{}_{}", path[0], path[1]), true))
      } else {
        Err(ExtractError::UnsupportedPropertyKey {
          rendered: format!("[{}]", path.join(".")),
        })
      }
    }
  }
}

fn extract_property(
  corpus: &mut Corpus,
  src: &CachedSource,
  class: &mut ClassBinding,
  loc: Loc,
  p: &TypePropertySignature,
) -> ExtractResult<()> {
  let (name, is_symbol) = prop_name(&p.key)?;
  let documentation = docs::doc_for_node(&src.text, loc);

  let Some(annotation) = &p.type_annotation else {
    warn!(property = %name, "property has no type annotation, skipping");
    return Ok(());
  };

  let mut mode = TypeMode::default();
  let typ = resolver(corpus, src).resolve(annotation, Some(&mut mode));

  // A property whose resolved type is the function leaf and whose syntactic type is a function
  // type is really a method in property clothing.
  if typ == IdlType::Primitive(Primitive::Function) {
    if let TypeExpr::Function(f) = &*annotation.stx {
      let args = f
        .parameters
        .iter()
        .map(|param| param_to_argument(corpus, src, param))
        .collect();
      class.methods.push(MethodBinding {
        name,
        args,
        return_type: None,
        return_mode: mode,
        documentation,
        async_return_type: None,
      });
      return Ok(());
    };
  };

  let mut prop = PropertyBinding {
    name,
    typ,
    mode,
    optional: p.optional,
    readonly: p.readonly,
    is_symbol,
    documentation,
    async_type: None,
  };

  if mode.support_async {
    let twin = PropertyBinding {
      name: format!("{}_async", prop.name),
      mode: mode.cleared_async(),
      async_type: Some(IdlType::Primitive(Primitive::Promise)),
      ..prop.clone()
    };
    prop.mode = mode.cleared_async();
    class.props.push(prop);
    class.props.push(twin);
  } else {
    class.props.push(prop);
  };

  Ok(())
}

fn extract_method(
  corpus: &mut Corpus,
  src: &CachedSource,
  class: &mut ClassBinding,
  loc: Loc,
  m: &TypeMethodSignature,
) -> ExtractResult<()> {
  let (name, _) = prop_name(&m.key)?;
  let documentation = docs::doc_for_node(&src.text, loc);
  let args = m
    .parameters
    .iter()
    .map(|param| param_to_argument(corpus, src, param))
    .collect();

  let mut f = MethodBinding {
    name,
    args,
    return_type: None,
    return_mode: TypeMode::default(),
    documentation,
    async_return_type: None,
  };

  if let Some(ret) = &m.return_type {
    let mut mode = TypeMode::default();
    let mut typ = resolver(corpus, src).resolve(ret, Some(&mut mode));
    if mode.support_async_array_value {
      typ = IdlType::array(typ);
    };
    f.return_type = Some(typ);
    f.return_mode = mode;
  };

  // The twin re-resolves its parameters rather than sharing resolved state with the original.
  let twin = if f.return_mode.support_async {
    let twin_args = m
      .parameters
      .iter()
      .map(|param| param_to_argument(corpus, src, param))
      .collect();
    Some(MethodBinding {
      name: format!("{}_async", f.name),
      args: twin_args,
      return_type: f.return_type.clone(),
      return_mode: f.return_mode.cleared_async(),
      documentation: f.documentation.clone(),
      async_return_type: Some(IdlType::Primitive(Primitive::Promise)),
    })
  } else {
    None
  };
  if twin.is_some() {
    f.return_mode = f.return_mode.cleared_async();
  };

  if f.return_mode.static_method {
    class.static_methods.push(f.clone());
  };
  class.methods.push(f);
  if let Some(twin) = twin {
    class.methods.push(twin);
  };

  Ok(())
}

fn extract_index(
  corpus: &mut Corpus,
  src: &CachedSource,
  class: &mut ClassBinding,
  i: &TypeIndexSignature,
) -> ExtractResult<()> {
  let key_kind = match &*i.parameter_type.stx {
    TypeExpr::Number => IndexKeyKind::Numeric,
    _ => IndexKeyKind::Textual,
  };
  let mut mode = TypeMode::default();
  let typ = resolver(corpus, src).resolve(&i.type_annotation, Some(&mut mode));
  // At most one indexed property per class; the last one wins.
  class.indexed_prop = Some(IndexedProperty {
    key_kind,
    typ,
    mode,
    readonly: i.readonly,
  });
  Ok(())
}

fn extract_construct(
  corpus: &mut Corpus,
  src: &CachedSource,
  class: &mut ClassBinding,
  c: &TypeConstructSignature,
) -> ExtractResult<()> {
  let args = c
    .parameters
    .iter()
    .map(|param| param_to_argument(corpus, src, param))
    .collect();
  let return_type = c
    .return_type
    .as_ref()
    .map(|t| resolver(corpus, src).resolve(t, None));
  // The single constructor record; the last construct signature wins.
  class.construct = Some(MethodBinding {
    name: "constructor".to_string(),
    args,
    return_type,
    return_mode: TypeMode::default(),
    documentation: None,
    async_return_type: None,
  });
  Ok(())
}

fn param_to_argument(
  corpus: &mut Corpus,
  src: &CachedSource,
  param: &Node<FunctionParam>,
) -> ArgumentBinding {
  let param = &*param.stx;
  let Some(annotation) = &param.type_annotation else {
    warn!(parameter = %param.name, "parameter has no type annotation, defaulting to any");
    return ArgumentBinding {
      name: param.name.clone(),
      typ: IdlType::Primitive(Primitive::Any),
      mode: TypeMode::default(),
      required: false,
      variadic: false,
    };
  };
  let mut mode = TypeMode::default();
  let typ = resolver(corpus, src).resolve(annotation, Some(&mut mode));
  ArgumentBinding {
    name: param.name.clone(),
    typ,
    mode,
    required: !param.optional,
    variadic: param.rest,
  }
}

/// A variable statement is extracted only when its type annotation is a function type; anything
/// else is not a free function and is ignored.
fn extract_function_var(corpus: &mut Corpus, src: &CachedSource, decl: &VarDecl) -> Option<Entity> {
  let annotation = decl.type_annotation.as_ref()?;
  let TypeExpr::Function(f) = &*annotation.stx else {
    return None;
  };
  let args = f
    .parameters
    .iter()
    .map(|param| param_to_argument(corpus, src, param))
    .collect();
  let return_type = Some(resolver(corpus, src).resolve(&f.return_type, None));
  Some(Entity::Function(FunctionBinding {
    decl: MethodBinding {
      name: decl.name.clone(),
      args,
      return_type,
      return_mode: TypeMode::default(),
      documentation: None,
      async_return_type: None,
    },
  }))
}
