use semantic_dts::analyze;
use semantic_dts::Corpus;
use semantic_dts::Entity;
use semantic_dts::IdlType;
use semantic_dts::Primitive;
use semantic_dts::PropertyBinding;

// Resolves `source` as the type of a single property and returns the property record, which
// carries both the resolved type and the mode flags of the resolution pass.
fn resolve_prop(source: &str) -> PropertyBinding {
  let mut corpus = Corpus::new();
  let entities = analyze(
    &mut corpus,
    "types.d.ts",
    &format!("interface T {{ p: {}; }}", source),
  )
  .unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  class.props[0].clone()
}

fn resolve_type(source: &str) -> IdlType {
  resolve_prop(source).typ
}

#[test]
fn primitive_keywords_resolve_to_fixed_leaves() {
  for (source, expected) in [
    ("string", Primitive::DomString),
    ("number", Primitive::Double),
    ("boolean", Primitive::Boolean),
    ("any", Primitive::Any),
    ("object", Primitive::Object),
    ("void", Primitive::Void),
    ("null", Primitive::Null),
    ("undefined", Primitive::Undefined),
  ] {
    assert_eq!(resolve_type(source), IdlType::Primitive(expected), "source: {}", source);
  }
}

#[test]
fn primitive_keywords_resolve_identically_without_a_mode() {
  // Construct-signature return types resolve without a mode accumulator (the cached path).
  let mut corpus = Corpus::new();
  let entities = analyze(
    &mut corpus,
    "ctor.d.ts",
    "interface T { new(): string; }",
  )
  .unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  assert_eq!(
    class.construct.as_ref().unwrap().return_type,
    Some(IdlType::Primitive(Primitive::DomString))
  );
}

#[test]
fn primitive_wrapper_names_resolve_to_leaves() {
  assert_eq!(resolve_type("Function"), IdlType::Primitive(Primitive::Function));
  assert_eq!(resolve_type("Promise"), IdlType::Primitive(Primitive::Promise));
  assert_eq!(resolve_type("int"), IdlType::Primitive(Primitive::Int));
  assert_eq!(resolve_type("double"), IdlType::Primitive(Primitive::Double));
}

#[test]
fn arrays_nest_to_arbitrary_depth() {
  assert_eq!(
    resolve_type("string[][]"),
    IdlType::array(IdlType::array(IdlType::Primitive(Primitive::DomString)))
  );
}

#[test]
fn parenthesized_types_resolve_transparently() {
  assert_eq!(
    resolve_type("(string | null)[]"),
    IdlType::array(IdlType::Union(vec![
      IdlType::Primitive(Primitive::DomString),
      IdlType::Primitive(Primitive::Null),
    ]))
  );
}

#[test]
fn unions_preserve_source_order_and_register_their_shape() {
  let mut corpus = Corpus::new();
  let entities = analyze(
    &mut corpus,
    "unions.d.ts",
    "interface T { p: Widget | string | null; }",
  )
  .unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  let members = vec![
    IdlType::named("Widget"),
    IdlType::Primitive(Primitive::DomString),
    IdlType::Primitive(Primitive::Null),
  ];
  assert_eq!(class.props[0].typ, IdlType::Union(members.clone()));
  assert!(corpus.union_shapes.contains(&members));
  assert_eq!(corpus.union_shapes.len(), 1);
}

#[test]
fn unrecognized_names_become_opaque_references() {
  assert_eq!(resolve_type("Widget"), IdlType::named("Widget"));
}

#[test]
fn string_literal_types_keep_their_exact_text() {
  assert_eq!(resolve_type("\"line-through\""), IdlType::named("line-through"));
}

#[test]
fn directive_flags_propagate_through_union_branches() {
  let prop = resolve_prop("DartImpl<string> | null");
  assert!(prop.mode.dart_impl);
  assert_eq!(
    prop.typ,
    IdlType::Union(vec![
      IdlType::Primitive(Primitive::DomString),
      IdlType::Primitive(Primitive::Null),
    ])
  );
}

#[test]
fn dart_impl_unwraps_nested_layout_directive() {
  let prop = resolve_prop("DartImpl<DependentsOnLayout<double>>");
  assert!(prop.mode.dart_impl);
  assert!(prop.mode.layout_dependent);
  assert_eq!(prop.typ, IdlType::Primitive(Primitive::Double));
}

#[test]
fn static_member_directive_sets_flag_and_unwraps() {
  let prop = resolve_prop("StaticMember<string>");
  assert!(prop.mode.static_member);
  assert_eq!(prop.typ, IdlType::Primitive(Primitive::DomString));
}

#[test]
fn support_async_manual_yields_twin_with_cleared_flags() {
  let mut corpus = Corpus::new();
  let entities = analyze(
    &mut corpus,
    "manual.d.ts",
    "interface T { p: SupportAsyncManual<string>; }",
  )
  .unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  // Both entries exist and neither still declares async support.
  assert_eq!(class.props.len(), 2);
  assert!(!class.props[0].mode.support_async);
  assert!(!class.props[0].mode.support_async_manual);
  assert!(!class.props[1].mode.support_async);
  assert!(!class.props[1].mode.support_async_manual);
}

#[test]
fn support_async_union_argument_resolves_as_union() {
  let mut corpus = Corpus::new();
  let entities = analyze(
    &mut corpus,
    "async_union.d.ts",
    "interface T { p: SupportAsync<string | Widget>; }",
  )
  .unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  let members = vec![
    IdlType::Primitive(Primitive::DomString),
    IdlType::named("Widget"),
  ];
  // The async twin follows the original; the original keeps the union shape.
  assert_eq!(class.props.len(), 2);
  assert_eq!(class.props[0].typ, IdlType::Union(members.clone()));
  assert!(corpus.union_shapes.contains(&members));
}

#[test]
fn new_object_with_complex_argument_degrades_to_any() {
  let prop = resolve_prop("NewObject<string>");
  assert!(prop.mode.new_object);
  assert_eq!(prop.typ, IdlType::Primitive(Primitive::Any));
}

#[test]
fn custom_event_composes_known_spellings() {
  for (source, expected) in [
    ("CustomEvent<int>", "CustomEvent<number>"),
    ("CustomEvent<double>", "CustomEvent<number>"),
    ("CustomEvent<string>", "CustomEvent<string>"),
    ("CustomEvent<boolean>", "CustomEvent<boolean>"),
    ("CustomEvent<\"detail\">", "CustomEvent<detail>"),
    ("CustomEvent<ErrorDetail>", "CustomEvent<ErrorDetail>"),
    ("CustomEvent<Promise>", "CustomEvent<Promise<any>>"),
  ] {
    assert_eq!(resolve_type(source), IdlType::named(expected), "source: {}", source);
  }
}

#[test]
fn custom_event_with_complex_argument_degrades_to_any_spelling() {
  assert_eq!(
    resolve_type("CustomEvent<string[]>"),
    IdlType::named("CustomEvent<any>")
  );
}

#[test]
fn unsupported_shapes_degrade_to_any() {
  assert_eq!(resolve_type("A & B"), IdlType::Primitive(Primitive::Any));
  assert_eq!(resolve_type("[string, number]"), IdlType::Primitive(Primitive::Any));
  assert_eq!(resolve_type("unknown"), IdlType::Primitive(Primitive::Any));
}
