use semantic_dts::analyze;
use semantic_dts::ClassBinding;
use semantic_dts::Corpus;
use semantic_dts::Entity;
use semantic_dts::IdlType;
use semantic_dts::IndexKeyKind;
use semantic_dts::Primitive;

fn analyze_one(source: &str) -> (Corpus, Vec<Entity>) {
  let mut corpus = Corpus::new();
  let entities = analyze(&mut corpus, "unit.d.ts", source).unwrap();
  (corpus, entities)
}

fn single_class(entities: &[Entity]) -> &ClassBinding {
  match &entities[0] {
    Entity::Class(class) => class,
    other => panic!("expected class entity, got {:?}", other),
  }
}

#[test]
fn end_to_end_interface_with_async_property_and_method() {
  let (_, entities) = analyze_one(
    "interface Foo extends Bar {
      value: SupportAsync<string>;
      load(id: number): Promise;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(class.name, "Foo");
  assert_eq!(class.parent.as_deref(), Some("Bar"));
  assert!(class.mixins.is_empty());

  assert_eq!(class.props.len(), 2);
  let value = &class.props[0];
  assert_eq!(value.name, "value");
  assert_eq!(value.typ, IdlType::Primitive(Primitive::DomString));
  assert!(!value.mode.support_async);
  assert!(value.async_type.is_none());
  let twin = &class.props[1];
  assert_eq!(twin.name, "value_async");
  assert_eq!(twin.async_type, Some(IdlType::Primitive(Primitive::Promise)));
  assert!(!twin.mode.support_async);

  assert_eq!(class.methods.len(), 1);
  let load = &class.methods[0];
  assert_eq!(load.name, "load");
  assert_eq!(load.args.len(), 1);
  assert_eq!(load.args[0].name, "id");
  assert_eq!(load.args[0].typ, IdlType::Primitive(Primitive::Double));
  assert!(load.args[0].required);
  assert_eq!(load.return_type, Some(IdlType::Primitive(Primitive::Promise)));
}

#[test]
fn async_method_yields_twin_with_cleared_flags() {
  let (_, entities) = analyze_one(
    "interface Loader {
      fetch(url: string): SupportAsync<Blob>;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(class.methods.len(), 2);

  let original = &class.methods[0];
  assert_eq!(original.name, "fetch");
  assert_eq!(original.return_type, Some(IdlType::named("Blob")));
  assert!(!original.return_mode.support_async);
  assert!(original.async_return_type.is_none());

  let twin = &class.methods[1];
  assert_eq!(twin.name, "fetch_async");
  assert_eq!(twin.args.len(), 1);
  assert_eq!(twin.args[0].typ, IdlType::Primitive(Primitive::DomString));
  assert_eq!(twin.return_type, Some(IdlType::named("Blob")));
  assert_eq!(twin.async_return_type, Some(IdlType::Primitive(Primitive::Promise)));
  assert!(!twin.return_mode.support_async);
}

#[test]
fn async_array_return_is_wrapped() {
  let (_, entities) = analyze_one(
    "interface Store {
      keys(): SupportAsync<string[]>;
    }",
  );
  let class = single_class(&entities);
  let keys = &class.methods[0];
  assert_eq!(
    keys.return_type,
    Some(IdlType::array(IdlType::Primitive(Primitive::DomString)))
  );
  assert!(keys.return_mode.support_async_array_value);
  // An async twin is synthesized as well.
  assert_eq!(class.methods.len(), 2);
  assert_eq!(class.methods[1].name, "keys_async");
}

#[test]
fn static_method_appears_in_both_lists() {
  let (_, entities) = analyze_one(
    "interface ImageFactory {
      create(width: int, height: int): StaticMethod<ImageData>;
      resize(width: int): ImageData;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(class.methods.len(), 2);
  assert_eq!(class.static_methods.len(), 1);
  assert_eq!(class.static_methods[0].name, "create");
  assert!(class.static_methods[0].return_mode.static_method);
  assert_eq!(class.methods[0].name, "create");
  assert!(class.methods[0].return_mode.static_method);
}

#[test]
fn function_typed_property_is_reclassified_as_method() {
  let (_, entities) = analyze_one(
    "interface Button {
      onclick: (event: Event) => void;
      label: string;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(class.props.len(), 1);
  assert_eq!(class.props[0].name, "label");
  assert_eq!(class.methods.len(), 1);
  let onclick = &class.methods[0];
  assert_eq!(onclick.name, "onclick");
  assert_eq!(onclick.args.len(), 1);
  assert_eq!(onclick.args[0].name, "event");
  assert_eq!(onclick.args[0].typ, IdlType::named("Event"));
  assert!(onclick.return_type.is_none());
}

#[test]
fn function_reference_property_stays_a_property() {
  let (_, entities) = analyze_one("interface Button { onclick: Function; }");
  let class = single_class(&entities);
  assert!(class.methods.is_empty());
  assert_eq!(class.props.len(), 1);
  assert_eq!(class.props[0].typ, IdlType::Primitive(Primitive::Function));
}

#[test]
fn index_signature_records_key_kind_and_last_one_wins() {
  let (_, entities) = analyze_one(
    "interface Bag {
      [index: number]: string;
      readonly [key: string]: Widget;
    }",
  );
  let class = single_class(&entities);
  let indexed = class.indexed_prop.as_ref().unwrap();
  assert_eq!(indexed.key_kind, IndexKeyKind::Textual);
  assert!(indexed.readonly);
  assert_eq!(indexed.typ, IdlType::named("Widget"));
}

#[test]
fn construct_signature_becomes_the_constructor_and_last_one_wins() {
  let (_, entities) = analyze_one(
    "interface Event {
      new(): void;
      new(type: string): void;
    }",
  );
  let class = single_class(&entities);
  let construct = class.construct.as_ref().unwrap();
  assert_eq!(construct.name, "constructor");
  assert_eq!(construct.args.len(), 1);
  assert_eq!(construct.args[0].name, "type");
}

#[test]
fn heritage_entries_split_into_parent_and_mixins() {
  let (_, entities) = analyze_one(
    "interface HTMLBodyElement extends HTMLElement, WindowEventHandlers, GlobalEventHandlers {}",
  );
  let class = single_class(&entities);
  assert_eq!(class.parent.as_deref(), Some("HTMLElement"));
  assert_eq!(class.mixins, vec!["WindowEventHandlers", "GlobalEventHandlers"]);
}

#[test]
fn optional_and_readonly_flags_are_recorded() {
  let (_, entities) = analyze_one(
    "interface Style { readonly length: int; cssText?: string; }",
  );
  let class = single_class(&entities);
  assert!(class.props[0].readonly);
  assert!(!class.props[0].optional);
  assert!(class.props[1].optional);
  assert!(!class.props[1].readonly);
}

#[test]
fn symbol_keyed_member_binds_under_joined_name() {
  let (_, entities) = analyze_one("interface Seq { [Symbol.iterator]: Function; }");
  let class = single_class(&entities);
  assert_eq!(class.props[0].name, "Symbol_iterator");
  assert!(class.props[0].is_symbol);
}

#[test]
fn unsupported_member_is_dropped_and_siblings_survive() {
  let (_, entities) = analyze_one(
    "interface Odd {
      [A.B.C]: string;
      kept: string;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(class.props.len(), 1);
  assert_eq!(class.props[0].name, "kept");
}

#[test]
fn property_without_annotation_is_skipped() {
  let (_, entities) = analyze_one("interface Loose { untyped; typed: string; }");
  let class = single_class(&entities);
  assert_eq!(class.props.len(), 1);
  assert_eq!(class.props[0].name, "typed");
}

#[test]
fn type_alias_is_kept_as_opaque_text() {
  let (_, entities) = analyze_one("type EventHandler = (event: Event) => void;");
  let Entity::TypeAlias(alias) = &entities[0] else {
    panic!("expected type alias");
  };
  assert_eq!(alias.name, "EventHandler");
  assert_eq!(alias.typ, "(event: Event) => void");
}

#[test]
fn function_typed_variable_becomes_a_free_function() {
  let (_, entities) = analyze_one(
    "declare let setTimeout: (handler: Function, timeout: int) => double;
     declare let version: string;",
  );
  assert_eq!(entities.len(), 1);
  let Entity::Function(function) = &entities[0] else {
    panic!("expected function entity");
  };
  assert_eq!(function.decl.name, "setTimeout");
  assert_eq!(function.decl.args.len(), 2);
  assert_eq!(
    function.decl.return_type,
    Some(IdlType::Primitive(Primitive::Double))
  );
}

#[test]
fn imports_and_ambient_functions_produce_no_entities() {
  let (_, entities) = analyze_one(
    "import {HTMLElement} from './html_element';
     declare function collectGarbage(): void;
     interface Foo extends HTMLElement {}",
  );
  assert_eq!(entities.len(), 1);
  assert!(matches!(&entities[0], Entity::Class(_)));
}

#[test]
fn classes_accumulate_into_registry_and_overwrite_by_name() {
  let mut corpus = Corpus::new();
  analyze(&mut corpus, "a.d.ts", "interface Foo { a: string; }").unwrap();
  analyze(&mut corpus, "b.d.ts", "interface Foo { b: string; } interface Bar {}").unwrap();
  assert_eq!(corpus.classes.len(), 2);
  let foo = &corpus.classes["Foo"];
  assert_eq!(foo.props.len(), 1);
  assert_eq!(foo.props[0].name, "b");
}

#[test]
fn relationship_pass_builds_children_adjacency() {
  let mut corpus = Corpus::new();
  analyze(
    &mut corpus,
    "rel.d.ts",
    "interface A {}
     interface B extends A {}
     interface C extends A, D {}",
  )
  .unwrap();
  corpus.build_class_relationship();
  assert_eq!(corpus.children["A"], vec!["B", "C"]);
  // D is only a mixin, never a parent, so it has no children entry.
  assert!(!corpus.children.contains_key("D"));
  assert!(!corpus.children.contains_key("B"));
}

#[test]
fn relationship_pass_reflects_only_final_registry_state() {
  let mut corpus = Corpus::new();
  analyze(&mut corpus, "first.d.ts", "interface Child extends Old {}").unwrap();
  analyze(&mut corpus, "second.d.ts", "interface Child extends New {}").unwrap();
  corpus.build_class_relationship();
  assert!(!corpus.children.contains_key("Old"));
  assert_eq!(corpus.children["New"], vec!["Child"]);
}

#[test]
fn dangling_parent_produces_edge_without_error() {
  let mut corpus = Corpus::new();
  analyze(&mut corpus, "dangling.d.ts", "interface Leaf extends Missing {}").unwrap();
  corpus.build_class_relationship();
  assert_eq!(corpus.children["Missing"], vec!["Leaf"]);
}

#[test]
fn parse_cache_is_keyed_by_path_only() {
  let mut corpus = Corpus::new();
  let first = analyze(&mut corpus, "cached.d.ts", "interface A {}").unwrap();
  // Same path with different content returns the originally cached tree.
  let second = analyze(&mut corpus, "cached.d.ts", "interface B {}").unwrap();
  let Entity::Class(a) = &first[0] else {
    panic!("expected class");
  };
  let Entity::Class(b) = &second[0] else {
    panic!("expected class");
  };
  assert_eq!(a.name, "A");
  assert_eq!(b.name, "A");
}

#[test]
fn unit_level_parse_failure_is_wrapped_with_the_unit_path() {
  let mut corpus = Corpus::new();
  let err = analyze(&mut corpus, "broken.d.ts", "interface {").unwrap_err();
  assert_eq!(err.unit, "broken.d.ts");
  assert!(err.to_string().contains("broken.d.ts"));
  // The failed unit leaves no classes behind.
  assert!(corpus.classes.is_empty());
}

#[test]
fn reset_clears_all_corpus_state() {
  let mut corpus = Corpus::new();
  analyze(
    &mut corpus,
    "reset.d.ts",
    "interface A extends B { p: string | null; }",
  )
  .unwrap();
  corpus.build_class_relationship();
  assert!(!corpus.classes.is_empty());
  assert!(!corpus.union_shapes.is_empty());

  corpus.reset();
  assert!(corpus.classes.is_empty());
  assert!(corpus.children.is_empty());
  assert!(corpus.union_shapes.is_empty());

  // A re-analysis of the same path reparses rather than reusing the dropped cache entry.
  let entities = analyze(&mut corpus, "reset.d.ts", "interface Z {}").unwrap();
  let Entity::Class(class) = &entities[0] else {
    panic!("expected class");
  };
  assert_eq!(class.name, "Z");
}

#[test]
fn documentation_is_attached_from_preceding_blocks() {
  let (_, entities) = analyze_one(
    "/** The root element of every document. */
    interface Document {
      /** Number of live nodes. */
      nodeCount: int;
      plain: string;
    }",
  );
  let class = single_class(&entities);
  assert_eq!(
    class.documentation.as_deref(),
    Some("The root element of every document.")
  );
  assert_eq!(
    class.props[0].documentation.as_deref(),
    Some("Number of live nodes.")
  );
  assert!(class.props[1].documentation.is_none());
}

#[test]
fn file_level_doc_falls_back_to_first_interface_only() {
  let (_, entities) = analyze_one(
    "/** File-level overview. */
    import {Node} from './node';

    interface First {}

    interface Second {}",
  );
  let Entity::Class(first) = &entities[0] else {
    panic!("expected class");
  };
  assert_eq!(first.documentation.as_deref(), Some("File-level overview."));
  let Entity::Class(second) = &entities[1] else {
    panic!("expected class");
  };
  assert!(second.documentation.is_none());
}

#[test]
fn model_serializes_for_the_downstream_emitter() {
  let (_, entities) = analyze_one("interface Foo { value: SupportAsync<string>; }");
  let json = serde_json::to_value(&entities).unwrap();
  let class = &json[0];
  assert_eq!(class["$t"], "Class");
  assert_eq!(class["name"], "Foo");
  assert_eq!(class["props"][1]["name"], "value_async");
}
