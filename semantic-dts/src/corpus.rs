use crate::decl::ClassBinding;
use crate::decl::ClassKind;
use crate::decl::IdlType;
use crate::error::AnalyzeError;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use parse_dts::ast::decl::TopLevel;
use parse_dts::ast::node::Node;
use parse_dts::ast::type_expr::TypeExpr;
use parse_dts::loc::Loc;
use std::mem::Discriminant;
use std::rc::Rc;

/// Syntactic identity of a type expression: owning unit, node kind, and source span. The unit id
/// keeps spans from different units from colliding, since the memo is never reset between units.
pub(crate) type TypeMemoKey = (u32, Discriminant<TypeExpr>, Loc);

/// A parsed unit, cached by path. Raw text is retained for documentation extraction.
pub(crate) struct CachedSource {
  pub unit_id: u32,
  pub text: String,
  pub top: Node<TopLevel>,
}

/// All corpus-wide mutable state of a run: the parsed-unit cache, the type-resolution memo, the
/// class registry, the parent/children adjacency, and the union-shape collector.
///
/// One `Corpus` value is threaded by `&mut` through every processing call. It persists across an
/// entire run and is cleared only by [`Corpus::reset`], intended for use between independent runs
/// (e.g. between test cases), never automatically between units. Single-threaded by design: hosts
/// that parallelize over units must partition per worker and merge, or lock externally.
pub struct Corpus {
  pub(crate) sources: HashMap<String, Rc<CachedSource>>,
  pub(crate) next_unit_id: u32,
  pub(crate) type_memo: HashMap<TypeMemoKey, IdlType>,
  /// Corpus-wide class registry. Last write wins on name collision.
  pub classes: HashMap<String, ClassBinding>,
  /// Parent name → names of classes declaring it as parent. Built by
  /// [`Corpus::build_class_relationship`]; empty before that.
  pub children: HashMap<String, Vec<String>>,
  /// Distinct ordered union shapes encountered anywhere in the corpus.
  pub union_shapes: HashSet<Vec<IdlType>>,
  // Registration order of class names, so the relationship pass is deterministic.
  class_order: Vec<String>,
}

impl Corpus {
  pub fn new() -> Corpus {
    Corpus {
      sources: HashMap::new(),
      next_unit_id: 0,
      type_memo: HashMap::new(),
      classes: HashMap::new(),
      children: HashMap::new(),
      union_shapes: HashSet::new(),
      class_order: Vec::new(),
    }
  }

  /// Clears every piece of corpus-wide state, including caches. Call between independent runs.
  pub fn reset(&mut self) {
    self.sources.clear();
    self.type_memo.clear();
    self.classes.clear();
    self.children.clear();
    self.union_shapes.clear();
    self.class_order.clear();
  }

  /// Parses `raw` as the unit at `path`, or returns the cached tree if this path has been seen
  /// before. The cache is keyed by path only and is content-change-agnostic within one run.
  pub(crate) fn ingest(&mut self, path: &str, raw: &str) -> Result<Rc<CachedSource>, AnalyzeError> {
    if let Some(hit) = self.sources.get(path) {
      return Ok(hit.clone());
    };
    let top = parse_dts::parse(raw).map_err(|error| AnalyzeError {
      unit: path.to_string(),
      error,
    })?;
    let src = Rc::new(CachedSource {
      unit_id: self.next_unit_id,
      text: raw.to_string(),
      top,
    });
    self.next_unit_id += 1;
    self.sources.insert(path.to_string(), src.clone());
    Ok(src)
  }

  /// Inserts a class into the corpus-wide registry. Re-registering an existing name overwrites
  /// the prior entry but keeps its original position in registration order.
  pub(crate) fn register_class(&mut self, class: ClassBinding) {
    if class.kind != ClassKind::Interface {
      return;
    };
    if !self.classes.contains_key(&class.name) {
      self.class_order.push(class.name.clone());
    };
    self.classes.insert(class.name.clone(), class);
  }

  /// Builds the parent → children adjacency from the final registry. Run once, after all units
  /// have been ingested; never incrementally. A parent name need not resolve to a registered
  /// class, and parent cycles are representable without error.
  pub fn build_class_relationship(&mut self) {
    self.children.clear();
    for name in &self.class_order {
      let Some(class) = self.classes.get(name) else {
        continue;
      };
      if let Some(parent) = &class.parent {
        self
          .children
          .entry(parent.clone())
          .or_default()
          .push(class.name.clone());
      };
    }
  }
}

impl Default for Corpus {
  fn default() -> Corpus {
    Corpus::new()
  }
}
