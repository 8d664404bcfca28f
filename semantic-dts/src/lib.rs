//! Semantic binding model construction for typed interface definition (IDL) corpora.
//!
//! This crate is the middle of a binding-generation pipeline: [`parse_dts`] turns raw declaration
//! text into a typed syntax tree, this crate turns those trees into a structured semantic model
//! (classes, methods, properties, type aliases, and their resolved type shapes), and a downstream
//! emitter turns the model into target-language binding code.
//!
//! All corpus-wide state lives in an explicit [`Corpus`] value threaded through every call:
//!
//! ```
//! use semantic_dts::{analyze, Corpus};
//!
//! let mut corpus = Corpus::new();
//! let entities = analyze(
//!   &mut corpus,
//!   "dom/widget.d.ts",
//!   "interface Widget extends Node { id: string; }",
//! )
//! .unwrap();
//! assert_eq!(entities.len(), 1);
//!
//! // After every unit has been ingested, derive the inheritance graph.
//! corpus.build_class_relationship();
//! assert!(corpus.children["Node"].contains(&"Widget".to_string()));
//! ```
//!
//! Failures never abort a run: unsupported type shapes degrade to the `any` leaf with a logged
//! warning, a failed declaration is dropped while its siblings continue, and only a unit that
//! cannot be ingested at all surfaces an error to the caller.

mod analyze;
pub mod corpus;
pub mod decl;
mod docs;
pub mod error;
mod resolve;

pub use analyze::analyze;
pub use corpus::Corpus;
pub use decl::ArgumentBinding;
pub use decl::ClassBinding;
pub use decl::ClassKind;
pub use decl::Entity;
pub use decl::FunctionBinding;
pub use decl::IdlType;
pub use decl::IndexKeyKind;
pub use decl::IndexedProperty;
pub use decl::MethodBinding;
pub use decl::Primitive;
pub use decl::PropertyBinding;
pub use decl::TypeAliasBinding;
pub use decl::TypeMode;
pub use error::AnalyzeError;
