//! # strata_ast
//!
//! Structural facts for Strata.
//!
//! A source file is reduced to a [`FileReference`]: the types it declares,
//! the types each declaration depends on, and the inheritance edges between
//! them. These are the values the fact cache stores between runs, so every
//! type here is plain serializable data.
//!
//! ## Example
//!
//! ```rust
//! use strata_ast::{ClassLikeName, ClassReference, FileReference};
//!
//! let mut file = FileReference::new("/project/src/Controller/UserController.php");
//! file.class_references
//!     .push(ClassReference::new(ClassLikeName::new("\\App\\Controller\\UserController")));
//!
//! let names: Vec<_> = file.class_names().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["App\\Controller\\UserController"]);
//! ```

mod name;
mod occurrence;
mod reference;

pub use name::ClassLikeName;
pub use occurrence::FileOccurrence;
pub use reference::{
    ClassReference, Dependency, DependencyKind, FileReference, Inherit, InheritKind,
};
