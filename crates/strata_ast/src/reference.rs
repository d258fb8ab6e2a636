//! Per-file structural facts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ClassLikeName, FileOccurrence};

/// How a source file refers to another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Import statement.
    Use,
    /// Object instantiation.
    New,
    /// Static method call.
    StaticCall,
    /// Static property access.
    StaticProperty,
    /// Type check.
    InstanceOf,
    /// Caught exception type.
    Catch,
    /// Parameter type declaration.
    Parameter,
    /// Return type declaration.
    ReturnType,
    /// Annotated variable type.
    Variable,
    /// Class constant access.
    Const,
}

/// A dependency from a declaration to another type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// The type depended on.
    pub class: ClassLikeName,
    /// Where the dependency occurs.
    pub occurrence: FileOccurrence,
    /// What kind of reference it is.
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates a new dependency.
    pub fn new(
        class: impl Into<ClassLikeName>,
        occurrence: FileOccurrence,
        kind: DependencyKind,
    ) -> Self {
        Self {
            class: class.into(),
            occurrence,
            kind,
        }
    }
}

/// The kind of inheritance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritKind {
    /// Class extends a parent class.
    Extends,
    /// Class implements an interface.
    Implements,
    /// Class uses a trait.
    Uses,
}

/// An inheritance edge from a declaration to a supertype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inherit {
    /// The supertype.
    pub class: ClassLikeName,
    /// Where the edge is declared.
    pub occurrence: FileOccurrence,
    /// What kind of edge it is.
    pub kind: InheritKind,
}

impl Inherit {
    /// Creates a new inheritance edge.
    pub fn new(
        class: impl Into<ClassLikeName>,
        occurrence: FileOccurrence,
        kind: InheritKind,
    ) -> Self {
        Self {
            class: class.into(),
            occurrence,
            kind,
        }
    }
}

/// A type declared in a source file, with its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReference {
    /// The declared type.
    pub name: ClassLikeName,
    /// Types this declaration depends on.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Supertypes of this declaration.
    #[serde(default)]
    pub inherits: Vec<Inherit>,
}

impl ClassReference {
    /// Creates a declaration with no edges.
    pub fn new(name: impl Into<ClassLikeName>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            inherits: Vec::new(),
        }
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Adds an inheritance edge.
    pub fn with_inherit(mut self, inherit: Inherit) -> Self {
        self.inherits.push(inherit);
        self
    }
}

/// Everything extracted from one source file.
///
/// This is the fact the cache stores per file. File-level dependencies are
/// those outside any declaration, such as imports in a file that declares
/// no types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Path of the source file.
    pub filepath: PathBuf,
    /// Types declared in the file.
    #[serde(default)]
    pub class_references: Vec<ClassReference>,
    /// Dependencies not attributed to any declaration.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl FileReference {
    /// Creates an empty fact for the given file.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            class_references: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Returns the file path.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Adds a declared type.
    pub fn with_class(mut self, class: ClassReference) -> Self {
        self.class_references.push(class);
        self
    }

    /// Iterates over the names of declared types.
    pub fn class_names(&self) -> impl Iterator<Item = &ClassLikeName> {
        self.class_references.iter().map(|c| &c.name)
    }
}
