//! Scene collaborator boundary.
//!
//! The engine never talks to a host application directly; it sees the scene
//! graph through the [`Scene`] trait. Paths are `|`-separated from the root,
//! the way DCC scene graphs address DAG nodes (`grp|prp_jar_001`), and the
//! short name is the final component.
//!
//! [`MemoryScene`] is an ordered in-memory implementation used by tests and
//! the CLI.

use std::collections::BTreeSet;

/// Path component separator in scene object paths.
pub const PATH_SEPARATOR: char = '|';

/// Errors from the scene collaborator.
///
/// Propagated uncaught through rename orchestration: the engine does not
/// retry renames that fail due to external races.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The rename source does not exist.
    NotFound {
        /// The missing path.
        path: String,
    },
    /// The rename target already exists.
    AlreadyExists {
        /// The occupied path.
        path: String,
    },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "object \"{path}\" does not exist"),
            Self::AlreadyExists { path } => write!(f, "object \"{path}\" already exists"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Abstract scene graph: existence queries and renames.
///
/// Each call is a blocking round-trip with no timeout; an unresponsive host
/// blocks the caller.
pub trait Scene {
    /// True iff an object exists at the path.
    fn exists(&self, full_path: &str) -> bool;

    /// Rename the object at `full_path` to `new_short_name`, returning the
    /// new full path.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotFound`] if the source is missing,
    /// [`SceneError::AlreadyExists`] if the target path is occupied.
    fn rename(&mut self, full_path: &str, new_short_name: &str) -> Result<String, SceneError>;

    /// Direct children of the object, as full paths, in scene order.
    fn list_children(&self, full_path: &str) -> Vec<String>;
}

/// The short name (final path component).
pub(crate) fn short_name(full_path: &str) -> &str {
    match full_path.rfind(PATH_SEPARATOR) {
        Some(i) => &full_path[i + 1..],
        None => full_path,
    }
}

/// The path with its short name replaced.
pub(crate) fn with_short_name(full_path: &str, short: &str) -> String {
    match full_path.rfind(PATH_SEPARATOR) {
        Some(i) => format!("{}{}", &full_path[..=i], short),
        None => short.to_owned(),
    }
}

/// In-memory scene graph.
///
/// Paths are stored in a sorted set, so children listings are deterministic.
/// Renames rewrite descendant paths, keeping the hierarchy consistent.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    objects: BTreeSet<String>,
}

impl MemoryScene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene pre-populated with the given full paths.
    pub fn with_objects<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            objects: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an object at the path.
    pub fn insert(&mut self, full_path: impl Into<String>) {
        self.objects.insert(full_path.into());
    }

    /// All object paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(String::as_str)
    }
}

impl Scene for MemoryScene {
    fn exists(&self, full_path: &str) -> bool {
        self.objects.contains(full_path)
    }

    fn rename(&mut self, full_path: &str, new_short_name: &str) -> Result<String, SceneError> {
        if !self.objects.contains(full_path) {
            return Err(SceneError::NotFound {
                path: full_path.to_owned(),
            });
        }
        let new_full = with_short_name(full_path, new_short_name);
        if new_full == full_path {
            return Ok(new_full);
        }
        if self.objects.contains(&new_full) {
            return Err(SceneError::AlreadyExists { path: new_full });
        }

        let old_prefix = format!("{full_path}{PATH_SEPARATOR}");
        let descendants: Vec<String> = self
            .objects
            .iter()
            .filter(|p| p.starts_with(&old_prefix))
            .cloned()
            .collect();

        self.objects.remove(full_path);
        self.objects.insert(new_full.clone());
        for old in descendants {
            self.objects.remove(&old);
            let tail = &old[old_prefix.len()..];
            self.objects.insert(format!("{new_full}{PATH_SEPARATOR}{tail}"));
        }
        Ok(new_full)
    }

    fn list_children(&self, full_path: &str) -> Vec<String> {
        let prefix = format!("{full_path}{PATH_SEPARATOR}");
        self.objects
            .iter()
            .filter(|p| {
                p.starts_with(&prefix) && !p[prefix.len()..].contains(PATH_SEPARATOR)
            })
            .cloned()
            .collect()
    }
}
