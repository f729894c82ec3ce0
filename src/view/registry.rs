use crate::error::ViewError;
use ahash::AHashMap;
use std::fmt;
use std::fs;
use std::sync::Arc;

/// A loaded view, as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModule {
    /// Normalized view id, e.g. `sys/user/index`.
    pub id: String,
    /// The path the view was registered under.
    pub source: String,
}

type LoadFn = dyn Fn() -> ViewModule + Send + Sync;

/// A lazily invoked view factory. Cloning is cheap; the factory is shared.
#[derive(Clone)]
pub struct ViewLoader {
    key: String,
    load: Arc<LoadFn>,
}

impl ViewLoader {
    pub fn new<F>(key: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> ViewModule + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            load: Arc::new(load),
        }
    }

    /// The normalized view id this loader is registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Invokes the factory.
    pub fn load(&self) -> ViewModule {
        (self.load)()
    }
}

impl fmt::Debug for ViewLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewLoader").field("key", &self.key).finish()
    }
}

impl PartialEq for ViewLoader {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && Arc::ptr_eq(&self.load, &other.load)
    }
}

/// Immutable mapping from normalized view ids to loaders.
///
/// Built once at startup, then shared with every converter that needs it.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: AHashMap<String, ViewLoader>,
}

impl ViewRegistry {
    pub fn builder() -> ViewRegistryBuilder {
        ViewRegistryBuilder::default()
    }

    /// Registers every path of a manifest with a loader that reports its own key and source.
    pub fn from_manifest<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .fold(Self::builder(), |builder, path| {
                builder.register_path(path.as_ref())
            })
            .build()
    }

    /// Loads a manifest file containing a JSON array of view paths.
    pub fn from_manifest_file(path: &str) -> Result<Self, ViewError> {
        let content = fs::read_to_string(path).map_err(|e| ViewError::ManifestRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let paths: Vec<String> =
            serde_json::from_str(&content).map_err(|e| ViewError::ManifestParse(e.to_string()))?;
        Ok(Self::from_manifest(paths))
    }

    /// Exact-match lookup of a view id. Unknown ids yield `None`.
    pub fn resolve(&self, view_id: &str) -> Option<ViewLoader> {
        self.views.get(view_id).cloned()
    }

    pub fn contains(&self, view_id: &str) -> bool {
        self.views.contains_key(view_id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Registered view ids in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.views.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Collects registrations for a [`ViewRegistry`]. Later registrations of the same key win.
#[derive(Default)]
pub struct ViewRegistryBuilder {
    views: AHashMap<String, ViewLoader>,
}

impl ViewRegistryBuilder {
    /// Registers a custom factory under the normalized form of `path`.
    pub fn register<F>(mut self, path: &str, load: F) -> Self
    where
        F: Fn() -> ViewModule + Send + Sync + 'static,
    {
        match normalize_view_path(path) {
            Some(key) => {
                if self.views.contains_key(&key) {
                    log::debug!("View '{}' registered again from '{}'", key, path);
                }
                let loader = ViewLoader::new(key.clone(), load);
                self.views.insert(key, loader);
            }
            None => log::warn!("Skipping view path '{}': it normalizes to an empty id", path),
        }
        self
    }

    /// Registers `path` with the default factory.
    pub fn register_path(self, path: &str) -> Self {
        let Some(key) = normalize_view_path(path) else {
            log::warn!("Skipping view path '{}': it normalizes to an empty id", path);
            return self;
        };
        let source = path.to_string();
        self.register(path, move || ViewModule {
            id: key.clone(),
            source: source.clone(),
        })
    }

    pub fn build(self) -> ViewRegistry {
        log::debug!("Built view registry with {} views", self.views.len());
        ViewRegistry { views: self.views }
    }
}

/// Turns a view file path into its lookup id.
///
/// `../views/sys/user/index.vue` becomes `sys/user/index`. Paths without a `views/`
/// segment keep everything after a leading `./` or `/`.
pub fn normalize_view_path(path: &str) -> Option<String> {
    let relative = match path.find("views/") {
        Some(idx) => &path[idx + "views/".len()..],
        None => path.trim_start_matches("./").trim_start_matches('/'),
    };

    let (dir, file) = match relative.rfind('/') {
        Some(idx) => (&relative[..=idx], &relative[idx + 1..]),
        None => ("", relative),
    };
    let stem = match file.rfind('.') {
        Some(0) | None => file,
        Some(idx) => &file[..idx],
    };

    let key = format!("{}{}", dir, stem);
    let key = key.trim_end_matches('/');
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_glob_style_paths() {
        assert_eq!(
            normalize_view_path("../views/sys/user/index.vue").as_deref(),
            Some("sys/user/index")
        );
        assert_eq!(
            normalize_view_path("/src/views/error/404.vue").as_deref(),
            Some("error/404")
        );
        assert_eq!(normalize_view_path("./login.vue").as_deref(), Some("login"));
        assert_eq!(normalize_view_path("sys/menu").as_deref(), Some("sys/menu"));
    }

    #[test]
    fn rejects_empty_ids() {
        assert_eq!(normalize_view_path(""), None);
        assert_eq!(normalize_view_path("../views/"), None);
        assert_eq!(normalize_view_path("/"), None);
    }

    #[test]
    fn keeps_dotted_directories() {
        assert_eq!(
            normalize_view_path("views/v1.2/page.vue").as_deref(),
            Some("v1.2/page")
        );
    }
}
