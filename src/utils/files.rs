//! Snippet table sources
//!
//! This module provides WASM-safe abstractions for locating the snippet table
//! resource. The engine never fetches its own table: a host picks a source,
//! reads the JSON through it and hands the parsed table to the engine.
//!
//! The key abstraction is the `SnippetSource` trait which allows different
//! implementations for CLI (real filesystem) and WASM (no-op or memory-based).

use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Trait for reading snippet table resources
///
/// Implementations:
/// - `StdSnippetSource`: Uses std::fs for real file system access (CLI)
/// - `MemorySnippetSource`: In-memory storage (testing, WASM with preloaded tables)
/// - `NoopSnippetSource`: Returns an error for all reads (WASM fallback)
pub trait SnippetSource: Send + Sync {
    /// Read a resource's contents
    fn read_table(&self, name: &str) -> Result<String, SourceError>;

    /// Check if a resource exists
    fn table_exists(&self, name: &str) -> bool;
}

/// Error type for resource lookup
#[derive(Debug, Clone)]
pub enum SourceError {
    NotFound(String),
    ReadError(String),
    NotSupported(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NotFound(name) => write!(f, "Snippet table not found: {}", name),
            SourceError::ReadError(msg) => write!(f, "Read error: {}", msg),
            SourceError::NotSupported(msg) => write!(f, "Not supported: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<SourceError> for crate::utils::error::SnippetError {
    fn from(err: SourceError) -> Self {
        crate::utils::error::SnippetError::IoError {
            message: err.to_string(),
        }
    }
}

/// Standard filesystem source (for CLI usage)
#[cfg(not(target_arch = "wasm32"))]
pub struct StdSnippetSource {
    /// Directories searched for relative names, in order
    search_paths: Vec<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
impl StdSnippetSource {
    pub fn new() -> Self {
        Self {
            search_paths: vec![],
        }
    }

    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            search_paths: vec![base_dir.as_ref().to_path_buf()],
        }
    }

    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    /// Try to find a table in search paths
    fn find_table(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_file() {
            return Some(path.to_path_buf());
        }

        let with_ext = format!("{}.json", name);
        let path_with_ext = Path::new(&with_ext);
        if path_with_ext.is_file() {
            return Some(path_with_ext.to_path_buf());
        }

        for search_path in &self.search_paths {
            let full_path = search_path.join(name);
            if full_path.is_file() {
                return Some(full_path);
            }

            let full_path_ext = search_path.join(&with_ext);
            if full_path_ext.is_file() {
                return Some(full_path_ext);
            }
        }

        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for StdSnippetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SnippetSource for StdSnippetSource {
    fn read_table(&self, name: &str) -> Result<String, SourceError> {
        if let Some(full_path) = self.find_table(name) {
            std::fs::read_to_string(&full_path).map_err(|e| SourceError::ReadError(e.to_string()))
        } else {
            Err(SourceError::NotFound(name.to_string()))
        }
    }

    fn table_exists(&self, name: &str) -> bool {
        self.find_table(name).is_some()
    }
}

/// Memory-based source (for testing and WASM with preloaded tables)
#[derive(Default)]
pub struct MemorySnippetSource {
    tables: HashMap<String, String>,
}

impl MemorySnippetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the in-memory storage
    pub fn add_table(&mut self, name: &str, content: &str) {
        self.tables.insert(name.to_string(), content.to_string());
    }
}

impl SnippetSource for MemorySnippetSource {
    fn read_table(&self, name: &str) -> Result<String, SourceError> {
        self.tables
            .get(name)
            .cloned()
            .or_else(|| self.tables.get(&format!("{}.json", name)).cloned())
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name) || self.tables.contains_key(&format!("{}.json", name))
    }
}

/// No-op source (for WASM when no tables are available)
pub struct NoopSnippetSource;

impl SnippetSource for NoopSnippetSource {
    fn read_table(&self, name: &str) -> Result<String, SourceError> {
        Err(SourceError::NotSupported(format!(
            "Reading snippet tables is not supported in this environment: {}",
            name
        )))
    }

    fn table_exists(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_with_extension_fallback() {
        let mut source = MemorySnippetSource::new();
        source.add_table("snippets.json", "{}");

        assert!(source.table_exists("snippets"));
        assert_eq!(source.read_table("snippets").unwrap(), "{}");
        assert!(matches!(
            source.read_table("other"),
            Err(SourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_noop_source() {
        let source = NoopSnippetSource;
        assert!(!source.table_exists("snippets.json"));
        assert!(matches!(
            source.read_table("snippets.json"),
            Err(SourceError::NotSupported(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_std_source_search_path() {
        let dir = std::env::temp_dir().join(format!("texpand-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("mine.json"), "{\"custom_snippets\": {}}").unwrap();

        let source = StdSnippetSource::with_base_dir(&dir);
        assert!(source.table_exists("mine"));
        assert!(source.read_table("mine").unwrap().contains("custom_snippets"));
        assert!(!source.table_exists("absent"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
