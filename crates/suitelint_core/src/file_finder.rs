use crate::config::LinterConfig;
use crate::error::LinterError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

pub struct FileFinder {
    ignore_globs: Option<GlobSet>,
    recursive: bool,
}

impl FileFinder {
    pub fn new(ignore: &[String], recursive: bool) -> Result<Self, LinterError> {
        let ignore_globs = Self::build_globset(ignore)?;

        Ok(Self {
            ignore_globs,
            recursive,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a file path matches one of the ignore patterns.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.ignore_globs
            .as_ref()
            .is_some_and(|ignores| ignores.is_match(path))
    }

    /// Lists the files to lint under `roots`, in discovery order.
    ///
    /// A root that is a file is taken as is when `config` accepts its
    /// extension. Directories are walked with entries sorted by name; without
    /// recursion only their direct children are used. Paths are canonical
    /// and each file appears once.
    pub fn discover_files(
        &self,
        roots: &[PathBuf],
        config: &LinterConfig,
    ) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for root in roots {
            if !root.exists() {
                return Err(LinterError::file(root));
            }

            let max_depth = if self.recursive { usize::MAX } else { 1 };
            let walker = WalkDir::new(root)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok());

            for entry in walker {
                let path = entry.path();
                if !entry.file_type().is_file() || !config.accepts(path) {
                    continue;
                }
                let Ok(abs_path) = path.canonicalize() else {
                    continue;
                };
                if self.should_ignore(&abs_path) {
                    continue;
                }
                if seen.insert(abs_path.clone()) {
                    files.push(abs_path);
                }
            }
        }

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}
