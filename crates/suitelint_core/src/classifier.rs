//! File type classification.
//!
//! Every discovered file gets a [`FileRecord`]. Classifying a file assigns
//! its type by naming convention, parses it, and upgrades every known file
//! it imports as a resource to [`FileType::Resource`]. Since files are
//! classified one after another, a file may be upgraded after it has already
//! been scanned; [`FileClassifier::mismatched`] lists those files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use suitelint_parser::{FileType, Model, ParseError};
use tracing::debug;

/// Token expanded to the importing file's directory.
const CURDIR: &str = "${CURDIR}";

/// Classification state of one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Current type. May be revised by imports in later files.
    pub file_type: FileType,
    /// Type the file was scanned with, if it was scanned.
    pub scanned_with_type: Option<FileType>,
    /// Set once another file imports this one.
    imported: bool,
}

impl FileRecord {
    fn new(path: PathBuf) -> Self {
        let file_type = FileType::from_path(&path);
        Self {
            path,
            file_type,
            scanned_with_type: None,
            imported: false,
        }
    }

    /// Whether the file was scanned with a type other than its current one.
    pub fn is_mismatched(&self) -> bool {
        self.scanned_with_type
            .is_some_and(|scanned| scanned != self.file_type)
    }
}

/// Result of classifying one file.
#[derive(Debug)]
pub struct Classification {
    /// Type the file was parsed with.
    pub file_type: FileType,
    /// Parse result under that type.
    pub parsed: Result<Model, ParseError>,
}

/// Records of every discovered file, in discovery order.
#[derive(Debug, Default)]
pub struct FileClassifier {
    records: Vec<FileRecord>,
    index: HashMap<PathBuf, usize>,
    exec_dir: PathBuf,
}

impl FileClassifier {
    /// Creates records for `paths`. Imports that are not found next to the
    /// importing file are resolved against `exec_dir`.
    pub fn new(paths: &[PathBuf], exec_dir: impl Into<PathBuf>) -> Self {
        let mut classifier = Self {
            records: Vec::with_capacity(paths.len()),
            index: HashMap::with_capacity(paths.len()),
            exec_dir: exec_dir.into(),
        };
        for path in paths {
            if classifier.index.contains_key(path) {
                continue;
            }
            classifier.index.insert(path.clone(), classifier.records.len());
            classifier.records.push(FileRecord::new(path.clone()));
        }
        classifier
    }

    /// Classifies `path` and applies its imports to other records.
    ///
    /// Returns `None` for a path without a record.
    pub fn classify(&mut self, path: &Path) -> Option<Classification> {
        let idx = *self.index.get(path)?;
        let record = &mut self.records[idx];
        record.file_type = if record.imported {
            FileType::Resource
        } else {
            FileType::from_path(path)
        };
        let file_type = record.file_type;

        let parsed = suitelint_parser::parse_file(file_type, path);
        match &parsed {
            Ok(model) => self.apply_imports(path, model),
            Err(e) => debug!("Could not collect imports of {}: {}", path.display(), e),
        }

        Some(Classification { file_type, parsed })
    }

    fn apply_imports(&mut self, importer: &Path, model: &Model) {
        let targets: Vec<PathBuf> = model
            .resource_imports()
            .filter_map(|token| self.resolve_import(importer, &token.value))
            .collect();

        for target in targets {
            let Some(&idx) = self.index.get(&target) else {
                continue;
            };
            let record = &mut self.records[idx];
            record.imported = true;
            if record.file_type != FileType::Resource {
                debug!(
                    "Type of {} revised from {} to {} (imported by {})",
                    record.path.display(),
                    record.file_type,
                    FileType::Resource,
                    importer.display()
                );
                record.file_type = FileType::Resource;
            }
        }
    }

    /// Resolves an import value to an existing canonical path.
    fn resolve_import(&self, importer: &Path, value: &str) -> Option<PathBuf> {
        let base = importer.parent()?;
        let expanded = value.replace(CURDIR, &base.to_string_lossy());
        let import = PathBuf::from(expanded);

        if import.is_absolute() {
            return import.canonicalize().ok();
        }
        [base, self.exec_dir.as_path()]
            .iter()
            .find_map(|dir| dir.join(&import).canonicalize().ok())
    }

    /// Records the type a file was scanned with.
    pub fn mark_scanned(&mut self, path: &Path, file_type: FileType) {
        if let Some(&idx) = self.index.get(path) {
            self.records[idx].scanned_with_type = Some(file_type);
        }
    }

    pub fn record(&self, path: &Path) -> Option<&FileRecord> {
        self.index.get(path).map(|&idx| &self.records[idx])
    }

    pub fn file_type(&self, path: &Path) -> Option<FileType> {
        self.record(path).map(|record| record.file_type)
    }

    /// All records in discovery order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Scanned files whose type changed after their scan.
    pub fn mismatched(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|record| record.is_mismatched())
    }
}
