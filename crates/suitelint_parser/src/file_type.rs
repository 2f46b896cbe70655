//! File type classification.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Parser, SuiteParser};

/// Kind of source file. Selects the grammar used to parse it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Regular suite file.
    #[default]
    General,
    /// Resource file (keywords and variables only).
    Resource,
    /// Suite initialization file (`__init__.*`).
    Init,
}

impl FileType {
    /// Classifies a path by naming convention alone.
    ///
    /// A base name containing `__init__` is an init file, a `.resource`
    /// extension is a resource file, anything else is general. Import usage
    /// may later upgrade a general file to a resource file.
    pub fn from_path(path: &Path) -> Self {
        let is_init = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains("__init__"));
        if is_init {
            return FileType::Init;
        }

        let is_resource = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("resource"));
        if is_resource {
            FileType::Resource
        } else {
            FileType::General
        }
    }

    /// Returns the grammar for this file type.
    pub fn parser(self) -> Box<dyn Parser + Send + Sync> {
        Box::new(match self {
            FileType::General => SuiteParser::general(),
            FileType::Resource => SuiteParser::resource(),
            FileType::Init => SuiteParser::init(),
        })
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::General => "general",
            FileType::Resource => "resource",
            FileType::Init => "init",
        };
        f.write_str(name)
    }
}
