//! Linter configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::LinterError;
use crate::disabler::FileDisableMode;
use crate::finding::DEFAULT_FORMAT;
use crate::rule::{Rule, Severity};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".suitelint.jsonc", ".suitelint.json"];

/// How the scan phase is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Classify and scan file by file, then re-scan files whose type changed.
    #[default]
    Sequential,
    /// Classify every file first, then scan files in parallel.
    Parallel,
}

/// Configuration for the linter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LinterConfig {
    /// Files or directories to lint.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Whether to descend into subdirectories.
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Accepted file extensions (with or without the leading dot).
    #[serde(default = "default_filetypes")]
    pub filetypes: Vec<String>,

    /// Glob patterns of files to skip during discovery.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Rule ids or names to run exclusively.
    #[serde(default)]
    pub include: Vec<String>,

    /// Rule ids or names to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Minimum severity of rules to run.
    #[serde(default = "default_threshold")]
    pub threshold: Severity,

    /// Output file for findings and reports (stdout when unset).
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Per-finding line template.
    #[serde(default = "default_format")]
    pub format: String,

    /// Reports to generate (`all` for every report).
    #[serde(default)]
    pub reports: Vec<String>,

    /// `<rule-or-report>:<param>:<value>` directives.
    #[serde(default)]
    pub configure: Vec<String>,

    /// Print all known rules and exit.
    #[serde(default)]
    pub list: bool,

    /// Scan execution strategy.
    #[serde(default)]
    pub strategy: ScanStrategy,

    /// How whole-file disablers are recognized.
    #[serde(default)]
    pub file_disable_mode: FileDisableMode,

    /// Directory used to resolve imports that are not found next to the
    /// importing file. Defaults to the current directory.
    #[serde(skip)]
    pub exec_dir: Option<PathBuf>,
}

fn default_recursive() -> bool {
    true
}

fn default_filetypes() -> Vec<String> {
    vec![
        ".robot".to_string(),
        ".resource".to_string(),
        ".tsv".to_string(),
    ]
}

fn default_threshold() -> Severity {
    Severity::Info
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl LinterConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            recursive: default_recursive(),
            filetypes: default_filetypes(),
            ignore: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            threshold: default_threshold(),
            output: None,
            format: default_format(),
            reports: Vec::new(),
            configure: Vec::new(),
            list: false,
            strategy: ScanStrategy::default(),
            file_disable_mode: FileDisableMode::default(),
            exec_dir: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.suitelint.jsonc`, `.suitelint.json`. Relative `paths` and
    /// `output` are resolved against the directory containing the file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            let resolve = |p: PathBuf| if p.is_relative() { parent.join(p) } else { p };
            config.paths = config.paths.into_iter().map(resolve).collect();
            config.output = config.output.map(resolve);
            config.exec_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (comments allowed) string with
    /// schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value: serde_json::Value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds the nearest config file in `start` or its ancestors.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        let start = start.as_ref();
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Resolves whether a rule runs.
    ///
    /// With a non-empty `include` list only listed rules run; otherwise
    /// rules listed in `exclude` are skipped. Rules below `threshold` never
    /// run.
    pub fn is_rule_enabled(&self, rule: &Rule) -> bool {
        let listed = |list: &[String]| list.iter().any(|key| *key == rule.id || *key == rule.name);

        let selected = if self.include.is_empty() {
            !listed(&self.exclude)
        } else {
            listed(&self.include)
        };
        selected && rule.severity >= self.threshold
    }

    /// Whether the file extension is one of `filetypes`.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.filetypes
            .iter()
            .any(|ft| ft.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Whether a report is selected.
    pub fn wants_report(&self, name: &str) -> bool {
        self.reports.iter().any(|r| r == name || r == "all")
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rule(id: &str, name: &str, severity: Severity) -> Rule {
        Rule::new(id, name, "message", severity)
    }

    #[test]
    fn test_config_new() {
        let config = LinterConfig::new();
        assert!(config.paths.is_empty());
        assert!(config.recursive);
        assert_eq!(config.threshold, Severity::Info);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.strategy, ScanStrategy::Sequential);
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // comments are allowed
            "paths": ["tests"],
            "recursive": false,
            "exclude": ["line-too-long"],
            "threshold": "W",
            "reports": ["rules_by_id"],
            "configure": ["line-too-long:line_length:140"],
            "strategy": "parallel",
            "file_disable_mode": "strict"
        }"#;

        let config = LinterConfig::from_json(json).unwrap();
        assert_eq!(config.paths, vec![PathBuf::from("tests")]);
        assert!(!config.recursive);
        assert_eq!(config.exclude, vec!["line-too-long".to_string()]);
        assert_eq!(config.threshold, Severity::Warning);
        assert_eq!(config.strategy, ScanStrategy::Parallel);
        assert_eq!(config.file_disable_mode, FileDisableMode::Strict);
        assert_eq!(config.filetypes, default_filetypes());
    }

    #[test]
    fn test_config_empty_document() {
        let config = LinterConfig::from_json("").unwrap();
        assert!(config.recursive);
    }

    #[rstest]
    #[case::unknown_property(r#"{ "pathz": [] }"#, "Config validation failed")]
    #[case::type_mismatch(r#"{ "recursive": "yes" }"#, "Config validation failed")]
    #[case::invalid_threshold(r#"{ "threshold": "fatal" }"#, "Config validation failed")]
    #[case::invalid_json(r#"{ "paths": [ }"#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let err = LinterConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[test]
    fn test_from_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".suitelint.json");
        fs::write(
            &path,
            r#"{ "paths": ["suites", "/abs/dir"], "output": "out/issues.txt" }"#,
        )
        .unwrap();

        let config = LinterConfig::from_file(&path).unwrap();
        assert_eq!(
            config.paths,
            vec![dir.path().join("suites"), PathBuf::from("/abs/dir")]
        );
        assert_eq!(config.output, Some(dir.path().join("out/issues.txt")));
        assert_eq!(config.exec_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_discover_walks_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".suitelint.jsonc"), "{}").unwrap();

        let found = LinterConfig::discover(&nested).unwrap();
        assert!(found.ends_with(".suitelint.jsonc"));
    }

    #[rstest]
    #[case::default_enabled(&[], &[], Severity::Info, true)]
    #[case::excluded_by_name(&[], &["line-too-long"], Severity::Info, false)]
    #[case::excluded_by_id(&[], &["W0501"], Severity::Info, false)]
    #[case::included(&["W0501"], &[], Severity::Info, true)]
    #[case::not_included(&["trailing-whitespace"], &[], Severity::Info, false)]
    #[case::include_wins_over_exclude(&["line-too-long"], &["line-too-long"], Severity::Info, true)]
    #[case::below_threshold(&[], &[], Severity::Error, false)]
    fn test_is_rule_enabled(
        #[case] include: &[&str],
        #[case] exclude: &[&str],
        #[case] threshold: Severity,
        #[case] expected: bool,
    ) {
        let config = LinterConfig {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            threshold,
            ..LinterConfig::new()
        };
        let rule = rule("W0501", "line-too-long", Severity::Warning);
        assert_eq!(config.is_rule_enabled(&rule), expected);
    }

    #[rstest]
    #[case("suite.robot", true)]
    #[case("keywords.RESOURCE", true)]
    #[case("notes.txt", false)]
    #[case("Makefile", false)]
    fn test_accepts(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(LinterConfig::new().accepts(Path::new(path)), expected);
    }

    #[test]
    fn test_wants_report() {
        let config = LinterConfig {
            reports: vec!["all".to_string()],
            ..LinterConfig::new()
        };
        assert!(config.wants_report("rules_by_id"));
        assert!(!LinterConfig::new().wants_report("rules_by_id"));
    }
}
