//! Core linter engine.

use std::collections::HashMap;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use suitelint_parser::{FileType, Model, ParseError};
use tracing::{debug, info};

use crate::LinterError;
use crate::checker::{Checker, ScanContext, ScanPass};
use crate::checkers;
use crate::classifier::{Classification, FileClassifier};
use crate::config::{LinterConfig, ScanStrategy};
use crate::disabler::Disablers;
use crate::file_finder::FileFinder;
use crate::finding::Finding;
use crate::registry::Registry;
use crate::reports::{self, ReportSet};

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files scanned (whole-file-disabled files excluded).
    pub files: usize,
    /// Findings written to the output.
    pub findings: usize,
    /// Exit status requested by a report, if any.
    pub exit_status: Option<u8>,
}

/// The core linter engine.
///
/// Orchestrates discovery, classification, scanning, filtering and
/// reporting.
pub struct Linter {
    config: LinterConfig,
    registry: Registry,
    reports: ReportSet,
}

impl Linter {
    /// Creates a linter with the built-in checkers and the reports selected
    /// by `config`.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let reports = ReportSet::from_config(&config)?;
        Self::with_components(config, checkers::builtin(), reports)
    }

    /// Creates a linter from explicit checkers and reports.
    ///
    /// Checkers are registered in order, then every `configure` directive
    /// is applied.
    pub fn with_components(
        config: LinterConfig,
        checkers: Vec<Box<dyn Checker>>,
        mut reports: ReportSet,
    ) -> Result<Self, LinterError> {
        let mut registry = Registry::new();
        for checker in checkers {
            registry.register_checker(checker, &config)?;
        }
        for directive in &config.configure {
            registry.configure(directive, &mut reports)?;
        }

        Ok(Self {
            config,
            registry,
            reports,
        })
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn reports(&self) -> &ReportSet {
        &self.reports
    }

    /// Descriptions of every registered rule, sorted by id.
    pub fn list_rules(&self) -> Vec<String> {
        self.registry
            .rules_by_id()
            .iter()
            .map(|rule| rule.to_string())
            .collect()
    }

    /// Every built-in report with its description, marking the ones
    /// selected for this run.
    pub fn list_reports(&self) -> Vec<String> {
        reports::builtin()
            .iter()
            .map(|report| {
                format!(
                    "{} - {} ({})",
                    report.name(),
                    report.description(),
                    if self.config.wants_report(report.name()) {
                        "enabled"
                    } else {
                        "disabled"
                    }
                )
            })
            .collect()
    }

    /// Lints the configured paths.
    ///
    /// Accepted findings are written to `out` with the configured line
    /// template, followed by the rendered reports.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<RunSummary, LinterError> {
        let finder = FileFinder::new(&self.config.ignore, self.config.recursive)?;
        let files = finder.discover_files(&self.config.paths, &self.config)?;

        let exec_dir = self
            .config
            .exec_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut classifier = FileClassifier::new(&files, exec_dir);

        let mut sink = FindingSink {
            out: &mut *out,
            format: &self.config.format,
            reports: &mut self.reports,
            accepted: 0,
        };
        let scan = Scan {
            registry: &self.registry,
            config: &self.config,
        };

        let disablers = match self.config.strategy {
            ScanStrategy::Sequential => scan.sequential(&files, &mut classifier, &mut sink)?,
            ScanStrategy::Parallel => scan.parallel(&files, &mut classifier, &mut sink)?,
        };
        scan.correct_types(&classifier, &disablers, &mut sink)?;

        let scanned = disablers.len();
        let findings = sink.accepted;
        for rendered in self.reports.render_all() {
            writeln!(out, "{}", rendered)?;
        }

        info!("Scanned {} files, {} issues", scanned, findings);
        Ok(RunSummary {
            files: scanned,
            findings,
            exit_status: self.reports.exit_status(),
        })
    }
}

/// Writes accepted findings and forwards them to the reports.
struct FindingSink<'a> {
    out: &'a mut dyn Write,
    format: &'a str,
    reports: &'a mut ReportSet,
    accepted: usize,
}

impl FindingSink<'_> {
    fn accept(&mut self, findings: &[Finding], disablers: &Disablers) -> Result<(), LinterError> {
        for finding in findings {
            if disablers.is_disabled(finding) {
                continue;
            }
            self.reports.add_finding(finding);
            writeln!(self.out, "{}", finding.render(self.format))?;
            self.accepted += 1;
        }
        Ok(())
    }
}

/// Read-only state shared by every scan of a run.
#[derive(Clone, Copy)]
struct Scan<'a> {
    registry: &'a Registry,
    config: &'a LinterConfig,
}

/// Disablers of every scanned file.
type ScannedFiles = HashMap<PathBuf, Disablers>;

impl Scan<'_> {
    /// Builds the disablers of `path`, or `None` if the whole file is disabled.
    fn disablers(&self, path: &Path) -> Option<Disablers> {
        let disablers = Disablers::from_path(path, self.config.file_disable_mode);
        if disablers.file_disabled() {
            debug!("Skipping {}: disabled for all rules", path.display());
            return None;
        }
        Some(disablers)
    }

    /// Classifies, scans and reports one file at a time.
    fn sequential(
        &self,
        files: &[PathBuf],
        classifier: &mut FileClassifier,
        sink: &mut FindingSink<'_>,
    ) -> Result<ScannedFiles, LinterError> {
        let mut scanned = ScannedFiles::new();
        for path in files {
            let Some(disablers) = self.disablers(path) else {
                continue;
            };
            let Some(classification) = classifier.classify(path) else {
                continue;
            };
            let file_type = classifier.file_type(path).unwrap_or(classification.file_type);
            classifier.mark_scanned(path, file_type);

            let findings = self.scan_file(path, file_type, reuse(classification, file_type, path));
            sink.accept(&findings, &disablers)?;
            scanned.insert(path.clone(), disablers);
        }
        Ok(scanned)
    }

    /// Classifies every file, then scans them in parallel.
    ///
    /// Findings are reported in discovery order once every file is scanned.
    fn parallel(
        &self,
        files: &[PathBuf],
        classifier: &mut FileClassifier,
        sink: &mut FindingSink<'_>,
    ) -> Result<ScannedFiles, LinterError> {
        let mut pending = Vec::with_capacity(files.len());
        for path in files {
            let Some(disablers) = self.disablers(path) else {
                continue;
            };
            if let Some(classification) = classifier.classify(path) {
                pending.push((path, disablers, classification));
            }
        }

        let settled: &FileClassifier = classifier;
        let results: Vec<(&PathBuf, FileType, Disablers, Vec<Finding>)> = pending
            .into_par_iter()
            .map(|(path, disablers, classification)| {
                let file_type = settled.file_type(path).unwrap_or(classification.file_type);
                let findings =
                    self.scan_file(path, file_type, reuse(classification, file_type, path));
                (path, file_type, disablers, findings)
            })
            .collect();

        let mut scanned = ScannedFiles::new();
        for (path, file_type, disablers, findings) in results {
            classifier.mark_scanned(path, file_type);
            sink.accept(&findings, &disablers)?;
            scanned.insert(path.clone(), disablers);
        }
        Ok(scanned)
    }

    /// Re-scans files whose type changed after they were scanned, with the
    /// parse-validity checker only.
    fn correct_types(
        &self,
        classifier: &FileClassifier,
        scanned: &ScannedFiles,
        sink: &mut FindingSink<'_>,
    ) -> Result<(), LinterError> {
        let Some(checker) = self.registry.parse_validity_checker() else {
            return Ok(());
        };

        for record in classifier.mismatched() {
            let Some(disablers) = scanned.get(&record.path) else {
                continue;
            };
            debug!(
                "Re-scanning {} as {} (scanned as {})",
                record.path.display(),
                record.file_type,
                record
                    .scanned_with_type
                    .map(|t| t.to_string())
                    .unwrap_or_default()
            );
            let model = match suitelint_parser::parse_file(record.file_type, &record.path) {
                Ok(model) => model,
                Err(e) => {
                    debug!("Skipping re-scan of {}: {}", record.path.display(), e);
                    continue;
                }
            };
            let ctx = ScanContext::new(&record.path, record.file_type, ScanPass::TypeCorrection);
            sink.accept(&checker.scan(&ctx, &model), disablers)?;
        }
        Ok(())
    }

    /// Runs every enabled checker on one file.
    ///
    /// A file that cannot be parsed is reported by the parse-validity
    /// checker.
    fn scan_file(
        &self,
        path: &Path,
        file_type: FileType,
        parsed: Result<Model, ParseError>,
    ) -> Vec<Finding> {
        debug!("Scanning {} as {}", path.display(), file_type);
        let ctx = ScanContext::new(path, file_type, ScanPass::Full);

        match parsed {
            Ok(model) => self
                .registry
                .enabled_checkers()
                .flat_map(|checker| checker.scan(&ctx, &model))
                .collect(),
            Err(e) => {
                debug!("Failed to parse {}: {}", path.display(), e);
                self.registry
                    .parse_validity_checker()
                    .and_then(|checker| {
                        checker.parse_failure(&ctx, e.line().unwrap_or(1), &e.to_string())
                    })
                    .into_iter()
                    .collect()
            }
        }
    }
}

/// Reuses the classification parse when the type did not change since.
fn reuse(
    classification: Classification,
    file_type: FileType,
    path: &Path,
) -> Result<Model, ParseError> {
    if classification.file_type == file_type {
        classification.parsed
    } else {
        suitelint_parser::parse_file(file_type, path)
    }
}
