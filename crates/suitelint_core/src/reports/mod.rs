//! Run-wide reports.
//!
//! A report receives every finding that survives filtering and renders a
//! summary once the run is finished.

mod by_rule;
mod by_severity;
mod return_status;

pub use by_rule::RulesByIdReport;
pub use by_severity::RulesBySeverityReport;
pub use return_status::ReturnStatusReport;

use crate::LinterError;
use crate::config::LinterConfig;
use crate::finding::Finding;

/// A stateful aggregator over all accepted findings of a run.
pub trait Report: Send {
    /// Unique name used to select and configure the report.
    fn name(&self) -> &str;

    /// One-line summary shown by `--list-reports`.
    fn description(&self) -> &str;

    /// Called once per accepted finding, in scan order.
    fn add_finding(&mut self, finding: &Finding);

    /// Renders the summary. `None` prints nothing.
    fn render(&self) -> Option<String>;

    /// Handles `<report>:<param>:<value>[:<value>...]` directives.
    fn configure(&mut self, param: &str, _values: &[&str]) -> Result<(), LinterError> {
        Err(LinterError::config(format!(
            "Report '{}' has no configurable parameter '{}'",
            self.name(),
            param
        )))
    }

    /// Process exit status requested by this report, if any.
    fn exit_status(&self) -> Option<u8> {
        None
    }
}

/// Every built-in report, in registration order.
pub fn builtin() -> Vec<Box<dyn Report>> {
    vec![
        Box::new(RulesByIdReport::new()),
        Box::new(RulesBySeverityReport::new()),
        Box::new(ReturnStatusReport::new()),
    ]
}

/// Reports selected for the current run.
#[derive(Default)]
pub struct ReportSet {
    reports: Vec<Box<dyn Report>>,
}

impl ReportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the built-in reports named in `config.reports`.
    pub fn from_config(config: &LinterConfig) -> Result<Self, LinterError> {
        let available = builtin();
        for name in &config.reports {
            if name != "all" && !available.iter().any(|r| r.name() == name) {
                return Err(LinterError::config(format!(
                    "Provided report '{}' does not exist",
                    name
                )));
            }
        }

        let mut set = Self::new();
        for report in available {
            if config.wants_report(report.name()) {
                set.register(report);
            }
        }
        Ok(set)
    }

    pub fn register(&mut self, report: Box<dyn Report>) {
        self.reports.push(report);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Report + 'static)> {
        self.reports
            .iter_mut()
            .find(|r| r.name() == name)
            .map(|r| r.as_mut())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reports.iter().map(|r| r.name())
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Forwards a finding to every report.
    pub fn add_finding(&mut self, finding: &Finding) {
        for report in &mut self.reports {
            report.add_finding(finding);
        }
    }

    /// Rendered output of every report that produces any.
    pub fn render_all(&self) -> Vec<String> {
        self.reports.iter().filter_map(|r| r.render()).collect()
    }

    /// Exit status of the first report that requests one.
    pub fn exit_status(&self) -> Option<u8> {
        self.reports.iter().find_map(|r| r.exit_status())
    }
}
