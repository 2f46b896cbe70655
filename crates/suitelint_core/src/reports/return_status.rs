//! Exit status computed from quality gates.

use std::collections::BTreeMap;

use crate::LinterError;
use crate::finding::Finding;
use crate::reports::Report;
use crate::rule::Severity;

/// Highest status a process can return.
const MAX_STATUS: usize = 255;

/// Counts findings per severity and turns the excess over each quality
/// gate into the process exit status.
///
/// A gate of `-1` ignores that severity. Default gates: `E=0`, `W=0`, `I=-1`.
pub struct ReturnStatusReport {
    counts: BTreeMap<Severity, usize>,
    quality_gate: BTreeMap<Severity, i64>,
}

impl ReturnStatusReport {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            quality_gate: BTreeMap::from([
                (Severity::Error, 0),
                (Severity::Warning, 0),
                (Severity::Info, -1),
            ]),
        }
    }

    /// Sum over severities of findings above the gate, capped at 255.
    pub fn status(&self) -> u8 {
        let excess: usize = self
            .counts
            .iter()
            .filter_map(|(severity, &count)| {
                let gate = self.quality_gate.get(severity).copied().unwrap_or(0);
                let gate = usize::try_from(gate).ok()?;
                count.checked_sub(gate)
            })
            .sum();
        u8::try_from(excess.min(MAX_STATUS)).unwrap_or(u8::MAX)
    }

    fn set_gate(&mut self, value: &str) -> Result<(), LinterError> {
        let (severity, limit) = value.split_once('=').ok_or_else(|| {
            LinterError::config(format!(
                "Invalid quality gate '{}' (expected <severity>=<limit>)",
                value
            ))
        })?;
        let severity: Severity = severity.parse().map_err(LinterError::config)?;
        let limit: i64 = limit.trim().parse().map_err(|e| {
            LinterError::config(format!("Invalid quality gate limit '{}': {}", limit, e))
        })?;
        self.quality_gate.insert(severity, limit);
        Ok(())
    }
}

impl Default for ReturnStatusReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for ReturnStatusReport {
    fn name(&self) -> &str {
        "return_status"
    }

    fn description(&self) -> &str {
        "Sets the exit status from the number of issues above the quality gates"
    }

    fn add_finding(&mut self, finding: &Finding) {
        *self.counts.entry(finding.severity).or_default() += 1;
    }

    fn render(&self) -> Option<String> {
        None
    }

    fn configure(&mut self, param: &str, values: &[&str]) -> Result<(), LinterError> {
        if param != "quality_gate" {
            return Err(LinterError::config(format!(
                "Report '{}' has no configurable parameter '{}'",
                self.name(),
                param
            )));
        }
        values.iter().try_for_each(|value| self.set_gate(value))
    }

    fn exit_status(&self) -> Option<u8> {
        Some(self.status())
    }
}
