//! Staged relayout after device and orientation changes.
//!
//! A relayout is a fixed list of named stages. Every stage runs even when
//! an earlier one failed; failures are logged and collected into a
//! [`PipelineReport`] rather than returned.

use std::fmt;

use tracing::{debug, error};

use crate::schedule::Millis;
use crate::Result;

/// Wait after an orientation flip before the first measurement
pub const ORIENTATION_DELAY_MS: Millis = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Width,
    Height,
    Scroll,
    Tabs,
}

impl Stage {
    /// Order of a full relayout
    pub const ALL: [Stage; 4] = [Stage::Width, Stage::Height, Stage::Scroll, Stage::Tabs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Width => "width",
            Stage::Height => "height",
            Stage::Scroll => "scroll",
            Stage::Tabs => "tabs",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stages that failed during one relayout
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PipelineReport {
    pub failures: Vec<(Stage, String)>,
}

impl PipelineReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, stage: Stage) -> bool {
        self.failures.iter().any(|(s, _)| *s == stage)
    }
}

/// Run `stages` in order through `run`, isolating each one
pub fn run_pipeline<F>(stages: &[Stage], mut run: F) -> PipelineReport
where
    F: FnMut(Stage) -> Result<()>,
{
    let mut report = PipelineReport::default();
    for &stage in stages {
        if let Err(e) = run(stage) {
            error!(stage = %stage, "Slider relayout stage failed: {}", e);
            report.failures.push((stage, e.to_string()));
        }
    }
    if report.is_clean() {
        debug!(stages = stages.len(), "Slider relayout complete");
    }
    report
}

/// One step of the orientation relayout
///
/// Each step runs on its own tick so the host can reflow before the next
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationStep {
    Width,
    Height,
    ScrollAndTabs,
}

impl OrientationStep {
    pub fn first() -> Self {
        OrientationStep::Width
    }

    pub fn stages(self) -> &'static [Stage] {
        match self {
            OrientationStep::Width => &[Stage::Width],
            OrientationStep::Height => &[Stage::Height],
            OrientationStep::ScrollAndTabs => &[Stage::Scroll, Stage::Tabs],
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            OrientationStep::Width => Some(OrientationStep::Height),
            OrientationStep::Height => Some(OrientationStep::ScrollAndTabs),
            OrientationStep::ScrollAndTabs => None,
        }
    }
}
