use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock budget for one synthesis run.
pub const DEFAULT_SYNTH_TIMEOUT: Duration = Duration::from_secs(300);

/// Knobs for one synthesis invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynthConfig {
    /// Pass `-flatten` to `synth`.
    pub flatten: bool,
    /// Explicit top module; Yosys auto-detects when unset.
    pub top: Option<String>,
    /// Extra passes run after `synth` and before `write_json`.
    pub extra_steps: Vec<String>,
    /// Kill the tool after this long. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Keep reports in this directory instead of a temporary file.
    pub keep_reports: Option<PathBuf>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            flatten: false,
            top: None,
            extra_steps: Vec::new(),
            timeout: Some(DEFAULT_SYNTH_TIMEOUT),
            keep_reports: None,
        }
    }
}

impl SynthConfig {
    /// Defaults: no flattening, no top, 300 s timeout, temporary reports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens the hierarchy during synthesis.
    #[must_use]
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Names the top module.
    #[must_use]
    pub fn with_top(mut self, top: &str) -> Self {
        self.top = Some(top.to_string());
        self
    }

    /// Appends a Yosys pass after `synth`.
    #[must_use]
    pub fn with_step(mut self, step: &str) -> Self {
        self.extra_steps.push(step.to_string());
        self
    }

    /// Kills Yosys after `timeout`; `None` waits forever.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keeps reports in `dir` instead of temporary files.
    #[must_use]
    pub fn with_keep_reports(mut self, dir: PathBuf) -> Self {
        self.keep_reports = Some(dir);
        self
    }
}
