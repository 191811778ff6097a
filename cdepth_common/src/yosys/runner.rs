use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::yosys::{DesignPath, SynthConfig, SynthError, SynthReport, Synthesizer};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs `yosys` as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct YosysSynthesizer {
    yosys: PathBuf,
    config: SynthConfig,
}

impl YosysSynthesizer {
    /// Uses the first `yosys` on `PATH`.
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        let yosys = which::which("yosys").map_err(|e| SynthError::YosysNotFound(e.to_string()))?;
        Ok(Self { yosys, config })
    }

    /// Uses an explicit binary.
    pub fn with_binary<P: AsRef<Path>>(yosys: P, config: SynthConfig) -> Result<Self, SynthError> {
        let yosys = yosys.as_ref().to_path_buf();
        if !yosys.exists() {
            return Err(SynthError::YosysNotFound(format!(
                "Yosys binary not found at: {}",
                yosys.display()
            )));
        }
        Ok(Self { yosys, config })
    }

    /// The binary this synthesizer invokes.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.yosys
    }

    /// The configuration this synthesizer runs with.
    #[must_use]
    pub const fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Builds the argument list: read the design, run generic synthesis, write JSON.
    #[must_use]
    pub fn build_args(&self, design: &DesignPath, json_out: &Path) -> Vec<String> {
        let mut args = vec!["-q".to_string()];

        // Read command
        args.push("-p".to_string());
        args.push(format!(
            "{} {}",
            design.read_command(),
            quoted(design.path())
        ));

        // Synthesis
        let mut synth = "synth".to_string();
        if let Some(top) = &self.config.top {
            synth.push_str(&format!(" -top {top}"));
        }
        if self.config.flatten {
            synth.push_str(" -flatten");
        }
        args.push("-p".to_string());
        args.push(synth);

        // Other steps
        for step in &self.config.extra_steps {
            args.push("-p".to_string());
            args.push(step.clone());
        }

        // Write output
        args.push("-p".to_string());
        args.push(format!("write_json {}", quoted(json_out)));

        args
    }

    fn report_target(&self, source: &Path) -> Result<SynthReport, SynthError> {
        match &self.config.keep_reports {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let file_name = source
                    .file_name()
                    .map_or_else(|| "design".into(), |name| name.to_string_lossy());
                let hash = path_hash(source);
                let path = dir.join(format!("{file_name}_{hash:016x}_yosys.json"));
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
                Ok(SynthReport::persistent(path))
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix("cdepth_")
                    .suffix(".json")
                    .rand_bytes(4)
                    .tempfile()?
                    .into_temp_path();
                Ok(SynthReport::temporary(temp))
            }
        }
    }

    fn run_yosys_command(&self, args: Vec<String>) -> Result<(), SynthError> {
        let mut child = Command::new(&self.yosys)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain stderr on a side thread so a chatty tool cannot fill the pipe.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                buf
            })
        });

        let status = match self.config.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout)?,
            None => child.wait()?,
        };

        if !status.success() {
            let stderr = stderr_reader
                .and_then(|reader| reader.join().ok())
                .unwrap_or_default();
            error!("Yosys failed: status={:?}\n{}", status, stderr);
            return Err(SynthError::Failed {
                status: status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}

/// Wraps a path in double quotes so the Yosys command parser keeps it as one word.
fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Distinguishes kept reports of same-named sources in different directories.
fn path_hash(source: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, SynthError> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            error!("Yosys timed out after {:?}", timeout);
            return Err(SynthError::TimedOut(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn report_written(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.len() > 0)
}

impl Synthesizer for YosysSynthesizer {
    fn synthesize(&self, source: &Path) -> Result<SynthReport, SynthError> {
        if !source.exists() {
            return Err(SynthError::MissingSource(source.to_path_buf()));
        }
        let design = DesignPath::new(source.to_path_buf()).map_err(SynthError::UnsupportedDesign)?;

        let report = self.report_target(source)?;
        let args = self.build_args(&design, report.path());
        debug!("running {} {:?}", self.yosys.display(), args);
        self.run_yosys_command(args)?;

        if !report_written(report.path()) {
            error!(
                "Yosys report file '{}' was not generated",
                report.path().display()
            );
            return Err(SynthError::MissingOutput(report.path().to_path_buf()));
        }

        Ok(report)
    }
}
