//! Build backend seam.
//!
//! The orchestrator only knows the [`BuildBackend`] trait; the backend is an
//! opaque collaborator handed a fully resolved configuration and returning a
//! pass/fail report. [`CommandBackend`] is the stock implementation that
//! shells out to a builder program.

use crate::models::{BuildOutcome, BuildReport};
use crate::services::resolve::EffectiveConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use regex::Regex;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// External build backend invoked with one effective configuration.
///
/// Backend failure is reported through [`BuildReport::outcome`], never as an
/// `Err`; `Err` is reserved for the invocation itself going wrong (spawn
/// failure and the like).
#[async_trait]
pub trait BuildBackend {
    async fn invoke(&self, config: &EffectiveConfig) -> Result<BuildReport>;
}

/// Backend that runs a configured builder program as a subprocess.
///
/// The program receives the resolved target, output path, scene list and
/// option flags as arguments. Exit status maps to the report outcome and
/// error lines are counted from captured stderr.
pub struct CommandBackend {
    program: Utf8PathBuf,

    /// Matches one diagnostic line in backend stderr output.
    error_pattern: Regex,
}

impl CommandBackend {
    pub fn new<P: Into<Utf8PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            error_pattern: Regex::new(r"(?i)\berror\b").expect("Invalid error regex"),
        }
    }

    fn count_errors(&self, stderr: &str) -> usize {
        stderr
            .lines()
            .filter(|line| self.error_pattern.is_match(line))
            .count()
    }
}

#[async_trait]
impl BuildBackend for CommandBackend {
    async fn invoke(&self, config: &EffectiveConfig) -> Result<BuildReport> {
        let mut cmd = Command::new(self.program.as_str());
        cmd.arg("--target")
            .arg(config.target.name())
            .arg("--output")
            .arg(config.output_path.as_str());
        for scene in &config.scenes {
            cmd.arg("--scene").arg(scene);
        }
        if config.options.development {
            cmd.arg("--development");
        }
        if config.options.auto_run {
            cmd.arg("--run");
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        tracing::info!("Invoking build backend: {} ({})", self.program, config.target);

        let start = Instant::now();
        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to run build backend: {}", self.program))?;
        let elapsed = start.elapsed();

        let outcome = if output.status.success() {
            BuildOutcome::Succeeded
        } else if output.status.code().is_none() {
            // Terminated by signal rather than exiting.
            BuildOutcome::Cancelled
        } else {
            BuildOutcome::Failed
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        let total_errors = self.count_errors(&stderr);

        Ok(BuildReport {
            outcome,
            output_path: config.output_path.clone(),
            elapsed,
            total_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuildTarget, GlobalSettings, PlatformSpec, ProductInfo};
    use crate::services::resolve;
    use camino::Utf8Path;

    fn sample_config() -> EffectiveConfig {
        let settings = GlobalSettings::default();
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        resolve::resolve_effective_config(
            &settings,
            &platform,
            &ProductInfo::default(),
            Utf8Path::new("/proj"),
            false,
        )
    }

    #[test]
    fn test_count_errors() {
        let backend = CommandBackend::new("builder");
        let stderr = "warning: something\n\
                      error: bad scene\n\
                      note: detail\n\
                      Shader Error in 'Custom/Water'\n\
                      done";
        assert_eq!(backend.count_errors(stderr), 2);
        assert_eq!(backend.count_errors(""), 0);
    }

    #[tokio::test]
    async fn test_invoke_missing_program_is_invocation_error() {
        let backend = CommandBackend::new("/nonexistent/buildforge-backend");
        let result = backend.invoke(&sample_config()).await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invoke_maps_exit_status() {
        // `false` exits non-zero without reading its arguments.
        let backend = CommandBackend::new("false");
        let report = backend.invoke(&sample_config()).await.unwrap();
        assert_eq!(report.outcome, BuildOutcome::Failed);

        let backend = CommandBackend::new("true");
        let report = backend.invoke(&sample_config()).await.unwrap();
        assert_eq!(report.outcome, BuildOutcome::Succeeded);
        assert_eq!(report.output_path, sample_config().output_path);
    }
}
