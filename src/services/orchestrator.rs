//! Top-level build driver.
//!
//! Resolves one platform's effective configuration, wraps the backend
//! invocation in a symbol transaction, interprets the report, and optionally
//! reveals the output location. Batches run strictly sequentially and halt
//! on the first failed report; the define store and the backend share
//! process-wide state, so single-flight execution is a correctness
//! requirement, not a simplification.

use crate::models::{BuildOutcome, BuildReport, BuildTarget, GlobalSettings, ProductInfo};
use crate::services::backend::BuildBackend;
use crate::services::reveal::Revealer;
use crate::services::symbols::{DefineStore, SymbolTransaction};
use crate::services::{paths, resolve};
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

pub struct BuildOrchestrator<B, D, R> {
    backend: B,
    defines: D,
    revealer: R,
    project_root: Utf8PathBuf,
    product: ProductInfo,
}

impl<B, D, R> BuildOrchestrator<B, D, R>
where
    B: BuildBackend,
    D: DefineStore,
    R: Revealer,
{
    pub fn new(
        backend: B,
        defines: D,
        revealer: R,
        project_root: Utf8PathBuf,
        product: ProductInfo,
    ) -> Self {
        Self {
            backend,
            defines,
            revealer,
            project_root,
            product,
        }
    }

    /// Build a single platform.
    ///
    /// On success, reveals the output location when the settings ask for it
    /// and this is not an auto-run build (the player is already launching).
    pub async fn build_one(
        &mut self,
        settings: &GlobalSettings,
        target: BuildTarget,
        auto_run: bool,
    ) -> Result<BuildReport> {
        let report = self.build_platform(settings, target, auto_run).await?;

        if report.outcome == BuildOutcome::Succeeded && settings.open_build_folder && !auto_run {
            self.revealer.reveal(&report.output_path)?;
        }

        Ok(report)
    }

    /// Build the given platforms in order, halting on the first failed
    /// report. The sequence order is an implicit priority order.
    ///
    /// On full success, reveals the output-folder root exactly once rather
    /// than one per-product subfolder per platform. A mid-batch failure
    /// leaves earlier outputs in place; there is no rollback and no retry.
    pub async fn build_all(
        &mut self,
        settings: &GlobalSettings,
        targets: &[BuildTarget],
    ) -> Result<()> {
        let mut last_report = None;

        for &target in targets {
            let report = self.build_platform(settings, target, false).await?;
            if report.outcome == BuildOutcome::Failed {
                return Ok(());
            }
            last_report = Some(report);
        }

        if settings.open_build_folder {
            if let Some(report) = last_report {
                let root = self.output_folder_root(settings, &report.output_path);
                self.revealer.reveal(&root)?;
            }
        }

        Ok(())
    }

    /// Resolve, wrap in a symbol transaction, invoke the backend, restore,
    /// log one summary line. Restoration runs on every exit path before the
    /// result is reported to the caller.
    async fn build_platform(
        &mut self,
        settings: &GlobalSettings,
        target: BuildTarget,
        auto_run: bool,
    ) -> Result<BuildReport> {
        let platform = resolve::get_or_default_platform(settings, target);
        let config = resolve::resolve_effective_config(
            settings,
            &platform,
            &self.product,
            &self.project_root,
            auto_run,
        );

        let txn = SymbolTransaction::begin(
            &mut self.defines,
            config.group,
            &platform.additional_symbols,
        )?;

        let invoked = self.backend.invoke(&config).await;
        let restored = txn.end(&mut self.defines);

        let report = match invoked {
            Ok(report) => report,
            Err(err) => {
                if let Err(restore_err) = restored {
                    tracing::error!(
                        "Failed to restore defines for {} after backend error: {:#}",
                        config.group,
                        restore_err
                    );
                }
                return Err(err);
            }
        };
        restored?;

        if report.outcome == BuildOutcome::Succeeded {
            tracing::info!(
                "{} build completed in {:.2}s with a result of {}",
                target,
                report.elapsed.as_secs_f32(),
                report.outcome
            );
        } else {
            tracing::error!(
                "{} build completed in {:.2}s with a result of {} ({} errors)",
                target,
                report.elapsed.as_secs_f32(),
                report.outcome,
                report.total_errors
            );
        }

        Ok(report)
    }

    /// Truncate an output path down to the component depth of the resolved
    /// output folder, yielding the folder root shared by all platforms.
    fn output_folder_root(&self, settings: &GlobalSettings, output_path: &Utf8Path) -> Utf8PathBuf {
        let folder = paths::resolve_output_folder(&settings.output_folder, &self.project_root);
        let depth = folder.components().count();
        output_path.components().take(depth).collect()
    }
}
