//! Sequential batch processing over a list of mod IDs

use crate::resolver::Resolver;
use modget_types::{BatchReport, ModId, ModOutcome};
use std::path::Path;
use tracing::{error, info};

/// How a batch reacts to failures
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Continue with the next ID after a fatal error instead of aborting
    pub keep_going: bool,
    /// Resolve CDN URLs without downloading
    pub dry_run: bool,
}

/// Progress notifications emitted while a batch runs
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    Started {
        index: usize,
        total: usize,
        mod_id: &'a ModId,
    },
    Finished {
        index: usize,
        total: usize,
        outcome: &'a ModOutcome,
    },
}

impl Resolver {
    /// Process every ID in order and collect a report
    pub async fn run_batch(
        &self,
        mod_ids: &[ModId],
        output_dir: &Path,
        options: BatchOptions,
    ) -> BatchReport {
        self.run_batch_with(mod_ids, output_dir, options, |_| {}).await
    }

    /// Same as [`Resolver::run_batch`], reporting progress to `on_event`
    pub async fn run_batch_with<F>(
        &self,
        mod_ids: &[ModId],
        output_dir: &Path,
        options: BatchOptions,
        mut on_event: F,
    ) -> BatchReport
    where
        F: FnMut(BatchEvent<'_>),
    {
        let mut report = BatchReport::new();
        let total = mod_ids.len();

        for (index, mod_id) in mod_ids.iter().enumerate() {
            on_event(BatchEvent::Started {
                index,
                total,
                mod_id,
            });

            let abort = match self.fetch_mod(mod_id, output_dir, options.dry_run).await {
                Ok(outcome) => {
                    report.push(outcome);
                    false
                }
                Err(e) => {
                    error!("Mod {} failed: {}", mod_id, e);
                    if e.is_parse_error() {
                        error!("The lookup page layout may have changed");
                    }
                    report.push(ModOutcome::failed(mod_id.clone(), e.to_string()));
                    e.is_fatal() && !options.keep_going
                }
            };

            if let Some(outcome) = report.outcomes.last() {
                on_event(BatchEvent::Finished {
                    index,
                    total,
                    outcome,
                });
            }

            if abort {
                error!("Aborting after {} of {} mods", index + 1, total);
                report.aborted = true;
                break;
            }
        }

        report.finish();
        info!("Batch finished: {}", report);
        report
    }
}
