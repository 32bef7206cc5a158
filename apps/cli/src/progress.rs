//! Progress bar for a batch run

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use modget_core::BatchEvent;
use modget_types::OutcomeStatus;

/// One bar counting processed mod IDs
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let progress_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");
        bar.set_style(progress_style);
        Self { bar }
    }

    /// A bar that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn handle_event(&self, event: BatchEvent<'_>) {
        match event {
            BatchEvent::Started { mod_id, .. } => {
                self.bar.set_message(format!("{}", style(mod_id).cyan()));
            }
            BatchEvent::Finished { outcome, .. } => {
                let marker = match outcome.status {
                    OutcomeStatus::Downloaded | OutcomeStatus::Resolved => style("✓").green(),
                    OutcomeStatus::Skipped => style("-").yellow(),
                    OutcomeStatus::Failed => style("✗").red(),
                };
                self.bar.set_message(format!("{} {}", marker, outcome.mod_id));
                self.bar.inc(1);
            }
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
