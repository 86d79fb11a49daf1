use indicatif::{ProgressBar, ProgressStyle};

/// A file-count progress bar, hidden when stderr is not a terminal.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{wide_bar:.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    pub fn tick(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.inc(1);
    }

    pub fn finish_ok(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn finish_err(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
