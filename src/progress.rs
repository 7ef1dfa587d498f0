use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while a check runs. Hidden when stderr is not a terminal.
pub fn check_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} [{elapsed}] {msg}")
            .expect("invalid spinner template"),
    );
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish with a tally of the results the check recorded.
pub fn finish_check(pb: &ProgressBar, label: &str, passed: usize, recorded: usize) {
    let mark = if passed == recorded { "✓" } else { "✗" };
    pb.finish_with_message(format!("{mark} {label} ({passed}/{recorded})"));
}
