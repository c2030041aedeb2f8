// common/src/spinner.rs
use indicatif::{ProgressBar, ProgressStyle};
use std::{future::Future, io::IsTerminal, time::Duration};

/// Runs `fut` while showing a spinner with `msg`, then clears the line.
/// Only draws when stderr is a TTY.
pub async fn with_spinner<Fut, T>(msg: impl Into<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    let pb = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(msg.into());
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    // clear the spinner line on exit, success or error
    struct Guard(Option<ProgressBar>);
    impl Drop for Guard {
        fn drop(&mut self) {
            if let Some(pb) = self.0.take() {
                pb.finish_and_clear();
            }
        }
    }
    let _g = Guard(pb);

    fut.await
}
