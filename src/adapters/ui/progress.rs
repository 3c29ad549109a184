//! Cosmetic analysis progress bar. Not tied to backend progress: +10% every 200ms,
//! parks at 90%, jumps to 100% when the analysis finishes.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_millis(200);
const STEP: u64 = 10;
const CEILING: u64 = 90;

/// Next simulated position.
pub fn next_position(current: u64) -> u64 {
    if current < CEILING {
        (current + STEP).min(CEILING)
    } else {
        current
    }
}

pub struct AnalysisProgress {
    bar: ProgressBar,
    ticker: JoinHandle<()>,
}

impl AnalysisProgress {
    /// Draw a bar on stderr and start ticking.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self::with_bar(bar, message)
    }

    pub fn with_bar(bar: ProgressBar, message: &str) -> Self {
        bar.set_message(message.to_string());
        let ticking = bar.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            interval.tick().await;
            loop {
                interval.tick().await;
                let pos = ticking.position();
                let next = next_position(pos);
                if next == pos {
                    break;
                }
                ticking.set_position(next);
            }
        });
        Self { bar, ticker }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Jump to 100% and leave the bar on screen.
    pub fn finish(self, message: &str) {
        self.ticker.abort();
        self.bar.set_position(100);
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop where it is.
    pub fn abandon(self, message: &str) {
        self.ticker.abort();
        self.bar.abandon_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_position_parks_at_ninety() {
        let mut pos = 0;
        let mut seen = Vec::new();
        for _ in 0..12 {
            pos = next_position(pos);
            seen.push(pos);
        }
        assert_eq!(&seen[..3], &[10, 20, 30]);
        assert_eq!(*seen.last().unwrap(), 90);
        assert_eq!(next_position(95), 95);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_ticks_then_finishes() {
        let progress = AnalysisProgress::with_bar(ProgressBar::hidden(), "Analyzing Document...");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(progress.position(), 20);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(progress.position(), 90);

        let bar = progress.bar.clone();
        progress.finish("done");
        assert_eq!(bar.position(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandon_keeps_position() {
        let progress = AnalysisProgress::with_bar(ProgressBar::hidden(), "Analyzing Document...");
        tokio::time::sleep(Duration::from_millis(700)).await;
        let bar = progress.bar.clone();
        progress.abandon("stopped");
        assert_eq!(bar.position(), 30);
    }
}
