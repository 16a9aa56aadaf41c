/// Run timer shown in the HUD.
///
/// Times are milliseconds from the same monotonic source the game clock uses.
/// Paused time does not count towards a run.
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    /// Play time banked before the current unpaused stretch
    banked_ms: u64,
    /// Start of the current unpaused stretch, if the run is ticking
    running_since: Option<u64>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_start(&mut self, now_ms: u64) {
        self.banked_ms = 0;
        self.running_since = Some(now_ms);
    }

    pub fn on_pause(&mut self, now_ms: u64) {
        if let Some(since) = self.running_since.take() {
            self.banked_ms += now_ms.saturating_sub(since);
        }
    }

    pub fn on_resume(&mut self, now_ms: u64) {
        if self.running_since.is_none() {
            self.running_since = Some(now_ms);
        }
    }

    pub fn on_game_over(&mut self, now_ms: u64) {
        self.on_pause(now_ms);
    }

    /// Play time of the current (or last) run
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let live = self
            .running_since
            .map(|since| now_ms.saturating_sub(since))
            .unwrap_or(0);
        self.banked_ms + live
    }

    pub fn format_time(&self, now_ms: u64) -> String {
        let total_secs = self.elapsed_ms(now_ms) / 1000;
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(0);

        assert_eq!(metrics.format_time(125_000), "02:05");
        assert_eq!(metrics.format_time(999), "00:00");
        assert_eq!(metrics.format_time(3_661_000), "61:01");
    }

    #[test]
    fn test_paused_time_is_excluded() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(1_000);
        metrics.on_pause(11_000);
        assert_eq!(metrics.elapsed_ms(500_000), 10_000);

        metrics.on_resume(500_000);
        assert_eq!(metrics.elapsed_ms(505_000), 15_000);
    }

    #[test]
    fn test_time_freezes_at_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(200);
        metrics.on_game_over(300);
        assert_eq!(metrics.elapsed_ms(10_000), 100);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(0);
        metrics.on_game_over(50_000);

        metrics.on_game_start(60_000);
        assert_eq!(metrics.elapsed_ms(60_010), 10);
    }
}
