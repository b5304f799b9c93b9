use std::time::Duration;

/// Characters per "word" when converting keystrokes to words per minute
pub const CHARS_PER_WORD: f64 = 5.0;

/// Per-run keystroke counters, only ever increased by the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub correct: u32,
    pub incorrect: u32,
    pub missed: u32,
    pub extra: u32,
}

impl Counters {
    pub fn total(&self) -> u64 {
        [self.correct, self.incorrect, self.missed, self.extra]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

/// Adds `n` to a counter, pinning at `u32::MAX` instead of wrapping.
pub fn add_count(counter: u32, n: usize) -> u32 {
    counter.saturating_add(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Counters plus the time the session spent running
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub counters: Counters,
    pub active_time: Duration,
}

impl Stats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, dt: Duration) {
        self.active_time += dt;
    }

    pub fn wpm(&self) -> f64 {
        wpm(self.counters.correct, self.active_time)
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(&self.counters)
    }
}

/// Correct characters per minute over five. Zero when no time has elapsed.
pub fn wpm(correct: u32, active_time: Duration) -> f64 {
    let secs = active_time.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }

    (correct as f64 / CHARS_PER_WORD) / (secs / 60.0)
}

/// Share of correct keystrokes among all classified ones, as a percentage.
pub fn accuracy(counters: &Counters) -> f64 {
    let total = counters.total();
    if total == 0 {
        return 0.0;
    }

    counters.correct as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_count_saturates() {
        assert_eq!(add_count(2, 3), 5);
        assert_eq!(add_count(u32::MAX - 1, 5), u32::MAX);
        assert_eq!(add_count(0, usize::MAX), u32::MAX);
    }

    #[test]
    fn test_total_does_not_overflow() {
        let counters = Counters {
            correct: u32::MAX,
            incorrect: u32::MAX,
            missed: 1,
            extra: 0,
        };
        assert_eq!(counters.total(), 2 * u64::from(u32::MAX) + 1);
        assert!(accuracy(&counters) < 50.0);
    }

    #[test]
    fn test_wpm_zero_time() {
        assert_eq!(wpm(100, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_wpm_one_minute() {
        // 250 correct chars in 60s = 50 words
        assert_eq!(wpm(250, Duration::from_secs(60)), 50.0);
    }

    #[test]
    fn test_wpm_half_minute() {
        assert_eq!(wpm(50, Duration::from_secs(30)), 20.0);
    }

    #[test]
    fn test_accuracy_empty() {
        assert_eq!(accuracy(&Counters::default()), 0.0);
    }

    #[test]
    fn test_accuracy_counts_every_category() {
        let counters = Counters {
            correct: 6,
            incorrect: 1,
            missed: 2,
            extra: 1,
        };
        assert_eq!(accuracy(&counters), 60.0);
    }

    #[test]
    fn test_accuracy_perfect() {
        let counters = Counters {
            correct: 12,
            ..Counters::default()
        };
        assert_eq!(accuracy(&counters), 100.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = Stats::default();
        stats.counters.correct = 3;
        stats.advance(Duration::from_millis(500));
        stats.reset();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_stats_bounds() {
        let stats = Stats {
            counters: Counters {
                correct: 40,
                incorrect: 3,
                missed: 1,
                extra: 0,
            },
            active_time: Duration::from_secs(12),
        };
        assert!(stats.wpm() >= 0.0);
        assert!((0.0..=100.0).contains(&stats.accuracy()));
    }
}
