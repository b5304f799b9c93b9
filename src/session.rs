use crate::error::{Result, WordedError};
use crate::stats::{add_count, Stats};
use crate::word_bank::{Word, WordBank};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Last character of the last word was typed
    Completed,
    /// User quit before completing
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Paused,
    Running,
    Finished(FinishReason),
}

/// Commands understood by the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Type(char),
    Boundary,
    Erase,
    Pause,
    Restart,
    Quit,
}

impl SessionEvent {
    /// Whether this event starts the clock when the session is paused.
    fn resumes(&self) -> bool {
        matches!(self, SessionEvent::Type(_) | SessionEvent::Boundary)
    }
}

/// Position of the user within the run: which word, and how many chars typed in it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub word: usize,
    pub offset: usize,
}

/// One typing run: the target words, what was typed for each, and the counters.
///
/// Words before `cursor.word` are frozen, words after it are untouched and
/// `typed[cursor.word].len() == cursor.offset` at all times.
#[derive(Debug, Clone)]
pub struct Session {
    targets: Vec<Word>,
    typed: Vec<Vec<char>>,
    cursor: Cursor,
    state: SessionState,
    stats: Stats,
    word_max: usize,
}

impl Session {
    pub fn new(targets: Vec<Word>, word_max: usize) -> Result<Self> {
        if word_max < 2 {
            return Err(WordedError::Config(format!(
                "word_max must be at least 2, got {word_max}"
            )));
        }
        check_targets(&targets, word_max)?;

        let typed = targets
            .iter()
            .map(|_| Vec::with_capacity(word_max))
            .collect();

        Ok(Self {
            targets,
            typed,
            cursor: Cursor::default(),
            state: SessionState::Paused,
            stats: Stats::default(),
            word_max,
        })
    }

    pub fn from_bank(bank: &WordBank, word_count: usize, seed: u64, word_max: usize) -> Result<Self> {
        Self::new(bank.sample(word_count, seed), word_max)
    }

    /// Feeds one event through the state machine.
    pub fn classify(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Quit => self.transition(SessionState::Finished(FinishReason::Aborted)),
            SessionEvent::Restart => self.restart(),
            SessionEvent::Pause => {
                if self.state == SessionState::Running {
                    self.transition(SessionState::Paused);
                }
            }
            SessionEvent::Type(_) | SessionEvent::Boundary | SessionEvent::Erase => {
                if self.state == SessionState::Paused && event.resumes() {
                    self.transition(SessionState::Running);
                }
                if self.state != SessionState::Running {
                    return;
                }

                match event {
                    SessionEvent::Type(c) => self.type_char(c),
                    SessionEvent::Boundary => self.boundary(),
                    SessionEvent::Erase => self.erase(),
                    _ => {}
                }
            }
        }
    }

    fn type_char(&mut self, c: char) {
        if self.cursor.offset >= self.word_max - 1 {
            return;
        }

        let target = &self.targets[self.cursor.word];
        let target_len = target.len();
        if target.get(self.cursor.offset) == Some(c) {
            self.stats.counters.correct = add_count(self.stats.counters.correct, 1);
        } else {
            self.stats.counters.incorrect = add_count(self.stats.counters.incorrect, 1);
        }

        self.typed[self.cursor.word].push(c);
        self.cursor.offset += 1;

        if self.is_last_word() && self.cursor.offset >= target_len {
            self.transition(SessionState::Finished(FinishReason::Completed));
        }
    }

    fn boundary(&mut self) {
        let offset = self.cursor.offset;
        if offset == 0 {
            return;
        }

        let target_len = self.targets[self.cursor.word].len();
        let counters = &mut self.stats.counters;
        if offset < target_len {
            counters.missed = add_count(counters.missed, target_len - offset);
        } else {
            counters.extra = add_count(counters.extra, offset - target_len);
        }

        if !self.is_last_word() {
            self.cursor.word += 1;
            self.cursor.offset = 0;
        }
    }

    fn erase(&mut self) {
        if self.cursor.offset == 0 {
            return;
        }

        self.typed[self.cursor.word].pop();
        self.cursor.offset -= 1;
    }

    /// Back to the first word with empty buffers and zeroed stats. Targets are kept.
    pub fn restart(&mut self) {
        self.typed.iter_mut().for_each(Vec::clear);
        self.cursor = Cursor::default();
        self.stats.reset();
        self.transition(SessionState::Paused);
    }

    /// Swaps in a new set of targets and restarts.
    pub fn resample(&mut self, targets: Vec<Word>) -> Result<()> {
        check_targets(&targets, self.word_max)?;

        self.typed = targets
            .iter()
            .map(|_| Vec::with_capacity(self.word_max))
            .collect();
        self.targets = targets;
        self.restart();
        Ok(())
    }

    /// Accumulates running time. Ignored unless the session is running.
    pub fn add_active_time(&mut self, dt: Duration) {
        if self.state == SessionState::Running {
            self.stats.advance(dt);
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::debug!("session {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn is_last_word(&self) -> bool {
        self.cursor.word + 1 == self.targets.len()
    }

    pub fn targets(&self) -> &[Word] {
        &self.targets
    }

    pub fn typed(&self, word: usize) -> &[char] {
        &self.typed[word]
    }

    pub fn current_target(&self) -> &Word {
        &self.targets[self.cursor.word]
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn word_max(&self) -> usize {
        self.word_max
    }

    pub fn word_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }
}

/// Every target must be completable: non-empty and shorter than `word_max`.
fn check_targets(targets: &[Word], word_max: usize) -> Result<()> {
    if targets.is_empty() {
        return Err(WordedError::Config(
            "a session needs at least one word".to_string(),
        ));
    }
    if let Some(word) = targets
        .iter()
        .find(|w| w.is_empty() || w.len() >= word_max)
    {
        return Err(WordedError::Config(format!(
            "target '{word}' must be between 1 and {} chars long",
            word_max - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Counters;

    fn session(words: &[&str]) -> Session {
        Session::new(words.iter().map(|w| Word::new(w)).collect(), 40).unwrap()
    }

    fn type_str(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.classify(SessionEvent::Type(c));
        }
    }

    fn assert_invariants(session: &Session) {
        let cursor = session.cursor();
        assert_eq!(session.typed(cursor.word).len(), cursor.offset);
        for i in cursor.word + 1..session.word_count() {
            assert!(session.typed(i).is_empty(), "word {i} should be empty");
        }
        assert!(cursor.offset < session.word_max());
    }

    #[test]
    fn test_new_rejects_empty_targets() {
        assert!(Session::new(vec![], 40).is_err());
    }

    #[test]
    fn test_starts_paused() {
        let s = session(&["cat"]);
        assert_eq!(s.state(), SessionState::Paused);
        assert_eq!(s.cursor(), Cursor::default());
    }

    #[test]
    fn test_typing_resumes() {
        let mut s = session(&["cat", "dog"]);
        s.classify(SessionEvent::Type('c'));
        assert!(s.is_running());
        assert_eq!(s.stats().counters.correct, 1);
    }

    #[test]
    fn test_erase_while_paused_is_ignored() {
        let mut s = session(&["cat", "dog"]);
        s.classify(SessionEvent::Erase);
        assert!(s.is_paused());
    }

    #[test]
    fn test_exact_word_then_boundary() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "cat");
        s.classify(SessionEvent::Boundary);
        assert_eq!(
            s.stats().counters,
            Counters {
                correct: 3,
                ..Counters::default()
            }
        );
        assert_eq!(s.cursor(), Cursor { word: 1, offset: 0 });
        assert_invariants(&s);
    }

    #[test]
    fn test_wrong_char_then_boundary() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "cad");
        s.classify(SessionEvent::Boundary);
        assert_eq!(
            s.stats().counters,
            Counters {
                correct: 2,
                incorrect: 1,
                ..Counters::default()
            }
        );
    }

    #[test]
    fn test_boundary_on_empty_buffer_is_noop() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "c");
        s.classify(SessionEvent::Erase);
        s.classify(SessionEvent::Boundary);
        assert_eq!(s.cursor(), Cursor { word: 0, offset: 0 });
        assert_eq!(s.stats().counters.missed, 0);
        assert_eq!(s.stats().counters.extra, 0);
    }

    #[test]
    fn test_short_word_counts_missed() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "ca");
        s.classify(SessionEvent::Boundary);
        assert_eq!(s.stats().counters.missed, 1);
        assert_eq!(s.cursor().word, 1);
    }

    #[test]
    fn test_overflow_counts_incorrect_then_extra() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "caterpillar");
        s.classify(SessionEvent::Boundary);
        let c = s.stats().counters;
        assert_eq!(c.correct, 3);
        assert_eq!(c.incorrect, 8);
        assert_eq!(c.extra, 8);
        assert_eq!(c.missed, 0);
    }

    #[test]
    fn test_boundary_on_last_word_does_not_advance() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "cat");
        s.classify(SessionEvent::Boundary);
        type_str(&mut s, "do");
        s.classify(SessionEvent::Boundary);
        assert_eq!(s.cursor(), Cursor { word: 1, offset: 2 });
        assert_eq!(s.stats().counters.missed, 1);
        assert!(s.is_running());
    }

    #[test]
    fn test_single_word_completes_without_boundary() {
        let mut s = session(&["cat"]);
        type_str(&mut s, "ca");
        assert!(s.is_running());
        s.classify(SessionEvent::Type('t'));
        assert_eq!(s.state(), SessionState::Finished(FinishReason::Completed));
    }

    #[test]
    fn test_completion_counts_length_not_correctness() {
        let mut s = session(&["ab"]);
        type_str(&mut s, "xy");
        assert_eq!(s.state(), SessionState::Finished(FinishReason::Completed));
        assert_eq!(s.stats().counters.incorrect, 2);
    }

    #[test]
    fn test_input_ignored_after_finish() {
        let mut s = session(&["a"]);
        type_str(&mut s, "a");
        type_str(&mut s, "bc");
        s.classify(SessionEvent::Pause);
        assert_eq!(s.stats().counters.correct, 1);
        assert_eq!(s.stats().counters.incorrect, 0);
        assert!(s.is_finished());
    }

    #[test]
    fn test_erase_stays_within_word() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "cat");
        s.classify(SessionEvent::Boundary);
        s.classify(SessionEvent::Type('d'));
        s.classify(SessionEvent::Erase);
        s.classify(SessionEvent::Erase);
        assert_eq!(s.cursor(), Cursor { word: 1, offset: 0 });
        assert_eq!(s.typed(0), &['c', 'a', 't']);
        // counters are never decremented
        assert_eq!(s.stats().counters.correct, 4);
    }

    #[test]
    fn test_typing_stops_at_word_max() {
        let mut s = Session::new(vec![Word::new("ab"), Word::new("cd")], 4).unwrap();
        type_str(&mut s, "abxyz");
        assert_eq!(s.cursor().offset, 3);
        assert_eq!(s.stats().counters.total(), 3);
        assert_invariants(&s);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "ca");
        s.classify(SessionEvent::Pause);
        let before = (s.state(), s.stats().counters, s.cursor());
        s.classify(SessionEvent::Pause);
        assert_eq!((s.state(), s.stats().counters, s.cursor()), before);
        assert!(s.is_paused());
    }

    #[test]
    fn test_active_time_only_while_running() {
        let mut s = session(&["cat", "dog"]);
        s.add_active_time(Duration::from_secs(1));
        assert_eq!(s.stats().active_time, Duration::ZERO);

        s.classify(SessionEvent::Type('c'));
        s.add_active_time(Duration::from_millis(250));
        s.classify(SessionEvent::Pause);
        s.add_active_time(Duration::from_secs(5));
        assert_eq!(s.stats().active_time, Duration::from_millis(250));
    }

    #[test]
    fn test_restart_resets_everything_but_targets() {
        let mut s = session(&["cat", "dog", "emu"]);
        let targets = s.targets().to_vec();
        type_str(&mut s, "cat");
        s.classify(SessionEvent::Boundary);
        type_str(&mut s, "dx");
        s.add_active_time(Duration::from_secs(2));

        s.classify(SessionEvent::Restart);

        assert!(s.is_paused());
        assert_eq!(s.cursor(), Cursor::default());
        assert_eq!(*s.stats(), Stats::default());
        assert!((0..s.word_count()).all(|i| s.typed(i).is_empty()));
        assert_eq!(s.targets(), targets.as_slice());
    }

    #[test]
    fn test_restart_after_finish() {
        let mut s = session(&["a"]);
        s.classify(SessionEvent::Quit);
        assert_eq!(s.state(), SessionState::Finished(FinishReason::Aborted));
        s.classify(SessionEvent::Restart);
        assert!(s.is_paused());
    }

    #[test]
    fn test_quit_from_paused() {
        let mut s = session(&["cat"]);
        s.classify(SessionEvent::Quit);
        assert_eq!(s.state(), SessionState::Finished(FinishReason::Aborted));
    }

    #[test]
    fn test_resample_replaces_targets() {
        let mut s = session(&["cat"]);
        type_str(&mut s, "c");
        s.resample(vec![Word::new("dog"), Word::new("emu")]).unwrap();
        assert_eq!(s.word_count(), 2);
        assert_eq!(s.current_target(), &Word::new("dog"));
        assert!(s.is_paused());
        assert_eq!(s.stats().counters.total(), 0);
    }

    #[test]
    fn test_new_rejects_uncompletable_targets() {
        // "abcdef" could never be finished when only 3 chars fit
        let result = Session::new(vec![Word::new("abcdef")], 4);
        assert!(matches!(result, Err(WordedError::Config(_))));

        assert!(Session::new(vec![Word::new("abcd")], 4).is_err());
        assert!(Session::new(vec![Word::new("ok"), Word::new("")], 4).is_err());
        assert!(Session::new(vec![Word::new("abc")], 4).is_ok());
    }

    #[test]
    fn test_resample_rejects_uncompletable_targets() {
        let mut s = Session::new(vec![Word::new("ab")], 4).unwrap();
        type_str(&mut s, "a");

        assert!(s.resample(vec![Word::new("abcdef")]).is_err());
        assert!(s.resample(vec![]).is_err());
        // a rejected resample leaves the run untouched
        assert_eq!(s.current_target(), &Word::new("ab"));
        assert_eq!(s.cursor().offset, 1);
    }

    #[test]
    fn test_repeated_last_word_boundary_saturates() {
        let mut s = session(&["abc"]);
        type_str(&mut s, "a");
        s.stats.counters.missed = u32::MAX - 1;
        s.classify(SessionEvent::Boundary);
        s.classify(SessionEvent::Boundary);
        assert_eq!(s.stats().counters.missed, u32::MAX);
        assert!(s.is_running());
    }

    #[test]
    fn test_multibyte_chars_compare_as_units() {
        let mut s = session(&["ñandú", "x"]);
        type_str(&mut s, "ñandú");
        assert_eq!(s.stats().counters.correct, 5);
        assert_eq!(s.cursor().offset, 5);
    }

    #[test]
    fn test_invariants_over_mixed_sequence() {
        let mut s = session(&["the", "quick", "brown", "fox"]);
        let events = [
            SessionEvent::Type('t'),
            SessionEvent::Type('x'),
            SessionEvent::Erase,
            SessionEvent::Type('h'),
            SessionEvent::Boundary,
            SessionEvent::Boundary,
            SessionEvent::Type('q'),
            SessionEvent::Type('u'),
            SessionEvent::Type('i'),
            SessionEvent::Type('c'),
            SessionEvent::Type('k'),
            SessionEvent::Type('s'),
            SessionEvent::Boundary,
            SessionEvent::Pause,
            SessionEvent::Erase,
            SessionEvent::Type('b'),
            SessionEvent::Erase,
            SessionEvent::Erase,
        ];
        for event in events {
            s.classify(event);
            assert_invariants(&s);
        }
        assert_eq!(s.cursor(), Cursor { word: 2, offset: 0 });
        let c = s.stats().counters;
        assert_eq!(c.missed, 1);
        assert_eq!(c.extra, 1);
    }
}
