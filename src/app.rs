use crate::config::RunConfig;
use crate::error::Result;
use crate::input::Input;
use crate::layout::{layout, Layout};
use crate::results::ResultRecord;
use crate::session::{FinishReason, Session, SessionEvent, SessionState};
use crate::word_bank::WordBank;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Rows taken by the header and its spacer above the grid
pub const GRID_TOP: u16 = 2;
/// Rows taken by the banner, info and stats lines below the grid
pub const GRID_BOTTOM: u16 = 3;

/// Owns the session for a run plus everything the screen needs besides it.
pub struct App {
    bank: WordBank,
    config: RunConfig,
    seed: u64,
    session: Session,
    pub show_word: bool,
    pub show_fps: bool,
    scroll: usize,
    last_tick: Option<Instant>,
    last_dt: Duration,
}

impl App {
    pub fn new(bank: WordBank, config: RunConfig) -> Result<Self> {
        let seed = config.seed;
        let session = Session::from_bank(&bank, config.word_count, seed, config.word_max)?;
        Ok(Self {
            bank,
            config,
            seed,
            session,
            show_word: false,
            show_fps: false,
            scroll: 0,
            last_tick: None,
            last_dt: Duration::ZERO,
        })
    }

    /// One controller step: account elapsed time, then apply at most one input.
    ///
    /// Time since the previous tick counts only when the session was running
    /// when the tick began, so a resume never picks up paused time.
    pub fn tick(&mut self, input: Option<Input>, now: Instant) -> Result<()> {
        let dt = self
            .last_tick
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or_default();
        self.last_tick = Some(now);
        self.last_dt = dt;
        self.session.add_active_time(dt);

        if let Some(input) = input {
            self.apply(input)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, input: Input) -> Result<()> {
        match input {
            Input::ToggleWord => self.show_word = !self.show_word,
            Input::ToggleFps => self.show_fps = !self.show_fps,
            Input::Resample => self.resample()?,
            other => {
                if let Some(event) = other.session_event() {
                    self.session.classify(event);
                }
            }
        }
        Ok(())
    }

    /// New words from the next seed, then a restart.
    pub fn resample(&mut self) -> Result<()> {
        self.seed = self.seed.wrapping_add(1);
        log::debug!("resampling with seed {}", self.seed);
        let words = self.bank.sample(self.config.word_count, self.seed);
        self.session.resample(words)?;
        self.scroll = 0;
        Ok(())
    }

    /// Ends the run as aborted, e.g. on an interrupt signal.
    pub fn abort(&mut self) {
        self.session.classify(SessionEvent::Quit);
    }

    /// Area of the word grid inside the full screen `area`
    pub fn grid_area(area: Rect) -> Rect {
        let height = area.height.saturating_sub(GRID_TOP + GRID_BOTTOM);
        Rect {
            x: area.x + 1,
            y: area.y + GRID_TOP,
            width: area.width.saturating_sub(2),
            height,
        }
    }

    pub fn layout(&self, area: Rect) -> Layout {
        layout(&self.session, usize::from(Self::grid_area(area).width))
    }

    /// Scrolls so the row under the cursor is the first visible grid row.
    pub fn follow(&mut self, area: Rect) {
        self.scroll = self.layout(area).active_row;
    }

    pub fn outcome(&self) -> Option<FinishReason> {
        match self.session.state() {
            SessionState::Finished(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn record(&self, timestamp: i64) -> ResultRecord {
        ResultRecord::from_session(
            &self.session,
            &self.config.dataset.to_string(),
            self.seed,
            timestamp,
        )
    }

    pub fn fps(&self) -> Option<f64> {
        let secs = self.last_dt.as_secs_f64();
        (secs > 0.0).then(|| 1.0 / secs)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
