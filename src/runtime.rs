use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::app::App;
use crate::error::Result;
use crate::input::Input;
use crate::session::FinishReason;

/// Source of key presses, polled once per tick without blocking
pub trait EventSource {
    fn poll(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Production event source using crossterm
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn poll(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            // resizes are picked up by the next draw
            if let CtEvent::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// Test event source fed through a channel
pub struct TestEventSource {
    rx: Receiver<KeyEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<KeyEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn poll(&mut self) -> io::Result<Option<KeyEvent>> {
        match self.rx.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }
}

/// Sleeps until fixed deadlines on the monotonic clock
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    period: Duration,
    next: Instant,
}

impl Pacer {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    /// How long to sleep before the next tick. Resynchronizes after an overrun.
    pub fn delay(&mut self, now: Instant) -> Duration {
        if now >= self.next {
            log::trace!("tick overran by {:?}", now - self.next);
            self.next = now + self.period;
            return Duration::ZERO;
        }
        let wait = self.next - now;
        self.next += self.period;
        wait
    }

    pub fn wait(&mut self) {
        let delay = self.delay(Instant::now());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Runs ticks until the session finishes. `interrupted` turns into an aborted finish.
pub fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut E,
    interrupted: &AtomicBool,
) -> Result<FinishReason> {
    let mut pacer = Pacer::new(app.config().tick_period(), Instant::now());

    loop {
        if interrupted.load(Ordering::SeqCst) {
            log::info!("interrupted, aborting run");
            app.abort();
        }

        let input = events.poll()?.map(Input::from);
        app.tick(input, Instant::now())?;

        terminal.draw(|f| {
            let area = f.area();
            app.follow(area);
            f.render_widget(&*app, area);
        })?;

        if let Some(reason) = app.outcome() {
            return Ok(reason);
        }

        pacer.wait();
    }
}
