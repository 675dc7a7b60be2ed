use std::time::{Duration, Instant};

use super::error::Result;
use crate::engine::session::{Input, Session};
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::renderer::Renderer;

impl From<UserInput> for Option<Input> {
    fn from(ui: UserInput) -> Option<Input> {
        match ui {
            UserInput::Direction(d) => Some(Input::Direction(d)),
            UserInput::Undo => Some(Input::Undo),
            UserInput::Other => Some(Input::AnyKey),
            UserInput::Quit => None,
        }
    }
}

pub(crate) struct Tui48<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    session: Session,
    tick: Duration,
}

impl<R: Renderer, E: EventSource> Tui48<R, E> {
    pub(crate) fn new(session: Session, renderer: R, event_source: E) -> Self {
        let tick = session.config().tick();
        Self {
            renderer,
            event_source,
            session,
            tick,
        }
    }

    pub(crate) fn run(mut self) -> Result<()> {
        match self.inner_run() {
            Err(e) => {
                self.renderer.recover();
                Err(e)
            }
            Ok(_) => Ok(()),
        }
    }

    /// Drive the session one tick at a time until the user quits: render, wait for input, then
    /// hand the input to the session.
    pub(crate) fn inner_run(&mut self) -> Result<()> {
        loop {
            let started = Instant::now();
            self.renderer.render(&self.session.frame())?;

            let input = match self.event_source.next_event(self.tick)? {
                Some(Event::UserInput(UserInput::Quit)) => break,
                Some(Event::UserInput(ui)) => ui.into(),
                Some(Event::Resize) => {
                    self.renderer.clear()?;
                    None
                }
                None => None,
            };
            if let Some(i) = &input {
                log::debug!("input {:?} with status {}", i, self.session.status());
            }
            if let Err(e) = self.session.tick(input) {
                if e.is_contract_violation() {
                    log::error!("animation contract broken: {}", e);
                }
                return Err(e.into());
            }

            if let Some(rest) = self.tick.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        log::info!("quitting with score {}", self.session.score());
        Ok(())
    }
}
