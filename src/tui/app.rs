//! Interactive graph loop.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::series::DateRange;

use super::{
    input::{handle_key, KeyAction},
    model::ChartModel,
    render::render,
    view::ViewWindow,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App<'a> {
    model: &'a ChartModel,
    view: Option<ViewWindow>,
}

impl<'a> App<'a> {
    pub fn new(model: &'a ChartModel, zoom: Option<DateRange>) -> Self {
        let view = model.span.map(|span| ViewWindow::new(span, zoom));
        Self { model, view }
    }

    /// Takes over the terminal until the user quits. The terminal is restored even if drawing
    /// fails.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, self.model, self.view.as_ref()))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(self.view.as_mut(), key) == KeyAction::Quit {
                        debug!("Leaving graph");
                        return Ok(());
                    }
                }
                // Next draw picks up the new size.
                Event::Resize(..) => {}
                _ => {}
            }
        }
    }
}
