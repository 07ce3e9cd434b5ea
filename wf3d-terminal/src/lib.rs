/// Terminal front end for the wf3d wireframe engine
use crossterm::{cursor, execute, terminal};
use std::io::{self, stdout};
use wf3d_core::Engine;

pub mod canvas;
pub mod host;
pub mod input;
pub mod logging;
pub mod scene;

pub use canvas::CharCanvas;
pub use host::{CrosstermEvents, EventSource, TerminalHost};
pub use input::{InputAction, KeyBindings};
pub use logging::{init_logging, LoggingConfig};

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    engine: Engine,
    bindings: KeyBindings,
}

impl TerminalApp {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            bindings: KeyBindings::default(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn run(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop(cols, rows);

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        let (width, height) = self.engine.camera().viewport();
        let canvas = CharCanvas::new(cols as usize, rows as usize, width, height);
        let mut host = TerminalHost::new(
            canvas,
            stdout(),
            self.bindings.clone(),
            self.engine.movement_sender(),
        );
        self.engine.run(&mut host)
    }
}
