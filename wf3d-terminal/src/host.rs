/// Terminal host: draws the canvas and services input between ticks
use crossterm::{
    cursor,
    event::{self, Event},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use log::{debug, info};
use nalgebra::Point3;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use wf3d_core::{Camera, DrawSurface, FrameTimer, Movement, Scheduler};

use crate::canvas::CharCanvas;
use crate::input::{InputAction, KeyBindings};

/// Where the host reads terminal events from
pub trait EventSource {
    /// Wait up to `timeout` for the next event
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Events from the real terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

pub struct TerminalHost<W: Write, E: EventSource = CrosstermEvents> {
    canvas: CharCanvas,
    out: W,
    events: E,
    bindings: KeyBindings,
    movements: Sender<Movement>,
    timer: FrameTimer,
    frames: u64,
    eye: Option<Point3<f64>>,
    needs_full_clear: bool,
}

impl<W: Write> TerminalHost<W, CrosstermEvents> {
    pub fn new(
        canvas: CharCanvas,
        out: W,
        bindings: KeyBindings,
        movements: Sender<Movement>,
    ) -> Self {
        Self::with_events(canvas, out, CrosstermEvents, bindings, movements)
    }
}

impl<W: Write, E: EventSource> TerminalHost<W, E> {
    pub fn with_events(
        canvas: CharCanvas,
        out: W,
        events: E,
        bindings: KeyBindings,
        movements: Sender<Movement>,
    ) -> Self {
        Self {
            canvas,
            out,
            events,
            bindings,
            movements,
            timer: FrameTimer::new(),
            frames: 0,
            eye: None,
            needs_full_clear: true,
        }
    }

    pub fn canvas(&self) -> &CharCanvas {
        &self.canvas
    }

    fn status_line(&self) -> String {
        let camera = match self.eye {
            Some(eye) => format!("cam ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z),
            None => "cam (-)".to_string(),
        };
        format!(
            "wf3d | FPS: {:.1} | frame {} | {} | {}",
            self.timer.fps(),
            self.frames,
            camera,
            self.bindings.legend()
        )
    }

    /// Write the current canvas and the status line
    pub fn present(&mut self) -> io::Result<()> {
        if self.needs_full_clear {
            queue!(self.out, Clear(ClearType::All))?;
            self.needs_full_clear = false;
        }

        self.canvas.draw(&mut self.out)?;

        let status = self.status_line();
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        self.out.flush()
    }

    /// Apply a key press; returns `Break` when the user asked to leave
    fn handle(&mut self, action: InputAction) -> ControlFlow<()> {
        match action {
            InputAction::Quit => {
                info!("quit requested after {} frames", self.frames);
                ControlFlow::Break(())
            }
            InputAction::Move(movement) => {
                if self.movements.send(movement).is_err() {
                    debug!("engine dropped its movement queue");
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            }
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        debug!("terminal resized to {}x{}", cols, rows);
        self.canvas.resize(cols as usize, rows as usize);
        self.needs_full_clear = true;
    }
}

impl<W: Write, E: EventSource> DrawSurface for TerminalHost<W, E> {
    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.canvas.draw_line(x1, y1, x2, y2);
    }
}

impl<W: Write, E: EventSource> Scheduler for TerminalHost<W, E> {
    type Error = io::Error;

    fn after_tick(&mut self, camera: &Camera) {
        self.eye = Some(camera.eye());
    }

    fn yield_for(&mut self, interval: Duration) -> io::Result<ControlFlow<()>> {
        self.frames += 1;
        self.present()?;

        let deadline = self.timer.next_deadline(interval);
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(ControlFlow::Continue(()));
            }

            match self.events.next_event(deadline - now)? {
                Some(Event::Key(key)) => {
                    if let Some(action) = self.bindings.resolve(&key) {
                        if self.handle(action).is_break() {
                            return Ok(ControlFlow::Break(()));
                        }
                    }
                }
                Some(Event::Resize(cols, rows)) => self.resize(cols, rows),
                _ => {}
            }
        }
    }
}
