/// Per-frame render loop
///
/// The engine owns the camera and the shapes and only ever mutates them from
/// the thread that owns it (`&mut self`). Hosts that receive input on other
/// threads send [`Movement`] commands through [`Engine::movement_sender`];
/// the queue is drained once at the start of every tick.
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use log::{debug, trace};
use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::projection::{Camera, Movement};
use crate::shape::Shape;

/// 2D target the engine strokes edges onto
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
}

/// Host hook that gives control back between ticks.
///
/// `yield_for` services host work (input, redraws) until `interval` has
/// passed since the previous tick became due, then returns. Returning
/// `ControlFlow::Break` stops scheduling further ticks.
pub trait Scheduler {
    type Error;

    /// Called after every tick with the camera the frame was drawn from
    fn after_tick(&mut self, _camera: &Camera) {}

    fn yield_for(
        &mut self,
        interval: Duration,
    ) -> std::result::Result<ControlFlow<()>, Self::Error>;
}

/// Construction parameters for [`Engine`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub camera_position: Point3<f64>,
    /// Delay between ticks (16 ms is roughly 60 ticks per second)
    pub tick_interval: Duration,
    /// Rotation about Y applied to every shape each tick, in degrees
    pub spin_degrees: f64,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(Error::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: 640,
            viewport_height: 640,
            camera_position: Point3::new(0.0, 0.5, -30.0),
            tick_interval: Duration::from_millis(16),
            spin_degrees: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed; shapes may still be added
    Idle,
    /// Ticking. There is no way back to `Idle`.
    Running,
}

pub struct Engine {
    camera: Camera,
    shapes: Vec<Shape>,
    state: EngineState,
    tick_interval: Duration,
    spin_degrees: f64,
    frame_index: u64,
    commands: Receiver<Movement>,
    command_sender: Sender<Movement>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let (command_sender, commands) = mpsc::channel();

        debug!(
            "engine created: viewport {}x{}, camera at {}",
            config.viewport_width, config.viewport_height, config.camera_position
        );

        Ok(Self {
            camera: Camera::new(
                config.camera_position,
                config.viewport_width,
                config.viewport_height,
            ),
            shapes: Vec::new(),
            state: EngineState::Idle,
            tick_interval: config.tick_interval,
            spin_degrees: config.spin_degrees,
            frame_index: 0,
            commands,
            command_sender,
        })
    }

    /// Append a shape; draw order follows insertion order
    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        if self.state != EngineState::Idle {
            return Err(Error::AlreadyRunning);
        }
        debug!("adding {:?} shape #{}", shape.kind(), self.shapes.len());
        self.shapes.push(shape);
        Ok(())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct camera access for hosts that handle input on the engine thread
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of ticks run so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Queue for camera moves; drained at the start of the next tick
    pub fn movement_sender(&self) -> Sender<Movement> {
        self.command_sender.clone()
    }

    fn start(&mut self) {
        if self.state == EngineState::Idle {
            debug!("render loop starting with {} shapes", self.shapes.len());
            self.state = EngineState::Running;
        }
    }

    /// Run a single frame: apply queued moves, clear, then spin, project and
    /// stroke every shape in insertion order.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.start();

        for movement in self.commands.try_iter() {
            self.camera.apply(movement);
        }

        surface.clear();

        let mut non_finite = 0usize;
        for shape in &mut self.shapes {
            shape.rotate_y(self.spin_degrees);
            let screen = self.camera.to_screen(&self.camera.project(shape.vertices()));

            for edge in shape.edges() {
                let (a, b) = (screen[edge.0], screen[edge.1]);
                if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
                    non_finite += 1;
                }
                surface.draw_line(a.x, a.y, b.x, b.y);
            }
        }

        if non_finite > 0 {
            trace!(
                "frame {}: {} edges with non-finite screen coordinates",
                self.frame_index,
                non_finite
            );
        }
        trace!("frame {} drawn", self.frame_index);
        self.frame_index += 1;
    }

    /// Tick at a fixed cadence, yielding to the host between frames, until
    /// the host breaks out.
    pub fn run<H>(&mut self, host: &mut H) -> std::result::Result<(), H::Error>
    where
        H: DrawSurface + Scheduler,
    {
        self.start();
        loop {
            self.tick(host);
            host.after_tick(&self.camera);
            if host.yield_for(self.tick_interval)?.is_break() {
                break;
            }
        }
        debug!("host stopped the render loop after {} frames", self.frame_index);
        Ok(())
    }
}
