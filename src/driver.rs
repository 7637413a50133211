//! Frame driving: an [`Application`] is initialized once, then updated once
//! per frame with the elapsed time and the live input state.

use log::info;

use crate::display::DrawingSurface;
use crate::engine::{Engine, FrameStats, RenderError};
use crate::input::InputState;

/// Anything a frame driver can run.
pub trait Application {
    /// Called once before the first update.
    fn init(&mut self);

    /// Advance by `delta` seconds and draw one frame.
    fn update(
        &mut self,
        delta: f32,
        input: &InputState,
        surface: &mut dyn DrawingSurface,
    ) -> Result<FrameStats, RenderError>;
}

impl Application for Engine {
    fn init(&mut self) {
        Engine::init(self);
    }

    fn update(
        &mut self,
        delta: f32,
        input: &InputState,
        surface: &mut dyn DrawingSurface,
    ) -> Result<FrameStats, RenderError> {
        Engine::update(self, delta, input, surface)
    }
}

/// Runs an application for a fixed number of frames at a fixed timestep,
/// without a window.
#[derive(Debug, Clone)]
pub struct HeadlessDriver {
    timestep: f32,
    frames: u32,
    input: InputState,
}

impl HeadlessDriver {
    pub fn new(frames: u32, timestep: f32) -> Self {
        Self {
            timestep,
            frames,
            input: InputState::new(),
        }
    }

    /// Input state handed to every update. Keys pressed here stay pressed
    /// for the whole run; pointer motion is consumed by the first frame.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Initialize `app`, then update it once per frame. Returns the stats of
    /// the last frame, or `None` when zero frames were requested.
    pub fn run<A, S>(&mut self, app: &mut A, surface: &mut S) -> Result<Option<FrameStats>, RenderError>
    where
        A: Application + ?Sized,
        S: DrawingSurface,
    {
        app.init();

        let mut last = None;
        for _ in 0..self.frames {
            last = Some(app.update(self.timestep, &self.input, surface)?);
            self.input.end_frame();
        }

        if let Some(stats) = last {
            info!(
                "Rendered {} frames, last frame drew {} of {} surfaces",
                self.frames, stats.surfaces_drawn, stats.surfaces_in
            );
        }
        Ok(last)
    }
}
