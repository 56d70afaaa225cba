//! The per-frame update: ease the sphere, draw, ask for the next frame.
//!
//! The loop knows nothing about windows or GPUs. It is driven through
//! [`FrameLoop::tick`] with the time since the previous frame, draws through
//! a [`SceneRenderer`] and reschedules through a [`FrameScheduler`]. The app
//! plugs in wgpu and winit; tests plug in recorders.

use winit::window::Window;

use crate::error::Result;
use crate::input::AimTarget;
use crate::state::AppState;

/// Monotonic elapsed time, advanced by frame deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    // f64 so long sessions don't lose small deltas to rounding.
    elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative deltas are treated as zero so time never runs backwards.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += f64::from(dt.max(0.0));
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

/// Draws the current state.
pub trait SceneRenderer {
    fn render(&mut self, state: &AppState) -> Result<()>;
}

/// Requests another tick before the next repaint.
pub trait FrameScheduler {
    fn schedule_next(&self);
}

impl FrameScheduler for Window {
    fn schedule_next(&self) {
        self.request_redraw();
    }
}

/// Drives the sphere animation one frame at a time.
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: Clock,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame.
    ///
    /// A render error is returned before the next frame is scheduled, which
    /// stops the loop.
    pub fn tick<R, S>(
        &mut self,
        dt: f32,
        state: &mut AppState,
        renderer: &mut R,
        scheduler: &S,
    ) -> Result<()>
    where
        R: SceneRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.clock.advance(dt);

        let aim = AimTarget::from_offset(state.pointer);
        let elapsed = self.clock.elapsed();
        state.scene.sphere.follow(aim, elapsed);

        renderer.render(state)?;
        self.frames += 1;

        scheduler.schedule_next();
        Ok(())
    }
}
