//! The clear-and-present frame loop.
//!
//! [`FrameLoop`] owns the window's close flag and keyboard state and drives
//! two seams: a [`Surface`] (the platform window: present + event polling)
//! and a [`Renderer`] (the GL side: viewport + per-frame drawing). Each
//! iteration runs, in order:
//!
//! 1. input: request close if Escape is held,
//! 2. render: clear (and draw, for scenes with geometry),
//! 3. present the back buffer,
//! 4. poll platform events; resizes update the viewport here.
//!
//! The close flag is checked once per iteration before the body runs, so a
//! close requested in step 1 still lets that iteration finish.

use crate::color::Rgba;
use crate::error::BootstrapError;
use crate::input::{InputState, Key, KeyEvent};
use crate::viewport::Viewport;
use std::num::NonZeroU32;

/// Platform events the loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The framebuffer changed size, in physical pixels.
    FramebufferResized { width: u32, height: u32 },
    /// The user asked the window to close (title bar, window manager).
    CloseRequested,
    Key(KeyEvent),
    Focused(bool),
}

/// The platform window the loop presents to.
pub trait Surface {
    /// Swaps the back buffer to the screen.
    fn swap_buffers(&mut self) -> Result<(), BootstrapError>;

    /// Processes pending platform events, appending the ones the loop cares
    /// about to `events`. Never blocks.
    fn poll_events(&mut self, events: &mut Vec<WindowEvent>);

    /// Resizes the drawable backing store after a framebuffer size change.
    fn resize(&mut self, width: NonZeroU32, height: NonZeroU32);
}

/// The GL side of a frame.
pub trait Renderer {
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the color buffer to `clear` and draws the scene.
    fn render(&mut self, clear: Rgba);
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub resizes: u64,
}

pub struct FrameLoop {
    clear_color: Rgba,
    input: InputState,
    should_close: bool,
    stats: FrameStats,
}

impl FrameLoop {
    pub fn new(clear_color: Rgba) -> Self {
        Self {
            clear_color,
            input: InputState::default(),
            should_close: false,
            stats: FrameStats::default(),
        }
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Runs frames until the close flag is set.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if presenting a frame fails; the loop
    /// stops at that frame.
    pub fn run<S, R>(&mut self, surface: &mut S, renderer: &mut R) -> Result<FrameStats, BootstrapError>
    where
        S: Surface + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut events = Vec::new();
        while !self.should_close {
            self.run_frame(surface, renderer, &mut events)?;
        }
        log::info!(
            "frame loop finished after {} frames ({} resizes)",
            self.stats.frames,
            self.stats.resizes
        );
        Ok(self.stats)
    }

    fn run_frame<S, R>(
        &mut self,
        surface: &mut S,
        renderer: &mut R,
        events: &mut Vec<WindowEvent>,
    ) -> Result<(), BootstrapError>
    where
        S: Surface + ?Sized,
        R: Renderer + ?Sized,
    {
        self.process_input();

        renderer.render(self.clear_color);
        surface.swap_buffers()?;
        self.stats.frames += 1;

        events.clear();
        surface.poll_events(events);
        for event in events.drain(..) {
            self.handle_event(event, surface, renderer);
        }
        Ok(())
    }

    fn process_input(&mut self) {
        if self.input.key_down(Key::Escape) {
            log::debug!("escape held, requesting close");
            self.should_close = true;
        }
    }

    fn handle_event<S, R>(&mut self, event: WindowEvent, surface: &mut S, renderer: &mut R)
    where
        S: Surface + ?Sized,
        R: Renderer + ?Sized,
    {
        match event {
            WindowEvent::FramebufferResized { width, height } => {
                let (Some(w), Some(h), Some(viewport)) = (
                    NonZeroU32::new(width),
                    NonZeroU32::new(height),
                    Viewport::covering(width, height),
                ) else {
                    log::debug!("ignoring {width}x{height} framebuffer (minimized)");
                    return;
                };
                log::debug!("framebuffer resized to {width}x{height}");
                surface.resize(w, h);
                renderer.set_viewport(viewport);
                self.stats.resizes += 1;
            }
            WindowEvent::CloseRequested => self.should_close = true,
            WindowEvent::Key(key) => self.input.apply_key(key),
            WindowEvent::Focused(focused) => self.input.apply_focus(focused),
        }
    }
}
