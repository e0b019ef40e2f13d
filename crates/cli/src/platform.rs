//! Window + GL context through `winit` and `glutin`.
//!
//! `PlatformWindow` owns the event loop, the window, the window surface and
//! the current context, and implements the frame loop's [`Surface`]. Events
//! are pumped without blocking once per frame, so resize handling runs
//! synchronously inside the loop's poll step.

use std::ffi::{c_void, CStr};
use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile as ContextProfile, NotCurrentGlContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface as GlutinSurface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent as WinitEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use hello_opengl_core::{
    BootstrapError, GlProfile, Key, KeyEvent, KeyState, Surface, Viewport, WindowConfig,
    WindowEvent,
};

/// Entry points the renderer cannot run without.
const REQUIRED_SYMBOLS: [&CStr; 6] = [
    c"glClear",
    c"glViewport",
    c"glCreateShader",
    c"glCreateProgram",
    c"glBufferData",
    c"glDrawArrays",
];

pub struct PlatformWindow {
    handler: EventCollector,
    // Field order is drop order: context and surface go before the window
    // they render into, and the event loop goes last.
    context: PossiblyCurrentContext,
    surface: GlutinSurface<WindowSurface>,
    window: Window,
    fallback_size: (u32, u32),
    event_loop: EventLoop<()>,
}

impl PlatformWindow {
    /// Creates the event loop, the window, a context of the configured
    /// version and profile, and makes the context current.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::WindowCreation` if any platform step fails.
    /// Everything created up to that point is dropped before returning.
    #[allow(unsafe_code)]
    pub fn open(config: &WindowConfig) -> Result<Self, BootstrapError> {
        let creation = |what: &str, e: &dyn std::fmt::Display| {
            BootstrapError::WindowCreation(format!("{what}: {e}"))
        };

        let event_loop = EventLoop::new().map_err(|e| creation("event loop", &e))?;

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(&event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| creation("display", &e))?;
        let window = window.ok_or_else(|| {
            BootstrapError::WindowCreation("display builder returned no window".into())
        })?;

        let raw_handle = window
            .window_handle()
            .map_err(|e| creation("window handle", &e))?
            .as_raw();

        let profile = match config.profile {
            GlProfile::Core => ContextProfile::Core,
            GlProfile::Compatibility => ContextProfile::Compatibility,
        };
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.gl_version.major,
                config.gl_version.minor,
            ))))
            .with_profile(profile)
            .build(Some(raw_handle));

        let gl_display = gl_config.display();

        // SAFETY: the raw window handle belongs to `window`, which outlives
        // the context because it is stored alongside it in `Self`.
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| creation(&format!("OpenGL {} context", config.gl_version), &e))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| creation("surface attributes", &e))?;

        // SAFETY: as above, the surface is dropped before `window`.
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| creation("window surface", &e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| creation("make context current", &e))?;

        log::info!(
            "window '{}' created ({}x{})",
            config.title,
            config.width,
            config.height
        );

        Ok(Self {
            handler: EventCollector::new(window.id()),
            context,
            surface,
            window,
            fallback_size: (config.width, config.height),
            event_loop,
        })
    }

    /// Resolves GL entry points through the context's display.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::FunctionLoad` if a required entry point is
    /// missing.
    #[allow(unsafe_code)]
    pub fn load_gl(&self) -> Result<glow::Context, BootstrapError> {
        let display = self.context.display();
        check_symbols(|name| display.get_proc_address(name))?;

        // SAFETY: the context is current on this thread, and every pointer
        // comes from the display that owns it.
        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };
        Ok(gl)
    }

    /// Viewport covering the framebuffer as created.
    pub fn initial_viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::covering(size.width, size.height)
            .or_else(|| Viewport::covering(self.fallback_size.0, self.fallback_size.1))
            .unwrap_or(Viewport {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            })
    }
}

impl Surface for PlatformWindow {
    fn swap_buffers(&mut self) -> Result<(), BootstrapError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| BootstrapError::Present(e.to_string()))
    }

    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        events.append(&mut self.handler.pending);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            events.push(WindowEvent::CloseRequested);
        }
    }

    fn resize(&mut self, width: NonZeroU32, height: NonZeroU32) {
        self.surface.resize(&self.context, width, height);
    }
}

/// Fails, naming each one, if any of [`REQUIRED_SYMBOLS`] resolves to null.
fn check_symbols<F>(mut resolve: F) -> Result<(), BootstrapError>
where
    F: FnMut(&CStr) -> *const c_void,
{
    let missing: Vec<String> = REQUIRED_SYMBOLS
        .iter()
        .filter(|name| resolve(name).is_null())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BootstrapError::FunctionLoad(format!(
            "unresolved entry points: {}",
            missing.join(", ")
        )))
    }
}

/// Prefers the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin offers at least one config for a window display")
}

/// Collects the events the frame loop cares about while winit pumps.
struct EventCollector {
    window_id: WindowId,
    pending: Vec<WindowEvent>,
}

impl EventCollector {
    fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            pending: Vec::new(),
        }
    }
}

impl ApplicationHandler for EventCollector {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WinitEvent) {
        if window_id != self.window_id {
            return;
        }
        if let Some(event) = translate_event(&event) {
            self.pending.push(event);
        }
    }
}

fn translate_event(event: &WinitEvent) -> Option<WindowEvent> {
    match event {
        WinitEvent::CloseRequested => Some(WindowEvent::CloseRequested),
        WinitEvent::Resized(size) => Some(WindowEvent::FramebufferResized {
            width: size.width,
            height: size.height,
        }),
        WinitEvent::Focused(focused) => Some(WindowEvent::Focused(*focused)),
        WinitEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key)?;
            Some(WindowEvent::Key(KeyEvent {
                key,
                state: map_state(event.state),
            }))
        }
        _ => None,
    }
}

fn map_key(key: PhysicalKey) -> Option<Key> {
    match key {
        PhysicalKey::Code(KeyCode::Escape) => Some(Key::Escape),
        _ => None,
    }
}

fn map_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}
