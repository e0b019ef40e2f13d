#![deny(unsafe_code)]
//! CLI binary for the hello-opengl demo.
//!
//! Opens an 800x600 "HelloOpenGL" window with an OpenGL 3.3 core context
//! and clears it every frame until Escape is pressed or the window is
//! closed.
//!
//! Subcommands:
//! - `triangle` (default) -- also builds the shader program and draws the
//!   orange triangle
//! - `basic` -- window, context and the clear/present loop only

mod config;
mod error;
mod logging;
mod platform;

use clap::{Parser, Subcommand};
use config::load_config;
use error::CliError;
use hello_opengl_core::render::{GlRenderer, GpuContext};
use hello_opengl_core::{FrameLoop, FrameStats, Scene};
use logging::{init_logging, LoggingConfig};
use platform::PlatformWindow;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "hello-opengl", about = "Hello-triangle OpenGL demo")]
struct Cli {
    /// JSON file overriding window settings (width, height, title,
    /// gl_version, profile, clear_color, scene). Missing keys keep the
    /// defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter in env_logger syntax (e.g. "debug"). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Window, context and the clear/present loop only.
    Basic,
    /// Build the shader program, upload the triangle and draw it.
    Triangle,
}

impl Command {
    fn scene(&self) -> Scene {
        match self {
            Command::Basic => Scene::Basic,
            Command::Triangle => Scene::Triangle,
        }
    }
}

/// A subcommand wins over the config file's `scene`.
fn select_scene(command: Option<&Command>, configured: Scene) -> Scene {
    command.map(Command::scene).unwrap_or(configured)
}

fn run(cli: Cli) -> Result<FrameStats, CliError> {
    let config = load_config(cli.config.as_deref())?;
    let scene = select_scene(cli.command.as_ref(), config.scene);

    log::info!(
        "starting '{}' scene, requesting OpenGL {} {:?} profile",
        scene.name(),
        config.gl_version,
        config.profile
    );

    let mut window = PlatformWindow::open(&config)?;
    let gl = window.load_gl()?;
    let ctx = GpuContext::new(gl, config.gl_version)?;

    let info = ctx.info();
    log::info!(
        "OpenGL context {} on {} ({})",
        info.version,
        info.renderer,
        info.vendor
    );

    let mut renderer = GlRenderer::new(ctx, scene, window.initial_viewport())?;
    let result = FrameLoop::new(config.clear_color).run(&mut window, &mut renderer);

    // GL objects go while the context is still current; the window (and
    // with it the context) drops after.
    drop(renderer.shutdown());
    drop(window);

    Ok(result?)
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        filter: cli.log_level.clone(),
    });

    match run(cli) {
        Ok(stats) => log::debug!("exiting after {} frames", stats.frames),
        Err(e) => {
            log::error!("{e}");
            process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_triangle() {
        let cli = Cli::try_parse_from(["hello-opengl"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            select_scene(cli.command.as_ref(), Scene::default()),
            Scene::Triangle
        );
    }

    #[test]
    fn config_scene_applies_without_subcommand() {
        let cli = Cli::try_parse_from(["hello-opengl"]).unwrap();
        assert_eq!(select_scene(cli.command.as_ref(), Scene::Basic), Scene::Basic);
    }

    #[test]
    fn subcommand_overrides_config_scene() {
        let cli = Cli::try_parse_from(["hello-opengl", "triangle"]).unwrap();
        assert_eq!(select_scene(cli.command.as_ref(), Scene::Basic), Scene::Triangle);
    }

    #[test]
    fn basic_subcommand_selects_basic_scene() {
        let cli = Cli::try_parse_from(["hello-opengl", "basic"]).unwrap();
        assert_eq!(cli.command.as_ref().map(Command::scene), Some(Scene::Basic));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hello-opengl",
            "triangle",
            "--config",
            "window.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("window.json")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["hello-opengl", "cube"]).is_err());
    }
}
