//! Window and context configuration.
//!
//! [`WindowConfig::default`] is the demo's fixed setup: an 800x600 window
//! titled `HelloOpenGL` with an OpenGL 3.3 core-profile context. Config
//! files may override any subset of fields; missing fields keep these values.

use crate::color::Rgba;
use crate::error::BootstrapError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_TITLE: &str = "HelloOpenGL";

/// Lowest context version the bundled GLSL 330 shaders compile on.
pub const MIN_GL_VERSION: GlVersion = GlVersion { major: 3, minor: 3 };

/// Requested OpenGL context version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Requested OpenGL context profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlProfile {
    #[default]
    Core,
    Compatibility,
}

/// Which of the two demo programs to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Window, context and the clear/present loop only.
    Basic,
    /// Adds the shader program and the triangle vertex buffer.
    #[default]
    Triangle,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::Basic => "basic",
            Scene::Triangle => "triangle",
        }
    }
}

/// Everything the platform layer needs to open the window and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub gl_version: GlVersion,
    pub profile: GlProfile,
    pub clear_color: Rgba,
    /// Scene to run when no subcommand names one.
    pub scene: Scene,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            gl_version: MIN_GL_VERSION,
            profile: GlProfile::Core,
            clear_color: Rgba::CLEAR,
            scene: Scene::Triangle,
        }
    }
}

impl WindowConfig {
    /// Parses a JSON overlay on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, BootstrapError> {
        serde_json::from_str(json).map_err(|e| BootstrapError::InvalidConfig(e.to_string()))
    }

    /// Checks that the window has a drawable area and the context can run
    /// the bundled shaders.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.width == 0 || self.height == 0 {
            return Err(BootstrapError::InvalidConfig(
                "width and height must be non-zero".into(),
            ));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(BootstrapError::InvalidConfig(format!(
                "window size {}x{} exceeds the GL viewport range",
                self.width, self.height
            )));
        }
        if self.gl_version < MIN_GL_VERSION {
            return Err(BootstrapError::InvalidConfig(format!(
                "OpenGL {} is below the minimum {MIN_GL_VERSION}",
                self.gl_version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_matches_fixed_window_parameters() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.title, "HelloOpenGL");
        assert_eq!(cfg.gl_version, GlVersion { major: 3, minor: 3 });
        assert_eq!(cfg.profile, GlProfile::Core);
        assert_eq!(cfg.clear_color, Rgba::CLEAR);
    }

    #[test]
    fn default_config_is_valid() {
        WindowConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_json_yields_defaults() {
        assert_eq!(WindowConfig::from_json("{}").unwrap(), WindowConfig::default());
    }

    #[test]
    fn json_overlay_keeps_missing_fields() {
        let cfg = WindowConfig::from_json(r#"{"width": 1024, "title": "tri"}"#).unwrap();
        assert_eq!(cfg.width, 1024);
        assert_eq!(cfg.title, "tri");
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.gl_version, MIN_GL_VERSION);
    }

    #[test]
    fn json_parses_profile_and_version() {
        let cfg = WindowConfig::from_json(
            r#"{"profile": "compatibility", "gl_version": {"major": 4, "minor": 6}}"#,
        )
        .unwrap();
        assert_eq!(cfg.profile, GlProfile::Compatibility);
        assert_eq!(cfg.gl_version, GlVersion { major: 4, minor: 6 });
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let err = WindowConfig::from_json(r#"{"widht": 10}"#).unwrap_err();
        assert!(format!("{err}").contains("widht"), "got: {err}");
    }

    #[test]
    fn validate_rejects_zero_width() {
        let cfg = WindowConfig {
            width: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(BootstrapError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_old_gl_versions() {
        let cfg = WindowConfig {
            gl_version: GlVersion { major: 3, minor: 2 },
            ..WindowConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("3.2"), "got: {err}");
    }

    #[test]
    fn validate_rejects_sizes_beyond_viewport_range() {
        let cfg = WindowConfig {
            height: u32::MAX,
            ..WindowConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn gl_version_orders_by_major_then_minor() {
        assert!(GlVersion { major: 4, minor: 0 } > GlVersion { major: 3, minor: 3 });
        assert!(GlVersion { major: 3, minor: 3 } > GlVersion { major: 3, minor: 2 });
    }

    #[test]
    fn scene_default_is_triangle() {
        assert_eq!(Scene::default(), Scene::Triangle);
        assert_eq!(WindowConfig::default().scene, Scene::Triangle);
    }

    #[test]
    fn json_selects_scene_by_name() {
        let cfg = WindowConfig::from_json(r#"{"scene": "basic"}"#).unwrap();
        assert_eq!(cfg.scene, Scene::Basic);
        assert_eq!(cfg.scene.name(), "basic");
    }

    #[test]
    fn json_rejects_unknown_scene() {
        let err = WindowConfig::from_json(r#"{"scene": "cube"}"#).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("cube") && msg.contains("triangle"), "got: {msg}");
    }

    proptest! {
        #[test]
        fn any_positive_size_at_supported_version_validates(
            w in 1u32..=8192,
            h in 1u32..=8192,
            minor in 3u8..=9,
        ) {
            let cfg = WindowConfig {
                width: w,
                height: h,
                gl_version: GlVersion { major: 3, minor },
                ..WindowConfig::default()
            };
            prop_assert!(cfg.validate().is_ok());
        }
    }
}
