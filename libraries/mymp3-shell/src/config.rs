//! Shell configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then `MYMP3_*`
//! environment variables.

use crate::error::{Result, ShellError};
use mymp3_motion::{DrawerSettings, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `MYMP3_MENU_DRAWER__TRAVEL_EXTENT=400`
pub const ENV_PREFIX: &str = "MYMP3";

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "mymp3.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_menu_drawer")]
    pub menu_drawer: DrawerSettings,

    #[serde(default = "default_queue_drawer")]
    pub queue_drawer: DrawerSettings,

    #[serde(default)]
    pub window: WindowSettings,

    #[serde(default)]
    pub transport: TransportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransportSettings {
    /// Initial volume level (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,
}

impl WindowSettings {
    /// Initial container size
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl ShellConfig {
    /// Load configuration from `mymp3.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from `path` and environment
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map
    ///
    /// `None` reads the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| ShellError::Config(e.to_string()))?;
        let mut settings = config::Config::builder().add_source(defaults);

        // Load from config file
        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };
        settings = settings.add_source(file);

        // Override with environment variables (prefixed with MYMP3_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| ShellError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| ShellError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_drawer("menu_drawer", &self.menu_drawer)?;
        validate_drawer("queue_drawer", &self.queue_drawer)?;

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ShellError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.transport.volume > 100 {
            return Err(ShellError::Config(format!(
                "transport.volume must be 0-100, got {}",
                self.transport.volume
            )));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShellError::Config(e.to_string()))
    }
}

fn validate_drawer(section: &str, drawer: &DrawerSettings) -> Result<()> {
    if !drawer.travel_extent.is_finite() || drawer.travel_extent <= 0.0 {
        return Err(ShellError::Config(format!(
            "{section}.travel_extent must be positive, got {}",
            drawer.travel_extent
        )));
    }

    if !drawer.margin.is_finite() || drawer.margin < 0.0 {
        return Err(ShellError::Config(format!(
            "{section}.margin must not be negative, got {}",
            drawer.margin
        )));
    }

    if drawer.min_duration_ms == 0 {
        return Err(ShellError::Config(format!(
            "{section}.min_duration_ms must be positive"
        )));
    }

    if drawer.base_duration_ms < drawer.min_duration_ms {
        return Err(ShellError::Config(format!(
            "{section}.base_duration_ms ({}) is below min_duration_ms ({})",
            drawer.base_duration_ms, drawer.min_duration_ms
        )));
    }

    Ok(())
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            menu_drawer: default_menu_drawer(),
            queue_drawer: default_queue_drawer(),
            window: WindowSettings::default(),
            transport: TransportSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

// Default values
fn default_menu_drawer() -> DrawerSettings {
    DrawerSettings::menu()
}

fn default_queue_drawer() -> DrawerSettings {
    DrawerSettings::queue()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_volume() -> u8 {
    50
}
