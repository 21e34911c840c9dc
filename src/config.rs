use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for wavecmp
///
/// Every knob the renderer exposes lives here so the same pipeline can run
/// against temporary directories in tests instead of hard-wired paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanning settings
    pub scan: ScanConfig,

    /// Waveform plot settings
    pub plot: PlotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        self.plot.validate()?;
        Ok(())
    }
}

/// Directory scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions treated as audio (lowercase, without the dot)
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "wav".to_string(),
                "flac".to_string(),
                "mp3".to_string(),
                "ogg".to_string(),
            ],
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "scan.extensions".to_string(),
                value: "[]".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Waveform plot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Waveform color (hex, e.g. "#00BFFF")
    pub wave_color: String,

    /// Tick label and axis text color
    pub axis_color: String,

    /// Left/bottom spine color
    pub spine_color: String,

    /// Horizontal grid line color
    pub grid_color: String,

    /// Background fill color; when `transparent` is set, pixels matching
    /// this color exactly become fully transparent in the output PNG
    pub background_color: String,

    /// Emit a transparent-background PNG
    pub transparent: bool,

    /// Multiplicative headroom applied to the peak so the waveform does
    /// not touch the plot edge
    pub margin_factor: f32,

    /// Output image extension (without the dot); only "png" carries the
    /// alpha channel the transparent background needs
    pub image_ext: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 360,
            wave_color: "#00BFFF".to_string(),
            axis_color: "#555555".to_string(),
            spine_color: "#dddddd".to_string(),
            grid_color: "#eeeeee".to_string(),
            background_color: "#ffffff".to_string(),
            transparent: true,
            margin_factor: 1.02,
            image_ext: "png".to_string(),
        }
    }
}

impl PlotConfig {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "plot.dimensions".to_string(),
                value: format!("{}x{}", self.width, self.height),
            }
            .into());
        }

        if self.margin_factor < 1.0 {
            return Err(ConfigError::InvalidValue {
                key: "plot.margin_factor".to_string(),
                value: self.margin_factor.to_string(),
            }
            .into());
        }

        for (key, value) in [
            ("plot.wave_color", &self.wave_color),
            ("plot.axis_color", &self.axis_color),
            ("plot.spine_color", &self.spine_color),
            ("plot.grid_color", &self.grid_color),
            ("plot.background_color", &self.background_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }

        // PNG is the only encoder built in, and the only format with alpha
        if self.image_ext != "png" {
            return Err(ConfigError::InvalidValue {
                key: "plot.image_ext".to_string(),
                value: self.image_ext.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Parse a "#RRGGBB" color string into an RGB triple
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original_config = Config::default();

        // Save and load
        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config.plot.width, loaded_config.plot.width);
        assert_eq!(original_config.plot.wave_color, loaded_config.plot.wave_color);
        assert_eq!(original_config.scan.extensions, loaded_config.scan.extensions);
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut config = Config::default();
        config.plot.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_color() {
        let mut config = Config::default();
        config.plot.wave_color = "blue".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_margin_factor() {
        let mut config = Config::default();
        config.plot.margin_factor = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_png_image_ext_is_rejected() {
        let mut config = Config::default();
        config.plot.image_ext = "jpg".to_string();
        assert!(config.validate().is_err());

        config.plot.image_ext = ".png".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#00BFFF"), Some((0x00, 0xBF, 0xFF)));
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("00BFFF"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::from_file("/nonexistent/wavecmp.toml");
        assert!(result.is_err());
    }
}
