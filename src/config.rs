// SPDX-License-Identifier: MIT
//
// User configuration: `~/.config/tint/config.toml` (or `--config <path>`).
//
//   swatch_width = 4          # cells of color ahead of the input
//   placeholder  = ">"        # fill while the input is not a color
//   label_color  = "#707070"  # any notation tint understands
//   hsl          = "compat"   # or "standard"
//
//   [colors]                  # extra names, merged over the CSS keywords
//   brand = "#1e90ff"
//
// Every field is optional. A missing file is not an error; an unreadable or
// malformed one is logged and replaced by defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tint_color::css::parse_css;
use tint_color::live::{DEFAULT_PLACEHOLDER, DEFAULT_SWATCH_WIDTH};
use tint_color::{Color, HslMode, NamedColors, Notation, parse_color};
use tint_term::display_width;
use tracing::{debug, warn};

/// Gray used for the provenance label and report keys.
const DEFAULT_LABEL_COLOR: &str = "#707070";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub swatch_width: usize,
    pub placeholder: char,
    pub label_color: String,
    pub hsl: HslMode,
    /// Extra named colors, `name → "#hex"`.
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swatch_width: DEFAULT_SWATCH_WIDTH,
            placeholder: DEFAULT_PLACEHOLDER,
            label_color: DEFAULT_LABEL_COLOR.to_owned(),
            hsl: HslMode::default(),
            colors: BTreeMap::new(),
        }
    }
}

impl Config {
    /// `<config dir>/tint/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tint").join("config.toml"))
    }

    /// Load config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` (or the default location), falling back to
    /// defaults. A missing file is silent; any other failure is logged.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            debug!("no config directory on this platform, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(ConfigError::Read(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring config, using defaults");
                Self::default()
            }
        }
    }

    /// The built-in keywords with `[colors]` merged on top.
    ///
    /// Entries are skipped (with a warning) when the value is not 3, 6 or
    /// 8 hex digits, or when the name starts with a notation prefix and so
    /// could never be typed as a name.
    pub fn named_colors(&self) -> NamedColors {
        let mut names = NamedColors::builtin();
        let no_names = NamedColors::empty();

        for (raw_name, value) in &self.colors {
            let name = raw_name.trim().to_lowercase();
            if name.is_empty() {
                warn!("skipping custom color with an empty name");
                continue;
            }
            if Notation::classify(&name, &no_names) != Notation::Unrecognized {
                warn!(name = %name, "skipping custom color: name is read as a color notation");
                continue;
            }

            let hex = value.trim();
            let body = hex.strip_prefix('#').unwrap_or(hex);
            if parse_css(body).is_err() {
                warn!(name = %name, value = %value, "skipping custom color: value is not CSS hex");
                continue;
            }

            names.insert(&name, format!("#{}", body.to_lowercase()));
        }

        names
    }

    /// The placeholder fill, or the default when it takes no cells (a
    /// control character or a lone combining mark).
    pub fn placeholder_fill(&self) -> char {
        if display_width(&self.placeholder.to_string()) == 0 {
            warn!(placeholder = ?self.placeholder, "placeholder is not visible, using default");
            return DEFAULT_PLACEHOLDER;
        }
        self.placeholder
    }

    /// `label_color` as 8-bit RGB, read with tint's own parser.
    pub fn label_rgb(&self) -> (u8, u8, u8) {
        let names = NamedColors::builtin();
        match parse_color(&self.label_color, &names) {
            Ok(parsed) => parsed.color.to_rgb8(),
            Err(err) => {
                warn!(label_color = %self.label_color, error = %err, "invalid label_color, using default");
                default_label_rgb()
            }
        }
    }
}

fn default_label_rgb() -> (u8, u8, u8) {
    Color::from_bytes(0x70, 0x70, 0x70, 0xFF).to_rgb8()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    // ── Loading ─────────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.swatch_width, 4);
        assert_eq!(config.placeholder, '>');
        assert_eq!(config.label_color, "#707070");
        assert_eq!(config.hsl, HslMode::Compat);
        assert!(config.colors.is_empty());
    }

    #[test]
    fn default_path_ends_in_tint_config() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("tint/config.toml"));
        }
    }

    #[test]
    fn load_partial_keeps_other_defaults() {
        let (_dir, path) = write_config("swatch_width = 6\nhsl = \"standard\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.swatch_width, 6);
        assert_eq!(config.hsl, HslMode::Standard);
        assert_eq!(config.placeholder, '>');
        assert_eq!(config.label_color, "#707070");
    }

    #[test]
    fn load_colors_table() {
        let (_dir, path) = write_config(
            r##"
placeholder = "."

[colors]
brand = "#1e90ff"
"##,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.placeholder, '.');
        assert_eq!(config.colors.get("brand").map(String::as_str), Some("#1e90ff"));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let (_dir, path) = write_config("this is not valid toml {{{");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_hsl_mode_is_parse_error() {
        let (_dir, path) = write_config("hsl = \"sideways\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_or_default_falls_back() {
        let (_dir, path) = write_config("swatch_width = \"wide\"\n");
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load_or_default(Some(&missing)), Config::default());
    }

    #[test]
    fn load_or_default_reads_valid_file() {
        let (_dir, path) = write_config("swatch_width = 2\n");
        assert_eq!(Config::load_or_default(Some(&path)).swatch_width, 2);
    }

    // ── Named colors ────────────────────────────────────────────────────

    fn with_colors(entries: &[(&str, &str)]) -> Config {
        Config {
            colors: entries
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            ..Config::default()
        }
    }

    #[test]
    fn builtin_only_by_default() {
        assert_eq!(Config::default().named_colors(), NamedColors::builtin());
    }

    #[test]
    fn custom_colors_are_added_lowercased() {
        let names = with_colors(&[("Brand", "#1E90FF"), ("ink", "123")]).named_colors();
        assert_eq!(names.get("brand"), Some("#1e90ff"));
        assert_eq!(names.get("ink"), Some("#123"));
        assert_eq!(names.len(), NamedColors::builtin().len() + 2);
    }

    #[test]
    fn custom_colors_override_builtin() {
        let names = with_colors(&[("red", "#cc0000")]).named_colors();
        assert_eq!(names.get("red"), Some("#cc0000"));
    }

    #[test]
    fn invalid_custom_colors_are_skipped() {
        let names = with_colors(&[
            ("bad", "#12"),
            ("worse", "not a color"),
            ("", "#fff"),
            ("#hash", "#fff"),
            ("rgbish", "#fff"),
            ("good", "#fff"),
        ])
        .named_colors();
        assert_eq!(names.len(), NamedColors::builtin().len() + 1);
        assert!(names.contains("good"));
        assert!(!names.contains("rgbish"));
    }

    // ── Placeholder ─────────────────────────────────────────────────────

    fn with_placeholder(placeholder: char) -> Config {
        Config {
            placeholder,
            ..Config::default()
        }
    }

    #[test]
    fn placeholder_fill_keeps_visible_chars() {
        assert_eq!(with_placeholder('.').placeholder_fill(), '.');
        assert_eq!(with_placeholder('界').placeholder_fill(), '界');
    }

    #[test]
    fn placeholder_fill_rejects_zero_width() {
        assert_eq!(with_placeholder('\u{301}').placeholder_fill(), '>');
        assert_eq!(with_placeholder('\u{200b}').placeholder_fill(), '>');
    }

    // ── Label color ─────────────────────────────────────────────────────

    #[test]
    fn label_rgb_default() {
        assert_eq!(Config::default().label_rgb(), (0x70, 0x70, 0x70));
    }

    #[test]
    fn label_rgb_accepts_any_notation() {
        let config = Config {
            label_color: "gray".to_owned(),
            ..Config::default()
        };
        assert_eq!(config.label_rgb(), (0x80, 0x80, 0x80));
    }

    #[test]
    fn label_rgb_invalid_falls_back() {
        let config = Config {
            label_color: "#zz".to_owned(),
            ..Config::default()
        };
        assert_eq!(config.label_rgb(), (0x70, 0x70, 0x70));
    }
}
