use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use langton_rendering::{Color, Theme};
use serde::Deserialize;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Optional palette override manifest loaded from `assets/theme.toml`.
///
/// Every color entry is optional; omitted entries keep the built-in default.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct ThemeManifest {
    version: u32,
    #[serde(default)]
    colors: ThemeColors,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
struct ThemeColors {
    window_background: Option<[u8; 3]>,
    canvas_background: Option<[u8; 3]>,
    live_cell: Option<[u8; 3]>,
    ant: Option<[u8; 3]>,
    panel_background: Option<[u8; 3]>,
    panel_accent: Option<[u8; 3]>,
    accent: Option<[u8; 3]>,
    text: Option<[u8; 3]>,
}

impl ThemeManifest {
    fn apply(&self, theme: &mut Theme) {
        let entries = [
            (self.colors.window_background, &mut theme.window_background),
            (self.colors.canvas_background, &mut theme.canvas_background),
            (self.colors.live_cell, &mut theme.live_cell),
            (self.colors.ant, &mut theme.ant),
            (self.colors.panel_background, &mut theme.panel_background),
            (self.colors.panel_accent, &mut theme.panel_accent),
            (self.colors.accent, &mut theme.accent),
            (self.colors.text, &mut theme.text),
        ];
        for (override_rgb, slot) in entries {
            if let Some([red, green, blue]) = override_rgb {
                *slot = Color::from_rgb_u8(red, green, blue);
            }
        }
    }
}

/// Applies the palette overrides from `path` onto the default theme. A
/// missing file simply yields the defaults; a malformed file is an error so
/// typos do not silently restyle the window.
pub(crate) fn load_theme(path: &Path) -> Result<Theme> {
    let mut theme = Theme::default();
    if !path.exists() {
        return Ok(theme);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read theme manifest at {}", path.display()))?;
    let manifest: ThemeManifest =
        toml::from_str(&contents).context("failed to parse theme manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported theme manifest version {} (expected {})",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    manifest.apply(&mut theme);
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_overrides_only_named_colors() {
        let manifest: ThemeManifest = toml::from_str(
            r#"
            version = 1

            [colors]
            live_cell = [255, 0, 0]
            accent = [1, 2, 3]
            "#,
        )
        .expect("manifest should parse");

        let mut theme = Theme::default();
        manifest.apply(&mut theme);
        assert_eq!(theme.live_cell, Color::from_rgb_u8(255, 0, 0));
        assert_eq!(theme.accent, Color::from_rgb_u8(1, 2, 3));
        assert_eq!(theme.ant, Theme::default().ant);
    }

    #[test]
    fn missing_manifest_keeps_the_default_theme() {
        let theme = load_theme(Path::new("does/not/exist.toml")).expect("defaults expected");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn colors_table_is_optional() {
        let manifest: ThemeManifest =
            toml::from_str("version = 1").expect("bare manifest should parse");
        assert_eq!(manifest, ThemeManifest { version: 1, colors: ThemeColors::default() });
    }
}
