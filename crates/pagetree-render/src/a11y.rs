//! Color accessibility utilities.
//!
//! Contrast is computed with the WCAG 2 definitions:
//!
//! - relative luminance: sRGB channels converted to linear light and weighted
//!   `0.2126 R + 0.7152 G + 0.0722 B`
//! - contrast ratio: `(L1 + 0.05) / (L2 + 0.05)` with `L1` the lighter color
//!
//! Only literal hex colors (`#rgb`, `#rrggbb`) are evaluated. CSS variable
//! references, named colors and gradients cannot be resolved here and pass
//! through every function unchanged.
//!
//! ```rust
//! use pagetree_render::a11y::{contrast_ratio, validate_contrast};
//!
//! let ratio = contrast_ratio("#ffffff", "#000000").unwrap();
//! assert!((ratio - 21.0).abs() < 0.01);
//!
//! // Mid grey on white fails AA and is replaced.
//! assert_eq!(validate_contrast("#777777", "#ffffff", "Text", "intro"), "#1a1a1a");
//! assert_eq!(validate_contrast("#000000", "#ffffff", "Text", "intro"), "#000000");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::style::{is_layout_utility, StyleMap};

/// Minimum contrast ratio for normal-size text (WCAG AA).
pub const WCAG_AA_NORMAL: f64 = 4.5;

/// Dark neutral used to correct low-contrast text on light backgrounds.
pub const CORRECTED_DARK: &str = "#1a1a1a";

/// Light neutral used to correct low-contrast text on dark backgrounds.
pub const CORRECTED_LIGHT: &str = "#ffffff";

/// Neutral dark channel triplet substituted into `rgba(...)` colors.
pub const DARK_RGBA_TRIPLET: &str = "31, 41, 55";

static RGBA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*([0-9]*\.?[0-9]+%?)\s*\)$")
        .expect("rgba pattern is valid")
});

/// An sRGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rgb` or `#rrggbb`. Anything else is `None`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Some(Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        0.2126 * srgb_to_linear(self.0)
            + 0.7152 * srgb_to_linear(self.1)
            + 0.0722 * srgb_to_linear(self.2)
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Convert an sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color, or `None` if it is not a hex color.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    Rgb::from_hex(hex).map(Rgb::luminance)
}

/// Contrast ratio between two hex colors, always `>= 1`.
///
/// The argument order does not matter: the lighter color is always the
/// numerator.
pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    let la = relative_luminance(a)?;
    let lb = relative_luminance(b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Some((lighter + 0.05) / (darker + 0.05))
}

/// Returns a foreground color that meets WCAG AA against `background`.
///
/// When both colors are hex and the ratio is below [`WCAG_AA_NORMAL`], the
/// foreground is replaced by whichever neutral ([`CORRECTED_DARK`] or
/// [`CORRECTED_LIGHT`]) contrasts better with the background, and a warning
/// naming the component and node is logged. Otherwise `foreground` is
/// returned unchanged.
///
/// The correction is not always dark: on a dark background the light neutral
/// wins, so a failing `#333333` on `#000000` becomes `#ffffff` rather than
/// `#1a1a1a`.
pub fn validate_contrast(
    foreground: &str,
    background: &str,
    component: &str,
    node_id: &str,
) -> String {
    let Some(ratio) = contrast_ratio(foreground, background) else {
        return foreground.to_string();
    };
    if ratio >= WCAG_AA_NORMAL {
        return foreground.to_string();
    }

    let dark = contrast_ratio(CORRECTED_DARK, background).unwrap_or(0.0);
    let light = contrast_ratio(CORRECTED_LIGHT, background).unwrap_or(0.0);
    let corrected = if dark >= light {
        CORRECTED_DARK
    } else {
        CORRECTED_LIGHT
    };

    log::warn!(
        "{} #{}: contrast {:.2}:1 between {} and {} is below {}:1, using {}",
        component,
        node_id,
        ratio,
        foreground,
        background,
        WCAG_AA_NORMAL,
        corrected
    );
    corrected.to_string()
}

/// Derives the dark-theme counterpart of a color.
///
/// - `white`, `black` and `transparent` are special-cased.
/// - Hex colors keep their hue and saturation; only lightness moves. Light
///   backgrounds become dark and dark foregrounds become light. Colors already
///   on the right side are returned unchanged.
/// - `rgba(...)` colors get a neutral dark triplet with the original alpha.
/// - Anything else (gradients, `var()` references, named colors) is returned
///   unchanged.
///
/// ```rust
/// use pagetree_render::a11y::auto_dark_color;
///
/// assert_eq!(auto_dark_color("#ffffff", true), "#1a1a1a");
/// assert_eq!(auto_dark_color("rgba(255, 255, 255, 0.8)", true), "rgba(31, 41, 55, 0.8)");
/// assert_eq!(auto_dark_color("var(--brand)", false), "var(--brand)");
/// ```
pub fn auto_dark_color(color: &str, is_background: bool) -> String {
    let trimmed = color.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "white" => return CORRECTED_DARK.to_string(),
        "black" => return CORRECTED_LIGHT.to_string(),
        "transparent" => return trimmed.to_string(),
        _ => {}
    }

    if let Some(rgb) = Rgb::from_hex(trimmed) {
        let (h, s, l) = rgb.to_hsl();
        let shifted = if is_background && l > 0.5 {
            0.1 + (1.0 - l) * 0.3
        } else if !is_background && l < 0.5 {
            1.0 - l * 0.5
        } else {
            return color.to_string();
        };
        return Rgb::from_hsl(h, s, shifted).to_hex();
    }

    if let Some(caps) = RGBA.captures(trimmed) {
        return format!("rgba({}, {})", DARK_RGBA_TRIPLET, &caps[1]);
    }

    color.to_string()
}

/// Derives dark-variant tokens from a style mapping.
///
/// Every token (layout utilities excluded) holding a color is passed through
/// [`auto_dark_color`]; keys naming a background (`bg`, `background`) are
/// treated as backgrounds. Only tokens whose value actually changes are
/// returned.
pub fn dark_style_for(style: &StyleMap) -> StyleMap {
    style
        .iter()
        .filter(|(key, _)| !is_layout_utility(key))
        .filter_map(|(key, value)| {
            let color = value.as_str()?;
            let is_background = key.contains("bg") || key.contains("background");
            let dark = auto_dark_color(color, is_background);
            (dark != color).then(|| (key.clone(), Value::String(dark)))
        })
        .collect()
}
