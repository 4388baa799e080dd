//! Random quote index and background color selection.
//!
//! Everything here is a pure function of its inputs and the random source.
//! The `*_with` variants take an explicit `Rng` so callers (and tests) can
//! supply a seeded generator; the plain variants use the thread-local one.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A solid color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Formats as the CSS-style `rgb(r, g, b)` string.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::Other(format!("Not an rgb() color: {}", s)))?;

        let parts = inner
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Other(format!("Bad channel in '{}': {}", s, e)))?;

        match parts.as_slice() {
            [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
            _ => Err(Error::Other(format!("Expected three channels in '{}'", s))),
        }
    }
}

/// Named constraint narrowing random color generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorGroup {
    #[default]
    Any,
    Pastel,
    Bright,
    Dull,
    Gray,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 5] = [
        ColorGroup::Any,
        ColorGroup::Pastel,
        ColorGroup::Bright,
        ColorGroup::Dull,
        ColorGroup::Gray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorGroup::Any => "any",
            ColorGroup::Pastel => "pastel",
            ColorGroup::Bright => "bright",
            ColorGroup::Dull => "dull",
            ColorGroup::Gray => "gray",
        }
    }
}

impl fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ColorGroup::Any),
            "pastel" => Ok(ColorGroup::Pastel),
            "bright" => Ok(ColorGroup::Bright),
            "dull" => Ok(ColorGroup::Dull),
            "gray" | "grey" => Ok(ColorGroup::Gray),
            other => Err(Error::ConfigError(format!("Unknown color group: {}", other))),
        }
    }
}

/// Uniform index into a sequence of `len` items, `None` when empty.
pub fn random_index(len: usize) -> Option<usize> {
    random_index_with(&mut rand::rng(), len)
}

pub fn random_index_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.random_range(0..len))
}

/// Like [`random_index`] but tolerates an absent sequence.
pub fn random_index_of<T>(items: Option<&[T]>) -> Option<usize> {
    random_index(items.map_or(0, |s| s.len()))
}

pub fn random_color(group: ColorGroup) -> Rgb {
    random_color_with(&mut rand::rng(), group)
}

pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R, group: ColorGroup) -> Rgb {
    match group {
        ColorGroup::Any => random_rgb(rng),
        ColorGroup::Pastel => {
            let c = random_rgb(rng);
            Rgb::new(halfway(c.r, 255), halfway(c.g, 255), halfway(c.b, 255))
        }
        ColorGroup::Bright => hue_to_rgb(rng.random_range(0.0..360.0)),
        ColorGroup::Dull => {
            let c = random_rgb(rng);
            let dark = [c.r / 2, c.g / 2, c.b / 2];
            let avg = ((dark[0] as u16 + dark[1] as u16 + dark[2] as u16) / 3) as u8;
            Rgb::new(
                halfway(dark[0], avg),
                halfway(dark[1], avg),
                halfway(dark[2], avg),
            )
        }
        ColorGroup::Gray => {
            let v = rng.random_range(0..=255u8);
            Rgb::new(v, v, v)
        }
    }
}

/// Random color for a textual group tag as an `rgb(...)` string.
/// Unknown tags fall back to black.
pub fn random_color_for_tag(tag: &str) -> String {
    match tag.parse::<ColorGroup>() {
        Ok(group) => random_color(group).to_string(),
        Err(_) => {
            log::debug!("unknown color group '{}', using black", tag);
            Rgb::BLACK.to_string()
        }
    }
}

fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.random_range(0..=255u8),
        rng.random_range(0..=255u8),
        rng.random_range(0..=255u8),
    )
}

fn halfway(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

/// HSL to RGB at saturation 100% and lightness 50%.
fn hue_to_rgb(hue: f64) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_index_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..50usize {
            for _ in 0..200 {
                let i = random_index_with(&mut rng, n).unwrap();
                assert!(i < n);
            }
        }
    }

    #[test]
    fn random_index_empty_and_absent() {
        assert_eq!(random_index(0), None);
        assert_eq!(random_index_of::<u8>(None), None);
        assert_eq!(random_index_of::<u8>(Some(&[])), None);
        assert_eq!(random_index_of(Some(&[42u8][..])), Some(0));
    }

    #[test]
    fn gray_channels_are_equal() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(random_color_with(&mut rng, ColorGroup::Gray).is_gray());
        }
    }

    #[test]
    fn pastel_leans_light_and_dull_leans_dark() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let p = random_color_with(&mut rng, ColorGroup::Pastel);
            assert!(p.channels().iter().all(|&c| c >= 127));
            let d = random_color_with(&mut rng, ColorGroup::Dull);
            assert!(d.channels().iter().all(|&c| c <= 127));
        }
    }

    #[test]
    fn bright_is_fully_saturated() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let c = random_color_with(&mut rng, ColorGroup::Bright).channels();
            let max = *c.iter().max().unwrap();
            let min = *c.iter().min().unwrap();
            assert_eq!(max, 255);
            assert_eq!(min, 0);
        }
    }

    #[test]
    fn hue_anchors() {
        assert_eq!(hue_to_rgb(0.0), Rgb::new(255, 0, 0));
        assert_eq!(hue_to_rgb(120.0), Rgb::new(0, 255, 0));
        assert_eq!(hue_to_rgb(240.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn unknown_tag_is_black() {
        assert_eq!(random_color_for_tag("neon"), "rgb(0, 0, 0)");
        assert!(random_color_for_tag("GRAY").starts_with("rgb("));
    }

    #[test]
    fn rgb_string_parses_back() {
        let c: Rgb = "rgb(12, 200, 7)".parse().unwrap();
        assert_eq!(c, Rgb::new(12, 200, 7));
        assert_eq!(c.to_string(), "rgb(12, 200, 7)");
        assert!("rgb(1, 2)".parse::<Rgb>().is_err());
        assert!("#ffffff".parse::<Rgb>().is_err());
    }
}
