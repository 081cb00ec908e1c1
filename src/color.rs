// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning escape times into colours.
//!
//! The calculator only ever produces a number (or nothing), and the
//! choice of what that number looks like is entirely the caller's.
//! That choice is a `ColorMapper`.  A handful of schemes are provided
//! here, along with the two pieces of arithmetic every scheme ends up
//! needing: a straight-line `gradient` between two colours, and an
//! `average` for folding supersamples back into one pixel.

use num::clamp;
use std::str::FromStr;

use crate::calculate::Escape;
use crate::error::MandelError;

/// An eight-bit RGBA colour.  Everything this crate produces is opaque.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha; 0xFF is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black, the conventional colour of the set's interior.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// An opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }
}

#[inline]
fn lerp_channel(start: u8, end: u8, percentage: f64) -> u8 {
    let v = f64::from(start) + (f64::from(end) - f64::from(start)) * percentage;
    // Truncate toward zero, then wrap into eight bits.
    (v as i64) as u8
}

/// Interpolate each channel independently from `start` to `end`.
///
/// Channels are truncated, not rounded.  `percentage` is not clamped:
/// values outside `[0, 1]` overshoot and wrap around, so callers that
/// care must clamp it themselves.
pub fn gradient(start: Color, end: Color, percentage: f64) -> Color {
    Color {
        r: lerp_channel(start.r, end.r, percentage),
        g: lerp_channel(start.g, end.g, percentage),
        b: lerp_channel(start.b, end.b, percentage),
        a: lerp_channel(start.a, end.a, percentage),
    }
}

/// `gradient` expressed as step `step` of a run of `max` steps, so
/// that step `max - 1` lands on `end`.
pub fn gradient_steps(start: Color, end: Color, max: usize, step: usize) -> Color {
    let span = if max > 1 { max - 1 } else { 1 };
    gradient(start, end, step as f64 / span as f64)
}

/// Per-channel floor of the mean.  Alpha is always forced opaque, and
/// an empty slice averages to opaque black.
pub fn average(colors: &[Color]) -> Color {
    if colors.is_empty() {
        return Color::BLACK;
    }
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for c in colors {
        r += u64::from(c.r);
        g += u64::from(c.g);
        b += u64::from(c.b);
    }
    let l = colors.len() as u64;
    Color::rgb((r / l) as u8, (g / l) as u8, (b / l) as u8)
}

/// Anything that can colour an escape time.  Mappers are shared by
/// every render worker, hence `Sync`.
///
/// The bounded case (`None`) must be handled explicitly; by convention
/// it is black.
pub trait ColorMapper: Sync {
    /// The colour for one sample.
    fn map(&self, escape: Escape) -> Color;
}

impl<F> ColorMapper for F
where
    F: Fn(Escape) -> Color + Sync,
{
    fn map(&self, escape: Escape) -> Color {
        self(escape)
    }
}

/// `n % 255` on every channel.
#[derive(Copy, Clone, Debug, Default)]
pub struct Grayscale;

impl ColorMapper for Grayscale {
    fn map(&self, escape: Escape) -> Color {
        match escape {
            None => Color::BLACK,
            Some(n) => {
                let v = (n % 255) as u8;
                Color::rgb(v, v, v)
            }
        }
    }
}

/// A smooth black-to-white ramp reaching white at `max - 1`.
#[derive(Copy, Clone, Debug)]
pub struct GradientGrayscale {
    /// Number of steps in the ramp; usually the iteration limit.
    pub max: usize,
}

impl ColorMapper for GradientGrayscale {
    fn map(&self, escape: Escape) -> Color {
        match escape {
            None => Color::BLACK,
            Some(n) => {
                let span = if self.max > 1 { self.max - 1 } else { 1 };
                let p = clamp(n as f64 / span as f64, 0.0, 1.0);
                gradient(Color::BLACK, Color::WHITE, p)
            }
        }
    }
}

/// One stretch of a `Banded` scheme.
#[derive(Copy, Clone, Debug)]
pub struct Band {
    /// How many escape values this band covers.
    pub length: usize,
    /// Colour of the first value in the band.
    pub start: Color,
    /// Colour of the last value in the band.
    pub end: Color,
}

impl Band {
    /// Convenience constructor.
    pub const fn new(length: usize, start: Color, end: Color) -> Band {
        Band { length, start, end }
    }
}

/// A multi-stop gradient: consecutive bands of escape values, each a
/// gradient of its own.  Values past the last band stay on its end
/// colour.
#[derive(Clone, Debug)]
pub struct Banded {
    bands: Vec<Band>,
}

const BLUE: Color = Color::rgb(0, 100, 255);
const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const PURE_BLUE: Color = Color::rgb(0, 0, 255);
const YELLOW: Color = Color::rgb(255, 255, 0);

impl Banded {
    /// A scheme made of `bands`, in order of increasing escape time.
    pub fn new(bands: Vec<Band>) -> Banded {
        Banded { bands }
    }

    /// Blue through white and red into yellow.
    pub fn ocean() -> Banded {
        Banded::new(vec![
            Band::new(300, BLUE, Color::WHITE),
            Band::new(300, Color::WHITE, RED),
            Band::new(400, RED, YELLOW),
        ])
    }

    /// Red to white and back, then on into yellow.
    pub fn crimson() -> Banded {
        Banded::new(vec![
            Band::new(300, RED, Color::WHITE),
            Band::new(300, Color::WHITE, RED),
            Band::new(400, RED, YELLOW),
        ])
    }

    /// Red, green and blue washes out of white.
    pub fn christmas() -> Banded {
        Banded::new(vec![
            Band::new(100, Color::WHITE, RED),
            Band::new(200, Color::WHITE, GREEN),
            Band::new(300, Color::WHITE, PURE_BLUE),
            Band::new(400, PURE_BLUE, Color::WHITE),
        ])
    }
}

impl ColorMapper for Banded {
    fn map(&self, escape: Escape) -> Color {
        let n = match escape {
            None => return Color::BLACK,
            Some(n) => n,
        };
        let mut offset = 0;
        for (i, band) in self.bands.iter().enumerate() {
            let last = i + 1 == self.bands.len();
            if n - offset < band.length || last {
                let span = if band.length > 1 { band.length - 1 } else { 1 };
                let p = clamp((n - offset) as f64 / span as f64, 0.0, 1.0);
                return gradient(band.start, band.end, p);
            }
            offset = offset.saturating_add(band.length);
        }
        Color::BLACK
    }
}

/// Cyclic palette lookup.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// A palette cycling through `colors`.
    pub fn new(colors: Vec<Color>) -> Palette {
        Palette { colors }
    }
}

impl ColorMapper for Palette {
    fn map(&self, escape: Escape) -> Color {
        match escape {
            Some(n) if !self.colors.is_empty() => self.colors[n % self.colors.len()],
            _ => Color::BLACK,
        }
    }
}

/// The schemes selectable by name from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// `Grayscale`
    Grayscale,
    /// `GradientGrayscale` over the iteration limit
    Gradient,
    /// `Banded::ocean`
    Ocean,
    /// `Banded::crimson`
    Crimson,
    /// `Banded::christmas`
    Christmas,
}

impl ColorScheme {
    /// Every name `from_str` accepts.
    pub const NAMES: &'static [&'static str] =
        &["grayscale", "gradient", "ocean", "crimson", "christmas"];

    /// Build the mapper.  `limit` only matters to schemes that stretch
    /// themselves over the whole iteration range.
    pub fn mapper(self, limit: usize) -> Box<dyn ColorMapper> {
        match self {
            ColorScheme::Grayscale => Box::new(Grayscale),
            ColorScheme::Gradient => Box::new(GradientGrayscale { max: limit }),
            ColorScheme::Ocean => Box::new(Banded::ocean()),
            ColorScheme::Crimson => Box::new(Banded::crimson()),
            ColorScheme::Christmas => Box::new(Banded::christmas()),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = MandelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grayscale" => Ok(ColorScheme::Grayscale),
            "gradient" => Ok(ColorScheme::Gradient),
            "ocean" => Ok(ColorScheme::Ocean),
            "crimson" => Ok(ColorScheme::Crimson),
            "christmas" => Ok(ColorScheme::Christmas),
            _ => Err(MandelError::UnknownColorScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Color = Color::rgb(128, 64, 32);

    #[test]
    fn average_of_nothing_is_opaque_black() {
        assert_eq!(average(&[]), Color { r: 0, g: 0, b: 0, a: 0xff });
    }

    #[test]
    fn average_floors_the_mean() {
        let colors = [Color::BLACK, Color::WHITE, Color::WHITE, Color::WHITE];
        assert_eq!(average(&colors), Color::rgb(191, 191, 191));
    }

    #[test]
    fn average_does_not_overflow() {
        let colors = vec![Color::WHITE; 1024];
        assert_eq!(average(&colors), Color::WHITE);
    }

    #[test]
    fn average_forces_alpha() {
        let clear = Color { r: 10, g: 20, b: 30, a: 0 };
        assert_eq!(average(&[clear]).a, 0xff);
    }

    #[test]
    fn gradient_hits_both_ends() {
        assert_eq!(gradient(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(gradient(Color::BLACK, Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn gradient_between_equal_colors_is_constant() {
        for &p in &[-3.0, 0.0, 0.25, 0.5, 1.0, 7.5] {
            assert_eq!(gradient(GREY, GREY, p), GREY);
        }
    }

    #[test]
    fn gradient_truncates() {
        // 255 * 0.5 = 127.5
        assert_eq!(gradient(Color::BLACK, Color::WHITE, 0.5), Color::rgb(127, 127, 127));
        // 255 - 255 * 0.5 = 127.5
        assert_eq!(gradient(Color::WHITE, Color::BLACK, 0.5), Color::rgb(127, 127, 127));
    }

    #[test]
    fn gradient_wraps_outside_the_unit_range() {
        // 255 * 1.1 = 280.5 -> 280 -> 24
        assert_eq!(gradient(Color::BLACK, Color::WHITE, 1.1).r, 24);
        // -25.5 -> -25 -> 231
        assert_eq!(gradient(Color::BLACK, Color::WHITE, -0.1).r, 231);
    }

    #[test]
    fn gradient_steps_ends_on_the_last_step() {
        assert_eq!(gradient_steps(Color::BLACK, Color::WHITE, 300, 0), Color::BLACK);
        assert_eq!(gradient_steps(Color::BLACK, Color::WHITE, 300, 299), Color::WHITE);
        assert_eq!(gradient_steps(RED, YELLOW, 1, 0), RED);
    }

    #[test]
    fn every_scheme_paints_the_interior_black() {
        for name in ColorScheme::NAMES {
            let scheme: ColorScheme = name.parse().unwrap();
            assert_eq!(scheme.mapper(1000).map(None), Color::BLACK, "{}", name);
        }
        assert_eq!(Palette::new(vec![RED]).map(None), Color::BLACK);
    }

    #[test]
    fn grayscale_wraps_at_255() {
        assert_eq!(Grayscale.map(Some(0)), Color::BLACK);
        assert_eq!(Grayscale.map(Some(100)), Color::rgb(100, 100, 100));
        assert_eq!(Grayscale.map(Some(255)), Color::BLACK);
        assert_eq!(Grayscale.map(Some(256)), Color::rgb(1, 1, 1));
    }

    #[test]
    fn gradient_grayscale_saturates() {
        let g = GradientGrayscale { max: 1000 };
        assert_eq!(g.map(Some(0)), Color::BLACK);
        assert_eq!(g.map(Some(999)), Color::WHITE);
        assert_eq!(g.map(Some(1000)), Color::WHITE);
    }

    #[test]
    fn banded_walks_through_its_bands() {
        let ocean = Banded::ocean();
        assert_eq!(ocean.map(Some(0)), BLUE);
        assert_eq!(ocean.map(Some(299)), Color::WHITE);
        assert_eq!(ocean.map(Some(300)), Color::WHITE);
        assert_eq!(ocean.map(Some(599)), RED);
        assert_eq!(ocean.map(Some(600)), RED);
        assert_eq!(ocean.map(Some(999)), YELLOW);
        assert_eq!(ocean.map(Some(5000)), YELLOW);
    }

    #[test]
    fn huge_bands_do_not_overflow() {
        let banded = Banded::new(vec![
            Band::new(10, Color::BLACK, Color::WHITE),
            Band::new(std::usize::MAX, RED, YELLOW),
            Band::new(5, GREEN, PURE_BLUE),
        ]);
        assert_eq!(banded.map(Some(20)), RED);
        assert_eq!(banded.map(Some(std::usize::MAX)), YELLOW);
        assert_eq!(banded.map(Some(9)), Color::WHITE);
    }

    #[test]
    fn empty_banded_is_black() {
        assert_eq!(Banded::new(vec![]).map(Some(3)), Color::BLACK);
    }

    #[test]
    fn palette_cycles() {
        let p = Palette::new(vec![RED, GREEN, PURE_BLUE]);
        assert_eq!(p.map(Some(0)), RED);
        assert_eq!(p.map(Some(4)), GREEN);
        assert_eq!(Palette::new(vec![]).map(Some(4)), Color::BLACK);
    }

    #[test]
    fn closures_are_mappers() {
        let f = |e: Escape| if e.is_some() { RED } else { GREEN };
        assert_eq!(f.map(Some(1)), RED);
        assert_eq!(f.map(None), GREEN);
    }

    #[test]
    fn unknown_schemes_are_rejected() {
        assert!("Ocean".parse::<ColorScheme>().is_ok());
        match "plaid".parse::<ColorScheme>() {
            Err(MandelError::UnknownColorScheme(name)) => assert_eq!(name, "plaid"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
