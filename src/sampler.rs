// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Supersampling a single pixel.
//!
//! A pixel covers a small square of the complex plane, centred on the
//! point its row and column map to.  Near the edge of the set that
//! square holds both fast- and slow-escaping points, and colouring it
//! from a single sample gives the jagged look of an aliased image.
//! Instead we split the square into an `n` by `n` grid, colour the
//! centre of every cell, and average.

use itertools::iproduct;

use crate::calculate::calculate;
use crate::color::{Color, ColorMapper};

/// The centres of an `n` by `n` grid of cells covering the square
/// `span` wide centred on `(a, b)`, column by column.
fn sample_points(a: f64, b: f64, span: f64, n: usize) -> impl Iterator<Item = (f64, f64)> {
    let sub = span / n as f64;
    let half = span / 2.0;
    iproduct!(0..n, 0..n).map(move |(i, j)| {
        (
            a + ((i as f64 + 0.5) * sub - half),
            b + ((j as f64 + 0.5) * sub - half),
        )
    })
}

/// Colour the pixel centred on `(a, b)` whose footprint is
/// `pixel_span` wide.  An `anti_alias` of 0 is treated as 1, which
/// samples `(a, b)` alone.  Cost grows with the square of `anti_alias`.
///
/// Supersamples are folded into the same floor-of-the-mean, opaque
/// result `average` gives, without collecting them first.
pub fn sample_color<M>(
    a: f64,
    b: f64,
    pixel_span: f64,
    anti_alias: usize,
    limit: usize,
    colors: &M,
) -> Color
where
    M: ColorMapper + ?Sized,
{
    let n = anti_alias.max(1);
    if n == 1 {
        return colors.map(calculate(a, b, limit));
    }

    let sums = sample_points(a, b, pixel_span, n).fold((0u64, 0u64, 0u64), |sums, (x, y)| {
        let c = colors.map(calculate(x, y, limit));
        (
            sums.0 + u64::from(c.r),
            sums.1 + u64::from(c.g),
            sums.2 + u64::from(c.b),
        )
    });
    let count = (n * n) as u64;
    Color::rgb(
        (sums.0 / count) as u8,
        (sums.1 / count) as u8,
        (sums.2 / count) as u8,
    )
}
