// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time calculator.
//!
//! Every colour in a Mandelbrot image comes from one number: how many
//! times we can square a point and add it back to itself before the
//! result leaves the circle of radius two.  Points that never leave
//! within the bailout limit are "in" the set, and we report nothing
//! for them at all.

use num::Complex;

/// Either the iteration on which a point escaped, or `None` when the
/// point was still bounded at the bailout limit.
pub type Escape = Option<usize>;

/// Iterate `z <- z^2 + c` with `c = a + bi`, starting from `z = c`,
/// and count the iterations until `|z|^2 >= 4`.
///
/// A point that starts outside the escape radius returns `Some(0)`.
/// The result is always in `0..=limit`; a point that has not escaped
/// after `limit` steps returns `None`, so "escaped on the last
/// permitted step" and "still iterating" stay distinguishable.
pub fn calculate(a: f64, b: f64, limit: usize) -> Escape {
    let (mut x, mut y) = (a, b);
    let mut i = 0;
    while x * x + y * y < 4.0 {
        if i == limit {
            return None;
        }
        let xt = x * x - y * y + a;
        y = 2.0 * x * y + b;
        x = xt;
        i += 1;
    }
    Some(i)
}

/// `calculate` for callers already holding a complex number.
#[inline]
pub fn escape(c: Complex<f64>, limit: usize) -> Escape {
    calculate(c.re, c.im, limit)
}
