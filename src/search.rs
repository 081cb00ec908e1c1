// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Finding somewhere worth looking.
//!
//! Most of the complex plane is boring: points far from the set
//! escape at once, points deep inside never do.  The detail lives on
//! the border, where points take a long time to make up their minds.
//! This module throws darts at the plane until it hits one of those.

use log::{trace, warn};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::calculate::calculate;

/// The bailout limit used to judge a candidate.
pub const SEARCH_LIMIT: usize = 1000;

/// A candidate must take strictly longer than this to escape.
pub const SEARCH_THRESHOLD: usize = 990;

fn is_interesting(x: f64, y: f64) -> bool {
    match calculate(x, y, SEARCH_LIMIT) {
        Some(i) => i > SEARCH_THRESHOLD,
        None => false,
    }
}

/// Starting with the seed, keep drawing points uniformly from the
/// square `[-2, 2) x [-2, 2)` until one escapes slowly.
///
/// There is no upper bound on how long this takes; use
/// `try_find_interesting_point` when that matters.
pub fn find_interesting_point<R: Rng + ?Sized>(seed_x: f64, seed_y: f64, rng: &mut R) -> (f64, f64) {
    let square = Uniform::new(-2.0_f64, 2.0_f64);
    let (mut x, mut y) = (seed_x, seed_y);
    loop {
        if is_interesting(x, y) {
            return (x, y);
        }
        trace!("Rejected candidate {}, {}", x, y);
        x = square.sample(rng);
        y = square.sample(rng);
    }
}

/// As `find_interesting_point`, but gives up after testing
/// `max_attempts` candidates (the seed included).
pub fn try_find_interesting_point<R: Rng + ?Sized>(
    seed_x: f64,
    seed_y: f64,
    rng: &mut R,
    max_attempts: usize,
) -> Option<(f64, f64)> {
    let square = Uniform::new(-2.0_f64, 2.0_f64);
    let (mut x, mut y) = (seed_x, seed_y);
    for attempt in 0..max_attempts {
        if is_interesting(x, y) {
            trace!("Accepted {}, {} after {} attempts", x, y, attempt + 1);
            return Some((x, y));
        }
        x = square.sample(rng);
        y = square.sample(rng);
    }
    warn!("No interesting point found in {} attempts", max_attempts);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Walks right from the cusp at 1/4, where escape times fall off slowly.
    fn slow_escape_seed() -> (f64, f64) {
        let mut x = 0.25;
        while calculate(x, 0.0, SEARCH_LIMIT).map_or(true, |i| i <= SEARCH_THRESHOLD) {
            x += 1e-7;
        }
        (x, 0.0)
    }

    #[test]
    fn an_interesting_seed_is_returned_untouched() {
        let seed = slow_escape_seed();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(find_interesting_point(seed.0, seed.1, &mut rng), seed);
    }

    #[test]
    fn found_points_escape_slowly() {
        let mut rng = StdRng::seed_from_u64(7);
        let (x, y) = find_interesting_point(0.0, 0.0, &mut rng);
        assert!(x >= -2.0 && x < 2.0 && y >= -2.0 && y < 2.0);
        let i = calculate(x, y, SEARCH_LIMIT).unwrap();
        assert!(i > SEARCH_THRESHOLD);
    }

    #[test]
    fn search_is_reproducible_with_a_fixed_seed() {
        let first = find_interesting_point(0.0, 0.0, &mut StdRng::seed_from_u64(42));
        let second = find_interesting_point(0.0, 0.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn bounded_search_gives_up() {
        let mut rng = StdRng::seed_from_u64(3);
        // The origin never escapes, and one attempt only tests the seed.
        assert_eq!(try_find_interesting_point(0.0, 0.0, &mut rng, 1), None);
        assert_eq!(try_find_interesting_point(0.0, 0.0, &mut rng, 0), None);
    }

    #[test]
    fn bounded_search_accepts_the_seed() {
        let seed = slow_escape_seed();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(try_find_interesting_point(seed.0, seed.1, &mut rng, 1), Some(seed));
    }
}
