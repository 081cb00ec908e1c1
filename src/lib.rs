#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` back in never
//! carries `z` off to infinity.  Points outside the set do escape,
//! and how quickly they escape is the number we paint with: the
//! renderer maps every pixel to a point, counts its iterations,
//! asks a `ColorMapper` what that count looks like, and averages a
//! small grid of such samples per pixel to smooth the edges.
//!
//! The work is split over a pool of threads, one row of the image at
//! a time.  A sequence of viewports, easing from one place and zoom
//! to another, turns the same machinery into an animation.

pub mod animation;
pub mod calculate;
pub mod color;
pub mod encode;
pub mod error;
pub mod planes;
pub mod render;
pub mod sampler;
pub mod search;

pub use animation::{build_frame, render_animation, AnimationPlan};
pub use calculate::{calculate, escape, Escape};
pub use color::{
    average, gradient, gradient_steps, Band, Banded, Color, ColorMapper, ColorScheme,
    GradientGrayscale, Grayscale, Palette,
};
pub use encode::{encode, write_frame, write_image, OutputFormat};
pub use error::MandelError;
pub use planes::{Pixel, Viewport};
pub use render::{render, PixelBuffer, RenderConfig, Renderer};
pub use sampler::sample_color;
pub use search::{find_interesting_point, try_find_interesting_point};
