// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! (the image), and a rectangle on the complex plane described by a
//! centre and a zoom factor.
use num::Complex;

use crate::error::MandelError;

/// The column and row of a pixel in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// At zoom 1 the image is this tall on the complex plane.
pub const BASE_SPAN: f64 = 4.0;

/// Where we are looking, and at what resolution.  The mapping is
/// square: one pixel covers the same distance on both axes, and the
/// height of the image decides how much of the plane fits in it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real part of the point at the centre of the image.
    pub center_x: f64,
    /// Imaginary part of the point at the centre of the image.
    pub center_y: f64,
    /// Magnification; never below 1.
    pub zoom: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
}

impl Viewport {
    /// Constructor.  A zoom below 1 (or NaN) is raised to 1.
    pub fn new(center_x: f64, center_y: f64, zoom: f64, width: usize, height: usize) -> Viewport {
        Viewport {
            center_x,
            center_y,
            zoom: zoom.max(1.0),
            width,
            height,
        }
    }

    /// Refuses a viewport with nothing in it.
    pub fn validate(&self) -> Result<(), MandelError> {
        if self.is_empty() {
            return Err(MandelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The total number of pixels.  Used to size the buffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the viewport has no rows or no columns to render.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The distance on the complex plane between two neighbouring pixels.
    pub fn plane_span(&self) -> f64 {
        BASE_SPAN / (self.height as f64 * self.zoom)
    }

    /// Given the column and row of a pixel, return the complex number
    /// it corresponds to.  Rows grow along the imaginary axis.  The
    /// centre pixel is `(width / 2, height / 2)` in integer division, so
    /// on odd sizes it still lands exactly on the centre point.
    pub fn pixel_to_point(&self, pixel: Pixel) -> Complex<f64> {
        let span = self.plane_span();
        Complex::new(
            self.center_x - span * (self.width / 2) as f64 + pixel.0 as f64 * span,
            self.center_y - span * (self.height / 2) as f64 + pixel.1 as f64 * span,
        )
    }
}
