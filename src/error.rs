// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by the renderer, the animator and the encoders.
//!
//! The escape calculation, the colour mappers and the sampler never
//! fail; everything here comes either from configuration checked
//! before any pixel is computed, or from the image encoder.

use failure::Fail;
use std::io;

/// Everything that can go wrong between a configuration and a file on disk.
#[derive(Debug, Fail)]
pub enum MandelError {
    /// The image must have at least one row and one column.
    #[fail(display = "Image dimensions must be positive, got {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The bailout limit must allow at least one iteration.
    #[fail(display = "Iteration limit must be positive")]
    InvalidLimit,

    /// An animation needs at least one frame after the first.
    #[fail(display = "Frame count must be positive")]
    InvalidFrameCount,

    /// Video collaborators take a fixed frame size.
    #[fail(
        display = "Start and end frames differ in size: {}x{} vs {}x{}",
        _0, _1, _2, _3
    )]
    FrameSizeMismatch(usize, usize, usize, usize),

    /// The named colour scheme does not exist.
    #[fail(display = "No color scheme found by name: {}", _0)]
    UnknownColorScheme(String),

    /// The output path has no extension we know how to encode.
    #[fail(display = "Cannot determine image format for {}", _0)]
    UnsupportedFormat(String),

    /// Passed through untouched from the encoder or the filesystem.
    #[fail(display = "Could not write image: {}", _0)]
    Encode(#[cause] io::Error),

    /// A worker thread died before its rows were finished.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}

impl From<io::Error> for MandelError {
    fn from(err: io::Error) -> Self {
        MandelError::Encode(err)
    }
}
