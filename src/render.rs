// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render engine.
//!
//! Every pixel of a Mandelbrot image can be computed without knowing
//! anything about any other pixel, which makes the problem
//! embarrassingly parallel.  The renderer splits the image buffer
//! into rows, puts the rows in a queue, and lets a fixed pool of
//! worker threads pull rows off the queue until it is empty.  Each
//! row is a disjoint mutable slice of the buffer, so a worker owns the
//! pixels it is writing and no pixel ever needs a lock.

use log::{debug, info};
use std::sync::Mutex;
use std::time::Instant;

use crate::color::{Color, ColorMapper};
use crate::error::MandelError;
use crate::planes::{Pixel, Viewport};
use crate::sampler::sample_color;

/// Everything about a render except where it looks.
#[derive(Copy, Clone)]
pub struct RenderConfig<'a> {
    /// Bailout limit handed to the calculator.
    pub limit: usize,
    /// Samples per pixel along each axis.
    pub anti_alias: usize,
    /// How escape times become colours.
    pub colors: &'a dyn ColorMapper,
}

impl<'a> RenderConfig<'a> {
    /// Constructor.  An `anti_alias` below 1 is raised to 1.
    pub fn new(limit: usize, anti_alias: usize, colors: &'a dyn ColorMapper) -> Self {
        RenderConfig {
            limit,
            anti_alias: anti_alias.max(1),
            colors,
        }
    }
}

/// A finished image: `width * height` colours in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    fn for_viewport(viewport: &Viewport) -> Self {
        PixelBuffer {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![Color::BLACK; viewport.len()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The colour at column `x`, row `y`, if that is inside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Four bytes per pixel, as the image encoders want them.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        bytes
    }

    /// Three bytes per pixel, for formats without an alpha channel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            bytes.extend_from_slice(&[c.r, c.g, c.b]);
        }
        bytes
    }
}

/// Renders viewports with a fixed configuration and a fixed number of
/// worker threads.
pub struct Renderer<'a> {
    config: RenderConfig<'a>,
    workers: usize,
}

impl<'a> Renderer<'a> {
    /// A renderer using one worker per CPU.
    pub fn new(config: RenderConfig<'a>) -> Self {
        Renderer {
            config,
            workers: num_cpus::get(),
        }
    }

    /// Override the size of the worker pool.  Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// The configuration every render uses.
    pub fn config(&self) -> &RenderConfig<'a> {
        &self.config
    }

    /// Render one image.  Returns only once every pixel has been
    /// written; either the whole buffer comes back or an error does.
    pub fn render(&self, viewport: &Viewport) -> Result<PixelBuffer, MandelError> {
        viewport.validate()?;
        if self.config.limit == 0 {
            return Err(MandelError::InvalidLimit);
        }

        let workers = self.workers.max(1).min(viewport.height);
        info!(
            "Rendering {}x{} at ({}, {}), zoom {}, limit {}, anti-alias {}",
            viewport.width,
            viewport.height,
            viewport.center_x,
            viewport.center_y,
            viewport.zoom,
            self.config.limit,
            self.config.anti_alias
        );
        debug!("Using {} worker threads", workers);
        let started = Instant::now();

        let mut buffer = PixelBuffer::for_viewport(viewport);
        let span = viewport.plane_span();
        let config = &self.config;
        {
            let rows = Mutex::new(buffer.pixels.chunks_mut(viewport.width).enumerate());
            let rows = &rows;
            crossbeam::scope(|spawner| {
                for _ in 0..workers {
                    spawner.spawn(move |_| loop {
                        let row = rows.lock().ok().and_then(|mut rows| rows.next());
                        match row {
                            Some((y, row)) => render_row(viewport, config, span, y, row),
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .map_err(|_| MandelError::WorkerPanicked)?;
        }

        info!("Rendered in {:?}", started.elapsed());
        Ok(buffer)
    }
}

fn render_row(viewport: &Viewport, config: &RenderConfig, span: f64, y: usize, row: &mut [Color]) {
    for (x, pixel) in row.iter_mut().enumerate() {
        let point = viewport.pixel_to_point(Pixel(x, y));
        *pixel = sample_color(
            point.re,
            point.im,
            span,
            config.anti_alias,
            config.limit,
            config.colors,
        );
    }
}

/// Render `viewport` on a pool of one worker per CPU.
pub fn render(viewport: &Viewport, config: RenderConfig) -> Result<PixelBuffer, MandelError> {
    Renderer::new(config).render(viewport)
}
