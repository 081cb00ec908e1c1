// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Zoom animations.
//!
//! An animation is a flight from one viewport to another.  The camera
//! pans quickly and settles early (the position follows `2 * sqrt(t)`,
//! capped at 1), while the zoom starts slowly and accelerates (`t^3`),
//! so we arrive over the target before diving into it.  Each frame is
//! a pure function of its index, so frames can be rendered in any order.

use log::debug;

use crate::error::MandelError;
use crate::planes::Viewport;
use crate::render::{PixelBuffer, Renderer};

/// A flight from `start` to `end` over `frame_count` steps; frames are
/// numbered `0..=frame_count`, so there is one more frame than steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationPlan {
    start: Viewport,
    end: Viewport,
    frame_count: usize,
}

#[inline]
fn mix(start: f64, end: f64, mult: f64) -> f64 {
    // Written this way round so that mult 0 and 1 reproduce the endpoints exactly.
    (1.0 - mult) * start + mult * end
}

/// Pan easing: fast start, done by a quarter of the way through.
pub fn position_ease(t: f64) -> f64 {
    (2.0 * t.sqrt()).min(1.0)
}

/// Zoom easing: slow start, accelerating to the end.
pub fn zoom_ease(t: f64) -> f64 {
    t * t * t
}

impl AnimationPlan {
    /// Constructor.  Both ends must share a frame size, and there must
    /// be at least one step.
    pub fn new(start: Viewport, end: Viewport, frame_count: usize) -> Result<Self, MandelError> {
        if frame_count == 0 {
            return Err(MandelError::InvalidFrameCount);
        }
        start.validate()?;
        if start.width != end.width || start.height != end.height {
            return Err(MandelError::FrameSizeMismatch(
                start.width,
                start.height,
                end.width,
                end.height,
            ));
        }
        Ok(AnimationPlan {
            start,
            end,
            frame_count,
        })
    }

    /// The first frame.
    pub fn start(&self) -> &Viewport {
        &self.start
    }

    /// The last frame.
    pub fn end(&self) -> &Viewport {
        &self.end
    }

    /// Number of steps; there are `frame_count() + 1` frames.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The viewport for frame `i`.  Indices past the end are treated
    /// as the last frame.
    pub fn build_frame(&self, i: usize) -> Viewport {
        let t = i.min(self.frame_count) as f64 / self.frame_count as f64;
        let pan = position_ease(t);
        let zoom = zoom_ease(t);
        Viewport::new(
            mix(self.start.center_x, self.end.center_x, pan),
            mix(self.start.center_y, self.end.center_y, pan),
            mix(self.start.zoom, self.end.zoom, zoom),
            self.start.width,
            self.start.height,
        )
    }

    /// Every frame in order, with its index.
    pub fn frames<'a>(&'a self) -> impl Iterator<Item = (usize, Viewport)> + 'a {
        (0..=self.frame_count).map(move |i| (i, self.build_frame(i)))
    }
}

/// Free-function form of `AnimationPlan::build_frame`.
pub fn build_frame(i: usize, plan: &AnimationPlan) -> Viewport {
    plan.build_frame(i)
}

/// Render every frame of `plan`, handing each finished buffer to
/// `sink` as soon as it is done.  The first error, from the renderer
/// or the sink, stops the animation.
pub fn render_animation<F>(
    renderer: &Renderer,
    plan: &AnimationPlan,
    mut sink: F,
) -> Result<(), MandelError>
where
    F: FnMut(usize, PixelBuffer) -> Result<(), MandelError>,
{
    for (i, viewport) in plan.frames() {
        debug!("Frame {}/{}", i, plan.frame_count);
        let buffer = renderer.render(&viewport)?;
        sink(i, buffer)?;
    }
    Ok(())
}
