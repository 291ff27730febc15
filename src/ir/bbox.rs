//! Axis-aligned boxes in XYXY form, tagged with their coordinate space.

use std::marker::PhantomData;

use super::{Normalized, Pixel};

/// An axis-aligned bounding box stored as (xmin, ymin, xmax, ymax).
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`]. Nothing here
/// clamps to image bounds: a box built from source data that spills past an
/// edge keeps its out-of-image corners.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            _space: PhantomData,
        }
    }

    /// Builds a box from its center point and its extent.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Returns `(xmin, ymin, xmax, ymax)`.
    #[inline]
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.xmin)
            .field("ymin", &self.ymin)
            .field("xmax", &self.xmax)
            .field("ymax", &self.ymax)
            .finish()
    }
}

impl BBoxXYXY<Normalized> {
    /// Scales a normalized box into pixel space for an image of the given size.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Pixel> {
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        BBoxXYXY::from_xyxy(self.xmin * w, self.ymin * h, self.xmax * w, self.ymax * h)
    }
}

impl BBoxXYXY<Pixel> {
    /// Corners rounded to the nearest integer pixel, as `(x0, y0, x1, y1)`.
    ///
    /// Both corners are inclusive pixel positions.
    pub fn rounded_corners(&self) -> (i32, i32, i32, i32) {
        (
            self.xmin.round() as i32,
            self.ymin.round() as i32,
            self.xmax.round() as i32,
            self.ymax.round() as i32,
        )
    }
}
