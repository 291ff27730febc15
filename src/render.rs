//! Drawing annotation boxes onto images.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::color::BoxColor;
use crate::error::YolovizError;
use crate::ir::{Annotation, BBoxXYXY, Descriptor, Pixel};

pub const DEFAULT_THICKNESS: u32 = 5;

/// Renders a descriptor's image with its annotation boxes outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxRenderer {
    pub color: BoxColor,
    /// Outline width in pixels, drawn inward from the box edge.
    pub thickness: u32,
}

impl Default for BoxRenderer {
    fn default() -> Self {
        Self {
            color: BoxColor::default(),
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl BoxRenderer {
    pub fn new(color: BoxColor, thickness: u32) -> Self {
        Self { color, thickness }
    }

    /// Loads the image and annotations behind `descriptor` and returns a new
    /// image with every box drawn, in annotation file order.
    pub fn render(&self, descriptor: &Descriptor) -> Result<RgbImage, YolovizError> {
        let mut image = descriptor.load_image()?;
        let annotations = descriptor.load_annotations()?;

        self.draw_annotations(&mut image, &annotations);
        Ok(image)
    }

    /// Draws `annotations` onto `image` in place.
    pub fn draw_annotations(&self, image: &mut RgbImage, annotations: &[Annotation]) {
        let (width, height) = image.dimensions();
        for annotation in annotations {
            let bbox = pixel_bbox(annotation, width, height);
            draw_outline(image, &bbox, self.color.rgb(), self.thickness);
        }
    }
}

/// Pixel-space box for `annotation` on an image of `width` x `height`.
pub fn pixel_bbox(annotation: &Annotation, width: u32, height: u32) -> BBoxXYXY<Pixel> {
    let (width, height) = (f64::from(width), f64::from(height));
    BBoxXYXY::from_cxcywh(
        annotation.norm_x_center * width,
        annotation.norm_y_center * height,
        annotation.norm_width * width,
        annotation.norm_height * height,
    )
}

fn draw_outline(image: &mut RgbImage, bbox: &BBoxXYXY<Pixel>, color: Rgb<u8>, thickness: u32) {
    let (x0, y0, x1, y1) = bbox.rounded_corners();

    for inset in 0..thickness.min(i32::MAX as u32) as i32 {
        let (left, top) = (x0.saturating_add(inset), y0.saturating_add(inset));
        let (right, bottom) = (x1.saturating_sub(inset), y1.saturating_sub(inset));
        if right < left || bottom < top {
            break;
        }

        let rect_width = (i64::from(right) - i64::from(left) + 1) as u32;
        let rect_height = (i64::from(bottom) - i64::from(top) + 1) as u32;
        draw_hollow_rect_mut(
            image,
            Rect::at(left, top).of_size(rect_width, rect_height),
            color,
        );
    }
}
