use image::{
    imageops::{self, FilterType},
    GrayImage, Luma,
};

use crate::raster::BACKGROUND;

/// Crop-to-content, proportional resize, offset-recenter onto a fresh
/// canvas. The two glyph sources use different parameters: rendered font
/// glyphs fill more of the canvas than the thinner handwritten strokes,
/// and each gets its own placement bias.
#[derive(Clone, Copy, Debug)]
pub struct Recenter {
    /// Resize target as a fraction of the canvas side length.
    pub scale: f32,
    pub x_offset: i64,
    pub y_offset: i64,
}

/// Parameters for glyphs rendered from the font.
pub const RENDERED: Recenter = Recenter {
    scale: 0.95,
    x_offset: 25,
    y_offset: -25,
};

/// Parameters for harvested handwriting samples.
pub const HANDWRITTEN: Recenter = Recenter {
    scale: 0.80,
    x_offset: 10,
    y_offset: -5,
};

impl Recenter {
    /// A pure-background image has no bounding box and passes through as
    /// a fresh background canvas. The resize targets a fixed square, so
    /// aspect ratio is deliberately not preserved.
    pub fn apply(&self, img: &GrayImage, canvas_size: u32) -> GrayImage {
        let mut canvas = GrayImage::from_pixel(canvas_size, canvas_size, Luma([BACKGROUND]));
        let Some((x0, y0, x1, y1)) = content_bounds(img) else {
            return canvas;
        };
        let cropped = imageops::crop_imm(img, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image();
        let side = (canvas_size as f32 * self.scale) as u32;
        let resized = imageops::resize(&cropped, side, side, FilterType::Lanczos3);
        let x = (i64::from(canvas_size) - i64::from(resized.width())) / 2 + self.x_offset;
        let y = (i64::from(canvas_size) - i64::from(resized.height())) / 2 + self.y_offset;
        imageops::replace(&mut canvas, &resized, x, y);
        canvas
    }
}

/// Tight bounding box (inclusive corners) of non-background pixels.
pub fn content_bounds(img: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[0] == BACKGROUND {
            continue;
        }
        match &mut bounds {
            None => bounds = Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => {
                *x0 = (*x0).min(x);
                *y0 = (*y0).min(y);
                *x1 = (*x1).max(x);
                *y1 = (*y1).max(y);
            }
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::INK;

    const CANVAS: u32 = 256;

    #[test]
    fn bounds_of_scattered_pixels() {
        let mut img = GrayImage::from_pixel(32, 32, Luma([BACKGROUND]));
        img.put_pixel(3, 4, Luma([INK]));
        img.put_pixel(10, 12, Luma([128]));
        assert_eq!(content_bounds(&img), Some((3, 4, 10, 12)));
    }

    #[test]
    fn bounds_of_blank_image() {
        let img = GrayImage::from_pixel(32, 32, Luma([BACKGROUND]));
        assert_eq!(content_bounds(&img), None);
    }

    #[test]
    fn blank_canvas_passes_through() {
        let img = GrayImage::from_pixel(CANVAS, CANVAS, Luma([BACKGROUND]));
        for recenter in [RENDERED, HANDWRITTEN] {
            let out = recenter.apply(&img, CANVAS);
            assert_eq!(out, img);
        }
    }

    #[test]
    fn rendered_offsets_and_clipping() {
        let mut img = GrayImage::from_pixel(CANVAS, CANVAS, Luma([BACKGROUND]));
        img.put_pixel(100, 100, Luma([INK]));
        let out = RENDERED.apply(&img, CANVAS);
        // 1x1 crop resizes to a solid 243x243 block pasted at (31, -19),
        // clipped at the canvas edges
        assert_eq!(out.get_pixel(31, 0)[0], INK);
        assert_eq!(out.get_pixel(30, 0)[0], BACKGROUND);
        assert_eq!(out.get_pixel(255, 100)[0], INK);
        assert_eq!(out.get_pixel(200, 223)[0], INK);
        assert_eq!(out.get_pixel(200, 224)[0], BACKGROUND);
    }

    #[test]
    fn handwritten_offsets() {
        let mut img = GrayImage::from_pixel(CANVAS, CANVAS, Luma([BACKGROUND]));
        img.put_pixel(0, 255, Luma([INK]));
        let out = HANDWRITTEN.apply(&img, CANVAS);
        // 204x204 block pasted at (36, 21)
        assert_eq!(out.get_pixel(36, 21)[0], INK);
        assert_eq!(out.get_pixel(35, 21)[0], BACKGROUND);
        assert_eq!(out.get_pixel(36, 20)[0], BACKGROUND);
        assert_eq!(out.get_pixel(239, 224)[0], INK);
        assert_eq!(out.get_pixel(240, 224)[0], BACKGROUND);
    }
}
