use image::{GrayImage, Luma};
use ttf_parser::Face;

use crate::edge::{Crossing, CubicCurve, Line, QuadCurve, Segment};

pub const BACKGROUND: u8 = 255;
pub const INK: u8 = 0;

/// Collects a glyph outline as pixel-space segments. Font units are
/// scaled by `scale` and flipped so y grows downward, with the baseline
/// placed at `baseline` pixels from the canvas top.
pub struct Outline {
    scale: f32,
    baseline: f32,
    segments: Vec<Segment>,
    cursor: (f32, f32),
    contour_start: (f32, f32),
}

impl Outline {
    pub fn new(scale: f32, baseline: f32) -> Self {
        Self {
            scale,
            baseline,
            segments: Vec::new(),
            cursor: (0.0, 0.0),
            contour_start: (0.0, 0.0),
        }
    }

    fn to_pixels(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale, self.baseline - y * self.scale)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl ttf_parser::OutlineBuilder for Outline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = self.to_pixels(x, y);
        self.contour_start = self.cursor;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let end = self.to_pixels(x, y);
        self.segments.push(Line::new(self.cursor, end).into());
        self.cursor = end;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let control = self.to_pixels(x1, y1);
        let end = self.to_pixels(x, y);
        self.segments
            .push(QuadCurve::new(self.cursor, control, end).into());
        self.cursor = end;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let control_s = self.to_pixels(x1, y1);
        let control_e = self.to_pixels(x2, y2);
        let end = self.to_pixels(x, y);
        self.segments
            .push(CubicCurve::new(self.cursor, control_s, control_e, end).into());
        self.cursor = end;
    }

    fn close(&mut self) {
        // winding needs every contour explicitly closed
        if self.cursor != self.contour_start {
            self.segments
                .push(Line::new(self.cursor, self.contour_start).into());
            self.cursor = self.contour_start;
        }
    }
}

/// Draw `ch` in black on a fresh background canvas, glyph origin near the
/// top-left corner. Characters the face has no glyph (or no outline) for
/// come back as a blank canvas rather than an error.
pub fn render_glyph(face: &Face<'_>, ch: char, font_size: f32, canvas_size: u32) -> GrayImage {
    let mut canvas = GrayImage::from_pixel(canvas_size, canvas_size, Luma([BACKGROUND]));
    let Some(glyph_id) = face.glyph_index(ch) else {
        return canvas;
    };
    let scale = font_size / f32::from(face.units_per_em());
    let baseline = f32::from(face.ascender()) * scale;
    let mut outline = Outline::new(scale, baseline);
    if face.outline_glyph(glyph_id, &mut outline).is_none() {
        return canvas;
    }
    fill(&mut canvas, outline.segments());
    canvas
}

/// Nonzero-winding scanline fill, sampling rows at pixel centers.
fn fill(canvas: &mut GrayImage, segments: &[Segment]) {
    let width = canvas.width();
    let mut crossings: Vec<Crossing> = Vec::new();
    for row in 0..canvas.height() {
        let y = row as f32 + 0.5;
        crossings.clear();
        for segment in segments {
            segment.crossings(y, &mut crossings);
        }
        crossings.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut winding = 0;
        let mut span_start = 0.0;
        for crossing in &crossings {
            if winding == 0 {
                span_start = crossing.x;
            }
            winding += crossing.winding;
            if winding == 0 {
                // fill pixels whose centers fall inside [span_start, x)
                let lo = (span_start - 0.5).ceil().max(0.0) as u32;
                let hi = ((crossing.x - 0.5).ceil().max(0.0) as u32).min(width);
                for col in lo..hi {
                    canvas.put_pixel(col, row, Luma([INK]));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    fn square_outline() -> Outline {
        // square in font units (y up); scale 1, baseline at row 60
        let mut outline = Outline::new(1.0, 60.0);
        outline.move_to(10.0, 10.0);
        outline.line_to(50.0, 10.0);
        outline.line_to(50.0, 50.0);
        outline.line_to(10.0, 50.0);
        outline.close();
        outline
    }

    #[test]
    fn filled_square_interior_and_exterior() {
        let mut canvas = GrayImage::from_pixel(64, 64, Luma([BACKGROUND]));
        let outline = square_outline();
        assert_eq!(outline.segments().len(), 4);
        fill(&mut canvas, outline.segments());
        // font y in [10, 50] maps to rows [10, 50]
        assert_eq!(canvas.get_pixel(30, 30)[0], INK);
        assert_eq!(canvas.get_pixel(11, 11)[0], INK);
        assert_eq!(canvas.get_pixel(5, 30)[0], BACKGROUND);
        assert_eq!(canvas.get_pixel(30, 55)[0], BACKGROUND);
        assert_eq!(canvas.get_pixel(60, 60)[0], BACKGROUND);
    }

    #[test]
    fn hole_contour_cancels_winding() {
        let mut canvas = GrayImage::from_pixel(64, 64, Luma([BACKGROUND]));
        let mut outline = Outline::new(1.0, 64.0);
        // outer ring, counter-clockwise in font units
        outline.move_to(4.0, 4.0);
        outline.line_to(60.0, 4.0);
        outline.line_to(60.0, 60.0);
        outline.line_to(4.0, 60.0);
        outline.close();
        // inner hole, wound the opposite way
        outline.move_to(20.0, 20.0);
        outline.line_to(20.0, 44.0);
        outline.line_to(44.0, 44.0);
        outline.line_to(44.0, 20.0);
        outline.close();
        fill(&mut canvas, outline.segments());
        assert_eq!(canvas.get_pixel(10, 10)[0], INK);
        assert_eq!(canvas.get_pixel(32, 32)[0], BACKGROUND);
    }

    #[test]
    fn spans_clip_to_canvas() {
        let mut canvas = GrayImage::from_pixel(16, 16, Luma([BACKGROUND]));
        let mut outline = Outline::new(1.0, 16.0);
        // extends well past the right edge
        outline.move_to(8.0, 2.0);
        outline.line_to(40.0, 2.0);
        outline.line_to(40.0, 14.0);
        outline.line_to(8.0, 14.0);
        outline.close();
        fill(&mut canvas, outline.segments());
        assert_eq!(canvas.get_pixel(15, 8)[0], INK);
        assert_eq!(canvas.get_pixel(4, 8)[0], BACKGROUND);
    }
}
