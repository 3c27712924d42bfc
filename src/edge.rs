use crate::math::Polynomial;

/// Two Newton roots closer than this are treated as the same root.
const ROOT_MERGE: f32 = 1e-4;

/// Tolerance for classifying a root as landing on a segment endpoint.
const ENDPOINT: f32 = 1e-6;

/// A scanline intersection: the x coordinate where an edge crosses the
/// line, and the direction (+1 rising, -1 falling) of the crossing.
#[derive(Clone, Copy, Debug)]
pub struct Crossing {
    pub x: f32,
    pub winding: i32,
}

pub enum Segment {
    Line(Line),
    Quad(QuadCurve),
    Cubic(CubicCurve),
}

impl Segment {
    pub fn crossings(&self, y: f32, out: &mut Vec<Crossing>) {
        match self {
            Segment::Line(line) => line.crossings(y, out),
            Segment::Quad(quad) => quad.crossings(y, out),
            Segment::Cubic(cubic) => cubic.crossings(y, out),
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Segment::Line(line)
    }
}

impl From<QuadCurve> for Segment {
    fn from(quad: QuadCurve) -> Self {
        Segment::Quad(quad)
    }
}

impl From<CubicCurve> for Segment {
    fn from(cubic: CubicCurve) -> Self {
        Segment::Cubic(cubic)
    }
}

/// Accept a curve root and classify its winding. Endpoint roots follow
/// the same convention as `Line::crossings`: a segment owns the endpoint
/// it rises from and the endpoint it falls into, so a junction landing
/// exactly on a scanline is counted by exactly one of its two segments.
fn crossing_winding(t: f32, slope: f32) -> Option<i32> {
    if !(-ENDPOINT..=1.0 + ENDPOINT).contains(&t) {
        return None;
    }
    let winding = if slope > 0.0 {
        1
    } else if slope < 0.0 {
        -1
    } else {
        // tangent touch, not a crossing
        return None;
    };
    if t < ENDPOINT && winding < 0 {
        return None;
    }
    if t > 1.0 - ENDPOINT && winding > 0 {
        return None;
    }
    Some(winding)
}

pub struct Line {
    start: (f32, f32),
    end: (f32, f32),
}

impl Line {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self { start, end }
    }

    fn crossings(&self, y: f32, out: &mut Vec<Crossing>) {
        let (y0, y1) = (self.start.1, self.end.1);
        // half-open range so a crossing at a shared endpoint is counted
        // by exactly one of the two adjacent edges
        let winding = if y0 <= y && y < y1 {
            1
        } else if y1 <= y && y < y0 {
            -1
        } else {
            return;
        };
        let t = (y - y0) / (y1 - y0);
        let x = self.start.0 + t * (self.end.0 - self.start.0);
        out.push(Crossing { x, winding });
    }
}

pub struct QuadCurve {
    x_poly: Polynomial<3>,
    y_poly: Polynomial<3>,
}

impl QuadCurve {
    pub fn new(start: (f32, f32), control: (f32, f32), end: (f32, f32)) -> Self {
        let x_poly = Polynomial {
            coeffs: [
                -2.0 * control.0 + start.0 + end.0,
                2.0 * control.0 - 2.0 * start.0,
                start.0,
            ],
        };
        let y_poly = Polynomial {
            coeffs: [
                -2.0 * control.1 + start.1 + end.1,
                2.0 * control.1 - 2.0 * start.1,
                start.1,
            ],
        };
        Self { x_poly, y_poly }
    }

    fn crossings(&self, y: f32, out: &mut Vec<Crossing>) {
        let [a, b, c] = self.y_poly.coeffs;
        let candidates = if a.abs() < f32::EPSILON {
            // degenerate quad (collinear control point), solve as a line
            if b.abs() < f32::EPSILON {
                return;
            }
            [Polynomial { coeffs: [b, c - y] }.root(), f32::NAN]
        } else {
            Polynomial {
                coeffs: [a, b, c - y],
            }
            .roots()
        };
        let dy = self.y_poly.derivative();
        for t in candidates {
            if let Some(winding) = crossing_winding(t, dy.value(t)) {
                out.push(Crossing {
                    x: self.x_poly.value(t.clamp(0.0, 1.0)),
                    winding,
                });
            }
        }
    }
}

pub struct CubicCurve {
    x_poly: Polynomial<4>,
    y_poly: Polynomial<4>,
}

impl CubicCurve {
    pub fn new(
        start: (f32, f32),
        control_s: (f32, f32),
        control_e: (f32, f32),
        end: (f32, f32),
    ) -> Self {
        let x_poly = Polynomial {
            coeffs: [
                -start.0 + 3.0 * control_s.0 - 3.0 * control_e.0 + end.0,
                3.0 * start.0 - 6.0 * control_s.0 + 3.0 * control_e.0,
                -3.0 * start.0 + 3.0 * control_s.0,
                start.0,
            ],
        };
        let y_poly = Polynomial {
            coeffs: [
                -start.1 + 3.0 * control_s.1 - 3.0 * control_e.1 + end.1,
                3.0 * start.1 - 6.0 * control_s.1 + 3.0 * control_e.1,
                -3.0 * start.1 + 3.0 * control_s.1,
                start.1,
            ],
        };
        Self { x_poly, y_poly }
    }

    fn crossings(&self, y: f32, out: &mut Vec<Crossing>) {
        let [a, b, c, d] = self.y_poly.coeffs;
        let shifted = Polynomial {
            coeffs: [a, b, c, d - y],
        };
        let mut roots = [0.0_f32; 5];
        let mut count = 0;
        for seed in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let t = shifted.newtons_root(seed, 16);
            if !(-ENDPOINT..=1.0 + ENDPOINT).contains(&t) {
                continue;
            }
            // Newton can stall on a seed in a rootless basin
            if shifted.value(t).abs() > 1e-2 {
                continue;
            }
            if roots[..count].iter().any(|&r| (r - t).abs() < ROOT_MERGE) {
                continue;
            }
            roots[count] = t;
            count += 1;
        }
        let dy = self.y_poly.derivative();
        for &t in &roots[..count] {
            if let Some(winding) = crossing_winding(t, dy.value(t)) {
                out.push(Crossing {
                    x: self.x_poly.value(t.clamp(0.0, 1.0)),
                    winding,
                });
            }
        }
    }
}
