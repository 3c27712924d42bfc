/// Polynomial with coefficients stored highest-degree first.
#[derive(Clone, Copy, Debug)]
pub struct Polynomial<const N: usize> {
    pub coeffs: [f32; N],
}

impl<const N: usize> Polynomial<N> {
    pub fn value(&self, t: f32) -> f32 {
        self.coeffs.iter().fold(0.0, |acc, &coeff| acc * t + coeff)
    }
}

impl Polynomial<2> {
    pub fn root(&self) -> f32 {
        let [a, b] = self.coeffs;
        -b / a
    }
}

impl Polynomial<3> {
    /// Real roots of the quadratic; NaN entries when the discriminant is
    /// negative, which callers filter out with range checks.
    pub fn roots(&self) -> [f32; 2] {
        let [a, b, c] = self.coeffs;
        let square = b.powi(2) - (4.0 * a * c);
        let sqrt = square.sqrt();
        let plus = (-b + sqrt) / (2.0 * a);
        let minus = (-b - sqrt) / (2.0 * a);
        [plus, minus]
    }
}

macro_rules! impl_derivative {
    ($N:literal newtons) => {
        impl_derivative! { $N }
        impl Polynomial<$N> {
            pub fn newtons_root(&self, mut guess: f32, mut iters: u8) -> f32 {
                let dself = self.derivative();
                while iters > 0 {
                    guess = guess - (self.value(guess) / dself.value(guess));
                    iters -= 1;
                }
                guess
            }
        }
    };
    ($N:literal) => {
        impl Polynomial<$N> {
            pub fn derivative(&self) -> Polynomial<{ $N - 1 }> {
                let mut coeffs = [0.0; $N - 1];
                let mut i = 0_u8;
                const LAST: u8 = $N - 1;
                while i < LAST {
                    let idx = i as usize;
                    coeffs[idx] = self.coeffs[idx] * ((LAST - i) as f32);
                    i += 1;
                }
                Polynomial { coeffs }
            }
        }
    };
}

impl_derivative!(3);
impl_derivative!(4 newtons);

#[cfg(test)]
mod tests {
    use super::Polynomial;

    #[test]
    fn horner_value() {
        // 2t^2 - 3t + 1
        let poly = Polynomial {
            coeffs: [2.0, -3.0, 1.0],
        };
        assert_eq!(poly.value(0.0), 1.0);
        assert_eq!(poly.value(1.0), 0.0);
        assert_eq!(poly.value(2.0), 3.0);
    }

    #[test]
    fn quadratic_roots() {
        // (t - 1)(t - 3) = t^2 - 4t + 3
        let poly = Polynomial {
            coeffs: [1.0, -4.0, 3.0],
        };
        let mut roots = poly.roots();
        roots.sort_by(f32::total_cmp);
        assert!((roots[0] - 1.0).abs() < 1e-5);
        assert!((roots[1] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn derivative_drops_degree() {
        // t^3 - 2t => 3t^2 - 2
        let poly = Polynomial {
            coeffs: [1.0, 0.0, -2.0, 0.0],
        };
        let dpoly = poly.derivative();
        assert_eq!(dpoly.coeffs, [3.0, 0.0, -2.0]);
    }

    #[test]
    fn newton_finds_cubic_root() {
        // (t - 0.5)(t^2 + 1) has a single real root at 0.5
        let poly = Polynomial {
            coeffs: [1.0, -0.5, 1.0, -0.5],
        };
        let root = poly.newtons_root(0.25, 12);
        assert!((root - 0.5).abs() < 1e-4);
    }
}
