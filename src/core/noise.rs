use super::constants::{NOISE_FALLOFF, NOISE_LATTICE_SIZE, NOISE_OCTAVES, NOISE_SEED};
use rand::prelude::*;

// Lattice rows are 16 cells apart, as in Processing's noise().
const Y_WRAP_BITS: usize = 4;
const Y_WRAP: usize = 1 << Y_WRAP_BITS;

/// Coherent value noise over a seeded lattice.
///
/// `sample` is a pure function of its inputs once the field is built, so the
/// same coordinates always give the same value. Output lies in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct NoiseField {
    lattice: Vec<f32>,
    octaves: u32,
    falloff: f32,
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(NOISE_SEED)
    }
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice = (0..NOISE_LATTICE_SIZE).map(|_| rng.gen::<f32>()).collect();
        Self {
            lattice,
            octaves: NOISE_OCTAVES,
            falloff: NOISE_FALLOFF,
        }
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let (x, y) = (x.abs(), y.abs());
        let mask = self.lattice.len() - 1;

        let mut xi = x.floor() as usize;
        let mut yi = y.floor() as usize;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut total = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..self.octaves {
            let base = xi.wrapping_add(yi << Y_WRAP_BITS);
            let rx = eased(xf);
            let ry = eased(yf);

            let at = |offset: usize| self.lattice[base.wrapping_add(offset) & mask];
            let top = at(0) + rx * (at(1) - at(0));
            let bottom = at(Y_WRAP) + rx * (at(Y_WRAP + 1) - at(Y_WRAP));
            total += (top + ry * (bottom - top)) * amplitude;

            amplitude *= self.falloff;
            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi += 1;
                yf -= 1.0;
            }
        }
        total
    }
}

#[inline]
fn eased(t: f32) -> f32 {
    0.5 * (1.0 - (t * std::f32::consts::PI).cos())
}
