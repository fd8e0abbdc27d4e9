//! Level quantization.
//!
//! Saddle levels are rationals `(ad - bc) / (a + d - b - c)` of the four
//! corner samples. Two of them may differ by as little as about `2^-18` for
//! 8-bit data, so they are snapped to a dyadic grid of `Q` steps per unit:
//! levels falling into the same step are treated as one level, while levels
//! in different steps keep a representable gap. The fractional step is
//! clamped to `[2, Q - 2]` so that a quantized level never comes close to an
//! integer, i.e. to a sample value.
//!
//! `Q` is a power of two derived from the floating-point budget: the mantissa
//! must hold the integer part of a level (`sample_bits`), the integer part of
//! a coordinate (`max_width_bits`) and the fractional resolution `log2(Q)`.
//! With these bounds `level * denom` is exact in `f64`, which the tracker
//! relies on to compare a level against a saddle without division.

use serde::{Deserialize, Serialize};

/// Lower bound on `log2(Q)`; below it the interior range `[2, Q - 2]` is too
/// narrow to be useful.
const MIN_STEPS_LOG2: u32 = 3;

/// Precision budget from which the quantization grid is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizerParams {
    /// Mantissa digits of the floating type carrying levels and coordinates.
    pub mantissa_bits: u32,
    /// Bits of the integer part of a sample value.
    pub sample_bits: u32,
    /// Bits needed to address the widest supported image dimension.
    pub max_width_bits: u32,
}

impl Default for QuantizerParams {
    fn default() -> Self {
        Self {
            mantissa_bits: f64::MANTISSA_DIGITS,
            sample_bits: u8::BITS,
            max_width_bits: 16,
        }
    }
}

impl QuantizerParams {
    /// `log2(Q)`, never below the minimal usable grid.
    pub fn steps_log2(&self) -> u32 {
        self.mantissa_bits
            .saturating_sub(self.sample_bits)
            .saturating_sub(self.max_width_bits)
            .clamp(MIN_STEPS_LOG2, 62)
    }

    pub fn quantizer(&self) -> Quantizer {
        Quantizer::with_steps_log2(self.steps_log2())
    }
}

/// Snaps real levels to the interior of a dyadic grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quantizer {
    steps: u64,
}

impl Default for Quantizer {
    fn default() -> Self {
        QuantizerParams::default().quantizer()
    }
}

impl Quantizer {
    pub fn with_steps_log2(log2: u32) -> Self {
        let log2 = log2.clamp(MIN_STEPS_LOG2, 62);
        Self { steps: 1u64 << log2 }
    }

    /// Number of grid steps per unit level (`Q`).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One grid step, `1 / Q`.
    pub fn step(&self) -> f64 {
        1.0 / self.steps as f64
    }

    /// Index of the fractional step of `value` after clamping, in `[2, Q - 2]`.
    pub fn fraction_index(&self, value: f64) -> u64 {
        let frac = value - value.floor();
        let raw = (frac * self.steps as f64).floor();
        let max = self.steps - 2;
        if raw <= 2.0 {
            2
        } else if raw >= max as f64 {
            max
        } else {
            raw as u64
        }
    }

    /// Representative of the grid step containing `value`.
    pub fn quantize(&self, value: f64) -> f64 {
        value.floor() + self.fraction_index(value) as f64 * self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::{Quantizer, QuantizerParams};

    #[test]
    fn default_grid_follows_f64_budget() {
        let params = QuantizerParams::default();
        assert_eq!(params.steps_log2(), 53 - 8 - 16);
        assert_eq!(params.quantizer().steps(), 1 << 29);
    }

    #[test]
    fn tiny_budget_keeps_minimal_grid() {
        let params = QuantizerParams {
            mantissa_bits: 24,
            sample_bits: 8,
            max_width_bits: 16,
        };
        assert_eq!(params.quantizer().steps(), 8);
    }

    #[test]
    fn fraction_stays_strictly_inside_grid() {
        let q = Quantizer::with_steps_log2(4);
        let n = q.steps();
        for i in 0..=400 {
            let v = -3.0 + i as f64 * 0.0173;
            let k = q.fraction_index(v);
            assert!(k >= 2 && k <= n - 2, "v={v} k={k}");
            let out = q.quantize(v);
            let frac = out - out.floor();
            assert!(frac > 0.0 && frac < 1.0, "v={v} quantized={out}");
            assert!(frac >= 2.0 / n as f64 && frac <= (n - 2) as f64 / n as f64);
            assert_eq!(out.floor(), v.floor(), "integer part must be kept for v={v}");
        }
    }

    #[test]
    fn integers_move_off_the_grid_line() {
        let q = Quantizer::with_steps_log2(4);
        assert_eq!(q.quantize(5.0), 5.125);
        assert_eq!(q.quantize(5.99), 5.875);
        assert_eq!(q.quantize(5.5), 5.5);
    }

    #[test]
    fn close_saddle_levels_stay_apart_by_default() {
        let q = Quantizer::default();
        // 29/3 and 2329/241 differ by about 3e-3.
        let a = 29.0 / 3.0;
        let b = 2329.0 / 241.0;
        assert_ne!(q.quantize(a), q.quantize(b));
        assert_eq!(q.quantize(a), q.quantize(a + 1e-12));
    }
}
