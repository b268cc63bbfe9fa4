use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;

/// Square convolution kernel ("core").
///
/// Weights are row-major: the weight at column `col`, row `row` is
/// `weights[size * row + col]`. Output samples are
/// `(Σ weight·sample + bias) / divisor`, rounded and clamped to 0..=255.
///
/// The side length is always odd and non-zero, and the divisor is always
/// finite and non-zero; every constructor and setter enforces this.
#[derive(Clone, Debug, PartialEq)]
pub struct Core {
    size: usize,
    bias: f64,
    divisor: f64,
    weights: Vec<f64>,
}

impl Core {
    /// All-zero kernel of side `size`, bias 0, divisor 1.
    pub fn new(size: usize) -> Result<Self, BitmapError> {
        check_size(size)?;
        let len = size
            .checked_mul(size)
            .ok_or_else(|| BitmapError::InvalidCore(alloc::format!("size {size} too large")))?;
        Ok(Self {
            size,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![0.0; len],
        })
    }

    /// Kernel from an explicit row-major weight sequence of length `size²`.
    pub fn from_weights(size: usize, weights: impl Into<Vec<f64>>) -> Result<Self, BitmapError> {
        let mut core = Self::new(size)?;
        let weights = weights.into();
        check_weights(size, &weights)?;
        core.weights = weights;
        Ok(core)
    }

    /// Replace all weights. `weights.len()` must equal `size²`.
    pub fn load(&mut self, weights: &[f64]) -> Result<(), BitmapError> {
        check_weights(self.size, weights)?;
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    /// 1×1 kernel that reproduces its input.
    pub fn identity() -> Self {
        Self {
            size: 1,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![1.0],
        }
    }

    /// Normalized 3×3 average: nine weights of 1, divisor 9.
    pub fn standard() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 9.0,
            weights: vec![1.0; 9],
        }
    }

    /// Normalized `(2·radius+1)²` box average.
    pub fn box_blur(radius: usize) -> Result<Self, BitmapError> {
        let size = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| BitmapError::InvalidCore(alloc::format!("radius {radius} too large")))?;
        let mut core = Self::new(size)?;
        core.weights.fill(1.0);
        core.divisor = core.weights.len() as f64;
        Ok(core)
    }

    /// 3×3 binomial Gaussian approximation.
    pub fn gaussian3() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 16.0,
            weights: vec![1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0],
        }
    }

    /// Horizontal Sobel derivative. Negative responses clamp to 0.
    pub fn sobel_x() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical Sobel derivative. Negative responses clamp to 0.
    pub fn sobel_y() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// 4-neighbour Laplacian edge detector.
    pub fn laplacian() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    pub fn sharpen() -> Self {
        Self {
            size: 3,
            bias: 0.0,
            divisor: 1.0,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    pub fn with_bias(mut self, bias: f64) -> Result<Self, BitmapError> {
        if !bias.is_finite() {
            return Err(BitmapError::InvalidCore(alloc::format!(
                "bias must be finite, got {bias}"
            )));
        }
        self.bias = bias;
        Ok(self)
    }

    /// Zero or non-finite divisors are rejected.
    pub fn with_divisor(mut self, divisor: f64) -> Result<Self, BitmapError> {
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(BitmapError::InvalidCore(alloc::format!(
                "divisor must be finite and non-zero, got {divisor}"
            )));
        }
        self.divisor = divisor;
        Ok(self)
    }

    /// Divisor that normalizes the current weights, or 1 if they sum to zero.
    pub fn normalized(self) -> Self {
        let sum = self.weight_sum();
        let divisor = if sum == 0.0 || !sum.is_finite() {
            1.0
        } else {
            sum
        };
        Self { divisor, ..self }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Offset of the center from the kernel edge.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn element(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.weights[self.size * row + col])
    }

    pub fn set_element(&mut self, col: usize, row: usize, weight: f64) -> Result<(), BitmapError> {
        if col >= self.size || row >= self.size {
            return Err(BitmapError::InvalidCore(alloc::format!(
                "element ({col}, {row}) outside {0}x{0} core",
                self.size
            )));
        }
        if !weight.is_finite() {
            return Err(BitmapError::InvalidCore(alloc::format!(
                "weight must be finite, got {weight}"
            )));
        }
        self.weights[self.size * row + col] = weight;
        Ok(())
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_size(size: usize) -> Result<(), BitmapError> {
    if size == 0 || size % 2 == 0 {
        return Err(BitmapError::InvalidCore(alloc::format!(
            "core size must be odd and non-zero, got {size}"
        )));
    }
    Ok(())
}

fn check_weights(size: usize, weights: &[f64]) -> Result<(), BitmapError> {
    if weights.len() != size * size {
        return Err(BitmapError::InvalidCore(alloc::format!(
            "{size}x{size} core needs {} weights, got {}",
            size * size,
            weights.len()
        )));
    }
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(BitmapError::InvalidCore("weights must be finite".into()));
    }
    Ok(())
}
