//! Output regularization with an explicit training / inference switch.
//!
//! Burn's own `Dropout` keys off whether the backend tracks gradients. Here
//! the caller states the mode directly, so a sampler can turn the noise on to
//! diversify generated sequences and a test can turn it off for determinism.

use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};

use crate::error::{PredictorError, Result};

/// How a forward call should treat stochastic layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ForwardMode {
    /// Regularization is active.
    Train,
    /// Regularization is the identity.
    #[default]
    Inference,
}

impl ForwardMode {
    /// Whether stochastic layers should fire.
    pub fn is_train(self) -> bool {
        matches!(self, ForwardMode::Train)
    }
}

/// Inverted dropout applied to the combination layer's output.
///
/// In [`ForwardMode::Train`] each element is zeroed with probability `prob`
/// and the survivors are scaled by `1 / (1 - prob)`, keeping the expected
/// activation unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputDropout {
    prob: f64,
}

impl OutputDropout {
    /// Create a dropout step. `prob` must lie in `[0, 1)`.
    pub fn new(prob: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&prob) {
            return Err(PredictorError::InvalidConfig(format!(
                "dropout probability must be in [0, 1), got {prob}"
            )));
        }
        Ok(Self { prob })
    }

    /// Zeroing probability.
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Apply the step in the given mode.
    pub fn forward<B: Backend, const D: usize>(
        &self,
        input: Tensor<B, D>,
        mode: ForwardMode,
    ) -> Tensor<B, D> {
        if !mode.is_train() || self.prob == 0.0 {
            return input;
        }

        let keep = 1.0 - self.prob;
        let mask = Tensor::<B, D>::random(input.dims(), Distribution::Bernoulli(keep), &input.device());
        input * mask / keep
    }
}
