use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::StepTransform;

/// Gated recurrent unit cell.
///
/// GRU equations:
/// - z = sigmoid(W_z @ x + U_z @ h + b_z)          (update gate)
/// - r = sigmoid(W_r @ x + U_r @ h + b_r)          (reset gate)
/// - n = tanh(W_n @ x + b_in + r * (U_n @ h + b_hn)) (candidate)
/// - h' = (1 - z) * n + z * h
///
/// The memory is the hidden tensor itself, and the per-step output is `h'`.
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 3 * hidden_size
    recurrent_map: Linear<B>, // hidden -> 3 * hidden_size
}

impl<B: Backend> GruCell<B> {
    /// Create a new GRU cell
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 3 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 3 * hidden_size)
            .with_bias(true)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Compute `h'` from `[batch, input_size]` input and `[batch, hidden_size]` hidden state.
    pub fn forward(&self, input: Tensor<B, 2>, hidden: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.input_map.forward(input).chunk(3, 1);
        let h = self.recurrent_map.forward(hidden.clone()).chunk(3, 1);

        let update = activation::sigmoid(x[0].clone() + h[0].clone());
        let reset = activation::sigmoid(x[1].clone() + h[1].clone());
        let candidate = (x[2].clone() + reset * h[2].clone()).tanh();

        // (1 - z) * n + z * h == n + z * (h - n)
        candidate.clone() + update * (hidden - candidate)
    }
}

impl<B: Backend> StepTransform<B> for GruCell<B> {
    type Memory = Tensor<B, 2>;

    fn init(input_size: usize, output_size: usize, device: &B::Device) -> Self {
        Self::new(input_size, output_size, device)
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.hidden_size
    }

    fn zero_memory(&self, batch_size: usize, device: &B::Device) -> Self::Memory {
        Tensor::zeros([batch_size, self.hidden_size], device)
    }

    fn memory_shapes(memory: &Self::Memory) -> Vec<[usize; 2]> {
        vec![memory.dims()]
    }

    fn step(&self, input: Tensor<B, 2>, memory: Self::Memory) -> (Tensor<B, 2>, Self::Memory) {
        let hidden = self.forward(input, memory);
        (hidden.clone(), hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_gru_cell_creation() {
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(8, 24, &device);

        assert_eq!(cell.input_size(), 8);
        assert_eq!(cell.hidden_size(), 24);
    }

    #[test]
    fn test_gru_forward_shape() {
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(8, 24, &device);

        let input = Tensor::<TestBackend, 2>::ones([3, 8], &device);
        let hidden = cell.zero_memory(3, &device);
        let new_hidden = cell.forward(input, hidden);

        assert_eq!(new_hidden.dims(), [3, 24]);
    }

    #[test]
    fn test_gru_hidden_is_bounded() {
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(8, 24, &device);

        // Convex blend of tanh outputs and a zero start stays in [-1, 1]
        let input = Tensor::<TestBackend, 2>::ones([1, 8], &device) * 100.0;
        let mut hidden = cell.zero_memory(1, &device);
        for _ in 0..4 {
            hidden = cell.forward(input.clone(), hidden);
        }

        let max = hidden.abs().max().into_scalar();
        assert!(max <= 1.0, "GRU hidden escaped [-1, 1]: {}", max);
    }
}
