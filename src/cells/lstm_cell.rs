use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::StepTransform;

/// Hidden and cell tensors carried by an [`LstmCell`] between steps.
#[derive(Debug, Clone)]
pub struct LstmState<B: Backend> {
    /// Short-term state, shape `[batch, hidden_size]`.
    pub hidden: Tensor<B, 2>,
    /// Long-term cell state, shape `[batch, hidden_size]`.
    pub cell: Tensor<B, 2>,
}

impl<B: Backend> LstmState<B> {
    /// Zeroed state for a new sequence.
    pub fn zeros(batch_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            hidden: Tensor::zeros([batch_size, hidden_size], device),
            cell: Tensor::zeros([batch_size, hidden_size], device),
        }
    }
}

/// Long short-term memory cell.
///
/// Implements the standard LSTM equations:
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h + b_hi)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + b_hf)
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h + b_hg)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h + b_ho)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
///
/// The per-step output is `h'`.
#[derive(Module, Debug)]
pub struct LstmCell<B: Backend> {
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 4 * hidden_size
    recurrent_map: Linear<B>, // hidden -> 4 * hidden_size
}

impl<B: Backend> LstmCell<B> {
    /// Create a new LSTM cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden and cell state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 4 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 4 * hidden_size)
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

    /// Perform a forward pass through the LSTM cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `state` - Previous hidden and cell state
    ///
    /// # Returns
    /// The updated state; its `hidden` field is the step output.
    pub fn forward(&self, input: Tensor<B, 2>, state: LstmState<B>) -> LstmState<B> {
        let LstmState { hidden, cell } = state;

        let z = self.input_map.forward(input) + self.recurrent_map.forward(hidden);

        let chunks = z.chunk(4, 1);
        let input_gate = activation::sigmoid(chunks[0].clone());
        let forget_gate = activation::sigmoid(chunks[1].clone());
        let candidate = chunks[2].clone().tanh();
        let output_gate = activation::sigmoid(chunks[3].clone());

        let new_cell = cell * forget_gate + input_gate * candidate;
        let new_hidden = new_cell.clone().tanh() * output_gate;

        LstmState {
            hidden: new_hidden,
            cell: new_cell,
        }
    }
}

impl<B: Backend> StepTransform<B> for LstmCell<B> {
    type Memory = LstmState<B>;

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
        LstmState::zeros(batch_size, self.hidden_size, device)
    }

    fn memory_shapes(memory: &Self::Memory) -> Vec<[usize; 2]> {
        vec![memory.hidden.dims(), memory.cell.dims()]
    }

    fn step(&self, input: Tensor<B, 2>, memory: Self::Memory) -> (Tensor<B, 2>, Self::Memory) {
        let state = self.forward(input, memory);
        (state.hidden.clone(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    #[test]
    fn test_lstm_cell_creation() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(20, 50, &device);

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
        assert_eq!(cell.output_size(), 50);
    }

    #[test]
    fn test_lstm_forward_shapes() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(20, 50, &device);

        for batch_size in [1, 4, 16] {
            let input = Tensor::<TestBackend, 2>::zeros([batch_size, 20], &device);
            let state = cell.forward(input, LstmState::zeros(batch_size, 50, &device));

            assert_eq!(state.hidden.dims(), [batch_size, 50]);
            assert_eq!(state.cell.dims(), [batch_size, 50]);
        }
    }

    #[test]
    fn test_lstm_step_output_is_hidden() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(10, 12, &device);

        let input = Tensor::<TestBackend, 2>::random(
            [2, 10],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let (output, memory) = cell.step(input, cell.zero_memory(2, &device));

        let diff = (output - memory.hidden).abs().sum().into_scalar();
        assert!(diff < 1e-6, "Step output should be the new hidden state");
    }

    #[test]
    fn test_lstm_hidden_is_bounded() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(10, 20, &device);

        let input = Tensor::<TestBackend, 2>::ones([1, 10], &device) * 50.0;
        let mut state = LstmState::zeros(1, 20, &device);
        for _ in 0..5 {
            state = cell.forward(input.clone(), state);
        }

        // |o * tanh(c)| < 1
        let max = state.hidden.abs().max().into_scalar();
        assert!(max <= 1.0, "Hidden state escaped (-1, 1): {}", max);
    }

    #[test]
    fn test_lstm_memory_shapes_cover_cell_state() {
        let device = get_test_device();
        let state = LstmState::<TestBackend> {
            hidden: Tensor::zeros([1, 8], &device),
            cell: Tensor::zeros([1, 4], &device),
        };

        let shapes = LstmCell::<TestBackend>::memory_shapes(&state);
        assert_eq!(shapes, vec![[1, 8], [1, 4]]);
    }

    #[test]
    fn test_lstm_state_persistence() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(10, 20, &device);

        let input = Tensor::<TestBackend, 2>::random(
            [1, 10],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        let first = cell.forward(input.clone(), LstmState::zeros(1, 20, &device));
        let second = cell.forward(input, first.clone());

        let diff = (second.cell - first.cell).abs().sum().into_scalar();
        assert!(diff > 0.0, "Cell state should evolve across steps");
    }
}
