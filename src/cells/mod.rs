//! # Recurrent Step Transforms
//!
//! Single-timestep recurrent cells used by the
//! [`ConditionedPredictor`](crate::rnn::ConditionedPredictor). Each cell
//! consumes one input row per batch entry plus its own internal memory and
//! returns an output row plus the updated memory. The memory never lives
//! inside the cell: callers carry it between steps, so one set of weights can
//! serve any number of interleaved sequences.
//!
//! ## Cell Types
//!
//! | Cell | Memory | Notes |
//! |------|--------|-------|
//! | [`LstmCell`] | [`LstmState`] (hidden + cell) | Default, gates i, f, g, o |
//! | [`GruCell`] | `Tensor<B, 2>` (hidden) | Fewer parameters, no cell state |
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `input` | `[batch, input_size]` |
//! | `output` | `[batch, output_size]` |
//! | memory tensors | `[batch, output_size]` |
//!
//! ## Example
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use cond_rnn::cells::{LstmCell, StepTransform};
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let cell = LstmCell::<Backend>::new(16, 32, &device);
//! let memory = cell.zero_memory(1, &device);
//! let input = Tensor::<Backend, 2>::zeros([1, 16], &device);
//!
//! let (output, memory) = cell.step(input, memory);
//! assert_eq!(output.dims(), [1, 32]);
//! assert_eq!(LstmCell::<Backend>::memory_shapes(&memory), vec![[1, 32], [1, 32]]);
//! ```

pub mod gru_cell;
pub mod lstm_cell;

pub use gru_cell::GruCell;
pub use lstm_cell::{LstmCell, LstmState};

use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// A recurrent cell that advances by one timestep.
///
/// Implementors are plain Burn modules; their carried state is the associated
/// [`Memory`](StepTransform::Memory) type, threaded through [`step`](StepTransform::step).
pub trait StepTransform<B: Backend>: Module<B> {
    /// Internal recurrent memory carried between steps.
    type Memory: Clone + core::fmt::Debug;

    /// Allocate a cell mapping `input_size` features to `output_size` features.
    fn init(input_size: usize, output_size: usize, device: &B::Device) -> Self;

    /// Width of each input row.
    fn input_size(&self) -> usize;

    /// Width of each output row and of the memory tensors.
    fn output_size(&self) -> usize;

    /// Memory for the first step of a new sequence.
    fn zero_memory(&self, batch_size: usize, device: &B::Device) -> Self::Memory;

    /// `[batch, width]` of every tensor in a memory value, used for validation.
    fn memory_shapes(memory: &Self::Memory) -> Vec<[usize; 2]>;

    /// Advance one step: `(input, memory) -> (output, memory')`.
    fn step(&self, input: Tensor<B, 2>, memory: Self::Memory) -> (Tensor<B, 2>, Self::Memory);
}
