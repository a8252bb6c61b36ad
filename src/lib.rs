//! # cond-rnn - Category-conditioned character RNN
//!
//! A character-level recurrent generator that is conditioned on a category
//! label, built on the Burn framework. Given a category one-hot, the current
//! symbol one-hot and the previous hidden state, one forward step yields
//! log-probabilities over the next symbol and the next hidden state.
//!
//! ## Features
//!
//! - **ConditionedPredictor**: two recurrent transforms, a dense combination
//!   layer, dropout and log-softmax
//! - **Explicit state**: internal recurrent memories are threaded through each
//!   call instead of living in the model
//! - **Pluggable cells**: any [`StepTransform`](cells::StepTransform), with
//!   LSTM and GRU provided
//! - **Explicit mode**: dropout only fires in [`ForwardMode::Train`](regularization::ForwardMode)
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use cond_rnn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model: LstmPredictor<Backend> =
//!     ConditionedPredictorConfig::new(18, 59, 128, 59).init(&device)?;
//!
//! let category = Tensor::<Backend, 2>::zeros([1, 18], &device);
//! let letter = Tensor::<Backend, 2>::zeros([1, 59], &device);
//!
//! let step = model.forward(
//!     category,
//!     letter,
//!     model.init_hidden(1, &device),
//!     model.init_memory(1, &device),
//!     ForwardMode::Inference,
//! )?;
//!
//! assert_eq!(step.log_probs.dims(), [1, 59]);
//! assert_eq!(step.hidden.dims(), [1, 128]);
//! # Ok::<(), cond_rnn::PredictorError>(())
//! ```

pub mod cells;
pub mod error;
pub mod regularization;
pub mod rnn;

pub use error::{PredictorError, Result};

pub mod prelude {
    pub use crate::cells::{GruCell, LstmCell, LstmState, StepTransform};
    pub use crate::error::{PredictorError, Result};
    pub use crate::regularization::{ForwardMode, OutputDropout};
    pub use crate::rnn::{
        ConditionedPredictor, ConditionedPredictorConfig, GruPredictor, LstmPredictor,
        PredictorMemory, PredictorStep,
    };
}
