//! # Conditioned Sequence Prediction
//!
//! The [`ConditionedPredictor`] advances a category-conditioned character
//! sequence by one symbol per call. All carried state (the visible hidden
//! state and the transforms' internal memories) is passed in and handed back,
//! so the predictor itself is immutable during generation.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `category` | `[batch, n_categories]` |
//! | `input` | `[batch, input_size]` |
//! | `hidden` | `[batch, hidden_size]` |
//! | `log_probs` | `[batch, output_size]` |
//!
//! ## Generation Loop
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use cond_rnn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model = LstmPredictor::<Backend>::new(4, 8, 16, 8, &device)?;
//!
//! let category = Tensor::<Backend, 2>::zeros([1, 4], &device);
//! let mut input = Tensor::<Backend, 2>::zeros([1, 8], &device);
//! let mut hidden = model.init_hidden(1, &device);
//! let mut memory = model.init_memory(1, &device);
//!
//! for _ in 0..3 {
//!     let step = model.forward(category.clone(), input, hidden, memory, ForwardMode::Inference)?;
//!     assert_eq!(step.log_probs.dims(), [1, 8]);
//!     // A real sampler would pick the next symbol from `step.log_probs`.
//!     input = step.log_probs.exp();
//!     hidden = step.hidden;
//!     memory = step.memory;
//! }
//! # Ok::<(), cond_rnn::PredictorError>(())
//! ```

pub mod conditioned;

pub use conditioned::{
    ConditionedPredictor, ConditionedPredictorConfig, GruPredictor, LstmPredictor,
    PredictorMemory, PredictorStep,
};
