//! Category-conditioned character predictor
//!
//! One step of a character-level generator that is told which category it is
//! generating for. The category and current symbol arrive as one-hot rows,
//! the previous hidden state is supplied by the caller, and the step returns
//! log-probabilities over the next symbol together with the new hidden state.

use burn::config::Config;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation::log_softmax;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::cells::{GruCell, LstmCell, StepTransform};
use crate::error::{ensure_dim, PredictorError};
use crate::regularization::{ForwardMode, OutputDropout};

/// Configuration for a [`ConditionedPredictor`].
#[derive(Config, Debug)]
pub struct ConditionedPredictorConfig {
    /// Number of categories (width of the category one-hot).
    pub n_categories: usize,
    /// Width of the input symbol one-hot.
    pub input_size: usize,
    /// Width of the externally visible hidden state.
    pub hidden_size: usize,
    /// Width of the output distribution (vocabulary size).
    pub output_size: usize,
    /// Probability of zeroing an output activation in training mode.
    #[config(default = 0.1)]
    pub dropout: f64,
}

impl ConditionedPredictorConfig {
    /// Width of the concatenated `[category | input | hidden]` row.
    pub fn combined_size(&self) -> usize {
        self.n_categories + self.input_size + self.hidden_size
    }

    /// Build a predictor using `C` for both recurrent transforms.
    pub fn init<B: Backend, C: StepTransform<B>>(
        &self,
        device: &B::Device,
    ) -> crate::Result<ConditionedPredictor<B, C>> {
        let sizes = [
            ("n_categories", self.n_categories),
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(PredictorError::InvalidConfig(format!("{name} must be non-zero")));
        }
        OutputDropout::new(self.dropout)?;

        let combined_size = self.combined_size();
        log::debug!(
            "building conditioned predictor: categories={} input={} hidden={} output={} combined={} dropout={}",
            self.n_categories,
            self.input_size,
            self.hidden_size,
            self.output_size,
            combined_size,
            self.dropout
        );

        Ok(ConditionedPredictor {
            i2h: C::init(combined_size, self.hidden_size, device),
            i2o: C::init(combined_size, self.output_size, device),
            o2o: LinearConfig::new(self.hidden_size + self.output_size, self.output_size)
                .with_bias(true)
                .init(device),
            dropout_prob: self.dropout,
            n_categories: self.n_categories,
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            output_size: self.output_size,
        })
    }
}

/// Internal memories of the two recurrent transforms.
///
/// Owned by the caller for the lifetime of one sequence, so a single predictor
/// can drive any number of interleaved sequences.
#[derive(Debug, Clone)]
pub struct PredictorMemory<M> {
    /// Memory of the hidden-producing transform.
    pub i2h: M,
    /// Memory of the output-producing transform.
    pub i2o: M,
}

/// Result of one [`ConditionedPredictor::forward`] call.
#[derive(Debug, Clone)]
pub struct PredictorStep<B: Backend, M> {
    /// Log-probabilities over the vocabulary, `[batch, output_size]`.
    pub log_probs: Tensor<B, 2>,
    /// Hidden state for the next step, `[batch, hidden_size]`.
    pub hidden: Tensor<B, 2>,
    /// Internal memories for the next step.
    pub memory: PredictorMemory<M>,
}

/// Category-conditioned next-symbol predictor.
///
/// Two recurrent step transforms read the same `[category | input | hidden]`
/// row: `i2h` yields the next hidden state, `i2o` a raw output. Their
/// concatenation goes through a dense layer (`o2o`), dropout and log-softmax.
///
/// # Type Parameters
/// * `B` - The backend type
/// * `C` - The recurrent cell used for both transforms
#[derive(Module, Debug)]
pub struct ConditionedPredictor<B: Backend, C> {
    i2h: C,
    i2o: C,
    o2o: Linear<B>,
    #[module(skip)]
    dropout_prob: f64,
    #[module(skip)]
    n_categories: usize,
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    #[module(skip)]
    output_size: usize,
}

/// Predictor with LSTM transforms.
pub type LstmPredictor<B> = ConditionedPredictor<B, LstmCell<B>>;

/// Predictor with GRU transforms.
pub type GruPredictor<B> = ConditionedPredictor<B, GruCell<B>>;

impl<B: Backend, C: StepTransform<B>> ConditionedPredictor<B, C> {
    /// Create a predictor with the default dropout probability.
    ///
    /// # Arguments
    /// * `n_categories` - Width of the category one-hot
    /// * `input_size` - Width of the input symbol one-hot
    /// * `hidden_size` - Width of the hidden state
    /// * `output_size` - Width of the output distribution
    /// * `device` - Device to create the module on
    pub fn new(
        n_categories: usize,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        device: &B::Device,
    ) -> crate::Result<Self> {
        ConditionedPredictorConfig::new(n_categories, input_size, hidden_size, output_size)
            .init(device)
    }

    /// Get the number of categories
    pub fn n_categories(&self) -> usize {
        self.n_categories
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get output size
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Width every concatenated input row must have.
    pub fn combined_size(&self) -> usize {
        self.n_categories + self.input_size + self.hidden_size
    }

    /// Dropout probability applied in [`ForwardMode::Train`].
    pub fn dropout_prob(&self) -> f64 {
        self.dropout_prob
    }

    /// Zeroed hidden state, `[batch_size, hidden_size]`, for the first step of a sequence.
    pub fn init_hidden(&self, batch_size: usize, device: &B::Device) -> Tensor<B, 2> {
        Tensor::zeros([batch_size, self.hidden_size], device)
    }

    /// Zeroed internal memories for the first step of a sequence.
    pub fn init_memory(&self, batch_size: usize, device: &B::Device) -> PredictorMemory<C::Memory> {
        PredictorMemory {
            i2h: self.i2h.zero_memory(batch_size, device),
            i2o: self.i2o.zero_memory(batch_size, device),
        }
    }

    /// Advance the sequence by one symbol.
    ///
    /// # Arguments
    /// * `category` - `[batch, n_categories]`
    /// * `input` - `[batch, input_size]`
    /// * `hidden` - `[batch, hidden_size]`, from [`init_hidden`](Self::init_hidden) or the previous step
    /// * `memory` - from [`init_memory`](Self::init_memory) or the previous step
    /// * `mode` - whether dropout is active
    ///
    /// # Errors
    /// [`PredictorError::DimensionMismatch`] if the batch is empty, the rows
    /// disagree on batch size, the concatenated width differs from
    /// [`combined_size`](Self::combined_size),
    /// or a memory was sized for a different transform width.
    pub fn forward(
        &self,
        category: Tensor<B, 2>,
        input: Tensor<B, 2>,
        hidden: Tensor<B, 2>,
        memory: PredictorMemory<C::Memory>,
        mode: ForwardMode,
    ) -> crate::Result<PredictorStep<B, C::Memory>> {
        let [batch_size, category_width] = category.dims();
        let [input_batch, input_width] = input.dims();
        let [hidden_batch, hidden_width] = hidden.dims();

        if batch_size == 0 {
            return Err(PredictorError::mismatch("batch size", 0, 1));
        }
        ensure_dim("input batch size", input_batch, batch_size)?;
        ensure_dim("hidden batch size", hidden_batch, batch_size)?;
        ensure_dim(
            "combined input width",
            category_width + input_width + hidden_width,
            self.combined_size(),
        )?;
        self.check_memory(&memory, batch_size)?;

        log::trace!("conditioned step: batch={batch_size} mode={mode:?}");

        // Single-step sequence: [batch, combined]
        let combined = Tensor::cat(vec![category, input, hidden], 1);

        let (hidden, i2h) = self.i2h.step(combined.clone(), memory.i2h);
        let (output, i2o) = self.i2o.step(combined, memory.i2o);

        let output = self.o2o.forward(Tensor::cat(vec![hidden.clone(), output], 1));
        let output = OutputDropout::new(self.dropout_prob)?.forward(output, mode);
        let log_probs = log_softmax(output, 1);

        Ok(PredictorStep {
            log_probs,
            hidden,
            memory: PredictorMemory { i2h, i2o },
        })
    }

    fn check_memory(
        &self,
        memory: &PredictorMemory<C::Memory>,
        batch_size: usize,
    ) -> crate::Result<()> {
        for [rows, width] in C::memory_shapes(&memory.i2h) {
            ensure_dim("i2h memory width", width, self.i2h.output_size())?;
            ensure_dim("i2h memory batch size", rows, batch_size)?;
        }
        for [rows, width] in C::memory_shapes(&memory.i2o) {
            ensure_dim("i2o memory width", width, self.i2o.output_size())?;
            ensure_dim("i2o memory batch size", rows, batch_size)?;
        }
        Ok(())
    }
}
