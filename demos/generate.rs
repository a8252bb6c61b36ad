//! Name generation example
//!
//! Drives the conditioned predictor the way a sampler would: pick a category,
//! feed a start letter, and keep feeding back the most likely next letter
//! until the end-of-name symbol appears. The weights are untrained, so the
//! names are noise; the point is the caller-side loop.
//!
//! Run with `RUST_LOG=debug cargo run --example generate` to see model logs.

use burn::backend::NdArray;
use burn::tensor::{ElementConversion, Tensor};
use cond_rnn::prelude::*;

type Backend = NdArray<f32>;
type Device = <Backend as burn::tensor::backend::Backend>::Device;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ .,;'-";
const CATEGORIES: [&str; 18] = [
    "Arabic", "Chinese", "Czech", "Dutch", "English", "French", "German", "Greek", "Irish",
    "Italian", "Japanese", "Korean", "Polish", "Portuguese", "Russian", "Scottish", "Spanish",
    "Vietnamese",
];
const MAX_LENGTH: usize = 20;

fn n_letters() -> usize {
    // Plus one for the end-of-name marker
    LETTERS.chars().count() + 1
}

fn one_hot(index: usize, width: usize, device: &Device) -> Tensor<Backend, 2> {
    Tensor::<Backend, 2>::zeros([1, width], device)
        .slice_assign([0..1, index..index + 1], Tensor::ones([1, 1], device))
}

fn sample(
    model: &LstmPredictor<Backend>,
    category: usize,
    start: char,
    mode: ForwardMode,
    device: &Device,
) -> Result<String> {
    let eos = n_letters() - 1;
    let category = one_hot(category, CATEGORIES.len(), device);

    let mut hidden = model.init_hidden(1, device);
    let mut memory = model.init_memory(1, device);
    let mut letter = LETTERS.find(start).unwrap_or(0);
    let mut name = String::from(start);

    for _ in 0..MAX_LENGTH {
        let step = model.forward(
            category.clone(),
            one_hot(letter, n_letters(), device),
            hidden,
            memory,
            mode,
        )?;
        hidden = step.hidden;
        memory = step.memory;

        let top: i64 = step.log_probs.argmax(1).into_scalar().elem();
        letter = top as usize;
        if letter == eos {
            break;
        }
        if let Some(c) = LETTERS.chars().nth(letter) {
            name.push(c);
        }
    }

    Ok(name)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Conditioned Name Generation ===\n");

    let device = Default::default();
    let model: LstmPredictor<Backend> =
        ConditionedPredictorConfig::new(CATEGORIES.len(), n_letters(), 128, n_letters())
            .init(&device)?;

    println!("Model:");
    println!("  Categories:    {}", model.n_categories());
    println!("  Letters:       {}", model.input_size());
    println!("  Hidden size:   {}", model.hidden_size());
    println!("  Combined size: {}", model.combined_size());
    println!();

    for (category, start_letters) in [(14, "RUS"), (6, "GER"), (16, "SPA"), (1, "CHI")] {
        println!("{}:", CATEGORIES[category]);
        for start in start_letters.chars() {
            let greedy = sample(&model, category, start, ForwardMode::Inference, &device)?;
            let noisy = sample(&model, category, start, ForwardMode::Train, &device)?;
            println!("  {start} -> {greedy:<22} (with dropout: {noisy})");
        }
    }

    println!("\nA mis-sized input is rejected before it reaches the backend:");
    let err = model
        .forward(
            one_hot(0, CATEGORIES.len(), &device),
            one_hot(0, n_letters() - 1, &device),
            model.init_hidden(1, &device),
            model.init_memory(1, &device),
            ForwardMode::Inference,
        )
        .unwrap_err();
    println!("  {err}");

    Ok(())
}
