//! Tests for output dropout and forward modes

use burn::backend::NdArray;
use burn::tensor::Tensor;
use cond_rnn::regularization::{ForwardMode, OutputDropout};

type Backend = NdArray<f32>;

#[test]
fn test_inference_is_identity() {
    let device = Default::default();
    let dropout = OutputDropout::new(0.5).unwrap();
    let x = Tensor::<Backend, 2>::random(
        [8, 32],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );

    let y = dropout.forward(x.clone(), ForwardMode::Inference);

    let diff = (y - x).abs().max().into_scalar();
    assert_eq!(diff, 0.0);
}

#[test]
fn test_train_zeroes_and_rescales() {
    let device = Default::default();
    let dropout = OutputDropout::new(0.5).unwrap();
    let x = Tensor::<Backend, 2>::ones([100, 100], &device);

    let values = dropout
        .forward(x, ForwardMode::Train)
        .into_data()
        .to_vec::<f32>()
        .unwrap();

    let zeros = values.iter().filter(|&&v| v == 0.0).count();
    let fraction = zeros as f32 / values.len() as f32;
    assert!(
        (0.4..0.6).contains(&fraction),
        "Dropped fraction {} far from 0.5",
        fraction
    );

    // Survivors are scaled by 1 / (1 - p)
    for &v in values.iter().filter(|&&v| v != 0.0) {
        assert!((v - 2.0).abs() < 1e-5, "Unexpected survivor value {}", v);
    }
}

#[test]
fn test_default_rate_keeps_most_activations() {
    let device = Default::default();
    let dropout = OutputDropout::new(0.1).unwrap();
    let x = Tensor::<Backend, 3>::ones([10, 10, 100], &device);

    let y = dropout.forward(x, ForwardMode::Train);
    assert_eq!(y.dims(), [10, 10, 100]);

    let values = y.into_data().to_vec::<f32>().unwrap();
    let zeros = values.iter().filter(|&&v| v == 0.0).count();
    let fraction = zeros as f32 / values.len() as f32;
    assert!((0.05..0.15).contains(&fraction), "Dropped fraction {}", fraction);
}
