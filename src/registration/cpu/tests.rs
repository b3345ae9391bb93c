//! CPU registration tests.

use super::*;
use crate::registration::error::RegistrationError;
use crate::registration::impl_generic::{fftn_impl, upsampled_dft_impl};
use crate::registration::{
    CorrelationSpace, MaskedCorrelationParams, PhaseCorrelationParams,
};
use numr::algorithm::fft::FftDirection;
use numr::dtype::Complex128;
use numr::runtime::cpu::CpuDevice;
use std::f64::consts::TAU;

fn setup() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());
    (client, device)
}

/// Periodic band-limited test signal: a handful of DFT harmonics, so
/// circular shifts (including fractional ones) can be sampled exactly.
fn harmonic_at(i: f64, j: f64, n: usize) -> f64 {
    let w = TAU / n as f64;
    2.0 + (3.0 * w * i).sin() + 0.7 * (5.0 * w * j).cos() + 0.4 * (w * (2.0 * i + 3.0 * j)).sin()
}

fn harmonic_image(n: usize, di: f64, dj: f64) -> Vec<f64> {
    (0..n * n)
        .map(|flat| harmonic_at((flat / n) as f64 + di, (flat % n) as f64 + dj, n))
        .collect()
}

/// Compactly supported blob, for tests where linear and circular shifts must
/// coincide.
fn blob_image(n: usize, ci: f64, cj: f64) -> Vec<f64> {
    (0..n * n)
        .map(|flat| {
            let i = (flat / n) as f64;
            let j = (flat % n) as f64;
            (-((i - ci).powi(2) + (j - cj).powi(2)) / 18.0).exp()
        })
        .collect()
}

fn unmasked(params: PhaseCorrelationParams) -> RegistrationMethod<CpuRuntime> {
    RegistrationMethod::PhaseCorrelation(params)
}

#[test]
fn test_shape_mismatch_rejected() {
    let (client, device) = setup();

    let reference = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 64], &[8, 8], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 32], &[8, 4], &device);

    for upsample_factor in [1.0, 10.0] {
        let method = unmasked(
            PhaseCorrelationParams::new().with_upsample_factor(upsample_factor),
        );
        let result = client.phase_cross_correlation(&reference, &moving, &method);
        assert!(matches!(
            result,
            Err(RegistrationError::ShapeMismatch { .. })
        ));
    }
}

#[test]
fn test_integer_shift_recovery() {
    let (client, device) = setup();
    let n = 32;

    let reference = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);
    // moving[x] = reference[x + d] for d = (3, -5)
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 3.0, -5.0), &[n, n], &device);

    let result = client
        .phase_cross_correlation(&reference, &moving, &unmasked(PhaseCorrelationParams::new()))
        .unwrap();

    assert_eq!(result.shifts, vec![3.0, -5.0]);
    assert!(result.error.unwrap().abs() < 1e-5);
    assert!(result.phase_diff.unwrap().abs() < 1e-5);
}

#[test]
fn test_subpixel_refinement_converges() {
    let (client, device) = setup();
    let n = 32;
    let (di, dj) = (0.25, -0.75);

    let reference = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, di, dj), &[n, n], &device);

    let mut errors = Vec::new();
    for upsample_factor in [1.0, 10.0, 100.0] {
        let method = unmasked(
            PhaseCorrelationParams::new().with_upsample_factor(upsample_factor),
        );
        let result = client
            .phase_cross_correlation(&reference, &moving, &method)
            .unwrap();
        let err = ((result.shifts[0] - di).powi(2) + (result.shifts[1] - dj).powi(2)).sqrt();
        errors.push(err);
    }

    // Estimation error shrinks as the upsampling factor grows.
    assert!(errors[1] <= errors[0] + 1e-12, "errors: {:?}", errors);
    assert!(errors[2] <= errors[1] + 1e-12, "errors: {:?}", errors);
    assert!(errors[2] < 0.05, "errors: {:?}", errors);
}

#[test]
fn test_singleton_axis_shift_is_zero() {
    let (client, device) = setup();
    let n = 32;

    let row: Vec<f64> = (0..n)
        .map(|j| (TAU * 3.0 * j as f64 / n as f64).sin() + 0.3 * (TAU * 7.0 * j as f64 / n as f64).cos())
        .collect();
    let shifted: Vec<f64> = (0..n)
        .map(|j| {
            let x = (j + 4) as f64;
            (TAU * 3.0 * x / n as f64).sin() + 0.3 * (TAU * 7.0 * x / n as f64).cos()
        })
        .collect();

    let reference = Tensor::<CpuRuntime>::from_slice(&row, &[1, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&shifted, &[1, n], &device);

    for upsample_factor in [1.0, 10.0] {
        let method = unmasked(
            PhaseCorrelationParams::new().with_upsample_factor(upsample_factor),
        );
        let result = client
            .phase_cross_correlation(&reference, &moving, &method)
            .unwrap();
        assert_eq!(result.shifts[0], 0.0);
        assert!((result.shifts[1] - 4.0).abs() < 0.2, "shifts: {:?}", result.shifts);
    }
}

#[test]
fn test_nan_input_rejected_without_masks() {
    let (client, device) = setup();
    let n = 16;

    let mut data = harmonic_image(n, 0.0, 0.0);
    data[5] = f64::NAN;
    let reference = Tensor::<CpuRuntime>::from_slice(&data, &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);

    let result =
        client.phase_cross_correlation(&reference, &moving, &unmasked(PhaseCorrelationParams::new()));
    assert!(matches!(result, Err(RegistrationError::NonFiniteInput)));
}

#[test]
fn test_nan_input_accepted_with_masks() {
    let (client, device) = setup();
    let n = 32;

    let clean = blob_image(n, 12.0, 14.0);
    let mut corrupted = clean.clone();
    corrupted[0] = f64::NAN;
    let reference_mask: Vec<f64> = corrupted
        .iter()
        .map(|v| if v.is_nan() { 0.0 } else { 1.0 })
        .collect();
    // moving[x] = reference[x + d] for d = (2, 3); the blob stays inside the
    // frame, so the linear shift is exact.
    let moving: Vec<f64> = (0..n * n)
        .map(|flat| {
            let i = (flat / n + 2) % n;
            let j = (flat % n + 3) % n;
            clean[i * n + j]
        })
        .collect();

    let reference = Tensor::<CpuRuntime>::from_slice(&corrupted, &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&moving, &[n, n], &device);
    let reference_mask = Tensor::<CpuRuntime>::from_slice(&reference_mask, &[n, n], &device);
    let moving_mask = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; n * n], &[n, n], &device);

    let method = RegistrationMethod::MaskedPhaseCorrelation(
        MaskedCorrelationParams::new(reference_mask).with_moving_mask(moving_mask),
    );
    let result = client
        .phase_cross_correlation(&reference, &moving, &method)
        .unwrap();

    assert!(result.shifts.iter().all(|s| s.is_finite()));
    assert_eq!(result.shifts, vec![2.0, 3.0]);
    assert_eq!(result.error, None);
    assert_eq!(result.phase_diff, None);
}

#[test]
fn test_fourier_space_matches_real_space() {
    let (client, device) = setup();
    let n = 32;

    let reference = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 1.25, -2.5), &[n, n], &device);

    let src_freq = fftn_impl(&client, &reference, FftDirection::Forward).unwrap();
    let target_freq = fftn_impl(&client, &moving, FftDirection::Forward).unwrap();

    let real_method = unmasked(PhaseCorrelationParams::new().with_upsample_factor(4.0));
    let fourier_method = unmasked(
        PhaseCorrelationParams::new()
            .with_upsample_factor(4.0)
            .with_space(CorrelationSpace::Fourier),
    );

    let from_real = client
        .phase_cross_correlation(&reference, &moving, &real_method)
        .unwrap();
    let from_fourier = client
        .phase_cross_correlation(&src_freq, &target_freq, &fourier_method)
        .unwrap();

    for (a, b) in from_real.shifts.iter().zip(from_fourier.shifts.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
    assert!((from_real.error.unwrap() - from_fourier.error.unwrap()).abs() < 1e-9);
    assert!((from_real.phase_diff.unwrap() - from_fourier.phase_diff.unwrap()).abs() < 1e-9);
}

#[test]
fn test_upsampled_dft_matches_full_dft() {
    let (client, device) = setup();

    // Unit factor, full-size window, zero offsets: the evaluator must
    // reproduce the ordinary unshifted DFT.
    let data: Vec<Complex128> = (0..32)
        .map(|i| Complex128::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
        .collect();
    let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[4, 8], &device);

    let reference = fftn_impl(&client, &tensor, FftDirection::Forward).unwrap();
    let evaluated = upsampled_dft_impl(&client, &tensor, &[4, 8], 1.0, None).unwrap();

    assert_eq!(evaluated.shape(), &[4, 8]);
    let want: Vec<Complex128> = reference.contiguous().unwrap().to_vec();
    let got: Vec<Complex128> = evaluated.contiguous().unwrap().to_vec();
    for (w, g) in want.iter().zip(got.iter()) {
        assert!((w.re - g.re).abs() < 1e-8 && (w.im - g.im).abs() < 1e-8);
    }
}

#[test]
fn test_upsampled_dft_rejects_bad_lengths() {
    let (client, device) = setup();

    let data = vec![Complex128::new(1.0, 0.0); 16];
    let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[4, 4], &device);

    let result = upsampled_dft_impl(&client, &tensor, &[4, 4, 4], 1.0, None);
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidParameter { .. })
    ));

    let result = upsampled_dft_impl(&client, &tensor, &[4, 4], 1.0, Some(&[0.0]));
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidParameter { .. })
    ));
}

#[test]
fn test_space_parse() {
    assert_eq!("real".parse::<CorrelationSpace>().unwrap(), CorrelationSpace::Real);
    assert_eq!("FOURIER".parse::<CorrelationSpace>().unwrap(), CorrelationSpace::Fourier);
    assert_eq!("Real".parse::<CorrelationSpace>().unwrap(), CorrelationSpace::Real);
    assert!(matches!(
        "quaternion".parse::<CorrelationSpace>(),
        Err(RegistrationError::InvalidParameter { .. })
    ));
}

#[test]
fn test_upsample_factor_below_one_rejected() {
    let (client, device) = setup();

    let image = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 64], &[8, 8], &device);
    let method = unmasked(PhaseCorrelationParams::new().with_upsample_factor(0.5));
    let result = client.phase_cross_correlation(&image, &image, &method);
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidParameter { .. })
    ));
}

#[test]
fn test_non_power_of_two_rejected_up_front() {
    let (client, device) = setup();

    let image = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 36], &[6, 6], &device);
    let result =
        client.phase_cross_correlation(&image, &image, &unmasked(PhaseCorrelationParams::new()));
    match result {
        Err(RegistrationError::InvalidParameter { message, .. }) => {
            assert!(message.contains("power-of-two"));
        }
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_masked_matches_unmasked_for_full_masks() {
    let (client, device) = setup();
    let n = 32;

    let clean = blob_image(n, 12.0, 14.0);
    let moving_data: Vec<f64> = (0..n * n)
        .map(|flat| {
            let i = (flat / n + 3) % n;
            let j = (flat % n + n - 2) % n;
            clean[i * n + j]
        })
        .collect();

    let reference = Tensor::<CpuRuntime>::from_slice(&clean, &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&moving_data, &[n, n], &device);

    let plain = client
        .phase_cross_correlation(&reference, &moving, &unmasked(PhaseCorrelationParams::new()))
        .unwrap();
    assert_eq!(plain.shifts, vec![3.0, -2.0]);

    let full = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; n * n], &[n, n], &device);
    let masked = client
        .masked_phase_cross_correlation(&reference, &moving, &full, None, 0.3)
        .unwrap();
    assert_eq!(masked, plain.shifts);
}

#[test]
fn test_masked_ignores_corrupted_region() {
    let (client, device) = setup();
    let n = 32;

    let clean = blob_image(n, 12.0, 14.0);
    let mut moving_data: Vec<f64> = (0..n * n)
        .map(|flat| {
            let i = (flat / n + 3) % n;
            let j = (flat % n + n - 2) % n;
            clean[i * n + j]
        })
        .collect();

    // Stamp a bright artifact over a corner of the moving image and mask it
    // out; the estimate must come from the valid pixels alone.
    let mut moving_mask = vec![1.0f64; n * n];
    for i in 24..30 {
        for j in 24..30 {
            moving_data[i * n + j] = 5.0;
            moving_mask[i * n + j] = 0.0;
        }
    }

    let reference = Tensor::<CpuRuntime>::from_slice(&clean, &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&moving_data, &[n, n], &device);
    let reference_mask = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; n * n], &[n, n], &device);
    let moving_mask = Tensor::<CpuRuntime>::from_slice(&moving_mask, &[n, n], &device);

    let shifts = client
        .masked_phase_cross_correlation(
            &reference,
            &moving,
            &reference_mask,
            Some(&moving_mask),
            0.3,
        )
        .unwrap();
    assert_eq!(shifts, vec![3.0, -2.0]);
}

#[test]
fn test_masked_rejects_bad_overlap_ratio() {
    let (client, device) = setup();

    let image = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 16], &[4, 4], &device);
    let mask = Tensor::<CpuRuntime>::from_slice(&vec![1.0f64; 16], &[4, 4], &device);
    let result = client.masked_phase_cross_correlation(&image, &image, &mask, None, 0.0);
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidParameter { .. })
    ));
}

#[test]
fn test_shifts_only_when_metrics_disabled() {
    let (client, device) = setup();
    let n = 16;

    let reference = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 1.0, 0.0), &[n, n], &device);

    let method = unmasked(PhaseCorrelationParams::new().with_return_error(false));
    let result = client
        .phase_cross_correlation(&reference, &moving, &method)
        .unwrap();
    assert_eq!(result.shifts, vec![1.0, 0.0]);
    assert_eq!(result.error, None);
    assert_eq!(result.phase_diff, None);
}

/// The reference algorithm normalizes the image energies by the sample count
/// only when no upsampling runs (the unnormalized matrix DFT supplies the
/// missing factor otherwise). Pin the pairing: a perfectly registered pair
/// must report zero error through both branches.
#[test]
fn test_error_metric_energy_asymmetry() {
    let (client, device) = setup();
    let n = 16;

    let reference = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 0.0, 0.0), &[n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&harmonic_image(n, 2.0, 1.0), &[n, n], &device);

    for upsample_factor in [1.0, 4.0] {
        let method = unmasked(
            PhaseCorrelationParams::new().with_upsample_factor(upsample_factor),
        );
        let result = client
            .phase_cross_correlation(&reference, &moving, &method)
            .unwrap();
        assert_eq!(result.shifts, vec![2.0, 1.0]);
        assert!(
            result.error.unwrap().abs() < 1e-5,
            "upsample {}: error {:?}",
            upsample_factor,
            result.error
        );
    }
}

#[test]
fn test_three_dimensional_shift_recovery() {
    let (client, device) = setup();
    let n = 16;

    let volume_at = |i: f64, j: f64, k: f64| -> f64 {
        let w = TAU / n as f64;
        (w * i).sin() + 0.6 * (3.0 * w * j).cos() + 0.3 * (w * (i + k)).sin()
    };
    let reference: Vec<f64> = (0..n * n * n)
        .map(|flat| {
            let (i, j, k) = (flat / (n * n), (flat / n) % n, flat % n);
            volume_at(i as f64, j as f64, k as f64)
        })
        .collect();
    let moving: Vec<f64> = (0..n * n * n)
        .map(|flat| {
            let (i, j, k) = (flat / (n * n), (flat / n) % n, flat % n);
            volume_at(i as f64 + 2.0, j as f64 - 3.0, k as f64 + 1.0)
        })
        .collect();

    let reference = Tensor::<CpuRuntime>::from_slice(&reference, &[n, n, n], &device);
    let moving = Tensor::<CpuRuntime>::from_slice(&moving, &[n, n, n], &device);

    let result = client
        .phase_cross_correlation(&reference, &moving, &unmasked(PhaseCorrelationParams::new()))
        .unwrap();
    assert_eq!(result.shifts, vec![2.0, -3.0, 1.0]);
}
