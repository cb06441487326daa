use crate::config::ResampleConfig;
use crate::document::RawSample;
use crate::error::CanonicalError;

/// Densifies a sample sequence in time.
///
/// Between each consecutive pair `(p1, p2)` the step count is
/// `(p2.t - p1.t) / quantum - 1`. Pairs with fewer than one step keep their
/// gap; otherwise interior samples are placed at fractions `j / steps` for
/// every integer `j` in `1..steps`, with x, y and t interpolated linearly.
///
/// The first and last input samples are emitted verbatim, so the output is
/// never shorter than the input. A single sample is returned as is.
///
/// Uses the default sample cap; see [`resample_with_config`].
pub fn resample(samples: &[RawSample], quantum: f64) -> Result<Vec<RawSample>, CanonicalError> {
    resample_with_config(
        samples,
        &ResampleConfig {
            quantum,
            ..Default::default()
        },
    )
}

/// [`resample`] with an explicit config.
///
/// The output size is computed before anything is allocated. A stroke whose
/// densified length would exceed `cfg.max_samples` fails with
/// [`CanonicalError::TooManySamples`].
pub fn resample_with_config(
    samples: &[RawSample],
    cfg: &ResampleConfig,
) -> Result<Vec<RawSample>, CanonicalError> {
    cfg.validate()?;

    let Some(first) = samples.first() else {
        return Err(CanonicalError::EmptyStroke);
    };

    let required = output_len(samples, cfg.quantum);
    if required > cfg.max_samples as f64 {
        return Err(CanonicalError::TooManySamples {
            required: required as u64,
            limit: cfg.max_samples,
        });
    }

    let mut out = Vec::with_capacity(required as usize);
    out.push(*first);

    for pair in samples.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        interpolate_gap(&p1, &p2, cfg.quantum, &mut out);
        out.push(p2);
    }

    Ok(out)
}

/// Length of the densified sequence, counted in f64 so huge gaps cannot overflow.
fn output_len(samples: &[RawSample], quantum: f64) -> f64 {
    let interior: f64 = samples
        .windows(2)
        .map(|pair| interior_count((pair[1].t - pair[0].t) / quantum - 1.0))
        .sum();
    samples.len() as f64 + interior
}

/// Number of integers `j` with `1 <= j < steps`.
fn interior_count(steps: f64) -> f64 {
    if !steps.is_finite() || steps < 1.0 {
        return 0.0;
    }
    steps.ceil() - 1.0
}

/// Pushes the interior samples between `p1` and `p2`, excluding both ends.
fn interpolate_gap(p1: &RawSample, p2: &RawSample, quantum: f64, out: &mut Vec<RawSample>) {
    let dt = p2.t - p1.t;
    let steps = dt / quantum - 1.0;
    if interior_count(steps) == 0.0 {
        return;
    }

    let mut j = 1.0_f64;
    while j < steps {
        let frac = j / steps;
        out.push(RawSample {
            x: p1.x + (p2.x - p1.x) * frac,
            y: p1.y + (p2.y - p1.y) * frac,
            t: p1.t + dt * frac,
        });
        j += 1.0;
    }
}
