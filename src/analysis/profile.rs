use super::quadrant::{F0_REF, V0_REF};

/// Number of points sampled along a profile line unless configured otherwise.
pub const DEFAULT_SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("V0 must be a positive number, got {0}")]
    NonPositiveV0(f64),
    #[error("F0 must be a finite number, got {0}")]
    NonFiniteF0(f64),
    #[error("a profile needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
}

// ---------------------------------------------------------------------------
// ProfileLine
// ---------------------------------------------------------------------------

/// The force-velocity relationship of one test: the line through `(0, F0)`
/// and `(V0, 0)`, sampled for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLine {
    pub label: String,
    pub v0: f64,
    pub f0: f64,
    pub slope: f64,
    pub intercept: f64,
    /// `[velocity, force]` pairs from `(0, F0)` to `(V0, 0)`.
    pub samples: Vec<[f64; 2]>,
}

impl ProfileLine {
    /// The two points the line is fitted through.
    pub fn anchors(&self) -> [[f64; 2]; 2] {
        [[0.0, self.f0], [self.v0, 0.0]]
    }
}

/// Fit the profile line of one test and sample it `samples` times over
/// `[0, V0]`. The first sample is exactly `(0, F0)` and the last exactly
/// `(V0, 0)`.
pub fn fit_profile(
    label: impl Into<String>,
    v0: f64,
    f0: f64,
    samples: usize,
) -> Result<ProfileLine, ProfileError> {
    if !(v0.is_finite() && v0 > 0.0) {
        return Err(ProfileError::NonPositiveV0(v0));
    }
    if !f0.is_finite() {
        return Err(ProfileError::NonFiniteF0(f0));
    }
    if samples < 2 {
        return Err(ProfileError::TooFewSamples(samples));
    }

    let slope = -f0 / v0;
    let intercept = f0;
    let last = samples - 1;
    let points = (0..samples)
        .map(|i| {
            if i == last {
                return [v0, 0.0];
            }
            let x = v0 * i as f64 / last as f64;
            [x, slope * x + intercept]
        })
        .collect();

    Ok(ProfileLine {
        label: label.into(),
        v0,
        f0,
        slope,
        intercept,
        samples: points,
    })
}

// ---------------------------------------------------------------------------
// Axis range
// ---------------------------------------------------------------------------

/// Axis range keeping every profile and the reference point in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub max_velocity: f64,
    pub max_force: f64,
}

impl ChartBounds {
    /// `[0, max(V0…, V0_REF)] × [0, max(F0…, F0_REF)]`
    pub fn covering<'a>(profiles: impl IntoIterator<Item = &'a ProfileLine>) -> Self {
        profiles.into_iter().fold(
            ChartBounds {
                max_velocity: V0_REF,
                max_force: F0_REF,
            },
            |acc, p| ChartBounds {
                max_velocity: acc.max_velocity.max(p.v0),
                max_force: acc.max_force.max(p.f0),
            },
        )
    }
}
