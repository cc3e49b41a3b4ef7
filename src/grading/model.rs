// Ordinary least-squares linear regression.
//
// The grading path fits on a single (feature vector, target) observation and
// predicts on that same observation. With one sample the centered design
// matrix is identically zero, so the coefficients are zero and the intercept
// is the target: the prediction reproduces the target exactly, matching the
// upstream fit-and-predict formulation. The solver is kept general so a
// future multi-sample extension computes real coefficients.

/// Pivot threshold below which the normal equations are considered singular.
const SINGULAR_EPS: f64 = 1e-10;

/// A fitted linear model: `predict(x) = intercept + coefficients . x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Fit by centered least squares: subtract the feature and target means,
    /// solve the normal equations for the coefficients, and recover the
    /// intercept from the means.
    ///
    /// Singular (rank-deficient) normal equations fall back to zero
    /// coefficients, i.e. the mean predictor. This covers the one-sample
    /// case, where centering zeroes the design matrix outright.
    ///
    /// Panics if `samples` is empty or rows disagree on length; the caller
    /// always supplies at least one consistent sample.
    pub fn fit(samples: &[Vec<f64>], targets: &[f64]) -> Self {
        assert!(!samples.is_empty(), "cannot fit on zero samples");
        assert_eq!(samples.len(), targets.len());
        let dims = samples[0].len();
        assert!(samples.iter().all(|s| s.len() == dims));

        let n = samples.len() as f64;
        let mut x_mean = vec![0.0; dims];
        for sample in samples {
            for (acc, &v) in x_mean.iter_mut().zip(sample) {
                *acc += v / n;
            }
        }
        let y_mean: f64 = targets.iter().sum::<f64>() / n;

        // Normal equations on centered data: (Xc^T Xc) w = Xc^T yc.
        let mut gram = vec![vec![0.0; dims]; dims];
        let mut moment = vec![0.0; dims];
        for (sample, &y) in samples.iter().zip(targets) {
            let centered: Vec<f64> = sample.iter().zip(&x_mean).map(|(&v, &m)| v - m).collect();
            let yc = y - y_mean;
            for i in 0..dims {
                moment[i] += centered[i] * yc;
                for j in 0..dims {
                    gram[i][j] += centered[i] * centered[j];
                }
            }
        }

        let coefficients = solve(gram, moment).unwrap_or_else(|| vec![0.0; dims]);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(&w, &m)| w * m)
                .sum::<f64>();

        Self {
            coefficients,
            intercept,
        }
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(&w, &v)| w * v)
                .sum::<f64>()
    }
}

/// Solve `a x = b` by Gaussian elimination with partial pivoting. Returns
/// `None` when the system is singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        // Partial pivot: bring the largest remaining entry to the diagonal.
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;
        if a[pivot_row][col].abs() < SINGULAR_EPS {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    for col in (0..n).rev() {
        let tail: f64 = ((col + 1)..n).map(|k| a[col][k] * x[k]).sum();
        x[col] = (b[col] - tail) / a[col][col];
    }
    Some(x)
}

/// Clip a raw prediction into the grade range [0, 10] and round to two
/// decimal places.
pub fn clip_and_round(prediction: f64) -> f64 {
    (prediction.clamp(0.0, 10.0) * 100.0).round() / 100.0
}
