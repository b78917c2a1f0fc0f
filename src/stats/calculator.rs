//! Statistics Calculator Module
//! Handles the descriptive computations behind the dashboard charts:
//! histogram binning, kernel density, box-plot summaries and correlation.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Whisker reach, in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Number of points a density curve is evaluated on.
pub const KDE_GRID_SIZE: usize = 200;

/// Five-number summary for one box of a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// One histogram bar covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Square Pearson correlation matrix with row/column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Stateless statistics helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    /// Box-and-whisker summary. `None` for an empty sample.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Bin width by NumPy's "auto" rule: the smaller of the Sturges and
    /// Freedman-Diaconis estimates, falling back to Sturges when the IQR is zero.
    fn auto_bin_width(sorted: &[f64]) -> f64 {
        let n = sorted.len() as f64;
        let ptp = sorted[sorted.len() - 1] - sorted[0];
        let sturges = ptp / (n.log2() + 1.0);
        let iqr = Self::percentile(sorted, 75.0) - Self::percentile(sorted, 25.0);
        let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);

        if fd > 0.0 {
            fd.min(sturges)
        } else {
            sturges
        }
    }

    /// Equal-width histogram over the data range.
    ///
    /// A constant sample gets one bin of width 1 centered on the value.
    pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() {
            return Vec::new();
        }

        let mut first = sorted[0];
        let mut last = sorted[sorted.len() - 1];
        let width = Self::auto_bin_width(&sorted);
        if first == last {
            first -= 0.5;
            last += 0.5;
        }

        let n_bins = if width > 0.0 {
            (((last - first) / width).ceil() as usize).max(1)
        } else {
            1
        };
        let bin_width = (last - first) / n_bins as f64;

        let mut counts = vec![0usize; n_bins];
        for v in &sorted {
            let idx = (((v - first) / bin_width).floor() as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: first + i as f64 * bin_width,
                end: if i + 1 == n_bins {
                    last
                } else {
                    first + (i + 1) as f64 * bin_width
                },
                count,
            })
            .collect()
    }

    /// Gaussian kernel density over the data range, scaled by `scale`.
    ///
    /// Bandwidth follows Scott's rule. Fewer than two points, or zero
    /// variance, yield an empty curve.
    pub fn gaussian_kde(values: &[f64], scale: f64) -> Vec<[f64; 2]> {
        let sorted = Self::sorted(values);
        if sorted.len() < 2 {
            return Vec::new();
        }

        let std = sorted.iter().std_dev();
        if !(std > 0.0) {
            return Vec::new();
        }

        let n = sorted.len() as f64;
        let bandwidth = std * n.powf(-1.0 / 5.0);
        let kernels: Vec<Normal> = sorted
            .iter()
            .filter_map(|&x| Normal::new(x, bandwidth).ok())
            .collect();

        let first = sorted[0];
        let last = sorted[sorted.len() - 1];
        let step = (last - first) / (KDE_GRID_SIZE - 1) as f64;

        (0..KDE_GRID_SIZE)
            .map(|i| {
                let x = first + i as f64 * step;
                let density = kernels.iter().map(|k| k.pdf(x)).sum::<f64>() / n;
                [x, density * scale]
            })
            .collect()
    }

    /// Pearson correlation over the positions where both samples are present.
    ///
    /// `NaN` when fewer than two complete pairs exist or either side is constant.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y.iter())
            .filter_map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
                _ => None,
            })
            .unzip();

        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if !(sx > 0.0) || !(sy > 0.0) {
            return f64::NAN;
        }

        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        r.clamp(-1.0, 1.0)
    }

    /// Pairwise correlation matrix of labelled columns.
    ///
    /// The diagonal is exactly 1.0 for any column with nonzero variance.
    pub fn correlation_matrix(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
        let k = columns.len();
        let mut values = vec![vec![f64::NAN; k]; k];

        for i in 0..k {
            let present: Vec<f64> = columns[i].1.iter().flatten().copied().collect();
            let variance = if present.len() > 1 {
                present.iter().variance()
            } else {
                f64::NAN
            };
            if variance > 0.0 {
                values[i][i] = 1.0;
            }

            for j in (i + 1)..k {
                let r = Self::pearson(&columns[i].1, &columns[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 25.0), 1.75);
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 50.0), 2.5);
        assert_relative_eq!(StatsCalculator::percentile(&sorted, 100.0), 4.0);
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_box_stats_with_outlier() {
        let values = [0.70, 0.72, 0.74, 0.75, 0.76, 0.78, 0.95];
        let stats = StatsCalculator::box_stats(&values).unwrap();

        assert_eq!(stats.count, 7);
        assert_relative_eq!(stats.median, 0.75);
        assert_relative_eq!(stats.q1, 0.73, epsilon = 1e-12);
        assert_relative_eq!(stats.q3, 0.77, epsilon = 1e-12);
        assert_relative_eq!(stats.whisker_low, 0.70);
        assert_relative_eq!(stats.whisker_high, 0.78);
        assert_eq!(stats.outliers, vec![0.95]);
    }

    #[test]
    fn test_box_stats_degenerate() {
        assert!(StatsCalculator::box_stats(&[]).is_none());

        let single = StatsCalculator::box_stats(&[0.8]).unwrap();
        assert_eq!(single.count, 1);
        assert_relative_eq!(single.q1, 0.8);
        assert_relative_eq!(single.q3, 0.8);
        assert_relative_eq!(single.whisker_low, 0.8);
        assert_relative_eq!(single.whisker_high, 0.8);
        assert!(single.outliers.is_empty());
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (18..=96).map(|a| a as f64).collect();
        let bins = StatsCalculator::histogram(&values);

        assert!(!bins.is_empty());
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_relative_eq!(bins[0].start, 18.0);
        assert_relative_eq!(bins[bins.len() - 1].end, 96.0);
        for pair in bins.windows(2) {
            assert_relative_eq!(pair[0].end, pair[1].start, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_histogram_sturges_for_three_values() {
        // n = 3: Sturges width 20 / (log2(3) + 1) ~= 7.74, FD width 20 * 3^(-1/3) ~= 13.9
        let bins = StatsCalculator::histogram(&[60.0, 70.0, 80.0]);
        assert_eq!(bins.len(), 3);
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(StatsCalculator::histogram(&[]).is_empty());

        let bins = StatsCalculator::histogram(&[70.0, 70.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_relative_eq!(bins[0].start, 69.5);
        assert_relative_eq!(bins[0].end, 70.5);
    }

    #[test]
    fn test_kde_integrates_to_scale() {
        let values: Vec<f64> = (0..50).map(|i| 60.0 + (i % 17) as f64).collect();
        let curve = StatsCalculator::gaussian_kde(&values, 1.0);
        assert_eq!(curve.len(), KDE_GRID_SIZE);

        // Curve is cut at the data range, so a bit of mass is lost at the tails
        let step = curve[1][0] - curve[0][0];
        let area: f64 = curve.iter().map(|p| p[1] * step).sum();
        assert!(area > 0.75 && area <= 1.0, "area = {}", area);
        assert!(curve.iter().all(|p| p[1] >= 0.0));
    }

    #[test]
    fn test_kde_degenerate_inputs() {
        assert!(StatsCalculator::gaussian_kde(&[], 1.0).is_empty());
        assert!(StatsCalculator::gaussian_kde(&[70.0], 1.0).is_empty());
        assert!(StatsCalculator::gaussian_kde(&[70.0, 70.0, 70.0], 1.0).is_empty());
    }

    #[test]
    fn test_pearson_perfect_and_inverse() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let y = vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)];
        let z = vec![Some(8.0), Some(6.0), Some(4.0), Some(2.0)];
        assert_relative_eq!(StatsCalculator::pearson(&x, &y), 1.0, epsilon = 1e-12);
        assert_relative_eq!(StatsCalculator::pearson(&x, &z), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_uses_complete_pairs_only() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let y = vec![Some(1.0), Some(100.0), Some(3.0), None];
        // Only (1,1) and (3,3) remain
        assert_relative_eq!(StatsCalculator::pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        let x = vec![Some(1.0), Some(1.0), Some(1.0)];
        let y = vec![Some(1.0), Some(2.0), Some(3.0)];
        assert!(StatsCalculator::pearson(&x, &y).is_nan());
        assert!(StatsCalculator::pearson(&[Some(1.0)], &[Some(2.0)]).is_nan());
    }

    #[test]
    fn test_correlation_matrix_symmetric_with_unit_diagonal() {
        let columns = vec![
            ("Age".to_string(), vec![Some(70.0), Some(75.0), Some(80.0), Some(88.0)]),
            ("MMSE".to_string(), vec![Some(30.0), Some(27.0), Some(28.0), Some(21.0)]),
            ("CDR".to_string(), vec![Some(0.0), Some(0.5), Some(0.0), Some(1.0)]),
            ("nWBV".to_string(), vec![Some(0.75), Some(0.73), None, Some(0.69)]),
        ];
        let matrix = StatsCalculator::correlation_matrix(&columns);

        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.labels, vec!["Age", "MMSE", "CDR", "nWBV"]);
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..4 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_correlation_matrix_constant_column() {
        let columns = vec![
            ("A".to_string(), vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("B".to_string(), vec![Some(5.0), Some(5.0), Some(5.0)]),
        ];
        let matrix = StatsCalculator::correlation_matrix(&columns);
        assert_eq!(matrix.get(0, 0), 1.0);
        assert!(matrix.get(1, 1).is_nan());
        assert!(matrix.get(0, 1).is_nan());
    }
}
