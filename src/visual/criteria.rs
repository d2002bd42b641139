//! Pass/fail checks over distribution metrics

use super::metrics::DistributionMetrics;

/// Thresholds a generated scene is expected to meet
#[derive(Debug, Clone)]
pub struct DistributionCriteria {
    pub min_lightness_correlation: f32,
    /// Scale must fall with depth, so this is an upper bound
    pub max_scale_correlation: f32,
    /// Allowed deviation of any layer from the mean layer count, as a fraction
    pub max_layer_imbalance: f32,
    pub min_scatter_inside: f32,
}

impl Default for DistributionCriteria {
    fn default() -> Self {
        Self {
            min_lightness_correlation: 0.5,
            max_scale_correlation: -0.5,
            max_layer_imbalance: 0.05,
            min_scatter_inside: 1.0,
        }
    }
}

/// Check metrics against criteria; an empty result means everything passed
pub fn check_distribution(metrics: &DistributionMetrics, criteria: &DistributionCriteria) -> Vec<String> {
    let mut failures = Vec::new();

    // correlations are meaningless without enough needles
    if metrics.needle_count >= 2 {
        if metrics.lightness_depth_correlation < criteria.min_lightness_correlation {
            failures.push(format!(
                "Lightness/depth correlation {:.3} below minimum {:.3}",
                metrics.lightness_depth_correlation, criteria.min_lightness_correlation
            ));
        }

        if metrics.scale_depth_correlation > criteria.max_scale_correlation {
            failures.push(format!(
                "Scale/depth correlation {:.3} above maximum {:.3}",
                metrics.scale_depth_correlation, criteria.max_scale_correlation
            ));
        }
    }

    let layers = metrics.layer_histogram.len();
    if layers > 0 && metrics.needle_count >= layers {
        let expected = metrics.needle_count as f32 / layers as f32;
        for (layer, &count) in metrics.layer_histogram.iter().enumerate() {
            let imbalance = (count as f32 - expected).abs() / expected;
            if imbalance > criteria.max_layer_imbalance {
                failures.push(format!(
                    "Layer {} holds {} needles, {:.1}% off the expected {:.1}",
                    layer,
                    count,
                    imbalance * 100.0,
                    expected
                ));
            }
        }
    }

    if metrics.scatter_inside < criteria.min_scatter_inside {
        failures.push(format!(
            "Only {:.2}% of particles scatter inside their sphere (minimum {:.2}%)",
            metrics.scatter_inside * 100.0,
            criteria.min_scatter_inside * 100.0
        ));
    }

    failures
}

/// Human-readable summary of a scene's metrics
pub fn generate_distribution_report(metrics: &DistributionMetrics) -> String {
    let histogram = metrics
        .layer_histogram
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"Distribution Report
===================
Particles:      {} needles / {} ornaments / {} frames
Layers:         {}
Lightness/depth: {:.3}
Scale/depth:    {:.3}
Mean depth:     {:.3}
Frosted:        {:.2}%
Gold:           {:.2}%
Scatter inside: {:.2}% (max ratio {:.3})
"#,
        metrics.needle_count,
        metrics.ornament_count,
        metrics.frame_count,
        histogram,
        metrics.lightness_depth_correlation,
        metrics.scale_depth_correlation,
        metrics.mean_depth,
        metrics.frost_fraction * 100.0,
        metrics.gold_fraction * 100.0,
        metrics.scatter_inside * 100.0,
        metrics.max_scatter_ratio
    )
}
