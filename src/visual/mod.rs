//! Distribution analysis of generated scenes
//!
//! Metrics and pass/fail criteria that let tests and the host check a
//! scene's layout without rendering it.

pub mod criteria;
pub mod metrics;

pub use criteria::{check_distribution, generate_distribution_report, DistributionCriteria};
pub use metrics::{analyze_store, layer_histogram, pearson, DistributionMetrics};
