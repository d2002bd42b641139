use thiserror::Error;

/// Errors raised while loading or writing YAML.
///
/// Semantic problems (negative counts, non-positive radii) are not errors:
/// they are sanitised so the scene still renders.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("YAML serialization error: {0}")]
    Serialize(serde_yaml::Error),
}
