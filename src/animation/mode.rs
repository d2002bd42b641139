use serde::{Deserialize, Serialize};

/// Which layout particles are heading for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Structured tree
    Assembled,
    /// Scattered cloud; particles are generated here
    #[default]
    Dispersed,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Assembled => LayoutMode::Dispersed,
            LayoutMode::Dispersed => LayoutMode::Assembled,
        }
    }

    pub fn is_assembled(self) -> bool {
        self == LayoutMode::Assembled
    }

    pub fn from_assembled(assembled: bool) -> Self {
        if assembled {
            LayoutMode::Assembled
        } else {
            LayoutMode::Dispersed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dispersed() {
        assert_eq!(LayoutMode::default(), LayoutMode::Dispersed);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for mode in [LayoutMode::Assembled, LayoutMode::Dispersed] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&LayoutMode::Assembled).unwrap();
        assert_eq!(yaml.trim(), "assembled");
        let mode: LayoutMode = serde_yaml::from_str("dispersed").unwrap();
        assert_eq!(mode, LayoutMode::Dispersed);
    }
}
