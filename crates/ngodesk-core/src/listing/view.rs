use serde::{Deserialize, Serialize};

/// Grid-of-cards or table rendering of the same page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    #[default]
    List,
}

impl ViewMode {
    pub fn toggle(&self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ViewMode::List.toggle(), ViewMode::Grid);
        assert_eq!(ViewMode::Grid.toggle().toggle(), ViewMode::Grid);
        assert_eq!(ViewMode::default(), ViewMode::List);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ViewMode::Grid).unwrap(), "\"grid\"");
        let mode: ViewMode = serde_json::from_str("\"list\"").unwrap();
        assert_eq!(mode, ViewMode::List);
    }
}
