//! Default hierarchy configuration
//!
//! Layout given to a new hierarchy when the caller does not supply one.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::comparison::MAX_SUPPORTED_ORDER;
use crate::domain::hierarchy::{DEFAULT_ALTERNATIVES, DEFAULT_CRITERIA, DEFAULT_OBJECTIVE};

/// New-hierarchy defaults
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    /// Objective (root) name
    #[serde(default = "default_objective")]
    pub objective: String,

    /// Top-level criteria names
    #[serde(default = "default_criteria")]
    pub criteria: Vec<String>,

    /// Alternative names
    #[serde(default = "default_alternatives")]
    pub alternatives: Vec<String>,
}

fn default_objective() -> String {
    DEFAULT_OBJECTIVE.to_string()
}

fn default_criteria() -> Vec<String> {
    DEFAULT_CRITERIA.iter().map(|s| s.to_string()).collect()
}

fn default_alternatives() -> Vec<String> {
    DEFAULT_ALTERNATIVES.iter().map(|s| s.to_string()).collect()
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            objective: default_objective(),
            criteria: default_criteria(),
            alternatives: default_alternatives(),
        }
    }
}

impl HierarchyConfig {
    /// Validate hierarchy defaults
    ///
    /// Both lists must fit a matrix with a tabulated Random Index.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.objective.trim().is_empty() {
            return Err(ValidationError::EmptyObjective);
        }
        validate_names("criteria", &self.criteria)?;
        validate_names("alternatives", &self.alternatives)?;
        Ok(())
    }
}

fn validate_names(field: &'static str, names: &[String]) -> Result<(), ValidationError> {
    if names.is_empty() || names.len() > MAX_SUPPORTED_ORDER {
        return Err(ValidationError::InvalidListSize {
            field,
            count: names.len(),
            max: MAX_SUPPORTED_ORDER,
        });
    }
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_defaults() {
        let config = HierarchyConfig::default();
        assert_eq!(config.objective, "Objective");
        assert_eq!(config.criteria, vec!["Cost", "Quality", "Time"]);
        assert_eq!(config.alternatives, vec!["A", "B", "C"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_too_many_criteria() {
        let config = HierarchyConfig {
            criteria: (0..11).map(|i| format!("C{}", i)).collect(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidListSize {
                field: "criteria",
                count: 11,
                max: 10
            })
        );
    }

    #[test]
    fn test_empty_alternatives() {
        let config = HierarchyConfig {
            alternatives: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidListSize { field: "alternatives", .. })
        ));
    }

    #[test]
    fn test_blank_name() {
        let config = HierarchyConfig {
            criteria: vec!["Cost".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyName { field: "criteria" })
        );
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{ "alternatives": ["Vendor X", "Vendor Y"] }"#;
        let config: HierarchyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.objective, "Objective");
        assert_eq!(config.alternatives, vec!["Vendor X", "Vendor Y"]);
    }
}
