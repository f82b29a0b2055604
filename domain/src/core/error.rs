//! Domain error types

use thiserror::Error;

/// Errors raised by the [`ToolRegistry`](crate::tool::registry::ToolRegistry)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool must have a non-empty code")]
    MissingCode,

    #[error("Tool '{0}' not found")]
    NotFound(String),
}

impl RegistryError {
    /// Check if this error represents a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = RegistryError::NotFound("stock_check".to_string());
        assert_eq!(error.to_string(), "Tool 'stock_check' not found");
    }

    #[test]
    fn test_is_not_found_check() {
        assert!(RegistryError::NotFound("x".to_string()).is_not_found());
        assert!(!RegistryError::MissingCode.is_not_found());
    }
}
