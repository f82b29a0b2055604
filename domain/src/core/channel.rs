//! Conversation channel

use crate::tool::entities::ToolCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The surface a request arrives on.
///
/// Public livechat visitors only see product and general tools; internal
/// staff see every registered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Livechat,
    Internal,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Livechat => "livechat",
            Channel::Internal => "internal",
        }
    }

    /// Anything other than `livechat` is treated as internal
    pub fn parse(value: &str) -> Channel {
        if value.trim().eq_ignore_ascii_case("livechat") {
            Channel::Livechat
        } else {
            Channel::Internal
        }
    }

    /// Tool categories exposed on this channel, in listing order.
    /// `None` means no restriction.
    pub fn allowed_categories(&self) -> Option<&'static [ToolCategory]> {
        match self {
            Channel::Livechat => Some(&[ToolCategory::Product, ToolCategory::General]),
            Channel::Internal => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Channel::parse("livechat"), Channel::Livechat);
        assert_eq!(Channel::parse(" LiveChat "), Channel::Livechat);
        assert_eq!(Channel::parse("internal"), Channel::Internal);
        assert_eq!(Channel::parse("backoffice"), Channel::Internal);
    }

    #[test]
    fn test_allowed_categories() {
        assert_eq!(
            Channel::Livechat.allowed_categories(),
            Some(&[ToolCategory::Product, ToolCategory::General][..])
        );
        assert!(Channel::Internal.allowed_categories().is_none());
    }
}
