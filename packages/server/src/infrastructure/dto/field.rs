//! Payload fields that clients send in more than one shape.

use std::fmt;

use serde::Deserialize;

/// An identifier that may arrive as a JSON number or a string.
///
/// Browser clients send quiz and user ids either way (`42` or `"42"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    /// The id as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_value_accepts_number_and_string() {
        // テスト項目: 数値・文字列どちらの id も受け付ける
        let number: IdValue = serde_json::from_str("42").unwrap();
        let text: IdValue = serde_json::from_str("\"42\"").unwrap();
        let code: IdValue = serde_json::from_str("\"A1B2C3\"").unwrap();

        assert_eq!(number.as_i64(), Some(42));
        assert_eq!(text.as_i64(), Some(42));
        assert_eq!(code.as_i64(), None);
        assert_eq!(code.to_string(), "A1B2C3");
    }
}
