//! Input expressions naming which state keys a node reads.
//!
//! Grammar: alternatives separated by `|`, each a `&`-joined list of keys.
//! `url | local_dir` reads `url` if present, else `local_dir`.
//! `url & headers` requires both and reads `url`.

use crate::error::{FetchNodeError, Result};
use crate::types::state::State;

/// A parsed input expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputExpression {
    raw: String,
    alternatives: Vec<Vec<String>>,
}

impl InputExpression {
    pub fn parse(expression: &str) -> Result<Self> {
        let mut alternatives = Vec::new();

        for alternative in expression.split('|') {
            let keys: Vec<String> = alternative
                .split('&')
                .map(|key| key.trim().to_string())
                .collect();

            if keys.iter().any(|k| k.is_empty()) {
                return Err(FetchNodeError::config(format!(
                    "invalid input expression {expression:?}: empty key"
                )));
            }
            if let Some(bad) = keys.iter().find(|k| k.chars().any(char::is_whitespace)) {
                return Err(FetchNodeError::config(format!(
                    "invalid input expression {expression:?}: key {bad:?} contains whitespace"
                )));
            }
            alternatives.push(keys);
        }

        Ok(Self {
            raw: expression.trim().to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Every key mentioned, in expression order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().flatten().map(String::as_str)
    }

    /// Pick the key whose value feeds the node.
    ///
    /// The first alternative with all of its keys present wins; its first
    /// key is returned.
    pub fn resolve<'a>(&'a self, state: &State) -> Result<&'a str> {
        self.alternatives
            .iter()
            .find(|keys| keys.iter().all(|k| state.contains_key(k)))
            .map(|keys| keys[0].as_str())
            .ok_or_else(|| FetchNodeError::InputKeyMissing {
                key: self.raw.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key() {
        let expr = InputExpression::parse("url").unwrap();
        let state = State::new().with("url", "https://example.com");

        assert_eq!(expr.resolve(&state).unwrap(), "url");
        assert_eq!(expr.keys().collect::<Vec<_>>(), vec!["url"]);
    }

    #[test]
    fn test_alternatives_left_to_right() {
        let expr = InputExpression::parse("url | local_dir").unwrap();

        let both = State::new().with("url", "u").with("local_dir", "l");
        assert_eq!(expr.resolve(&both).unwrap(), "url");

        let local_only = State::new().with("local_dir", "l");
        assert_eq!(expr.resolve(&local_only).unwrap(), "local_dir");
    }

    #[test]
    fn test_conjunction_requires_all_keys() {
        let expr = InputExpression::parse("url & user_prompt | json_dir").unwrap();

        let partial = State::new().with("url", "u").with("json_dir", "{}");
        assert_eq!(expr.resolve(&partial).unwrap(), "json_dir");

        let full = State::new().with("url", "u").with("user_prompt", "p");
        assert_eq!(expr.resolve(&full).unwrap(), "url");
    }

    #[test]
    fn test_missing_reports_expression() {
        let expr = InputExpression::parse("url|local_dir").unwrap();
        let err = expr.resolve(&State::new()).unwrap_err();

        match err {
            FetchNodeError::InputKeyMissing { key } => assert_eq!(key, "url|local_dir"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_expressions() {
        for bad in ["", "  ", "url |", "& url", "url || html", "my url"] {
            assert!(
                matches!(
                    InputExpression::parse(bad),
                    Err(FetchNodeError::Config { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
