//! Analysis state for a single expression editor.
//!
//! An [`AnalysisSession`] is a plain value. [`AnalysisSession::edit`] is a
//! pure transition from the previous session and the new text to the next
//! session; the host keeps the one mutable copy and re-renders from it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::client::EvaluationRequest;
use crate::extractor::extract_keys;
use crate::highlighter::{classify, Token};
use crate::methods::SpelMethod;
use crate::suggest::suggest;
use crate::validator::{validate, Diagnostic};

/// Text a binding holds while its kind is [`InputKind::Null`].
pub const NULL_LITERAL: &str = "null";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown variable: {0}")]
    UnknownKey(String),
    #[error("variable '{0}' is set to null and cannot be edited")]
    NullBinding(String),
    #[error("expression cannot be submitted: {0}")]
    NotSubmittable(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No edit has been analyzed yet.
    #[default]
    Idle,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBinding {
    pub key: String,
    pub value: String,
    pub kind: InputKind,
}

impl VariableBinding {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: String::new(),
            kind: InputKind::Text,
        }
    }

    /// The value sent to the evaluation service: `None` for null bindings.
    pub fn wire_value(&self) -> Option<String> {
        match self.kind {
            InputKind::Text => Some(self.value.clone()),
            InputKind::Null => None,
        }
    }
}

/// Callbacks from the editor and the variable panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Edit { text: String },
    SetValue { key: String, value: String },
    SetInputKind { key: String, kind: InputKind },
    ClearKey { key: String },
}

impl SessionAction {
    pub fn description(&self) -> &'static str {
        match self {
            SessionAction::Edit { .. } => "Re-analyzing edited expression",
            SessionAction::SetValue { .. } => "Updating variable value",
            SessionAction::SetInputKind { .. } => "Switching variable input kind",
            SessionAction::ClearKey { .. } => "Removing variable",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSession {
    expression: String,
    state: SessionState,
    diagnostic: Option<Diagnostic>,
    keys: Vec<String>,
    bindings: HashMap<String, VariableBinding>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze `text` as the new expression.
    ///
    /// An invalid expression drops every key and binding. A valid one keeps
    /// the bindings of keys it still references, creates empty text bindings
    /// for new keys and drops the rest.
    pub fn edit(&self, text: impl Into<String>) -> Self {
        let expression = text.into();

        if let Some(diagnostic) = validate(&expression) {
            debug!(
                "expression rejected by '{}' at {}",
                diagnostic.rule, diagnostic.position
            );
            return Self {
                expression,
                state: SessionState::Invalid,
                diagnostic: Some(diagnostic),
                keys: Vec::new(),
                bindings: HashMap::new(),
            };
        }

        let keys = extract_keys(&expression);
        let bindings: HashMap<_, _> = keys
            .iter()
            .map(|key| {
                let binding = self
                    .bindings
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| VariableBinding::new(key));
                (key.clone(), binding)
            })
            .collect();

        debug!(
            "expression valid with {} key(s), {} dropped",
            keys.len(),
            self.keys.iter().filter(|k| !bindings.contains_key(*k)).count()
        );

        Self {
            expression,
            state: SessionState::Valid,
            diagnostic: None,
            keys,
            bindings,
        }
    }

    pub fn dispatch(&mut self, action: SessionAction) -> Result<(), SessionError> {
        debug!("{}", action.description());
        match action {
            SessionAction::Edit { text } => {
                *self = self.edit(text);
                Ok(())
            }
            SessionAction::SetValue { key, value } => self.set_value(&key, value),
            SessionAction::SetInputKind { key, kind } => self.set_input_kind(&key, kind),
            SessionAction::ClearKey { key } => self.clear_key(&key),
        }
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        let binding = self.binding_mut(key)?;
        if binding.kind == InputKind::Null {
            warn!("ignoring edit of null variable '{}'", key);
            return Err(SessionError::NullBinding(key.to_string()));
        }
        binding.value = value.into();
        Ok(())
    }

    /// Switching to null stores the literal `"null"`; switching back to
    /// text starts from an empty value.
    pub fn set_input_kind(&mut self, key: &str, kind: InputKind) -> Result<(), SessionError> {
        let binding = self.binding_mut(key)?;
        binding.kind = kind;
        binding.value = match kind {
            InputKind::Null => NULL_LITERAL.to_string(),
            InputKind::Text => String::new(),
        };
        Ok(())
    }

    /// Forget a variable until the next edit derives it again.
    pub fn clear_key(&mut self, key: &str) -> Result<(), SessionError> {
        if self.bindings.remove(key).is_none() {
            warn!("cannot clear unknown variable '{}'", key);
            return Err(SessionError::UnknownKey(key.to_string()));
        }
        self.keys.retain(|k| k != key);
        Ok(())
    }

    fn binding_mut(&mut self, key: &str) -> Result<&mut VariableBinding, SessionError> {
        self.bindings.get_mut(key).ok_or_else(|| {
            warn!("no binding for variable '{}'", key);
            SessionError::UnknownKey(key.to_string())
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    /// Referenced keys in order of first appearance.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn bindings(&self) -> &HashMap<String, VariableBinding> {
        &self.bindings
    }

    pub fn binding(&self, key: &str) -> Option<&VariableBinding> {
        self.bindings.get(key)
    }

    /// Keys containing `term`, ignoring case. An empty term matches all.
    pub fn filter_keys(&self, term: &str) -> Vec<&str> {
        let term = term.to_lowercase();
        self.keys
            .iter()
            .filter(|key| key.to_lowercase().contains(&term))
            .map(String::as_str)
            .collect()
    }

    pub fn tokens(&self) -> Vec<Token> {
        classify(&self.expression)
    }

    pub fn suggestions(&self, cursor: usize) -> Vec<&'static SpelMethod> {
        suggest(&self.expression, cursor)
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    fn submit_blocker(&self) -> Option<&'static str> {
        if self.state != SessionState::Valid {
            Some("expression is not valid")
        } else if self.expression.trim().is_empty() {
            Some("expression is empty")
        } else if self.keys.is_empty() {
            Some("expression references no variables")
        } else {
            None
        }
    }

    /// Payload for the evaluation service.
    pub fn evaluation_request(&self) -> Result<EvaluationRequest, SessionError> {
        if let Some(reason) = self.submit_blocker() {
            return Err(SessionError::NotSubmittable(reason));
        }

        let keys: BTreeMap<_, _> = self
            .bindings
            .values()
            .map(|binding| (binding.key.clone(), binding.wire_value()))
            .collect();

        Ok(EvaluationRequest {
            expression: self.expression.clone(),
            keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = AnalysisSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.keys().is_empty());
        assert!(session.diagnostic().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_valid_edit_creates_empty_text_bindings() {
        let session = AnalysisSession::new().edit("get('city').equals(get('country'))");
        assert_eq!(session.state(), SessionState::Valid);
        assert_eq!(session.keys(), ["city", "country"]);

        let binding = session.binding("city").unwrap();
        assert_eq!(binding.value, "");
        assert_eq!(binding.kind, InputKind::Text);
    }

    #[test]
    fn test_reconciliation_drops_vanished_keys() {
        let mut session = AnalysisSession::new().edit("get('a')");
        session.set_value("a", "1").unwrap();

        let session = session.edit("get('b')");
        assert_eq!(session.keys(), ["b"]);
        assert!(session.binding("a").is_none());
        assert_eq!(session.binding("b").unwrap().value, "");
        assert_eq!(session.bindings().len(), 1);
    }

    #[test]
    fn test_reconciliation_keeps_persisting_values() {
        let mut session = AnalysisSession::new().edit("get('a')");
        session.set_value("a", "1").unwrap();
        session.set_input_kind("a", InputKind::Text).unwrap();
        session.set_value("a", "2").unwrap();

        let session = session.edit("get('a').concat(get('b'))");
        assert_eq!(session.binding("a").unwrap().value, "2");
        assert_eq!(session.binding("b").unwrap().value, "");
    }

    #[test]
    fn test_null_kind_survives_edit() {
        let mut session = AnalysisSession::new().edit("get('a')");
        session.set_input_kind("a", InputKind::Null).unwrap();

        let session = session.edit("get('a').trim()");
        let binding = session.binding("a").unwrap();
        assert_eq!(binding.kind, InputKind::Null);
        assert_eq!(binding.value, NULL_LITERAL);
    }

    #[test]
    fn test_invalid_edit_clears_everything() {
        let mut session = AnalysisSession::new().edit("get('a')");
        session.set_value("a", "1").unwrap();

        let session = session.edit("get('a'+'b')");
        assert_eq!(session.state(), SessionState::Invalid);
        assert!(session.keys().is_empty());
        assert!(session.bindings().is_empty());
        assert_eq!(session.diagnostic().unwrap().position, 0);

        // Fixing the expression starts the binding over.
        let session = session.edit("get('a')");
        assert_eq!(session.binding("a").unwrap().value, "");
        assert!(session.diagnostic().is_none());
    }

    #[test]
    fn test_edit_does_not_touch_previous_session() {
        let before = AnalysisSession::new().edit("get('a')");
        let snapshot = before.clone();
        let _after = before.edit("get('b')");
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_input_kind_switch() {
        let mut session = AnalysisSession::new().edit("get('a')");
        session.set_value("a", "hello").unwrap();

        session.set_input_kind("a", InputKind::Null).unwrap();
        assert_eq!(session.binding("a").unwrap().value, "null");
        assert_eq!(
            session.set_value("a", "x"),
            Err(SessionError::NullBinding("a".to_string()))
        );

        session.set_input_kind("a", InputKind::Text).unwrap();
        assert_eq!(session.binding("a").unwrap().value, "");
    }

    #[test]
    fn test_unknown_key() {
        let mut session = AnalysisSession::new().edit("get('a')");
        assert_eq!(
            session.set_value("zzz", "1"),
            Err(SessionError::UnknownKey("zzz".to_string()))
        );
        assert!(session.clear_key("zzz").is_err());
    }

    #[test]
    fn test_clear_key_until_next_edit() {
        let mut session = AnalysisSession::new().edit("get('a') + get('b')");
        session.set_value("a", "1").unwrap();
        session.clear_key("a").unwrap();
        assert_eq!(session.keys(), ["b"]);
        assert!(session.binding("a").is_none());

        let session = session.edit("get('a') + get('b') ");
        assert_eq!(session.keys(), ["a", "b"]);
        assert_eq!(session.binding("a").unwrap().value, "");
    }

    #[test]
    fn test_dispatch() {
        let mut session = AnalysisSession::new();
        session
            .dispatch(SessionAction::Edit { text: "get('city')".to_string() })
            .unwrap();
        session
            .dispatch(SessionAction::SetValue {
                key: "city".to_string(),
                value: "London".to_string(),
            })
            .unwrap();
        assert_eq!(session.binding("city").unwrap().value, "London");

        session
            .dispatch(SessionAction::ClearKey { key: "city".to_string() })
            .unwrap();
        assert!(session.keys().is_empty());
    }

    #[test]
    fn test_filter_keys() {
        let session = AnalysisSession::new().edit("get('firstName') + get('lastName') + get('city')");
        assert_eq!(session.filter_keys("NAME"), vec!["firstName", "lastName"]);
        assert_eq!(session.filter_keys("").len(), 3);
        assert!(session.filter_keys("zip").is_empty());
    }

    #[test]
    fn test_submission_policy() {
        let session = AnalysisSession::new().edit("'London'.toUpperCase()");
        assert_eq!(
            session.evaluation_request(),
            Err(SessionError::NotSubmittable("expression references no variables"))
        );

        let session = session.edit("get('a b')");
        assert!(!session.can_submit());

        let session = session.edit("   ");
        assert_eq!(
            session.evaluation_request(),
            Err(SessionError::NotSubmittable("expression is empty"))
        );
    }

    #[test]
    fn test_evaluation_request_serializes_null_bindings() {
        let mut session = AnalysisSession::new().edit("get('city').equals(get('country'))");
        session.set_value("city", "London").unwrap();
        session.set_input_kind("country", InputKind::Null).unwrap();

        let request = session.evaluation_request().unwrap();
        assert_eq!(request.expression, "get('city').equals(get('country'))");
        assert_eq!(request.keys["city"], Some("London".to_string()));
        assert_eq!(request.keys["country"], None);
    }

    #[test]
    fn test_tokens_and_suggestions_follow_expression() {
        let session = AnalysisSession::new().edit("get('a').st");
        assert_eq!(session.tokens()[0].text, "get");
        let names: Vec<_> = session.suggestions(11).iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["startsWith", "strip", "stripLeading", "stripTrailing"]
        );
    }
}
