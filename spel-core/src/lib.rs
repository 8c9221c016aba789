//! Live analysis of SpEL-style accessor expressions.
//!
//! Every edit of an expression is re-analyzed from scratch: the validator
//! runs first, keys are extracted only from valid input, and the session
//! reconciles variable bindings against the new key set. Highlighting and
//! method suggestions are derived independently from the raw text.

pub mod client;
pub mod config;
pub mod extractor;
pub mod highlighter;
pub mod literal;
pub mod methods;
pub mod position;
pub mod session;
pub mod suggest;
pub mod validator;

pub use client::{ClientError, EvaluationClient, EvaluationRequest, EvaluationResponse};
pub use config::{Config, ConfigError};
pub use extractor::extract_keys;
pub use highlighter::{classify, Token, TokenType};
pub use literal::is_inside_literal;
pub use methods::{find_method, SpelMethod, SPEL_METHODS};
pub use session::{
    AnalysisSession, InputKind, SessionAction, SessionError, SessionState, VariableBinding,
};
pub use suggest::{accept, completion_context, suggest, Completion, CompletionContext};
pub use validator::{validate, Diagnostic};
