//! Lossless token classification for syntax highlighting.
//!
//! Every character of the input ends up in exactly one token, so joining the
//! token texts gives back the original expression. Tokens are cheap and are
//! recomputed on every render rather than cached.

use serde::{Deserialize, Serialize};

use crate::methods::find_method;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Method,       // catalog method name directly before `(`
    SingleQuoted, // 'text'
    DoubleQuoted, // "text"
    Number,       // 123
    Punctuation,  // ( ) ? . :
    LineBreak,    // \n or \r\n
    Plain,        // everything else
}

impl TokenType {
    pub fn is_literal(self) -> bool {
        matches!(self, TokenType::SingleQuoted | TokenType::DoubleQuoted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub token_type: TokenType,
    /// Byte range into the classified expression.
    pub start: usize,
    pub end: usize,
}

/// Classify `expr` into highlight tokens.
///
/// Unterminated quotes are not literals: the lone quote is plain text and
/// scanning carries on after it.
pub fn classify(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        match ch {
            // String literals
            '\'' | '"' => {
                let body = start + ch.len_utf8();
                match expr[body..].find(ch) {
                    Some(rel) => {
                        let end = body + rel + ch.len_utf8();
                        while chars.next_if(|&(idx, _)| idx < end).is_some() {}

                        let token_type = if ch == '\'' {
                            TokenType::SingleQuoted
                        } else {
                            TokenType::DoubleQuoted
                        };
                        push(&mut tokens, expr, token_type, start, end);
                    }
                    None => push(&mut tokens, expr, TokenType::Plain, start, body),
                }
            }

            // Integers
            '0'..='9' => {
                let mut end = start + 1;
                while let Some((idx, digit)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
                    end = idx + digit.len_utf8();
                }
                push(&mut tokens, expr, TokenType::Number, start, end);
            }

            '(' | ')' | '?' | '.' | ':' => {
                push(&mut tokens, expr, TokenType::Punctuation, start, start + 1);
            }

            '\n' => push(&mut tokens, expr, TokenType::LineBreak, start, start + 1),
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                chars.next();
                push(&mut tokens, expr, TokenType::LineBreak, start, start + 2);
            }

            // Identifiers; only catalog names in call position are methods
            _ if ch.is_ascii_alphabetic() || ch == '_' => {
                let mut end = start + 1;
                while let Some((idx, c)) =
                    chars.next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
                {
                    end = idx + c.len_utf8();
                }

                let is_call = matches!(chars.peek(), Some((_, '(')));
                let token_type = if is_call && find_method(&expr[start..end]).is_some() {
                    TokenType::Method
                } else {
                    TokenType::Plain
                };
                push(&mut tokens, expr, token_type, start, end);
            }

            _ => push(&mut tokens, expr, TokenType::Plain, start, start + ch.len_utf8()),
        }
    }

    tokens
}

/// Append a token, folding adjacent plain runs into one.
fn push(tokens: &mut Vec<Token>, expr: &str, token_type: TokenType, start: usize, end: usize) {
    if token_type == TokenType::Plain {
        if let Some(last) = tokens.last_mut() {
            if last.token_type == TokenType::Plain && last.end == start {
                last.text.push_str(&expr[start..end]);
                last.end = end;
                return;
            }
        }
    }

    tokens.push(Token {
        text: expr[start..end].to_string(),
        token_type,
        start,
        end,
    });
}
