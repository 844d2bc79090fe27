use std::fmt;
use std::panic::Location;

use serde::Deserialize;

/// Operational fault categories understood by the host's error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Internal,
    InternalFatal,
    SyntaxUser,
    Forbidden,
    NotFound,
}

impl FailureKind {
    pub const ALL: [FailureKind; 5] = [
        FailureKind::Internal,
        FailureKind::InternalFatal,
        FailureKind::SyntaxUser,
        FailureKind::Forbidden,
        FailureKind::NotFound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::Internal => "InternalError",
            FailureKind::InternalFatal => "InternalFatalError",
            FailureKind::SyntaxUser => "SyntaxUserError",
            FailureKind::Forbidden => "ForbiddenError",
            FailureKind::NotFound => "NotFoundError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer codes shared with the host's error-kind enumeration.
///
/// Requests built against the host's constants must resolve to the same kinds
/// here, so the table is loaded from configuration rather than hard-wired.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorKindTable {
    pub internal: i32,
    pub internal_fatal: i32,
    pub syntax_user: i32,
    pub forbidden: i32,
    pub not_found: i32,
}

impl Default for ErrorKindTable {
    fn default() -> Self {
        Self {
            internal: 1,
            internal_fatal: 2,
            syntax_user: 3,
            forbidden: 4,
            not_found: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error kind code {code} is assigned to both {first} and {second}")]
pub struct DuplicateCode {
    pub code: i32,
    pub first: FailureKind,
    pub second: FailureKind,
}

impl ErrorKindTable {
    pub fn code_for(&self, kind: FailureKind) -> i32 {
        match kind {
            FailureKind::Internal => self.internal,
            FailureKind::InternalFatal => self.internal_fatal,
            FailureKind::SyntaxUser => self.syntax_user,
            FailureKind::Forbidden => self.forbidden,
            FailureKind::NotFound => self.not_found,
        }
    }

    pub fn kind_for(&self, code: i32) -> Option<FailureKind> {
        FailureKind::ALL
            .into_iter()
            .find(|kind| self.code_for(*kind) == code)
    }

    /// Every kind must own a distinct code, otherwise `kind_for` is ambiguous.
    pub fn validate(&self) -> Result<(), DuplicateCode> {
        for (i, first) in FailureKind::ALL.iter().enumerate() {
            for second in &FailureKind::ALL[i + 1..] {
                if self.code_for(*first) == self.code_for(*second) {
                    return Err(DuplicateCode {
                        code: self.code_for(*first),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A typed fault raised toward the host, tagged with where it was raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message} [{file}:{line}]")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}

impl Failure {
    #[track_caller]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            kind,
            message: message.into(),
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Outcome of exactly one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticResult {
    TextMessage(String),
    TypedFailure(Failure),
}

impl DiagnosticResult {
    pub fn text(&self) -> Option<&str> {
        match self {
            DiagnosticResult::TextMessage(text) => Some(text),
            DiagnosticResult::TypedFailure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            DiagnosticResult::TextMessage(_) => None,
            DiagnosticResult::TypedFailure(failure) => Some(failure),
        }
    }

    /// Hand the outcome to `?`-style propagation in the host.
    pub fn into_result(self) -> Result<String, Failure> {
        match self {
            DiagnosticResult::TextMessage(text) => Ok(text),
            DiagnosticResult::TypedFailure(failure) => Err(failure),
        }
    }
}

impl From<Result<String, Failure>> for DiagnosticResult {
    fn from(result: Result<String, Failure>) -> Self {
        match result {
            Ok(text) => DiagnosticResult::TextMessage(text),
            Err(failure) => DiagnosticResult::TypedFailure(failure),
        }
    }
}
