use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The compilation stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Lex,
    Parse,
    Symbol,
    Scope,
}

impl Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorStage::Lex => write!(f, "LexError"),
            ErrorStage::Parse => write!(f, "ParseError"),
            ErrorStage::Symbol => write!(f, "SymbolError"),
            ErrorStage::Scope => write!(f, "ScopeError"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> ErrorStage {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::IncompleteOperator { .. }
            | ErrorImpl::TwoDotsInDouble { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar => ErrorStage::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::DuplicateExport
            | ErrorImpl::InvalidAssignmentTarget { .. } => ErrorStage::Parse,
            ErrorImpl::DuplicateDeclaration { .. }
            | ErrorImpl::UndefinedSymbol { .. }
            | ErrorImpl::GenericArgumentMismatch { .. } => ErrorStage::Symbol,
            ErrorImpl::NameNotDeclared { .. } | ErrorImpl::ControlOutsideLoop { .. } => {
                ErrorStage::Scope
            }
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::IncompleteOperator { .. } => "IncompleteOperator",
            ErrorImpl::TwoDotsInDouble { .. } => "TwoDotsInDouble",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateExport => "DuplicateExport",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::GenericArgumentMismatch { .. } => "GenericArgumentMismatch",
            ErrorImpl::NameNotDeclared { .. } => "NameNotDeclared",
            ErrorImpl::ControlOutsideLoop { .. } => "ControlOutsideLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::IncompleteOperator { expected, .. } => {
                ErrorTip::Suggestion(format!("Did you mean `{}`?", expected))
            }
            ErrorImpl::TwoDotsInDouble { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a double can only contain one `.`",
                token
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Missing closing `\"` of string literal"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("Missing closing `'` of char literal"))
            }
            ErrorImpl::UnexpectedToken { expected, found, .. } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::ExpectedExpression { found, .. } => {
                ErrorTip::Suggestion(format!("Expected an expression, found `{}`", found))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateExport => ErrorTip::Suggestion(String::from(
                "Merge the exported names into a single `export { ... }` block",
            )),
            ErrorImpl::InvalidAssignmentTarget { .. } => ErrorTip::Suggestion(String::from(
                "Only names, fields and indexed values can be assigned to",
            )),
            ErrorImpl::DuplicateDeclaration { path } => {
                ErrorTip::Suggestion(format!("`{}` is already declared", path))
            }
            ErrorImpl::UndefinedSymbol { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` or check its spelling", name))
            }
            ErrorImpl::GenericArgumentMismatch {
                name,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} generic arguments, received {}",
                name, expected, received
            )),
            ErrorImpl::NameNotDeclared { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` before using it", name))
            }
            ErrorImpl::ControlOutsideLoop { keyword } => {
                ErrorTip::Suggestion(format!("`{}` can only be used inside a loop", keyword))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.file, self.position.line
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("found {found:?}, expected {expected:?}")]
    IncompleteOperator { expected: String, found: String },
    #[error("two dots in a double: {token:?}")]
    TwoDotsInDouble { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated char literal")]
    UnterminatedChar,

    // Parsing
    #[error("expected {expected} but found {found_kind} {found:?}")]
    UnexpectedToken {
        expected: String,
        found_kind: String,
        found: String,
    },
    #[error("expecting expression, found {found_kind} {found:?}")]
    ExpectedExpression { found_kind: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("only one export block is allowed per file")]
    DuplicateExport,
    #[error("cannot assign to {target}")]
    InvalidAssignmentTarget { target: String },

    // Symbol resolution
    #[error("symbol `{path}` declared twice")]
    DuplicateDeclaration { path: String },
    #[error("Undefined Symbol used: {name}.")]
    UndefinedSymbol { name: String },
    #[error("generic arguments of `{name}` do not match: expected {expected}, received {received}")]
    GenericArgumentMismatch {
        name: String,
        expected: usize,
        received: usize,
    },

    // Scope checking
    #[error("Name {name} not declared before use.")]
    NameNotDeclared { name: String },
    #[error("`{keyword}` used outside of a loop")]
    ControlOutsideLoop { keyword: String },
}
