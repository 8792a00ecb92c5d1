use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("alias", TokenKind::Alias);
        map.insert("break", TokenKind::Break);
        map.insert("closed", TokenKind::Closed);
        map.insert("continue", TokenKind::Continue);
        map.insert("else", TokenKind::Else);
        map.insert("enum", TokenKind::Enum);
        map.insert("export", TokenKind::Export);
        map.insert("false", TokenKind::False);
        map.insert("fn", TokenKind::Fn);
        map.insert("if", TokenKind::If);
        map.insert("import", TokenKind::Import);
        map.insert("interface", TokenKind::Interface);
        map.insert("loop", TokenKind::Loop);
        map.insert("mut", TokenKind::Mut);
        map.insert("return", TokenKind::Return);
        map.insert("struct", TokenKind::Struct);
        map.insert("true", TokenKind::True);
        map.insert("when", TokenKind::When);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Reserved
    Alias,
    Break,
    Closed,
    Continue,
    Else,
    Enum,
    Export,
    False,
    Fn,
    If,
    Import,
    Interface,
    Loop,
    Mut,
    Return,
    Struct,
    True,
    When,

    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Semicolon,
    Dot,
    Comma,

    Colon,
    ColonColon, // ::

    Or,  // ||
    And, // &&

    Assignment, // =
    Equals,     // ==

    Plus,
    PlusEquals,
    PlusPlus,

    Dash,
    MinusEquals,
    MinusMinus,

    Star,
    StarEquals,

    Slash,
    SlashEquals,

    Not,       // !
    NotEquals, // !=

    Greater,
    GreaterEquals,
    Less,
    LessEquals,

    Comment,
    String,
    Char,
    Int,
    Double,
    Identifier,
    EOF,
    Error,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String
            | TokenKind::Char
            | TokenKind::Int
            | TokenKind::Double
            | TokenKind::Identifier
            | TokenKind::Comment
            | TokenKind::Error => write!(f, "{} ({})", self.kind, self.value),
            _ => write!(f, "{}", self.kind),
        }
    }
}
