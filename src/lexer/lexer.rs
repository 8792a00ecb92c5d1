use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

macro_rules! pattern {
    ($regex:literal, $handler:expr) => {
        RegexPattern {
            regex: Regex::new($regex).unwrap(),
            handler: $handler,
        }
    };
}

lazy_static! {
    // Order matters: longer operators must come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!(r"^\s+", skip_handler),
        pattern!(r"^//[^\n]*", comment_handler),
        pattern!(r"^[a-zA-Z_]+", symbol_handler),
        pattern!(r"^[0-9][0-9.]*", number_handler),
        pattern!(r#"^"[^"]*""#, string_handler),
        pattern!(r#"^""#, unterminated_string_handler),
        pattern!(r"^'(\\.|[^'\\])'", char_handler),
        pattern!(r"^'", unterminated_char_handler),
        pattern!(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern!(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern!(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern!(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern!(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern!(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern!(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern!(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern!(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern!(r"^::", MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::")),
        pattern!(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern!(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern!(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern!(r"^[|&]", incomplete_operator_handler),
        pattern!(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern!(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern!(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern!(r"^\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern!(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern!(r"^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern!(r"^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern!(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern!(r"^\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern!(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern!(r"^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern!(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern!(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern!(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern!(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern!(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern!(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern!(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    file: Rc<String>,
    error: Option<Error>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            file: file_name,
            error: None,
        }
    }

    /// Moves past `n` bytes, counting the newlines consumed on the way.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        self.line += self.source[self.pos..end].matches('\n').count() as u32;
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, Rc::clone(&self.file))
    }

    /// Span of the next `len` bytes starting at the current position.
    pub fn span_of(&self, len: usize) -> Span {
        let end = (self.pos + len).min(self.source.len());
        let newlines = self.source[self.pos..end].matches('\n').count() as u32;

        Span {
            start: self.position(),
            end: Position::new(end as u32, self.line + newlines, Rc::clone(&self.file)),
        }
    }

    /// Records a lexical error. An `Error` token carrying the message is
    /// pushed and scanning stops.
    pub fn fail(&mut self, error: ErrorImpl) {
        let span = self.span_of(0);
        self.push(MK_TOKEN!(TokenKind::Error, error.to_string(), span.clone()));
        self.error = Some(Error::new(error, span.start));
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

fn comment_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Comment, matched[2..].to_string(), span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, String::from(matched), span));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, matched: &str) {
    let kind = match matched.matches('.').count() {
        0 => TokenKind::Int,
        1 => TokenKind::Double,
        _ => {
            lexer.fail(ErrorImpl::TwoDotsInDouble {
                token: matched.to_string(),
            });
            return;
        }
    };

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(kind, matched.to_string(), span));
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, matched: &str) {
    // Raw content between the quotes, no escape processing.
    let span = lexer.span_of(matched.len());
    let content = matched[1..matched.len() - 1].to_string();

    lexer.push(MK_TOKEN!(TokenKind::String, content, span));
    lexer.advance_n(matched.len());
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) {
    lexer.fail(ErrorImpl::UnterminatedString);
}

fn char_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    let content = matched[1..matched.len() - 1].to_string();

    lexer.push(MK_TOKEN!(TokenKind::Char, content, span));
    lexer.advance_n(matched.len());
}

fn unterminated_char_handler(lexer: &mut Lexer, _matched: &str) {
    lexer.fail(ErrorImpl::UnterminatedChar);
}

fn incomplete_operator_handler(lexer: &mut Lexer, matched: &str) {
    lexer.fail(ErrorImpl::IncompleteOperator {
        expected: matched.repeat(2),
        found: matched.to_string(),
    });
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() && lex.error.is_none() {
        let remainder = lex.remainder();
        let found = PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.find(remainder).map(|m| (pattern, m.end())));

        match found {
            Some((pattern, end)) => {
                let matched = lex.remainder()[..end].to_string();
                (pattern.handler)(&mut lex, &matched);
            }
            None => {
                let token = lex
                    .remainder()
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                lex.fail(ErrorImpl::UnrecognisedToken { token });
            }
        }
    }

    if let Some(error) = lex.error {
        return Err(error);
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    trace!(file = %lex.file, count = lex.tokens.len(), "tokenized");

    Ok(lex.tokens)
}
