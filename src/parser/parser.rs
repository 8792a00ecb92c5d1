//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the file-level entry
//! points. Expressions are parsed Pratt style through NUD/LED handlers;
//! statements and declarations are dispatched on their first token.
//!
//! It maintains lookup tables for:
//! - Declaration handlers
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{ast::TexelFile, types::NameId},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    decl::{parse_decl, parse_export_decl, parse_import_decl},
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Tokens to parse, comments removed. Always ends with `EOF`.
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    decl_lookup: DeclLookup,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    /// Next [`NameId`] to hand out
    current_id: u32,
}

impl Parser {
    /// Creates a parser over `tokens`. Comment tokens are dropped and a
    /// trailing `EOF` is guaranteed.
    pub fn new(tokens: Vec<Token>, first_id: u32) -> Self {
        let file = tokens
            .first()
            .map(|token| Rc::clone(&token.span.start.file))
            .unwrap_or_else(|| Rc::new(String::from("shell")));

        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::new(0, 1, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: first_id,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `offset` places ahead, `EOF` past the end.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    /// Never moves past the final `EOF`.
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Consumes the current token if it is of `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(&expected_kind.to_string())),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Accepts a `,` separator, or leaves a `closing` token in place.
    pub fn expect_separator(&mut self, closing: TokenKind) -> Result<(), Error> {
        match self.current_token_kind() {
            TokenKind::Comma => {
                self.advance();
                Ok(())
            }
            kind if kind == closing => Ok(()),
            _ => Err(self.unexpected(&format!("{} or {}", TokenKind::Comma, closing))),
        }
    }

    /// UnexpectedToken error located at the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found_kind: token.kind.to_string(),
                found: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// The full token slice and the index of the current token, for lookahead.
    pub fn lookahead(&self) -> (&[Token], usize) {
        (&self.tokens, self.pos)
    }

    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a top-level declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NameId {
        let id = self.current_id;
        self.current_id += 1;
        NameId(id)
    }

    /// Start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = self.tokens[self.pos.saturating_sub(1)].span.end.clone();
        Span { start, end }
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a stream of tokens into a [`TexelFile`].
///
/// Imports, the export block and declarations may appear in any order; only
/// one export block is allowed.
pub fn parse(tokens: Vec<Token>) -> Result<TexelFile, Error> {
    parse_with_ids(tokens, 0).map(|(file, _)| file)
}

/// Like [`parse`], numbering generic-name parts from `first_id`. Returns the
/// file and the next unused id so several files can share one id space.
pub fn parse_with_ids(tokens: Vec<Token>, first_id: u32) -> Result<(TexelFile, u32), Error> {
    let mut parser = Parser::new(tokens, first_id);
    create_token_lookups(&mut parser);

    let mut imports = vec![];
    let mut declarations = vec![];
    let mut exports = None;

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Import => imports.push(parse_import_decl(&mut parser)?),
            TokenKind::Export => {
                if exports.is_some() {
                    return Err(Error::new(ErrorImpl::DuplicateExport, parser.get_position()));
                }
                exports = Some(parse_export_decl(&mut parser)?);
            }
            _ => declarations.push(parse_decl(&mut parser)?),
        }
    }

    trace!(
        file = %parser.file,
        imports = imports.len(),
        declarations = declarations.len(),
        "parsed file"
    );

    let file = TexelFile {
        file: parser.get_file(),
        imports,
        declarations,
        exports: exports.unwrap_or_default(),
    };

    Ok((file, parser.current_id))
}
