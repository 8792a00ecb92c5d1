use crate::{
    ast::{
        expressions::SymbolExpr,
        types::{GenericDeclaration, GenericName, GenericNamePart},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{generics::can_parse_generic_part, parser::Parser};

/// An identifier in expression position: plain, or carrying generic arguments.
pub enum Identifier {
    Simple(SymbolExpr),
    Generic(GenericNamePart),
}

/// Parses one identifier, taking a generic argument list only when the
/// lookahead says the following `<` opens one.
pub fn parse_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    let (tokens, pos) = parser.lookahead();
    if can_parse_generic_part(tokens, pos).is_none() {
        return Ok(Identifier::Simple(SymbolExpr {
            value: token.value,
            span: token.span,
        }));
    }

    let id = parser.advance_id();
    let generics = parse_generic_arguments(parser)?;

    Ok(Identifier::Generic(GenericNamePart {
        id,
        name: token.value,
        generics,
        span: parser.span_from(token.span.start),
    }))
}

pub fn parse_generic_name_part(parser: &mut Parser) -> Result<GenericNamePart, Error> {
    match parse_identifier(parser)? {
        Identifier::Simple(symbol) => Ok(symbol_to_part(parser, symbol)),
        Identifier::Generic(part) => Ok(part),
    }
}

/// `Name (. Name)*`, each segment with optional generic arguments.
pub fn parse_generic_name(parser: &mut Parser) -> Result<GenericName, Error> {
    let start = parser.get_position();
    let mut parts = vec![parse_generic_name_part(parser)?];

    while parser.consume(TokenKind::Dot) {
        parts.push(parse_generic_name_part(parser)?);
    }

    Ok(GenericName {
        parts,
        span: parser.span_from(start),
    })
}

/// Turns a plain symbol into a single generic-name part with no arguments.
pub fn symbol_to_part(parser: &mut Parser, symbol: SymbolExpr) -> GenericNamePart {
    GenericNamePart {
        id: parser.advance_id(),
        name: symbol.value,
        generics: vec![],
        span: symbol.span,
    }
}

pub fn symbol_to_generic_name(parser: &mut Parser, symbol: SymbolExpr) -> GenericName {
    let span = symbol.span.clone();
    GenericName {
        parts: vec![symbol_to_part(parser, symbol)],
        span,
    }
}

fn parse_generic_arguments(parser: &mut Parser) -> Result<Vec<GenericName>, Error> {
    parser.expect(TokenKind::Less)?;

    let mut generics = vec![];
    while parser.current_token_kind() != TokenKind::Greater {
        generics.push(parse_generic_name(parser)?);
        parser.expect_separator(TokenKind::Greater)?;
    }

    parser.expect(TokenKind::Greater)?;
    Ok(generics)
}

/// `<T, U: Bound>`; empty when no `<` follows.
pub fn parse_generic_declaration(parser: &mut Parser) -> Result<Vec<GenericDeclaration>, Error> {
    let mut result = vec![];

    if !parser.consume(TokenKind::Less) {
        return Ok(result);
    }

    while parser.current_token_kind() != TokenKind::Greater {
        let token = parser.expect(TokenKind::Identifier)?;

        let extends = if parser.consume(TokenKind::Colon) {
            Some(parse_generic_name(parser)?)
        } else {
            None
        };

        parser.expect_separator(TokenKind::Greater)?;

        result.push(GenericDeclaration {
            name: token.value,
            extends,
            span: token.span,
        });
    }

    parser.expect(TokenKind::Greater)?;
    Ok(result)
}

/// Optional `[]` array suffix after a type.
pub fn parse_array_suffix(parser: &mut Parser) -> Result<bool, Error> {
    if parser.consume(TokenKind::OpenBracket) {
        parser.expect(TokenKind::CloseBracket)?;
        Ok(true)
    } else {
        Ok(false)
    }
}
