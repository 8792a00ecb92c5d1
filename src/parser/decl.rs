use crate::{
    ast::{
        ast::Decl,
        declarations::{
            AliasDecl, EnumDecl, ExportDecl, FnDecl, FunctionParameter, ImportDecl,
            InterfaceDecl, InterfaceMethod, ReturnType, StructDecl, StructField,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    parser::Parser,
    stmt::parse_block,
    types::{parse_array_suffix, parse_generic_declaration, parse_generic_name},
};

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    match parser
        .get_decl_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        Some(decl_fn) => decl_fn(parser),
        None => Err(parser.unexpected("declaration")),
    }
}

/// `a.b.c` or `a.b.*`; the wildcard ends the path.
fn parse_module_path(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut names = vec![];

    loop {
        if parser.consume(TokenKind::Star) {
            names.push(String::from("*"));
            break;
        }

        names.push(parser.expect(TokenKind::Identifier)?.value);

        if !parser.consume(TokenKind::Dot) {
            break;
        }
    }

    Ok(names)
}

pub fn parse_import_decl(parser: &mut Parser) -> Result<ImportDecl, Error> {
    let start = parser.advance().span.start.clone();

    let names = parse_module_path(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(ImportDecl {
        names,
        span: parser.span_from(start),
    })
}

/// `export { a.b, c.*, }`
pub fn parse_export_decl(parser: &mut Parser) -> Result<Vec<ExportDecl>, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenCurly)?;

    let mut exports = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let start = parser.get_position();
        let names = parse_module_path(parser)?;

        exports.push(ExportDecl {
            names,
            span: parser.span_from(start),
        });

        parser.expect_separator(TokenKind::CloseCurly)?;
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(exports)
}

pub fn parse_struct_decl(parser: &mut Parser) -> Result<Decl, Error> {
    Ok(Decl::Struct(parse_struct(parser)?))
}

fn parse_struct(parser: &mut Parser) -> Result<StructDecl, Error> {
    let start = parser.get_position();
    let is_closed = parser.consume(TokenKind::Closed);
    parser.expect(TokenKind::Struct)?;

    let name = parser.expect(TokenKind::Identifier)?.value;
    let generics = parse_generic_declaration(parser)?;

    let mut extends = vec![];
    if parser.consume(TokenKind::Colon) {
        while parser.current_token_kind() != TokenKind::OpenCurly {
            extends.push(parse_generic_name(parser)?);
            parser.expect_separator(TokenKind::OpenCurly)?;
        }
    }

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    let mut inner_structs = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::Struct | TokenKind::Closed => inner_structs.push(parse_struct(parser)?),
            _ => fields.push(parse_struct_field(parser)?),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(StructDecl {
        is_closed,
        name,
        generics,
        extends,
        fields,
        inner_structs,
        span: parser.span_from(start),
    })
}

/// `mut? Type []? name (= initializer)? ;`
fn parse_struct_field(parser: &mut Parser) -> Result<StructField, Error> {
    let start = parser.get_position();
    let is_mutable = parser.consume(TokenKind::Mut);

    let field_type = parse_generic_name(parser)?;
    let is_array = parse_array_suffix(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    let initializer = if parser.consume(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(StructField {
        is_mutable,
        field_type,
        is_array,
        name,
        initializer,
        span: parser.span_from(start),
    })
}

/// `( Type []? name, ... )`
fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<FunctionParameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let start = parser.get_position();
        let param_type = parse_generic_name(parser)?;
        let is_array = parse_array_suffix(parser)?;
        let name = parser.expect(TokenKind::Identifier)?.value;

        parser.expect_separator(TokenKind::CloseParen)?;

        parameters.push(FunctionParameter {
            param_type,
            is_array,
            name,
            span: parser.span_from(start),
        });
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(parameters)
}

/// `: Type []?`
fn parse_return_type(parser: &mut Parser) -> Result<ReturnType, Error> {
    parser.expect(TokenKind::Colon)?;

    let name = parse_generic_name(parser)?;
    let is_array = parse_array_suffix(parser)?;

    Ok(ReturnType { name, is_array })
}

pub fn parse_fn_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.get_position();
    let is_mutable = parser.consume(TokenKind::Mut);
    parser.expect(TokenKind::Fn)?;

    let generics = parse_generic_declaration(parser)?;
    let name = parse_generic_name(parser)?;
    let parameters = parse_function_parameters(parser)?;
    let return_type = parse_return_type(parser)?;
    let body = parse_block(parser)?;

    Ok(Decl::Function(FnDecl {
        is_mutable,
        generics,
        name,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_interface_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;
    let generics = parse_generic_declaration(parser)?;

    parser.expect(TokenKind::OpenCurly)?;

    let mut methods = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let method_start = parser.get_position();
        let is_mutable = parser.consume(TokenKind::Mut);
        parser.expect(TokenKind::Fn)?;

        let method_name = parser.expect(TokenKind::Identifier)?.value;
        let parameters = parse_function_parameters(parser)?;
        let return_type = parse_return_type(parser)?;

        parser.expect(TokenKind::Semicolon)?;

        methods.push(InterfaceMethod {
            is_mutable,
            name: method_name,
            parameters,
            return_type,
            span: parser.span_from(method_start),
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Decl::Interface(InterfaceDecl {
        name,
        generics,
        methods,
        span: parser.span_from(start),
    }))
}

/// `alias Name = Type;`
pub fn parse_alias_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let aliased = parse_generic_name(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Decl::Alias(AliasDecl {
        name,
        aliased,
        span: parser.span_from(start),
    }))
}

/// `enum Name { A, B, }`
pub fn parse_enum_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::OpenCurly)?;

    let mut values = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        values.push(parser.expect(TokenKind::Identifier)?.value);
        parser.expect_separator(TokenKind::CloseCurly)?;
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Decl::Enum(EnumDecl {
        name,
        values,
        span: parser.span_from(start),
    }))
}
