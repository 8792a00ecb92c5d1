use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{BinaryOp, PostfixOperation},
        statements::{
            AssignmentStmt, BreakStmt, ContinueStmt, ExpressionStmt, IfArm, IfStmt, LoopStmt,
            ReturnStmt, VarDeclStmt, WhenArm, WhenBody, WhenStmt,
        },
        types::GenericName,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{
    expr::binary,
    parser::Parser,
    types::{parse_array_suffix, parse_generic_name, symbol_to_generic_name},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    // `Type name = ...;` and `Type[] name = ...;` start out as expressions
    let declares = match (parser.peek_kind(0), parser.peek_kind(1), parser.peek_kind(2)) {
        (TokenKind::Identifier, _, _) => true,
        (TokenKind::OpenBracket, TokenKind::CloseBracket, TokenKind::Identifier) => true,
        _ => false,
    };

    match expr {
        Expr::Symbol(symbol) if declares => {
            let var_type = symbol_to_generic_name(parser, symbol);
            finish_var_decl(parser, false, var_type, start)
        }
        Expr::GenericName(var_type) if declares => finish_var_decl(parser, false, var_type, start),
        expr => finish_expression_or_assignment(parser, expr, start),
    }
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(body)
}

pub fn parse_mut_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let var_type = parse_generic_name(parser)?;

    finish_var_decl(parser, true, var_type, start)
}

fn finish_var_decl(
    parser: &mut Parser,
    is_mutable: bool,
    var_type: GenericName,
    start: Position,
) -> Result<Stmt, Error> {
    let is_array = parse_array_suffix(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::Assignment)?;
    let initializer = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        is_mutable,
        var_type,
        is_array,
        name,
        initializer,
        span: parser.span_from(start),
    }))
}

fn is_assignable(expr: &Expr) -> bool {
    match expr {
        Expr::Symbol(_) | Expr::GenericName(_) => true,
        Expr::Postfix(postfix) => matches!(
            postfix.operation,
            PostfixOperation::Index(_) | PostfixOperation::Member(_)
        ),
        _ => false,
    }
}

fn finish_expression_or_assignment(
    parser: &mut Parser,
    expr: Expr,
    start: Position,
) -> Result<Stmt, Error> {
    let op = match parser.current_token_kind() {
        TokenKind::Assignment => None,
        TokenKind::PlusEquals => Some(BinaryOp::Add),
        TokenKind::MinusEquals => Some(BinaryOp::Subtract),
        TokenKind::StarEquals => Some(BinaryOp::Multiply),
        TokenKind::SlashEquals => Some(BinaryOp::Divide),
        _ => {
            parser.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Expression(ExpressionStmt {
                expression: expr,
                span: parser.span_from(start),
            }));
        }
    };

    if !is_assignable(&expr) {
        return Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                target: format!("{:?}", expr.get_expr_type()),
            },
            expr.get_span().start.clone(),
        ));
    }

    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let value = match op {
        Some(op) => binary(expr.clone(), rhs, op),
        None => rhs,
    };

    Ok(Stmt::Assignment(AssignmentStmt {
        target: expr,
        value,
        span: parser.span_from(start),
    }))
}

/// `loop (condition) { body }`
pub fn parse_loop_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::Loop(LoopStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

fn parse_if_arm(parser: &mut Parser) -> Result<IfArm, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(IfArm { condition, body })
}

/// `if (c) { } (else if (c) { })* (else { })?`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let if_arm = parse_if_arm(parser)?;

    let mut else_ifs = vec![];
    let mut else_body = vec![];

    while parser.consume(TokenKind::Else) {
        if parser.consume(TokenKind::If) {
            else_ifs.push(parse_if_arm(parser)?);
        } else {
            else_body = parse_block(parser)?;
            break;
        }
    }

    Ok(Stmt::If(IfStmt {
        if_arm,
        else_ifs,
        else_body,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

fn parse_when_body(parser: &mut Parser) -> Result<WhenBody, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        Ok(WhenBody::Block(parse_block(parser)?))
    } else {
        Ok(WhenBody::Expr(parse_expr(parser, BindingPower::Default)?))
    }
}

/// `when (subject) { pattern :: body, ..., else :: body }`
/// The `else` arm closes the arm list.
pub fn parse_when_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let subject = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut arms = vec![];
    let mut else_arm = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.consume(TokenKind::Else) {
            parser.expect(TokenKind::ColonColon)?;
            else_arm = Some(parse_when_body(parser)?);
            parser.expect_separator(TokenKind::CloseCurly)?;
            break;
        }

        let condition = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::ColonColon)?;
        let body = parse_when_body(parser)?;
        parser.expect_separator(TokenKind::CloseCurly)?;

        arms.push(WhenArm { condition, body });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::When(WhenStmt {
        subject,
        arms,
        else_arm,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Break(BreakStmt {
        span: parser.span_from(start),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Continue(ContinueStmt {
        span: parser.span_from(start),
    }))
}
