use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayLiteralExpr, BinaryExpr, BinaryOp, BoolExpr, CharExpr, DoubleExpr, IntExpr,
            NegateExpr, PostfixExpr, PostfixOperation, StringExpr, StructLiteralExpr,
            StructLiteralField, SymbolExpr,
        },
        types::GenericName,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    types::{parse_generic_name_part, parse_identifier, symbol_to_part, Identifier},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found_kind: token.kind.to_string(),
                found: token.value.clone(),
            },
            token.span.start.clone(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();

        // `[]` is an array type suffix, not an index
        if token_kind == TokenKind::OpenBracket && parser.peek_kind(1) == TokenKind::CloseBracket
        {
            break;
        }

        let next_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Int => {
            let token = parser.advance().clone();
            match token.value.parse() {
                Ok(value) => Ok(Expr::Int(IntExpr {
                    value,
                    span: token.span,
                })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::Double => {
            let token = parser.advance().clone();
            match token.value.parse() {
                Ok(value) => Ok(Expr::Double(DoubleExpr {
                    value,
                    span: token.span,
                })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance().clone();
            Ok(Expr::Bool(BoolExpr {
                value: token.kind == TokenKind::True,
                span: token.span,
            }))
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(Expr::String(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::Char => {
            let token = parser.advance().clone();
            Ok(Expr::Char(CharExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::Identifier => match parse_identifier(parser)? {
            Identifier::Simple(symbol) => Ok(Expr::Symbol(symbol)),
            Identifier::Generic(part) => {
                let span = part.span.clone();
                Ok(Expr::GenericName(GenericName {
                    parts: vec![part],
                    span,
                }))
            }
        },
        _ => Err(parser.unexpected("expression")),
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Multiply),
        TokenKind::Slash => Some(BinaryOp::Divide),
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Dash => Some(BinaryOp::Subtract),
        TokenKind::Greater => Some(BinaryOp::Greater),
        TokenKind::GreaterEquals => Some(BinaryOp::GreaterEq),
        TokenKind::Less => Some(BinaryOp::Smaller),
        TokenKind::LessEquals => Some(BinaryOp::SmallerEq),
        TokenKind::Equals => Some(BinaryOp::Equal),
        TokenKind::NotEquals => Some(BinaryOp::NotEqual),
        TokenKind::And => Some(BinaryOp::And),
        TokenKind::Or => Some(BinaryOp::Or),
        _ => None,
    }
}

pub fn binary(left: Expr, right: Expr, op: BinaryOp) -> Expr {
    let span = Span {
        start: left.get_span().start.clone(),
        end: right.get_span().end.clone(),
    };

    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        right: Box::new(right),
        op,
        span,
    })
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(op) = binary_op(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("binary operator"),
                found_kind: operator_token.kind.to_string(),
                found: operator_token.value,
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(binary(left, right, op))
}

/// `!x`, and the arithmetic prefixes desugared to binary expressions:
/// `-x` to `x * -1`, `++x` to `x + 1`, `--x` to `x - 1`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    let literal = |value: i64| {
        Expr::Int(IntExpr {
            value,
            span: operator_token.span.clone(),
        })
    };

    match operator_token.kind {
        TokenKind::Not => {
            let span = Span {
                start: operator_token.span.start.clone(),
                end: rhs.get_span().end.clone(),
            };
            Ok(Expr::Negate(NegateExpr {
                value: Box::new(rhs),
                span,
            }))
        }
        TokenKind::Dash => Ok(binary(rhs, literal(-1), BinaryOp::Multiply)),
        TokenKind::PlusPlus => Ok(binary(rhs, literal(1), BinaryOp::Add)),
        TokenKind::MinusMinus => Ok(binary(rhs, literal(1), BinaryOp::Subtract)),
        _ => Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found_kind: operator_token.kind.to_string(),
                found: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect_separator(TokenKind::CloseParen)?;
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(postfix(parser, left, PostfixOperation::Call(args)))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(postfix(parser, left, PostfixOperation::Index(Box::new(index))))
}

/// A `.` after a name extends the name (`a.b.c` is one generic name); after
/// a call or index it is a member access.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    match left {
        Expr::Symbol(symbol) => {
            let first = symbol_to_part(parser, symbol);
            let part = parse_generic_name_part(parser)?;
            let span = parser.span_from(first.span.start.clone());

            Ok(Expr::GenericName(GenericName {
                parts: vec![first, part],
                span,
            }))
        }
        Expr::GenericName(mut name) => {
            name.parts.push(parse_generic_name_part(parser)?);
            name.span = parser.span_from(name.span.start.clone());

            Ok(Expr::GenericName(name))
        }
        left => {
            let member = parser.expect(TokenKind::Identifier)?.value;
            Ok(postfix(parser, left, PostfixOperation::Member(member)))
        }
    }
}

fn postfix(parser: &Parser, left: Expr, operation: PostfixOperation) -> Expr {
    let span = parser.span_from(left.get_span().start.clone());

    Expr::Postfix(PostfixExpr {
        left: Box::new(left),
        operation,
        span,
    })
}

/// `mut? { .name = value, .shorthand, }`
pub fn parse_struct_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();
    let is_mutable = parser.consume(TokenKind::Mut);

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        parser.expect(TokenKind::Dot)?;
        let name_token = parser.expect(TokenKind::Identifier)?;

        let value = match parser.current_token_kind() {
            TokenKind::Comma | TokenKind::CloseCurly => Expr::Symbol(SymbolExpr {
                value: name_token.value.clone(),
                span: name_token.span.clone(),
            }),
            _ => {
                parser.expect(TokenKind::Assignment)?;
                parse_expr(parser, BindingPower::Default)?
            }
        };

        parser.expect_separator(TokenKind::CloseCurly)?;

        fields.push(StructLiteralField {
            name: name_token.value,
            value,
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::StructLiteral(StructLiteralExpr {
        is_mutable,
        fields,
        span: parser.span_from(start),
    }))
}

pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenBracket)?;

    let mut values = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        values.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect_separator(TokenKind::CloseBracket)?;
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::ArrayLiteral(ArrayLiteralExpr {
        values,
        span: parser.span_from(start),
    }))
}
