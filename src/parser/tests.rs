//! Unit tests for the parser module.

use crate::{
    ast::{
        ast::{Decl, Expr, Stmt, TexelFile},
        declarations::FnDecl,
        expressions::{BinaryOp, PostfixOperation},
        statements::WhenBody,
        types::GenericName,
    },
    errors::errors::{ErrorImpl, ErrorStage},
    lexer::{lexer::tokenize, tokens::RESERVED_LOOKUP},
};
use proptest::prelude::*;

use super::{generics::can_parse_generic_part, parser::parse};

fn parse_source(source: &str) -> TexelFile {
    let tokens = tokenize(source.to_string(), Some("test.tx".to_string())).unwrap();
    parse(tokens).unwrap()
}

fn parse_err(source: &str) -> crate::errors::errors::Error {
    let tokens = tokenize(source.to_string(), Some("test.tx".to_string())).unwrap();
    parse(tokens).unwrap_err()
}

fn only_fn(file: &TexelFile) -> &FnDecl {
    match &file.declarations[0] {
        Decl::Function(func) => func,
        other => panic!("expected function, found {:?}", other.get_decl_type()),
    }
}

/// Body statements of `fn main(): void { <body> }`.
fn body_of(body: &str) -> Vec<Stmt> {
    let file = parse_source(&format!("fn main(): void {{ {} }}", body));
    only_fn(&file).body.clone()
}

fn expr_of(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Expression(stmt) => &stmt.expression,
        Stmt::Return(ret) => ret.value.as_ref().unwrap(),
        other => panic!("expected expression statement, found {:?}", other.get_stmt_type()),
    }
}

#[test]
fn test_parse_function_declaration() {
    let file = parse_source("fn add(int a, int b): int { return a + b; }");
    let func = only_fn(&file);

    assert_eq!(func.name.to_path(), vec!["add"]);
    assert_eq!(func.parameters.len(), 2);
    assert_eq!(func.parameters[0].name, "a");
    assert_eq!(func.parameters[1].param_type.to_path(), vec!["int"]);
    assert_eq!(func.return_type.name.to_path(), vec!["int"]);
    assert!(!func.return_type.is_array);

    match expr_of(&func.body[0]) {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, BinaryOp::Add);
            assert!(matches!(*binary.left, Expr::Symbol(ref s) if s.value == "a"));
            assert!(matches!(*binary.right, Expr::Symbol(ref s) if s.value == "b"));
        }
        other => panic!("expected binary, found {:?}", other.get_expr_type()),
    }
}

#[test]
fn test_less_than_is_comparison() {
    let body = body_of("a < b;");

    match expr_of(&body[0]) {
        Expr::Binary(binary) => assert_eq!(binary.op, BinaryOp::Smaller),
        other => panic!("expected binary, found {:?}", other.get_expr_type()),
    }
}

#[test]
fn test_generic_parameter_type() {
    let file = parse_source("fn f(Map<string, int> m): void { }");
    let func = only_fn(&file);

    let param_type = &func.parameters[0].param_type;
    assert_eq!(param_type.parts.len(), 1);
    assert_eq!(param_type.parts[0].name, "Map");
    assert_eq!(param_type.parts[0].generics.len(), 2);
    assert_eq!(param_type.parts[0].generics[0].to_path(), vec!["string"]);
    assert_eq!(param_type.parts[0].generics[1].to_path(), vec!["int"]);
    assert_eq!(param_type.to_string(), "Map<string, int>");
}

#[test]
fn test_nested_and_dotted_generics() {
    let file = parse_source("struct S { Box<geo.Point, List<int>> b; }");
    let Decl::Struct(decl) = &file.declarations[0] else {
        panic!("expected struct");
    };

    let field_type = &decl.fields[0].field_type;
    assert_eq!(field_type.to_string(), "Box<geo.Point, List<int>>");

    let generics = &field_type.parts[0].generics;
    assert_eq!(generics.len(), 2);
    assert_eq!(generics[0].to_path(), vec!["geo", "Point"]);
    assert_eq!(generics[1].parts[0].generics[0].to_path(), vec!["int"]);
}

#[test]
fn test_disambiguator() {
    let tokens = tokenize("Map<string, List<int>> x".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), Some(9));
    assert_eq!(can_parse_generic_part(&tokens, 0), None);

    let tokens = tokenize("a < b;".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), None);

    let tokens = tokenize("a < 1 > b".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), None);

    let tokens = tokenize("a<geo.Point,>".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), Some(7));

    let tokens = tokenize("a<b.>".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), None);

    let tokens = tokenize("a<List<b>".to_string(), None).unwrap();
    assert_eq!(can_parse_generic_part(&tokens, 1), None);
}

#[test]
fn test_generic_call_and_comparison_mix() {
    let body = body_of("make<int>(1); x = a < b && c > d;");

    match expr_of(&body[0]) {
        Expr::Postfix(postfix) => {
            assert!(matches!(postfix.operation, PostfixOperation::Call(ref args) if args.len() == 1));
            match postfix.left.as_ref() {
                Expr::GenericName(name) => {
                    assert_eq!(name.parts[0].name, "make");
                    assert_eq!(name.parts[0].generics.len(), 1);
                }
                other => panic!("expected generic name, found {:?}", other.get_expr_type()),
            }
        }
        other => panic!("expected call, found {:?}", other.get_expr_type()),
    }

    let Stmt::Assignment(assignment) = &body[1] else {
        panic!("expected assignment");
    };
    match &assignment.value {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, BinaryOp::And);
            assert!(matches!(*binary.left, Expr::Binary(ref l) if l.op == BinaryOp::Smaller));
            assert!(matches!(*binary.right, Expr::Binary(ref r) if r.op == BinaryOp::Greater));
        }
        other => panic!("expected binary, found {:?}", other.get_expr_type()),
    }
}

#[test]
fn test_precedence_and_associativity() {
    let body = body_of("return 1 + 2 * 3 - 4;");

    // (1 + (2 * 3)) - 4
    let Expr::Binary(outer) = expr_of(&body[0]) else {
        panic!("expected binary");
    };
    assert_eq!(outer.op, BinaryOp::Subtract);
    assert!(matches!(*outer.right, Expr::Int(ref i) if i.value == 4));

    let Expr::Binary(inner) = outer.left.as_ref() else {
        panic!("expected binary");
    };
    assert_eq!(inner.op, BinaryOp::Add);
    assert!(matches!(*inner.right, Expr::Binary(ref m) if m.op == BinaryOp::Multiply));
}

#[test]
fn test_logical_precedence() {
    let body = body_of("return a || b && c == d;");

    let Expr::Binary(or) = expr_of(&body[0]) else {
        panic!("expected binary");
    };
    assert_eq!(or.op, BinaryOp::Or);
    let Expr::Binary(and) = or.right.as_ref() else {
        panic!("expected binary");
    };
    assert_eq!(and.op, BinaryOp::And);
    assert!(matches!(*and.right, Expr::Binary(ref eq) if eq.op == BinaryOp::Equal));
}

#[test]
fn test_prefix_desugaring() {
    let body = body_of("return -x; return ++y; return --z; return !flag;");

    let Expr::Binary(neg) = expr_of(&body[0]) else {
        panic!("expected binary");
    };
    assert_eq!(neg.op, BinaryOp::Multiply);
    assert!(matches!(*neg.right, Expr::Int(ref i) if i.value == -1));

    assert!(matches!(expr_of(&body[1]), Expr::Binary(b) if b.op == BinaryOp::Add));
    assert!(matches!(expr_of(&body[2]), Expr::Binary(b) if b.op == BinaryOp::Subtract));
    assert!(matches!(expr_of(&body[3]), Expr::Negate(_)));
}

#[test]
fn test_grouping() {
    let body = body_of("return (1 + 2) * 3;");

    let Expr::Binary(mul) = expr_of(&body[0]) else {
        panic!("expected binary");
    };
    assert_eq!(mul.op, BinaryOp::Multiply);
    assert!(matches!(*mul.left, Expr::Binary(ref add) if add.op == BinaryOp::Add));
}

#[test]
fn test_unclosed_group_is_error() {
    let error = parse_err("fn main(): void { return (1 + 2; }");

    assert_eq!(error.get_stage(), ErrorStage::Parse);
    assert!(matches!(
        error.get_internal(),
        ErrorImpl::UnexpectedToken { expected, found, .. } if expected == "CloseParen" && found == ";"
    ));
}

#[test]
fn test_literals() {
    let body = body_of("return true; return false; return \"hi\"; return 'c'; return 2.5;");

    assert!(matches!(expr_of(&body[0]), Expr::Bool(b) if b.value));
    assert!(matches!(expr_of(&body[1]), Expr::Bool(b) if !b.value));
    assert!(matches!(expr_of(&body[2]), Expr::String(s) if s.value == "hi"));
    assert!(matches!(expr_of(&body[3]), Expr::Char(c) if c.value == "c"));
    assert!(matches!(expr_of(&body[4]), Expr::Double(d) if d.value == 2.5));
}

#[test]
fn test_call_with_multiple_arguments() {
    let body = body_of("println(a, b + 1, c,);");

    let Expr::Postfix(call) = expr_of(&body[0]) else {
        panic!("expected postfix");
    };
    let PostfixOperation::Call(args) = &call.operation else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 3);
}

#[test]
fn test_dotted_names_fold_and_member_after_call() {
    let body = body_of("a.b.c; get().field; items[0].name;");

    match expr_of(&body[0]) {
        Expr::GenericName(name) => assert_eq!(name.to_path(), vec!["a", "b", "c"]),
        other => panic!("expected generic name, found {:?}", other.get_expr_type()),
    }

    match expr_of(&body[1]) {
        Expr::Postfix(postfix) => {
            assert_eq!(postfix.operation, PostfixOperation::Member("field".to_string()));
            assert!(matches!(postfix.left.as_ref(), Expr::Postfix(_)));
        }
        other => panic!("expected member, found {:?}", other.get_expr_type()),
    }

    match expr_of(&body[2]) {
        Expr::Postfix(postfix) => {
            assert_eq!(postfix.operation, PostfixOperation::Member("name".to_string()));
        }
        other => panic!("expected member, found {:?}", other.get_expr_type()),
    }
}

#[test]
fn test_variable_declarations() {
    let body = body_of("int x = 1; mut double y = 2.0; int[] xs = [1, 2, 3,]; List<int> l = [];");

    let Stmt::VarDecl(x) = &body[0] else {
        panic!("expected var decl");
    };
    assert_eq!(x.name, "x");
    assert!(!x.is_mutable);
    assert!(!x.is_array);
    assert_eq!(x.var_type.to_path(), vec!["int"]);

    let Stmt::VarDecl(y) = &body[1] else {
        panic!("expected var decl");
    };
    assert!(y.is_mutable);
    assert_eq!(y.var_type.to_path(), vec!["double"]);

    let Stmt::VarDecl(xs) = &body[2] else {
        panic!("expected var decl");
    };
    assert!(xs.is_array);
    assert!(matches!(xs.initializer, Expr::ArrayLiteral(ref a) if a.values.len() == 3));

    let Stmt::VarDecl(l) = &body[3] else {
        panic!("expected var decl");
    };
    assert_eq!(l.var_type.to_string(), "List<int>");
}

#[test]
fn test_assignments_desugar() {
    let body = body_of("x = 1; x += 2; x -= 3; x *= 4; x /= 5; this.count = 0; xs[1] = 2;");

    let ops: Vec<Option<BinaryOp>> = body[..5]
        .iter()
        .map(|stmt| match stmt {
            Stmt::Assignment(a) => match &a.value {
                Expr::Binary(b) => Some(b.op),
                _ => None,
            },
            _ => panic!("expected assignment"),
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            None,
            Some(BinaryOp::Add),
            Some(BinaryOp::Subtract),
            Some(BinaryOp::Multiply),
            Some(BinaryOp::Divide),
        ]
    );

    let Stmt::Assignment(member) = &body[5] else {
        panic!("expected assignment");
    };
    assert!(matches!(member.target, Expr::GenericName(ref n) if n.to_path() == vec!["this", "count"]));

    let Stmt::Assignment(index) = &body[6] else {
        panic!("expected assignment");
    };
    assert!(matches!(index.target, Expr::Postfix(_)));
}

#[test]
fn test_invalid_assignment_target() {
    let error = parse_err("fn main(): void { 1 = 2; }");

    assert!(matches!(error.get_internal(), ErrorImpl::InvalidAssignmentTarget { .. }));
}

#[test]
fn test_struct_literal() {
    let body = body_of("Point p = mut { .x = 1, .y, }; Point q = { .x };");

    let Stmt::VarDecl(p) = &body[0] else {
        panic!("expected var decl");
    };
    let Expr::StructLiteral(literal) = &p.initializer else {
        panic!("expected struct literal");
    };
    assert!(literal.is_mutable);
    assert_eq!(literal.fields.len(), 2);
    assert_eq!(literal.fields[1].name, "y");
    assert!(matches!(literal.fields[1].value, Expr::Symbol(ref s) if s.value == "y"));

    let Stmt::VarDecl(q) = &body[1] else {
        panic!("expected var decl");
    };
    assert!(matches!(q.initializer, Expr::StructLiteral(ref l) if !l.is_mutable && l.fields.len() == 1));
}

#[test]
fn test_control_flow() {
    let body = body_of(
        "loop (i < 10) { i += 1; if (i == 5) { break; } else if (i == 6) { continue; } else { i = 0; } }",
    );

    let Stmt::Loop(loop_stmt) = &body[0] else {
        panic!("expected loop");
    };
    assert_eq!(loop_stmt.body.len(), 2);

    let Stmt::If(if_stmt) = &loop_stmt.body[1] else {
        panic!("expected if");
    };
    assert!(matches!(if_stmt.if_arm.body[0], Stmt::Break(_)));
    assert_eq!(if_stmt.else_ifs.len(), 1);
    assert!(matches!(if_stmt.else_ifs[0].body[0], Stmt::Continue(_)));
    assert_eq!(if_stmt.else_body.len(), 1);
}

#[test]
fn test_when_statement() {
    let body = body_of("when (c) { Red :: 1, Green :: { x = 2; }, else :: 3, }");

    let Stmt::When(when) = &body[0] else {
        panic!("expected when");
    };
    assert_eq!(when.arms.len(), 2);
    assert!(matches!(when.arms[0].body, WhenBody::Expr(Expr::Int(_))));
    assert!(matches!(when.arms[1].body, WhenBody::Block(ref b) if b.len() == 1));
    assert!(matches!(when.else_arm, Some(WhenBody::Expr(Expr::Int(_)))));
}

#[test]
fn test_return_without_value() {
    let body = body_of("return;");
    assert!(matches!(body[0], Stmt::Return(ref r) if r.value.is_none()));
}

#[test]
fn test_struct_declaration() {
    let file = parse_source(
        "closed struct Pair<T, U: Comparable> : Base, geo.Shape { T first; mut U[] second = []; struct Inner { int v; } }",
    );

    let Decl::Struct(decl) = &file.declarations[0] else {
        panic!("expected struct");
    };
    assert!(decl.is_closed);
    assert_eq!(decl.name, "Pair");
    assert_eq!(decl.generics.len(), 2);
    assert_eq!(
        decl.generics[1].extends.as_ref().unwrap().to_path(),
        vec!["Comparable"]
    );
    assert_eq!(decl.extends.len(), 2);
    assert_eq!(decl.extends[1].to_path(), vec!["geo", "Shape"]);
    assert_eq!(decl.fields.len(), 2);
    assert!(decl.fields[1].is_mutable);
    assert!(decl.fields[1].is_array);
    assert!(decl.fields[1].initializer.is_some());
    assert_eq!(decl.inner_structs.len(), 1);
    assert_eq!(decl.inner_structs[0].name, "Inner");
}

#[test]
fn test_other_declarations() {
    let file = parse_source(
        "interface Shape<T> { fn area(): double; mut fn scale(double f): void; } alias Num = int; enum Color { Red, Green, } mut fn <T> Point.move(T[] by): Point[] { }",
    );

    let Decl::Interface(interface) = &file.declarations[0] else {
        panic!("expected interface");
    };
    assert_eq!(interface.generics.len(), 1);
    assert_eq!(interface.methods.len(), 2);
    assert!(interface.methods[1].is_mutable);

    let Decl::Alias(alias) = &file.declarations[1] else {
        panic!("expected alias");
    };
    assert_eq!(alias.aliased.to_path(), vec!["int"]);

    let Decl::Enum(enumeration) = &file.declarations[2] else {
        panic!("expected enum");
    };
    assert_eq!(enumeration.values, vec!["Red", "Green"]);

    let Decl::Function(func) = &file.declarations[3] else {
        panic!("expected fn");
    };
    assert!(func.is_mutable);
    assert!(func.is_method());
    assert_eq!(func.generics[0].name, "T");
    assert!(func.parameters[0].is_array);
    assert!(func.return_type.is_array);
}

#[test]
fn test_imports_and_exports() {
    let file = parse_source(
        "import std.io; fn main(): void { } import geo.*; export { main, geo.*, }",
    );

    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.imports[0].names, vec!["std", "io"]);
    assert!(file.imports[1].is_wildcard());
    assert_eq!(file.exports.len(), 2);
    assert!(file.exports[1].is_wildcard());
    assert_eq!(file.declarations.len(), 1);
}

#[test]
fn test_duplicate_export_block() {
    let error = parse_err("export { a } export { b }");
    assert_eq!(error.get_internal(), &ErrorImpl::DuplicateExport);
}

#[test]
fn test_unexpected_top_level_token() {
    let error = parse_err("return 1;");

    assert!(matches!(
        error.get_internal(),
        ErrorImpl::UnexpectedToken { expected, found_kind, .. } if expected == "declaration" && found_kind == "Return"
    ));
}

#[test]
fn test_missing_expression() {
    let error = parse_err("fn main(): void { int x = ; }");
    assert!(matches!(error.get_internal(), ErrorImpl::ExpectedExpression { .. }));
    assert_eq!(error.get_position().line, 1);
}

#[test]
fn test_comments_are_ignored() {
    let file = parse_source("// header\nfn main(): void { // body\n return; }\n// trailer");
    assert_eq!(only_fn(&file).body.len(), 1);
}

fn collect_ids(name: &GenericName, ids: &mut Vec<u32>) {
    for part in &name.parts {
        ids.push(part.id.0);
        for generic in &part.generics {
            collect_ids(generic, ids);
        }
    }
}

#[test]
fn test_name_ids_are_unique() {
    let file = parse_source("fn f(Map<string, int> m, geo.Point p): List<int> { Box<int> b = x; }");
    let func = only_fn(&file);

    let mut ids = vec![];
    collect_ids(&func.name, &mut ids);
    for param in &func.parameters {
        collect_ids(&param.param_type, &mut ids);
    }
    collect_ids(&func.return_type.name, &mut ids);
    if let Stmt::VarDecl(var) = &func.body[0] {
        collect_ids(&var.var_type, &mut ids);
    }

    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(count, 10);
    assert_eq!(ids.len(), count);
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,7}".prop_filter("keywords are reserved", |name| {
        !RESERVED_LOOKUP.contains_key(name.as_str())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_less_between_names_is_comparison(a in identifier(), b in identifier()) {
        let body = body_of(&format!("return {} < {};", a, b));
        let is_smaller = matches!(expr_of(&body[0]), Expr::Binary(binary) if binary.op == BinaryOp::Smaller);
        prop_assert!(is_smaller);
    }

    #[test]
    fn prop_generic_declaration_keeps_arguments(
        outer in identifier(),
        args in prop::collection::vec(identifier(), 1..4),
        name in identifier(),
    ) {
        let body = body_of(&format!("{}<{}> {} = 0;", outer, args.join(", "), name));

        let Stmt::VarDecl(var) = &body[0] else {
            return Err(TestCaseError::fail("expected var decl"));
        };
        prop_assert_eq!(&var.name, &name);
        prop_assert_eq!(var.var_type.parts.len(), 1);
        let paths: Vec<String> = var.var_type.parts[0]
            .generics
            .iter()
            .map(|generic| generic.to_string())
            .collect();
        prop_assert_eq!(paths, args);
    }
}
