//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Literals and their widths
//! - Function, struct, enum and type declarations
//! - Control flow statements
//! - Panic-mode recovery

use test_log::test;

use super::{
    options::ParseOptions,
    parser::{parse_expression, parse_file, parse_file_with},
};
use crate::{
    ast::{
        ast::{AstBlockDeclaration, AstFile},
        declarations::{AstAttributeType, AstFunctionDeclaration},
        expressions::{AstExprDeclaration, AstExprKind, AstLiteral, AstOperatorType, Fixity},
        statements::{AstForKind, AstStatementKind},
        types::AstTypeKind,
    },
    errors::errors::{Diagnostics, ErrorImpl, ErrorKind, Severity},
    lexer::lexer::tokenize,
    FileId,
};

fn parse(source: &str) -> (AstFile, Diagnostics) {
    parse_file(tokenize(source, FileId(0)), "test.one")
}

fn parse_ok(source: &str) -> AstFile {
    let (file, diagnostics) = parse(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
    file
}

fn expr(source: &str) -> AstExprDeclaration {
    let (expr, diagnostics) = parse_expression(tokenize(source, FileId(0)));
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
    expr.expect("expression should parse")
}

fn only_function(file: &AstFile) -> &AstFunctionDeclaration {
    let functions: Vec<_> = file.functions().collect();
    assert_eq!(functions.len(), 1);
    functions[0]
}

fn diagnostic_kinds(diagnostics: &Diagnostics) -> Vec<ErrorKind> {
    diagnostics.iter().map(|error| error.kind()).collect()
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let root = expr("1 + 2 * 3");

    assert_eq!(root.operator(), Some(AstOperatorType::Plus));
    let left = root.left().unwrap();
    assert_eq!(left.as_literal(), Some(&AstLiteral::I32(1)));
    let right = root.right().unwrap();
    assert_eq!(right.operator(), Some(AstOperatorType::Star));
    assert_eq!(right.left().unwrap().as_literal(), Some(&AstLiteral::I32(2)));
    assert_eq!(right.right().unwrap().as_literal(), Some(&AstLiteral::I32(3)));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let root = expr("-a * b");

    assert_eq!(root.operator(), Some(AstOperatorType::Star));
    let left = root.left().unwrap();
    assert_eq!(left.operator(), Some(AstOperatorType::Minus));
    assert!(left.right().is_none());
    assert_eq!(left.left().unwrap().as_identifier(), Some("a"));
}

#[test]
fn test_assignment_is_right_associative() {
    let root = expr("a = b = c");

    assert_eq!(root.operator(), Some(AstOperatorType::Equal));
    assert_eq!(root.left().unwrap().as_identifier(), Some("a"));
    let right = root.right().unwrap();
    assert_eq!(right.operator(), Some(AstOperatorType::Equal));
    assert_eq!(right.left().unwrap().as_identifier(), Some("b"));
}

#[test]
fn test_power_is_left_associative() {
    let root = expr("2 ** 3 ** 2");

    assert_eq!(root.operator(), Some(AstOperatorType::StarStar));
    assert_eq!(root.right().unwrap().as_literal(), Some(&AstLiteral::I32(2)));
    assert_eq!(root.left().unwrap().operator(), Some(AstOperatorType::StarStar));
}

#[test]
fn test_logical_and_binds_tighter_than_or() {
    let root = expr("a || b && c");

    assert_eq!(root.operator(), Some(AstOperatorType::Or));
    assert_eq!(root.right().unwrap().operator(), Some(AstOperatorType::And));
}

#[test]
fn test_bitwise_binds_tighter_than_equality() {
    let root = expr("a & b == c");

    assert_eq!(root.operator(), Some(AstOperatorType::EqualEqual));
    assert_eq!(root.left().unwrap().operator(), Some(AstOperatorType::BitAnd));
}

#[test]
fn test_grouping_resets_precedence() {
    let root = expr("(1 + 2) * 3");

    assert_eq!(root.operator(), Some(AstOperatorType::Star));
    let group = root.left().unwrap();
    assert_eq!(group.operator(), Some(AstOperatorType::Plus));
    assert_eq!(group.span.start.offset, 0);
    assert_eq!(group.span.end.offset, 7);
}

#[test]
fn test_call_arguments() {
    let root = expr("print(a, b + 1)");

    match &root.kind {
        AstExprKind::Call { callee, args } => {
            assert_eq!(callee.as_identifier(), Some("print"));
            assert_eq!(args.len(), 2);
            assert_eq!(args[1].operator(), Some(AstOperatorType::Plus));
        }
        other => panic!("expected a call, got {:?}", other),
    }
    assert_eq!(root.operator(), None);
}

#[test]
fn test_member_call() {
    let root = expr("math.sin(x)");

    match &root.kind {
        AstExprKind::Call { callee, args } => {
            assert_eq!(callee.operator(), Some(AstOperatorType::Dot));
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_postfix_and_prefix_increment() {
    let postfix = expr("i++");
    match &postfix.kind {
        AstExprKind::Unary { op, fixity, .. } => {
            assert_eq!(*op, AstOperatorType::PlusPlus);
            assert_eq!(*fixity, Fixity::Postfix);
        }
        other => panic!("expected a unary, got {:?}", other),
    }

    let prefix = expr("--i");
    match &prefix.kind {
        AstExprKind::Unary { op, fixity, .. } => {
            assert_eq!(*op, AstOperatorType::MinusMinus);
            assert_eq!(*fixity, Fixity::Prefix);
        }
        other => panic!("expected a unary, got {:?}", other),
    }
}

#[test]
fn test_range_expression() {
    let root = expr("0..10");

    assert_eq!(root.operator(), Some(AstOperatorType::DotDot));
    assert_eq!(root.left().unwrap().as_literal(), Some(&AstLiteral::I32(0)));
}

#[test]
fn test_number_literal_widths() {
    assert_eq!(expr("1_000").as_literal(), Some(&AstLiteral::I32(1000)));
    assert_eq!(expr("5000000000").as_literal(), Some(&AstLiteral::I64(5_000_000_000)));
    assert_eq!(expr("200u8").as_literal(), Some(&AstLiteral::U8(200)));
    assert_eq!(expr("3.5").as_literal(), Some(&AstLiteral::F64(3.5)));
    assert_eq!(expr("2.5f32").as_literal(), Some(&AstLiteral::F32(2.5)));
    assert_eq!(expr("true").as_literal(), Some(&AstLiteral::Bool(true)));
    assert_eq!(expr("'x'").as_literal(), Some(&AstLiteral::Char('x')));
    assert_eq!(
        expr("\"hi\"").as_literal(),
        Some(&AstLiteral::String("hi".to_string()))
    );
}

#[test]
fn test_number_out_of_range() {
    let (expr, diagnostics) = parse_expression(tokenize("300u8", FileId(0)));

    assert!(expr.is_none());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.as_slice()[0].get_impl(),
        &ErrorImpl::NumberParseError {
            token: "300u8".to_string()
        }
    );
}

#[test]
fn test_trailing_tokens_after_expression() {
    let (expr, diagnostics) = parse_expression(tokenize("1 + 2 )", FileId(0)));

    assert!(expr.is_some());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_parse_function_declaration() {
    let file = parse_ok("pub fn (mut t MyTime) century(x int, y &Map<K, V>) int { return x }");
    let function = only_function(&file);

    assert_eq!(function.name, "century");
    assert!(function.is_public);
    assert!(!function.is_main);
    assert!(function.has_return());
    assert_eq!(function.return_type.as_ref().unwrap().name(), "int");

    let receiver = function.receiver.as_ref().unwrap();
    assert!(receiver.is_mut);
    assert_eq!(receiver.name, "t");
    assert_eq!(receiver.data.name(), "MyTime");

    assert_eq!(function.params.len(), 2);
    let y = &function.params[1];
    assert!(y.data.has_address());
    assert!(y.data.has_generic());
    assert_eq!(y.data.generics, vec!["K".to_string(), "V".to_string()]);

    assert_eq!(function.body.len(), 1);
    match &function.body.statements[0].kind {
        AstStatementKind::Return(ret) => {
            assert_eq!(ret.value.as_ref().unwrap().as_identifier(), Some("x"))
        }
        other => panic!("expected a return, got {:?}", other),
    }
}

#[test]
fn test_function_attributes() {
    let file = parse_ok("[main]\n[deprecated: \"use other\"]\n[noreturn]\nfn run() { }");
    let function = only_function(&file);

    assert!(function.is_main);
    assert!(function.is_deprecated);
    assert!(function.is_noreturn);
    assert_eq!(function.attributes.len(), 3);
    assert_eq!(function.attributes[1].kind, AstAttributeType::Key);
    assert_eq!(function.attributes[1].value.as_deref(), Some("use other"));
    assert_eq!(function.span.start.offset, 0);
}

#[test]
fn test_parse_struct_sections() {
    let source = "struct Point {\n    x int\npub mut:\n    y int = 0\nglobal:\n    z f64\n}";
    let file = parse_ok(source);

    let structure = match &file.blocks[0] {
        AstBlockDeclaration::Struct(structure) => structure,
        other => panic!("expected a struct, got {:?}", other),
    };
    assert_eq!(structure.name, "Point");
    assert_eq!(structure.fields.len(), 3);

    let x = &structure.fields[0];
    assert!(!x.is_public && !x.is_mut && !x.is_global);
    assert!(!x.has_default());

    let y = &structure.fields[1];
    assert!(y.is_public && y.is_mut && !y.is_global);
    assert!(y.has_default());

    assert!(structure.fields[2].is_global);
}

#[test]
fn test_parse_enum() {
    let file = parse_ok("pub enum Color {\n    red\n    green = 2,\n    blue\n}");

    let enumeration = match &file.blocks[0] {
        AstBlockDeclaration::Enum(enumeration) => enumeration,
        other => panic!("expected an enum, got {:?}", other),
    };
    assert!(enumeration.is_public);
    let names: Vec<&str> = enumeration
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, vec!["red", "green", "blue"]);
    assert!(enumeration.fields[1].has_default());
}

#[test]
fn test_parse_type_declarations() {
    let file = parse_ok(
        "type Celsius = f64\ntype World = Mars | Moon | Venus\ntype Filter = fn (string) string",
    );
    assert_eq!(file.blocks.len(), 3);

    let kinds: Vec<&AstTypeKind> = file
        .blocks
        .iter()
        .map(|block| match block {
            AstBlockDeclaration::Type(declaration) => &declaration.kind,
            other => panic!("expected a type, got {:?}", other),
        })
        .collect();

    match kinds[0] {
        AstTypeKind::Alias(data) => assert_eq!(data.name(), "f64"),
        other => panic!("expected an alias, got {:?}", other),
    }
    match kinds[1] {
        AstTypeKind::Sum(items) => assert_eq!(items.len(), 3),
        other => panic!("expected a sum type, got {:?}", other),
    }
    match kinds[2] {
        AstTypeKind::Function(function) => {
            assert_eq!(function.params.len(), 1);
            assert!(function.has_return());
        }
        other => panic!("expected a function type, got {:?}", other),
    }
}

#[test]
fn test_parse_named_function_type() {
    let file = parse_ok("type Handler = fn Callback\nfn main() { }");
    assert_eq!(file.blocks.len(), 2);

    match &file.blocks[0] {
        AstBlockDeclaration::Type(declaration) => match &declaration.kind {
            AstTypeKind::Function(function) => {
                assert!(function.is_named());
                assert_eq!(function.signature.as_ref().unwrap().name(), "Callback");
                assert!(function.params.is_empty());
                assert!(!function.has_return());
            }
            other => panic!("expected a function type, got {:?}", other),
        },
        other => panic!("expected a type, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_chain() {
    let file = parse_ok("fn main() {\n  if a { x() } else if b { y() } else { z() }\n}");
    let function = only_function(&file);

    let chain = match &function.body.statements[0].kind {
        AstStatementKind::If(chain) => chain,
        other => panic!("expected an if, got {:?}", other),
    };
    assert!(chain.has_else());
    assert!(chain.has_else_if());
    assert_eq!(chain.clauses.len(), 2);
    assert_eq!(chain.clauses[0].expr.as_identifier(), Some("a"));
    assert_eq!(chain.clauses[1].expr.as_identifier(), Some("b"));
    assert_eq!(chain.otherwise.as_ref().unwrap().len(), 1);
    assert!(chain.span.contains(&chain.clauses[1].span));
    assert!(chain.span.contains(&chain.otherwise.as_ref().unwrap().span));
}

#[test]
fn test_if_without_else() {
    let file = parse_ok("fn main() { if a { } }");
    let function = only_function(&file);

    match &function.body.statements[0].kind {
        AstStatementKind::If(chain) => {
            assert_eq!(chain.clauses.len(), 1);
            assert!(!chain.has_else());
            assert!(!chain.has_else_if());
        }
        other => panic!("expected an if, got {:?}", other),
    }
}

#[test]
fn test_long_else_if_chain() {
    const CLAUSES: usize = 100_000;

    let mut tokens = tokenize("fn main() { if a { }", FileId(0));
    tokens.pop();
    let clause = tokenize(" else if a { }", FileId(0));
    for _ in 0..CLAUSES {
        tokens.extend(clause[..clause.len() - 1].iter().cloned());
    }
    tokens.extend(tokenize(" }", FileId(0)));

    let (file, diagnostics) = parse_file(tokens, "test.one");

    assert!(diagnostics.is_empty());
    match &only_function(&file).body.statements[0].kind {
        AstStatementKind::If(chain) => assert_eq!(chain.clauses.len(), CLAUSES + 1),
        other => panic!("expected an if, got {:?}", other),
    }
    drop(file);
}

#[test]
fn test_parse_for_variants() {
    let source = "fn main() {\n  for { }\n  for i < 10 { i++ }\n  for item in items { }\n  for i, item in items { }\n}";
    let file = parse_ok(source);
    let function = only_function(&file);

    let kinds: Vec<&AstForKind> = function
        .body
        .iter()
        .map(|statement| match &statement.kind {
            AstStatementKind::For(foreach) => &foreach.kind,
            other => panic!("expected a for, got {:?}", other),
        })
        .collect();

    assert!(matches!(kinds[0], AstForKind::Infinite));
    assert!(matches!(kinds[1], AstForKind::Condition(_)));
    match kinds[2] {
        AstForKind::Each { key, value, .. } => {
            assert_eq!(key, &None);
            assert_eq!(value, "item");
        }
        other => panic!("expected for-in, got {:?}", other),
    }
    match kinds[3] {
        AstForKind::Each { key, value, .. } => {
            assert_eq!(key.as_deref(), Some("i"));
            assert_eq!(value, "item");
        }
        other => panic!("expected for-in, got {:?}", other),
    }
}

#[test]
fn test_parse_match() {
    let source = "fn main() {\n  match x {\n    1, 2 { a() }\n    3 { }\n    else { b() }\n  }\n}";
    let file = parse_ok(source);
    let function = only_function(&file);

    match &function.body.statements[0].kind {
        AstStatementKind::Match(matching) => {
            assert_eq!(matching.arms.len(), 2);
            assert_eq!(matching.arms[0].patterns.len(), 2);
            assert!(matching.otherwise.is_some());
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_statements() {
    let source = "fn main() {\n  x := 1\n  mut y := 2;\n  const z f64 = 3.0\n  y += x\n  print(y)\n}";
    let file = parse_ok(source);
    let statements = &only_function(&file).body.statements;
    assert_eq!(statements.len(), 5);

    match &statements[0].kind {
        AstStatementKind::Variable(variable) => {
            assert_eq!(variable.name, "x");
            assert!(!variable.is_mut);
        }
        other => panic!("expected a variable, got {:?}", other),
    }
    match &statements[1].kind {
        AstStatementKind::Variable(variable) => assert!(variable.is_mut),
        other => panic!("expected a variable, got {:?}", other),
    }
    match &statements[2].kind {
        AstStatementKind::AssignConst(constant) => {
            assert_eq!(constant.name, "z");
            assert_eq!(constant.data.as_ref().unwrap().name(), "f64");
        }
        other => panic!("expected a constant, got {:?}", other),
    }
    match &statements[3].kind {
        AstStatementKind::Assign(assign) => {
            assert_eq!(assign.op, AstOperatorType::EqualPlus);
            assert_eq!(assign.target.as_identifier(), Some("y"));
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
    assert!(matches!(statements[4].kind, AstStatementKind::Expression(_)));
}

#[test]
fn test_declare_requires_a_name() {
    let (_, diagnostics) = parse("fn main() {\n  a.b := 1\n}");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostic_kinds(&diagnostics), vec![ErrorKind::Syntax]);
}

#[test]
fn test_import_forms() {
    let file = parse_ok("import math\nimport math { sin, cos as c }\nimport parent.child as pc");
    assert_eq!(file.imports.len(), 3);

    assert!(file.imports[0].symbols.is_empty());
    assert!(!file.imports[0].has_alias());

    let symbols = &file.imports[1].symbols;
    assert_eq!(symbols.len(), 1);
    let names: Vec<&str> = symbols[0].names.iter().map(|name| name.name.as_str()).collect();
    assert_eq!(names, vec!["sin", "cos"]);
    assert_eq!(symbols[0].alias.as_deref(), Some("c"));

    assert_eq!(file.imports[2].path(), "parent.child");
    assert_eq!(file.imports[2].alias.as_deref(), Some("pc"));
}

#[test]
fn test_import_symbols_with_alias() {
    let (file, diagnostics) = parse("import math { sin } as m");

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.as_slice()[0].get_impl(),
        ErrorImpl::ImportAliasWithSymbols { .. }
    ));
    assert_eq!(file.imports[0].symbols.len(), 1);
    assert!(!file.imports[0].has_alias());
}

#[test]
fn test_empty_import_symbols_warns() {
    let (file, diagnostics) = parse("import math { }");

    assert_eq!(file.imports.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.as_slice()[0].get_severity(), Severity::Warning);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_misplaced_import() {
    let (file, diagnostics) = parse("fn a() { }\nimport math");

    assert_eq!(file.imports.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.as_slice()[0].get_impl(),
        ErrorImpl::MisplacedDeclaration { .. }
    ));
}

#[test]
fn test_bare_return_stops_at_line_end() {
    let file = parse_ok("fn main() {\n  return\n  x := 1\n}");
    let statements = &only_function(&file).body.statements;

    assert_eq!(statements.len(), 2);
    match &statements[0].kind {
        AstStatementKind::Return(ret) => assert!(ret.value.is_none()),
        other => panic!("expected a return, got {:?}", other),
    }
    assert!(matches!(statements[1].kind, AstStatementKind::Variable(_)));
}

#[test]
fn test_struct_field_recovery_keeps_struct() {
    let (file, diagnostics) = parse("struct S {\n  a int\n  5\n  b int\n}\nfn main() { }");

    assert_eq!(diagnostic_kinds(&diagnostics), vec![ErrorKind::Syntax]);
    assert_eq!(file.blocks.len(), 2);
    match &file.blocks[0] {
        AstBlockDeclaration::Struct(structure) => {
            let names: Vec<&str> = structure
                .fields
                .iter()
                .map(|field| field.name.as_str())
                .collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        other => panic!("expected a struct, got {:?}", other),
    }
}

#[test]
fn test_struct_field_recovery_at_comma() {
    let (file, diagnostics) = parse("struct S { a int = ), b int }");

    assert_eq!(diagnostics.len(), 1);
    match &file.blocks[0] {
        AstBlockDeclaration::Struct(structure) => assert_eq!(structure.fields.len(), 1),
        other => panic!("expected a struct, got {:?}", other),
    }
}

#[test]
fn test_enum_field_recovery_keeps_enum() {
    let (file, diagnostics) = parse("enum Color {\n  red\n  5\n  green\n}");

    assert_eq!(diagnostics.len(), 1);
    match &file.blocks[0] {
        AstBlockDeclaration::Enum(enumeration) => {
            let names: Vec<&str> = enumeration
                .fields
                .iter()
                .map(|field| field.name.as_str())
                .collect();
            assert_eq!(names, vec!["red", "green"]);
        }
        other => panic!("expected an enum, got {:?}", other),
    }
}

#[test]
fn test_block_recovery_keeps_later_statements() {
    let (file, diagnostics) = parse("fn main() {\n  x := )\n  mut y := 2\n}");

    assert_eq!(diagnostics.len(), 1);
    let function = only_function(&file);
    assert_eq!(function.body.len(), 1);
    assert!(matches!(
        function.body.statements[0].kind,
        AstStatementKind::Variable(_)
    ));
}

#[test]
fn test_recovery_at_semicolon() {
    let (file, diagnostics) = parse("fn main() { x := *; y := 2 }");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(only_function(&file).body.len(), 1);
}

#[test]
fn test_declaration_keyword_closes_block() {
    let (file, diagnostics) = parse("fn a() {\n  x := 1\nfn b() { }");

    assert_eq!(diagnostic_kinds(&diagnostics), vec![ErrorKind::Structural]);
    assert_eq!(file.functions().count(), 2);
}

#[test]
fn test_unclosed_bodies_at_end_of_input() {
    let (file, diagnostics) = parse("fn a() {\n  if x {\n    y()\n");

    assert_eq!(
        diagnostic_kinds(&diagnostics),
        vec![ErrorKind::Structural, ErrorKind::Structural]
    );
    assert_eq!(only_function(&file).body.len(), 1);
}

#[test]
fn test_lexical_error_reported_once() {
    let (file, diagnostics) = parse("fn a() { x := @ }\nfn b() { }");

    assert_eq!(diagnostic_kinds(&diagnostics), vec![ErrorKind::Lexical]);
    let names: Vec<&str> = file.functions().map(|function| function.name.as_str()).collect();
    assert_eq!(names, vec!["b"]);
}

#[test]
fn test_end_of_input_while_recovering_is_fatal() {
    let (_, diagnostics) = parse("fn a() {\n  x := 1 +");

    assert_eq!(
        diagnostic_kinds(&diagnostics),
        vec![ErrorKind::Syntax, ErrorKind::Fatal]
    );
}

#[test]
fn test_unknown_top_level_token() {
    let (file, diagnostics) = parse(") fn main() { }");

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.as_slice()[0].get_impl(),
        ErrorImpl::UnknownTopLevel { .. }
    ));
    assert_eq!(diagnostics.as_slice()[0].get_span().start.offset, 0);
    assert_eq!(file.functions().count(), 1);
}

#[test]
fn test_max_diagnostics_halts() {
    let options = ParseOptions::default().with_max_diagnostics(2);
    let tokens = tokenize(") fn a() { }\n) fn b() { }\n) fn c() { }", FileId(0));
    let (file, diagnostics) = parse_file_with(tokens, "test.one", options);

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(file.functions().count(), 1);
}

#[test]
fn test_nested_parentheses_limit() {
    let source = format!("x := {}1{}", "(".repeat(500), ")".repeat(500));
    let options = ParseOptions::default().with_max_depth(32);
    let (_, diagnostics) = parse_file_with(tokenize(&source, FileId(0)), "test.one", options);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.as_slice()[0].get_impl(),
        ErrorImpl::NestingTooDeep { limit: 32 }
    ));
}

#[test]
fn test_nested_blocks_limit() {
    let source = format!(
        "fn main() {{\n{}{}}}\nfn after() {{ }}",
        "if x {\n".repeat(200),
        "}\n".repeat(200)
    );
    let options = ParseOptions::default().with_max_depth(32);
    let (file, diagnostics) = parse_file_with(tokenize(&source, FileId(0)), "test.one", options);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.as_slice()[0].get_impl(),
        ErrorImpl::NestingTooDeep { .. }
    ));
    assert_eq!(file.functions().count(), 2);
}

#[test]
fn test_path_base() {
    let (file, _) = parse_file(tokenize("", FileId(0)), "src/app/main.one");

    assert_eq!(file.path, "src/app/main.one");
    assert_eq!(file.path_base, "main.one");
    assert!(file.blocks.is_empty());
}
