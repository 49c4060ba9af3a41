// Integration tests for the C+ → C++ translator

use std::fs;

use cp2cpp::analysis::scope::KnownTypes;
use cp2cpp::lexer::LexError;
use cp2cpp::translate::{translate_file, translate_source, TranslateError};

fn translated(source: &str) -> String {
    let mut types = KnownTypes::new();
    translate_source(source, &mut types).expect("translation failed")
}

#[test]
fn test_type_definition_gains_terminator() {
    let output = translated("struct S { int x; int y; }\n");
    assert_eq!(output, "struct S { int x; int y; };\n");
}

#[test]
fn test_type_close_before_identifier_is_left_for_the_declarator() {
    // the lookahead cannot tell a next-line declaration from `} name;`,
    // so an identifier after the closer suppresses the insertion
    let output = translated("struct S { int x; }\nVec2 v\n");
    assert_eq!(output, "struct S { int x; }\nVec2 v;\n");
}

#[test]
fn test_plain_object_access_is_preserved() {
    let source = "\
struct Vec2 { int x; int y; };
Vec2 v
v.x = 3
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct Vec2 { int x; int y; };\nVec2 v;\nv.x = 3;\n"
    );
}

#[test]
fn test_single_pointer_access_becomes_arrow() {
    let source = "\
struct Vec2 { int x; };
Vec2* p
p.x = 3
";
    let output = translated(source);
    assert_eq!(output, "struct Vec2 { int x; };\nVec2 * p;\np->x = 3;\n");
}

#[test]
fn test_double_pointer_access_is_wrapped() {
    let source = "\
struct Vec2 { int x; };
Vec2** pp
pp.x = 3
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct Vec2 { int x; };\nVec2 * * pp;\n(* pp)->x = 3;\n"
    );
}

#[test]
fn test_array_of_pointers_subscript_access() {
    let source = "\
struct Vec2 { int dx; };
Vec2* buf[16]
buf[8].dx = 1
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct Vec2 { int dx; };\nVec2 * buf [16];\nbuf [8]->dx = 1;\n"
    );
}

#[test]
fn test_array_of_objects_subscript_access() {
    let source = "\
struct Vec2 { int dx; };
Vec2 buf[16]
buf[8].dx = 1
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct Vec2 { int dx; };\nVec2 buf [16];\nbuf [8].dx = 1;\n"
    );
}

#[test]
fn test_function_body_statements_are_terminated() {
    let source = "\
#include <stdio.h>
int main() {
return 0
}
";
    let output = translated(source);
    assert_eq!(output, "#include <stdio.h>\nint main () {\nreturn 0;\n}\n");
}

#[test]
fn test_one_line_function_gets_inner_semicolon() {
    let output = translated("int f() { return 3 }\n");
    assert_eq!(output, "int f () { return 3; }\n");
}

#[test]
fn test_control_header_lines_stay_open() {
    let source = "\
int main() {
int i
for (i = 0; i < 10; i = i + 1) {
i = i
}
}
";
    let output = translated(source);
    assert_eq!(
        output,
        "int main () {\nint i;\nfor (i = 0; i < 10; i = i + 1) {\ni = i;\n}\n}\n"
    );
}

#[test]
fn test_initializer_list_line_is_terminated() {
    let output = translated("int v[2] = { 1, 2 }\n");
    assert_eq!(output, "int v [2] = { 1, 2 };\n");
}

#[test]
fn test_enum_body_keeps_commas_and_loses_semicolons() {
    let source = "\
enum Color {
RED = 1,
GREEN;
}
";
    let output = translated(source);
    assert_eq!(output, "enum Color {\nRED = 1,\nGREEN\n};\n");
}

#[test]
fn test_enum_with_following_declarator_is_untouched() {
    let output = translated("enum Color { RED, GREEN } tint;\n");
    assert_eq!(output, "enum Color { RED, GREEN } tint;\n");
}

#[test]
fn test_scope_resolution_prefers_inner_declaration() {
    let source = "\
struct V { int x; };
V* g
int main() {
V v
v.x = 1
g.x = 2
}
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct V { int x; };\nV * g;\nint main () {\nV v;\nv.x = 1;\ng->x = 2;\n}\n"
    );
}

#[test]
fn test_parameters_are_pointer_aware() {
    let source = "\
struct V { int x; }
void set(V* p, V q) {
p.x = 1
q.x = 2
}
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct V { int x; };\nvoid set (V * p, V q) {\np->x = 1;\nq.x = 2;\n}\n"
    );
}

#[test]
fn test_relaxed_declaration_with_unknown_type_name() {
    // Mesh is never defined or typedef'd; the declarator shape plus the
    // trailing `;` is the only evidence
    let source = "\
Mesh* active;
active.verts = 0
";
    let output = translated(source);
    assert_eq!(output, "Mesh * active;\nactive->verts = 0;\n");
}

#[test]
fn test_unknown_identifier_dot_is_never_rewritten() {
    let output = translated("mystery.field = 1\n");
    assert_eq!(output, "mystery.field = 1;\n");
}

#[test]
fn test_quadruple_pointer_unwinds_to_single_arrow() {
    let source = "\
struct T { int f; };
T**** x
x.f = 1
";
    let output = translated(source);
    assert_eq!(
        output,
        "struct T { int f; };\nT * * * * x;\n(* (* (* x)))->f = 1;\n"
    );
}

#[test]
fn test_typedef_carries_across_files_in_one_run() {
    let mut types = KnownTypes::new();
    translate_source("typedef int Handle;\n", &mut types).unwrap();

    let output = translate_source("Handle* h\nh.id = 1\n", &mut types).unwrap();
    assert_eq!(output, "Handle * h;\nh->id = 1;\n");
}

#[test]
fn test_forbidden_arrow_reports_position() {
    let mut types = KnownTypes::new();
    let err = translate_source("int main() {\nq->x = 1\n}\n", &mut types).unwrap_err();
    assert_eq!(err, LexError::ForbiddenArrow { line: 2, col: 2 });
}

#[test]
fn test_crlf_input_translates_cleanly() {
    let output = translated("int x\r\nx = 2\r\n");
    assert_eq!(output, "int x;\nx = 2;\n");
}

#[test]
fn test_line_continuation_joins_statements() {
    let output = translated("int \\\nx\n");
    assert_eq!(output, "int x;\n");
}

// === FILE-LEVEL TESTS ===

#[test]
fn test_translate_file_writes_sibling_cpp() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.cp");
    fs::write(&input, "int main() {\nreturn 0\n}\n").unwrap();

    let mut types = KnownTypes::new();
    let out_path = translate_file(&input, &mut types).unwrap();

    assert_eq!(out_path, dir.path().join("prog.cpp"));
    assert_eq!(
        fs::read_to_string(out_path).unwrap(),
        "int main () {\nreturn 0;\n}\n"
    );
}

#[test]
fn test_translate_file_appends_extension_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog");
    fs::write(&input, "int x\n").unwrap();

    let mut types = KnownTypes::new();
    let out_path = translate_file(&input, &mut types).unwrap();
    assert_eq!(out_path, dir.path().join("prog.cpp"));
}

#[test]
fn test_translate_file_read_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.cp");

    let mut types = KnownTypes::new();
    let err = translate_file(&missing, &mut types).unwrap_err();
    assert!(matches!(err, TranslateError::Read { .. }));
}

#[test]
fn test_forbidden_arrow_writes_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.cp");
    fs::write(&input, "a->b\n").unwrap();

    let mut types = KnownTypes::new();
    let err = translate_file(&input, &mut types).unwrap_err();
    assert!(matches!(err, TranslateError::Lex(_)));
    assert!(!dir.path().join("bad.cpp").exists());
}
