// Integration tests for the full scan: tokens, symbol table and listing

use cscan::errors::Diagnostic;
use cscan::listing::{write_listing, ListingOptions};
use cscan::parser::{analyze, TokenKind};
use cscan::symbols::{DeclKind, SymbolTable};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const INVENTORY: &str = include_str!("fixtures/inventory.c");

fn names(table: &SymbolTable) -> Vec<&str> {
    table.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_redeclaration_keeps_first_entry() {
    let analysis = analyze("int x;\nchar x;");
    let x = analysis.symbols.get("x").expect("x registered");

    assert_eq!(analysis.symbols.len(), 1);
    assert_eq!(x.index, 1);
    assert_eq!(x.occurrences, 2);
    assert_eq!(x.declared_type.as_deref(), Some("int"));
    assert_eq!(x.first_decl_line, Some(1));
}

#[test]
fn test_scope_isolation_between_functions() {
    let analysis = analyze("int f(int a) { int b; } int c;");
    let scope = |name: &str| {
        analysis
            .symbols
            .get(name)
            .and_then(|s| s.scope.clone())
            .unwrap_or_default()
    };

    assert_eq!(names(&analysis.symbols), ["f", "a", "b", "c"]);
    assert_eq!(scope("f"), "global");
    assert_eq!(scope("a"), "f");
    assert_eq!(scope("b"), "f");
    assert_eq!(scope("c"), "global");
}

#[test]
fn test_anonymous_blocks_are_numbered() {
    let analysis = analyze("void g() { { int t; } } int h() { if (1) { int u; } }");
    let scope = |name: &str| analysis.symbols.get(name).and_then(|s| s.scope.as_deref());

    assert_eq!(scope("t"), Some("scope2"));
    assert_eq!(scope("u"), Some("scope4"));
}

#[test]
fn test_pointer_types() {
    let analysis = analyze("int *p, **q, r;");
    let ty = |name: &str| analysis.symbols.get(name).and_then(|s| s.declared_type.as_deref());

    assert_eq!(ty("p"), Some("int *"));
    assert_eq!(ty("q"), Some("int * *"));
    assert_eq!(ty("r"), Some("int"));
}

#[test]
fn test_errors_are_excluded_from_declarations() {
    let analysis = analyze("int 9lives = 1; int ok;");

    assert!(analysis.has_errors());
    assert!(analysis.symbols.get("lives").is_none());
    assert!(analysis.symbols.get("ok").is_some());
}

#[test]
fn test_independent_runs_share_nothing() {
    let first = analyze("int a;");
    let second = analyze("int b;");

    assert_eq!(names(&first.symbols), ["a"]);
    assert_eq!(names(&second.symbols), ["b"]);
    assert_eq!(second.symbols.get("b").map(|s| s.index), Some(1));
}

#[test]
fn test_inventory_symbols() {
    let analysis = analyze(INVENTORY);
    let table = &analysis.symbols;

    assert_eq!(
        names(table),
        [
            "names", "counts", "total", "ratio", "mask", "perms", "find", "name", "limit", "i",
            "strcmp", "report", "out", "sep", "bad", "fprintf", "main", "argc", "argv", "slot",
            "extra",
        ]
    );

    let get = |name: &str| table.get(name).expect(name);

    assert_eq!(get("names").declared_type.as_deref(), Some("static const char * [MAX_ITEMS]"));
    assert_eq!(get("names").scope.as_deref(), Some("global"));
    assert_eq!(get("counts").declared_type.as_deref(), Some("static int [MAX_ITEMS]"));
    assert_eq!(get("total").declared_type.as_deref(), Some("static int"));
    assert_eq!(get("ratio").declared_type.as_deref(), Some("double"));
    assert_eq!(get("perms").declared_type.as_deref(), Some("unsigned long"));

    assert_eq!(get("find").kind, Some(DeclKind::Function));
    assert_eq!(get("find").declared_type.as_deref(), Some("int"));
    assert_eq!(get("name").kind, Some(DeclKind::Parameter));
    assert_eq!(get("name").declared_type.as_deref(), Some("const char *"));
    assert_eq!(get("i").scope.as_deref(), Some("find"));
    assert_eq!(get("strcmp").kind, Some(DeclKind::Call));
    assert_eq!(get("strcmp").scope.as_deref(), Some("scope2"));

    assert_eq!(get("out").declared_type.as_deref(), Some("FILE *"));
    assert_eq!(get("out").scope.as_deref(), Some("report"));
    assert_eq!(get("fprintf").scope.as_deref(), Some("report"));

    // declared once, called once from main
    assert_eq!(get("report").occurrences, 2);
    assert_eq!(get("report").references, 2);

    // the call to find sits in an initializer: one registration, two uses
    assert_eq!(get("find").occurrences, 1);
    assert_eq!(get("find").references, 2);
    assert_eq!(get("total").references, 3);
    assert_eq!(get("report").kind, Some(DeclKind::Function));

    assert_eq!(get("argv").declared_type.as_deref(), Some("char **"));
    assert_eq!(get("slot").scope.as_deref(), Some("main"));
    assert_eq!(get("extra").scope.as_deref(), Some("scope6"));
    assert_eq!(get("extra").first_decl_line, Some(32));

    // the suffix of the malformed `2nd` is never declared
    assert!(table.get("nd").is_none());
}

#[test]
fn test_inventory_diagnostics() {
    let analysis = analyze(INVENTORY);
    let diagnostics: Vec<String> = analysis
        .errors()
        .filter_map(Diagnostic::from_token)
        .map(|d| d.to_string())
        .collect();

    assert_eq!(
        diagnostics,
        [
            "24:16: invalid character literal 'xy'",
            "25:9: malformed numeric identifier '2nd'",
            "25:21: unrecognized character '@'",
        ]
    );
}

#[test]
fn test_inventory_listing() {
    let analysis = analyze(INVENTORY);
    let mut out = Vec::new();
    write_listing(
        &mut out,
        &analysis.tokens,
        &analysis.symbols,
        ListingOptions {
            show_comments: false,
            show_symbols: true,
        },
    )
    .expect("writing to a Vec cannot fail");
    let text = String::from_utf8(out).expect("listing is UTF-8");

    assert!(text.starts_with("1:1\tPP_DIRECTIVE\t#include <stdio.h>\n"));
    assert!(!text.contains("COMMENT_BLOCK"));
    assert!(text.contains("Symbol table (21 entries):"));

    let directives = analysis
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::PpDirective)
        .count();
    assert_eq!(directives, 3);
}

const DECLARATION_WORDS: &[&str] = &[
    "int", "char", "const", "static", "void", "unsigned", "struct", "x", "y", "f", "main", "*",
    "(", ")", "{", "}", "[", "]", ",", ";", "=", "...", "1", "9x", "'a'", "@",
];

proptest! {
    #[test]
    fn prop_declaration_pass_always_completes(
        words in prop::collection::vec(prop::sample::select(DECLARATION_WORDS), 0..80)
    ) {
        let analysis = analyze(&words.join(" "));
        let indices: Vec<u32> = analysis.symbols.iter().map(|s| s.index).collect();
        let expected: Vec<u32> = (1..=analysis.symbols.len() as u32).collect();

        prop_assert_eq!(indices, expected);
        for symbol in &analysis.symbols {
            prop_assert!(symbol.occurrences >= 1);
            prop_assert_eq!(analysis.symbols.get(&symbol.name), Some(symbol));
        }
    }
}
