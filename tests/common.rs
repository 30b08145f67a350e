//! Integration tests for aspire-common crate.

use aspire_common::{BytePos, LineCol, LineIndex, Span};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_point() {
    let span = Span::point(4);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert_eq!(span.start, BytePos(4));
}

#[test]
fn test_span_slice() {
    let source = "main() { 1 }";
    assert_eq!(Span::from_usize(0, 4).slice(source), "main");
}

#[test]
fn test_line_index_multiline() {
    let source = "f() {\n  a\n  b\n}\n";
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 5);
    assert_eq!(index.line_col(source, 8), LineCol { line: 2, col: 3 });
    assert_eq!(index.line_col(source, 14), LineCol { line: 4, col: 1 });
    assert_eq!(index.line_col(source, 8).to_string(), "line 2 char 3");
}

#[test]
fn test_line_index_counts_characters() {
    let source = "é = 1";
    let index = LineIndex::new(source);
    assert_eq!(index.line_col(source, 2), LineCol { line: 1, col: 2 });
}
