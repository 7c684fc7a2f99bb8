// Tests for diagnostic reports
//
//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of srcparse.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! These tests assert,
//!   byte-for-byte,
//!   against the report output that will be rendered to the user.
//! Presentation matters here,
//!   and so the expected output is written out in full rather than
//!   assembled with format strings,
//!     allowing the developer to visualize what the user will see.

use super::*;
use crate::{
    cursor::Cursor,
    diagnose::{Annotate, DiagnosticMessage},
    parse::{primitive::*, Parser},
    source::{SourceFile, SourceSet},
};
use std::error::Error;

#[derive(Debug)]
struct StubError(String, Vec<AnnotatedSpan<'static>>);

impl Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for StubError {}

impl Diagnostic for StubError {
    fn describe(&self) -> Vec<AnnotatedSpan<'_>> {
        self.1.clone()
    }
}

const FILE_FOO_BAR: &[u8] = b"foo/bar line 1\nfoo/bar line 2\n";
//                            |-------+----|  |-------+----|
//                            0       8   13  15      23  28
//                                 global [0, 30)

const FILE_BAR_BAZ: &[u8] = b"bar/baz line 1\n";
//                                 global [30, 45)

const FILE_INVALID_UTF8: &[u8] = b"bad \xC0!";
//                                 global [45, 51)

fn source_set() -> SourceSet {
    let mut set = SourceSet::new();
    set.add_file(SourceFile::new("foo/bar", FILE_FOO_BAR));
    set.add_file(SourceFile::new("bar/baz", FILE_BAR_BAZ));
    set.add_file(SourceFile::new("invalid/utf8", FILE_INVALID_UTF8));
    set
}

macro_rules! assert_report {
    ($aspans:expr, $expected:expr) => {
        let set = source_set();
        let mut sut = VisualReporter::new(&set);

        let err = StubError("test msg".into(), $aspans.into());

        assert_eq!(
            sut.render(&err).to_string(),
            $expected,
            "\ndiagnostic: {err:?}"
        );
    };
}

#[test]
fn no_spans() {
    assert_report!(Vec::<AnnotatedSpan>::new(), "error: test msg\n");
}

#[test]
fn span_without_label() {
    assert_report!(
        Span::new(0, 7).mark_error(),
        "\
error: foo/bar:1:1 - 1:8: test msg
1 | foo/bar line 1
    ^^^^^^^
"
    );
}

#[test]
fn span_on_later_line() {
    assert_report!(
        Span::new(23, 4).mark_error(),
        "\
error: foo/bar:2:9 - 2:13: test msg
2 | foo/bar line 2
            ^^^^
"
    );
}

#[test]
fn adjacent_labels_on_same_span_are_squashed() {
    assert_report!(
        Span::new(16, 4).error("label").with_help("try this"),
        "\
error: foo/bar:2:2 - 2:6: test msg
2 | foo/bar line 2
     ^^^^
  = error: label
  = help: try this
"
    );
}

#[test]
fn secondary_span_in_other_file() {
    assert_report!(
        vec![
            Span::new(8, 4).mark_error(),
            Span::new(38, 4).note("defined here"),
        ],
        "\
error: foo/bar:1:9 - 1:13: test msg
1 | foo/bar line 1
            ^^^^
note: bar/baz:1:9 - 1:13: defined here
1 | bar/baz line 1
            ^^^^
"
    );
}

#[test]
fn secondary_span_without_label() {
    assert_report!(
        vec![
            Span::new(0, 3).mark_error(),
            Span::new(30, 3).annotate(Level::Note, None),
        ],
        "\
error: foo/bar:1:1 - 1:4: test msg
1 | foo/bar line 1
    ^^^
note: bar/baz:1:1 - 1:4
1 | bar/baz line 1
    ^^^
"
    );
}

#[test]
fn non_adjacent_same_spans_are_not_squashed() {
    assert_report!(
        vec![
            Span::new(0, 3).mark_error(),
            Span::new(30, 3).note("b"),
            Span::new(0, 3).note("again"),
        ],
        "\
error: foo/bar:1:1 - 1:4: test msg
1 | foo/bar line 1
    ^^^
note: bar/baz:1:1 - 1:4: b
1 | bar/baz line 1
    ^^^
note: foo/bar:1:1 - 1:4: again
1 | foo/bar line 1
    ^^^
"
    );
}

#[test]
fn span_continuing_past_line_is_underlined_to_end_of_line() {
    assert_report!(
        Span::new(8, 10).mark_error(),
        "\
error: foo/bar:1:9 - 2:4: test msg
1 | foo/bar line 1
            ^^^^^^
"
    );
}

#[test]
fn span_ending_in_other_file_names_end_file() {
    assert_report!(
        Span::new(25, 10).mark_error(),
        "\
error: foo/bar:2:11 - bar/baz:1:6: test msg
2 | foo/bar line 2
              ^^^^
"
    );
}

#[test]
fn zero_length_span_at_end_of_line() {
    assert_report!(
        Span::new(14, 0).mark_error(),
        "\
error: foo/bar:1:15 - 1:15: test msg
1 | foo/bar line 1
                  ^
"
    );
}

#[test]
fn invalid_utf8_line_underlined_as_displayed() {
    assert_report!(
        Span::new(49, 1).mark_error(),
        "\
error: invalid/utf8:1:5 - 1:6: test msg
1 | bad \u{FFFD}!
        ^
  = help: the line is not a valid UTF-8 string, \
so invalid bytes are shown as U+FFFD
"
    );
}

#[test]
fn unresolvable_span_falls_back_to_offsets() {
    assert_report!(
        Span::new(100, 2).error("label"),
        "\
error: offset 100--102: test msg
  = error: label
  = help: an error occurred while trying to look up information \
about this span: position 100 exceeds source set size of 51 bytes
"
    );
}

#[test]
fn report_level_is_most_severe_section() {
    let set = source_set();
    let mut sut = VisualReporter::new(&set);

    let notes = StubError(
        "test msg".into(),
        vec![Span::new(0, 1).note("a"), Span::new(1, 1).help("b")],
    );
    let report = sut.render(&notes);

    assert_eq!(Level::Note, report.level());
    assert!(report
        .to_string()
        .starts_with("note: foo/bar:1:1 - 1:2: test msg\n"));

    let mixed = StubError(
        "test msg".into(),
        vec![Span::new(0, 1).help("a"), Span::new(1, 1).error("b")],
    );
    assert_eq!(Level::Error, sut.render(&mixed).level());

    let empty = StubError("test msg".into(), vec![]);
    assert_eq!(Level::Error, sut.render(&empty).level());
}

#[test]
fn diagnostic_message_highlights_its_span() {
    let set = source_set();
    let msg = DiagnosticMessage::new("unknown name", Span::new(30, 7));

    assert_eq!(
        VisualReporter::new(&set).render(&msg).to_string(),
        "\
error: bar/baz:1:1 - 1:8: unknown name
1 | bar/baz line 1
    ^^^^^^^
"
    );
}

#[test]
fn parse_error_with_alternative() {
    let file = SourceFile::new("t", "x");
    let mut cursor = Cursor::new(&file);

    let err = byte(b'a')
        .or_either(literal("bc"))
        .parse(&mut cursor)
        .unwrap_err();

    assert_eq!(
        VisualReporter::new(&file).render(&err).to_string(),
        "\
error: t:1:1 - 1:1: expected `bc`, found `x`
1 | x
    ^
note: t:1:1 - 1:2: alternatively, expected `a`, found `x`
1 | x
    ^
"
    );
}
