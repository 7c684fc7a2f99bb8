// Tests for diagnostic span resolver
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

use super::*;

/// Two files:
///
/// ```text
///   "ab\ncd\n"   "efg"
///   [0, 6)       [6, 9)
/// ```
fn two_files() -> SourceSet {
    let mut set = SourceSet::new();
    set.add_file(SourceFile::new("one", "ab\ncd\n"));
    set.add_file(SourceFile::new("two", "efg"));
    set
}

#[test]
fn resolves_span_within_single_line() {
    let set = two_files();

    assert_eq!(
        Ok(ResolvedSpan {
            span: Span::new(4, 1),
            filename: "one",
            start_line: 2,
            start_col: 2,
            end_filename: None,
            end_line: 2,
            end_col: 3,
            line_text: b"cd",
        }),
        set.resolve(Span::new(4, 1)),
    );
}

#[test]
fn resolves_positions_local_to_second_file() {
    let set = two_files();
    let resolved = set.resolve(Span::new(7, 2)).unwrap();

    assert_eq!("two", resolved.filename);
    assert_eq!(LineCol::new(1, 2), resolved.start());
    assert_eq!(LineCol::new(1, 4), resolved.end());
    assert_eq!(b"efg", resolved.line_text);
    assert!(!resolved.is_multiline());
}

#[test]
fn exclusive_end_on_file_boundary_stays_in_preceding_file() {
    let set = two_files();

    // "cd\n"
    let resolved = set.resolve(Span::new(3, 3)).unwrap();

    assert_eq!("one", resolved.filename);
    assert_eq!(None, resolved.end_filename);
    assert_eq!(LineCol::new(2, 1), resolved.start());
    assert_eq!(LineCol::new(3, 1), resolved.end());
    assert!(resolved.is_multiline());
}

#[test]
fn span_crossing_files_names_end_file() {
    let set = two_files();
    let resolved = set.resolve(Span::new(4, 4)).unwrap();

    assert_eq!("one", resolved.filename);
    assert_eq!(Some("two"), resolved.end_filename);
    assert_eq!(LineCol::new(1, 3), resolved.end());
    assert!(resolved.is_multiline());
}

#[test]
fn empty_span_on_boundary_resolves_to_following_file() {
    let set = two_files();
    let resolved = set.resolve(Span::new(6, 0)).unwrap();

    assert_eq!("two", resolved.filename);
    assert_eq!(None, resolved.end_filename);
    assert_eq!(resolved.start(), resolved.end());
}

#[test]
fn empty_span_at_end_of_input() {
    let set = two_files();
    let resolved = set.resolve(Span::new(9, 0)).unwrap();

    assert_eq!("two", resolved.filename);
    assert_eq!(LineCol::new(1, 4), resolved.start());
    assert_eq!(b"efg", resolved.line_text);
}

#[test]
fn span_beyond_input_fails() {
    let set = two_files();

    assert_eq!(
        Err(SourceError::PositionOutOfRange { pos: 10, len: 9 }),
        set.resolve(Span::new(10, 0)),
    );

    assert!(set.resolve(Span::new(8, 5)).is_err());
}

#[test]
fn resolves_against_single_file() {
    let file = SourceFile::new("f", "x\nyz");
    let resolved = file.resolve(Span::new(2, 2)).unwrap();

    assert_eq!("f", resolved.filename);
    assert_eq!(LineCol::new(2, 1), resolved.start());
    assert_eq!(LineCol::new(2, 3), resolved.end());
    assert_eq!(b"yz", resolved.line_text);

    assert!(file.resolve(Span::new(3, 5)).is_err());
}

#[test]
fn resolves_through_reference() {
    let file = SourceFile::new("f", "abc");
    let by_ref = &file;

    assert_eq!(file.resolve(Span::new(1, 1)), by_ref.resolve(Span::new(1, 1)));
}

#[test]
fn underline_within_line() {
    let file = SourceFile::new("f", "nam: value\n");

    assert_eq!((0, 3), file.resolve(Span::new(0, 3)).unwrap().underline());
    assert_eq!((5, 5), file.resolve(Span::new(5, 5)).unwrap().underline());
}

#[test]
fn underline_zero_length_is_one_column() {
    let file = SourceFile::new("f", "abc");

    assert_eq!((1, 1), file.resolve(Span::new(1, 0)).unwrap().underline());
    assert_eq!((3, 1), file.resolve(Span::new(3, 0)).unwrap().underline());
}

#[test]
fn underline_multiline_extends_to_end_of_first_line() {
    let file = SourceFile::new("f", "abcd\nef");

    assert_eq!((2, 2), file.resolve(Span::new(2, 5)).unwrap().underline());
}

#[test]
fn underline_uses_display_width() {
    // "λ" is two bytes but one column;
    //   "世" is three bytes but two columns.
    let file = SourceFile::new("f", "λ世x");

    assert_eq!((1, 2), file.resolve(Span::new(2, 3)).unwrap().underline());
    assert_eq!((3, 1), file.resolve(Span::new(5, 1)).unwrap().underline());
}

#[test]
fn underline_counts_invalid_utf8_as_replacement_characters() {
    let file = SourceFile::new("f", &b"\xff\xfeab"[..]);

    assert_eq!((2, 2), file.resolve(Span::new(2, 2)).unwrap().underline());

    // "\xc3\xa9" is a two-byte "é" and "\xff" a lone invalid byte,
    //   each displayed in one column.
    let file = SourceFile::new("f", &b"\xc3\xa9\xff x"[..]);

    assert_eq!((3, 1), file.resolve(Span::new(4, 1)).unwrap().underline());
}
