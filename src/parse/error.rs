// Grammar failures
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

//! Grammar failures produced by [`Parser`](super::Parser)s.
//!
//! An [`Error`] is an ordinary value returned by a parser;
//!   it describes what was expected and what was found at a [`Span`] of
//!   the input.
//! Alternation may merge two failures into one,
//!   nesting the path not taken so that its expectations are not lost
//!   (see [`Error::merge_nested`]).

use crate::{
    diagnose::{Annotate, AnnotatedSpan, Diagnostic},
    fmt::{DisplayWrapper, ListDisplayWrapper, OrConjList, Raw, Tt},
    span::Span,
};
use std::fmt::{self, Display};

/// A single fact about a grammar failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    /// A specific byte was expected.
    Expected(u8),

    /// The given text was expected.
    ExpectedLiteral(String),

    /// The given text was expected,
    ///   compared without regard to ASCII case.
    ExpectedLiteralCaseInsensitive(String),

    /// A byte was encountered that could not be accepted,
    ///   or [`None`] at end of input.
    Unexpected(Option<u8>),

    /// Text was encountered that could not be accepted.
    ///
    /// This is the input that was read in place of an expected literal;
    ///   it is empty at end of input.
    UnexpectedLiteral(String),

    /// Like [`ErrorMessage::UnexpectedLiteral`],
    ///   but for a case-insensitive comparison.
    UnexpectedLiteralCaseInsensitive(String),

    /// Free-form context.
    Note(String),

    /// A failure of an alternative that was also attempted.
    Nested(Box<Error>),
}

/// A grammar failure anchored to a [`Span`] of the input.
///
/// The list of messages is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    span: Span,
    messages: Vec<ErrorMessage>,
}

impl Error {
    /// Create an error with its first message.
    pub fn new(span: Span, first: ErrorMessage) -> Self {
        Self {
            span,
            messages: vec![first],
        }
    }

    /// Append a message.
    pub fn with(mut self, msg: ErrorMessage) -> Self {
        self.messages.push(msg);
        self
    }

    /// Failure to match a specific byte at the cursor.
    ///
    /// The span covers the offending byte,
    ///   or is empty at end of input.
    pub fn unexpected_byte(pos: usize, found: Option<u8>) -> Self {
        let span = match found {
            Some(_) => Span::new(pos, 1),
            None => Span::at(pos),
        };

        Self::new(span, ErrorMessage::Unexpected(found))
    }

    /// Global position at which the failure was detected.
    pub fn position(&self) -> usize {
        self.span.start()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn messages(&self) -> &[ErrorMessage] {
        &self.messages
    }

    /// Errors nested within this one by alternation,
    ///   in the order they were merged.
    pub fn nested(&self) -> impl Iterator<Item = &Error> {
        self.messages.iter().filter_map(|msg| match msg {
            ErrorMessage::Nested(e) => Some(e.as_ref()),
            _ => None,
        })
    }

    /// Merge the failure of a previously attempted alternative into this
    ///   one.
    ///
    /// `self` remains the primary failure,
    ///   retaining its span and messages;
    ///     `first` is appended as [`ErrorMessage::Nested`].
    pub fn merge_nested(self, first: Error) -> Self {
        self.with(ErrorMessage::Nested(Box::new(first)))
    }
}

/// Escaped display of input bytes.
struct Bytes<'a>(&'a [u8]);

impl<'a> Display for Bytes<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            for c in chunk.valid().chars() {
                match c {
                    '\n' | '\r' | '\t' | '\0' | '`' | '\\' => {
                        write!(f, "{}", c.escape_default())?
                    }
                    _ => write!(f, "{c}")?,
                }
            }

            for b in chunk.invalid() {
                write!(f, "\\x{b:02x}")?;
            }
        }

        Ok(())
    }
}

/// A description of one expected or unexpected item.
enum Item<'a> {
    Text(&'a [u8]),
    TextCaseInsensitive(&'a [u8]),
    EndOfInput,
}

impl<'a> Display for Item<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => Tt::<Raw>::fmt(Bytes(s), f),
            Self::TextCaseInsensitive(s) => {
                Tt::<Raw>::fmt(Bytes(s), f)?;
                f.write_str(" (case-insensitive)")
            }
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

impl<'a> Item<'a> {
    fn found(text: &'a str) -> Self {
        match text.is_empty() {
            true => Self::EndOfInput,
            false => Self::Text(text.as_bytes()),
        }
    }
}

impl Display for Error {
    /// Summarize expectations,
    ///   followed by any notes.
    ///
    /// Nested errors are not included;
    ///   they are available via [`std::error::Error::source`] and are
    ///   described separately by [`Diagnostic::describe`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ErrorMessage::*;

        let mut expected = Vec::new();
        let mut found = Vec::new();
        let mut notes = Vec::new();

        for msg in &self.messages {
            match msg {
                Expected(b) => {
                    expected.push(Item::Text(std::slice::from_ref(b)))
                }
                ExpectedLiteral(s) => expected.push(Item::Text(s.as_bytes())),
                ExpectedLiteralCaseInsensitive(s) => {
                    expected.push(Item::TextCaseInsensitive(s.as_bytes()))
                }
                Unexpected(Some(b)) => {
                    found.push(Item::Text(std::slice::from_ref(b)))
                }
                Unexpected(None) => found.push(Item::EndOfInput),
                UnexpectedLiteral(s) | UnexpectedLiteralCaseInsensitive(s) => {
                    found.push(Item::found(s))
                }
                Note(s) => notes.push(s.as_str()),
                Nested(_) => (),
            }
        }

        let mut sep = "";

        match (expected.is_empty(), found.is_empty()) {
            (false, false) => {
                write!(
                    f,
                    "expected {}, found {}",
                    OrConjList::<Raw>::wrap(&expected[..]),
                    OrConjList::<Raw>::wrap(&found[..]),
                )?;
                sep = "; ";
            }
            (false, true) => {
                write!(
                    f,
                    "expected {}",
                    OrConjList::<Raw>::wrap(&expected[..])
                )?;
                sep = "; ";
            }
            (true, false) => {
                write!(
                    f,
                    "unexpected {}",
                    OrConjList::<Raw>::wrap(&found[..])
                )?;
                sep = "; ";
            }
            (true, true) => (),
        }

        for note in notes {
            write!(f, "{sep}{note}")?;
            sep = "; ";
        }

        // Only nested errors.
        if sep.is_empty() {
            f.write_str("parse failed")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.nested()
            .next()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl Diagnostic for Error {
    fn describe(&self) -> Vec<AnnotatedSpan<'_>> {
        let mut desc = vec![self.span.mark_error()];
        describe_nested(self, &mut desc);
        desc
    }
}

/// Describe each nested alternative as a note on its own span,
///   depth-first.
fn describe_nested(err: &Error, desc: &mut Vec<AnnotatedSpan<'static>>) {
    for nested in err.nested() {
        desc.push(nested.span.note(format!("alternatively, {nested}")));
        describe_nested(nested, desc);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnose::Level;
    use ErrorMessage::*;

    #[test]
    fn display_expected_and_found() {
        let sut = Error::new(Span::new(0, 3), UnexpectedLiteral("nam:".into()))
            .with(ExpectedLiteral("name".into()));

        assert_eq!("expected `name`, found `nam:`", sut.to_string());
        assert_eq!(0, sut.position());
    }

    #[test]
    fn display_multiple_expectations() {
        let sut = Error::new(Span::new(5, 1), Expected(b'a'))
            .with(ExpectedLiteral("bc".into()))
            .with(ExpectedLiteralCaseInsensitive("DEF".into()))
            .with(Unexpected(Some(b'\n')));

        assert_eq!(
            "expected `a`, `bc`, or `DEF` (case-insensitive), found `\\n`",
            sut.to_string(),
        );
        assert_eq!(5, sut.position());
    }

    #[test]
    fn display_end_of_input() {
        let byte = Error::unexpected_byte(3, None);
        assert_eq!("unexpected end of input", byte.to_string());
        assert_eq!(Span::new(3, 0), byte.span());

        let lit = Error::new(Span::new(3, 0), UnexpectedLiteral("".into()))
            .with(ExpectedLiteral("x".into()));
        assert_eq!("expected `x`, found end of input", lit.to_string());
    }

    #[test]
    fn display_notes_after_expectations() {
        let sut = Error::unexpected_byte(0, Some(b'x'))
            .with(Note("expected end of input".into()))
            .with(Note("while parsing document".into()));

        assert_eq!(
            "unexpected `x`; expected end of input; while parsing document",
            sut.to_string(),
        );
    }

    #[test]
    fn display_escapes_invalid_utf8() {
        let sut = Error::unexpected_byte(0, Some(0xff));
        assert_eq!("unexpected `\\xff`", sut.to_string());
    }

    #[test]
    fn merge_nested_keeps_primary() {
        let first = Error::unexpected_byte(0, Some(b'a'));
        let second = Error::unexpected_byte(2, Some(b'b'));

        let sut = second.clone().merge_nested(first.clone());

        assert_eq!(second.span(), sut.span());
        assert_eq!(vec![&first], sut.nested().collect::<Vec<_>>());
        assert_eq!("unexpected `b`", sut.to_string());
        assert!(std::error::Error::source(&sut).is_some());
    }

    #[test]
    fn describe_includes_nested_as_notes() {
        let inner = Error::unexpected_byte(0, Some(b'a'));
        let first = Error::unexpected_byte(1, Some(b'b')).merge_nested(inner);
        let sut = Error::unexpected_byte(2, Some(b'c')).merge_nested(first);

        let desc = sut.describe();

        assert_eq!(
            vec![
                Span::new(2, 1).mark_error(),
                Span::new(1, 1).note("alternatively, unexpected `b`"),
                Span::new(0, 1).note("alternatively, unexpected `a`"),
            ],
            desc,
        );

        assert_eq!(Level::Error, desc[0].level());
    }
}
