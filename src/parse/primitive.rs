// Primitive parsers
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

//! Leaves of the parser algebra.
//!
//! Primitives operate on bytes.
//! Textual values are decoded as UTF-8,
//!   with invalid sequences replaced by [`char::REPLACEMENT_CHARACTER`].
//!
//! Unless otherwise stated,
//!   a primitive that fails does not move the cursor.
//! The exception is [`literal`] and [`literal_ci`],
//!   which consume the bytes they compared against;
//!     wrap them in [`Parser::attempt`] to backtrack.

use super::{from_fn, Error, ErrorMessage, ParseResult, Parser};
use crate::{cursor::Cursor, span::Span};
use std::borrow::Cow;

fn decode(bytes: Cow<'_, [u8]>) -> String {
    match bytes {
        Cow::Borrowed(b) => String::from_utf8_lossy(b).into_owned(),
        Cow::Owned(b) => String::from_utf8(b).unwrap_or_else(|e| {
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }),
    }
}

/// Length of the common prefix of `a` and `b` under `eq`.
fn agreeing_len(a: &[u8], b: &[u8], eq: impl Fn(u8, u8) -> bool) -> usize {
    a.iter().zip(b).take_while(|&(&x, &y)| eq(x, y)).count()
}

/// Exactly the given text.
///
/// Precisely `text.len()` bytes are read and the cursor is advanced past
///   them whether or not they match
///     (or to the end of input if fewer remain).
/// On mismatch,
///   the error spans the bytes that agreed with `text` before the first
///   byte that did not,
///     and reports both the text that was read and the text that was
///     expected.
pub fn literal(text: &str) -> Literal {
    Literal {
        text: text.to_string(),
        case_insensitive: false,
    }
}

/// Like [`literal`],
///   but comparing ASCII letters without regard to case.
///
/// The value is the text as it appears in the input.
pub fn literal_ci(text: &str) -> Literal {
    Literal {
        text: text.to_string(),
        case_insensitive: true,
    }
}

/// See [`literal`] and [`literal_ci`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: String,
    case_insensitive: bool,
}

impl Parser for Literal {
    type Output = String;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<String> {
        use ErrorMessage::*;

        let start = cursor.position();
        let expected = self.text.as_bytes();
        let read = cursor.read(expected.len());

        let eq: fn(u8, u8) -> bool = match self.case_insensitive {
            true => |a: u8, b: u8| a.eq_ignore_ascii_case(&b),
            false => |a: u8, b: u8| a == b,
        };

        let agreed = agreeing_len(&read, expected, eq);

        if agreed == expected.len() {
            return Ok(decode(read));
        }

        let span = cursor.span_from(start).slice(0, agreed);
        let actual = decode(read);

        Err(match self.case_insensitive {
            false => Error::new(span, UnexpectedLiteral(actual))
                .with(ExpectedLiteral(self.text.clone())),
            true => Error::new(span, UnexpectedLiteralCaseInsensitive(actual))
                .with(ExpectedLiteralCaseInsensitive(self.text.clone())),
        })
    }
}

/// A single byte satisfying `pred`.
///
/// Fails with [`ErrorMessage::Unexpected`] at end of input or if `pred`
///   rejects the byte.
pub fn token<F: Fn(u8) -> bool>(pred: F) -> Token<F> {
    Token { pred }
}

/// See [`token`].
pub struct Token<F> {
    pred: F,
}

impl<F: Fn(u8) -> bool> Parser for Token<F> {
    type Output = u8;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<u8> {
        match cursor.current() {
            Some(b) if (self.pred)(b) => {
                cursor.skip(1);
                Ok(b)
            }
            found => Err(Error::unexpected_byte(cursor.position(), found)),
        }
    }
}

/// Exactly the byte `expected`.
pub fn byte(expected: u8) -> impl Parser<Output = u8> {
    let tok = token(move |b| b == expected);

    from_fn(move |cursor| {
        tok.parse(cursor)
            .map_err(|e| e.with(ErrorMessage::Expected(expected)))
    })
}

/// Any single byte.
///
/// This fails only at end of input.
pub fn any() -> impl Parser<Output = u8> {
    token(|_| true)
}

/// Advance past a maximal run of ASCII whitespace.
///
/// This always succeeds,
///   even if no whitespace is present.
pub fn skip_whitespace() -> impl Parser<Output = ()> {
    from_fn(|cursor| {
        cursor.read_while(|b| b.is_ascii_whitespace());
        Ok(())
    })
}

/// All bytes up to
///   (but not including)
///   the next `b'\n'` or the end of input.
///
/// This always succeeds and does not consume the newline.
pub fn rest_of_line() -> impl Parser<Output = String> {
    take_until(b'\n')
}

/// A maximal run of bytes other than `stop`.
///
/// This always succeeds and does not consume `stop`.
pub fn take_until(stop: u8) -> impl Parser<Output = String> {
    from_fn(move |cursor| Ok(decode(cursor.read_while(|b| b != stop))))
}

/// A maximal run of ASCII alphanumerics,
///   `_`,
///   `(`,
///   and `)`.
///
/// This always succeeds and may yield an empty string.
pub fn identifier() -> impl Parser<Output = String> {
    from_fn(|cursor| {
        Ok(decode(cursor.read_while(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b'_' | b'(' | b')')
        })))
    })
}

/// The first of `texts` to match as a [`literal`].
///
/// Each alternative is attempted from the same position.
/// If none match,
///   the failure of the last alternative is returned.
///
/// An empty list yields a parser that never matches.
pub fn strings<'a, I>(texts: I) -> impl Parser<Output = String>
where
    I: IntoIterator<Item = &'a str>,
{
    let alts = texts
        .into_iter()
        .map(|text| literal(text).attempt())
        .collect::<Vec<_>>();

    from_fn(move |cursor| {
        let mut last = None;

        for alt in &alts {
            match alt.parse(cursor) {
                Ok(value) => return Ok(value),
                Err(e) => last = Some(e),
            }
        }

        Err(last.unwrap_or_else(|| {
            Error::new(
                Span::at(cursor.position()),
                ErrorMessage::Note("no alternatives to match".into()),
            )
        }))
    })
}

/// Succeed only at the end of input.
pub fn end_of_input() -> impl Parser<Output = ()> {
    from_fn(|cursor| match cursor.current() {
        None => Ok(()),
        found => Err(Error::unexpected_byte(cursor.position(), found)
            .with(ErrorMessage::Note("expected end of input".into()))),
    })
}
