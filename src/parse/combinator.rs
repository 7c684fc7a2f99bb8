// Parser combinators
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

//! Parsers composed of other parsers.
//!
//! These types are produced by the combinator methods of [`Parser`] and
//!   are not normally named directly,
//!     except in the return type of a grammar function.
//! Each documents how it leaves the cursor on failure;
//!   only [`Attempt`] and [`Many`] ever move the cursor backward.

use super::{
    trace::{DefaultTrace, ParserTrace},
    Either, ErrorMessage, ParseResult, Parser, ParserTuple,
};
use crate::cursor::Cursor;
use std::fmt::Debug;

/// See [`Parser::map`].
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<P, F> Map<P, F> {
    pub(super) fn new(parser: P, f: F) -> Self {
        Self { parser, f }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<U> {
        self.parser.parse(cursor).map(&self.f)
    }
}

/// See [`Parser::then`].
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Parser, B: Parser> Parser for Then<A, B> {
    type Output = B::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<B::Output> {
        self.first.parse(cursor)?;
        self.second.parse(cursor)
    }
}

/// See [`Parser::then_also`].
pub struct ThenAlso<A, B> {
    first: A,
    second: B,
}

impl<A, B> ThenAlso<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Parser, B: Parser> Parser for ThenAlso<A, B> {
    type Output = (A::Output, B::Output);

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        let a = self.first.parse(cursor)?;
        let b = self.second.parse(cursor)?;

        Ok((a, b))
    }
}

/// See [`Parser::before`].
pub struct Before<A, B> {
    first: A,
    second: B,
}

impl<A, B> Before<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Parser, B: Parser> Parser for Before<A, B> {
    type Output = A::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<A::Output> {
        let a = self.first.parse(cursor)?;
        self.second.parse(cursor)?;

        Ok(a)
    }
}

/// See [`Parser::or`].
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Or<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Parser for Or<A, B>
where
    A: Parser,
    B: Parser<Output = A::Output>,
{
    type Output = A::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<A::Output> {
        match self.first.parse(cursor) {
            Ok(value) => Ok(value),
            Err(_) => self.second.parse(cursor),
        }
    }
}

/// See [`Parser::or_either`].
pub struct OrEither<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrEither<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Parser, B: Parser> Parser for OrEither<A, B> {
    type Output = Either<A::Output, B::Output>;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        let first_err = match self.first.parse(cursor) {
            Ok(value) => return Ok(Either::Left(value)),
            Err(e) => e,
        };

        self.second
            .parse(cursor)
            .map(Either::Right)
            .map_err(|e| e.merge_nested(first_err))
    }
}

/// See [`Parser::between`].
///
/// A failure of either delimiter is returned as-is.
/// Since the same parser is used for both,
///   a failure of the closing delimiter reports the same expectation as
///   the opening one would have.
pub struct Between<P, D> {
    inner: P,
    delim: D,
}

impl<P, D> Between<P, D> {
    pub(super) fn new(inner: P, delim: D) -> Self {
        Self { inner, delim }
    }
}

impl<P: Parser, D: Parser> Parser for Between<P, D> {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
        self.delim.parse(cursor)?;
        let value = self.inner.parse(cursor)?;
        self.delim.parse(cursor)?;

        Ok(value)
    }
}

/// See [`Parser::many`].
///
/// The inner parser is run until it fails,
///   after which the cursor is returned to where that final attempt
///   began;
///     the cursor therefore always ends just past the last successful
///     element.
/// The inner parser ought to be non-consuming on failure
///   (e.g. wrapped in [`Attempt`])
///   so that the input it consumed is not silently discarded.
///
/// A success that consumes no input ends the repetition without being
///   collected,
///     since it would otherwise succeed forever.
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub(super) fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Many<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        let mut values = Vec::new();

        loop {
            let start = cursor.position();

            match self.parser.parse(cursor) {
                Ok(_) if cursor.position() == start => break,
                Ok(value) => values.push(value),
                Err(_) => {
                    cursor.seek_to(start);
                    break;
                }
            }
        }

        Ok(values)
    }
}

/// A value that can be concatenated into a [`String`].
///
/// See [`Parser::many_string`].
pub trait StringFragment {
    /// Append the UTF-8 encoding of this fragment.
    fn push_onto(&self, buf: &mut Vec<u8>);
}

impl StringFragment for u8 {
    fn push_onto(&self, buf: &mut Vec<u8>) {
        buf.push(*self);
    }
}

impl StringFragment for char {
    fn push_onto(&self, buf: &mut Vec<u8>) {
        let mut enc = [0; 4];
        buf.extend_from_slice(self.encode_utf8(&mut enc).as_bytes());
    }
}

impl StringFragment for String {
    fn push_onto(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

impl StringFragment for &str {
    fn push_onto(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

/// See [`Parser::many_string`].
///
/// Byte fragments that do not form valid UTF-8 are replaced with
///   [`char::REPLACEMENT_CHARACTER`].
pub struct ManyString<P> {
    many: Many<P>,
}

impl<P> ManyString<P> {
    pub(super) fn new(parser: P) -> Self {
        Self {
            many: Many::new(parser),
        }
    }
}

impl<P> Parser for ManyString<P>
where
    P: Parser,
    P::Output: StringFragment,
{
    type Output = String;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<String> {
        let mut buf = Vec::new();

        for fragment in self.many.parse(cursor)? {
            fragment.push_onto(&mut buf);
        }

        Ok(String::from_utf8(buf).unwrap_or_else(|e| {
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }))
    }
}

/// See [`Parser::attempt`].
///
/// This is the only combinator that guarantees that the cursor is
///   restored after a failure.
pub struct Attempt<P> {
    parser: P,
}

impl<P> Attempt<P> {
    pub(super) fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Attempt<P> {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
        let start = cursor.position();

        self.parser.parse(cursor).map_err(|e| {
            cursor.seek_to(start);
            e
        })
    }
}

/// See [`Parser::then_return`].
pub struct ThenReturn<P, V> {
    parser: P,
    value: V,
}

impl<P, V> ThenReturn<P, V> {
    pub(super) fn new(parser: P, value: V) -> Self {
        Self { parser, value }
    }
}

impl<P: Parser, V: Clone> Parser for ThenReturn<P, V> {
    type Output = V;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<V> {
        self.parser.parse(cursor).map(|_| self.value.clone())
    }
}

/// See [`Parser::or_return`].
pub struct OrReturn<P: Parser> {
    parser: P,
    value: P::Output,
}

impl<P: Parser> OrReturn<P> {
    pub(super) fn new(parser: P, value: P::Output) -> Self {
        Self { parser, value }
    }
}

impl<P> Parser for OrReturn<P>
where
    P: Parser,
    P::Output: Clone,
{
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
        self.parser
            .parse(cursor)
            .or_else(|_| Ok(self.value.clone()))
    }
}

/// See [`Parser::repeated`].
pub struct Repeated<P> {
    parser: P,
    n: usize,
}

impl<P> Repeated<P> {
    pub(super) fn new(parser: P, n: usize) -> Self {
        Self { parser, n }
    }
}

impl<P: Parser> Parser for Repeated<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        (0..self.n).map(|_| self.parser.parse(cursor)).collect()
    }
}

/// See [`Parser::until`].
///
/// The element parser is run at least once.
/// If an iteration consumes no input and the terminator still fails,
///   the terminator's failure is returned,
///     since no further progress could ever be made.
pub struct Until<P, T> {
    parser: P,
    term: T,
}

impl<P, T> Until<P, T> {
    pub(super) fn new(parser: P, term: T) -> Self {
        Self { parser, term }
    }
}

impl<P: Parser, T: Parser> Parser for Until<P, T> {
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        let mut values = Vec::new();

        loop {
            let start = cursor.position();

            values.push(self.parser.parse(cursor)?);

            match self.term.parse(cursor) {
                Ok(_) => return Ok(values),
                Err(e) if cursor.position() == start => return Err(e),
                Err(_) => continue,
            }
        }
    }
}

/// See [`Parser::label`].
pub struct Label<P> {
    parser: P,
    name: &'static str,
}

impl<P> Label<P> {
    pub(super) fn new(parser: P, name: &'static str) -> Self {
        Self { parser, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<P> Parser for Label<P>
where
    P: Parser,
    P::Output: Debug,
{
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
        let mut trace = DefaultTrace::default();
        trace.trace_begin(self.name, cursor.position());

        let result = self.parser.parse(cursor).map_err(|e| {
            e.with(ErrorMessage::Note(format!("while parsing {}", self.name)))
        });

        trace.trace_end(self.name, cursor.position(), &result);
        result
    }
}

/// See [`sequence`](super::sequence).
pub struct Sequence<T> {
    parsers: T,
}

impl<T> Sequence<T> {
    pub(super) fn new(parsers: T) -> Self {
        Self { parsers }
    }
}

impl<T: ParserTuple> Parser for Sequence<T> {
    type Output = T::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<T::Output> {
        self.parsers.parse_each(cursor)
    }
}
