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

//! Backtracking parser combinators over a [`Cursor`].
//!
//! A [`Parser`] consumes input from a [`Cursor`] and produces either a
//!   value
//!     (leaving the cursor just past the consumed input)
//!   or an [`Error`] anchored to the input that caused it.
//! Parsers hold no mutable state of their own;
//!   the cursor is the only thing that changes during a parse,
//!     and so a parser may be run any number of times.
//!
//! Larger parsers are built from smaller ones using the combinator
//!   methods of [`Parser`],
//!     starting from the [primitives](primitive).
//!
//! Backtracking
//! ============
//! Only [`Parser::attempt`] restores the cursor after a failure.
//! Every other combinator leaves the cursor wherever the failing parser
//!   left it,
//!     so alternatives should normally be wrapped:
//!
//! ```
//! use srcparse::{
//!     cursor::Cursor,
//!     parse::{primitive::literal, Parser},
//!     source::SourceFile,
//! };
//!
//! let file = SourceFile::new("in", "abd");
//!
//! // Without `attempt`,
//! //   the first alternative consumes "ab" before failing on "d",
//! //   and so the second alternative begins at "d".
//! let greedy = literal("abc").or(literal("abd"));
//! assert!(greedy.parse(&mut Cursor::new(&file)).is_err());
//!
//! let backtracking = literal("abc").attempt().or(literal("abd").attempt());
//! let mut cursor = Cursor::new(&file);
//! assert_eq!(Ok("abd".to_string()), backtracking.parse(&mut cursor));
//! assert_eq!(3, cursor.position());
//! ```
//!
//! Ownership
//! =========
//! Combinators take ownership of the parsers they compose,
//!   producing a single value that owns its entire grammar tree.
//! Grammars are built by ordinary functions when they are needed.
//! To share a sub-parser between multiple grammars,
//!   compose a reference to it
//!     ([`Parser`] is implemented for `&P`)
//!   or wrap it in an [`Rc`];
//!     [`Parser::boxed`] erases the type of a parser altogether.

pub mod combinator;
pub mod error;
pub mod primitive;
pub mod trace;

pub use error::{Error, ErrorMessage};

use crate::cursor::Cursor;
use combinator::*;
use std::{marker::PhantomData, rc::Rc};

/// Result of running a [`Parser`].
pub type ParseResult<T> = Result<T, Error>;

/// A type-erased [`Parser`].
pub type BoxedParser<'a, T> = Box<dyn Parser<Output = T> + 'a>;

/// Value of one of two alternatives of differing types.
///
/// See [`Parser::or_either`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<T> Either<T, T> {
    /// Yield the value of whichever alternative succeeded.
    pub fn into_inner(self) -> T {
        match self {
            Self::Left(x) | Self::Right(x) => x,
        }
    }
}

/// Consume input from a [`Cursor`],
///   producing a value or an [`Error`].
///
/// This trait is object safe;
///   combinator methods are available only on sized parsers.
/// See the [module-level documentation](self) for more information.
pub trait Parser {
    /// Value produced by a successful parse.
    type Output;

    /// Run the parser at the current position of `cursor`.
    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output>;

    /// Transform the value of a successful parse.
    ///
    /// Failure is passed through unchanged.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, f)
    }

    /// Run `self` and then `next` from where `self` left off,
    ///   discarding the value of `self`.
    ///
    /// If `self` fails,
    ///   `next` is not run and the cursor is not restored.
    fn then<P: Parser>(self, next: P) -> Then<Self, P>
    where
        Self: Sized,
    {
        Then::new(self, next)
    }

    /// Like [`Parser::then`],
    ///   but yielding the values of both parsers.
    fn then_also<P: Parser>(self, next: P) -> ThenAlso<Self, P>
    where
        Self: Sized,
    {
        ThenAlso::new(self, next)
    }

    /// Like [`Parser::then`],
    ///   but yielding the value of `self` rather than `next`.
    fn before<P: Parser>(self, next: P) -> Before<Self, P>
    where
        Self: Sized,
    {
        Before::new(self, next)
    }

    /// Run `other` if `self` fails,
    ///   from wherever `self` left the cursor.
    ///
    /// The result of `other` is returned verbatim.
    /// To backtrack before running `other`,
    ///   wrap `self` in [`Parser::attempt`].
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parser<Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Like [`Parser::or`],
    ///   but for alternatives of differing types.
    ///
    /// If both alternatives fail,
    ///   the failure of `other` is returned with the failure of `self`
    ///   nested within it
    ///     (see [`Error::merge_nested`]).
    fn or_either<P: Parser>(self, other: P) -> OrEither<Self, P>
    where
        Self: Sized,
    {
        OrEither::new(self, other)
    }

    /// Run `delim`,
    ///   then `self`,
    ///   then `delim` again,
    ///   yielding the value of `self`.
    fn between<D: Parser>(self, delim: D) -> Between<Self, D>
    where
        Self: Sized,
    {
        Between::new(self, delim)
    }

    /// Run `self` until it fails,
    ///   collecting each value.
    ///
    /// This never fails.
    /// See [`Many`] for the contract `self` must uphold.
    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        Many::new(self)
    }

    /// Like [`Parser::many`],
    ///   concatenating each value into a [`String`].
    fn many_string(self) -> ManyString<Self>
    where
        Self: Sized,
        Self::Output: StringFragment,
    {
        ManyString::new(self)
    }

    /// Restore the cursor to its original position if `self` fails.
    fn attempt(self) -> Attempt<Self>
    where
        Self: Sized,
    {
        Attempt::new(self)
    }

    /// Yield a clone of `value` in place of the value of `self`.
    fn then_return<V: Clone>(self, value: V) -> ThenReturn<Self, V>
    where
        Self: Sized,
    {
        ThenReturn::new(self, value)
    }

    /// Yield a clone of `value` if `self` fails.
    ///
    /// The cursor is not restored;
    ///   wrap `self` in [`Parser::attempt`] for that.
    fn or_return(self, value: Self::Output) -> OrReturn<Self>
    where
        Self: Sized,
        Self::Output: Clone,
    {
        OrReturn::new(self, value)
    }

    /// Run `self` exactly `n` times.
    fn repeated(self, n: usize) -> Repeated<Self>
    where
        Self: Sized,
    {
        Repeated::new(self, n)
    }

    /// Run `self` and then `term` until `term` succeeds,
    ///   collecting each value of `self`.
    fn until<P: Parser>(self, term: P) -> Until<Self, P>
    where
        Self: Sized,
    {
        Until::new(self, term)
    }

    /// Name this parser for diagnostics and [tracing](trace).
    ///
    /// Failures are annotated with a note naming the parser.
    fn label(self, name: &'static str) -> Label<Self>
    where
        Self: Sized,
    {
        Label::new(self, name)
    }

    /// Erase the type of this parser.
    fn boxed<'a>(self) -> BoxedParser<'a, Self::Output>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        (**self).parse(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        (**self).parse(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output> {
        (**self).parse(cursor)
    }
}

/// Parser defined by a closure.
///
/// See [`from_fn`].
pub struct FromFn<F, T> {
    f: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<F, T> Parser for FromFn<F, T>
where
    F: Fn(&mut Cursor<'_>) -> ParseResult<T>,
{
    type Output = T;

    fn parse(&self, cursor: &mut Cursor<'_>) -> ParseResult<T> {
        (self.f)(cursor)
    }
}

/// Lift a closure into a [`Parser`].
///
/// The closure is responsible for upholding the same contracts as any
///   other parser.
pub fn from_fn<F, T>(f: F) -> FromFn<F, T>
where
    F: Fn(&mut Cursor<'_>) -> ParseResult<T>,
{
    FromFn {
        f,
        _phantom: PhantomData,
    }
}

/// A tuple of [`Parser`]s to be run in order.
///
/// This is implemented for tuples of one through eight parsers;
///   see [`sequence`].
pub trait ParserTuple {
    /// Tuple of the outputs of each parser.
    type Output;

    /// Run each parser left-to-right,
    ///   stopping at the first failure.
    fn parse_each(&self, cursor: &mut Cursor<'_>) -> ParseResult<Self::Output>;
}

macro_rules! impl_parser_tuple {
    ($($P:ident $p:ident),+) => {
        impl<$($P: Parser),+> ParserTuple for ($($P,)+) {
            type Output = ($($P::Output,)+);

            fn parse_each(
                &self,
                cursor: &mut Cursor<'_>,
            ) -> ParseResult<Self::Output> {
                let ($($p,)+) = self;
                Ok(($($p.parse(cursor)?,)+))
            }
        }
    };
}

impl_parser_tuple!(A a);
impl_parser_tuple!(A a, B b);
impl_parser_tuple!(A a, B b, C c);
impl_parser_tuple!(A a, B b, C c, D d);
impl_parser_tuple!(A a, B b, C c, D d, E e);
impl_parser_tuple!(A a, B b, C c, D d, E e, F f);
impl_parser_tuple!(A a, B b, C c, D d, E e, F f, G g);
impl_parser_tuple!(A a, B b, C c, D d, E e, F f, G g, H h);

/// Run each parser of a tuple in order,
///   yielding a tuple of their values.
///
/// Parsers are run left-to-right,
///   each starting where the previous left the cursor.
/// The first failure is returned and the cursor is left where the failing
///   parser left it;
///     wrap the sequence in [`Parser::attempt`] to make it atomic.
pub fn sequence<T: ParserTuple>(parsers: T) -> Sequence<T> {
    Sequence::new(parsers)
}

/// Like [`sequence`],
///   but transforming the tuple of values using `mapper`.
pub fn map_n<T, F, U>(mapper: F, parsers: T) -> Map<Sequence<T>, F>
where
    T: ParserTuple,
    F: Fn(T::Output) -> U,
{
    sequence(parsers).map(mapper)
}

/// Free-function form of [`Parser::attempt`].
pub fn attempt<P: Parser>(parser: P) -> Attempt<P> {
    parser.attempt()
}

/// Free-function form of [`Parser::many`].
pub fn many<P: Parser>(parser: P) -> Many<P> {
    parser.many()
}
