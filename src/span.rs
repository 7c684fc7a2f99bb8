// Source byte intervals
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

//! Mapping to source input byte intervals.
//!
//! A [`Span`] is a half-open interval `[start, end)` of _global_ byte
//!   positions,
//!     as assigned by a [`SourceSet`](crate::source::SourceSet).
//! Unlike a location such as `file:line:col`,
//!   a span does not itself know what file it references;
//!     that is determined only when the span is resolved for a diagnostic
//!     (see [`crate::diagnose`]),
//!       which permits a span to cross file boundaries.
//!
//! A position is best thought of as a bar cursor _between_ two bytes:
//!   position `0` is before the first byte and position `len` is after the
//!   last.
//!
//! ```
//! use srcparse::span::Span;
//!
//! // From raw parts
//! let span = Span::new(2, 6);
//!
//! assert_eq!(2, span.offset());
//! assert_eq!(6, span.len());
//! assert_eq!(8, span.end());
//!
//! // From endpoints
//! let spani = Span::from_endpoints(10, 25);
//! assert_eq!(10, spani.offset());
//! assert_eq!(15, spani.len());
//!
//! // Freely copyable
//! let cp = span;
//! assert_eq!(cp, span);
//! ```
//!
//! Spans are ordered first by their offset and then by their length,
//!   so sorting a collection of spans places them in source order.

use std::fmt::Display;

/// Half-open interval of global byte positions.
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Starting 0-indexed byte position, inclusive.
    offset: usize,

    /// Length of the interval in bytes.
    len: usize,
}

assert_eq_size!(Span, (usize, usize));

impl Span {
    /// Create a new span from its constituent parts.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// A zero-length span positioned before the byte at `offset`.
    pub const fn at(offset: usize) -> Self {
        Self { offset, len: 0 }
    }

    /// Create a span from its two endpoints.
    ///
    /// If `end` precedes `start`,
    ///   the endpoints are swapped so that `start <= end` always holds.
    pub fn from_endpoints(start: usize, end: usize) -> Self {
        let (start, end) = (start.min(end), start.max(end));

        Self {
            offset: start,
            len: end - start,
        }
    }

    /// Byte position of the beginning of the span, inclusive.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Alias of [`Span::offset`] reading naturally alongside
    ///   [`Span::end`].
    pub const fn start(&self) -> usize {
        self.offset
    }

    /// Byte position of the end of the span, exclusive.
    ///
    /// This saturates rather than overflowing.
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// Length of the span in bytes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the span has zero length.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Create a new span that is a slice of this one.
    ///
    /// The slice is clamped so that it never extends beyond the bounds of
    ///   `self`.
    pub fn slice(self, rel_offset: usize, len: usize) -> Self {
        let offset = self.offset.saturating_add(rel_offset).min(self.end());
        let end = offset.saturating_add(len).min(self.end());

        Self::from_endpoints(offset, end)
    }

    /// Merge two spans into a single span covering both,
    ///   including any gap between them.
    ///
    /// ```
    /// # use srcparse::span::Span;
    /// let a = Span::new(2, 3);
    /// let b = Span::new(10, 2);
    ///
    /// assert_eq!(a.merge(b), Span::from_endpoints(2, 12));
    /// assert_eq!(b.merge(a), Span::from_endpoints(2, 12));
    /// ```
    pub fn merge<S: Into<Span>>(self, other: S) -> Span {
        let other = other.into();

        Self::from_endpoints(
            self.offset.min(other.offset),
            self.end().max(other.end()),
        )
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::from_endpoints(range.start, range.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.offset()..span.end()
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn retrieve_span_components() {
        let span = Span::new(5, 3);

        assert_eq!(5, span.offset());
        assert_eq!(5, span.start());
        assert_eq!(8, span.end());
        assert_eq!(3, span.len());
        assert!(!span.is_empty());
        assert!(Span::at(5).is_empty());
    }

    #[test]
    fn endpoints_are_normalized() {
        assert_eq!(Span::from_endpoints(7, 3), Span::new(3, 4));
        assert_eq!(Span::from_endpoints(3, 3), Span::at(3));
    }

    #[test]
    fn spans_order_by_start_then_len() {
        //  [....,....,....]
        //     [A--]
        //     [B----]
        //       [C]
        let a = Span::new(3, 3);
        let b = Span::new(3, 5);
        let c = Span::new(5, 1);

        let mut spans = vec![c, b, a];
        spans.sort();

        assert_eq!(spans, vec![a, b, c]);
    }

    #[test]
    fn span_slice_yields_slice_within_original() {
        let span = Span::new(10, 10);

        assert_eq!(span.slice(2, 3), Span::new(12, 3));
        assert_eq!(span.slice(5, 100), Span::new(15, 5));
        assert_eq!(span.slice(50, 1), Span::at(20));
    }

    #[test]
    fn span_merge_overlap_within() {
        let outer = Span::new(2, 10);
        let inner = Span::new(4, 2);

        assert_eq!(outer.merge(inner), outer);
        assert_eq!(inner.merge(outer), outer);
    }

    #[test]
    fn span_range_conversion() {
        assert_eq!(Span::from(3..9), Span::new(3, 6));
        assert_eq!(std::ops::Range::from(Span::new(3, 6)), 3..9);
    }

    #[test]
    fn span_display() {
        assert_eq!("[4, 7)", Span::new(4, 3).to_string());
    }
}
