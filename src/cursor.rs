// Read head over source input
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

//! A movable read head over a [`Source`].
//!
//! The [`Cursor`] is the only mutable state touched by the
//!   [parser combinators](crate::parse).
//! Its position is always within `0..=len`,
//!   where `len` is the length of the underlying [`Source`];
//!     reading at `len` yields [`None`] to indicate end of input.
//!
//! ```
//! use srcparse::{cursor::Cursor, source::SourceFile};
//!
//! let file = SourceFile::new("foo", "abc");
//! let mut cursor = Cursor::new(&file);
//!
//! assert_eq!(Some(b'a'), cursor.current());
//! assert_eq!(Some(b'b'), cursor.advance());
//! assert_eq!(b"bc", &*cursor.read(2));
//! assert_eq!(3, cursor.position());
//! assert_eq!(None, cursor.current());
//! ```

use crate::{source::Source, span::Span};
use std::borrow::Cow;

/// Read head over a [`Source`].
///
/// See the [module-level documentation](self) for more information.
#[derive(Clone, Copy)]
pub struct Cursor<'s> {
    src: &'s dyn Source,
    pos: usize,
}

impl<'s> Cursor<'s> {
    /// Create a cursor positioned at the beginning of `src`.
    pub fn new<S: Source>(src: &'s S) -> Self {
        Self { src, pos: 0 }
    }

    /// The [`Source`] being read.
    pub fn source(&self) -> &'s dyn Source {
        self.src
    }

    /// Current global position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the underlying [`Source`].
    pub fn len(&self) -> usize {
        self.src.len()
    }

    /// Whether the underlying [`Source`] is empty.
    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    /// Whether the cursor is positioned after the last byte.
    pub fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Number of bytes between the cursor and the end of input.
    pub fn remaining(&self) -> usize {
        self.src.len().saturating_sub(self.pos)
    }

    /// Byte at the current position.
    pub fn current(&self) -> Option<u8> {
        self.src.read_at(self.pos)
    }

    /// Move forward one byte and then read.
    ///
    /// The cursor will not move beyond the end of input.
    pub fn advance(&mut self) -> Option<u8> {
        self.skip(1);
        self.current()
    }

    /// Move back one byte and then read.
    ///
    /// Retreating from position `0` is an error in the calling parser;
    ///   the cursor remains at `0`.
    pub fn retreat(&mut self) -> Option<u8> {
        debug_assert!(self.pos > 0, "Cursor::retreat past start of input");

        self.pos = self.pos.saturating_sub(1);
        self.current()
    }

    /// Read the byte `n` positions ahead without moving.
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.src.read_at(self.pos.checked_add(n)?)
    }

    /// Read the byte `n` positions behind without moving.
    pub fn peek_behind(&self, n: usize) -> Option<u8> {
        self.src.read_at(self.pos.checked_sub(n)?)
    }

    /// Jump to the absolute position `pos`.
    ///
    /// Positions beyond the end of input are clamped to the end.
    pub fn seek_to(&mut self, pos: usize) {
        self.pos = pos.min(self.src.len());
    }

    /// Jump relative to the current position.
    ///
    /// The result is clamped to `0..=len`.
    pub fn skip(&mut self, n: isize) {
        let pos = match n.is_negative() {
            true => self.pos.saturating_sub(n.unsigned_abs()),
            false => self.pos.saturating_add(n.unsigned_abs()),
        };

        self.seek_to(pos);
    }

    /// Read up to the next `n` bytes and advance past them.
    ///
    /// Fewer than `n` bytes are returned only if end of input is reached,
    ///   in which case the cursor is left at the end.
    pub fn read(&mut self, n: usize) -> Cow<'s, [u8]> {
        let from = self.pos;
        let to = from.saturating_add(n).min(self.src.len());

        self.pos = to;

        // The range is always within bounds.
        self.src.read_span(from, to).unwrap_or(Cow::Borrowed(&[]))
    }

    /// Read bytes while `pred` holds,
    ///   stopping at the first byte that does not satisfy it or at end of
    ///   input.
    ///
    /// The stopping byte is not consumed.
    pub fn read_while<F: FnMut(u8) -> bool>(
        &mut self,
        mut pred: F,
    ) -> Cow<'s, [u8]> {
        let from = self.pos;

        while let Some(byte) = self.current() {
            if !pred(byte) {
                break;
            }

            self.pos += 1;
        }

        self.src
            .read_span(from, self.pos)
            .unwrap_or(Cow::Borrowed(&[]))
    }

    /// A [`Span`] from `start` up to the current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span::at(start).merge(Span::at(self.pos))
    }
}

impl<'s> std::fmt::Debug for Cursor<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.src.len())
            .finish()
    }
}
