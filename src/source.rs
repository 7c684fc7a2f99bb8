// Addressable source inputs
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

//! Addressable source inputs.
//!
//! Input is modeled in two layers:
//!
//!   - [`SourceFile`] owns the bytes of a single physical input and is able
//!       to translate positions local to itself into line and column
//!       numbers; and
//!   - [`SourceSet`] concatenates any number of [`SourceFile`]s into a
//!       single gapless space of _global_ positions.
//!
//! Parsers operate on the [`Source`] trait,
//!   which both implement,
//!   via a [`Cursor`](crate::cursor::Cursor).
//! Neither is ever modified once parsing begins.
//!
//! Errors produced by this module are [`SourceError`]s,
//!   which represent programming or configuration errors
//!     (e.g. asking for a byte range that does not exist)
//!   and are therefore distinct from grammar failures
//!     (see [`crate::parse::Error`]).

mod file;
mod set;

pub use file::SourceFile;
pub use set::{FileId, SourceSet};

use std::{borrow::Cow, error::Error, fmt::Display, io, path::Path};

/// Randomly addressable source bytes.
///
/// This trait is object safe so that a [`Cursor`](crate::cursor::Cursor)
///   may read from any source without being generic over it.
pub trait Source {
    /// Total number of bytes addressable by this source.
    fn len(&self) -> usize;

    /// Whether there are no addressable bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at the given position,
    ///   or [`None`] if the position is at or beyond the end of input.
    fn read_at(&self, pos: usize) -> Option<u8>;

    /// Bytes within the half-open range `[from, to)`.
    ///
    /// Fails with [`SourceError::OutOfRange`] if `to` exceeds
    ///   [`Source::len`] or `from > to`.
    fn read_span(&self, from: usize, to: usize)
        -> Result<Cow<'_, [u8]>, SourceError>;
}

assert_obj_safe!(Source);

/// A 1-indexed line and column.
///
/// Lines are counted by `b'\n'` occurrences and columns are counted in
///   bytes from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

impl LineCol {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Failure to address a [`Source`].
///
/// These errors are distinct from grammar failures:
///   a grammar failure is an expected outcome of user input,
///   whereas these indicate a request that could never be satisfied by
///     the source it was made against.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SourceError {
    /// A byte range was requested that is not within the source.
    OutOfRange { from: usize, to: usize, len: usize },

    /// A position lies beyond the end of all sources in a
    ///   [`SourceSet`].
    PositionOutOfRange { pos: usize, len: usize },

    /// A line and column that do not exist within a [`SourceFile`].
    InvalidLocation { line: usize, col: usize },

    /// A [`FileId`] that was not issued by the [`SourceSet`] being
    ///   queried.
    UnknownFile(FileId),

    /// A source file could not be read.
    ///
    /// The string is the path that was requested.
    Io(io::ErrorKind, String),
}

impl SourceError {
    pub(crate) fn io<P: AsRef<Path>>(e: io::Error, path: P) -> Self {
        Self::Io(e.kind(), path.as_ref().display().to_string())
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { from, to, len } => write!(
                f,
                "byte range [{from}, {to}) is not within source \
                   of {len} bytes"
            ),
            Self::PositionOutOfRange { pos, len } => write!(
                f,
                "position {pos} exceeds source set size of {len} bytes"
            ),
            Self::InvalidLocation { line, col } => {
                write!(f, "location {line}:{col} does not exist in source")
            }
            Self::UnknownFile(id) => {
                write!(f, "file {id} does not belong to this source set")
            }
            Self::Io(kind, path) => write!(f, "{path}: {kind}"),
        }
    }
}

impl Error for SourceError {}
