// Single source input
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

//! A single physical source input.

use super::{LineCol, Source, SourceError};
use memchr::memchr_iter;
use std::{borrow::Cow, fs, path::Path};

/// The bytes of one physical input along with a display name.
///
/// Positions used by the methods of this type are _local_ to the file;
///   see [`SourceSet`](super::SourceSet) for translation of global
///   positions.
///
/// The offset of every `b'\n'` is indexed once upon construction so that
///   line and column lookups are a binary search rather than a scan from
///   the beginning of the file.
/// The index is never invalidated since the contents of a file never
///   change after construction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,

    /// Sorted offsets of each `b'\n'` within `bytes`.
    newlines: Vec<usize>,
}

impl SourceFile {
    /// Create a file from in-memory bytes and a display name.
    pub fn new<N, B>(name: N, bytes: B) -> Self
    where
        N: Into<String>,
        B: Into<Vec<u8>>,
    {
        let bytes = bytes.into();
        let newlines = memchr_iter(b'\n', &bytes).collect();

        Self {
            name: name.into(),
            bytes,
            newlines,
        }
    }

    /// Read the file at `path` in its entirety,
    ///   using the path itself as the display name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();

        fs::read(path)
            .map(|bytes| Self::new(path.display().to_string(), bytes))
            .map_err(|e| SourceError::io(e, path))
    }

    /// Like [`SourceFile::open`],
    ///   but with a display name other than the path.
    pub fn open_named<P, N>(path: P, name: N) -> Result<Self, SourceError>
    where
        P: AsRef<Path>,
        N: Into<String>,
    {
        let path = path.as_ref();

        fs::read(path)
            .map(|bytes| Self::new(name, bytes))
            .map_err(|e| SourceError::io(e, path))
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bytes in the file.
    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    /// The entire contents of the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of lines in the file.
    ///
    /// A file always has at least one line,
    ///   even if it is empty;
    ///     a trailing newline begins a final empty line.
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    fn check_pos(&self, pos: usize) -> Result<(), SourceError> {
        match pos <= self.length() {
            true => Ok(()),
            false => Err(SourceError::OutOfRange {
                from: pos,
                to: pos,
                len: self.length(),
            }),
        }
    }

    /// Index into `newlines` of the first newline at or after `pos`,
    ///   which is also the 0-indexed line number containing `pos`.
    fn line_index(&self, pos: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < pos)
    }

    /// Local byte range `[start, end)` of the 0-indexed line `index`,
    ///   excluding its terminating newline.
    fn line_range(&self, index: usize) -> (usize, usize) {
        let start = match index {
            0 => 0,
            _ => self.newlines[index - 1] + 1,
        };

        let end = self
            .newlines
            .get(index)
            .copied()
            .unwrap_or_else(|| self.length());

        (start, end)
    }

    /// Translate a local position into a 1-indexed line and byte column.
    ///
    /// The line is one more than the number of newlines strictly before
    ///   `pos`,
    ///     and the column is one more than the number of bytes between the
    ///     start of that line and `pos`.
    /// The position `pos == length` is valid and refers to the position
    ///   after the final byte.
    pub fn position_to_line_col(
        &self,
        pos: usize,
    ) -> Result<LineCol, SourceError> {
        self.check_pos(pos)?;

        let index = self.line_index(pos);
        let (start, _) = self.line_range(index);

        Ok(LineCol::new(index + 1, pos - start + 1))
    }

    /// Translate a 1-indexed line and byte column into a local position.
    ///
    /// This is the inverse of [`SourceFile::position_to_line_col`].
    /// A column may address the line's terminating newline
    ///   (or the end of the file on the last line),
    ///   but nothing beyond it.
    pub fn line_col_to_position(
        &self,
        line: usize,
        col: usize,
    ) -> Result<usize, SourceError> {
        let invalid = || SourceError::InvalidLocation { line, col };

        if line == 0 || col == 0 || line > self.line_count() {
            return Err(invalid());
        }

        let (start, end) = self.line_range(line - 1);
        let pos = start + (col - 1);

        match pos <= end {
            true => Ok(pos),
            false => Err(invalid()),
        }
    }

    /// Local byte range `(line_start, line_end)` of the full line
    ///   containing `pos`,
    ///     excluding the terminating newline.
    ///
    /// If `pos` is the position of a newline,
    ///   the line is the one terminated by that newline.
    pub fn line_bounds_for_position(
        &self,
        pos: usize,
    ) -> Result<(usize, usize), SourceError> {
        self.check_pos(pos)?;

        Ok(self.line_range(self.line_index(pos)))
    }

    /// Text of the 1-indexed line `line`,
    ///   excluding its terminating newline.
    pub fn line_text(&self, line: usize) -> Result<&[u8], SourceError> {
        if line == 0 || line > self.line_count() {
            return Err(SourceError::InvalidLocation { line, col: 1 });
        }

        let (start, end) = self.line_range(line - 1);
        Ok(&self.bytes[start..end])
    }
}

impl Source for SourceFile {
    fn len(&self) -> usize {
        self.length()
    }

    fn read_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    fn read_span(
        &self,
        from: usize,
        to: usize,
    ) -> Result<Cow<'_, [u8]>, SourceError> {
        match self.bytes.get(from..to) {
            Some(bytes) if from <= to => Ok(Cow::Borrowed(bytes)),
            _ => Err(SourceError::OutOfRange {
                from,
                to,
                len: self.length(),
            }),
        }
    }
}
