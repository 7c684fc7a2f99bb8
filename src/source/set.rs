// Concatenated source inputs
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

//! Concatenation of [`SourceFile`]s into a single global position space.
//!
//! Each file added to a [`SourceSet`] is assigned the half-open range
//!   `[start, start + length)` immediately following the file before it:
//!
//! ```text
//!   "ab"    "cde"   "f"
//!   [0, 2)  [2, 5)  [5, 6)
//!    01      234     5
//! ```
//!
//! Since a position is a cursor _between_ bytes,
//!   a position on a boundary
//!     (like `2` above)
//!   belongs to the file that _follows_ it.
//! The position `6`,
//!   after all bytes,
//!   belongs to the last file.

use super::{LineCol, Source, SourceError, SourceFile};
use crate::{diagnose::resolver::ResolvedSpan, span::Span};
use fxhash::FxHashMap;
use std::{borrow::Cow, fmt::Display};

/// Identifier of a [`SourceFile`] within the [`SourceSet`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(usize);

impl FileId {
    /// 0-indexed insertion order of the file.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered concatenation of [`SourceFile`]s.
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,

    /// Global position of the first byte of each file in `files`.
    ///
    /// This is sorted since files are only ever appended.
    starts: Vec<usize>,

    /// Sum of the lengths of all files.
    len: usize,

    by_name: FxHashMap<String, FileId>,
}

impl SourceSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a file,
    ///   assigning it the range of global positions immediately following
    ///   the previously added file.
    ///
    /// If multiple files share a name,
    ///   [`SourceSet::find_file`] will yield the first.
    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        let id = FileId(self.files.len());

        self.by_name.entry(file.name().to_string()).or_insert(id);
        self.starts.push(self.len);
        self.len += file.length();
        self.files.push(file);

        id
    }

    /// Total number of bytes across all files.
    pub fn total_length(&self) -> usize {
        self.len
    }

    /// Files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i), f))
    }

    /// Look up a file by its display name.
    pub fn find_file(&self, name: &str) -> Option<FileId> {
        self.by_name.get(name).copied()
    }

    pub fn file(&self, id: FileId) -> Result<&SourceFile, SourceError> {
        self.files.get(id.0).ok_or(SourceError::UnknownFile(id))
    }

    /// Global position of the first byte of the file `id`.
    pub fn file_start(&self, id: FileId) -> Result<usize, SourceError> {
        self.starts
            .get(id.0)
            .copied()
            .ok_or(SourceError::UnknownFile(id))
    }

    /// Global range occupied by the file `id`.
    pub fn file_span(&self, id: FileId) -> Result<Span, SourceError> {
        let start = self.file_start(id)?;
        let file = self.file(id)?;

        Ok(Span::new(start, file.length()))
    }

    fn check_pos(&self, pos: usize) -> Result<(), SourceError> {
        match pos <= self.len {
            true => Ok(()),
            false => Err(SourceError::PositionOutOfRange {
                pos,
                len: self.len,
            }),
        }
    }

    /// Identifier of the file owning the global position `pos`.
    ///
    /// Positions on a boundary between files resolve to the following
    ///   file.
    pub fn file_id_for_position(
        &self,
        pos: usize,
    ) -> Result<FileId, SourceError> {
        self.check_pos(pos)?;

        // Last file starting at or before `pos`;
        //   this also skips over any empty files sharing that start.
        match self.starts.partition_point(|&start| start <= pos) {
            0 => Err(SourceError::PositionOutOfRange { pos, len: self.len }),
            n => Ok(FileId(n - 1)),
        }
    }

    /// File owning the global position `pos`.
    pub fn file_for_position(
        &self,
        pos: usize,
    ) -> Result<&SourceFile, SourceError> {
        self.file_id_for_position(pos).and_then(|id| self.file(id))
    }

    /// Translate a global position into a file and a position local to
    ///   that file.
    pub fn to_local(&self, pos: usize) -> Result<(FileId, usize), SourceError> {
        let id = self.file_id_for_position(pos)?;
        Ok((id, pos - self.starts[id.0]))
    }

    /// Like [`SourceSet::to_local`],
    ///   but treating `pos` as the _exclusive end_ of an interval.
    ///
    /// A position on a boundary between files is the end of the
    ///   _preceding_ file rather than the start of the next,
    ///     since an interval ending there contains no bytes of the latter.
    /// The position `0` has no preceding file and so is resolved normally.
    pub fn to_local_end(
        &self,
        pos: usize,
    ) -> Result<(FileId, usize), SourceError> {
        self.check_pos(pos)?;

        match self.starts.partition_point(|&start| start < pos) {
            0 => self.to_local(pos),
            n => Ok((FileId(n - 1), pos - self.starts[n - 1])),
        }
    }

    /// Translate a position local to the file `id` into a global position.
    pub fn to_global(
        &self,
        id: FileId,
        local: usize,
    ) -> Result<usize, SourceError> {
        let file = self.file(id)?;

        match local <= file.length() {
            true => Ok(self.starts[id.0] + local),
            false => Err(SourceError::OutOfRange {
                from: local,
                to: local,
                len: file.length(),
            }),
        }
    }

    /// Line and column of a global position within its owning file.
    pub fn position_to_line_col(
        &self,
        pos: usize,
    ) -> Result<(FileId, LineCol), SourceError> {
        let (id, local) = self.to_local(pos)?;
        let lc = self.files[id.0].position_to_line_col(local)?;

        Ok((id, lc))
    }

    /// Resolve a [`Span`] to file names,
    ///   lines,
    ///   columns,
    ///   and the text of the line containing its start.
    ///
    /// This is a convenience for
    ///   [`SpanResolver::resolve`](crate::diagnose::resolver::SpanResolver);
    ///   see that for more information.
    pub fn resolve(&self, span: Span) -> Result<ResolvedSpan, SourceError> {
        crate::diagnose::resolver::SpanResolver::resolve(self, span)
    }
}

impl Source for SourceSet {
    fn len(&self) -> usize {
        self.len
    }

    fn read_at(&self, pos: usize) -> Option<u8> {
        // `to_local` yields the file following any boundary,
        //   which is exactly the file holding the byte at `pos`.
        let (id, local) = self.to_local(pos).ok()?;
        self.files[id.0].read_at(local)
    }

    fn read_span(
        &self,
        from: usize,
        to: usize,
    ) -> Result<Cow<'_, [u8]>, SourceError> {
        if from > to || to > self.len {
            return Err(SourceError::OutOfRange {
                from,
                to,
                len: self.len,
            });
        }

        if from == to {
            return Ok(Cow::Borrowed(&[]));
        }

        let (first, local_from) = self.to_local(from)?;
        let (last, local_to) = self.to_local_end(to)?;

        // Most reads will not cross a file boundary and can be borrowed.
        if first == last {
            return self.files[first.0].read_span(local_from, local_to);
        }

        let mut buf = Vec::with_capacity(to - from);
        buf.extend_from_slice(&self.files[first.0].as_bytes()[local_from..]);

        for file in &self.files[first.0 + 1..last.0] {
            buf.extend_from_slice(file.as_bytes());
        }

        buf.extend_from_slice(&self.files[last.0].as_bytes()[..local_to]);

        Ok(Cow::Owned(buf))
    }
}

assert_impl_all!(SourceSet: Source, Send, Sync);
