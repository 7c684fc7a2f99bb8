// Diagnostic span resolver
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

//! Resolve [`Span`]s into file:line:column source locations.

use crate::{
    source::{LineCol, SourceError, SourceFile, SourceSet},
    span::Span,
};
use unicode_width::UnicodeWidthChar;

/// Resolves [`Span`]s into file:line:column source locations.
///
/// A [`Span`] contains only raw byte positions gathered during parsing.
/// This is not resolved during parsing because this information is only
///   useful in a diagnostic context,
///     which is not the typical happy path of a parser;
///       most spans are discarded without ever being looked at by a
///       human.
///
/// The start and end of a span are resolved independently,
///   since they may lie in different files of a [`SourceSet`].
/// The end of a non-empty span is exclusive,
///   and so an end that lands on the boundary between two files is
///   resolved against the end of the _preceding_ file,
///     which is the file that actually contains the last byte of the span.
pub trait SpanResolver {
    /// Resolve the provided [`Span`] into source locations.
    ///
    /// See [`SpanResolver`] for more information.
    fn resolve(&self, span: Span) -> Result<ResolvedSpan<'_>, SourceError>;
}

impl<R: SpanResolver + ?Sized> SpanResolver for &R {
    fn resolve(&self, span: Span) -> Result<ResolvedSpan<'_>, SourceError> {
        (**self).resolve(span)
    }
}

impl SpanResolver for SourceSet {
    fn resolve(&self, span: Span) -> Result<ResolvedSpan<'_>, SourceError> {
        let (start_id, start) = self.to_local(span.start())?;

        let (end_id, end) = match span.is_empty() {
            true => (start_id, start),
            false => self.to_local_end(span.end())?,
        };

        let start_file = self.file(start_id)?;
        let end_file = self.file(end_id)?;

        ResolvedSpan::new(
            span,
            (start_file, start),
            (end_id != start_id).then_some(end_file),
            (end_file, end),
        )
    }
}

/// Positions of the span are local to the file.
impl SpanResolver for SourceFile {
    fn resolve(&self, span: Span) -> Result<ResolvedSpan<'_>, SourceError> {
        ResolvedSpan::new(span, (self, span.start()), None, (self, span.end()))
    }
}

/// A [`Span`] resolved to its source location.
///
/// [`Span`] itself is a small value that has no cost to copy or pass
///   around,
///     but the raw byte positions it stores are not useful for human
///     consumption.
/// This represents the useful information a human would want to know
///   about a [`Span`].
/// Lines and columns are 1-indexed,
///   and columns are counted in bytes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ResolvedSpan<'s> {
    /// The original [`Span`] whose resolution was requested.
    pub span: Span,

    /// Name of the file containing the start of the span.
    pub filename: &'s str,

    pub start_line: usize,
    pub start_col: usize,

    /// Name of the file containing the end of the span,
    ///   if different from [`Self::filename`].
    pub end_filename: Option<&'s str>,

    pub end_line: usize,
    pub end_col: usize,

    /// Text of the line containing the start of the span,
    ///   excluding its terminating newline.
    pub line_text: &'s [u8],
}

impl<'s> ResolvedSpan<'s> {
    fn new(
        span: Span,
        (start_file, start): (&'s SourceFile, usize),
        end_filename: Option<&'s SourceFile>,
        (end_file, end): (&'s SourceFile, usize),
    ) -> Result<Self, SourceError> {
        let start_lc = start_file.position_to_line_col(start)?;
        let end_lc = end_file.position_to_line_col(end)?;
        let (line_start, line_end) =
            start_file.line_bounds_for_position(start)?;

        Ok(Self {
            span,
            filename: start_file.name(),
            start_line: start_lc.line,
            start_col: start_lc.col,
            end_filename: end_filename.map(SourceFile::name),
            end_line: end_lc.line,
            end_col: end_lc.col,
            line_text: &start_file.as_bytes()[line_start..line_end],
        })
    }

    pub fn start(&self) -> LineCol {
        LineCol::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> LineCol {
        LineCol::new(self.end_line, self.end_col)
    }

    /// Whether the span continues beyond the line on which it starts.
    pub fn is_multiline(&self) -> bool {
        self.end_filename.is_some() || self.end_line != self.start_line
    }

    /// Display widths of the text preceding the span on its first line
    ///   and of the portion of the span on that line,
    ///     for use in underlining the span.
    ///
    /// A span continuing past its first line is underlined to the end of
    ///   that line.
    /// Widths are measured on the text as it is displayed:
    ///   byte sequences that are not valid UTF-8 each occupy the single
    ///   column of the replacement character that stands in for them.
    /// The underline is always at least one column wide so that
    ///   zero-length spans remain visible.
    pub fn underline(&self) -> (usize, usize) {
        let len = self.line_text.len();
        let from = self.start_col.saturating_sub(1).min(len);

        let to = match self.is_multiline() {
            true => len,
            false => self.end_col.saturating_sub(1).clamp(from, len),
        };

        let pad = display_width(&self.line_text[..from]);
        let width = display_width(&self.line_text[from..to]);

        (pad, width.max(1))
    }
}

/// Display width of `bytes` once decoded with
///   [`String::from_utf8_lossy`],
///     counting characters without a defined width
///       (control characters)
///     as a single column.
fn display_width(bytes: &[u8]) -> usize {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| c.width().unwrap_or(1))
        .sum()
}

#[cfg(test)]
mod test;
