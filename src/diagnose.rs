// Diagnostic system
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

//! Diagnostic system for error reporting.
//!
//! A [`Diagnostic`] describes an event using a series of
//!   [`AnnotatedSpan`]s;
//!     the first describes the primary location of the event and any
//!     others provide supplemental context.
//! A [`Reporter`] resolves those spans against the source
//!   (see [`resolver`])
//!   and renders a [`report`]:
//!
//! ```text
//! error: in.txt:1:1 - 1:4: expected `name`, found `nam:`
//! 1 | nam: value
//!     ^^^
//! ```

pub mod report;
pub mod resolver;

pub use report::{Report, Reporter, VisualReporter};
pub use resolver::{ResolvedSpan, SpanResolver};

use crate::span::Span;
use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display},
};

/// Diagnostic report.
///
/// This describes an error condition or other special event using a series
///   of [`Span`]s to describe the source, cause, and circumstances around
///   an event.
pub trait Diagnostic: Error + Sized {
    /// Produce a series of [`AnnotatedSpan`]s describing the source and
    ///   circumstances of the diagnostic event.
    ///
    /// The first span is the primary location of the event.
    fn describe(&self) -> Vec<AnnotatedSpan<'_>>;
}

/// Diagnostic severity level.
///
/// Levels are used both for entire reports and for styling of individual
///   [`AnnotatedSpan`]s.
///
/// Lower levels are more severe
///   (e.g. level 1 is the worst).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[repr(u8)]
pub enum Level {
    /// A user-resolvable error.
    ///
    /// These represent errors resulting from the user's input.
    #[default]
    Error = 1,

    /// Useful information that supplements other messages.
    ///
    /// This is most often used when multiple spans are in play for a given
    ///   diagnostic report.
    Note,

    /// Additional advice to the user that may help in debugging or fixing a
    ///   problem.
    Help,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// A label associated with a report or [`Span`].
///
/// See [`AnnotatedSpan`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Label<'a>(Cow<'a, str>);

impl<'a> Display for Label<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'a> From<String> for Label<'a> {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl<'a> From<&'a str> for Label<'a> {
    fn from(s: &'a str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

/// A span with an associated severity level and optional label.
///
/// Annotated spans are intended to guide users through debugging a
///   diagnostic message by describing important source locations that
///   contribute to a given diagnostic event.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AnnotatedSpan<'l>(Span, Level, Option<Label<'l>>);

impl<'l> AnnotatedSpan<'l> {
    pub fn span(&self) -> Span {
        self.0
    }

    pub fn level(&self) -> Level {
        self.1
    }

    pub fn label(&self) -> Option<&Label<'l>> {
        self.2.as_ref()
    }

    /// Follow this span with a help label on the same span.
    pub fn with_help<L: Into<Label<'l>>>(
        self,
        label: L,
    ) -> [AnnotatedSpan<'l>; 2] {
        let span = self.0;
        [self, span.help(label)]
    }
}

impl<'l> From<AnnotatedSpan<'l>> for Vec<AnnotatedSpan<'l>> {
    fn from(x: AnnotatedSpan<'l>) -> Self {
        vec![x]
    }
}

pub trait Annotate: Sized {
    /// Annotate a [`Span`] with a severity [`Level`] and an optional
    ///   [`Label`] to display alongside of it.
    ///
    /// You may wish to use one of the more specific methods that provide a
    ///   more pleasant interface.
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedSpan;

    /// Annotate a span with a clarifying label styled as an error.
    ///
    /// This label is intended to augment the error message to help guide
    ///   the user to a resolution.
    ///
    /// (This is not named `err` since it does not return an [`Err`].)
    fn error<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Error, Some(label.into()))
    }

    /// Like [`Annotate::error`],
    ///   but only styles the span as a [`Level::Error`] without attaching a
    ///   label.
    ///
    /// This may be appropriate when a label would provide no more useful
    ///   information and would simply repeat the generic error text.
    fn mark_error(self) -> AnnotatedSpan<'static> {
        self.annotate(Level::Error, None)
    }

    /// Supplemental annotated span providing additional context for another
    ///   span.
    ///
    /// For example,
    ///   if two alternatives were attempted at different locations,
    ///   a note span may indicate where the path not taken failed.
    fn note<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Note, Some(label.into()))
    }

    /// Provide additional information that may be used to help the user in
    ///   debugging or fixing a diagnostic.
    fn help<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Help, Some(label.into()))
    }
}

impl<S: Into<Span>> Annotate for S {
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedSpan {
        AnnotatedSpan(self.into(), level, label)
    }
}

/// A free-form message highlighting a span of input.
///
/// This allows application logic
///   (rather than a [`Parser`](crate::parse::Parser))
///   to produce diagnostics against the same source,
///     for example after a successful parse yields a semantically invalid
///     value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub message: String,
    pub span: Span,
}

impl DiagnosticMessage {
    pub fn new<M: Into<String>, S: Into<Span>>(message: M, span: S) -> Self {
        Self {
            message: message.into(),
            span: span.into(),
        }
    }
}

impl Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for DiagnosticMessage {}

impl Diagnostic for DiagnosticMessage {
    fn describe(&self) -> Vec<AnnotatedSpan<'_>> {
        self.span.mark_error().into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(Level::Error < Level::Note);
        assert!(Level::Note < Level::Help);
        assert_eq!(Level::Error, Level::default());
    }

    #[test]
    fn annotate_span() {
        let span = Span::new(3, 4);

        assert_eq!(
            AnnotatedSpan(span, Level::Note, Some("n".into())),
            span.note("n")
        );
        assert_eq!(AnnotatedSpan(span, Level::Error, None), span.mark_error());
        assert_eq!(
            [span.error("e"), span.help("h")],
            span.error("e").with_help("h"),
        );

        // Ranges convert into spans.
        assert_eq!(span.mark_error(), (3..7).mark_error());
    }

    #[test]
    fn diagnostic_message_marks_span() {
        let sut = DiagnosticMessage::new("bad value", 2..5);

        assert_eq!("bad value", sut.to_string());
        assert_eq!(vec![Span::new(2, 3).mark_error()], sut.describe());
    }
}
