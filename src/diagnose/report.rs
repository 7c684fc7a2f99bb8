// Diagnostic reports
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

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::{
    resolver::{ResolvedSpan, SpanResolver},
    AnnotatedSpan, Diagnostic, Label, Level,
};
use crate::{
    source::{LineCol, SourceError},
    span::Span,
};
use std::fmt::{self, Display};

pub trait Reporter {
    /// Render diagnostic report.
    ///
    /// The provided [`Report`] implements [`Display`].
    ///
    /// Please be mindful of where this report is being rendered to
    ///   (via [`Display`]).
    /// For example,
    ///   if rendering to standard out,
    ///   it is a good idea to buffer the entire report before flushing to
    ///     stdout,
    ///       otherwise the report may become interleaved with other
    ///       concurrent processes.
    ///
    /// This method _does not return [`Result`]_ and should never fail.
    /// The report absorbs errors during span resolution and renders those
    ///   errors to the report itself,
    ///     ensuring both that the user is made aware of the problem
    ///     and that we're not inadvertently suppressing the actual
    ///       diagnostic messages that were requested.
    fn render<'d, D: Diagnostic>(&mut self, diagnostic: &'d D)
        -> Report<'d, D>;
}

/// Render diagnostic report in a highly visual way.
///
/// Each span is rendered with its location,
///   the line of source on which it begins,
///   and an underline beneath the spanned portion of that line:
///
/// ```text
/// error: in.txt:1:1 - 1:4: expected `name`, found `nam:`
/// 1 | nam: value
///     ^^^
/// ```
pub struct VisualReporter<R: SpanResolver> {
    resolver: R,
}

impl<R: SpanResolver> VisualReporter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: SpanResolver> Reporter for VisualReporter<R> {
    fn render<'d, D: Diagnostic>(
        &mut self,
        diagnostic: &'d D,
    ) -> Report<'d, D> {
        let mspans = diagnostic
            .describe()
            .into_iter()
            .map(|AnnotatedSpan(span, level, olabel)| {
                let slabel = olabel.map(|label| SpanLabel(level, label));

                match self.resolver.resolve(span) {
                    Ok(rspan) => {
                        MaybeResolvedSpan::Resolved(rspan, level, slabel)
                    }
                    Err(e) => {
                        MaybeResolvedSpan::Unresolved(span, level, slabel, e)
                    }
                }
            })
            .map(Section::from)
            .collect::<Vec<_>>();

        let mut report = Report::empty(Message(diagnostic));
        report.extend(mspans);
        report
    }
}

/// A rendered diagnostic.
///
/// The first section describes the primary span of the diagnostic and is
///   headed by the diagnostic message itself;
///     all others are headed by their own label.
#[derive(Debug)]
pub struct Report<'d, D: Diagnostic> {
    msg: Message<'d, D>,
    secs: Vec<Section<'d>>,
    level: Option<Level>,
}

impl<'d, D: Diagnostic> Report<'d, D> {
    fn empty(msg: Message<'d, D>) -> Self {
        Self {
            msg,
            secs: Vec::new(),
            level: None,
        }
    }

    /// Most severe level of all sections of the report.
    ///
    /// A report without sections is an error.
    pub fn level(&self) -> Level {
        self.level.unwrap_or_default()
    }
}

impl<'d, D: Diagnostic> Extend<Section<'d>> for Report<'d, D> {
    fn extend<T: IntoIterator<Item = Section<'d>>>(&mut self, secs: T) {
        for sec in secs {
            self.level = Some(match self.level {
                Some(level) => level.min(sec.level()),
                None => sec.level(),
            });

            // Add the section if it cannot be squashed into the previous.
            let remain = sec.maybe_squash_into(self.secs.last_mut());
            self.secs.extend(remain);
        }
    }
}

impl<'d, D: Diagnostic> Display for Report<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut secs = self.secs.iter();

        match secs.next() {
            Some(primary) => primary.render(f, Some(&self.msg))?,

            // A diagnostic that describes no spans still has a message.
            None => write!(
                f,
                "{level}: {msg}\n",
                level = self.level(),
                msg = self.msg,
            )?,
        }

        secs.try_for_each(|sec| sec.render(f, None))
    }
}

#[derive(Debug)]
struct Message<'d, D: Diagnostic>(&'d D);

impl<'d, D: Diagnostic> Display for Message<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self.0, f)
    }
}

/// A section of a [`Report`] describing a [`Span`].
///
/// Adjacent sections describing the same [`Span`] are squashed
///   (see [`Section::maybe_squash_into`]),
///   but not non-adjacent ones,
///     since reports ought to be able to produce narratives that may
///       revisit previous spans in an attempt to describe what occurred.
#[derive(Debug, PartialEq, Eq)]
struct Section<'d> {
    level: Level,
    span: Span,
    location: Location,
    excerpt: Option<Excerpt>,
    labels: Vec<SpanLabel<'d>>,

    /// Labels produced by the diagnostic system itself describing
    ///   problems rendering this section.
    system_labels: Vec<SpanLabel<'static>>,
}

impl<'d> Section<'d> {
    fn level(&self) -> Level {
        self.level
    }

    /// Squash self into the provided [`Section`] if they represent the same
    ///   [`Span`],
    ///     otherwise do nothing.
    ///
    /// If squashed,
    ///   [`None`] is returned.
    /// Otherwise [`Some`] is returned with `self`.
    /// This return value can be used with [`Extend`] to extend a vector of
    ///   sections with the value after this operation.
    ///
    /// The term "squash" is borrowed from `git rebase`.
    fn maybe_squash_into(
        self,
        extend: Option<&mut Section<'d>>,
    ) -> Option<Self> {
        match extend {
            Some(extend_sec) if self.span == extend_sec.span => {
                extend_sec.labels.extend(self.labels);
                None
            }

            _ => Some(self),
        }
    }

    /// Render this section,
    ///   headed by `msg` if provided,
    ///   or otherwise by its first label.
    fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        msg: Option<&dyn Display>,
    ) -> fmt::Result {
        let (title, labels) = match msg {
            Some(msg) => (Some(msg), &self.labels[..]),
            None => match self.labels.split_first() {
                Some((first, rest)) => (Some(&first.1 as &dyn Display), rest),
                None => (None, &self.labels[..]),
            },
        };

        write!(f, "{level}: {loc}", level = self.level, loc = self.location)?;

        match title {
            Some(title) => write!(f, ": {title}\n")?,
            None => write!(f, "\n")?,
        }

        if let Some(excerpt) = &self.excerpt {
            write!(f, "{excerpt}")?;
        }

        labels
            .iter()
            .chain(self.system_labels.iter())
            .try_for_each(|label| write!(f, "{label}\n"))
    }
}

impl<'d, 's> From<MaybeResolvedSpan<'d, 's>> for Section<'d> {
    fn from(mspan: MaybeResolvedSpan<'d, 's>) -> Self {
        let system_labels = mspan.system_labels();

        match mspan {
            MaybeResolvedSpan::Resolved(rspan, level, olabel) => Section {
                level,
                span: rspan.span,
                location: Location::from(&rspan),
                excerpt: Some(Excerpt::from(&rspan)),
                labels: olabel.into_iter().collect(),
                system_labels,
            },

            MaybeResolvedSpan::Unresolved(span, level, olabel, _) => Section {
                level,
                span,
                location: Location::Unresolved(span),
                excerpt: None,
                labels: olabel.into_iter().collect(),
                system_labels,
            },
        }
    }
}

/// A [`Span`] that may have been resolved.
///
/// The span will remain unresolved if an error occurred,
///   in which case the error will be provided.
/// The idea is to provide as much fallback information as is useful to the
///   user so that they can still debug the problem without the benefit of
///   the resolved context.
///
/// Furthermore,
///   it is important that the underlying diagnostic message
///     (e.g. error)
///     never be masked by an error of our own.
#[derive(Debug, PartialEq, Eq)]
enum MaybeResolvedSpan<'d, 's> {
    Resolved(ResolvedSpan<'s>, Level, Option<SpanLabel<'d>>),
    Unresolved(Span, Level, Option<SpanLabel<'d>>, SourceError),
}

impl<'d, 's> MaybeResolvedSpan<'d, 's> {
    /// We should never mask an error with our own;
    ///   the diagnostic system is supposed to _help_ the user in diagnosing
    ///   problems,
    ///     not hinder them by masking it.
    fn system_labels(&self) -> Vec<SpanLabel<'static>> {
        match self {
            Self::Resolved(rspan, ..)
                if std::str::from_utf8(rspan.line_text).is_err() =>
            {
                vec![SpanLabel(
                    Level::Help,
                    "the line is not a valid UTF-8 string, \
                        so invalid bytes are shown as U+FFFD"
                        .into(),
                )]
            }

            Self::Unresolved(.., e) => {
                vec![SpanLabel(
                    Level::Help,
                    format!(
                        "an error occurred while trying to look up \
                         information about this span: {e}"
                    )
                    .into(),
                )]
            }

            _ => vec![],
        }
    }
}

/// Location of a (hopefully resolved) span.
///
/// If a span could not be resolved,
///   offsets are rendered in place of files, lines, and columns.
#[derive(Debug, PartialEq, Eq)]
enum Location {
    Resolved {
        filename: String,
        start: LineCol,
        end_filename: Option<String>,
        end: LineCol,
    },
    Unresolved(Span),
}

impl<'s> From<&ResolvedSpan<'s>> for Location {
    fn from(rspan: &ResolvedSpan<'s>) -> Self {
        Self::Resolved {
            filename: rspan.filename.to_string(),
            start: rspan.start(),
            end_filename: rspan.end_filename.map(ToString::to_string),
            end: rspan.end(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved {
                filename,
                start,
                end_filename: None,
                end,
            } => write!(f, "{filename}:{start} - {end}"),

            Self::Resolved {
                filename,
                start,
                end_filename: Some(end_filename),
                end,
            } => write!(f, "{filename}:{start} - {end_filename}:{end}"),

            // This is not ideal,
            //   but provides reasonable fallback information in a
            //   situation where the diagnostic system fails.
            Self::Unresolved(span) => {
                write!(f, "offset {}--{}", span.start(), span.end())
            }
        }
    }
}

/// The source line on which a span begins,
///   with the span underlined.
#[derive(Debug, PartialEq, Eq)]
struct Excerpt {
    line_num: usize,
    text: String,
    pad: usize,
    width: usize,
}

impl<'s> From<&ResolvedSpan<'s>> for Excerpt {
    fn from(rspan: &ResolvedSpan<'s>) -> Self {
        let (pad, width) = rspan.underline();

        Self {
            line_num: rspan.start_line,
            text: String::from_utf8_lossy(rspan.line_text).into_owned(),
            pad,
            width,
        }
    }
}

impl Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gutter = format!("{} | ", self.line_num);

        write!(f, "{gutter}{text}\n", text = self.text)?;
        write!(
            f,
            "{:indent$}{carets}\n",
            "",
            indent = gutter.len() + self.pad,
            carets = "^".repeat(self.width),
        )
    }
}

/// A label describing a span.
#[derive(Debug, PartialEq, Eq)]
struct SpanLabel<'d>(Level, Label<'d>);

impl<'d> Display for SpanLabel<'d> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(level, label) = self;
        write!(f, "  = {level}: {label}")
    }
}

#[cfg(test)]
mod test;
