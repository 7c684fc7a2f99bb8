// Parser tracing
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

//! Tracing for parsing operations.
//!
//! This provides human-readable traces on standard error any time a
//!   [labeled](super::Parser::label) parser is run.
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build time using the `parser-trace-stderr`
//!   feature flag
//!     (`cargo build --features parser-trace-stderr`).
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to use the human-readable traces in that way since the format
//!   is subject to change without notice.

use super::ParseResult;
use std::fmt::Debug;

/// Trace of a labeled parse.
///
/// There is no means to return an error from a trace,
///   and a failure to output the trace must not interrupt parsing.
pub trait ParserTrace: Default {
    /// Output the upper portion of a trace before the parser is run.
    fn trace_begin(&mut self, label: &str, pos: usize);

    /// Output the lower portion of a trace after the parser has run,
    ///   including its outcome.
    fn trace_end<T: Debug>(
        &mut self,
        label: &str,
        pos: usize,
        result: &ParseResult<T>,
    );
}

/// Perform no tracing.
///
/// This should be used by default for non-test builds,
///   since tracing can incur a significant performance cost.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl ParserTrace for VoidTrace {
    fn trace_begin(&mut self, _label: &str, _pos: usize) {
        // Do nothing at all.
    }

    fn trace_end<T: Debug>(
        &mut self,
        _label: &str,
        _pos: usize,
        _result: &ParseResult<T>,
    ) {
        // Do nothing at all.
    }
}

/// Human-readable [`ParserTrace`].
///
/// Note: if one of these trace blocks does not fully output,
///   then you may have a `Debug::fmt` panic in the value yielded by the
///   parser.
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl ParserTrace for HumanReadableTrace {
    fn trace_begin(&mut self, label: &str, pos: usize) {
        eprint!(
            "\
[Parser::parse] {label}
| ==> Cursor before parse at position {pos}.
|\n"
        );
    }

    fn trace_end<T: Debug>(
        &mut self,
        label: &str,
        pos: usize,
        result: &ParseResult<T>,
    ) {
        eprint!("| ==> Cursor after {label} at position {pos}.\n");

        match result {
            Ok(value) => eprint!(
                "\
|
| ==> Yielded value:
|  |  {value:?}\n",
            ),
            Err(err) => eprint!(
                "\
|
| ==> !!! error: {err}.
|  |  {err:?}\n",
            ),
        }

        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "parser-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"parser-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";
        eprint!(
            "= note: this trace was output as a debugging aid \
                because `cfg({cfg})`.\n\n",
        );
    }
}

/// Trace used by [`Label`](super::combinator::Label).
#[cfg(any(test, feature = "parser-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

/// Trace used by [`Label`](super::combinator::Label).
#[cfg(not(any(test, feature = "parser-trace-stderr")))]
pub type DefaultTrace = VoidTrace;
