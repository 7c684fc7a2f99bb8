// Parser combinators with source diagnostics
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

//! Parser combinators over addressable source text,
//!   with diagnostics that point back into that text.
//!
//! The system is composed of two halves that are only useful together:
//!
//!   1. A positional source model
//!        ([`source::SourceFile`], [`source::SourceSet`], [`cursor::Cursor`])
//!        that concatenates any number of inputs into a single gapless
//!        space of byte positions; and
//!   2. A parser combinator algebra ([`parse`]) whose every failure is an
//!        [`parse::Error`] anchored to a [`span::Span`] within that space.
//!
//! The [diagnostic system](diagnose) then resolves those spans back into
//!   `file:line:col` locations and renders the offending source line with
//!   its span underlined.
//!
//! ```
//! use srcparse::{
//!     cursor::Cursor,
//!     diagnose::{Reporter, VisualReporter},
//!     parse::{primitive::literal, Parser},
//!     source::{SourceFile, SourceSet},
//! };
//!
//! let mut set = SourceSet::new();
//! set.add_file(SourceFile::new("in.txt", "nam: value\n"));
//!
//! let mut cursor = Cursor::new(&set);
//! let err = literal("name").parse(&mut cursor).unwrap_err();
//!
//! let report = VisualReporter::new(&set).render(&err).to_string();
//! assert!(report.starts_with("error: in.txt:1:1 - 1:4: "));
//! ```
//!
//! Grammars are ordinary Rust values built by functions,
//!   so they are constructed whenever they are needed rather than during
//!   static initialization;
//!     see [`grammar`] for examples.

#[macro_use]
extern crate static_assertions;

pub mod cursor;
pub mod diagnose;
pub mod fmt;
pub mod grammar;
pub mod parse;
pub mod source;
pub mod span;
