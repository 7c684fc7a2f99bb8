// Example grammars
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

//! Small grammars built from the [`parse`](crate::parse) combinators.
//!
//! The principal grammar recognizes a document of `name: value`
//!   statements,
//!     one per line:
//!
//! ```text
//! name: value
//! f(x): anything to the end of the line
//! ```
//!
//! Each grammar is constructed by a function,
//!   so a grammar exists only once it is asked for and may be built any
//!   number of times.

use crate::parse::{attempt, many, map_n, primitive::*, Either, Parser};
use std::fmt::{self, Display};

/// A single `lhs: rhs` statement.
///
/// The right-hand side is everything following the colon up to the end
///   of the line,
///     including any leading whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub lhs: String,
    pub rhs: String,
}

impl Display for Statement {
    /// Render the statement as it would appear in source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lhs, self.rhs)
    }
}

/// An [`identifier`],
///   optional whitespace,
///   a colon,
///   and the remainder of the line.
///
/// The newline terminating the statement is not consumed.
pub fn statement() -> impl Parser<Output = Statement> {
    map_n(
        |(lhs, _, rhs): (String, String, String)| Statement { lhs, rhs },
        (
            identifier(),
            skip_whitespace().then(literal(":")),
            rest_of_line(),
        ),
    )
    .label("statement")
}

/// Any number of [`statement`]s separated by whitespace.
///
/// This stops at the first statement that cannot be parsed,
///   leaving the cursor before the whitespace that preceded it;
///     see [`document`] to require that all input be consumed.
pub fn file() -> impl Parser<Output = Vec<Statement>> {
    many(attempt(statement()).between(skip_whitespace()))
}

/// A [`file`] that must consume all input.
///
/// If input remains after the last statement,
///   the statement grammar is run again at that point so that the error
///   describes why a statement could not be parsed there;
///     the failed expectation of the end of input is nested within it.
pub fn document() -> impl Parser<Output = Vec<Statement>> {
    let rest = skip_whitespace().then(end_of_input().or_either(statement()));

    file().then_also(rest).map(|(mut stmts, rest)| {
        // `file` stops only at a statement that fails to parse,
        //   so there is no trailing statement in practice.
        if let Either::Right(stmt) = rest {
            stmts.push(stmt);
        }

        stmts
    })
}

/// An ASCII letter or `_`,
///   followed by any number of ASCII letters,
///   digits,
///   or `_`.
pub fn go_identifier() -> impl Parser<Output = String> {
    let head = token(|b| b.is_ascii_alphabetic() || b == b'_');
    let tail =
        token(|b| b.is_ascii_alphanumeric() || b == b'_').many_string();

    head.then_also(tail)
        .map(|(head, tail)| format!("{}{tail}", char::from(head)))
        .label("identifier")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        cursor::Cursor,
        parse::{ErrorMessage, ParseResult},
        source::SourceFile,
        span::Span,
    };

    fn run<P: Parser>(
        parser: &P,
        input: &str,
    ) -> (ParseResult<P::Output>, usize) {
        let file = SourceFile::new("test", input);
        let mut cursor = Cursor::new(&file);

        let result = parser.parse(&mut cursor);
        (result, cursor.position())
    }

    fn stmt(lhs: &str, rhs: &str) -> Statement {
        Statement {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    #[test]
    fn statement_keeps_whitespace_after_colon() {
        assert_eq!(
            (Ok(stmt("name", " value")), 11),
            run(&statement(), "name: value\nnext"),
        );

        assert_eq!(
            (Ok(stmt("f(x)_1", "y")), 9),
            run(&statement(), "f(x)_1 :y"),
        );
    }

    // The colon may alternatively be surrounded by whitespace,
    //   in which case it is not part of the value.
    #[test]
    fn colon_between_whitespace_trims_value() {
        let sut = map_n(
            |(lhs, _, rhs): (String, String, String)| Statement { lhs, rhs },
            (
                identifier(),
                literal(":").between(skip_whitespace()),
                rest_of_line(),
            ),
        );

        assert_eq!(
            (Ok(stmt("name", "value")), 11),
            run(&sut, "name: value"),
        );
    }

    #[test]
    fn statement_without_colon_fails() {
        let (result, _) = run(&statement(), "name value");
        let err = result.unwrap_err();

        assert_eq!(Span::new(5, 0), err.span());
        assert!(err
            .messages()
            .contains(&ErrorMessage::Note("while parsing statement".into())));
    }

    #[test]
    fn file_collects_statements() {
        assert_eq!(
            (Ok(vec![stmt("a", " 1"), stmt("b", " 2")]), 14),
            run(&file(), "\n  a: 1\n\nb: 2\n"),
        );

        assert_eq!((Ok(vec![]), 0), run(&file(), ""));
    }

    #[test]
    fn file_stops_before_unparseable_statement() {
        assert_eq!(
            (Ok(vec![stmt("a", " 1")]), 5),
            run(&file(), "a: 1\nbad line\n"),
        );
    }

    #[test]
    fn document_requires_all_input() {
        assert_eq!(
            (Ok(vec![stmt("a", " 1"), stmt("b", "2")]), 10),
            run(&document(), "a: 1\nb:2\n\n"),
        );

        assert_eq!((Ok(vec![]), 3), run(&document(), " \n "));
    }

    #[test]
    fn document_failure_describes_statement() {
        let (result, _) = run(&document(), "a: 1\nbad line\n");
        let err = result.unwrap_err();

        // The colon expected after `bad `.
        assert_eq!(Span::new(9, 0), err.span());
        assert_eq!(
            "expected `:`, found `l`; while parsing statement",
            err.to_string(),
        );

        // The end of input that was expected in its place.
        let nested = err.nested().collect::<Vec<_>>();
        assert_eq!(1, nested.len());
        assert_eq!(Span::new(5, 1), nested[0].span());
        assert_eq!(
            "unexpected `b`; expected end of input",
            nested[0].to_string(),
        );
    }

    #[test]
    fn go_identifier_charset() {
        assert_eq!(
            (Ok("_a1".to_string()), 3),
            run(&go_identifier(), "_a1-"),
        );
        assert_eq!((Ok("x".to_string()), 1), run(&go_identifier(), "x y"));

        let (result, pos) = run(&go_identifier(), "1a");
        assert_eq!(0, result.unwrap_err().position());
        assert_eq!(0, pos);
    }

    #[test]
    fn statement_displays_as_source() {
        assert_eq!("name: value", stmt("name", " value").to_string());
    }
}
