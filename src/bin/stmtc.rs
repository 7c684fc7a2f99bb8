// Statement file checker
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

//! This is the statement checker.
//!
//! `stmtc` parses one or more files of `name: value` statements
//!   (see [`srcparse::grammar::document`])
//!   as a single document,
//!     printing each statement as `name = value`.
//! Input files are concatenated in the order given,
//!   and errors are reported against the file in which they occur.

extern crate srcparse;

use getopts::{Fail, Options};
use srcparse::{
    cursor::Cursor,
    diagnose::{AnnotatedSpan, Diagnostic, Reporter, VisualReporter},
    fmt::{AndConjList, ListDisplayWrapper, Raw, Tt},
    grammar::{document, Statement},
    parse::{self, Parser},
    source::{SourceError, SourceFile, SourceSet},
};
use std::{
    env,
    error::Error,
    fmt::Display,
    io::{self, BufWriter, Write},
};

/// Types of commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Parse(Vec<String>, Emit),
    Usage,
}

/// What to write to standard out after a successful parse.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Emit {
    Statements,
    Nothing,
}

/// Load each input in order into a single [`SourceSet`].
///
/// An input named more than once is loaded only at its first occurrence.
fn load(inputs: &[String]) -> Result<SourceSet, StmtcError> {
    let mut set = SourceSet::new();

    for input in inputs {
        if set.find_file(input).is_none() {
            set.add_file(SourceFile::open(input)?);
        }
    }

    Ok(set)
}

/// Parse the entire source set as a single document.
fn parse_document(set: &SourceSet) -> Result<Vec<Statement>, StmtcError> {
    let mut cursor = Cursor::new(set);
    Ok(document().parse(&mut cursor)?)
}

/// Write each statement as `lhs = rhs`,
///   with surrounding whitespace removed from the value.
fn write_statements<W: Write>(
    mut fout: W,
    stmts: &[Statement],
) -> Result<(), StmtcError> {
    for Statement { lhs, rhs } in stmts {
        write!(fout, "{lhs} = {}\n", rhs.trim())?;
    }

    Ok(fout.flush()?)
}

/// Entrypoint for the checker
pub fn main() -> Result<(), StmtcError> {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage =
        opts.usage(&format!("Usage: {} [OPTIONS] INPUT...", program));

    match parse_options(opts, args) {
        Ok(Command::Parse(inputs, emit)) => {
            let set = load(&inputs).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(e.exit_code());
            });

            let result = parse_document(&set).and_then(|stmts| match emit {
                Emit::Statements => {
                    write_statements(BufWriter::new(io::stdout()), &stmts)
                }
                Emit::Nothing => Ok(()),
            });

            result.or_else(|e: StmtcError| {
                // Rendering to a string ensures buffering so that we don't
                //   interleave output between processes.
                let report = VisualReporter::new(&set).render(&e).to_string();
                println!(
                    "{report}\nfatal: failed to parse {}",
                    AndConjList::<Tt<Raw>>::wrap(&inputs[..]),
                );

                std::process::exit(e.exit_code());
            })
        }
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Command-line options
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optopt("", "emit", "set output type", "statements|none");
    opts.optflag("q", "quiet", "do not print statements");
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    if matches.free.is_empty() {
        return Err(Fail::OptionMissing(String::from("INPUT")));
    }

    let emit = match matches.opt_str("emit").as_deref() {
        None | Some("statements") => Emit::Statements,
        Some("none") => Emit::Nothing,
        Some(_) => {
            return Err(Fail::ArgumentMissing(String::from(
                "--emit statements|none",
            )))
        }
    };

    let emit = match matches.opt_present("q") {
        true => Emit::Nothing,
        false => emit,
    };

    Ok(Command::Parse(matches.free, emit))
}

/// Checker (`stmtc`) error.
///
/// This represents the aggregation of all possible errors that can occur
///   while checking.
#[derive(Debug)]
pub enum StmtcError {
    Io(io::Error),
    Source(SourceError),
    Parse(parse::Error),
}

impl StmtcError {
    /// Process exit code for this error.
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Source(_) => exitcode::NOINPUT,
            Self::Parse(_) => exitcode::DATAERR,
            Self::Io(_) => exitcode::IOERR,
        }
    }
}

impl From<io::Error> for StmtcError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SourceError> for StmtcError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<parse::Error> for StmtcError {
    fn from(e: parse::Error) -> Self {
        Self::Parse(e)
    }
}

impl Display for StmtcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Source(e) => Display::fmt(e, f),
            Self::Parse(e) => Display::fmt(e, f),
        }
    }
}

impl Error for StmtcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl Diagnostic for StmtcError {
    fn describe(&self) -> Vec<AnnotatedSpan<'_>> {
        match self {
            Self::Parse(e) => e.describe(),

            // Falls back to rendering just the error `Display`.
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        std::iter::once("program")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_options_help() {
        for flag in ["-h", "--help"] {
            assert_eq!(
                Ok(Command::Usage),
                parse_options(get_opts(), args(&[flag])),
            );
        }
    }

    #[test]
    fn parse_options_invalid() {
        match parse_options(get_opts(), args(&["-x"])) {
            Err(Fail::UnrecognizedOption(_)) => {}
            result => panic!("Invalid option not caught: {result:?}"),
        }
    }

    #[test]
    fn parse_options_missing_input() {
        assert_eq!(
            Err(Fail::OptionMissing(String::from("INPUT"))),
            parse_options(get_opts(), args(&[])),
        );
    }

    #[test]
    fn parse_options_invalid_emit() {
        assert_eq!(
            Err(Fail::ArgumentMissing(String::from("--emit statements|none"))),
            parse_options(get_opts(), args(&["a.txt", "--emit", "foo"])),
        );
    }

    #[test]
    fn parse_options_valid() {
        assert_eq!(
            Ok(Command::Parse(
                vec!["a.txt".into(), "b.txt".into()],
                Emit::Statements
            )),
            parse_options(get_opts(), args(&["a.txt", "b.txt"])),
        );

        assert_eq!(
            Ok(Command::Parse(vec!["a.txt".into()], Emit::Nothing)),
            parse_options(get_opts(), args(&["--emit", "none", "a.txt"])),
        );
    }

    #[test]
    fn parse_options_quiet_suppresses_statements() {
        assert_eq!(
            Ok(Command::Parse(vec!["a.txt".into()], Emit::Nothing)),
            parse_options(
                get_opts(),
                args(&["-q", "--emit", "statements", "a.txt"])
            ),
        );
    }

    #[test]
    fn writes_trimmed_statements() {
        let mut buf = Vec::new();
        let stmts = vec![
            Statement {
                lhs: "a".into(),
                rhs: " 1 ".into(),
            },
            Statement {
                lhs: "f(x)".into(),
                rhs: "y".into(),
            },
        ];

        write_statements(&mut buf, &stmts).unwrap();

        assert_eq!("a = 1\nf(x) = y\n", String::from_utf8(buf).unwrap());
    }

    #[test]
    fn load_skips_repeated_inputs() {
        let inputs = [
            "tests/data/more.txt",
            "tests/data/good.txt",
            "tests/data/more.txt",
        ]
        .map(String::from);

        let set = load(&inputs).unwrap();

        assert_eq!(
            vec!["tests/data/more.txt", "tests/data/good.txt"],
            set.files().map(|(_, f)| f.name()).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(
            exitcode::NOINPUT,
            StmtcError::from(SourceError::PositionOutOfRange { pos: 1, len: 0 })
                .exit_code(),
        );
        assert_eq!(
            exitcode::DATAERR,
            StmtcError::from(parse::Error::unexpected_byte(0, None))
                .exit_code(),
        );
        assert_eq!(
            exitcode::IOERR,
            StmtcError::from(io::Error::from(io::ErrorKind::BrokenPipe))
                .exit_code(),
        );
    }
}
