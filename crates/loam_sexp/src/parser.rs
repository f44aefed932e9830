//! Parser for the textual form of the s-expression notation.
//!
//! Hand-rolled byte-wise scanner. Bare atoms run until whitespace or a
//! delimiter, quoted atoms support `\"`, `\\`, `\n` and `\t` escapes, and
//! `;` starts a comment running to the end of the line. The input must
//! contain exactly one toplevel s-expression.

use crate::error::ParseError;
use crate::sexp::Sexp;

/// Parses a complete s-expression from `source`.
///
/// Leading and trailing whitespace and comments are ignored; any other
/// content after the first toplevel s-expression is an error.
pub fn parse_str(source: &str) -> Result<Sexp, ParseError> {
    let mut parser = Parser {
        text: source,
        source: source.as_bytes(),
        pos: 0,
    };
    parser.skip_trivia();
    if parser.at_end() {
        return Err(ParseError::Empty);
    }
    let sexp = parser.parse_sexp()?;
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(ParseError::Trailing(parser.pos));
    }
    Ok(sexp)
}

struct Parser<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b'"' | b';')
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        if self.pos < self.source.len() {
            self.source[self.pos]
        } else {
            0
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while !self.at_end() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.peek() == b';' {
                while !self.at_end() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            return;
        }
    }

    fn parse_sexp(&mut self) -> Result<Sexp, ParseError> {
        match self.peek() {
            b'(' => self.parse_list(),
            b')' => Err(ParseError::UnmatchedClose(self.pos)),
            b'"' => self.parse_quoted(),
            _ => Ok(self.parse_bare()),
        }
    }

    fn parse_list(&mut self) -> Result<Sexp, ParseError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_end() {
                return Err(ParseError::UnexpectedEof(self.pos));
            }
            if self.peek() == b')' {
                self.pos += 1;
                return Ok(Sexp::List(items));
            }
            items.push(self.parse_sexp()?);
        }
    }

    fn parse_quoted(&mut self) -> Result<Sexp, ParseError> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        // Copy unescaped runs as str slices so multibyte chars stay intact.
        let mut run_start = self.pos;
        loop {
            if self.at_end() {
                return Err(ParseError::UnterminatedString(open));
            }
            match self.source[self.pos] {
                b'"' => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(Sexp::Atom(out));
                }
                b'\\' => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    if self.at_end() {
                        return Err(ParseError::UnterminatedString(open));
                    }
                    out.push(match self.source[self.pos] {
                        b'"' => '"',
                        b'\\' => '\\',
                        b'n' => '\n',
                        b't' => '\t',
                        _ => return Err(ParseError::InvalidEscape(self.pos)),
                    });
                    self.pos += 1;
                    run_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn parse_bare(&mut self) -> Sexp {
        let start = self.pos;
        while !self.at_end() && !is_delimiter(self.source[self.pos]) {
            self.pos += 1;
        }
        Sexp::Atom(self.text[start..self.pos].to_string())
    }
}
