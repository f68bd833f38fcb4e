//! Minimal well-known-text support for single polygons.
//!
//! # Grammar accepted
//!
//! ```text
//! polygon := "POLYGON" [dims] "(" ring { "," ring } ")"
//! dims    := "Z" | "M" | "ZM"
//! ring    := "(" coord { "," coord } ")"
//! coord   := number number [number [number]]
//! ```
//!
//! Keywords are case-insensitive.  Only `x` and `y` are kept; `z`/`m`
//! ordinates are accepted and dropped.  `POLYGON EMPTY`, other geometry
//! types, and trailing input are rejected.
//!
//! Output uses the shortest representation that round-trips each `f64`, so
//! `write_polygon` → `parse_polygon` reproduces the polygon exactly.

use std::fmt::Write as _;

use jv_core::Point;

use crate::{GeometryError, GeometryResult, WalkableArea};

// ── Writing ───────────────────────────────────────────────────────────────────

/// `POLYGON ((x y, …, x0 y0), (…))` with every ring explicitly closed.
pub fn write_polygon(area: &WalkableArea) -> String {
    let mut out = String::from("POLYGON (");
    write_ring(&mut out, area.exterior());
    for hole in area.interiors() {
        out.push_str(", ");
        write_ring(&mut out, hole);
    }
    out.push(')');
    out
}

fn write_ring(out: &mut String, ring: &[Point]) {
    out.push('(');
    for (i, p) in ring.iter().chain(ring.first()).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{} {}", p.x, p.y);
    }
    out.push(')');
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse exactly one WKT `POLYGON`.
pub fn parse_polygon(text: &str) -> GeometryResult<WalkableArea> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };

    match parser.next() {
        Some(Token::Word(w)) if w.eq_ignore_ascii_case("POLYGON") => {}
        Some(Token::Word(w)) => {
            return Err(GeometryError::parse(format!(
                "expected a POLYGON, found {}",
                w.to_ascii_uppercase()
            )));
        }
        Some(other) => {
            return Err(GeometryError::parse(format!("expected POLYGON, found {other}")));
        }
        None => return Err(GeometryError::parse("empty input")),
    }

    if let Some(Token::Word(w)) = parser.peek() {
        if w.eq_ignore_ascii_case("EMPTY") {
            return Err(GeometryError::parse("polygon is EMPTY"));
        }
        if !["Z", "M", "ZM"].iter().any(|d| w.eq_ignore_ascii_case(d)) {
            return Err(GeometryError::parse(format!("unexpected keyword {w}")));
        }
        parser.pos += 1;
        if matches!(parser.peek(), Some(Token::Word(w)) if w.eq_ignore_ascii_case("EMPTY")) {
            return Err(GeometryError::parse("polygon is EMPTY"));
        }
    }

    parser.expect(&Token::Open)?;
    let mut rings = vec![parser.ring()?];
    while parser.peek() == Some(&Token::Comma) {
        parser.pos += 1;
        rings.push(parser.ring()?);
    }
    parser.expect(&Token::Close)?;

    if let Some(extra) = parser.next() {
        return Err(GeometryError::parse(format!("unexpected {extra} after polygon")));
    }

    let exterior = rings.remove(0);
    WalkableArea::with_holes(exterior, rings)
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    Open,
    Close,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(w) => write!(f, "keyword {w}"),
            Token::Number(n) => write!(f, "number {n}"),
            Token::Open => f.write_str("'('"),
            Token::Close => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

fn tokenize(text: &str) -> GeometryResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !c.is_ascii_alphabetic() {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Word(text[start..end].to_owned()));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')) {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                let literal = &text[start..end];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| GeometryError::parse(format!("invalid number {literal:?}")))?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(GeometryError::parse(format!(
                    "unexpected character {other:?} at offset {start}"
                )));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos:    usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, want: &Token) -> GeometryResult<()> {
        match self.next() {
            Some(t) if t == want => Ok(()),
            Some(t) => Err(GeometryError::parse(format!("expected {want}, found {t}"))),
            None => Err(GeometryError::parse(format!("expected {want}, found end of input"))),
        }
    }

    fn ring(&mut self) -> GeometryResult<Vec<Point>> {
        self.expect(&Token::Open)?;
        let mut ring = vec![self.coord()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            ring.push(self.coord()?);
        }
        self.expect(&Token::Close)?;
        Ok(ring)
    }

    fn coord(&mut self) -> GeometryResult<Point> {
        let mut ordinates = Vec::with_capacity(4);
        while let Some(Token::Number(n)) = self.peek() {
            ordinates.push(*n);
            self.pos += 1;
        }
        match ordinates.as_slice() {
            [x, y] | [x, y, _] | [x, y, _, _] => Ok(Point::new(*x, *y)),
            other => Err(GeometryError::parse(format!(
                "coordinate needs 2 to 4 numbers, got {}",
                other.len()
            ))),
        }
    }
}
