//! Structural parser for the WKT polygon strings returned by the parcel API.
//!
//! The service serializes each parcel boundary as `POLYGON ((x y, x y, ...))`
//! or `MULTIPOLYGON (((x y, ...)), ...)`. Parsing is done by recognizing the
//! literal delimiters (keyword, parentheses, commas, whitespace) rather than
//! by fixed character offsets, so malformed input is reported as an error
//! instead of producing truncated rings or NaN coordinates.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WktError {
    #[error("empty geometry string")]
    Empty,

    #[error("unrecognized geometry type: {0:?}")]
    UnknownGeometry(String),

    #[error("expected {expected} at byte {position}")]
    Expected {
        expected: &'static str,
        position: usize,
    },

    #[error("invalid numeric token {token:?}")]
    InvalidNumber { token: String },

    #[error("ring at byte {position} has no coordinates")]
    EmptyRing { position: usize },

    #[error("unexpected trailing content at byte {position}")]
    TrailingContent { position: usize },
}

/// One polygon as written in the source string: an exterior ring and zero or
/// more interior rings (holes). Rings keep exactly the coordinate pairs the
/// input carried, in input order; nothing is deduplicated or auto-closed.
/// Winding is semantically significant downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelPolygon {
    pub exterior: LineString<f64>,
    pub interiors: Vec<LineString<f64>>,
}

impl ParcelPolygon {
    /// Converts into a [`geo_types::Polygon`], closing each ring if the
    /// source left it open (GeoJSON requires closed linear rings).
    pub fn to_geo(&self) -> Polygon<f64> {
        Polygon::new(self.exterior.clone(), self.interiors.clone())
    }
}

/// A parsed parcel boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ParcelGeometry {
    Polygon(ParcelPolygon),
    MultiPolygon(Vec<ParcelPolygon>),
}

impl ParcelGeometry {
    pub fn polygons(&self) -> &[ParcelPolygon] {
        match self {
            ParcelGeometry::Polygon(polygon) => std::slice::from_ref(polygon),
            ParcelGeometry::MultiPolygon(polygons) => polygons,
        }
    }

    pub fn ring_count(&self) -> usize {
        self.polygons().iter().map(|p| 1 + p.interiors.len()).sum()
    }

    pub fn point_count(&self) -> usize {
        self.polygons()
            .iter()
            .map(|p| p.exterior.0.len() + p.interiors.iter().map(|r| r.0.len()).sum::<usize>())
            .sum()
    }

    pub fn to_geo_multi(&self) -> MultiPolygon<f64> {
        MultiPolygon(self.polygons().iter().map(ParcelPolygon::to_geo).collect())
    }
}

/// Parses one WKT polygon string into a [`ParcelGeometry`].
///
/// Accepts `POLYGON` and `MULTIPOLYGON`, case-insensitive, with optional
/// whitespace between the keyword and the opening parenthesis. Interior
/// rings are allowed. Anything else is a [`WktError`]; the function never
/// panics on malformed input.
pub fn parse(input: &str) -> Result<ParcelGeometry, WktError> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    if parser.rest().is_empty() {
        return Err(WktError::Empty);
    }

    let keyword = parser.keyword();
    let geometry = match keyword.to_ascii_uppercase().as_str() {
        "POLYGON" => ParcelGeometry::Polygon(parser.polygon()?),
        "MULTIPOLYGON" => ParcelGeometry::MultiPolygon(parser.multi_polygon()?),
        "" => {
            return Err(WktError::UnknownGeometry(
                parser.rest().chars().take(16).collect(),
            ))
        }
        other => return Err(WktError::UnknownGeometry(other.to_string())),
    };

    parser.skip_ws();
    if !parser.rest().is_empty() {
        return Err(WktError::TrailingContent {
            position: parser.pos,
        });
    }
    Ok(geometry)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), WktError> {
        self.skip_ws();
        if self.eat(c) {
            Ok(())
        } else {
            Err(WktError::Expected {
                expected,
                position: self.pos,
            })
        }
    }

    fn keyword(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn number(&mut self) -> Result<f64, WktError> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|ch: char| ch.is_whitespace() || matches!(ch, ',' | '(' | ')'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(WktError::Expected {
                expected: "number",
                position: self.pos,
            });
        }
        let token = &rest[..len];
        self.pos += len;
        let value: f64 = token.parse().map_err(|_| WktError::InvalidNumber {
            token: token.to_string(),
        })?;
        if !value.is_finite() {
            return Err(WktError::InvalidNumber {
                token: token.to_string(),
            });
        }
        Ok(value)
    }

    // One "x y" segment. Exactly two numeric tokens separated by whitespace;
    // the caller enforces the ',' or ')' that must follow.
    fn coord(&mut self) -> Result<Coord<f64>, WktError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Coord { x, y })
    }

    fn ring(&mut self) -> Result<LineString<f64>, WktError> {
        self.expect('(', "'('")?;
        self.skip_ws();
        if self.rest().starts_with(')') {
            return Err(WktError::EmptyRing { position: self.pos });
        }
        let mut coords = Vec::new();
        loop {
            coords.push(self.coord()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect(')', "',' or ')'")?;
            break;
        }
        Ok(LineString::from(coords))
    }

    fn polygon(&mut self) -> Result<ParcelPolygon, WktError> {
        self.expect('(', "'('")?;
        let exterior = self.ring()?;
        let mut interiors = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(',') {
                interiors.push(self.ring()?);
                continue;
            }
            self.expect(')', "',' or ')'")?;
            break;
        }
        Ok(ParcelPolygon {
            exterior,
            interiors,
        })
    }

    fn multi_polygon(&mut self) -> Result<Vec<ParcelPolygon>, WktError> {
        self.expect('(', "'('")?;
        let mut polygons = vec![self.polygon()?];
        loop {
            self.skip_ws();
            if self.eat(',') {
                polygons.push(self.polygon()?);
                continue;
            }
            self.expect(')', "',' or ')'")?;
            break;
        }
        Ok(polygons)
    }
}
