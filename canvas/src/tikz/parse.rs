//! Diagram text → shapes.
//!
//! Statements end at `;` (outside braces). Each statement is a `\draw`,
//! `\fill` or `\filldraw` command, an optional `[...]` modifier block and a
//! body: `node at (x,y) {text}`, `(x,y) circle(r unit)`, or a `--`-joined path.
//! Every coordinate is scaled and then rotated clockwise by the caller's
//! placement before it is stored.

use tracing::{debug, info, warn};

use super::ParseError;
use super::units::unit_factor;
use crate::doc::{LineThickness, Shape, Style};
use crate::geom::Vec2;
use crate::palette::{Color, PALETTE, lookup};

/// Command prefixes, longest first; the flag marks filled variants.
const COMMANDS: [(&str, bool); 3] = [("\\filldraw", true), ("\\fill", true), ("\\draw", false)];

const NODE_MARKER: &str = "node at";
const CIRCLE_MARKER: &str = "circle";
const ARC_MARKER: &str = "arc";
const PATH_JOIN: &str = "--";

/// Scale, then clockwise rotation, applied to every imported coordinate.
#[derive(Debug, Clone, Copy)]
struct Placement {
    scale: f64,
    rotation_deg: f64,
}

impl Placement {
    fn apply(self, v: Vec2) -> Vec2 {
        v.scale(self.scale).rotate_cw_deg(self.rotation_deg)
    }
}

/// Parse diagram text into shapes, in statement order.
///
/// Nothing is returned unless every statement parses, so callers can swap
/// the result in wholesale.
///
/// # Errors
///
/// Returns the first [`ParseError`] hit by any statement.
pub fn parse(text: &str, scale: f64, rotation_deg: f64) -> Result<Vec<Shape>, ParseError> {
    let placement = Placement { scale, rotation_deg };
    let body = strip_comments(text);

    let mut shapes = Vec::new();
    for statement in split_statements(&body) {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        shapes.push(parse_statement(statement, placement)?);
    }

    info!(shapes = shapes.len(), "parsed diagram text");
    Ok(shapes)
}

/// Parse a newline-separated list of `(x, y)`, `x, y` or `x y` pairs into a
/// filled polygon. The polygon is not closed.
///
/// # Errors
///
/// Returns [`ParseError::MalformedVector`] for a line that is not exactly two
/// numbers, or [`ParseError::EmptyVectorList`] when there are no lines.
pub fn parse_vector_list(text: &str, scale: f64, rotation_deg: f64) -> Result<Shape, ParseError> {
    let placement = Placement { scale, rotation_deg };
    let vertices = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_pair(line).map(|v| placement.apply(v)))
        .collect::<Result<Vec<_>, _>>()?;

    if vertices.is_empty() {
        return Err(ParseError::EmptyVectorList);
    }

    info!(vertices = vertices.len(), "parsed vector list");
    Ok(Shape::multi_line(vertices).with_style(Style { filled: true, ..Style::default() }))
}

// =============================================================
// Statements
// =============================================================

/// Drop `%` comments and the `tikzpicture` environment lines.
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| &line[..comment_start(line).unwrap_or(line.len())])
        .filter(|line| !is_environment_marker(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the first unescaped `%`.
fn comment_start(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '%' if !escaped => return Some(i),
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    None
}

fn is_environment_marker(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("\\begin{tikzpicture}") || line.starts_with("\\end{tikzpicture}")
}

/// Split on `;` outside braces, so label text may contain semicolons.
fn split_statements(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut scan = BraceScan::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        scan.feed(c);
        if c == ';' && scan.depth == 0 {
            out.push(&text[start..i]);
            start = i + 1;
        }
    }
    out.push(&text[start..]);
    out
}

/// Brace nesting over label text. Escaped braces and braces inside `$...$`
/// are literal characters.
#[derive(Debug, Default)]
struct BraceScan {
    depth: usize,
    in_math: bool,
    escaped: bool,
}

impl BraceScan {
    /// Advance by one character; true when it closes the outermost brace.
    fn feed(&mut self, c: char) -> bool {
        let escaped = std::mem::take(&mut self.escaped);
        let structural = !escaped && !self.in_math;
        match c {
            '\\' => self.escaped = !escaped,
            '$' if !escaped && self.depth > 0 => self.in_math = !self.in_math,
            '{' if structural => self.depth += 1,
            '}' if structural && self.depth > 0 => {
                self.depth -= 1;
                return self.depth == 0;
            }
            _ => {}
        }
        false
    }
}

fn parse_statement(statement: &str, placement: Placement) -> Result<Shape, ParseError> {
    let (filled, rest) = strip_command(statement);
    let (style, body) = take_modifiers(rest)?;
    let style = Style { filled, ..style };

    if body.contains(NODE_MARKER) {
        return parse_text(body, style.color, placement);
    }
    if body.contains(CIRCLE_MARKER) {
        return parse_circle(body, style, placement);
    }
    if body.contains(ARC_MARKER) {
        return Err(ParseError::Unsupported(statement.to_owned()));
    }
    parse_path(body, style, placement, statement)
}

/// Strip the command prefix. Statements without one are read as `\draw`.
fn strip_command(statement: &str) -> (bool, &str) {
    COMMANDS
        .iter()
        .find_map(|&(prefix, filled)| statement.strip_prefix(prefix).map(|rest| (filled, rest.trim_start())))
        .unwrap_or((false, statement))
}

// =============================================================
// Modifiers
// =============================================================

/// Read a leading `[...]` block into a style and return the text after it.
fn take_modifiers(rest: &str) -> Result<(Style, &str), ParseError> {
    let mut style = Style::default();
    let Some(inner) = rest.strip_prefix('[') else {
        return Ok((style, rest));
    };
    let Some(close) = inner.find(']') else {
        return Err(ParseError::NoMatch(rest.to_owned()));
    };

    for item in inner[..close].split(',') {
        apply_modifier(&mut style, item.trim())?;
    }
    Ok((style, inner[close + 1..].trim_start()))
}

fn apply_modifier(style: &mut Style, item: &str) -> Result<(), ParseError> {
    match item {
        "" => {}
        "dashed" => style.dashed = true,
        "->" => style.front_arrow = true,
        "<-" => style.back_arrow = true,
        "<->" => {
            style.front_arrow = true;
            style.back_arrow = true;
        }
        _ => {
            if let Some((key, value)) = item.split_once('=') {
                if key.trim().eq_ignore_ascii_case("color") {
                    style.color = parse_color(value)?;
                } else {
                    debug!(modifier = item, "ignoring modifier");
                }
            } else if let Some(thickness) = LineThickness::from_token(item) {
                style.thickness = thickness;
            } else if lookup(color_name(item)).is_some() {
                style.color = parse_color(item)?;
            } else {
                debug!(modifier = item, "ignoring modifier");
            }
        }
    }
    Ok(())
}

fn color_name(value: &str) -> &str {
    value.split_once('!').map_or(value, |(name, _)| name).trim()
}

/// `name` or `name!percent`. Unknown names fall back to the default color.
fn parse_color(value: &str) -> Result<Color, ParseError> {
    let value = value.trim();
    let tint = match value.split_once('!') {
        Some((_, percent)) => {
            let percent = percent.trim();
            percent
                .parse::<f64>()
                .map_err(|_| ParseError::MalformedNumber(percent.to_owned()))?
                / 100.0
        }
        None => 1.0,
    };

    let name = color_name(value);
    let entry = lookup(name).copied().unwrap_or_else(|| {
        warn!(color = name, "unknown color, using default");
        PALETTE[0]
    });
    Ok(Color::new(entry, tint))
}

// =============================================================
// Bodies
// =============================================================

/// `node at (x,y) {text}`. Only the color modifier applies to labels.
fn parse_text(body: &str, color: Color, placement: Placement) -> Result<Shape, ParseError> {
    let rest = body
        .split_once(NODE_MARKER)
        .map_or(body, |(_, rest)| rest);
    let (anchor, rest) = take_vector(rest, placement)?;
    let text = brace_content(rest).ok_or_else(|| ParseError::NoMatch(body.to_owned()))?;
    Ok(Shape::text(anchor, text).with_style(Style { color, ..Style::default() }))
}

/// `(x,y) circle(r unit)`. Arrows and thickness never apply to circles.
fn parse_circle(body: &str, style: Style, placement: Placement) -> Result<Shape, ParseError> {
    let Some((left, right)) = body.split_once(CIRCLE_MARKER) else {
        return Err(ParseError::NoMatch(body.to_owned()));
    };
    let (center, _) = take_vector(left, placement)?;
    let radius = parse_radius(right)? * placement.scale;
    let style = Style { front_arrow: false, back_arrow: false, thickness: LineThickness::default(), ..style };
    Ok(Shape::circle(center, radius).with_style(style))
}

/// Two vectors make a line; more make a polyline. A trailing `cycle`
/// repeats the first vertex.
fn parse_path(body: &str, style: Style, placement: Placement, statement: &str) -> Result<Shape, ParseError> {
    let pieces: Vec<&str> = body.split(PATH_JOIN).map(str::trim).collect();
    if pieces.len() < 2 {
        return Err(ParseError::NoMatch(statement.to_owned()));
    }

    let mut vertices = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if piece.eq_ignore_ascii_case("cycle") {
            let Some(&first) = vertices.first() else {
                return Err(ParseError::MalformedVector(piece.to_owned()));
            };
            vertices.push(first);
        } else {
            vertices.push(placement.apply(parse_vector(piece)?));
        }
    }

    if let [origin, end] = vertices[..] {
        return Ok(Shape::line(origin, end).with_style(Style { filled: false, ..style }));
    }
    Ok(Shape::multi_line(vertices).with_style(style))
}

// =============================================================
// Literals
// =============================================================

/// Parse the first `(x, y)` in `text` and return the text after it.
fn take_vector(text: &str, placement: Placement) -> Result<(Vec2, &str), ParseError> {
    let malformed = || ParseError::MalformedVector(text.trim().to_owned());
    let start = text.find('(').ok_or_else(malformed)?;
    let len = text[start..].find(')').ok_or_else(malformed)?;
    let v = parse_vector(&text[start..=start + len])?;
    Ok((placement.apply(v), &text[start + len + 1..]))
}

/// `(x, y)` with plain decimal coordinates.
fn parse_vector(literal: &str) -> Result<Vec2, ParseError> {
    let literal = literal.trim();
    let malformed = || ParseError::MalformedVector(literal.to_owned());
    let inner = literal
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (x, y) = inner.split_once(',').ok_or_else(malformed)?;
    let x = x.trim().parse::<f64>().map_err(|_| malformed())?;
    let y = y.trim().parse::<f64>().map_err(|_| malformed())?;
    Ok(Vec2::new(x, y))
}

/// `(r unit)`, converted to centimeters. Negative radii are malformed.
fn parse_radius(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    let inner = text
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| ParseError::MalformedNumber(text.to_owned()))?
        .trim();
    let split = inner.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(inner.len());
    let (number, unit) = inner.split_at(split);
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedNumber(inner.to_owned()))?;
    if value < 0.0 {
        return Err(ParseError::MalformedNumber(inner.to_owned()));
    }
    Ok(value * unit_factor(unit)?)
}

/// Bare vector-list line: parentheses are ignored, commas or whitespace separate.
fn parse_pair(line: &str) -> Result<Vec2, ParseError> {
    let malformed = || ParseError::MalformedVector(line.to_owned());
    let bare: String = line.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let parts: Vec<&str> = if bare.contains(',') {
        bare.split(',').map(str::trim).collect()
    } else {
        bare.split_whitespace().collect()
    };
    let [x, y] = parts[..] else {
        return Err(malformed());
    };
    let x = x.parse::<f64>().map_err(|_| malformed())?;
    let y = y.parse::<f64>().map_err(|_| malformed())?;
    Ok(Vec2::new(x, y))
}

/// Content of the first balanced `{...}`; braces inside `$...$` do not count.
fn brace_content(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let mut scan = BraceScan::default();
    text[open..]
        .char_indices()
        .find(|&(_, c)| scan.feed(c))
        .map(|(i, _)| &text[open + 1..open + i])
}
