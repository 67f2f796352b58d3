//! Command implementations. Each takes input text and returns output text;
//! file and terminal I/O stay in `main`.

use canvas::camera::Viewport;
use canvas::doc::{Shape, ShapeKind};
use canvas::engine::Session;
use canvas::render::{LabelRasterizer, RasterError, RasterHandle};
use canvas::tikz::{self, ParseError};
use serde_json::json;

use crate::config::CliConfig;

const KINDS: [ShapeKind; 5] =
    [ShapeKind::Line, ShapeKind::Circle, ShapeKind::MultiLine, ShapeKind::Bezier, ShapeKind::Text];

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no input")]
    NoInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Bare `\draw` lines.
    #[default]
    Text,
    /// Lines wrapped in a `tikzpicture` environment.
    Picture,
    Json,
}

/// Parse every input into one session, in order, and re-emit the diagram.
///
/// The first input replaces the empty diagram and the rest are appended, so
/// nothing is emitted unless every input parses.
///
/// # Errors
///
/// Returns [`CliError::Parse`] for the first input that fails to parse.
pub fn import(inputs: &[String], config: CliConfig, format: OutputFormat) -> Result<String, CliError> {
    let session = load(inputs, config)?;
    emit(session.diagram.shapes(), format)
}

/// Turn a vector list into a single filled polygon.
///
/// # Errors
///
/// Returns [`CliError::Parse`] when a line is not a vector or the list is empty.
pub fn vectors(input: &str, config: CliConfig, format: OutputFormat) -> Result<String, CliError> {
    let polygon = tikz::parse_vector_list(input, config.scale, config.rotation_deg)?;
    emit(&[polygon], format)
}

/// Count shapes per kind.
///
/// # Errors
///
/// Returns [`CliError::Parse`] for the first input that fails to parse.
pub fn check(inputs: &[String], config: CliConfig, format: OutputFormat) -> Result<String, CliError> {
    let session = load(inputs, config)?;
    let shapes = session.diagram.shapes();
    let counts: Vec<(ShapeKind, usize)> = KINDS
        .into_iter()
        .map(|kind| (kind, shapes.iter().filter(|s| s.kind() == kind).count()))
        .collect();

    if format == OutputFormat::Json {
        let mut by_kind = serde_json::Map::new();
        for (kind, count) in &counts {
            by_kind.insert(kind_name(*kind).to_owned(), json!(count));
        }
        let value = json!({ "total": shapes.len(), "kinds": by_kind });
        return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
    }

    let mut out = String::new();
    for (kind, count) in counts {
        out.push_str(&format!("{:<10} {count}\n", kind_name(kind)));
    }
    out.push_str(&format!("{:<10} {}\n", "total", shapes.len()));
    Ok(out)
}

/// Build the display list for a viewport of `width` × `height` pixels.
///
/// Math labels have no renderer here and are drawn with a placeholder.
///
/// # Errors
///
/// Returns [`CliError::Parse`] for the first input that fails to parse.
pub fn scene(inputs: &[String], config: CliConfig, width: f64, height: f64) -> Result<String, CliError> {
    let mut session = load(inputs, config)?;
    session.viewport = Viewport { width, height, ..Viewport::default() };
    let scene = session.render(&mut NoMathRenderer);
    Ok(format!("{}\n", serde_json::to_string_pretty(&scene)?))
}

fn load(inputs: &[String], config: CliConfig) -> Result<Session, CliError> {
    let Some((first, rest)) = inputs.split_first() else {
        return Err(CliError::NoInput);
    };

    let mut session = Session::new();
    session.replace_diagram(tikz::parse(first, config.scale, config.rotation_deg)?);
    for text in rest {
        session.append_shapes(tikz::parse(text, config.scale, config.rotation_deg)?);
    }
    Ok(session)
}

fn emit(shapes: &[Shape], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(tikz::serialize(shapes)),
        OutputFormat::Picture => Ok(tikz::wrap_picture(&tikz::serialize(shapes))),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(shapes)?)),
    }
}

fn kind_name(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Line => "line",
        ShapeKind::Circle => "circle",
        ShapeKind::MultiLine => "multi_line",
        ShapeKind::Bezier => "bezier",
        ShapeKind::Text => "text",
    }
}

/// Stand-in for a math typesetter; every label gets the placeholder.
struct NoMathRenderer;

impl LabelRasterizer for NoMathRenderer {
    fn rasterize(&mut self, text: &str) -> Result<RasterHandle, RasterError> {
        Err(RasterError::Failed(format!("no math renderer for {text}")))
    }

    fn placeholder(&self) -> RasterHandle {
        RasterHandle(0)
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
