//! Shapes → diagram text, one `\draw` line per shape.

use tracing::info;

use crate::bezier::{control_polygon, export_steps, sample};
use crate::doc::{Geometry, LineThickness, Shape, ShapeKind, Style};
use crate::geom::Vec2;

/// Serialize shapes in order, one line each.
#[must_use]
pub fn serialize(shapes: &[Shape]) -> String {
    let text: String = shapes.iter().map(serialize_shape).collect();
    info!(shapes = shapes.len(), bytes = text.len(), "serialized diagram");
    text
}

/// One shape as a single `;`-terminated line.
///
/// Bezier curves are flattened to `23 + 2k` segments, `k` being the control
/// point count, and read back as polylines.
#[must_use]
pub fn serialize_shape(shape: &Shape) -> String {
    let kind = shape.kind();
    let command = if shape.style.filled && matches!(kind, ShapeKind::Circle | ShapeKind::MultiLine) {
        "filldraw"
    } else {
        "draw"
    };
    let modifiers = modifier_block(&shape.style, kind);

    match shape.geometry() {
        Geometry::Line { origin, end } => {
            format!("\\{command}{modifiers} {} -- {};\n", point(*origin), point(*end))
        }
        Geometry::Circle { center, .. } => {
            let radius = shape.radius().unwrap_or_default();
            format!("\\{command}{modifiers} {} circle({radius:.2} cm);\n", point(*center))
        }
        Geometry::MultiLine { vertices } => {
            format!("\\{command}{modifiers} {};\n", join_path(vertices))
        }
        Geometry::Bezier { origin, end, controls } => {
            let curve = sample(&control_polygon(*origin, controls, *end), export_steps(controls.len()));
            format!("\\{command}{modifiers} {};\n", join_path(&curve))
        }
        Geometry::Text { anchor, text } => {
            format!("\\{command}{modifiers} node at {} {{{text}}};\n", point(*anchor))
        }
    }
}

/// Wrap serialized lines in a `tikzpicture` environment.
#[must_use]
pub fn wrap_picture(body: &str) -> String {
    let mut out = String::from("\\begin{tikzpicture}\n");
    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("\\end{tikzpicture}\n");
    out
}

/// `[color, dashed, arrow, thickness]`, each only when it differs from the
/// default and applies to `kind`. Empty when nothing applies.
fn modifier_block(style: &Style, kind: ShapeKind) -> String {
    let mut items: Vec<String> = Vec::new();

    if style.color.is_gray_alias() {
        items.push("color = gray".to_owned());
    } else if !style.color.is_default() {
        let name = style.color.name();
        if style.color.tint < 1.0 {
            #[allow(clippy::cast_possible_truncation)]
            let percent = (style.color.tint * 100.0).round() as i64;
            items.push(format!("color = {name}!{percent}"));
        } else {
            items.push(format!("color = {name}"));
        }
    }

    if kind == ShapeKind::Text {
        return bracket(&items);
    }

    if style.dashed {
        items.push("dashed".to_owned());
    }
    if kind != ShapeKind::Circle {
        match (style.back_arrow, style.front_arrow) {
            (true, true) => items.push("<->".to_owned()),
            (true, false) => items.push("<-".to_owned()),
            (false, true) => items.push("->".to_owned()),
            (false, false) => {}
        }
        if style.thickness != LineThickness::Thin {
            items.push(style.thickness.token().to_owned());
        }
    }

    bracket(&items)
}

fn bracket(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("[{}]", items.join(", "))
    }
}

fn join_path(points: &[Vec2]) -> String {
    points.iter().map(|p| point(*p)).collect::<Vec<_>>().join("--")
}

fn point(p: Vec2) -> String {
    format!("({},{})", format_number(p.x), format_number(p.y))
}

/// Up to four decimals with trailing zeros trimmed; never `-0`.
fn format_number(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_owned() } else { trimmed.to_owned() }
}
