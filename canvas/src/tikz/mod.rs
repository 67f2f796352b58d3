//! Diagram text: a TikZ-style subset of `\draw` commands.
//!
//! [`parse`] turns text into shapes and [`serialize`] turns shapes back into
//! text. Curves have no textual form, so serialization flattens Bezier
//! shapes into polylines; a round trip yields a `MultiLine` in their place.
//!
//! Supported input, one statement per `;`:
//!
//! ```text
//! \draw[color = red!50, dashed, ->, thick] (0,0) -- (1,0) -- (1,1);
//! \filldraw (0,0) circle(1.50 cm);
//! \draw node at (2,1) {$x^2$};
//! ```

pub mod parse;
pub mod serialize;
pub mod units;

pub use parse::{parse, parse_vector_list};
pub use serialize::{serialize, serialize_shape, wrap_picture};
pub use units::unit_factor;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Why a piece of diagram text could not be imported.
///
/// Every variant carries the offending text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed vector: {0}")]
    MalformedVector(String),
    #[error("malformed number: {0}")]
    MalformedNumber(String),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("unsupported construct: {0}")]
    Unsupported(String),
    #[error("no rule matches: {0}")]
    NoMatch(String),
    #[error("vector list is empty")]
    EmptyVectorList,
}
