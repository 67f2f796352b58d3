//! Shape authoring and diagram-text engine.
//!
//! This crate owns the diagram: the shape model, the per-tick authoring state
//! machine that builds shapes from pointer and key input, the curve and
//! polygon math shared by rendering and export, and the parser/serializer for
//! TikZ-style diagram text. It performs no I/O. The host feeds it input frames,
//! draws the [`render::Scene`] it returns, and applies the [`engine::Action`]s
//! it emits (for example, freeing label rasters).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Authoring session and its construction state machine |
//! | [`doc`] | Shape model, styles and the ordered diagram |
//! | [`tikz`] | Diagram-text parser and serializer |
//! | [`bezier`] | Bernstein-polynomial curve evaluation |
//! | [`triangulate`] | Ear-clipping triangulation for filled polygons |
//! | [`render`] | Backend-agnostic display list |
//! | [`camera`] | Pan/zoom camera, coordinate conversions, snapping |
//! | [`input`] | Draw modes, input frames and drag targets |
//! | [`hit`] | Bezier handle hit-testing and dragging |
//! | [`config`] | Authoring style defaults and global toggles |
//! | [`palette`] | Named color palette |
//! | [`geom`] | 2-D vector arithmetic |
//! | [`consts`] | Shared numeric constants (grid, zoom limits, step counts) |

pub mod bezier;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod palette;
pub mod render;
pub mod tikz;
pub mod triangulate;
