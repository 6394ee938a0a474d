//! # Logicsim Core
//!
//! The core of an interactive logic-circuit editor: users place gates and
//! I/O pins on a 2D canvas, wire them together, toggle inputs, and observe
//! propagated boolean states.
//!
//! This library provides:
//! - A directed-graph circuit model with single-driver input slots and
//!   unbounded fan-out
//! - On-demand recursive boolean evaluation with a cycle cut-off
//! - The two-click connection protocol, drag placement, and deletion
//!   gestures of the editor
//! - A stdin command loop for driving the editor from a terminal (CLI only)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`components`] - node kinds, truth rules, and terminal geometry
//! - [`circuit`] - the node arena, mutation protocol, and evaluation
//! - [`editor`] - the gesture state machine layered on the graph
//! - [`error`] - unified error type for the frontends
//! - [`repl`] - stdin command loop (CLI only)
//!
//! ## Usage
//!
//! ```
//! use logicsim_core::{CircuitGraph, NodeKind};
//!
//! let mut graph = CircuitGraph::new();
//! let a = graph.place(NodeKind::Source, 100.0, 100.0);
//! let b = graph.place(NodeKind::Source, 100.0, 200.0);
//! let gate = graph.place(NodeKind::And, 300.0, 150.0);
//! graph.connect(a, gate);
//! graph.connect(b, gate);
//!
//! graph.toggle(a);
//! graph.toggle(b);
//! assert!(graph.evaluate(gate));
//! ```
//!
//! ## Evaluation Model
//!
//! State is recomputed from scratch on every query: evaluation is a pure
//! recursive walk over the current driver references with no caching and
//! no topological sort. Partially wired gates do not error; a missing
//! driver is an absent contribution, handled per gate kind. Only sink
//! pins cache a value, latched by [`CircuitGraph::refresh`] after every
//! mutation for the render pass.

pub mod circuit;
pub mod components;
pub mod editor;
pub mod error;

#[cfg(feature = "cli")]
pub mod repl;

// Re-export main types for convenience
pub use circuit::{CircuitGraph, NodeId, Point, TerminalKind, Wire};
pub use components::{Node, NodeKind};
pub use editor::{Editor, Interaction};
pub use error::{Result, SimError};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLogicSim;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
