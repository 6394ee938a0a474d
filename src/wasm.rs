//! WASM bindings for Logicsim Core.
//!
//! This module provides JavaScript-friendly bindings for driving the
//! editor from a browser canvas.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLogicSim } from 'logicsim_core';
//!
//! await init();
//!
//! const sim = new WasmLogicSim(canvas.width, canvas.height);
//! sim.select_kind('and');
//! canvas.addEventListener('mousedown', e => sim.pointer_down(e.offsetX, e.offsetY));
//! canvas.addEventListener('mousemove', e => sim.pointer_move(e.offsetX, e.offsetY));
//! canvas.addEventListener('mouseup', e => sim.pointer_up(e.offsetX, e.offsetY));
//! canvas.addEventListener('click', e => sim.clicked(e.offsetX, e.offsetY));
//!
//! // Render pass, each frame:
//! for (const id of sim.node_ids()) {
//!   drawNode(sim.node_kind(id), sim.node_x(id), sim.node_y(id), sim.evaluate(id));
//! }
//! statusBar.textContent = sim.status;
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::NodeId;
use crate::components::NodeKind;
use crate::editor::Editor;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible logic-circuit editor.
///
/// This struct wraps the native [`Editor`] and exposes its gesture events
/// and render queries with JavaScript-friendly types.
#[wasm_bindgen]
pub struct WasmLogicSim {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmLogicSim {
    /// Create a new editor for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: f64, canvas_height: f64) -> WasmLogicSim {
        WasmLogicSim {
            editor: Editor::new(canvas_width, canvas_height),
        }
    }

    /// Arm the palette with a component kind ("source", "sink", "and",
    /// "or", "not", "nand", "nor", "xor").
    pub fn select_kind(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind = NodeKind::from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown component kind '{kind}'")))?;
        self.editor.select_kind(kind);
        Ok(())
    }

    /// Pointer press event.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.editor.pointer_down(x, y);
    }

    /// Pointer motion event.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.editor.pointer_move(x, y);
    }

    /// Pointer release event.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.editor.pointer_up(x, y);
    }

    /// Click event.
    pub fn clicked(&mut self, x: f64, y: f64) {
        self.editor.clicked(x, y);
    }

    /// Escape key event.
    pub fn escape_pressed(&mut self) {
        self.editor.escape_pressed();
    }

    /// Latest status message for the status line.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.editor.status().to_string()
    }

    /// Number of placed nodes.
    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize {
        self.editor.graph().len()
    }

    /// Ids of every placed node, in placement order.
    pub fn node_ids(&self) -> Vec<u32> {
        self.editor.graph().nodes().map(|n| n.id.0).collect()
    }

    /// A node's kind label, or `undefined` for a stale id.
    pub fn node_kind(&self, id: u32) -> Option<String> {
        self.editor
            .graph()
            .node(NodeId(id))
            .map(|n| n.kind.label().to_string())
    }

    /// A node's x position.
    pub fn node_x(&self, id: u32) -> Option<f64> {
        self.editor.graph().node(NodeId(id)).map(|n| n.x)
    }

    /// A node's y position.
    pub fn node_y(&self, id: u32) -> Option<f64> {
        self.editor.graph().node(NodeId(id)).map(|n| n.y)
    }

    /// A node's current evaluated value. Stale ids read as false.
    pub fn evaluate(&self, id: u32) -> bool {
        self.editor.graph().evaluate(NodeId(id))
    }

    /// Every wire as a flat `[driver, target, slot, ...]` triple list,
    /// for the renderer's wire pass.
    pub fn wires(&self) -> Vec<u32> {
        let mut flat = Vec::new();
        for wire in self.editor.graph().wires() {
            flat.push(wire.driver.0);
            flat.push(wire.target.0);
            flat.push(wire.slot as u32);
        }
        flat
    }

    /// Whether a connection gesture is in progress.
    #[wasm_bindgen(getter)]
    pub fn connecting(&self) -> bool {
        self.editor.preview_line().is_some()
    }

    /// The in-progress connection preview as `[x1, y1, x2, y2]`, or
    /// `undefined` when idle.
    pub fn preview_line(&self) -> Option<Vec<f64>> {
        self.editor
            .preview_line()
            .map(|(start, end)| vec![start.x, start.y, end.x, end.y])
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
