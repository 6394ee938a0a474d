//! The interactive editor: gesture protocol over the circuit graph.
//!
//! [`Editor`] owns a [`CircuitGraph`] and translates discrete input events
//! (pointer press/move/release, click, escape) into graph mutations. The
//! connection gesture is a two-click protocol tracked by [`Interaction`]:
//! the first click on a terminal arms the gesture, the second click on a
//! compatible terminal of another node completes it. Rendering is pulled
//! by the frontend from the query accessors each frame, never pushed.

use crate::circuit::{CircuitGraph, NodeId, Point, TerminalKind};
use crate::components::NodeKind;

/// Height of the deletion strip anchored to the canvas bottom.
pub const DELETE_ZONE_HEIGHT: f64 = 60.0;

/// The connection gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// No connection gesture in progress.
    Idle,
    /// First terminal clicked; awaiting a compatible terminal on another
    /// node.
    Connecting {
        origin: NodeId,
        terminal: TerminalKind,
    },
}

/// An in-progress body drag.
#[derive(Debug, Clone, Copy)]
struct Drag {
    node: NodeId,
    offset_x: f64,
    offset_y: f64,
}

/// The deletion region: releasing a dragged node here removes it.
#[derive(Debug, Clone, Copy)]
pub struct DeleteZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DeleteZone {
    fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            x: 0.0,
            y: canvas_height - DELETE_ZONE_HEIGHT,
            width: canvas_width,
            height: DELETE_ZONE_HEIGHT,
        }
    }

    /// Whether a canvas point lies inside the zone. The zone spans the
    /// full canvas width and everything below its top edge counts.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y
    }
}

/// The editor controller: owns the graph and mediates every user gesture.
///
/// Frontends construct one editor per canvas and feed it input events; all
/// collaborators are passed in, nothing is global. Invalid gestures are
/// silent no-ops with a human-readable status message; the graph is left
/// structurally consistent after every event.
#[derive(Debug)]
pub struct Editor {
    graph: CircuitGraph,
    interaction: Interaction,
    drag: Option<Drag>,
    /// Palette kind armed for the next canvas press.
    pending_kind: Option<NodeKind>,
    pointer: Point,
    delete_zone: DeleteZone,
    status: String,
}

impl Editor {
    /// Create an editor for a canvas of the given size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            graph: CircuitGraph::new(),
            interaction: Interaction::Idle,
            drag: None,
            pending_kind: None,
            pointer: Point::new(0.0, 0.0),
            delete_zone: DeleteZone::new(canvas_width, canvas_height),
            status: "Ready".to_string(),
        }
    }

    /// Place a node directly, bypassing the palette gesture.
    pub fn place(&mut self, kind: NodeKind, x: f64, y: f64) -> NodeId {
        let id = self.graph.place(kind, x, y);
        self.graph.refresh();
        id
    }

    /// Arm the palette: the next canvas press places a node of this kind.
    pub fn select_kind(&mut self, kind: NodeKind) {
        self.pending_kind = Some(kind);
        self.status = format!("Selected: {}", kind.label());
    }

    /// Pointer press: places the armed palette kind, otherwise starts a
    /// body drag on the node under the pointer.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        if let Some(kind) = self.pending_kind.take() {
            self.graph.place(kind, x, y);
            self.status = "Ready".to_string();
            self.graph.refresh();
            return;
        }
        if let Some(node) = self.graph.node_at(x, y) {
            self.drag = Some(Drag {
                node: node.id,
                offset_x: x - node.x,
                offset_y: y - node.y,
            });
        }
    }

    /// Pointer motion: tracks the preview endpoint and repositions a
    /// dragged node.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        if let Some(drag) = self.drag {
            self.graph
                .move_to(drag.node, x - drag.offset_x, y - drag.offset_y);
        }
    }

    /// Pointer release: a node dropped inside the delete zone is removed.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        if let Some(drag) = self.drag.take() {
            if self.delete_zone.contains(x, y) {
                self.graph.delete(drag.node);
                self.status = "Component deleted".to_string();
                self.graph.refresh();
            }
        }
    }

    /// A click: drives the connection protocol, source toggling, and wire
    /// deletion.
    pub fn clicked(&mut self, x: f64, y: f64) {
        let hit = self
            .graph
            .node_at(x, y)
            .map(|node| (node.id, node.kind, node.connection_point(x, y)));

        let Some((clicked, kind, terminal)) = hit else {
            // Empty canvas: a click near a wire deletes it.
            if let Some(wire) = self.graph.wire_at(x, y) {
                self.graph.disconnect(wire.target, wire.slot);
                self.status = "Connection deleted".to_string();
                self.graph.refresh();
            }
            return;
        };

        match (self.interaction, terminal) {
            (Interaction::Idle, Some(terminal)) => {
                self.interaction = Interaction::Connecting {
                    origin: clicked,
                    terminal,
                };
                self.status = "Connecting...".to_string();
            }
            (
                Interaction::Connecting {
                    origin,
                    terminal: origin_terminal,
                },
                Some(terminal),
            ) => {
                // A second click on the origin node is absorbed: no edge,
                // straight back to idle.
                if origin != clicked {
                    self.complete_connection(origin, origin_terminal, clicked, terminal);
                }
                self.interaction = Interaction::Idle;
                self.graph.refresh();
            }
            (_, None) => {
                // Body click on a source pin toggles its state.
                if kind == NodeKind::Source {
                    self.graph.toggle(clicked);
                    self.graph.refresh();
                }
            }
        }
    }

    /// Resolve the direction of a completed two-click gesture and connect.
    fn complete_connection(
        &mut self,
        origin: NodeId,
        origin_terminal: TerminalKind,
        clicked: NodeId,
        terminal: TerminalKind,
    ) {
        let edge = match (origin_terminal, terminal) {
            (TerminalKind::Output, TerminalKind::Input) => Some((origin, clicked)),
            (TerminalKind::Input, TerminalKind::Output) => Some((clicked, origin)),
            _ => None,
        };
        match edge {
            Some((source, target)) => {
                if self.graph.connect(source, target) {
                    self.status = "Connected!".to_string();
                } else {
                    self.status = "Connection failed: all input slots are full".to_string();
                }
            }
            None => {
                self.status = "Invalid connection: inputs must connect to outputs".to_string();
            }
        }
    }

    /// Escape cancels a pending connection gesture.
    pub fn escape_pressed(&mut self) {
        if matches!(self.interaction, Interaction::Connecting { .. }) {
            self.interaction = Interaction::Idle;
            self.status = "Connection cancelled".to_string();
        }
    }

    /// The circuit graph, for the renderer's node and wire passes.
    pub fn graph(&self) -> &CircuitGraph {
        &self.graph
    }

    /// Mutable graph access for frontends that drive mutations directly.
    pub fn graph_mut(&mut self) -> &mut CircuitGraph {
        &mut self.graph
    }

    /// Current connection gesture state.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Latest status message for the frontend's status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The deletion region, for rendering.
    pub fn delete_zone(&self) -> DeleteZone {
        self.delete_zone
    }

    /// Last observed pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Palette kind armed for placement, if any.
    pub fn pending_kind(&self) -> Option<NodeKind> {
        self.pending_kind
    }

    /// The in-progress connection preview segment: from the origin
    /// terminal to the pointer, snapped to a hovered terminal.
    pub fn preview_line(&self) -> Option<(Point, Point)> {
        let Interaction::Connecting { origin, terminal } = self.interaction else {
            return None;
        };
        let origin_node = self.graph.node(origin)?;
        let start = match terminal {
            TerminalKind::Output => origin_node.output_terminal(),
            TerminalKind::Input => origin_node.pending_input_terminal(),
        };
        let end = match self.graph.node_at(self.pointer.x, self.pointer.y) {
            Some(hover) => match hover.connection_point(self.pointer.x, self.pointer.y) {
                Some(TerminalKind::Output) => hover.output_terminal(),
                Some(TerminalKind::Input) => hover.pending_input_terminal(),
                None => self.pointer,
            },
            None => self.pointer,
        };
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::check_consistency;

    use super::*;

    fn editor() -> Editor {
        Editor::new(800.0, 600.0)
    }

    fn place(editor: &mut Editor, kind: NodeKind, x: f64, y: f64) -> NodeId {
        editor.place(kind, x, y)
    }

    #[test]
    fn test_palette_placement() {
        let mut ed = editor();
        ed.select_kind(NodeKind::And);
        assert_eq!(ed.status(), "Selected: AND");
        ed.pointer_down(300.0, 100.0);
        assert_eq!(ed.status(), "Ready");
        assert_eq!(ed.graph().len(), 1);
        // The palette disarms after one placement.
        ed.pointer_down(400.0, 100.0);
        assert_eq!(ed.graph().len(), 1);
    }

    #[test]
    fn test_click_output_then_input_connects() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let g = place(&mut ed, NodeKind::And, 300.0, 100.0);

        // Source terminal at (100, 120); gate slot 0 terminal on the left
        // edge.
        ed.clicked(100.0, 120.0);
        assert_eq!(
            ed.interaction(),
            Interaction::Connecting {
                origin: a,
                terminal: TerminalKind::Output
            }
        );
        assert_eq!(ed.status(), "Connecting...");

        ed.clicked(270.0, 100.0 - 20.0 + 40.0 / 3.0);
        assert_eq!(ed.interaction(), Interaction::Idle);
        assert_eq!(ed.status(), "Connected!");
        assert_eq!(ed.graph().node(g).unwrap().drivers[0], Some(a));
        check_consistency(ed.graph()).unwrap();
    }

    #[test]
    fn test_click_input_then_output_connects_reversed() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let s = place(&mut ed, NodeKind::Sink, 300.0, 100.0);

        // Sink terminal first (input), then source terminal (output).
        ed.clicked(300.0, 80.0);
        ed.clicked(100.0, 120.0);
        assert_eq!(ed.status(), "Connected!");
        assert_eq!(ed.graph().node(s).unwrap().drivers[0], Some(a));
    }

    #[test]
    fn test_invalid_pairing_reports_message() {
        let mut ed = editor();
        let _a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let b = place(&mut ed, NodeKind::Source, 100.0, 300.0);

        // Output terminal to output terminal.
        ed.clicked(100.0, 120.0);
        ed.clicked(100.0, 320.0);
        assert_eq!(ed.interaction(), Interaction::Idle);
        assert_eq!(
            ed.status(),
            "Invalid connection: inputs must connect to outputs"
        );
        assert!(ed.graph().node(b).unwrap().dependents.is_empty());
    }

    #[test]
    fn test_full_slots_report_failure() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let b = place(&mut ed, NodeKind::Source, 100.0, 300.0);
        let n = place(&mut ed, NodeKind::Not, 300.0, 100.0);
        ed.graph_mut().connect(a, n);

        ed.clicked(100.0, 320.0);
        ed.clicked(270.0, 100.0);
        assert_eq!(ed.status(), "Connection failed: all input slots are full");
        assert_eq!(ed.graph().node(n).unwrap().drivers[0], Some(a));
        assert!(ed.graph().node(b).unwrap().dependents.is_empty());
    }

    #[test]
    fn test_same_node_second_click_absorbed() {
        let mut ed = editor();
        let g = place(&mut ed, NodeKind::And, 300.0, 100.0);

        ed.clicked(270.0, 100.0 - 20.0 + 40.0 / 3.0);
        assert!(matches!(ed.interaction(), Interaction::Connecting { .. }));
        // Second click on the same node's output terminal: no edge, idle.
        ed.clicked(330.0, 100.0);
        assert_eq!(ed.interaction(), Interaction::Idle);
        assert!(ed.graph().node(g).unwrap().drivers.iter().all(Option::is_none));
    }

    #[test]
    fn test_escape_cancels_connection() {
        let mut ed = editor();
        place(&mut ed, NodeKind::Source, 100.0, 100.0);

        ed.clicked(100.0, 120.0);
        assert!(matches!(ed.interaction(), Interaction::Connecting { .. }));
        ed.escape_pressed();
        assert_eq!(ed.interaction(), Interaction::Idle);
        assert_eq!(ed.status(), "Connection cancelled");

        // Escape while idle changes nothing.
        ed.escape_pressed();
        assert_eq!(ed.status(), "Connection cancelled");
    }

    #[test]
    fn test_body_click_toggles_source() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        assert!(!ed.graph().node(a).unwrap().latched);
        ed.clicked(100.0, 100.0);
        assert!(ed.graph().node(a).unwrap().latched);
        ed.clicked(100.0, 100.0);
        assert!(!ed.graph().node(a).unwrap().latched);
    }

    #[test]
    fn test_body_click_on_gate_does_not_toggle() {
        let mut ed = editor();
        let g = place(&mut ed, NodeKind::And, 300.0, 100.0);
        ed.clicked(300.0, 100.0);
        assert!(!ed.graph().node(g).unwrap().latched);
        assert_eq!(ed.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_drag_moves_node() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        ed.pointer_down(105.0, 100.0);
        ed.pointer_move(205.0, 200.0);
        ed.pointer_up(205.0, 200.0);
        let node = ed.graph().node(a).unwrap();
        // The grab offset is preserved.
        assert_eq!(node.x, 200.0);
        assert_eq!(node.y, 200.0);
    }

    #[test]
    fn test_drop_in_delete_zone_deletes() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let s = place(&mut ed, NodeKind::Sink, 300.0, 100.0);
        ed.graph_mut().connect(a, s);

        // Canvas is 800x600, so the zone starts at y = 540.
        ed.pointer_down(100.0, 100.0);
        ed.pointer_move(100.0, 560.0);
        ed.pointer_up(100.0, 560.0);
        assert!(ed.graph().node(a).is_none());
        assert_eq!(ed.status(), "Component deleted");
        assert_eq!(ed.graph().node(s).unwrap().drivers, vec![None]);
        check_consistency(ed.graph()).unwrap();
    }

    #[test]
    fn test_release_outside_zone_keeps_node() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        ed.pointer_down(100.0, 100.0);
        ed.pointer_move(100.0, 300.0);
        ed.pointer_up(100.0, 300.0);
        assert!(ed.graph().node(a).is_some());
    }

    #[test]
    fn test_click_near_wire_disconnects() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let s = place(&mut ed, NodeKind::Sink, 300.0, 140.0);
        ed.graph_mut().connect(a, s);

        // The wire runs from (100, 120) to (300, 120).
        ed.clicked(200.0, 121.0);
        assert_eq!(ed.status(), "Connection deleted");
        assert_eq!(ed.graph().node(s).unwrap().drivers, vec![None]);
        assert!(ed.graph().node(a).unwrap().dependents.is_empty());
    }

    #[test]
    fn test_click_far_from_wire_is_noop() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let s = place(&mut ed, NodeKind::Sink, 300.0, 140.0);
        ed.graph_mut().connect(a, s);

        ed.clicked(200.0, 300.0);
        assert_eq!(ed.graph().node(s).unwrap().drivers, vec![Some(a)]);
    }

    #[test]
    fn test_preview_line_tracks_pointer_and_snaps() {
        let mut ed = editor();
        let _a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let _g = place(&mut ed, NodeKind::And, 300.0, 100.0);

        ed.clicked(100.0, 120.0);
        ed.pointer_move(200.0, 200.0);
        let (start, end) = ed.preview_line().unwrap();
        assert_eq!((start.x, start.y), (100.0, 120.0));
        assert_eq!((end.x, end.y), (200.0, 200.0));

        // Hovering a terminal snaps the endpoint to it.
        let slot0_y = 100.0 - 20.0 + 40.0 / 3.0;
        ed.pointer_move(272.0, slot0_y + 1.0);
        let (_, end) = ed.preview_line().unwrap();
        assert_eq!((end.x, end.y), (270.0, slot0_y));
    }

    #[test]
    fn test_preview_absent_when_idle() {
        let ed = editor();
        assert!(ed.preview_line().is_none());
    }

    #[test]
    fn test_sink_refreshes_after_gestures() {
        let mut ed = editor();
        let a = place(&mut ed, NodeKind::Source, 100.0, 100.0);
        let s = place(&mut ed, NodeKind::Sink, 300.0, 100.0);

        ed.clicked(100.0, 100.0); // toggle source on
        ed.graph_mut().connect(a, s);
        ed.clicked(100.0, 100.0); // toggle off, refresh runs
        ed.clicked(100.0, 100.0); // toggle on, refresh runs
        assert!(ed.graph().node(s).unwrap().latched);
    }
}
