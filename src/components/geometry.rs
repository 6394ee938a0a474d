//! Terminal layout and hit testing.
//!
//! All coordinates derive deterministically from a node's position, kind,
//! and slot count; the renderer and the wire hit test share these
//! functions. Pins are circles with a single terminal offset vertically
//! from center (a source drives from below, a sink is driven from above).
//! Gates are rectangles with input terminals distributed evenly along the
//! left edge and one output terminal centered on the right edge,
//! regardless of fan-out.

use crate::circuit::{Point, TerminalKind};

use super::{Node, NodeKind};

/// Gate body width.
pub const NODE_WIDTH: f64 = 60.0;
/// Gate body height.
pub const NODE_HEIGHT: f64 = 40.0;
/// Body radius of source and sink pins.
pub const PIN_RADIUS: f64 = 20.0;
/// Vertical offset of a pin's terminal from its center.
pub const PIN_TERMINAL_OFFSET: f64 = 20.0;
/// Radius around a terminal accepted by the terminal hit test. Larger
/// than the drawn terminal.
pub const TERMINAL_HIT_RADIUS: f64 = 10.0;
/// Drawn radius of a terminal dot.
pub const TERMINAL_RADIUS: f64 = 5.0;
/// Maximum distance from a wire segment accepted by the wire hit test.
pub const WIRE_HIT_DISTANCE: f64 = 5.0;

impl Node {
    /// Body hit test: circle for pins, rectangle for gates. Used for drag
    /// and click targeting; distinct from the (larger) terminal hit
    /// radius.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        if self.kind.is_gate() {
            dx.abs() <= NODE_WIDTH / 2.0 && dy.abs() <= NODE_HEIGHT / 2.0
        } else {
            (dx * dx + dy * dy).sqrt() <= PIN_RADIUS
        }
    }

    /// Canvas position of the input terminal for `slot`. For pins this is
    /// their single terminal regardless of `slot`.
    pub fn input_terminal(&self, slot: usize) -> Point {
        if self.kind.is_gate() {
            let slots = self.kind.slot_count() as f64;
            Point::new(
                self.x - NODE_WIDTH / 2.0,
                self.y - NODE_HEIGHT / 2.0 + NODE_HEIGHT * (slot as f64 + 1.0) / (slots + 1.0),
            )
        } else {
            self.pin_terminal()
        }
    }

    /// Canvas position of the output terminal.
    pub fn output_terminal(&self) -> Point {
        if self.kind.is_gate() {
            Point::new(self.x + NODE_WIDTH / 2.0, self.y)
        } else {
            self.pin_terminal()
        }
    }

    /// Terminal position by kind, resolving `slot` for gate inputs.
    pub fn terminal_position(&self, terminal: TerminalKind, slot: usize) -> Point {
        match terminal {
            TerminalKind::Input => self.input_terminal(slot),
            TerminalKind::Output => self.output_terminal(),
        }
    }

    /// Where the next connection would land: the input terminal of the
    /// first free slot, falling back to the last slot when full. Used for
    /// the in-progress connection preview.
    pub fn pending_input_terminal(&self) -> Point {
        let slot = self
            .first_free_slot()
            .unwrap_or_else(|| self.kind.slot_count().saturating_sub(1));
        self.input_terminal(slot)
    }

    /// The single terminal of a source or sink pin: below center for a
    /// source, above center for a sink.
    fn pin_terminal(&self) -> Point {
        let offset = if self.kind == NodeKind::Source {
            PIN_TERMINAL_OFFSET
        } else {
            -PIN_TERMINAL_OFFSET
        };
        Point::new(self.x, self.y + offset)
    }

    /// Terminal hit test. Reports which kind of terminal lies within
    /// [`TERMINAL_HIT_RADIUS`] of the query point, or `None`.
    ///
    /// A source pin's terminal drives, so it reports as an output; a sink
    /// pin's terminal reports as an input.
    pub fn connection_point(&self, x: f64, y: f64) -> Option<TerminalKind> {
        let p = Point::new(x, y);
        match self.kind {
            NodeKind::Source => (self.pin_terminal().distance_to(p) <= TERMINAL_HIT_RADIUS)
                .then_some(TerminalKind::Output),
            NodeKind::Sink => (self.pin_terminal().distance_to(p) <= TERMINAL_HIT_RADIUS)
                .then_some(TerminalKind::Input),
            _ => {
                for slot in 0..self.kind.slot_count() {
                    if self.input_terminal(slot).distance_to(p) <= TERMINAL_HIT_RADIUS {
                        return Some(TerminalKind::Input);
                    }
                }
                (self.output_terminal().distance_to(p) <= TERMINAL_HIT_RADIUS)
                    .then_some(TerminalKind::Output)
            }
        }
    }
}

/// Whether a point lies within [`WIRE_HIT_DISTANCE`] of the segment from
/// `a` to `b`.
pub fn point_near_segment(p: Point, a: Point, b: Point) -> bool {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;
    // Project onto the segment, clamped to the endpoints. A zero-length
    // segment degenerates to its start point.
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq).clamp(0.0, 1.0)
    };
    let nearest = Point::new(a.x + t * cx, a.y + t * cy);
    nearest.distance_to(p) <= WIRE_HIT_DISTANCE
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::circuit::NodeId;

    use super::*;

    fn node(kind: NodeKind, x: f64, y: f64) -> Node {
        Node::new(NodeId(0), kind, x, y)
    }

    #[test]
    fn test_gate_input_terminals_distributed() {
        let and = node(NodeKind::And, 300.0, 100.0);
        let t0 = and.input_terminal(0);
        let t1 = and.input_terminal(1);
        assert_relative_eq!(t0.x, 270.0);
        assert_relative_eq!(t0.y, 100.0 - 20.0 + 40.0 / 3.0);
        assert_relative_eq!(t1.x, 270.0);
        assert_relative_eq!(t1.y, 100.0 - 20.0 + 80.0 / 3.0);
    }

    #[test]
    fn test_not_input_terminal_centered() {
        let not = node(NodeKind::Not, 0.0, 0.0);
        let t = not.input_terminal(0);
        assert_relative_eq!(t.x, -30.0);
        assert_relative_eq!(t.y, 0.0);
    }

    #[test]
    fn test_gate_output_terminal_centered_right() {
        let or = node(NodeKind::Or, 300.0, 100.0);
        let t = or.output_terminal();
        assert_relative_eq!(t.x, 330.0);
        assert_relative_eq!(t.y, 100.0);
    }

    #[test]
    fn test_pin_terminals() {
        let source = node(NodeKind::Source, 100.0, 100.0);
        let sink = node(NodeKind::Sink, 100.0, 100.0);
        assert_relative_eq!(source.output_terminal().y, 120.0);
        assert_relative_eq!(sink.input_terminal(0).y, 80.0);
    }

    #[test]
    fn test_contains_point() {
        let source = node(NodeKind::Source, 100.0, 100.0);
        assert!(source.contains_point(100.0, 120.0));
        assert!(!source.contains_point(100.0, 121.0));

        let and = node(NodeKind::And, 0.0, 0.0);
        assert!(and.contains_point(30.0, 20.0));
        assert!(!and.contains_point(31.0, 0.0));
        assert!(!and.contains_point(0.0, 21.0));
    }

    #[test]
    fn test_connection_point_kinds() {
        let source = node(NodeKind::Source, 100.0, 100.0);
        assert_eq!(
            source.connection_point(100.0, 120.0),
            Some(TerminalKind::Output)
        );
        assert_eq!(source.connection_point(100.0, 100.0), None);

        let sink = node(NodeKind::Sink, 100.0, 100.0);
        assert_eq!(
            sink.connection_point(100.0, 80.0),
            Some(TerminalKind::Input)
        );

        let and = node(NodeKind::And, 300.0, 100.0);
        assert_eq!(
            and.connection_point(270.0, 100.0 - 20.0 + 40.0 / 3.0),
            Some(TerminalKind::Input)
        );
        assert_eq!(
            and.connection_point(330.0, 100.0),
            Some(TerminalKind::Output)
        );
        assert_eq!(and.connection_point(300.0, 100.0), None);
    }

    #[test]
    fn test_connection_point_radius() {
        let source = node(NodeKind::Source, 0.0, 0.0);
        // Terminal at (0, 20); the hit radius is 10.
        assert_eq!(
            source.connection_point(0.0, 30.0),
            Some(TerminalKind::Output)
        );
        assert_eq!(source.connection_point(0.0, 30.5), None);
    }

    #[test]
    fn test_pending_input_terminal_advances() {
        let mut and = node(NodeKind::And, 0.0, 0.0);
        let first = and.pending_input_terminal();
        assert_relative_eq!(first.y, and.input_terminal(0).y);
        and.drivers[0] = Some(NodeId(7));
        let second = and.pending_input_terminal();
        assert_relative_eq!(second.y, and.input_terminal(1).y);
    }

    #[test]
    fn test_point_near_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!(point_near_segment(Point::new(50.0, 4.0), a, b));
        assert!(!point_near_segment(Point::new(50.0, 6.0), a, b));
        // Beyond the endpoints the distance is measured to the endpoint.
        assert!(point_near_segment(Point::new(-3.0, 0.0), a, b));
        assert!(!point_near_segment(Point::new(-6.0, 0.0), a, b));
        // Degenerate segment.
        assert!(point_near_segment(Point::new(2.0, 2.0), a, a));
    }
}
