//! Command loop for the CLI frontend.
//!
//! Reads editor gestures as text commands from stdin and prints the
//! resulting status and circuit state to stdout. One command per line;
//! blank lines and `#` comments are skipped:
//!
//! ```text
//! place <kind> <x> <y>   place a node directly
//! select <kind>     arm the palette (source, sink, and, or, not, nand, nor, xor)
//! down <x> <y>      pointer press
//! move <x> <y>      pointer motion
//! up <x> <y>        pointer release
//! click <x> <y>     click
//! esc               cancel a pending connection
//! eval <id>         print one node's evaluated value
//! show              print every node and wire with current values
//! quit              exit the loop
//! ```

use std::io::{self, BufRead, Write};

use crate::components::NodeKind;
use crate::editor::Editor;
use crate::error::{Result, SimError};

/// One parsed editor command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Place(NodeKind, f64, f64),
    Select(NodeKind),
    Down(f64, f64),
    Move(f64, f64),
    Up(f64, f64),
    Click(f64, f64),
    Escape,
    Eval(u32),
    Show,
    Quit,
}

impl Command {
    /// Parse one command line. Blank lines and comments parse to `None`.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let mut parts = trimmed.split_whitespace();
        let word = parts.next().unwrap_or_default();
        let command = match word {
            "place" => {
                let name = parts
                    .next()
                    .ok_or_else(|| SimError::command(line_no, "place requires a component kind"))?;
                let kind = NodeKind::from_str(name)
                    .ok_or_else(|| SimError::unknown_kind(name))?;
                let (x, y) = parse_xy(&mut parts, line_no)?;
                Command::Place(kind, x, y)
            }
            "select" => {
                let name = parts
                    .next()
                    .ok_or_else(|| SimError::command(line_no, "select requires a component kind"))?;
                let kind = NodeKind::from_str(name)
                    .ok_or_else(|| SimError::unknown_kind(name))?;
                Command::Select(kind)
            }
            "down" => {
                let (x, y) = parse_xy(&mut parts, line_no)?;
                Command::Down(x, y)
            }
            "move" => {
                let (x, y) = parse_xy(&mut parts, line_no)?;
                Command::Move(x, y)
            }
            "up" => {
                let (x, y) = parse_xy(&mut parts, line_no)?;
                Command::Up(x, y)
            }
            "click" => {
                let (x, y) = parse_xy(&mut parts, line_no)?;
                Command::Click(x, y)
            }
            "esc" | "escape" => Command::Escape,
            "eval" => {
                let id = parts
                    .next()
                    .ok_or_else(|| SimError::command(line_no, "eval requires a node id"))?;
                let id = id
                    .trim_start_matches('N')
                    .parse::<u32>()
                    .map_err(|_| SimError::command(line_no, format!("invalid node id '{id}'")))?;
                Command::Eval(id)
            }
            "show" => Command::Show,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(SimError::command(
                    line_no,
                    format!("unknown command '{other}'"),
                ))
            }
        };
        Ok(Some(command))
    }
}

fn parse_xy<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<(f64, f64)> {
    let x = parts
        .next()
        .ok_or_else(|| SimError::command(line_no, "missing x coordinate"))?;
    let y = parts
        .next()
        .ok_or_else(|| SimError::command(line_no, "missing y coordinate"))?;
    let x = x
        .parse::<f64>()
        .map_err(|_| SimError::command(line_no, format!("invalid x coordinate '{x}'")))?;
    let y = y
        .parse::<f64>()
        .map_err(|_| SimError::command(line_no, format!("invalid y coordinate '{y}'")))?;
    Ok((x, y))
}

/// Run the command loop until EOF or `quit`.
///
/// Parse errors are reported on the output stream and do not stop the
/// loop; I/O failures do.
pub fn run_repl(editor: &mut Editor) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line.map_err(|e| SimError::ReadInput { source: e })?;
        let command = match Command::parse(&line, idx + 1) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}").map_err(|e| SimError::WriteOutput { source: e })?;
                continue;
            }
        };
        if !apply(editor, command, &mut out)? {
            break;
        }
    }
    out.flush().map_err(|e| SimError::WriteOutput { source: e })?;
    Ok(())
}

/// Apply one command. Returns `false` when the loop should stop.
fn apply(editor: &mut Editor, command: Command, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Place(kind, x, y) => {
            let id = editor.place(kind, x, y);
            writeln!(out, "placed {} {}", id, kind.label())
                .map_err(|e| SimError::WriteOutput { source: e })?;
            return Ok(true);
        }
        Command::Select(kind) => editor.select_kind(kind),
        Command::Down(x, y) => editor.pointer_down(x, y),
        Command::Move(x, y) => editor.pointer_move(x, y),
        Command::Up(x, y) => editor.pointer_up(x, y),
        Command::Click(x, y) => editor.clicked(x, y),
        Command::Escape => editor.escape_pressed(),
        Command::Eval(id) => {
            let id = crate::circuit::NodeId(id);
            match editor.graph().node(id) {
                Some(node) => {
                    let value = editor.graph().evaluate(node.id);
                    writeln!(out, "{} = {}", node.id, value)
                        .map_err(|e| SimError::WriteOutput { source: e })?;
                }
                None => {
                    let e = SimError::NodeNotFound { id: id.0 };
                    writeln!(out, "error: {e}").map_err(|e| SimError::WriteOutput { source: e })?;
                }
            }
            return Ok(true);
        }
        Command::Show => {
            print_frame(editor, out)?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }
    writeln!(out, "{}", editor.status()).map_err(|e| SimError::WriteOutput { source: e })?;
    Ok(true)
}

/// Print every node and wire with its current evaluated value.
fn print_frame(editor: &Editor, out: &mut impl Write) -> Result<()> {
    for node in editor.graph().nodes() {
        writeln!(
            out,
            "{} {} ({:.0}, {:.0}) = {}",
            node.id,
            node.kind.label(),
            node.x,
            node.y,
            editor.graph().evaluate(node.id)
        )
        .map_err(|e| SimError::WriteOutput { source: e })?;
    }
    for wire in editor.graph().wires() {
        writeln!(out, "{} -> {}[{}]", wire.driver, wire.target, wire.slot)
            .map_err(|e| SimError::WriteOutput { source: e })?;
    }
    Ok(())
}
