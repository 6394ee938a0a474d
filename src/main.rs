//! Logicsim - Interactive Logic-Circuit Editor
//!
//! Drives the editor with textual gesture commands read from stdin and
//! prints the resulting circuit state to stdout.
//!
//! # Usage
//!
//! ```bash
//! printf 'select source\ndown 100 100\nclick 100 100\nshow\n' | logicsim
//! ```

use clap::Parser;
use logicsim_core::{
    editor::Editor, error::Result, repl::run_repl, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};

/// Interactive logic-circuit editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    height: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut editor = Editor::new(args.width, args.height);

    run_repl(&mut editor)
}
