//! Printing rendered lines to a terminal, optionally with colour.

use crossterm::style::{Attribute, Color, StyledContent, Stylize};
use crossterm::tty::IsTty;
use std::io::{self, Write};

use crate::render::TreeLine;
use crate::tree::NodeKind;

/// Options for terminal output.
pub struct PrintConfig {
    /// Whether to emit colour styling.
    pub use_color: bool,
}

/// Whether stdout is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

/// Escape control characters so names cannot inject terminal sequences or
/// break the one-node-per-line layout.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn styled_name(line: &TreeLine, name: String) -> StyledContent<String> {
    match line.kind {
        NodeKind::Folder => name.with(Color::Blue).attribute(Attribute::Bold),
        NodeKind::File => name.stylize(),
    }
}

/// Write lines to `w`, one per row, sanitising names and optionally colouring
/// connectors and folder names.
pub fn write_lines<W: Write>(w: &mut W, lines: &[TreeLine], config: &PrintConfig) -> io::Result<()> {
    for line in lines {
        let name = sanitize_terminal_text(&line.name);
        if config.use_color {
            let guide = format!("{}{}", line.prefix, line.connector);
            write!(
                w,
                "{}{}{}",
                guide.with(Color::DarkGrey),
                line.marker,
                styled_name(line, name)
            )?;
        } else {
            write!(w, "{}{}{}{}", line.prefix, line.connector, line.marker, name)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
