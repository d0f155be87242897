use std::io::{self, Write};

/// Write `Hello NAME` on its own line `count` times
pub fn greet<W: Write>(out: &mut W, name: &str, count: u32) -> io::Result<()> {
    for _ in 0..count {
        writeln!(out, "Hello {name}")?;
    }
    out.flush()
}
