use std::io::{self, Write};

/// Rings the terminal bell once.
pub fn beep() -> io::Result<()> {
    ring(&mut io::stdout())
}

fn ring(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}
