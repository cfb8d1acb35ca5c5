use crate::error::Result;
use moncheck::engine::violation::CheckKind;
use std::io::{self, Write};

pub fn run() -> Result<()> {
    let stdout = io::stdout();
    write_checks(&mut stdout.lock())?;
    Ok(())
}

fn write_checks(writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "{:<24} {:<9} DESCRIPTION", "CHECK", "SEVERITY")?;
    for check in CheckKind::ALL {
        writeln!(
            writer,
            "{:<24} {:<9} {}",
            check.name(),
            check.severity().to_string(),
            check.description()
        )?;
    }
    Ok(())
}
