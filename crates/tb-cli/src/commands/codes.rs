//! Codes command for listing the task taxonomy.

use std::io::Write;

use anyhow::Result;
use tb_core::{TaskCode, Taxonomy};

/// Writes the code table for a taxonomy.
pub fn run<W: Write>(writer: &mut W, taxonomy: Taxonomy) -> Result<()> {
    writeln!(writer, "{:<6}{:<16}CATEGORY ({taxonomy})", "CODE", "TASK")?;
    for code in TaskCode::ALL {
        let category = taxonomy.category(code);
        writeln!(
            writer,
            "{:<6}{:<16}{}  {}",
            code.as_char(),
            code.name(),
            category.as_char(),
            category.name()
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "Any other code is counted as V (Miscellaneous).")?;

    Ok(())
}
