// src/output.rs
use std::fs::File;
use std::io::{self, Write};

/// One row of a convergence sweep: simulation count and the two competing
/// Greek estimates at that count.
pub type ConvergenceRow = (usize, f64, f64);

pub fn write_convergence_to_csv(filename: &str, rows: &[ConvergenceRow]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "n_sims,finite_difference,malliavin")?;
    for (n, fd, mall) in rows {
        writeln!(file, "{},{},{}", n, fd, mall)?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
