use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use log::warn;

use crate::basic_types::format_clause;
use crate::engine::variables::Literal;

/// A line-oriented DIMACS-fragment log, e.g. for symmetry-breaking clauses or
/// for every clause the propagator hands to the solver.
#[derive(Debug)]
pub struct ClauseLog {
    writer: BufWriter<File>,
}

impl ClauseLog {
    pub fn create(path: &Path) -> std::io::Result<ClauseLog> {
        Ok(ClauseLog {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    pub fn log_clause(&mut self, literals: &[Literal]) {
        if let Err(error) = writeln!(self.writer, "{}", format_clause(literals)) {
            warn!("failed to write clause log entry: {error}");
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl Drop for ClauseLog {
    fn drop(&mut self) {
        self.flush();
    }
}
