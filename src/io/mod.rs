pub mod clause_log;
pub mod cube_file;
pub mod dimacs;

pub use clause_log::ClauseLog;
