//! Conflict analysis based on resolution, implementing the 1UIP learning
//! scheme.
mod conflict_analysis_context;
mod resolution_conflict_analyser;

pub(crate) use conflict_analysis_context::ConflictAnalysisContext;
pub(crate) use resolution_conflict_analyser::ConflictAnalysisResult;
pub(crate) use resolution_conflict_analyser::ResolutionConflictAnalyser;
