pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod merge;
pub mod profiler;
pub mod skills;
