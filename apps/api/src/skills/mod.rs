//! Skill extraction engine: taxonomy, conflict resolution, mention detection, experience
//! parsing and the pipeline that ties them together.

pub mod catalog;
pub mod categorizer;
pub mod conflicts;
pub mod enrichment;
pub mod experience;
pub mod handlers;
pub mod matching;
pub mod mention;
pub mod pipeline;
pub mod prompts;
pub mod taxonomy;
