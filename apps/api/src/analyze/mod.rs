// Analyze API: form intake, resume text resolution, collaborator fan-out, persistence.

pub mod handlers;
pub mod input;
pub mod orchestrator;
