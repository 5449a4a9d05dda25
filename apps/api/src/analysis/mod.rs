// Resume analysis: the collaborator seam, its backends, the request lifecycle
// controller and the HTTP handlers that expose them.

pub mod analyzer;
pub mod controller;
pub mod fixture;
pub mod handlers;
pub mod prompts;
pub mod sessions;
