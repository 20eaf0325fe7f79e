// Proposal workflow: explicit state machine, the runner that performs its
// effects, the stateless session snapshot, and the JSON API handlers.

pub mod handlers;
pub mod machine;
pub mod runner;
pub mod snapshot;
