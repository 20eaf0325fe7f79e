// Field extraction: asks the model for the purchasing manager and the scope
// of work found in the uploaded document.

pub mod fields;
pub mod prompts;
