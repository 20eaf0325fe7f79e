// Proposal generation: budget formatting, the proposal prompt, and the
// completion call that drafts the document.
// All LLM calls go through llm_client.

pub mod budget;
pub mod prompts;
pub mod proposal;
