// LLM prompt constants for proposal generation.

/// Characters of document text shown to the model.
pub const DOCUMENT_EXCERPT_CHARS: usize = 1000;

/// Characters of the disaster article shown to the model.
pub const DISASTER_EXCERPT_CHARS: usize = 500;

/// Output bound for the proposal call.
pub const PROPOSAL_MAX_TOKENS: u32 = 2000;

pub const PROPOSAL_SYSTEM: &str = "You are a professional proposal writer.";

/// Replace: {document}, {disaster_article}, {purchasing_manager},
///          {scope_of_work}, {yearly_budget}
pub const PROPOSAL_PROMPT_TEMPLATE: &str = "Write a proposal based on the following information:
Document: {document}
Disaster Article: {disaster_article}
Purchasing Manager: {purchasing_manager}
Scope of Work: {scope_of_work}
Yearly Budget: {yearly_budget}

The proposal should include:
1. Executive Summary
2. Company Background
3. Proposed Solution (incorporating relevant information from the disaster article)
4. Timeline
5. Budget Breakdown
6. Conclusion";
