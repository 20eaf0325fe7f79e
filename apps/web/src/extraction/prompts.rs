// LLM prompt constants for field extraction.

/// Characters of document text shown to the model.
pub const DOCUMENT_EXCERPT_CHARS: usize = 1000;

/// Output bound for the extraction call.
pub const FIELD_EXTRACTION_MAX_TOKENS: u32 = 200;

pub const FIELD_EXTRACTION_SYSTEM: &str =
    "You are an expert at extracting specific information from text.";

/// Replace `{text}` before sending.
pub const FIELD_EXTRACTION_PROMPT_TEMPLATE: &str = "Extract the purchasing manager details and scope of work from the following text:
{text}

Format the response as:
Purchasing Manager: [extracted details]
Scope of Work: [extracted details]";
