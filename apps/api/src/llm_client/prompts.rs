// Cross-cutting prompt fragments shared by every LLM-backed analyzer.
// Analyzer-specific templates live next to the analyzer.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps extracted fields faithful to the source text.
pub const EXTRACTION_INSTRUCTION: &str = "\
    CRITICAL: Extract only what the resume states. Do NOT infer, interpolate, or invent \
    contact details, employers, dates, or metrics. When a scalar field is absent, use \"N/A\". \
    When a list has nothing to hold, return an empty array.";
