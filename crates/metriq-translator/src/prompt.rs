//! System prompt for the translation call.

/// Fixed instruction given to the model. The grounding context is appended
/// by [`grounding_message`]; the model must only use vocabulary from it.
pub const SYSTEM_PROMPT: &str = r#"You are an observability expert helping operators generate metric queries from natural language prompts.

Based on the provided system context, translate the user's question into a structured JSON object describing the metric query.

Use this format:
{
    "MetricName": "string",
    "Aggregation": "string",
    "Filters": { "tag_key": "value" },
    "TimeWindow": "1h"
}

Only use valid metrics, aggregations, and filters from the CONTEXT.
Do not invent fields. If you are unsure, return nulls."#;

/// Concatenates the fixed instruction with the projected grounding context.
pub fn grounding_message(context_json: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nCONTEXT:\n{context_json}")
}
