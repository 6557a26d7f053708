use crate::domain::model::ViralBlueprint;
use crate::utils::error::{Result, SiteError};
use serde_json::Value;

/// Best-effort scan for a JSON object embedded in model chatter: the span
/// from the first `{` to the last `}`, greedy. Deliberately not a JSON
/// tokenizer; a stricter balanced-brace scanner can replace this without
/// touching the retry loop.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start <= end).then(|| &text[start..=end])
}

/// Pulls the three-field blueprint out of one raw model reply. Each failure
/// mode gets its own error so the retry loop can log what actually went
/// wrong on the attempt.
pub fn extract_blueprint(text: &str) -> Result<ViralBlueprint> {
    let span = extract_json_span(text).ok_or(SiteError::NoJsonFound)?;
    let value: Value = serde_json::from_str(span)?;

    Ok(ViralBlueprint {
        short_form: required_field(&value, "shortForm")?,
        youtube: required_field(&value, "youtube")?,
        aesthetic: required_field(&value, "aesthetic")?,
    })
}

fn required_field(value: &Value, field: &'static str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or(SiteError::IncompleteBlueprint { field })
}
