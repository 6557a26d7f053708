use serde::{Deserialize, Serialize};

/// The three-part content strategy returned to the client. All fields are
/// required, non-empty strings; a partial object is never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralBlueprint {
    pub short_form: String,
    pub youtube: String,
    pub aesthetic: String,
}

/// Contact-form submission. Every field is optional at the wire level so
/// that validation, not deserialization, decides what a usable request is.
/// `website` is the invisible honeypot field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// One outbound transactional email. Serializes directly as the mail API
/// request payload.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}
