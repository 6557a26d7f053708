// Adapters layer: concrete clients for the external APIs the site talks to.

pub mod gemini;
pub mod mailer;

pub use gemini::GeminiClient;
pub use mailer::ResendMailer;
