pub mod blueprint;
pub mod contact;
pub mod extract;

pub use crate::domain::model::{ContactRequest, OutboundMail, ViralBlueprint};
pub use crate::domain::ports::{Mailer, TextGenerator};
pub use crate::utils::error::Result;
