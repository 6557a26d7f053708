use crate::domain::model::OutboundMail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// One prompt in, the model's raw text out. The blueprint retry loop only
/// ever talks to this seam, so it can be exercised without a network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutboundMail) -> Result<()>;
}
