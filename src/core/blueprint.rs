use crate::core::extract::extract_blueprint;
use crate::domain::model::ViralBlueprint;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{Result, SiteError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay slept after the given failed attempt (1-based): the initial
    /// delay doubled once per prior attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// The full backoff schedule: one delay between each pair of attempts.
    pub fn delays(&self) -> Vec<Duration> {
        (1..self.max_attempts).map(|n| self.delay_after(n)).collect()
    }
}

/// Retry progress for one `generate` call. Attempts are strictly
/// sequential: `Attempting(n)` either returns or moves to `Waiting`, and
/// the wait must fully elapse before `Attempting(n + 1)` starts.
#[derive(Debug, Clone, Copy)]
enum AttemptState {
    Attempting { attempt: u32 },
    Waiting { finished_attempt: u32, delay: Duration },
}

/// Stateless per-call orchestrator: builds the prompt once, then drives the
/// attempt/wait state machine against whatever `TextGenerator` it was given.
pub struct BlueprintService<G: TextGenerator> {
    generator: G,
    policy: RetryPolicy,
}

impl<G: TextGenerator> BlueprintService<G> {
    pub fn new(generator: G) -> Self {
        Self::with_policy(generator, RetryPolicy::default())
    }

    pub fn with_policy(generator: G, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    pub async fn generate(&self, niche: &str) -> Result<ViralBlueprint> {
        let niche = niche.trim();
        if niche.is_empty() {
            return Err(SiteError::NicheRequired);
        }

        let prompt = build_prompt(niche);
        let mut state = AttemptState::Attempting { attempt: 1 };

        loop {
            match state {
                AttemptState::Attempting { attempt } => match self.attempt(&prompt).await {
                    Ok(blueprint) => {
                        tracing::info!(attempt, niche, "Blueprint generated");
                        return Ok(blueprint);
                    }
                    Err(err) => {
                        tracing::warn!(
                            attempt,
                            category = ?err.category(),
                            error = %err,
                            "Blueprint attempt failed"
                        );

                        if attempt >= self.policy.max_attempts {
                            return Err(SiteError::GenerationExhausted {
                                attempts: self.policy.max_attempts,
                                source: Box::new(err),
                            });
                        }

                        state = AttemptState::Waiting {
                            finished_attempt: attempt,
                            delay: self.policy.delay_after(attempt),
                        };
                    }
                },
                AttemptState::Waiting {
                    finished_attempt,
                    delay,
                } => {
                    tokio::time::sleep(delay).await;
                    state = AttemptState::Attempting {
                        attempt: finished_attempt + 1,
                    };
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<ViralBlueprint> {
        let text = self.generator.complete(prompt).await?;
        extract_blueprint(&text)
    }
}

/// One deterministic instruction prompt per call. The niche is the only
/// variable part.
pub fn build_prompt(niche: &str) -> String {
    format!(
        "You are a content strategist for a small media studio. \
         For the niche \"{niche}\", design a viral content blueprint. \
         Respond with exactly one JSON object containing three string fields: \
         \"shortForm\" (a short-form video strategy for Reels and TikTok), \
         \"youtube\" (a long-form YouTube strategy), and \
         \"aesthetic\" (a visual direction for the brand). \
         No markdown, no code fences, pure JSON only."
    )
}
