use tracing::debug;

use super::content::{GenerationRequest, Variation};
use super::demo;
use super::llm::{self, ChatProvider, RemoteError};

/// Outcome of a full run: one variation per requested index plus the
/// first remote error seen. Later errors in the same batch are dropped.
#[derive(Debug)]
pub struct Batch {
    pub variations: Vec<Variation>,
    pub first_error: Option<RemoteError>,
}

/// Decides, per variation, whether text comes from the remote provider
/// or the local demo generator. With no provider every variation is
/// produced locally.
pub struct Orchestrator {
    provider: Option<Box<dyn ChatProvider>>,
}

impl Orchestrator {
    pub fn new(provider: Box<dyn ChatProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn local_only() -> Self {
        Self { provider: None }
    }

    /// Produce the text for one variation. The result is never empty:
    /// any remote failure or blank payload drops to the demo generator.
    /// A remote error travels back beside the text, not instead of it.
    pub async fn generate_variation(
        &self,
        request: &GenerationRequest,
        index: u32,
    ) -> (String, Option<RemoteError>) {
        let Some(provider) = self.provider.as_deref() else {
            return (local_text(request, index), None);
        };
        let messages = llm::prompt_for(request);
        match provider
            .complete(
                &request.model,
                request.temperature,
                llm::MAX_COMPLETION_TOKENS,
                &messages,
            )
            .await
        {
            Ok(Some(text)) => (text, None),
            Ok(None) => {
                debug!("Empty remote payload, demo output used for variation {}", index + 1);
                (local_text(request, index), None)
            }
            Err(err) => {
                debug!(
                    "Remote call failed ({}), demo output used for variation {}",
                    err,
                    index + 1
                );
                (local_text(request, index), Some(err))
            }
        }
    }

    /// Run the whole batch in order. Only the first error across the
    /// batch is kept for reporting.
    pub async fn generate_batch(&self, request: &GenerationRequest) -> Batch {
        let mut variations = Vec::with_capacity(request.variation_count as usize);
        let mut first_error: Option<RemoteError> = None;
        for index in 0..request.variation_count {
            let (text, error) = self.generate_variation(request, index).await;
            if first_error.is_none() {
                first_error = error;
            }
            variations.push(Variation {
                index: index + 1,
                text,
            });
        }
        Batch {
            variations,
            first_error,
        }
    }
}

fn local_text(request: &GenerationRequest, index: u32) -> String {
    demo::generate(
        request.platform,
        request.content_type,
        request.tone,
        &request.topic,
        index,
    )
}
