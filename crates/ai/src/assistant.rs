use crate::client::GenerativeClient;
use serde::Serialize;

const EXPERT_HANDOFF_REPLY: &str = "Aap ke sawal ka jawab dena zaroori hai. Kripya apna contact \
     number ya email provide karein, hamara nutrition expert aap se raabta karega.";

const UNAVAILABLE_REPLY: &str = "AI unavailable";

#[derive(Debug, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub needs_expert: bool,
}

/// Chat assistant. Requests that ask for an expert short-circuit to a
/// human-handoff reply; everything else goes to the generative service.
pub struct NutritionAssistant {
    client: Option<GenerativeClient>,
}

impl NutritionAssistant {
    pub fn new(client: Option<GenerativeClient>) -> Self {
        Self { client }
    }

    pub async fn respond(&self, user_message: &str) -> AssistantReply {
        let message = user_message.trim();

        if message.to_lowercase().contains("expert") {
            return AssistantReply {
                response: EXPERT_HANDOFF_REPLY.to_string(),
                needs_expert: true,
            };
        }

        let Some(client) = &self.client else {
            return AssistantReply {
                response: UNAVAILABLE_REPLY.to_string(),
                needs_expert: false,
            };
        };

        let prompt = format!("Roman Urdu mein jawab do: {message}");
        match client.generate(&prompt).await {
            Ok(response) => AssistantReply {
                response,
                needs_expert: false,
            },
            Err(err) => {
                tracing::warn!(error = %err, "assistant reply failed");
                AssistantReply {
                    response: UNAVAILABLE_REPLY.to_string(),
                    needs_expert: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expert_requests_short_circuit() {
        let assistant = NutritionAssistant::new(None);
        let reply = assistant.respond("I want to talk to an EXPERT please").await;
        assert!(reply.needs_expert);
        assert!(reply.response.contains("expert") || reply.response.contains("raabta"));
    }

    #[tokio::test]
    async fn test_unconfigured_assistant_degrades() {
        let assistant = NutritionAssistant::new(None);
        let reply = assistant.respond("kya khana chahiye?").await;
        assert!(!reply.needs_expert);
        assert_eq!(reply.response, UNAVAILABLE_REPLY);
    }
}
