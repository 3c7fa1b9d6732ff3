//! Single-shot client for the remote text-generation collaborator.
//!
//! One user question becomes one `generateContent` request carrying the
//! assistant instruction, the expense context and the question. There is no
//! retry, no streaming and no conversation state; the caller keeps at most
//! one request in flight per question.

use engine::ExpenseRecord;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub use context::expense_context;

mod context;

const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

const ASSISTANT_INSTRUCTION: &str = "You are Gideon, a helpful financial assistant for Budgeteer, \
an expense tracking app. You help users analyze their spending patterns, provide budgeting advice, \
and answer questions about their expenses. Always identify yourself as Gideon when introducing \
yourself.";

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("generation returned no text")]
    EmptyResponse,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Clone, Debug)]
pub struct AdvisorClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AdvisorClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            base_url: GENERATE_URL.to_string(),
            api_key,
        }
    }

    /// Overrides the generation endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Asks one question against the current snapshot.
    pub async fn ask(
        &self,
        records: &[ExpenseRecord],
        question: &str,
    ) -> Result<String, AdvisorError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(records, question),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 500,
            },
        };

        let resp = self
            .client
            .post(format!("{}?key={}", self.base_url, self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AdvisorError::Server { status, message });
        }

        let data: GenerateResponse = resp.json().await?;
        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AdvisorError::EmptyResponse)
    }
}

fn build_prompt(records: &[ExpenseRecord], question: &str) -> String {
    format!(
        "{ASSISTANT_INSTRUCTION}\n\nCurrent user's expense data:\n{}\n\nUser question: {question}\n\n\
Be helpful, concise, and provide actionable financial advice. If asked about expenses, refer to \
the actual data provided above.",
        expense_context(records)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use engine::{Category, ExpenseDraft, ExpenseRecord, MoneyCents};

    use super::*;

    #[test]
    fn prompt_carries_instruction_context_and_question() {
        let records = vec![
            ExpenseRecord::create(
                ExpenseDraft {
                    amount: MoneyCents::new(5000),
                    description: "cinema".to_string(),
                    category: Category::Entertainment,
                    date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                },
                Utc::now(),
            )
            .unwrap(),
        ];

        let prompt = build_prompt(&records, "Where does my money go?");
        assert!(prompt.starts_with("You are Gideon"));
        assert!(prompt.contains("Entertainment: ₹50.00"));
        assert!(prompt.contains("User question: Where does my money go?"));
    }

    #[test]
    fn request_body_uses_camel_case_generation_config() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn empty_candidates_deserialize_to_empty_vec() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
    }
}
