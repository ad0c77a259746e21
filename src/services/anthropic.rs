use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use crate::models::{MatchScore, PersonProfile};
use crate::services::scorer::{validate_match_score, CompatibilityScorer, ScorerError};

/// Default model used when none is configured
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Default Anthropic API URL
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Tool the model is forced to call; its input is the structured score
const SCORE_TOOL_NAME: &str = "record_match_score";

const SYSTEM_PROMPT: &str = "You are a careful relationship compatibility evaluator. \
Use only provided profile data and be concise, fair, and specific.";

/// Connection settings for [`AnthropicScorer`]
#[derive(Debug, Clone)]
pub struct AnthropicOptions {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for AnthropicOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: 1024,
            temperature: 0.2,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Compatibility scorer backed by the Anthropic Messages API
///
/// The model is forced to answer through a single tool whose input schema is
/// the [`MatchScore`] shape, and the returned tool input is validated again
/// on receipt.
pub struct AnthropicScorer {
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f64,
    client: Client,
}

impl AnthropicScorer {
    /// Create a new scorer. A missing or blank API key is accepted here and
    /// reported by [`CompatibilityScorer::ensure_configured`].
    pub fn new(options: AnthropicOptions) -> Result<Self, ScorerError> {
        let client = Client::builder().timeout(options.timeout).build()?;

        let api_key = options
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: options.model,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<&str, ScorerError> {
        self.api_key.as_deref().ok_or(ScorerError::MissingCredential)
    }

    fn build_request(
        &self,
        seeker: &PersonProfile,
        candidate: &PersonProfile,
    ) -> Result<MessagesRequest, ScorerError> {
        let prompt = build_prompt(seeker, candidate)?;

        Ok(MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            tools: vec![Tool {
                name: SCORE_TOOL_NAME.to_string(),
                description: "Record the compatibility evaluation for the candidate.".to_string(),
                input_schema: match_score_schema(),
            }],
            tool_choice: json!({ "type": "tool", "name": SCORE_TOOL_NAME }),
        })
    }
}

#[async_trait]
impl CompatibilityScorer for AnthropicScorer {
    fn ensure_configured(&self) -> Result<(), ScorerError> {
        self.api_key().map(|_| ())
    }

    async fn score(
        &self,
        seeker: &PersonProfile,
        candidate: &PersonProfile,
    ) -> Result<MatchScore, ScorerError> {
        // Checked before anything touches the network
        let api_key = self.api_key()?;
        let body = self.build_request(seeker, candidate)?;
        let url = format!("{}/messages", self.base_url);

        tracing::debug!("Scoring candidate {} with model {}", candidate.id, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ScorerError::ApiError { status, message });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let input = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "tool_use" && block.name.as_deref() == Some(SCORE_TOOL_NAME))
            .and_then(|block| block.input)
            .ok_or_else(|| ScorerError::InvalidResponse("Missing structured score in response".into()))?;

        let score: MatchScore = serde_json::from_value(input)
            .map_err(|e| ScorerError::InvalidResponse(format!("Failed to parse score: {}", e)))?;

        validate_match_score(&score)?;
        Ok(score)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

/// JSON schema of [`MatchScore`] handed to the model as the tool input schema
pub fn match_score_schema() -> Value {
    let short_list = json!({
        "type": "array",
        "items": { "type": "string" },
        "maxItems": 5
    });

    json!({
        "type": "object",
        "properties": {
            "compatibilityScore": { "type": "number", "minimum": 0, "maximum": 100 },
            "shortSummary": { "type": "string", "minLength": 1 },
            "strengths": short_list.clone(),
            "concerns": short_list,
            "suggestedOpeningLine": { "type": "string", "minLength": 1 }
        },
        "required": [
            "compatibilityScore",
            "shortSummary",
            "strengths",
            "concerns",
            "suggestedOpeningLine"
        ],
        "additionalProperties": false
    })
}

fn build_prompt(seeker: &PersonProfile, candidate: &PersonProfile) -> Result<String, ScorerError> {
    let encode = |profile: &PersonProfile| {
        serde_json::to_string(profile)
            .map_err(|e| ScorerError::InvalidResponse(format!("Failed to encode profile {}: {}", profile.id, e)))
    };

    Ok([
        "Evaluate compatibility between two people for a long-term romantic relationship.".to_string(),
        String::new(),
        format!("Record the result with the {} tool only.", SCORE_TOOL_NAME),
        String::new(),
        format!("Seeker profile: {}", encode(seeker)?),
        format!("Candidate profile: {}", encode(candidate)?),
        String::new(),
        "Scoring guidance:".to_string(),
        "- Prioritize shared values and relationship goals.".to_string(),
        "- Consider shared interests and lifestyle compatibility.".to_string(),
        "- Account for potential concerns without being judgmental.".to_string(),
        "- compatibilityScore should be from 0 to 100.".to_string(),
    ]
    .join("\n"))
}

/// Request body for the messages API
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    system: String,
    messages: Vec<Message>,
    tools: Vec<Tool>,
    tool_choice: Value,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    description: String,
    input_schema: Value,
}

/// Response from the messages API
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<Value>,
}
