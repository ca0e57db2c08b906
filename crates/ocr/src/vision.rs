use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("vision API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("vision API returned an empty response")]
    EmptyResponse,
}

const EXTRACTION_PROMPT: &str = "\
Extract ALL transactions from this bank statement image.\n\
Return a single JSON object with two keys:\n\
  \"columns\": the column headers of the transaction table, in order\n\
  \"transactions\": an array of objects, one per row, keyed by those column names\n\
Rules:\n\
- Transcribe every value exactly as printed, including thousands separators\n\
  (e.g. \"10,053.38\") and trailing debit markers (e.g. \"7,010.00DR\")\n\
- Combine wrapped description lines into a single space-separated string\n\
- Leave a cell empty (\"\") when the statement shows nothing there\n\
- Return ONLY the JSON object, no markdown or explanation";

/// Client for an OpenAI-compatible vision endpoint. Sends the statement
/// image as a base64 data URL and returns the model's raw JSON payload
/// (code fences already stripped) for `VisionJsonParser` to consume.
pub struct VisionClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl VisionClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub async fn extract_table(&self, image_bytes: &[u8], mime: &str) -> Result<String, VisionError> {
        #[derive(Serialize)]
        struct Req {
            model: String,
            messages: Vec<Msg>,
            max_completion_tokens: u32,
        }
        #[derive(Serialize)]
        struct Msg {
            role: &'static str,
            content: Vec<Part>,
        }
        #[derive(Serialize)]
        #[serde(tag = "type", rename_all = "snake_case")]
        enum Part {
            Text { text: String },
            ImageUrl { image_url: ImageUrl },
        }
        #[derive(Serialize)]
        struct ImageUrl {
            url: String,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }
        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let data_url = format!("data:{mime};base64,{}", BASE64.encode(image_bytes));
        let body = Req {
            model: self.model.clone(),
            messages: vec![Msg {
                role: "user",
                content: vec![
                    Part::Text { text: EXTRACTION_PROMPT.to_string() },
                    Part::ImageUrl { image_url: ImageUrl { url: data_url } },
                ],
            }],
            max_completion_tokens: 4096,
        };

        tracing::debug!(model = %self.model, "requesting vision extraction");
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(VisionError::Api { status: status.as_u16(), body });
        }

        let out: Resp = resp.json().await?;
        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or(VisionError::EmptyResponse)?;

        Ok(strip_code_fences(&content).to_string())
    }
}

/// Models often wrap JSON in a markdown fence despite instructions;
/// peel one layer of ``` fencing (with or without a language tag).
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the fence line ("```json" or bare "```"), then the closing fence.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.rsplit_once("```").map_or(rest, |(body, _)| body).trim()
}
