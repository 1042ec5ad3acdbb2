//! Chat-completions client that turns a free-text list into [`TargetItem`]s.

use std::time::Duration;

use grocer_core::{AppConfig, TargetItem};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ParserError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const FUNCTION_NAME: &str = "clarify_grocery_list";

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that parses grocery lists into structured data with categories.";

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    /// A JSON document encoded as a string.
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ParsedList {
    items: Vec<TargetItem>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Grocery list parser backed by the `OpenAI` chat-completions API.
pub struct ListParser {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl std::fmt::Debug for ListParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListParser")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl ListParser {
    /// Creates a parser against the production API with the default model.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ParserError> {
        Self::with_base_url(api_key, DEFAULT_MODEL, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Builds a parser from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::MissingApiKey`] if no key is configured, or any
    /// error from [`ListParser::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ParserError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(ParserError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &config.openai_model,
            config.request_timeout_secs,
            &config.openai_base_url,
        )
    }

    /// Creates a parser with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ParserError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ParserError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised).map_err(|e| ParserError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Parses `text` into structured items.
    ///
    /// Items are normalized; items with a blank name are dropped.
    ///
    /// # Errors
    ///
    /// - [`ParserError::Http`] on network failure.
    /// - [`ParserError::Api`] on a non-2xx status.
    /// - [`ParserError::UnexpectedResponse`] if the reply has no call to the
    ///   list function.
    /// - [`ParserError::Deserialize`] if the reply or its arguments are not
    ///   the expected JSON.
    pub async fn parse_list(&self, text: &str) -> Result<Vec<TargetItem>, ParserError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ParserError::Api { status, body });
        }

        let body = response.text().await?;
        let items = decode_items(&body)?;
        tracing::info!(items = items.len(), "parsed grocery list");
        Ok(items)
    }

    fn request_body(&self, text: &str) -> Value {
        json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!(
                    "Parse the following grocery list into structured data. For each item, \
                     include the name, type, brand, quantity, notes, and category (e.g., dairy, \
                     produce, meat, bakery, etc.):\n{text}"
                )}
            ],
            "functions": [list_function()],
            "function_call": {"name": FUNCTION_NAME}
        })
    }
}

/// Schema of the single function the model must call.
fn list_function() -> Value {
    json!({
        "name": FUNCTION_NAME,
        "description": "Clarify and structure each item in the grocery list, including category",
        "parameters": {
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "brand": {"type": "string"},
                            "type": {"type": "string"},
                            "quantity": {"type": "string"},
                            "notes": {"type": "string"},
                            "category": {"type": "string"}
                        },
                        "required": ["name"]
                    }
                }
            },
            "required": ["items"]
        }
    })
}

/// Extracts and normalizes the items from a raw chat-completions body.
fn decode_items(body: &str) -> Result<Vec<TargetItem>, ParserError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ParserError::Deserialize {
            context: "chat completion".to_owned(),
            source: e,
        })?;

    let call = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.function_call)
        .ok_or_else(|| ParserError::UnexpectedResponse("no function call in reply".to_owned()))?;

    if call.name != FUNCTION_NAME {
        return Err(ParserError::UnexpectedResponse(format!(
            "model called '{}' instead of '{FUNCTION_NAME}'",
            call.name
        )));
    }

    let parsed: ParsedList =
        serde_json::from_str(&call.arguments).map_err(|e| ParserError::Deserialize {
            context: format!("{FUNCTION_NAME} arguments"),
            source: e,
        })?;

    let mut items = Vec::with_capacity(parsed.items.len());
    for item in parsed.items {
        match item.normalized() {
            Some(item) => items.push(item),
            None => tracing::warn!("dropping grocery list item with a blank name"),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(name: &str, arguments: &Value) -> String {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "function_call": {"name": name, "arguments": arguments.to_string()}
                }
            }]
        })
        .to_string()
    }

    #[test]
    fn decodes_and_normalizes_items() {
        let body = reply(
            FUNCTION_NAME,
            &json!({"items": [
                {"name": " milk ", "brand": "Horizon", "type": "2%", "category": "dairy"},
                {"name": "eggs", "brand": "", "quantity": "12"},
                {"name": "  "}
            ]}),
        );

        let items = decode_items(&body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "milk");
        assert_eq!(items[0].kind.as_deref(), Some("2%"));
        assert_eq!(items[1].brand, None);
        assert_eq!(items[1].quantity.as_deref(), Some("12"));
    }

    #[test]
    fn wrong_function_is_unexpected() {
        let body = reply("something_else", &json!({"items": []}));
        assert!(matches!(
            decode_items(&body),
            Err(ParserError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn plain_text_reply_is_unexpected() {
        let body = json!({"choices": [{"message": {"content": "Sure! Here is your list"}}]});
        assert!(matches!(
            decode_items(&body.to_string()),
            Err(ParserError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn empty_choices_is_unexpected() {
        assert!(matches!(
            decode_items(r#"{"choices": []}"#),
            Err(ParserError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn malformed_arguments_are_a_deserialize_error() {
        let body = json!({"choices": [{"message": {"function_call": {
            "name": FUNCTION_NAME,
            "arguments": "{\"items\": [unterminated"
        }}}]});
        assert!(matches!(
            decode_items(&body.to_string()),
            Err(ParserError::Deserialize { .. })
        ));
    }

    #[test]
    fn request_forces_the_list_function() {
        let parser = ListParser::with_base_url("k", "gpt-4o-mini", 30, "http://localhost").unwrap();
        let body = parser.request_body("milk, eggs");
        assert_eq!(body["function_call"]["name"], FUNCTION_NAME);
        assert_eq!(body["functions"][0]["parameters"]["required"][0], "items");
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .ends_with("milk, eggs"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let parser = ListParser::new("sk-secret", 30).unwrap();
        let rendered = format!("{parser:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("chat/completions"));
    }
}
