use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub email_content: String,
    #[serde(default)]
    pub tone: Option<String>,
}

// Outbound envelope: {"contents":[{"parts":[{"text":...}]}]}
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

impl GeminiRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_matches_provider_shape() {
        let body = serde_json::to_value(GeminiRequest::from_prompt("P".to_string())).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "P"}]}]}));
    }

    #[test]
    fn generation_request_uses_camel_case() {
        let req: GenerationRequest =
            serde_json::from_str(r#"{"emailContent":"hi","tone":"friendly"}"#).unwrap();
        assert_eq!(req.email_content, "hi");
        assert_eq!(req.tone.as_deref(), Some("friendly"));
    }

    #[test]
    fn tone_may_be_absent_or_null() {
        let absent: GenerationRequest = serde_json::from_str(r#"{"emailContent":"hi"}"#).unwrap();
        assert!(absent.tone.is_none());

        let null: GenerationRequest =
            serde_json::from_str(r#"{"emailContent":"hi","tone":null}"#).unwrap();
        assert!(null.tone.is_none());
    }
}
