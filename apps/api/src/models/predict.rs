//! Request and response payloads for the prediction API.

use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of the model that produces a cover letter. Any other model
/// identifier is treated as a question generator.
pub const COVER_LETTER_MODEL: &str = "cover-letter";

/// How a model's input is built and how its output is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    CoverLetter,
    InterviewQuestions,
}

impl ModelKind {
    pub fn from_model_id(model_id: &str) -> Self {
        if model_id == COVER_LETTER_MODEL {
            ModelKind::CoverLetter
        } else {
            ModelKind::InterviewQuestions
        }
    }
}

/// Resume fields read by the encoder. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /api/ai/predict`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(rename = "type", default)]
    pub model_type: Option<String>,
    #[serde(default, deserialize_with = "object")]
    pub resume_data: ResumeData,
    #[serde(default, deserialize_with = "object")]
    pub job_posting: JobPosting,
}

impl PredictRequest {
    /// Decodes a request from a JSON object. Derived struct decoding alone would
    /// also accept a positional array.
    pub fn from_object(body: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(body))
    }

    /// The requested model identifier, or `default` when `type` is absent.
    pub fn model_id<'a>(&'a self, default: &'a str) -> &'a str {
        self.model_type.as_deref().unwrap_or(default)
    }
}

/// Decodes a nested field only when it is a JSON object.
fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let body = Map::<String, Value>::deserialize(deserializer)?;
    serde_json::from_value(Value::Object(body)).map_err(de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    pub fn cover_letter(text: String) -> Self {
        Self {
            success: true,
            cover_letter: Some(text),
            questions: None,
            error: None,
        }
    }

    pub fn questions(questions: Vec<String>) -> Self {
        Self {
            success: true,
            cover_letter: None,
            questions: Some(questions),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            cover_letter: None,
            questions: None,
            error: Some(error),
        }
    }
}

/// One entry of `GET /api/ai/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: String,
    pub loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub success: bool,
    pub models: Vec<ModelSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_full_payload() {
        let body = json!({
            "type": "cover-letter",
            "resumeData": { "summary": "Software engineer", "skills": ["Rust"] },
            "jobPosting": { "description": "Looking for a developer", "title": "SWE" }
        });
        let request: PredictRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.model_type.as_deref(), Some("cover-letter"));
        assert_eq!(request.resume_data.summary, "Software engineer");
        assert_eq!(request.job_posting.description, "Looking for a developer");
    }

    #[test]
    fn test_request_missing_fields_default() {
        let request: PredictRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.model_type.is_none());
        assert_eq!(request.resume_data.summary, "");
        assert_eq!(request.job_posting.description, "");
        assert_eq!(request.model_id(COVER_LETTER_MODEL), "cover-letter");
    }

    #[test]
    fn test_request_null_type_uses_default() {
        let request: PredictRequest = serde_json::from_value(json!({ "type": null })).unwrap();
        assert_eq!(request.model_id("interview-questions"), "interview-questions");
    }

    #[test]
    fn test_request_empty_objects_default() {
        let body = json!({ "type": "interview-questions", "resumeData": {}, "jobPosting": {} });
        let request: PredictRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.model_id(COVER_LETTER_MODEL), "interview-questions");
        assert_eq!(request.job_posting.description, "");
    }

    fn object_body(body: Value) -> Map<String, Value> {
        match body {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_from_object_decodes_fields() {
        let body = object_body(json!({
            "type": "interview-questions",
            "jobPosting": { "description": "Rust developer" }
        }));
        let request = PredictRequest::from_object(body).unwrap();
        assert_eq!(request.model_type.as_deref(), Some("interview-questions"));
        assert_eq!(request.job_posting.description, "Rust developer");
    }

    #[test]
    fn test_nested_arrays_are_rejected() {
        let body = object_body(json!({ "resumeData": ["Software engineer"] }));
        assert!(PredictRequest::from_object(body).is_err());

        let body = object_body(json!({ "jobPosting": ["Looking for a developer"] }));
        assert!(PredictRequest::from_object(body).is_err());
    }

    #[test]
    fn test_model_kind_from_id() {
        assert_eq!(
            ModelKind::from_model_id("cover-letter"),
            ModelKind::CoverLetter
        );
        assert_eq!(
            ModelKind::from_model_id("interview-questions"),
            ModelKind::InterviewQuestions
        );
        assert_eq!(
            ModelKind::from_model_id("anything-else"),
            ModelKind::InterviewQuestions
        );
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let value = serde_json::to_value(PredictResponse::cover_letter("hi".to_string())).unwrap();
        assert_eq!(value, json!({ "success": true, "coverLetter": "hi" }));

        let value = serde_json::to_value(PredictResponse::failure("boom".to_string())).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "boom" }));
    }
}
