//! AI gateway: meal analysis and the health assistant conversation.
//!
//! Both operations sit behind [`HealthGateway`] so frontends and tests can
//! swap in their own implementation. [`GeminiGateway`] is the production one.

mod chat;
mod gemini;

pub use chat::ChatSession;
pub use gemini::{Content, GeminiClient, GenerateRequest, GenerationConfig, Part};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::types::MealAnalysis;
use serde_json::json;
use std::sync::{Mutex, OnceLock};

/// Shown in place of a meal analysis when the call fails.
pub const MEAL_ERROR_MESSAGE: &str = "Sorry, I couldn't analyze the meal. Please try again.";

/// Appended to the transcript as a model message when an advice call fails.
pub const ADVICE_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// System instruction for the health assistant conversation.
pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are a helpful and encouraging health and wellness assistant. Provide general information and positive suggestions based on user questions. You must explicitly state at the beginning of the conversation that you are not a medical professional and your advice should not be considered a substitute for professional medical consultation. Keep your responses concise, friendly, and easy to understand.";

/// AI operations used by the frontends.
pub trait HealthGateway: Send + Sync {
    /// Analyze a free-text meal description. Stateless between calls.
    fn analyze_meal(&self, description: &str) -> Result<MealAnalysis>;

    /// Send one message in the shared assistant conversation.
    fn health_advice(&self, prompt: &str) -> Result<String>;
}

/// Build the meal analysis prompt.
pub fn meal_prompt(description: &str) -> String {
    format!(
        "Analyze the following meal for its potential impact on blood sugar. Identify ingredients that are good and bad for blood sugar management, provide a brief summary, and suggest healthier alternatives. Important: Do not give medical advice. Meal: \"{}\"",
        description
    )
}

/// Response schema for structured meal analysis.
pub fn meal_analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A brief, 1-2 sentence summary of the meal's impact on blood sugar."
            },
            "good_for_sugar": {
                "type": "ARRAY",
                "description": "List of ingredients or components in the meal that are generally good for blood sugar control.",
                "items": { "type": "STRING" }
            },
            "bad_for_sugar": {
                "type": "ARRAY",
                "description": "List of ingredients or components in the meal that could negatively impact blood sugar.",
                "items": { "type": "STRING" }
            },
            "suggestions": {
                "type": "ARRAY",
                "description": "Actionable suggestions for making the meal healthier or for future meal choices.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "good_for_sugar", "bad_for_sugar", "suggestions"]
    })
}

/// Parse model output into a [`MealAnalysis`].
///
/// The body must be the JSON object itself, optionally inside one code fence.
/// Surrounding prose is rejected.
pub fn parse_meal_analysis(raw: &str) -> Result<MealAnalysis> {
    let body = strip_code_fence(raw.trim());
    Ok(serde_json::from_str::<MealAnalysis>(body)?)
}

/// Remove one surrounding ```` ``` ```` / ```` ```json ```` fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };
    // Drop the language tag on the opening line
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Gateway backed by the Gemini REST API.
pub struct GeminiGateway {
    client: GeminiClient,
    analysis_model: String,
    chat_model: String,
    chat: OnceLock<Mutex<ChatSession>>,
}

impl GeminiGateway {
    /// Build the gateway. A missing API key is a [`Error::Config`].
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        Ok(Self::with_client(GeminiClient::new(config)?, config))
    }

    pub fn with_client(client: GeminiClient, config: &GeminiConfig) -> Self {
        Self {
            client,
            analysis_model: config.analysis_model.clone(),
            chat_model: config.chat_model.clone(),
            chat: OnceLock::new(),
        }
    }

    /// The conversation, created on first use and kept for the process lifetime.
    fn chat_session(&self) -> &Mutex<ChatSession> {
        self.chat.get_or_init(|| {
            tracing::info!(model = %self.chat_model, "Starting assistant conversation");
            Mutex::new(ChatSession::new(
                self.chat_model.clone(),
                ASSISTANT_SYSTEM_INSTRUCTION,
            ))
        })
    }

    fn try_analyze_meal(&self, description: &str) -> Result<MealAnalysis> {
        let request = GenerateRequest {
            contents: vec![Content::text("user", meal_prompt(description))],
            system_instruction: None,
            generation_config: Some(GenerationConfig::json(meal_analysis_schema())),
        };
        let raw = self.client.generate(&self.analysis_model, &request)?;
        parse_meal_analysis(&raw)
    }

    fn try_health_advice(&self, prompt: &str) -> Result<String> {
        let mut session = self
            .chat_session()
            .lock()
            .map_err(|_| Error::Gemini("assistant conversation lock poisoned".to_string()))?;
        let request = session.request_for(prompt);
        let reply = self.client.generate(&session.model, &request)?;
        session.commit(prompt, &reply);
        Ok(reply)
    }
}

impl HealthGateway for GeminiGateway {
    fn analyze_meal(&self, description: &str) -> Result<MealAnalysis> {
        self.try_analyze_meal(description).map_err(|e| {
            tracing::error!(error = %e, "Error analyzing meal with Gemini");
            Error::Analysis(e.to_string())
        })
    }

    fn health_advice(&self, prompt: &str) -> Result<String> {
        self.try_health_advice(prompt).map_err(|e| {
            tracing::error!(error = %e, "Error getting health advice from Gemini");
            Error::Advice(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockGateway {
        meal: Option<String>,
    }

    impl HealthGateway for MockGateway {
        fn analyze_meal(&self, _description: &str) -> Result<MealAnalysis> {
            match &self.meal {
                Some(raw) => parse_meal_analysis(raw),
                None => Err(Error::Analysis("offline".to_string())),
            }
        }

        fn health_advice(&self, prompt: &str) -> Result<String> {
            Ok(format!("echo: {prompt}"))
        }
    }

    #[test]
    fn test_meal_prompt_quotes_description() {
        let prompt = meal_prompt("oatmeal with berries");
        assert!(prompt.starts_with("Analyze the following meal"));
        assert!(prompt.contains("Do not give medical advice"));
        assert!(prompt.ends_with("Meal: \"oatmeal with berries\""));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = meal_analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            vec!["summary", "good_for_sugar", "bad_for_sugar", "suggestions"]
        );
        assert_eq!(schema["properties"]["suggestions"]["items"]["type"], "STRING");
    }

    #[test]
    fn test_parse_meal_analysis_accepts_fenced_json() {
        let raw = "```json\n{\"summary\":\"Balanced.\",\"good_for_sugar\":[\"oats\"],\"bad_for_sugar\":[\"syrup\"],\"suggestions\":[]}\n```";
        let analysis = parse_meal_analysis(raw).unwrap();
        assert_eq!(analysis.summary, "Balanced.");
        assert_eq!(analysis.bad_for_sugar, vec!["syrup"]);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_parse_meal_analysis_accepts_bare_json() {
        let raw = "  {\"summary\":\"ok\",\"good_for_sugar\":[],\"bad_for_sugar\":[],\"suggestions\":[]}\n";
        assert_eq!(parse_meal_analysis(raw).unwrap().summary, "ok");
    }

    #[test]
    fn test_parse_meal_analysis_rejects_prose_around_json() {
        let raw = "I cannot give medical advice, but here: {\"summary\":\"ok\",\"good_for_sugar\":[],\"bad_for_sugar\":[],\"suggestions\":[]} hope that helps";
        let err = parse_meal_analysis(raw).unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let fenced_with_prose = "Here you go:\n```json\n{\"summary\":\"ok\",\"good_for_sugar\":[],\"bad_for_sugar\":[],\"suggestions\":[]}\n```";
        assert!(parse_meal_analysis(fenced_with_prose).is_err());
    }

    #[test]
    fn test_parse_meal_analysis_rejects_wrong_shape() {
        assert!(parse_meal_analysis("no json here").is_err());
        assert!(parse_meal_analysis("{\"summary\": 3}").is_err());
        assert!(parse_meal_analysis("} backwards {").is_err());
    }

    #[test]
    fn test_trait_object_usage() {
        let gateway: Box<dyn HealthGateway> = Box::new(MockGateway { meal: None });
        assert!(matches!(
            gateway.analyze_meal("toast"),
            Err(Error::Analysis(_))
        ));
        assert_eq!(gateway.health_advice("hi").unwrap(), "echo: hi");
    }

    #[test]
    fn test_chat_session_created_once() {
        let config = GeminiConfig::default();
        let client = GeminiClient::with_api_key(&config, "k".to_string()).unwrap();
        let gateway = GeminiGateway::with_client(client, &config);

        assert!(std::ptr::eq(gateway.chat_session(), gateway.chat_session()));

        let session = gateway.chat_session().lock().unwrap();
        assert_eq!(session.system_instruction, ASSISTANT_SYSTEM_INSTRUCTION);
        assert_eq!(session.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_unreachable_backend_maps_to_operation_errors() {
        let config = GeminiConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = GeminiClient::with_api_key(&config, "k".to_string()).unwrap();
        let gateway = GeminiGateway::with_client(client, &config);

        assert!(matches!(
            gateway.analyze_meal("toast"),
            Err(Error::Analysis(_))
        ));
        assert!(matches!(
            gateway.health_advice("hello"),
            Err(Error::Advice(_))
        ));
        // Failed turns are not committed
        assert!(gateway.chat_session().lock().unwrap().history().is_empty());
    }
}
