use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AiModelConfig, ServerConfig};
use crate::dispatcher::{self, AgentReply};
use crate::error::AppError;
use crate::llm::{ChatCompletion, ChatRequest};
use crate::prompt;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ChatCompletion>,
    pub ai_model: Arc<AiModelConfig>,
}

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(service_info))
        .route("/api/agent", post(agent_handler))
        .route("/health", get(health_check))
        .with_state(state)
}

/// CORS for the single-page app; an empty origin list allows any origin.
pub fn cors_layer(server: &ServerConfig) -> Result<CorsLayer> {
    let origin = if server.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = server
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

/// Handler for chat messages: LLM completion, then tool dispatch.
pub async fn agent_handler(
    State(state): State<AppState>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentReply>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }

    let request_id = uuid::Uuid::new_v4();
    log::info!("[{}] Agent request: {} chars", request_id, message.len());

    let completion = state
        .llm
        .complete(ChatRequest {
            system_prompt: prompt::system_prompt().to_string(),
            user_prompt: message.to_string(),
            temperature: state.ai_model.temperature,
            max_tokens: state.ai_model.max_tokens,
        })
        .await
        .with_context(|| format!("[{}] LLM completion failed", request_id))?;

    let reply = dispatcher::dispatch(&completion);
    log::info!(
        "[{}] Replied ({} chars, tool: {})",
        request_id,
        reply.reply.len(),
        reply.tool_used.as_deref().unwrap_or("none")
    );

    Ok(Json(reply))
}

/// Handler for the API index
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "PankhAI Backend API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Handler for liveness checks
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Scripted completion source that records the prompts it receives.
    struct ScriptedLlm {
        reply: Result<String, String>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ChatCompletion for ScriptedLlm {
        async fn complete(&self, request: ChatRequest) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(request.user_prompt);
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    fn ai_model() -> AiModelConfig {
        AiModelConfig {
            provider: "groq".to_string(),
            model: "test-model".to_string(),
            endpoint: "http://localhost".to_string(),
            temperature: 0.6,
            max_tokens: 350,
            timeout_secs: 5,
        }
    }

    fn app_with(reply: Result<&str, &str>) -> (Router, Arc<ScriptedLlm>) {
        let llm = Arc::new(ScriptedLlm {
            reply: reply.map(String::from).map_err(String::from),
            seen: Mutex::new(Vec::new()),
        });
        let state = AppState {
            llm: llm.clone(),
            ai_model: Arc::new(ai_model()),
        };
        (router(state), llm)
    }

    fn post_agent(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/agent")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn plain_reply_is_passed_through() {
        let (app, llm) = app_with(Ok("Cramps are common. Try a heating pad."));
        let response = app.oneshot(post_agent(r#"{"message":"  why do I cramp? "}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"reply": "Cramps are common. Try a heating pad."}));
        assert_eq!(llm.seen.lock().unwrap().as_slice(), ["why do I cramp?"]);
    }

    #[tokio::test]
    async fn tool_call_is_executed() {
        let (app, _) = app_with(Ok(r#"{"tool":"nutritionTool","args":{"goal":"reduce bloating"}}"#));
        let response = app.oneshot(post_agent(r#"{"message":"what should I eat?"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["toolUsed"], "nutritionTool");
        assert!(body["reply"].as_str().unwrap().contains("FOODS TO AVOID"));
        assert!(body["advice"]["recommendedFoods"].is_array());
    }

    #[tokio::test]
    async fn cycle_prediction_is_attached() {
        let (app, _) = app_with(Ok(
            r#"{"tool":"cyclePredictor","args":{"lastPeriodDate":"2024-01-01","cycleLength":28}}"#,
        ));
        let response = app.oneshot(post_agent(r#"{"message":"next period?"}"#)).await.unwrap();

        let body = json_body(response).await;
        assert_eq!(body["toolUsed"], "cyclePredictor");
        assert_eq!(body["prediction"]["nextPeriod"], "2024-01-29");
        assert_eq!(body["prediction"]["fertileWindow"]["end"], "2024-01-16");
    }

    #[tokio::test]
    async fn invalid_tool_args_are_not_a_server_error() {
        let (app, _) = app_with(Ok(
            r#"{"tool":"cyclePredictor","args":{"lastPeriodDate":"soon","cycleLength":28}}"#,
        ));
        let response = app.oneshot(post_agent(r#"{"message":"next period?"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body.get("toolUsed").is_none());
        assert!(body["reply"].as_str().unwrap().contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn upstream_failure_returns_generic_500() {
        let (app, _) = app_with(Err("Groq API error (401): invalid api key"));
        let response = app.oneshot(post_agent(r#"{"message":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"error": "Agent error occurred."}));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (app, llm) = app_with(Ok("unused"));
        let response = app.oneshot(post_agent(r#"{"text":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (app, _) = app_with(Ok("unused"));
        let response = app.oneshot(post_agent(r#"{"message":"   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn service_info_and_health() {
        let (app, _) = app_with(Ok("unused"));
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "PankhAI Backend API");
        assert_eq!(body["status"], "running");

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec!["http://localhost:5173".to_string(), "bad\norigin".to_string()],
        };
        assert!(cors_layer(&server).is_err());

        let open = ServerConfig {
            allowed_origins: vec![],
            ..server
        };
        assert!(cors_layer(&open).is_ok());
    }
}
