use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::tools::{
    CyclePredictor, MoodEnergyTool, NutritionTool, SmartInsightTool, SymptomAnalyzer, Tool,
};

/// A tool invocation requested by the LLM.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub tool: String,
    pub args: Map<String, Value>,
}

impl ToolCall {
    /// Build from a parsed object; requires a string `tool` and an object `args`.
    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let tool = obj.get("tool")?.as_str()?.to_string();
        let args = obj.get("args")?.as_object()?.clone();
        Some(Self { tool, args })
    }
}

/// Result of routing one completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    /// Raw calculator result, attached under the tool's result key.
    #[serde(flatten)]
    pub result: Map<String, Value>,
}

impl AgentReply {
    pub fn plain(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            tool_used: None,
            result: Map::new(),
        }
    }
}

/// Locate the first JSON object carrying a `"tool"` key in free text.
///
/// Tries the whole (fence-stripped) text first, then every balanced `{...}`
/// span from left to right. Never fails: no object means no tool call.
pub fn extract_tool_object(text: &str) -> Option<Map<String, Value>> {
    let trimmed = strip_code_fence(text.trim());

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(trimmed) {
        if obj.contains_key("tool") {
            return Some(obj);
        }
    }

    for (start, _) in trimmed.match_indices('{') {
        let Some(end) = balanced_object_end(&trimmed[start..]) else {
            continue;
        };
        let candidate = &trimmed[start..start + end];
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(obj)) if obj.contains_key("tool") => return Some(obj),
            Ok(_) => {}
            Err(e) => log::debug!("Dispatcher: skipping unparsable span: {}", e),
        }
    }

    None
}

/// Parse a tool call out of a completion, if it contains a well-formed one.
pub fn parse_tool_call(text: &str) -> Option<ToolCall> {
    extract_tool_object(text).and_then(|obj| ToolCall::from_object(&obj))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decode arguments, run the calculator and format its reply.
fn invoke<T: Tool>(tool: &T, args: Map<String, Value>) -> Result<AgentReply, ToolError> {
    let args: T::Args =
        serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidArguments {
            tool: tool.name().to_string(),
            reason: e.to_string(),
        })?;

    let output = tool.run(&args)?;
    let reply = tool.format(&args, &output);

    let value = serde_json::to_value(&output).map_err(|e| ToolError::InvalidArguments {
        tool: tool.name().to_string(),
        reason: e.to_string(),
    })?;
    let mut result = Map::new();
    result.insert(tool.result_key().to_string(), value);

    Ok(AgentReply {
        reply,
        tool_used: Some(tool.name().to_string()),
        result,
    })
}

/// Route a completion to the named calculator, in registration order.
///
/// Returns `None` when the call names no registered tool.
fn route(call: ToolCall) -> Option<Result<AgentReply, ToolError>> {
    let ToolCall { tool, args } = call;
    let outcome = match tool.as_str() {
        name if name == CyclePredictor.name() => invoke(&CyclePredictor, args),
        name if name == SymptomAnalyzer.name() => invoke(&SymptomAnalyzer, args),
        name if name == NutritionTool.name() => invoke(&NutritionTool, args),
        name if name == MoodEnergyTool.name() => invoke(&MoodEnergyTool, args),
        name if name == SmartInsightTool.name() => invoke(&SmartInsightTool, args),
        _ => return None,
    };
    Some(outcome)
}

/// Turn a raw LLM completion into the reply sent to the caller.
///
/// Anything that is not a valid call to a registered tool is passed through
/// as plain text. A tool that rejects its arguments answers with the
/// validation message instead of a result.
pub fn dispatch(completion: &str) -> AgentReply {
    let Some(call) = parse_tool_call(completion) else {
        return AgentReply::plain(completion);
    };

    let name = call.tool.clone();
    match route(call) {
        Some(Ok(reply)) => {
            log::info!("Dispatcher: executed {}", name);
            reply
        }
        Some(Err(e)) => {
            log::warn!("Dispatcher: {} rejected its arguments: {:?}", name, e);
            AgentReply::plain(e.to_string())
        }
        None => {
            log::info!("Dispatcher: unknown tool '{}', returning text", name);
            AgentReply::plain(completion)
        }
    }
}
