//! Dispatch runner - the tool-calling loop

use serde_json::Value;
use tracing::debug;

use basedagent_provider::{ChatParams, ChatProvider, ChatResponse, Message, ToolCallDef, ToolChoice};

use crate::context::ContextBuilder;
use crate::tools::ToolRegistry;
use crate::{AgentError, Result};

/// Callback invoked with each tool name and its arguments as it dispatches
pub type ToolCallHook = Box<dyn Fn(&str, &Value) + Send + Sync>;

/// Runs the chat-with-tools loop until the model settles on a text reply
pub struct AgentRunner<P: ChatProvider> {
    provider: P,
    model: String,
    tools: ToolRegistry,
    context: ContextBuilder,
    max_iterations: u32,
    max_tokens: u32,
    temperature: f32,
    on_tool_call: Option<ToolCallHook>,
}

impl<P: ChatProvider> AgentRunner<P> {
    pub fn new(
        provider: P,
        model: impl Into<String>,
        tools: ToolRegistry,
        network: &str,
        max_iterations: u32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            tools,
            context: ContextBuilder::new(network),
            max_iterations,
            max_tokens: 4096,
            temperature: 0.7,
            on_tool_call: None,
        }
    }

    /// Override sampling parameters
    pub fn with_params(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Observe tool calls as they dispatch (the CLI echoes them)
    pub fn on_tool_call(mut self, hook: impl Fn(&str, &Value) + Send + Sync + 'static) -> Self {
        self.on_tool_call = Some(Box::new(hook));
        self
    }

    /// Process one user turn against the accumulated history. The caller
    /// owns the history; only the returned reply (and the input) belong in
    /// it, not the intermediate tool traffic.
    pub async fn process(&self, history: Vec<Message>, input: &str) -> Result<String> {
        let mut messages = self.context.build_messages(history, input);

        for round in 1..=self.max_iterations {
            debug!("dispatch round {}", round);

            let response = self
                .provider
                .chat(self.round_params(&messages))
                .await
                .map_err(|e| AgentError::Provider(e.to_string()))?;

            if !response.has_tool_calls() {
                return Ok(response
                    .content
                    .unwrap_or_else(|| "No response from Based Agent.".to_string()));
            }

            self.dispatch_tools(&mut messages, &response).await;
        }

        Err(AgentError::MaxIterations)
    }

    fn round_params(&self, messages: &[Message]) -> ChatParams {
        ChatParams {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: self.tools.definitions(),
            tool_choice: ToolChoice::Auto,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Record the assistant turn, then run each requested tool and append
    /// its result under the call id
    async fn dispatch_tools(&self, messages: &mut Vec<Message>, response: &ChatResponse) {
        messages.push(Message {
            tool_calls: Some(response.tool_calls.iter().map(ToolCallDef::from).collect()),
            ..Message::assistant(response.content.clone().unwrap_or_default())
        });

        for call in &response.tool_calls {
            if let Some(hook) = &self.on_tool_call {
                hook(&call.name, &call.arguments);
            }
            debug!("running tool {}", call.name);

            let result = self
                .tools
                .execute(&call.name, call.arguments.clone())
                .await
                .unwrap_or_else(|e| format!("Error: {}", e));
            messages.push(Message::tool(&call.id, &call.name, &result));
        }
    }
}
