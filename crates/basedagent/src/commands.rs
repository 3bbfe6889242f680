//! Based Agent command implementations

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use basedagent_agent::tools::register_default_tools;
use basedagent_agent::{AgentRunner, BasedAgent, ToolRegistry};
use basedagent_config::{Config, Credentials};
use basedagent_onchain::{CdpProvider, Network, WalletStore};
use basedagent_provider::{
    ChatParams, ChatProvider, ImageParams, Message, OpenAiImageProvider, OpenAiProvider,
};

/// The fixed prompt the autonomous loop feeds the agent each round
const AUTO_THOUGHT: &str = "Be creative and do something interesting on the Base blockchain. \
    Don't take any more input from me. Choose an action and execute it now. \
    Choose those that highlight your identity and abilities best.";

/// System prompt casting the guide model as a user steering the agent
const GUIDE_PROMPT: &str =
    "You are a user guiding a blockchain agent through various tasks on the Base blockchain...";

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Auto,
    TwoAgent,
}

impl Mode {
    /// Accepts the menu number or the mode name
    fn parse(s: &str) -> Option<Mode> {
        match s {
            "1" | "chat" => Some(Mode::Chat),
            "2" | "auto" => Some(Mode::Auto),
            "3" | "two-agent" => Some(Mode::TwoAgent),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Auto => "auto",
            Mode::TwoAgent => "two-agent",
        }
    }
}

/// Read a trimmed line from stdin. None once stdin is closed.
fn read_line() -> Option<String> {
    let mut input = String::new();
    match std::io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Prompt until a valid mode is chosen
fn choose_mode() -> Result<Mode> {
    loop {
        println!("\nAvailable modes:");
        println!("1. chat    - Interactive chat mode");
        println!("2. auto    - Autonomous action mode");
        println!("3. two-agent - AI-to-agent conversation mode");

        print!("\nChoose a mode (enter number or name): ");
        std::io::stdout().flush()?;

        let choice = match read_line() {
            Some(line) => line.to_lowercase(),
            None => anyhow::bail!("stdin closed before a mode was chosen"),
        };

        if let Some(mode) = Mode::parse(&choice) {
            return Ok(mode);
        }
        println!("Invalid choice. Please try again.");
    }
}

/// Everything a mode loop needs
struct AgentSetup {
    runner: AgentRunner<OpenAiProvider>,
    guide: OpenAiProvider,
    config: Config,
}

/// Wire credentials, providers and tools into a ready runner
async fn build_agent() -> Result<AgentSetup> {
    let creds = Credentials::from_env()?;
    let config = Config::load().await?;

    let network: Network = config
        .network_id()
        .parse()
        .with_context(|| format!("Invalid network in config: {}", config.network_id()))?;

    let onchain = CdpProvider::new(
        creds.cdp_api_key_name.clone(),
        creds.cdp_private_key.clone(),
        config.onchain.api_base.clone(),
    );
    let images = OpenAiImageProvider::new(
        creds.openai_api_key.clone(),
        config.openai.api_base.clone(),
    );
    let store = WalletStore::new(&creds.wallet_path);

    let art = ImageParams {
        model: config.art.model.clone(),
        size: config.art.size.clone(),
        quality: config.art.quality.clone(),
        ..ImageParams::default()
    };

    let agent = Arc::new(
        BasedAgent::new(Arc::new(onchain), Arc::new(images), store, network).with_art(art),
    );

    let mut tools = ToolRegistry::new();
    register_default_tools(&mut tools, agent);

    let provider = OpenAiProvider::new(
        creds.openai_api_key.clone(),
        config.openai.api_base.clone(),
        Some(config.default_model()),
    );
    let guide = OpenAiProvider::new(
        creds.openai_api_key,
        config.openai.api_base.clone(),
        Some(config.guide_model()),
    );

    let runner = AgentRunner::new(
        provider,
        config.default_model(),
        tools,
        network.id(),
        config.max_tool_iterations(),
    )
    .with_params(config.agent.max_tokens, config.agent.temperature)
    .on_tool_call(|name, args| println!("Based Agent: {}", fmt_tool_call(name, args)));

    Ok(AgentSetup {
        runner,
        guide,
        config,
    })
}

/// Entry point for the mode loops. Prompts when no mode was given.
pub async fn run_mode(mode: Option<Mode>) -> Result<()> {
    println!("Starting Based Agent...");

    let mode = match mode {
        Some(mode) => mode,
        None => choose_mode()?,
    };

    let setup = build_agent().await?;

    println!("\nStarting {} mode...", mode.label());
    match mode {
        Mode::Chat => run_chat(&setup).await,
        Mode::Auto => run_auto(&setup).await,
        Mode::TwoAgent => run_two_agent(&setup).await,
    }
}

/// Interactive chat loop
async fn run_chat(setup: &AgentSetup) -> Result<()> {
    println!("Type 'exit' to quit");

    let mut history: Vec<Message> = Vec::new();

    loop {
        print!("\nPrompt: ");
        std::io::stdout().flush()?;

        let input = match read_line() {
            Some(line) => line,
            None => break,
        };
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        match setup.runner.process(history.clone(), &input).await {
            Ok(reply) => {
                println!("\nBased Agent: {}", reply);
                history.push(Message::user(&input));
                history.push(Message::assistant(&reply));
            }
            Err(e) => error!("Error processing message: {}", e),
        }
    }

    Ok(())
}

/// Autonomous loop. Runs until the process is killed.
async fn run_auto(setup: &AgentSetup) -> Result<()> {
    println!("Starting autonomous Based Agent loop...");

    let interval = Duration::from_secs(setup.config.auto_interval_secs());
    let mut history: Vec<Message> = Vec::new();

    loop {
        println!("\nAgent's Thought: {}", AUTO_THOUGHT);

        match setup.runner.process(history.clone(), AUTO_THOUGHT).await {
            Ok(reply) => {
                println!("\nBased Agent: {}", reply);
                history.push(Message::user(AUTO_THOUGHT));
                history.push(Message::assistant(&reply));
                tokio::time::sleep(interval).await;
            }
            Err(e) => {
                error!("Error in autonomous loop: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

/// Conversation loop where a guide model plays the user
async fn run_two_agent(setup: &AgentSetup) -> Result<()> {
    println!("Starting OpenAI-Based Agent conversation loop...");

    let mut history: Vec<Message> = Vec::new();
    let mut guide_messages = vec![
        Message::system(GUIDE_PROMPT),
        Message::user(
            "Start a conversation with the Based Agent and guide it through some blockchain tasks.",
        ),
    ];

    loop {
        match guide_round(setup, &mut history, &mut guide_messages).await {
            Ok(()) => {
                print!("\nPress Enter to continue the conversation, or type 'exit' to end: ");
                std::io::stdout().flush()?;

                match read_line() {
                    Some(line) if line.eq_ignore_ascii_case("exit") => break,
                    Some(_) => {}
                    None => break,
                }
            }
            Err(e) => {
                error!("Error in conversation loop: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }

    Ok(())
}

/// One guide-agent exchange
async fn guide_round(
    setup: &AgentSetup,
    history: &mut Vec<Message>,
    guide_messages: &mut Vec<Message>,
) -> Result<()> {
    let params = ChatParams {
        model: setup.config.guide_model(),
        messages: guide_messages.clone(),
        ..ChatParams::default()
    };
    let guide_reply = setup.guide.chat(params).await?.content.unwrap_or_default();

    println!("\nOpenAI Guide: {}", guide_reply);
    guide_messages.push(Message::assistant(&guide_reply));

    let reply = setup.runner.process(history.clone(), &guide_reply).await?;
    println!("\nBased Agent: {}", reply);

    history.push(Message::user(&guide_reply));
    history.push(Message::assistant(&reply));

    guide_messages.push(Message::user(format!("Based Agent response: {}", reply)));

    Ok(())
}

/// Show status
pub async fn status_command() -> Result<()> {
    let config_path = basedagent_config::config_path();

    println!("Based Agent Status");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config:      {} {}",
        config_path.display(),
        if config_path.exists() {
            "[OK]"
        } else {
            "[Missing]"
        }
    );

    let config = Config::load().await?;
    println!("Model:       {}", config.default_model());
    println!("Guide model: {}", config.guide_model());
    println!("Network:     {}", config.network_id());

    match Credentials::from_env() {
        Ok(creds) => {
            println!("Credentials: [Set]");
            println!(
                "Wallet:      {} {}",
                creds.wallet_path.display(),
                if creds.wallet_path.exists() {
                    "[Saved]"
                } else {
                    "[Not yet created]"
                }
            );
        }
        Err(e) => {
            println!("Credentials: [Missing] ({})", e);
        }
    }

    Ok(())
}

/// Render a tool call the way the dispatch trace prints it
fn fmt_tool_call(name: &str, args: &Value) -> String {
    let rendered = match args.as_object() {
        Some(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", "),
        None => args.to_string(),
    };
    format!("{}({})", name, rendered)
}
