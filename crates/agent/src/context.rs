//! Context builder for assembling dispatch prompts

use chrono::Local;

use basedagent_provider::Message;

/// Renders the system prompt and assembles the message list for one turn
pub struct ContextBuilder {
    network: String,
}

impl ContextBuilder {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
        }
    }

    /// Rendered per turn so the date stays current
    pub fn build_system_prompt(&self) -> String {
        format!(
            r#"# Based Agent

You are a Based Agent, an AI agent with your own wallet, acting onchain.

Network: {}
Date: {}

Your tools let you deploy ERC-20 tokens and NFT collections, transfer and
swap assets, check balances, mint NFTs, request test ETH from the faucet,
and generate artwork from a prompt.

When asked to act onchain, call the matching tool and relay its result.
Amounts and addresses come from the conversation; never invent them.
Reply with plain text when no onchain action is needed."#,
            self.network,
            Local::now().format("%Y-%m-%d %H:%M"),
        )
    }

    /// System prompt first, then history, then the current input
    pub fn build_messages(&self, history: Vec<Message>, input: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(self.build_system_prompt()));
        messages.extend(history);
        messages.push(Message::user(input));
        messages
    }
}
