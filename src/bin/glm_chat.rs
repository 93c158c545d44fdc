//! Text-only chat completion: one system and one user turn, content printed.
//!
//! ```bash
//! export AI_API_KEY="..."
//! cargo run --bin glm-chat
//! ```

use glm_chat::logging::{init_logging, DEFAULT_LOG_LEVEL};
use glm_chat::{ChatMessage, ChatRequest, Output, RequestIssuer, ZhipuClient};

const MODEL: &str = "glm-4.5";
const TEMPERATURE: f64 = 0.6;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(DEFAULT_LOG_LEVEL);

    let issuer = RequestIssuer::new(ZhipuClient::from_env()?);

    let request = ChatRequest::new(
        MODEL,
        vec![
            ChatMessage::system("你是一个有用的AI助手。"),
            ChatMessage::user("你好，请介绍一下自己。"),
        ],
    )
    .with_temperature(TEMPERATURE);

    issuer
        .issue_and_print(&request, Output::Content, &mut std::io::stdout().lock())
        .await?;

    Ok(())
}
