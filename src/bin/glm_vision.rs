//! Multimodal grounding request: an image plus a question asking where an
//! object is. The whole reply message is printed.
//!
//! ```bash
//! export AI_API_KEY="..."
//! RUST_LOG=info cargo run --bin glm-vision
//! ```

use glm_chat::logging::{init_logging, DEFAULT_LOG_LEVEL};
use glm_chat::{
    parse_boxes, ChatMessage, ChatRequest, ContentPart, Output, RequestIssuer, Thinking,
    ZhipuClient,
};

const MODEL: &str = "glm-4.5v";
const IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/3/3a/Cat03.jpg";
const PROMPT: &str = "请找出图中猫的位置，并以 [x1,y1,x2,y2] 的格式给出它的坐标。";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(DEFAULT_LOG_LEVEL);

    let issuer = RequestIssuer::new(ZhipuClient::from_env()?);

    let request = ChatRequest::new(
        MODEL,
        vec![ChatMessage::user_parts(vec![
            ContentPart::image_url(IMAGE_URL),
            ContentPart::text(PROMPT),
        ])],
    )
    .with_thinking(Thinking::enabled());

    let response = issuer
        .issue_and_print(&request, Output::Message, &mut std::io::stdout().lock())
        .await?;

    let boxes = parse_boxes(&response.content_text()?);
    tracing::info!(count = boxes.len(), boxes = ?boxes, "Grounding boxes in reply");

    Ok(())
}
