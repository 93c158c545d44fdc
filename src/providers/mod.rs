//! Chat transport implementations
//!
//! - **zhipu**: Zhipu GLM open platform, OpenAI-compatible `chat/completions`

pub mod zhipu;

pub use zhipu::ZhipuClient;
