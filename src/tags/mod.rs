//! Tag extraction through a locally served language model.

pub mod model;
pub mod parse;
pub mod prompt;

pub use model::{LocalModelClient, TextGenerator};
pub use parse::parse_tags;
pub use prompt::build_prompt;

use tracing::debug;

/// Ask `generator` for tags describing `content`.
pub async fn generate_tags<G>(generator: &G, content: &str, max_tags: usize) -> Result<Vec<String>, TagError>
where
    G: TextGenerator + Sync,
{
    let prompt = build_prompt(content, max_tags);
    let response = generator.generate(&prompt).await?;
    debug!(chars = response.len(), "model responded");

    Ok(parse_tags(&response, &prompt, max_tags))
}

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model server returned {0}: {1}")]
    Status(u16, String),

    #[error("Model returned no completion")]
    EmptyCompletion,
}
