//! Basic OpenAI client usage example

use openai_client::{strip_code_blocks, ChatRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = OpenAIClient::from_env()?;

    println!("=== Chat Completion ===");
    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o")
                .message(Message::system("Answer with a JSON object only."))
                .message(Message::user(r#"Rate "Rust is fast" as {"objective": 0..1}"#))
                .temperature(0.3)
                .max_tokens(100),
        )
        .await?;

    println!("Raw: {}", response.content);
    println!("Cleaned: {}", strip_code_blocks(&response.content));
    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}
