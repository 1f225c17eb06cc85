pub mod gemini;
mod http;
pub mod openai;
pub mod traits;
pub mod util;

pub use gemini::{Gemini, GeminiPromptBuilder};
pub use openai::{OpenAi, OpenAiPromptBuilder, StructuredOutput};
pub use traits::{Agent, PromptBuilder};
pub use util::{strip_code_blocks, truncate_to_char_boundary};
