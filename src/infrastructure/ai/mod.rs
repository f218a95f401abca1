//! Outbound text-generation clients.

mod gemini;

pub use gemini::GeminiClient;
