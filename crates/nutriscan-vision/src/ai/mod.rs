//! Model-facing pieces: backend trait, Gemini client, prompts

pub mod backend;
pub mod gemini;
pub mod prompts;
