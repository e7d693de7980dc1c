//! Third-party AI integrations: grammar checking, image generation, chat

pub mod chat;
pub mod grammar;
pub mod imagegen;
