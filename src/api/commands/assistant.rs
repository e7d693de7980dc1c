//! Assistant commands: grammar checking, image generation, chat

use crate::core::assistant::{chat, grammar, imagegen};
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::settings::AppSettings;
use crate::shared::types::{
    ChatRequest, ChatResponse, GenerateImageRequest, GenerateImageResponse, GrammarCheckRequest,
    GrammarCheckResponse, SavedImage,
};

fn load_settings() -> CommandResult<AppSettings> {
    AppSettings::load().map_err(CommandError::SystemIO)
}

#[tauri::command]
pub async fn check_grammar(request: GrammarCheckRequest) -> CommandResult<GrammarCheckResponse> {
    let settings = load_settings()?;
    grammar::check_grammar(&settings.api_keys.openai_api_key, &request.text).await
}

#[tauri::command]
pub async fn generate_image(
    request: GenerateImageRequest,
) -> CommandResult<GenerateImageResponse> {
    let settings = load_settings()?;
    imagegen::generate_image(&settings.api_keys.gemini_api_key, &request.prompt).await
}

/// Persist a generated image to disk, returning the written path
#[tauri::command]
pub async fn save_generated_image(
    data_base64: String,
    mime_type: String,
) -> CommandResult<SavedImage> {
    imagegen::save_image(&data_base64, &mime_type)
}

#[tauri::command]
pub async fn send_chat_message(request: ChatRequest) -> CommandResult<ChatResponse> {
    let settings = load_settings()?;
    chat::send_chat(&settings.api_keys.openai_api_key, &request.messages).await
}
