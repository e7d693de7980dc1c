//! Image generation via the Gemini generateContent API

use base64::Engine;
use directories::{ProjectDirs, UserDirs};
use serde_json::{json, Value};

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::{GenerateImageResponse, SavedImage};

const GEMINI_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

pub async fn generate_image(api_key: &str, prompt: &str) -> CommandResult<GenerateImageResponse> {
    if api_key.is_empty() {
        return Err(CommandError::FeatureMissing(
            "Gemini API key is not configured".to_string(),
        ));
    }
    if prompt.trim().is_empty() {
        return Err(CommandError::InvalidInput("Prompt must not be empty".to_string()));
    }

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        GEMINI_IMAGE_MODEL, api_key
    );

    let body = json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        }
    });

    let client = reqwest::Client::new();
    let response = client.post(&url).json(&body).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        eprintln!("[ImageGen] Gemini returned {}: {}", status, detail);
        return Err(CommandError::NetworkError(format!(
            "Image generation failed with status {}",
            status
        )));
    }

    let json: Value = response.json().await?;
    let (mime_type, data_base64) = parse_inline_image(&json).ok_or_else(|| {
        eprintln!("[ImageGen] No image part in response");
        CommandError::NetworkError("Gemini response contained no image".to_string())
    })?;

    Ok(GenerateImageResponse { data_base64, mime_type })
}

/// Decode a generated image and write it under the user's pictures
/// directory (falling back to the app data directory).
pub fn save_image(data_base64: &str, mime_type: &str) -> CommandResult<SavedImage> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data_base64)
        .map_err(|e| CommandError::InvalidInput(format!("Invalid image data: {}", e)))?;

    let dir = UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()))
        .or_else(|| {
            ProjectDirs::from("com", "clipdock", "clipdock").map(|dirs| dirs.data_dir().to_path_buf())
        })
        .ok_or_else(|| CommandError::SystemIO("No writable directory for images".to_string()))?;

    std::fs::create_dir_all(&dir)?;

    let filename = format!(
        "clipdock-{}.{}",
        chrono::Utc::now().format("%Y%m%d-%H%M%S"),
        extension_for_mime(mime_type)
    );
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;

    println!("[ImageGen] Saved generated image to {}", path.display());
    Ok(SavedImage { path: path.to_string_lossy().into_owned() })
}

/// Find the first inline image part in a generateContent response
pub(crate) fn parse_inline_image(json: &Value) -> Option<(String, String)> {
    let parts = json
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    for part in parts {
        if let Some(inline) = part.get("inlineData").or_else(|| part.get("inline_data")) {
            let mime = inline.get("mimeType").or_else(|| inline.get("mime_type"))?.as_str()?;
            let data = inline.get("data")?.as_str()?;
            return Some((mime.to_string(), data.to_string()));
        }
    }
    None
}

pub(crate) fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}
