//! Field validation for notes, categories, tags, and AI prompts.
//!
//! All functions return `Err(String)` with a human-readable message; the API
//! layer wraps these into `CoreError::Validation` / HTTP 400.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a note title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of note content in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Maximum length of a category or tag name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an AI prompt in characters.
pub const MAX_PROMPT_LENGTH: usize = 8_000;

/// Maximum length of a display color string (e.g. `#ff8800ff`).
pub const MAX_COLOR_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a note title: required, non-blank, within the length limit.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate note content. Content may be empty but is length-bounded.
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(format!(
            "Content exceeds maximum length of {MAX_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a category or tag name: required, non-blank, length-bounded.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name must not be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an optional display color string.
///
/// The UI sends CSS color values; the backend only bounds the length and
/// rejects blank strings, it does not parse the color.
pub fn validate_color(color: &str) -> Result<(), String> {
    if color.trim().is_empty() {
        return Err("Color must not be blank".to_string());
    }
    if color.len() > MAX_COLOR_LENGTH {
        return Err(format!(
            "Color exceeds maximum length of {MAX_COLOR_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an AI draft prompt: required, non-blank, length-bounded.
pub fn validate_prompt(prompt: &str) -> Result<(), String> {
    if prompt.trim().is_empty() {
        return Err("Prompt must not be empty".to_string());
    }
    if prompt.chars().count() > MAX_PROMPT_LENGTH {
        return Err(format!(
            "Prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters"
        ));
    }
    Ok(())
}
