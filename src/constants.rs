pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const PROVIDER: &str = "gemini";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_API_URL: &str = "GEMINI_API_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_TIMEOUT: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_UPLOAD: &str = "MAX_UPLOAD_BYTES";

pub const DEMO_CAPTION: &str = "This is a demo caption. The API key may be missing or invalid.";
pub const DEMO_SUMMARY: &str = "This is a demo summary. The API key may be missing or invalid.";

pub const CMD_SERVE: &str = "serve";
pub const CMD_CAPTION: &str = "caption";
pub const FLAG_SUMMARY: &str = "--summary";

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred while processing the image.";

pub fn caption_prompt(language: &str) -> String {
    format!(
        "Generate a short, descriptive caption in {} for this image.",
        language
    )
}

pub fn improve_prompt(caption: &str) -> String {
    format!(
        "Refine this caption to be more descriptive and engaging: '{}'",
        caption
    )
}

pub fn summary_prompt(language: &str) -> String {
    format!("Describe this image in one paragraph in {}.", language)
}

pub fn demo_improvement(caption: &str) -> String {
    format!("Refined: {}. This is a demo improvement.", caption)
}

pub const NOT_AN_IMAGE: &str = "File must be an image";
pub const MISSING_FILE: &str = "No file uploaded";
pub const INVALID_SUMMARY_FLAG: &str = "include_summary must be a boolean";
