use crate::captioner::Captioner;
use crate::config::Config;
use crate::constants::{CMD_CAPTION, CMD_SERVE, DEFAULT_LANGUAGE, FLAG_SUMMARY};
use crate::server;
use axum::body::Bytes;
use colored::Colorize;
use image::{ImageFormat, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, CONTENT_TYPE};
use std::{error::Error, io::Cursor};
use thiserror::Error as ThisError;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, ThisError)]
pub enum ImageValidationError {
    #[error("image data is empty")]
    Empty,
    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

/// Upload bytes whose header parses as a raster image.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub bytes: Bytes,
    pub mime_type: &'static str,
}

pub fn build_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    let mut key = HeaderValue::from_str(api_key)?;
    key.set_sensitive(true);
    headers.insert(API_KEY_HEADER, key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

/// Checks the header of an upload without allocating a pixel buffer. The
/// format comes from magic bytes, or from `declared_type` for formats that
/// have none (TGA).
pub fn validate_image(
    bytes: Bytes,
    declared_type: Option<&str>,
) -> Result<ValidatedImage, ImageValidationError> {
    if bytes.is_empty() {
        return Err(ImageValidationError::Empty);
    }
    let format = match image::guess_format(&bytes) {
        Ok(format) => format,
        Err(e) => declared_type
            .and_then(ImageFormat::from_mime_type)
            .ok_or(e)?,
    };
    ImageReader::with_format(Cursor::new(&bytes[..]), format).into_dimensions()?;

    Ok(ValidatedImage {
        bytes,
        mime_type: format.to_mime_type(),
    })
}

pub async fn read_image(image_path: &str) -> Result<ValidatedImage, Box<dyn Error>> {
    let buffer = tokio::fs::read(image_path)
        .await
        .map_err(|e| format!("Failed to open image file: {}: {}", image_path, e))?;
    Ok(validate_image(Bytes::from(buffer), None)?)
}

/// Splits `caption <path> [language] [--summary]` into its parts.
pub fn parse_caption_args(args: &[String]) -> Result<(&str, &str, bool), Box<dyn Error>> {
    let image_path = args
        .get(2)
        .filter(|a| a.as_str() != FLAG_SUMMARY)
        .ok_or("Missing image path")?;
    let rest = args.get(3..).unwrap_or_default();
    let include_summary = rest.iter().any(|a| a == FLAG_SUMMARY);
    let language = rest
        .iter()
        .find(|a| a.as_str() != FLAG_SUMMARY)
        .map_or(DEFAULT_LANGUAGE, String::as_str);

    Ok((image_path.as_str(), language, include_summary))
}

pub async fn caption_file(captioner: &Captioner, args: &[String]) -> Result<(), Box<dyn Error>> {
    let (image_path, language, include_summary) = parse_caption_args(args)?;
    let image = read_image(image_path).await?;

    let spinner = create_spinner("magenta", "Captioning image...".to_string());
    let result = captioner.run(&image, language, include_summary).await;
    spinner.finish_and_clear();
    let captions = result?;

    if captioner.is_demo() {
        println!("{}", "Demo mode: no API key configured.".yellow());
    }
    println!("{} {}", "Caption:".bold().green(), captions.original);
    println!("{} {}", "Improved:".bold().cyan(), captions.improved);
    if let Some(summary) = captions.summary {
        println!("{} {}", "Summary:".bold().magenta(), summary);
    }
    Ok(())
}

pub async fn process_command(
    config: &Config,
    captioner: Captioner,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    match args.get(1).map(String::as_str) {
        None | Some(CMD_SERVE) => server::serve(config, captioner).await,
        Some(CMD_CAPTION) => caption_file(&captioner, args).await,
        Some(other) => Err(format!("Unknown command: {}", other).into()),
    }
}
