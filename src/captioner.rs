use crate::config::Config;
use crate::constants::{
    caption_prompt, demo_improvement, improve_prompt, summary_prompt, DEMO_CAPTION, DEMO_SUMMARY,
    ENV_API_KEY, PROVIDER,
};
use crate::gemini::{GeminiClient, ModelError};
use crate::utils::ValidatedImage;
use reqwest::Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSet {
    pub original: String,
    pub improved: String,
    pub summary: Option<String>,
}

/// Caption source selected once at startup. `Placeholder` never touches the
/// network and answers every call with fixed demo text.
#[derive(Debug, Clone)]
pub enum Captioner {
    Live(GeminiClient),
    Placeholder,
}

impl Captioner {
    pub fn from_config(config: &Config, client: Client) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            log::warn!("{} is not set, serving demo captions", ENV_API_KEY);
            return Captioner::Placeholder;
        };

        match GeminiClient::new(client, &config.api_url, &config.model, api_key) {
            Ok(gemini) => {
                log::info!("Gemini captioner configured with model {}", gemini.model());
                Captioner::Live(gemini)
            }
            Err(e) => {
                log::error!("Failed to configure Gemini client: {}; serving demo captions", e);
                Captioner::Placeholder
            }
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Captioner::Placeholder)
    }

    pub fn provider(&self) -> &'static str {
        PROVIDER
    }

    pub async fn caption_image(
        &self,
        image: &ValidatedImage,
        language: &str,
    ) -> Result<String, ModelError> {
        match self {
            Captioner::Live(gemini) => {
                gemini
                    .generate_content(&caption_prompt(language), &image.bytes, image.mime_type)
                    .await
            }
            Captioner::Placeholder => Ok(DEMO_CAPTION.to_string()),
        }
    }

    pub async fn improve_caption(
        &self,
        caption: &str,
        image: &ValidatedImage,
    ) -> Result<String, ModelError> {
        match self {
            Captioner::Live(gemini) => {
                gemini
                    .generate_content(&improve_prompt(caption), &image.bytes, image.mime_type)
                    .await
            }
            Captioner::Placeholder => Ok(demo_improvement(caption)),
        }
    }

    pub async fn summarize_image(
        &self,
        image: &ValidatedImage,
        language: &str,
    ) -> Result<String, ModelError> {
        match self {
            Captioner::Live(gemini) => {
                gemini
                    .generate_content(&summary_prompt(language), &image.bytes, image.mime_type)
                    .await
            }
            Captioner::Placeholder => Ok(DEMO_SUMMARY.to_string()),
        }
    }

    /// Runs caption, refinement and the optional summary in order. The first
    /// failing call aborts the whole run.
    pub async fn run(
        &self,
        image: &ValidatedImage,
        language: &str,
        include_summary: bool,
    ) -> Result<CaptionSet, ModelError> {
        let original = self.caption_image(image, language).await?;
        let improved = self.improve_caption(&original, image).await?;
        let summary = if include_summary {
            Some(self.summarize_image(image, language).await?)
        } else {
            None
        };

        Ok(CaptionSet {
            original,
            improved,
            summary,
        })
    }
}
