//! Marketing copy, dashboard analysis, product image editing, and the
//! promotional video job.

use super::api_types::{
    ContentPart, GenerateRequest, VideoStatusResponse, VideoSubmitRequest, VideoSubmitResponse,
};
use super::AiGateway;
use crate::errors::{Error, Result};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const COPY_FALLBACK: &str = "No se pudo generar el copy.";
const ANALYSIS_FALLBACK: &str = "No se pudieron analizar los datos.";

impl AiGateway {
    /// Short Instagram-style copy for one product. Remote failure degrades
    /// to a fixed Spanish fallback, never an error.
    #[instrument(skip(self, product_name), fields(product = %product_name))]
    pub async fn generate_marketing_copy(&self, product_name: &str) -> String {
        let prompt = format!(
            "Escribe un copy corto, profesional pero atractivo para Instagram sobre este \
             producto de papelería: \"{product_name}\". Enfoque: Estudiantes de secundaria, \
             universitarios y oficinas. Tono: Moderno y dominicano. Usa emojis."
        );
        let request = GenerateRequest::text(&self.config().text_model, &prompt);

        match self.generate(&request).await {
            Ok(response) => response.into_text().unwrap_or_else(|| COPY_FALLBACK.to_string()),
            Err(e) => {
                error!("Marketing copy generation failed: {e}");
                "Error generando marketing.".to_string()
            }
        }
    }

    /// Three brief tactical suggestions derived from a sales summary.
    /// Degrades to a fallback string on any remote failure.
    #[instrument(skip(self, sales_summary))]
    pub async fn analyze_business_data(&self, sales_summary: &str) -> String {
        let prompt = format!(
            "Analiza estos datos de ventas de una papelería y dame 3 sugerencias tácticas \
             muy breves (max 10 palabras c/u) para el dueño. Datos: {sales_summary}"
        );
        let request = GenerateRequest::text(&self.config().text_model, &prompt);

        match self.generate(&request).await {
            Ok(response) => response
                .into_text()
                .unwrap_or_else(|| "Sin análisis disponible.".to_string()),
            Err(e) => {
                error!("Business analysis failed: {e}");
                ANALYSIS_FALLBACK.to_string()
            }
        }
    }

    /// Edits a product photo per the instruction, returning a data URL.
    /// Any failure, including a reply without an image, degrades to the
    /// original input image.
    #[instrument(skip(self, base64_image, instruction))]
    pub async fn enhance_product_image(&self, base64_image: &str, instruction: &str) -> String {
        let clean = strip_data_url_prefix(base64_image);
        let prompt = format!(
            "Edita esta imagen de producto. {instruction}. Mantén el producto principal \
             visible pero mejora estéticamente el entorno. Alta resolución, estilo \
             fotografía de producto profesional."
        );
        let request = GenerateRequest {
            model: self.config().image_model.clone(),
            contents: vec![
                ContentPart::image("image/jpeg", clean),
                ContentPart::text(&prompt),
            ],
            system_instruction: None,
            temperature: None,
            max_output_tokens: None,
        };

        match self.generate(&request).await {
            Ok(response) => match response.first_image() {
                Some(data) => format!("data:image/png;base64,{data}"),
                None => {
                    warn!("Image edit reply carried no image, keeping the original");
                    base64_image.to_string()
                }
            },
            Err(e) => {
                error!("Image enhancement failed: {e}");
                base64_image.to_string()
            }
        }
    }

    /// Generates a promotional video and returns its asset URL.
    ///
    /// The job is asynchronous on the provider side: submit, then poll at
    /// the configured interval until done, failed, or the hard timeout.
    #[instrument(skip(self, prompt))]
    pub async fn generate_promo_video(&self, prompt: &str, aspect_ratio: &str) -> Result<String> {
        let full_prompt = format!(
            "Cinematic commercial for stationery store product: {prompt}. High quality, \
             photorealistic, 4k resolution, advertising style."
        );
        let submit = VideoSubmitRequest {
            model: self.config().video_model.clone(),
            prompt: full_prompt,
            aspect_ratio: aspect_ratio.to_string(),
            resolution: "720p".to_string(),
        };

        let url = format!("{}/video:submit", self.config().api_url);
        let job: VideoSubmitResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.config().api_key)
            .json(&submit)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("Submitted video job '{}'", job.operation_id);

        let mut state = VideoJobState::Submitted;
        let mut elapsed = Duration::ZERO;
        loop {
            tokio::time::sleep(self.config().poll_interval).await;
            elapsed += self.config().poll_interval;

            let status = self.poll_video_job(&job.operation_id).await?;
            state = state.advance(&status, elapsed, self.config().poll_timeout);

            match &state {
                VideoJobState::Done { video_uri } => {
                    info!("Video job '{}' finished", job.operation_id);
                    return Ok(format!("{video_uri}&key={}", self.config().api_key));
                }
                VideoJobState::Failed { message } => {
                    return Err(Error::VideoFailed {
                        message: message.clone(),
                    });
                }
                VideoJobState::TimedOut { seconds } => {
                    return Err(Error::VideoTimedOut { seconds: *seconds });
                }
                VideoJobState::Submitted | VideoJobState::Polling { .. } => {}
            }
        }
    }

    async fn poll_video_job(&self, operation_id: &str) -> Result<VideoStatusResponse> {
        let url = format!("{}/video/{operation_id}", self.config().api_url);
        let status = self
            .client
            .get(&url)
            .bearer_auth(&self.config().api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }
}

/// States of a provider-side video job as driven by the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoJobState {
    /// Accepted by the provider, not yet polled.
    Submitted,
    /// At least one poll returned "still running".
    Polling { elapsed: Duration },
    /// The job produced an asset.
    Done { video_uri: String },
    /// The provider reported a terminal failure.
    Failed { message: String },
    /// The configured polling ceiling elapsed before completion.
    TimedOut { seconds: u64 },
}

impl VideoJobState {
    /// Applies one poll result. Terminal states absorb further polls.
    #[must_use]
    pub(crate) fn advance(
        self,
        status: &VideoStatusResponse,
        elapsed: Duration,
        timeout: Duration,
    ) -> Self {
        match self {
            Self::Done { .. } | Self::Failed { .. } | Self::TimedOut { .. } => self,
            Self::Submitted | Self::Polling { .. } => {
                if let Some(message) = &status.error {
                    return Self::Failed {
                        message: message.clone(),
                    };
                }
                if status.done {
                    return match &status.video_uri {
                        Some(uri) => Self::Done {
                            video_uri: uri.clone(),
                        },
                        None => Self::Failed {
                            message: "No video URI returned".to_string(),
                        },
                    };
                }
                if elapsed >= timeout {
                    return Self::TimedOut {
                        seconds: timeout.as_secs(),
                    };
                }
                Self::Polling { elapsed }
            }
        }
    }
}

fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once("base64,") {
        Some((_, data)) => data,
        None => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> VideoStatusResponse {
        VideoStatusResponse {
            done: false,
            error: None,
            video_uri: None,
        }
    }

    #[test]
    fn test_pending_poll_keeps_polling_until_timeout() {
        let timeout = Duration::from_secs(300);

        let state = VideoJobState::Submitted.advance(&pending(), Duration::from_secs(5), timeout);
        assert_eq!(
            state,
            VideoJobState::Polling {
                elapsed: Duration::from_secs(5)
            }
        );

        let state = state.advance(&pending(), Duration::from_secs(300), timeout);
        assert_eq!(state, VideoJobState::TimedOut { seconds: 300 });
    }

    #[test]
    fn test_done_poll_yields_asset() {
        let status = VideoStatusResponse {
            done: true,
            error: None,
            video_uri: Some("https://cdn.example.com/v.mp4?x=1".to_string()),
        };
        let state =
            VideoJobState::Submitted.advance(&status, Duration::from_secs(5), Duration::from_secs(300));
        assert_eq!(
            state,
            VideoJobState::Done {
                video_uri: "https://cdn.example.com/v.mp4?x=1".to_string()
            }
        );
    }

    #[test]
    fn test_done_without_uri_is_a_failure() {
        let status = VideoStatusResponse {
            done: true,
            error: None,
            video_uri: None,
        };
        let state =
            VideoJobState::Submitted.advance(&status, Duration::from_secs(5), Duration::from_secs(300));
        assert!(matches!(state, VideoJobState::Failed { .. }));
    }

    #[test]
    fn test_provider_error_beats_timeout() {
        let status = VideoStatusResponse {
            done: false,
            error: Some("quota exceeded".to_string()),
            video_uri: None,
        };
        // Even past the ceiling, an explicit provider error is reported as such
        let state =
            VideoJobState::Submitted.advance(&status, Duration::from_secs(600), Duration::from_secs(300));
        assert_eq!(
            state,
            VideoJobState::Failed {
                message: "quota exceeded".to_string()
            }
        );
    }

    #[test]
    fn test_terminal_states_absorb_further_polls() {
        let done = VideoJobState::Done {
            video_uri: "u".to_string(),
        };
        let after = done.clone().advance(&pending(), Duration::ZERO, Duration::ZERO);
        assert_eq!(after, done);
    }

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }
}
