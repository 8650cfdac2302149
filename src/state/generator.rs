//! QR generator state
//!
//! Owns the input text, the outstanding encode task, the last good image and
//! the last error. All mutation goes through `update_text`, `generate`,
//! `clear` and task completion, which the UI observes through `poll`.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::download::{self, DownloadError};
use crate::encoder::{EncodeError, EncodeOptions, EncodedImage, QrEncoder};
use crate::state::StateEvent;
use crate::task::{poll_task, PollResult};

/// Maximum number of characters kept from the input field
pub const MAX_INPUT_CHARS: usize = 2000;

/// Errors surfaced to the user by a generation attempt
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Input required")]
    InputRequired,

    #[error("Generation already in progress")]
    Busy,

    #[error("QR code generation failed")]
    GenerationFailed,
}

type EncodeResult = Result<EncodedImage, EncodeError>;

/// State behind the generator tab
#[derive(Default)]
pub struct GeneratorState {
    text: String,
    image: Option<EncodedImage>,
    error: Option<GenerateError>,
    task: Option<JoinHandle<EncodeResult>>,
    options: EncodeOptions,
    /// Bumped on every successful encode so views can refresh cached textures
    generation: u64,
}

impl GeneratorState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn error(&self) -> Option<GenerateError> {
        self.error
    }

    /// True while an encode call is outstanding
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the generate control should be enabled
    pub fn can_generate(&self) -> bool {
        !self.is_busy() && !self.text.trim().is_empty()
    }

    /// Replace the input text, keeping at most [`MAX_INPUT_CHARS`] characters
    pub fn update_text(&mut self, text: &str) {
        self.text = match text.char_indices().nth(MAX_INPUT_CHARS) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
    }

    /// Start encoding the current text on the blocking pool.
    ///
    /// Empty input records [`GenerateError::InputRequired`] without calling
    /// the encoder. A call while busy is rejected and leaves state untouched.
    pub fn generate(&mut self, encoder: Arc<dyn QrEncoder>) -> Result<StateEvent, GenerateError> {
        if self.is_busy() {
            tracing::debug!("Ignoring generate request while an encode is in flight");
            return Err(GenerateError::Busy);
        }

        if self.text.trim().is_empty() {
            self.error = Some(GenerateError::InputRequired);
            return Err(GenerateError::InputRequired);
        }

        self.error = None;

        let text = self.text.clone();
        let options = self.options.clone();
        let chars = self.char_count();

        tracing::info!(
            "Generating QR code: {} chars, {}px, margin {}, level {}, colors {}/{}",
            chars,
            options.width,
            options.margin,
            options.error_correction,
            options.dark,
            options.light
        );

        self.task = Some(tokio::task::spawn_blocking(move || {
            encoder.encode(&text, &options)
        }));

        Ok(StateEvent::Generating { chars })
    }

    /// Check the encode task without blocking
    pub fn poll(&mut self, ctx: &egui::Context) -> Option<StateEvent> {
        match poll_task(&mut self.task) {
            PollResult::Complete(result) => Some(self.finish(result)),
            PollResult::Pending => {
                ctx.request_repaint();
                None
            }
            PollResult::NoTask => None,
        }
    }

    /// Wait for the outstanding encode task, if any
    #[cfg(test)]
    pub async fn wait(&mut self) -> Option<StateEvent> {
        match crate::task::join_task(&mut self.task).await {
            PollResult::Complete(result) => Some(self.finish(result)),
            PollResult::Pending | PollResult::NoTask => None,
        }
    }

    /// Apply a finished encode. On failure the previous image stays.
    fn finish(&mut self, result: Result<EncodeResult, JoinError>) -> StateEvent {
        match result {
            Ok(Ok(image)) => {
                tracing::info!(
                    "QR code generated: {}x{} px, {} modules, {} bytes of {}",
                    image.width(),
                    image.height(),
                    image.modules(),
                    image.bytes().len(),
                    image.format().mime_type()
                );
                let event = StateEvent::Generated {
                    modules: image.modules(),
                    bytes: image.bytes().len(),
                };
                self.image = Some(image);
                self.error = None;
                self.generation += 1;
                event
            }
            Ok(Err(e)) => {
                tracing::error!("QR generation error: {}", e);
                self.error = Some(GenerateError::GenerationFailed);
                StateEvent::GenerationFailed
            }
            Err(e) => {
                tracing::error!("QR generation task failed: {}", e);
                self.error = Some(GenerateError::GenerationFailed);
                StateEvent::GenerationFailed
            }
        }
    }

    /// Reset text, image and error. An outstanding encode keeps running.
    pub fn clear(&mut self) {
        self.text.clear();
        self.image = None;
        self.error = None;
    }

    /// Save the current image to a path chosen by `pick_path`.
    ///
    /// Returns `Ok(None)` without calling `pick_path` when there is no image,
    /// and `Ok(None)` when the picker is cancelled.
    pub fn download<F>(&self, file_name: &str, pick_path: F) -> Result<Option<PathBuf>, DownloadError>
    where
        F: FnOnce(&str, &str) -> Option<PathBuf>,
    {
        let Some(image) = &self.image else {
            return Ok(None);
        };

        let Some(path) = pick_path(file_name, image.format().extension()) else {
            tracing::debug!("Save dialog cancelled");
            return Ok(None);
        };

        download::save_bytes(image.bytes(), &path)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::cell::Cell;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    use crate::encoder::{OutputFormat, QrCodeEncoder};

    /// Encoder that records every call and can be held or made to fail
    #[derive(Default)]
    struct RecordingEncoder {
        calls: Mutex<Vec<(String, EncodeOptions)>>,
        gate: Option<Mutex<mpsc::Receiver<()>>>,
        fail: bool,
        panic: bool,
    }

    impl RecordingEncoder {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn panicking() -> Self {
            Self {
                panic: true,
                ..Default::default()
            }
        }

        fn gated() -> (Self, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let encoder = Self {
                gate: Some(Mutex::new(rx)),
                ..Default::default()
            };
            (encoder, tx)
        }

        fn calls(&self) -> Vec<(String, EncodeOptions)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl QrEncoder for RecordingEncoder {
        fn encode(&self, text: &str, options: &EncodeOptions) -> Result<EncodedImage, EncodeError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), options.clone()));

            if let Some(gate) = &self.gate {
                let _ = gate.lock().unwrap().recv();
            }

            if self.panic {
                panic!("encoder crashed");
            }

            if self.fail {
                return Err(EncodeError::Qr(qrcode::types::QrError::DataTooLong));
            }

            EncodedImage::new(RgbaImage::new(8, 8), 21, OutputFormat::Png)
        }
    }

    async fn generate_ok(state: &mut GeneratorState, encoder: &Arc<RecordingEncoder>, text: &str) {
        state.update_text(text);
        state.generate(encoder.clone()).unwrap();
        state.wait().await;
    }

    /// Drive `poll` the way the app does until the task resolves
    async fn poll_until_done(state: &mut GeneratorState, ctx: &egui::Context) -> StateEvent {
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                if let Some(event) = state.poll(ctx) {
                    return event;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("encode task did not finish")
    }

    #[tokio::test]
    async fn test_generate_success() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();

        state.update_text("https://example.com");
        let event = state.generate(encoder.clone()).unwrap();
        assert!(matches!(event, StateEvent::Generating { chars: 19 }));

        let event = state.wait().await;
        assert!(matches!(event, Some(StateEvent::Generated { modules: 21, .. })));
        assert!(state.image().is_some());
        assert!(state.error().is_none());
        assert!(!state.is_busy());
        assert_eq!(state.generation(), 1);
    }

    #[tokio::test]
    async fn test_generate_calls_encoder_once_with_fixed_options() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();

        generate_ok(&mut state, &encoder, "hello world").await;

        let calls = encoder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "hello world");
        assert_eq!(calls[0].1, EncodeOptions::default());
        assert_eq!(calls[0].1.width, 256);
        assert_eq!(calls[0].1.margin, 2);
        assert_eq!(calls[0].1.error_correction.letter(), "M");
    }

    #[tokio::test]
    async fn test_generate_requires_input() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();

        for text in ["", "   ", "\t\n"] {
            state.update_text(text);
            let result = state.generate(encoder.clone());
            assert_eq!(result.unwrap_err(), GenerateError::InputRequired);
            assert_eq!(state.error(), Some(GenerateError::InputRequired));
            assert!(!state.is_busy());
        }

        assert!(encoder.calls().is_empty());
        assert!(state.image().is_none());
    }

    #[tokio::test]
    async fn test_empty_input_keeps_prior_image() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &encoder, "first").await;

        state.update_text("  ");
        assert!(state.generate(encoder.clone()).is_err());
        assert!(state.image().is_some());
        assert_eq!(encoder.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_busy_only_while_encoding() {
        let (encoder, release) = RecordingEncoder::gated();
        let encoder = Arc::new(encoder);
        let ctx = egui::Context::default();
        let mut state = GeneratorState::default();

        assert!(!state.is_busy());
        state.update_text("hello");
        state.generate(encoder.clone()).unwrap();
        assert!(state.is_busy());
        assert!(!state.can_generate());

        // Still held by the gate
        assert!(state.poll(&ctx).is_none());
        assert!(state.is_busy());

        release.send(()).unwrap();
        state.wait().await;
        assert!(!state.is_busy());
        assert!(state.can_generate());
        assert!(state.poll(&ctx).is_none());
    }

    #[tokio::test]
    async fn test_generate_while_busy_is_rejected() {
        let (encoder, release) = RecordingEncoder::gated();
        let encoder = Arc::new(encoder);
        let mut state = GeneratorState::default();

        state.update_text("hello");
        state.generate(encoder.clone()).unwrap();

        let result = state.generate(encoder.clone());
        assert_eq!(result.unwrap_err(), GenerateError::Busy);
        assert!(state.error().is_none());

        release.send(()).unwrap();
        state.wait().await;
        assert_eq!(encoder.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_edits_allowed_while_busy() {
        let (encoder, release) = RecordingEncoder::gated();
        let encoder = Arc::new(encoder);
        let mut state = GeneratorState::default();

        state.update_text("first");
        state.generate(encoder.clone()).unwrap();
        state.update_text("second");
        assert_eq!(state.text(), "second");

        release.send(()).unwrap();
        state.wait().await;
        assert_eq!(encoder.calls()[0].0, "first");
    }

    #[tokio::test]
    async fn test_failure_keeps_prior_image() {
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &Arc::new(RecordingEncoder::default()), "good").await;
        assert_eq!(state.generation(), 1);

        let failing = Arc::new(RecordingEncoder::failing());
        state.update_text("bad");
        state.generate(failing.clone()).unwrap();
        let event = state.wait().await;

        assert!(matches!(event, Some(StateEvent::GenerationFailed)));
        assert_eq!(state.error(), Some(GenerateError::GenerationFailed));
        assert!(state.image().is_some());
        assert_eq!(state.generation(), 1);
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn test_panicking_encoder_reports_failure() {
        let ctx = egui::Context::default();
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &Arc::new(RecordingEncoder::default()), "good").await;

        state.update_text("boom");
        state.generate(Arc::new(RecordingEncoder::panicking())).unwrap();
        let event = poll_until_done(&mut state, &ctx).await;

        assert!(matches!(event, StateEvent::GenerationFailed));
        assert_eq!(state.error(), Some(GenerateError::GenerationFailed));
        assert!(!state.is_busy());
        assert!(state.image().is_some());
        assert!(state.poll(&ctx).is_none());
    }

    #[tokio::test]
    async fn test_poll_applies_result() {
        let ctx = egui::Context::default();
        let mut state = GeneratorState::default();

        state.update_text("https://example.com");
        state.generate(Arc::new(QrCodeEncoder)).unwrap();
        let event = poll_until_done(&mut state, &ctx).await;

        assert!(matches!(event, StateEvent::Generated { .. }));
        assert!(!state.is_busy());
        assert!(state.error().is_none());
        assert_eq!(state.generation(), 1);
        assert_eq!(state.image().map(|image| image.width()), Some(256));
        assert!(state.poll(&ctx).is_none());
    }

    #[tokio::test]
    async fn test_clear_while_busy() {
        let (encoder, release) = RecordingEncoder::gated();
        let encoder = Arc::new(encoder);
        let ctx = egui::Context::default();
        let mut state = GeneratorState::default();

        state.update_text("hello");
        state.generate(encoder.clone()).unwrap();
        state.clear();
        assert_eq!(state.text(), "");
        assert!(state.is_busy());

        // The encode is not cancelled; its image still lands
        release.send(()).unwrap();
        let event = poll_until_done(&mut state, &ctx).await;
        assert!(matches!(event, StateEvent::Generated { .. }));
        assert!(state.image().is_some());
        assert_eq!(state.text(), "");
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn test_new_attempt_clears_prior_error() {
        let (encoder, release) = RecordingEncoder::gated();
        let encoder = Arc::new(encoder);
        let mut state = GeneratorState::default();

        state.update_text("");
        let _ = state.generate(encoder.clone());
        assert!(state.error().is_some());

        state.update_text("retry");
        state.generate(encoder.clone()).unwrap();
        assert!(state.error().is_none());

        release.send(()).unwrap();
        state.wait().await;
    }

    #[tokio::test]
    async fn test_real_encoder_rejects_oversized_input() {
        let mut state = GeneratorState::default();
        // Multi-byte text within the char cap but beyond QR capacity
        state.update_text(&"あ".repeat(MAX_INPUT_CHARS));
        state.generate(Arc::new(QrCodeEncoder)).unwrap();
        state.wait().await;

        assert_eq!(state.error(), Some(GenerateError::GenerationFailed));
        assert!(state.image().is_none());
    }

    #[test]
    fn test_update_text_caps_length() {
        let mut state = GeneratorState::default();

        let text = "a".repeat(MAX_INPUT_CHARS + 1);
        state.update_text(&text);
        assert_eq!(state.char_count(), MAX_INPUT_CHARS);
        assert_eq!(state.text(), &text[..MAX_INPUT_CHARS]);

        let text = "é".repeat(MAX_INPUT_CHARS + 5);
        state.update_text(&text);
        assert_eq!(state.char_count(), MAX_INPUT_CHARS);

        state.update_text("short");
        assert_eq!(state.text(), "short");
    }

    #[tokio::test]
    async fn test_clear_resets_and_is_idempotent() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &encoder, "hello").await;

        state.clear();
        assert_eq!(state.text(), "");
        assert!(state.image().is_none());
        assert!(state.error().is_none());

        state.clear();
        assert_eq!(state.text(), "");
        assert!(state.image().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_download_without_image_is_noop() {
        let state = GeneratorState::default();
        let picked = Cell::new(false);

        let result = state.download(download::DEFAULT_FILE_NAME, |_, _| {
            picked.set(true);
            None
        });

        assert!(matches!(result, Ok(None)));
        assert!(!picked.get());
    }

    #[tokio::test]
    async fn test_download_writes_png() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &encoder, "hello").await;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("picked.png");

        let saved = state
            .download(download::DEFAULT_FILE_NAME, |name, extension| {
                assert_eq!(name, "qr-code.png");
                assert_eq!(extension, "png");
                Some(target.clone())
            })
            .unwrap();

        assert_eq!(saved, Some(target.clone()));
        let written = std::fs::read(&target).unwrap();
        assert_eq!(written, state.image().unwrap().bytes());
    }

    #[tokio::test]
    async fn test_download_cancelled() {
        let encoder = Arc::new(RecordingEncoder::default());
        let mut state = GeneratorState::default();
        generate_ok(&mut state, &encoder, "hello").await;

        let result = state.download(download::DEFAULT_FILE_NAME, |_, _| None);
        assert!(matches!(result, Ok(None)));
    }
}
