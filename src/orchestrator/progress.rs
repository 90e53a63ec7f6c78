//! Progress reporting contract for the generation pipeline.

use async_trait::async_trait;

/// Observable stages of one generation request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    /// Vision chain is analyzing the product photos
    AnalyzingPhotos,
    /// Audience framing checkpoint; no work happens here
    AudienceFraming,
    /// Text chain is generating and the validator is scoring; may repeat
    /// with an attempt substage
    Generating,
    /// Final check before the result is returned
    FinalCheck,
}

impl GenerationStage {
    /// Stable stage index, 0 through 3.
    pub const fn index(self) -> u8 {
        match self {
            Self::AnalyzingPhotos => 0,
            Self::AudienceFraming => 1,
            Self::Generating => 2,
            Self::FinalCheck => 3,
        }
    }

    /// Human-readable stage label for chat-facing progress messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnalyzingPhotos => "Анализирую фотографии",
            Self::AudienceFraming => "Определяю целевую аудиторию",
            Self::Generating => "Генерирую ТЗ",
            Self::FinalCheck => "Финальная проверка",
        }
    }
}

/// Receiver for stage checkpoints.
///
/// The orchestrator awaits each report, so implementations should return
/// quickly; slow consumers belong behind a channel.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Called at every stage transition. `substage` carries an attempt
    /// label when the generating stage repeats.
    async fn report(&self, stage: GenerationStage, substage: Option<&str>);
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

#[async_trait]
impl ProgressSink for NoProgress {
    async fn report(&self, _stage: GenerationStage, _substage: Option<&str>) {}
}
