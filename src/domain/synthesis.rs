use serde::{Deserialize, Serialize};

/// Speech synthesis lifecycle, independent of the transcription workflow.
///
/// State transitions:
/// - Idle | Ready -> Synthesizing (synthesize)
/// - Synthesizing -> Ready (success)
/// - Synthesizing -> Idle (failure)
/// - Ready -> Idle (clear)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisState {
    Idle,
    Synthesizing,
    Ready,
}

impl SynthesisState {
    #[must_use]
    pub fn can_synthesize(&self) -> bool {
        !matches!(self, SynthesisState::Synthesizing)
    }
}

/// Audio artifact produced by the speech synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedAudio {
    pub audio_id: String,
    pub voice: String,
    /// Absolute download location at the resolved service.
    pub download_url: String,
}

impl SynthesizedAudio {
    /// Suggested file name for saving the audio.
    pub fn file_name(&self) -> String {
        format!("speech-{}.mp3", self.audio_id)
    }
}

/// Voices offered by the speech synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCatalog {
    pub voices: Vec<String>,
    #[serde(rename = "default")]
    pub default_voice: String,
}

impl VoiceCatalog {
    /// Single-voice catalog used when the service cannot be asked.
    pub fn fallback(default_voice: &str) -> Self {
        Self {
            voices: vec![default_voice.to_string()],
            default_voice: default_voice.to_string(),
        }
    }
}
