use thiserror::Error;

/// Errors raised while acquiring or driving the audio input stream.
///
/// All of these are fatal to the run: the caller reports them and
/// exits rather than retrying, since a missing or broken capture
/// device needs user intervention. Per-window "no pitch" outcomes are
/// ordinary values, never errors.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no input device available")]
    NoInputDevice,

    #[error("no suitable f32 mono input format found")]
    NoSupportedConfig,

    #[error("failed to query device name: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),

    #[error("failed to enumerate input configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}
