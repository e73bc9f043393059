//! # Audio Capture Module
//!
//! Real-time audio capture using CPAL (Cross-Platform Audio Library).
//! Opens the default input device as f32 mono at the supported rate
//! closest to 44.1 kHz, accumulates the device's arbitrary-size blocks
//! into fixed analysis windows and streams complete windows to the
//! analysis thread.
//!
//! The input callback runs on CPAL's real-time thread: it only appends
//! samples and `try_send`s finished windows. It never blocks and never
//! does I/O.

use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;
use tracing::{info, warn};

use crate::buffer::WindowBuffer;
use crate::error::AudioError;

/// Number of samples per analysis window.
///
/// Larger windows give finer frequency resolution but more latency;
/// 4096 samples is ~93 ms at 44.1 kHz and resolves the low E string's
/// 82.41 Hz fundamental well enough for sub-bin refinement.
pub const WINDOW_SIZE: usize = 4096;

/// Sample rate the device negotiation aims for, in Hz.
const TARGET_SAMPLE_RATE: u32 = 44100;

/// Starts audio capture from the default input device.
///
/// Complete analysis windows of [`WINDOW_SIZE`] samples are sent over
/// `sender`; a full channel drops the window rather than blocking the
/// callback (the consumer only ever needs the latest reading).
///
/// Returns the live stream handle together with the sample rate the
/// device actually negotiated; the rate must be threaded through to
/// the analysis pipeline, never assumed.
pub fn start_audio_capture(sender: Sender<Vec<f32>>) -> Result<(cpal::Stream, u32), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoInputDevice)?;

    info!("using audio input device: {}", device.name()?);

    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let supported_config =
        find_supported_config(configs, TARGET_SAMPLE_RATE).ok_or(AudioError::NoSupportedConfig)?;

    let sample_rate = TARGET_SAMPLE_RATE
        .clamp(
            supported_config.min_sample_rate().0,
            supported_config.max_sample_rate().0,
        );
    let config = supported_config.with_sample_rate(cpal::SampleRate(sample_rate));

    let sample_rate_val = config.sample_rate().0;
    let config: cpal::StreamConfig = config.into();

    info!("negotiated sample rate: {} Hz", sample_rate_val);

    let err_fn = |err| warn!("audio stream error: {err}");

    // Accumulates device blocks into fixed analysis windows.
    let mut window_buffer = WindowBuffer::new(WINDOW_SIZE);

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            window_buffer.push(data);
            while let Some(window) = window_buffer.next_window() {
                // Drop the window if the analysis thread is behind.
                let _ = sender.try_send(window);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate_val))
}

/// Finds the best supported input configuration: f32 mono, sample rate
/// range as close as possible to `target_rate`.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.channels() == 1 && c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let min_diff = (c.min_sample_rate().0 as i32 - target_rate as i32).abs();
            let max_diff = (c.max_sample_rate().0 as i32 - target_rate as i32).abs();
            min_diff.min(max_diff)
        })
}
