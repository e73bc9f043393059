//! # Plectrum: terminal guitar tuner
//!
//! Thin binary over `plectrum-core`:
//! - **CPAL callback thread**: accumulates samples, sends complete
//!   analysis windows over a bounded channel (latest-wins, never blocks).
//! - **Analysis thread**: runs the gate → spectrum → peak → note
//!   pipeline per window and forwards each reading.
//! - **Main thread**: renders readings until Enter is pressed, then
//!   shuts the stream down in order.

mod display;

use anyhow::{Context, Result};
use cpal::traits::StreamTrait;
use crossbeam_channel::{Receiver, Sender, bounded};
use plectrum_core::gate::MIN_AMPLITUDE;
use plectrum_core::tuning::{self, TuningPreset};
use plectrum_core::{AnalysisResult, Analyzer, audio};
use std::thread;
use tracing::{debug, info};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let preset = select_preset()?;
    run(preset)
}

/// Resolves the tuning preset from the first CLI argument, defaulting
/// to standard tuning.
fn select_preset() -> Result<&'static TuningPreset> {
    match std::env::args().nth(1) {
        Some(name) => tuning::preset_by_name(&name).with_context(|| {
            let known: Vec<&str> = tuning::TUNING_PRESETS.iter().map(|p| p.name).collect();
            format!("unknown tuning preset '{name}' (available: {})", known.join(", "))
        }),
        None => Ok(&tuning::TUNING_PRESETS[0]),
    }
}

fn run(preset: &'static TuningPreset) -> Result<()> {
    // Capture callback -> analysis thread. Bounded so a stalled
    // consumer drops windows instead of backing up the audio thread.
    let (window_tx, window_rx) = bounded::<Vec<f32>>(4);
    // Analysis thread -> display loop.
    let (reading_tx, reading_rx) = bounded::<AnalysisResult>(4);
    // Stdin watcher -> everyone.
    let (quit_tx, quit_rx) = bounded::<()>(1);

    let (stream, sample_rate) =
        audio::start_audio_capture(window_tx).context("failed to start audio capture")?;

    let analysis_quit_rx = quit_rx.clone();
    let analysis_handle =
        thread::spawn(move || analysis_loop(sample_rate, window_rx, reading_tx, analysis_quit_rx));

    spawn_stdin_watcher(quit_tx);

    println!(
        "plectrum: {} tuning, {} Hz. Press Enter to quit.",
        preset.name, sample_rate
    );

    // Display loop: show each reading as it arrives, stop on quit.
    loop {
        crossbeam_channel::select! {
            recv(reading_rx) -> msg => match msg {
                Ok(result) => display::render(&result, preset)?,
                Err(_) => break,
            },
            recv(quit_rx) -> _ => break,
        }
    }

    println!();
    info!("shutting down");

    // Stop callbacks first, then let the analysis thread drain and exit.
    stream.pause().context("failed to stop audio stream")?;
    drop(stream);
    let _ = analysis_handle.join();

    Ok(())
}

/// Runs the pitch pipeline for every captured window until the window
/// channel closes or shutdown is requested.
fn analysis_loop(
    sample_rate: u32,
    window_rx: Receiver<Vec<f32>>,
    reading_tx: Sender<AnalysisResult>,
    quit_rx: Receiver<()>,
) {
    let analyzer = Analyzer::new(sample_rate, audio::WINDOW_SIZE, MIN_AMPLITUDE);
    debug!("analysis thread started");

    loop {
        crossbeam_channel::select! {
            recv(window_rx) -> msg => match msg {
                Ok(window) => {
                    let result = analyzer.process_window(&window);
                    // The display only needs the latest reading; drop
                    // the result if it is not keeping up.
                    let _ = reading_tx.try_send(result);
                }
                Err(_) => break,
            },
            recv(quit_rx) -> _ => break,
        }
    }

    debug!("analysis thread finished");
}

/// Watches stdin for Enter and signals shutdown once.
fn spawn_stdin_watcher(quit_tx: Sender<()>) {
    thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = quit_tx.send(());
    });
}
