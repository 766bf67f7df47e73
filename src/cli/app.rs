//! CLI application handlers

use std::process::ExitCode;

use crate::application::ports::{ConfigStore, HistoryRepository};
use crate::domain::card::human_readable_time;
use crate::domain::config::AppConfig;
use crate::infrastructure::{FileHistoryRepository, XdgConfigStore};

use super::args::HistoryAction;
use super::presenter::Presenter;

/// Process exit code: success
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit code: runtime failure
pub const EXIT_ERROR: u8 = 1;
/// Process exit code: bad usage
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load the config file, falling back to an empty config on failure
pub async fn load_config(presenter: &Presenter) -> AppConfig {
    match XdgConfigStore::new().load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("Failed to load config: {}", e));
            AppConfig::empty()
        }
    }
}

/// Handle history subcommand
pub async fn run_history(
    action: HistoryAction,
    config: &AppConfig,
    presenter: &Presenter,
) -> ExitCode {
    let repository = FileHistoryRepository::new(config.history_limit_or_default());

    match action {
        HistoryAction::List => match repository.list().await {
            Ok(records) if records.is_empty() => {
                presenter.info("No captures saved yet");
                ExitCode::SUCCESS
            }
            Ok(records) => {
                for record in &records {
                    let text = if record.text.trim().is_empty() {
                        "(no text)"
                    } else {
                        record.text.as_str()
                    };
                    presenter.key_value(&human_readable_time(record.media_timestamp_ms), text);
                }
                presenter.info(&format!("{} captures", records.len()));
                ExitCode::SUCCESS
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        HistoryAction::Clear => match repository.clear().await {
            Ok(()) => {
                presenter.success("Capture history cleared");
                ExitCode::SUCCESS
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        HistoryAction::Path => {
            presenter.output(&repository.path().display().to_string());
            ExitCode::SUCCESS
        }
    }
}

#[cfg(unix)]
mod host_commands {
    use std::path::Path;
    use std::process::ExitCode;
    use std::sync::Arc;
    use std::time::{Duration as StdDuration, Instant};

    use tokio::sync::mpsc;
    use uuid::Uuid;

    use crate::application::ports::AudioRecorderDelegate;
    use crate::domain::config::AppConfig;
    use crate::domain::recording::{Duration, RequestId, Requester};
    use crate::infrastructure::recording::NativeProcessRecorder;
    use crate::infrastructure::{NativeHostClient, SocketPath, UnixSocketTransport};

    use super::super::presenter::Presenter;
    use super::{EXIT_ERROR, EXIT_USAGE_ERROR};

    fn host_client(config: &AppConfig) -> NativeHostClient<UnixSocketTransport> {
        let socket = config
            .host_socket
            .as_deref()
            .map(SocketPath::with_path)
            .unwrap_or_default();
        NativeHostClient::new(UnixSocketTransport::new(socket))
    }

    /// Probe the native capture host
    pub async fn run_host_ping(config: &AppConfig, presenter: &Presenter) -> ExitCode {
        let client = host_client(config);

        match client.ping().await {
            Ok(reply) if reply.success => {
                presenter.success("Native capture host is available");
                if let Some(audio_system) = reply.audio_system {
                    presenter.info(&format!("Audio system: {}", audio_system));
                }
                ExitCode::SUCCESS
            }
            Ok(reply) => {
                presenter.error(&format!(
                    "Capture host reported an error: {}",
                    reply.error.unwrap_or_else(|| "unknown error".to_string())
                ));
                ExitCode::from(EXIT_ERROR)
            }
            Err(e) => {
                presenter.error(&format!("Native capture host is not available: {}", e));
                ExitCode::from(EXIT_ERROR)
            }
        }
    }

    /// Record a timed clip through the native capture host and write it to a
    /// file
    pub async fn run_host_record(
        duration: &str,
        mp3: bool,
        output: &Path,
        config: &AppConfig,
        presenter: &mut Presenter,
    ) -> ExitCode {
        let duration: Duration = match duration.parse() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        };

        let client = Arc::new(host_client(config));
        let (audio_tx, mut audio_rx) = mpsc::unbounded_channel();
        let recorder = NativeProcessRecorder::new(client, audio_tx);

        let request_id = RequestId::new(Uuid::new_v4().to_string());
        let requester = Requester::new(0, "cli");

        presenter.start_spinner(&format!("Recording for {}...", duration));
        let started = Instant::now();

        if let Err(e) = recorder
            .start_with_timeout(duration, mp3, &request_id, &requester)
            .await
        {
            presenter.spinner_fail(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }

        // Tick the progress display until the clip arrives on the channel
        let captured = loop {
            tokio::select! {
                captured = audio_rx.recv() => break captured,
                _ = tokio::time::sleep(StdDuration::from_millis(200)) => {
                    let elapsed = (started.elapsed().as_millis() as u64).min(duration.as_millis());
                    presenter.update_recording_progress(elapsed, duration.as_millis());
                }
            }
        };

        let _ = recorder.stop(mp3, &requester).await;

        let Some(captured) = captured else {
            presenter.spinner_fail("Recording channel closed unexpectedly");
            return ExitCode::from(EXIT_ERROR);
        };

        if captured.is_empty() {
            presenter.spinner_fail("Recording produced no audio");
            return ExitCode::from(EXIT_ERROR);
        }

        use base64::Engine;
        let bytes = match base64::engine::general_purpose::STANDARD.decode(&captured.audio_base64)
        {
            Ok(bytes) => bytes,
            Err(e) => {
                presenter.spinner_fail(&format!("Host delivered an invalid audio payload: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };

        if let Err(e) = tokio::fs::write(output, &bytes).await {
            presenter.spinner_fail(&format!("Failed to write {}: {}", output.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }

        presenter.spinner_success(&format!("Wrote {} ({} bytes)", output.display(), bytes.len()));
        ExitCode::SUCCESS
    }
}

#[cfg(unix)]
pub use host_commands::{run_host_ping, run_host_record};

#[cfg(not(unix))]
pub async fn run_host_ping(_config: &AppConfig, presenter: &Presenter) -> ExitCode {
    presenter.error("The native capture host is only supported on Unix platforms");
    ExitCode::from(EXIT_ERROR)
}

#[cfg(not(unix))]
pub async fn run_host_record(
    _duration: &str,
    _mp3: bool,
    _output: &std::path::Path,
    _config: &AppConfig,
    presenter: &mut Presenter,
) -> ExitCode {
    presenter.error("The native capture host is only supported on Unix platforms");
    ExitCode::from(EXIT_ERROR)
}
