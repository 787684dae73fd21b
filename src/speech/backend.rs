use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SpeechConfig;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech worker has stopped")]
    WorkerStopped,
}

/// Something that can turn text into audio
///
/// The backend keeps the last selected voice; `speak` with a `voice` of
/// `None` uses it.
pub trait SpeechBackend: Send {
    /// Make `voice` the active voice without saying anything
    fn select_voice(&mut self, voice: &str);

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<(), SpeechError>;

    /// Accept no further lines; already queued ones may still finish
    fn close(&mut self) {}
}

/// One queued synthesis request
#[derive(Debug)]
struct SpeechJob {
    voice: Option<String>,
    text: String,
}

/// Speaks through an espeak-compatible command line tool
///
/// Requests are queued to a single worker task so lines are spoken in the
/// order they were submitted, without the caller waiting on playback.
pub struct EspeakBackend {
    tx: Option<mpsc::UnboundedSender<SpeechJob>>,
    current_voice: Option<String>,
}

impl EspeakBackend {
    /// Start the worker on the current tokio runtime.
    /// The worker ends once the backend is closed or dropped and the queue
    /// is drained.
    pub fn spawn(config: &SpeechConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(
            config.command.clone(),
            config.extra_args.clone(),
            rx,
        ));

        let backend = Self {
            tx: Some(tx),
            current_voice: None,
        };
        (backend, worker)
    }
}

impl SpeechBackend for EspeakBackend {
    fn select_voice(&mut self, voice: &str) {
        if self.current_voice.as_deref() != Some(voice) {
            debug!("Switching voice to {}", voice);
            self.current_voice = Some(voice.to_string());
        }
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<(), SpeechError> {
        if let Some(voice) = voice {
            self.select_voice(voice);
        }

        let tx = self.tx.as_ref().ok_or(SpeechError::WorkerStopped)?;
        tx.send(SpeechJob {
            voice: self.current_voice.clone(),
            text: text.to_string(),
        })
        .map_err(|_| SpeechError::WorkerStopped)
    }

    fn close(&mut self) {
        self.tx = None;
    }
}

async fn run_worker(
    command: String,
    extra_args: Vec<String>,
    mut rx: mpsc::UnboundedReceiver<SpeechJob>,
) {
    while let Some(job) = rx.recv().await {
        if let Err(e) = synthesize(&command, &extra_args, &job).await {
            warn!("Failed to run '{}': {}", command, e);
        }
    }
    debug!("Speech worker finished");
}

/// Run the speech command once, feeding the text on stdin
async fn synthesize(
    command: &str,
    extra_args: &[String],
    job: &SpeechJob,
) -> std::io::Result<()> {
    let mut cmd = Command::new(command);
    cmd.args(extra_args);
    if let Some(voice) = &job.voice {
        cmd.arg("-v").arg(voice);
    }
    cmd.arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .kill_on_drop(true);

    let mut child = cmd.spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(job.text.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        warn!("'{}' exited with {}", command, status);
    }
    Ok(())
}

/// Logs utterances instead of speaking them
#[derive(Debug, Default)]
pub struct LogBackend {
    current_voice: Option<String>,
}

impl SpeechBackend for LogBackend {
    fn select_voice(&mut self, voice: &str) {
        self.current_voice = Some(voice.to_string());
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<(), SpeechError> {
        if let Some(voice) = voice {
            self.select_voice(voice);
        }
        info!(
            "Speak [{}]: {}",
            self.current_voice.as_deref().unwrap_or("default"),
            text
        );
        Ok(())
    }
}
