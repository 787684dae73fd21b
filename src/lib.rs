pub mod config;
pub mod display;
pub mod history;
pub mod idioms;
pub mod input;
pub mod speech;

use anyhow::Result;
use std::io::BufRead;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use config::Config;
use display::{ConsoleRenderer, Renderer};
use input::console::{parse_line, ConsoleCommand};
use input::{Flow, InputController, InputEvent};
use speech::{EspeakBackend, LogBackend, SpeechBackend};

/// Lines buffered between the stdin thread and the event loop
const STDIN_QUEUE: usize = 64;

/// How long a finished session waits for queued speech
const SPEECH_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Startup switches that are not part of the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Log utterances instead of running the synthesizer
    pub silent: bool,
    /// Color history lines by age
    pub color: bool,
}

/// Main application struct
pub struct App {
    controller: InputController,
    renderer: Box<dyn Renderer>,
    speech_worker: Option<JoinHandle<()>>,
}

impl App {
    /// Create the application. Must run inside a tokio runtime.
    pub fn new(config: &Config, options: Options) -> Self {
        let mut speech_worker = None;
        let speech: Box<dyn SpeechBackend> = if options.silent {
            info!("Silent mode, utterances are only logged");
            Box::new(LogBackend::default())
        } else {
            let (backend, worker) = EspeakBackend::spawn(&config.speech);
            info!("Speaking through '{}'", config.speech.command);
            speech_worker = Some(worker);
            Box::new(backend)
        };

        Self::with_parts(
            InputController::from_config(config, speech),
            Box::new(ConsoleRenderer::stdout(options.color)),
            speech_worker,
        )
    }

    pub fn with_parts(
        controller: InputController,
        renderer: Box<dyn Renderer>,
        speech_worker: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            controller,
            renderer,
            speech_worker,
        }
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    /// Run the console loop on stdin until the session ends
    pub async fn run(&mut self) -> Result<()> {
        let lines = spawn_stdin_reader()?;
        self.run_lines(lines).await
    }

    /// Feed console lines into the controller, rendering after each.
    /// A closed channel counts as the input going away.
    pub async fn run_lines(&mut self, mut lines: mpsc::Receiver<String>) -> Result<()> {
        self.renderer.render(&self.controller.frame())?;

        loop {
            let event = match lines.recv().await {
                Some(line) => match parse_line(&line) {
                    ConsoleCommand::Event(event) => event,
                    ConsoleCommand::SubmitActive => {
                        InputEvent::Submit(self.controller.active_line().to_string())
                    }
                },
                None => {
                    debug!("Input closed");
                    InputEvent::Dismiss
                }
            };

            if self.controller.handle_event(event) == Flow::Quit {
                return Ok(());
            }
            self.renderer.render(&self.controller.frame())?;
        }
    }

    /// End a session that finished on its own: let queued lines be spoken
    /// (bounded by `SPEECH_DRAIN_TIMEOUT`), then shut down
    pub async fn finish(&mut self) {
        self.controller.close_speech();

        if let Some(worker) = self.speech_worker.as_mut() {
            match tokio::time::timeout(SPEECH_DRAIN_TIMEOUT, worker).await {
                Ok(Ok(())) => {
                    debug!("Speech queue drained");
                    self.speech_worker = None;
                }
                Ok(Err(e)) => {
                    warn!("Speech worker failed: {}", e);
                    self.speech_worker = None;
                }
                Err(_) => warn!("Speech still running after {:?}, stopping", SPEECH_DRAIN_TIMEOUT),
            }
        }

        self.shutdown().await;
    }

    /// Stop speaking immediately and release the synthesizer
    pub async fn shutdown(&mut self) {
        info!("Shutting down speakup...");

        if let Some(worker) = self.speech_worker.take() {
            worker.abort();
            if let Err(e) = worker.await {
                if !e.is_cancelled() {
                    warn!("Speech worker failed: {}", e);
                }
            }
        }

        info!("Shutdown complete");
    }
}

/// Read stdin on its own thread so a pending read never holds up runtime
/// shutdown. The channel closes at EOF.
fn spawn_stdin_reader() -> Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(STDIN_QUEUE);

    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}
