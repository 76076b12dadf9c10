//! Interactive Console
//!
//! The terminal collaborator around the chat service: owns the message
//! transcript, renders replies and citations, validates attachments
//! before they reach the composer, and drives the busy indicator from
//! the thinking signal.

use crate::core::composer::{Attachment, Mode};
use crate::core::service::ChatService;
use crate::error::RedtermResult;
use crate::history::{Message, Sender};
use crate::speech::SpeechSynthesizer;
use base64::Engine as _;
use std::io::Write as _;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::warn;

/// Attachments above this size never reach the composer
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

const UPLINK_FAILURE_TEXT: &str =
    "CONNECTION INTERRUPTED. Neural uplink failed. Check API credentials or network status.";

const WELCOME_TEXT: &str = "SYSTEM ONLINE.\n\
\n\
Welcome, Operator. This console relays your queries to the lab's AI mentor.\n\
- Multimodal analysis: /attach <file> <prompt> to submit screenshots or recordings\n\
- Modes: /mode mentor | deep-analysis | cve-hunter | speed-ops\n\
- Voice: /speak on | off\n\
- /history to replay the transcript, /quit to close the session\n\
\n\
Authorized lab environment assumed. Stay in scope.";

pub struct Console {
    service: ChatService,
    synthesizer: SpeechSynthesizer,
    speech_enabled: bool,
    mode: Mode,
    transcript: Vec<Message>,
    busy: Arc<AtomicBool>,
}

impl Console {
    pub fn new(
        mut service: ChatService,
        synthesizer: SpeechSynthesizer,
        mode: Mode,
        speech_enabled: bool,
    ) -> Self {
        let busy = Arc::new(AtomicBool::new(false));

        // The thinking signal is the sole driver of the busy flag and the
        // on-screen indicator.
        let flag = busy.clone();
        service.set_thinking_observer(Arc::new(move |active| {
            flag.store(active, Ordering::SeqCst);
            if active {
                println!("   ... uplink processing ...");
            }
        }));

        Self {
            service,
            synthesizer,
            speech_enabled,
            mode,
            transcript: Vec::new(),
            busy,
        }
    }

    /// Run the interactive loop until EOF or /quit
    pub async fn run(&mut self) -> RedtermResult<()> {
        self.push(Message::system(WELCOME_TEXT));

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            self.prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            // One request in flight per turn; the loop is sequential, so
            // this only trips if an observer misbehaves.
            if self.busy.load(Ordering::SeqCst) {
                println!("   (request already in flight)");
                continue;
            }

            if let Some(command) = line.strip_prefix('/') {
                if !self.handle_command(command).await {
                    break;
                }
            } else {
                self.submit(&line, None).await;
            }
        }

        Ok(())
    }

    fn prompt(&self) {
        print!("redterm[{}]> ", self.mode);
        let _ = std::io::stdout().flush();
    }

    /// Returns false when the session should end
    async fn handle_command(&mut self, command: &str) -> bool {
        let mut words = command.split_whitespace();
        match words.next().unwrap_or_default() {
            "quit" | "exit" => return false,
            "mode" => match words.next().map(str::parse::<Mode>) {
                Some(Ok(mode)) => {
                    self.mode = mode;
                    self.push(Message::system(format!("Mode set to {}", mode)));
                }
                Some(Err(e)) => self.push(Message::system(e)),
                None => self.push(Message::system(format!("Current mode: {}", self.mode))),
            },
            "speak" => match words.next() {
                Some("on") => {
                    self.speech_enabled = true;
                    self.push(Message::system("Voice channel enabled"));
                }
                Some("off") => {
                    self.speech_enabled = false;
                    self.push(Message::system("Voice channel disabled"));
                }
                _ => self.push(Message::system("Usage: /speak on|off")),
            },
            "attach" => {
                let path = words.next().map(str::to_string);
                let prompt = words.collect::<Vec<_>>().join(" ");
                match path {
                    Some(path) => match load_attachment(Path::new(&path)) {
                        Ok(attachment) => self.submit(&prompt, Some(attachment)).await,
                        Err(reason) => self.push(Message::system(reason)),
                    },
                    None => self.push(Message::system("Usage: /attach <file> <prompt>")),
                }
            }
            "history" => {
                for message in &self.transcript {
                    render(message);
                }
            }
            "help" => self.push(Message::system(WELCOME_TEXT)),
            other => self.push(Message::system(format!("Unknown command '/{}'", other))),
        }
        true
    }

    async fn submit(&mut self, prompt: &str, attachment: Option<Attachment>) {
        let display = match &attachment {
            Some(attachment) => format!(
                "{} ({})",
                if prompt.is_empty() {
                    "[File Uploaded]"
                } else {
                    prompt
                },
                attachment.mime_type
            ),
            None => prompt.to_string(),
        };
        self.push(Message::user(display));

        match self.service.send(prompt, self.mode, attachment).await {
            Ok(reply) => {
                self.push(Message::bot(reply.text.clone(), reply.citations));
                // Speech is sequenced strictly after normalization: it only
                // ever sees finalized reply text.
                if self.speech_enabled {
                    self.synthesizer.speak(&reply.text).await;
                }
            }
            Err(e) => {
                warn!("❌ Uplink failure: {}", e);
                self.push(Message::error(UPLINK_FAILURE_TEXT));
            }
        }
    }

    fn push(&mut self, message: Message) {
        render(&message);
        self.transcript.push(message);
    }
}

fn render(message: &Message) {
    let marker = if message.is_error { "!" } else { " " };
    println!(
        "[{}] {}{} {}",
        message.timestamp.format("%H:%M:%S"),
        message.sender.label(),
        marker,
        message.text
    );

    if !message.citations.is_empty() {
        println!("    sources:");
        for (index, citation) in message.citations.iter().enumerate() {
            println!("      [{}] {} - {}", index + 1, citation.title, citation.uri);
        }
    }
    if message.sender == Sender::Bot {
        println!();
    }
}

/// Map a file extension to an accepted attachment MIME type.
///
/// Only image and video kinds are accepted; everything else is rejected
/// before composition.
fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        "mkv" => Some("video/x-matroska"),
        _ => None,
    }
}

/// Load and validate an attachment from disk
fn load_attachment(path: &Path) -> Result<Attachment, String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let mime_type = mime_for_extension(extension)
        .ok_or_else(|| format!("Unsupported attachment type '.{}'", extension))?;

    let metadata =
        std::fs::metadata(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    if metadata.len() > MAX_ATTACHMENT_BYTES {
        return Err(format!(
            "Attachment exceeds {} MiB limit",
            MAX_ATTACHMENT_BYTES / (1024 * 1024)
        ));
    }

    let bytes =
        std::fs::read(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;

    Ok(Attachment {
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
        mime_type: mime_type.to_string(),
    })
}
