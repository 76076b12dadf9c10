//! Sound Engine for synthesized speech playback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback
//! infrastructure. The thread is created once and reused for every
//! buffer; it is never torn down for the lifetime of the process.

use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Commands sent to the audio thread
enum AudioCommand {
    PlaySamples {
        samples: Vec<f32>,
        sample_rate: u32,
    },
    PlayWait {
        samples: Vec<f32>,
        sample_rate: u32,
        done: mpsc::Sender<()>,
    },
    Stop,
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    pub fn new() -> anyhow::Result<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        // Spawn dedicated audio thread
        thread::spawn(move || {
            Self::audio_thread(receiver);
        });

        Ok(Self { sender })
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>) {
        use rodio::buffer::SamplesBuffer;
        use rodio::OutputStream;

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let mut sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                error!("❌ Failed to create audio sink: {}", e);
                return;
            }
        };

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::PlaySamples {
                    samples,
                    sample_rate,
                } => {
                    // Mono f32 buffer straight onto the sink
                    sink.append(SamplesBuffer::new(1, sample_rate, samples));
                }
                AudioCommand::PlayWait {
                    samples,
                    sample_rate,
                    done,
                } => {
                    sink.append(SamplesBuffer::new(1, sample_rate, samples));
                    sink.sleep_until_end();
                    let _ = done.send(());
                }
                AudioCommand::Stop => {
                    info!("🛑 Stopping playback");
                    sink.stop();
                    // Re-create sink after stop as it becomes unusable if we want to play again
                    if let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) {
                        sink = new_sink;
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    /// Queue a sample buffer for playback (async)
    pub fn play_samples(&self, samples: Vec<f32>, sample_rate: u32) -> anyhow::Result<()> {
        self.sender
            .send(AudioCommand::PlaySamples {
                samples,
                sample_rate,
            })
            .map_err(|e| anyhow::anyhow!("Audio thread disconnected: {}", e))
    }

    /// Play a sample buffer and wait for completion (sync/blocking)
    pub fn play_samples_sync(&self, samples: Vec<f32>, sample_rate: u32) -> anyhow::Result<()> {
        let (tx, rx) = mpsc::channel();
        self.sender
            .send(AudioCommand::PlayWait {
                samples,
                sample_rate,
                done: tx,
            })
            .map_err(|e| anyhow::anyhow!("Audio thread disconnected: {}", e))?;

        let _ = rx.recv();
        Ok(())
    }

    /// Stop all current playback and clear queue
    pub fn stop(&self) -> anyhow::Result<()> {
        self.sender
            .send(AudioCommand::Stop)
            .map_err(|e| anyhow::anyhow!("Audio thread disconnected: {}", e))
    }
}
