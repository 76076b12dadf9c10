//! Raw PCM decoding
//!
//! The speech endpoint returns raw mono 16-bit little-endian PCM at
//! 24 kHz. Playback wants normalized f32 samples, so each i16 sample is
//! divided by 32768, landing in [-1.0, 1.0).

/// Sample rate of the synthesized speech stream
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Decode 16-bit little-endian PCM bytes into normalized f32 samples.
///
/// An odd trailing byte is ignored.
pub fn decode_pcm16le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}
