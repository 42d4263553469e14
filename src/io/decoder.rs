//! Audio decoding using Symphonia
//!
//! The header is validated by [`WavHeader::parse`] first; sample data is then
//! decoded by Symphonia's WAV reader and PCM codec and normalized to
//! [-1.0, 1.0] per channel.
//!
//! # Example
//!
//! ```no_run
//! use hitsound_analysis::io::decoder::{load_clip, DecodeOutcome};
//!
//! match load_clip("soft-hitclap.wav") {
//!     DecodeOutcome::Decoded(clip) => println!("{} samples", clip.len()),
//!     DecodeOutcome::Failed(reason) => println!("failed: {}", reason),
//! }
//! ```

use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::{i24, Sample};

use super::clip::AudioClip;
pub use super::clip::DecodeOutcome;
use super::wav_header::WavHeader;
use crate::error::AnalysisError;

/// Decode a WAV file into an [`AudioClip`]
///
/// The file is read fully and its handle released before decoding starts.
///
/// # Errors
///
/// `NotFound` if the file does not exist, `Io` for other read failures, and
/// any error from [`decode_bytes`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<AudioClip, AnalysisError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    log::debug!("Decoding audio file: {}", name);

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalysisError::NotFound(format!("{} does not exist", name)),
        _ => AnalysisError::from(e),
    })?;

    decode_owned(name, bytes)
}

/// Decode an in-memory WAV byte stream into an [`AudioClip`]
///
/// The input slice is never modified.
///
/// # Arguments
///
/// * `name` - Identifier stored on the clip
/// * `bytes` - Complete RIFF/WAVE file contents
///
/// # Errors
///
/// `Truncated`, `Malformed`, `UnsupportedEncoding` or `UnsupportedChannels`
/// depending on what is wrong with the stream.
pub fn decode_bytes(name: &str, bytes: &[u8]) -> Result<AudioClip, AnalysisError> {
    decode_owned(name.to_string(), bytes.to_vec())
}

/// Decode a WAV file, folding any failure into [`DecodeOutcome::Failed`]
pub fn load_clip<P: AsRef<Path>>(path: P) -> DecodeOutcome {
    decode_file(path).into()
}

fn decode_owned(name: String, bytes: Vec<u8>) -> Result<AudioClip, AnalysisError> {
    let header = WavHeader::parse(&bytes)?;
    let channels = header.channels as usize;

    if header.data_len == 0 {
        log::debug!("{} has no sample data", name);
        return empty_clip(name, &header);
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::Malformed("no audio track found".to_string()))?;
    let track_id = track.id;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let frames_hint = header.data_len / header.block_align.max(1) as usize;
    let mut planes: Vec<Vec<f32>> = vec![Vec::with_capacity(frames_hint); channels];

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet)?;
        append_decoded(decoded, &mut planes)?;
    }

    log::debug!(
        "Decoded {}: {} channel(s), {} samples per channel",
        name,
        channels,
        planes.first().map_or(0, Vec::len)
    );

    let mut planes = planes.into_iter();
    let left = planes.next().unwrap_or_default();
    match planes.next() {
        Some(right) => AudioClip::stereo(name, left, right, header.sample_rate),
        None => Ok(AudioClip::mono(name, left, header.sample_rate)),
    }
}

fn empty_clip(name: String, header: &WavHeader) -> Result<AudioClip, AnalysisError> {
    if header.channels == 2 {
        AudioClip::stereo(name, Vec::new(), Vec::new(), header.sample_rate)
    } else {
        Ok(AudioClip::mono(name, Vec::new(), header.sample_rate))
    }
}

fn append_decoded(
    decoded: AudioBufferRef<'_>,
    planes: &mut [Vec<f32>],
) -> Result<(), AnalysisError> {
    match decoded {
        AudioBufferRef::U8(buf) => append_planes(&*buf, planes, |s: u8| (s as f32 - 128.0) / 128.0),
        AudioBufferRef::S16(buf) => append_planes(&*buf, planes, |s: i16| s as f32 / 32768.0),
        AudioBufferRef::S24(buf) => {
            append_planes(&*buf, planes, |s: i24| s.inner() as f32 / 8388608.0)
        }
        AudioBufferRef::S32(buf) => {
            append_planes(&*buf, planes, |s: i32| s as f32 / 2147483648.0)
        }
        AudioBufferRef::F32(buf) => append_planes(&*buf, planes, |s: f32| s),
        _ => {
            return Err(AnalysisError::UnsupportedEncoding(
                "decoder produced an unexpected sample format".to_string(),
            ))
        }
    }
    Ok(())
}

fn append_planes<S: Sample>(
    buf: &AudioBuffer<S>,
    planes: &mut [Vec<f32>],
    convert: impl Fn(S) -> f32,
) {
    let available = buf.spec().channels.count();
    for (ch, plane) in planes.iter_mut().enumerate().take(available) {
        plane.extend(buf.chan(ch).iter().map(|&s| convert(s)));
    }
}
