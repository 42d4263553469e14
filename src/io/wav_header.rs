//! RIFF/WAVE header probing
//!
//! Validates the container header before any sample decoding so that each way
//! a file can be unusable surfaces as its own error: empty or cut-off files are
//! `Truncated`, non-WAVE data is `Malformed`, and formats outside the supported
//! set are `UnsupportedEncoding` / `UnsupportedChannels`.

use crate::error::AnalysisError;

const FORMAT_PCM: u16 = 0x0001;
const FORMAT_IEEE_FLOAT: u16 = 0x0003;
const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Sample encoding declared by the `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Unsigned 8-bit integer
    U8,
    /// Signed 16-bit integer
    I16,
    /// Signed 24-bit integer
    I24,
    /// Signed 32-bit integer
    I32,
    /// 32-bit IEEE float
    F32,
}

impl SampleEncoding {
    /// Bits per sample for this encoding
    pub fn bits(&self) -> u16 {
        match self {
            SampleEncoding::U8 => 8,
            SampleEncoding::I16 => 16,
            SampleEncoding::I24 => 24,
            SampleEncoding::I32 | SampleEncoding::F32 => 32,
        }
    }
}

/// Layout information read from a WAVE header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Sample encoding
    pub encoding: SampleEncoding,
    /// Channel count (1 or 2)
    pub channels: u16,
    /// Declared sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per frame (all channels)
    pub block_align: u16,
    /// Length of the sample data in bytes
    pub data_len: usize,
}

impl WavHeader {
    /// Parse and validate the header of a RIFF/WAVE byte stream
    ///
    /// Walks the chunk list until the `data` chunk, checking that the sample
    /// data is fully present. Decoding the samples is left to the decoder.
    ///
    /// # Errors
    ///
    /// - `Truncated` if the stream is empty, ends inside the header, or holds
    ///   less sample data than declared
    /// - `Malformed` if it is not RIFF/WAVE or the layout is inconsistent
    /// - `UnsupportedEncoding` for format tags or bit depths outside
    ///   PCM 8/16/24/32 and float 32
    /// - `UnsupportedChannels` for channel counts other than 1 or 2
    pub fn parse(bytes: &[u8]) -> Result<Self, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::Truncated("file is empty".to_string()));
        }

        if bytes.len() < 12 {
            return Err(AnalysisError::Truncated(format!(
                "{} bytes is too short for a RIFF header",
                bytes.len()
            )));
        }

        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(AnalysisError::Malformed(
                "not a RIFF/WAVE container".to_string(),
            ));
        }

        let mut offset = 12;
        let mut fmt: Option<Self> = None;
        loop {
            let chunk_header = bytes.get(offset..offset + 8).ok_or_else(|| {
                let what = if fmt.is_none() { "fmt" } else { "data" };
                AnalysisError::Truncated(format!("file ends before the {} chunk", what))
            })?;
            let id = &chunk_header[0..4];
            let size = read_u32(chunk_header, 4) as usize;
            let body_start = offset + 8;

            match id {
                b"fmt " => {
                    let body = bytes.get(body_start..body_start + size).ok_or_else(|| {
                        AnalysisError::Truncated("fmt chunk is cut off".to_string())
                    })?;
                    fmt = Some(Self::from_fmt_chunk(body)?);
                }
                b"data" => {
                    let header = fmt.ok_or_else(|| {
                        AnalysisError::Malformed("data chunk precedes the fmt chunk".to_string())
                    })?;
                    let available = bytes.len() - body_start;
                    if size > available {
                        return Err(AnalysisError::Truncated(format!(
                            "data chunk declares {} bytes but only {} are present",
                            size, available
                        )));
                    }
                    if size % header.block_align as usize != 0 {
                        return Err(AnalysisError::Malformed(format!(
                            "data length {} is not a whole number of {}-byte frames",
                            size, header.block_align
                        )));
                    }
                    return Ok(Self {
                        data_len: size,
                        ..header
                    });
                }
                _ => {}
            }

            // Chunks are word aligned
            offset = body_start + size + (size & 1);
        }
    }

    fn from_fmt_chunk(body: &[u8]) -> Result<Self, AnalysisError> {
        if body.len() < 16 {
            return Err(AnalysisError::Truncated(format!(
                "fmt chunk is {} bytes, expected at least 16",
                body.len()
            )));
        }

        let mut format_tag = read_u16(body, 0);
        let channels = read_u16(body, 2);
        let sample_rate = read_u32(body, 4);
        let block_align = read_u16(body, 12);
        let bits = read_u16(body, 14);

        if format_tag == FORMAT_EXTENSIBLE {
            // The sub-format GUID starts with the actual format tag
            if body.len() < 26 {
                return Err(AnalysisError::Truncated(
                    "extensible fmt chunk is missing its sub-format".to_string(),
                ));
            }
            format_tag = read_u16(body, 24);
        }

        let encoding = match (format_tag, bits) {
            (FORMAT_PCM, 8) => SampleEncoding::U8,
            (FORMAT_PCM, 16) => SampleEncoding::I16,
            (FORMAT_PCM, 24) => SampleEncoding::I24,
            (FORMAT_PCM, 32) => SampleEncoding::I32,
            (FORMAT_IEEE_FLOAT, 32) => SampleEncoding::F32,
            (FORMAT_PCM, b) => {
                return Err(AnalysisError::UnsupportedEncoding(format!(
                    "{}-bit integer PCM",
                    b
                )))
            }
            (FORMAT_IEEE_FLOAT, b) => {
                return Err(AnalysisError::UnsupportedEncoding(format!(
                    "{}-bit float",
                    b
                )))
            }
            (tag, _) => {
                return Err(AnalysisError::UnsupportedEncoding(format!(
                    "format tag 0x{:04X} is not uncompressed PCM",
                    tag
                )))
            }
        };

        if channels != 1 && channels != 2 {
            return Err(AnalysisError::UnsupportedChannels(channels));
        }

        let expected_align = channels * (bits / 8);
        if block_align != expected_align {
            return Err(AnalysisError::Malformed(format!(
                "block align {} does not match {} channel(s) of {}-bit samples",
                block_align, channels, bits
            )));
        }

        log::debug!(
            "WAVE header: {:?}, {} channel(s), {} Hz",
            encoding,
            channels,
            sample_rate
        );

        Ok(Self {
            encoding,
            channels,
            sample_rate,
            block_align,
            data_len: 0,
        })
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
