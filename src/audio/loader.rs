use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::types::AudioBuffer;
use crate::error::{AudioError, Result};

/// Audio file loader supporting multiple formats
pub struct AudioLoader;

impl AudioLoader {
    /// Load an audio file and return a mono buffer at its native sample rate
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "wav" => Self::load_wav(path).await,
            "mp3" | "flac" | "ogg" | "m4a" | "aac" => Self::load_with_symphonia(path).await,
            _ => Err(AudioError::UnsupportedFormat { format: extension }.into()),
        }
    }

    /// Load WAV files using the hound crate (most reliable for WAV)
    async fn load_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
        let path = path.as_ref();

        let reader = hound::WavReader::open(path).map_err(|_| AudioError::LoadFailed {
            path: path.display().to_string(),
        })?;

        let spec = reader.spec();
        let sample_rate = spec.sample_rate;
        let channels = spec.channels;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| AudioError::LoadFailed {
                    path: path.display().to_string(),
                })?,
            hound::SampleFormat::Int => {
                let bit_depth = spec.bits_per_sample;
                let samples: std::result::Result<Vec<i32>, _> = reader.into_samples().collect();

                samples
                    .map_err(|_| AudioError::LoadFailed {
                        path: path.display().to_string(),
                    })?
                    .into_iter()
                    .map(|sample| Self::int_to_float(sample, bit_depth))
                    .collect()
            }
        };

        Ok(AudioBuffer {
            samples: Self::downmix(interleaved, channels),
            sample_rate,
            file_path: path.to_path_buf(),
        })
    }

    /// Load various formats using Symphonia
    async fn load_with_symphonia<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|_| AudioError::LoadFailed {
            path: path.display().to_string(),
        })?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a probe hint using the file extension
        let mut hint = Hint::new();
        if let Some(extension) = path.extension() {
            if let Some(extension_str) = extension.to_str() {
                hint.with_extension(extension_str);
            }
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string(),
            })?;

        let mut format = probed.format;

        // Find the first audio track with a known (decodable) codec
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::LoadFailed {
                path: path.display().to_string(),
            })?;

        let track_id = track.id;

        let sample_rate =
            track
                .codec_params
                .sample_rate
                .ok_or_else(|| AudioError::InvalidParameters {
                    details: "No sample rate found".to_string(),
                })?;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string(),
            })?;

        // Decode all packets, downmixing each frame to mono as we go
        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(SymphoniaError::IoError(_)) => break, // End of stream
                Err(_) => break,
            };

            // Consume any new metadata
            while !format.metadata().is_latest() {
                format.metadata().pop();
            }

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    Self::push_mono_frames(&decoded, &mut samples);
                }
                Err(SymphoniaError::IoError(_)) => break,
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(_) => break,
            }
        }

        Ok(AudioBuffer {
            samples,
            sample_rate,
            file_path: path.to_path_buf(),
        })
    }

    /// Convert integer sample to float (-1.0 to 1.0)
    fn int_to_float(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => (sample as f32 - 128.0) / 128.0,
            16 => sample as f32 / 32768.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            _ => sample as f32 / 32768.0, // Default to 16-bit
        }
    }

    /// Average interleaved channels down to a mono signal
    fn downmix(interleaved: Vec<f32>, channels: u16) -> Vec<f32> {
        if channels <= 1 {
            return interleaved;
        }

        interleaved
            .chunks(channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    /// Downmix a decoded Symphonia buffer to mono f32 frames
    fn push_mono_frames(buffer: &AudioBufferRef, output: &mut Vec<f32>) {
        match buffer {
            AudioBufferRef::F32(buf) => {
                let channels = buf.spec().channels.count();
                if channels == 0 {
                    return;
                }
                for frame in 0..buf.frames() {
                    let mut acc = 0.0f32;
                    for ch in 0..channels {
                        acc += buf.chan(ch)[frame];
                    }
                    output.push(acc / channels as f32);
                }
            }
            AudioBufferRef::F64(buf) => {
                let channels = buf.spec().channels.count();
                if channels == 0 {
                    return;
                }
                for frame in 0..buf.frames() {
                    let mut acc = 0.0f64;
                    for ch in 0..channels {
                        acc += buf.chan(ch)[frame];
                    }
                    output.push((acc / channels as f64) as f32);
                }
            }
            AudioBufferRef::S32(buf) => {
                let channels = buf.spec().channels.count();
                if channels == 0 {
                    return;
                }
                for frame in 0..buf.frames() {
                    let mut acc = 0.0f32;
                    for ch in 0..channels {
                        acc += buf.chan(ch)[frame] as f32 / 2147483648.0;
                    }
                    output.push(acc / channels as f32);
                }
            }
            AudioBufferRef::S16(buf) => {
                let channels = buf.spec().channels.count();
                if channels == 0 {
                    return;
                }
                for frame in 0..buf.frames() {
                    let mut acc = 0.0f32;
                    for ch in 0..channels {
                        acc += buf.chan(ch)[frame] as f32 / 32768.0;
                    }
                    output.push(acc / channels as f32);
                }
            }
            _ => {
                tracing::warn!("Unsupported audio buffer format, skipping packet");
            }
        }
    }

    /// Detect audio format from file extension
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Check if a file format is supported
    pub fn is_format_supported(extension: &str) -> bool {
        matches!(
            extension.to_lowercase().as_str(),
            "wav" | "mp3" | "flac" | "ogg" | "m4a" | "aac"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(AudioLoader::detect_format("test.wav"), Some("wav".to_string()));
        assert_eq!(AudioLoader::detect_format("test.MP3"), Some("mp3".to_string()));
        assert_eq!(AudioLoader::detect_format("test"), None);
    }

    #[test]
    fn test_format_support() {
        assert!(AudioLoader::is_format_supported("wav"));
        assert!(AudioLoader::is_format_supported("FLAC"));
        assert!(!AudioLoader::is_format_supported("xyz"));
    }

    #[test]
    fn test_int_to_float_conversion() {
        assert_eq!(AudioLoader::int_to_float(0, 16), 0.0);
        assert_eq!(AudioLoader::int_to_float(32767, 16), 32767.0 / 32768.0);
        assert_eq!(AudioLoader::int_to_float(-32768, 16), -1.0);
    }

    #[test]
    fn test_downmix_stereo() {
        let interleaved = vec![0.5, -0.5, 1.0, 0.0];
        let mono = AudioLoader::downmix(interleaved, 2);
        assert_eq!(mono, vec![0.0, 0.5]);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(AudioLoader::downmix(samples.clone(), 1), samples);
    }

    #[tokio::test]
    async fn test_unsupported_format() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.xyz");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"dummy content").unwrap();

        let result = AudioLoader::load(&file_path).await;
        assert!(result.is_err());

        if let Err(crate::error::WavecmpError::Audio(AudioError::UnsupportedFormat { format })) =
            result
        {
            assert_eq!(format, "xyz");
        } else {
            panic!("Expected UnsupportedFormat error");
        }
    }

    #[tokio::test]
    async fn test_load_wav_downmixes_to_mono() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("stereo.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&file_path, spec).unwrap();
        // Two frames: (0.5, -0.5) and (1.0, 0.0)
        for sample in [0.5f32, -0.5, 1.0, 0.0] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = AudioLoader::load(&file_path).await.unwrap();
        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.samples, vec![0.0, 0.5]);
    }

    #[tokio::test]
    async fn test_load_corrupt_wav_fails() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("broken.wav");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"not a riff header at all").unwrap();

        let result = AudioLoader::load(&file_path).await;
        assert!(matches!(
            result,
            Err(crate::error::WavecmpError::Audio(AudioError::LoadFailed { .. }))
        ));
    }
}
