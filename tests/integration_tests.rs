//! Integration tests for hit sound analysis

use std::path::Path;

use hitsound_analysis::io::decoder::decode_file;
use hitsound_analysis::pool::{EventList, GameMode, MapPool, SongFolder, TriggerEvent};
use hitsound_analysis::{
    analyze_pool, AnalysisConfig, AnalysisError, DelayCheck, HitSoundReport, Severity,
};

/// Write interleaved samples as a 16-bit PCM WAV file
fn write_wav_i16(path: &Path, channels: u16, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for &s in samples {
        writer
            .write_sample((s * 32767.0).round() as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Mono clip: `delay_ms` of silence followed by 20 ms at 0.8 amplitude
fn delayed_samples(delay_ms: f64) -> Vec<f32> {
    let mut samples = vec![0.0f32; (delay_ms * 50.0).round() as usize];
    samples.extend(std::iter::repeat(0.8f32).take(1000));
    samples
}

/// A header declaring 12-bit PCM, which is not supported
fn write_12bit_wav(path: &Path) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&44100u32.to_le_bytes());
    bytes.extend_from_slice(&88200u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&12u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    std::fs::write(path, bytes).expect("write 12-bit wav");
}

fn hit_list(name: &str, files: &[&str]) -> EventList {
    let events = files
        .iter()
        .enumerate()
        .map(|(i, f)| TriggerEvent::new(i as f64 * 500.0, [*f]))
        .collect();
    EventList::new(name, GameMode::Standard, 60_000.0, events).expect("valid list")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_pcm_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.wav");

        let raw: Vec<i16> = (-50..50).map(|i| i * 600).collect();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in &raw {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let clip = decode_file(&path).expect("decode should succeed");
        assert_eq!(clip.channels(), 1);
        assert_eq!(clip.sample_rate(), 48000);
        assert_eq!(clip.len(), raw.len());
        for (decoded, &s) in clip.left().iter().zip(&raw) {
            let expected = s as f32 / 32768.0;
            assert!(
                (decoded - expected).abs() < 1e-5,
                "expected {}, got {}",
                expected,
                decoded
            );
        }
    }

    #[test]
    fn test_24bit_and_float_decode() {
        let dir = tempfile::tempdir().unwrap();

        let path24 = dir.path().join("deep.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 24,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path24, spec).unwrap();
        for s in [0i32, 4_194_304, -4_194_304] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let clip = decode_file(&path24).unwrap();
        let expected = [0.0f32, 0.5, -0.5];
        for (decoded, want) in clip.left().iter().zip(&expected) {
            assert!((decoded - want).abs() < 1e-5);
        }

        let path_f32 = dir.path().join("float.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path_f32, spec).unwrap();
        for s in [0.25f32, -0.75, 0.5, 1.0] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let clip = decode_file(&path_f32).unwrap();
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.left(), &[0.25f32, 0.5][..]);
        assert_eq!(clip.right(), Some(&[-0.75f32, 1.0][..]));
    }

    #[test]
    fn test_unsupported_bit_depth_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.wav");
        write_12bit_wav(&path);

        let err = decode_file(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_empty_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            decode_file(&path),
            Err(AnalysisError::Truncated(_))
        ));
    }

    #[test]
    fn test_pool_delay_reports() {
        let dir = tempfile::tempdir().unwrap();
        write_wav_i16(&dir.path().join("late.wav"), 1, &delayed_samples(10.0));
        write_wav_i16(&dir.path().join("slight.wav"), 1, &delayed_samples(2.0));
        write_wav_i16(&dir.path().join("clean.wav"), 1, &delayed_samples(0.0));
        write_wav_i16(&dir.path().join("muted.wav"), 1, &vec![0.0; 2000]);
        write_12bit_wav(&dir.path().join("odd.wav"));

        // Stereo, both channels late by 6 ms
        let stereo: Vec<f32> = delayed_samples(6.0)
            .into_iter()
            .flat_map(|s| [s, s * 0.5])
            .collect();
        write_wav_i16(&dir.path().join("wide.wav"), 2, &stereo);

        let list = hit_list(
            "Hard",
            &[
                "odd", // unsupported, checked first
                "late",
                "slight.wav",
                "clean",
                "muted",
                "missing",
                "wide",
            ],
        );
        let pool = SongFolder::new(dir.path(), vec![list]);

        let analysis = analyze_pool(&pool, AnalysisConfig::default()).unwrap();
        let reports = &analysis.delay_reports;
        assert_eq!(analysis.metadata.files_checked, 7);
        assert_eq!(reports.len(), 5, "reports: {:?}", reports);

        match &reports[0] {
            HitSoundReport::UnableToCheck { path, reason } => {
                assert_eq!(path, "odd");
                assert!(reason.contains("unsupported encoding"), "{}", reason);
            }
            other => panic!("expected UnableToCheck, got {:?}", other),
        }

        match &reports[1] {
            HitSoundReport::Delay { path, delay_ms } => {
                assert_eq!(path, "late");
                assert!((delay_ms - 10.0).abs() <= 0.02);
            }
            other => panic!("expected Delay, got {:?}", other),
        }

        match &reports[2] {
            HitSoundReport::MinorDelay { path, delay_ms } => {
                assert_eq!(path, "slight.wav");
                assert!((delay_ms - 2.0).abs() <= 0.02);
            }
            other => panic!("expected MinorDelay, got {:?}", other),
        }

        assert_eq!(reports[3].path(), "missing");
        assert_eq!(reports[3].severity(), Severity::Error);

        assert_eq!(reports[4].path(), "wide");
        assert_eq!(reports[4].severity(), Severity::Warning);

        assert_eq!(analysis.reports_at_least(Severity::Warning).count(), 4);
    }

    #[test]
    fn test_sequential_and_parallel_reports_agree() {
        let dir = tempfile::tempdir().unwrap();
        for (i, delay) in [0.0, 1.0, 3.0, 8.0, 20.0].iter().enumerate() {
            write_wav_i16(
                &dir.path().join(format!("hs{}.wav", i)),
                1,
                &delayed_samples(*delay),
            );
        }
        let list = hit_list("Insane", &["hs0", "hs1", "hs2", "hs3", "hs4", "hs5"]);
        let pool = SongFolder::new(dir.path(), vec![list]);
        let check = DelayCheck::new(&pool, AnalysisConfig::default()).unwrap();

        let sequential: Vec<HitSoundReport> = check.reports().collect();
        assert_eq!(sequential, check.par_reports());
        assert_eq!(sequential.len(), 5);
    }

    #[test]
    fn test_pool_usage_summary() {
        let dir = tempfile::tempdir().unwrap();

        let dense_events = (0..100)
            .map(|i| TriggerEvent::new(i as f64 * 1000.0, ["x.wav"]))
            .collect();
        let sparse_events = vec![
            TriggerEvent::new(0.0, ["x.wav"]),
            TriggerEvent::new(50_000.0, ["x.wav"]),
        ];
        let dense = EventList::new("A", GameMode::Standard, 100_000.0, dense_events).unwrap();
        let sparse = EventList::new("B", GameMode::Standard, 100_000.0, sparse_events).unwrap();
        let pool = SongFolder::new(dir.path(), vec![dense, sparse]);

        let config = AnalysisConfig {
            common_usage_threshold_ms: 1200.0,
            frequency_score_threshold: 4.0,
            ..Default::default()
        };
        let analysis = analyze_pool(&pool, config).unwrap();

        // x.wav is not on disk
        assert_eq!(analysis.delay_reports.len(), 1);
        assert_eq!(pool.referenced_effect_files(), vec!["x.wav"]);

        let usage = analysis.usage_of("x").expect("usage for x.wav");
        assert_eq!(usage.lists[0].uses, 100);
        assert_eq!(usage.lists[1].uses, 2);
        assert_eq!(usage.common_list().map(|l| l.list.as_str()), Some("A"));

        // Steady 1 use/s converges to 1 / (1 - 0.8) = 5, so the score
        // crosses 4.0 within list A and keeps rising towards 5
        let peak = usage.peak.as_ref().expect("peak in dense list");
        assert_eq!(peak.list_name, "A");
        assert!(peak.score >= 4.0 && peak.score < 5.0);
    }

    #[test]
    fn test_empty_pool() {
        let dir = tempfile::tempdir().unwrap();
        let pool = SongFolder::new(dir.path(), vec![]);
        let analysis = analyze_pool(&pool, AnalysisConfig::default()).unwrap();
        assert!(analysis.delay_reports.is_empty());
        assert!(analysis.usage.is_empty());
    }
}
