//! End-to-end pipeline tests against temporary directories

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use wavecmp::{compare::ComparisonEngine, config::Config};

/// Write a mono 32-bit float WAV with the given samples
fn write_wav(path: &Path, samples: &[f32]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

/// Samples with an exact positive peak
fn signal(peak: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; 800];
    samples[100] = peak;
    samples[200] = -peak / 2.0;
    samples
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.plot.width = 240;
    config.plot.height = 120;
    config
}

#[tokio::test]
async fn test_only_common_stems_are_processed() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("raw");
    let dir_b = temp.path().join("reorder");
    let images = temp.path().join("images");

    write_wav(&dir_a.join("a.wav"), &signal(0.5));
    write_wav(&dir_a.join("b.wav"), &signal(0.5));
    write_wav(&dir_b.join("b.wav"), &signal(0.2));
    write_wav(&dir_b.join("c.wav"), &signal(0.2));

    let engine = ComparisonEngine::new(small_config());
    let report = engine.compare(&dir_a, &dir_b, &images).await.unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].stem, "b");
    assert!(report.pairs[0].is_complete());

    assert!(images.join("raw").join("wave_b.png").exists());
    assert!(images.join("reorder").join("wave_b.png").exists());
    assert!(!images.join("raw").join("wave_a.png").exists());
    assert!(!images.join("reorder").join("wave_c.png").exists());
}

#[tokio::test]
async fn test_nested_files_are_paired() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");

    write_wav(&dir_a.join("sub/deeper/kick.wav"), &signal(0.5));
    write_wav(&dir_b.join("kick.wav"), &signal(0.2));

    let engine = ComparisonEngine::new(small_config());
    let report = engine
        .compare(&dir_a, &dir_b, &temp.path().join("images"))
        .await
        .unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].stem, "kick");
    assert!(report.pairs[0].is_complete());
}

#[tokio::test]
async fn test_pairs_are_processed_in_sorted_order() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");

    for stem in ["zeta", "alpha", "mid"] {
        write_wav(&dir_a.join(format!("{stem}.wav")), &signal(0.3));
        write_wav(&dir_b.join(format!("{stem}.wav")), &signal(0.3));
    }

    let engine = ComparisonEngine::new(small_config());
    let report = engine
        .compare(&dir_a, &dir_b, &temp.path().join("images"))
        .await
        .unwrap();

    let stems: Vec<&str> = report.pairs.iter().map(|p| p.stem.as_str()).collect();
    assert_eq!(stems, vec!["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn test_corrupt_side_does_not_stop_the_batch() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");
    let images = temp.path().join("images");

    // "kick" is broken on the B side; "snare" is fine on both
    write_wav(&dir_a.join("kick.wav"), &signal(0.5));
    fs::create_dir_all(&dir_b).unwrap();
    fs::write(dir_b.join("kick.wav"), b"definitely not a wav file").unwrap();
    write_wav(&dir_a.join("snare.wav"), &signal(0.4));
    write_wav(&dir_b.join("snare.wav"), &signal(0.1));

    let engine = ComparisonEngine::new(small_config());
    let report = engine.compare(&dir_a, &dir_b, &images).await.unwrap();

    assert_eq!(report.pairs.len(), 2);

    // The surviving side of the broken pair still renders, auto-scaled
    let kick = &report.pairs[0];
    assert_eq!(kick.stem, "kick");
    assert!(kick.a.is_rendered());
    assert!(!kick.b.is_rendered());
    assert!(images.join("a").join("wave_kick.png").exists());
    assert!(!images.join("b").join("wave_kick.png").exists());

    // The healthy pair is unaffected
    let snare = &report.pairs[1];
    assert_eq!(snare.stem, "snare");
    assert!(snare.is_complete());

    assert_eq!(report.rendered_images(), 3);
    assert_eq!(report.failed_sides(), 1);
}

#[tokio::test]
async fn test_rerun_overwrites_existing_images() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");
    let images = temp.path().join("images");

    write_wav(&dir_a.join("loop.wav"), &signal(0.5));
    write_wav(&dir_b.join("loop.wav"), &signal(0.2));

    let engine = ComparisonEngine::new(small_config());
    let first = engine.compare(&dir_a, &dir_b, &images).await.unwrap();
    let second = engine.compare(&dir_a, &dir_b, &images).await.unwrap();

    assert_eq!(first.rendered_images(), 2);
    assert_eq!(second.rendered_images(), 2);
    assert!(images.join("a").join("wave_loop.png").exists());
}

#[tokio::test]
async fn test_non_audio_files_are_ignored() {
    let temp = tempdir().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");

    write_wav(&dir_a.join("hat.wav"), &signal(0.3));
    write_wav(&dir_b.join("hat.wav"), &signal(0.3));
    fs::write(dir_a.join("hat.txt"), b"notes").unwrap();
    fs::write(dir_b.join("readme.md"), b"docs").unwrap();

    let engine = ComparisonEngine::new(small_config());
    let report = engine
        .compare(&dir_a, &dir_b, &temp.path().join("images"))
        .await
        .unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].stem, "hat");
}
