//! Integration Tests
//!
//! End-to-end pool dumps into scratch directories.

use std::fs;
use std::path::Path;

use hound::WavReader;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use sigbuf_export::{
    init_test_logging, Complex, ExportConfig, ExportFormat, PoolExporter, SignalBuffer,
    SignalBufferPool,
};

/// Helper to create a real sine buffer
fn sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| (2.0 * std::f64::consts::PI * frequency * i as f64 / sample_rate as f64).sin())
        .collect()
}

/// Helper to create a complex exponential buffer
fn phasor(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<Complex<f64>> {
    (0..num_samples)
        .map(|i| {
            Complex::from_polar(
                0.5,
                2.0 * std::f64::consts::PI * frequency * i as f64 / sample_rate as f64,
            )
        })
        .collect()
}

fn test_pool() -> SignalBufferPool<f64> {
    let mut pool = SignalBufferPool::new("filters");
    pool.insert(SignalBuffer::real("input", sine(440.0, 8000, 64), 8000));
    pool.insert(SignalBuffer::complex("baseband", phasor(100.0, 8000, 32), 8000));
    pool.insert(SignalBuffer::real("decimated", sine(440.0, 4000, 16), 4000));
    pool
}

fn exporter_in(dir: &TempDir) -> PoolExporter {
    init_test_logging();
    PoolExporter::new(ExportConfig::with_root(dir.path().to_str().unwrap()).creating_directories())
}

fn read_scalars_f64(path: &Path) -> Vec<f64> {
    fs::read(path)
        .unwrap()
        .chunks_exact(8)
        .map(|c| f64::from_ne_bytes(c.try_into().unwrap()))
        .collect()
}

// === Raw Dumps ===

#[test]
fn test_raw_real_buffer_matches_memory() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_raw(&pool).unwrap();

    let path = dir.path().join("filters/input-double.raw");
    let expected: &[u8] = bytemuck::cast_slice(match pool.get("input").unwrap().data() {
        sigbuf_export::BufferData::Real(samples) => samples.as_slice(),
        _ => unreachable!(),
    });
    assert_eq!(fs::read(&path).unwrap(), expected);
    assert_eq!(read_scalars_f64(&path).len(), 64);
}

#[test]
fn test_raw_complex_buffer_interleaved() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_raw(&pool).unwrap();

    let scalars = read_scalars_f64(&dir.path().join("filters/baseband-complex.raw"));
    let source = phasor(100.0, 8000, 32);
    assert_eq!(scalars.len(), 2 * source.len());
    for (pair, sample) in scalars.chunks_exact(2).zip(source.iter()) {
        assert_eq!(pair, &[sample.re, sample.im]);
    }
}

#[test]
fn test_raw_single_precision_tag() {
    let dir = tempdir().unwrap();
    let mut pool = SignalBufferPool::new("single");
    pool.insert(SignalBuffer::real("chan0", vec![0.25_f32, 0.5, 0.75], 8000));

    exporter_in(&dir).dump_raw(&pool).unwrap();

    let bytes = fs::read(dir.path().join("single/chan0-float.raw")).unwrap();
    assert_eq!(bytes.len(), 3 * 4);
}

// === Script Dumps ===

#[test]
fn test_manifest_sources_every_buffer_in_order() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_script(&pool).unwrap();

    let manifest = fs::read_to_string(dir.path().join("filters.m")).unwrap();
    let sources: Vec<&str> = manifest.lines().filter(|l| l.starts_with("source(")).collect();
    assert_eq!(
        sources,
        vec![
            "source('filters/input.m');",
            "source('filters/baseband.m');",
            "source('filters/decimated.m');",
        ]
    );

    assert!(manifest.starts_with("% Autogenerated MATLAB script for sigbuf pool `filters'\n"));
    assert!(manifest.contains("% input: float buffer, 64 elements\n"));
    assert!(manifest.contains("% baseband: complex buffer, 32 elements\n"));
    assert!(manifest.ends_with("source('filters/decimated.m');\n\n"));

    for name in ["input", "baseband", "decimated"] {
        let script = fs::read_to_string(dir.path().join(format!("filters/{}.m", name))).unwrap();
        assert!(script.starts_with(&format!("{} = [\n", name)));
        assert!(script.ends_with("];\n"));
    }
}

#[test]
fn test_script_has_one_line_per_sample() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_script(&pool).unwrap();

    let script = fs::read_to_string(dir.path().join("filters/baseband.m")).unwrap();
    assert_eq!(script.lines().filter(|l| l.starts_with("  complex(")).count(), 32);
}

// === WAV Dumps ===

#[test]
fn test_wav_channels_and_frames() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_wav(&pool).unwrap();

    let input = WavReader::open(dir.path().join("filters/input.wav")).unwrap();
    assert_eq!(input.spec().channels, 1);
    assert_eq!(input.spec().sample_rate, 8000);
    assert_eq!(input.duration(), 64);

    let baseband = WavReader::open(dir.path().join("filters/baseband.wav")).unwrap();
    assert_eq!(baseband.spec().channels, 2);
    assert_eq!(baseband.duration(), 32);

    let decimated = WavReader::open(dir.path().join("filters/decimated.wav")).unwrap();
    assert_eq!(decimated.spec().sample_rate, 4000);
    assert_eq!(decimated.duration(), 16);
}

#[test]
fn test_wav_complex_left_right() {
    let dir = tempdir().unwrap();
    let pool = test_pool();

    exporter_in(&dir).dump_wav(&pool).unwrap();

    let mut reader = WavReader::open(dir.path().join("filters/baseband.wav")).unwrap();
    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    for (frame, expected) in samples.chunks_exact(2).zip(phasor(100.0, 8000, 32)) {
        approx::assert_abs_diff_eq!(frame[0], expected.re as f32, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(frame[1], expected.im as f32, epsilon = 1e-6);
    }
}

// === Failure Handling ===

fn pool_with_unwritable_buffer() -> SignalBufferPool<f64> {
    let mut pool = SignalBufferPool::new("broken");
    pool.insert(SignalBuffer::real("first", vec![1.0, 2.0], 8000));
    pool.insert(SignalBuffer::real("missing/second", vec![3.0], 8000));
    pool.insert(SignalBuffer::real("third", vec![4.0], 8000));
    pool
}

#[test]
fn test_raw_dump_stops_at_first_failure() {
    let dir = tempdir().unwrap();

    let result = exporter_in(&dir).dump_raw(&pool_with_unwritable_buffer());

    assert!(result.is_err());
    assert!(dir.path().join("broken/first-double.raw").exists());
    assert!(!dir.path().join("broken/third-double.raw").exists());
}

#[test]
fn test_wav_dump_stops_at_first_failure() {
    let dir = tempdir().unwrap();

    let err = exporter_in(&dir).dump_wav(&pool_with_unwritable_buffer()).unwrap_err();

    assert_eq!(err.error_code(), "SINK_OPEN_FAILED");
    assert!(dir.path().join("broken/first.wav").exists());
    assert!(!dir.path().join("broken/third.wav").exists());
}

#[test]
fn test_script_dump_stops_at_first_failure() {
    let dir = tempdir().unwrap();

    let result = exporter_in(&dir).dump_script(&pool_with_unwritable_buffer());

    assert!(result.is_err());
    assert!(dir.path().join("broken/first.m").exists());
    assert!(!dir.path().join("broken/third.m").exists());

    let manifest = fs::read_to_string(dir.path().join("broken.m")).unwrap();
    assert!(manifest.contains("source('broken/first.m');"));
    assert!(!manifest.contains("second"));
    assert!(!manifest.contains("third"));
}

#[test]
fn test_dump_all_stops_before_later_formats() {
    let dir = tempdir().unwrap();

    let result = exporter_in(&dir).dump_all(&pool_with_unwritable_buffer());

    assert!(result.is_err());
    assert!(!dir.path().join("broken/first-double.raw").exists());
    assert!(!dir.path().join("broken/first.wav").exists());
}

#[test]
fn test_unwritable_manifest_location() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("no-such-root");
    let exporter = PoolExporter::new(ExportConfig::with_root(root.to_str().unwrap()));

    let err = exporter.dump_script(&test_pool()).unwrap_err();

    assert_eq!(err.error_code(), "OPEN_FAILED");
    assert!(!root.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_manifest_write_failure_aborts_script_dump() {
    let dir = tempdir().unwrap();
    std::os::unix::fs::symlink("/dev/full", dir.path().join("crowded.m")).unwrap();

    let mut pool = SignalBufferPool::new("crowded");
    for i in 0..400 {
        pool.insert(SignalBuffer::real(format!("buffer_{:04}", i), vec![0.5_f32], 8000));
    }

    let err = exporter_in(&dir).dump_script(&pool).unwrap_err();

    assert_eq!(err.error_code(), "WRITE_FAILED");
    assert_eq!(err.path(), Some(dir.path().join("crowded.m").as_path()));
    assert!(!dir.path().join("crowded/buffer_0399.m").exists());
}

// === Idempotence ===

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            (
                entry.file_name().to_string_lossy().into_owned(),
                fs::read(entry.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

#[test]
fn test_repeated_dump_is_byte_identical() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(&dir);
    let pool = test_pool();

    for format in ExportFormat::ALL {
        exporter.dump(format, &pool).unwrap();
    }
    let first = snapshot(&dir.path().join("filters"));

    exporter.dump_all(&pool).unwrap();
    let second = snapshot(&dir.path().join("filters"));

    assert_eq!(first.len(), 9);
    assert_eq!(first, second);
}
