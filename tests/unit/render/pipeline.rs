use super::*;
use crate::raster::CodecKind;
use crate::wav_fixture::WavFixture;

fn settings(codec: CodecKind) -> VideoSettings {
    VideoSettings {
        frame_rate: 5,
        screen_width: 16,
        screen_height: 8,
        codec,
        workers: 3,
    }
}

fn ramp(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 255 / n.max(1)) as u8).collect()
}

#[test]
fn prepare_input_reports_geometry() {
    let bytes = WavFixture::pcm(1, 10, 8, ramp(100)).build();
    let prepared = prepare_input(&bytes, &settings(CodecKind::Bmp)).unwrap();
    assert_eq!(prepared.header.derived.total_samples, 100);
    assert_eq!(prepared.normalized.samples_per_channel(), 100);
    assert_eq!(prepared.normalized.screen_height(), 8);
    assert_eq!(prepared.geometry.total_frames, 50);
}

#[test]
fn decode_failures_stop_before_rendering() {
    let mut bytes = WavFixture::pcm(1, 10, 8, ramp(10)).build();
    bytes[0..4].copy_from_slice(b"RIFZ");
    let err = prepare_input(&bytes, &settings(CodecKind::Bmp)).unwrap_err();
    assert!(err.is_pre_render());
}

#[test]
fn render_frames_writes_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = WavFixture::pcm(1, 10, 8, ramp(100)).build();
    let s = settings(CodecKind::Pgm);
    let prepared = prepare_input(&bytes, &s).unwrap();

    let stats = render_frames(&prepared.normalized, &prepared.geometry, &s, dir.path()).unwrap();
    assert_eq!(stats.frames_total, 50);
    assert_eq!(stats.frames_rendered, 50);
    assert_eq!(stats.highest_frame.map(|f| f.0), Some(49));

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 50);
    assert_eq!(names.first().map(String::as_str), Some("frame-00.pgm"));
    assert_eq!(names.last().map(String::as_str), Some("frame-49.pgm"));
}

#[test]
fn mismatched_geometry_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(CodecKind::Bmp);
    let a = prepare_input(&WavFixture::pcm(1, 10, 8, ramp(100)).build(), &s).unwrap();
    let b = prepare_input(&WavFixture::pcm(1, 10, 8, ramp(50)).build(), &s).unwrap();
    let err = render_frames(&a.normalized, &b.geometry, &s, dir.path()).unwrap_err();
    assert!(matches!(err, WavscopeError::Config(_)));
}

#[test]
fn visualize_file_into_scoped_dir() {
    let parent = tempfile::tempdir().unwrap();
    let input = parent.path().join("in.wav");
    std::fs::write(&input, WavFixture::pcm(2, 20, 8, ramp(80)).build()).unwrap();

    let frames = FrameDir::scoped(parent.path()).unwrap();
    let (prepared, stats) = visualize_file(&input, &settings(CodecKind::Bmp), &frames).unwrap();
    assert_eq!(prepared.geometry.total_frames, 10);
    assert_eq!(stats.frames_rendered, 10);
    assert_eq!(std::fs::read_dir(frames.path()).unwrap().count(), 10);

    let missing = visualize_file(&parent.path().join("nope.wav"), &settings(CodecKind::Bmp), &frames);
    assert!(matches!(missing.unwrap_err(), WavscopeError::Other(_)));
}
