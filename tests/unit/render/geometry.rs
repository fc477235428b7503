use super::*;
use crate::container::decode::decode_header;
use crate::wav_fixture::WavFixture;

fn header(channels: u16, rate: u32, bits: u16, data_len: usize) -> HeaderData {
    let bytes = WavFixture::pcm(channels, rate, bits, vec![128; data_len]).build();
    decode_header(&bytes).unwrap().0
}

fn settings(frame_rate: u32, width: u32, height: u32) -> VideoSettings {
    VideoSettings {
        frame_rate,
        screen_width: width,
        screen_height: height,
        codec: CodecKind::Bmp,
        workers: 4,
    }
}

#[test]
fn hundred_samples_at_ten_hz_and_five_fps() {
    let g = FrameGeometry::new(&header(1, 10, 8, 100), &settings(5, 8, 4)).unwrap();
    assert_eq!(g.points_per_frame, 2);
    assert_eq!(g.point_spacing, 4.0);
    assert_eq!(g.total_frames, 50);
    assert_eq!(g.digit_width, 2);
    assert_eq!(g.channels, 1);
    assert_eq!(g.samples_per_channel, 100);
}

#[test]
fn frame_rate_above_sample_rate_is_rejected() {
    let err = FrameGeometry::new(&header(2, 10, 8, 50), &settings(24, 64, 32)).unwrap_err();
    assert!(matches!(err, WavscopeError::Config(_)));
}

#[test]
fn runtime_is_rounded_up_to_whole_seconds() {
    // 25 stereo samples at 48 Hz is about half a second of audio, rendered as one full second.
    let g = FrameGeometry::new(&header(2, 48, 8, 50), &settings(24, 64, 32)).unwrap();
    assert_eq!(g.samples_per_channel, 25);
    assert_eq!(g.points_per_frame, 2);
    assert_eq!(g.total_frames, 24);
    assert_eq!(g.digit_width, 2);
}

#[test]
fn fractional_spacing_is_truncated_per_point() {
    let g = FrameGeometry::new(&header(1, 30, 8, 30), &settings(10, 10, 4)).unwrap();
    assert_eq!(g.points_per_frame, 3);
    assert!((g.point_spacing - 10.0 / 3.0).abs() < 1e-12);
    assert_eq!(
        (0..3).map(|p| g.column(p)).collect::<Vec<_>>(),
        vec![0, 3, 6]
    );
}

#[test]
fn default_settings_on_cd_audio() {
    let bytes = WavFixture::pcm(2, 44_100, 16, vec![0; 4 * 44_100 + 4]).build();
    let (h, _) = decode_header(&bytes).unwrap();
    let s = VideoSettings {
        workers: 1,
        ..VideoSettings::default()
    };
    let g = FrameGeometry::new(&h, &s).unwrap();
    assert_eq!(g.points_per_frame, 1837);
    assert_eq!(g.total_frames, 48);
    assert_eq!(g.digit_width, 2);
}

#[test]
fn invalid_settings_are_rejected_first() {
    let err = FrameGeometry::new(&header(1, 10, 8, 10), &settings(0, 8, 4)).unwrap_err();
    assert!(matches!(err, WavscopeError::Config(_)));
}
