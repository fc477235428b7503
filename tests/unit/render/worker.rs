use super::*;
use crate::container::decode::decode_header;
use crate::normalize::pass::normalize_matrix;
use crate::raster::CodecKind;
use crate::render::settings::VideoSettings;
use crate::samples::decode::decode_samples;
use crate::wav_fixture::WavFixture;

struct Setup {
    geometry: FrameGeometry,
    shared: SharedSamples,
}

fn setup(channels: u16, data: Vec<u8>, rate: u32, settings: VideoSettings) -> Setup {
    let bytes = WavFixture::pcm(channels, rate, 8, data).build();
    let (header, _) = decode_header(&bytes).unwrap();
    let samples = decode_samples(&header, &bytes).unwrap();
    let normalized = normalize_matrix(&header, &samples, settings.screen_height).unwrap();
    Setup {
        geometry: FrameGeometry::new(&header, &settings).unwrap(),
        shared: SharedSamples::publish(&normalized),
    }
}

fn pgm_settings(frame_rate: u32, width: u32, height: u32) -> VideoSettings {
    VideoSettings {
        frame_rate,
        screen_width: width,
        screen_height: height,
        codec: CodecKind::Pgm,
        workers: 1,
    }
}

fn lit(image: &dyn RasterImage) -> Vec<(u32, u32)> {
    let w = image.width() as usize;
    image
        .pixels()
        .iter()
        .enumerate()
        .filter(|&(_, &p)| p != 0)
        .map(|(i, _)| ((i % w) as u32, (i / w) as u32))
        .collect()
}

#[test]
fn points_land_on_spaced_columns() {
    // 4 samples per frame over 8 columns, height 255 so rows are 255 - value
    let s = setup(1, vec![255, 200, 100, 0, 10, 20, 30, 40], 8, pgm_settings(2, 8, 255));
    assert_eq!(s.geometry.points_per_frame, 4);

    let dir = Path::new(".");
    let task = FrameTask {
        frame: FrameIndex(0),
        geometry: &s.geometry,
        shared: &s.shared,
        out_dir: dir,
    };
    let image = rasterize_frame(&task).unwrap();
    let mut points = lit(image.as_ref());
    points.sort_unstable();
    assert_eq!(points, vec![(0, 0), (2, 55), (4, 155), (6, 254)]);
    assert!(image.pixels().iter().all(|&p| p == 0 || p == 255));

    let task = FrameTask {
        frame: FrameIndex(1),
        ..task
    };
    let mut points = lit(rasterize_frame(&task).unwrap().as_ref());
    points.sort_unstable();
    assert_eq!(points, vec![(0, 245), (2, 235), (4, 225), (6, 215)]);
}

#[test]
fn channels_are_averaged() {
    let s = setup(2, vec![255, 0, 0, 0], 2, pgm_settings(1, 4, 255));
    let task = FrameTask {
        frame: FrameIndex(0),
        geometry: &s.geometry,
        shared: &s.shared,
        out_dir: Path::new("."),
    };
    let mut points = lit(rasterize_frame(&task).unwrap().as_ref());
    points.sort_unstable();
    // sample 0: rows 0 and 255 -> 127; sample 1: both 255, clamped to the last row
    assert_eq!(points, vec![(0, 127), (2, 254)]);
}

#[test]
fn samples_past_the_end_are_skipped() {
    // 3 samples at 2 per frame: the second frame only has one point
    let s = setup(1, vec![0, 0, 0], 2, pgm_settings(1, 4, 16));
    assert_eq!(s.geometry.total_frames, 2);
    for (frame, expected) in [(0u64, 2usize), (1, 1), (2, 0), (3, 0)] {
        let task = FrameTask {
            frame: FrameIndex(frame),
            geometry: &s.geometry,
            shared: &s.shared,
            out_dir: Path::new("."),
        };
        assert_eq!(lit(rasterize_frame(&task).unwrap().as_ref()).len(), expected);
    }
}

#[test]
fn writes_zero_padded_file() {
    let dir = tempfile::tempdir().unwrap();
    let s = setup(1, vec![128; 100], 10, VideoSettings {
        codec: CodecKind::Bmp,
        ..pgm_settings(5, 16, 8)
    });
    assert_eq!(s.geometry.digit_width, 2);

    let task = FrameTask {
        frame: FrameIndex(7),
        geometry: &s.geometry,
        shared: &s.shared,
        out_dir: dir.path(),
    };
    let path = render_frame_to_disk(&task).unwrap();
    assert_eq!(path, dir.path().join("frame-07.bmp"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), crate::raster::BmpImage::file_len(16, 8, 1));
    assert_eq!(&bytes[..2], b"BM");
}

#[test]
fn write_failure_is_a_render_error_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let s = setup(1, vec![0; 10], 10, pgm_settings(1, 4, 4));
    let task = FrameTask {
        frame: FrameIndex(0),
        geometry: &s.geometry,
        shared: &s.shared,
        out_dir: &missing,
    };
    let err = render_frame_to_disk(&task).unwrap_err();
    assert!(matches!(err, WavscopeError::Render(_)));
    assert!(err.to_string().contains("does-not-exist"));
}
