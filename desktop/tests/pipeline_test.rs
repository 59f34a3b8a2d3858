use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use panelpack_core::{
    panel::{PANEL_HEIGHT, SCAN_ROWS},
    planes::{BIT_DEPTH, masks},
    stream::PackedStream,
};
use panelpack_desktop::{
    Config, Error,
    preview::write_pngs,
    run::{read_input, run},
    source::FrameSource,
};

fn save(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

fn pattern(dir: &Path) -> String {
    dir.join("frames").join("*.png").to_str().unwrap().to_owned()
}

fn frames_dir(dir: &Path) -> PathBuf {
    let frames = dir.join("frames");
    std::fs::create_dir_all(&frames).unwrap();
    frames
}

#[test]
fn packs_white_frame() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(2, 32, [255, 255, 255]));
    let output = dir.path().join("out.bin");

    let mut config = Config::new(pattern(dir.path()), &output);
    config.frame_cap = 1;
    let summary = run(&config).unwrap();

    assert_eq!(summary.frames, 1);
    assert_eq!(summary.width, 2);
    let data = std::fs::read(&output).unwrap();
    assert_eq!(data.len(), 192);
    assert!(data.iter().all(|&b| b == 0xDB));
}

#[test]
fn frames_are_packed_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    // written out of order on purpose
    save(&frames, "b.png", &solid(4, 32, [0, 0, 0]));
    save(&frames, "a.png", &solid(4, 32, [255, 255, 255]));
    save(&frames, "c.png", &solid(4, 32, [255, 0, 0]));
    let output = dir.path().join("out.bin");

    let summary = run(&Config::new(pattern(dir.path()), &output)).unwrap();
    assert_eq!(summary.frames, 3);

    let data = std::fs::read(&output).unwrap();
    let frame_len = 6 * SCAN_ROWS * 4;
    assert_eq!(data.len(), 3 * frame_len);
    assert!(data[..frame_len].iter().all(|&b| b == 0xDB));
    assert!(data[frame_len..2 * frame_len].iter().all(|&b| b == 0x00));
    assert!(data[2 * frame_len..].iter().all(|&b| b == 0x10 | 0x01));
}

#[test]
fn frame_cap_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    for i in 0..5 {
        save(&frames, &format!("{i:04}.png"), &solid(3, 32, [200, 10, 90]));
    }
    let output = dir.path().join("out.bin");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.frame_cap = 2;

    let summary = run(&config).unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(std::fs::read(&output).unwrap().len(), 2 * 6 * 16 * 3);
}

#[test]
fn frames_past_cap_are_not_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(3, 32, [1, 2, 3]));
    std::fs::write(frames.join("0001.png"), b"not a png").unwrap();
    let output = dir.path().join("out.bin");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.frame_cap = 1;

    assert!(run(&config).is_ok());
}

#[test]
fn wrong_height_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(4, 32, [255, 255, 255]));
    save(&frames, "0001.png", &solid(4, 32, [255, 255, 255]));
    let bad = save(&frames, "0002.png", &solid(4, 16, [255, 255, 255]));
    let output = dir.path().join("out.bin");

    match run(&Config::new(pattern(dir.path()), &output)) {
        Err(Error::Frame { path, source }) => {
            assert_eq!(path, bad);
            assert_eq!(
                source,
                panelpack_core::Error::FrameHeight {
                    index: 2,
                    height: 16
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn unreadable_image_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(4, 32, [0, 0, 0]));
    let bad = frames.join("0001.png");
    std::fs::write(&bad, b"not a png").unwrap();
    let output = dir.path().join("out.bin");

    match run(&Config::new(pattern(dir.path()), &output)) {
        Err(Error::Source { index, path, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(path, bad);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    for i in 0..12u32 {
        let image = RgbImage::from_fn(8, 32, |x, y| {
            Rgb([(x * 30 + i) as u8, (y * 7) as u8, (i * 20) as u8])
        });
        save(&frames, &format!("{i:04}.png"), &image);
    }

    let sequential = dir.path().join("seq.bin");
    let mut config = Config::new(pattern(dir.path()), &sequential);
    config.frame_cap = 10;
    run(&config).unwrap();

    let parallel = dir.path().join("par.bin");
    config.output_path = parallel.clone();
    config.jobs = 4;
    let summary = run(&config).unwrap();

    assert_eq!(summary.frames, 10);
    assert_eq!(
        std::fs::read(&sequential).unwrap(),
        std::fs::read(&parallel).unwrap()
    );
}

#[test]
fn parallel_failure_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(4, 32, [9, 9, 9]));
    save(&frames, "0001.png", &solid(5, 32, [9, 9, 9]));
    let output = dir.path().join("out.bin");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.jobs = 2;

    match run(&config) {
        Err(Error::Frame { source, .. }) => assert_eq!(
            source,
            panelpack_core::Error::FrameWidth {
                index: 1,
                width: 5,
                expected: 4
            }
        ),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(4, 32, [9, 9, 9]));
    let output = dir.path().join("out.bin");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.dry_run = true;

    assert_eq!(run(&config).unwrap().frames, 1);
    assert!(!output.exists());
}

#[test]
fn creates_output_directory_and_rust_module() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(2, 32, [255, 255, 255]));
    let output = dir.path().join("data").join("out.bin");
    let module = dir.path().join("data").join("frames.rs");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.emit_rust = Some(module.clone());

    run(&config).unwrap();
    assert_eq!(std::fs::read(&output).unwrap().len(), 192);
    let code = std::fs::read_to_string(&module).unwrap();
    assert!(code.contains("pub const WIDTH: usize = 2;"));
    assert!(code.contains("pub const FRAMES: usize = 1;"));
    assert!(code.contains("pub const PLANES: usize = 6;"));
    assert!(code.contains("pub static DATA: &[u8; 192] = include_bytes!(\"./out.bin\");"));
}

#[test]
fn unwritable_module_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(2, 32, [255, 255, 255]));
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"").unwrap();
    let output = dir.path().join("out.bin");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.emit_rust = Some(blocker.join("frames.rs"));

    assert!(matches!(run(&config), Err(Error::Io { .. })));
    assert!(!output.exists());
}

#[test]
fn module_in_other_directory_includes_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    save(&frames, "0000.png", &solid(2, 32, [255, 255, 255]));
    let output = dir.path().join("data").join("out.bin");
    let module = dir.path().join("src").join("frames.rs");
    let mut config = Config::new(pattern(dir.path()), &output);
    config.emit_rust = Some(module.clone());

    run(&config).unwrap();
    let code = std::fs::read_to_string(&module).unwrap();
    let expected = format!("include_bytes!({:?})", output.to_str().unwrap());
    assert!(code.contains(&expected), "{code}");
}

#[test]
fn source_orders_matches() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    for name in ["10.png", "02.png", "01.png"] {
        save(&frames, name, &solid(1, 32, [0, 0, 0]));
    }
    let source = FrameSource::from_pattern(&pattern(dir.path())).unwrap();
    let names: Vec<_> = source
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["01.png", "02.png", "10.png"]);
}

#[test]
fn bad_pattern_is_reported() {
    assert!(matches!(
        FrameSource::from_pattern("frames/[*.png"),
        Err(Error::Pattern { .. })
    ));
}

#[test]
fn preview_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let frames = frames_dir(dir.path());
    let mut image = solid(4, 32, [0, 0, 0]);
    image.put_pixel(1, 3, Rgb([255, 255, 255]));
    image.put_pixel(2, 20, Rgb([255, 0, 0]));
    save(&frames, "0000.png", &image);
    save(&frames, "0001.png", &solid(4, 32, [255, 255, 255]));
    let output = dir.path().join("out.bin");
    run(&Config::new(pattern(dir.path()), &output)).unwrap();

    let data = read_input(&output).unwrap();
    let masks = masks(BIT_DEPTH).unwrap();
    let stream = PackedStream::new(&data, 4, masks.len()).unwrap();
    let preview = dir.path().join("preview");
    assert_eq!(write_pngs(stream, &masks, &preview).unwrap(), 2);

    let first = image::open(preview.join("frame_0000.png")).unwrap().into_rgb8();
    assert_eq!(first.dimensions(), (4, PANEL_HEIGHT as u32));
    assert_eq!(first.get_pixel(1, 3), &Rgb([0xFC, 0xFC, 0xFC]));
    assert_eq!(first.get_pixel(2, 20), &Rgb([0xFC, 0, 0]));
    assert_eq!(first.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert!(preview.join("frame_0001.png").exists());
}
