#![allow(non_snake_case)]

use {
	png::ColorType,
	pretty_assertions::assert_eq,
	retro_palette_tools::{
		palette_strip::{createPaletteImage, PaletteStripReport},
		Error,
	},
	std::{fs, fs::File, path::Path},
	tempfile::TempDir,
};

fn readTestPNG(path: &Path) -> (ColorType, [u32; 2], Vec<u8>) {
	let png = &mut png::Decoder::new(File::open(path).unwrap()).read_info().unwrap();
	let mut data = vec![0; png.output_buffer_size()];
	let frame = png.next_frame(&mut data).unwrap();
	data.truncate(frame.buffer_size());
	(frame.color_type, [frame.width, frame.height], data)
}

fn writeJSON(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, contents).unwrap();
	path
}

#[test]
fn stripMirrorsTheColorList() {
	let dir = TempDir::new().unwrap();
	let json = writeJSON(&dir, "rgb.json", r##"["#FF0000", "#00FF00", "#0000FF"]"##);
	let report = createPaletteImage(&json, None).unwrap();
	let outputPath = dir.path().join("rgb.png");
	assert_eq!(report, Some(PaletteStripReport { outputPath: outputPath.clone(), width: 3, colorCount: 3 }));
	assert_eq!(readTestPNG(&outputPath), (ColorType::Rgb, [3, 1], vec![255, 0, 0, 0, 255, 0, 0, 0, 255]));
}

#[test]
fn explicitOutputPathWins() {
	let dir = TempDir::new().unwrap();
	let json = writeJSON(&dir, "gb.json", r#"["0f380f", "306230", "8bac0f", "9bbc0f"]"#);
	let output = dir.path().join("dmg.png");
	let report = createPaletteImage(&json, Some(output.as_path())).unwrap().unwrap();
	assert_eq!(report.outputPath, output);
	assert!(!dir.path().join("gb.png").exists());
	let (_, dimensions, data) = readTestPNG(&output);
	assert_eq!(dimensions, [4, 1]);
	assert_eq!(&data[..3], &[0x0F, 0x38, 0x0F]);
	assert_eq!(&data[9..], &[0x9B, 0xBC, 0x0F]);
}

#[test]
fn emptyListWritesNothing() {
	let dir = TempDir::new().unwrap();
	let json = writeJSON(&dir, "empty.json", "[]");
	assert_eq!(createPaletteImage(&json, None).unwrap(), None);
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn malformedHexIsRejected() {
	let dir = TempDir::new().unwrap();
	for (name, contents) in [("zz.json", r##"["#ZZZZZZ"]"##), ("short.json", r##"["#000000", "#FFF"]"##)] {
		let json = writeJSON(&dir, name, contents);
		let result = createPaletteImage(&json, None);
		assert!(matches!(result, Err(Error::MalformedInput { .. })), "{name}: {result:?}");
		assert!(!json.with_extension("png").exists(), "{name}");
	}
}

#[test]
fn nonListJsonIsMalformed() {
	let dir = TempDir::new().unwrap();
	for (name, contents) in
		[("object.json", r##"{"a": "#FFFFFF"}"##), ("numbers.json", "[1, 2]"), ("broken.json", r##"["#FF"##)]
	{
		let json = writeJSON(&dir, name, contents);
		let result = createPaletteImage(&json, None);
		assert!(matches!(result, Err(Error::MalformedInput { .. })), "{name}: {result:?}");
	}
}

#[test]
fn missingJsonIsReported() {
	let dir = TempDir::new().unwrap();
	let result = createPaletteImage(&dir.path().join("absent.json"), None);
	assert!(matches!(result, Err(Error::InputNotFound { .. })), "{result:?}");
}
