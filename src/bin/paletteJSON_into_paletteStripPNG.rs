#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	retro_palette_tools::{
		exitWith, initLogging, parseArgs,
		palette_strip::{createPaletteImage, Args, PaletteStripImage, PaletteStripReport},
	},
	std::process::ExitCode,
};

fn main() -> ExitCode {
	initLogging();
	let Args { jsonFile, outputFile } = match parseArgs() {
		Ok(args) => args,
		Err(exitCode) => return exitCode,
	};
	exitWith(createPaletteImage(&jsonFile, outputFile.as_deref()).map(|report| {
		if let Some(PaletteStripReport { outputPath, width, colorCount }) = report {
			println!("palette image written: {}", outputPath.display());
			println!("image size: {width}x{} pixels", PaletteStripImage::HEIGHT);
			println!("colors: {colorCount}");
		}
	}))
}
