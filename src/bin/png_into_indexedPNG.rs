#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	retro_palette_tools::{
		convert::{convertToIndexed, Args, ConvertReport},
		exitWith, initLogging, parseArgs,
	},
	std::process::ExitCode,
};

fn main() -> ExitCode {
	initLogging();
	let args = match parseArgs::<Args>() {
		Ok(args) => args,
		Err(exitCode) => return exitCode,
	};
	let (input, output) = (args.input.display(), args.output.display());
	exitWith(convertToIndexed(&args.input, &args.output, &args.config()).map(|report| match report {
		ConvertReport::AlreadyIndexed => {
			println!("already indexed, copied unchanged: {input} -> {output}");
		}
		ConvertReport::Quantized { usedColors } => {
			println!("converted: {input} -> {output}");
			println!("palette colors: {usedColors}");
		}
	}))
}
