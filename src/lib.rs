#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {clap::Parser, glam::IVec3, std::process::ExitCode};

pub const PALETTE_MAX_COLORS: u16 = 256;
pub const RGB_SIZE: usize = 3;

pub use error::{Error, Result};

pub mod error {
	use {
		std::{
			io,
			path::{Path, PathBuf},
		},
		thiserror::Error,
	};

	pub type Result<T, E = Error> = core::result::Result<T, E>;

	pub const FAILURE_EXIT_CODE: u8 = 1;

	/// Every way either tool can fail. Both binaries print the message and exit with
	/// [`FAILURE_EXIT_CODE`].
	#[derive(Error, Debug)]
	pub enum Error {
		#[error("file not found: {}", .path.display())]
		InputNotFound { path: PathBuf },

		#[error("{}: could not decode PNG: {source}", .path.display())]
		Decode { path: PathBuf, source: png::DecodingError },

		#[error("{}: {reason}", .path.display())]
		MalformedInput { path: PathBuf, reason: String },

		#[error("{}: could not write: {source}", .path.display())]
		Write { path: PathBuf, source: io::Error },

		#[error("{0}")]
		Processing(String),
	}

	impl Error {
		pub fn opening(path: &Path, err: io::Error) -> Self {
			if err.kind() == io::ErrorKind::NotFound {
				Self::InputNotFound { path: path.to_path_buf() }
			} else {
				Self::Processing(format!("{}: {err}", path.display()))
			}
		}

		pub fn writing(path: &Path, source: impl Into<io::Error>) -> Self {
			Self::Write { path: path.to_path_buf(), source: source.into() }
		}
	}
}

pub mod color {
	use {
		crate::RGB_SIZE,
		core::{array, fmt, iter, str::FromStr},
		glam::IVec3,
		thiserror::Error,
	};

	#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
	pub struct Rgb(pub [u8; RGB_SIZE]);

	impl Rgb {
		pub const WHITE: Self = Self([u8::MAX; RGB_SIZE]);

		pub fn toIVec3(self) -> IVec3 {
			IVec3::from_array(self.0.map(i32::from))
		}
	}

	impl fmt::Display for Rgb {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			let Self([red, green, blue]) = self;
			write!(f, "#{red:02X}{green:02X}{blue:02X}")
		}
	}

	#[derive(Error, Debug, PartialEq, Eq)]
	pub enum ParseHexColorError {
		#[error("expected 6 hex digits, found {0}")]
		WrongLength(usize),

		#[error("{0:?} is not a hex digit")]
		InvalidDigit(char),
	}

	/// `#RRGGBB` or `RRGGBB`, case-insensitive.
	impl FromStr for Rgb {
		type Err = ParseHexColorError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let digits = s.strip_prefix('#').unwrap_or(s);
			let mut nibbles = [0_u8; 2 * RGB_SIZE];
			let len = digits.chars().count();
			if len != nibbles.len() {
				return Err(ParseHexColorError::WrongLength(len));
			}
			for (nibble, c) in iter::zip(&mut nibbles, digits.chars()) {
				*nibble = c.to_digit(16).ok_or(ParseHexColorError::InvalidDigit(c))? as _;
			}
			Ok(Self(array::from_fn(|i| nibbles[2 * i] << 4 | nibbles[2 * i + 1])))
		}
	}

}

pub mod image {
	use {
		crate::{color::Rgb, Error, Result, RGB_SIZE},
		glam::Vec3,
		png::{BitDepth, ColorType, Transformations},
		std::{
			fs::File,
			io::{BufReader, BufWriter, Write},
			path::Path,
		},
	};

	/// Color mode of the file as stored, before any normalization.
	#[derive(Clone, Copy, PartialEq, Eq, Debug)]
	pub enum ColorMode {
		Truecolor,
		TruecolorAlpha,
		Indexed,
		/// Grayscale with or without alpha.
		Other,
	}

	impl ColorMode {
		pub fn fromColorType(colorType: ColorType) -> Self {
			match colorType {
				ColorType::Rgb => Self::Truecolor,
				ColorType::Rgba => Self::TruecolorAlpha,
				ColorType::Indexed => Self::Indexed,
				ColorType::Grayscale | ColorType::GrayscaleAlpha => Self::Other,
			}
		}
	}

	#[derive(Debug)]
	pub enum Decoded {
		/// The file already carries a palette; its pixels were not decoded.
		Indexed,
		Bitmap(Image),
	}

	/// A decoded bitmap. `data` holds 8-bit samples laid out as `layout`, which is never
	/// [`ColorType::Indexed`]: palettes are expanded on decode.
	#[derive(Clone, Debug)]
	pub struct Image {
		pub width: u32,
		pub height: u32,
		pub mode: ColorMode,
		pub layout: ColorType,
		pub data: Vec<u8>,
	}

	impl Image {
		pub fn open(path: &Path) -> Result<Decoded> {
			let file = File::open(path).map_err(|err| Error::opening(path, err))?;
			let decodeError = |source: png::DecodingError| Error::Decode { path: path.to_path_buf(), source };
			let mut decoder = png::Decoder::new(BufReader::new(file));
			decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
			let png = &mut decoder.read_info().map_err(decodeError)?;
			let mode = ColorMode::fromColorType(png.info().color_type);
			if mode == ColorMode::Indexed {
				log::debug!("{}: already indexed", path.display());
				return Ok(Decoded::Indexed);
			}
			let mut data = vec![0; png.output_buffer_size()];
			let frame = png.next_frame(&mut data).map_err(decodeError)?;
			data.truncate(frame.buffer_size());
			if frame.color_type == ColorType::Indexed || frame.bit_depth != BitDepth::Eight {
				return Err(Error::Processing(format!(
					"{}: unexpected {:?}/{:?} output after expansion",
					path.display(),
					frame.color_type,
					frame.bit_depth
				)));
			}
			log::debug!("{}: {}x{} {mode:?} ({:?})", path.display(), frame.width, frame.height, frame.color_type);
			Ok(Decoded::Bitmap(Image { width: frame.width, height: frame.height, mode, layout: frame.color_type, data }))
		}

		pub fn pixels(&self) -> impl Iterator<Item = (Rgb, u8)> + '_ {
			let layout = self.layout;
			self.data.chunks_exact(layout.samples()).map(move |pixel| match *pixel {
				[gray] => (Rgb([gray; RGB_SIZE]), u8::MAX),
				[gray, alpha] => (Rgb([gray; RGB_SIZE]), alpha),
				[red, green, blue] => (Rgb([red, green, blue]), u8::MAX),
				[red, green, blue, alpha] => (Rgb([red, green, blue]), alpha),
				_ => unreachable!("{layout:?} has at most 4 samples per pixel"),
			})
		}

		/// Plain 8-bit RGB, dropping any alpha channel.
		#[must_use]
		pub fn intoTruecolor(self) -> Image {
			if self.layout == ColorType::Rgb {
				return Image { mode: ColorMode::Truecolor, ..self };
			}
			let data = self.pixels().flat_map(|(Rgb(rgb), _)| rgb).collect();
			Image { width: self.width, height: self.height, mode: ColorMode::Truecolor, layout: ColorType::Rgb, data }
		}

		/// Blends every pixel over an opaque `background` using its alpha as the mask.
		/// The result is fully opaque RGB.
		#[must_use]
		pub fn compositeOnto(self, background: Rgb) -> Image {
			let background = Vec3::from_array(background.0.map(f32::from));
			let data = self
				.pixels()
				.flat_map(|(Rgb(rgb), alpha)| {
					background
						.lerp(Vec3::from_array(rgb.map(f32::from)), f32::from(alpha) / f32::from(u8::MAX))
						.round()
						.to_array()
						.map(|colorComponent| colorComponent as u8)
				})
				.collect();
			Image { width: self.width, height: self.height, mode: ColorMode::Truecolor, layout: ColorType::Rgb, data }
		}
	}

	pub fn writePNG(
		path: &Path,
		width: u32,
		height: u32,
		color: ColorType,
		palette: Option<Vec<u8>>,
		data: &[u8],
	) -> Result<()> {
		let writeError = |err: png::EncodingError| Error::writing(path, err);
		let file = &mut BufWriter::new(File::create(path).map_err(|err| Error::writing(path, err))?);
		{
			let mut png = png::Encoder::new(&mut *file, width, height);
			png.set_color(color);
			png.set_depth(BitDepth::Eight);
			if let Some(palette) = palette {
				png.set_palette(palette);
			}
			png.write_header().map_err(writeError)?.write_image_data(data).map_err(writeError)?;
		}
		file.flush().map_err(|err| Error::writing(path, err))
	}

}

pub mod quantize {
	use {
		crate::{color::Rgb, image::Image, DotExt, Error, Result, PALETTE_MAX_COLORS, RGB_SIZE},
		array_macro::array,
		core::str::FromStr,
		glam::IVec3,
		png::ColorType,
		std::path::Path,
		thiserror::Error,
	};

	#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
	pub enum Dither {
		#[default]
		None,
		FloydSteinberg,
		Ordered,
	}

	#[derive(Error, Debug, PartialEq, Eq)]
	#[error("unknown dithering mode {0:?}, expected NONE, FLOYDSTEINBERG or ORDERED")]
	pub struct ParseDitherError(String);

	impl FromStr for Dither {
		type Err = ParseDitherError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s {
				"NONE" => Ok(Self::None),
				"FLOYDSTEINBERG" => Ok(Self::FloydSteinberg),
				"ORDERED" => Ok(Self::Ordered),
				_ => Err(ParseDitherError(s.to_owned())),
			}
		}
	}

	#[derive(Clone, PartialEq, Eq, Debug)]
	pub struct Palette(pub Vec<Rgb>);

	impl Palette {
		pub fn len(&self) -> usize {
			self.0.len()
		}

		pub fn is_empty(&self) -> bool {
			self.0.is_empty()
		}

		/// Flattened `PLTE` chunk payload.
		pub fn toPLTE(&self) -> Vec<u8> {
			self.0.iter().flat_map(|rgb| rgb.0).collect()
		}
	}

	pub struct IndexedImage {
		pub width: u32,
		pub height: u32,
		pub palette: Palette,
		pub indices: Vec<u8>,
	}

	impl IndexedImage {
		/// Number of palette entries actually referenced by a pixel.
		pub fn usedColorsCount(&self) -> usize {
			let mut used = [false; PALETTE_MAX_COLORS as usize];
			for &index in &self.indices {
				used[index as usize] = true;
			}
			used.iter().filter(|&&used| used).count()
		}

		pub fn write(&self, path: &Path) -> Result<()> {
			crate::image::writePNG(
				path,
				self.width,
				self.height,
				ColorType::Indexed,
				Some(self.palette.toPLTE()),
				&self.indices,
			)
		}
	}

	fn quantizeError(err: imagequant::Error) -> Error {
		Error::Processing(format!("quantization failed: {err}"))
	}

	/// Reduces an opaque image to at most `colors` palette entries. Alpha is ignored.
	pub fn quantize(image: &Image, colors: u16, dither: Dither) -> Result<IndexedImage> {
		let (width, height) = (image.width, image.height);
		let pixels: Vec<Rgb> = image.pixels().map(|(rgb, _)| rgb).collect();
		let (palette, indices) = if colors <= 1 {
			// imagequant refuses palettes smaller than 2
			(Palette(vec![meanColor(&pixels)]), vec![0; pixels.len()])
		} else {
			let liq = &mut imagequant::new();
			liq.set_max_colors(colors.min(PALETTE_MAX_COLORS).into()).map_err(quantizeError)?;
			let bitmap: Vec<_> =
				pixels.iter().map(|&Rgb([r, g, b])| imagequant::RGBA { r, g, b, a: u8::MAX }).collect();
			let liqImage = &mut liq.new_image(&bitmap[..], width as _, height as _, 0.0).map_err(quantizeError)?;
			let result = &mut liq.quantize(liqImage).map_err(quantizeError)?;
			let toPalette =
				|entries: &[imagequant::RGBA]| Palette(entries.iter().map(|entry| Rgb([entry.r, entry.g, entry.b])).collect());
			if dither == Dither::Ordered {
				let palette = toPalette(result.palette());
				let indices = orderedDither(&pixels, width as _, &palette);
				(palette, indices)
			} else {
				result
					.set_dithering_level(if dither == Dither::FloydSteinberg { 1.0 } else { 0.0 })
					.map_err(quantizeError)?;
				let (palette, indices) = result.remapped(liqImage).map_err(quantizeError)?;
				(toPalette(&palette[..]), indices)
			}
		};
		log::debug!(
			"{dither:?}: {} palette entries (requested {colors}): {}",
			palette.len(),
			palette.0.iter().map(Rgb::to_string).collect::<Vec<_>>().join(" ")
		);
		Ok(IndexedImage { width, height, palette, indices })
	}

	fn meanColor(pixels: &[Rgb]) -> Rgb {
		let mut sums = [0_u64; RGB_SIZE];
		for Rgb(rgb) in pixels {
			for (sum, &colorComponent) in sums.iter_mut().zip(rgb) {
				*sum += u64::from(colorComponent);
			}
		}
		let count = (pixels.len() as u64).max(1);
		Rgb(sums.map(|sum| (sum / count) as u8))
	}

	const BAYER_SIZE: usize = 8;
	const BAYER_AREA: usize = BAYER_SIZE.pow(2);

	/// Position of `(x, y)` in the recursive Bayer ordering, `0..BAYER_AREA`.
	fn bayerIndex(x: usize, y: usize) -> usize {
		let (xy, mut index) = (x ^ y, 0);
		for bit in 0..BAYER_SIZE.trailing_zeros() {
			index = index << 2 | ((xy >> bit) & 1) << 1 | ((y >> bit) & 1);
		}
		index
	}

	fn orderedDither(pixels: &[Rgb], width: usize, palette: &Palette) -> Vec<u8> {
		let thresholds = array![i => {
			(bayerIndex(i % BAYER_SIZE, i / BAYER_SIZE) as f32 + 0.5) / BAYER_AREA as f32 - 0.5
		}; BAYER_AREA];
		// roughly one palette step per channel
		let spread = f32::from(u8::MAX) / (palette.len() as f32).cbrt();
		let candidates: Vec<IVec3> = palette.0.iter().map(|&rgb| rgb.toIVec3()).collect();
		pixels
			.iter()
			.enumerate()
			.map(|(i, Rgb(rgb))| {
				let (x, y) = (i % width, i / width);
				let offset = thresholds[(y % BAYER_SIZE) * BAYER_SIZE + x % BAYER_SIZE] * spread;
				let target = IVec3::from_array(
					rgb.map(|colorComponent| (f32::from(colorComponent) + offset).round().clamp(0.0, 255.0) as i32),
				);
				nearestIndex(&candidates, target)
			})
			.collect()
	}

	fn nearestIndex(candidates: &[IVec3], target: IVec3) -> u8 {
		let (mut nearestSquaredDist, mut nearestI) = (i32::MAX, 0);
		for (i, &candidate) in candidates.iter().enumerate() {
			let squaredDist = (target - candidate).lengthSquared();
			if squaredDist < nearestSquaredDist {
				(nearestSquaredDist, nearestI) = (squaredDist, i);
			}
		}
		nearestI as _
	}

	#[cfg(test)]
	mod tests {
		use {super::*, pretty_assertions::assert_eq};

		fn rgbImage(width: u32, height: u32, pixels: &[Rgb]) -> Image {
			Image {
				width,
				height,
				mode: crate::image::ColorMode::Truecolor,
				layout: ColorType::Rgb,
				data: pixels.iter().flat_map(|rgb| rgb.0).collect(),
			}
		}

		#[test]
		fn bayerMatrixIsAPermutation() {
			let mut seen = [false; BAYER_AREA];
			for y in 0..BAYER_SIZE {
				for x in 0..BAYER_SIZE {
					seen[bayerIndex(x, y)] = true;
				}
			}
			assert!(seen.iter().all(|&seen| seen));
			assert_eq!([bayerIndex(0, 0), bayerIndex(1, 0), bayerIndex(0, 1), bayerIndex(1, 1)], [0, 32, 48, 16]);
		}

		#[test]
		fn parsesExactDitherNames() {
			assert_eq!("NONE".parse(), Ok(Dither::None));
			assert_eq!("FLOYDSTEINBERG".parse(), Ok(Dither::FloydSteinberg));
			assert_eq!("ORDERED".parse(), Ok(Dither::Ordered));
			for name in ["ATKINSON", "floydsteinberg", "Ordered", "none", ""] {
				assert_eq!(name.parse::<Dither>(), Err(ParseDitherError(name.to_owned())), "{name:?}");
			}
		}

		#[test]
		fn singleColorIsTheMean() {
			let image = rgbImage(2, 1, &[Rgb([0, 0, 0]), Rgb([200, 100, 50])]);
			let indexed = quantize(&image, 1, Dither::None).unwrap();
			assert_eq!(indexed.palette, Palette(vec![Rgb([100, 50, 25])]));
			assert_eq!(indexed.indices, vec![0, 0]);
			assert_eq!(indexed.usedColorsCount(), 1);
		}

		#[test]
		fn orderedDitherPicksExactMatches() {
			let palette = Palette(vec![Rgb([0, 0, 0]), Rgb([255, 255, 255])]);
			let pixels = [Rgb([0, 0, 0]), Rgb([255, 255, 255]), Rgb([255, 255, 255]), Rgb([0, 0, 0])];
			assert_eq!(orderedDither(&pixels, 2, &palette), vec![0, 1, 1, 0]);
		}

		#[test]
		fn orderedDitherMixesMidtones() {
			let palette = Palette(vec![Rgb([0, 0, 0]), Rgb([255, 255, 255])]);
			let pixels = vec![Rgb([128, 128, 128]); BAYER_AREA];
			let indices = orderedDither(&pixels, BAYER_SIZE, &palette);
			let whites = indices.iter().filter(|&&index| index == 1).count();
			assert!((16..=48).contains(&whites), "{whites} of {BAYER_AREA} pixels went white");
		}

		#[test]
		fn countsOnlyReferencedEntries() {
			let indexed = IndexedImage {
				width: 3,
				height: 1,
				palette: Palette(vec![Rgb::WHITE; 4]),
				indices: vec![3, 0, 3],
			};
			assert_eq!(indexed.usedColorsCount(), 2);
		}
	}
}

pub mod convert {
	use {
		crate::{
			color::Rgb,
			image::{ColorMode, Decoded, Image},
			quantize::{quantize, Dither},
			Error, Result, PALETTE_MAX_COLORS,
		},
		clap::{value_parser, Parser},
		std::{
			fs,
			path::{Path, PathBuf},
		},
	};

	/// Convert a true-color PNG into an indexed-color PNG.
	#[derive(Parser, Debug)]
	#[clap(name = "png_into_indexedPNG", version, after_help = concat!(
		"EXAMPLES:\n",
		"    png_into_indexedPNG input.png output.png\n",
		"    png_into_indexedPNG input.png output.png --colors 16\n",
		"    png_into_indexedPNG input.png output.png --colors 4 --dither FLOYDSTEINBERG",
	))]
	pub struct Args {
		/// Input PNG file
		pub input: PathBuf,

		/// Output PNG file
		pub output: PathBuf,

		/// Palette size (Game Boy assets usually want 4)
		#[clap(
			long,
			default_value_t = PALETTE_MAX_COLORS,
			value_parser = value_parser!(u16).range(1..=i64::from(PALETTE_MAX_COLORS)),
		)]
		pub colors: u16,

		/// Dithering method
		#[clap(long, default_value = "NONE", value_name = "NONE|FLOYDSTEINBERG|ORDERED")]
		pub dither: Dither,
	}

	impl Args {
		pub fn config(&self) -> ConvertConfig {
			ConvertConfig { colors: self.colors, dither: self.dither }
		}
	}

	#[derive(Clone, Copy, PartialEq, Eq, Debug)]
	pub struct ConvertConfig {
		/// Upper bound on palette entries, `1..=256`.
		pub colors: u16,
		pub dither: Dither,
	}

	impl Default for ConvertConfig {
		fn default() -> Self {
			Self { colors: PALETTE_MAX_COLORS, dither: Dither::None }
		}
	}

	#[derive(Clone, Copy, PartialEq, Eq, Debug)]
	pub enum ConvertReport {
		/// The input already had a palette and was copied unchanged.
		AlreadyIndexed,
		Quantized { usedColors: usize },
	}

	pub fn convertToIndexed(input: &Path, output: &Path, config: &ConvertConfig) -> Result<ConvertReport> {
		let image = match Image::open(input)? {
			Decoded::Indexed => {
				copyUnchanged(input, output)?;
				return Ok(ConvertReport::AlreadyIndexed);
			}
			Decoded::Bitmap(image) => image,
		};
		let image = match image.mode {
			ColorMode::TruecolorAlpha => image.compositeOnto(Rgb::WHITE),
			ColorMode::Truecolor | ColorMode::Indexed => image.intoTruecolor(),
			ColorMode::Other => {
				log::debug!("normalizing {:?} to RGB", image.layout);
				image.intoTruecolor()
			}
		};
		let indexed = quantize(&image, config.colors, config.dither)?;
		indexed.write(output)?;
		Ok(ConvertReport::Quantized { usedColors: indexed.usedColorsCount() })
	}

	fn copyUnchanged(input: &Path, output: &Path) -> Result<()> {
		// copying a file onto itself would truncate it
		if let (Ok(input), Ok(output)) = (fs::canonicalize(input), fs::canonicalize(output)) {
			if input == output {
				return Ok(());
			}
		}
		fs::copy(input, output).map_err(|err| Error::writing(output, err))?;
		Ok(())
	}

}

pub mod palette_strip {
	use {
		crate::{color::Rgb, image::writePNG, Error, Result},
		clap::Parser,
		png::ColorType,
		serde::Deserialize,
		std::{
			ffi::OsString,
			fs::File,
			io::BufReader,
			path::{Path, PathBuf},
		},
	};

	/// Build a 1-pixel-tall palette image from a JSON list of hex colors.
	#[derive(Parser, Debug)]
	#[clap(name = "paletteJSON_into_paletteStripPNG", version)]
	pub struct Args {
		/// JSON file holding an array such as ["#FF0000", "#00FF00"]
		#[clap(value_name = "JSON_FILE")]
		pub jsonFile: PathBuf,

		/// Output PNG file [default: JSON_FILE with .json replaced by .png]
		#[clap(value_name = "OUTPUT_FILE")]
		pub outputFile: Option<PathBuf>,
	}

	#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
	#[serde(transparent)]
	pub struct ColorList(pub Vec<String>);

	impl ColorList {
		pub fn read(path: &Path) -> Result<Self> {
			let file = File::open(path).map_err(|err| Error::opening(path, err))?;
			serde_json::from_reader(BufReader::new(file)).map_err(|err| {
				if err.is_io() {
					Error::Processing(format!("{}: {err}", path.display()))
				} else {
					Error::MalformedInput {
						path: path.to_path_buf(),
						reason: format!("expected a JSON array of hex color strings: {err}"),
					}
				}
			})
		}

		/// `path` is only used for error messages.
		pub fn parse(&self, path: &Path) -> Result<Vec<Rgb>> {
			self.0
				.iter()
				.enumerate()
				.map(|(i, entry)| {
					entry.parse::<Rgb>().map_err(|err| Error::MalformedInput {
						path: path.to_path_buf(),
						reason: format!("entry {i} ({entry:?}): {err}"),
					})
				})
				.collect()
		}
	}

	/// `count`×1 image, column `i` holding `colors[i]`.
	#[derive(Debug, Clone, PartialEq, Eq)]
	pub struct PaletteStripImage {
		pub colors: Vec<Rgb>,
	}

	impl PaletteStripImage {
		pub const HEIGHT: u32 = 1;

		pub fn width(&self) -> Result<u32> {
			u32::try_from(self.colors.len())
				.map_err(|_| Error::Processing(format!("{} colors do not fit in one image row", self.colors.len())))
		}

		pub fn data(&self) -> Vec<u8> {
			self.colors.iter().flat_map(|rgb| rgb.0).collect()
		}

		pub fn write(&self, path: &Path) -> Result<()> {
			writePNG(path, self.width()?, Self::HEIGHT, ColorType::Rgb, None, &self.data())
		}
	}

	/// `foo.json` → `foo.png`; anything else gets `.png` appended to its file name.
	pub fn defaultOutputPath(jsonPath: &Path) -> PathBuf {
		match jsonPath.extension() {
			Some(extension) if extension.eq_ignore_ascii_case("json") => jsonPath.with_extension("png"),
			_ => {
				let mut path = OsString::from(jsonPath.as_os_str());
				path.push(".png");
				path.into()
			}
		}
	}

	#[derive(Debug, Clone, PartialEq, Eq)]
	pub struct PaletteStripReport {
		pub outputPath: PathBuf,
		pub width: u32,
		pub colorCount: usize,
	}

	/// Returns `None` without writing anything when the list is empty.
	pub fn createPaletteImage(jsonPath: &Path, outputPath: Option<&Path>) -> Result<Option<PaletteStripReport>> {
		let colorList = ColorList::read(jsonPath)?;
		if colorList.0.is_empty() {
			log::warn!("{}: no colors, nothing written", jsonPath.display());
			return Ok(None);
		}
		let outputPath = outputPath.map_or_else(|| defaultOutputPath(jsonPath), Path::to_path_buf);
		let image = PaletteStripImage { colors: colorList.parse(jsonPath)? };
		image.write(&outputPath)?;
		Ok(Some(PaletteStripReport { width: image.width()?, colorCount: image.colors.len(), outputPath }))
	}

}

pub trait DotExt: Copy {
	fn lengthSquared(self) -> i32;
}
impl DotExt for IVec3 {
	#[inline(always)]
	fn lengthSquared(self) -> i32 {
		self.dot(self)
	}
}

/// `warn` and above by default; `RUST_LOG` overrides.
pub fn initLogging() {
	pretty_env_logger::formatted_builder().filter_level(log::LevelFilter::Warn).parse_env("RUST_LOG").init();
}

/// Usage errors exit with [`error::FAILURE_EXIT_CODE`], `--help`/`--version` with success.
pub fn parseArgs<P: Parser>() -> core::result::Result<P, ExitCode> {
	P::try_parse().map_err(|err| {
		_ = err.print();
		if err.use_stderr() {
			ExitCode::from(error::FAILURE_EXIT_CODE)
		} else {
			ExitCode::SUCCESS
		}
	})
}

pub fn exitWith(result: Result<()>) -> ExitCode {
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			log::debug!("{err:?}");
			eprintln!("error: {err}");
			ExitCode::from(error::FAILURE_EXIT_CODE)
		}
	}
}
