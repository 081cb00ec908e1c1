// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting finished buffers out of memory and onto disk.  The actual
//! encoding is the `image` crate's job; we pick the encoder and pass
//! its errors back untouched.

use image::jpeg::JPEGEncoder;
use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::MandelError;
use crate::render::PixelBuffer;

/// JPEG quality used for stills and animation frames alike.
pub const JPEG_QUALITY: u8 = 90;

/// The file formats we can write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, with an alpha channel.
    Png,
    /// Lossy, no alpha.  What video muxers expect frames to be.
    Jpeg,
    /// Binary PPM.
    Pnm,
}

impl OutputFormat {
    /// Choose a format from a file's extension.
    pub fn from_path(path: &Path) -> Result<Self, MandelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_ref().map(String::as_str) {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            Some("ppm") | Some("pnm") => Ok(OutputFormat::Pnm),
            _ => Err(MandelError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Encode `buffer` as `format` into `writer`.
pub fn encode<W: Write>(
    buffer: &PixelBuffer,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), MandelError> {
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    match format {
        OutputFormat::Png => {
            PNGEncoder::new(writer).encode(
                &buffer.to_rgba_bytes(),
                width,
                height,
                ColorType::RGBA(8),
            )?;
        }
        OutputFormat::Jpeg => {
            let mut encoder = JPEGEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            encoder.encode(&buffer.to_rgb_bytes(), width, height, ColorType::RGB(8))?;
        }
        OutputFormat::Pnm => {
            let mut encoder =
                PNMEncoder::new(writer).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(&buffer.to_rgb_bytes()[..], width, height, ColorType::RGB(8))?;
        }
    }
    Ok(())
}

/// Write `buffer` to `path`, in the format its extension names.
pub fn write_image(path: &Path, buffer: &PixelBuffer) -> Result<(), MandelError> {
    let format = OutputFormat::from_path(path)?;
    let mut output = BufWriter::new(File::create(path)?);
    encode(buffer, format, &mut output)?;
    output.flush()?;
    Ok(())
}

/// Where frame `index` of an animation lives inside `dir`.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{:05}.jpg", index))
}

/// Write one animation frame as a numbered JPEG, returning its path.
pub fn write_frame(dir: &Path, index: usize, buffer: &PixelBuffer) -> Result<PathBuf, MandelError> {
    let path = frame_path(dir, index);
    write_image(&path, buffer)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Grayscale;
    use crate::planes::Viewport;
    use crate::render::{render, RenderConfig};

    fn tiny() -> PixelBuffer {
        render(&Viewport::new(-0.5, 0.0, 1.0, 12, 8), RenderConfig::new(30, 1, &Grayscale)).unwrap()
    }

    #[test]
    fn formats_follow_extensions() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("dir/a.ppm")).unwrap(), OutputFormat::Pnm);
        assert!(OutputFormat::from_path(Path::new("a.gif")).is_err());
        assert!(OutputFormat::from_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn png_has_a_signature() {
        let mut out = vec![];
        encode(&tiny(), OutputFormat::Png, &mut out).unwrap();
        assert_eq!(&out[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn jpeg_starts_with_soi() {
        let mut out = vec![];
        encode(&tiny(), OutputFormat::Jpeg, &mut out).unwrap();
        assert_eq!(&out[..2], &[0xff, 0xd8]);
    }

    #[test]
    fn pnm_is_a_binary_pixmap() {
        let mut out = vec![];
        encode(&tiny(), OutputFormat::Pnm, &mut out).unwrap();
        assert_eq!(&out[..2], b"P6");
        // Header, then three bytes for each of the 96 pixels.
        assert!(out.len() > 12 * 8 * 3);
    }

    #[test]
    fn frames_are_numbered() {
        assert_eq!(frame_path(Path::new("out"), 7), Path::new("out/frame_00007.jpg"));
    }

    #[test]
    fn writing_to_a_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.png");
        match write_image(&path, &tiny()) {
            Err(MandelError::Encode(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
