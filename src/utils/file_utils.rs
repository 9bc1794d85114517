use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::image::ConsoleImage;

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Loads a saved image, either raw bytes or base64 text.
pub fn load_image(path: &Path, base64: bool) -> Result<ConsoleImage> {
    let data = read_file(path)?;
    let image = if base64 {
        let text = String::from_utf8(data).with_context(|| format!("{:?} is not UTF-8 text", path))?;
        ConsoleImage::from_base64(&text)
    } else {
        ConsoleImage::from_bytes(&data)
    };
    image.with_context(|| format!("Failed to decode image: {:?}", path))
}

pub fn save_image(path: &Path, image: &ConsoleImage, base64: bool) -> Result<()> {
    if base64 {
        write_file(path, image.to_base64().as_bytes())
    } else {
        write_file(path, &image.to_bytes())
    }
}
