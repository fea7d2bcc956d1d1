use anyhow::{Context, Result};
use png::{BitDepth, ColorType, Encoder};

pub fn rgb_triples_to_png(triples: &[(u8, u8, u8)], width: usize, height: usize) -> Result<Vec<u8>> {
    let image_bytes = triples.iter().flat_map(|&(r, g, b)| vec![r, g, b]).collect::<Vec<u8>>();

    let mut buf = Vec::new();
    {
        let mut png_encoder = Encoder::new(&mut buf, width as u32, height as u32);
        png_encoder.set_color(ColorType::Rgb);
        png_encoder.set_depth(BitDepth::Eight);
        let mut png_writer = png_encoder.write_header().context("Failed to write PNG header")?;
        png_writer
            .write_image_data(&image_bytes)
            .context("Failed to write PNG data")?;
    }
    Ok(buf)
}
