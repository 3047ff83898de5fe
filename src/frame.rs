use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use radiometry::color::Color;

/// The output framebuffer: accumulates the traced color of every sample and
/// averages per pixel when encoding. Knows nothing about where its colors
/// come from beyond the fixed sample count per pixel.
pub struct Frame {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    sums: Vec<Color>,
}

impl Frame {
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        assert!(samples_per_pixel > 0);
        Frame {
            width,
            height,
            samples_per_pixel,
            sums: vec![Color::black(); (width * height) as usize],
        }
    }

    pub fn accumulate(&mut self, x: u32, y: u32, color: Color) {
        assert!(x < self.width && y < self.height);
        self.sums[(y * self.width + x) as usize] += color;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.sums[(y * self.width + x) as usize] / self.samples_per_pixel as f64
    }

    /// Encodes the averaged pixels as an 8-bit RGB PNG.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut data = Vec::with_capacity(self.sums.len() * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                data.extend_from_slice(&self.pixel(x, y).to_u8());
            }
        }

        let file = File::create(path)?;
        let w = &mut BufWriter::new(file);
        let mut encoder = png::Encoder::new(w, self.width, self.height);
        encoder.set_color(png::ColorType::RGB);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Frame;
    use radiometry::color::Color;

    #[test]
    fn pixels_average_their_samples() {
        let mut frame = Frame::new(2, 2, 2);
        frame.accumulate(1, 0, Color::white());
        frame.accumulate(1, 0, Color::black());
        assert_eq!(frame.pixel(1, 0), Color::gray(0.5));
        assert_eq!(frame.pixel(0, 0), Color::black());
    }
}
