//! Writes a folder of test sprites for trying the CLI.
//!
//! cargo run -p sprite-grid-cli --example gen_assets -- out/sprites 24
//! cargo run -p sprite-grid-cli -- pack out/sprites -o out --padding 2

use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

// each row is 3 bits (MSB left)
const FONT_3X5: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

fn random_color_opaque(rng: &mut impl Rng) -> [u8; 4] {
    [
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        255,
    ]
}

fn draw_ellipse(img: &mut RgbaImage, c: [u8; 4]) {
    let (w, h) = img.dimensions();
    let (rx, ry) = (w as f32 / 2.0, h as f32 / 2.0);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, Rgba(c));
            }
        }
    }
}

/// Stamps the sprite index in the top-left corner so cells are easy to tell apart.
fn draw_number(img: &mut RgbaImage, n: usize, color: [u8; 4]) {
    let mut cx = 1u32;
    for ch in n.to_string().chars() {
        let Some(d) = ch.to_digit(10) else { continue };
        for (row_i, row) in FONT_3X5[d as usize].iter().enumerate() {
            for col in 0..3u32 {
                if (row >> (2 - col)) & 1 == 1 {
                    let (px, py) = (cx + col, 1 + row_i as u32);
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, Rgba(color));
                    }
                }
            }
        }
        cx += 4;
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let out: PathBuf = args.next().unwrap_or_else(|| "sprites".into()).into();
    let count: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(16);
    fs::create_dir_all(&out)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for i in 0..count {
        let w = rng.gen_range(8..=48);
        let h = rng.gen_range(8..=48);
        let mut img = RgbaImage::new(w, h);
        draw_ellipse(&mut img, random_color_opaque(&mut rng));
        draw_number(&mut img, i, [0, 0, 0, 255]);
        let path = out.join(format!("sprite_{i:03}.png"));
        img.save(&path)?;
    }
    println!("wrote {} sprites to {}", count, out.display());
    Ok(())
}
