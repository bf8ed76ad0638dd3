//! Word cloud of matched keywords, rendered to PNG and base64-encoded for an
//! inline `data:` URI.
//!
//! Layout is greedy, largest word first: each word starts at the canvas centre
//! and walks an Archimedean spiral until its box overlaps nothing already
//! placed. A word starts at the largest scale its length allows and, if it finds
//! no room, is retried at smaller scales; a scale reduced by crowding becomes the
//! ceiling for everything after it. Words wider than the canvas at the minimum
//! scale are truncated. Glyphs are the 8×8 bitmaps from `font8x8`, scaled up by
//! an integer factor.
//!
//! Output is deterministic for a given word list.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use rustc_hash::FxHashMap;
use thiserror::Error;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

const GLYPH: u32 = 8;
const MAX_SCALE: u32 = 8;
const MIN_SCALE: u32 = 2;
/// Gap kept around every word box, in pixels.
const MARGIN: i64 = 4;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 1.5;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

#[derive(Debug, Error)]
pub enum WordCloudError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Renders `words` (frequency = occurrences in the slice) as a base64 PNG.
/// Returns `Ok(None)` for an empty slice.
pub fn render_wordcloud(words: &[String]) -> Result<Option<String>, WordCloudError> {
    if words.is_empty() {
        return Ok(None);
    }

    let png = render_png(words)?;
    Ok(Some(STANDARD.encode(png)))
}

fn render_png(words: &[String]) -> Result<Vec<u8>, WordCloudError> {
    let mut canvas = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    for (i, placement) in layout(&word_frequencies(words)).iter().enumerate() {
        draw_word(&mut canvas, placement, PALETTE[i % PALETTE.len()]);
    }

    let mut png = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct Placement {
    word: String,
    x: i64,
    y: i64,
    scale: u32,
}

impl Placement {
    fn width(&self) -> i64 {
        box_width(&self.word, self.scale)
    }

    fn height(&self) -> i64 {
        (GLYPH * self.scale) as i64
    }
}

/// Distinct words with their counts, most frequent first, ties in first-seen order.
fn word_frequencies(words: &[String]) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for word in words {
        let count = counts.entry(word.as_str()).or_insert(0);
        if *count == 0 {
            order.push(word.as_str());
        }
        *count += 1;
    }

    let mut frequencies: Vec<(String, usize)> = order
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();
    // stable sort keeps first-seen order among equal counts
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));
    frequencies
}

fn layout(frequencies: &[(String, usize)]) -> Vec<Placement> {
    let Some(max_count) = frequencies.iter().map(|(_, c)| *c).max() else {
        return Vec::new();
    };

    let mut placed: Vec<Placement> = Vec::new();
    let mut ceiling = MAX_SCALE;

    for (word, count) in frequencies {
        let word = fit_to_canvas(word);
        let wanted = MIN_SCALE + (MAX_SCALE - MIN_SCALE) * (*count as u32) / (max_count as u32);
        let start = wanted.min(ceiling).min(largest_fitting_scale(&word));
        let mut scale = start;

        loop {
            if let Some(placement) = find_position(&word, scale, &placed) {
                // crowding shrank this word; nothing after it may be larger
                if scale < start {
                    ceiling = scale;
                }
                placed.push(placement);
                break;
            }
            if scale == MIN_SCALE {
                break;
            }
            scale -= 1;
        }
    }

    placed
}

/// Truncates `word` to the characters that fit across the canvas at `MIN_SCALE`.
fn fit_to_canvas(word: &str) -> String {
    let max_chars = (WIDTH / (GLYPH * MIN_SCALE)) as usize;
    word.chars().take(max_chars).collect()
}

/// Largest scale, within `MIN_SCALE..=MAX_SCALE`, at which `word` fits the canvas.
fn largest_fitting_scale(word: &str) -> u32 {
    let chars = word.chars().count().max(1) as u32;
    (WIDTH / (chars * GLYPH))
        .min(HEIGHT / GLYPH)
        .clamp(MIN_SCALE, MAX_SCALE)
}

fn find_position(word: &str, scale: u32, placed: &[Placement]) -> Option<Placement> {
    let width = box_width(word, scale);
    let height = (GLYPH * scale) as i64;
    if width > WIDTH as i64 || height > HEIGHT as i64 {
        return None;
    }

    let origin_x = (WIDTH as f64 - width as f64) / 2.0;
    let origin_y = (HEIGHT as f64 - height as f64) / 2.0;
    // canvas is twice as wide as tall; stretch the spiral to match
    let aspect = WIDTH as f64 / HEIGHT as f64;
    let max_radius = (WIDTH.max(HEIGHT)) as f64;

    let mut theta = 0.0_f64;
    loop {
        let radius = SPIRAL_GROWTH * theta;
        if radius > max_radius {
            return None;
        }

        let x = (origin_x + radius * theta.cos() * aspect).round() as i64;
        let y = (origin_y + radius * theta.sin()).round() as i64;
        let candidate = Placement {
            word: word.to_string(),
            x,
            y,
            scale,
        };

        if in_bounds(&candidate) && placed.iter().all(|other| !overlaps(&candidate, other)) {
            return Some(candidate);
        }
        theta += SPIRAL_STEP;
    }
}

fn box_width(word: &str, scale: u32) -> i64 {
    (word.chars().count() as u32 * GLYPH * scale) as i64
}

fn in_bounds(p: &Placement) -> bool {
    p.x >= 0 && p.y >= 0 && p.x + p.width() <= WIDTH as i64 && p.y + p.height() <= HEIGHT as i64
}

fn overlaps(a: &Placement, b: &Placement) -> bool {
    a.x < b.x + b.width() + MARGIN
        && b.x < a.x + a.width() + MARGIN
        && a.y < b.y + b.height() + MARGIN
        && b.y < a.y + a.height() + MARGIN
}

// ────────────────────────────────────────────────────────────────────────────
// Rasterization
// ────────────────────────────────────────────────────────────────────────────

fn draw_word(canvas: &mut RgbImage, placement: &Placement, color: Rgb<u8>) {
    let scale = placement.scale as i64;
    let cell = (GLYPH as i64) * scale;

    for (index, ch) in placement.word.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch)) else {
            continue;
        };
        let left = placement.x + index as i64 * cell;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH as i64 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                fill_block(
                    canvas,
                    left + col * scale,
                    placement.y + row as i64 * scale,
                    scale,
                    color,
                );
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, x: i64, y: i64, size: i64, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
