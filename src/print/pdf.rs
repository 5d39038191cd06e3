//! Renders sheet pairs to a PDF file. US Letter, zero margins: the
//! grid divides the whole page so cut lines land on card boundaries.

use std::{
    fs::File,
    io::BufWriter,
    path::Path,
};

use printpdf::{
    BuiltinFont,
    Color,
    IndirectFontRef,
    Line,
    Mm,
    PdfDocument,
    PdfLayerReference,
    Point,
    Rgb,
};

use super::layout::{
    SheetGrid,
    SheetPair,
};
use crate::{
    core::{
        KarteiError,
        Orientation,
    },
    settings::SettingsData,
};

const LETTER_SHORT_MM: f32 = 215.9;
const LETTER_LONG_MM: f32 = 279.4;

const MM_PER_PT: f32 = 25.4 / 72.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

const SLOT_PADDING_MM: f32 = 4.0;
const HEADING_PT: f32 = 12.0;
const LINE_SPACING: f32 = 1.15;
const MIN_FONT_PT: f32 = 6.0;

pub const MIN_FONT_SIZE: u32 = 6;
pub const MAX_FONT_SIZE: u32 = 120;

/// Rendering style shared by every slot of a print run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    pub font_size: f32,
    pub pen_rgb: [f32; 3],
    pub pen_width: f32,
}

impl PageStyle {
    /// Validates the print-relevant settings up front, so a bad
    /// configuration never produces a partially written file.
    pub fn from_settings(settings: &SettingsData) -> Result<Self, KarteiError> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&settings.font_size) {
            return Err(KarteiError::InvalidFontSize(settings.font_size));
        }
        let rgb8 = settings.pen_rgb8();
        Ok(PageStyle {
            font_size: settings.font_size as f32,
            pen_rgb: [
                rgb8[0] as f32 / 255.0,
                rgb8[1] as f32 / 255.0,
                rgb8[2] as f32 / 255.0,
            ],
            pen_width: settings.pen_width.clamp(1.0, 10.0),
        })
    }
}

fn page_size(orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Portrait => (LETTER_SHORT_MM, LETTER_LONG_MM),
        Orientation::Landscape => (LETTER_LONG_MM, LETTER_SHORT_MM),
    }
}

/// Writes the sheets as alternating front/back pages. Fronts carry
/// borders on every slot, blank pads included; backs carry text only,
/// the front sheet being the cut reference.
pub fn export_pdf(
    sheets: &[SheetPair],
    orientation: Orientation,
    style: &PageStyle,
    path: &Path,
) -> Result<(), KarteiError> {
    if sheets.is_empty() {
        return Err(KarteiError::Custom("Nothing to print".to_string()));
    }

    let (page_w, page_h) = page_size(orientation);
    let (doc, first_page, first_layer) =
        PdfDocument::new("Flashcards", Mm(page_w), Mm(page_h), "front 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;

    for (index, pair) in sheets.iter().enumerate() {
        let front_layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) =
                doc.add_page(Mm(page_w), Mm(page_h), format!("front {}", index + 1));
            doc.get_page(page).get_layer(layer)
        };
        render_front(&front_layer, &pair.front, page_w, page_h, style, &font);

        let (page, layer) = doc.add_page(Mm(page_w), Mm(page_h), format!("back {}", index + 1));
        let back_layer = doc.get_page(page).get_layer(layer);
        render_back(&back_layer, &pair.back, page_w, page_h, style, &font);
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_error)?;
    Ok(())
}

fn pdf_error(err: impl std::fmt::Display) -> KarteiError {
    KarteiError::Pdf(err.to_string())
}

fn render_front(
    layer: &PdfLayerReference,
    grid: &SheetGrid,
    page_w: f32,
    page_h: f32,
    style: &PageStyle,
    font: &IndirectFontRef,
) {
    let card_w = page_w / grid.cols as f32;
    let card_h = page_h / grid.rows as f32;

    layer.set_outline_color(Color::Rgb(Rgb::new(
        style.pen_rgb[0],
        style.pen_rgb[1],
        style.pen_rgb[2],
        None,
    )));
    layer.set_outline_thickness(style.pen_width);

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let left = col as f32 * card_w;
            // Grid rows count down from the top, PDF y counts up.
            let bottom = page_h - (row as f32 + 1.0) * card_h;

            draw_border(layer, left, bottom, card_w, card_h);

            if let Some(slot) = grid.slot(row, col) {
                if !slot.heading.is_empty() {
                    draw_heading(layer, &slot.heading, left, bottom, card_w, card_h, font);
                }
                draw_body(layer, &slot.body, left, bottom, card_w, card_h, style.font_size, font);
            }
        }
    }
}

fn render_back(
    layer: &PdfLayerReference,
    grid: &SheetGrid,
    page_w: f32,
    page_h: f32,
    style: &PageStyle,
    font: &IndirectFontRef,
) {
    let card_w = page_w / grid.cols as f32;
    let card_h = page_h / grid.rows as f32;

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            if let Some(slot) = grid.slot(row, col) {
                let left = col as f32 * card_w;
                let bottom = page_h - (row as f32 + 1.0) * card_h;
                draw_body(layer, &slot.body, left, bottom, card_w, card_h, style.font_size, font);
            }
        }
    }
}

fn draw_border(layer: &PdfLayerReference, left: f32, bottom: f32, width: f32, height: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(left), Mm(bottom)), false),
            (Point::new(Mm(left + width), Mm(bottom)), false),
            (Point::new(Mm(left + width), Mm(bottom + height)), false),
            (Point::new(Mm(left), Mm(bottom + height)), false),
        ],
        is_closed: true,
    };
    layer.add_line(line);
}

fn draw_heading(
    layer: &PdfLayerReference,
    text: &str,
    left: f32,
    bottom: f32,
    card_w: f32,
    card_h: f32,
    font: &IndirectFontRef,
) {
    let width_mm = text_width_pt(text, HEADING_PT) * MM_PER_PT;
    let x = (left + card_w - SLOT_PADDING_MM - width_mm).max(left + SLOT_PADDING_MM);
    let y = bottom + card_h - SLOT_PADDING_MM - HEADING_PT * 0.8 * MM_PER_PT;
    layer.use_text(text.to_string(), HEADING_PT, Mm(x), Mm(y), font);
}

fn draw_body(
    layer: &PdfLayerReference,
    text: &str,
    left: f32,
    bottom: f32,
    card_w: f32,
    card_h: f32,
    font_size: f32,
    font: &IndirectFontRef,
) {
    if text.trim().is_empty() {
        return;
    }

    let max_width_pt = (card_w - 2.0 * SLOT_PADDING_MM) * PT_PER_MM;
    let max_height_pt = (card_h - 2.0 * SLOT_PADDING_MM) * PT_PER_MM;
    let (size, lines) = fit_text(text, font_size, max_width_pt, max_height_pt);

    let line_height_mm = size * LINE_SPACING * MM_PER_PT;
    let block_height_mm = lines.len() as f32 * line_height_mm;
    let center_y = bottom + card_h / 2.0;
    // First baseline sits one cap height below the top of the block.
    let mut baseline_y = center_y + block_height_mm / 2.0 - size * 0.8 * MM_PER_PT;

    for line in &lines {
        let line_width_mm = text_width_pt(line, size) * MM_PER_PT;
        let x = left + (card_w - line_width_mm) / 2.0;
        layer.use_text(line.clone(), size, Mm(x), Mm(baseline_y), font);
        baseline_y -= line_height_mm;
    }
}

/// Wraps at the requested size, then steps the size down until the
/// block fits the slot height (or the floor is hit).
fn fit_text(
    text: &str,
    font_size: f32,
    max_width_pt: f32,
    max_height_pt: f32,
) -> (f32, Vec<String>) {
    let mut size = font_size;
    loop {
        let lines = wrap_text(text, size, max_width_pt);
        let block_height = lines.len() as f32 * size * LINE_SPACING;
        if block_height <= max_height_pt || size <= MIN_FONT_PT {
            return (size, lines);
        }
        size = (size * 0.9).max(MIN_FONT_PT);
    }
}

/// Greedy wrap on whitespace; words wider than the slot break mid-word.
fn wrap_text(text: &str, font_size: f32, max_width_pt: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            for piece in break_word(word, font_size, max_width_pt) {
                let candidate = if current.is_empty() {
                    piece.clone()
                } else {
                    format!("{} {}", current, piece)
                };
                if text_width_pt(&candidate, font_size) <= max_width_pt || current.is_empty() {
                    current = candidate;
                } else {
                    lines.push(current);
                    current = piece;
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn break_word(word: &str, font_size: f32, max_width_pt: f32) -> Vec<String> {
    if text_width_pt(word, font_size) <= max_width_pt {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && text_width_pt(&candidate, font_size) > max_width_pt {
            pieces.push(current);
            current = c.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn text_width_pt(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_em).sum::<f32>() * font_size
}

/// Rough Helvetica advance widths in em units. Close enough for
/// centering and wrapping; exact metrics are not worth a font stack.
fn char_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '.' | ',' | ':' | ';' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | ' ' => 0.4,
        'm' | 'w' | 'M' | 'W' | '@' => 0.89,
        c if (c as u32) >= 0x2E80 => 1.0,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.66,
        _ => 0.52,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::layout::{
        paginate,
        PrintCard,
    };

    fn style() -> PageStyle {
        PageStyle { font_size: 40.0, pen_rgb: [0.0, 0.0, 0.0], pen_width: 2.0 }
    }

    #[test]
    fn test_page_style_validation() {
        let mut settings = SettingsData::default();
        settings.font_size = 5;
        assert!(matches!(
            PageStyle::from_settings(&settings),
            Err(KarteiError::InvalidFontSize(5))
        ));

        settings.font_size = 121;
        assert!(PageStyle::from_settings(&settings).is_err());

        settings.font_size = 60;
        settings.pen_color = "#ff0000".to_string();
        settings.pen_width = 0.2;
        let style = PageStyle::from_settings(&settings).unwrap();
        assert_eq!(style.font_size, 60.0);
        assert_eq!(style.pen_rgb, [1.0, 0.0, 0.0]);
        assert_eq!(style.pen_width, 1.0);

        settings.pen_width = 42.0;
        assert_eq!(PageStyle::from_settings(&settings).unwrap().pen_width, 10.0);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let size = 20.0;
        let max = text_width_pt("hello", size) + 1.0;
        let lines = wrap_text("hello hello hello", size, max);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(text_width_pt(line, size) <= max);
        }
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let size = 20.0;
        let max = text_width_pt("abcd", size);
        let lines = wrap_text("abcdabcdabcd", size, max);
        assert!(lines.len() >= 3);
        for line in &lines {
            assert!(text_width_pt(line, size) <= max + f32::EPSILON);
        }
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 20.0, 100.0).is_empty());
        assert!(wrap_text("   ", 20.0, 100.0).is_empty());
    }

    #[test]
    fn test_fit_text_shrinks_to_slot() {
        let (size, lines) = fit_text("many words that will never fit at full size", 120.0, 80.0, 60.0);
        assert!(size < 120.0);
        assert!(size >= MIN_FONT_PT);
        assert!(!lines.is_empty());

        let (size, _) = fit_text("hi", 40.0, 500.0, 500.0);
        assert_eq!(size, 40.0);
    }

    #[test]
    fn test_export_writes_pdf_file() {
        let cards = vec![
            PrintCard {
                lesson: "Unit 1".to_string(),
                front: "Hello".to_string(),
                back: "Hola".to_string(),
                copies: 2,
            },
            PrintCard {
                lesson: "Unit 1".to_string(),
                front: "Bye".to_string(),
                back: "Adiós".to_string(),
                copies: 1,
            },
        ];
        let sheets = paginate(&cards, 2, Orientation::Portrait).unwrap();
        assert_eq!(sheets.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.pdf");
        export_pdf(&sheets, Orientation::Portrait, &style(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_export_rejects_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        assert!(export_pdf(&[], Orientation::Portrait, &style(), &path).is_err());
        assert!(!path.exists());
    }
}
