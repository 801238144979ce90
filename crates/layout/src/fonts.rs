//! Metrics for the standard base-14 font families.
//!
//! The pipeline measures and references only the built-in Type1 base faces
//! (Helvetica, Times, Courier) so that identical input always measures — and
//! therefore paginates and serializes — identically, independent of the
//! fonts installed on the machine. Advance widths are the AFM values in
//! 1/1000 em for the WinAnsi-printable ASCII range; characters outside the
//! table fall back to a per-face default width.

use texprinter_style::FontDesc;

/// A concrete base-14 face the serializer can reference by PostScript name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl FontFace {
    pub fn postscript_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::HelveticaOblique => "Helvetica-Oblique",
            FontFace::HelveticaBoldOblique => "Helvetica-BoldOblique",
            FontFace::TimesRoman => "Times-Roman",
            FontFace::TimesBold => "Times-Bold",
            FontFace::TimesItalic => "Times-Italic",
            FontFace::TimesBoldItalic => "Times-BoldItalic",
            FontFace::Courier => "Courier",
            FontFace::CourierBold => "Courier-Bold",
            FontFace::CourierOblique => "Courier-Oblique",
            FontFace::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Advance widths for chars 0x20..=0x7E in 1/1000 em, or `None` for the
    /// fixed-pitch Courier faces.
    fn widths(&self) -> Option<&'static [u16; 95]> {
        match self {
            // Oblique variants share the upright widths; the bold-italic
            // serif face reuses the bold table.
            FontFace::Helvetica | FontFace::HelveticaOblique => Some(&HELVETICA),
            FontFace::HelveticaBold | FontFace::HelveticaBoldOblique => Some(&HELVETICA_BOLD),
            FontFace::TimesRoman => Some(&TIMES_ROMAN),
            FontFace::TimesBold | FontFace::TimesBoldItalic => Some(&TIMES_BOLD),
            FontFace::TimesItalic => Some(&TIMES_ITALIC),
            FontFace::Courier
            | FontFace::CourierBold
            | FontFace::CourierOblique
            | FontFace::CourierBoldOblique => None,
        }
    }

    /// Advance width of one character in 1/1000 em.
    pub fn char_width_units(&self, c: char) -> u16 {
        let Some(table) = self.widths() else {
            return COURIER_PITCH;
        };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            '\t' => table[0],
            // Outside the table: a mid-weight default keeps measurement
            // stable for the occasional accented or typographic character.
            _ => table['n' as usize - 0x20],
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width_units(c) as u32).sum();
        units as f32 * size / 1000.0
    }

    /// Typographic ascent in 1/1000 em; the baseline of a line box sits
    /// this far (scaled) below the box top.
    pub fn ascent_units(&self) -> u16 {
        match self {
            FontFace::Helvetica
            | FontFace::HelveticaBold
            | FontFace::HelveticaOblique
            | FontFace::HelveticaBoldOblique => 718,
            FontFace::TimesRoman
            | FontFace::TimesBold
            | FontFace::TimesItalic
            | FontFace::TimesBoldItalic => 683,
            FontFace::Courier
            | FontFace::CourierBold
            | FontFace::CourierOblique
            | FontFace::CourierBoldOblique => 629,
        }
    }

    pub fn ascent(&self, size: f32) -> f32 {
        self.ascent_units() as f32 * size / 1000.0
    }
}

/// Maps resolved font descriptors onto base-14 faces.
///
/// The layout stage resolves leniently (unknown families measure with the
/// default serif face so pagination can proceed); the serializer resolves
/// strictly and turns a `None` into a fatal export error.
pub struct FontCatalog;

impl FontCatalog {
    /// Strict resolution: `None` when the family cannot be mapped onto an
    /// embeddable base face.
    pub fn resolve(font: &FontDesc) -> Option<FontFace> {
        let family = font.family.to_lowercase();
        let bold = font.weight.is_bold();
        let slanted = font.style.is_slanted();

        // "sans-serif" contains "serif": test the more specific families
        // first.
        if family.contains("courier") || family.contains("mono") {
            Some(match (bold, slanted) {
                (false, false) => FontFace::Courier,
                (true, false) => FontFace::CourierBold,
                (false, true) => FontFace::CourierOblique,
                (true, true) => FontFace::CourierBoldOblique,
            })
        } else if family.contains("helvetica") || family.contains("arial") || family.contains("sans")
        {
            Some(match (bold, slanted) {
                (false, false) => FontFace::Helvetica,
                (true, false) => FontFace::HelveticaBold,
                (false, true) => FontFace::HelveticaOblique,
                (true, true) => FontFace::HelveticaBoldOblique,
            })
        } else if family.contains("times") || family.contains("serif") {
            Some(match (bold, slanted) {
                (false, false) => FontFace::TimesRoman,
                (true, false) => FontFace::TimesBold,
                (false, true) => FontFace::TimesItalic,
                (true, true) => FontFace::TimesBoldItalic,
            })
        } else {
            None
        }
    }

    /// Lenient resolution for measurement: unmappable families measure as
    /// the serif default in the requested weight/style.
    pub fn resolve_or_default(font: &FontDesc) -> FontFace {
        Self::resolve(font).unwrap_or_else(|| {
            log::debug!(
                "font family '{}' not mappable to a base face, measuring as serif",
                font.family
            );
            match (font.weight.is_bold(), font.style.is_slanted()) {
                (false, false) => FontFace::TimesRoman,
                (true, false) => FontFace::TimesBold,
                (false, true) => FontFace::TimesItalic,
                (true, true) => FontFace::TimesBoldItalic,
            }
        })
    }
}

const COURIER_PITCH: u16 = 600;

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
static TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];
