use crate::encoding::to_win_ansi;
use crate::error::RenderError;
use crate::utils::flip_y;
use itertools::Itertools;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Cursor;
use texprinter_layout::{
    BoxContent, FillKind, FontCatalog, FontFace, LaidOutDocument, LayoutBox, PageDescriptor,
};
use texprinter_style::{Border, BorderStyle};
use texprinter_types::Color;

/// Serializes a laid-out document into a PDF byte stream.
///
/// Output is fully deterministic: no timestamps, no random identifiers, and
/// font objects are allocated in first-use order, so identical input yields
/// byte-identical output.
pub fn render_pdf(layout: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
    let mut serializer = PdfSerializer::new(layout)?;
    for page in &layout.pages {
        serializer.write_page(page)?;
    }
    serializer.finish()
}

/// Incremental PDF assembly on top of `lopdf`.
///
/// Fonts are registered once up front (deduplicated across the whole
/// document); pages reference them through a shared resources dictionary.
pub struct PdfSerializer {
    document: Document,
    /// Registered faces with their resource names, in first-use order.
    font_names: Vec<(FontFace, String)>,
    resources_id: ObjectId,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfSerializer {
    pub fn new(layout: &LaidOutDocument) -> Result<Self, RenderError> {
        let faces = collect_faces(layout)?;
        log::debug!(
            "registering {} font faces for {} pages",
            faces.len(),
            layout.pages.len()
        );

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut font_dict = Dictionary::new();
        let mut font_names = Vec::with_capacity(faces.len());
        for (index, face) in faces.iter().enumerate() {
            let name = format!("F{}", index + 1);
            let face_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(name.as_bytes(), Object::Reference(face_id));
            font_names.push((*face, name));
        }
        let resources_id = document.add_object(dictionary! {
            "Font" => Object::Dictionary(font_dict),
        });

        Ok(Self {
            document,
            font_names,
            resources_id,
            pages_id,
            page_ids: Vec::new(),
        })
    }

    /// Emits one page object with its content stream. Backgrounds and
    /// borders paint before text runs.
    pub fn write_page(&mut self, page: &PageDescriptor) -> Result<(), RenderError> {
        let size = page.size();
        let mut ctx = PageContext::new(size.height, &self.font_names);
        for layout_box in page.boxes.iter().filter(|b| b.is_fill()) {
            ctx.draw_fill(layout_box);
        }
        for layout_box in page.boxes.iter().filter(|b| b.is_text()) {
            ctx.draw_text(layout_box);
        }
        let content = ctx.finish();
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        self.page_ids.push(self.document.add_object(page_dict));
        Ok(())
    }

    /// Writes the page tree, catalog, cross-reference table and trailer,
    /// returning the finished byte stream.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        let count = kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut buffer = Cursor::new(Vec::new());
        self.document.save_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}

/// Strictly resolves every referenced font, failing on the first family
/// with no embeddable base face. The result keeps first-use order so
/// resource names are stable across runs.
fn collect_faces(layout: &LaidOutDocument) -> Result<Vec<FontFace>, RenderError> {
    let mut faces = Vec::new();
    for page in &layout.pages {
        for layout_box in page.boxes.iter().filter(|b| b.is_text()) {
            let face = FontCatalog::resolve(&layout_box.style.font).ok_or_else(|| {
                RenderError::UnsupportedFont {
                    family: layout_box.style.font.family.to_string(),
                    node: layout_box.node,
                }
            })?;
            faces.push(face);
        }
    }
    Ok(faces.into_iter().unique().collect())
}

// --- Page drawing context ---

/// Builds one page's content stream, eliding redundant color/font state
/// changes between consecutive operations.
struct PageContext<'a> {
    page_height: f32,
    operations: Vec<Operation>,
    font_names: &'a [(FontFace, String)],
    current_font: Option<(FontFace, f32)>,
    current_fill: Option<Color>,
    current_stroke: Option<Color>,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, font_names: &'a [(FontFace, String)]) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
            font_names,
            current_font: None,
            current_fill: None,
            current_stroke: None,
        }
    }

    fn finish(self) -> Content {
        Content {
            operations: self.operations,
        }
    }

    fn draw_fill(&mut self, layout_box: &LayoutBox) {
        let BoxContent::Fill(kind) = &layout_box.content else {
            return;
        };
        match kind {
            FillKind::Background => {
                let Some(color) = layout_box.style.background_color else {
                    return;
                };
                self.set_fill_color(color);
                let y = flip_y(layout_box.y + layout_box.height, self.page_height);
                self.operations.push(Operation::new(
                    "re",
                    vec![
                        layout_box.x.into(),
                        y.into(),
                        layout_box.width.into(),
                        layout_box.height.into(),
                    ],
                ));
                self.operations.push(Operation::new("f", vec![]));
            }
            FillKind::Border => {
                let Some(border) = layout_box.style.border else {
                    return;
                };
                self.set_stroke(&border);
                let y = flip_y(layout_box.y + layout_box.height, self.page_height);
                self.operations.push(Operation::new(
                    "re",
                    vec![
                        layout_box.x.into(),
                        y.into(),
                        layout_box.width.into(),
                        layout_box.height.into(),
                    ],
                ));
                self.operations.push(Operation::new("S", vec![]));
                self.reset_dash(&border);
            }
            FillKind::BorderBottom => {
                let Some(border) = layout_box.style.border_bottom else {
                    return;
                };
                self.set_stroke(&border);
                let y = flip_y(layout_box.y + layout_box.height, self.page_height);
                self.operations
                    .push(Operation::new("m", vec![layout_box.x.into(), y.into()]));
                self.operations.push(Operation::new(
                    "l",
                    vec![(layout_box.x + layout_box.width).into(), y.into()],
                ));
                self.operations.push(Operation::new("S", vec![]));
                self.reset_dash(&border);
            }
        }
    }

    fn draw_text(&mut self, layout_box: &LayoutBox) {
        let BoxContent::Text { text, baseline } = &layout_box.content else {
            return;
        };
        if text.trim().is_empty() {
            return;
        }
        let style = &layout_box.style;
        let face = FontCatalog::resolve_or_default(&style.font);

        self.operations.push(Operation::new("BT", vec![]));
        self.set_font(face, style.font.size);
        self.set_fill_color(style.color);
        let y = flip_y(layout_box.y + baseline, self.page_height);
        self.operations
            .push(Operation::new("Td", vec![layout_box.x.into(), y.into()]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    fn font_name(&self, face: FontFace) -> &str {
        self.font_names
            .iter()
            .find(|(f, _)| *f == face)
            .map(|(_, name)| name.as_str())
            .unwrap_or("F1")
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.current_font != Some((face, size)) {
            let name = self.font_name(face).to_string();
            self.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(name.into_bytes()), size.into()],
            ));
            self.current_font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.current_fill != Some(color) {
            self.operations.push(Operation::new(
                "rg",
                vec![
                    (color.r as f32 / 255.0).into(),
                    (color.g as f32 / 255.0).into(),
                    (color.b as f32 / 255.0).into(),
                ],
            ));
            self.current_fill = Some(color);
        }
    }

    fn set_stroke(&mut self, border: &Border) {
        if self.current_stroke != Some(border.color) {
            self.operations.push(Operation::new(
                "RG",
                vec![
                    (border.color.r as f32 / 255.0).into(),
                    (border.color.g as f32 / 255.0).into(),
                    (border.color.b as f32 / 255.0).into(),
                ],
            ));
            self.current_stroke = Some(border.color);
        }
        self.operations
            .push(Operation::new("w", vec![border.width.into()]));
        match border.style {
            BorderStyle::Dashed => self.operations.push(Operation::new(
                "d",
                vec![
                    vec![Object::Integer(3), Object::Integer(3)].into(),
                    0.into(),
                ],
            )),
            BorderStyle::Dotted => self.operations.push(Operation::new(
                "d",
                vec![
                    vec![Object::Integer(1), Object::Integer(2)].into(),
                    0.into(),
                ],
            )),
            BorderStyle::Solid => {}
        }
    }

    fn reset_dash(&mut self, border: &Border) {
        if border.style != BorderStyle::Solid {
            self.operations
                .push(Operation::new("d", vec![vec![].into(), 0.into()]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texprinter_doc::{Document as Doc, DocumentNode};
    use texprinter_layout::{layout_document, PageConfig};
    use texprinter_style::{resolve, KindMatch, Selector, StyleProps, StyleRule};

    fn laid_out(blocks: Vec<DocumentNode>, rules: &[StyleRule]) -> LaidOutDocument {
        let doc = Doc::new(blocks);
        doc.validate().unwrap();
        let styles = resolve(&doc, rules);
        layout_document(&doc, &styles, &PageConfig::default()).unwrap()
    }

    #[test]
    fn output_is_a_parsable_pdf() {
        let layout = laid_out(vec![DocumentNode::paragraph("hello")], &[]);
        let bytes = render_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn fonts_deduplicate_across_pages() {
        let blocks: Vec<_> = (0..120)
            .map(|i| DocumentNode::paragraph(format!("paragraph number {}", i)))
            .collect();
        let layout = laid_out(blocks, &[]);
        assert!(layout.pages.len() > 1);
        let bytes = render_pdf(&layout).unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        let font_objects = parsed
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .map(|d| d.has(b"BaseFont"))
                    .unwrap_or(false)
            })
            .count();
        // One face across every page: exactly one font object.
        assert_eq!(font_objects, 1);
    }

    #[test]
    fn unknown_family_is_a_fatal_serialization_error() {
        let rules = vec![StyleRule::new(
            Selector::kind(KindMatch::Paragraph),
            StyleProps {
                font_family: Some("Wingdings".to_string()),
                ..Default::default()
            },
        )];
        let layout = laid_out(vec![DocumentNode::paragraph("doomed")], &rules);
        let err = render_pdf(&layout).unwrap_err();
        match err {
            RenderError::UnsupportedFont { family, node } => {
                assert_eq!(family, "Wingdings");
                assert_eq!(node.index(), 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let blocks = vec![
            DocumentNode::heading(1, "Deterministic"),
            DocumentNode::paragraph("same bytes every time"),
        ];
        let first = render_pdf(&laid_out(blocks.clone(), &[])).unwrap();
        let second = render_pdf(&laid_out(blocks, &[])).unwrap();
        assert_eq!(first, second);
    }
}
