//! PDF encoding of laid-out pages.
//!
//! PDF uses a bottom-left origin, so every baseline from the layout is
//! flipped with `pdf_y = page_height - baseline`. Text is drawn with the
//! standard Helvetica faces in WinAnsiEncoding, which needs no embedded
//! font data.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use judgetest_core::normalize::winansi_byte;
use judgetest_core::GenerateError;

use crate::layout::{PageLayout, PageSize, TextLine};
use crate::metrics::FontStyle;

const FONT_STYLES: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Oblique];

/// Encode text as WinAnsi bytes, replacing what the fonts cannot show.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            winansi_byte(c).unwrap_or_else(|| {
                tracing::warn!("character {c:?} cannot be printed; using '?'");
                b'?'
            })
        })
        .collect()
}

fn text_operations(line: &TextLine, page_height: f32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![line.style.resource_name().into(), line.font_size.into()],
        ),
        Operation::new(
            "Td",
            vec![line.x.into(), (page_height - line.baseline).into()],
        ),
        Operation::new(
            "Tj",
            vec![Object::string_literal(encode_winansi(&line.text))],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn add_fonts(doc: &mut Document) -> ObjectId {
    let mut fonts = Dictionary::new();
    for style in FONT_STYLES {
        let font_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(style.base_font().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        fonts.set(style.resource_name(), Object::Reference(font_id));
    }

    doc.add_object(Dictionary::from_iter([("Font", Object::Dictionary(fonts))]))
}

/// Build a PDF document from laid-out pages.
pub fn encode_pdf(
    title: &str,
    pages: &[PageLayout],
    page_size: PageSize,
) -> Result<Vec<u8>, GenerateError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = add_fonts(&mut doc);

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let operations: Vec<Operation> = page
            .lines()
            .filter(|line| !line.text.is_empty())
            .flat_map(|line| text_operations(line, page_size.height))
            .collect();

        let content = Content { operations }
            .encode()
            .map_err(|e| GenerateError::Render(format!("page {}: {e}", page.number)))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    0.into(),
                    0.into(),
                    page_size.width.into(),
                    page_size.height.into(),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    #[allow(clippy::cast_possible_wrap)]
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(Dictionary::from_iter([
        ("Title", Object::string_literal(encode_winansi(title))),
        ("Producer", Object::string_literal("judgetest")),
    ]));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| GenerateError::Render(format!("failed to save PDF: {e}")))?;

    Ok(output)
}
