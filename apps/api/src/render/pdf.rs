//! PDF encoding: replays a `DocumentPlan` onto a `printpdf` document.

use std::io::Cursor;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::chart::SkillGapChart;
use crate::render::font_metrics::PdfFont;
use crate::render::layout::{DocumentPlan, DrawOp, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::render::RenderError;

const LAYER_NAME: &str = "Layer 1";
const POINTS_PER_INCH: f32 = 72.0;

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / POINTS_PER_INCH)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        })
    }

    fn get(&self, font: PdfFont) -> &IndirectFontRef {
        match font {
            PdfFont::Helvetica => &self.regular,
            PdfFont::HelveticaBold => &self.bold,
        }
    }
}

/// Encodes the plan as PDF bytes. `charts[i]` must hold the chart of version `i + 1`.
pub fn render_plan(
    plan: &DocumentPlan,
    charts: &[Option<SkillGapChart>],
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        mm(PAGE_WIDTH_PT),
        mm(PAGE_HEIGHT_PT),
        LAYER_NAME,
    );
    let fonts = Fonts::load(&doc)?;

    for (i, page) in plan.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font,
                    size,
                } => {
                    layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*font));
                }
                DrawOp::Chart {
                    version_index,
                    x,
                    y,
                    width,
                    ..
                } => {
                    let chart = version_index
                        .checked_sub(1)
                        .and_then(|i| charts.get(i))
                        .and_then(Option::as_ref)
                        .ok_or(RenderError::MissingChart(*version_index))?;
                    place_chart(&layer, chart, *x, *y, *width)?;
                }
            }
        }
    }

    Ok(doc.save_to_bytes()?)
}

/// Embeds the chart PNG with its lower-left corner at (`x`, `y`), scaled to `width` points.
fn place_chart(
    layer: &PdfLayerReference,
    chart: &SkillGapChart,
    x: f32,
    y: f32,
    width: f32,
) -> Result<(), RenderError> {
    let decoder = PngDecoder::new(Cursor::new(chart.png.as_slice()))?;
    let image = Image::try_from(decoder)?;

    // printpdf sizes images as px / dpi inches.
    let dpi = chart.width_px as f32 * POINTS_PER_INCH / width;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}
