use ::image::RgbImage;
use log::{debug, info};
use printpdf::*;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{Geometry, NameTagConfig};
use crate::error::AppError;
use crate::label::{render_label, NameFont};
use crate::page::{compose_page, PageLayout};
use crate::roster::{load_roster, AttendeeRecord};

const DOCUMENT_TITLE: &str = "Name Tags";

const MM_PER_INCH: f32 = 25.4;

/// What a successful run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub attendees: usize,
    pub pages: usize,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Reads the roster at `input` and writes the finished name tag PDF to `output`.
///
/// Either the whole document is written or `output` is left untouched.
pub fn generate_name_tags(
    input: &str,
    output: &str,
    config: &NameTagConfig,
) -> Result<GenerationSummary, AppError> {
    let geometry = Geometry::from_config(config);
    let layout = PageLayout::new(&geometry)?;

    let records = load_roster(input, config)?;
    if records.is_empty() {
        return Err(AppError::Input(format!("{}: input contains no attendee rows", input)));
    }
    let font = NameFont::load(&config.font_path, config.font_index, config.font_size_px)?;
    info!(
        "Loaded {} attendees, {} per page ({} x {})",
        records.len(),
        layout.labels_per_page(),
        layout.labels_per_row,
        layout.labels_per_col
    );

    let mut document = NameTagDocument::new(&layout, config.dpi);
    for page in render_pages(&records, &font, config, &geometry, &layout) {
        document.add_page(page?);
        debug!("Composed page {}", document.page_count());
    }

    let pages = document.page_count();
    document.save(output)?;

    Ok(GenerationSummary {
        attendees: records.len(),
        pages,
    })
}

/// Renders the labels for one page worth of attendees and tiles them.
pub fn render_page(
    records: &[AttendeeRecord],
    font: &NameFont,
    config: &NameTagConfig,
    geometry: &Geometry,
    layout: &PageLayout,
) -> Result<RgbImage, AppError> {
    let labels = records
        .iter()
        .map(|record| render_label(record, font, config, geometry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(compose_page(&labels, layout))
}

/// Renders the pages for `records` lazily, one chunk of `labels_per_page`
/// attendees at a time and in source order.
pub fn render_pages<'a>(
    records: &'a [AttendeeRecord],
    font: &'a NameFont,
    config: &'a NameTagConfig,
    geometry: &'a Geometry,
    layout: &'a PageLayout,
) -> impl Iterator<Item = Result<RgbImage, AppError>> + 'a {
    records
        .chunks(layout.labels_per_page())
        .map(move |chunk| render_page(chunk, font, config, geometry, layout))
}

// ============================================================================
// PDF Output
// ============================================================================

/// A PDF whose pages are full-bleed raster images at a fixed resolution
pub struct NameTagDocument {
    doc: PdfDocumentReference,
    first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    page_width: Mm,
    page_height: Mm,
    dpi: f32,
    pages: usize,
}

impl NameTagDocument {
    /// Pages are sized so a page raster covers them exactly at `dpi`.
    pub fn new(layout: &PageLayout, dpi: f32) -> Self {
        let page_width = Mm(layout.page_width as f32 / dpi * MM_PER_INCH);
        let page_height = Mm(layout.page_height as f32 / dpi * MM_PER_INCH);
        let (doc, page1, layer1) = PdfDocument::new(DOCUMENT_TITLE, page_width, page_height, "Layer 1");

        NameTagDocument {
            doc,
            first_page: Some((page1, layer1)),
            page_width,
            page_height,
            dpi,
            pages: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn add_page(&mut self, page: RgbImage) {
        // PdfDocument::new already created the first page
        let (page_index, layer_index) = match self.first_page.take() {
            Some(first) => first,
            None => self.doc.add_page(self.page_width, self.page_height, "Layer 1"),
        };
        let layer = self.doc.get_page(page_index).get_layer(layer_index);

        let (width, height) = page.dimensions();
        let image = Image::from(ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: page.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        image.add_to_layer(
            layer,
            ImageTransform {
                dpi: Some(self.dpi),
                ..Default::default()
            },
        );
        self.pages += 1;
    }

    /// Writes to a temporary file beside `output_path` and moves it into
    /// place only once the PDF is complete.
    pub fn save(self, output_path: &str) -> Result<(), AppError> {
        if self.pages == 0 {
            return Err(AppError::Pdf("document has no pages".to_string()));
        }

        let dir = match Path::new(output_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".nametag-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // open(2) masks this with the umask, like a freshly created file
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut staged = builder.tempfile_in(dir)?;
        if let Ok(existing) = fs::metadata(output_path) {
            staged.as_file().set_permissions(existing.permissions())?;
        }
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            self.doc
                .save(&mut writer)
                .map_err(|e| AppError::Pdf(e.to_string()))?;
            writer.flush()?;
        }
        staged.persist(output_path).map_err(|e| AppError::Io(e.error))?;

        Ok(())
    }
}
