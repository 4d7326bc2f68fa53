use ::image::imageops;
use ::image::{Rgb, RgbImage};

use crate::config::Geometry;
use crate::error::AppError;

const PAGE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Maps a 0-based index within a page to its `(row, col)` cell, filling
/// left to right and then top to bottom.
pub fn grid_position(index: usize, labels_per_row: usize) -> (usize, usize) {
    (index / labels_per_row, index % labels_per_row)
}

/// Where a label ends up in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub x: u32,
    pub y: u32,
}

/// How fixed-size labels tile onto fixed-size pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub label_width: u32,
    pub label_height: u32,
    pub page_width: u32,
    pub page_height: u32,
    pub labels_per_row: usize,
    pub labels_per_col: usize,
}

impl PageLayout {
    pub fn new(geometry: &Geometry) -> Result<PageLayout, AppError> {
        if geometry.label_width_px == 0 || geometry.label_height_px == 0 {
            return Err(AppError::Layout(format!(
                "label size {}x{}px is empty",
                geometry.label_width_px, geometry.label_height_px
            )));
        }

        let labels_per_row = (geometry.page_width_px / geometry.label_width_px) as usize;
        let labels_per_col = (geometry.page_height_px / geometry.label_height_px) as usize;
        if labels_per_row == 0 || labels_per_col == 0 {
            return Err(AppError::Layout(format!(
                "a {}x{}px label does not fit on a {}x{}px page",
                geometry.label_width_px,
                geometry.label_height_px,
                geometry.page_width_px,
                geometry.page_height_px
            )));
        }

        Ok(PageLayout {
            label_width: geometry.label_width_px,
            label_height: geometry.label_height_px,
            page_width: geometry.page_width_px,
            page_height: geometry.page_height_px,
            labels_per_row,
            labels_per_col,
        })
    }

    pub fn labels_per_page(&self) -> usize {
        self.labels_per_row * self.labels_per_col
    }

    pub fn page_count(&self, labels: usize) -> usize {
        labels.div_ceil(self.labels_per_page())
    }

    /// Placement of the label at 0-based document position `index`
    pub fn locate(&self, index: usize) -> Placement {
        let per_page = self.labels_per_page();
        let (row, col) = grid_position(index % per_page, self.labels_per_row);
        Placement {
            page: index / per_page,
            row,
            col,
            x: col as u32 * self.label_width,
            y: row as u32 * self.label_height,
        }
    }
}

/// Pastes one page worth of labels onto a blank page.
///
/// `labels` must not hold more than `labels_per_page` images.
pub fn compose_page(labels: &[RgbImage], layout: &PageLayout) -> RgbImage {
    debug_assert!(labels.len() <= layout.labels_per_page());

    let mut page = RgbImage::from_pixel(layout.page_width, layout.page_height, PAGE_COLOR);
    for (index, label) in labels.iter().enumerate() {
        let placement = layout.locate(index);
        imageops::replace(&mut page, label, placement.x as i64, placement.y as i64);
    }
    page
}
