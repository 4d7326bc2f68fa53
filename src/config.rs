// ============================================================================
// Physical Constants
// ============================================================================

/// Pixels per millimetre at the 300 dpi print target
pub const PX_PER_MM: f64 = 11.811;

/// Resolution written into the PDF
pub const PRINT_DPI: f32 = 300.0;

/// Name tag dimensions in mm
const LABEL_WIDTH_MM: f64 = 95.0;
const LABEL_HEIGHT_MM: f64 = 64.0;

/// A4 dimensions in mm
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;

/// Gap between label edge and the start of the name
const NAME_LEFT_MARGIN_MM: f64 = 5.0;

/// Gap between the QR code and the right label edge
const QR_RIGHT_MARGIN_PX: u32 = 20;

const BORDER_WIDTH_PX: u32 = 2;
const BORDER_COLOR: [u8; 3] = [0xCC, 0xCC, 0xCC];

/// Em size of the name text in pixels
const NAME_FONT_SIZE_PX: f32 = 200.0;

const PROFILE_BASE_URL: &str = "https://instagram.com/";

const NAME_COLUMN: &str = "성함";
const HANDLE_COLUMN: &str = "인스타그램ID";

pub const DEFAULT_OUTPUT: &str = "name_tags_output.pdf";

#[cfg(target_os = "macos")]
const DEFAULT_FONT_PATH: &str = "/System/Library/Fonts/AppleSDGothicNeo.ttc";
#[cfg(target_os = "macos")]
const DEFAULT_FONT_INDEX: u32 = 2; // Apple SD Gothic Neo Bold

#[cfg(not(target_os = "macos"))]
const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
#[cfg(not(target_os = "macos"))]
const DEFAULT_FONT_INDEX: u32 = 0;

/// Truncates toward zero, so 95mm becomes 1122px rather than 1123px.
pub fn mm_to_px(mm: f64) -> u32 {
    (mm * PX_PER_MM) as u32
}

// ============================================================================
// Configuration
// ============================================================================

/// Everything that shapes the output. Built once in `main` and shared by reference.
#[derive(Debug, Clone)]
pub struct NameTagConfig {
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub name_left_margin_mm: f64,
    pub qr_right_margin_px: u32,
    pub border_width_px: u32,
    pub border_color: [u8; 3],
    pub font_path: String,
    /// Face index inside a font collection (.ttc); 0 for plain font files
    pub font_index: u32,
    pub font_size_px: f32,
    pub profile_base_url: String,
    pub name_column: String,
    pub handle_column: String,
    pub dpi: f32,
}

impl Default for NameTagConfig {
    fn default() -> Self {
        NameTagConfig {
            label_width_mm: LABEL_WIDTH_MM,
            label_height_mm: LABEL_HEIGHT_MM,
            page_width_mm: PAGE_WIDTH_MM,
            page_height_mm: PAGE_HEIGHT_MM,
            name_left_margin_mm: NAME_LEFT_MARGIN_MM,
            qr_right_margin_px: QR_RIGHT_MARGIN_PX,
            border_width_px: BORDER_WIDTH_PX,
            border_color: BORDER_COLOR,
            font_path: DEFAULT_FONT_PATH.to_string(),
            font_index: DEFAULT_FONT_INDEX,
            font_size_px: NAME_FONT_SIZE_PX,
            profile_base_url: PROFILE_BASE_URL.to_string(),
            name_column: NAME_COLUMN.to_string(),
            handle_column: HANDLE_COLUMN.to_string(),
            dpi: PRINT_DPI,
        }
    }
}

/// Pixel dimensions derived from a [`NameTagConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub label_width_px: u32,
    pub label_height_px: u32,
    pub page_width_px: u32,
    pub page_height_px: u32,
    pub name_left_margin_px: u32,
    pub qr_size_px: u32,
}

impl Geometry {
    pub fn from_config(config: &NameTagConfig) -> Self {
        let label_height_px = mm_to_px(config.label_height_mm);
        Geometry {
            label_width_px: mm_to_px(config.label_width_mm),
            label_height_px,
            page_width_px: mm_to_px(config.page_width_mm),
            page_height_px: mm_to_px(config.page_height_mm),
            name_left_margin_px: mm_to_px(config.name_left_margin_mm),
            qr_size_px: label_height_px / 3,
        }
    }
}
