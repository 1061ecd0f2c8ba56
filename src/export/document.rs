//! PDF work list export.
//!
//! Rendering happens in two steps: [`layout_document`] computes column widths, wrapped cell text
//! and page breaks in millimetres (top-left origin); [`render_pdf`] draws that layout with
//! `printpdf`.

use chrono::NaiveDateTime;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};

use crate::columns::ColumnRules;
use crate::error::{WorklistError, WorklistResult};
use crate::types::{FilterSet, VisibleRows};

use super::filename::export_file_name;
use super::{ExportArtifact, ExportOptions};

/// Landscape A4.
pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;
pub const MARGIN_MM: f32 = 10.0;

const TITLE_POS: (f32, f32) = (14.0, 15.0);
const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_POS: (f32, f32) = (14.0, 22.0);
const SUBTITLE_SIZE: f32 = 10.0;
const FIRST_TABLE_TOP_MM: f32 = 34.0;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph advance, in em.
const AVG_GLYPH_EM: f32 = 0.5;
const BOLD_GLYPH_EM: f32 = 0.55;
const LINE_SPACING: f32 = 1.15;

const HEADER_FILL: (u8, u8, u8) = (41, 128, 185);

/// Horizontal alignment of a column's body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Width hint in millimetres for a column, by header name.
pub fn column_width_hint(header: &str) -> f32 {
    if header.contains("Customer") {
        35.0
    } else if header.contains("Order") {
        25.0
    } else if matches!(header, "H" | "W" | "Spine") {
        15.0
    } else if header.contains("Paper") {
        32.0
    } else if header.contains("Bind") {
        20.0
    } else if header == "ISBN" {
        25.0
    } else if header == "Title" {
        45.0
    } else if header == "Quantity" || header == "Qty" {
        15.0
    } else {
        25.0
    }
}

/// Body alignment for a column: dimensions, quantity and binding are centred.
pub fn column_align(header: &str, rules: &ColumnRules) -> Align {
    if matches!(header, "H" | "W" | "Spine") || rules.is_quantity(header) || header.contains("Bind")
    {
        Align::Center
    } else {
        Align::Left
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub header: String,
    pub x_mm: f32,
    pub width_mm: f32,
    pub align: Align,
}

/// One table row placed on a page. `cells` holds the wrapped lines of each cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub top_mm: f32,
    pub height_mm: f32,
    pub cells: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub header: RowLayout,
    pub rows: Vec<RowLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub subtitle: String,
    pub font_size: f32,
    pub padding_mm: f32,
    pub columns: Vec<ColumnLayout>,
    pub pages: Vec<PageLayout>,
}

/// Estimated rendered width of `text` at `font_size` points.
fn text_width_mm(text: &str, font_size: f32, glyph_em: f32) -> f32 {
    text.chars().count() as f32 * font_size * glyph_em * PT_TO_MM
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * PT_TO_MM * LINE_SPACING
}

/// Greedy word wrap. Words wider than `max_width_mm` are broken between characters.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size: f32, glyph_em: f32) -> Vec<String> {
    let per_char = font_size * glyph_em * PT_TO_MM;
    let max_chars = ((max_width_mm / per_char).floor() as usize).max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word));
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn layout_columns(headers: &[String], rules: &ColumnRules) -> Vec<ColumnLayout> {
    let hints: Vec<f32> = headers.iter().map(|h| column_width_hint(h)).collect();
    let available = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let total: f32 = hints.iter().sum();
    let scale = if total > available { available / total } else { 1.0 };

    let mut x = MARGIN_MM;
    headers
        .iter()
        .zip(hints)
        .map(|(h, w)| {
            let width_mm = w * scale;
            let col = ColumnLayout {
                header: h.clone(),
                x_mm: x,
                width_mm,
                align: column_align(h, rules),
            };
            x += width_mm;
            col
        })
        .collect()
}

fn layout_row(
    cells: &[String],
    columns: &[ColumnLayout],
    font_size: f32,
    padding_mm: f32,
    glyph_em: f32,
) -> RowLayout {
    let cells: Vec<Vec<String>> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            let inner = (col.width_mm - 2.0 * padding_mm).max(1.0);
            wrap_text(text, inner, font_size, glyph_em)
        })
        .collect();
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    RowLayout {
        top_mm: 0.0,
        height_mm: lines as f32 * line_height_mm(font_size) + 2.0 * padding_mm,
        cells,
    }
}

/// Compute the full page layout for the visible rows.
pub fn layout_document(
    view: &VisibleRows<'_>,
    options: &ExportOptions,
    rules: &ColumnRules,
    generated_at: NaiveDateTime,
) -> DocumentLayout {
    let font_size = options.body_font_size;
    let padding_mm = options.cell_padding_mm;
    let columns = layout_columns(view.headers, rules);
    let header_template = layout_row(view.headers, &columns, font_size, padding_mm, BOLD_GLYPH_EM);
    let bottom = PAGE_HEIGHT_MM - MARGIN_MM;

    let new_page = |top: f32| {
        let mut header = header_template.clone();
        header.top_mm = top;
        let cursor = top + header.height_mm;
        (
            PageLayout {
                header,
                rows: Vec::new(),
            },
            cursor,
        )
    };

    let mut pages: Vec<PageLayout> = Vec::new();
    let (mut page, mut cursor) = new_page(FIRST_TABLE_TOP_MM);
    for cells in &view.rows {
        let mut row = layout_row(cells, &columns, font_size, padding_mm, AVG_GLYPH_EM);
        // A row that does not fit starts a new page (unless the page has no rows yet).
        if cursor + row.height_mm > bottom && !page.rows.is_empty() {
            pages.push(page);
            (page, cursor) = new_page(MARGIN_MM);
        }
        row.top_mm = cursor;
        cursor += row.height_mm;
        page.rows.push(row);
    }
    pages.push(page);

    DocumentLayout {
        title: options.document_title.clone(),
        subtitle: format!("Generated on: {}", generated_at.format("%d/%m/%Y %H:%M:%S")),
        font_size,
        padding_mm,
        columns,
        pages,
    }
}

/// Render the visible rows as a PDF work list.
///
/// Fails with [`WorklistError::EmptyExport`] if no rows are visible.
pub fn export_document(
    view: &VisibleRows<'_>,
    filters: &FilterSet,
    options: &ExportOptions,
    rules: &ColumnRules,
    generated_at: NaiveDateTime,
) -> WorklistResult<ExportArtifact> {
    if view.is_empty() {
        return Err(WorklistError::EmptyExport);
    }
    let filename = export_file_name(&options.base_name, filters, "pdf");
    let layout = layout_document(view, options, rules, generated_at);
    let bytes = render_pdf(&layout)?;
    log::debug!(
        "rendered {filename}: {} rows on {} page(s)",
        view.len(),
        layout.pages.len()
    );
    Ok(ExportArtifact { filename, bytes })
}

/// Draw a computed layout into PDF bytes.
pub fn render_pdf(layout: &DocumentLayout) -> WorklistResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        layout.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Table",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (i, page) in layout.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Table")
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        if i == 0 {
            layer.set_fill_color(black());
            layer.use_text(
                layout.title.as_str(),
                TITLE_SIZE,
                Mm(TITLE_POS.0),
                Mm(PAGE_HEIGHT_MM - TITLE_POS.1),
                &regular,
            );
            layer.use_text(
                layout.subtitle.as_str(),
                SUBTITLE_SIZE,
                Mm(SUBTITLE_POS.0),
                Mm(PAGE_HEIGHT_MM - SUBTITLE_POS.1),
                &regular,
            );
        }

        draw_header(&layer, layout, &page.header, &bold);
        for row in &page.rows {
            draw_row(&layer, layout, row, &regular);
        }
    }

    Ok(doc.save_to_bytes()?)
}

fn draw_header(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    row: &RowLayout,
    font: &IndirectFontRef,
) {
    let (r, g, b) = HEADER_FILL;
    let left = layout.columns.first().map(|c| c.x_mm).unwrap_or(MARGIN_MM);
    let right = layout
        .columns
        .last()
        .map(|c| c.x_mm + c.width_mm)
        .unwrap_or(MARGIN_MM);

    layer.set_fill_color(rgb(r, g, b));
    layer.add_polygon(Polygon {
        rings: vec![rect_points(left, row.top_mm, right, row.top_mm + row.height_mm)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });

    layer.set_fill_color(rgb(255, 255, 255));
    for (col, lines) in layout.columns.iter().zip(&row.cells) {
        draw_cell_text(layer, layout, col, Align::Center, row, lines, font, BOLD_GLYPH_EM);
    }
    draw_grid(layer, layout, row);
}

fn draw_row(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    row: &RowLayout,
    font: &IndirectFontRef,
) {
    layer.set_fill_color(black());
    for (col, lines) in layout.columns.iter().zip(&row.cells) {
        draw_cell_text(layer, layout, col, col.align, row, lines, font, AVG_GLYPH_EM);
    }
    draw_grid(layer, layout, row);
}

#[allow(clippy::too_many_arguments)]
fn draw_cell_text(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    col: &ColumnLayout,
    align: Align,
    row: &RowLayout,
    lines: &[String],
    font: &IndirectFontRef,
    glyph_em: f32,
) {
    let line_h = line_height_mm(layout.font_size);
    for (n, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = match align {
            Align::Left => col.x_mm + layout.padding_mm,
            Align::Center => {
                let w = text_width_mm(line, layout.font_size, glyph_em);
                (col.x_mm + (col.width_mm - w) / 2.0).max(col.x_mm)
            }
        };
        // Baseline sits one line below the top padding.
        let baseline = row.top_mm + layout.padding_mm + line_h * (n as f32 + 1.0) - line_h * 0.25;
        layer.use_text(
            line.as_str(),
            layout.font_size,
            Mm(x),
            Mm(PAGE_HEIGHT_MM - baseline),
            font,
        );
    }
}

fn draw_grid(layer: &PdfLayerReference, layout: &DocumentLayout, row: &RowLayout) {
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.3);
    for col in &layout.columns {
        layer.add_line(Line {
            points: rect_points(
                col.x_mm,
                row.top_mm,
                col.x_mm + col.width_mm,
                row.top_mm + row.height_mm,
            ),
            is_closed: true,
        });
    }
}

/// Rectangle corners in PDF coordinates from top-left based millimetres.
fn rect_points(left: f32, top: f32, right: f32, bottom: f32) -> Vec<(Point, bool)> {
    let flip = |y: f32| Mm(PAGE_HEIGHT_MM - y);
    vec![
        (Point::new(Mm(left), flip(top)), false),
        (Point::new(Mm(right), flip(top)), false),
        (Point::new(Mm(right), flip(bottom)), false),
        (Point::new(Mm(left), flip(bottom)), false),
    ]
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn black() -> Color {
    rgb(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        column_align, column_width_hint, layout_document, line_height_mm, wrap_text, Align,
        MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
    };
    use crate::columns::ColumnRules;
    use crate::export::ExportOptions;
    use crate::types::VisibleRows;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
    }

    #[test]
    fn width_hints_by_header_name() {
        assert_eq!(column_width_hint("Customer"), 35.0);
        // "Customer Order No." hits the Customer rule first.
        assert_eq!(column_width_hint("Customer Order No."), 35.0);
        assert_eq!(column_width_hint("Order Ref"), 25.0);
        assert_eq!(column_width_hint("Spine"), 15.0);
        assert_eq!(column_width_hint("Text Paper"), 32.0);
        assert_eq!(column_width_hint("Bind Method"), 20.0);
        assert_eq!(column_width_hint("Title"), 45.0);
        assert_eq!(column_width_hint("Qty"), 15.0);
        assert_eq!(column_width_hint("Spine (mm)"), 25.0);
    }

    #[test]
    fn dimension_quantity_and_bind_columns_are_centred() {
        let rules = ColumnRules::default();
        for h in ["H", "W", "Spine", "Quantity", "Qty", "Bind Method"] {
            assert_eq!(column_align(h, &rules), Align::Center, "{h}");
        }
        for h in ["Customer", "Title", "ISBN", "Text Paper"] {
            assert_eq!(column_align(h, &rules), Align::Left, "{h}");
        }
    }

    #[test]
    fn wrap_breaks_on_words_then_characters() {
        // 9pt * 0.5em ≈ 1.59mm per glyph; 16mm holds 10 glyphs.
        let lines = wrap_text("Silk 150gsm matt laminated", 16.0, 9.0, 0.5);
        assert_eq!(lines, vec!["Silk", "150gsm", "matt", "laminated"]);
        let lines = wrap_text("ABCDEFGHIJKLMNOP", 16.0, 9.0, 0.5);
        assert_eq!(lines, vec!["ABCDEFGHIJ", "KLMNOP"]);
        assert_eq!(wrap_text("", 16.0, 9.0, 0.5), vec![""]);
    }

    #[test]
    fn columns_fit_printable_width() {
        let headers = s(&[
            "Customer", "Customer Order No.", "Bind Method", "H", "W", "Spine", "Text Paper",
            "ISBN", "Title", "Quantity", "Extra A", "Extra B",
        ]);
        let rows: Vec<Vec<String>> = Vec::new();
        let view = VisibleRows {
            headers: &headers,
            rows: rows.iter().map(Vec::as_slice).collect(),
        };
        let layout = layout_document(&view, &ExportOptions::default(), &ColumnRules::default(), at());
        let last = layout.columns.last().unwrap();
        assert!((last.x_mm + last.width_mm - (PAGE_WIDTH_MM - MARGIN_MM)).abs() < 0.01);
        assert_eq!(layout.columns[0].x_mm, MARGIN_MM);
    }

    #[test]
    fn subtitle_uses_day_month_year() {
        let headers = s(&["Customer"]);
        let rows = vec![s(&["Acme"])];
        let view = VisibleRows {
            headers: &headers,
            rows: rows.iter().map(Vec::as_slice).collect(),
        };
        let layout = layout_document(&view, &ExportOptions::default(), &ColumnRules::default(), at());
        assert_eq!(layout.title, "Cased POD Work List");
        assert_eq!(layout.subtitle, "Generated on: 07/03/2024 09:05:01");
    }

    #[test]
    fn single_line_rows_are_padded_three_millimetres_each_side() {
        let headers = s(&["Customer"]);
        let rows = vec![s(&["Acme"])];
        let view = VisibleRows {
            headers: &headers,
            rows: rows.iter().map(Vec::as_slice).collect(),
        };
        let options = ExportOptions::default();
        let layout = layout_document(&view, &options, &ColumnRules::default(), at());
        let row = &layout.pages[0].rows[0];
        let expected = line_height_mm(options.body_font_size) + 6.0;
        assert!((row.height_mm - expected).abs() < 0.001);
    }

    #[test]
    fn long_tables_break_across_pages_with_repeated_header() {
        let headers = s(&["Customer", "Qty"]);
        let rows: Vec<Vec<String>> = (0..200).map(|i| s(&["Acme", &i.to_string()])).collect();
        let view = VisibleRows {
            headers: &headers,
            rows: rows.iter().map(Vec::as_slice).collect(),
        };
        let layout = layout_document(&view, &ExportOptions::default(), &ColumnRules::default(), at());

        assert!(layout.pages.len() > 1);
        assert_eq!(layout.pages.iter().map(|p| p.rows.len()).sum::<usize>(), 200);
        assert_eq!(layout.pages[0].header.top_mm, 34.0);
        for page in &layout.pages[1..] {
            assert_eq!(page.header.top_mm, MARGIN_MM);
            assert_eq!(page.header.cells[0], vec!["Customer"]);
        }
        for page in &layout.pages {
            let last = page.rows.last().unwrap();
            assert!(last.top_mm + last.height_mm <= PAGE_HEIGHT_MM - MARGIN_MM + 0.001);
        }
    }
}
