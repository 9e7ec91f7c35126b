use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, PdfLayerReference, Rect, Rgb};

use crate::error::{AppError, AppResult};
use crate::models::Participant;

use super::{EXPORT_HEADERS, export_matrix, format_date_br};

// A4 portrait, millimetres, origin at the bottom-left.
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const TABLE_RIGHT: f32 = 196.0;
const COL_X: [f32; 4] = [14.0, 64.0, 104.0, 144.0];
const CELL_INSET: f32 = 3.0;
const ROW_H: f32 = 8.0;
const TITLE_Y: f32 = PAGE_H - 22.0;
const FIRST_TABLE_TOP: f32 = PAGE_H - 30.0;
const NEXT_TABLE_TOP: f32 = PAGE_H - 14.0;
const TABLE_BOTTOM: f32 = 20.0;
const FOOTER_Y: f32 = 10.0;

// autoTable palette from the console: blue header, faint zebra rows
const HEADER_FILL: (f32, f32, f32) = (37.0 / 255.0, 99.0 / 255.0, 235.0 / 255.0);
const ZEBRA_FILL: (f32, f32, f32) = (249.0 / 255.0, 250.0 / 255.0, 251.0 / 255.0);

/// Build the paginated document artifact: title with the campaign name on
/// the first page, a repeated styled header row, alternating row shading,
/// and an export-date + "Página i de N" footer on every page. Row order is
/// exactly the incoming (filtered) order.
pub fn participants_to_pdf(
    rows: &[Participant],
    campaign: &str,
    exported_at: DateTime<Utc>,
) -> AppResult<Vec<u8>> {
    let title = format!("Lista de Participantes - {campaign}");
    let (doc, first_page, first_layer) =
        PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::RenderError(format!("Document export failed: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::RenderError(format!("Document export failed: {e}")))?;

    let matrix = export_matrix(rows);
    let counts = page_row_counts(matrix.len());
    let page_total = counts.len();
    let mut offset = 0usize;

    for (page_idx, count) in counts.iter().enumerate() {
        let layer = if page_idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let table_top = if page_idx == 0 {
            set_fill(&layer, (0.0, 0.0, 0.0));
            layer.use_text(&title, 18.0, Mm(MARGIN_LEFT), Mm(TITLE_Y), &bold);
            FIRST_TABLE_TOP
        } else {
            NEXT_TABLE_TOP
        };

        draw_header_row(&layer, &bold, table_top);

        for (i, cells) in matrix[offset..offset + count].iter().enumerate() {
            let row_top = table_top - ROW_H * (i + 1) as f32;
            if i % 2 == 1 {
                fill_row(&layer, row_top, ZEBRA_FILL);
            }
            set_fill(&layer, (0.0, 0.0, 0.0));
            for (col, cell) in cells.iter().enumerate() {
                layer.use_text(
                    cell,
                    10.0,
                    Mm(COL_X[col] + CELL_INSET),
                    Mm(row_top - ROW_H + CELL_INSET),
                    &font,
                );
            }
        }
        offset += count;

        set_fill(&layer, (0.0, 0.0, 0.0));
        layer.use_text(
            format!(
                "Exportado em: {} - Página {} de {}",
                format_date_br(&exported_at),
                page_idx + 1,
                page_total
            ),
            10.0,
            Mm(MARGIN_LEFT),
            Mm(FOOTER_Y),
            &font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::RenderError(format!("Document export failed: {e}")))
}

/// Row capacity per page: the first page loses height to the title, later
/// pages only repeat the header row. Always at least one page, so an empty
/// filtered set still yields a header plus footer.
fn page_row_counts(total: usize) -> Vec<usize> {
    let per_first = rows_fitting(FIRST_TABLE_TOP);
    let per_next = rows_fitting(NEXT_TABLE_TOP);

    let mut counts = vec![total.min(per_first)];
    let mut remaining = total - counts[0];
    while remaining > 0 {
        let n = remaining.min(per_next);
        counts.push(n);
        remaining -= n;
    }
    counts
}

fn rows_fitting(table_top: f32) -> usize {
    // one slot goes to the header row
    ((table_top - TABLE_BOTTOM) / ROW_H) as usize - 1
}

fn draw_header_row(layer: &PdfLayerReference, bold: &printpdf::IndirectFontRef, table_top: f32) {
    fill_row(layer, table_top, HEADER_FILL);
    set_fill(layer, (1.0, 1.0, 1.0));
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        layer.use_text(
            *header,
            10.0,
            Mm(COL_X[col] + CELL_INSET),
            Mm(table_top - ROW_H + CELL_INSET),
            bold,
        );
    }
}

fn fill_row(layer: &PdfLayerReference, row_top: f32, rgb: (f32, f32, f32)) {
    set_fill(layer, rgb);
    layer.add_rect(
        Rect::new(
            Mm(MARGIN_LEFT),
            Mm(row_top - ROW_H),
            Mm(TABLE_RIGHT),
            Mm(row_top),
        )
        .with_mode(PaintMode::Fill),
    );
}

fn set_fill(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}
