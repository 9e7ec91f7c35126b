use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, AppResult};
use crate::models::Participant;

use super::{EXPORT_HEADERS, export_matrix};

const WIDTH_PADDING: usize = 2;

/// Build the spreadsheet artifact: one "Participantes" sheet, a bold header
/// row, one row per participant in the exact incoming order, columns sized
/// to the longest cell (header included) plus fixed padding.
pub fn participants_to_xlsx(rows: &[Participant]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Participantes")
        .map_err(|e| AppError::RenderError(format!("Spreadsheet export failed: {e}")))?;

    let header_format = Format::new().set_bold();
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| AppError::RenderError(format!("Spreadsheet export failed: {e}")))?;
    }

    let matrix = export_matrix(rows);
    for (row, cells) in matrix.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet
                .write_string((row + 1) as u32, col as u16, cell)
                .map_err(|e| AppError::RenderError(format!("Spreadsheet export failed: {e}")))?;
        }
    }

    for (col, width) in column_widths(&matrix).iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (*width + WIDTH_PADDING) as f64)
            .map_err(|e| AppError::RenderError(format!("Spreadsheet export failed: {e}")))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::RenderError(format!("Spreadsheet export failed: {e}")))
}

/// Longest value per column, header included, in characters.
fn column_widths(matrix: &[[String; 4]]) -> [usize; 4] {
    let mut widths = [0usize; 4];
    for (i, header) in EXPORT_HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for cells in matrix {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn participant(nome: &str, numero_sorte: i64) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            telefone: "5511999990001".to_string(),
            account_id: 1,
            sorteio_nome: "Promo1".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            numero_sorte,
        }
    }

    #[test]
    fn test_column_widths_header_floor() {
        // with no rows the header defines every width
        let widths = column_widths(&[]);
        assert_eq!(widths[0], "Nome".chars().count());
        assert_eq!(widths[2], "Número da Sorte".chars().count());
    }

    #[test]
    fn test_column_widths_longest_cell_wins() {
        let rows = vec![
            participant("Um Nome Bastante Comprido Mesmo", 7),
            participant("Ana", 9_999_999),
        ];
        let widths = column_widths(&export_matrix(&rows));
        assert_eq!(widths[0], "Um Nome Bastante Comprido Mesmo".len());
        // lucky number column still dominated by its header
        assert_eq!(widths[2], "Número da Sorte".chars().count());
    }

    #[test]
    fn test_xlsx_bytes_are_a_zip_archive() {
        let rows = vec![participant("Ana", 1), participant("Bruno", 2)];
        let bytes = participants_to_xlsx(&rows).expect("export");
        // xlsx is a zip container
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_xlsx_export_of_empty_set() {
        let bytes = participants_to_xlsx(&[]).expect("export");
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
