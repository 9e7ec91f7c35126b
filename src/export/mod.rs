//! Export engine: pure transformations from the grid's filtered set into
//! downloadable artifacts. Both exporters take the rows exactly as the grid
//! derived them and must not reorder or deduplicate anything.

pub mod excel;
pub mod pdf;

pub use excel::participants_to_xlsx;
pub use pdf::participants_to_pdf;

use chrono::{DateTime, Utc};

use crate::models::Participant;

pub const EXPORT_HEADERS: [&str; 4] = ["Nome", "Telefone", "Número da Sorte", "Data e Hora"];

/// pt-BR timestamp rendering used in both artifacts.
pub fn format_timestamp_br(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub fn format_date_br(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y").to_string()
}

/// One participant as the ordered cell tuple of the export table.
pub fn row_cells(p: &Participant) -> [String; 4] {
    [
        p.nome.clone(),
        p.telefone.clone(),
        p.numero_sorte.to_string(),
        format_timestamp_br(&p.created_at),
    ]
}

/// The full cell matrix both artifact writers emit: one entry per
/// participant, in the exact incoming order, duplicates included. The
/// writers only add styling around this.
pub fn export_matrix(rows: &[Participant]) -> Vec<[String; 4]> {
    rows.iter().map(row_cells).collect()
}

pub fn xlsx_filename(campaign: &str) -> String {
    format!("participantes_sorteio_{campaign}.xlsx")
}

pub fn pdf_filename(campaign: &str) -> String {
    format!("participantes_sorteio_{campaign}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_row_cells_order_and_format() {
        let p = Participant {
            id: Uuid::new_v4(),
            nome: "Ana".to_string(),
            telefone: "5511999990001".to_string(),
            account_id: 1,
            sorteio_nome: "Promo1".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 30).unwrap(),
            numero_sorte: 42,
        };
        assert_eq!(
            row_cells(&p),
            [
                "Ana".to_string(),
                "5511999990001".to_string(),
                "42".to_string(),
                "09/03/2025, 14:05:30".to_string()
            ]
        );
    }

    fn participant(nome: &str, numero_sorte: i64, secs: i64) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            telefone: "5511999990001".to_string(),
            account_id: 1,
            sorteio_nome: "Promo1".to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            numero_sorte,
        }
    }

    #[test]
    fn test_export_matrix_preserves_order_and_duplicates() {
        // deliberately unsorted, with a repeated entry
        let rows = vec![
            participant("Zeca", 900, 3),
            participant("Ana", 5, 0),
            participant("Zeca", 900, 3),
            participant("Bruno", 41, 7),
        ];
        let matrix = export_matrix(&rows);
        let nomes: Vec<_> = matrix.iter().map(|cells| cells[0].as_str()).collect();
        assert_eq!(nomes, vec!["Zeca", "Ana", "Zeca", "Bruno"]);
        assert_eq!(matrix.len(), rows.len());
    }

    #[test]
    fn test_export_matrix_follows_filtered_sorted_order() {
        use crate::grid::{GridState, SortColumn};

        let rows = vec![
            participant("Zeca", 900, 3),
            participant("Ana", 5, 0),
            participant("Bruno", 41, 7),
        ];
        let view = GridState::default()
            .toggle_sort(SortColumn::NumeroSorte)
            .derive(&rows);
        let matrix = export_matrix(&view.filtered);
        let numeros: Vec<_> = matrix.iter().map(|cells| cells[2].as_str()).collect();
        // export rows come out exactly as the grid sorted them
        assert_eq!(numeros, vec!["5", "41", "900"]);
    }

    #[test]
    fn test_filenames_embed_campaign() {
        assert_eq!(
            xlsx_filename("Promo1"),
            "participantes_sorteio_Promo1.xlsx"
        );
        assert_eq!(pdf_filename("Promo1"), "participantes_sorteio_Promo1.pdf");
    }
}
