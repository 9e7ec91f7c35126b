//! Participant grid engine: client-side filter, sort and pagination over
//! the participant rows of one campaign. All state lives in one immutable
//! [`GridState`] value; [`GridState::derive`] recomputes the visible page
//! and the pre-pagination filtered set from the raw rows, so exports always
//! match what the operator is looking at.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Nome,
    Telefone,
    NumeroSorte,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridState {
    pub filter_text: String,
    pub sort: Option<Sort>,
    pub page: Page,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            sort: None,
            page: Page {
                index: 0,
                size: DEFAULT_PAGE_SIZE,
            },
        }
    }
}

/// Distinguishes "this campaign has no participants" from "the active
/// filter matched nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GridEmpty {
    NoRecords,
    NoMatches,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridView {
    /// Filtered + sorted rows before page slicing; the export input.
    pub filtered: Vec<Participant>,
    /// The slice currently on screen.
    pub visible: Vec<Participant>,
    /// Effective (clamped) page index.
    pub page_index: usize,
    pub page_size: usize,
    /// 0 when nothing survives the filter; pagination controls hide then.
    pub page_count: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<GridEmpty>,
}

impl GridState {
    pub fn with_filter(mut self, text: impl Into<String>) -> Self {
        self.filter_text = text.into();
        self
    }

    /// Repeated selection of the same column cycles asc -> desc -> unsorted;
    /// selecting a different column starts over at ascending.
    pub fn toggle_sort(mut self, column: SortColumn) -> Self {
        self.sort = match self.sort {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Asc => Some(Sort {
                    column,
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(Sort {
                column,
                direction: SortDirection::Asc,
            }),
        };
        self
    }

    /// Stores the requested index as-is; derivation clamps it against the
    /// filtered row count.
    pub fn with_page_index(mut self, index: usize) -> Self {
        self.page.index = index;
        self
    }

    /// Changing the page size always snaps back to the first page.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page.size = size.max(1);
        self.page.index = 0;
        self
    }

    /// A participant is visible iff the filter text is a case-insensitive
    /// substring of its name, phone or lucky number. Empty filter admits all.
    pub fn matches(&self, p: &Participant) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let needle = self.filter_text.to_lowercase();
        p.nome.to_lowercase().contains(&needle)
            || p.telefone.to_lowercase().contains(&needle)
            || p.numero_sorte.to_string().contains(&needle)
    }

    /// Recompute the whole view from the raw rows. Pure: same state + same
    /// rows always yields the same view.
    pub fn derive(&self, rows: &[Participant]) -> GridView {
        let mut filtered: Vec<Participant> =
            rows.iter().filter(|p| self.matches(p)).cloned().collect();

        if let Some(sort) = self.sort {
            // stable sort keeps the incoming order for equal keys
            filtered.sort_by(|a, b| {
                let ord = match sort.column {
                    SortColumn::Nome => a.nome.to_lowercase().cmp(&b.nome.to_lowercase()),
                    SortColumn::Telefone => a.telefone.cmp(&b.telefone),
                    SortColumn::NumeroSorte => a.numero_sorte.cmp(&b.numero_sorte),
                    SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = filtered.len();
        let size = self.page.size.max(1);
        let page_count = total.div_ceil(size);
        let page_index = if page_count == 0 {
            0
        } else {
            self.page.index.min(page_count - 1)
        };

        let start = page_index * size;
        let end = (start + size).min(total);
        let visible = filtered[start..end].to_vec();

        let empty = if total == 0 {
            if rows.is_empty() {
                Some(GridEmpty::NoRecords)
            } else {
                Some(GridEmpty::NoMatches)
            }
        } else {
            None
        };

        GridView {
            filtered,
            visible,
            page_index,
            page_size: size,
            page_count,
            total,
            empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn participant(nome: &str, telefone: &str, numero_sorte: i64, secs: i64) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            telefone: telefone.to_string(),
            account_id: 1,
            sorteio_nome: "Promo1".to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            numero_sorte,
        }
    }

    fn sample() -> Vec<Participant> {
        vec![
            participant("Ana Souza", "5511999990001", 123456, 0),
            participant("Bruno Lima", "5511999990002", 77, 10),
            participant("carla dias", "5521988880003", 9_123_456, 20),
            participant("Diego Reis", "5511977770004", 1234, 30),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let rows = sample();
        let view = GridState::default().derive(&rows);
        assert_eq!(view.filtered, rows);
        assert_eq!(view.total, 4);
        assert!(view.empty.is_none());
    }

    #[test]
    fn test_filter_is_case_insensitive_across_fields() {
        let rows = sample();

        // name match, different case
        let view = GridState::default().with_filter("CARLA").derive(&rows);
        assert_eq!(view.total, 1);
        assert_eq!(view.filtered[0].nome, "carla dias");

        // phone substring
        let view = GridState::default().with_filter("2198888").derive(&rows);
        assert_eq!(view.total, 1);
        assert_eq!(view.filtered[0].nome, "carla dias");

        // lucky number as string
        let view = GridState::default().with_filter("123456").derive(&rows);
        let nomes: Vec<_> = view.filtered.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(nomes, vec!["Ana Souza", "carla dias"]);
    }

    #[test]
    fn test_filter_no_matches_vs_no_records() {
        let rows = sample();
        let view = GridState::default().with_filter("zzz").derive(&rows);
        assert_eq!(view.total, 0);
        assert_eq!(view.empty, Some(GridEmpty::NoMatches));
        assert_eq!(view.page_count, 0);

        let view = GridState::default().derive(&[]);
        assert_eq!(view.empty, Some(GridEmpty::NoRecords));
        assert!(view.visible.is_empty());
    }

    #[test]
    fn test_sort_cycle_asc_desc_none() {
        let s = GridState::default();
        let s = s.toggle_sort(SortColumn::Nome);
        assert_eq!(
            s.sort,
            Some(Sort {
                column: SortColumn::Nome,
                direction: SortDirection::Asc
            })
        );
        let s = s.toggle_sort(SortColumn::Nome);
        assert_eq!(
            s.sort,
            Some(Sort {
                column: SortColumn::Nome,
                direction: SortDirection::Desc
            })
        );
        let s = s.toggle_sort(SortColumn::Nome);
        assert_eq!(s.sort, None);

        // switching columns restarts at ascending
        let s = s
            .toggle_sort(SortColumn::Nome)
            .toggle_sort(SortColumn::NumeroSorte);
        assert_eq!(
            s.sort,
            Some(Sort {
                column: SortColumn::NumeroSorte,
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn test_sort_numeric_vs_lexicographic() {
        let rows = sample();
        let view = GridState::default()
            .toggle_sort(SortColumn::NumeroSorte)
            .derive(&rows);
        let numeros: Vec<_> = view.filtered.iter().map(|p| p.numero_sorte).collect();
        assert_eq!(numeros, vec![77, 1234, 123456, 9_123_456]);

        let view = GridState::default().toggle_sort(SortColumn::Nome).derive(&rows);
        let nomes: Vec<_> = view.filtered.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(
            nomes,
            vec!["Ana Souza", "Bruno Lima", "carla dias", "Diego Reis"]
        );
    }

    #[test]
    fn test_sort_chronological_desc() {
        let rows = sample();
        let view = GridState::default()
            .toggle_sort(SortColumn::CreatedAt)
            .toggle_sort(SortColumn::CreatedAt)
            .derive(&rows);
        let nomes: Vec<_> = view.filtered.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(
            nomes,
            vec!["Diego Reis", "carla dias", "Bruno Lima", "Ana Souza"]
        );
    }

    #[test]
    fn test_pagination_windows() {
        let rows: Vec<_> = (0..25)
            .map(|i| participant(&format!("P{i:02}"), "5511999990000", i, i))
            .collect();

        let state = GridState::default().with_page_size(10);
        let view = state.clone().with_page_index(0).derive(&rows);
        assert_eq!(view.visible.len(), 10);
        assert_eq!(view.page_count, 3);

        let view = state.clone().with_page_index(2).derive(&rows);
        assert_eq!(view.visible.len(), 5);
        assert_eq!(view.visible[0].nome, "P20");

        // out-of-range index clamps to the last page
        let view = state.with_page_index(99).derive(&rows);
        assert_eq!(view.page_index, 2);
        assert_eq!(view.visible.len(), 5);
    }

    #[test]
    fn test_page_size_change_resets_index() {
        let state = GridState::default()
            .with_page_size(5)
            .with_page_index(3)
            .with_page_size(20);
        assert_eq!(state.page.index, 0);
        assert_eq!(state.page.size, 20);
    }

    #[test]
    fn test_page_of_empty_filtered_set_is_empty() {
        let view = GridState::default().with_page_index(0).derive(&[]);
        assert!(view.visible.is_empty());
        assert_eq!(view.page_count, 0);
        assert_eq!(view.page_index, 0);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let rows = sample();
        let state = GridState::default()
            .with_filter("99999")
            .toggle_sort(SortColumn::Nome);
        let a = state.derive(&rows);
        let b = state.derive(&rows);
        assert_eq!(a.filtered, b.filtered);
        assert_eq!(a.visible, b.visible);
    }

    #[test]
    fn test_filtered_set_ignores_pagination() {
        let rows: Vec<_> = (0..30)
            .map(|i| participant(&format!("P{i:02}"), "5511999990000", i, i))
            .collect();
        let view = GridState::default()
            .with_page_size(10)
            .with_page_index(2)
            .derive(&rows);
        // export input is the whole filtered set, not the visible page
        assert_eq!(view.filtered.len(), 30);
        assert_eq!(view.visible.len(), 10);
    }
}
