use actix_web::{HttpResponse, Responder, ResponseError, web};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::export;
use crate::grid::{GridState, Sort, SortColumn, SortDirection};
use crate::models::{ApiResponse, CreateParticipantRequest, Participant};
use crate::services::ParticipantService;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Grid state as query parameters. Sorting is explicit here (column +
/// direction); the asc/desc/none toggle cycle lives in the client, which
/// simply stops sending `sort` for the "none" leg.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GridQuery {
    pub filter: Option<String>,
    pub sort: Option<SortColumn>,
    pub dir: Option<SortDirection>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl GridQuery {
    pub fn to_state(&self) -> GridState {
        let mut state = GridState::default();
        if let Some(filter) = &self.filter {
            state = state.with_filter(filter.clone());
        }
        if let Some(column) = self.sort {
            state.sort = Some(Sort {
                column,
                direction: self.dir.unwrap_or(SortDirection::Asc),
            });
        }
        if let Some(size) = self.size {
            state = state.with_page_size(size);
        }
        if let Some(index) = self.page {
            state = state.with_page_index(index);
        }
        state
    }
}

#[utoipa::path(
    post,
    path = "/api/participantes",
    tag = "participantes",
    request_body = CreateParticipantRequest,
    responses(
        (status = 200, description = "Participant registered with lucky number", body = Participant),
        (status = 400, description = "Missing required field"),
        (status = 502, description = "Store failure")
    )
)]
pub async fn create_participant(
    service: web::Data<ParticipantService>,
    body: web::Json<CreateParticipantRequest>,
) -> impl Responder {
    match service.create(&body).await {
        Ok(participant) => HttpResponse::Ok().json(ApiResponse::success(participant)),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/participantes/{sorteio_nome}",
    tag = "participantes",
    params(
        ("sorteio_nome" = String, Path, description = "Campaign name"),
        GridQuery
    ),
    responses(
        (status = 200, description = "Filtered, sorted and paged grid view"),
        (status = 502, description = "Store failure")
    )
)]
/// The participant grid for one campaign, derived server-side from the
/// full record set and the requested grid state.
pub async fn grid(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
    query: web::Query<GridQuery>,
) -> impl Responder {
    let sorteio_nome = path.into_inner();
    match service.list_by_campaign(&sorteio_nome).await {
        Ok(rows) => {
            let view = query.to_state().derive(&rows);
            HttpResponse::Ok().json(ApiResponse::success(view))
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/participantes/{sorteio_nome}/export/xlsx",
    tag = "participantes",
    params(
        ("sorteio_nome" = String, Path, description = "Campaign name"),
        GridQuery
    ),
    responses(
        (status = 200, description = "Spreadsheet of the filtered set"),
        (status = 500, description = "Render failure"),
        (status = 502, description = "Store failure")
    )
)]
/// Spreadsheet download. Exports the filtered + sorted set, ignoring the
/// page window, so the artifact always matches the active search.
pub async fn export_xlsx(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
    query: web::Query<GridQuery>,
) -> impl Responder {
    let sorteio_nome = path.into_inner();
    let rows = match service.list_by_campaign(&sorteio_nome).await {
        Ok(rows) => rows,
        Err(e) => return e.error_response(),
    };
    let view = query.to_state().derive(&rows);

    match export::participants_to_xlsx(&view.filtered) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header((
                "Content-Disposition",
                attachment(&export::xlsx_filename(&sorteio_nome)),
            ))
            .body(bytes),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/participantes/{sorteio_nome}/export/pdf",
    tag = "participantes",
    params(
        ("sorteio_nome" = String, Path, description = "Campaign name"),
        GridQuery
    ),
    responses(
        (status = 200, description = "Paginated document of the filtered set"),
        (status = 500, description = "Render failure"),
        (status = 502, description = "Store failure")
    )
)]
pub async fn export_pdf(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
    query: web::Query<GridQuery>,
) -> impl Responder {
    let sorteio_nome = path.into_inner();
    let rows = match service.list_by_campaign(&sorteio_nome).await {
        Ok(rows) => rows,
        Err(e) => return e.error_response(),
    };
    let view = query.to_state().derive(&rows);

    match export::participants_to_pdf(&view.filtered, &sorteio_nome, Utc::now()) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                attachment(&export::pdf_filename(&sorteio_nome)),
            ))
            .body(bytes),
        Err(e) => e.error_response(),
    }
}

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_query_defaults() {
        let state = GridQuery::default().to_state();
        assert_eq!(state, GridState::default());
    }

    #[test]
    fn test_grid_query_maps_fields() {
        let query = GridQuery {
            filter: Some("ana".to_string()),
            sort: Some(SortColumn::NumeroSorte),
            dir: Some(SortDirection::Desc),
            page: Some(2),
            size: Some(50),
        };
        let state = query.to_state();
        assert_eq!(state.filter_text, "ana");
        assert_eq!(
            state.sort,
            Some(Sort {
                column: SortColumn::NumeroSorte,
                direction: SortDirection::Desc
            })
        );
        assert_eq!(state.page.size, 50);
        assert_eq!(state.page.index, 2);
    }

    #[test]
    fn test_sort_without_dir_defaults_to_asc() {
        let query = GridQuery {
            sort: Some(SortColumn::Nome),
            ..Default::default()
        };
        assert_eq!(
            query.to_state().sort,
            Some(Sort {
                column: SortColumn::Nome,
                direction: SortDirection::Asc
            })
        );
    }
}
