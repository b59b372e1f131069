use crate::config::Catalog;
use crate::errors::{AppError, RecordError};
use crate::models::{ActivityRecord, IndexQuery, NewRecord, RecordForm, Summary};
use crate::records::parse_sheet_date;
use crate::state::AppState;
use crate::stats::summarize;
use crate::ui::{render_index, Flash};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use tracing::error;

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let flash = query.saved.filter(|saved| *saved == 1).map(|_| Flash::Saved);
    let form = blank_form(&state.catalog);
    Html(render_page(&state, &form, flash.as_ref()).await)
}

pub async fn submit_form(State(state): State<AppState>, Form(form): Form<RecordForm>) -> Response {
    let record = match form_to_record(&form) {
        Ok(record) => record,
        Err(err) => return failed_submission(&state, &form, err).await,
    };

    match state.records.append(record).await {
        Ok(_) => Redirect::to("/?saved=1").into_response(),
        Err(err) => failed_submission(&state, &form, err).await,
    }
}

pub async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<ActivityRecord>>, AppError> {
    Ok(Json(state.records.fetch_all().await?))
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<NewRecord>,
) -> Result<(StatusCode, Json<ActivityRecord>), AppError> {
    let record = state.records.append(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    let records = state.records.fetch_all().await?;
    Ok(Json(summarize(&records)))
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

async fn render_page(state: &AppState, form: &RecordForm, flash: Option<&Flash>) -> String {
    let summary = state.records.fetch_all().await.map(|records| summarize(&records));
    if let Err(err) = &summary {
        error!(error = %err, "failed to read sheet for summary");
    }
    render_index(&state.catalog, form, flash, &summary)
}

/// Renders the page again with the user's input and the error inline.
async fn failed_submission(state: &AppState, form: &RecordForm, err: RecordError) -> Response {
    let status = match &err {
        RecordError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecordError::Store(store) => {
            error!(error = %store, "failed to append record");
            StatusCode::BAD_GATEWAY
        }
    };
    let message = match &err {
        RecordError::Validation(_) if form.site_code.trim().is_empty() => {
            format!("Debes ingresar el {}.", state.catalog.site_label.to_lowercase())
        }
        RecordError::Validation(message) => message.clone(),
        RecordError::Store(store) => format!("Ocurrió un error al guardar la gestión: {store}"),
    };
    let flash = Flash::Error(message);
    (status, Html(render_page(state, form, Some(&flash)).await)).into_response()
}

fn form_to_record(form: &RecordForm) -> Result<NewRecord, RecordError> {
    let date = match form.date.trim() {
        "" => None,
        raw => Some(
            parse_sheet_date(raw)
                .ok_or_else(|| RecordError::validation("Fecha inválida (AAAA-MM-DD)."))?,
        ),
    };
    Ok(NewRecord {
        date,
        manager: form.manager.clone(),
        site_code: form.site_code.clone(),
        activity: form.activity.clone(),
    })
}

fn blank_form(catalog: &Catalog) -> RecordForm {
    RecordForm {
        date: Local::now().date_naive().to_string(),
        manager: catalog.managers.first().cloned().unwrap_or_default(),
        site_code: String::new(),
        activity: catalog.activities.first().cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn form_date_is_optional_but_must_parse() {
        let mut form = RecordForm {
            date: String::new(),
            manager: "A".to_string(),
            site_code: "S1".to_string(),
            activity: "TSS".to_string(),
        };
        assert_eq!(form_to_record(&form).unwrap().date, None);

        form.date = "2024-05-06".to_string();
        assert_eq!(form_to_record(&form).unwrap().date, NaiveDate::from_ymd_opt(2024, 5, 6));

        form.date = "mañana".to_string();
        let err = form_to_record(&form).unwrap_err();
        assert!(matches!(err, RecordError::Validation(_)));
        assert_eq!(err.to_string(), "Fecha inválida (AAAA-MM-DD).");
    }
}
