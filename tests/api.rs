use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use gestiones_sac::records::COLUMNS;
use gestiones_sac::sheet::MemorySheet;
use gestiones_sac::{router, AppState, Catalog};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, Arc<MemorySheet>) {
    let sheet = Arc::new(MemorySheet::new(&COLUMNS));
    let state = AppState::new(sheet.clone(), Catalog::default());
    (router(state), sheet)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn record(date: &str, manager: &str, site: &str, activity: &str) -> Value {
    json!({ "date": date, "manager": manager, "site_code": site, "activity": activity })
}

#[tokio::test]
async fn summary_of_empty_sheet_is_empty_state() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary, json!({ "state": "empty" }));

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(gestiones_sac::ui::EMPTY_MESSAGE));
    assert!(!html.contains("<table"));
}

#[tokio::test]
async fn api_append_then_summarize() {
    let (app, sheet) = app();

    for payload in [
        record("2024-01-01", "A", "SITE1", "TSS"),
        record("2024-01-02", "B", "SITE2", "TSS"),
        record("2024-01-03", "A", "SITE3", "SERVIDUMBRE"),
    ] {
        let (status, _) = send(&app, post_json("/api/records", payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(sheet.raw_rows().await.len(), 3);

    let (status, body) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        summary,
        json!({
            "state": "ready",
            "total": 3,
            "activities": [
                { "activity": "TSS", "count": 2, "percentage": 67 },
                { "activity": "SERVIDUMBRE", "count": 1, "percentage": 33 }
            ]
        })
    );

    let (_, body) = send(&app, get("/api/records")).await;
    let records: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(records[2]["site_code"], "SITE3");
    assert_eq!(records[2]["date"], "2024-01-03");
}

#[tokio::test]
async fn api_rejects_blank_site_code() {
    let (app, sheet) = app();

    let (status, body) = send(
        &app,
        post_json("/api/records", record("2024-01-01", "Hernán Aguilera", "  ", "TSS")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "site code required");
    assert!(sheet.raw_rows().await.is_empty());
}

#[tokio::test]
async fn form_submission_redirects_after_append() {
    let (app, sheet) = app();

    let (status, _) = send(
        &app,
        post_form(
            "/registros",
            "date=2024-01-01&manager=Felipe+Camus&site_code=+SITE1+&activity=TSS",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        sheet.raw_rows().await,
        vec![vec![
            "2024-01-01".to_string(),
            "Felipe Camus".to_string(),
            "SITE1".to_string(),
            "TSS".to_string(),
        ]]
    );

    let (_, body) = send(&app, get("/?saved=1")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Gestión registrada correctamente"));
    assert!(html.contains("<td>TSS</td><td>1</td><td>100%</td>"));
}

#[tokio::test]
async fn invalid_form_keeps_entered_values() {
    let (app, sheet) = app();

    let (status, body) = send(
        &app,
        post_form(
            "/registros",
            "date=2024-02-03&manager=Manuel+Araus&site_code=++&activity=INGRESO+DOM",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Debes ingresar el código subtel."));
    assert!(html.contains(r#"<option value="Manuel Araus" selected>"#));
    assert!(html.contains(r#"<option value="INGRESO DOM" selected>"#));
    assert!(html.contains(r#"value="2024-02-03""#));
    assert!(sheet.raw_rows().await.is_empty());
}

#[tokio::test]
async fn placeholder_text_in_form_input_is_not_expanded() {
    let (app, sheet) = app();

    let (status, body) = send(
        &app,
        post_form(
            "/registros",
            "date=ayer&manager=Felipe+Camus&site_code=%7B%7BSUMMARY%7D%7D&activity=TSS",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Fecha inválida (AAAA-MM-DD)."));
    assert!(html.contains(r#"value="&#123;&#123;SUMMARY}}""#));
    assert!(!html.contains("{{SUMMARY}}"));
    assert_eq!(html.matches(gestiones_sac::ui::EMPTY_MESSAGE).count(), 1);
    assert!(sheet.raw_rows().await.is_empty());
}

#[tokio::test]
async fn store_outage_is_reported_and_service_recovers() {
    let (app, sheet) = app();
    sheet.set_unavailable(true);

    let (status, _) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No se pudo leer la planilla"));
    assert!(!html.contains(gestiones_sac::ui::EMPTY_MESSAGE));

    let (status, body) = send(
        &app,
        post_form("/registros", "date=&manager=A&site_code=SITE1&activity=TSS"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Ocurrió un error al guardar la gestión"));
    assert!(html.contains(r#"value="SITE1""#));

    sheet.set_unavailable(false);
    let (status, _) = send(&app, post_json("/api/records", record("2024-01-01", "A", "SITE1", "TSS"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sheet.raw_rows().await.len(), 1);
}

#[tokio::test]
async fn catalog_is_served_as_configured() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/catalog")).await;
    assert_eq!(status, StatusCode::OK);
    let catalog: Catalog = serde_json::from_slice(&body).unwrap();
    assert_eq!(catalog, Catalog::default());
}
