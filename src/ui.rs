use crate::chart::render_bar_chart;
use crate::config::Catalog;
use crate::errors::StoreError;
use crate::models::{RecordForm, Summary};
use std::fmt::Write;

pub const EMPTY_MESSAGE: &str = "Aún no hay actividades registradas en la planilla.";

pub enum Flash {
    Saved,
    Error(String),
}

pub fn render_index(
    catalog: &Catalog,
    form: &RecordForm,
    flash: Option<&Flash>,
    summary: &Result<Summary, StoreError>,
) -> String {
    INDEX_HTML
        .replace("{{MANAGERS}}", &render_options(&catalog.managers, &form.manager))
        .replace("{{SITE_LABEL}}", &escape_html(&catalog.site_label))
        .replace("{{ACTIVITIES}}", &render_options(&catalog.activities, &form.activity))
        .replace("{{DATE}}", &escape_html(&form.date))
        .replace("{{SITE}}", &escape_html(&form.site_code))
        .replace("{{FLASH}}", &render_flash(flash))
        .replace("{{SUMMARY}}", &render_summary(summary))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            other => out.push(other),
        }
    }
    out
}

fn render_flash(flash: Option<&Flash>) -> String {
    match flash {
        None => String::new(),
        Some(Flash::Saved) => {
            r#"<div class="notice ok">✅ Gestión registrada correctamente.</div>"#.to_string()
        }
        Some(Flash::Error(message)) => format!(
            r#"<div class="notice error">❌ {}</div>"#,
            escape_html(message)
        ),
    }
}

fn render_options(options: &[String], selected: &str) -> String {
    let mut html = String::new();
    for option in options {
        let value = escape_html(option);
        let marker = if option == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    html
}

fn render_summary(summary: &Result<Summary, StoreError>) -> String {
    let activities = match summary {
        Err(err) => {
            return format!(
                r#"<div class="notice error">⚠️ No se pudo leer la planilla: {}</div>"#,
                escape_html(&err.to_string())
            );
        }
        Ok(Summary::Empty) => {
            return format!(r#"<div class="notice info">{EMPTY_MESSAGE}</div>"#);
        }
        Ok(Summary::Ready { activities, .. }) => activities,
    };

    let mut rows = String::new();
    for row in activities {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}%</td></tr>",
            escape_html(&row.activity),
            row.count,
            row.percentage
        );
    }

    format!(
        r#"<table class="summary">
        <thead><tr><th>Actividad</th><th>Cantidad</th><th>Porcentaje</th></tr></thead>
        <tbody>{rows}</tbody>
      </table>
      <div class="chart-card">{}</div>"#,
        render_bar_chart(activities)
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>GESTIONES SAC</title>
  <style>
    :root {
      --bg: #f9f5ff;
      --ink: #2d004d;
      --muted: #4b0082;
      --accent: #7b2cbf;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(45, 0, 77, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(820px, 100%);
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      text-align: center;
      margin: 0;
    }

    .subtitle {
      text-align: center;
      color: var(--muted);
      margin: 6px 0 0;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 14px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
    }

    input, select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(45, 0, 77, 0.2);
    }

    .wide {
      grid-column: 1 / -1;
    }

    button {
      font: inherit;
      font-weight: 600;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .notice {
      border-radius: 12px;
      padding: 12px 16px;
    }

    .notice.ok {
      background: #e3f6ea;
      color: #2d7a4b;
    }

    .notice.error {
      background: #fde8e6;
      color: #c63b2b;
    }

    .notice.info {
      background: #e8eefc;
      color: #2f4858;
    }

    table.summary {
      width: 100%;
      border-collapse: collapse;
    }

    table.summary th, table.summary td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(45, 0, 77, 0.08);
    }

    .chart {
      width: 100%;
      display: block;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-label, .chart-value {
      fill: var(--ink);
      font-size: 12px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>GESTIONES SAC</h1>
      <p class="subtitle">Registro simplificado de actividades diarias de los gestores.</p>
    </header>

    {{FLASH}}

    <section class="card">
      <h2>📝 Nuevo registro de gestión</h2>
      <form method="post" action="/registros">
        <label>Fecha
          <input type="date" name="date" value="{{DATE}}" />
        </label>
        <label>Gestor
          <select name="manager">{{MANAGERS}}</select>
        </label>
        <label>{{SITE_LABEL}}
          <input type="text" name="site_code" value="{{SITE}}" />
        </label>
        <label>Actividad realizada
          <select name="activity">{{ACTIVITIES}}</select>
        </label>
        <div class="wide">
          <button type="submit">✅ Guardar gestión</button>
        </div>
      </form>
    </section>

    <section class="card">
      <h2>📊 Resumen general de actividades registradas</h2>
      {{SUMMARY}}
    </section>
  </main>
</body>
</html>
"#;
