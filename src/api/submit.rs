//! Submission orchestration: the POST /inicio pipeline and the festive
//! echo view
//!
//! Per-submission flow, no cross-request state:
//! extract → classify → enrich → best-effort append → render.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use super::ui::{escape_html, PAGE_STYLE};
use crate::models::{BiometricRecord, CommunityEntry};
use crate::{db, AppState, Error};

/// Fixed message shown when the classifier artifact did not load
pub const MODEL_NOT_LOADED_MESSAGE: &str = "Error: el modelo no está cargado";

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub img_url: String,
}

/// POST /inicio
///
/// Runs the whole pipeline for one submission. A vision failure renders
/// an error view (502); a missing classifier renders the fixed
/// "model not loaded" view (200, no classification attempted); a store
/// failure is logged and swallowed, the result is still shown.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Response, Error> {
    let record = match state.vision.extract(&form.img_url).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Feature extraction failed for {}: {e}", form.img_url);
            return Ok((
                StatusCode::BAD_GATEWAY,
                Html(render_error_page(&e.to_string())),
            )
                .into_response());
        }
    };

    let classifier = match state.require_classifier() {
        Ok(classifier) => classifier,
        Err(e) => {
            info!("{e}, skipping prediction");
            return Ok(Html(render_model_missing_page(&form.img_url)).into_response());
        }
    };

    // Inference errors on a loaded model are unexpected; let them
    // surface as a 500 instead of pretending the model is absent.
    let species = classifier.classify(&record)?;

    let (nickname, coordinate) = {
        let mut rng = state.rng.lock().await;
        crate::enricher::enrich(species, &mut *rng)
    };

    let entry = CommunityEntry {
        created_at: Utc::now(),
        img_url: form.img_url,
        features: record,
        species,
        nickname,
        coordinate,
    };

    // Best-effort write: the prediction is shown even when the store
    // is down or unconfigured.
    match &state.db {
        Some(pool) => {
            if let Err(e) = db::entries::append_entry(pool, &entry).await {
                warn!("Failed to persist community entry: {e}");
            }
        }
        None => {
            info!("No result store configured, skipping persist");
        }
    }

    Ok(Html(render_result_page(&entry)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct NavidadForm {
    pub nickname: String,
    pub species: String,
    pub img_url: String,
}

/// POST /navidad
///
/// Festive echo view: renders back whatever the client sent, no
/// computation and no persistence.
pub async fn navidad(Form(form): Form<NavidadForm>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Feliz Navidad</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>🎄 ¡Feliz Navidad!</h1>
    <div class="card">
        <img src="{img_url}" alt="pingüino navideño">
        <p><strong>{nickname}</strong> el pingüino {species} te desea
           unas felices fiestas desde la Antártida.</p>
    </div>
    <p><a href="/">Volver al inicio</a></p>
</body>
</html>"#,
        img_url = escape_html(&form.img_url),
        nickname = escape_html(&form.nickname),
        species = escape_html(&form.species),
    ))
}

/// The Spanish prediction sentence shown in the result view
fn prediction_sentence(entry: &CommunityEntry) -> String {
    let f = &entry.features;
    format!(
        "Para un pingüino con pico de {}mm, {}mm, aleta de {}mm, peso de {}g, \
         y de sexo {}, el modelo predice que es de la especie: {}",
        f.bill_length_mm,
        f.bill_depth_mm,
        f.flipper_length_mm,
        f.body_mass_g,
        f.sex,
        entry.species.as_str().to_uppercase(),
    )
}

fn feature_list(features: &BiometricRecord) -> String {
    format!(
        r#"<ul>
            <li>Longitud del pico: {} mm</li>
            <li>Profundidad del pico: {} mm</li>
            <li>Longitud de la aleta: {} mm</li>
            <li>Masa corporal: {} g</li>
            <li>Sexo: {}</li>
        </ul>"#,
        features.bill_length_mm,
        features.bill_depth_mm,
        features.flipper_length_mm,
        features.body_mass_g,
        if features.sex == 0 { "hembra" } else { "macho" },
    )
}

fn render_result_page(entry: &CommunityEntry) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Resultado</title>
    <style>{style}</style>
</head>
<body>
    <h1>Resultado</h1>
    <div class="card">
        <img src="{img_url}" alt="pingüino">
        <p>{sentence}</p>
        {features}
        <p><strong>{nickname}</strong> fue avistado en
           ({lat:.2}, {lon:.2}).</p>
    </div>
    <p><a href="/">Clasificar otro pingüino</a></p>
</body>
</html>"#,
        style = PAGE_STYLE,
        img_url = escape_html(&entry.img_url),
        sentence = escape_html(&prediction_sentence(entry)),
        features = feature_list(&entry.features),
        nickname = escape_html(&entry.nickname),
        lat = entry.coordinate.lat,
        lon = entry.coordinate.lon,
    )
}

fn render_model_missing_page(img_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Resultado</title>
    <style>{style}</style>
</head>
<body>
    <h1>Resultado</h1>
    <div class="card">
        <img src="{img_url}" alt="pingüino">
        <p class="error">{message}</p>
    </div>
    <p><a href="/">Volver al inicio</a></p>
</body>
</html>"#,
        style = PAGE_STYLE,
        img_url = escape_html(img_url),
        message = MODEL_NOT_LOADED_MESSAGE,
    )
}

fn render_error_page(detail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Error</title>
    <style>{style}</style>
</head>
<body>
    <h1>No se pudo clasificar</h1>
    <div class="card">
        <p class="error">El servicio de visión no pudo analizar la imagen.</p>
        <p>{detail}</p>
    </div>
    <p><a href="/">Intentar de nuevo</a></p>
</body>
</html>"#,
        style = PAGE_STYLE,
        detail = escape_html(detail),
    )
}
