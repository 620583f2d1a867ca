// src/main.rs
//
// Calculatrice RPN : fenêtre native (eframe) ou canvas web (wasm32).
// Le web attend <canvas id="the_canvas_id"> dans index.html.

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

const TITRE_APP: &str = "Calculatrice RPN";

/// Même état de départ sur les deux cibles : précision par défaut, historique vide, `ans` = 0.
fn creer_app(
    _cc: &eframe::CreationContext<'_>,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    let app = AppCalc::default();
    log::info!(
        "{TITRE_APP} prête ({} décimales, historique de {} lignes)",
        app.digits,
        app::etat::HISTORIQUE_MAX
    );
    Ok(Box::new(app))
}

/// Clavier + historique : la fenêtre est plus haute que large.
#[cfg(not(target_arch = "wasm32"))]
fn options_natives() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([380.0, 560.0]),
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    // RUST_LOG=calculatrice_rpn=debug pour voir les échecs d’évaluation
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    eframe::run_native(TITRE_APP, options_natives(), Box::new(creer_app))
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{creer_app, TITRE_APP};

    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    const CANVAS_ID: &str = "the_canvas_id";

    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document indisponible"))?;
        document.set_title(TITRE_APP);

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| JsValue::from_str("pas de <canvas id=\"the_canvas_id\">"))?;

        eframe::WebRunner::new()
            .start(canvas, eframe::WebOptions::default(), Box::new(creer_app))
            .await
    }
}
