// src/main.rs
//
// Calculatrice du tableau de bord — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//                                 ou rejeu de touches sans fenêtre (--touches)
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use eframe::egui;

mod app;
mod noyau;
mod reglages;

use app::AppCalc;
use reglages::Reglages;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    use super::{egui, AppCalc, Reglages, TITRE_APP};
    use crate::noyau::parse_sequence;

    #[derive(Parser, Debug)]
    #[command(name = "calculatrice", about = "Calculatrice scientifique (saisie par touches)")]
    pub struct Args {
        /// Rejoue des touches sans fenêtre, ex: "2 + 3 =" ou "sin ( 9 0 ) ="
        #[arg(long)]
        pub touches: Option<String>,

        /// Avec --touches : affiche l’écran après chaque touche
        #[arg(long)]
        pub trace: bool,

        /// Fichier de réglages (défaut: <config>/calculatrice_tableau/reglages.toml)
        #[arg(long)]
        pub config: Option<PathBuf>,
    }

    fn init_journal() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    /// Rejeu sans fenêtre : une ligne par touche (--trace) ou l’écran final.
    fn rejouer(app: &mut AppCalc, seq: &str, trace: bool) -> ExitCode {
        let touches = match parse_sequence(seq) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("erreur: {e}");
                return ExitCode::FAILURE;
            }
        };

        let ecrans = app.rejouer(&touches);
        if trace {
            for (t, ecran) in touches.iter().zip(&ecrans) {
                println!("{t:>4}  {ecran}");
            }
        } else {
            println!("{}", app.affichage());
        }
        ExitCode::SUCCESS
    }

    pub fn main() -> ExitCode {
        init_journal();
        let args = Args::parse();

        let chemin = args.config.clone().unwrap_or_else(Reglages::chemin_defaut);
        let reglages = Reglages::charger_ou_creer(&chemin);
        tracing::info!(chemin = %chemin.display(), ?reglages, "réglages");

        let mut app = AppCalc::new(&reglages);

        if let Some(seq) = &args.touches {
            return rejouer(&mut app, seq, args.trace);
        }

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([reglages.largeur, reglages.hauteur])
                .with_min_inner_size([320.0, 480.0]),
            ..Default::default()
        };

        let res = eframe::run_native(TITRE_APP, options, Box::new(|_cc| Ok(Box::new(app))));

        match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(erreur = %e, "fenêtre");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    natif::main()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
    // On laisse main() vide pour rester clair.
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, Reglages, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (réglages par défaut : pas de disque)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();
        let reglages = Reglages::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |_cc| Ok(Box::new(AppCalc::new(&reglages)))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
