// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Chaque bouton émet une Touche ; la vue ne touche jamais au texte
// - Clavier : caractères -> Touche::depuis_caractere ; Enter/Backspace/Escape nommés
// - Historique cliquable (rappel d’un résultat)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::touches::{Fonction, Operateur, Parenthese, Touche, PI};
use crate::noyau::Etat;

const TAILLE_BOUTON: [f32; 2] = [64.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    /// Clavier physique (global). Appelé une fois par frame depuis app.rs.
    pub fn lire_clavier(&mut self, ctx: &egui::Context) {
        let touches: Vec<Touche> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Text(s) => {
                        let mut it = s.chars();
                        match (it.next(), it.next()) {
                            (Some(c), None) => Touche::depuis_caractere(c),
                            _ => None,
                        }
                    }
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => Some(Touche::Calculer),
                        egui::Key::Backspace => Some(Touche::Retour),
                        egui::Key::Escape | egui::Key::Delete => Some(Touche::Effacer),
                        _ => None,
                    },
                    _ => None,
                })
                .collect()
        });

        for t in touches {
            self.appuyer(t);
        }
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.affichage())
                            .monospace()
                            .size(30.0),
                    );
                });
            });

        let etat = match self.tampon.etat() {
            Etat::Composition => "saisie",
            Etat::ResultatAffiche => "résultat",
        };
        ui.horizontal(|ui| {
            ui.small(etat);
            if let Some(e) = &self.derniere_erreur {
                ui.colored_label(ui.visuals().error_fg_color, e.as_str());
            }
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        use Operateur::*;

        let n = Touche::Nombre;
        let op = Touche::Operateur;
        let fonctions = Fonction::TOUTES.map(Touche::Fonction);

        let lignes: [&[Touche]; 6] = [
            &fonctions,
            &[
                Touche::Parenthese(Parenthese::Ouvrante),
                Touche::Parenthese(Parenthese::Fermante),
                n(PI),
                op(Puissance),
                Touche::Pourcent,
            ],
            &[n('7'), n('8'), n('9'), op(Divise), Touche::Retour],
            &[n('4'), n('5'), n('6'), op(Fois), Touche::Effacer],
            &[n('1'), n('2'), n('3'), op(Moins), Touche::Calculer],
            &[n('0'), Touche::Decimale, op(Plus)],
        ];

        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in lignes {
                    for t in ligne {
                        self.bouton(ui, *t);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let resp = ui
                .add_sized(TAILLE_BOUTON, egui::Button::new("AC"))
                .on_hover_text("Efface l’entrée et l’historique");
            if resp.clicked() {
                self.reset_total();
            }
        });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, touche: Touche) {
        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(touche.libelle()));
        if resp.clicked() {
            self.appuyer(touche);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("(vide)");
                    return;
                }

                let mut rappel = None;
                for (i, e) in self.historique.iter().enumerate() {
                    let texte = format!("{} = {}", e.expression, e.resultat);
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                        .on_hover_text("Rappeler ce résultat");
                    if resp.clicked() {
                        rappel = Some(i);
                    }
                }
                if let Some(i) = rappel {
                    self.rappeler(i);
                }
            });
    }
}
