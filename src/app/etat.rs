//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder le tampon de la calculatrice (une seule instance, jamais
//! partagée) + l’historique des résultats, et offrir les actions des boutons.
//!
//! Contrats :
//! - Toute saisie passe par Tampon::appliquer (aucune édition directe du texte).
//! - L’historique ne garde que les évaluations réussies, le plus récent en tête.
//! - Défense en profondeur : historique borné.

use std::collections::VecDeque;

use crate::noyau::format::rendre;
use crate::noyau::{Issue, Tampon, Touche};
use crate::reglages::{Reglages, HISTORIQUE_MAX};

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- saisie ---
    pub tampon: Tampon,

    // --- historique (plus récent en tête) ---
    pub historique: VecDeque<EntreeHistorique>,
    pub historique_max: usize,

    // --- dernière erreur (info-bulle sous l’affichage) ---
    pub derniere_erreur: Option<String>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: &Reglages) -> Self {
        Self {
            tampon: Tampon::new(),
            historique: VecDeque::new(),
            historique_max: reglages.historique_max.min(HISTORIQUE_MAX),
            derniere_erreur: None,
        }
    }

    /// Texte à afficher (verbatim).
    pub fn affichage(&self) -> &str {
        self.tampon.texte()
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Une touche du pavé ou du clavier.
    pub fn appuyer(&mut self, touche: Touche) {
        match self.tampon.appliquer(touche) {
            Issue::Resultat { expression, valeur } => {
                self.derniere_erreur = None;
                self.memoriser(expression, rendre(valeur));
            }
            Issue::Echec(e) => self.derniere_erreur = Some(e.to_string()),
            Issue::Acceptee => self.derniere_erreur = None,
            Issue::Refusee => {}
        }
    }

    /// Rejoue une suite de touches ; renvoie l’affichage après chacune.
    pub fn rejouer(&mut self, touches: &[Touche]) -> Vec<String> {
        touches
            .iter()
            .map(|t| {
                self.appuyer(*t);
                self.affichage().to_string()
            })
            .collect()
    }

    /// Rappel d’un résultat de l’historique : nouvel affichage "résultat".
    pub fn rappeler(&mut self, index: usize) {
        if let Some(e) = self.historique.get(index) {
            self.tampon = Tampon::avec_resultat(e.resultat.clone());
            self.derniere_erreur = None;
        }
    }

    /// AC : remise à zéro totale (tampon + historique).
    pub fn reset_total(&mut self) {
        self.tampon = Tampon::new();
        self.historique.clear();
        self.derniere_erreur = None;
    }

    fn memoriser(&mut self, expression: String, resultat: String) {
        if self.historique_max == 0 {
            return;
        }
        self.historique.push_front(EntreeHistorique {
            expression,
            resultat,
        });
        self.historique.truncate(self.historique_max);
    }
}
