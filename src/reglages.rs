//! src/reglages.rs
//!
//! Réglages persistés (TOML) : taille de fenêtre + taille de l’historique.
//!
//! Contrats :
//! - fichier absent => défauts (rien n’est écrit tant qu’on ne sauve pas)
//! - fichier illisible => erreur typée ; l’appelant retombe sur les défauts
//! - bornes appliquées après lecture (un TOML édité à la main ne peut pas
//!   demander un historique démesuré)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garde-fou : on borne l’historique (anti-abus).
pub const HISTORIQUE_MAX: usize = 200;

const NOM_APP: &str = "calculatrice_tableau";
const NOM_FICHIER: &str = "reglages.toml";

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture/écriture de {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML invalide dans {chemin}: {source}")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("sérialisation TOML: {0}")]
    Ecriture(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Nombre d’entrées gardées dans l’historique (0 = désactivé).
    pub historique_max: usize,
    pub largeur: f32,
    pub hauteur: f32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            historique_max: 20,
            largeur: 420.0,
            hauteur: 640.0,
        }
    }
}

impl Reglages {
    /// Chemin par défaut : <config>/calculatrice_tableau/reglages.toml
    #[cfg(not(target_arch = "wasm32"))]
    pub fn chemin_defaut() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(NOM_APP)
            .join(NOM_FICHIER)
    }

    /// Parse + bornes.
    pub fn depuis_toml(contenu: &str, chemin: &Path) -> Result<Self, ErreurReglages> {
        let r: Reglages = toml::from_str(contenu).map_err(|source| ErreurReglages::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        Ok(r.borne())
    }

    pub fn charger(chemin: &Path) -> Result<Self, ErreurReglages> {
        if !chemin.exists() {
            tracing::info!(chemin = %chemin.display(), "réglages absents : défauts");
            return Ok(Self::default());
        }
        let contenu = std::fs::read_to_string(chemin).map_err(|source| ErreurReglages::Io {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        Self::depuis_toml(&contenu, chemin)
    }

    /// Charge ou retombe sur les défauts (avec avertissement).
    pub fn charger_ou_defaut(chemin: &Path) -> Self {
        Self::charger(chemin).unwrap_or_else(|e| {
            tracing::warn!(erreur = %e, "réglages ignorés");
            Self::default()
        })
    }

    /// Comme `charger_ou_defaut`, mais un fichier absent est créé avec les
    /// défauts pour que l’utilisateur ait un modèle à éditer.
    pub fn charger_ou_creer(chemin: &Path) -> Self {
        if chemin.exists() {
            return Self::charger_ou_defaut(chemin);
        }
        let r = Self::default();
        match r.sauver(chemin) {
            Ok(()) => tracing::info!(chemin = %chemin.display(), "réglages créés"),
            Err(e) => tracing::warn!(erreur = %e, "réglages non écrits"),
        }
        r
    }

    pub fn sauver(&self, chemin: &Path) -> Result<(), ErreurReglages> {
        let io = |source| ErreurReglages::Io {
            chemin: chemin.to_path_buf(),
            source,
        };
        if let Some(parent) = chemin.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let contenu = toml::to_string(self)?;
        std::fs::write(chemin, contenu).map_err(io)?;
        Ok(())
    }

    fn borne(mut self) -> Self {
        let d = Self::default();
        self.historique_max = self.historique_max.min(HISTORIQUE_MAX);
        if !(self.largeur.is_finite() && self.largeur >= 200.0) {
            self.largeur = d.largeur;
        }
        if !(self.hauteur.is_finite() && self.hauteur >= 300.0) {
            self.hauteur = d.hauteur;
        }
        self
    }
}
