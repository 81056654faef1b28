// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// Les trois genres d’ErreurEval sont récupérés localement par la machine
// de saisie : l’affichage devient "Error", jamais de panique.

use thiserror::Error;

/// Échec d’évaluation (jamais partiellement valide).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    /// Des caractères hors liste blanche ont survécu à l’assainissement.
    #[error("expression invalide : caractères non autorisés {residu:?}")]
    ExpressionInvalide { residu: String },

    /// Le calcul a produit NaN ou ±∞ (ex: division par zéro).
    #[error("calcul invalide : résultat non fini")]
    CalculInvalide,

    /// Échec du moteur (parenthèses mal imbriquées, opérande manquant…).
    #[error("erreur de calcul : {0}")]
    ErreurCalcul(String),
}

impl ErreurEval {
    pub(crate) fn calcul(msg: impl Into<String>) -> Self {
        Self::ErreurCalcul(msg.into())
    }
}

/// Événement clavier mal formé (interface des touches).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurTouche {
    #[error("catégorie de touche inconnue : {0:?}")]
    CategorieInconnue(String),

    #[error("charge manquante pour la catégorie {0:?}")]
    ChargeManquante(&'static str),

    #[error("charge {charge:?} invalide pour la catégorie {categorie:?}")]
    ChargeInvalide {
        categorie: &'static str,
        charge: String,
    },

    #[error("touche inconnue : {0:?}")]
    Inconnue(String),
}
