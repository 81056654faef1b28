//! Noyau — évaluation (pipeline réel)
//!
//! réécriture -> liste blanche -> jetons -> RPN -> Expr -> valeur -> normalisation
//!
//! Aucune étape n’exécute de code dynamique : la grammaire acceptée par
//! to_rpn/from_rpn est un sous-ensemble strict de la liste blanche.

use super::assainir::assainir;
use super::erreur::ErreurEval;
use super::format::{normaliser, CHIFFRES_SIGNIFICATIFS};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Garde-fou : au-delà, l’arbre deviendrait trop profond pour la récursion.
const MAX_JETONS: usize = 4096;

/// API publique : évalue un tampon (glyphes compris) à 12 chiffres significatifs.
pub fn evaluer(texte: &str) -> Result<f64, ErreurEval> {
    evaluer_avec(texte, CHIFFRES_SIGNIFICATIFS)
}

/// Idem, précision explicite.
pub fn evaluer_avec(texte: &str, chiffres: usize) -> Result<f64, ErreurEval> {
    // 1-2) Réécriture + liste blanche (rien ne passe sans être permis)
    let canon = assainir(texte)?;

    // 3) Jetons
    let jetons = tokenize(&canon)?;
    if jetons.len() > MAX_JETONS {
        return Err(ErreurEval::calcul("expression trop longue"));
    }

    // 3b) RPN puis AST
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;

    tracing::trace!(
        canon = %canon,
        jetons = %format_tokens(&jetons),
        rpn = %format_rpn(&rpn),
        ast = %expr,
        "pipeline d’évaluation"
    );

    // 4) Valeur + normalisation
    normaliser(expr.valeur(), chiffres)
}
