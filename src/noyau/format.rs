// src/noyau/format.rs
//
// Normalisation + rendu décimal.
// - NaN / ±∞ : refusés (CalculInvalide)
// - arrondi à N chiffres significatifs (bruit binaire : 0.1+0.2 -> 0.3)
// - rendu positionnel uniquement (jamais "1e21") : un résultat affiché doit
//   rester une entrée valide pour la liste blanche.

use super::erreur::ErreurEval;

/// Précision par défaut (chiffres significatifs).
pub const CHIFFRES_SIGNIFICATIFS: usize = 12;

/// f64 porte ~17 chiffres significatifs ; au-delà, l’arrondi n’a pas de sens.
const CHIFFRES_MAX: usize = 17;

/// Arrondit `v` à `chiffres` significatifs (arrondi décimal correct via
/// l’écriture scientifique, pas de multiplication par 10^k).
pub fn arrondir(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let chiffres = chiffres.clamp(1, CHIFFRES_MAX);
    let sci = format!("{:.*e}", chiffres - 1, v);
    sci.parse::<f64>().unwrap_or(v)
}

/// Étape 4 : refuse le non-fini, arrondit, et efface le zéro négatif.
pub fn normaliser(v: f64, chiffres: usize) -> Result<f64, ErreurEval> {
    if !v.is_finite() {
        return Err(ErreurEval::CalculInvalide);
    }
    let r = arrondir(v, chiffres);
    // -0 -> 0 (affichage "0", pas "-0")
    Ok(if r == 0.0 { 0.0 } else { r })
}

/// Rendu décimal positionnel (le plus court qui relit la même valeur).
pub fn rendre(v: f64) -> String {
    format!("{v}")
}
