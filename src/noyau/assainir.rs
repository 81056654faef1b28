// src/noyau/assainir.rs
//
// Assainissement : réécriture des glyphes + liste blanche.
//
// Contrat :
// - reecrire() : un seul balayage linéaire, table fixe, jamais de re-scan
//   de la sortie (pas de chevauchement possible).
// - valider()  : liste BLANCHE (pas noire). On efface d’une copie tout ce qui
//   est permis ; s’il reste un seul caractère, l’expression est refusée
//   avant toute évaluation.

use std::sync::OnceLock;

use regex::Regex;

use super::erreur::ErreurEval;

/// Table de réécriture (glyphe -> forme canonique), essayée dans l’ordre.
/// "log10" se réécrit en lui-même pour ne pas devenir "log1010".
const REECRITURES: &[(&str, &str)] = &[
    ("×", "*"),
    ("÷", "/"),
    ("−", "-"),
    ("√", "sqrt"),
    ("π", "PI"),
    ("^", "**"),
    ("log10", "log10"),
    ("log", "log10"),
];

/// Liste blanche : nombres, 4 opérateurs, puissance, parenthèses, espaces,
/// appels de fonctions fermés (nom collé à "(") et la constante PI.
fn liste_blanche() -> &'static Regex {
    static LISTE: OnceLock<Regex> = OnceLock::new();
    LISTE.get_or_init(|| {
        Regex::new(r"(?:sqrt|sin|cos|tan|log10)\(|PI|\*\*|[0-9]+(?:\.[0-9]*)?|\.[0-9]+|[-+*/()\s]")
            .expect("regex liste blanche")
    })
}

/// Étape 1 : glyphes de la calculatrice -> jetons arithmétiques canoniques.
pub fn reecrire(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut reste = s;

    'scan: while let Some(c) = reste.chars().next() {
        for &(glyphe, canon) in REECRITURES {
            if let Some(apres) = reste.strip_prefix(glyphe) {
                out.push_str(canon);
                reste = apres;
                continue 'scan;
            }
        }
        out.push(c);
        reste = &reste[c.len_utf8()..];
    }

    out
}

/// Étape 2 : refuse tout ce qui n’est pas explicitement permis.
pub fn valider(canon: &str) -> Result<(), ErreurEval> {
    let residu = liste_blanche().replace_all(canon, "");
    if residu.is_empty() {
        Ok(())
    } else {
        tracing::debug!(%residu, "liste blanche : résidu refusé");
        Err(ErreurEval::ExpressionInvalide {
            residu: residu.into_owned(),
        })
    }
}

/// Réécriture + validation. Renvoie la forme canonique validée.
pub fn assainir(s: &str) -> Result<String, ErreurEval> {
    let canon = reecrire(s);
    valider(&canon)?;
    Ok(canon)
}
