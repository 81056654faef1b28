// src/noyau/jetons.rs
//
// Tokenisation de la forme CANONIQUE (déjà passée par la liste blanche).
// Rien ici n’accepte plus que la liste blanche : un caractère inattendu
// reste une erreur (défense en profondeur).

use super::erreur::ErreurEval;
use super::expr::FonctionMath;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Fonction unaire ; le jeton suivant est toujours LPar.
    Fonction(FonctionMath),

    Plus,
    Minus,
    Star,
    Slash,
    Pow, // **

    LPar,
    RPar,
}

/// Tokenize une chaîne canonique en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, 3., .25)
/// - opérateurs + - * / et ** (puissance)
/// - parenthèses ( )
/// - PI
/// - sqrt( sin( cos( tan( log10(  (nom collé à la parenthèse)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        // Mots : PI ou nom de fonction collé à "("
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            if word == "PI" {
                out.push(Tok::Pi);
                continue;
            }

            let f = FonctionMath::depuis_nom(&word)
                .ok_or_else(|| ErreurEval::calcul(format!("identifiant inconnu: {word}")))?;
            if chars.get(i) != Some(&'(') {
                return Err(ErreurEval::calcul(format!("{word} sans parenthèse")));
            }
            out.push(Tok::Fonction(f));
            continue;
        }

        // Nombre : [0-9]+(.[0-9]*)? | .[0-9]+
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            if txt == "." {
                return Err(ErreurEval::calcul("point décimal isolé"));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEval::calcul(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::calcul(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "PI".to_string(),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Pow => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
