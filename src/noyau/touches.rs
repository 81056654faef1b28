// src/noyau/touches.rs
//
// Touches discrètes (événements de saisie).
// Trois entrées :
// - depuis_evenement : catégorie sémantique + charge ("number", "7")
// - from_str         : forme textuelle courte (rejeu CLI : "sin", "=", "DEL"…)
// - depuis_caractere : clavier physique (un caractère tapé)

use std::fmt;
use std::str::FromStr;

use super::erreur::ErreurTouche;

/// Glyphe de la constante π (seule constante du pavé).
pub const PI: char = 'π';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Operateur {
    #[cfg(test)]
    pub const TOUS: [Operateur; 5] = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
        Operateur::Puissance,
    ];

    /// Glyphe écrit dans le tampon.
    pub fn glyphe(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '×',
            Operateur::Divise => '÷',
            Operateur::Puissance => '^',
        }
    }

    /// Reconnaît un glyphe du tampon ou son équivalent ASCII.
    pub fn depuis_glyphe(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' | '−' => Some(Operateur::Moins),
            '×' | '*' => Some(Operateur::Fois),
            '÷' | '/' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Racine,
}

impl Fonction {
    /// Ordre de la rangée de fonctions du pavé.
    pub const TOUTES: [Fonction; 5] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Racine,
    ];

    /// Nom affiché (avant la parenthèse ouvrante).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Racine => "√",
        }
    }

    fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "log" => Some(Fonction::Log),
            "√" | "sqrt" => Some(Fonction::Racine),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parenthese {
    Ouvrante,
    Fermante,
}

impl Parenthese {
    pub fn glyphe(self) -> char {
        match self {
            Parenthese::Ouvrante => '(',
            Parenthese::Fermante => ')',
        }
    }
}

/// Une touche du pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// Chiffre 0-9 ou constante π.
    Nombre(char),
    Operateur(Operateur),
    Fonction(Fonction),
    Parenthese(Parenthese),
    Decimale,
    Effacer,
    Retour,
    Pourcent,
    Calculer,
}

fn est_nombre(c: char) -> bool {
    c.is_ascii_digit() || c == PI
}

/// Un seul caractère, sinon None.
fn caractere_unique(s: &str) -> Option<char> {
    let mut it = s.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl Touche {
    /// Interface d’événements : catégorie sémantique + charge éventuelle.
    pub fn depuis_evenement(categorie: &str, charge: Option<&str>) -> Result<Self, ErreurTouche> {
        fn exige<'a>(cat: &'static str, charge: Option<&'a str>) -> Result<&'a str, ErreurTouche> {
            charge
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or(ErreurTouche::ChargeManquante(cat))
        }
        fn invalide(cat: &'static str, charge: &str) -> ErreurTouche {
            ErreurTouche::ChargeInvalide {
                categorie: cat,
                charge: charge.to_string(),
            }
        }

        match categorie {
            "number" => {
                let c = exige("number", charge)?;
                match caractere_unique(c) {
                    Some(ch) if est_nombre(ch) => Ok(Touche::Nombre(ch)),
                    _ if c.eq_ignore_ascii_case("pi") => Ok(Touche::Nombre(PI)),
                    _ => Err(invalide("number", c)),
                }
            }
            "operator" => {
                let c = exige("operator", charge)?;
                caractere_unique(c)
                    .and_then(Operateur::depuis_glyphe)
                    .map(Touche::Operateur)
                    .ok_or_else(|| invalide("operator", c))
            }
            "function" => {
                let c = exige("function", charge)?;
                Fonction::depuis_nom(c)
                    .map(Touche::Fonction)
                    .ok_or_else(|| invalide("function", c))
            }
            "parenthesis" => {
                let c = exige("parenthesis", charge)?;
                match c {
                    "(" => Ok(Touche::Parenthese(Parenthese::Ouvrante)),
                    ")" => Ok(Touche::Parenthese(Parenthese::Fermante)),
                    _ => Err(invalide("parenthesis", c)),
                }
            }
            "decimal" => Ok(Touche::Decimale),
            "clear" => Ok(Touche::Effacer),
            "backspace" => Ok(Touche::Retour),
            "percent" => Ok(Touche::Pourcent),
            "calculate" => Ok(Touche::Calculer),
            autre => Err(ErreurTouche::CategorieInconnue(autre.to_string())),
        }
    }

    /// Clavier physique : un caractère tapé -> touche (ou rien).
    /// Entrée / Retour arrière / Échap sont gérés par la vue (touches nommées).
    pub fn depuis_caractere(c: char) -> Option<Self> {
        match c {
            _ if est_nombre(c) => Some(Touche::Nombre(c)),
            'p' | 'P' => Some(Touche::Nombre(PI)),
            'x' | 'X' => Some(Touche::Operateur(Operateur::Fois)),
            '.' | ',' => Some(Touche::Decimale),
            '(' => Some(Touche::Parenthese(Parenthese::Ouvrante)),
            ')' => Some(Touche::Parenthese(Parenthese::Fermante)),
            '%' => Some(Touche::Pourcent),
            '=' => Some(Touche::Calculer),
            's' => Some(Touche::Fonction(Fonction::Sin)),
            'c' => Some(Touche::Fonction(Fonction::Cos)),
            't' => Some(Touche::Fonction(Fonction::Tan)),
            'l' => Some(Touche::Fonction(Fonction::Log)),
            'r' | '√' => Some(Touche::Fonction(Fonction::Racine)),
            _ => Operateur::depuis_glyphe(c).map(Touche::Operateur),
        }
    }

    /// Libellé de bouton (pavé).
    pub fn libelle(self) -> String {
        match self {
            Touche::Nombre(c) => c.to_string(),
            Touche::Operateur(op) => op.glyphe().to_string(),
            Touche::Fonction(f) => f.nom().to_string(),
            Touche::Parenthese(p) => p.glyphe().to_string(),
            Touche::Decimale => ".".into(),
            Touche::Effacer => "C".into(),
            Touche::Retour => "DEL".into(),
            Touche::Pourcent => "%".into(),
            Touche::Calculer => "=".into(),
        }
    }
}

impl fmt::Display for Touche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.libelle())
    }
}

/// Forme textuelle courte (CLI) : "7", "pi", "×", "sqrt", "(", ".", "C", "DEL", "%", "=".
impl FromStr for Touche {
    type Err = ErreurTouche;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mot = s.to_ascii_lowercase();

        let touche = match mot.as_str() {
            "c" | "clear" | "ac" => Some(Touche::Effacer),
            "del" | "back" | "backspace" | "⌫" => Some(Touche::Retour),
            "=" | "calc" | "calculate" => Some(Touche::Calculer),
            "%" => Some(Touche::Pourcent),
            "." => Some(Touche::Decimale),
            "pi" => Some(Touche::Nombre(PI)),
            _ => Fonction::depuis_nom(&mot).map(Touche::Fonction),
        };
        if let Some(t) = touche {
            return Ok(t);
        }

        match caractere_unique(s) {
            Some(c) if est_nombre(c) => Ok(Touche::Nombre(c)),
            Some('(') => Ok(Touche::Parenthese(Parenthese::Ouvrante)),
            Some(')') => Ok(Touche::Parenthese(Parenthese::Fermante)),
            Some(c) => Operateur::depuis_glyphe(c)
                .map(Touche::Operateur)
                .ok_or_else(|| ErreurTouche::Inconnue(s.to_string())),
            None => Err(ErreurTouche::Inconnue(s.to_string())),
        }
    }
}

/// Découpe une séquence "2 + 3 =" en touches.
/// Les nombres collés ("50") sont éclatés chiffre par chiffre.
pub fn parse_sequence(s: &str) -> Result<Vec<Touche>, ErreurTouche> {
    let mut out = Vec::new();
    for mot in s.split_whitespace() {
        if mot.chars().count() > 1 && mot.chars().all(|c| c.is_ascii_digit() || c == '.') {
            for c in mot.chars() {
                out.push(if c == '.' {
                    Touche::Decimale
                } else {
                    Touche::Nombre(c)
                });
            }
            continue;
        }
        out.push(mot.parse()?);
    }
    Ok(out)
}
