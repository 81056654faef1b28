// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Précédences (haut -> bas) :
//   **  (associatif à droite)
//   moins/plus unaires (préfixes)
//   * /
//   + -
//
// Règles:
// - '-' ou '+' en position d’opérande (pas de valeur avant) => unaire.
//   Le plus unaire est l’identité : il n’est pas émis.
// - Les fonctions sont empilées et sorties après leur parenthèse fermante.
// - Pas de multiplication implicite : deux valeurs collées => erreur.

use super::erreur::ErreurEval;
use super::expr::{Expr, FonctionMath};
use super::jetons::Tok;

/// Jeton de la pile d’opérateurs / de la sortie RPN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Pi,
    Neg,
    Fonction(FonctionMath),
    Binaire(Binaire),
    // Pile seulement (jamais en sortie)
    LPar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

const PREC_NEG: i32 = 3;

fn precedence(op: &Rpn) -> i32 {
    match op {
        Rpn::Binaire(Binaire::Add | Binaire::Sub) => 1,
        Rpn::Binaire(Binaire::Mul | Binaire::Div) => 2,
        Rpn::Neg => PREC_NEG,
        Rpn::Binaire(Binaire::Pow) => 4,
        _ => 0,
    }
}

fn is_right_associative(op: Binaire) -> bool {
    matches!(op, Binaire::Pow)
}

fn binaire(t: &Tok) -> Option<Binaire> {
    match t {
        Tok::Plus => Some(Binaire::Add),
        Tok::Minus => Some(Binaire::Sub),
        Tok::Star => Some(Binaire::Mul),
        Tok::Slash => Some(Binaire::Div),
        Tok::Pow => Some(Binaire::Pow),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Binaire(Div), Fonction(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Rpn> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les opérateurs unaires et les valeurs collées.
    let mut prev_was_value = false;

    for tok in tokens.iter() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                if prev_was_value {
                    return Err(ErreurEval::calcul("opérateur manquant entre deux valeurs"));
                }
                out.push(match tok {
                    Tok::Num(v) => Rpn::Num(*v),
                    _ => Rpn::Pi,
                });
                prev_was_value = true;
            }

            Tok::Fonction(f) => {
                if prev_was_value {
                    return Err(ErreurEval::calcul("opérateur manquant avant une fonction"));
                }
                // fonction : reste sur la pile (sort après son argument)
                ops.push(Rpn::Fonction(*f));
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurEval::calcul("opérateur manquant avant '('"));
                }
                ops.push(Rpn::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::calcul("parenthèse vide ou opérande manquant"));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Rpn::LPar) => break,
                        Some(op) => out.push(op),
                        None => return Err(ErreurEval::calcul("parenthèse fermante sans ouvrante")),
                    }
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Rpn::Fonction(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(Rpn::Fonction(f));
                }

                prev_was_value = true;
            }

            // unaires (position d’opérande)
            Tok::Minus if !prev_was_value => ops.push(Rpn::Neg),
            Tok::Plus if !prev_was_value => {}

            _ => {
                let op = binaire(tok).ok_or_else(|| ErreurEval::calcul("jeton inattendu"))?;
                if !prev_was_value {
                    return Err(ErreurEval::calcul("opérande manquant"));
                }
                let courant = Rpn::Binaire(op);

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Rpn::LPar | Rpn::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&courant);

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(o) = ops.pop() {
                        out.push(o);
                    }
                }

                ops.push(courant);
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurEval::calcul("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Rpn::LPar | Rpn::Fonction(_)) {
            return Err(ErreurEval::calcul("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurEval> {
    let invalide = || ErreurEval::calcul("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().copied() {
        match tok {
            Rpn::Num(v) => st.push(Expr::Num(v)),
            Rpn::Pi => st.push(Expr::Pi),

            Rpn::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Rpn::Fonction(f) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurEval::calcul("fonction sans argument"))?;
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Rpn::Binaire(op) => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                st.push(match op {
                    Binaire::Add => Expr::Add(a, b),
                    Binaire::Sub => Expr::Sub(a, b),
                    Binaire::Mul => Expr::Mul(a, b),
                    Binaire::Div => Expr::Div(a, b),
                    Binaire::Pow => Expr::Pow(a, b),
                });
            }

            Rpn::LPar => return Err(ErreurEval::calcul("parenthèse inattendue en RPN")),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}

/// Format utilitaire (journal).
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|t| match t {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Pi => "PI".to_string(),
            Rpn::Neg => "neg".to_string(),
            Rpn::Fonction(f) => f.nom().to_string(),
            Rpn::Binaire(Binaire::Add) => "+".to_string(),
            Rpn::Binaire(Binaire::Sub) => "-".to_string(),
            Rpn::Binaire(Binaire::Mul) => "*".to_string(),
            Rpn::Binaire(Binaire::Div) => "/".to_string(),
            Rpn::Binaire(Binaire::Pow) => "**".to_string(),
            Rpn::LPar => "(".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
