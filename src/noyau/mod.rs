//! Noyau de la calculatrice (sans UI)
//!
//! Organisation interne :
//! - touches.rs  : événements de saisie (catégorie + charge, clavier, CLI)
//! - tampon.rs   : machine de saisie (tampon + drapeau résultat affiché)
//! - assainir.rs : réécriture des glyphes + liste blanche
//! - jetons.rs   : tokenisation de la forme canonique
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST f64 + valeur
//! - format.rs   : finitude, arrondi 12 chiffres, rendu décimal
//! - eval.rs     : pipeline complet
//! - erreur.rs   : erreurs typées

pub mod assainir;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod tampon;
pub mod touches;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use tampon::{Etat, Issue, Tampon};
pub use touches::{parse_sequence, Touche};
