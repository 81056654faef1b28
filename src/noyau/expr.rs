// src/noyau/expr.rs
//
// AST numérique (f64).
// - Num : littéral décimal
// - Pi  : constante π
// - Neg : moins unaire
// - Appel : fonction unaire fermée (sqrt, sin, cos, tan, log10)
//
// La valeur peut être NaN/±∞ : c’est format::normaliser() qui tranche,
// pas l’AST.

use std::f64::consts::PI;
use std::fmt;

/// Fonctions unaires permises (ensemble fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionMath {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Log10,
}

impl FonctionMath {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sqrt" => Some(FonctionMath::Sqrt),
            "sin" => Some(FonctionMath::Sin),
            "cos" => Some(FonctionMath::Cos),
            "tan" => Some(FonctionMath::Tan),
            "log10" => Some(FonctionMath::Log10),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            FonctionMath::Sqrt => "sqrt",
            FonctionMath::Sin => "sin",
            FonctionMath::Cos => "cos",
            FonctionMath::Tan => "tan",
            FonctionMath::Log10 => "log10",
        }
    }

    /// Trig en radians.
    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            FonctionMath::Sqrt => x.sqrt(),
            FonctionMath::Sin => x.sin(),
            FonctionMath::Cos => x.cos(),
            FonctionMath::Tan => x.tan(),
            FonctionMath::Log10 => x.log10(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,

    Neg(Box<Expr>),
    Appel(FonctionMath, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évaluation numérique brute (sans arrondi ni contrôle de finitude).
    pub fn valeur(&self) -> f64 {
        use Expr::*;

        match self {
            Num(v) => *v,
            Pi => PI,
            Neg(x) => -x.valeur(),
            Appel(f, x) => f.appliquer(x.valeur()),
            Add(a, b) => a.valeur() + b.valeur(),
            Sub(a, b) => a.valeur() - b.valeur(),
            Mul(a, b) => a.valeur() * b.valeur(),
            Div(a, b) => a.valeur() / b.valeur(),
            Pow(a, b) => a.valeur().powf(b.valeur()),
        }
    }
}

/// Affichage entièrement parenthésé (journal) : rend la structure visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Num(v) => write!(f, "{v}"),
            Pi => write!(f, "PI"),
            Neg(x) => write!(f, "(-{x})"),
            Appel(func, x) => write!(f, "{}({x})", func.nom()),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Pow(a, b) => write!(f, "({a} ** {b})"),
        }
    }
}
