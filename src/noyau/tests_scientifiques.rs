//! Tests scientifiques (campagne) : scénarios de saisie + invariants du noyau.
//!
//! Deux familles :
//! - machine de saisie : séquences de touches -> texte affiché + drapeau
//! - évaluateur : précédences, fonctions, erreurs typées

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval::evaluer;
use super::tampon::{Etat, Issue, Tampon, MARQUEUR_ERREUR};
use super::touches::{parse_sequence, Operateur, Touche};

fn taper(seq: &str) -> Tampon {
    let mut t = Tampon::new();
    for touche in parse_sequence(seq).unwrap_or_else(|e| panic!("seq={seq:?} err={e}")) {
        t.appliquer(touche);
    }
    t
}

fn assert_affiche(seq: &str, attendu: &str, resultat_affiche: bool) {
    let t = taper(seq);
    assert_eq!(t.texte(), attendu, "seq={seq:?}");
    assert_eq!(t.resultat_affiche(), resultat_affiche, "seq={seq:?}");
}

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!((v - attendu).abs() < 1e-9, "expr={expr:?} v={v} attendu={attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios concrets ------------------------ */

#[test]
fn sci_scenario_addition() {
    assert_affiche("2 + 3 =", "5", true);
}

#[test]
fn sci_scenario_division_par_zero() {
    assert_eq!(evaluer("8÷0"), Err(ErreurEval::CalculInvalide));
    assert_affiche("8 ÷ 0 =", MARQUEUR_ERREUR, true);
}

#[test]
fn sci_scenario_sinus_radians() {
    // sin(90) en radians, 12 chiffres
    assert_affiche("sin ( 9 0 ) =", "0.893996663601", true);
    // sans la touche "(" : même résultat
    assert_affiche("sin 9 0 ) =", "0.893996663601", true);
}

#[test]
fn sci_parenthese_apres_fonction_absorbee_une_fois() {
    assert_affiche("sin (", "sin(", false);
    assert_affiche("sin ( (", "sin((", false);
    assert_affiche("2 + √ ( 9 ) =", "5", true);
    assert_affiche("sin ( ( 2 + 3 ) × 0 ) =", "0", true);
    // la touche précédente n’est plus une fonction : "(" s’ajoute
    assert_affiche("√ DEL (", "√(", false);
    assert_affiche("5 sin (", "5(", false);
}

#[test]
fn sci_scenario_pourcent() {
    assert_affiche("5 0 %", "0.5", false);
}

#[test]
fn sci_scenario_decimale_sur_zero() {
    assert_affiche(".", "0.", false);
}

#[test]
fn sci_etat_initial() {
    let t = Tampon::new();
    assert_eq!(t.texte(), "0");
    assert_eq!(t.etat(), Etat::Composition);
}

/* ------------------------ Règles de saisie ------------------------ */

#[test]
fn sci_decimale_un_seul_point_par_segment() {
    assert_affiche("1 . 2 .", "1.2", false);
    assert_affiche("1 . 2 + 3 .", "1.2+3.", false);
    assert_affiche("1 . 2 + 3 . 4 .", "1.2+3.4", false);
}

#[test]
fn sci_decimale_apres_fonction_ou_parenthese() {
    assert_affiche("sin .", "sin(.", false);
    assert_affiche("sin . 5 .", "sin(.5", false);
    assert_affiche("( .", "(.", false);
    assert_affiche("5 + . 5", "5+.5", false);
    assert_affiche("π .", "π.", false);
    assert_affiche("( 2 ) .", "(2).", false);
    // ".5" se lit 0.5
    assert_affiche("sin . 5 ) =", "0.479425538604", true);
    assert_affiche("5 + . 5 =", "5.5", true);
    // point seul : refusé à l’évaluation
    assert_affiche("5 + . =", MARQUEUR_ERREUR, true);
}

#[test]
fn sci_decimale_apres_resultat() {
    assert_affiche("2 + 3 = .", "0.", false);
}

#[test]
fn sci_retour_apres_resultat() {
    let mut t = taper("4 2 =");
    assert_eq!(t.texte(), "42");
    assert!(t.resultat_affiche());
    t.appliquer(Touche::Retour);
    assert_eq!(t.texte(), "0");
    assert!(!t.resultat_affiche());
}

#[test]
fn sci_retour_en_composition() {
    assert_affiche("1 2 DEL", "1", false);
    assert_affiche("7 DEL", "0", false);
    assert_affiche("7 DEL DEL", "0", false);
    // un glyphe entier, jamais un octet
    assert_affiche("√ DEL", "√", false);
    assert_affiche("√ DEL DEL", "0", false);
}

#[test]
fn sci_calcul_idempotent() {
    let mut t = taper("2 + 3 =");
    let avant = t.clone();
    assert_eq!(t.appliquer(Touche::Calculer), Issue::Acceptee);
    assert_eq!(t, avant);

    let mut e = taper("8 ÷ 0 =");
    e.appliquer(Touche::Calculer);
    assert_eq!(e.texte(), MARQUEUR_ERREUR);
}

#[test]
fn sci_nombre_remplace_zero_et_resultat() {
    assert_affiche("0 0 7", "7", false);
    assert_affiche("2 + 3 = 9", "9", false);
    assert_affiche("8 ÷ 0 = 7", "7", false);
    assert_affiche("π", "π", false);
}

#[test]
fn sci_nombre_refuse_apres_constante_ou_fermante() {
    assert_affiche("π 3", "π", false);
    assert_affiche("π π", "π", false);
    assert_affiche("( 2 ) 3", "(2)", false);
    // chiffre puis constante : accepté (mais pas de multiplication implicite)
    assert_affiche("2 π", "2π", false);
}

#[test]
fn sci_operateurs_jamais_empiles() {
    assert_affiche("5 + +", "5+", false);
    assert_affiche("5 + ×", "5×", false);
    assert_affiche("5 ÷ ^", "5^", false);
    assert_affiche("5 - -", "5-", false);
}

#[test]
fn sci_moins_unaire() {
    assert_affiche("5 × -", "5×-", false);
    assert_affiche("2 ^ -", "2^-", false);
    assert_affiche("5 × - 3 =", "-15", true);
    // la traîne entière est remplacée
    assert_affiche("5 × - +", "5+", false);
}

#[test]
fn sci_operateur_apres_resultat_continue() {
    assert_affiche("2 + 3 = × 2", "5×2", false);
    assert_affiche("2 + 3 = × 2 =", "10", true);
    // après une erreur : on repart de zéro
    assert_affiche("8 ÷ 0 = +", "0+", false);
}

#[test]
fn sci_fonction_regles() {
    assert_affiche("sin", "sin(", false);
    assert_affiche("5 + cos", "5+cos(", false);
    assert_affiche("( log", "(log(", false);
    // après un nombre ou ")" : refusé
    assert_affiche("5 sin", "5", false);
    assert_affiche("( 2 ) tan", "(2)", false);
    // résultat affiché : remplacé
    assert_affiche("2 + 3 = √", "√(", false);

    let mut t = taper("5");
    assert_eq!(t.appliquer(Touche::Fonction(super::touches::Fonction::Sin)), Issue::Refusee);
}

#[test]
fn sci_parentheses() {
    assert_affiche("(", "(", false);
    assert_affiche("2 + 3 = (", "(", false);
    assert_affiche("2 × ( 3 + 4 ) =", "14", true);
    assert_affiche("( 2 ) )", "(2))", false);
}

#[test]
fn sci_effacer() {
    let mut t = taper("1 2 + 3");
    t.appliquer(Touche::Effacer);
    assert_eq!(t, Tampon::new());
}

#[test]
fn sci_pourcent_echec_laisse_tampon() {
    assert_affiche("5 +", "5+", false);
    assert_affiche("5 + %", "5+", false);
    let mut t = taper("( 2");
    assert!(matches!(t.appliquer(Touche::Pourcent), Issue::Echec(_)));
    assert_eq!(t.texte(), "(2");
}

#[test]
fn sci_pourcent_garde_le_drapeau() {
    assert_affiche("2 0 0 = %", "2", true);
    assert_affiche("1 + 1 %", "0.02", false);
}

#[test]
fn sci_resultat_reste_une_entree_valide() {
    // rendu positionnel : jamais "1e25"
    let t = taper("1 0 ^ 2 5 =");
    assert!(!t.texte().contains('e'), "texte={}", t.texte());
    assert_eq!(eval_ok(t.texte()), 1e25);

    let t = taper("1 ÷ 3 =");
    assert_eq!(t.texte(), "0.333333333333");

    let t = taper("0 - 5 =");
    assert_eq!(t.texte(), "-5");
    let mut t = t;
    t.appliquer(Touche::Operateur(Operateur::Plus));
    t.appliquer(Touche::Nombre('8'));
    t.appliquer(Touche::Calculer);
    assert_eq!(t.texte(), "3");
}

/* ------------------------ Évaluateur ------------------------ */

#[test]
fn sci_bruit_binaire_arrondi() {
    assert_eq!(eval_ok("0.1+0.2"), 0.3);
    assert_affiche("0 . 1 + 0 . 2 =", "0.3", true);
    assert_eq!(eval_ok("1-0.9"), 0.1);
}

#[test]
fn sci_precedences() {
    assert_eq!(eval_ok("2+3×4"), 14.0);
    assert_eq!(eval_ok("(2+3)×4"), 20.0);
    assert_eq!(eval_ok("10÷4"), 2.5);
    assert_eq!(eval_ok("8-3-2"), 3.0);
    assert_eq!(eval_ok("64÷4÷2"), 8.0);
    // puissance : à droite, et plus forte que le moins unaire
    assert_eq!(eval_ok("2^3^2"), 512.0);
    assert_eq!(eval_ok("-2^2"), -4.0);
    assert_eq!(eval_ok("2^-1"), 0.5);
    // moins unaire plus fort que × ÷
    assert_eq!(eval_ok("2×-3"), -6.0);
    assert_eq!(eval_ok("-2×3+1"), -5.0);
    assert_eq!(eval_ok("5+-3"), 2.0);
    assert_eq!(eval_ok("(+4)"), 4.0);
}

#[test]
fn sci_fonctions_et_constante() {
    assert_eq!(eval_ok("√(16)"), 4.0);
    assert_eq!(eval_ok("log(1000)"), 3.0);
    assert_eq!(eval_ok("log10(100)"), 2.0);
    assert_eq!(eval_ok("cos(0)"), 1.0);
    assert_eq!(eval_ok("π"), 3.14159265359);
    assert_proche("sin(π÷2)", 1.0);
    assert_proche("tan(π÷4)", 1.0);
    // 12 chiffres significatifs : sin(π) reste ~1.2e-16, pas 0
    assert_proche("sin(π)", 0.0);
    assert_eq!(eval_ok("√(√(16))"), 2.0);
    assert_eq!(eval_ok("2×π"), 6.28318530718);
    assert_eq!(eval_ok("sin(0)^2+cos(0)^2"), 1.0);
}

#[test]
fn sci_erreurs_typees() {
    assert_eq!(evaluer("√(-1)"), Err(ErreurEval::CalculInvalide));
    assert_eq!(evaluer("log(0)"), Err(ErreurEval::CalculInvalide));
    assert_eq!(evaluer("10^400"), Err(ErreurEval::CalculInvalide));
    assert_eq!(evaluer("0÷0"), Err(ErreurEval::CalculInvalide));

    for mal in ["(2+3", "2+3)", "()", "2+", "×2", "2π", "2(3)", "sin(", "1.2.3"] {
        assert!(
            matches!(evaluer(mal), Err(ErreurEval::ErreurCalcul(_))),
            "expr={mal:?} -> {:?}",
            evaluer(mal)
        );
    }
}

#[test]
fn sci_liste_blanche() {
    for hostile in [
        "alert(1)",
        "2;3",
        "`ls`",
        "1+x",
        "sinh(1)",
        "exp(1)",
        "sin (1)",
        "constructor",
        "Math.PI",
        "1e5",
        "2,5",
        "Error",
        "$",
        ".",
    ] {
        assert!(
            matches!(evaluer(hostile), Err(ErreurEval::ExpressionInvalide { .. })),
            "expr={hostile:?} -> {:?}",
            evaluer(hostile)
        );
    }
}

#[test]
fn sci_zero_negatif_efface() {
    assert_affiche("0 - 0 =", "0", true);
    assert_eq!(eval_ok("-0").to_string(), "0");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_imbrication() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "2".to_string();
    for _ in 0..200 {
        expr = format!("({expr})");
        budget(t0, max);
    }
    assert_eq!(eval_ok(&expr), 2.0);

    let mut expr = "16".to_string();
    for _ in 0..40 {
        expr = format!("√({expr})^2");
        budget(t0, max);
    }
    assert_proche(&expr, 16.0);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["1"; 1000].join("+");
    budget(t0, max);
    assert_eq!(eval_ok(&expr), 1000.0);

    // au-delà du garde-fou : erreur propre, pas de débordement de pile
    let trop = vec!["1"; 5000].join("+");
    assert!(matches!(evaluer(&trop), Err(ErreurEval::ErreurCalcul(_))));
}
