//! Tests scientifiques (campagne) : propriétés + scénarios + limites contrôlées.
//!
//! But : vérifier les contrats du noyau de bout en bout, sans faire chauffer la machine.
//! - budget temps global sur les boucles
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - Les résultats sont des f64 : les comparaisons numériques passent par une tolérance,
//!   les comparaisons d’affichage passent par l’arrondi à 10 chiffres.
//! - cos(90°) n’est pas exactement 0 en f64 : on ne le teste pas comme "0".

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::angle::ModeAngle;
use super::erreur::GenreErreur;
use super::eval::eval_expression;
use super::format::format_result;
use super::memoire::OpMemoire;
use super::moteur::Moteur;
use super::normalise::{balance_parens, factorial, normalize};
use super::reglages::{Reglages, FACTORIELLE_MAX};

const DEG: ModeAngle = ModeAngle::Degres;
const RAD: ModeAngle = ModeAngle::Radians;

fn valeur(expr: &str, mode: ModeAngle) -> f64 {
    eval_expression(expr, mode, &Reglages::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .valeur
}

fn affichage(expr: &str, mode: ModeAngle) -> String {
    eval_expression(expr, mode, &Reglages::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .affichage
}

fn genre(expr: &str, mode: ModeAngle) -> GenreErreur {
    match eval_expression(expr, mode, &Reglages::default()) {
        Ok(s) => panic!("expr={expr:?} attendu erreur, obtenu {}", s.affichage),
        Err(e) => e.genre(),
    }
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let v = valeur(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} mode={mode} v={v} attendu={attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn sci_equilibrage_idempotent() {
    let start = Instant::now();
    for n in 0..40 {
        let s = format!("{}1", "(".repeat(n));
        let une = normalize(&s, FACTORIELLE_MAX).unwrap();
        let deux = normalize(&une, FACTORIELLE_MAX).unwrap();
        assert_eq!(deux, une, "n={n}");
        assert_eq!(balance_parens(&une), une);
        budget(start, Duration::from_secs(2));
    }
}

#[test]
fn sci_factorielles() {
    assert_eq!(factorial(0).unwrap().to_string(), "1");
    assert_eq!(factorial(1).unwrap().to_string(), "1");
    assert_eq!(factorial(5).unwrap().to_string(), "120");
    assert_eq!(factorial(-1).unwrap_err().genre(), GenreErreur::Domaine);
    assert_eq!(normalize("5!", FACTORIELLE_MAX).unwrap(), "120");
}

/* ------------------------ Angles ------------------------ */

#[test]
fn sci_sinus_selon_mode() {
    assert_proche("sin(90)", DEG, 1.0);
    assert_proche("sin(pi/2)", RAD, 1.0);
    assert_proche("sin(π/2)", RAD, 1.0);
    assert_eq!(affichage("sin(90)", DEG), "1");
}

#[test]
fn sci_trig_degres() {
    assert_proche("cos(60)", DEG, 0.5);
    assert_proche("tan(45)", DEG, 1.0);
    assert_eq!(affichage("cos(60)", DEG), "0.5");
    assert_eq!(affichage("tan(45)", DEG), "1");
}

#[test]
fn sci_trig_inverse_degres() {
    assert_proche("asin(1)", DEG, 90.0);
    assert_proche("acos(0)", DEG, 90.0);
    assert_proche("atan(1)", DEG, 45.0);
    assert_eq!(affichage("asin(0.5)", DEG), "30");
}

#[test]
fn sci_trig_inverse_radians() {
    assert_proche("acos(-1)", RAD, std::f64::consts::PI);
    assert_proche("atan(1)*4", RAD, std::f64::consts::PI);
}

#[test]
fn sci_un_seul_mode_par_expression() {
    // sin en degrés + asin en degrés : aller-retour
    assert_proche("asin(sin(30))", DEG, 30.0);
    // même texte en radians : autre valeur
    assert_proche("sin(30)", RAD, 30f64.sin());
}

#[test]
fn sci_mode_ignore_hors_trig() {
    for mode in [DEG, RAD] {
        assert_eq!(affichage("sqrt(16)+log(1000)", mode), "7");
    }
}

/* ------------------------ Logarithmes + constantes ------------------------ */

#[test]
fn sci_logarithmes() {
    assert_eq!(affichage("ln(e)", DEG), "1");
    assert_eq!(affichage("log(100)", DEG), "2");
    assert_eq!(affichage("e", DEG), "2.718281828");
    assert_eq!(affichage("π", DEG), "3.141592654");
}

#[test]
fn sci_e_isole_seulement() {
    assert_eq!(affichage("2*e", DEG), "5.436563657");
    assert_eq!(genre("ee", DEG), GenreErreur::Syntaxe);
    assert_eq!(genre("exp(1)", DEG), GenreErreur::Syntaxe);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_taxonomie() {
    assert_eq!(genre("1/0", DEG), GenreErreur::Math);
    assert_eq!(genre("5/(3-3)", DEG), GenreErreur::Math);
    assert_eq!(genre("10^400", DEG), GenreErreur::Math);
    assert_eq!(genre("171!", DEG), GenreErreur::Math);

    assert_eq!(genre("sqrt(-1)", DEG), GenreErreur::Domaine);
    assert_eq!(genre("log(0)", DEG), GenreErreur::Domaine);
    assert_eq!(genre("ln(-1)", DEG), GenreErreur::Domaine);
    assert_eq!(genre("(-8)^(1/3)", DEG), GenreErreur::Domaine);
    assert_eq!(genre("2.5!", DEG), GenreErreur::Domaine);
    assert_eq!(genre("acos(2)", DEG), GenreErreur::Domaine);

    assert_eq!(genre("", DEG), GenreErreur::Syntaxe);
    assert_eq!(genre("2+3)", DEG), GenreErreur::Syntaxe);
    assert_eq!(genre("3+*2", DEG), GenreErreur::Syntaxe);
    assert_eq!(genre("2(3)", DEG), GenreErreur::Syntaxe);
}

#[test]
fn sci_puissances() {
    assert_eq!(affichage("2^10", DEG), "1024");
    assert_eq!(affichage("(-2)^3", DEG), "-8");
    assert_eq!(affichage("4^0.5", DEG), "2");
    assert_eq!(affichage("-2^2", DEG), "-4");
    assert_eq!(affichage("2^3^2", DEG), "512");
}

/* ------------------------ Affichage ------------------------ */

#[test]
fn sci_affichage_entier_sans_point() {
    assert_eq!(format_result(4.0, 10).unwrap(), "4");
    let start = Instant::now();
    for k in -200i32..=200 {
        let txt = format_result(k as f64, 10).unwrap();
        assert!(!txt.contains('.'), "k={k} txt={txt}");
        assert_eq!(txt, k.to_string());
        budget(start, Duration::from_secs(2));
    }
}

#[test]
fn sci_affichage_decimal() {
    assert_eq!(affichage("0.1+0.2", DEG), "0.3");
    assert_eq!(affichage("1/3", DEG), "0.3333333333");
    assert_eq!(affichage("1.5*2", DEG), "3");
    assert_eq!(affichage(".5+.25", DEG), "0.75");
}

/* ------------------------ Scénarios ------------------------ */

#[test]
fn sci_scenarios() {
    assert_eq!(affichage("3+5*2", DEG), "13");
    assert_eq!(normalize("(2+3", FACTORIELLE_MAX).unwrap(), "(2+3)");
    assert_eq!(affichage("(2+3", DEG), "5");
    assert_eq!(affichage("5!", DEG), "120");
    assert_eq!(affichage("3!!", DEG), "720");
    assert_eq!(affichage("sqrt(abs(-16", DEG), "4");
}

#[test]
fn sci_scenario_memoire() {
    let mut m = Moteur::default();
    m.memoire(OpMemoire::Stocker, "2+2", DEG);
    assert_eq!(m.registre().valeur(), Some(4.0));
    m.memoire(OpMemoire::Ajouter, "3", DEG);
    assert_eq!(m.registre().valeur(), Some(7.0));
    m.memoire(OpMemoire::Soustraire, "10", DEG);
    assert_eq!(m.registre().valeur(), Some(-3.0));
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sci_determinisme() {
    let exprs = ["sin(30)+cos(60)", "ln(2)*log(3)", "2^0.5", "abs(-7)/3", "4!/3!"];
    for mode in [DEG, RAD] {
        for e in exprs {
            let a = eval_expression(e, mode, &Reglages::default());
            let b = eval_expression(e, mode, &Reglages::default());
            assert_eq!(a, b, "expr={e:?}");
        }
    }
}

#[test]
fn sci_entree_non_modifiee() {
    let brut = String::from("(1+2");
    let copie = brut.clone();
    let _ = eval_expression(&brut, DEG, &Reglages::default());
    assert_eq!(brut, copie);
}
