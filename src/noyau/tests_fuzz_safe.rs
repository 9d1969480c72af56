//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toutes les erreurs sont acceptées, mais jamais de panique
//! - invariants clés :
//!     succès => valeur finie et affichage == format_result(valeur)
//!     échec  => l’UI affiche la sentinelle, rien d’autre

use std::time::{Duration, Instant};

use super::angle::ModeAngle;
use super::eval::eval_expression;
use super::format::format_result;
use super::moteur::Moteur;
use super::reglages::Reglages;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_invariants(expr: &str, mode: ModeAngle) -> bool {
    let reglages = Reglages::default();
    let a = eval_expression(expr, mode, &reglages);
    let b = eval_expression(expr, mode, &reglages);
    assert_eq!(a, b, "non déterministe: expr={expr:?}");

    match a {
        Ok(s) => {
            assert!(s.valeur.is_finite(), "valeur non finie: expr={expr:?}");
            let attendu = format_result(s.valeur, reglages.chiffres)
                .unwrap_or_else(|e| panic!("format impossible: expr={expr:?} err={e}"));
            assert_eq!(s.affichage, attendu, "expr={expr:?}");
            assert_ne!(s.affichage, reglages.sentinelle);
            true
        }
        Err(_) => false,
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (divisions par zéro) et des décimaux
    match rng.pick(8) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "0.5".to_string(),
        4 => "3.25".to_string(),
        5 => "10".to_string(),
        6 => format!("{}!", rng.pick(7)),
        _ => "45".to_string(),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "e".to_string(),
        _ => format!("(-{})", gen_nombre(rng)),
    }
}

const FONCTIONS: [&str; 10] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "log", "ln", "abs",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("{}+{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("{}-{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({})/({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), gen_atom(rng)),
        6 => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            // parfois sans parenthèse fermante : la normalisation la rajoute
            if rng.coin() {
                format!("{f}({})", gen_expr(rng, depth - 1))
            } else {
                format!("{f}({}", gen_expr(rng, depth - 1))
            }
        }
        _ => format!("({})", gen_expr(rng, depth - 1)),
    }
}

/// Chaîne arbitraire sur un alphabet restreint (syntaxe souvent invalide).
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: [&str; 22] = [
        "0", "1", "9", ".", "+", "-", "*", "/", "^", "(", ")", "!", "π", "e", "sin", "ln",
        "√", " ", "x", "%", "asin", "log",
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        };

        if check_invariants(&expr, mode) {
            seen_ok += 1;
        } else {
            seen_err += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);
        let len = 1 + rng.pick(24) as usize;
        let expr = gen_bruit(&mut rng, len);
        check_invariants(&expr, ModeAngle::Degres);
    }
}

#[test]
fn fuzz_safe_moteur_sentinelle_et_historique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x5EED_u64);
    let mut m = Moteur::default();
    let mut attendu = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = if rng.pick(10) == 0 {
            "Error".to_string()
        } else {
            gen_expr(&mut rng, 3)
        };

        let r = m.evaluer(&expr, ModeAngle::Degres);
        let affiche = m.affichage(&r);
        match &r {
            Ok(s) => assert_eq!(affiche, s.affichage),
            Err(_) => assert_eq!(affiche, "Error"),
        }

        if expr != "Error" {
            attendu += 1;
        }
        assert_eq!(m.historique().len(), attendu, "expr={expr:?}");
        // "=" ne touche jamais la mémoire
        assert!(m.registre().est_vide());
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    let s = eval_expression(&expr, ModeAngle::Radians, &Reglages::default())
        .unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(s.affichage, "400");
}

#[test]
fn fuzz_safe_somme_plate_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let reglages = Reglages::default();

    // chaîne plate : aucune parenthèse, 50 000 termes
    let plate = format!("1{}", "+1".repeat(49_999));
    let s = eval_expression(&plate, ModeAngle::Radians, &reglages)
        .unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(s.affichage, "50000");

    let mut rng = Rng::new(0x5EED_F1A7);
    let mut mixte = String::from("1");
    for _ in 0..20_000 {
        mixte.push(['+', '-', '*', '/'][rng.pick(4) as usize]);
        mixte.push_str(&(1 + rng.pick(9)).to_string());
    }
    // Ok ou Err, jamais d’abandon
    let _ = check_invariants(&mixte, ModeAngle::Degres);
    budget(t0, max);
}
