// src/noyau/normalise.rs
//
// Normalisation du texte brut, avant tout jeton:
// - parenthèses : on ferme les ouvrantes orphelines (jamais les fermantes en trop)
// - factorielle : "<chiffres>!" devient le texte décimal exact de n!
//
// Le texte d’entrée n’est jamais modifié : chaque étape rend une nouvelle String.

use num_bigint::BigUint;
use num_traits::One;
use tracing::trace;

use super::erreur::ErreurCalc;

/// Compteur courant de parenthèses ouvrantes non fermées (+1 par '(', -1 par ')').
/// Négatif si des fermantes sont en trop.
pub fn open_paren_count(s: &str) -> i64 {
    s.chars().fold(0i64, |n, c| match c {
        '(' => n + 1,
        ')' => n - 1,
        _ => n,
    })
}

/// Ajoute autant de ')' que d’ouvrantes restées ouvertes.
/// Un compte négatif est laissé tel quel (erreur de syntaxe plus loin).
pub fn balance_parens(s: &str) -> String {
    let manquantes = open_paren_count(s);
    let mut out = s.to_string();
    if manquantes > 0 {
        for _ in 0..manquantes {
            out.push(')');
        }
    }
    out
}

/// n! exact. Définie seulement pour n ≥ 0.
pub fn factorial(n: i64) -> Result<BigUint, ErreurCalc> {
    if n < 0 {
        return Err(ErreurCalc::domaine(format!("factorielle de {n}")));
    }
    let mut acc = BigUint::one();
    for k in 2..=(n as u64) {
        acc *= k;
    }
    Ok(acc)
}

/// Remplace chaque "<chiffres>!" par la valeur de la factorielle, de gauche à droite.
///
/// - "3!!" -> "6!" -> "720" (la factorielle interne redevient des chiffres)
/// - "!" sans chiffres devant, ou "2.5!" : erreur de domaine
/// - n > `max` : erreur math (la valeur ne tient plus dans un f64)
pub fn expand_factorials(s: &str, max: u64) -> Result<String, ErreurCalc> {
    let mut courant = s.to_string();

    // Chaque passe consomme exactement un '!' et n’en crée aucun (n! s’écrit en
    // chiffres) : après `passes_max` passes il n’en reste plus.
    let passes_max = s.matches('!').count();

    for _ in 0..passes_max {
        let Some(pos) = courant.find('!') else {
            break;
        };

        let avant = &courant[..pos];
        let debut = avant
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .len();

        if debut == pos {
            return Err(ErreurCalc::domaine("factorielle sans entier devant '!'"));
        }
        if avant[..debut].ends_with('.') {
            return Err(ErreurCalc::domaine("factorielle d’un nombre non entier"));
        }

        let n: i64 = avant[debut..]
            .parse()
            .map_err(|_| ErreurCalc::math("factorielle trop grande"))?;
        if n as u64 > max {
            return Err(ErreurCalc::math(format!("{n}! dépasse la capacité")));
        }

        let valeur = factorial(n)?;
        trace!(n, "factorielle développée");
        courant = format!("{}{}{}", &courant[..debut], valeur, &courant[pos + 1..]);
    }

    Ok(courant)
}

/// Normalisation complète : parenthèses équilibrées puis factorielles développées.
pub fn normalize(s: &str, factorielle_max: u64) -> Result<String, ErreurCalc> {
    expand_factorials(&balance_parens(s), factorielle_max)
}
