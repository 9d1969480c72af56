// src/noyau/format.rs
//
// Affichage canonique d’un résultat f64.
// - entier fini  : texte entier, sans point décimal ("4", pas "4.0")
// - sinon        : arrondi à N chiffres significatifs, puis forme décimale la plus courte
// - non fini     : erreur Math (jamais affiché comme un nombre)

use super::erreur::ErreurCalc;

/// Formate une valeur avec `chiffres` chiffres significatifs (≥ 1).
pub fn format_result(v: f64, chiffres: usize) -> Result<String, ErreurCalc> {
    if !v.is_finite() {
        return Err(ErreurCalc::math("résultat non fini"));
    }

    if v.fract() == 0.0 {
        // -0 s’affiche 0
        if v == 0.0 {
            return Ok("0".to_string());
        }
        return Ok(format!("{v}"));
    }

    // Notation scientifique à (chiffres - 1) décimales = arrondi à `chiffres` significatifs.
    let precision = chiffres.max(1) - 1;
    let arrondi: f64 = format!("{v:.precision$e}")
        .parse()
        .map_err(|_| ErreurCalc::math("arrondi impossible"))?;

    // Display f64 : plus courte écriture décimale qui relit la même valeur.
    Ok(format!("{arrondi}"))
}
