//! Noyau — évaluation (pipeline réel)
//!
//! texte brut -> parenthèses équilibrées -> factorielles développées
//!            -> jetons -> résolution (noms, constantes, mode d’angle)
//!            -> arbre (descente récursive) -> valeur f64 -> affichage
//!
//! Chaque étape rend un `Result` : la première erreur arrête tout, aucun
//! affichage partiel n’est produit.

use tracing::debug;

use super::angle::ModeAngle;
use super::analyse::parse;
use super::erreur::ErreurCalc;
use super::format::format_result;
use super::jetons::{format_tokens, tokenize};
use super::normalise::{balance_parens, normalize};
use super::reglages::Reglages;
use super::resolveur::resolve;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalise: String,
    pub jetons: String,
    pub arbre: String,
}

/// Évaluation réussie : valeur brute + texte d’affichage.
#[derive(Clone, Debug, PartialEq)]
pub struct Succes {
    pub valeur: f64,
    pub affichage: String,
    /// Texte après équilibrage des parenthèses (ce que l’historique retient).
    pub equilibre: String,
    pub demarche: Demarche,
}

/// API publique : évalue une expression brute dans un mode d’angle donné.
pub fn eval_expression(
    expr_str: &str,
    mode: ModeAngle,
    reglages: &Reglages,
) -> Result<Succes, ErreurCalc> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::syntaxe("Entrée vide"));
    }

    // 1) Normalisation (le texte équilibré seul est gardé pour l’historique)
    let equilibre = balance_parens(s);
    let normalise = normalize(s, reglages.factorielle_max)?;
    debug!(%normalise, "normalisé");

    // 2) Jetons + résolution
    let jetons = resolve(&tokenize(&normalise)?, mode)?;
    let jetons_txt = format_tokens(&jetons);

    // 3) Arbre + valeur
    let arbre = parse(&jetons)?;
    let valeur = arbre.eval()?;

    // 4) Affichage
    let affichage = format_result(valeur, reglages.chiffres)?;
    debug!(%affichage, "évalué");

    Ok(Succes {
        valeur,
        affichage,
        equilibre,
        demarche: Demarche {
            normalise,
            jetons: jetons_txt,
            arbre: arbre.to_string(),
        },
    })
}

/// Valeur seule (opérations mémoire, 1/x).
pub fn evaluate_value(
    expr_str: &str,
    mode: ModeAngle,
    reglages: &Reglages,
) -> Result<f64, ErreurCalc> {
    eval_expression(expr_str, mode, reglages).map(|s| s.valeur)
}

/// Bascule pure du mode d’angle.
pub fn toggle_angle_mode(courant: ModeAngle) -> ModeAngle {
    courant.basculer()
}
