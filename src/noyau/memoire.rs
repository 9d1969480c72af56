// src/noyau/memoire.rs
//
// Registre mémoire (MS / MR / MC / M+ / M-)
// -----------------------------------------
// - Option explicite : "vide" n’est pas "zéro".
// - Jamais touché par une évaluation "=" : seulement par ces opérations.
// - MS / M+ / M- évaluent l’entrée courante; si l’évaluation échoue, le registre
//   reste tel quel et aucune erreur n’est remontée.

use tracing::{debug, warn};

use super::angle::ModeAngle;
use super::erreur::ErreurCalc;
use super::eval::evaluate_value;
use super::reglages::Reglages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMemoire {
    Stocker,
    Rappeler,
    Effacer,
    Ajouter,
    Soustraire,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: Option<f64>,
}

impl Memoire {
    pub fn valeur(&self) -> Option<f64> {
        self.valeur
    }

    pub fn est_vide(&self) -> bool {
        self.valeur.is_none()
    }

    /// MS : registre = résultat (si l’évaluation a réussi).
    pub fn stocker(&mut self, r: Result<f64, ErreurCalc>) {
        match r {
            Ok(v) => {
                debug!(v, "mémoire: stockage");
                self.valeur = Some(v);
            }
            Err(e) => debug!(%e, "mémoire: stockage ignoré"),
        }
    }

    /// M+ : registre = (précédent ou 0) + résultat.
    pub fn ajouter(&mut self, r: Result<f64, ErreurCalc>) {
        self.cumuler(r, 1.0);
    }

    /// M- : registre = (précédent ou 0) - résultat.
    pub fn soustraire(&mut self, r: Result<f64, ErreurCalc>) {
        self.cumuler(r, -1.0);
    }

    fn cumuler(&mut self, r: Result<f64, ErreurCalc>, signe: f64) {
        let v = match r {
            Ok(v) => v,
            Err(e) => {
                debug!(%e, "mémoire: cumul ignoré");
                return;
            }
        };

        let nouveau = self.valeur.unwrap_or(0.0) + signe * v;
        if !nouveau.is_finite() {
            // le registre ne contient que des valeurs finies
            warn!("mémoire: cumul non fini ignoré");
            return;
        }
        debug!(nouveau, "mémoire: cumul");
        self.valeur = Some(nouveau);
    }

    /// MC : vide le registre, sans condition.
    pub fn effacer(&mut self) {
        self.valeur = None;
    }

    /// MR : texte à insérer dans l’entrée (None si registre vide).
    /// Écriture décimale la plus courte qui relit exactement la valeur.
    pub fn rappeler(&self) -> Option<String> {
        self.valeur.map(|v| if v == 0.0 { "0".to_string() } else { format!("{v}") })
    }
}

/// Opération mémoire complète sur l’entrée brute.
///
/// Retourne le nouveau registre, et pour MR le texte à insérer.
pub fn memory_operation(
    op: OpMemoire,
    brut: &str,
    mode: ModeAngle,
    registre: Memoire,
    reglages: &Reglages,
) -> (Memoire, Option<String>) {
    let mut m = registre;
    match op {
        OpMemoire::Stocker => m.stocker(evaluate_value(brut, mode, reglages)),
        OpMemoire::Ajouter => m.ajouter(evaluate_value(brut, mode, reglages)),
        OpMemoire::Soustraire => m.soustraire(evaluate_value(brut, mode, reglages)),
        OpMemoire::Effacer => m.effacer(),
        OpMemoire::Rappeler => return (m, m.rappeler()),
    }
    (m, None)
}
