//! src/noyau/reglages.rs
//!
//! Réglages du noyau (valeurs par défaut + garde-fous).
//!
//! Aucun fichier, aucune persistance : les réglages vivent avec l’instance
//! du moteur, comme la mémoire et l’historique.

use super::angle::ModeAngle;

/// Chiffres significatifs de l’affichage (lecture calculatrice classique).
pub const CHIFFRES_DEFAUT: usize = 10;

/// Garde-fou : au-delà de 17 chiffres, f64 n’a plus rien à dire.
pub const CHIFFRES_MAX: usize = 17;

/// Marqueur d’erreur unique affiché à la place d’un résultat.
pub const SENTINELLE_ERREUR: &str = "Error";

/// 170! est la dernière factorielle finie en f64.
pub const FACTORIELLE_MAX: u64 = 170;

/// Taille d’historique par défaut (les plus anciennes entrées tombent).
pub const HISTORIQUE_DEFAUT: usize = 500;

/// Garde-fou historique (anti-abus mémoire).
pub const HISTORIQUE_MAX: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Reglages {
    pub chiffres: usize,
    pub sentinelle: String,
    pub factorielle_max: u64,
    pub historique_max: usize,
    pub mode_defaut: ModeAngle,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            sentinelle: SENTINELLE_ERREUR.to_string(),
            factorielle_max: FACTORIELLE_MAX,
            historique_max: HISTORIQUE_DEFAUT,
            mode_defaut: ModeAngle::Degres,
        }
    }
}

impl Reglages {
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
    }

    pub fn set_historique_max(&mut self, n: usize) {
        self.historique_max = n.clamp(1, HISTORIQUE_MAX);
    }

    /// Vrai si le texte est exactement le marqueur d’erreur.
    pub fn est_sentinelle(&self, texte: &str) -> bool {
        texte.trim() == self.sentinelle
    }
}
