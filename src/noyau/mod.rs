//! Noyau — moteur d’évaluation de la calculatrice scientifique
//!
//! Organisation interne :
//! - normalise.rs : parenthèses équilibrées + factorielles développées
//! - jetons.rs    : tokenisation
//! - resolveur.rs : noms -> primitives (mode d’angle) + constantes
//! - analyse.rs   : descente récursive -> Expr
//! - expr.rs      : arbre + évaluation f64
//! - format.rs    : affichage canonique
//! - memoire.rs   : registre MS/MR/MC/M+/M-
//! - eval.rs      : pipeline complet
//! - moteur.rs    : instance (mémoire + historique)

pub mod analyse;
pub mod angle;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod memoire;
pub mod moteur;
pub mod normalise;
pub mod reglages;
pub mod resolveur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use angle::ModeAngle;
pub use eval::{toggle_angle_mode, Demarche};
pub use memoire::OpMemoire;
pub use moteur::Moteur;
pub use normalise::open_paren_count;
