// src/noyau/erreur.rs
//
// Erreurs du noyau : trois familles, une par étage qui peut échouer.
// - Syntaxe : entrée vide, jeton inattendu, parenthèse fermante orpheline
// - Domaine : √ négatif, log ≤ 0, factorielle non entière, base < 0 ^ non entier
// - Math    : division par zéro, résultat non fini

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalc {
    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("domaine : {0}")]
    Domaine(String),

    #[error("math : {0}")]
    Math(String),
}

/// Genre d’erreur sans message (pour comparer dans les tests / l’UI).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    Syntaxe,
    Domaine,
    Math,
}

impl ErreurCalc {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalc::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalc::Domaine(msg.into())
    }

    pub fn math(msg: impl Into<String>) -> Self {
        ErreurCalc::Math(msg.into())
    }

    pub fn genre(&self) -> GenreErreur {
        match self {
            ErreurCalc::Syntaxe(_) => GenreErreur::Syntaxe,
            ErreurCalc::Domaine(_) => GenreErreur::Domaine,
            ErreurCalc::Math(_) => GenreErreur::Math,
        }
    }
}
