//! src/noyau/moteur.rs
//!
//! Instance du moteur : possède la mémoire et l’historique de la session.
//!
//! Contrats :
//! - Un seul fil d’appel (le gestionnaire d’événements de l’UI).
//! - "=" enregistre le texte équilibré dans l’historique AVANT l’évaluation,
//!   succès ou échec, sauf entrée vide ou sentinelle.
//! - L’évaluation ne touche jamais la mémoire.

use std::collections::VecDeque;

use tracing::debug;

use super::angle::ModeAngle;
use super::erreur::ErreurCalc;
use super::eval::{eval_expression, evaluate_value, Succes};
use super::format::format_result;
use super::memoire::{memory_operation, Memoire, OpMemoire};
use super::normalise::balance_parens;
use super::reglages::Reglages;

/// Historique borné : plus ancien en tête, plus récent en queue.
#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<String>,
}

impl Historique {
    fn enregistrer(&mut self, texte: String, max: usize) {
        self.entrees.push_back(texte);
        while self.entrees.len() > max {
            self.entrees.pop_front();
        }
    }

    pub fn entrees(&self) -> impl DoubleEndedIterator<Item = &String> + ExactSizeIterator {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}

#[derive(Clone, Debug, Default)]
pub struct Moteur {
    pub reglages: Reglages,
    memoire: Memoire,
    historique: Historique,
}

impl Moteur {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            reglages,
            ..Default::default()
        }
    }

    /// Action "=" : historique puis évaluation complète.
    pub fn evaluer(&mut self, brut: &str, mode: ModeAngle) -> Result<Succes, ErreurCalc> {
        let s = brut.trim();
        if !s.is_empty() && !self.reglages.est_sentinelle(s) {
            self.historique
                .enregistrer(balance_parens(s), self.reglages.historique_max);
        }

        let r = eval_expression(s, mode, &self.reglages);
        if let Err(e) = &r {
            debug!(%e, "évaluation échouée");
        }
        r
    }

    /// Texte à afficher : résultat, ou sentinelle unique en cas d’échec.
    pub fn affichage(&self, r: &Result<Succes, ErreurCalc>) -> String {
        match r {
            Ok(s) => s.affichage.clone(),
            Err(_) => self.reglages.sentinelle.clone(),
        }
    }

    /// MS / MR / MC / M+ / M- sur l’entrée courante. Seul MR rend du texte.
    pub fn memoire(&mut self, op: OpMemoire, brut: &str, mode: ModeAngle) -> Option<String> {
        let (m, txt) = memory_operation(op, brut, mode, self.memoire, &self.reglages);
        self.memoire = m;
        txt
    }

    pub fn registre(&self) -> &Memoire {
        &self.memoire
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    pub fn vider_historique(&mut self) {
        self.historique.vider();
    }

    /// 1/x sur l’entrée courante (pas d’historique, pas de mémoire).
    pub fn reciproque(&self, brut: &str, mode: ModeAngle) -> Result<String, ErreurCalc> {
        let v = evaluate_value(brut, mode, &self.reglages)?;
        if v == 0.0 {
            return Err(ErreurCalc::math("division par zéro"));
        }
        format_result(1.0 / v, self.reglages.chiffres)
    }
}
