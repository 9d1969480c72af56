//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, mode d’angle, moteur,
//! erreur, démarche) et offrir des opérations simples sur le texte.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : la vue appelle le noyau.
//! - Si l’entrée affiche la sentinelle d’erreur, toute insertion la remplace.

use rand::Rng;

use crate::noyau::{toggle_angle_mode, Demarche, ModeAngle, Moteur};

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- moteur (mémoire + historique de la session) ---
    pub moteur: Moteur,
    pub mode: ModeAngle,

    // --- sorties ---
    pub erreur: String, // détail de la dernière erreur (la sentinelle est dans l’entrée)
    pub demarche: Demarche,

    // --- UX ---
    pub montrer_historique: bool,
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        let moteur = Moteur::default();
        let mode = moteur.reglages.mode_defaut;
        Self {
            entree: String::new(),
            moteur,
            mode,
            erreur: String::new(),
            demarche: Demarche::default(),
            montrer_historique: false,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C : effacer l’entrée et le détail d’erreur.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère (la sentinelle part d’un coup).
    pub fn backspace_entree(&mut self) {
        if self.affiche_erreur() {
            self.entree.clear();
        } else {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    /// Insère du texte en fin d’entrée (remplace la sentinelle).
    pub fn inserer(&mut self, texte: &str) {
        if self.affiche_erreur() {
            self.entree.clear();
        }
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// Insère "nom(" : la parenthèse fermante sera ajoutée à l’évaluation si oubliée.
    pub fn inserer_fonction(&mut self, nom: &str) {
        self.inserer(&format!("{nom}("));
    }

    /// Rand : tirage uniforme dans [0, 1) inséré comme littéral décimal.
    /// Le hasard s’arrête ici : l’évaluation du texte obtenu reste déterministe.
    pub fn inserer_aleatoire(&mut self) {
        let x: f64 = rand::thread_rng().gen();
        self.inserer(&x.to_string());
    }

    pub fn basculer_mode(&mut self) {
        self.mode = toggle_angle_mode(self.mode);
        self.focus_entree = true;
    }

    pub fn affiche_erreur(&self) -> bool {
        self.moteur.reglages.est_sentinelle(&self.entree)
    }

    /// Résultat OK : l’entrée devient le texte affiché.
    pub fn set_resultat(&mut self, affichage: String, demarche: Demarche) {
        self.entree = affichage;
        self.erreur.clear();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Échec : l’entrée devient la sentinelle, démarche effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.entree = self.moteur.reglages.sentinelle.clone();
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Reprend une entrée d’historique (index dans l’ordre d’enregistrement).
    pub fn choisir_historique(&mut self, index: usize) {
        if let Some(texte) = self.moteur.historique().entrees().nth(index).cloned() {
            self.entree = texte;
            self.montrer_historique = false;
            self.focus_entree = true;
        }
    }
}
