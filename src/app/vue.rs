// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Indicateurs : mode DEG/RAD, "M" si mémoire, parenthèses ouvertes
//
// La vue ne calcule rien : elle appelle le noyau (Moteur) et dépose le résultat.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{open_paren_count, OpMemoire};

/// (libellé, texte inséré) des touches scientifiques qui ne sont pas des fonctions.
const TOUCHES_SPECIALES: [(&str, &str); 7] = [
    ("π", "π"),
    ("e", "e"),
    ("x²", "^2"),
    ("x³", "^3"),
    ("xʸ", "^"),
    ("10ˣ", "10^"),
    ("x!", "!"),
];

const FONCTIONS: [(&str, &str); 10] = [
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("asin", "asin"),
    ("acos", "acos"),
    ("atan", "atan"),
    ("log", "log"),
    ("ln", "ln"),
    ("√", "sqrt"),
    ("|x|", "abs"),
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice scientifique");
                    let libelle = if self.montrer_historique {
                        "Masquer l’historique"
                    } else {
                        "Historique"
                    };
                    if ui.button(libelle).clicked() {
                        self.montrer_historique = !self.montrer_historique;
                    }
                });
                ui.add_space(6.0);

                self.ui_indicateurs(ui);
                self.ui_entree(ui);

                if self.montrer_historique {
                    ui.add_space(6.0);
                    self.ui_historique(ui);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_memoire(ui);
                ui.add_space(6.0);
                self.ui_scientifique(ui);
                ui.add_space(6.0);
                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_indicateurs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.monospace(self.mode.libelle());
            if !self.moteur.registre().est_vide() {
                ui.monospace("M");
            }
            let ouvertes = open_paren_count(&self.entree);
            if ouvertes > 0 {
                ui.monospace(format!("( ×{ouvertes}"));
            }
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("0")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            if self.moteur.historique().is_empty() {
                ui.label("Aucun calcul");
                return;
            }

            // plus récent en haut
            let entrees: Vec<(usize, String)> = self
                .moteur
                .historique()
                .entrees()
                .cloned()
                .enumerate()
                .rev()
                .collect();

            let mut choisi = None;
            for (i, texte) in &entrees {
                if ui.button(egui::RichText::new(texte).monospace()).clicked() {
                    choisi = Some(*i);
                }
            }
            if let Some(i) = choisi {
                self.choisir_historique(i);
            }

            if ui.small_button("Vider").clicked() {
                self.moteur.vider_historique();
            }
        });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let vide = self.moteur.registre().est_vide();
            for (label, op) in [
                ("MS", OpMemoire::Stocker),
                ("MR", OpMemoire::Rappeler),
                ("MC", OpMemoire::Effacer),
                ("M+", OpMemoire::Ajouter),
                ("M−", OpMemoire::Soustraire),
            ] {
                // MR n’a pas de sens sur un registre vide
                let actif = !(vide && op == OpMemoire::Rappeler);
                let bouton = egui::Button::new(label).min_size(egui::vec2(46.0, 28.0));
                let resp = ui.add_enabled(actif, bouton);
                if resp.clicked() {
                    self.memoire_via_noyau(op);
                }
            }
        });
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for (label, nom) in FONCTIONS {
                if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
                    self.inserer_fonction(nom);
                }
            }

            for (label, texte) in TOUCHES_SPECIALES {
                if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
                    self.inserer(texte);
                }
            }

            if ui.add_sized([46.0, 28.0], egui::Button::new("Rand")).clicked() {
                self.inserer_aleatoire();
            }

            if ui.add_sized([46.0, 28.0], egui::Button::new("1/x")).clicked() {
                self.reciproque_via_noyau();
            }

            let mode = ui
                .add_sized([46.0, 28.0], egui::Button::new(self.mode.libelle()))
                .on_hover_text("Bascule degrés / radians");
            if mode.clicked() {
                self.basculer_mode();
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        const RANGEES: [[&str; 5]; 4] = [
            ["7", "8", "9", "DEL", "C"],
            ["4", "5", "6", "*", "/"],
            ["1", "2", "3", "+", "-"],
            ["0", ".", "(", ")", "="],
        ];

        egui::Grid::new("pave_numerique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in RANGEES {
                    for touche in rangee {
                        let label = match touche {
                            "*" => "×",
                            "/" => "÷",
                            "-" => "−",
                            t => t,
                        };
                        if !ui.add_sized([56.0, 34.0], egui::Button::new(label)).clicked() {
                            continue;
                        }
                        match touche {
                            "DEL" => self.backspace_entree(),
                            "C" => self.clear_entree(),
                            "=" => self.eval_via_noyau(),
                            t => self.inserer(t),
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(
                    ui,
                    "Normalisé",
                    "demarche_normalise",
                    &self.demarche.normalise,
                );
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Appels au noyau ------------------------ */

    /// "=" : évalue l’entrée, puis dépose résultat (ou sentinelle) dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let r = self.moteur.evaluer(&self.entree, self.mode);
        let affiche = self.moteur.affichage(&r);
        match r {
            Ok(s) => self.set_resultat(affiche, s.demarche),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    fn memoire_via_noyau(&mut self, op: OpMemoire) {
        let brut = if self.affiche_erreur() {
            String::new()
        } else {
            self.entree.clone()
        };
        if let Some(txt) = self.moteur.memoire(op, &brut, self.mode) {
            self.inserer(&txt);
        }
        self.focus_entree = true;
    }

    fn reciproque_via_noyau(&mut self) {
        match self.moteur.reciproque(&self.entree, self.mode) {
            Ok(txt) => {
                self.entree = txt;
                self.erreur.clear();
                self.focus_entree = true;
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}
