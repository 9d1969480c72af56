// src/noyau/resolveur.rs
//
// Résolution des noms (fonctions + constantes) en primitives évaluables.
// ----------------------------------------------------------------------
// - Travaille sur les jetons : un nom est toujours un identifiant complet,
//   jamais une sous-chaîne ("e" seul != "exp", "sin" != "asin").
// - Le mode d’angle est figé ici, une fois pour toute l’expression :
//     trig directe  : argument converti en radians (DEG)
//     trig inverse  : résultat converti en degrés (DEG)

use std::f64::consts::{E, PI};
use std::fmt;

use tracing::trace;

use super::angle::ModeAngle;
use super::erreur::ErreurCalc;
use super::jetons::Tok;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Ln,
    Abs,
}

impl Fonction {
    /// Table des noms reconnus (surface -> fonction).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        let f = match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" => Fonction::Asin,
            "acos" => Fonction::Acos,
            "atan" => Fonction::Atan,
            "sqrt" => Fonction::Sqrt,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "abs" => Fonction::Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Abs => "abs",
        }
    }

    fn est_trig_directe(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    fn est_trig_inverse(self) -> bool {
        matches!(self, Fonction::Asin | Fonction::Acos | Fonction::Atan)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Aucune,
    /// argument × π/180 avant application
    ArgumentEnRadians,
    /// résultat × 180/π après application
    ResultatEnDegres,
}

/// Fonction prête à l’emploi : le mode d’angle est déjà pris en compte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Primitive {
    pub fonction: Fonction,
    pub conversion: Conversion,
}

impl Primitive {
    pub fn new(fonction: Fonction, mode: ModeAngle) -> Self {
        let conversion = match mode {
            ModeAngle::Radians => Conversion::Aucune,
            ModeAngle::Degres if fonction.est_trig_directe() => Conversion::ArgumentEnRadians,
            ModeAngle::Degres if fonction.est_trig_inverse() => Conversion::ResultatEnDegres,
            ModeAngle::Degres => Conversion::Aucune,
        };
        Self {
            fonction,
            conversion,
        }
    }

    /// Applique la primitive, avec contrôle de domaine.
    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalc> {
        use Fonction::*;

        let arg = match self.conversion {
            Conversion::ArgumentEnRadians => PI / 180.0 * x,
            _ => x,
        };

        let brut = match self.fonction {
            Sin => arg.sin(),
            Cos => arg.cos(),
            Tan => arg.tan(),

            Asin | Acos if !(-1.0..=1.0).contains(&arg) => {
                return Err(ErreurCalc::domaine(format!(
                    "{} hors de [-1, 1]",
                    self.fonction.nom()
                )));
            }
            Asin => arg.asin(),
            Acos => arg.acos(),
            Atan => arg.atan(),

            Sqrt if arg < 0.0 => return Err(ErreurCalc::domaine("racine d’un négatif")),
            Sqrt => arg.sqrt(),

            Log | Ln if arg <= 0.0 => {
                return Err(ErreurCalc::domaine(format!(
                    "{} d’un nombre ≤ 0",
                    self.fonction.nom()
                )));
            }
            Log => arg.log10(),
            Ln => arg.ln(),

            Abs => arg.abs(),
        };

        Ok(match self.conversion {
            Conversion::ResultatEnDegres => 180.0 / PI * brut,
            _ => brut,
        })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.conversion {
            Conversion::Aucune => write!(f, "{}", self.fonction.nom()),
            Conversion::ArgumentEnRadians => write!(f, "{}°", self.fonction.nom()),
            Conversion::ResultatEnDegres => write!(f, "{}→°", self.fonction.nom()),
        }
    }
}

/// Remplace les noms par des primitives et les constantes par leur valeur.
/// Un nom inconnu est une erreur de syntaxe (rien d’autre n’est interprété).
pub fn resolve(jetons: &[Tok], mode: ModeAngle) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::with_capacity(jetons.len());

    for tok in jetons {
        let r = match tok {
            Tok::Pi => Tok::Num(PI),
            Tok::Ident(nom) if nom == "e" => Tok::Num(E),
            Tok::Ident(nom) => match Fonction::depuis_nom(nom) {
                Some(f) => Tok::Appel(Primitive::new(f, mode)),
                None => return Err(ErreurCalc::syntaxe(format!("nom inconnu: {nom}"))),
            },
            autre => autre.clone(),
        };
        out.push(r);
    }

    trace!(n = out.len(), %mode, "jetons résolus");
    Ok(out)
}
