// src/noyau/angle.rs

use std::fmt;

/// Mode d’angle global (une seule valeur pour toute l’expression).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    /// Bascule pure : DEG <-> RAD.
    pub fn basculer(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.libelle())
    }
}
