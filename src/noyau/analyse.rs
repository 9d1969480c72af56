// src/noyau/analyse.rs
//
// Descente récursive : jetons résolus -> Expr
// Grammaire (de la plus faible à la plus forte priorité):
//
//   somme     := produit (('+' | '-') produit)*
//   produit   := unaire (('*' | '/') unaire)*
//   unaire    := ('-' | '+') unaire | puissance
//   puissance := primaire ('^' unaire)?          (associative à droite)
//   primaire  := Num | '(' somme ')' | Appel primaire
//
// Conséquences :
// - "-2^2" = -(2^2) = -4
// - "2^3^2" = 2^(3^2) = 512
// - "2^-1" accepté (l’exposant est un unaire)
//
// Seuls Num / Appel / opérateurs / parenthèses sont acceptés : un nom
// non résolu ici est une erreur, jamais une “exécution”.

use super::erreur::ErreurCalc;
use super::expr::{Expr, OpAdd, OpMul};
use super::jetons::Tok;

/// Garde-fou : imbrication maximale (anti débordement de pile).
const PROFONDEUR_MAX: usize = 256;

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
}

/// Construit l’arbre à partir des jetons résolus.
pub fn parse(jetons: &[Tok]) -> Result<Expr, ErreurCalc> {
    if jetons.is_empty() {
        return Err(ErreurCalc::syntaxe("expression vide"));
    }

    let mut a = Analyseur {
        jetons,
        pos: 0,
        profondeur: 0,
    };
    let e = a.somme()?;

    match a.peek() {
        None => Ok(e),
        Some(Tok::RPar) => Err(ErreurCalc::syntaxe("parenthèse fermante sans ouvrante")),
        Some(t) => Err(ErreurCalc::syntaxe(format!("jeton inattendu: {t:?}"))),
    }
}

impl<'a> Analyseur<'a> {
    fn peek(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    fn avancer(&mut self) -> Option<&'a Tok> {
        let t = self.jetons.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn descendre(&mut self) -> Result<(), ErreurCalc> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalc::syntaxe("expression trop imbriquée"));
        }
        Ok(())
    }

    fn remonter(&mut self) {
        self.profondeur -= 1;
    }

    // Chaînes gauche-associatives gardées à plat : la longueur d’une somme ou
    // d’un produit ne coûte pas de profondeur (ni à l’évaluation, ni au Drop).
    fn somme(&mut self) -> Result<Expr, ErreurCalc> {
        let premier = self.produit()?;
        let mut suite = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Tok::Plus) => OpAdd::Plus,
                Some(Tok::Minus) => OpAdd::Moins,
                _ => break,
            };
            self.pos += 1;
            suite.push((op, self.produit()?));
        }
        Ok(if suite.is_empty() {
            premier
        } else {
            Expr::Somme(Box::new(premier), suite)
        })
    }

    fn produit(&mut self) -> Result<Expr, ErreurCalc> {
        let premier = self.unaire()?;
        let mut suite = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Tok::Star) => OpMul::Fois,
                Some(Tok::Slash) => OpMul::Divise,
                _ => break,
            };
            self.pos += 1;
            suite.push((op, self.unaire()?));
        }
        Ok(if suite.is_empty() {
            premier
        } else {
            Expr::Produit(Box::new(premier), suite)
        })
    }

    fn unaire(&mut self) -> Result<Expr, ErreurCalc> {
        self.descendre()?;
        let e = match self.peek() {
            Some(Tok::Minus) => {
                self.pos += 1;
                Expr::Neg(Box::new(self.unaire()?))
            }
            Some(Tok::Plus) => {
                self.pos += 1;
                self.unaire()?
            }
            _ => self.puissance()?,
        };
        self.remonter();
        Ok(e)
    }

    fn puissance(&mut self) -> Result<Expr, ErreurCalc> {
        let base = self.primaire()?;
        if let Some(Tok::Caret) = self.peek() {
            self.pos += 1;
            let exposant = self.unaire()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exposant)));
        }
        Ok(base)
    }

    fn primaire(&mut self) -> Result<Expr, ErreurCalc> {
        match self.avancer() {
            Some(Tok::Num(v)) => Ok(Expr::Nombre(*v)),

            Some(Tok::LPar) => {
                let e = self.somme()?;
                match self.avancer() {
                    Some(Tok::RPar) => Ok(e),
                    Some(t) => Err(ErreurCalc::syntaxe(format!("')' attendue, trouvé {t:?}"))),
                    None => Err(ErreurCalc::syntaxe("parenthèse non fermée")),
                }
            }

            Some(Tok::Appel(p)) => {
                self.descendre()?;
                let arg = self.primaire()?;
                self.remonter();
                Ok(Expr::Appel(*p, Box::new(arg)))
            }

            Some(Tok::Ident(nom)) => Err(ErreurCalc::syntaxe(format!("nom non résolu: {nom}"))),
            Some(Tok::Pi) => Err(ErreurCalc::syntaxe("constante non résolue")),
            Some(Tok::RPar) => Err(ErreurCalc::syntaxe("parenthèse fermante inattendue")),
            Some(t) => Err(ErreurCalc::syntaxe(format!("opérateur inattendu: {t:?}"))),
            None => Err(ErreurCalc::syntaxe("fin d’expression inattendue")),
        }
    }
}
