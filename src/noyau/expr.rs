// src/noyau/expr.rs
//
// Arbre d’expression (flottants f64).
// - Nombre : littéral ou constante déjà résolue
// - Appel  : primitive résolue (mode d’angle inclus) appliquée à un argument
//
// IMPORTANT:
// - eval() est pure : même arbre => même résultat.
// - Aucun infini / NaN ne sort d’ici : tout résultat non fini est une erreur Math.
// - Sommes et produits sont plats (n-aires) : "1+1+…+1" ne creuse pas l’arbre,
//   la profondeur ne vient que des parenthèses / unaires / appels (bornés à l’analyse).

use std::fmt;

use super::erreur::ErreurCalc;
use super::resolveur::Primitive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpAdd {
    Plus,
    Moins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMul {
    Fois,
    Divise,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    /// premier terme, puis (opérateur, terme) de gauche à droite
    Somme(Box<Expr>, Vec<(OpAdd, Expr)>),
    Produit(Box<Expr>, Vec<(OpMul, Expr)>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Primitive, Box<Expr>),
}

fn fini(v: f64) -> Result<f64, ErreurCalc> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalc::math("résultat non fini"))
    }
}

impl Expr {
    pub fn eval(&self) -> Result<f64, ErreurCalc> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,
            Neg(x) => -x.eval()?,

            Somme(premier, suite) => {
                let mut acc = premier.eval()?;
                for (op, terme) in suite {
                    let t = terme.eval()?;
                    acc = fini(match op {
                        OpAdd::Plus => acc + t,
                        OpAdd::Moins => acc - t,
                    })?;
                }
                acc
            }

            Produit(premier, suite) => {
                let mut acc = premier.eval()?;
                for (op, facteur) in suite {
                    let f = facteur.eval()?;
                    acc = match op {
                        OpMul::Fois => fini(acc * f)?,
                        OpMul::Divise if f == 0.0 => {
                            return Err(ErreurCalc::math("division par zéro"));
                        }
                        OpMul::Divise => fini(acc / f)?,
                    };
                }
                acc
            }

            Pow(a, b) => {
                let base = a.eval()?;
                let exposant = b.eval()?;
                if base < 0.0 && exposant.fract() != 0.0 {
                    return Err(ErreurCalc::domaine(
                        "base négative avec exposant non entier",
                    ));
                }
                base.powf(exposant)
            }

            Appel(p, x) => p.appliquer(x.eval()?)?,
        };

        fini(v)
    }
}

/// Rendu parenthésé (démarche) : la structure de l’arbre reste visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "-{x}"),
            Somme(premier, suite) => {
                write!(f, "({premier}")?;
                for (op, terme) in suite {
                    let signe = match op {
                        OpAdd::Plus => '+',
                        OpAdd::Moins => '-',
                    };
                    write!(f, "{signe}{terme}")?;
                }
                write!(f, ")")
            }
            Produit(premier, suite) => {
                write!(f, "({premier}")?;
                for (op, facteur) in suite {
                    let signe = match op {
                        OpMul::Fois => '*',
                        OpMul::Divise => '/',
                    };
                    write!(f, "{signe}{facteur}")?;
                }
                write!(f, ")")
            }
            Pow(a, b) => write!(f, "({a}^{b})"),
            Appel(p, x) => write!(f, "{p}({x})"),
        }
    }
}
