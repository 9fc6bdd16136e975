// src/noyau/expr.rs
//
// AST flottant, ensemble de noeuds fermé :
// - Nombre      : littéral décimal
// - Const       : π, ℯ
// - Binaire     : + - * / ^
// - Moins       : moins unaire
// - Appel       : sin cos tan ln log sqrt
// - Factorielle : n! (désucré depuis le postfixe)
//
// L’interprète est un simple parcours récursif ; la profondeur est bornée
// par la longueur du tampon.

use serde::Deserialize;

use super::erreur::ErreurCalcul;
use super::nombre::factorielle;

/// Degrés ou radians : ne concerne que sin/cos/tan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub const TOUTES: [Constante; 2] = [Constante::Pi, Constante::E];

    pub fn symbole(self) -> char {
        match self {
            Constante::Pi => 'π',
            Constante::E => 'ℯ',
        }
    }

    pub fn depuis_symbole(c: char) -> Option<Constante> {
        Self::TOUTES.into_iter().find(|k| k.symbole() == c)
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Sqrt,
}

impl Fonction {
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Ln,
        Fonction::Log,
        Fonction::Sqrt,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Sqrt => "sqrt",
        }
    }

    /// Whitelist stricte (sensible à la casse, comme les boutons).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    fn appliquer(self, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
        let angle = |x: f64| match mode {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        };

        match self {
            Fonction::Sin => Ok(angle(x).sin()),
            Fonction::Cos => Ok(angle(x).cos()),
            Fonction::Tan => Ok(angle(x).tan()),
            Fonction::Ln | Fonction::Log if x <= 0.0 || x.is_nan() => {
                Err(ErreurCalcul::DomainError)
            }
            Fonction::Ln => Ok(x.ln()),
            Fonction::Log => Ok(x.log10()),
            // NaN pour x < 0 : rattrapé par la normalisation finale
            Fonction::Sqrt => Ok(x.sqrt()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Const(Constante),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Moins(Box<Expr>),
    Appel(Fonction, Box<Expr>),
    Factorielle(Box<Expr>),
}

impl Expr {
    pub fn evaluer(&self, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Const(k) => Ok(k.valeur()),
            Moins(x) => Ok(-x.evaluer(mode)?),
            Appel(f, x) => f.appliquer(x.evaluer(mode)?, mode),
            Factorielle(x) => factorielle(x.evaluer(mode)?),

            Binaire(op, a, b) => {
                let a = a.evaluer(mode)?;
                let b = b.evaluer(mode)?;
                match op {
                    Op::Add => Ok(a + b),
                    Op::Sub => Ok(a - b),
                    Op::Mul => Ok(a * b),
                    Op::Div if b == 0.0 => Err(ErreurCalcul::DivisionByZero),
                    Op::Div => Ok(a / b),
                    Op::Pow => Ok(a.powf(b)),
                }
            }
        }
    }
}
