// src/noyau/operateur.rs
//
// Catalogue fermé des opérateurs : symbole affiché + plage d’arité [min, max] (None = ∞).

use std::fmt;

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
    Expt,
    Ln,
    Log,
    Sqrt,
}

impl Operateur {
    pub const TOUS: [Operateur; 9] = [
        Operateur::Add,
        Operateur::Sub,
        Operateur::Mul,
        Operateur::Div,
        Operateur::Exp,
        Operateur::Expt,
        Operateur::Ln,
        Operateur::Log,
        Operateur::Sqrt,
    ];

    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Add => "+",
            Operateur::Sub => "-",
            Operateur::Mul => "*",
            Operateur::Div => "/",
            Operateur::Exp => "exp",
            Operateur::Expt => "expt",
            Operateur::Ln => "ln",
            Operateur::Log => "log",
            Operateur::Sqrt => "sqrt",
        }
    }

    pub fn arite(self) -> (usize, Option<usize>) {
        match self {
            Operateur::Add | Operateur::Mul => (0, None),
            Operateur::Sub | Operateur::Div => (1, None),
            Operateur::Exp | Operateur::Ln | Operateur::Sqrt => (1, Some(1)),
            Operateur::Expt | Operateur::Log => (2, Some(2)),
        }
    }

    pub fn depuis_symbole(s: &str) -> Option<Operateur> {
        Operateur::TOUS.into_iter().find(|op| op.symbole() == s)
    }

    /// Vérifie `n` opérandes contre la plage d’arité.
    pub fn verifier_arite(self, n: usize) -> Resultat<()> {
        let (min, max) = self.arite();
        if n < min || max.is_some_and(|max| n > max) {
            return Err(ErreurNoyau::NombreOperandes {
                actuel: n,
                min,
                max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}
