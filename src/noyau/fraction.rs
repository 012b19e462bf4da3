// src/noyau/fraction.rs
//
// Fraction normalisée (feuille de la tour numérique).
// - dénominateur > 0, pgcd(|n|, d) = 1, signe porté par le numérateur
// - immuable : chaque opération rend une nouvelle valeur
//
// Stockage : BigRational (num-rational réduit et normalise le signe à la construction).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use std::fmt;

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// Fraction n/d réduite. Dénominateur nul => DivisionParZero.
    pub fn new(numerateur: impl Into<BigInt>, denominateur: impl Into<BigInt>) -> Resultat<Self> {
        let d = denominateur.into();
        if d.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        Ok(Fraction(BigRational::new(numerateur.into(), d)))
    }

    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Vrai si la fraction est en fait un entier (dénominateur 1).
    pub fn is_integer(&self) -> bool {
        self.0.denom().is_one()
    }

    pub fn negate(&self) -> Fraction {
        Fraction(-&self.0)
    }

    pub fn plus(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 + &autre.0)
    }

    pub fn minus(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 - &autre.0)
    }

    pub fn times(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 * &autre.0)
    }

    pub fn divide(&self, autre: &Fraction) -> Resultat<Fraction> {
        if autre.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        Ok(Fraction(&self.0 / &autre.0))
    }

    pub(crate) fn as_ratio(&self) -> &BigRational {
        &self.0
    }
}

impl From<BigInt> for Fraction {
    fn from(n: BigInt) -> Self {
        Fraction(BigRational::from_integer(n))
    }
}

impl From<BigRational> for Fraction {
    fn from(r: BigRational) -> Self {
        // BigRational est déjà réduit (dénominateur > 0)
        Fraction(r)
    }
}

/// Forme canonique “n/d” (ou “n” si d = 1), signe devant le numérateur.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.numerator();
        let d = self.denominator();
        if d.is_one() {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}
