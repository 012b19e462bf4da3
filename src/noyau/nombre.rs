// src/noyau/nombre.rs
//
// Tour numérique : Entier | Rationnel | Reel
//
// Règles (contagion) :
// - un opérande Reel => calcul en décimal (échelle fixe)
// - sinon calcul exact (rationnel)
// - dans les deux cas : effondrement
//     rationnel de dénominateur 1    -> Entier
//     décimal sans partie fractionnaire -> Entier
//
// IMPORTANT :
// - Rationnel ne porte JAMAIS un dénominateur 1 (tous les constructeurs passent par l’effondrement).
// - Un Reel lu depuis un jeton reste Reel (“5.0” n’est pas 5) ; seul un résultat s’effondre.
// - Égalité = même variante + même valeur normalisée : 0.5 ≠ 1/2.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use std::fmt;
use std::str::FromStr;

use super::decimal::Decimal;
use super::erreur::{ErreurNoyau, Resultat};
use super::fraction::Fraction;
use super::jetons::{forme_nombre, FormeNombre};
use super::maths;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nombre {
    Entier(BigInt),
    Rationnel(Rationnel),
    Reel(Decimal),
}

/// Fraction garantie non entière (dénominateur > 1).
/// Champ privé : seul `Nombre::rationnel` (effondrement) en fabrique une.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rationnel(Fraction);

impl Rationnel {
    pub fn fraction(&self) -> &Fraction {
        &self.0
    }
}

impl fmt::Display for Rationnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Nombre {
    /* ------------------------ Constructeurs ------------------------ */

    pub fn entier(n: impl Into<BigInt>) -> Nombre {
        Nombre::Entier(n.into())
    }

    /// Rationnel exact ; s’effondre en Entier si le dénominateur vaut 1.
    pub fn rationnel(f: Fraction) -> Nombre {
        if f.is_integer() {
            Nombre::Entier(f.numerator().clone())
        } else {
            Nombre::Rationnel(Rationnel(f))
        }
    }

    /// Raccourci : n/d (dénominateur nul => DivisionParZero).
    pub fn fraction(n: impl Into<BigInt>, d: impl Into<BigInt>) -> Resultat<Nombre> {
        Ok(Nombre::rationnel(Fraction::new(n, d)?))
    }

    pub fn reel(d: Decimal) -> Nombre {
        Nombre::Reel(d)
    }

    fn depuis_ratio(r: BigRational) -> Nombre {
        Nombre::rationnel(Fraction::from(r))
    }

    fn depuis_decimal(d: Decimal) -> Nombre {
        if d.is_integral() {
            Nombre::Entier(d.trunc())
        } else {
            Nombre::Reel(d)
        }
    }

    /* ------------------------ Conversions ------------------------ */

    pub fn est_exact(&self) -> bool {
        !matches!(self, Nombre::Reel(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Nombre::Entier(n) => n.is_zero(),
            Nombre::Rationnel(r) => r.0.is_zero(),
            Nombre::Reel(d) => d.is_zero(),
        }
    }

    /// Partie entière (troncature vers zéro).
    pub fn to_integer(&self) -> BigInt {
        match self {
            Nombre::Entier(n) => n.clone(),
            Nombre::Rationnel(r) => r.0.numerator() / r.0.denominator(),
            Nombre::Reel(d) => d.trunc(),
        }
    }

    /// Valeur exacte sous forme de fraction (un réel donne scaled / 10^15 réduit).
    pub fn to_rational(&self) -> Fraction {
        match self {
            Nombre::Entier(n) => Fraction::from(n.clone()),
            Nombre::Rationnel(r) => r.0.clone(),
            Nombre::Reel(d) => Fraction::from(d.to_ratio()),
        }
    }

    /// Valeur décimale à l’échelle fixe (arrondi demi-haut pour les rationnels).
    pub fn to_real(&self) -> Decimal {
        match self {
            Nombre::Entier(n) => Decimal::from_integer(n),
            Nombre::Rationnel(r) => Decimal::from_ratio(r.0.as_ratio()),
            Nombre::Reel(d) => d.clone(),
        }
    }

    /// Seulement pour les exacts (appelé après le test de contagion).
    fn ratio(&self) -> BigRational {
        match self {
            Nombre::Entier(n) => BigRational::from_integer(n.clone()),
            Nombre::Rationnel(r) => r.0.as_ratio().clone(),
            Nombre::Reel(d) => d.to_ratio(),
        }
    }

    /* ------------------------ Contagion ------------------------ */

    fn combine(
        &self,
        autre: &Nombre,
        exact: impl FnOnce(BigRational, BigRational) -> BigRational,
        inexact: impl FnOnce(&Decimal, &Decimal) -> Decimal,
    ) -> Nombre {
        if self.est_exact() && autre.est_exact() {
            Nombre::depuis_ratio(exact(self.ratio(), autre.ratio()))
        } else {
            Nombre::depuis_decimal(inexact(&self.to_real(), &autre.to_real()))
        }
    }

    /* ------------------------ Arithmétique de base ------------------------ */

    pub fn negate(&self) -> Nombre {
        match self {
            Nombre::Entier(n) => Nombre::Entier(-n),
            Nombre::Rationnel(r) => Nombre::Rationnel(Rationnel(r.0.negate())),
            Nombre::Reel(d) => Nombre::Reel(d.negate()),
        }
    }

    /// (+ a) : élément neutre 0 + a = a.
    pub fn plus_unaire(&self) -> Nombre {
        self.clone()
    }

    pub fn plus(&self, autre: &Nombre) -> Nombre {
        self.combine(autre, |a, b| a + b, Decimal::plus)
    }

    /// (- a) : 0 - a.
    pub fn minus_unaire(&self) -> Nombre {
        self.negate()
    }

    pub fn minus(&self, autre: &Nombre) -> Nombre {
        self.combine(autre, |a, b| a - b, Decimal::minus)
    }

    /// (* a) : élément neutre 1 * a = a.
    pub fn times_unaire(&self) -> Nombre {
        self.clone()
    }

    pub fn times(&self, autre: &Nombre) -> Nombre {
        self.combine(autre, |a, b| a * b, Decimal::times)
    }

    /// (/ a) : 1 / a.
    pub fn divide_unaire(&self) -> Resultat<Nombre> {
        Nombre::Entier(BigInt::from(1)).divide(self)
    }

    /// Diviseur exact nul => DivisionParZero ; réel nul => OperandeNonPositif.
    pub fn divide(&self, autre: &Nombre) -> Resultat<Nombre> {
        if autre.est_exact() && autre.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        if self.est_exact() && autre.est_exact() {
            return Ok(Nombre::depuis_ratio(self.ratio() / autre.ratio()));
        }
        Ok(Nombre::depuis_decimal(
            self.to_real().divide(&autre.to_real())?,
        ))
    }

    /* ------------------------ Transcendantes (toujours via décimal) ------------------------ */

    pub fn sqrt(&self) -> Resultat<Nombre> {
        Ok(Nombre::depuis_decimal(self.to_real().sqrt()?))
    }

    pub fn exp(&self) -> Resultat<Nombre> {
        Ok(Nombre::depuis_decimal(maths::exp(&self.to_real())?))
    }

    pub fn ln(&self) -> Resultat<Nombre> {
        Ok(Nombre::depuis_decimal(maths::ln(&self.to_real())?))
    }

    /// self^n. Entier^entier≥0 reste exact ; tout le reste passe par log10/pow10.
    pub fn expt(&self, n: &Nombre) -> Resultat<Nombre> {
        if let (Nombre::Entier(base), Nombre::Entier(e)) = (self, n) {
            if !e.is_negative() {
                let e = e
                    .to_u32()
                    .filter(|e| i64::from(*e) <= maths::MAX_EXPOSANT_POW10)
                    .ok_or(ErreurNoyau::ExposantHorsBornes)?;
                return Ok(Nombre::Entier(base.pow(e)));
            }
        }
        Ok(Nombre::depuis_decimal(maths::expt(
            &self.to_real(),
            &n.to_real(),
        )?))
    }

    /// Logarithme de self en base `base`.
    pub fn log(&self, base: &Nombre) -> Resultat<Nombre> {
        Ok(Nombre::depuis_decimal(maths::log(
            &self.to_real(),
            &base.to_real(),
        )?))
    }
}

/* ------------------------ Conversions depuis les briques ------------------------ */

impl From<i32> for Nombre {
    fn from(n: i32) -> Self {
        Nombre::Entier(BigInt::from(n))
    }
}

impl From<i64> for Nombre {
    fn from(n: i64) -> Self {
        Nombre::Entier(BigInt::from(n))
    }
}

impl From<BigInt> for Nombre {
    fn from(n: BigInt) -> Self {
        Nombre::Entier(n)
    }
}

impl From<Fraction> for Nombre {
    fn from(f: Fraction) -> Self {
        Nombre::rationnel(f)
    }
}

impl From<Decimal> for Nombre {
    fn from(d: Decimal) -> Self {
        Nombre::Reel(d)
    }
}

/// Lecture d’un jeton nombre : variante la plus précise (entier / n/d / décimal).
impl FromStr for Nombre {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || ErreurNoyau::JetonInvalide(s.to_string());

        match forme_nombre(s).ok_or_else(invalide)? {
            FormeNombre::Entier => s.parse::<BigInt>().map(Nombre::Entier).map_err(|_| invalide()),
            FormeNombre::Fraction => {
                let (n, d) = s.split_once('/').ok_or_else(invalide)?;
                let n = n.parse::<BigInt>().map_err(|_| invalide())?;
                let d = d.parse::<BigInt>().map_err(|_| invalide())?;
                Nombre::fraction(n, d)
            }
            FormeNombre::Decimal => s.parse::<Decimal>().map(Nombre::Reel),
        }
    }
}

/// Texte canonique (c’est aussi le jeton produit par la reconstruction).
impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Entier(n) => write!(f, "{n}"),
            Nombre::Rationnel(r) => write!(f, "{r}"),
            Nombre::Reel(d) => write!(f, "{d}"),
        }
    }
}
