// src/noyau/decimal.rs
//
// Réel inexact = entier “scalé” (valeur × 10^ECHELLE).
// - échelle fixe : 15 chiffres après la virgule
// - arrondi demi-haut (égalité => on s’éloigne de zéro), à la construction
//   et après chaque × / ÷
// - + et - sont exacts à échelle fixe (pas d’arrondi nécessaire)
//
// Affichage canonique : zéros de queue retirés, “N.0” si la valeur est entière
// (pour qu’un jeton relu redonne bien un réel).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;
use std::str::FromStr;

use super::erreur::{ErreurNoyau, Resultat};

/// Nombre de chiffres après la virgule pour tous les réels inexacts.
pub const ECHELLE: u32 = 15;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decimal {
    scaled: BigInt,
}

pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

fn unite() -> BigInt {
    pow10(ECHELLE)
}

/// num / den arrondi demi-haut (den ≠ 0, vérifié par l’appelant).
pub(crate) fn div_arrondi(num: &BigInt, den: &BigInt) -> BigInt {
    let negatif = num.is_negative() != den.is_negative();
    let a = num.abs();
    let b = den.abs();

    let mut q = &a / &b;
    let r = &a % &b;
    if r * 2u32 >= b {
        q += 1u32;
    }

    if negatif {
        -q
    } else {
        q
    }
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal {
            scaled: BigInt::zero(),
        }
    }

    /// Entier “scalé” brut (valeur × 10^15).
    pub fn from_scaled(scaled: BigInt) -> Self {
        Decimal { scaled }
    }

    pub fn scaled(&self) -> &BigInt {
        &self.scaled
    }

    pub fn from_integer(n: &BigInt) -> Self {
        Decimal {
            scaled: n * unite(),
        }
    }

    /// r arrondi demi-haut à l’échelle fixe.
    pub fn from_ratio(r: &BigRational) -> Self {
        Decimal {
            scaled: div_arrondi(&(r.numer() * unite()), r.denom()),
        }
    }

    /// Valeur exacte (aucune perte : scaled / 10^15).
    pub fn to_ratio(&self) -> BigRational {
        BigRational::new(self.scaled.clone(), unite())
    }

    /// Conversion vers f64 (pour log10 / pow “double précision”).
    pub fn to_f64(&self) -> f64 {
        // le texte canonique est toujours un littéral f64 valide
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Décimal le plus court qui représente `x` (même rendu que l’affichage de f64),
    /// puis arrondi à l’échelle. None si x n’est pas fini.
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        Decimal::from_str(&format!("{x}")).ok()
    }

    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.scaled.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.scaled.is_positive()
    }

    /// Vrai s’il ne reste aucune décimale après suppression des zéros de queue.
    pub fn is_integral(&self) -> bool {
        (&self.scaled % unite()).is_zero()
    }

    /// Partie entière (troncature vers zéro).
    pub fn trunc(&self) -> BigInt {
        &self.scaled / unite()
    }

    pub fn negate(&self) -> Decimal {
        Decimal {
            scaled: -&self.scaled,
        }
    }

    pub fn plus(&self, autre: &Decimal) -> Decimal {
        Decimal {
            scaled: &self.scaled + &autre.scaled,
        }
    }

    pub fn minus(&self, autre: &Decimal) -> Decimal {
        Decimal {
            scaled: &self.scaled - &autre.scaled,
        }
    }

    pub fn times(&self, autre: &Decimal) -> Decimal {
        Decimal {
            scaled: div_arrondi(&(&self.scaled * &autre.scaled), &unite()),
        }
    }

    /// Diviseur nul => OperandeNonPositif (le diviseur est rendu en texte).
    pub fn divide(&self, autre: &Decimal) -> Resultat<Decimal> {
        if autre.is_zero() {
            return Err(ErreurNoyau::OperandeNonPositif(autre.to_string()));
        }
        Ok(Decimal {
            scaled: div_arrondi(&(&self.scaled * unite()), &autre.scaled),
        })
    }

    /// √x arrondi demi-haut, calcul entier exact (Newton), sans flottants.
    pub fn sqrt(&self) -> Resultat<Decimal> {
        if self.is_negative() {
            return Err(ErreurNoyau::OperandeNonPositif(self.to_string()));
        }

        // √(s/10^15) × 10^15 = √(s × 10^15)
        let cible = &self.scaled * unite();
        let q = int_sqrt_floor(&cible);

        // arrondi : on monte si (q + 1/2)² ≤ cible  <=>  (2q+1)² ≤ 4·cible
        let double = &q * 2u32 + 1u32;
        let scaled = if &double * &double <= cible * 4u32 {
            q + 1u32
        } else {
            q
        };
        Ok(Decimal { scaled })
    }
}

/* ------------------------ Racine entière (Newton) ------------------------ */

fn int_sqrt_floor(x: &BigInt) -> BigInt {
    if x.is_zero() || x.is_negative() {
        return BigInt::zero();
    }

    let mut y = approx_sqrt_start(x);
    loop {
        let y_next = (&y + (x / &y)) >> 1;
        if y_next >= y {
            let mut z = y_next;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_next;
    }
}

fn approx_sqrt_start(x: &BigInt) -> BigInt {
    let bits = x.bits();
    let half = bits.div_ceil(2);
    BigInt::one() << half
}

/* ------------------------ Texte <-> décimal ------------------------ */

/// Lit `-?\d+` ou `-?\d+\.\d+` ; les chiffres au-delà de l’échelle sont arrondis (demi-haut).
impl FromStr for Decimal {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || ErreurNoyau::JetonInvalide(s.to_string());

        let (negatif, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s),
        };
        let (ent, frac) = match corps.split_once('.') {
            Some((e, f)) => (e, f),
            None => (corps, ""),
        };

        let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if ent.is_empty()
            || !chiffres_ok(ent)
            || !chiffres_ok(frac)
            || (corps.contains('.') && frac.is_empty())
        {
            return Err(invalide());
        }

        let echelle = ECHELLE as usize;
        let (garde, reste) = if frac.len() > echelle {
            frac.split_at(echelle)
        } else {
            (frac, "")
        };

        let mut texte = String::with_capacity(ent.len() + echelle);
        texte.push_str(ent);
        texte.push_str(garde);
        for _ in garde.len()..echelle {
            texte.push('0');
        }

        let mut scaled = BigInt::parse_bytes(texte.as_bytes(), 10).ok_or_else(invalide)?;

        // demi-haut : seul le premier chiffre écarté compte
        if reste.bytes().next().is_some_and(|b| b >= b'5') {
            scaled += 1u32;
        }

        Ok(Decimal {
            scaled: if negatif { -scaled } else { scaled },
        })
    }
}

/// Entier “scalé” -> texte, zéros de queue retirés (au moins un chiffre après le point).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.scaled.abs();
        let u = unite();
        let int_part = &abs / &u;
        let frac_part = &abs % &u;

        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < ECHELLE as usize {
            frac.insert(0, '0');
        }
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };

        if self.scaled.is_negative() {
            write!(f, "-{int_part}.{frac}")
        } else {
            write!(f, "{int_part}.{frac}")
        }
    }
}
