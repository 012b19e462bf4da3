// src/noyau/maths.rs
//
// Transcendantes en base 10, sur la représentation décimale.
// Deux primitives seulement :
// - log10(x) : décalages entiers exacts (÷10 / ×10) + log10 “double” du reste dans [1, 10]
// - pow10(t) : 10^partie_entière exact (BigInt) × 10^partie_fractionnaire “double”
//
// Dérivées :
//   ln(x)      = log10(x) / log10(e)
//   exp(x)     = pow10(x · log10(e))
//   expt(x, n) = pow10(log10(x) · n)
//   log(x, b)  = log10(x) / log10(b)
//
// Les intermédiaires restent des rationnels exacts ; seul le résultat final
// est arrondi (demi-haut) à l’échelle fixe.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use std::sync::OnceLock;

use super::decimal::{div_arrondi, pow10 as puissance_de_dix, Decimal};
use super::erreur::{ErreurNoyau, Resultat};

/// Garde-fou : |partie entière| maximale d’un exposant de pow10.
pub const MAX_EXPOSANT_POW10: i64 = 100_000;

/// Chiffres utilisés pour passer un rationnel exact à un f64.
const CHIFFRES_VERS_F64: u32 = 20;

/// log10(e), 64 décimales.
const LOG10_E_CHIFFRES: &str = "4342944819032518276511289189166050822943970058036665661144537831";

static LOG10_E: OnceLock<BigRational> = OnceLock::new();

fn log10_e() -> &'static BigRational {
    LOG10_E.get_or_init(|| {
        // chiffres ASCII uniquement : accumulation directe, sans analyse faillible
        let n = LOG10_E_CHIFFRES
            .bytes()
            .fold(BigInt::zero(), |acc, b| acc * 10u32 + u32::from(b - b'0'));
        BigRational::new(n, puissance_de_dix(LOG10_E_CHIFFRES.len() as u32))
    })
}

/* ------------------------ Passerelles f64 <-> rationnel ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = puissance_de_dix(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

fn ratio_vers_f64(r: &BigRational) -> f64 {
    let scaled = div_arrondi(&(r.numer() * puissance_de_dix(CHIFFRES_VERS_F64)), r.denom());
    scaled_to_decimal(scaled, CHIFFRES_VERS_F64)
        .parse()
        .unwrap_or(f64::NAN)
}

/// Valeur exacte du décimal le plus court qui représente `x`. NaN / ±∞ => NonRepresentable.
fn ratio_depuis_f64(x: f64) -> Resultat<BigRational> {
    if !x.is_finite() {
        return Err(ErreurNoyau::NonRepresentable);
    }

    let texte = format!("{x}");
    let (negatif, corps) = match texte.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, texte.as_str()),
    };
    let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));

    let mut chiffres = String::with_capacity(ent.len() + frac.len());
    chiffres.push_str(ent);
    chiffres.push_str(frac);

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or(ErreurNoyau::NonRepresentable)?;
    let n = if negatif { -n } else { n };
    Ok(BigRational::new(n, puissance_de_dix(frac.len() as u32)))
}

/* ------------------------ Primitives ------------------------ */

/// log10(x) exact sur la partie entière, “double” sur le reste. x ≤ 0 => erreur.
pub fn log10(x: &Decimal) -> Resultat<BigRational> {
    if !x.is_positive() {
        return Err(ErreurNoyau::OperandeNonPositif(x.to_string()));
    }

    let dix = Decimal::from_integer(&BigInt::from(10));
    let un = Decimal::from_integer(&BigInt::from(1));

    let mut x = x.clone();
    let mut decalage: i64 = 0;

    while x > dix {
        x = x.divide(&dix)?;
        decalage += 1;
    }
    while x < un {
        x = x.times(&dix);
        decalage -= 1;
    }

    let reste = ratio_depuis_f64(x.to_f64().log10())?;
    Ok(BigRational::from_integer(BigInt::from(decalage)) + reste)
}

/// 10^t, résultat arrondi à l’échelle fixe.
pub fn pow10(t: &BigRational) -> Resultat<Decimal> {
    let k = t
        .floor()
        .to_integer()
        .to_i64()
        .filter(|k| k.abs() <= MAX_EXPOSANT_POW10)
        .ok_or(ErreurNoyau::ExposantHorsBornes)?;

    // t = k + f, f ∈ [0, 1)
    let frac = t - BigRational::from_integer(BigInt::from(k));
    let b = ratio_depuis_f64(10f64.powf(ratio_vers_f64(&frac)))?;

    let dix_k = puissance_de_dix(k.unsigned_abs() as u32);
    let valeur = if k >= 0 {
        b * BigRational::from_integer(dix_k)
    } else {
        b / BigRational::from_integer(dix_k)
    };

    Ok(Decimal::from_ratio(&valeur))
}

/* ------------------------ Dérivées ------------------------ */

pub fn ln(x: &Decimal) -> Resultat<Decimal> {
    Ok(Decimal::from_ratio(&(log10(x)? / log10_e())))
}

pub fn exp(x: &Decimal) -> Resultat<Decimal> {
    pow10(&(x.to_ratio() * log10_e()))
}

pub fn expt(x: &Decimal, n: &Decimal) -> Resultat<Decimal> {
    pow10(&(log10(x)? * n.to_ratio()))
}

/// Logarithme de x en base `base`. Base 1 => division par zéro.
pub fn log(x: &Decimal, base: &Decimal) -> Resultat<Decimal> {
    let lx = log10(x)?;
    let lb = log10(base)?;
    if lb.is_zero() {
        return Err(ErreurNoyau::DivisionParZero);
    }
    Ok(Decimal::from_ratio(&(lx / lb)))
}
