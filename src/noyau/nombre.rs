// src/noyau/nombre.rs
//
// Outils numériques du noyau :
// - normalisation du résultat (arrondi 12 décimales, bornes)
// - affichage décimal (jamais d’exposant : le tampon ne sait pas l’écrire)
// - pourcentage exact (rationnels) pour la réécriture textuelle
// - factorielle exacte (big int) puis conversion f64

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalcul;

/// Décimales conservées (bruit flottant : 0.1+0.2 => 0.3).
pub const DECIMALES: usize = 12;

/// Au-delà : dépassement.
pub const MAGNITUDE_MAX: f64 = 1e15;

/// En deçà (non nul) : on écrase à 0.
pub const MAGNITUDE_MIN: f64 = 1e-15;

/// Plus grand n tel que n! reste un f64 fini.
pub const FACTORIELLE_MAX: u32 = 170;

/// Étape 9 : fini, arrondi, borné.
pub fn normaliser(v: f64) -> Result<f64, ErreurCalcul> {
    if v.is_nan() {
        return Err(ErreurCalcul::NonFinite);
    }
    if v.is_infinite() {
        return Err(ErreurCalcul::Overflow);
    }

    let r: f64 = format!("{v:.DECIMALES$}")
        .parse()
        .map_err(|_| ErreurCalcul::NonFinite)?;

    if r.abs() > MAGNITUDE_MAX {
        return Err(ErreurCalcul::Overflow);
    }
    // couvre aussi -0 => 0
    if r.abs() < MAGNITUDE_MIN {
        return Ok(0.0);
    }
    Ok(r)
}

/// Texte d’un résultat normalisé, tel qu’il repart dans le tampon.
pub fn formater(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// FACT(n) : entier, 0 ≤ n ≤ 170.
pub fn factorielle(n: f64) -> Result<f64, ErreurCalcul> {
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return Err(ErreurCalcul::DomainError);
    }
    if n > f64::from(FACTORIELLE_MAX) {
        return Err(ErreurCalcul::Overflow);
    }

    // n ≤ 170 : la conversion est exacte
    let n = n as u32;
    let produit = (2..=n).fold(BigUint::from(1u32), |acc, k| acc * k);
    produit.to_f64().ok_or(ErreurCalcul::Overflow)
}

/* ------------------------ Pourcentage exact ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Littéral décimal ("12.5", "5.", ".5") -> rationnel exact.
pub fn decimal_vers_rationnel(texte: &str) -> Option<BigRational> {
    let (ent, frac) = texte.split_once('.').unwrap_or((texte, ""));
    if ent.is_empty() && frac.is_empty() {
        return None;
    }
    if !ent.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    Some(BigRational::new(n, pow10(frac.len())))
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal, zéros de fin retirés.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let mut out = if neg {
        format!("-{int_part}")
    } else {
        format!("{int_part}")
    };

    if digits > 0 && !frac_part.is_zero() {
        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < digits {
            frac.insert(0, '0');
        }
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// "12.5" -> "0.125" ; division par 100 sans passer par les flottants.
pub fn pourcent_exact(texte: &str) -> Option<String> {
    let r = decimal_vers_rationnel(texte)? / BigRational::from_integer(BigInt::from(100));

    // dénominateur = diviseur de 10^(décimales + 2)
    let decimales = texte.split_once('.').map_or(0, |(_, f)| f.len()) + 2;
    let scaled = r * BigRational::from_integer(pow10(decimales));
    if !scaled.is_integer() {
        return None;
    }
    Some(scaled_to_decimal(scaled.to_integer(), decimales))
}
