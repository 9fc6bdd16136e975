//! Tests scientifiques (campagne) : propriétés attendues du noyau.
//!
//! - résultats de référence (priorités, trig, factorielle)
//! - classes d’erreur
//! - arrondi et bornes de sortie
//! - lois de l’éditeur (backspace, clear, double négation)

use super::erreur::ErreurCalcul;
use super::eval::evaluate;
use super::expr::ModeAngle::{Degres, Radians};
use super::tampon::{Tampon, SENTINELLE};

fn proche(expr: &str, mode: super::expr::ModeAngle, attendu: f64) {
    let v = evaluate(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

fn erreur(expr: &str, attendue: ErreurCalcul) {
    assert_eq!(evaluate(expr, Degres), Err(attendue), "expr={expr:?}");
}

/* ------------------------ Valeurs de référence ------------------------ */

#[test]
fn sci_priorites() {
    assert_eq!(evaluate("2+3*4", Degres), Ok(14.0));
    assert_eq!(evaluate("(2+3)*4", Degres), Ok(20.0));
    assert_eq!(evaluate("2^3^2", Degres), Ok(512.0));
    assert_eq!(evaluate("10-4-3", Degres), Ok(3.0));
    assert_eq!(evaluate("2*-3", Degres), Ok(-6.0));
    assert_eq!(evaluate("2*(-3)", Degres), Ok(-6.0));
}

#[test]
fn sci_moins_unaire() {
    assert_eq!(evaluate("-2^2", Degres), Ok(4.0));
    assert_eq!(evaluate("3-2^2", Degres), Ok(-1.0));
    assert_eq!(evaluate("-(2+3)", Degres), Ok(-5.0));
    assert_eq!(evaluate("2^(-1)", Degres), Ok(0.5));
}

#[test]
fn sci_factorielle() {
    assert_eq!(evaluate("5!", Degres), Ok(120.0));
    assert_eq!(evaluate("0!", Degres), Ok(1.0));
    assert_eq!(evaluate("(2+1)!", Degres), Ok(6.0));
    assert_eq!(evaluate("(3!)!", Degres), Ok(720.0));
    assert_eq!(evaluate("-5!", Degres), Ok(-120.0));
    assert_eq!(evaluate("2^3!", Degres), Ok(64.0));
    erreur("171!", ErreurCalcul::Overflow);
    erreur("(-1)!", ErreurCalcul::DomainError);
    erreur("2.5!", ErreurCalcul::DomainError);
    // 18! > 1e15 : fini mais hors bornes de sortie
    erreur("18!", ErreurCalcul::Overflow);
}

#[test]
fn sci_trig_degres_radians() {
    proche("sin(30)", Degres, 0.5);
    proche("cos(60)", Degres, 0.5);
    proche("tan(45)", Degres, 1.0);
    proche("sin(π/6)", Radians, 0.5);
    proche("cos(π/3)", Radians, 0.5);
    proche("tan(π/4)", Radians, 1.0);
}

#[test]
fn sci_logarithmes() {
    proche("ln(ℯ)", Degres, 1.0);
    proche("log(100)", Degres, 2.0);
    proche("sqrt(16)", Degres, 4.0);
    erreur("ln(-1)", ErreurCalcul::DomainError);
    erreur("log(0)", ErreurCalcul::DomainError);
    erreur("ln(0-3)", ErreurCalcul::DomainError);
}

#[test]
fn sci_classes_erreur() {
    erreur("1/0", ErreurCalcul::DivisionByZero);
    erreur("2$3", ErreurCalcul::InvalidCharacters);
    erreur("(1+2", ErreurCalcul::UnbalancedParentheses);
    erreur("1+2)", ErreurCalcul::UnbalancedParentheses);
    erreur("2^^3", ErreurCalcul::MalformedExpression);
    erreur("3*()", ErreurCalcul::MalformedExpression);
    erreur("foo(2)", ErreurCalcul::MalformedExpression);
}

/* ------------------------ Arrondi + bornes ------------------------ */

#[test]
fn sci_arrondi_douze_decimales() {
    assert_eq!(evaluate("0.1+0.2", Degres), Ok(0.3));
    assert_eq!(evaluate("1/3", Degres), Ok(0.333333333333));
    // sin(180°) ≈ 1.2e-16 => 0 exact
    assert_eq!(evaluate("sin(180)", Degres), Ok(0.0));
}

#[test]
fn sci_magnitude_bornee() {
    assert_eq!(evaluate("10^15", Degres), Ok(1e15));
    erreur("10^15+1", ErreurCalcul::Overflow);
    erreur("(0-10)^16", ErreurCalcul::Overflow);
    assert_eq!(evaluate("10^(0-16)", Degres), Ok(0.0));
}

#[test]
fn sci_pourcent() {
    assert_eq!(evaluate("50%", Degres), Ok(0.5));
    assert_eq!(evaluate("200*10%", Degres), Ok(20.0));
}

/* ------------------------ Lois de l’éditeur ------------------------ */

#[test]
fn sci_backspace_jamais_vide() {
    let mut t = Tampon::default();
    t.insert_function("sin");
    for c in "30)+2.5-".chars() {
        t.append(c);
    }
    t.insert_constant('π');
    assert_eq!(t.texte(), "sin(30)+2.5-π");

    for _ in 0..64 {
        let s = t.backspace().to_string();
        assert!(!s.is_empty());
    }
    assert_eq!(t.texte(), SENTINELLE);
}

#[test]
fn sci_clear_idempotent() {
    let mut a = Tampon::default();
    a.append('4');
    a.clear();
    let une = a.clone();
    a.clear();
    assert_eq!(a, une);
    assert_eq!(a.texte(), SENTINELLE);
}

#[test]
fn sci_double_negation() {
    let mut t = Tampon::default();
    t.append('5');
    t.negate();
    assert_eq!(evaluate(t.texte(), Degres), Ok(-5.0));
    t.negate();
    assert_eq!(t.texte(), "5");
}

#[test]
fn sci_editeur_puis_evaluation() {
    // √ puis ! : le `!` porte sur l’appel entier, sqrt(25)! = 5! = 120
    let mut t = Tampon::default();
    t.append('2');
    t.append('5');
    t.sqrt();
    assert_eq!(t.texte(), "sqrt(25)");
    t.factorial();
    assert_eq!(t.texte(), "sqrt(25)!");
    assert_eq!(evaluate(t.texte(), Degres), Ok(120.0));

    let mut t = Tampon::default();
    t.append('3');
    t.square();
    t.append('+');
    t.append('4');
    t.square();
    assert_eq!(t.texte(), "3^2+4^2");
    assert_eq!(evaluate(t.texte(), Degres), Ok(25.0));
}
