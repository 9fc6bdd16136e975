//! Tests fuzz safe : robustesse + invariants, générés par proptest.
//!
//! But : marteler l’éditeur et l’évaluateur sans brûler la machine.
//! - suites de commandes bornées (longueur, nombre de cas)
//! - invariant clé : après chaque commande, le tampon reste éditable
//!   (alphabet, pas de `))` orphelin, pas d’opérateurs doublés, un `.` par nombre)
//! - l’évaluateur ne panique jamais ; tout succès est fini, arrondi, borné

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::eval::evaluate;
use super::expr::ModeAngle;
use super::jetons::caractere_autorise;
use super::nombre::{normaliser, MAGNITUDE_MAX, MAGNITUDE_MIN};
use super::session::{Commande, Session};

/// Borne large : saisie ≤ 200, puis au plus une insertion (rappel, fonction…).
const LONGUEUR_OBSERVABLE_MAX: usize = 260;

#[derive(Clone, Debug)]
enum Action {
    Cmd(Commande),
    Calculer,
    Reprendre,
}

fn commande() -> impl Strategy<Value = Commande> {
    let touches: Vec<char> = "0123456789.+-*/^()%".chars().collect();
    prop_oneof![
        8 => prop::sample::select(touches).prop_map(Commande::Append),
        1 => prop::sample::select(vec!["sin", "cos", "tan", "ln", "log", "sqrt", "exp"])
            .prop_map(Commande::InsertFunction),
        1 => prop::sample::select(vec!['π', 'ℯ', 'x']).prop_map(Commande::InsertConstant),
        1 => Just(Commande::ToPercent),
        2 => Just(Commande::Backspace),
        1 => Just(Commande::Negate),
        1 => Just(Commande::Square),
        1 => Just(Commande::Sqrt),
        1 => Just(Commande::Factorial),
        1 => Just(Commande::RecallMemory),
        1 => Just(Commande::RecallLastAnswer),
        1 => Just(Commande::StockerMemoire),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        12 => commande().prop_map(Action::Cmd),
        1 => Just(Action::Calculer),
        1 => Just(Action::Reprendre),
        1 => Just(Action::Cmd(Commande::Clear)),
    ]
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

fn verifier_tampon(texte: &str) -> Result<(), TestCaseError> {
    prop_assert!(!texte.is_empty(), "tampon vide");
    prop_assert!(
        texte.chars().all(caractere_autorise),
        "hors alphabet: {texte:?}"
    );
    prop_assert!(
        texte.chars().count() <= LONGUEUR_OBSERVABLE_MAX,
        "trop long: {texte:?}"
    );

    let mut profondeur: i64 = 0;
    let mut precedent: Option<char> = None;
    for c in texte.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => profondeur -= 1,
            _ => {}
        }
        prop_assert!(profondeur >= 0, "parenthèse orpheline: {texte:?}");
        prop_assert!(
            !(est_operateur(c) && precedent.is_some_and(est_operateur)),
            "opérateurs doublés: {texte:?}"
        );
        precedent = Some(c);
    }

    let nombres = texte.split(|c: char| !(c.is_ascii_digit() || c == '.'));
    for n in nombres {
        prop_assert!(n.matches('.').count() <= 1, "deux points: {texte:?}");
    }
    Ok(())
}

fn verifier_resultat(v: f64) -> Result<(), TestCaseError> {
    prop_assert!(v.is_finite());
    prop_assert!(v.abs() <= MAGNITUDE_MAX);
    prop_assert!(v == 0.0 || v.abs() >= MAGNITUDE_MIN);
    // déjà arrondi : normaliser est idempotent
    prop_assert_eq!(normaliser(v), Ok(v));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fuzz_commandes_gardent_le_tampon_valide(
        actions in prop::collection::vec(action(), 0..120),
        radians in any::<bool>(),
    ) {
        let mode = if radians { ModeAngle::Radians } else { ModeAngle::Degres };
        let mut s = Session::new(mode);

        for a in actions {
            match a {
                Action::Cmd(c) => {
                    s.executer(c);
                }
                Action::Calculer => {
                    let ans = s.dernier_resultat();
                    let memoire = s.memoire();
                    match s.calculer() {
                        Ok(v) => verifier_resultat(v)?,
                        Err(_) => {
                            prop_assert_eq!(s.dernier_resultat(), ans);
                            prop_assert_eq!(s.memoire(), memoire);
                        }
                    }
                }
                Action::Reprendre => s.reprendre_apres_erreur(),
            }
            verifier_tampon(s.tampon())?;
        }
    }

    #[test]
    fn fuzz_evaluation_ne_panique_pas(expr in "[0-9.+*/^()%!πℯ a-z,-]{0,40}") {
        for mode in [ModeAngle::Degres, ModeAngle::Radians] {
            if let Ok(v) = evaluate(&expr, mode) {
                verifier_resultat(v)?;
            }
        }
    }

    #[test]
    fn fuzz_entiers_exacts(a in -9999i64..9999, b in -9999i64..9999) {
        let expr = format!("({a})+({b})*2");
        prop_assert_eq!(evaluate(&expr, ModeAngle::Degres), Ok((a + 2 * b) as f64));
    }
}
