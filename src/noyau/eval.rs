//! Noyau — évaluation (pipeline réel)
//!
//! caractères -> parenthèses -> jetons -> canon (% , fonctions) -> structure
//!        -> RPN -> Expr -> zéro littéral -> interprète -> normalisation
//!
//! Fonction pure du texte et du mode d’angle : aucune session touchée ici.

use tracing::debug;

use super::erreur::ErreurCalcul;
use super::expr::ModeAngle;
use super::jetons::{caractere_autorise, format_tokens, tokenize};
use super::nombre::normaliser;
use super::rpn::{canoniser, division_par_zero_litterale, from_rpn, to_rpn, verifier_structure};

/// Résultat d’une évaluation : valeur normalisée ou erreur classée.
pub type Evaluation = Result<f64, ErreurCalcul>;

/// Garde-fou : profondeur de l’AST bornée (l’éditeur s’arrête bien avant).
const LONGUEUR_MAX_EXPRESSION: usize = 2048;

/// API publique : évalue un tampon.
pub fn evaluate(tampon: &str, mode: ModeAngle) -> Evaluation {
    let s = tampon.trim_matches(' ');
    if s.is_empty() || s.chars().count() > LONGUEUR_MAX_EXPRESSION {
        return Err(ErreurCalcul::MalformedExpression);
    }

    // 1) Alphabet
    if !s.chars().all(caractere_autorise) {
        return Err(ErreurCalcul::InvalidCharacters);
    }

    // 2) Parenthèses
    verifier_parentheses(s)?;

    // 3-5) Jetons + forme canonique
    let jetons = tokenize(s)?;
    let canon = canoniser(&jetons)?;

    // 6) Structure
    verifier_structure(&canon)?;
    let expr = from_rpn(&to_rpn(&canon)?)?;

    // 8) Diviseur littéral nul (chemin rapide ; l’interprète contrôle aussi)
    division_par_zero_litterale(&canon)?;

    // 7) Interprétation puis 9) normalisation
    let valeur = normaliser(expr.evaluer(mode)?)?;

    debug!(
        expression = s,
        canon = %format_tokens(&canon),
        ?mode,
        valeur,
        "évaluation"
    );
    Ok(valeur)
}

/// Profondeur jamais négative, nulle à la fin.
fn verifier_parentheses(s: &str) -> Result<(), ErreurCalcul> {
    let mut profondeur: usize = 0;
    for c in s.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or(ErreurCalcul::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if profondeur != 0 {
        return Err(ErreurCalcul::UnbalancedParentheses);
    }
    Ok(())
}
