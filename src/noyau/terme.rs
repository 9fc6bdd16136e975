//! Terme atomique final : l’unité sur laquelle agissent ±, x², √ et !.
//!
//! Un terme est, en fin de tampon :
//! - un nombre, ou une constante (π, ℯ)
//! - un groupe parenthésé équilibré, à n’importe quelle profondeur,
//!   précédé de son nom de fonction s’il en a un (`sin(30)` est un terme)
//!
//! suivi d’éventuels `!` postfixes. C’est la même liaison que celle de
//! l’analyseur (rpn.rs) : `!`, `^2` et `(-…)` s’appliquent au même objet.

use super::jetons::{Jeton, Tok};

/// Index (dans `jetons`) du premier jeton du terme final, s’il existe.
pub fn debut_terme_final(jetons: &[Jeton]) -> Option<usize> {
    let mut fin = jetons.len();
    while fin > 0 && jetons[fin - 1].tok == Tok::Bang {
        fin -= 1;
    }
    let dernier = fin.checked_sub(1)?;

    match &jetons[dernier].tok {
        Tok::Num(_) | Tok::Const(_) => Some(dernier),
        Tok::RPar => {
            let ouvrante = parenthese_ouvrante(&jetons[..=dernier])?;
            match ouvrante.checked_sub(1).map(|i| &jetons[i].tok) {
                Some(Tok::Ident(_)) => Some(ouvrante - 1),
                _ => Some(ouvrante),
            }
        }
        _ => None,
    }
}

/// `jetons` se termine par `)` : index de la `(` correspondante.
fn parenthese_ouvrante(jetons: &[Jeton]) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, j) in jetons.iter().enumerate().rev() {
        match j.tok {
            Tok::RPar => profondeur += 1,
            Tok::LPar => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `(-X)` où X est lui-même un terme complet : renvoie l’index de X.
/// Sert à la double négation (`(-5)` redevient `5`).
pub fn negation_simple(terme: &[Jeton]) -> Option<usize> {
    match terme {
        [ouv, moins, interieur @ .., ferm]
            if ouv.tok == Tok::LPar && moins.tok == Tok::Minus && ferm.tok == Tok::RPar =>
        {
            (!interieur.is_empty() && debut_terme_final(interieur) == Some(0)).then_some(2)
        }
        _ => None,
    }
}
