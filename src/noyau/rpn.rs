// src/noyau/rpn.rs
//
// Jetons -> forme canonique -> RPN (shunting-yard) -> AST
//
// Règles:
// - `%` devient `/ 100` (canonisation)
// - Ident(name): doit être une fonction connue suivie de `(`
// - Moins unaire: préfixe, lie plus fort que tout opérateur binaire
//   (y compris `^`) : "-2^2" => (-2)^2
// - `!` postfixe: sort directement en RPN, s’applique à la dernière valeur
//   complète (nombre, constante, groupe, appel de fonction)
// - `^` associatif à droite
//
// NOTE:
// - Les fonctions restent “collées” à leur argument et sortent après la
//   parenthèse fermante (comme un opérateur).

use super::erreur::ErreurCalcul;
use super::expr::{Constante, Expr, Fonction, Op};
use super::jetons::{Jeton, Tok};

/// Élément de la sortie postfixe.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Nombre(f64),
    Const(Constante),
    Binaire(Op),
    Moins,
    Appel(Fonction),
    Fact,
}

/// Pile d’opérateurs en attente.
#[derive(Clone, Copy, Debug)]
enum EnAttente {
    LPar,
    Binaire(Op),
    Moins,
    Appel(Fonction),
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
        Op::Pow => 3,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Pow)
}

fn binaire(tok: &Tok) -> Option<Op> {
    match tok {
        Tok::Plus => Some(Op::Add),
        Tok::Minus => Some(Op::Sub),
        Tok::Star => Some(Op::Mul),
        Tok::Slash => Some(Op::Div),
        Tok::Caret => Some(Op::Pow),
        _ => None,
    }
}

/// Étapes 3 + 5 : `%` -> `/100`, noms de fonctions vérifiés.
pub fn canoniser(jetons: &[Jeton]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::with_capacity(jetons.len() + 4);

    for (i, j) in jetons.iter().enumerate() {
        match &j.tok {
            Tok::Pourcent => {
                out.push(Tok::Slash);
                out.push(Tok::Num("100".to_string()));
            }
            Tok::Ident(nom) => {
                let suivi_de_par = jetons.get(i + 1).is_some_and(|s| s.tok == Tok::LPar);
                if Fonction::depuis_nom(nom).is_none() || !suivi_de_par {
                    return Err(ErreurCalcul::MalformedExpression);
                }
                out.push(j.tok.clone());
            }
            // pas de fonction à plusieurs arguments
            Tok::Virgule => return Err(ErreurCalcul::MalformedExpression),
            t => out.push(t.clone()),
        }
    }

    Ok(out)
}

/// Étape 6 : `^^` et groupes vides refusés.
pub fn verifier_structure(canon: &[Tok]) -> Result<(), ErreurCalcul> {
    for paire in canon.windows(2) {
        match (&paire[0], &paire[1]) {
            (Tok::Caret, Tok::Caret) | (Tok::LPar, Tok::RPar) => {
                return Err(ErreurCalcul::MalformedExpression)
            }
            _ => {}
        }
    }
    Ok(())
}

/// Étape 8 : diviseur littéral nul (`/0`, `/0.0`), sauf s’il est lui-même
/// opérande d’un `!` ou d’un `^` (`5/0!` vaut 5).
pub fn division_par_zero_litterale(canon: &[Tok]) -> Result<(), ErreurCalcul> {
    for (i, t) in canon.iter().enumerate() {
        if *t != Tok::Slash {
            continue;
        }
        let Some(Tok::Num(n)) = canon.get(i + 1) else {
            continue;
        };
        let lie = matches!(canon.get(i + 2), Some(Tok::Bang | Tok::Caret));
        if !lie && n.parse::<f64>().is_ok_and(|v| v == 0.0) {
            return Err(ErreurCalcul::DivisionByZero);
        }
    }
    Ok(())
}

/// Convertit la forme canonique en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Const(Pi), Slash, Num("6"), RPar]
///   rpn:    [Const(Pi), Nombre(6), Binaire(Div), Appel(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    use ErreurCalcul::MalformedExpression as Mal;

    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<EnAttente> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions.
    let mut prev_was_value = false;

    for tok in tokens {
        match tok {
            Tok::Num(texte) => {
                if prev_was_value {
                    return Err(Mal);
                }
                let v: f64 = texte.parse().map_err(|_| Mal)?;
                out.push(Rpn::Nombre(v));
            }

            Tok::Const(k) => {
                if prev_was_value {
                    return Err(Mal);
                }
                out.push(Rpn::Const(*k));
            }

            Tok::Ident(nom) => {
                if prev_was_value {
                    return Err(Mal);
                }
                let f = Fonction::depuis_nom(nom).ok_or(Mal)?;
                // la fonction attend sur la pile, elle sortira après son argument
                ops.push(EnAttente::Appel(f));
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(Mal);
                }
                ops.push(EnAttente::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(Mal);
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(EnAttente::LPar) => break,
                        Some(EnAttente::Binaire(op)) => out.push(Rpn::Binaire(op)),
                        Some(EnAttente::Moins) => out.push(Rpn::Moins),
                        Some(EnAttente::Appel(_)) => return Err(Mal),
                        None => return Err(ErreurCalcul::UnbalancedParentheses),
                    }
                }
                // si une fonction est au sommet, elle sort aussi
                if let Some(&EnAttente::Appel(f)) = ops.last() {
                    ops.pop();
                    out.push(Rpn::Appel(f));
                }
            }

            Tok::Bang => {
                if !prev_was_value {
                    return Err(Mal);
                }
                out.push(Rpn::Fact);
            }

            Tok::Minus if !prev_was_value => ops.push(EnAttente::Moins),

            // plus unaire : neutre
            Tok::Plus if !prev_was_value => {}

            Tok::Pourcent | Tok::Virgule => return Err(Mal),

            t => {
                let op = binaire(t).ok_or(Mal)?;
                if !prev_was_value {
                    return Err(Mal);
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(&top) = ops.last() {
                    let doit_pop = match top {
                        EnAttente::LPar | EnAttente::Appel(_) => false,
                        EnAttente::Moins => true,
                        EnAttente::Binaire(o) => {
                            if is_right_associative(op) {
                                precedence(o) > precedence(op)
                            } else {
                                precedence(o) >= precedence(op)
                            }
                        }
                    };
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(match top {
                        EnAttente::Binaire(o) => Rpn::Binaire(o),
                        _ => Rpn::Moins,
                    });
                }

                ops.push(EnAttente::Binaire(op));
                prev_was_value = false;
                continue;
            }
        }

        prev_was_value = matches!(tok, Tok::Num(_) | Tok::Const(_) | Tok::RPar | Tok::Bang);
    }

    // opérateur pendant en fin d’expression
    if !prev_was_value {
        return Err(Mal);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            EnAttente::LPar => return Err(ErreurCalcul::UnbalancedParentheses),
            EnAttente::Appel(_) => return Err(Mal),
            EnAttente::Binaire(o) => out.push(Rpn::Binaire(o)),
            EnAttente::Moins => out.push(Rpn::Moins),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurCalcul> {
    use ErreurCalcul::MalformedExpression as Mal;

    let mut st: Vec<Expr> = Vec::new();

    for item in rpn {
        let e = match item {
            Rpn::Nombre(v) => Expr::Nombre(*v),
            Rpn::Const(k) => Expr::Const(*k),
            Rpn::Moins => Expr::Moins(Box::new(st.pop().ok_or(Mal)?)),
            Rpn::Fact => Expr::Factorielle(Box::new(st.pop().ok_or(Mal)?)),
            Rpn::Appel(f) => Expr::Appel(*f, Box::new(st.pop().ok_or(Mal)?)),
            Rpn::Binaire(op) => {
                let b = st.pop().ok_or(Mal)?;
                let a = st.pop().ok_or(Mal)?;
                Expr::Binaire(*op, Box::new(a), Box::new(b))
            }
        };
        st.push(e);
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(Mal),
    }
}
