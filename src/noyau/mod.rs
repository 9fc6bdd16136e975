//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - erreur.rs   : erreurs classées de l’évaluateur
//! - jetons.rs   : tokenisation (partagée éditeur / évaluateur)
//! - terme.rs    : terme atomique final (±, x², √, !)
//! - tampon.rs   : éditeur de tampon (saisie incrémentale)
//! - rpn.rs      : canonisation + shunting-yard + construction Expr
//! - expr.rs     : AST + interprète (degrés / radians)
//! - nombre.rs   : normalisation, affichage, % exact, factorielle exacte
//! - eval.rs     : pipeline complet
//! - session.rs  : contexte explicite (tampon, Ans, mémoire, mode)

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod nombre;
pub mod rpn;
pub mod session;
pub mod tampon;
pub mod terme;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::evaluate;
pub use expr::ModeAngle;
pub use nombre::formater;
pub use session::{Commande, Session};
