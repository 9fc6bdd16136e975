//! Erreurs classées de l’évaluateur.
//!
//! Toutes locales et récupérables : l’appelant affiche "Error" puis revient
//! au tampon sentinelle. Aucune ne modifie la session (mémoire, Ans).

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("caractères non autorisés")]
    InvalidCharacters,

    #[error("parenthèses non équilibrées")]
    UnbalancedParentheses,

    #[error("expression mal formée")]
    MalformedExpression,

    #[error("hors domaine (ln/log ≤ 0, factorielle non entière ou négative)")]
    DomainError,

    #[error("division par zéro")]
    DivisionByZero,

    #[error("dépassement de capacité")]
    Overflow,

    #[error("résultat non numérique")]
    NonFinite,
}
