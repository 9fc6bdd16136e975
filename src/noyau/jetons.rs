// src/noyau/jetons.rs
//
// Lexer partagé : l’éditeur (terme atomique final) et l’évaluateur lisent
// le même découpage. Chaque jeton garde son offset (octets) dans le tampon.

use super::erreur::ErreurCalcul;
use super::expr::Constante;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral décimal tel que saisi ("12", "0.5", "5.", ".5").
    Num(String),
    Const(Constante),

    // Noms de fonctions (la whitelist est appliquée par rpn.rs)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,

    Pourcent, // %
    Bang,     // ! postfixe
    Virgule,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    /// Offset en octets du premier caractère du jeton.
    pub debut: usize,
}

/// Alphabet accepté par l’évaluateur (étape 1).
pub fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || matches!(
            c,
            '.' | ',' | '%' | '!' | '(' | ')' | '+' | '-' | '*' | '/' | '^' | ' '
        )
        || Constante::depuis_symbole(c).is_some()
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 0.5, 5., .5) — un seul point par nombre
/// - opérateurs + - * / ^, postfixes % et !
/// - parenthèses ( ) et virgule
/// - π et ℯ
/// - identifiants [a-zA-Z]+ (noms de fonctions, tels quels)
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let mut out = Vec::new();
    let mut it = s.char_indices().peekable();

    while let Some((debut, c)) = it.next() {
        let tok = match c {
            ' ' => continue,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '^' => Tok::Caret,
            '%' => Tok::Pourcent,
            '!' => Tok::Bang,
            ',' => Tok::Virgule,

            _ if c.is_ascii_digit() || c == '.' => {
                let mut texte = String::from(c);
                let mut point = c == '.';
                while let Some(&(_, n)) = it.peek() {
                    if n.is_ascii_digit() || (n == '.' && !point) {
                        point |= n == '.';
                        texte.push(n);
                        it.next();
                    } else {
                        break;
                    }
                }
                if texte == "." {
                    return Err(ErreurCalcul::MalformedExpression);
                }
                Tok::Num(texte)
            }

            _ if c.is_ascii_alphabetic() => {
                let mut nom = String::from(c);
                while let Some(&(_, n)) = it.peek() {
                    if !n.is_ascii_alphabetic() {
                        break;
                    }
                    nom.push(n);
                    it.next();
                }
                Tok::Ident(nom)
            }

            _ => match Constante::depuis_symbole(c) {
                Some(k) => Tok::Const(k),
                None => return Err(ErreurCalcul::InvalidCharacters),
            },
        };

        out.push(Jeton { tok, debut });
    }

    Ok(out)
}

/// Format utilitaire (journalisation) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.clone(),
            Tok::Const(k) => k.symbole().to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Pourcent => "%".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<Tok> {
        tokenize(s)
            .unwrap_or_else(|e| panic!("tokenize({s:?}) erreur: {e}"))
            .into_iter()
            .map(|j| j.tok)
            .collect()
    }

    #[test]
    fn nombres_un_seul_point() {
        assert_eq!(toks("12.5"), vec![Tok::Num("12.5".into())]);
        assert_eq!(
            toks("1.2.3"),
            vec![Tok::Num("1.2".into()), Tok::Num(".3".into())]
        );
        assert_eq!(toks("5."), vec![Tok::Num("5.".into())]);
    }

    #[test]
    fn point_seul_refuse() {
        assert_eq!(tokenize("1+."), Err(ErreurCalcul::MalformedExpression));
    }

    #[test]
    fn constantes_et_fonctions() {
        assert_eq!(
            toks("sin(π)*ℯ"),
            vec![
                Tok::Ident("sin".into()),
                Tok::LPar,
                Tok::Const(Constante::Pi),
                Tok::RPar,
                Tok::Star,
                Tok::Const(Constante::E),
            ]
        );
    }

    #[test]
    fn offsets_en_octets() {
        // π occupe deux octets en UTF-8
        let j = tokenize("π5").unwrap();
        assert_eq!(j[0].debut, 0);
        assert_eq!(j[1].debut, 'π'.len_utf8());
    }

    #[test]
    fn caractere_inconnu() {
        assert_eq!(tokenize("2&3"), Err(ErreurCalcul::InvalidCharacters));
        assert!(!caractere_autorise('#'));
        assert!(caractere_autorise('ℯ'));
    }

    #[test]
    fn espaces_ignores() {
        assert_eq!(format_tokens(&toks(" 2 +  3 ")), "2 + 3");
    }
}
