//! Éditeur de tampon : le texte de l’expression en cours de saisie.
//!
//! Contrat : une opération qui casserait la grammaire est un no-op
//! silencieux (on renvoie le tampon inchangé), jamais une erreur.
//!
//! Invariants visibles après chaque opération :
//! - tampon == "0" (sentinelle) ou texte sur l’alphabet du noyau
//! - jamais deux opérateurs binaires consécutifs
//! - jamais plus de `)` que de `(`
//! - au plus un `.` par nombre

use tracing::trace;

use super::expr::{Constante, Fonction};
use super::jetons::{tokenize, Jeton};
use super::nombre::{formater, pourcent_exact};
use super::terme::{debut_terme_final, negation_simple};

/// Tampon vide.
pub const SENTINELLE: &str = "0";

/// Garde-fou : au-delà, `append` ne fait plus rien.
const LONGUEUR_MAX_SAISIE: usize = 200;

/// Fonctions, constantes et rappels (MR / Ans).
const LONGUEUR_MAX_INSERTION: usize = 190;

/// ±, x², √, !, %
const LONGUEUR_MAX_UNAIRE: usize = 180;

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

fn est_constante(c: char) -> bool {
    Constante::depuis_symbole(c).is_some()
}

/// Fin de valeur : une `(`, un chiffre ou une constante ajoutés ici
/// demandent un `*` implicite.
fn termine_par_valeur(s: &str) -> bool {
    s.chars().last().is_some_and(|c| {
        c.is_ascii_digit() || est_constante(c) || matches!(c, '.' | ')' | '!' | '%')
    })
}

/// Nom de fonction amputé de sa `(` (après un backspace) : seule `(` le complète.
fn termine_par_lettre(s: &str) -> bool {
    s.chars().last().is_some_and(|c| c.is_ascii_alphabetic())
}

fn parentheses_ouvertes(s: &str) -> usize {
    let ouv = s.chars().filter(|&c| c == '(').count();
    let ferm = s.chars().filter(|&c| c == ')').count();
    ouv.saturating_sub(ferm)
}

/// Plus long suffixe fait de chiffres et de points.
fn nombre_final(s: &str) -> &str {
    let debut = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map_or(s.len(), |(i, _)| i);
    &s[debut..]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
}

impl Default for Tampon {
    fn default() -> Self {
        Self {
            texte: SENTINELLE.to_string(),
        }
    }
}

impl Tampon {
    /// Tampon qui reprend un résultat (calcul enchaîné).
    pub fn depuis_resultat(valeur: f64) -> Self {
        let mut t = Self::default();
        t.remplacer(formater(valeur));
        t
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn est_sentinelle(&self) -> bool {
        self.texte == SENTINELLE
    }

    fn longueur(&self) -> usize {
        self.texte.chars().count()
    }

    /// Texte de travail : la sentinelle compte comme vide.
    fn courant(&self) -> &str {
        if self.est_sentinelle() {
            ""
        } else {
            &self.texte
        }
    }

    fn remplacer(&mut self, texte: String) {
        self.texte = if texte.is_empty() {
            SENTINELLE.to_string()
        } else {
            texte
        };
    }

    fn jetons(&self) -> Vec<Jeton> {
        // le tampon reste dans l’alphabet : un échec ici = pas de terme
        tokenize(self.courant()).unwrap_or_default()
    }

    fn refuser(&self, op: &str) -> &str {
        trace!(op, tampon = %self.texte, "édition refusée");
        &self.texte
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute un chiffre, `.`, un opérateur, `(`, `)` ou `%`.
    pub fn append(&mut self, c: char) -> &str {
        if self.longueur() >= LONGUEUR_MAX_SAISIE {
            return self.refuser("append");
        }

        let cur = self.courant();
        let dernier = cur.chars().last();

        if termine_par_lettre(cur) && c != '(' {
            return self.refuser("append");
        }

        let mut out = cur.to_string();

        match c {
            _ if est_operateur(c) => match dernier {
                None if c != '-' => return self.refuser("append"),
                Some(d) if est_operateur(d) => {
                    // remplacement, pas de doublon
                    out.pop();
                    if (out.is_empty() || out.ends_with('(')) && c != '-' {
                        return self.refuser("append");
                    }
                }
                Some('(') if c != '-' => return self.refuser("append"),
                _ => {}
            },

            '.' => {
                let apres_chiffre = dernier.is_some_and(|d| d.is_ascii_digit());
                if !apres_chiffre || nombre_final(cur).contains('.') {
                    return self.refuser("append");
                }
            }

            '(' => {
                if termine_par_valeur(cur) {
                    out.push('*');
                }
            }

            ')' => {
                let apres_operande = dernier.is_some_and(|d| !est_operateur(d) && d != '(');
                if parentheses_ouvertes(cur) == 0 || !apres_operande {
                    return self.refuser("append");
                }
            }

            '0'..='9' => {
                if dernier.is_some_and(|d| est_constante(d) || matches!(d, ')' | '!' | '%')) {
                    out.push('*');
                }
            }

            '%' => {
                if !termine_par_valeur(cur) {
                    return self.refuser("append");
                }
            }

            _ => return self.refuser("append"),
        }

        out.push(c);
        self.remplacer(out);
        &self.texte
    }

    /// Règle commune fonctions / constantes / rappels.
    fn prefixe_insertion(&self, op: &str, regle_operateur: bool) -> Option<String> {
        if self.longueur() >= LONGUEUR_MAX_INSERTION {
            return None;
        }
        let cur = self.courant();
        if termine_par_lettre(cur) {
            return None;
        }
        if regle_operateur && cur.chars().last().is_some_and(|d| est_operateur(d) && d != '-') {
            return None;
        }

        let mut out = cur.to_string();
        if termine_par_valeur(cur) {
            out.push('*');
        }
        trace!(op, "insertion");
        Some(out)
    }

    /// `nom(` ; nom ∈ {sin, cos, tan, ln, log, sqrt}.
    pub fn insert_function(&mut self, nom: &str) -> &str {
        let Some(f) = Fonction::depuis_nom(nom) else {
            return self.refuser("insert_function");
        };
        let Some(mut out) = self.prefixe_insertion("insert_function", true) else {
            return self.refuser("insert_function");
        };
        out.push_str(f.nom());
        out.push('(');
        self.remplacer(out);
        &self.texte
    }

    /// π ou ℯ.
    pub fn insert_constant(&mut self, symbole: char) -> &str {
        let Some(k) = Constante::depuis_symbole(symbole) else {
            return self.refuser("insert_constant");
        };
        let Some(mut out) = self.prefixe_insertion("insert_constant", true) else {
            return self.refuser("insert_constant");
        };
        out.push(k.symbole());
        self.remplacer(out);
        &self.texte
    }

    /// MR : insère la valeur de la mémoire.
    pub fn recall_memory(&mut self, memoire: f64) -> &str {
        self.inserer_valeur("recall_memory", memoire)
    }

    /// Ans : insère le dernier résultat.
    pub fn recall_last_answer(&mut self, dernier: f64) -> &str {
        self.inserer_valeur("recall_last_answer", dernier)
    }

    fn inserer_valeur(&mut self, op: &str, valeur: f64) -> &str {
        let Some(mut out) = self.prefixe_insertion(op, false) else {
            return self.refuser(op);
        };
        let texte = formater(valeur);
        if valeur < 0.0 {
            // "5-" + "-3" ferait deux opérateurs
            out.push('(');
            out.push_str(&texte);
            out.push(')');
        } else {
            out.push_str(&texte);
        }
        self.remplacer(out);
        &self.texte
    }

    /* ------------------------ Effacement ------------------------ */

    pub fn backspace(&mut self) -> &str {
        if self.longueur() <= 1 {
            self.texte = SENTINELLE.to_string();
        } else {
            self.texte.pop();
        }
        &self.texte
    }

    pub fn clear(&mut self) -> &str {
        self.texte = SENTINELLE.to_string();
        &self.texte
    }

    /* ------------------------ Opérations unaires ------------------------ */

    /// Nombre final divisé par 100, réécrit dans le texte.
    pub fn to_percent(&mut self) -> &str {
        if self.est_sentinelle() || self.longueur() > LONGUEUR_MAX_UNAIRE {
            return self.refuser("to_percent");
        }
        let cur = self.courant();
        let nombre = nombre_final(cur);
        let Some(remplacant) = pourcent_exact(nombre) else {
            return self.refuser("to_percent");
        };
        let out = format!("{}{remplacant}", &cur[..cur.len() - nombre.len()]);
        self.remplacer(out);
        &self.texte
    }

    /// ± : `(-terme)` ; `(-terme)` redevient `terme` ; sans terme : `-(tampon)`.
    pub fn negate(&mut self) -> &str {
        if self.est_sentinelle() {
            self.texte = "-".to_string();
            return &self.texte;
        }
        if self.longueur() > LONGUEUR_MAX_UNAIRE || termine_par_lettre(&self.texte) {
            return self.refuser("negate");
        }

        let cur = self.courant();
        let jetons = self.jetons();

        let out = match debut_terme_final(&jetons) {
            Some(i) => {
                let debut = jetons[i].debut;
                match negation_simple(&jetons[i..]) {
                    // le terme se termine par `)` (un octet)
                    Some(k) => format!(
                        "{}{}",
                        &cur[..debut],
                        &cur[jetons[i + k].debut..cur.len() - 1]
                    ),
                    None => format!("{}(-{})", &cur[..debut], &cur[debut..]),
                }
            }
            None => format!("-({cur})"),
        };

        self.remplacer(out);
        &self.texte
    }

    /// x² : `t^2` si le terme tient en un caractère, sinon `(terme)^2`.
    pub fn square(&mut self) -> &str {
        if self.est_sentinelle() || self.longueur() > LONGUEUR_MAX_UNAIRE {
            return self.refuser("square");
        }
        let jetons = self.jetons();
        let Some(i) = debut_terme_final(&jetons) else {
            return self.refuser("square");
        };
        let cur = self.courant();
        let debut = jetons[i].debut;
        let terme = &cur[debut..];

        let out = if terme.chars().count() == 1 {
            format!("{cur}^2")
        } else {
            format!("{}({terme})^2", &cur[..debut])
        };
        self.remplacer(out);
        &self.texte
    }

    /// √ : `sqrt(terme)`, ou ouvre `sqrt(` s’il n’y a pas de terme.
    pub fn sqrt(&mut self) -> &str {
        if self.longueur() > LONGUEUR_MAX_UNAIRE {
            return self.refuser("sqrt");
        }
        let jetons = self.jetons();
        let Some(i) = debut_terme_final(&jetons) else {
            return self.insert_function(Fonction::Sqrt.nom());
        };

        let cur = self.courant();
        let debut = jetons[i].debut;
        let out = format!("{}sqrt({})", &cur[..debut], &cur[debut..]);
        self.remplacer(out);
        &self.texte
    }

    /// `!` postfixe, jamais deux de suite par ce chemin.
    pub fn factorial(&mut self) -> &str {
        if self.est_sentinelle()
            || self.longueur() > LONGUEUR_MAX_UNAIRE
            || self.texte.ends_with('!')
        {
            return self.refuser("factorial");
        }
        if debut_terme_final(&self.jetons()).is_none() {
            return self.refuser("factorial");
        }
        self.texte.push('!');
        &self.texte
    }
}
