//! Session : le contexte explicite passé au noyau (pas d’état global).
//!
//! - tampon + ligne d’historique
//! - mode d’angle (lu par l’évaluateur, jamais modifié par lui)
//! - mémoire (MC / MS / MR) et dernier résultat (Ans)
//!
//! Après un échec, la session garde l’erreur : l’affichage vaut "Error"
//! jusqu’à `reprendre_apres_erreur` (appelée par la vue après un délai) ou
//! jusqu’à la commande suivante, qui annule ce délai.

use tracing::debug;

use super::erreur::ErreurCalcul;
use super::eval::{evaluate, Evaluation};
use super::expr::ModeAngle;
use super::tampon::Tampon;

/// Marqueur affiché à la place du tampon après un échec.
pub const TEXTE_ERREUR: &str = "Error";

/// Commandes de l’éditeur, telles que la vue les émet.
#[derive(Clone, Debug, PartialEq)]
pub enum Commande {
    Append(char),
    InsertFunction(&'static str),
    InsertConstant(char),
    ToPercent,
    Backspace,
    Clear,
    Negate,
    Square,
    Sqrt,
    Factorial,
    RecallMemory,
    RecallLastAnswer,
    EffacerMemoire,
    StockerMemoire,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    tampon: Tampon,
    historique: String,
    erreur: Option<ErreurCalcul>,

    pub mode_angle: ModeAngle,
    memoire: f64,
    dernier_resultat: f64,
}

impl Session {
    pub fn new(mode_angle: ModeAngle) -> Self {
        Self {
            mode_angle,
            ..Self::default()
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn tampon(&self) -> &str {
        self.tampon.texte()
    }

    /// Texte à afficher : le tampon, ou "Error" pendant la phase d’erreur.
    pub fn affichage(&self) -> &str {
        if self.erreur.is_some() {
            TEXTE_ERREUR
        } else {
            self.tampon.texte()
        }
    }

    pub fn historique(&self) -> &str {
        &self.historique
    }

    pub fn erreur(&self) -> Option<ErreurCalcul> {
        self.erreur
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    pub fn dernier_resultat(&self) -> f64 {
        self.dernier_resultat
    }

    /* ------------------------ Commandes ------------------------ */

    /// Applique une commande d’édition ; renvoie le tampon résultant.
    pub fn executer(&mut self, commande: Commande) -> &str {
        // toute commande annule l’affichage "Error" en cours
        self.reprendre_apres_erreur();
        debug!(?commande, "commande");

        let t = &mut self.tampon;
        match commande {
            Commande::Append(c) => {
                t.append(c);
            }
            Commande::InsertFunction(nom) => {
                t.insert_function(nom);
            }
            Commande::InsertConstant(k) => {
                t.insert_constant(k);
            }
            Commande::ToPercent => {
                t.to_percent();
            }
            Commande::Backspace => {
                t.backspace();
            }
            Commande::Clear => {
                t.clear();
                self.historique.clear();
            }
            Commande::Negate => {
                t.negate();
            }
            Commande::Square => {
                t.square();
            }
            Commande::Sqrt => {
                t.sqrt();
            }
            Commande::Factorial => {
                t.factorial();
            }
            Commande::RecallMemory => {
                t.recall_memory(self.memoire);
            }
            Commande::RecallLastAnswer => {
                t.recall_last_answer(self.dernier_resultat);
            }
            Commande::EffacerMemoire => self.memoire = 0.0,
            Commande::StockerMemoire => self.memoire = self.dernier_resultat,
        }

        self.tampon.texte()
    }

    /// "=" : évalue le tampon. Succès : le résultat devient le tampon et Ans.
    /// Échec : mémoire et Ans intacts, l’erreur est gardée pour l’affichage.
    pub fn calculer(&mut self) -> Evaluation {
        self.reprendre_apres_erreur();
        let expression = self.tampon().to_string();

        match evaluate(&expression, self.mode_angle) {
            Ok(v) => {
                self.historique = format!("{expression} =");
                self.tampon = Tampon::depuis_resultat(v);
                self.dernier_resultat = v;
                Ok(v)
            }
            Err(e) => {
                debug!(%expression, erreur = %e, "évaluation refusée");
                self.historique.clear();
                self.erreur = Some(e);
                Err(e)
            }
        }
    }

    /// Fin de la phase "Error" : retour à la sentinelle.
    pub fn reprendre_apres_erreur(&mut self) {
        if self.erreur.take().is_some() {
            self.tampon.clear();
        }
    }

    pub fn basculer_mode_angle(&mut self) {
        self.mode_angle = match self.mode_angle {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saisir(s: &mut Session, touches: &str) {
        for c in touches.chars() {
            s.executer(Commande::Append(c));
        }
    }

    #[test]
    fn calcul_enchaine() {
        let mut s = Session::default();
        saisir(&mut s, "2+3*4");
        assert_eq!(s.calculer(), Ok(14.0));
        assert_eq!(s.tampon(), "14");
        assert_eq!(s.historique(), "2+3*4 =");
        assert_eq!(s.dernier_resultat(), 14.0);

        saisir(&mut s, "/7");
        assert_eq!(s.calculer(), Ok(2.0));
        assert_eq!(s.dernier_resultat(), 2.0);
    }

    #[test]
    fn echec_sans_effet_sur_ans_ni_memoire() {
        let mut s = Session::default();
        saisir(&mut s, "6*7");
        s.calculer().unwrap();
        s.executer(Commande::StockerMemoire);

        saisir(&mut s, "/0");
        assert_eq!(s.calculer(), Err(ErreurCalcul::DivisionByZero));
        assert_eq!(s.affichage(), TEXTE_ERREUR);
        assert_eq!(s.historique(), "");
        assert_eq!(s.dernier_resultat(), 42.0);
        assert_eq!(s.memoire(), 42.0);

        s.reprendre_apres_erreur();
        assert_eq!(s.affichage(), "0");
    }

    #[test]
    fn commande_pendant_erreur_repart_de_zero() {
        let mut s = Session::default();
        s.executer(Commande::InsertFunction("ln"));
        saisir(&mut s, "0)");
        assert!(s.calculer().is_err());
        assert_eq!(s.executer(Commande::Append('7')), "7");
        assert_eq!(s.erreur(), None);
    }

    #[test]
    fn memoire_et_ans() {
        let mut s = Session::default();
        assert_eq!(s.executer(Commande::RecallMemory), "0");
        saisir(&mut s, "1-5");
        s.calculer().unwrap();
        s.executer(Commande::StockerMemoire);
        s.executer(Commande::Clear);
        saisir(&mut s, "3");
        assert_eq!(s.executer(Commande::RecallMemory), "3*(-4)");
        s.executer(Commande::EffacerMemoire);
        assert_eq!(s.memoire(), 0.0);
        assert_eq!(s.executer(Commande::RecallLastAnswer), "3*(-4)*(-4)");
    }

    #[test]
    fn clear_vide_l_historique() {
        let mut s = Session::default();
        saisir(&mut s, "1+1");
        s.calculer().unwrap();
        s.executer(Commande::Clear);
        assert_eq!(s.tampon(), "0");
        assert_eq!(s.historique(), "");
    }

    #[test]
    fn mode_angle_lu_par_l_evaluateur() {
        let mut s = Session::new(ModeAngle::Radians);
        s.executer(Commande::InsertFunction("cos"));
        s.executer(Commande::InsertConstant('π'));
        s.executer(Commande::Append(')'));
        assert_eq!(s.calculer(), Ok(-1.0));

        s.basculer_mode_angle();
        assert_eq!(s.mode_angle, ModeAngle::Degres);
    }
}
