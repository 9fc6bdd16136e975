//! src/app/etat.rs
//!
//! État UI (sans vue, sans parsing).
//!
//! Rôle : porter la session du noyau, le panneau visible et l’échéance de
//! l’affichage "Error". Toute édition passe par `Session::executer`.
//!
//! Contrats :
//! - Aucune évaluation ici hors `Session::calculer`.
//! - Le temps est fourni par l’appelant (horloge egui, en secondes) : pas
//!   d’`Instant`, qui n’existe pas en wasm32.

use std::time::Duration;

use tracing::debug;

use crate::noyau::{Commande, ErreurCalcul, ModeAngle, Session};

/// Délai par défaut avant retour à la sentinelle après "Error".
const DELAI_ERREUR_DEFAUT: Duration = Duration::from_millis(900);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Panneau {
    #[default]
    Basique,
    Scientifique,
}

/// Ce que produit un bouton ou une touche clavier.
#[derive(Clone, Debug, PartialEq)]
pub enum Touche {
    Cmd(Commande),
    Egal,
    BasculerAngle,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,
    pub panneau: Panneau,

    delai_erreur: Duration,
    // instant (horloge egui) où "Error" doit disparaître
    echeance_erreur: Option<f64>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(ModeAngle::Degres, DELAI_ERREUR_DEFAUT)
    }
}

impl AppCalc {
    pub fn new(mode_angle: ModeAngle, delai_erreur: Duration) -> Self {
        Self {
            session: Session::new(mode_angle),
            panneau: Panneau::default(),
            delai_erreur,
            echeance_erreur: None,
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// Commande d’édition : annule toute échéance "Error" en cours.
    pub fn commande(&mut self, c: Commande) {
        self.echeance_erreur = None;
        self.session.executer(c);
    }

    /// "=" ; en cas d’échec, programme le retour à la sentinelle.
    pub fn calculer(&mut self, maintenant: f64) -> Result<f64, ErreurCalcul> {
        self.echeance_erreur = None;
        let r = self.session.calculer();
        if r.is_err() {
            self.echeance_erreur = Some(maintenant + self.delai_erreur.as_secs_f64());
        }
        r
    }

    /// À chaque frame. Renvoie le temps restant avant l’échéance, s’il y en a une.
    pub fn tic(&mut self, maintenant: f64) -> Option<Duration> {
        let echeance = self.echeance_erreur?;
        if maintenant >= echeance {
            self.echeance_erreur = None;
            self.session.reprendre_apres_erreur();
            return None;
        }
        Some(Duration::from_secs_f64(echeance - maintenant))
    }

    pub fn appliquer(&mut self, touche: Touche, maintenant: f64) {
        match touche {
            Touche::Cmd(c) => self.commande(c),
            Touche::Egal => {
                if let Err(e) = self.calculer(maintenant) {
                    debug!(erreur = %e, "affichage Error programmé");
                }
            }
            Touche::BasculerAngle => self.session.basculer_mode_angle(),
        }
    }

    pub fn basculer_panneau(&mut self) {
        self.panneau = match self.panneau {
            Panneau::Basique => Panneau::Scientifique,
            Panneau::Scientifique => Panneau::Basique,
        };
    }
}
