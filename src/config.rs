// src/config.rs
//
// Réglages NATIFS : ligne de commande (clap) + fichier TOML.
//
// Priorité : défauts < fichier < drapeaux CLI.
// Fichier absent = défauts (pas une erreur) ; fichier illisible = erreur
// classée, que main.rs journalise avant de repartir des défauts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::noyau::ModeAngle;

/// Sous-dossier dans `dirs::config_dir()`.
const DOSSIER_CONFIG: &str = "calculatrice-sci";
const FICHIER_CONFIG: &str = "config.toml";

/// Durée d’affichage de "Error" avant retour à la sentinelle.
const DELAI_ERREUR_MS_DEFAUT: u64 = 900;

#[derive(Debug, Parser)]
#[command(
    name = "calculatrice-sci",
    version,
    about = "Calculatrice scientifique (tampon d’expression, degrés/radians)"
)]
pub struct Cli {
    /// Démarrer en radians (degrés par défaut)
    #[arg(long)]
    pub radians: bool,

    /// Évaluer une expression sans ouvrir de fenêtre
    #[arg(long, value_name = "EXPR")]
    pub eval: Option<String>,

    /// Fichier de réglages (TOML)
    #[arg(long, value_name = "CHEMIN")]
    pub config: Option<PathBuf>,

    /// Journalisation détaillée (debug)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture impossible de {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("réglages invalides dans {chemin}: {source}")]
    Toml {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reglages {
    pub mode_angle: ModeAngle,
    pub delai_erreur_ms: u64,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::Degres,
            delai_erreur_ms: DELAI_ERREUR_MS_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn delai_erreur(&self) -> Duration {
        Duration::from_millis(self.delai_erreur_ms)
    }

    fn depuis_toml(texte: &str, chemin: &Path) -> Result<Self, ErreurConfig> {
        toml::from_str(texte).map_err(|source| ErreurConfig::Toml {
            chemin: chemin.to_path_buf(),
            source,
        })
    }

    /// Lit le fichier ; absent => défauts.
    pub fn charger(chemin: &Path) -> Result<Self, ErreurConfig> {
        match fs::read_to_string(chemin) {
            Ok(texte) => {
                let r = Self::depuis_toml(&texte, chemin)?;
                info!(chemin = %chemin.display(), ?r, "réglages chargés");
                Ok(r)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(chemin = %chemin.display(), "pas de fichier de réglages");
                Ok(Self::default())
            }
            Err(source) => Err(ErreurConfig::Io {
                chemin: chemin.to_path_buf(),
                source,
            }),
        }
    }

    /// Les drapeaux CLI gagnent sur le fichier.
    pub fn appliquer_cli(mut self, cli: &Cli) -> Self {
        if cli.radians {
            self.mode_angle = ModeAngle::Radians;
        }
        self
    }
}

impl Cli {
    /// `--config`, sinon `<config_dir>/calculatrice-sci/config.toml`.
    pub fn chemin_config(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            dirs::config_dir().map(|d| d.join(DOSSIER_CONFIG).join(FICHIER_CONFIG))
        })
    }

    pub fn reglages(&self) -> Result<Reglages, ErreurConfig> {
        let base = match self.chemin_config() {
            Some(chemin) => Reglages::charger(&chemin)?,
            None => Reglages::default(),
        };
        Ok(base.appliquer_cli(self))
    }
}
