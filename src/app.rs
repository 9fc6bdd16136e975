// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier global (aucun champ texte à l’écran, donc pas de conflit de focus) :
//   chiffres . + - * / ^ ( )  -> Append
//   %                         -> ToPercent
//   Enter ou =                -> calcul
//   Backspace / Escape        -> DEL / AC
//   Alt+P                     -> π

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Commande;
use etat::Touche;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (touches, maintenant) = ctx.input(|i| (touches_clavier(&i.events), i.time));
        for t in touches {
            self.appliquer(t, maintenant);
        }

        // fin de la phase "Error" : on redemande une frame à l’échéance
        if let Some(reste) = self.tic(maintenant) {
            ctx.request_repaint_after(reste);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

fn touches_clavier(events: &[egui::Event]) -> Vec<Touche> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(texte) => out.extend(texte.chars().filter_map(touche_texte)),
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                let t = match key {
                    egui::Key::Enter => Some(Touche::Egal),
                    egui::Key::Backspace => Some(Touche::Cmd(Commande::Backspace)),
                    egui::Key::Escape => Some(Touche::Cmd(Commande::Clear)),
                    egui::Key::P if modifiers.alt => Some(Touche::Cmd(Commande::InsertConstant('π'))),
                    _ => None,
                };
                out.extend(t);
            }
            _ => {}
        }
    }
    out
}

fn touche_texte(c: char) -> Option<Touche> {
    match c {
        '0'..='9' | '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' => {
            Some(Touche::Cmd(Commande::Append(c)))
        }
        '%' => Some(Touche::Cmd(Commande::ToPercent)),
        '=' => Some(Touche::Egal),
        _ => None,
    }
}
