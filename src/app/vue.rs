// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : ligne d’historique + tampon (ou "Error")
// - Deux panneaux : Basique / Scientifique
// - Tactile : gros boutons ; un clic = une Touche, appliquée après le dessin
//
// La vue ne touche jamais au texte du tampon : tout passe par le noyau.

use eframe::egui;

use super::etat::{AppCalc, Panneau, Touche};
use crate::noyau::{Commande, ModeAngle};

const TAILLE_BOUTON: [f32; 2] = [64.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let mut clic: Option<Touche> = None;

        self.ui_ecran(ui);
        ui.add_space(8.0);
        self.ui_barre(ui, &mut clic);
        ui.add_space(8.0);

        if self.panneau == Panneau::Scientifique {
            Self::ui_scientifique(ui, &mut clic);
            ui.add_space(6.0);
        }
        Self::ui_basique(ui, &mut clic);

        if let Some(t) = clic {
            let maintenant = ui.input(|i| i.time);
            self.appliquer(t, maintenant);
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    // hauteur stable : ligne vide si pas d’historique
                    let historique = match self.session.historique() {
                        "" => " ",
                        h => h,
                    };
                    ui.label(egui::RichText::new(historique).monospace().weak());

                    let texte = egui::RichText::new(self.session.affichage())
                        .monospace()
                        .size(30.0);
                    if self.session.erreur().is_some() {
                        ui.label(texte.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(texte);
                    }
                });
            });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        ui.horizontal(|ui| {
            let bascule = match self.panneau {
                Panneau::Basique => "Scientifique ▸",
                Panneau::Scientifique => "◂ Basique",
            };
            if ui.button(bascule).clicked() {
                self.basculer_panneau();
            }

            if self.panneau != Panneau::Scientifique {
                return;
            }
            ui.separator();

            let angle = match self.session.mode_angle {
                ModeAngle::Degres => "Deg",
                ModeAngle::Radians => "Rad",
            };
            if ui
                .button(angle)
                .on_hover_text("Bascule degrés / radians")
                .clicked()
            {
                *clic = Some(Touche::BasculerAngle);
            }

            ui.label(
                egui::RichText::new(format!(
                    "Ans = {}",
                    crate::noyau::formater(self.session.dernier_resultat())
                ))
                .monospace()
                .weak(),
            );

            if self.session.memoire() != 0.0 {
                ui.label(egui::RichText::new("M").strong())
                    .on_hover_text(crate::noyau::formater(self.session.memoire()));
            }
        });
    }

    fn ui_basique(ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        use Commande::*;

        egui::Grid::new("pave_basique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                bouton(ui, "AC", Touche::Cmd(Clear), clic);
                bouton(ui, "DEL", Touche::Cmd(Backspace), clic);
                bouton(ui, "%", Touche::Cmd(ToPercent), clic);
                bouton(ui, "÷", Touche::Cmd(Append('/')), clic);
                ui.end_row();

                for (ligne, op) in [("789", '*'), ("456", '-'), ("123", '+')] {
                    for c in ligne.chars() {
                        bouton(ui, &c.to_string(), Touche::Cmd(Append(c)), clic);
                    }
                    let label = match op {
                        '*' => "×".to_string(),
                        o => o.to_string(),
                    };
                    bouton(ui, &label, Touche::Cmd(Append(op)), clic);
                    ui.end_row();
                }

                bouton(ui, "0", Touche::Cmd(Append('0')), clic);
                bouton(ui, ".", Touche::Cmd(Append('.')), clic);
                ui.label("");
                bouton(ui, "=", Touche::Egal, clic);
                ui.end_row();
            });
    }

    fn ui_scientifique(ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        use Commande::*;

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for nom in ["sin", "cos", "tan", "ln", "log"] {
                    bouton(ui, nom, Touche::Cmd(InsertFunction(nom)), clic);
                }
                ui.end_row();

                bouton(ui, "(", Touche::Cmd(Append('(')), clic);
                bouton(ui, ")", Touche::Cmd(Append(')')), clic);
                bouton(ui, "x²", Touche::Cmd(Square), clic);
                bouton(ui, "√", Touche::Cmd(Sqrt), clic);
                bouton(ui, "x^y", Touche::Cmd(Append('^')), clic);
                ui.end_row();

                bouton(ui, "π", Touche::Cmd(InsertConstant('π')), clic);
                bouton(ui, "e", Touche::Cmd(InsertConstant('ℯ')), clic);
                bouton(ui, "n!", Touche::Cmd(Factorial), clic);
                bouton(ui, "±", Touche::Cmd(Negate), clic);
                bouton(ui, "Ans", Touche::Cmd(RecallLastAnswer), clic);
                ui.end_row();

                bouton(ui, "MC", Touche::Cmd(EffacerMemoire), clic);
                bouton(ui, "MR", Touche::Cmd(RecallMemory), clic);
                bouton(ui, "MS", Touche::Cmd(StockerMemoire), clic);
                ui.end_row();
            });
    }
}

fn bouton(ui: &mut egui::Ui, label: &str, touche: Touche, clic: &mut Option<Touche>) {
    if ui.add_sized(TAILLE_BOUTON, egui::Button::new(label)).clicked() {
        *clic = Some(touche);
    }
}
