//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, précision,
//! démarche, historique, variables) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la précision d’affichage et la taille de l’historique.

use std::collections::VecDeque;

use calculatrice_rpn::noyau::format::formater_nombre;
use log::debug;

use super::memoire::Memoire;

/// Décimales affichées par défaut.
const DIGITS_DEFAUT: usize = 10;

/// Au-delà, f64 n’a plus de chiffres significatifs à montrer.
const DIGITS_MAX: usize = 17;

/// Nombre d’entrées gardées dans l’historique (les plus récentes).
pub const HISTORIQUE_MAX: usize = 50;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub valeur: f64,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: Option<f64>,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- mémoire ---
    pub historique: VecDeque<EntreeHistorique>,
    pub memoire: Memoire,

    // --- paramètres ---
    pub digits: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: None,
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: VecDeque::with_capacity(HISTORIQUE_MAX),
            memoire: Memoire::default(),
            digits: DIGITS_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique + variables).
    pub fn reset_total(&mut self) {
        debug!("remise à zéro totale");
        *self = Self::default();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée ni à l’historique).
    pub fn clear_resultats(&mut self) {
        self.resultat = None;
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la démarche (non fiable si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat (valeur + démarche), l’historiser, mettre à jour `ans`.
    pub fn set_resultat(&mut self, expression: impl Into<String>, valeur: f64, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = Some(valeur);
        self.demarche = demarche;
        self.memoire.set_ans(valeur);

        self.historique.push_front(EntreeHistorique {
            expression: expression.into(),
            valeur,
        });
        self.historique.truncate(HISTORIQUE_MAX);

        self.focus_entree = true;
    }

    /// Recharge une expression de l’historique dans l’entrée.
    pub fn rappeler(&mut self, index: usize) {
        if let Some(h) = self.historique.get(index) {
            self.entree = h.expression.clone();
        }
        self.focus_entree = true;
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }

    pub fn digits_max() -> usize {
        DIGITS_MAX
    }

    /// Texte affiché pour une valeur, selon la précision courante.
    pub fn afficher(&self, v: f64) -> String {
        formater_nombre(v, self.digits)
    }
}
