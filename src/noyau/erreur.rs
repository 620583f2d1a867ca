// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes les erreurs sont typées, non fatales : le noyau ne panique pas,
// n’écrit rien, ne termine rien. L’appelant (app) décide de l’affichage.

use thiserror::Error;

/// Étape du pipeline qui a échoué.
///
/// Pipeline : Lecture (jetons) -> Conversion (RPN) -> Évaluation (pile).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etape {
    Lecture,
    Conversion,
    Evaluation,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurEval {
    /// Caractère inconnu, identifiant nu ou nombre mal formé.
    #[error("lecture impossible à la position {position} : {detail}")]
    Lexicale { position: usize, detail: String },

    /// ')' sans '(' correspondante, ou '(' jamais fermée.
    #[error("parenthèses non appariées (position {position})")]
    Parentheses { position: usize },

    /// Fonction appelée avec un nom hors de la table.
    #[error("fonction inconnue : {nom}")]
    FonctionInconnue { nom: String, position: usize },

    /// Opérateur ou fonction sans assez de valeurs ("+ 2", "2 *", "sqrt()").
    #[error("opérandes manquantes pour '{symbole}'")]
    OperandesInsuffisantes { symbole: String },

    /// Pas exactement une valeur : saisie vide, "()", ou valeurs juxtaposées ("2 3", restantes = 2).
    #[error("expression malformée ({restantes} valeur(s) restante(s) au lieu d’une)")]
    ExpressionMalformee { restantes: usize },

    /// '/' ou '%' avec un diviseur nul.
    #[error("division par zéro ('{symbole}')")]
    DivisionParZero { symbole: char },

    /// Résultat non défini dans les réels (sqrt(-1), 0^-1, (-8)^(1/3)…).
    #[error("hors domaine : {detail}")]
    Domaine { detail: String },

    /// Opérandes finies, résultat infini.
    #[error("dépassement de capacité : {detail}")]
    Depassement { detail: String },
}

impl ErreurEval {
    pub fn etape(&self) -> Etape {
        use ErreurEval::*;
        match self {
            Lexicale { .. } | FonctionInconnue { .. } => Etape::Lecture,
            // l’alternance valeur/opérateur est vérifiée par la conversion
            Parentheses { .. } | OperandesInsuffisantes { .. } | ExpressionMalformee { .. } => {
                Etape::Conversion
            }
            DivisionParZero { .. } | Domaine { .. } | Depassement { .. } => Etape::Evaluation,
        }
    }
}
