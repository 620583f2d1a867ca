//! Noyau flottant (f64)
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie d’erreurs + étape du pipeline
//! - operateurs.rs : tables opérateurs / fonctions (précédence, associativité, calcul)
//! - jetons.rs     : tokenisation (moins unaire déjà étiqueté)
//! - rpn.rs        : shunting-yard -> programme postfixe
//! - eval.rs       : pile d’évaluation + pipeline complet
//! - format.rs     : affichage des nombres
//!
//! Le noyau est pur : pas d’I/O, pas de log, pas d’état global.

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurEval, Etape};
pub use eval::{evaluer, evaluer_detaille, Demarche};
