//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile de flottants -> valeur
//!
//! Chaque étape échoue au premier problème (pas de reprise, pas de résultat partiel).
//! Aucun état partagé : chaque appel alloue ses jetons, sa pile d’opérateurs
//! et sa pile d’évaluation.

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize, Genre};
use super::operateurs::Calcul;
use super::rpn::{to_rpn, ProgrammePostfixe};

#[derive(Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub valeur: f64,
}

/// API publique : évalue une expression infixe en flottant double précision.
pub fn evaluer(expr: &str) -> Result<f64, ErreurEval> {
    let jetons = tokenize(expr)?;
    let rpn = to_rpn(&jetons)?;
    rpn.evaluer()
}

/// Comme `evaluer`, mais garde la démarche (jetons + RPN) pour l’affichage.
pub fn evaluer_detaille(expr: &str) -> Result<Demarche, ErreurEval> {
    let jetons = tokenize(expr)?;
    let jetons_txt = format_tokens(&jetons);

    let rpn = to_rpn(&jetons)?;
    let rpn_txt = rpn.to_string();

    let valeur = rpn.evaluer()?;

    Ok(Demarche {
        jetons: jetons_txt,
        rpn: rpn_txt,
        valeur,
    })
}

impl ProgrammePostfixe {
    /// Exécute le programme sur une pile neuve.
    /// Il doit rester exactement une valeur à la fin.
    pub fn evaluer(self) -> Result<f64, ErreurEval> {
        let mut pile: Vec<f64> = Vec::with_capacity(self.jetons.len());

        for jeton in &self.jetons {
            let (calcul, nom) = match &jeton.genre {
                Genre::Nombre(v) => {
                    pile.push(*v);
                    continue;
                }
                Genre::Operateur(op) => (op.desc().calcul, jeton.texte.as_str()),
                Genre::Fonction(f) => (Calcul::Unaire(f.desc().calcul), f.desc().nom),
                // to_rpn ne laisse jamais de parenthèse en sortie
                Genre::ParOuvrante | Genre::ParFermante => {
                    return Err(ErreurEval::Parentheses {
                        position: jeton.position,
                    })
                }
            };

            let r = applique(calcul, nom, &mut pile)?;
            pile.push(r);
        }

        match pile.as_slice() {
            [v] => Ok(*v),
            reste => Err(ErreurEval::ExpressionMalformee {
                restantes: reste.len(),
            }),
        }
    }
}

/// Dépile les opérandes (b puis a pour `a op b`), calcule, vérifie que le résultat est réel et fini.
fn applique(calcul: Calcul, nom: &str, pile: &mut Vec<f64>) -> Result<f64, ErreurEval> {
    let manque = || ErreurEval::OperandesInsuffisantes {
        symbole: nom.to_string(),
    };

    let r = match calcul {
        Calcul::Unaire(f) => {
            let x = pile.pop().ok_or_else(manque)?;
            f(x)?
        }
        Calcul::Binaire(f) => {
            let b = pile.pop().ok_or_else(manque)?;
            let a = pile.pop().ok_or_else(manque)?;
            f(a, b)?
        }
    };

    if r.is_nan() {
        return Err(ErreurEval::Domaine {
            detail: format!("'{nom}' sans valeur réelle"),
        });
    }
    if r.is_infinite() {
        return Err(ErreurEval::Depassement {
            detail: format!("résultat de '{nom}' trop grand"),
        });
    }
    Ok(r)
}
