// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Jeton (infixe) en programme postfixe
//
// Règles:
// - Nombre          => sortie directe
// - Fonction / '('  => pile d’opérateurs
// - ')'             => dépile jusqu’à '(' ; si une fonction est dessous, elle sort aussi
// - Opérateur binaire => dépile tant que le sommet est un opérateur plus prioritaire
//                        (ou égal et l’opérateur entrant est associatif à gauche)
// - Opérateur préfixe (neg) => empilé sans rien dépiler (il n’a pas d’opérande gauche)
//
// Alternance valeur / opérateur (vérifiée au fil de la conversion):
// - valeur (nombre, fonction, '(', neg) là où un opérateur est attendu => ExpressionMalformee
// - opérateur binaire là où une valeur est attendue                    => OperandesInsuffisantes
// - fin de saisie juste après un opérateur                             => OperandesInsuffisantes
// - groupe vide "()"  => ExpressionMalformee ; "f()" => OperandesInsuffisantes pour f
//
// NOTE:
// - Le moins unaire est déjà étiqueté `Op::Neg` par le tokenizer.
// - Les fonctions restent “collées” à leur argument : elles sortent après la parenthèse fermante.

use std::fmt;

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, Genre, Jeton};
use super::operateurs::Assoc;

/// Suite de jetons en ordre postfixe (sans parenthèses).
/// Ne se construit que par `to_rpn` ; consommée une seule fois par `evaluer`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgrammePostfixe {
    pub(super) jetons: Vec<Jeton>,
}

impl ProgrammePostfixe {
    pub fn jetons(&self) -> &[Jeton] {
        &self.jetons
    }
}

impl fmt::Display for ProgrammePostfixe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tokens(&self.jetons))
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: sqrt ( 2 + 2 ) * 3
///   rpn:    2 2 + sqrt 3 *
pub fn to_rpn(tokens: &[Jeton]) -> Result<ProgrammePostfixe, ErreurEval> {
    let mut out: Vec<Jeton> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Jeton> = Vec::new();

    // vrai tant que le prochain jeton doit fournir une valeur
    let mut attend_valeur = true;
    let mut precedent: Option<&Jeton> = None;

    for tok in tokens {
        match &tok.genre {
            Genre::Nombre(_) => {
                exige_valeur(attend_valeur)?;
                out.push(tok.clone());
                attend_valeur = false;
            }

            Genre::Fonction(_) | Genre::ParOuvrante => {
                exige_valeur(attend_valeur)?;
                ops.push(tok.clone());
            }

            Genre::ParFermante => {
                if attend_valeur {
                    match precedent.map(|p| &p.genre) {
                        Some(Genre::ParOuvrante) => return Err(groupe_vide(&ops)),
                        Some(Genre::Operateur(_)) => return Err(manque_operande(precedent)),
                        // ')' en tête : l’appariement échoue juste après
                        _ => {}
                    }
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        None => {
                            return Err(ErreurEval::Parentheses {
                                position: tok.position,
                            })
                        }
                        Some(top) if top.genre == Genre::ParOuvrante => break,
                        Some(top) => out.push(top),
                    }
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last().map(|t| &t.genre), Some(Genre::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
                attend_valeur = false;
            }

            Genre::Operateur(op) => {
                if op.est_prefixe() {
                    exige_valeur(attend_valeur)?;
                } else if attend_valeur {
                    return Err(manque_operande(Some(tok)));
                }

                let entrant = op.desc();

                if !op.est_prefixe() {
                    while let Some(top) = ops.last() {
                        // bloqué par '(' ou par une fonction
                        let Genre::Operateur(top_op) = top.genre else {
                            break;
                        };
                        let sommet = top_op.desc();

                        let doit_pop = sommet.precedence > entrant.precedence
                            || (sommet.precedence == entrant.precedence
                                && entrant.associativite == Assoc::Gauche);
                        if !doit_pop {
                            break;
                        }
                        if let Some(top) = ops.pop() {
                            out.push(top);
                        }
                    }
                }

                ops.push(tok.clone());
                attend_valeur = true;
            }
        }
        precedent = Some(tok);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.genre == Genre::ParOuvrante {
            return Err(ErreurEval::Parentheses {
                position: op.position,
            });
        }
        out.push(op);
    }

    if attend_valeur && matches!(precedent.map(|p| &p.genre), Some(Genre::Operateur(_))) {
        return Err(manque_operande(precedent));
    }
    if out.is_empty() {
        return Err(ErreurEval::ExpressionMalformee { restantes: 0 });
    }

    Ok(ProgrammePostfixe { jetons: out })
}

/// Deux valeurs côte à côte ("2 3", "2 (3)", "2 sqrt(4)").
fn exige_valeur(attend_valeur: bool) -> Result<(), ErreurEval> {
    if attend_valeur {
        Ok(())
    } else {
        Err(ErreurEval::ExpressionMalformee { restantes: 2 })
    }
}

fn manque_operande(op: Option<&Jeton>) -> ErreurEval {
    ErreurEval::OperandesInsuffisantes {
        symbole: op.map(|j| j.texte.clone()).unwrap_or_default(),
    }
}

/// ')' juste après '(' : la '(' est au sommet de `ops`, une fonction éventuelle juste dessous.
fn groupe_vide(ops: &[Jeton]) -> ErreurEval {
    match ops.iter().rev().nth(1) {
        Some(Jeton {
            genre: Genre::Fonction(f),
            ..
        }) => ErreurEval::OperandesInsuffisantes {
            symbole: f.desc().nom.to_string(),
        },
        _ => ErreurEval::ExpressionMalformee { restantes: 0 },
    }
}
