// src/noyau/jetons.rs

use super::erreur::ErreurEval;
use super::operateurs::{Fonction, Op};

#[derive(Clone, Debug, PartialEq)]
pub enum Genre {
    Nombre(f64),
    // Le moins unaire arrive ici déjà étiqueté `Op::Neg`.
    Operateur(Op),
    Fonction(Fonction),
    ParOuvrante,
    ParFermante,
}

/// Jeton : genre + texte d’origine + position (index de caractère) dans l’entrée.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub genre: Genre,
    pub texte: String,
    pub position: usize,
}

impl Jeton {
    fn new(genre: Genre, texte: impl Into<String>, position: usize) -> Self {
        Self {
            genre,
            texte: texte.into(),
            position,
        }
    }

    pub fn valeur(&self) -> Option<f64> {
        match self.genre {
            Genre::Nombre(v) => Some(v),
            _ => None,
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) ; pas de notation scientifique
/// - opérateurs + - * / % ^ (un caractère chacun)
/// - parenthèses ( )
/// - fonctions : nom collé à sa parenthèse (ex: sqrt(2)), casse ignorée
///
/// Le '-' devient `Op::Neg` en début d’expression, après '(' ou après un autre opérateur.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    // vrai quand le prochain jeton doit être une valeur (=> '-' unaire)
    let mut attend_valeur = true;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Jeton::new(Genre::ParOuvrante, "(", i));
            attend_valeur = true;
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::new(Genre::ParFermante, ")", i));
            attend_valeur = false;
            i += 1;
            continue;
        }

        // Opérateurs
        if let Some(op) = Op::binaire(c) {
            let op = if op == Op::Moins && attend_valeur {
                Op::Neg
            } else {
                op
            };
            out.push(Jeton::new(Genre::Operateur(op), c.to_string(), i));
            attend_valeur = true;
            i += 1;
            continue;
        }

        // Fonctions : [a-zA-Z]+ suivi immédiatement de '('
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            if chars.get(i) != Some(&'(') {
                return Err(ErreurEval::Lexicale {
                    position: start,
                    detail: format!("identifiant inattendu '{word}'"),
                });
            }

            let f = Fonction::depuis_nom(&word).ok_or_else(|| ErreurEval::FonctionInconnue {
                nom: word.clone(),
                position: start,
            })?;
            out.push(Jeton::new(Genre::Fonction(f), word, start));
            attend_valeur = true;
            continue;
        }

        // Nombre : chiffres avec au plus un point décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut points = 0;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    points += 1;
                }
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();

            if points > 1 || texte == "." {
                return Err(ErreurEval::Lexicale {
                    position: start,
                    detail: format!("nombre mal formé '{texte}'"),
                });
            }
            let v: f64 = texte.parse().map_err(|_| ErreurEval::Lexicale {
                position: start,
                detail: format!("nombre mal formé '{texte}'"),
            })?;
            if !v.is_finite() {
                return Err(ErreurEval::Lexicale {
                    position: start,
                    detail: format!("nombre trop grand '{texte}'"),
                });
            }

            out.push(Jeton::new(Genre::Nombre(v), texte, start));
            attend_valeur = false;
            continue;
        }

        return Err(ErreurEval::Lexicale {
            position: i,
            detail: format!("caractère inattendu '{c}'"),
        });
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
/// Le moins unaire est affiché `neg` pour le distinguer du moins binaire.
pub fn format_tokens<'a>(tokens: impl IntoIterator<Item = &'a Jeton>) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match &t.genre {
            Genre::Operateur(op) => op.desc().symbole.to_string(),
            Genre::Fonction(f) => f.desc().nom.to_string(),
            Genre::Nombre(_) | Genre::ParOuvrante | Genre::ParFermante => t.texte.clone(),
        };
        out.push(s);
    }
    out.join(" ")
}
