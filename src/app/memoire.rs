//! src/app/memoire.rs
//!
//! Variables de la calculatrice (ans, pi, e).
//!
//! Le noyau ne connaît pas les variables : on les remplace par leur valeur
//! AVANT d’appeler `noyau::evaluer`. Un identifiant collé à '(' est une
//! fonction et n’est jamais touché ; un identifiant inconnu est laissé tel quel
//! (le noyau le signalera).

use std::collections::BTreeMap;

use calculatrice_rpn::noyau::format::formater_pour_saisie;

pub const ANS: &str = "ans";

#[derive(Clone, Debug)]
pub struct Memoire {
    variables: BTreeMap<String, f64>,
}

impl Default for Memoire {
    fn default() -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("pi".to_string(), std::f64::consts::PI);
        variables.insert("e".to_string(), std::f64::consts::E);
        variables.insert(ANS.to_string(), 0.0);
        Self { variables }
    }
}

impl Memoire {
    pub fn valeur(&self, nom: &str) -> Option<f64> {
        self.variables.get(&nom.to_ascii_lowercase()).copied()
    }

    /// Dernier résultat, réutilisable sous le nom `ans`.
    pub fn set_ans(&mut self, v: f64) {
        self.variables.insert(ANS.to_string(), v);
    }

    pub fn noms(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Remplace chaque variable connue par sa valeur (entourée d’espaces,
    /// pour que "2pi" ne devienne jamais "23.14…").
    pub fn substituer(&self, expr: &str) -> String {
        let chars: Vec<char> = expr.chars().collect();
        let mut out = String::with_capacity(expr.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if !c.is_ascii_alphabetic() {
                out.push(c);
                i += 1;
                continue;
            }

            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();

            let est_fonction = chars.get(i) == Some(&'(');
            match self.valeur(&mot) {
                Some(v) if !est_fonction => {
                    out.push(' ');
                    out.push_str(&formater_pour_saisie(v));
                    out.push(' ');
                }
                _ => out.push_str(&mot),
            }
        }

        out
    }
}
