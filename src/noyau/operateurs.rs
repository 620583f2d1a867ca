// src/noyau/operateurs.rs
//
// Tables d’opérateurs et de fonctions.
//
// Chaque opérateur/fonction est décrit par une entrée de table
// (symbole, précédence, associativité, calcul). Ajouter une fonction
// = ajouter une ligne dans FONCTIONS, rien d’autre.
//
// Précédences :
//   + -        1  (gauche)
//   * / %      2  (gauche)
//   neg        3  (droite, unaire préfixe)
//   ^          4  (droite)
// => -2^2 = -(2^2) = -4 ; 2^3^2 = 2^(3^2) = 512.

use super::erreur::ErreurEval;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

/// Calcul attaché à un opérateur ou une fonction.
#[derive(Clone, Copy)]
pub enum Calcul {
    Unaire(fn(f64) -> Result<f64, ErreurEval>),
    Binaire(fn(f64, f64) -> Result<f64, ErreurEval>),
}

impl Calcul {
    pub fn arite(&self) -> usize {
        match self {
            Calcul::Unaire(_) => 1,
            Calcul::Binaire(_) => 2,
        }
    }
}

/* ------------------------ Opérateurs ------------------------ */

/// Opérateurs reconnus. `Neg` = moins unaire (distinct du moins binaire).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,
    Neg,
}

pub struct DescOp {
    pub op: Op,
    pub symbole: &'static str,
    pub precedence: u8,
    pub associativite: Assoc,
    pub calcul: Calcul,
}

static OPERATEURS: [DescOp; 7] = [
    DescOp {
        op: Op::Plus,
        symbole: "+",
        precedence: 1,
        associativite: Assoc::Gauche,
        calcul: Calcul::Binaire(plus),
    },
    DescOp {
        op: Op::Moins,
        symbole: "-",
        precedence: 1,
        associativite: Assoc::Gauche,
        calcul: Calcul::Binaire(moins),
    },
    DescOp {
        op: Op::Fois,
        symbole: "*",
        precedence: 2,
        associativite: Assoc::Gauche,
        calcul: Calcul::Binaire(fois),
    },
    DescOp {
        op: Op::Divise,
        symbole: "/",
        precedence: 2,
        associativite: Assoc::Gauche,
        calcul: Calcul::Binaire(divise),
    },
    DescOp {
        op: Op::Modulo,
        symbole: "%",
        precedence: 2,
        associativite: Assoc::Gauche,
        calcul: Calcul::Binaire(modulo),
    },
    DescOp {
        op: Op::Puissance,
        symbole: "^",
        precedence: 4,
        associativite: Assoc::Droite,
        calcul: Calcul::Binaire(puissance),
    },
    DescOp {
        op: Op::Neg,
        symbole: "neg",
        precedence: 3,
        associativite: Assoc::Droite,
        calcul: Calcul::Unaire(neg),
    },
];

impl Op {
    /// Opérateur binaire associé à un caractère (le '-' donne toujours `Moins` ici ;
    /// la distinction unaire/binaire est faite par le tokenizer).
    pub fn binaire(c: char) -> Option<Op> {
        OPERATEURS
            .iter()
            .filter(|d| matches!(d.calcul, Calcul::Binaire(_)))
            .find(|d| d.symbole.len() == 1 && d.symbole.starts_with(c))
            .map(|d| d.op)
    }

    pub fn desc(self) -> &'static DescOp {
        match self {
            Op::Plus => &OPERATEURS[0],
            Op::Moins => &OPERATEURS[1],
            Op::Fois => &OPERATEURS[2],
            Op::Divise => &OPERATEURS[3],
            Op::Modulo => &OPERATEURS[4],
            Op::Puissance => &OPERATEURS[5],
            Op::Neg => &OPERATEURS[6],
        }
    }

    pub fn est_prefixe(self) -> bool {
        matches!(self.desc().calcul, Calcul::Unaire(_))
    }
}

fn plus(a: f64, b: f64) -> Result<f64, ErreurEval> {
    Ok(a + b)
}

fn moins(a: f64, b: f64) -> Result<f64, ErreurEval> {
    Ok(a - b)
}

fn fois(a: f64, b: f64) -> Result<f64, ErreurEval> {
    Ok(a * b)
}

fn divise(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if b == 0.0 {
        return Err(ErreurEval::DivisionParZero { symbole: '/' });
    }
    Ok(a / b)
}

/// Reste flottant : le signe suit le dividende (-7 % 3 = -1).
fn modulo(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if b == 0.0 {
        return Err(ErreurEval::DivisionParZero { symbole: '%' });
    }
    Ok(a % b)
}

fn puissance(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if a == 0.0 && b < 0.0 {
        return Err(ErreurEval::Domaine {
            detail: format!("0^{b}"),
        });
    }
    if a < 0.0 && b.fract() != 0.0 {
        return Err(ErreurEval::Domaine {
            detail: format!("({a})^{b} n’est pas réel"),
        });
    }
    Ok(a.powf(b))
}

fn neg(x: f64) -> Result<f64, ErreurEval> {
    Ok(-x)
}

/* ------------------------ Fonctions ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Abs,
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Exp,
}

pub struct DescFonction {
    pub fonction: Fonction,
    pub nom: &'static str,
    pub calcul: fn(f64) -> Result<f64, ErreurEval>,
}

static FONCTIONS: [DescFonction; 8] = [
    DescFonction {
        fonction: Fonction::Sqrt,
        nom: "sqrt",
        calcul: sqrt,
    },
    DescFonction {
        fonction: Fonction::Abs,
        nom: "abs",
        calcul: abs,
    },
    DescFonction {
        fonction: Fonction::Sin,
        nom: "sin",
        calcul: sin,
    },
    DescFonction {
        fonction: Fonction::Cos,
        nom: "cos",
        calcul: cos,
    },
    DescFonction {
        fonction: Fonction::Tan,
        nom: "tan",
        calcul: tan,
    },
    DescFonction {
        fonction: Fonction::Ln,
        nom: "ln",
        calcul: ln,
    },
    DescFonction {
        fonction: Fonction::Log,
        nom: "log",
        calcul: log10,
    },
    DescFonction {
        fonction: Fonction::Exp,
        nom: "exp",
        calcul: exp,
    },
];

impl Fonction {
    /// Recherche insensible à la casse.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        FONCTIONS
            .iter()
            .find(|d| d.nom.eq_ignore_ascii_case(nom))
            .map(|d| d.fonction)
    }

    pub fn desc(self) -> &'static DescFonction {
        match self {
            Fonction::Sqrt => &FONCTIONS[0],
            Fonction::Abs => &FONCTIONS[1],
            Fonction::Sin => &FONCTIONS[2],
            Fonction::Cos => &FONCTIONS[3],
            Fonction::Tan => &FONCTIONS[4],
            Fonction::Ln => &FONCTIONS[5],
            Fonction::Log => &FONCTIONS[6],
            Fonction::Exp => &FONCTIONS[7],
        }
    }

    /// Noms reconnus (pour l’app : boutons, backspace par mot).
    pub fn noms() -> impl Iterator<Item = &'static str> {
        FONCTIONS.iter().map(|d| d.nom)
    }
}

fn sqrt(x: f64) -> Result<f64, ErreurEval> {
    if x < 0.0 {
        return Err(ErreurEval::Domaine {
            detail: format!("sqrt({x})"),
        });
    }
    Ok(x.sqrt())
}

fn abs(x: f64) -> Result<f64, ErreurEval> {
    Ok(x.abs())
}

fn sin(x: f64) -> Result<f64, ErreurEval> {
    Ok(x.sin())
}

fn cos(x: f64) -> Result<f64, ErreurEval> {
    Ok(x.cos())
}

fn tan(x: f64) -> Result<f64, ErreurEval> {
    Ok(x.tan())
}

fn ln(x: f64) -> Result<f64, ErreurEval> {
    if x <= 0.0 {
        return Err(ErreurEval::Domaine {
            detail: format!("ln({x})"),
        });
    }
    Ok(x.ln())
}

fn log10(x: f64) -> Result<f64, ErreurEval> {
    if x <= 0.0 {
        return Err(ErreurEval::Domaine {
            detail: format!("log({x})"),
        });
    }
    Ok(x.log10())
}

fn exp(x: f64) -> Result<f64, ErreurEval> {
    Ok(x.exp())
}
