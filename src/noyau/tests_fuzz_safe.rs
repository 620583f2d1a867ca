//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : valeur attendue calculée en parallèle (référence)
//! - entrées “poubelle” : jamais de panique, toujours une erreur typée ou une valeur finie
//! - deux valeurs côte à côte : jamais de résultat

use std::time::{Duration, Instant};

use super::jetons::{tokenize, Genre};
use super::{evaluer, ErreurEval, Etape};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Expression + valeur de référence (None = erreur arithmétique attendue).
struct Cas {
    texte: String,
    attendu: Option<f64>,
}

fn fini(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn gen_nombre(rng: &mut Rng) -> Cas {
    // petits décimaux, incluant 0 (utile pour tester les divisions par zéro)
    let entier = rng.pick(10);
    if rng.coin() {
        let frac = rng.pick(4) * 25;
        let texte = format!("{entier}.{frac:02}");
        let attendu = texte.parse().ok();
        Cas { texte, attendu }
    } else {
        Cas {
            texte: entier.to_string(),
            attendu: Some(entier as f64),
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> Cas {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(9) {
        0 => gen_nombre(rng),
        1..=5 => {
            let a = gen_expr(rng, depth - 1);
            let b = gen_expr(rng, depth - 1);
            let (sym, attendu) = match rng.pick(5) {
                0 => ('+', a.attendu.zip(b.attendu).and_then(|(x, y)| fini(x + y))),
                1 => ('-', a.attendu.zip(b.attendu).and_then(|(x, y)| fini(x - y))),
                2 => ('*', a.attendu.zip(b.attendu).and_then(|(x, y)| fini(x * y))),
                3 => (
                    '/',
                    a.attendu
                        .zip(b.attendu)
                        .and_then(|(x, y)| if y == 0.0 { None } else { fini(x / y) }),
                ),
                _ => (
                    '%',
                    a.attendu
                        .zip(b.attendu)
                        .and_then(|(x, y)| if y == 0.0 { None } else { fini(x % y) }),
                ),
            };
            Cas {
                texte: format!("({} {sym} {})", a.texte, b.texte),
                attendu,
            }
        }
        6 => {
            // puissance à exposant entier court : jamais hors domaine
            let a = gen_expr(rng, depth - 1);
            let n = rng.pick(4);
            Cas {
                texte: format!("({})^{n}", a.texte),
                attendu: a.attendu.and_then(|x| fini(x.powf(n as f64))),
            }
        }
        7 => {
            let a = gen_expr(rng, depth - 1);
            Cas {
                texte: format!("-({})", a.texte),
                attendu: a.attendu.map(|x| -x),
            }
        }
        _ => {
            let a = gen_expr(rng, depth - 1);
            Cas {
                texte: format!("sqrt({})", a.texte),
                attendu: a
                    .attendu
                    .and_then(|x| if x < 0.0 { None } else { Some(x.sqrt()) }),
            }
        }
    }
}

/// Chaîne “poubelle” sur un alphabet proche du langage.
fn gen_poubelle(rng: &mut Rng, len: usize) -> String {
    const MORCEAUX: [&str; 16] = [
        "1", "2.5", ".", "+", "-", "*", "/", "%", "^", "(", ")", " ", "sqrt(", "x", "abs", "#",
    ];
    (0..len)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/// Vrai si une valeur se termine et qu’une autre commence juste après ("2 3", ") (", "2 sqrt(").
fn a_valeurs_adjacentes(s: &str) -> bool {
    let Ok(jetons) = tokenize(s) else {
        return false;
    };
    jetons.windows(2).any(|w| {
        matches!(w[0].genre, Genre::Nombre(_) | Genre::ParFermante)
            && matches!(
                w[1].genre,
                Genre::Nombre(_) | Genre::Fonction(_) | Genre::ParOuvrante
            )
    })
}

/// Erreur attendue pour une chaîne faite uniquement de parenthèses,
/// lue de gauche à droite comme le fait la conversion.
fn attendu_parentheses(s: &str) -> ErreurEval {
    let mut ouvertes: Vec<usize> = Vec::new();
    let mut prec = None;
    for (i, c) in s.chars().enumerate() {
        if c == '(' {
            ouvertes.push(i);
        } else {
            if prec == Some('(') {
                return ErreurEval::ExpressionMalformee { restantes: 0 };
            }
            if ouvertes.pop().is_none() {
                return ErreurEval::Parentheses { position: i };
            }
        }
        prec = Some(c);
    }
    match ouvertes.last() {
        // la pile se vide par le haut : la dernière '(' ouverte est signalée
        Some(&position) => ErreurEval::Parentheses { position },
        None => ErreurEval::ExpressionMalformee { restantes: 0 },
    }
}

fn is_erreur_arithmetique(e: &ErreurEval) -> bool {
    matches!(
        e,
        ErreurEval::DivisionParZero { .. } | ErreurEval::Domaine { .. } | ErreurEval::Depassement { .. }
    )
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_reference_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let cas = gen_expr(&mut rng, 4);
        let r = evaluer(&cas.texte);
        assert_eq!(r, evaluer(&cas.texte), "non déterministe: {:?}", cas.texte);

        match (r, cas.attendu) {
            (Ok(v), Some(attendu)) => {
                let tol = 1e-9 * (1.0 + attendu.abs());
                assert!(
                    (v - attendu).abs() <= tol,
                    "expr={:?} obtenu={v} attendu={attendu}",
                    cas.texte
                );
                seen_ok += 1;
            }
            (Err(e), None) => {
                assert!(
                    is_erreur_arithmetique(&e),
                    "erreur non attendue: expr={:?} err={e}",
                    cas.texte
                );
                seen_err += 1;
            }
            (r, attendu) => panic!(
                "désaccord: expr={:?} obtenu={r:?} attendu={attendu:?}",
                cas.texte
            ),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_poubelle_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut vus = [0usize; 3];

    for _ in 0..2_000 {
        budget(t0, max);

        let len = 1 + rng.pick(12) as usize;
        let s = gen_poubelle(&mut rng, len);

        let r = evaluer(&s);
        if a_valeurs_adjacentes(&s) {
            assert!(r.is_err(), "valeurs adjacentes acceptées: expr={s:?} r={r:?}");
        }

        match r {
            Ok(v) => assert!(v.is_finite(), "expr={s:?} v={v}"),
            Err(e) => {
                let i = match e.etape() {
                    Etape::Lecture => 0,
                    Etape::Conversion => 1,
                    Etape::Evaluation => 2,
                };
                vus[i] += 1;
                assert!(!e.to_string().is_empty());
            }
        }
    }

    // lecture et conversion doivent avoir été atteintes
    // (l’évaluation demande une entrée bien formée, rare ici)
    assert!(vus[0] > 0 && vus[1] > 0, "étapes vues: {vus:?}");
}

#[test]
fn fuzz_safe_valeurs_juxtaposees_jamais_ok() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5A1AD_u64);

    for _ in 0..300 {
        budget(t0, max);

        let a = gen_expr(&mut rng, 3);
        let b = gen_expr(&mut rng, 3);
        let c = gen_expr(&mut rng, 2);
        let s = match rng.pick(4) {
            0 => format!("{} ({})", a.texte, b.texte),
            1 => format!("{} ({}) + {}", a.texte, b.texte, c.texte),
            2 => format!("{} * {} {}", c.texte, a.texte, gen_nombre(&mut rng).texte),
            _ => format!("sqrt({} ({}))", a.texte, b.texte),
        };

        // la forme est refusée avant tout calcul : jamais de division par zéro ici
        let r = evaluer(&s);
        assert!(
            matches!(r, Err(ErreurEval::ExpressionMalformee { .. })),
            "expr={s:?} r={r:?}"
        );
    }
}

#[test]
fn fuzz_safe_parentheses_seules() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        // suite aléatoire de parenthèses seules
        let n = rng.pick(8) as usize;
        let mut s = String::new();
        for _ in 0..n {
            s.push(if rng.coin() { '(' } else { ')' });
        }

        // jamais de valeur : groupe vide, ou parenthèse orpheline rencontrée avant
        assert_eq!(evaluer(&s), Err(attendu_parentheses(&s)), "s={s:?}");
    }
}
