// src/noyau/format.rs

/// Affichage d’un résultat avec au plus `digits` décimales.
/// - zéros finaux retirés (2.5000 -> 2.5, 3.000 -> 3)
/// - pas de "-0"
pub fn formater_nombre(v: f64, digits: usize) -> String {
    let mut s = format!("{v:.digits$}");

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Écriture réinjectable dans une expression : pleine précision, jamais d’exposant,
/// parenthèses si négatif (pour que "2 ^ x" reste "2 ^ (-3)").
pub fn formater_pour_saisie(v: f64) -> String {
    // Display de f64 n’utilise jamais la notation scientifique
    let s = format!("{v}");
    if v < 0.0 {
        format!("({s})")
    } else if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
