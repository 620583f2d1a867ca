// src/lib.rs
//
// Bibliothèque : le noyau d’évaluation, utilisable sans l’interface.

pub mod noyau;
