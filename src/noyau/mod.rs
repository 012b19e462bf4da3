//! Noyau : tour numérique + arbres préfixés
//!
//! Organisation interne :
//! - erreur.rs         : familles d’erreurs (une seule énumération)
//! - fraction.rs       : fraction normalisée (feuille)
//! - decimal.rs        : réel inexact = entier “scalé” (×10^15), arrondi demi-haut
//! - maths.rs          : log10 / pow10 / ln / exp / expt / log en base 10
//! - nombre.rs         : Entier | Rationnel | Reel + contagion + effondrement
//! - operateur.rs      : catalogue fermé des opérateurs + arités
//! - jetons.rs         : classification des jetons + tokenisation
//! - noeud.rs          : Litteral | Ident | Operation + évaluation complète
//! - construction.rs   : construction récursive ET itérative (même contrat)
//! - reconstruction.rs : arbre -> jetons canoniques
//! - pas_a_pas.rs      : une réduction la plus interne par appel
//! - eval.rs           : pipeline complet

pub mod construction;
pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod fraction;
pub mod jetons;
pub mod maths;
pub mod noeud;
pub mod nombre;
pub mod operateur;
pub mod pas_a_pas;
pub mod reconstruction;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use eval::eval_expression;
