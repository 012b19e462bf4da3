//! Tour numérique « façon Lisp » + expressions préfixées.
//!
//! - entiers exacts, rationnels exacts, réels inexacts (échelle fixe 15)
//! - contagion exact/inexact + effondrement vers l’entier
//! - deux constructions d’arbre (récursive / itérative) qui doivent concorder
//! - reconstruction canonique + évaluation pas à pas
//!
//! Tout le calcul vit dans `noyau` ; la racine ne fait que ré-exporter.

pub mod noyau;

pub use noyau::construction::{build_iteratively, build_recursively};
pub use noyau::decimal::{Decimal, ECHELLE};
pub use noyau::erreur::{ErreurNoyau, Resultat};
pub use noyau::eval::{eval_expression, Demarche};
pub use noyau::fraction::Fraction;
pub use noyau::jetons::{format_tokens, tokenize};
pub use noyau::noeud::{Constante, Identifiant, Liaisons, Noeud, Operation, MAX_PROFONDEUR};
pub use noyau::nombre::{Nombre, Rationnel};
pub use noyau::operateur::Operateur;
pub use noyau::pas_a_pas::EvaluateurPas;
pub use noyau::reconstruction::reconstruct;
