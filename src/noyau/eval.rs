//! Noyau : évaluation (pipeline complet)
//!
//! texte -> jetons -> arbre (récursif, contrôlé par l’itératif) -> valeur
//!       -> démarche pas à pas jusqu’au point fixe
//!
//! Remarque : la valeur rendue est celle de l’évaluation complète ; la démarche
//! n’est déroulée qu’après, donc elle ne peut plus échouer.

use tracing::debug;

use super::construction::{build_iteratively, build_recursively};
use super::erreur::Resultat;
use super::jetons::{format_tokens, tokenize};
use super::noeud::Liaisons;
use super::nombre::Nombre;
use super::pas_a_pas::EvaluateurPas;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    /// Jetons lus, tels quels.
    pub jetons: String,
    /// Reconstruction canonique de l’arbre.
    pub arbre: String,
    /// Un flux de jetons par réduction (le dernier est la valeur).
    pub etapes: Vec<String>,
}

/// API publique : évalue une expression préfixe et retourne la valeur + la démarche.
pub fn eval_expression(expr_str: &str, liaisons: &Liaisons) -> Resultat<(Nombre, Demarche)> {
    // 1) Jetons
    let jetons = tokenize(expr_str.trim());

    // 2) Arbre (les deux constructions doivent s’accorder)
    let arbre = build_recursively(&jetons)?;
    let controle = build_iteratively(&jetons)?;
    debug_assert_eq!(arbre, controle, "constructions divergentes");

    // 3) Valeur
    let valeur = arbre.evaluate(liaisons)?;

    // 4) Démarche
    let mut ev = EvaluateurPas::new(&arbre, liaisons.clone());
    let mut etapes = Vec::new();
    while !ev.est_termine() {
        etapes.push(format_tokens(&ev.next_step()?));
    }
    debug!(etapes = etapes.len(), valeur = %valeur, "évaluation terminée");

    let d = Demarche {
        jetons: format_tokens(&jetons),
        arbre: arbre.to_string(),
        etapes,
    };

    Ok((valeur, d))
}
