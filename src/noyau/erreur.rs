// src/noyau/erreur.rs
//
// Une seule énumération d’erreurs pour tout le noyau.
// - levée au point de détection, jamais rattrapée en interne
// - les deux constructions d’arbre partagent exactement les mêmes variantes

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    /// Diviseur exact nul, ou fraction de dénominateur 0.
    #[error("division par zéro")]
    DivisionParZero,

    /// ln / log / sqrt hors domaine, ou diviseur réel nul (la valeur fautive est gardée en texte).
    #[error("opérande non positif : {0}")]
    OperandeNonPositif(String),

    #[error("aucune expression")]
    PasDExpression,

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    #[error("opérateur non défini : {0:?}")]
    OperateurInconnu(String),

    #[error("nombre d’opérandes incorrect : {actuel}, attendu {}", format_plage(.min, .max))]
    NombreOperandes {
        actuel: usize,
        min: usize,
        max: Option<usize>,
    },

    #[error("identifiant illégal : {0:?}")]
    IdentifiantIllegal(String),

    #[error("jeton invalide : {0:?}")]
    JetonInvalide(String),

    #[error("identifiant non défini : {0}")]
    IdentifiantNonDefini(String),

    /// Garde-fou pow10 (partie entière de l’exposant trop grande).
    #[error("exposant hors bornes")]
    ExposantHorsBornes,

    /// Imbrication au-delà de MAX_PROFONDEUR groupes.
    #[error("expression trop imbriquée")]
    ProfondeurExcessive,

    /// Flottant non fini au cœur d’un calcul transcendant.
    #[error("résultat non représentable")]
    NonRepresentable,
}

pub type Resultat<T> = Result<T, ErreurNoyau>;

fn format_plage(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) if max == min => format!("{min}"),
        Some(max) => format!("[{min}, {max}]"),
        None => format!("[{min}, ∞)"),
    }
}
