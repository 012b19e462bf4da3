// src/noyau/noeud.rs
//
// Arbre d’expression préfixe :
//   expr := nombre | identifiant | "(" SYMBOLE expr* ")"
//
// - Litteral  : une valeur de la tour numérique
// - Ident     : nom [A-Za-z-]+ (résolu à l’évaluation : constante, puis liaison)
// - Operation : opérateur du catalogue + opérandes ordonnés (arité et profondeur vérifiées
//               à la construction)
//
// Valeurs immuables : clone = copie profonde (Vec possédé), jamais d’alias.

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigInt;
use tracing::trace;

use super::decimal::Decimal;
use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{est_identifiant, format_tokens};
use super::nombre::Nombre;
use super::operateur::Operateur;
use super::reconstruction::reconstruct;

/// Identifiant -> valeur (fourni par l’appelant).
pub type Liaisons = HashMap<String, Nombre>;

/* ------------------------ Constantes prédéfinies ------------------------ */

/// `e` et `pi` : toujours résolus ainsi, quelles que soient les liaisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    E,
    Pi,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "e" => Some(Constante::E),
            "pi" => Some(Constante::Pi),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::E => "e",
            Constante::Pi => "pi",
        }
    }

    /// Réel à l’échelle fixe (15 décimales).
    pub fn valeur(self) -> Nombre {
        let scaled: i64 = match self {
            Constante::E => 2_718_281_828_459_045,
            Constante::Pi => 3_141_592_653_589_793,
        };
        Nombre::Reel(Decimal::from_scaled(BigInt::from(scaled)))
    }
}

/// Valeur d’un identifiant : constante d’abord, liaison ensuite.
pub fn resoudre(nom: &str, liaisons: &Liaisons) -> Resultat<Nombre> {
    if let Some(c) = Constante::depuis_nom(nom) {
        return Ok(c.valeur());
    }
    liaisons
        .get(nom)
        .cloned()
        .ok_or_else(|| ErreurNoyau::IdentifiantNonDefini(nom.to_string()))
}

/* ------------------------ Noeuds ------------------------ */

/// Nombre maximal de groupes imbriqués (constructions ET Operation::new).
pub const MAX_PROFONDEUR: usize = 512;

/// Nom validé [A-Za-z-]+ (champ privé : passer par `Identifiant::new`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifiant(String);

impl Identifiant {
    /// Nom hors [A-Za-z-]+ => IdentifiantIllegal.
    pub fn new(nom: impl Into<String>) -> Resultat<Self> {
        let nom = nom.into();
        if !est_identifiant(&nom) {
            return Err(ErreurNoyau::IdentifiantIllegal(nom));
        }
        Ok(Identifiant(nom))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifiant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Noeud {
    Litteral(Nombre),
    Ident(Identifiant),
    Operation(Operation),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    operateur: Operateur,
    operandes: Vec<Noeud>,
    profondeur: usize,
}

impl Operation {
    /// Arité hors plage => NombreOperandes ; imbrication > MAX_PROFONDEUR => ProfondeurExcessive.
    pub fn new(operateur: Operateur, operandes: Vec<Noeud>) -> Resultat<Self> {
        operateur.verifier_arite(operandes.len())?;
        let profondeur = 1 + operandes.iter().map(Noeud::profondeur).max().unwrap_or(0);
        if profondeur > MAX_PROFONDEUR {
            return Err(ErreurNoyau::ProfondeurExcessive);
        }
        Ok(Operation {
            operateur,
            operandes,
            profondeur,
        })
    }

    pub fn operateur(&self) -> Operateur {
        self.operateur
    }

    pub fn operandes(&self) -> &[Noeud] {
        &self.operandes
    }

    pub fn profondeur(&self) -> usize {
        self.profondeur
    }

    pub fn evaluate(&self, liaisons: &Liaisons) -> Resultat<Nombre> {
        evaluer(Tache::Ouvrir(self), liaisons)
    }

    /// Opérateur appliqué aux valeurs déjà calculées des opérandes.
    fn appliquer(&self, valeurs: &[Nombre]) -> Resultat<Nombre> {
        use Operateur::*;

        trace!(operateur = %self.operateur, operandes = valeurs.len(), "évaluation");

        match (self.operateur, valeurs) {
            (Add, []) => Ok(Nombre::from(0)),
            (Mul, []) => Ok(Nombre::from(1)),

            (Add, [a]) => Ok(a.plus_unaire()),
            (Sub, [a]) => Ok(a.minus_unaire()),
            (Mul, [a]) => Ok(a.times_unaire()),
            (Div, [a]) => a.divide_unaire(),

            // variadiques : pli à gauche
            (Add, [a, reste @ ..]) => Ok(reste.iter().fold(a.clone(), |acc, b| acc.plus(b))),
            (Sub, [a, reste @ ..]) => Ok(reste.iter().fold(a.clone(), |acc, b| acc.minus(b))),
            (Mul, [a, reste @ ..]) => Ok(reste.iter().fold(a.clone(), |acc, b| acc.times(b))),
            (Div, [a, reste @ ..]) => reste.iter().try_fold(a.clone(), |acc, b| acc.divide(b)),

            (Exp, [a]) => a.exp(),
            (Ln, [a]) => a.ln(),
            (Sqrt, [a]) => a.sqrt(),
            (Expt, [a, n]) => a.expt(n),
            (Log, [a, base]) => a.log(base),

            (op, v) => {
                let (min, max) = op.arite();
                Err(ErreurNoyau::NombreOperandes {
                    actuel: v.len(),
                    min,
                    max,
                })
            }
        }
    }
}

/* ------------------------ Évaluation (pile explicite) ------------------------ */

enum Tache<'a> {
    Visiter(&'a Noeud),
    Ouvrir(&'a Operation),
    Appliquer(&'a Operation),
}

/// Post-ordre gauche -> droite : la première erreur rencontrée est celle
/// qu’aurait levée une descente récursive.
fn evaluer(depart: Tache<'_>, liaisons: &Liaisons) -> Resultat<Nombre> {
    let mut pile = vec![depart];
    let mut valeurs: Vec<Nombre> = Vec::new();

    while let Some(t) = pile.pop() {
        match t {
            Tache::Visiter(Noeud::Litteral(n)) => valeurs.push(n.clone()),
            Tache::Visiter(Noeud::Ident(nom)) => {
                valeurs.push(resoudre(nom.as_str(), liaisons)?)
            }
            Tache::Visiter(Noeud::Operation(op)) => pile.push(Tache::Ouvrir(op)),
            Tache::Ouvrir(op) => {
                pile.push(Tache::Appliquer(op));
                // ordre inverse : le premier opérande sort en premier
                pile.extend(op.operandes.iter().rev().map(Tache::Visiter));
            }
            Tache::Appliquer(op) => {
                let debut = valeurs.len() - op.operandes.len();
                let v = op.appliquer(&valeurs[debut..])?;
                valeurs.truncate(debut);
                valeurs.push(v);
            }
        }
    }

    // une tâche de départ laisse exactement une valeur
    valeurs.pop().ok_or(ErreurNoyau::PasDExpression)
}

impl Noeud {
    pub fn litteral(n: impl Into<Nombre>) -> Noeud {
        Noeud::Litteral(n.into())
    }

    /// Nom hors [A-Za-z-]+ => IdentifiantIllegal.
    pub fn identifiant(nom: impl Into<String>) -> Resultat<Noeud> {
        Ok(Noeud::Ident(Identifiant::new(nom)?))
    }

    pub fn operation(operateur: Operateur, operandes: Vec<Noeud>) -> Resultat<Noeud> {
        Ok(Noeud::Operation(Operation::new(operateur, operandes)?))
    }

    pub fn est_litteral(&self) -> bool {
        matches!(self, Noeud::Litteral(_))
    }

    /// Groupes imbriqués (0 pour une feuille).
    pub fn profondeur(&self) -> usize {
        match self {
            Noeud::Operation(op) => op.profondeur,
            _ => 0,
        }
    }

    /// Évaluation complète (non pas à pas).
    pub fn evaluate(&self, liaisons: &Liaisons) -> Resultat<Nombre> {
        evaluer(Tache::Visiter(self), liaisons)
    }
}

/// Reconstruction jointe par des espaces.
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tokens(&reconstruct(self)))
    }
}
