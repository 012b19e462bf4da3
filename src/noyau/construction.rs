// src/noyau/construction.rs
//
// Jetons -> arbre, deux algorithmes, un seul contrat :
// - build_recursively : descente récursive (une fonction lit UNE sous-expression,
//   l’autre lit la liste d’opérandes jusqu’à “)”)
// - build_iteratively : pile explicite de cadres “opérateur ouvert”
//
// Même arbre, mêmes erreurs, au même jeton. Pour ça, tout ce qui décide d’une erreur
// est partagé : lecture du symbole après “(”, classement d’une feuille, arité
// (Operation::new).
//
// Erreurs :
// - flux vide                                   -> PasDExpression
// - “(” en fin de flux, flux épuisé dans un groupe -> ParenthesesDesequilibrees
// - “(” ouvrant un groupe au-delà de MAX_PROFONDEUR -> ProfondeurExcessive
// - symbole inconnu après “(”                   -> OperateurInconnu
// - arité hors plage (à la fermeture)           -> NombreOperandes
// - jeton ni nombre, ni identifiant, ni ( )     -> JetonInvalide
//   (sauf + * / : opérateur sans sa “(”         -> ParenthesesDesequilibrees)
// - jetons après l’expression, “)” orpheline    -> ParenthesesDesequilibrees

use tracing::trace;

use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{classer, Jeton};
use super::noeud::{Noeud, MAX_PROFONDEUR};
use super::operateur::Operateur;

/* ------------------------ Briques partagées ------------------------ */

/// Symbole qui suit une “(” ; `profondeur` = rang du groupe ainsi ouvert.
/// La profondeur est contrôlée avant tout autre jeton.
fn lire_operateur<I>(it: &mut I, profondeur: usize) -> Resultat<Operateur>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    if profondeur > MAX_PROFONDEUR {
        return Err(ErreurNoyau::ProfondeurExcessive);
    }
    let jeton = it.next().ok_or(ErreurNoyau::ParenthesesDesequilibrees)?;
    let s = jeton.as_ref();
    Operateur::depuis_symbole(s).ok_or_else(|| ErreurNoyau::OperateurInconnu(s.to_string()))
}

/// Opérande simple : nombre ou identifiant.
fn feuille(jeton: &str) -> Resultat<Noeud> {
    match classer(jeton) {
        Jeton::Nombre(s) => Ok(Noeud::Litteral(s.parse()?)),
        Jeton::Ident(s) => Noeud::identifiant(s),
        Jeton::Autre(s) if Operateur::depuis_symbole(s).is_some() => {
            Err(ErreurNoyau::ParenthesesDesequilibrees)
        }
        Jeton::Autre(s) => Err(ErreurNoyau::JetonInvalide(s.to_string())),
        Jeton::Ouvrante | Jeton::Fermante => Err(ErreurNoyau::ParenthesesDesequilibrees),
    }
}

/* ------------------------ Descente récursive ------------------------ */

pub fn build_recursively<I>(jetons: I) -> Resultat<Noeud>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    trace!("construction récursive");
    let mut it = jetons.into_iter();

    let premier = it.next().ok_or(ErreurNoyau::PasDExpression)?;
    let racine = lire_expression(premier.as_ref(), &mut it, 0)?
        .ok_or(ErreurNoyau::ParenthesesDesequilibrees)?;

    if it.next().is_some() {
        return Err(ErreurNoyau::ParenthesesDesequilibrees);
    }
    Ok(racine)
}

/// Une sous-expression commençant par `jeton`, sous `englobants` groupes ouverts.
/// None = “)” (fin de liste).
fn lire_expression<I>(jeton: &str, it: &mut I, englobants: usize) -> Resultat<Option<Noeud>>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    match jeton {
        ")" => Ok(None),
        "(" => {
            let profondeur = englobants + 1;
            let operateur = lire_operateur(it, profondeur)?;
            let operandes = lire_operandes(it, profondeur)?;
            Noeud::operation(operateur, operandes).map(Some)
        }
        _ => feuille(jeton).map(Some),
    }
}

/// Opérandes jusqu’à la “)” du groupe ; flux épuisé avant => déséquilibre.
fn lire_operandes<I>(it: &mut I, profondeur: usize) -> Resultat<Vec<Noeud>>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    let mut operandes = Vec::new();
    loop {
        let jeton = it.next().ok_or(ErreurNoyau::ParenthesesDesequilibrees)?;
        match lire_expression(jeton.as_ref(), it, profondeur)? {
            Some(n) => operandes.push(n),
            None => return Ok(operandes),
        }
    }
}

/* ------------------------ Pile explicite ------------------------ */

struct Cadre {
    operateur: Operateur,
    operandes: Vec<Noeud>,
}

pub fn build_iteratively<I>(jetons: I) -> Resultat<Noeud>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    trace!("construction itérative");
    let mut it = jetons.into_iter();

    let mut pile: Vec<Cadre> = Vec::new();
    let mut racine: Option<Noeud> = None;

    while let Some(jeton) = it.next() {
        // expression complète : tout jeton de plus est en trop
        if racine.is_some() {
            return Err(ErreurNoyau::ParenthesesDesequilibrees);
        }

        let noeud = match jeton.as_ref() {
            "(" => {
                let operateur = lire_operateur(&mut it, pile.len() + 1)?;
                pile.push(Cadre {
                    operateur,
                    operandes: Vec::new(),
                });
                continue;
            }
            ")" => {
                let cadre = pile.pop().ok_or(ErreurNoyau::ParenthesesDesequilibrees)?;
                Noeud::operation(cadre.operateur, cadre.operandes)?
            }
            s => feuille(s)?,
        };

        match pile.last_mut() {
            Some(haut) => haut.operandes.push(noeud),
            None => racine = Some(noeud),
        }
    }

    if !pile.is_empty() {
        return Err(ErreurNoyau::ParenthesesDesequilibrees);
    }
    racine.ok_or(ErreurNoyau::PasDExpression)
}
