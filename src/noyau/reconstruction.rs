// src/noyau/reconstruction.rs
//
// Arbre -> jetons (inverse de la construction) :
//   Litteral   -> texte canonique du nombre
//   Ident      -> le nom
//   Operation  -> "(" symbole enfants... ")"
//
// Itératif (pile explicite) : pas de récursion sur la profondeur de l’arbre.

use super::noeud::Noeud;

enum Tache<'a> {
    Noeud(&'a Noeud),
    Fermer,
}

pub fn reconstruct(racine: &Noeud) -> Vec<String> {
    let mut out = Vec::new();
    let mut pile = vec![Tache::Noeud(racine)];

    while let Some(t) = pile.pop() {
        match t {
            Tache::Fermer => out.push(")".to_string()),
            Tache::Noeud(Noeud::Litteral(n)) => out.push(n.to_string()),
            Tache::Noeud(Noeud::Ident(nom)) => out.push(nom.to_string()),
            Tache::Noeud(Noeud::Operation(op)) => {
                out.push("(".to_string());
                out.push(op.operateur().symbole().to_string());
                pile.push(Tache::Fermer);
                // ordre inverse : le premier opérande sort en premier
                pile.extend(op.operandes().iter().rev().map(Tache::Noeud));
            }
        }
    }

    out
}
