// src/noyau/pas_a_pas.rs
//
// Évaluation pas à pas : un groupe le plus interne (le plus à gauche) par appel.
//
// next_step() :
// 1) racine littérale => point fixe, on rend sa reconstruction
// 2) reconstruction ; le groupe réduit est celui fermé par la PREMIÈRE “)”
//    (sa “(” est la dernière ouverte avant elle : aucun groupe à l’intérieur)
// 3) substitution dans ce groupe : constantes (e, pi) puis liaisons ;
//    un identifiant inconnu reste tel quel (et l’évaluation échoue)
// 4) construction + évaluation du groupe, le résultat remplace le groupe (un jeton)
// 5) reconstruction complète => nouvelle racine ; on rend le flux de jetons
//
// Échec = erreur propagée, l’état n’est pas modifié.

use tracing::debug;

use super::construction::build_recursively;
use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{est_identifiant, format_tokens};
use super::noeud::{resoudre, Liaisons, Noeud};
use super::reconstruction::reconstruct;

#[derive(Clone, Debug)]
pub struct EvaluateurPas {
    racine: Noeud,
    liaisons: Liaisons,
}

impl EvaluateurPas {
    /// La racine est copiée : l’arbre de l’appelant n’est jamais touché.
    pub fn new(racine: &Noeud, liaisons: Liaisons) -> Self {
        EvaluateurPas {
            racine: racine.clone(),
            liaisons,
        }
    }

    pub fn current_root(&self) -> &Noeud {
        &self.racine
    }

    pub fn liaisons(&self) -> &Liaisons {
        &self.liaisons
    }

    pub fn est_termine(&self) -> bool {
        self.racine.est_litteral()
    }

    pub fn next_step(&mut self) -> Resultat<Vec<String>> {
        if self.est_termine() {
            return Ok(reconstruct(&self.racine));
        }

        let mut jetons = reconstruct(&self.racine);

        // [debut, fin) = groupe à réduire ; sans “)” la racine est un identifiant seul
        let (debut, fin) = match jetons.iter().position(|j| j == ")") {
            Some(ferme) => {
                let ouvre = jetons[..ferme]
                    .iter()
                    .rposition(|j| j == "(")
                    .ok_or(ErreurNoyau::ParenthesesDesequilibrees)?;
                (ouvre, ferme + 1)
            }
            None => (0, jetons.len()),
        };

        let groupe = self.substituer(&jetons[debut..fin]);
        let valeur = build_recursively(&groupe)?.evaluate(&self.liaisons)?;

        debug!(
            groupe = %format_tokens(&groupe),
            valeur = %valeur,
            "réduction"
        );

        jetons.splice(debut..fin, [valeur.to_string()]);
        self.racine = build_recursively(&jetons)?;
        Ok(jetons)
    }

    /// Identifiants résolus remplacés par leur texte canonique.
    /// Le symbole qui suit “(” n’est jamais substitué (“-” est aussi un identifiant).
    fn substituer(&self, groupe: &[String]) -> Vec<String> {
        groupe
            .iter()
            .enumerate()
            .map(|(i, j)| {
                let position_operateur = i > 0 && groupe[i - 1] == "(";
                if position_operateur || !est_identifiant(j) {
                    return j.clone();
                }
                match resoudre(j, &self.liaisons) {
                    Ok(v) => v.to_string(),
                    Err(_) => j.clone(),
                }
            })
            .collect()
    }
}
