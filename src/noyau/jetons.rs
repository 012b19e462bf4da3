// src/noyau/jetons.rs
//
// Jetons = chaînes ASCII séparées par des blancs.
// Formes reconnues (sans regex, balayage d’octets) :
// - nombres : -?\d+   -?\d+/\d+   -?\d+\.\d+
// - identifiants : [A-Za-z-]+   (donc "-", "sqrt", "exp" sont aussi des identifiants)
// - ponctuation : ( )
//
// La classification ne décide pas du rôle : après “(” le jeton est lu comme symbole
// d’opérateur, ailleurs comme opérande (voir construction.rs).

/// Variante numérique annoncée par la forme du jeton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormeNombre {
    Entier,
    Fraction,
    Decimal,
}

/// Catégorie d’un jeton brut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jeton<'a> {
    Ouvrante,
    Fermante,
    Nombre(&'a str),
    Ident(&'a str),
    Autre(&'a str),
}

fn chiffres(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Forme numérique de `s`, ou None si ce n’est pas un nombre.
pub fn forme_nombre(s: &str) -> Option<FormeNombre> {
    let corps = s.strip_prefix('-').unwrap_or(s);

    if chiffres(corps) {
        return Some(FormeNombre::Entier);
    }
    if let Some((n, d)) = corps.split_once('/') {
        return (chiffres(n) && chiffres(d)).then_some(FormeNombre::Fraction);
    }
    if let Some((e, f)) = corps.split_once('.') {
        return (chiffres(e) && chiffres(f)).then_some(FormeNombre::Decimal);
    }
    None
}

/// [A-Za-z-]+
pub fn est_identifiant(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-')
}

pub fn classer(s: &str) -> Jeton<'_> {
    match s {
        "(" => Jeton::Ouvrante,
        ")" => Jeton::Fermante,
        _ if forme_nombre(s).is_some() => Jeton::Nombre(s),
        _ if est_identifiant(s) => Jeton::Ident(s),
        _ => Jeton::Autre(s),
    }
}

/// Découpe un texte en jetons.
/// - blancs = séparateurs
/// - ( et ) sont toujours des jetons à part, même collés : "(+ 1 2)" -> ["(", "+", "1", "2", ")"]
/// - tout le reste est gardé tel quel (la validation se fait à la construction)
pub fn tokenize(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut courant = String::new();

    for c in s.chars() {
        if c.is_whitespace() || c == '(' || c == ')' {
            if !courant.is_empty() {
                out.push(std::mem::take(&mut courant));
            }
            if c == '(' || c == ')' {
                out.push(c.to_string());
            }
            continue;
        }
        courant.push(c);
    }

    if !courant.is_empty() {
        out.push(courant);
    }
    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
