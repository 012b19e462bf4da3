//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés de la tour et des constructions, pas des cas isolés.
//! - fermeture de la contagion (grilles bornées)
//! - égalité stricte par variante
//! - taxonomie des erreurs, identique pour les deux constructions
//! - point fixe de l’évaluation pas à pas
//! - stress borné (profondeur, largeur, grands entiers) + budget temps global

use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::construction::{build_iteratively, build_recursively};
use super::erreur::ErreurNoyau;
use super::eval_expression;
use super::fraction::Fraction;
use super::jetons::{format_tokens, tokenize};
use super::noeud::{Liaisons, Noeud, MAX_PROFONDEUR};
use super::nombre::Nombre;
use super::operateur::Operateur;
use super::pas_a_pas::EvaluateurPas;

fn n(s: &str) -> Nombre {
    s.parse().unwrap_or_else(|e| panic!("nombre {s:?}: {e}"))
}

fn eval_ok(expr: &str, liaisons: &Liaisons) -> Nombre {
    eval_expression(expr, liaisons)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .0
}

/// Même erreur exigée des deux constructions.
fn assert_erreur(expr: &str, attendue: ErreurNoyau) {
    let t = tokenize(expr);
    assert_eq!(build_recursively(&t), Err(attendue.clone()), "récursif: {expr:?}");
    assert_eq!(build_iteratively(&t), Err(attendue), "itératif: {expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Contagion : fermeture ------------------------ */

#[test]
fn sci_entiers_fermes_pour_plus_moins_fois() {
    for a in -6..=6 {
        for b in -6..=6 {
            let (x, y) = (Nombre::from(a), Nombre::from(b));
            assert_eq!(x.plus(&y), Nombre::from(a + b));
            assert_eq!(x.minus(&y), Nombre::from(a - b));
            assert_eq!(x.times(&y), Nombre::from(a * b));
        }
    }
}

#[test]
fn sci_division_exacte_entier_ssi_divisible() {
    for a in -12..=12 {
        for b in (-6..=6).filter(|b| *b != 0) {
            let q = Nombre::from(a).divide(&Nombre::from(b)).unwrap();
            if a % b == 0 {
                assert_eq!(q, Nombre::from(a / b), "{a}/{b}");
            } else {
                match q {
                    Nombre::Rationnel(r) => {
                        assert_ne!(r.fraction().denominator(), &BigInt::from(1), "{a}/{b}")
                    }
                    autre => panic!("{a}/{b} devrait être rationnel, pas {autre:?}"),
                }
            }
        }
    }
}

#[test]
fn sci_rationnels_jamais_de_denominateur_un() {
    let valeurs = ["1/2", "-1/3", "2/3", "5/4", "3", "-7/6"];
    for a in valeurs {
        for b in valeurs {
            let (x, y) = (n(a), n(b));
            for r in [x.plus(&y), x.minus(&y), x.times(&y), x.divide(&y).unwrap()] {
                if let Nombre::Rationnel(q) = &r {
                    assert!(!q.fraction().is_integer(), "{a} ∘ {b} = {r} non effondré");
                }
            }
        }
    }
}

#[test]
fn sci_reel_contamine_ou_s_effondre() {
    let exacts = ["3", "-1/3", "2/5"];
    let reels = ["0.5", "-1.25", "2.2"];
    for a in exacts {
        for b in reels {
            for r in [n(a).plus(&n(b)), n(b).minus(&n(a)), n(a).times(&n(b))] {
                match r {
                    Nombre::Reel(d) => assert!(!d.is_integral(), "{a}, {b} : {d}"),
                    Nombre::Entier(_) => {}
                    Nombre::Rationnel(_) => panic!("{a}, {b} : rationnel après contagion"),
                }
            }
        }
    }
    // 2/5 * 2.5 = 1 exactement => Entier
    assert_eq!(n("2/5").times(&n("2.5")), n("1"));
}

#[test]
fn sci_egalite_stricte_par_variante() {
    assert_ne!(n("0.5"), n("1/2"));
    assert_ne!(n("2.0"), n("2"));
    assert_eq!(n("1/2").to_real(), n("0.5").to_real());
    assert_eq!(n("0.5").to_rational(), n("1/2").to_rational());
}

#[test]
fn sci_normalisation_fraction() {
    let f = Fraction::new(10, -15).unwrap();
    assert_eq!(f.numerator(), &BigInt::from(-2));
    assert_eq!(f.denominator(), &BigInt::from(3));
    assert_eq!(Nombre::fraction(6, 3).unwrap(), Nombre::from(2));
}

/* ------------------------ Bout en bout ------------------------ */

#[test]
fn sci_exemples_bout_en_bout() {
    let mut l = Liaisons::new();
    l.insert("a".into(), n("2/3"));
    l.insert("b".into(), n("3"));
    l.insert("c".into(), n("2.5"));

    let v = eval_ok("( + a ( / 8 ( * 1 2.5 ) ) )", &l);
    assert_eq!(v, n("3.866666666666667"));

    assert_eq!(eval_ok("( expt 4 ( / 1 2 ) )", &l), Nombre::from(2));
    // c réel : la contagion l’emporte, 7.5 et non 15/2
    assert_eq!(eval_ok("( * b c )", &l), n("7.5"));
    assert_ne!(eval_ok("( * b c )", &l), n("15/2"));
}

#[test]
fn sci_transcendantes_de_reference() {
    let l = Liaisons::new();
    let proche = |expr: &str, attendu: f64| {
        let v = eval_ok(expr, &l).to_real().to_f64();
        assert!((v - attendu).abs() < 1e-12, "{expr} = {v}, attendu {attendu}");
    };
    proche("( exp 4 )", 54.59815003314423);
    proche("( ln 69 )", 4.23410650459726);
    proche("( sqrt 2 )", std::f64::consts::SQRT_2);
    proche("( exp 1 )", std::f64::consts::E);
    assert_eq!(eval_ok("( expt 2 10 )", &l), Nombre::from(1024));
    // 1/3 arrondi à 15 décimales : proche de 2, pas exactement 2
    proche("( expt 8 ( / 1 3 ) )", 2.0);
    assert!(matches!(eval_ok("( expt 8 ( / 1 3 ) )", &l), Nombre::Reel(_)));
    assert_eq!(eval_ok("( log 1000 10 )", &l), Nombre::from(3));
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_taxonomie_erreurs_deux_constructions() {
    assert_erreur("", ErreurNoyau::PasDExpression);
    assert_erreur("(", ErreurNoyau::ParenthesesDesequilibrees);
    assert_erreur("+ 1 2 )", ErreurNoyau::ParenthesesDesequilibrees);
    assert_erreur("( + 1 2 ) 3", ErreurNoyau::ParenthesesDesequilibrees);
    assert_erreur("( foo 1 )", ErreurNoyau::OperateurInconnu("foo".into()));
    assert_erreur(
        "( ln 1 2 )",
        ErreurNoyau::NombreOperandes {
            actuel: 2,
            min: 1,
            max: Some(1),
        },
    );
    assert_erreur("( + 1 @ )", ErreurNoyau::JetonInvalide("@".into()));
}

#[test]
fn sci_arite_sqrt_et_add() {
    for k in [0usize, 2] {
        let ops = vec![Noeud::litteral(1); k];
        assert_eq!(
            Noeud::operation(Operateur::Sqrt, ops),
            Err(ErreurNoyau::NombreOperandes {
                actuel: k,
                min: 1,
                max: Some(1)
            })
        );
    }
    for k in 0..6 {
        assert!(Noeud::operation(Operateur::Add, vec![Noeud::litteral(1); k]).is_ok());
    }
}

#[test]
fn sci_erreurs_numeriques() {
    let l = Liaisons::new();
    assert_eq!(
        eval_expression("( / 3 0 )", &l),
        Err(ErreurNoyau::DivisionParZero)
    );
    assert_eq!(
        eval_expression("( / 3 0.0 )", &l),
        Err(ErreurNoyau::OperandeNonPositif("0.0".into()))
    );
    assert_eq!(
        eval_expression("( / 0.0 )", &l),
        Err(ErreurNoyau::OperandeNonPositif("0.0".into()))
    );
    assert_eq!(eval_expression("( / 0 )", &l), Err(ErreurNoyau::DivisionParZero));
    assert!(matches!(
        eval_expression("( log 8 -2 )", &l),
        Err(ErreurNoyau::OperandeNonPositif(_))
    ));
    assert!(matches!(
        eval_expression("( sqrt -1/4 )", &l),
        Err(ErreurNoyau::OperandeNonPositif(_))
    ));
    assert_eq!(
        eval_expression("( exp 1000000 )", &l),
        Err(ErreurNoyau::ExposantHorsBornes)
    );
}

/* ------------------------ Point fixe ------------------------ */

#[test]
fn sci_point_fixe_idempotent() {
    let t = build_recursively(tokenize("( - ( sqrt 16 ) ( / 1 3 ) )")).unwrap();
    let mut ev = EvaluateurPas::new(&t, Liaisons::new());

    let mut dernier = ev.next_step().unwrap();
    for _ in 0..2 {
        dernier = ev.next_step().unwrap();
    }
    assert_eq!(format_tokens(&dernier), "11/3");
    for _ in 0..5 {
        assert_eq!(ev.next_step().unwrap(), dernier);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // (- (- (- ... 1))) : 300 négations => 1
    let profondeur = 300;
    let expr = format!("{}1{}", "( - ".repeat(profondeur), " )".repeat(profondeur));
    let t = tokenize(&expr);
    assert_eq!(build_recursively(&t), build_iteratively(&t));
    budget(t0, max);

    let (v, d) = eval_expression(&expr, &Liaisons::new()).unwrap();
    assert_eq!(v, Nombre::from(1));
    assert_eq!(d.etapes.len(), profondeur);
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_limite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(4000);

    let negations = |k: usize| format!("{}1{}", "( - ".repeat(k), " )".repeat(k));

    // pile au maximum : construction, évaluation et démarche complètes
    let (v, d) = eval_expression(&negations(MAX_PROFONDEUR), &Liaisons::new()).unwrap();
    assert_eq!(v, Nombre::from(1));
    assert_eq!(d.etapes.len(), MAX_PROFONDEUR);
    budget(t0, max);

    // un groupe de plus : erreur typée, aucun débordement de pile
    for k in [MAX_PROFONDEUR + 1, 20_000] {
        assert_eq!(
            eval_expression(&negations(k), &Liaisons::new()),
            Err(ErreurNoyau::ProfondeurExcessive)
        );
        assert_erreur(&negations(k), ErreurNoyau::ProfondeurExcessive);
    }
    budget(t0, max);
}

#[test]
fn sci_stress_largeur_variadique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let expr = format!("( + {})", "1/2 ".repeat(800));
    let (v, d) = eval_expression(&expr, &Liaisons::new()).unwrap();
    assert_eq!(v, Nombre::from(400));
    assert_eq!(d.etapes, vec!["400"]);
    budget(t0, max);
}

#[test]
fn sci_stress_grands_entiers() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let big = "9".repeat(100);
    let v = eval_ok(&format!("( + ( / {big} 7 ) 1/7 )"), &Liaisons::new());
    assert!(matches!(v, Nombre::Rationnel(_)));

    // 2^1000 exact, puis divisé par 2^999
    let v = eval_ok("( / ( expt 2 1000 ) ( expt 2 999 ) )", &Liaisons::new());
    assert_eq!(v, Nombre::from(2));
    budget(t0, max);
}
