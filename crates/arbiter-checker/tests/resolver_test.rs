//! Integration tests for signature resolution

use arbiter_checker::{
    CallDescriptor, Candidate, ParameterList, Phase, ResolveError, SignatureResolver,
    VarargsBinding,
};
use arbiter_types::{
    ConversionContext, ConversionCosts, ConversionKind, DeclaredHierarchy, PrimitiveKind, Type,
};
use pretty_assertions::assert_eq;
use PrimitiveKind::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn prim(kind: PrimitiveKind) -> Type {
    Type::Primitive(kind)
}

/// The `Falcon` overloads: `fly(int)`, `fly(short)`, `fly()`, `fly(int, short)`
/// and the throwing `fly(short, int)`
fn falcon() -> Vec<Candidate<&'static str>> {
    vec![
        Candidate::new("fly", ParameterList::fixed(vec![prim(Int)]), "miles"),
        Candidate::new("fly", ParameterList::fixed(vec![prim(Short)]), "feet"),
        Candidate::new("fly", ParameterList::fixed(vec![]), "plain"),
        Candidate::new(
            "fly",
            ParameterList::fixed(vec![prim(Int), prim(Short)]),
            "miles and feet",
        ),
        Candidate::new(
            "fly",
            ParameterList::fixed(vec![prim(Short), prim(Int)]),
            "feet and miles",
        )
        .throwing(),
    ]
}

#[test]
fn test_fly_int_selects_int() {
    init_tracing();
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(&CallDescriptor::new("fly", vec![prim(Int)]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "miles");
    assert_eq!(resolution.phase, Phase::Strict);
}

#[test]
fn test_fly_short_selects_short_over_widening() {
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(&CallDescriptor::new("fly", vec![prim(Short)]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "feet");
    assert_eq!(resolution.cost, 0);
}

#[test]
fn test_fly_no_arguments() {
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(&CallDescriptor::new("fly", vec![]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "plain");
}

#[test]
fn test_fly_two_arguments() {
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("fly", vec![prim(Int), prim(Short)]),
            &candidates,
        )
        .unwrap();
    assert_eq!(*resolution.payload(), "miles and feet");
}

#[test]
fn test_throwing_candidate_still_resolves() {
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("fly", vec![prim(Short), prim(Int)]),
            &candidates,
        )
        .unwrap();

    assert_eq!(*resolution.payload(), "feet and miles");
    assert!(resolution.candidate.throws);
    assert_eq!(resolution.index, 4);
}

#[test]
fn test_two_shorts_are_ambiguous() {
    // Both `fly(int, short)` and `fly(short, int)` need one short -> int widening
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let err = resolver
        .resolve(
            &CallDescriptor::new("fly", vec![prim(Short), prim(Short)]),
            &candidates,
        )
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::Ambiguous {
            call: "fly(short, short)".to_string(),
            candidates: vec![3, 4],
            signatures: vec![
                "fly(int, short)".to_string(),
                "fly(short, int)".to_string()
            ],
        }
    );
}

#[test]
fn test_exact_match_beats_boxing_and_varargs() {
    let resolver = SignatureResolver::default();
    let candidates = vec![
        Candidate::new("m", ParameterList::variadic(vec![], prim(Int)), "varargs"),
        Candidate::new("m", ParameterList::fixed(vec![Type::Boxed(Int)]), "boxed"),
        Candidate::new("m", ParameterList::fixed(vec![prim(Long)]), "widened"),
    ];

    let resolution = resolver
        .resolve(&CallDescriptor::new("m", vec![prim(Int)]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "widened");
    assert_eq!(resolution.phase, Phase::Strict);
    assert_eq!(resolution.conversions[0].kind, ConversionKind::Widening);
}

#[test]
fn test_boxing_beats_varargs() {
    let resolver = SignatureResolver::default();
    let candidates = vec![
        Candidate::new("m", ParameterList::variadic(vec![], prim(Int)), "varargs"),
        Candidate::new("m", ParameterList::fixed(vec![Type::Boxed(Int)]), "boxed"),
    ];

    let resolution = resolver
        .resolve(&CallDescriptor::new("m", vec![prim(Int)]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "boxed");
    assert_eq!(resolution.phase, Phase::Loose);
    assert_eq!(resolution.conversions[0].kind, ConversionKind::Boxing);
}

#[test]
fn test_unboxing_argument() {
    let resolver = SignatureResolver::default();
    let candidates = falcon();

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("fly", vec![Type::Boxed(Int)]),
            &candidates,
        )
        .unwrap();

    assert_eq!(*resolution.payload(), "miles");
    assert_eq!(resolution.phase, Phase::Loose);
}

#[test]
fn test_cheaper_boxing_wins_within_loose_pass() {
    let resolver = SignatureResolver::default();
    let candidates = vec![
        Candidate::new("m", ParameterList::fixed(vec![Type::Boxed(Long)]), "long"),
        Candidate::new("m", ParameterList::fixed(vec![Type::Boxed(Int)]), "int"),
    ];

    let resolution = resolver
        .resolve(&CallDescriptor::new("m", vec![prim(Int)]), &candidates)
        .unwrap();

    assert_eq!(*resolution.payload(), "int");
}

#[test]
fn test_walk_with_no_arguments() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walk",
        ParameterList::variadic(vec![], prim(Int)),
        (),
    )];

    let resolution = resolver
        .resolve(&CallDescriptor::new("walk", vec![]), &candidates)
        .unwrap();

    assert_eq!(resolution.phase, Phase::VariableArity);
    assert_eq!(resolution.varargs, Some(VarargsBinding::Spread { count: 0 }));
    assert!(resolution.conversions.is_empty());
}

#[test]
fn test_walk_with_spread_arguments() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walk",
        ParameterList::variadic(vec![], prim(Int)),
        (),
    )];

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("walk", vec![prim(Int), prim(Short), prim(Int)]),
            &candidates,
        )
        .unwrap();

    assert_eq!(resolution.varargs, Some(VarargsBinding::Spread { count: 3 }));
    assert_eq!(resolution.conversions.len(), 3);
}

#[test]
fn test_walk_with_array() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walk",
        ParameterList::variadic(vec![], prim(Int)),
        (),
    )];

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("walk", vec![Type::array(prim(Int))]),
            &candidates,
        )
        .unwrap();

    assert_eq!(resolution.varargs, Some(VarargsBinding::Array));
}

#[test]
fn test_walk_dog_binds_trailing_arguments() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walkDog",
        ParameterList::variadic(vec![prim(Int)], prim(Int)),
        (),
    )];

    let cases = [
        (vec![prim(Int)], VarargsBinding::Spread { count: 0 }),
        (vec![prim(Int), prim(Int)], VarargsBinding::Spread { count: 1 }),
        (
            vec![prim(Int), prim(Int), prim(Int)],
            VarargsBinding::Spread { count: 2 },
        ),
        (
            vec![prim(Int), Type::array(prim(Int))],
            VarargsBinding::Array,
        ),
    ];

    for (args, expected) in cases {
        let call = CallDescriptor::new("walkDog", args);
        let resolution = resolver.resolve(&call, &candidates).unwrap();
        assert_eq!(resolution.varargs, Some(expected), "{}", call);
    }
}

#[test]
fn test_walk_dog_needs_leading_argument() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walkDog",
        ParameterList::variadic(vec![prim(Int)], prim(Int)),
        (),
    )];

    assert!(matches!(
        resolver.resolve(&CallDescriptor::new("walkDog", vec![]), &candidates),
        Err(ResolveError::NoMatch { .. })
    ));
}

#[test]
fn test_varargs_rejects_mismatched_array() {
    let resolver = SignatureResolver::default();
    let candidates = vec![Candidate::new(
        "walk",
        ParameterList::variadic(vec![], prim(Int)),
        (),
    )];

    assert!(matches!(
        resolver.resolve(
            &CallDescriptor::new("walk", vec![Type::array(prim(Long))]),
            &candidates
        ),
        Err(ResolveError::NoMatch { .. })
    ));
}

#[test]
fn test_varargs_tie_is_ambiguous() {
    let resolver = SignatureResolver::default();
    let candidates = vec![
        Candidate::new("walk", ParameterList::variadic(vec![], prim(Int)), ()),
        Candidate::new("walk", ParameterList::variadic(vec![], prim(Long)), ()),
    ];

    assert!(matches!(
        resolver.resolve(&CallDescriptor::new("walk", vec![]), &candidates),
        Err(ResolveError::Ambiguous { .. })
    ));
}

#[test]
fn test_null_argument_with_hierarchy() {
    let hierarchy = DeclaredHierarchy::new().with("String", "Object");
    let ctx = ConversionContext::with_hierarchy(ConversionCosts::default(), &hierarchy);
    let resolver = SignatureResolver::new(ctx);
    let candidates = vec![
        Candidate::new("print", ParameterList::fixed(vec![prim(Int)]), "int"),
        Candidate::new(
            "print",
            ParameterList::fixed(vec![Type::reference("Object")]),
            "object",
        ),
        Candidate::new(
            "print",
            ParameterList::fixed(vec![Type::reference("String")]),
            "string",
        ),
    ];

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("print", vec![Type::reference("String")]),
            &candidates,
        )
        .unwrap();
    assert_eq!(*resolution.payload(), "string");

    // null reaches both reference overloads at the same cost
    let err = resolver
        .resolve(&CallDescriptor::new("print", vec![Type::Null]), &candidates)
        .unwrap_err();
    assert!(matches!(err, ResolveError::Ambiguous { candidates, .. } if candidates == vec![1, 2]));
}

#[test]
fn test_resolution_is_independent_of_candidate_order() {
    let resolver = SignatureResolver::default();
    let mut candidates = falcon();
    let call = CallDescriptor::new("fly", vec![prim(Byte)]);

    let forward = *resolver.resolve(&call, &candidates).unwrap().payload();
    candidates.reverse();
    let backward = *resolver.resolve(&call, &candidates).unwrap().payload();

    assert_eq!(forward, "feet");
    assert_eq!(forward, backward);
}

#[test]
fn test_maximal_boxing_cost_saturates() {
    let costs = ConversionCosts::from_toml_str("boxing = 4294967295").unwrap();
    let resolver = SignatureResolver::new(ConversionContext::new(costs));
    let candidates = vec![
        Candidate::new("f", ParameterList::fixed(vec![Type::Boxed(Long)]), "long"),
        Candidate::new(
            "f",
            ParameterList::fixed(vec![Type::Boxed(Int), Type::Boxed(Int)]),
            "pair",
        ),
    ];

    let resolution = resolver
        .resolve(&CallDescriptor::new("f", vec![prim(Int)]), &candidates)
        .unwrap();
    assert_eq!(*resolution.payload(), "long");
    assert_eq!(resolution.cost, u32::MAX);

    let resolution = resolver
        .resolve(
            &CallDescriptor::new("f", vec![prim(Int), prim(Int)]),
            &candidates,
        )
        .unwrap();
    assert_eq!(*resolution.payload(), "pair");
    assert_eq!(resolution.cost, u32::MAX);
}

#[test]
fn test_maximal_varargs_penalty_saturates() {
    let costs = ConversionCosts::from_toml_str("varargs_penalty = 4294967295").unwrap();
    let resolver = SignatureResolver::new(ConversionContext::new(costs));
    let candidates = vec![Candidate::new(
        "w",
        ParameterList::variadic(vec![prim(Int)], prim(Int)),
        (),
    )];

    let resolution = resolver
        .resolve(&CallDescriptor::new("w", vec![prim(Byte)]), &candidates)
        .unwrap();
    assert_eq!(resolution.phase, Phase::VariableArity);
    assert_eq!(resolution.cost, u32::MAX);
}
