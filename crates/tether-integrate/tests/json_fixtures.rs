//! Requests loaded from `tests/fixtures/` through the JSON surface.

use tether_integrate::{AssociationError, Error, IntegrateConfig, Integrator, InvalidInputError};
use tether_test_utils::load_fixture;

#[test]
fn test_one_to_many_fixture() -> Result<(), Error> {
    let out = Integrator::default().integrate_json(&load_fixture("one_to_many.json")?)?;
    assert_eq!(
        out,
        serde_json::json!([{
            "id": 1,
            "name": "A",
            "posts": [{ "id": 10, "title": "X" }, { "id": 11, "title": "Y" }]
        }])
    );
    Ok(())
}

#[test]
fn test_many_to_many_fixture_matches_expected() -> Result<(), Error> {
    let out = Integrator::default().integrate_json(&load_fixture("many_to_many.json")?)?;
    assert_eq!(out, load_fixture("expected_many_to_many.json")?);
    Ok(())
}

#[test]
fn test_null_cache_fixture_is_rejected() -> Result<(), Error> {
    let err = Integrator::default()
        .integrate_json(&load_fixture("null_cache.json")?)
        .expect_err("null cache");
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::NotAnObject { .. })
    ));
    Ok(())
}

#[test]
fn test_three_hop_fixture_depends_on_strictness() -> Result<(), Error> {
    let request = load_fixture("three_hop.json")?;

    let err = Integrator::default()
        .integrate_json(&request)
        .expect_err("three hops");
    assert!(matches!(
        err,
        Error::Association(AssociationError::UnsupportedCardinality { count: 3, .. })
    ));

    let out = Integrator::new(IntegrateConfig::lenient())
        .with_policy(tether_error::NoopPolicy)
        .integrate_json(&request)?;
    assert_eq!(out, serde_json::json!([{ "id": 1, "deep": [] }]));
    Ok(())
}

#[test]
fn test_integer_keys_beyond_i64_stay_exact() -> Result<(), Error> {
    let out = Integrator::default().integrate_json(&load_fixture("wide_integer_keys.json")?)?;
    assert_eq!(
        out,
        serde_json::json!([{
            "id": 9_223_372_036_854_775_808u64,
            "posts": [{ "id": 2 }]
        }])
    );
    Ok(())
}

#[test]
fn test_integral_float_keys_join_integer_keys() -> Result<(), Error> {
    let out = Integrator::default().integrate_json(&load_fixture("float_keys.json")?)?;
    assert_eq!(
        out,
        serde_json::json!([
            { "id": 1, "posts": [{ "id": 10 }] },
            { "id": 2, "posts": [] }
        ])
    );
    Ok(())
}
