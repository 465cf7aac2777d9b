#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parses_attribute_syntax() {
    assert_eq!("1 2.5 -3".parse::<Vec3>(), Ok(Vec3::new(1.0, 2.5, -3.0)));
}

#[test]
fn tolerates_extra_whitespace() {
    assert_eq!("  0\t0   0 ".parse::<Vec3>(), Ok(Vec3::ZERO));
}

#[test]
fn rejects_wrong_arity() {
    assert_eq!("1 1".parse::<Vec3>(), Err(ParseVec3Error::Arity(2)));
    assert_eq!("".parse::<Vec3>(), Err(ParseVec3Error::Arity(0)));
    assert_eq!("1 1 1 1".parse::<Vec3>(), Err(ParseVec3Error::Arity(4)));
}

#[test]
fn rejects_bad_components() {
    assert_eq!("1 a 1".parse::<Vec3>(), Err(ParseVec3Error::Component("a".into())));
    assert!("1 NaN 1".parse::<Vec3>().is_err());
    assert!("inf 0 0".parse::<Vec3>().is_err());
}

#[test]
fn displays_attribute_syntax() {
    assert_eq!(Vec3::ONE.to_string(), "1 1 1");
    assert_eq!(Vec3::new(0.5, -2.0, 90.0).to_string(), "0.5 -2 90");
}

#[test]
fn serde_uses_string_form() {
    let v: Vec3 = serde_json::from_str(r#""0 90 0""#).unwrap();
    assert_eq!(v, Vec3::new(0.0, 90.0, 0.0));
    assert_eq!(serde_json::to_string(&v).unwrap(), r#""0 90 0""#);
    assert!(serde_json::from_str::<Vec3>(r#""0 90""#).is_err());
}
