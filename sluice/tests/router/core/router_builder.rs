use sluice::{PreprocessorRegistry, Sluice, SluiceError};

use crate::helpers::ab_provider;

#[test]
fn build_without_providers_is_invalid() {
    let err = Sluice::builder().build().err().unwrap();
    assert!(matches!(err, SluiceError::InvalidArg(_)));
}

#[test]
fn providers_keep_registration_order() {
    let sluice = Sluice::builder()
        .with_provider(ab_provider())
        .with_provider(crate::helpers::containing_b_provider())
        .build()
        .unwrap();
    let names: Vec<_> = sluice.providers().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["ab", "containing-b"]);
}

#[test]
fn default_registry_has_builtins_and_can_be_replaced() {
    let sluice = Sluice::builder().with_provider(ab_provider()).build().unwrap();
    assert!(sluice.registry().contains("fill_gaps"));

    let sluice = Sluice::builder()
        .with_provider(ab_provider())
        .registry(PreprocessorRegistry::new())
        .build()
        .unwrap();
    assert!(!sluice.registry().contains("fill_gaps"));
}
