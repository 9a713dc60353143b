use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FcpxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FcpxError::probe("x").to_string().contains("probe error:"));
    assert!(
        FcpxError::MalformedDuration("12".to_owned())
            .to_string()
            .contains("'12'")
    );
}

#[test]
fn codes_are_distinct_per_variant() {
    assert_eq!(
        FcpxError::TransactionClosed {
            state: "rolled back"
        }
        .code(),
        "TRANSACTION_CLOSED"
    );
    assert_eq!(
        FcpxError::SourceNotFound("/x".to_owned()).code(),
        "SOURCE_NOT_FOUND"
    );
    assert_eq!(
        FcpxError::UnreservedId(ResourceId(3)).to_string(),
        "resource id r3 was not reserved by this transaction"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FcpxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
