use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(XenftError::decode("x").to_string().contains("decode error:"));
    assert!(
        XenftError::classification("x")
            .to_string()
            .contains("classification error:")
    );
    assert!(
        XenftError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        XenftError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(XenftError::session("x").to_string().contains("session error:"));
    assert!(
        XenftError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = XenftError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: XenftError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, XenftError::Serde(_)));
}
