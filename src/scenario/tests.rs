use super::registrar::{create_payload, did_name};

#[test]
fn did_names_are_unique_per_vu_and_iteration() {
    assert_eq!(did_name(1, 1), "did:acc:perf-test-1-1");
    assert_eq!(did_name(7, 3), "did:acc:perf-test-7-3");
    assert_ne!(did_name(2, 1), did_name(1, 2));
}

#[test]
fn create_payload_carries_document_and_key_material() -> Result<(), String> {
    let payload = create_payload("did:acc:perf-test-1-1");
    let document = payload
        .get("didDocument")
        .ok_or_else(|| "missing didDocument".to_owned())?;

    assert_eq!(
        document.get("id").and_then(|id| id.as_str()),
        Some("did:acc:perf-test-1-1")
    );
    assert_eq!(
        document.get("@context").and_then(|ctx| ctx.as_array()).map(Vec::len),
        Some(1)
    );

    let method = document
        .get("verificationMethod")
        .and_then(|methods| methods.get(0))
        .ok_or_else(|| "missing verification method".to_owned())?;
    assert_eq!(
        method.get("type").and_then(|value| value.as_str()),
        Some("Ed25519VerificationKey2020")
    );
    assert_eq!(
        method.get("controller").and_then(|value| value.as_str()),
        Some("did:acc:perf-test-1-1")
    );
    assert_eq!(
        document
            .get("authentication")
            .and_then(|auth| auth.get(0))
            .and_then(|value| value.as_str()),
        Some("did:acc:perf-test-1-1#key-1")
    );
    Ok(())
}
