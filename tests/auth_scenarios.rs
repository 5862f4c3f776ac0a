//! Authentication scenarios against the wall clock.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use drive_image_finder::auth::{HeaderLookup, InboundRequest, Secret};
use drive_image_finder::{AuthReason, Authenticator};

const PATH: &str = "/integrations/drive/content/resources/find";

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn authenticator() -> Authenticator {
    // base64("secret")
    Authenticator::new(Secret::from_base64("c2VjcmV0").unwrap())
}

/// HMAC computed without going through the crate's signing code.
fn reference_signature(timestamp: &str, canonical: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
    mac.update(format!("v1:{timestamp}:{canonical}:{body}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn authenticate(auth: &Authenticator, timestamp: &str, signatures: &str, path: &str) -> AuthReason {
    let headers: HeaderLookup = [
        ("x-canva-timestamp", timestamp),
        ("x-canva-signatures", signatures),
    ]
    .into_iter()
    .collect();

    auth.authenticate(&InboundRequest {
        headers: &headers,
        raw_body: b"{}",
        path,
    })
    .reason
}

#[test]
fn test_signature_matches_reference() {
    let auth = authenticator();
    let ts = "1700000000";
    assert_eq!(
        auth.sign(ts, "/content/resources/find", b"{}"),
        reference_signature(ts, "/content/resources/find", "{}")
    );
}

#[test]
fn test_scenario_a_fresh_signed_request() {
    let auth = authenticator();
    let ts = now().to_string();
    let sig = reference_signature(&ts, "/content/resources/find", "{}");

    assert_eq!(authenticate(&auth, &ts, &sig, PATH), AuthReason::Ok);
}

#[test]
fn test_scenario_b_stale_timestamp() {
    let auth = authenticator();
    let ts = (now() - 301).to_string();
    let sig = reference_signature(&ts, "/content/resources/find", "{}");

    assert_eq!(authenticate(&auth, &ts, &sig, PATH), AuthReason::StaleTimestamp);
}

#[test]
fn test_scenario_c_unknown_path() {
    let auth = authenticator();
    let ts = now().to_string();
    let sig = reference_signature(&ts, "/content/resources/find", "{}");

    assert_eq!(
        authenticate(&auth, &ts, &sig, "/unknown/route"),
        AuthReason::UnknownPath
    );
}

#[test]
fn test_scenario_d_empty_signatures() {
    let auth = authenticator();
    let ts = now().to_string();

    assert_eq!(authenticate(&auth, &ts, "", PATH), AuthReason::BadSignature);
}

#[test]
fn test_rotation_with_one_valid_token() {
    let auth = authenticator();
    let ts = now().to_string();
    let good = reference_signature(&ts, "/content/resources/find", "{}");
    let retired = "f".repeat(64);

    assert_eq!(
        authenticate(&auth, &ts, &format!("{retired},{good}"), PATH),
        AuthReason::Ok
    );
    assert_eq!(
        authenticate(&auth, &ts, &format!("{good} {retired}"), PATH),
        AuthReason::Ok
    );
}

#[test]
fn test_concurrent_authentication() {
    let auth = std::sync::Arc::new(authenticator());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let auth = auth.clone();
            std::thread::spawn(move || {
                let ts = now().to_string();
                let sig = if i % 2 == 0 {
                    reference_signature(&ts, "/content/resources/find", "{}")
                } else {
                    "0".repeat(64)
                };
                (i, authenticate(&auth, &ts, &sig, PATH))
            })
        })
        .collect();

    for handle in handles {
        let (i, reason) = handle.join().unwrap();
        let expected = if i % 2 == 0 { AuthReason::Ok } else { AuthReason::BadSignature };
        assert_eq!(reason, expected);
    }
}
