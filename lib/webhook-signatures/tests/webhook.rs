use self::data::{FORM_ID, SUBMISSION_ID, URI};
use http::{HeaderMap, HeaderValue};
use std::time::Duration;
use webhook_signatures::{
    clock::{self, Clock},
    Configuration, Error, Mode, ReplayGuard, SignedHeader, Webhooks, SIGNATURE_HEADER,
};


fn flip_first_char(value: &str) -> String {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some('a') => 'b',
        _ => 'a',
    };

    std::iter::once(first).chain(chars).collect()
}

#[test]
fn sign_then_authenticate() {
    let (clock, mock) = Clock::mockable();
    let _guard = clock.enter();

    let webhooks = self::data::webhooks();
    let signer = webhooks.signer().unwrap();
    let header = signer
        .sign(URI, SUBMISSION_ID, FORM_ID, clock::now_millis())
        .unwrap();

    mock.advance(Duration::from_millis(1));
    webhooks.authenticate(&header.encode(), URI).unwrap();

    mock.advance(Duration::from_millis(301_000));
    assert!(matches!(
        webhooks.authenticate(&header.encode(), URI),
        Err(Error::StaleSignature(..))
    ));
}

#[test]
fn future_epoch_is_rejected() {
    let webhooks = self::data::webhooks();
    let epoch = clock::now_millis() + 60_000;
    let header = webhooks
        .signer()
        .unwrap()
        .sign(URI, SUBMISSION_ID, FORM_ID, epoch)
        .unwrap();

    assert!(matches!(
        webhooks.authenticate(&header.encode(), URI),
        Err(Error::StaleSignature(..))
    ));
}

#[test]
fn tampering_is_detected() {
    let webhooks = self::data::webhooks();
    let epoch = clock::now_millis() - 1000;
    let header = webhooks
        .signer()
        .unwrap()
        .sign(URI, SUBMISSION_ID, FORM_ID, epoch)
        .unwrap();

    let tampered = [
        SignedHeader {
            signature: flip_first_char(&header.signature),
            ..header.clone()
        },
        SignedHeader {
            submission_id: flip_first_char(&header.submission_id),
            ..header.clone()
        },
        SignedHeader {
            form_id: flip_first_char(&header.form_id),
            ..header.clone()
        },
    ];

    for header in tampered {
        assert!(matches!(
            webhooks.authenticate(&header.encode(), URI),
            Err(Error::SignatureMismatch(..))
        ));
    }

    assert!(matches!(
        webhooks.authenticate(&header.encode(), "https://example.com/other-hook"),
        Err(Error::SignatureMismatch(..))
    ));

    webhooks.authenticate(&header.encode(), URI).unwrap();
}

#[test]
fn signature_checked_before_freshness() {
    let webhooks = self::data::webhooks();
    let header = webhooks
        .signer()
        .unwrap()
        .sign(URI, SUBMISSION_ID, FORM_ID, 1)
        .unwrap();
    let forged = SignedHeader {
        epoch: clock::now_millis() - 1000,
        ..header.clone()
    };

    assert!(matches!(
        webhooks.authenticate(&header.encode(), URI),
        Err(Error::StaleSignature(..))
    ));
    assert!(matches!(
        webhooks.authenticate(&forged.encode(), URI),
        Err(Error::SignatureMismatch(..))
    ));
}

#[test]
fn uri_is_bound_in_href_form() {
    let webhooks = self::data::webhooks();
    let epoch = clock::now_millis() - 1;
    let header = webhooks
        .signer()
        .unwrap()
        .sign("https://example.com:443/hook", SUBMISSION_ID, FORM_ID, epoch)
        .unwrap();

    webhooks
        .authenticate(&header.encode(), "HTTPS://Example.com:443/hook")
        .unwrap();
    assert!(matches!(
        webhooks.authenticate(&header.encode(), "https://example.com/hook"),
        Err(Error::SignatureMismatch(..))
    ));

    let header = webhooks
        .signer()
        .unwrap()
        .sign("/hook", SUBMISSION_ID, FORM_ID, epoch)
        .unwrap();
    webhooks.authenticate(&header.encode(), "/hook").unwrap();
}

#[test]
fn error_reports_claims() {
    let webhooks = self::data::webhooks();
    let header = "t=1583136171649,s=sub1,f=form1,v1=c2lnbmF0dXJl";

    let error = webhooks.authenticate(header, URI).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Signature could not be verified for uri=https://example.com/hook submissionId=sub1 formId=form1 epoch=1583136171649 signature=c2lnbmF0dXJl"
    );
}

#[test]
fn malformed_and_invalid_headers() {
    let webhooks = self::data::webhooks();

    assert!(matches!(
        webhooks.authenticate("not a header", URI),
        Err(Error::HeaderParse(..))
    ));
    assert!(matches!(
        webhooks.authenticate("t=123,s=abc,v1=sig", URI),
        Err(Error::InvalidHeader)
    ));
    assert!(matches!(
        webhooks.authenticate("t=abc,s=abc,f=def,v1=sig", URI),
        Err(Error::InvalidHeader)
    ));
}

#[test]
fn authenticate_headers() {
    let webhooks = self::data::webhooks();
    let header = webhooks
        .signer()
        .unwrap()
        .sign(URI, SUBMISSION_ID, FORM_ID, clock::now_millis() - 1000)
        .unwrap();

    let mut headers = HeaderMap::new();
    assert!(matches!(
        webhooks.authenticate_headers(&headers, URI),
        Err(Error::MissingSignatureHeader)
    ));

    headers.insert(&SIGNATURE_HEADER, header.to_header_value().unwrap());
    webhooks.authenticate_headers(&headers, URI).unwrap();

    headers.insert(&SIGNATURE_HEADER, HeaderValue::from_static("t=1,s=a,f=b"));
    assert!(matches!(
        webhooks.authenticate_headers(&headers, URI),
        Err(Error::InvalidHeader)
    ));
}

#[test]
fn from_config() {
    let config = Configuration::from_toml_str(&format!(
        r#"
        mode = "test"
        webhook-secret-key = "{}"
        replay-window-ms = 10000

        [public-keys]
        test = "{}"
        "#,
        self::data::secret_key(),
        self::data::public_key(),
    ))
    .unwrap();

    let webhooks = Webhooks::from_config(&config).unwrap();
    assert_eq!(
        *webhooks.replay_guard(),
        ReplayGuard::new(Duration::from_secs(10))
    );

    let header = webhooks
        .signer()
        .unwrap()
        .sign(URI, SUBMISSION_ID, FORM_ID, clock::now_millis() - 11_000)
        .unwrap();
    assert!(matches!(
        webhooks.authenticate(&header.encode(), URI),
        Err(Error::StaleSignature(..))
    ));
}

#[test]
fn verify_only_config() {
    let config = Configuration {
        mode: Mode::Test,
        public_keys: self::data::key_ring(),
        webhook_secret_key: None,
        replay_window_ms: 300_000,
    };

    let webhooks = Webhooks::from_config(&config).unwrap();
    assert!(webhooks.signer().is_none());

    let config = Configuration {
        mode: Mode::Staging,
        ..config
    };
    assert!(matches!(
        Webhooks::from_config(&config),
        Err(Error::MissingPublicKey(Mode::Staging))
    ));
}
