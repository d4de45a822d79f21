//! Tests for URL-safe base64 decoding (from_base64_url).

use proptest::prelude::*;
use rand::Rng;
use wrapped_base64::{from_base64_url, to_base64, to_base64_url, Base64Error};

fn generate_blob() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let length = rng.gen_range(0..=100);
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn works() {
    for _ in 0..100 {
        let blob = generate_blob();
        let encoded = to_base64(&blob)
            .replace('+', "-")
            .replace('/', "_")
            .trim_end_matches('=')
            .to_string();

        let decoded = from_base64_url(&encoded).unwrap();
        assert_eq!(decoded, blob);
    }
}

#[test]
fn empty_input() {
    assert_eq!(from_base64_url("").unwrap(), b"");
}

#[test]
fn hello_world() {
    let decoded = from_base64_url("aGVsbG8gd29ybGQ").unwrap();
    assert_eq!(decoded, b"hello world");
}

#[test]
fn single_byte() {
    assert_eq!(from_base64_url("Zg").unwrap(), b"f");
}

#[test]
fn two_bytes() {
    assert_eq!(from_base64_url("Zm8").unwrap(), b"fo");
}

#[test]
fn tolerates_trailing_padding() {
    assert_eq!(from_base64_url("Zg==").unwrap(), b"f");
    assert_eq!(from_base64_url("Zm8=").unwrap(), b"fo");
    assert_eq!(from_base64_url("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
}

#[test]
fn url_alphabet_characters() {
    assert_eq!(from_base64_url("-_8").unwrap(), vec![0xfb, 0xff]);
}

#[test]
fn rejects_standard_only_characters() {
    assert_eq!(
        from_base64_url("+/8"),
        Err(Base64Error::InvalidCharacter { ch: '+', offset: 0 })
    );
    assert_eq!(
        from_base64_url("ab/c"),
        Err(Base64Error::InvalidCharacter { ch: '/', offset: 2 })
    );
}

#[test]
fn rejects_characters_outside_alphabet() {
    assert!(matches!(
        from_base64_url("abc$"),
        Err(Base64Error::InvalidCharacter { ch: '$', offset: 3 })
    ));
    assert!(from_base64_url("ab c").is_err());
    assert!(from_base64_url("héllo").is_err());
}

#[test]
fn rejects_interior_padding() {
    assert_eq!(from_base64_url("Zg=Zm9v"), Err(Base64Error::MisplacedPadding(2)));
    assert_eq!(from_base64_url("Zg==="), Err(Base64Error::MisplacedPadding(2)));
}

#[test]
fn rejects_impossible_length() {
    assert_eq!(from_base64_url("Zm9vY"), Err(Base64Error::InvalidLength));
}

proptest! {
    #[test]
    fn url_round_trip(blob in proptest::collection::vec(any::<u8>(), 0..256)) {
        let token = to_base64_url(&blob);
        prop_assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        prop_assert_eq!(from_base64_url(&token).unwrap(), blob);
    }
}
