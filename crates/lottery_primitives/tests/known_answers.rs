use hex_literal::hex;
use lottery_primitives::constants::{
    ACCOUNT_AMOUNT, ACCOUNT_MIN_LEN, ACCOUNT_OWNER, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use lottery_primitives::{decode_address, encode_address, is_valid_address, sha256};

#[test]
fn sha256_abc_vector() {
    assert_eq!(
        sha256(b"abc"),
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert_eq!(
        hex::encode(sha256(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn base58_fixed_keys() {
    assert_eq!(encode_address(&[0u8; 32]), "11111111111111111111111111111111");
    assert_eq!(
        encode_address(&[1u8; 32]),
        "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi"
    );
    assert_eq!(
        encode_address(&[9u8; 32]),
        "cGfHiC6Kgg3FpFZvgwGcswsCRtp4aBP2fzuXRQPizuN"
    );
}

#[test]
fn token_program_ids_decode() {
    assert_eq!(
        decode_address(TOKEN_PROGRAM_ID).expect("classic id"),
        hex!("06ddf6e1d765a193d9cbe146ceeb79ac1cb485ed5f5b37913a8cf5857eff00a9")
    );
    assert!(is_valid_address(TOKEN_2022_PROGRAM_ID));
}

#[test]
fn layout_is_contiguous() {
    assert_eq!(ACCOUNT_OWNER.end, ACCOUNT_AMOUNT.start);
    assert_eq!(ACCOUNT_AMOUNT.end, ACCOUNT_MIN_LEN);
    assert_eq!(ACCOUNT_AMOUNT.len(), 8);
}
