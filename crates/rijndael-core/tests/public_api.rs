//! The crate root re-exports everything callers need.

use rijndael_core::{
    expand_key, gf_mul, tables, BlockSize, Field, GaloisTables, KeySize, Rijndael, RijndaelError,
};

fn field_of(t: &GaloisTables) -> &Field {
    &t.field
}

#[test]
fn tables_and_field_reachable_from_root() {
    let field = field_of(tables());
    assert_eq!(field.mul(0x57, 0x83), gf_mul(0x57, 0x83));
    assert_eq!(field.div(0xc1, 0x83), 0x57);
    assert_eq!(tables().sbox[0x53], 0xed);
}

#[test]
fn round_keys_come_from_expand_key() {
    let key = [0u8; 24];
    let schedule = expand_key(&key, BlockSize::B256).expect("valid sizes");
    let cipher = Rijndael::with_block(&key, BlockSize::B256).expect("valid sizes");
    assert_eq!(schedule.encrypt.rounds(), cipher.rounds());
    assert_eq!(schedule.encrypt.get(0).len(), BlockSize::B256.words());
    assert_eq!(KeySize::try_from(key.len()), Ok(KeySize::Aes192));
    assert_eq!(
        expand_key(&[0u8; 20], BlockSize::B128).unwrap_err(),
        RijndaelError::InvalidKeyLength(20)
    );
}
