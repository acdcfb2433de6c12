use diffusion_circuits::{
    bits::{bits_to_hex, hex_to_bits},
    fixing::fix_padding,
    Circuit, HashFunction,
};
use md4::{Digest, Md4};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha1::Sha1;

fn rnd() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn random_message(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.random_range(0..=max_len);
    (0..len).map(|_| rng.random()).collect()
}

fn digest(circuit: &mut Circuit, hash: HashFunction, message: &[u8]) -> String {
    let input = hash.pad_bytes(message).unwrap();
    bits_to_hex(&circuit.get_output_for(&input).unwrap())
}

#[test]
fn md4_test_vectors() {
    let mut circuit = HashFunction::Md4.build().unwrap();
    for (message, expected) in [
        (&b""[..], "31d6cfe0d16ae931b73c59d7e0c089c0"),
        (&b"a"[..], "bde52cb31de33e46245e05fbdbd6fb24"),
        (&b"abc"[..], "a448017aaf21d8525fc10ae87aa6729d"),
        (&b"message digest"[..], "d9130a8164549fe818874806e1c7014b"),
    ] {
        assert_eq!(digest(&mut circuit, HashFunction::Md4, message), expected);
    }
}

#[test]
fn sha1_test_vectors() {
    let mut circuit = HashFunction::Sha1.build().unwrap();
    assert_eq!(
        digest(&mut circuit, HashFunction::Sha1, b"abc"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(
        digest(&mut circuit, HashFunction::Sha1, b""),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
}

#[test]
fn md4_matches_reference() {
    let mut circuit = HashFunction::Md4.build().unwrap();
    let mut rng = rnd();
    for _ in 0..16 {
        let message = random_message(&mut rng, HashFunction::MAX_MESSAGE_BYTES);
        assert_eq!(
            digest(&mut circuit, HashFunction::Md4, &message),
            hex::encode(Md4::digest(&message)),
            "message {}",
            hex::encode(&message)
        );
    }
}

#[test]
fn sha1_matches_reference() {
    let mut circuit = HashFunction::Sha1.build().unwrap();
    let mut rng = rnd();
    for _ in 0..8 {
        let message = random_message(&mut rng, HashFunction::MAX_MESSAGE_BYTES);
        assert_eq!(
            digest(&mut circuit, HashFunction::Sha1, &message),
            hex::encode(Sha1::digest(&message)),
            "message {}",
            hex::encode(&message)
        );
    }
}

#[test]
fn output_bits_parse_back() {
    let mut circuit = HashFunction::Md4.build().unwrap();
    let input = HashFunction::Md4.pad_bytes(b"abc").unwrap();
    let output = circuit.get_output_for(&input).unwrap();
    assert_eq!(
        output,
        hex_to_bits("a448017aaf21d8525fc10ae87aa6729d").unwrap()
    );
}

#[test]
fn md4_simplified_for_short_messages() {
    let mut circuit = HashFunction::Md4.build().unwrap();
    let gates = circuit.gate_count();

    let fixed = fix_padding(&mut circuit, HashFunction::Md4, 24).unwrap();
    assert_eq!(fixed, HashFunction::Md4.input_len() - 24);

    let free = circuit.simplify().unwrap();
    circuit.validate().unwrap();
    assert!(circuit.gate_count() < gates);
    assert!(free.is_empty());

    let mut rng = rnd();
    for _ in 0..8 {
        let message: [u8; 3] = rng.random();
        assert_eq!(
            digest(&mut circuit, HashFunction::Md4, &message),
            hex::encode(Md4::digest(message))
        );
    }

    let cut = circuit.min_cut().unwrap().clone();
    assert_eq!(cut.len(), cut.max_flow());
    assert!(cut.max_flow() <= 24);
}

#[test]
#[ignore = "SHA-1 min cut over the full circuit is slow"]
fn sha1_min_cut_is_bounded_by_outputs() {
    let mut circuit = HashFunction::Sha1.build().unwrap();
    let cut = circuit.min_cut().unwrap().clone();
    assert_eq!(cut.len(), cut.max_flow());
    assert!(cut.max_flow() <= HashFunction::Sha1.output_len());

    let input = HashFunction::Sha1.pad_bytes(b"abc").unwrap();
    assert_eq!(circuit.min_cut_values_for(&input).unwrap().len(), cut.len());
}
