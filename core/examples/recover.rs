use math::PrimeField;
use recovery_core::{reconstruct_robust, reconstruct_secret, Share};

/// Recover the secret 3 of `f(x) = 3 + 2x` over GF(17), first from clean
/// shares and then with the fourth share tampered.
fn main() {
    let field = PrimeField::from_u64(17).expect("17 is a valid modulus");
    let clean: Vec<Share> = vec![(1, 5).into(), (2, 7).into(), (3, 9).into()];

    let secret = reconstruct_secret(&clean, 2, &field)
        .expect("trusting reconstruction should succeed");
    println!("Secret from clean shares: {secret}");

    let mut tampered = clean.clone();
    tampered.push((4, 1).into());

    let outcome = reconstruct_robust(&tampered, 2, &field, 1)
        .expect("parameters are valid");
    let recovered = outcome
        .found()
        .expect("one corrupted share is within tolerance");

    assert_eq!(recovered.secret, secret);
    println!("Recovered polynomial: {}", recovered.polynomial);
    println!("Corrupted shares: {:?}", recovered.inconsistent_shares());
}
