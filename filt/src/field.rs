pub type Coeff = u32;

pub fn is_prime(p: Coeff) -> bool {
    if p < 2 {
        return false
    }
    let mut d = 2u64;
    let p = p as u64;
    while d * d <= p {
        if p % d == 0 {
            return false
        }
        d += 1;
    }
    true
}

/// The coefficient field Z/p for a runtime prime p.
/// Multiplicative inverses are precomputed with the recurrence
/// inv(a) = -(p / a) * inv(p mod a).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    p: Coeff,
    inv: Vec<Coeff>
}

impl PrimeField {
    pub fn new(p: Coeff) -> Self {
        assert!(is_prime(p));

        let q = p as u64;
        let mut inv = vec![0; p as usize];
        if p > 1 {
            inv[1] = 1;
        }
        for a in 2..q {
            // inv[a] = -(p / a) * inv[p % a] mod p
            let i = (q - (q / a) * inv[(q % a) as usize] as u64 % q) % q;
            inv[a as usize] = i as Coeff;
        }

        Self { p, inv }
    }

    pub fn p(&self) -> Coeff {
        self.p
    }

    pub fn add(&self, a: Coeff, b: Coeff) -> Coeff {
        let s = a as u64 + b as u64;
        let p = self.p as u64;
        (if s >= p { s - p } else { s }) as Coeff
    }

    pub fn neg(&self, a: Coeff) -> Coeff {
        if a == 0 { 0 } else { self.p - a }
    }

    pub fn sub(&self, a: Coeff, b: Coeff) -> Coeff {
        self.add(a, self.neg(b))
    }

    pub fn mul(&self, a: Coeff, b: Coeff) -> Coeff {
        ((a as u64 * b as u64) % self.p as u64) as Coeff
    }

    pub fn inv(&self, a: Coeff) -> Coeff {
        assert!(a != 0 && a < self.p);
        self.inv[a as usize]
    }

    pub fn div(&self, a: Coeff, b: Coeff) -> Coeff {
        self.mul(a, self.inv(b))
    }

    pub fn normalize(&self, a: i64) -> Coeff {
        a.rem_euclid(self.p as i64) as Coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality() {
        assert!( is_prime(2));
        assert!( is_prime(3));
        assert!(!is_prime(4));
        assert!( is_prime(5));
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!( is_prime(97));
        assert!(!is_prime(91)); // 7 * 13
    }

    #[test]
    fn inv_table() {
        for p in [2, 3, 5, 7, 13] {
            let f = PrimeField::new(p);
            for a in 1..p {
                assert_eq!(f.mul(a, f.inv(a)), 1, "p = {p}, a = {a}");
            }
        }
    }

    #[test]
    fn ops() {
        let f = PrimeField::new(5);

        assert_eq!(f.add(3, 4), 2);
        assert_eq!(f.sub(3, 4), 4);
        assert_eq!(f.neg(3), 2);
        assert_eq!(f.neg(0), 0);
        assert_eq!(f.mul(3, 4), 2);
        assert_eq!(f.div(4, 3), 3);
    }

    #[test]
    fn large_prime() {
        assert!( is_prime(4294967291)); // largest 32-bit prime
        assert!(!is_prime(4294967295)); // 2^32 - 1 = 3 * 5 * 17 * 257 * 65537

        // add must not wrap in 32 bits
        let p = 65521;
        let f = PrimeField::new(p);
        assert_eq!(f.add(p - 1, p - 1), p - 2);
        assert_eq!(f.mul(p - 1, p - 1), 1);
    }

    #[test]
    fn normalize() {
        let f = PrimeField::new(3);

        assert_eq!(f.normalize(-7), 2);
        assert_eq!(f.normalize(7), 1);
        assert_eq!(f.normalize(0), 0);
    }

    #[test]
    #[should_panic]
    fn not_prime() {
        PrimeField::new(4);
    }
}
