/// Table of binomial coefficients C(i, j) for i <= n, j <= k,
/// used for the combinatorial number system coding of simplices.
#[derive(Clone, Debug)]
pub struct BinomialTable {
    n: usize,
    k: usize,
    data: Vec<u64>
}

impl BinomialTable {
    pub fn new(n: usize, k: usize) -> Self {
        let mut data = vec![0u64; (n + 1) * (k + 1)];

        for i in 0..=n {
            data[i * (k + 1)] = 1;
            for j in 1..=usize::min(i, k) {
                let a = data[(i - 1) * (k + 1) + j - 1];
                let b = data[(i - 1) * (k + 1) + j];
                let c = a.checked_add(b).expect("binomial coefficient overflow");
                data[i * (k + 1) + j] = c;
            }
        }

        Self { n, k, data }
    }

    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(i <= self.n && j <= self.k);
        self.data[i * (self.k + 1) + j]
    }
}
