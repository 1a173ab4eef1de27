/// Cache-friendly square matrix multiplication using i-k-j loop order.
///
/// Swapping the j and k loops makes the innermost loop walk both B and C
/// sequentially (stride 1). Every `c[i][j]` still receives its products
/// in ascending `p` order, so the result is bit-identical to
/// [`matmul_ijk`](super::naive_ijk::matmul_ijk).
///
/// Returns the number of multiply-adds performed, always `n³`.
pub fn matmul_ikj(a: &[f64], b: &[f64], c: &mut [f64], n: usize) -> u64 {
    let mut ops = 0u64;
    for i in 0..n {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..n {
            let a_ip = a[i * n + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
            ops += n as u64;
        }
    }
    ops
}
