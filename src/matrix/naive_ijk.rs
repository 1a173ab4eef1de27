/// Square matrix multiplication using i-j-k loop order: C += A * B.
///
/// This is the textbook triple loop. The innermost loop walks B with
/// stride `n` (column-wise), so once a column of B no longer fits in
/// cache every step is a miss.
///
/// Returns the number of multiply-adds performed, always `n³`.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into
/// * `n` - Side length
pub fn matmul_ijk(a: &[f64], b: &[f64], c: &mut [f64], n: usize) -> u64 {
    let mut ops = 0u64;
    for i in 0..n {
        for j in 0..n {
            let mut acc = c[i * n + j];
            for p in 0..n {
                acc += a[i * n + p] * b[p * n + j];
            }
            c[i * n + j] = acc;
            ops += n as u64;
        }
    }
    ops
}
