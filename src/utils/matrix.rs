//! Matrix utility functions.

use faer::{Col, Mat};

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut means = Col::zeros(n_cols);
    let mut centered = Mat::zeros(n_rows, n_cols);

    for j in 0..n_cols {
        let sum: f64 = (0..n_rows).map(|i| x[(i, j)]).sum();
        means[j] = sum / n_rows as f64;

        for i in 0..n_rows {
            centered[(i, j)] = x[(i, j)] - means[j];
        }
    }

    (centered, means)
}

/// Frobenius norm of a matrix.
pub fn frobenius_norm(x: &Mat<f64>) -> f64 {
    let mut sum = 0.0;
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            sum += x[(i, j)] * x[(i, j)];
        }
    }
    sum.sqrt()
}

/// Euclidean norm of each column.
pub fn column_norms(x: &Mat<f64>) -> Col<f64> {
    let mut norms = Col::zeros(x.ncols());
    for j in 0..x.ncols() {
        let mut sum = 0.0;
        for i in 0..x.nrows() {
            sum += x[(i, j)] * x[(i, j)];
        }
        norms[j] = sum.sqrt();
    }
    norms
}

/// Matrix product `A * B`.
pub fn matmul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let n = a.nrows();
    let k = a.ncols();
    let p = b.ncols();
    debug_assert_eq!(k, b.nrows());

    let mut out = Mat::zeros(n, p);
    for i in 0..n {
        for j in 0..p {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a[(i, l)] * b[(l, j)];
            }
            out[(i, j)] = sum;
        }
    }
    out
}

/// Matrix product `A' * B`.
pub fn transpose_matmul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let n = a.ncols();
    let k = a.nrows();
    let p = b.ncols();
    debug_assert_eq!(k, b.nrows());

    let mut out = Mat::zeros(n, p);
    for i in 0..n {
        for j in 0..p {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a[(l, i)] * b[(l, j)];
            }
            out[(i, j)] = sum;
        }
    }
    out
}

/// Matrix product `A * B'`.
pub fn matmul_transpose(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let n = a.nrows();
    let k = a.ncols();
    let p = b.nrows();
    debug_assert_eq!(k, b.ncols());

    let mut out = Mat::zeros(n, p);
    for i in 0..n {
        for j in 0..p {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a[(i, l)] * b[(j, l)];
            }
            out[(i, j)] = sum;
        }
    }
    out
}
