//! Kernels densos sobre buffers row-major
//!
//! Compartilhados por [`State`](crate::State) e [`Operator`](crate::Operator):
//! um estado é uma matriz `2^n × 1`, um operador é `2^n × 2^n`.
//!
//! ## Computational Complexity
//!
//! - `kron`: O(dim(a) × dim(b)) entries written
//! - `matvec`: O(d²) for d = 2^n
//! - `matmul`: O(d³) for d = 2^n
//!
//! Every kernel writes into a freshly allocated buffer, one output row at a
//! time. With the `parallel` feature the rows are distributed over rayon's
//! pool; results are bit-identical to the sequential path since each row is
//! accumulated in the same order.

use crate::Amplitude;

/// Preenche `out` linha a linha (`width` entradas por linha)
fn fill_rows<F>(out: &mut [Amplitude], width: usize, fill: F)
where
    F: Fn(usize, &mut [Amplitude]) + Send + Sync,
{
    debug_assert!(width > 0);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(r, row)| fill(r, row));
    }

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(width)
        .enumerate()
        .for_each(|(r, row)| fill(r, row));
}

/// Dimensões de uma matriz row-major
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }
}

/// Produto de Kronecker `a ⊗ b`.
///
/// A entrada `(i·rows(b) + k, j·cols(b) + l)` recebe `a[i,j] · b[k,l]`:
/// `a` ocupa as posições mais significativas do índice combinado.
/// Entradas nulas de `a` deixam o bloco correspondente em zero.
pub fn kron(a: &[Amplitude], a_shape: Shape, b: &[Amplitude], b_shape: Shape) -> Vec<Amplitude> {
    debug_assert_eq!(a.len(), a_shape.len());
    debug_assert_eq!(b.len(), b_shape.len());

    let out_shape = Shape::new(a_shape.rows * b_shape.rows, a_shape.cols * b_shape.cols);
    let mut out = vec![Amplitude::new(0.0, 0.0); out_shape.len()];

    fill_rows(&mut out, out_shape.cols, |r, row| {
        let (i, k) = (r / b_shape.rows, r % b_shape.rows);
        let a_row = &a[i * a_shape.cols..(i + 1) * a_shape.cols];
        let b_row = &b[k * b_shape.cols..(k + 1) * b_shape.cols];

        for (j, &q1) in a_row.iter().enumerate() {
            if q1.re == 0.0 && q1.im == 0.0 {
                continue;
            }
            let block = &mut row[j * b_shape.cols..(j + 1) * b_shape.cols];
            for (slot, &q2) in block.iter_mut().zip(b_row) {
                *slot = q1 * q2;
            }
        }
    });

    out
}

/// Produto matriz-vetor `m · v` para `m` quadrada de lado `dim`
pub fn matvec(m: &[Amplitude], v: &[Amplitude], dim: usize) -> Vec<Amplitude> {
    debug_assert_eq!(m.len(), dim * dim);
    debug_assert_eq!(v.len(), dim);

    let mut out = vec![Amplitude::new(0.0, 0.0); dim];
    fill_rows(&mut out, 1, |r, slot| {
        let m_row = &m[r * dim..(r + 1) * dim];
        slot[0] = m_row.iter().zip(v).map(|(&x, &y)| x * y).sum();
    });
    out
}

/// Produto matricial `a · b` para matrizes quadradas de lado `dim`
pub fn matmul(a: &[Amplitude], b: &[Amplitude], dim: usize) -> Vec<Amplitude> {
    debug_assert_eq!(a.len(), dim * dim);
    debug_assert_eq!(b.len(), dim * dim);

    let mut out = vec![Amplitude::new(0.0, 0.0); dim * dim];
    fill_rows(&mut out, dim, |r, row| {
        let a_row = &a[r * dim..(r + 1) * dim];
        for (k, &ark) in a_row.iter().enumerate() {
            let b_row = &b[k * dim..(k + 1) * dim];
            for (slot, &bkc) in row.iter_mut().zip(b_row) {
                *slot += ark * bkc;
            }
        }
    });
    out
}

/// Conjugado complexo entrada a entrada
pub fn conjugate(values: &[Amplitude]) -> Vec<Amplitude> {
    values.iter().map(|z| z.conj()).collect()
}

/// Transposta conjugada de uma matriz quadrada
pub fn adjoint(m: &[Amplitude], dim: usize) -> Vec<Amplitude> {
    debug_assert_eq!(m.len(), dim * dim);

    let mut out = vec![Amplitude::new(0.0, 0.0); dim * dim];
    fill_rows(&mut out, dim, |r, row| {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = m[c * dim + r].conj();
        }
    });
    out
}

/// Soma dos módulos ao quadrado
pub fn norm_sqr(values: &[Amplitude]) -> f64 {
    values.iter().map(|z| z.norm_sqr()).sum()
}

/// Compara entrada a entrada com tolerância absoluta
pub fn approx_eq(a: &[Amplitude], b: &[Amplitude], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).norm() <= tolerance)
}
