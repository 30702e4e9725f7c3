//! Row kernels shared by the CPU backends.
//!
//! Every kernel writes exactly one output row and reads the source with
//! clamp-to-edge addressing. Accumulation order is fixed, so the result
//! does not depend on how rows are scheduled.

const C: usize = 4;

/// Converts an accumulated channel value to `u8` (clamp, round half up).
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 255.0) + 0.5) as u8
}

/// Gaussian weights for `radius`.
///
/// Returns the integer half-width and `2 * half + 1` normalized weights.
/// `sigma = 0.4 * radius + 0.6`.
pub(crate) fn gaussian_weights(radius: f32) -> (i32, Vec<f32>) {
    let half = radius.ceil() as i32;
    let sigma = 0.4 * radius + 0.6;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    (half, weights)
}

/// Horizontal blur pass: `u8` source row `y` into a float row.
pub(crate) fn blur_row_h(src: &[u8], width: usize, y: usize, half: i32, weights: &[f32], out: &mut [f32]) {
    let row = &src[y * width * C..(y + 1) * width * C];
    let max_x = width as i32 - 1;
    for x in 0..width {
        let mut acc = [0.0f32; C];
        for (k, w) in weights.iter().enumerate() {
            let sx = (x as i32 + k as i32 - half).clamp(0, max_x) as usize;
            let px = &row[sx * C..sx * C + C];
            for ch in 0..C {
                acc[ch] += px[ch] as f32 * w;
            }
        }
        out[x * C..x * C + C].copy_from_slice(&acc);
    }
}

/// Vertical blur pass: float scratch into `u8` output row `y`.
pub(crate) fn blur_row_v(
    temp: &[f32],
    width: usize,
    height: usize,
    y: usize,
    half: i32,
    weights: &[f32],
    out: &mut [u8],
) {
    let max_y = height as i32 - 1;
    let stride = width * C;
    for x in 0..width {
        let mut acc = [0.0f32; C];
        for (k, w) in weights.iter().enumerate() {
            let sy = (y as i32 + k as i32 - half).clamp(0, max_y) as usize;
            let i = sy * stride + x * C;
            for ch in 0..C {
                acc[ch] += temp[i + ch] * w;
            }
        }
        for ch in 0..C {
            out[x * C + ch] = to_u8(acc[ch]);
        }
    }
}

/// 5x5 convolution of output row `y`; coefficient index is `ky * 5 + kx`.
pub(crate) fn convolve_row(
    src: &[u8],
    width: usize,
    height: usize,
    y: usize,
    coefficients: &[f32; 25],
    out: &mut [u8],
) {
    let max_x = width as i32 - 1;
    let max_y = height as i32 - 1;
    let stride = width * C;
    for x in 0..width {
        let mut acc = [0.0f32; C];
        for ky in 0..5 {
            let sy = (y as i32 + ky - 2).clamp(0, max_y) as usize;
            for kx in 0..5 {
                let sx = (x as i32 + kx - 2).clamp(0, max_x) as usize;
                let w = coefficients[(ky * 5 + kx) as usize];
                let i = sy * stride + sx * C;
                for ch in 0..C {
                    acc[ch] += src[i + ch] as f32 * w;
                }
            }
        }
        for ch in 0..C {
            out[x * C + ch] = to_u8(acc[ch]);
        }
    }
}

/// 3x3 colour matrix on one row; row-major matrix, alpha copied.
pub(crate) fn color_matrix_row(src: &[u8], matrix: &[f32; 9], out: &mut [u8]) {
    for (o, i) in out.chunks_exact_mut(C).zip(src.chunks_exact(C)) {
        let r = i[0] as f32;
        let g = i[1] as f32;
        let b = i[2] as f32;
        o[0] = to_u8(matrix[0] * r + matrix[1] * g + matrix[2] * b);
        o[1] = to_u8(matrix[3] * r + matrix[4] * g + matrix[5] * b);
        o[2] = to_u8(matrix[6] * r + matrix[7] * g + matrix[8] * b);
        o[3] = i[3];
    }
}
