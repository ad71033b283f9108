/// In-place box blur for RGBA8 pixel buffers.
///
/// Colors are premultiplied by alpha before averaging so that transparent
/// neighbours do not drag edges toward black, then divided back out. Each
/// pass is a separable running-sum box filter (horizontal, then vertical)
/// with edge pixels extended; repeating passes approaches a gaussian.
pub struct BoxBlur {
    radius: usize,
    passes: usize,
    // reused between frames
    accum: Vec<f32>,
    scratch: Vec<f32>,
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl BoxBlur {
    pub fn new(radius: usize, passes: usize) -> Self {
        Self {
            radius,
            passes,
            accum: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn apply(&mut self, rgba: &mut [u8], width: usize, height: usize) {
        let len = width * height;
        if self.radius == 0 || self.passes == 0 || len == 0 || rgba.len() < len * 4 {
            return;
        }

        self.accum.clear();
        self.accum.reserve(len * 4);
        for px in rgba.chunks_exact(4).take(len) {
            let a = px[3] as f32 / 255.0;
            self.accum.extend_from_slice(&[
                px[0] as f32 * a,
                px[1] as f32 * a,
                px[2] as f32 * a,
                px[3] as f32,
            ]);
        }
        self.scratch.resize(len * 4, 0.0);

        for _ in 0..self.passes {
            blur_axis(&self.accum, &mut self.scratch, width, height, self.radius, Axis::Horizontal);
            blur_axis(&self.scratch, &mut self.accum, width, height, self.radius, Axis::Vertical);
        }

        for (px, acc) in rgba.chunks_exact_mut(4).zip(self.accum.chunks_exact(4)) {
            let a = acc[3];
            if a < 0.5 {
                px.copy_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            let unpremultiply = 255.0 / a;
            px[0] = to_byte(acc[0] * unpremultiply);
            px[1] = to_byte(acc[1] * unpremultiply);
            px[2] = to_byte(acc[2] * unpremultiply);
            px[3] = to_byte(a);
        }
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn blur_axis(src: &[f32], dst: &mut [f32], width: usize, height: usize, radius: usize, axis: Axis) {
    let (lines, len, line_step, stride) = match axis {
        Axis::Horizontal => (height, width, width, 1),
        Axis::Vertical => (width, height, 1, width),
    };
    for line in 0..lines {
        box_line(src, dst, line * line_step, stride, len, radius);
    }
}

/// Averages one row or column over a `2 * radius + 1` window.
fn box_line(src: &[f32], dst: &mut [f32], start: usize, stride: usize, len: usize, radius: usize) {
    let window = (2 * radius + 1) as f32;
    let last = len - 1;
    let index = |i: usize| (start + i * stride) * 4;

    for ch in 0..4 {
        let at = |i: usize| src[index(i) + ch];

        // Window centred on 0: the left half is the extended edge pixel.
        let mut sum = at(0) * radius as f32;
        for i in 0..=radius {
            sum += at(i.min(last));
        }

        for i in 0..len {
            dst[index(i) + ch] = sum / window;
            let add = (i + radius + 1).min(last);
            let sub = i.saturating_sub(radius);
            sum += at(add) - at(sub);
        }
    }
}
