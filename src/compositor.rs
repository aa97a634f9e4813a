//! Viewport compositing: slicing the wide captured frame into the window
//! that is actually displayed.

use crate::constants::{BYTES_PER_PIXEL, NUM_SEGMENTS};
use crate::error::{Error, Result};

/// Raw RGB24 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw RGB24 buffer. The length must be exactly
    /// `width * height * 3`; anything else is a malformed frame.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::FrameRead(format!(
                "frame buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self { width, height, data })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy of the columns `[x0, x1)` as a new frame.
    pub fn columns(&self, x0: usize, x1: usize) -> Result<Self> {
        if x0 > x1 || x1 > self.width {
            return Err(Error::Composite(format!(
                "column range {x0}..{x1} out of bounds for width {}",
                self.width
            )));
        }
        let mut data = Vec::with_capacity((x1 - x0) * self.height * BYTES_PER_PIXEL);
        for row in 0..self.height {
            let base = row * self.width * BYTES_PER_PIXEL;
            data.extend_from_slice(&self.data[base + x0 * BYTES_PER_PIXEL..base + x1 * BYTES_PER_PIXEL]);
        }
        Self::new(x1 - x0, self.height, data)
    }
}

/// Compose the displayed window from the two-segment source frame.
///
/// The source is segment A (columns `[0, W)`) and segment B (columns
/// `[W, 2W)`) side by side. `pan` slides a `W`-wide window across them:
/// 0 shows segment B unmodified, -1 shows segment A, and values in between
/// stitch the trailing columns of one segment onto the leading columns of
/// the other. Positive pan reuses the same two segments from the opposite
/// edge, so both directions bottom out on segment A.
///
/// `pan` arrives clamped from the mapper but is clamped here again; the
/// output is always exactly `W x H`.
pub fn compose(source: &Frame, pan: f64) -> Result<Frame> {
    if source.width() % NUM_SEGMENTS != 0 || source.width() == 0 {
        return Err(Error::Composite(format!(
            "source width {} does not split into {} segments",
            source.width(),
            NUM_SEGMENTS
        )));
    }
    let seg_width = source.width() / NUM_SEGMENTS;

    let pan = if pan.is_finite() { pan.clamp(-1.0, 1.0) } else { 0.0 };
    // Pixel shift away from the pan == 0 position
    let shift = ((pan.abs() * seg_width as f64).round() as usize).min(seg_width);

    // Column ranges into the source, leading part then trailing part
    let (first, second) = if pan <= 0.0 {
        // last `shift` columns of A, then first `W - shift` columns of B
        ((seg_width - shift, seg_width), (seg_width, 2 * seg_width - shift))
    } else {
        // last `W - shift` columns of B, then first `shift` columns of A
        ((seg_width + shift, 2 * seg_width), (0, shift))
    };

    let mut data = Vec::with_capacity(seg_width * source.height() * BYTES_PER_PIXEL);
    for row in 0..source.height() {
        let base = row * source.width() * BYTES_PER_PIXEL;
        for &(start, end) in &[first, second] {
            data.extend_from_slice(
                &source.data[base + start * BYTES_PER_PIXEL..base + end * BYTES_PER_PIXEL],
            );
        }
    }
    Frame::new(seg_width, source.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 8;
    const H: usize = 4;

    /// Two segments with distinct per-column fill: segment A columns carry
    /// their index, segment B columns carry 100 + index.
    fn test_frame() -> Frame {
        let mut data = Vec::with_capacity(2 * W * H * BYTES_PER_PIXEL);
        for _row in 0..H {
            for col in 0..2 * W {
                let v = if col < W { col as u8 } else { 100 + (col - W) as u8 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(2 * W, H, data).unwrap()
    }

    fn segment_a() -> Frame {
        test_frame().columns(0, W).unwrap()
    }

    fn segment_b() -> Frame {
        test_frame().columns(W, 2 * W).unwrap()
    }

    #[test]
    fn test_frame_length_validation() {
        assert!(Frame::new(2, 2, vec![0; 12]).is_ok());
        assert!(Frame::new(2, 2, vec![0; 11]).is_err());
        assert!(Frame::new(2, 2, vec![0; 13]).is_err());
    }

    #[test]
    fn test_pan_zero_is_segment_b() {
        let out = compose(&test_frame(), 0.0).unwrap();
        assert_eq!(out, segment_b());
    }

    #[test]
    fn test_pan_minus_one_is_segment_a() {
        let out = compose(&test_frame(), -1.0).unwrap();
        assert_eq!(out, segment_a());
    }

    #[test]
    fn test_pan_plus_one_is_segment_a() {
        // The positive direction reuses the same two segments and also
        // bottoms out on segment A
        let out = compose(&test_frame(), 1.0).unwrap();
        assert_eq!(out, segment_a());
    }

    #[test]
    fn test_negative_pan_stitches_trailing_a_leading_b() {
        // pan -0.5 on W=8 shifts by 4: last 4 columns of A, first 4 of B
        let out = compose(&test_frame(), -0.5).unwrap();
        assert_eq!(out.width(), W);
        let row0: Vec<u8> = out.data()[..W * BYTES_PER_PIXEL]
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| px[0])
            .collect();
        assert_eq!(row0, vec![4, 5, 6, 7, 100, 101, 102, 103]);
    }

    #[test]
    fn test_positive_pan_stitches_trailing_b_leading_a() {
        // pan 0.5 on W=8 shifts by 4: last 4 columns of B, first 4 of A
        let out = compose(&test_frame(), 0.5).unwrap();
        let row0: Vec<u8> = out.data()[..W * BYTES_PER_PIXEL]
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| px[0])
            .collect();
        assert_eq!(row0, vec![104, 105, 106, 107, 0, 1, 2, 3]);
    }

    #[test]
    fn test_output_shape_for_all_pans() {
        let frame = test_frame();
        let mut pan = -1.0;
        while pan <= 1.0 {
            let out = compose(&frame, pan).unwrap();
            assert_eq!((out.width(), out.height()), (W, H), "pan {pan}");
            assert_eq!(out.data().len(), W * H * BYTES_PER_PIXEL, "pan {pan}");
            pan += 0.125;
        }
    }

    #[test]
    fn test_defensive_clamp() {
        let frame = test_frame();
        assert_eq!(compose(&frame, -7.0).unwrap(), segment_a());
        assert_eq!(compose(&frame, 7.0).unwrap(), segment_a());
        assert_eq!(compose(&frame, f64::NAN).unwrap(), segment_b());
    }

    #[test]
    fn test_odd_width_rejected() {
        let frame = Frame::new(3, 1, vec![0; 9]).unwrap();
        assert!(matches!(compose(&frame, 0.0), Err(Error::Composite(_))));
    }
}
