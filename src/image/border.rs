//! Border normalization.
//!
//! A level line of the bilinear surface that reaches the image frame cannot
//! close inside the domain, so the extractor drops it. Replacing every border
//! sample by a single gray value guarantees that no line at a non-integer
//! level crosses the frame, and picking the median border value keeps the
//! visual background close to the input one.
use super::{ImageView, ImageViewMut};

/// Histogram of the samples lying on the image frame.
pub fn border_histogram<I: ImageView<Pixel = u8>>(image: &I) -> [usize; 256] {
    let mut histo = [0usize; 256];
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return histo;
    }
    for (y, row) in image.rows().enumerate() {
        if y == 0 || y + 1 == h {
            for &v in row {
                histo[v as usize] += 1;
            }
        } else {
            histo[row[0] as usize] += 1;
            if w > 1 {
                histo[row[w - 1] as usize] += 1;
            }
        }
    }
    histo
}

/// Set all frame samples to `value`.
pub fn put_border<I: ImageViewMut<Pixel = u8>>(image: &mut I, value: u8) {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return;
    }
    for y in 0..h {
        let row = image.row_mut(y);
        if y == 0 || y + 1 == h {
            row.fill(value);
        } else {
            row[0] = value;
            row[w - 1] = value;
        }
    }
}

/// Set all frame samples to their median value and return it.
///
/// Returns `None` for an empty image.
pub fn fill_border<I: ImageViewMut<Pixel = u8>>(image: &mut I) -> Option<u8> {
    let histo = border_histogram(image);
    let total: usize = histo.iter().sum();
    if total == 0 {
        return None;
    }
    let half = total.div_ceil(2);
    let mut sum = 0usize;
    let median = histo.iter().position(|&count| {
        sum += count;
        sum >= half
    })?;
    let median = median as u8;
    put_border(image, median);
    Some(median)
}

#[cfg(test)]
mod tests {
    use super::{border_histogram, fill_border};
    use crate::image::io::GrayImageU8;
    use crate::image::ImageView;

    #[test]
    fn histogram_counts_frame_once() {
        #[rustfmt::skip]
        let img = GrayImageU8::new(3, 3, vec![
            1, 1, 1,
            2, 9, 2,
            3, 3, 3,
        ]);
        let histo = border_histogram(&img);
        assert_eq!(histo[1], 3);
        assert_eq!(histo[2], 2);
        assert_eq!(histo[3], 3);
        assert_eq!(histo[9], 0, "interior sample must not be counted");
    }

    #[test]
    fn fill_border_uses_median_and_keeps_interior() {
        #[rustfmt::skip]
        let mut img = GrayImageU8::new(4, 4, vec![
            10, 10, 10, 10,
            10, 200, 50, 10,
            30, 60, 70, 30,
            30, 30, 90, 90,
        ]);
        let median = fill_border(&mut img).expect("non-empty image");
        assert_eq!(median, 10);
        assert_eq!(img.row(0), &[10, 10, 10, 10]);
        assert_eq!(img.row(1), &[10, 200, 50, 10]);
        assert_eq!(img.row(2), &[10, 60, 70, 10]);
        assert_eq!(img.row(3), &[10, 10, 10, 10]);
    }
}
