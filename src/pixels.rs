// Packed ARGB ints (managed bitmap layout) -> tightly packed RGB bytes

/// Unpack `0xAARRGGBB` pixels into `R, G, B` bytes, dropping alpha.
pub fn argb_to_rgb(pixels: &[i32]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() * 3);
    for &pixel in pixels {
        let [_, r, g, b] = (pixel as u32).to_be_bytes();
        rgb.extend_from_slice(&[r, g, b]);
    }
    rgb
}
