// src/domain/image_url.rs
//
// Derived image URL codec.
//
// The image CDN shards product images into four path segments computed by
// rearranging the middle digits of the product code. The layout and the
// query string literals must match the CDN exactly; they are not ours to
// change.

/// Derive the canonical CDN image URL for a product code.
///
/// Returns `None` when the code is too short to carry the six middle
/// characters the sharding scheme needs.
pub fn derive_image_url(code: &str) -> Option<String> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 8 {
        return None;
    }

    // Middle = everything between the first two and last two characters
    let middle = &chars[2..chars.len() - 2];
    if middle.len() != 6 {
        return None;
    }

    let reversed: Vec<char> = middle.iter().rev().copied().collect();

    let seg1 = reversed[0];
    let seg2 = reversed[1];
    // Two-character segments with their digits swapped
    let seg3: String = [reversed[3], reversed[2]].iter().collect();
    let seg4: String = [reversed[5], reversed[4]].iter().collect();

    Some(format!(
        "https://image.hmall.com/static/{}/{}/{}/{}/{}_0.jpg?RS=600x600&AR=0&ao=1&cVer=202511120001&SF=webp",
        seg1, seg2, seg3, seg4, code
    ))
}
