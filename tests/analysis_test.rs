//! End-to-end checks of the petal heuristic: encoded image bytes in,
//! `AnalysisResult` out, with a virtual clock and seeded randomness.

use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use petal_counter::analysis::analyzer::draw_confidence;
use petal_counter::{estimate_petals, scan, Analyzer, FlowerType, ManualPacer, PetalError, PixelBuffer};

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
    out
}

fn test_analyzer(seed: u64) -> Analyzer<ManualPacer, StdRng> {
    Analyzer::new(ManualPacer::new(), StdRng::seed_from_u64(seed), Duration::from_millis(2500))
}

// ============================================================================
// Synthetic images
// ============================================================================

#[test]
fn black_png_estimates_eight_petals() {
    let png = encode_png(&RgbaImage::from_pixel(120, 90, Rgba([0, 0, 0, 255])));
    let result = test_analyzer(1).analyze_bytes(&png).unwrap();

    assert_eq!(result.petal_count, 8);
    assert_eq!(result.flower_type, FlowerType::DaisyOrSunflower);
    assert_eq!(result.processing_time_ms, 2500);
    assert!((85.0..95.0).contains(&result.confidence));
}

#[test]
fn striped_png_saturates_the_estimate() {
    // alternating white/black rows: every disk pixel past the first row is an edge
    let img = RgbaImage::from_fn(64, 64, |_, y| {
        if y % 2 == 0 { Rgba([255, 255, 255, 255]) } else { Rgba([0, 0, 0, 255]) }
    });
    let pixels = PixelBuffer::decode(&encode_png(&img)).unwrap();
    let stats = scan(&pixels);

    // about half the disk pixels are white, nearly all are edges
    assert!(stats.color_variation > stats.bright_pixels);
    let result = test_analyzer(2).analyze(&pixels);
    assert_eq!(result.petal_count, estimate_petals(&stats));
    assert_eq!(result.flower_type, FlowerType::from_petal_count(result.petal_count));
}

#[test]
fn bright_centre_on_dark_ground() {
    let img = RgbaImage::from_fn(100, 100, |x, y| {
        let dx = x as f64 - 50.0;
        let dy = y as f64 - 50.0;
        if (dx * dx + dy * dy).sqrt() < 20.0 { Rgba([250, 240, 200, 255]) } else { Rgba([20, 60, 20, 255]) }
    });
    let pixels = PixelBuffer::from_fn(100, 100, |x, y| img.get_pixel(x, y).0).unwrap();
    let stats = scan(&pixels);

    assert!(stats.bright_pixels > 1000);
    assert!(stats.color_variation > 0);
    let estimate = estimate_petals(&stats);
    assert!(estimate > 8);
}

#[test]
fn transparent_background_is_not_bright() {
    let png = encode_png(&RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 0])));
    let stats = scan(&PixelBuffer::decode(&png).unwrap());

    assert_eq!(stats.bright_pixels, 0);
    assert_eq!(stats.color_variation, 0);
    assert_eq!(estimate_petals(&stats), 8);
}

#[test]
fn same_seed_gives_same_result() {
    let png = encode_png(&RgbaImage::from_pixel(10, 10, Rgba([200, 10, 10, 255])));
    let a = test_analyzer(42).analyze_bytes(&png).unwrap();
    let b = test_analyzer(42).analyze_bytes(&png).unwrap();
    assert_eq!(a, b);
}

#[test]
fn corrupt_bytes_report_analysis_failure() {
    let mut png = encode_png(&RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255])));
    png.truncate(20);
    let err = test_analyzer(0).analyze_bytes(&png).unwrap_err();
    assert!(matches!(err, PetalError::AnalysisFailure { .. }));
    assert_eq!(err.user_message(), "Failed to analyze image. Please try again.");
}

// ============================================================================
// Range invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn petal_estimate_stays_in_range(
        width in 1u32..24,
        height in 1u32..24,
        seed in any::<u64>(),
    ) {
        use rand::Rng;
        let mut rng = StdRng::seed_from_u64(seed);
        let rgba: Vec<u8> = (0..width * height * 4).map(|_| rng.gen()).collect();
        let pixels = PixelBuffer::new(width, height, rgba).unwrap();

        let petals = estimate_petals(&scan(&pixels));
        prop_assert!((3..=50).contains(&petals));
    }

    #[test]
    fn confidence_stays_in_range(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..32 {
            let c = draw_confidence(&mut rng);
            prop_assert!(c >= 85.0 && c < 95.0);
        }
    }
}
