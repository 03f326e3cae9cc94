use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::analysis::flower_type::FlowerType;
use crate::analysis::heuristic::{estimate_petals, scan};
use crate::analysis::pacer::{Pacer, SystemPacer};
use crate::analysis::pixels::PixelBuffer;
use crate::analysis::result::AnalysisResult;
use crate::config::PetalConfig;
use crate::error::Result;

pub const MIN_CONFIDENCE: f64 = 85.0;
pub const MAX_CONFIDENCE: f64 = 95.0;
const CONFIDENCE_SPREAD: f64 = 10.0;

/// Runs the petal heuristic and holds the result back until the configured
/// delay has passed since the analysis started.
pub struct Analyzer<P: Pacer, R: Rng> {
    pacer: P,
    rng: R,
    delay: Duration,
}

impl Analyzer<SystemPacer, StdRng> {
    /// Real clock, entropy-seeded randomness, delay from config.
    pub fn from_config(config: &PetalConfig) -> Self {
        Analyzer::new(SystemPacer, StdRng::from_entropy(), config.analysis_delay())
    }
}

impl<P: Pacer, R: Rng> Analyzer<P, R> {
    pub fn new(pacer: P, rng: R, delay: Duration) -> Self {
        Analyzer { pacer, rng, delay }
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Decodes `bytes` and analyzes them; decode time counts toward the delay.
    pub fn analyze_bytes(&mut self, bytes: &[u8]) -> Result<AnalysisResult> {
        let started = self.pacer.now();
        let pixels = PixelBuffer::decode(bytes)?;
        log::debug!("decoded {}x{} image", pixels.width(), pixels.height());
        Ok(self.finish(started, &pixels))
    }

    pub fn analyze(&mut self, pixels: &PixelBuffer) -> AnalysisResult {
        let started = self.pacer.now();
        self.finish(started, pixels)
    }

    fn finish(&mut self, started: std::time::Instant, pixels: &PixelBuffer) -> AnalysisResult {
        let stats = scan(pixels);
        let petal_count = estimate_petals(&stats);
        let flower_type = FlowerType::from_petal_count(petal_count);
        let confidence = draw_confidence(&mut self.rng);

        let spent = self.pacer.now().saturating_duration_since(started);
        if spent < self.delay {
            self.pacer.sleep(self.delay - spent);
        }
        let processing_time_ms = self.pacer.now().saturating_duration_since(started).as_millis() as u64;

        log::info!(
            "analysis done: {} petals ({}), bright={} variation={}, {} ms",
            petal_count, flower_type, stats.bright_pixels, stats.color_variation, processing_time_ms
        );

        AnalysisResult { petal_count, confidence, processing_time_ms, flower_type }
    }
}

/// `min(85 + u*10, 95)` with `u` uniform on `[0, 1)`, kept strictly below 95.
pub fn draw_confidence<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let value = (MIN_CONFIDENCE + rng.gen::<f64>() * CONFIDENCE_SPREAD).min(MAX_CONFIDENCE);
    // u close enough to 1 rounds the sum up to exactly 95.0
    if value < MAX_CONFIDENCE {
        value
    } else {
        f64::from_bits(MAX_CONFIDENCE.to_bits() - 1)
    }
}
