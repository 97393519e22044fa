use chrono::NaiveDate;
use rand::{Rng, RngCore};

use crate::models::chart::ChartPoint;
use crate::models::settings::{JitterBand, Settings};
use crate::services::valuation_service::round2;

pub const MIN_VOLUME: u64 = 1_000_000;
pub const MAX_VOLUME: u64 = 5_000_000;

/// Synthesizes a daily price series around a base price.
///
/// The series is decoration for the stock view, not market data: each day's
/// price is the base times a uniform draw from the jitter band, independent
/// of the previous day. Nothing is stored.
pub struct ChartSeriesGenerator {
    band: JitterBand,
    include_volume: bool,
}

impl ChartSeriesGenerator {
    /// An unusable band falls back to [`JitterBand::NARROW`].
    pub fn new(band: JitterBand, include_volume: bool) -> Self {
        let band = if band.is_valid() { band } else { JitterBand::NARROW };
        Self {
            band,
            include_volume,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.chart_band, settings.include_volume)
    }

    pub fn band(&self) -> JitterBand {
        self.band
    }

    /// `days` points, one per calendar day ending today (UTC), oldest first.
    pub fn generate(&self, base_price: f64, days: u32, rng: &mut dyn RngCore) -> Vec<ChartPoint> {
        let today = chrono::Utc::now().date_naive();
        self.generate_ending(base_price, days, today, rng)
    }

    /// `days` points, one per calendar day ending on `end`, oldest first.
    pub fn generate_ending(
        &self,
        base_price: f64,
        days: u32,
        end: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Vec<ChartPoint> {
        if days == 0 {
            return Vec::new();
        }

        let start = match end.checked_sub_signed(chrono::Duration::days(i64::from(days) - 1)) {
            Some(start) => start,
            None => return Vec::new(),
        };

        // Rounding to cents can step past a band edge that is not itself a
        // whole cent, so rounded prices are pulled back inside.
        let floor = base_price * self.band.low;
        let ceiling = base_price * self.band.high;

        let mut points = Vec::with_capacity(days as usize);
        let mut current_date = start;

        while current_date <= end {
            let multiplier: f64 = rng.gen_range(self.band.low..=self.band.high);
            let volume = self
                .include_volume
                .then(|| rng.gen_range(MIN_VOLUME..=MAX_VOLUME));

            points.push(ChartPoint {
                date: current_date,
                price: round2(base_price * multiplier).max(floor).min(ceiling),
                volume,
            });

            // Move to next day
            current_date = match current_date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        points
    }
}

impl Default for ChartSeriesGenerator {
    fn default() -> Self {
        Self::new(JitterBand::NARROW, true)
    }
}
