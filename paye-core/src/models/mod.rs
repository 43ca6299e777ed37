mod category;
mod pay_period;
mod tax_band;
mod tax_computation;

pub use category::{Category, ParseCategoryError, ParsePresetError, PresetLevel, Presets};
pub use pay_period::{ParsePeriodError, PayPeriod};
pub use tax_band::{TaxBand, TaxBandResult};
pub use tax_computation::TaxComputation;
