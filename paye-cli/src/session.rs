//! Calculator session state.
//!
//! Holds the amount, period and category the user is working with and applies
//! the input rules: amounts are clamped to the period's range, switching
//! period converts the amount, and picking a category or preset replaces it.

use paye_core::{
    BandSchedule, Category, PayPeriod, PayeCalculator, PresetLevel, TaxComputation, compute,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

/// Largest monthly amount the input accepts.
pub const MAX_MONTHLY_AMOUNT: Decimal = dec!(100000000);

/// Largest yearly amount the input accepts.
pub const MAX_YEARLY_AMOUNT: Decimal = dec!(1200000000);

/// Upper end of the accepted range for `period`.
pub fn max_amount(period: PayPeriod) -> Decimal {
    match period {
        PayPeriod::Monthly => MAX_MONTHLY_AMOUNT,
        PayPeriod::Yearly => MAX_YEARLY_AMOUNT,
    }
}

/// Slider step for `period`.
pub fn amount_step(period: PayPeriod) -> Decimal {
    match period {
        PayPeriod::Monthly => dec!(10000),
        PayPeriod::Yearly => dec!(100000),
    }
}

/// Clamps `amount` into `[0, max_amount(period)]`.
pub fn clamp_amount(
    amount: Decimal,
    period: PayPeriod,
) -> Decimal {
    amount.max(Decimal::ZERO).min(max_amount(period))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSession {
    amount: Decimal,
    period: PayPeriod,
    category: Category,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(PayPeriod::Monthly, Category::Employee)
    }
}

impl CalculatorSession {
    /// Starts at the category's entry preset for `period`.
    pub fn new(
        period: PayPeriod,
        category: Category,
    ) -> Self {
        Self {
            amount: category.preset(PresetLevel::Entry, period),
            period,
            category,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn period(&self) -> PayPeriod {
        self.period
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Sets the amount, clamped to the current period's range.
    pub fn set_amount(
        &mut self,
        amount: Decimal,
    ) {
        let clamped = clamp_amount(amount, self.period);
        if clamped != amount {
            debug!(requested = %amount, clamped = %clamped, "amount clamped");
        }
        self.amount = clamped;
    }

    /// Switches period, converting the amount: ×12 to yearly, ÷12 rounded to
    /// a whole unit to monthly.
    pub fn set_period(
        &mut self,
        period: PayPeriod,
    ) {
        self.amount = match (self.period, period) {
            (PayPeriod::Monthly, PayPeriod::Yearly) => self.amount * Decimal::from(12),
            (PayPeriod::Yearly, PayPeriod::Monthly) => (self.amount / Decimal::from(12))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            _ => self.amount,
        };
        self.period = period;
    }

    /// Switches category and resets the amount to its entry preset.
    pub fn select_category(
        &mut self,
        category: Category,
    ) {
        self.category = category;
        self.amount = category.preset(PresetLevel::Entry, self.period);
    }

    /// Replaces the amount with one of the category's presets.
    pub fn select_preset(
        &mut self,
        level: PresetLevel,
    ) {
        self.amount = self.category.preset(level, self.period);
    }

    /// The preset level whose amount equals the current amount, if any.
    pub fn active_preset(&self) -> Option<PresetLevel> {
        PresetLevel::all()
            .iter()
            .copied()
            .find(|level| self.category.preset(*level, self.period) == self.amount)
    }

    /// Computes PAYE for the current amount and period. The category plays
    /// no part.
    pub fn compute(&self) -> TaxComputation {
        compute(self.amount, self.period)
    }

    /// Like [`compute`](Self::compute) but against a caller-supplied schedule.
    pub fn compute_with(
        &self,
        schedule: &BandSchedule,
    ) -> TaxComputation {
        PayeCalculator::new(schedule).calculate(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_session_is_employee_entry_level_monthly() {
        let session = CalculatorSession::default();

        assert_eq!(session.amount(), dec!(200000));
        assert_eq!(session.period(), PayPeriod::Monthly);
        assert_eq!(session.category(), Category::Employee);
        assert_eq!(session.active_preset(), Some(PresetLevel::Entry));
    }

    #[test]
    fn switching_to_yearly_multiplies_by_twelve() {
        let mut session = CalculatorSession::default();

        session.set_period(PayPeriod::Yearly);

        assert_eq!(session.amount(), dec!(2400000));
        assert_eq!(session.period(), PayPeriod::Yearly);
    }

    #[test]
    fn switching_back_to_monthly_restores_amount() {
        let mut session = CalculatorSession::default();

        session.set_period(PayPeriod::Yearly);
        session.set_period(PayPeriod::Monthly);

        assert_eq!(session.amount(), dec!(200000));
    }

    #[test]
    fn switching_to_monthly_rounds_to_whole_unit() {
        let mut session = CalculatorSession::new(PayPeriod::Yearly, Category::Employee);
        session.set_amount(dec!(1000000));

        session.set_period(PayPeriod::Monthly);

        // 83,333.33 rounds down
        assert_eq!(session.amount(), dec!(83333));
    }

    #[test]
    fn switching_to_same_period_keeps_amount() {
        let mut session = CalculatorSession::default();
        session.set_amount(dec!(123456));

        session.set_period(PayPeriod::Monthly);

        assert_eq!(session.amount(), dec!(123456));
    }

    #[test]
    fn set_amount_clamps_to_period_range() {
        let mut session = CalculatorSession::default();

        session.set_amount(dec!(250000000));
        assert_eq!(session.amount(), MAX_MONTHLY_AMOUNT);

        session.set_amount(dec!(-1));
        assert_eq!(session.amount(), Decimal::ZERO);

        session.set_period(PayPeriod::Yearly);
        session.set_amount(dec!(5000000000));
        assert_eq!(session.amount(), MAX_YEARLY_AMOUNT);
    }

    #[test]
    fn select_category_resets_to_entry_preset_for_period() {
        let mut session = CalculatorSession::default();
        session.set_period(PayPeriod::Yearly);

        session.select_category(Category::OilGas);

        assert_eq!(session.amount(), dec!(36000000));
        assert_eq!(session.active_preset(), Some(PresetLevel::Entry));
    }

    #[test]
    fn select_preset_uses_category_ladder() {
        let mut session = CalculatorSession::new(PayPeriod::Monthly, Category::Creator);

        session.select_preset(PresetLevel::Executive);

        assert_eq!(session.amount(), dec!(18000000));
        assert_eq!(session.active_preset(), Some(PresetLevel::Executive));
    }

    #[test]
    fn custom_amount_has_no_active_preset() {
        let mut session = CalculatorSession::default();

        session.set_amount(dec!(123456));

        assert_eq!(session.active_preset(), None);
    }

    #[test]
    fn category_does_not_affect_computation() {
        let reference = {
            let mut session = CalculatorSession::default();
            session.set_amount(dec!(750000));
            session.compute()
        };

        for category in Category::all() {
            let mut session = CalculatorSession::new(PayPeriod::Monthly, *category);
            session.set_amount(dec!(750000));
            assert_eq!(session.compute(), reference, "{category}");
        }
    }

    #[test]
    fn session_compute_matches_reference_scenario() {
        let result = CalculatorSession::default().compute();

        assert_eq!(result.total_tax, dec!(20000));
        assert_eq!(result.net_amount, dec!(180000));
    }

    #[test]
    fn step_is_coarser_for_yearly() {
        assert_eq!(amount_step(PayPeriod::Monthly), dec!(10000));
        assert_eq!(amount_step(PayPeriod::Yearly), dec!(100000));
    }
}
