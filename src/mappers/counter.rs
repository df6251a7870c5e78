use crate::foundation::core::TargetId;

/// Numeric counter that counts up once when it first scrolls into view.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Counter {
    /// Element showing the number.
    pub target: TargetId,
    /// Final value.
    pub target_value: u64,
    /// Set once the count-up has started; guards against re-triggering.
    pub triggered: bool,
    money: bool,
    whole_millions: bool,
}

impl Counter {
    /// Counter for `target_value`. Values at or above `money_threshold` display as money.
    pub fn new(target: TargetId, target_value: u64, money_threshold: u64) -> Self {
        Self {
            target,
            target_value,
            triggered: false,
            money: target_value >= money_threshold,
            whole_millions: target_value >= 10_000_000,
        }
    }

    /// Claim the one-shot animation. Returns `true` only the first time.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    /// Re-arm the counter.
    pub fn reset(&mut self) {
        self.triggered = false;
    }

    /// Text shown for an intermediate `value`.
    pub fn format(&self, value: f64) -> String {
        let clean = value.max(0.0).ceil();
        if self.money {
            let millions = clean / 1_000_000.0;
            if self.whole_millions {
                format!("R$ {millions:.0}M+")
            } else {
                format!("R$ {millions:.1}M+")
            }
        } else {
            format!("{}", clean as u64)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mappers/counter.rs"]
mod tests;
