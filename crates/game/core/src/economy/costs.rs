use crate::config::EconomyConfig;

/// Cost of the next purchase given how many were made before.
///
/// Reads the table while it lasts, then grows by `step` per purchase.
pub fn tiered_cost(table: &[u32], step: u32, purchases: u32) -> u32 {
    let n = purchases as usize;
    match table.get(n) {
        Some(cost) => *cost,
        None => {
            let last = table.last().copied().unwrap_or(0);
            let beyond = (n + 1 - table.len()) as u32;
            last.saturating_add(step.saturating_mul(beyond))
        }
    }
}

pub fn remove_cost(economy: &EconomyConfig, purchases: u32) -> u32 {
    tiered_cost(&economy.remove_costs, economy.cost_step, purchases)
}

pub fn upgrade_cost(economy: &EconomyConfig, purchases: u32) -> u32 {
    tiered_cost(&economy.upgrade_costs, economy.cost_step, purchases)
}
