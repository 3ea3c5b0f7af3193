use crate::filters::{format_currency, health_band, plan_completion_percent};
use crate::models::{DashboardView, ManagerCard, ViewState};
use crate::store::DataStore;

/// KPI cards, plan progress and the manager grid. The manager grid is
/// intentionally unfiltered; the manager filter only narrows deal views.
pub fn render(store: &DataStore, _state: &ViewState) -> DashboardView {
    let kpi = store.kpi();

    let managers = store
        .managers()
        .iter()
        .map(|manager| ManagerCard {
            manager_id: manager.id,
            name: manager.name.clone(),
            emoji: manager.emoji.clone(),
            health_score: manager.health_score,
            health_band: health_band(manager.health_score),
        })
        .collect();

    DashboardView {
        plan_month: format_currency(kpi.plan_month),
        fact_current: format_currency(kpi.fact_current),
        potential: format_currency(kpi.potential),
        deficit: format_currency(kpi.deficit),
        completion_percent: plan_completion_percent(kpi.plan_month, kpi.fact_current),
        days_left: kpi.days_left,
        stats: kpi.deal_stats,
        managers,
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::models::{HealthBand, ViewState};
    use crate::store::DataStore;

    #[test]
    fn kpi_cards_are_formatted_and_percent_is_rounded() {
        let store = DataStore::sample();
        let view = render(&store, &ViewState::default());

        assert_eq!(view.plan_month, "3\u{a0}560\u{a0}000 ₽");
        assert_eq!(view.fact_current, "1\u{a0}860\u{a0}000 ₽");
        assert_eq!(view.completion_percent, 52);
        assert_eq!(view.stats.overdue_tasks, 46);
        assert_eq!(view.stats.stuck_deals, 0);
    }

    #[test]
    fn manager_grid_carries_health_bands() {
        let store = DataStore::sample();
        let view = render(&store, &ViewState::default());

        assert_eq!(view.managers.len(), 4);
        assert_eq!(view.managers[0].health_band, HealthBand::High);
        assert_eq!(view.managers[2].health_band, HealthBand::Medium);
        assert_eq!(view.managers[3].health_band, HealthBand::Low);
    }
}
