use crate::filters::{filter_deals, format_currency};
use crate::models::{AuditRow, ViewState};
use crate::store::DataStore;

/// One table row per deal that survives the manager filter.
pub fn render(store: &DataStore, state: &ViewState) -> Vec<AuditRow> {
    filter_deals(store.deals(), state.manager)
        .into_iter()
        .map(|deal| AuditRow {
            deal_id: deal.id,
            title: deal.title.clone(),
            manager_name: store.manager_name(deal.manager_id).to_string(),
            amount: format_currency(deal.amount),
            stage_slug: deal.stage.slug().to_string(),
            stage_label: deal.stage.label().to_string(),
            probability: deal.probability,
            health_positive: deal.health_positive.clone(),
            health_negative: deal.health_negative.clone(),
            last_contact: deal.last_contact.clone(),
        })
        .collect()
}
