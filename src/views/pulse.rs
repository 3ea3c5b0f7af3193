use crate::filters::{filter_deals, format_currency, health_band};
use crate::models::{Deal, PulseCard, ViewState};
use crate::store::DataStore;

const ACTION_CONTACT_URGENTLY: &str = "Срочно связаться с клиентом";
const ACTION_UPDATE_CRM: &str = "Обновить информацию в CRM";
const ACTION_EXTRA_PRESENTATION: &str = "Провести дополнительную презентацию";
const ACTION_STAY_ON_PLAN: &str = "Продолжить работу по плану";

/// Deals as probability cards with a suggested next-action plan.
pub fn render(store: &DataStore, state: &ViewState) -> Vec<PulseCard> {
    filter_deals(store.deals(), state.manager)
        .into_iter()
        .map(|deal| PulseCard {
            deal_id: deal.id,
            title: deal.title.clone(),
            manager_name: store.manager_name(deal.manager_id).to_string(),
            probability: deal.probability,
            probability_band: health_band(deal.probability),
            amount: format_currency(deal.amount),
            stage_label: deal.stage.label().to_string(),
            last_contact: deal.last_contact.clone(),
            action_plan: action_plan(deal),
        })
        .collect()
}

// The two leading rules are independent of the probability rule; both may
// contribute before it. The fallback only applies to an otherwise empty plan.
pub fn action_plan(deal: &Deal) -> Vec<String> {
    let mut plan = Vec::new();
    if !deal.health_negative.is_empty() {
        plan.push(ACTION_CONTACT_URGENTLY.to_string());
        plan.push(ACTION_UPDATE_CRM.to_string());
    }
    if deal.probability < 50 {
        plan.push(ACTION_EXTRA_PRESENTATION.to_string());
    }
    if plan.is_empty() {
        plan.push(ACTION_STAY_ON_PLAN.to_string());
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::{action_plan, render};
    use crate::models::{HealthBand, ManagerFilter, ViewState};
    use crate::store::DataStore;

    #[test]
    fn troubled_deal_gets_all_three_actions_in_order() {
        let store = DataStore::sample();
        let deal = &store.deals()[1];
        assert_eq!(deal.probability, 45);
        assert!(!deal.health_negative.is_empty());

        let plan = action_plan(deal);
        assert_eq!(
            plan,
            vec![
                "Срочно связаться с клиентом",
                "Обновить информацию в CRM",
                "Провести дополнительную презентацию",
            ]
        );
    }

    #[test]
    fn healthy_deal_falls_back_to_stay_on_plan() {
        let store = DataStore::sample();
        let deal = &store.deals()[0];
        assert!(deal.health_negative.is_empty());
        assert!(deal.probability >= 50);

        assert_eq!(action_plan(deal), vec!["Продолжить работу по плану"]);
    }

    #[test]
    fn negatives_alone_skip_the_presentation_action() {
        let store = DataStore::sample();
        let deal = &store.deals()[2];
        assert_eq!(deal.probability, 60);

        let plan = action_plan(deal);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1], "Обновить информацию в CRM");
    }

    #[test]
    fn cards_follow_the_manager_filter_and_band_probability() {
        let store = DataStore::sample();
        let state = ViewState::default().with_manager(ManagerFilter::Id(4));
        let cards = render(&store, &state);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].probability_band, HealthBand::Low);
        assert_eq!(cards[0].stage_label, "Проиграна");
        assert_eq!(cards[0].amount, "920\u{a0}000 ₽");
    }
}
