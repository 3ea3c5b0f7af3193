use crate::errors::{AppError, AppResult};
use crate::models::{
    CallRecord, CallScores, Deal, DealStage, DealStats, KpiSnapshot, Manager, ManagerStatus,
    Sentiment,
};
use chrono::NaiveDate;

/// Read-only collection backing every module. Construction validates the
/// cross-record references once so renderers never have to.
#[derive(Debug, Clone)]
pub struct DataStore {
    managers: Vec<Manager>,
    deals: Vec<Deal>,
    calls: Vec<CallRecord>,
    kpi: KpiSnapshot,
}

impl DataStore {
    pub fn new(
        managers: Vec<Manager>,
        deals: Vec<Deal>,
        calls: Vec<CallRecord>,
        kpi: KpiSnapshot,
    ) -> AppResult<Self> {
        let store = Self {
            managers,
            deals,
            calls,
            kpi,
        };
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> AppResult<()> {
        for manager in &self.managers {
            if manager.health_score > 100 {
                return Err(AppError::Validation(format!(
                    "manager {} health score {} exceeds 100",
                    manager.id, manager.health_score
                )));
            }
        }

        for deal in &self.deals {
            if self.manager_by_id(deal.manager_id).is_none() {
                return Err(AppError::Validation(format!(
                    "deal {} references unknown manager {}",
                    deal.id, deal.manager_id
                )));
            }
            if deal.probability > 100 {
                return Err(AppError::Validation(format!(
                    "deal {} probability {} exceeds 100",
                    deal.id, deal.probability
                )));
            }
        }

        for call in &self.calls {
            if self.manager_by_id(call.manager_id).is_none() {
                return Err(AppError::Validation(format!(
                    "call {} references unknown manager {}",
                    call.id, call.manager_id
                )));
            }
            if call.quality_score > 20 {
                return Err(AppError::Validation(format!(
                    "call {} quality score {} exceeds 20",
                    call.id, call.quality_score
                )));
            }
            let subs = [
                call.scores.politeness,
                call.scores.understanding,
                call.scores.solution,
                call.scores.closing,
            ];
            if subs.iter().any(|score| *score > 5) {
                return Err(AppError::Validation(format!(
                    "call {} has a sub-score above 5",
                    call.id
                )));
            }
        }

        Ok(())
    }

    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    pub fn kpi(&self) -> &KpiSnapshot {
        &self.kpi
    }

    pub fn manager_by_id(&self, id: u32) -> Option<&Manager> {
        self.managers.iter().find(|manager| manager.id == id)
    }

    /// Display name for a manager id, or a dash when the id is unknown.
    /// Validation makes the dash unreachable for store-owned records.
    pub fn manager_name(&self, id: u32) -> &str {
        self.manager_by_id(id)
            .map(|manager| manager.name.as_str())
            .unwrap_or("—")
    }

    pub fn call_by_id(&self, id: u32) -> Option<&CallRecord> {
        self.calls.iter().find(|call| call.id == id)
    }

    /// Fixed demo dataset used until a live CRM import exists.
    pub fn sample() -> Self {
        let managers = vec![
            Manager {
                id: 1,
                name: "Иван".to_string(),
                health_score: 89,
                status: ManagerStatus::Potential,
                emoji: "👨‍💼".to_string(),
            },
            Manager {
                id: 2,
                name: "Ирина".to_string(),
                health_score: 65,
                status: ManagerStatus::Cold,
                emoji: "👩‍💼".to_string(),
            },
            Manager {
                id: 3,
                name: "Артем".to_string(),
                health_score: 74,
                status: ManagerStatus::Potential,
                emoji: "👨‍💼".to_string(),
            },
            Manager {
                id: 4,
                name: "Мария".to_string(),
                health_score: 30,
                status: ManagerStatus::Optimism,
                emoji: "👩‍💼".to_string(),
            },
        ];

        let deals = vec![
            Deal {
                id: 1,
                title: "Сделка №1 - ООО Техцентр".to_string(),
                manager_id: 1,
                amount: 250_000,
                stage: DealStage::Negotiation,
                health_positive: vec![
                    "Может быть в статусе ещё 18 дней".to_string(),
                    "Укладывается в цикл сделки".to_string(),
                    "Есть контакт в карточке".to_string(),
                ],
                health_negative: vec![],
                last_contact: "3 дня назад".to_string(),
                probability: 85,
            },
            Deal {
                id: 2,
                title: "Сделка №2 - ЗАО Промторг".to_string(),
                manager_id: 2,
                amount: 450_000,
                stage: DealStage::Presentation,
                health_positive: vec!["Укладывается в цикл сделки".to_string()],
                health_negative: vec![
                    "Задача просрочена на 2 дня".to_string(),
                    "Нет компании в карточке".to_string(),
                ],
                last_contact: "10 дней назад".to_string(),
                probability: 45,
            },
            Deal {
                id: 3,
                title: "Сделка №3 - ИП Стройсервис".to_string(),
                manager_id: 3,
                amount: 180_000,
                stage: DealStage::Tender,
                health_positive: vec!["Есть контакт в карточке".to_string()],
                health_negative: vec!["Задача просрочена на 5 дней".to_string()],
                last_contact: "7 дней назад".to_string(),
                probability: 60,
            },
            Deal {
                id: 4,
                title: "Сделка №4 - ООО МегаБизнес".to_string(),
                manager_id: 4,
                amount: 920_000,
                stage: DealStage::Lost,
                health_positive: vec![],
                health_negative: vec![
                    "Нет компании в карточке".to_string(),
                    "Не звонили 15 дней".to_string(),
                ],
                last_contact: "15 дней назад".to_string(),
                probability: 15,
            },
            Deal {
                id: 5,
                title: "Сделка №5 - ООО Альфа".to_string(),
                manager_id: 1,
                amount: 350_000,
                stage: DealStage::Negotiation,
                health_positive: vec![
                    "Есть контакт в карточке".to_string(),
                    "Укладывается в цикл сделки".to_string(),
                ],
                health_negative: vec![],
                last_contact: "1 день назад".to_string(),
                probability: 75,
            },
        ];

        let calls = vec![
            CallRecord {
                id: 1,
                filename: "call_20241031_001.mp3".to_string(),
                manager_id: 1,
                client: "ООО Техцентр".to_string(),
                duration: "12:45".to_string(),
                date: sample_date(2025, 10, 31),
                transcript: "Менеджер: Добрый день! Это компания РУБИ ЧАТ. Как дела? \
                             Клиент: Здравствуйте, спасибо, всё хорошо. \
                             Менеджер: Я звоню по вашему запросу о нашем сервисе управления продажами. \
                             Клиент: Да, мне интересно узнать подробнее. \
                             Менеджер: Наш AI-сервис автоматизирует контроль вашей воронки продаж, \
                             экономит 80% времени руководителя на анализ CRM."
                    .to_string(),
                quality_score: 18,
                scores: CallScores {
                    politeness: 5,
                    understanding: 5,
                    solution: 4,
                    closing: 4,
                },
                sentiment: Sentiment::Positive,
                key_phrases: vec![
                    "автоматизирует контроль".to_string(),
                    "80% времени".to_string(),
                    "воронка продаж".to_string(),
                ],
            },
            CallRecord {
                id: 2,
                filename: "call_20241030_002.mp3".to_string(),
                manager_id: 2,
                client: "ЗАО Промторг".to_string(),
                duration: "08:22".to_string(),
                date: sample_date(2025, 10, 30),
                transcript: "Менеджер: Привет, это Ирина из РУБИ ЧАТ. \
                             Клиент: Привет. \
                             Менеджер: Я звоню по поводу вашей заявки. \
                             Клиент: Хорошо, слушаю. \
                             Менеджер: У нас есть интересный модуль для аудита воронки. \
                             Клиент: Может, напишешь мне всю информацию? \
                             Менеджер: Конечно, отправлю КП сегодня."
                    .to_string(),
                quality_score: 12,
                scores: CallScores {
                    politeness: 4,
                    understanding: 3,
                    solution: 2,
                    closing: 3,
                },
                sentiment: Sentiment::Neutral,
                key_phrases: vec!["аудита воронки".to_string(), "модуль".to_string()],
            },
        ];

        let kpi = KpiSnapshot {
            plan_month: 3_560_000,
            fact_current: 1_860_000,
            potential: 1_250_000,
            deficit: 450_000,
            days_left: 12,
            deal_stats: DealStats {
                without_tasks: 38,
                overdue_tasks: 46,
                stuck_deals: 0,
                lost_deals: 29,
            },
        };

        Self {
            managers,
            deals,
            calls,
            kpi,
        }
    }
}

fn sample_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

#[cfg(test)]
mod tests {
    use super::DataStore;
    use crate::errors::AppError;
    use crate::models::{DealStage, ManagerFilter};

    #[test]
    fn sample_store_passes_validation() {
        let store = DataStore::sample();
        let rebuilt = DataStore::new(
            store.managers().to_vec(),
            store.deals().to_vec(),
            store.calls().to_vec(),
            store.kpi().clone(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn dangling_manager_reference_is_rejected() {
        let store = DataStore::sample();
        let mut deals = store.deals().to_vec();
        deals[0].manager_id = 99;

        let result = DataStore::new(
            store.managers().to_vec(),
            deals,
            store.calls().to_vec(),
            store.kpi().clone(),
        );
        match result {
            Err(AppError::Validation(message)) => {
                assert!(message.contains("unknown manager 99"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let store = DataStore::sample();
        let mut deals = store.deals().to_vec();
        deals[0].probability = 101;

        let result = DataStore::new(
            store.managers().to_vec(),
            deals,
            store.calls().to_vec(),
            store.kpi().clone(),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_stage_code_survives_round_trip() {
        let raw = serde_json::json!("pilot");
        let stage: DealStage = serde_json::from_value(raw).expect("stage from value");
        assert_eq!(stage, DealStage::Other("pilot".to_string()));
        assert_eq!(stage.label(), "pilot");
    }

    #[test]
    fn manager_filter_wire_shape_is_stable() {
        let all = serde_json::to_value(ManagerFilter::All).expect("serialize all");
        assert_eq!(all, serde_json::json!("all"));
        let by_id = serde_json::to_value(ManagerFilter::Id(3)).expect("serialize id");
        assert_eq!(by_id, serde_json::json!({ "id": 3 }));
    }
}
