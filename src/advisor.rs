use crate::filters::format_currency;
use crate::models::{CallRecord, CallScores, Recommendation, Sentiment};
use crate::store::DataStore;

/// How many of the most recent deals the analysis summary covers.
const ANALYSIS_DEAL_WINDOW: usize = 5;
const URGENT_PROBABILITY_CEILING: u8 = 50;

struct CallRule {
    applies: fn(&CallScores, Sentiment) -> bool,
    icon: &'static str,
    text: &'static str,
}

// Order is part of the contract: advice accumulates in this sequence.
const CALL_RULES: &[CallRule] = &[
    CallRule {
        applies: |scores, _| scores.politeness < 5,
        icon: "💬",
        text: "Улучшите приветствие и используйте более вежливые формулировки в начале разговора.",
    },
    CallRule {
        applies: |scores, _| scores.understanding < 4,
        icon: "🎯",
        text: "Задавайте больше уточняющих вопросов для лучшего понимания потребностей клиента.",
    },
    CallRule {
        applies: |scores, _| scores.solution < 4,
        icon: "💡",
        text: "Предлагайте конкретные решения с привязкой к проблемам клиента.",
    },
    CallRule {
        applies: |scores, _| scores.closing < 4,
        icon: "✅",
        text: "Обязательно назначайте следующий шаг и конкретную дату следующего контакта.",
    },
    CallRule {
        applies: |_, sentiment| sentiment == Sentiment::Negative,
        icon: "😊",
        text: "Обратите внимание на тональность разговора - клиент был недоволен.",
    },
];

/// Every rule that fires contributes its advice, in rule order. A clean call
/// collapses to a single reinforcement message.
pub fn call_recommendations(call: &CallRecord) -> Vec<Recommendation> {
    let mut recommendations = CALL_RULES
        .iter()
        .filter(|rule| (rule.applies)(&call.scores, call.sentiment))
        .map(|rule| Recommendation {
            icon: rule.icon.to_string(),
            text: rule.text.to_string(),
        })
        .collect::<Vec<_>>();

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            icon: "🌟".to_string(),
            text: "Отличный звонок! Продолжайте в том же духе.".to_string(),
        });
    }

    recommendations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTopic {
    DealAnalysis,
    Proposal,
    ColdLeads,
    EmailTemplate,
}

// First matching row wins; rows are never combined.
const ASSISTANT_ROUTES: &[(&[&str], AssistantTopic)] = &[
    (&["анализ", "сделк"], AssistantTopic::DealAnalysis),
    (&["кп", "предложени"], AssistantTopic::Proposal),
    (&["рекомендаци", "холодн"], AssistantTopic::ColdLeads),
    (&["письмо", "email"], AssistantTopic::EmailTemplate),
];

pub fn route_message(message: &str) -> Option<AssistantTopic> {
    let lowered = message.to_lowercase();
    ASSISTANT_ROUTES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(_, topic)| *topic)
}

pub fn assistant_reply(store: &DataStore, message: &str) -> String {
    match route_message(message) {
        Some(AssistantTopic::DealAnalysis) => deal_analysis_reply(store),
        Some(AssistantTopic::Proposal) => PROPOSAL_REPLY.to_string(),
        Some(AssistantTopic::ColdLeads) => COLD_LEADS_REPLY.to_string(),
        Some(AssistantTopic::EmailTemplate) => EMAIL_TEMPLATE_REPLY.to_string(),
        None => CAPABILITY_MENU.to_string(),
    }
}

/// The summary figures are recomputed from the live deal collection on every
/// call; nothing here is cached.
fn deal_analysis_reply(store: &DataStore) -> String {
    let window = store
        .deals()
        .iter()
        .take(ANALYSIS_DEAL_WINDOW)
        .collect::<Vec<_>>();

    let total_amount: i64 = window.iter().map(|deal| deal.amount).sum();
    let average_probability = if window.is_empty() {
        0
    } else {
        let sum: u32 = window.iter().map(|deal| u32::from(deal.probability)).sum();
        ((sum as f64) / (window.len() as f64)).round() as u32
    };

    let urgent = window
        .iter()
        .filter(|deal| deal.probability < URGENT_PROBABILITY_CEILING)
        .collect::<Vec<_>>();
    let urgent_titles = urgent
        .iter()
        .map(|deal| deal.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut reply = format!(
        "📊 Анализ последних {} сделок:\n\n\
         • Средняя вероятность: {}%\n\
         • Общая сумма: {}\n\
         • Требуют срочного внимания: {}",
        window.len(),
        average_probability,
        format_currency(total_amount),
        urgent.len(),
    );
    if !urgent.is_empty() {
        reply.push_str(&format!(
            "\n• Рекомендую связаться с клиентами: {urgent_titles}"
        ));
    }
    reply
}

const PROPOSAL_REPLY: &str = "📄 Коммерческое предложение сгенерировано:\n\n\
Уважаемый клиент!\n\n\
Представляем вашему вниманию RUBI Chat Pro - инновационную платформу для управления \
отделом продаж с AI-анализом звонков.\n\n\
Ключевые преимущества:\n\
• Автоматизация контроля воронки продаж\n\
• Транскрибация и анализ качества звонков\n\
• AI-рекомендации для каждой сделки\n\
• Экономия 80% времени РОПа\n\n\
Стоимость: от 49 000 ₽/мес";

const COLD_LEADS_REPLY: &str = "💡 Рекомендации по холодным лидам:\n\n\
1. Сделка №4 (ООО МегаБизнес) - не было контакта 15 дней. Срочно позвонить!\n\
2. Сделка №2 (ЗАО Промторг) - низкая активность. Предложить встречу.\n\
3. Используйте модуль \"Оценка звонков\" для анализа предыдущих разговоров\n\
4. Обновите данные в CRM по всем холодным сделкам";

const EMAIL_TEMPLATE_REPLY: &str = "✉️ Шаблон письма клиенту:\n\n\
Тема: Предложение по оптимизации продаж\n\n\
Добрый день, [Имя]!\n\n\
Благодарю за уделенное время в нашем недавнем разговоре. Как и обещал, направляю \
детальную информацию о RUBI Chat Pro.\n\n\
Наше решение поможет вам:\n\
• Увеличить выполнение плана на 25-40%\n\
• Сократить время на рутинные задачи в 5 раз\n\
• Получить полную прозрачность работы отдела\n\n\
Готов ответить на любые вопросы.\n\n\
С уважением,\n\
[Ваше имя]";

const CAPABILITY_MENU: &str = "Понял ваш запрос. Я могу помочь с:\n\
• Анализом сделок и показателей\n\
• Генерацией КП и писем\n\
• Рекомендациями по работе с клиентами\n\
• Оценкой эффективности менеджеров\n\n\
Просто выберите действие из быстрых команд или задайте вопрос.";
