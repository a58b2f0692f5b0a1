//! Token cost accounting.
//!
//! Cost is a linear function of the token counts a call reports:
//! `prompt_tokens × input rate + completion_tokens × output rate`.
//! Rates are USD per token, keyed by model tier.

use serde::{Serialize, Serializer};

use crate::llm_client::{Completion, TokenUsage};

const PER_MILLION: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_token: f64,
    pub output_per_token: f64,
}

pub const GPT_4O_MINI: ModelPricing = ModelPricing {
    input_per_token: 0.15 / PER_MILLION,
    output_per_token: 0.60 / PER_MILLION,
};

pub const GPT_4O: ModelPricing = ModelPricing {
    input_per_token: 2.50 / PER_MILLION,
    output_per_token: 10.00 / PER_MILLION,
};

pub const GPT_35_TURBO: ModelPricing = ModelPricing {
    input_per_token: 0.50 / PER_MILLION,
    output_per_token: 1.50 / PER_MILLION,
};

/// Model name prefix → tier. Dated snapshots ("gpt-4o-2024-08-06") match by prefix.
const PRICING_TABLE: &[(&str, ModelPricing)] = &[
    ("gpt-4o-mini", GPT_4O_MINI),
    ("gpt-4o", GPT_4O),
    ("gpt-3.5-turbo", GPT_35_TURBO),
];

/// Looks up the tier for a model name (longest prefix wins). Unknown models bill as gpt-4o-mini.
pub fn pricing_for(model: &str) -> ModelPricing {
    PRICING_TABLE
        .iter()
        .filter(|(prefix, _)| model.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, pricing)| *pricing)
        .unwrap_or(GPT_4O_MINI)
}

impl ModelPricing {
    pub fn cost(&self, usage: &TokenUsage) -> f64 {
        usage.prompt_tokens as f64 * self.input_per_token
            + usage.completion_tokens as f64 * self.output_per_token
    }
}

pub fn format_usd(amount: f64) -> String {
    format!("${amount:.6}")
}

pub fn serialize_usd<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_usd(*amount))
}

/// Token and cost figures for one or more LLM calls, as reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub tokens_used: u32,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    #[serde(serialize_with = "serialize_usd")]
    pub estimated_cost: f64,
}

impl UsageReport {
    pub fn from_completion(completion: &Completion) -> Self {
        let usage = completion.usage;
        Self {
            tokens_used: usage.total_tokens,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            estimated_cost: pricing_for(&completion.model).cost(&usage),
        }
    }

    /// Straight sum over the given reports.
    pub fn sum<'a>(reports: impl IntoIterator<Item = &'a UsageReport>) -> Self {
        reports
            .into_iter()
            .fold(UsageReport::default(), |acc, r| UsageReport {
                tokens_used: acc.tokens_used + r.tokens_used,
                prompt_tokens: acc.prompt_tokens + r.prompt_tokens,
                completion_tokens: acc.completion_tokens + r.completion_tokens,
                estimated_cost: acc.estimated_cost + r.estimated_cost,
            })
    }
}
