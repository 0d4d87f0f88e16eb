use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct EventCount {
    #[schema(example = "Code Clash 5.0")]
    pub name: String,
    #[schema(example = 42)]
    pub value: u64,
}

#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TrendPoint {
    #[schema(example = "Feb 4")]
    pub date: String,
    #[schema(example = 7)]
    pub count: u64,
}

#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_registrations: u64,
    pub registrations_by_event: Vec<EventCount>,
    pub registration_trend: Vec<TrendPoint>,
}

impl StatsResponse {
    /// Aggregate `(event name, created_at)` pairs into dashboard figures.
    pub fn from_rows(rows: &[(String, DateTime<Utc>)]) -> Self {
        let mut by_event: HashMap<&str, u64> = HashMap::new();
        let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for (name, created_at) in rows {
            *by_event.entry(name.as_str()).or_default() += 1;
            *by_day.entry(created_at.date_naive()).or_default() += 1;
        }

        let mut registrations_by_event: Vec<EventCount> = by_event
            .into_iter()
            .map(|(name, value)| EventCount {
                name: name.to_string(),
                value,
            })
            .collect();
        registrations_by_event.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(&b.name)));

        let registration_trend = by_day
            .into_iter()
            .map(|(day, count)| TrendPoint {
                date: day.format("%b %-d").to_string(),
                count,
            })
            .collect();

        Self {
            total_registrations: rows.len() as u64,
            registrations_by_event,
            registration_trend,
        }
    }
}
